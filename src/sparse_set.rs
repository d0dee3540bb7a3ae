use std::fmt;

/// A sparse set of state indices.
///
/// This supports constant time addition and membership testing. Clearing an
/// entire set can also be done in constant time. Iteration yields elements
/// in the order in which they were inserted.
///
/// The data structure is based on: https://research.swtch.com/sparse
/// Note though that we don't actually use uninitialized memory.
///
/// The capacity is fixed at construction. Every value inserted must be less
/// than that capacity, which for our purposes is the number of states in an
/// automaton.
#[derive(Clone)]
pub(crate) struct SparseSet {
    /// The number of elements currently in this set.
    len: usize,
    /// Dense contains the elements in the order in which they were inserted.
    dense: Box<[usize]>,
    /// Sparse maps elements to their location in dense.
    ///
    /// A value is in the set if and only if
    /// sparse[value] < len && value == dense[sparse[value]].
    sparse: Box<[usize]>,
}

impl SparseSet {
    pub(crate) fn new(capacity: usize) -> SparseSet {
        SparseSet {
            len: 0,
            dense: vec![0; capacity].into_boxed_slice(),
            sparse: vec![0; capacity].into_boxed_slice(),
        }
    }

    pub(crate) fn len(&self) -> usize {
        self.len
    }

    pub(crate) fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Insert the value given. Returns false if it was already present.
    pub(crate) fn insert(&mut self, value: usize) -> bool {
        if self.contains(value) {
            return false;
        }
        let i = self.len();
        assert!(
            i < self.dense.len(),
            "{} exceeds capacity of {}",
            i,
            self.dense.len()
        );
        self.dense[i] = value;
        self.sparse[value] = i;
        self.len += 1;
        true
    }

    pub(crate) fn contains(&self, value: usize) -> bool {
        let i = self.sparse[value];
        i < self.len() && self.dense[i] == value
    }

    pub(crate) fn clear(&mut self) {
        self.len = 0;
    }

    pub(crate) fn iter(&self) -> SparseSetIter<'_> {
        SparseSetIter(self.dense[..self.len].iter())
    }
}

impl fmt::Debug for SparseSet {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        let elements: Vec<usize> = self.iter().collect();
        f.debug_tuple("SparseSet").field(&elements).finish()
    }
}

#[derive(Debug)]
pub(crate) struct SparseSetIter<'a>(std::slice::Iter<'a, usize>);

impl<'a> Iterator for SparseSetIter<'a> {
    type Item = usize;

    fn next(&mut self) -> Option<usize> {
        self.0.next().copied()
    }
}
