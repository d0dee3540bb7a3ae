/*!
Canonical numbering of an NFA's states and the transition table derived from
it.

The table is what subset construction works from. Its shape is:

* Every state reachable from the entry gets a number. Numbers start at `1`
and are handed out in depth-first discovery order from the entry, so the
entry is always state `1`.
* For each number, a [`Row`] records the literal transitions by number and
the state's full epsilon-closure. Raw epsilon transitions do not appear in
the table; the closure subsumes them.
* The set of accepting numbers, and the alphabet of every character that
appears on some transition.
*/

use std::collections::{BTreeMap, BTreeSet};
use std::fmt;

use crate::nfa::{
    fragment::NFA,
    state::{StateID, Symbol},
};
use crate::sparse_set::SparseSet;

/// The canonical number of an NFA state in a [`TransitionTable`].
///
/// Unlike a [`StateID`], which is just a position in the NFA's arena, a state
/// number reflects the order in which states are discovered by a traversal
/// from the entry. Numbers start at `1`.
pub type StateNumber = usize;

/// One row of a [`TransitionTable`]: everything that can happen from a
/// single NFA state.
#[derive(Clone, Default, Eq, PartialEq)]
pub struct Row {
    transitions: BTreeMap<char, Vec<StateNumber>>,
    epsilon_closure: Vec<StateNumber>,
}

impl Row {
    /// Returns the states reachable by consuming `ch`, or an empty slice.
    pub fn transitions(&self, ch: char) -> &[StateNumber] {
        self.transitions.get(&ch).map_or(&[], |nums| nums.as_slice())
    }

    /// Iterate over the literal transitions of this row, ordered by
    /// character.
    pub fn iter(&self) -> impl Iterator<Item = (char, &[StateNumber])> + '_ {
        self.transitions.iter().map(|(&ch, nums)| (ch, nums.as_slice()))
    }

    /// Returns the epsilon-closure of this row's state, in ascending order.
    /// The closure always contains the state itself.
    pub fn epsilon_closure(&self) -> &[StateNumber] {
        &self.epsilon_closure
    }
}

impl fmt::Debug for Row {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        let join = |nums: &[StateNumber]| {
            nums.iter()
                .map(|n| n.to_string())
                .collect::<Vec<String>>()
                .join(", ")
        };
        for (ch, nums) in self.iter() {
            write!(f, "{:?} => {}; ", ch, join(nums))?;
        }
        write!(f, "ε* => {}", join(&self.epsilon_closure))
    }
}

/// The numbered transition table of an NFA.
///
/// This is built once per NFA, the first time it is asked for, and never
/// changes afterwards. See [`NFA::transition_table`].
#[derive(Clone)]
pub struct TransitionTable {
    /// Rows indexed by `number - 1`.
    rows: Vec<Row>,
    accepting: BTreeSet<StateNumber>,
    alphabet: BTreeSet<char>,
    /// The number given to each NFA state, indexed by state ID.
    numbers: Vec<Option<StateNumber>>,
    /// The memoized epsilon-closure of each NFA state, indexed by state ID.
    closures: Vec<Vec<StateID>>,
}

impl TransitionTable {
    pub(crate) fn new(nfa: &NFA) -> TransitionTable {
        let order = discovery_order(nfa);
        let mut numbers = vec![None; nfa.len()];
        for (i, &id) in order.iter().enumerate() {
            numbers[id] = Some(i + 1);
        }

        let mut closures = EpsilonClosures::new(nfa);
        let mut rows = Vec::with_capacity(order.len());
        let mut accepting = BTreeSet::new();
        let mut alphabet = BTreeSet::new();
        for &id in order.iter() {
            let state = nfa.state(id);
            let mut row = Row::default();
            for (sym, targets) in state.iter() {
                let ch = match sym {
                    Symbol::Epsilon => continue,
                    Symbol::Char(ch) => ch,
                };
                alphabet.insert(ch);
                row.transitions.insert(
                    ch,
                    targets.iter().filter_map(|&t| numbers[t]).collect(),
                );
            }
            row.epsilon_closure = closures
                .get(id)
                .iter()
                .filter_map(|&c| numbers[c])
                .collect();
            row.epsilon_closure.sort_unstable();
            if state.is_accepting() {
                accepting.insert(rows.len() + 1);
            }
            rows.push(row);
        }
        let closures = closures.into_vec();
        log!(log::debug!(
            "numbered NFA: {} reachable states (of {}), {} symbols, \
             {} accepting",
            rows.len(),
            nfa.len(),
            alphabet.len(),
            accepting.len(),
        ));
        TransitionTable { rows, accepting, alphabet, numbers, closures }
    }

    /// Returns the number of the NFA's entry state. This is always `1`.
    pub fn start(&self) -> StateNumber {
        1
    }

    /// Returns the row for the given state number, if it exists.
    pub fn row(&self, number: StateNumber) -> Option<&Row> {
        number.checked_sub(1).and_then(|i| self.rows.get(i))
    }

    /// Iterate over every row in this table, in ascending order of state
    /// number.
    pub fn iter(&self) -> impl Iterator<Item = (StateNumber, &Row)> + '_ {
        self.rows.iter().enumerate().map(|(i, row)| (i + 1, row))
    }

    /// Returns the number of rows, i.e., the number of states reachable from
    /// the entry.
    pub fn len(&self) -> usize {
        self.rows.len()
    }

    /// Always false, since the entry state is always reachable.
    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    /// Returns the numbers of the accepting states.
    pub fn accepting(&self) -> &BTreeSet<StateNumber> {
        &self.accepting
    }

    /// Returns every character that appears on a transition.
    pub fn alphabet(&self) -> &BTreeSet<char> {
        &self.alphabet
    }

    /// Returns the number given to the NFA state `id`, or `None` if that
    /// state is not reachable from the entry.
    pub fn number(&self, id: StateID) -> Option<StateNumber> {
        self.numbers.get(id).copied().flatten()
    }

    /// Returns the epsilon-closure of the NFA state `id` as state IDs, in
    /// the order they were discovered. The first element is `id` itself.
    pub fn closure(&self, id: StateID) -> &[StateID] {
        self.closures.get(id).map_or(&[], |ids| ids.as_slice())
    }
}

impl fmt::Debug for TransitionTable {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        writeln!(f, "TransitionTable(")?;
        for (number, row) in self.iter() {
            let status = if self.accepting.contains(&number) { '*' } else { ' ' };
            writeln!(f, "{}{:06?}: {:?}", status, number, row)?;
        }
        writeln!(f, ")")?;
        Ok(())
    }
}

impl NFA {
    /// Returns the numbered transition table of this NFA.
    ///
    /// The table is computed the first time this is called (by this or any
    /// other table accessor) and cached for the lifetime of the NFA.
    ///
    /// # Example
    ///
    /// ```
    /// use pattern_automata::NFA;
    ///
    /// let nfa = NFA::literal('a').concat(NFA::literal('b'));
    /// let table = nfa.transition_table();
    /// assert_eq!(4, table.len());
    /// assert_eq!(&[2], table.row(1).unwrap().transitions('a'));
    /// assert_eq!(&[2, 3], table.row(2).unwrap().epsilon_closure());
    /// # Ok::<(), pattern_automata::Error>(())
    /// ```
    pub fn transition_table(&self) -> &TransitionTable {
        self.table.get_or_init(|| TransitionTable::new(self))
    }

    /// Returns every character that appears on a transition of this NFA.
    pub fn alphabet(&self) -> &BTreeSet<char> {
        self.transition_table().alphabet()
    }

    /// Returns the numbers of this NFA's accepting states.
    pub fn accepting_numbers(&self) -> &BTreeSet<StateNumber> {
        self.transition_table().accepting()
    }

    /// Returns the number of this NFA's entry state.
    pub fn start_number(&self) -> StateNumber {
        self.transition_table().start()
    }

    /// Returns the epsilon-closure of the given state: every state reachable
    /// from it by following only epsilon transitions, including itself.
    pub fn epsilon_closure(&self, id: StateID) -> &[StateID] {
        self.transition_table().closure(id)
    }
}

/// Returns the states reachable from the entry in depth-first pre-order,
/// visiting transitions by symbol and then by insertion order. This is the
/// order in which states are numbered.
fn discovery_order(nfa: &NFA) -> Vec<StateID> {
    let mut seen = SparseSet::new(nfa.len());
    let mut stack = vec![nfa.entry()];
    while let Some(id) = stack.pop() {
        if !seen.insert(id) {
            continue;
        }
        let start = stack.len();
        for (_, targets) in nfa.state(id).iter() {
            stack.extend(targets.iter().copied());
        }
        // Children must be popped in the order they appear.
        stack[start..].reverse();
    }
    seen.iter().collect()
}

/// A memoizing computation of epsilon-closures.
///
/// Each closure is computed with an explicit stack, so cycles of epsilon
/// transitions are harmless. A closure is only memoized once it is complete,
/// which means a state on an epsilon cycle never caches a partial answer
/// taken while its neighbor's closure was still being computed.
struct EpsilonClosures<'a> {
    nfa: &'a NFA,
    memo: Vec<Option<Vec<StateID>>>,
    set: SparseSet,
    stack: Vec<StateID>,
}

impl<'a> EpsilonClosures<'a> {
    fn new(nfa: &'a NFA) -> EpsilonClosures<'a> {
        EpsilonClosures {
            nfa,
            memo: vec![None; nfa.len()],
            set: SparseSet::new(nfa.len()),
            stack: vec![],
        }
    }

    fn get(&mut self, start: StateID) -> &[StateID] {
        if self.memo[start].is_none() {
            let closure = self.compute(start);
            self.memo[start] = Some(closure);
        }
        self.memo[start].as_deref().unwrap_or(&[])
    }

    fn compute(&mut self, start: StateID) -> Vec<StateID> {
        self.set.clear();
        self.stack.push(start);
        while let Some(id) = self.stack.pop() {
            if !self.set.insert(id) {
                continue;
            }
            if let Some(ref done) = self.memo[id] {
                for &member in done.iter() {
                    self.set.insert(member);
                }
                continue;
            }
            for &next in self.nfa.state(id).epsilons().iter().rev() {
                if !self.set.contains(next) {
                    self.stack.push(next);
                }
            }
        }
        self.set.iter().collect()
    }

    fn into_vec(self) -> Vec<Vec<StateID>> {
        self.memo.into_iter().map(Option::unwrap_or_default).collect()
    }
}
