use std::collections::{BTreeMap, BTreeSet, HashMap, HashSet};

use crate::dfa::automaton::{Key, Label, DFA};
use crate::nfa::TransitionTable;
use crate::sparse_set::SparseSet;

/// Converts an NFA's numbered transition table into a DFA.
///
/// DFA states are first identified by [`Key`]s. Only once every reachable
/// key is known are they relabeled with small integers.
pub(crate) struct Determinizer<'a> {
    /// The table of the NFA we're converting.
    table: &'a TransitionTable,
    /// Every key seen so far, in the order it was first seen. This is the
    /// order in which labels are assigned.
    order: Vec<Key>,
    seen: HashSet<Key>,
    /// The transitions out of every key that has been compiled.
    transitions: HashMap<Key, BTreeMap<char, Key>>,
    accepting: HashSet<Key>,
    /// Scratch space for computing the next set of NFA states.
    sparse: SparseSet,
}

impl<'a> Determinizer<'a> {
    pub(crate) fn new(table: &'a TransitionTable) -> Determinizer<'a> {
        Determinizer {
            table,
            order: vec![],
            seen: HashSet::new(),
            transitions: HashMap::new(),
            accepting: HashSet::new(),
            // Numbers start at 1, so index 0 is never used.
            sparse: SparseSet::new(table.len() + 1),
        }
    }

    pub(crate) fn build(mut self) -> DFA {
        let table = self.table;
        let start = self.start_key();
        self.add_key(start.clone());
        let mut uncompiled = vec![start.clone()];
        while let Some(key) = uncompiled.pop() {
            // This happens before looking at any character, since a set can
            // accept even when the alphabet is empty.
            if self.is_accepting(&key) {
                self.accepting.insert(key.clone());
            }
            let mut row = BTreeMap::new();
            for &ch in table.alphabet() {
                let next = match self.next(&key, ch) {
                    None => continue,
                    Some(next) => next,
                };
                if self.add_key(next.clone()) {
                    uncompiled.push(next.clone());
                }
                row.insert(ch, next);
            }
            self.transitions.insert(key, row);
        }
        self.relabel(&start)
    }

    fn start_key(&self) -> Key {
        let closure = self
            .table
            .row(self.table.start())
            .map_or(&[][..], |row| row.epsilon_closure());
        Key::new(closure.to_vec())
    }

    /// Record a key as seen. Returns false if it was already known.
    fn add_key(&mut self, key: Key) -> bool {
        if self.seen.contains(&key) {
            return false;
        }
        log!(log::trace!(
            "new DFA state {} for {{{}}}",
            self.order.len() + 1,
            key
        ));
        self.seen.insert(key.clone());
        self.order.push(key);
        true
    }

    /// Compute the set of NFA states reachable from `key` by consuming `ch`,
    /// including the epsilon-closure of every state reached. Returns `None`
    /// if that set is empty.
    fn next(&mut self, key: &Key, ch: char) -> Option<Key> {
        let table = self.table;
        self.sparse.clear();
        for &number in key.numbers() {
            let row = match table.row(number) {
                None => continue,
                Some(row) => row,
            };
            for &target in row.transitions(ch) {
                let closure = table
                    .row(target)
                    .map_or(&[][..], |row| row.epsilon_closure());
                for &member in closure {
                    self.sparse.insert(member);
                }
            }
        }
        if self.sparse.is_empty() {
            return None;
        }
        Some(Key::new(self.sparse.iter().collect()))
    }

    fn is_accepting(&self, key: &Key) -> bool {
        let accepting = self.table.accepting();
        key.numbers().iter().any(|n| accepting.contains(n))
    }

    /// Replace every key with its label, in order of discovery starting at 1.
    fn relabel(self, start: &Key) -> DFA {
        let labels: HashMap<Key, Label> = self
            .order
            .iter()
            .cloned()
            .enumerate()
            .map(|(i, key)| (key, i + 1))
            .collect();
        let label = |key: &Key| -> Label { labels[key] };

        let mut transitions = BTreeMap::new();
        for (key, row) in self.transitions.iter() {
            let row: BTreeMap<char, Label> =
                row.iter().map(|(&ch, next)| (ch, label(next))).collect();
            transitions.insert(label(key), row);
        }
        let accepting: BTreeSet<Label> =
            self.accepting.iter().map(|key| label(key)).collect();
        let start = label(start);
        log!(log::debug!(
            "determinized {} NFA states into {} DFA states ({} accepting)",
            self.table.len(),
            self.order.len(),
            accepting.len(),
        ));
        DFA::from_parts(
            transitions,
            start,
            accepting,
            self.table.alphabet().clone(),
            self.order,
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::nfa::NFA;

    #[test]
    fn start_is_closure_of_entry() {
        let nfa = NFA::literal('a').choice(NFA::literal('b'));
        let dfa = DFA::new(&nfa);
        let entry = nfa.transition_table().row(1).unwrap();
        assert_eq!(1, dfa.start_label());
        assert_eq!(entry.epsilon_closure(), dfa.key(1).unwrap().numbers());
    }

    #[test]
    fn labels_follow_discovery_order() {
        // a|b: the start set {1,2,5} is compiled first, finding 'a' before
        // 'b' since the alphabet is iterated in order.
        let nfa = NFA::literal('a').choice(NFA::literal('b'));
        let dfa = DFA::new(&nfa);
        assert_eq!(3, dfa.state_len());
        assert_eq!("1,2,5", dfa.key(1).unwrap().to_string());
        assert_eq!("3,4", dfa.key(2).unwrap().to_string());
        assert_eq!("4,6", dfa.key(3).unwrap().to_string());
        assert_eq!(Some(2), dfa.next_label(1, 'a'));
        assert_eq!(Some(3), dfa.next_label(1, 'b'));
        assert_eq!(&BTreeSet::from([2, 3]), dfa.accepting_labels());
    }

    #[test]
    fn equal_sets_collapse() {
        // a* in place: after any number of 'a's, the NFA is in the same set
        // of states it started in.
        let dfa = DFA::new(&NFA::literal('a').zero_or_more());
        assert_eq!(1, dfa.state_len());
        assert_eq!(Some(1), dfa.next_label(1, 'a'));
        assert!(dfa.is_match("aaa"));
    }

    #[test]
    fn build_is_deterministic() {
        let nfa = NFA::new("(ab|a)*b?").unwrap();
        let d1 = DFA::new(&nfa);
        let d2 = DFA::new(&nfa);
        assert_eq!(d1.transition_table(), d2.transition_table());
        assert_eq!(d1.accepting_labels(), d2.accepting_labels());
        for label in 1..=d1.state_len() {
            assert_eq!(d1.key(label), d2.key(label));
        }
    }

    #[test]
    fn every_key_is_distinct_and_non_empty() {
        let nfa = NFA::new(r"x(y|z)*\d?").unwrap();
        let dfa = DFA::new(&nfa);
        let keys: HashSet<&Key> =
            (1..=dfa.state_len()).map(|l| dfa.key(l).unwrap()).collect();
        assert_eq!(dfa.state_len(), keys.len());
        assert!(keys.iter().all(|k| !k.numbers().is_empty()));
    }

    #[test]
    fn every_transition_targets_a_known_label() {
        let nfa = NFA::new(r"(a|b)*abb").unwrap();
        let dfa = DFA::new(&nfa);
        for (&label, row) in dfa.transition_table() {
            assert!(dfa.key(label).is_some());
            for (&ch, &next) in row {
                assert!(dfa.alphabet().contains(&ch));
                assert!(dfa.key(next).is_some());
            }
        }
    }
}
