use std::collections::{BTreeMap, BTreeSet};
use std::fmt;

use crate::dfa::determinize::Determinizer;
use crate::nfa::{StateNumber, NFA};

/// The label of a DFA state.
///
/// Labels are handed out sequentially from `1`, in the order in which
/// subset construction discovers the states. The start state is always `1`.
pub type Label = usize;

/// The canonical identity of a DFA state during subset construction: the
/// sorted, deduplicated set of NFA state numbers it stands for.
///
/// Two sets of NFA states with the same members always produce equal keys,
/// no matter the order in which their members were found. The [`Display`]
/// impl renders a key as its numbers joined by commas, e.g. `1,2,5`.
///
/// [`Display`]: std::fmt::Display
#[derive(Clone, Debug, Eq, Hash, Ord, PartialEq, PartialOrd)]
pub struct Key(Vec<StateNumber>);

impl Key {
    pub(crate) fn new(mut numbers: Vec<StateNumber>) -> Key {
        numbers.sort_unstable();
        numbers.dedup();
        Key(numbers)
    }

    /// Returns the NFA state numbers in this key, in ascending order.
    pub fn numbers(&self) -> &[StateNumber] {
        &self.0
    }
}

impl fmt::Display for Key {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        for (i, number) in self.0.iter().enumerate() {
            if i > 0 {
                write!(f, ",")?;
            }
            write!(f, "{}", number)?;
        }
        Ok(())
    }
}

/// A deterministic finite automaton built from an [`NFA`] by subset
/// construction.
///
/// Every (label, character) pair has at most one successor. A pair with no
/// successor is a dead end: a haystack that reaches it does not match.
///
/// A DFA owns its tables outright and holds no reference to the NFA it was
/// built from. It is never mutated after construction.
///
/// # Example
///
/// ```
/// use pattern_automata::{dfa::DFA, NFA};
///
/// let nfa = NFA::new("a|b")?;
/// let dfa = DFA::new(&nfa);
/// assert_eq!(1, dfa.start_label());
/// assert!(dfa.is_match("a"));
/// assert!(!dfa.is_match("ab"));
/// # Ok::<(), pattern_automata::Error>(())
/// ```
#[derive(Clone)]
pub struct DFA {
    transitions: BTreeMap<Label, BTreeMap<char, Label>>,
    start: Label,
    accepting: BTreeSet<Label>,
    alphabet: BTreeSet<char>,
    /// The key each label was assigned from, indexed by `label - 1`.
    keys: Vec<Key>,
}

impl DFA {
    /// Build a DFA that matches exactly the strings `nfa` matches.
    pub fn new(nfa: &NFA) -> DFA {
        Determinizer::new(nfa.transition_table()).build()
    }

    pub(crate) fn from_parts(
        transitions: BTreeMap<Label, BTreeMap<char, Label>>,
        start: Label,
        accepting: BTreeSet<Label>,
        alphabet: BTreeSet<char>,
        keys: Vec<Key>,
    ) -> DFA {
        DFA { transitions, start, accepting, alphabet, keys }
    }

    /// Returns true if and only if this DFA matches all of `haystack`.
    ///
    /// One transition is followed per character. If a character has no
    /// transition from the current state, the search stops and reports no
    /// match.
    pub fn is_match(&self, haystack: &str) -> bool {
        let mut label = self.start;
        for ch in haystack.chars() {
            label = match self.next_label(label, ch) {
                None => return false,
                Some(next) => next,
            };
        }
        self.accepting.contains(&label)
    }

    /// Returns the state reached from `label` on `ch`, if any.
    pub fn next_label(&self, label: Label, ch: char) -> Option<Label> {
        self.transitions.get(&label)?.get(&ch).copied()
    }

    /// Returns the full transition table, keyed by label and then by
    /// character.
    pub fn transition_table(&self) -> &BTreeMap<Label, BTreeMap<char, Label>> {
        &self.transitions
    }

    /// Returns the label of the start state. This is always `1`.
    pub fn start_label(&self) -> Label {
        self.start
    }

    /// Returns the labels of the accepting states.
    pub fn accepting_labels(&self) -> &BTreeSet<Label> {
        &self.accepting
    }

    /// Returns every character that appears on a transition of the NFA this
    /// DFA was built from.
    pub fn alphabet(&self) -> &BTreeSet<char> {
        &self.alphabet
    }

    /// Returns the set of NFA state numbers that the given label stands for.
    pub fn key(&self, label: Label) -> Option<&Key> {
        label.checked_sub(1).and_then(|i| self.keys.get(i))
    }

    /// Returns the number of states in this DFA.
    pub fn state_len(&self) -> usize {
        self.keys.len()
    }
}

impl<'a> From<&'a NFA> for DFA {
    fn from(nfa: &'a NFA) -> DFA {
        DFA::new(nfa)
    }
}

impl fmt::Debug for DFA {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        writeln!(f, "DFA(")?;
        for label in 1..=self.state_len() {
            let mut status = [' ', ' '];
            if label == self.start {
                status[0] = '>';
            }
            if self.accepting.contains(&label) {
                status[1] = '*';
            }
            let transitions = self
                .transitions
                .get(&label)
                .into_iter()
                .flatten()
                .map(|(ch, next)| format!("{:?} => {}", ch, next))
                .collect::<Vec<String>>();
            writeln!(
                f,
                "{}{}{:06?}: {}",
                status[0],
                status[1],
                label,
                transitions.join(", "),
            )?;
        }
        writeln!(f, ")")?;
        Ok(())
    }
}
