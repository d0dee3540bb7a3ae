/*!
Deterministic finite automata built by subset construction.

A [`DFA`] is built from an [`NFA`](crate::NFA) with [`DFA::new`]. Each DFA
state stands for a set of NFA states, identified during construction by a
[`Key`] and afterwards by an integer [`Label`]. Starting from the
epsilon-closure of the NFA's entry, every character of the NFA's alphabet
is followed from every set found, until no new sets turn up.

```
use pattern_automata::{dfa::DFA, NFA};

let nfa = NFA::new(r"(a|b)*abb")?;
let dfa = DFA::new(&nfa);
assert!(dfa.is_match("babaabb"));
assert!(!dfa.is_match("abba"));

// The start state stands for the epsilon-closure of the NFA's entry.
let start = dfa.key(dfa.start_label()).unwrap();
assert_eq!(
    nfa.transition_table().row(1).unwrap().epsilon_closure(),
    start.numbers(),
);
# Ok::<(), pattern_automata::Error>(())
```

Since a DFA state only exists for a non-empty set of NFA states, a DFA has
no explicit dead state. A character without a transition ends the search.
*/

pub use self::automaton::{Key, Label, DFA};

mod automaton;
mod determinize;
