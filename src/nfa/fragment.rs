use std::fmt;
use std::sync::OnceLock;

use crate::nfa::{
    compiler::Compiler,
    state::{State, StateID, Symbol},
    table::TransitionTable,
};
use crate::Error;

/// A Thompson NFA with exactly one entry state and one exit state.
///
/// An `NFA` owns every state in its graph. States live in a flat arena and
/// refer to one another by [`StateID`], which is what lets repetition build
/// cycles without any shared ownership.
///
/// NFAs are built either by compiling a pattern with [`NFA::new`] (or a
/// [`Compiler`]) or by composing smaller NFAs with the combinators defined
/// here. Every combinator takes its inputs by value: the states of an input
/// NFA are rewired (epsilon transitions added, accepting flags cleared) and
/// become part of the result.
///
/// Before and after every combinator, the exit state is the only accepting
/// state in the graph.
///
/// Once built, an NFA is never mutated. Its numbered transition table is
/// computed on first use and cached, so an `NFA` may be shared freely across
/// threads.
#[derive(Clone)]
pub struct NFA {
    pub(super) states: Vec<State>,
    pub(super) entry: StateID,
    pub(super) exit: StateID,
    pub(super) table: OnceLock<TransitionTable>,
}

impl NFA {
    /// Compile the given pattern using the default configuration.
    ///
    /// To use a non-default configuration, use a [`Compiler`].
    ///
    /// # Example
    ///
    /// ```
    /// use pattern_automata::NFA;
    ///
    /// let nfa = NFA::new(r"\d+(\.\d+)?")?;
    /// assert!(nfa.is_match("3.14"));
    /// assert!(!nfa.is_match("3."));
    /// # Ok::<(), pattern_automata::Error>(())
    /// ```
    pub fn new(pattern: &str) -> Result<NFA, Error> {
        Compiler::new().build(pattern)
    }

    /// An NFA that matches exactly the one character given.
    pub fn literal(ch: char) -> NFA {
        NFA::single(Symbol::Char(ch))
    }

    /// An NFA that matches only the empty string.
    pub fn epsilon() -> NFA {
        NFA::single(Symbol::Epsilon)
    }

    /// An NFA that matches a string if it can be split into a prefix matched
    /// by `self` followed by a suffix matched by `second`.
    ///
    /// The exit of `self` gets an epsilon transition to the entry of `second`
    /// and stops accepting.
    pub fn concat(mut self, second: NFA) -> NFA {
        let (entry2, exit2) = self.absorb(second);
        self.states[self.exit].set_accepting(false);
        self.states[exit2].set_accepting(true);
        self.add_epsilon(self.exit, entry2);
        NFA::from_parts(self.states, self.entry, exit2)
    }

    /// Concatenate `self` with every NFA in `rest`, from left to right.
    pub fn concat_all<I>(self, rest: I) -> NFA
    where
        I: IntoIterator<Item = NFA>,
    {
        rest.into_iter().fold(self, NFA::concat)
    }

    /// An NFA that matches a string if either `self` or `second` matches it.
    ///
    /// A new entry state branches to both entries, and both exits feed into
    /// a new accepting exit state.
    pub fn choice(mut self, second: NFA) -> NFA {
        let (entry2, exit2) = self.absorb(second);
        let entry = self.add_state(false);
        let exit = self.add_state(true);
        self.add_epsilon(entry, self.entry);
        self.add_epsilon(entry, entry2);
        self.states[self.exit].set_accepting(false);
        self.states[exit2].set_accepting(false);
        self.add_epsilon(self.exit, exit);
        self.add_epsilon(exit2, exit);
        NFA::from_parts(self.states, entry, exit)
    }

    /// Build a choice between `self` and every NFA in `rest` by nesting
    /// pairwise choices, so that `self` is always the leftmost alternative.
    pub fn choice_all<I>(self, rest: I) -> NFA
    where
        I: IntoIterator<Item = NFA>,
    {
        rest.into_iter().fold(self, NFA::choice)
    }

    /// Zero or more repetitions of `self`, using two new states.
    ///
    /// The new entry can skip straight to the new exit, the old exit feeds
    /// the new exit and the new exit loops back to the old entry.
    pub fn zero_or_more_explicit(mut self) -> NFA {
        let entry = self.add_state(false);
        let exit = self.add_state(true);
        self.add_epsilon(entry, self.entry);
        self.add_epsilon(entry, exit);
        self.states[self.exit].set_accepting(false);
        self.add_epsilon(self.exit, exit);
        self.add_epsilon(exit, self.entry);
        NFA::from_parts(self.states, entry, exit)
    }

    /// Zero or more repetitions of `self`, rewiring the existing entry and
    /// exit with epsilon transitions in both directions.
    ///
    /// This produces a smaller graph than
    /// [`zero_or_more_explicit`](NFA::zero_or_more_explicit), but it is only
    /// equivalent to it when nothing inside `self` loops back to its entry.
    /// Applying it to a fragment that already ends in a repetition, as in
    /// `(a*b)*`, lets the inner loop reach the exit early.
    pub fn zero_or_more(mut self) -> NFA {
        self.add_epsilon(self.entry, self.exit);
        self.add_epsilon(self.exit, self.entry);
        NFA::from_parts(self.states, self.entry, self.exit)
    }

    /// One or more repetitions of `self`: `self` followed by zero or more
    /// repetitions of a copy of `self`.
    pub fn one_or_more_explicit(self) -> NFA {
        let copy = NFA::from_parts(self.states.clone(), self.entry, self.exit);
        self.concat(copy.zero_or_more_explicit())
    }

    /// One or more repetitions of `self`, adding an epsilon transition from
    /// the exit back to the entry.
    pub fn one_or_more(mut self) -> NFA {
        self.add_epsilon(self.exit, self.entry);
        NFA::from_parts(self.states, self.entry, self.exit)
    }

    /// Zero or one occurrence of `self`, as a choice with
    /// [`epsilon`](NFA::epsilon).
    pub fn optional_explicit(self) -> NFA {
        self.choice(NFA::epsilon())
    }

    /// Zero or one occurrence of `self`, adding an epsilon transition from
    /// the entry straight to the exit.
    ///
    /// The same caveat as for [`zero_or_more`](NFA::zero_or_more) applies.
    pub fn optional(mut self) -> NFA {
        self.add_epsilon(self.entry, self.exit);
        NFA::from_parts(self.states, self.entry, self.exit)
    }

    /// An NFA matching one ASCII digit, `0` through `9`.
    pub fn digit() -> NFA {
        NFA::one_of('0', "123456789")
    }

    /// An NFA matching one ASCII word character: a digit, a letter or `_`.
    pub fn word() -> NFA {
        NFA::one_of(
            '0',
            "123456789\
             abcdefghijklmnopqrstuvwxyz\
             ABCDEFGHIJKLMNOPQRSTUVWXYZ\
             _",
        )
    }

    /// An NFA matching one whitespace character: space, tab, line feed,
    /// carriage return or form feed.
    pub fn space() -> NFA {
        NFA::one_of(' ', "\t\n\r\x0C")
    }

    /// Returns the entry state of this NFA.
    pub fn entry(&self) -> StateID {
        self.entry
    }

    /// Returns the exit state of this NFA. It is the only accepting state.
    pub fn exit(&self) -> StateID {
        self.exit
    }

    /// Returns the state with the given ID.
    ///
    /// # Panics
    ///
    /// This panics if the ID does not belong to this NFA.
    pub fn state(&self, id: StateID) -> &State {
        &self.states[id]
    }

    /// Returns every state in this NFA, indexed by [`StateID`].
    pub fn states(&self) -> &[State] {
        &self.states
    }

    /// Returns the number of states in this NFA.
    pub fn len(&self) -> usize {
        self.states.len()
    }

    /// Always false: every NFA has at least its entry and exit states.
    pub fn is_empty(&self) -> bool {
        self.states.is_empty()
    }

    fn single(symbol: Symbol) -> NFA {
        let mut entry = State::new(false);
        entry.add_transition(symbol, 1);
        NFA::from_parts(vec![entry, State::new(true)], 0, 1)
    }

    fn one_of(first: char, rest: &str) -> NFA {
        NFA::literal(first).choice_all(rest.chars().map(NFA::literal))
    }

    fn from_parts(states: Vec<State>, entry: StateID, exit: StateID) -> NFA {
        NFA { states, entry, exit, table: OnceLock::new() }
    }

    /// Move every state of `other` into this NFA's arena and return the
    /// new IDs of its entry and exit.
    fn absorb(&mut self, other: NFA) -> (StateID, StateID) {
        let offset = self.states.len();
        self.states.extend(other.states.into_iter().map(|mut state| {
            state.shift(offset);
            state
        }));
        (other.entry + offset, other.exit + offset)
    }

    fn add_state(&mut self, accepting: bool) -> StateID {
        let id = self.states.len();
        self.states.push(State::new(accepting));
        id
    }

    fn add_epsilon(&mut self, from: StateID, to: StateID) {
        self.states[from].add_transition(Symbol::Epsilon, to);
    }
}

impl fmt::Debug for NFA {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "NFA(")?;
        for (id, state) in self.states.iter().enumerate() {
            let status = if id == self.entry { '>' } else { ' ' };
            writeln!(f, "{}{:06?}: {:?}", status, id, state)?;
        }
        writeln!(f, ")")?;
        Ok(())
    }
}
