use std::collections::BTreeMap;
use std::fmt;

/// The identifier of a state in an NFA's arena.
///
/// A state ID is only meaningful for the NFA that produced it. Combinators
/// that merge two NFAs renumber the states of one of them, so IDs obtained
/// before a combination must not be used afterwards.
pub type StateID = usize;

/// The label on an NFA transition.
///
/// The derived ordering puts `Epsilon` before every character, which is the
/// order in which transitions are visited when the NFA is numbered.
#[derive(Clone, Copy, Debug, Eq, Hash, Ord, PartialEq, PartialOrd)]
pub enum Symbol {
    /// A transition that consumes no input.
    Epsilon,
    /// A transition that consumes exactly this character.
    Char(char),
}

impl fmt::Display for Symbol {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match *self {
            Symbol::Epsilon => write!(f, "ε"),
            Symbol::Char(ch) => write!(f, "{:?}", ch),
        }
    }
}

impl From<char> for Symbol {
    fn from(ch: char) -> Symbol {
        Symbol::Char(ch)
    }
}

/// A single node in an NFA's state graph.
///
/// Transitions are grouped by symbol. A symbol may lead to many states,
/// which is what makes the automaton nondeterministic. Within one symbol,
/// targets are kept in the order in which they were added.
#[derive(Clone, Default, Eq, PartialEq)]
pub struct State {
    accepting: bool,
    transitions: BTreeMap<Symbol, Vec<StateID>>,
}

impl State {
    pub(crate) fn new(accepting: bool) -> State {
        State { accepting, transitions: BTreeMap::new() }
    }

    /// Returns true if reaching this state with no input left is a match.
    pub fn is_accepting(&self) -> bool {
        self.accepting
    }

    /// Returns the states reachable from this one on `symbol`, in insertion
    /// order. The slice is empty when there is no such transition.
    pub fn transitions(&self, symbol: Symbol) -> &[StateID] {
        self.transitions.get(&symbol).map_or(&[], |ids| ids.as_slice())
    }

    /// Returns the targets of this state's epsilon transitions.
    pub fn epsilons(&self) -> &[StateID] {
        self.transitions(Symbol::Epsilon)
    }

    /// Iterate over every transition out of this state, ordered by symbol.
    pub fn iter(&self) -> impl Iterator<Item = (Symbol, &[StateID])> + '_ {
        self.transitions.iter().map(|(&sym, ids)| (sym, ids.as_slice()))
    }

    pub(crate) fn set_accepting(&mut self, yes: bool) {
        self.accepting = yes;
    }

    pub(crate) fn add_transition(&mut self, symbol: Symbol, to: StateID) {
        self.transitions.entry(symbol).or_insert_with(Vec::new).push(to);
    }

    /// Shift every target of this state by `offset`. This is used when the
    /// arena this state belongs to is appended to another one.
    pub(crate) fn shift(&mut self, offset: usize) {
        for ids in self.transitions.values_mut() {
            for id in ids.iter_mut() {
                *id += offset;
            }
        }
    }
}

impl fmt::Debug for State {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        let trans = self
            .transitions
            .iter()
            .map(|(sym, ids)| {
                let ids = ids
                    .iter()
                    .map(|id| id.to_string())
                    .collect::<Vec<String>>()
                    .join(", ");
                format!("{} => {}", sym, ids)
            })
            .collect::<Vec<String>>()
            .join("; ");
        if self.accepting {
            write!(f, "accept({})", trans)
        } else {
            write!(f, "{}", trans)
        }
    }
}
