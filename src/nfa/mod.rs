/*!
Thompson NFAs: construction, numbering and simulation.

An [`NFA`] can be built in two ways. The first is to compile a pattern,
either with [`NFA::new`] or with a [`Compiler`] when a non-default
[`Config`] is needed. The second is to compose NFAs by hand with the
combinators on `NFA`, such as [`NFA::literal`], [`NFA::concat`] and
[`NFA::choice`]:

```
use pattern_automata::NFA;

// x y* | z
let nfa = NFA::literal('x')
    .concat(NFA::literal('y').zero_or_more_explicit())
    .choice(NFA::literal('z'));
assert!(nfa.is_match("xyyy"));
assert!(nfa.is_match("z"));
assert!(!nfa.is_match("xz"));
```

Every NFA also has a numbered [`TransitionTable`], computed on demand, which
is the input to [subset construction](crate::dfa).
*/

pub use self::{
    compiler::{Compiler, Config},
    fragment::NFA,
    state::{State, StateID, Symbol},
    table::{Row, StateNumber, TransitionTable},
};

mod compiler;
mod fragment;
mod simulate;
mod state;
mod table;
