/*!
This crate compiles patterns from a small regular expression language into
finite automata and matches strings against them.

There are two ways of executing a pattern:

* [`NFA::is_match`] walks the Thompson NFA directly, backtracking over its
  nondeterministic choices.
* [`DFA::is_match`] walks a deterministic transition table derived from the
  NFA by subset construction. One table lookup is performed per input
  character.

Both always agree on whether a string matches.

# Example

```
use pattern_automata::{dfa::DFA, NFA};

let nfa = NFA::new(r"xy*|z")?;
assert!(nfa.is_match("xyy"));
assert!(!nfa.is_match("xyz"));

let dfa = DFA::new(&nfa);
assert!(dfa.is_match("xyy"));
assert!(!dfa.is_match("xyz"));
# Ok::<(), pattern_automata::Error>(())
```

# Syntax

```text
Expr    := Term ('|' Term)*
Term    := Factor+
Factor  := Atom ('*' | '+' | '?')?
Atom    := '(' Expr ')' | Char
Char    := '\' AnyChar | AnyChar
```

The escapes `\d`, `\w` and `\s` match an ASCII digit, an ASCII word
character and ASCII whitespace respectively. Any other escaped character
matches itself, which is how one writes a literal `*`, `(` or `|`.

Patterns are always anchored at both ends: a pattern matches a string only
if it matches the entire string.

# Crate features

* **logging** - Emits `log` messages while building tables. Disabled by
default.
*/

#![deny(missing_docs)]

pub use crate::{
    error::{Error, ErrorKind},
    nfa::NFA,
};

#[macro_use]
mod macros;

pub mod dfa;
mod error;
pub mod nfa;
mod sparse_set;
pub mod syntax;

/// Compile `pattern` and report whether it matches all of `haystack`, using
/// the NFA simulation.
///
/// This compiles the pattern on every call. Callers matching many strings
/// should build an [`NFA`] once and reuse it.
pub fn is_match(pattern: &str, haystack: &str) -> Result<bool, Error> {
    Ok(NFA::new(pattern)?.is_match(haystack))
}

/// Compile `pattern` into a DFA and report whether it matches all of
/// `haystack`.
pub fn is_match_dfa(pattern: &str, haystack: &str) -> Result<bool, Error> {
    let nfa = NFA::new(pattern)?;
    Ok(dfa::DFA::new(&nfa).is_match(haystack))
}
