/*!
Parsing of the pattern language into a syntax tree.

Most callers never need this module: [`NFA::new`](crate::NFA::new) parses and
compiles in one step. It is exposed for callers that want to inspect a
pattern's structure or to compile the same tree several times with
different [`Config`](crate::nfa::Config)s.
*/

pub use self::parser::parse;

pub mod ast;
mod parser;
