use crate::error::Error;
use crate::nfa::fragment::NFA;
use crate::syntax::{
    self,
    ast::{Atom, Char, Class, Expr, Factor, Quantifier, Term},
};

/// The configuration used for compiling a pattern into an NFA.
///
/// A default configuration can be created with either `Config::new` or
/// `Config::default`.
#[derive(Clone, Debug, Default)]
pub struct Config {
    explicit: Option<bool>,
}

impl Config {
    /// Return a new default NFA compiler configuration.
    pub fn new() -> Config {
        Config::default()
    }

    /// Whether quantifiers are compiled with the explicit combinators, which
    /// wrap the repeated fragment in new entry and exit states, or with the
    /// in-place ones, which only add epsilon transitions to the existing
    /// fragment.
    ///
    /// The in-place forms build smaller graphs, but they leak through
    /// nested repetitions: with them `(a*b)*` would also match `a`. They
    /// are only safe for patterns that do not quantify a fragment that
    /// already ends in, or starts with, a loop.
    ///
    /// This is enabled by default.
    pub fn explicit(mut self, yes: bool) -> Config {
        self.explicit = Some(yes);
        self
    }

    /// Returns whether the explicit combinators are used.
    pub fn get_explicit(&self) -> bool {
        self.explicit.unwrap_or(true)
    }

    /// Overwrite the default configuration such that the options in `o` are
    /// always used. If an option in `o` is not set, then the corresponding
    /// option in `self` is used. If it's not set in `self` either, then it
    /// remains not set.
    pub(crate) fn overwrite(&self, o: Config) -> Config {
        Config { explicit: o.explicit.or(self.explicit) }
    }
}

/// A builder for compiling patterns into NFAs.
///
/// The compiler walks a pattern's syntax tree bottom up and assembles the
/// NFA out of the combinators on [`NFA`]: a literal per character, `concat`
/// for sequences, `choice` for `|` and a repetition or optional combinator
/// per quantifier.
///
/// # Example
///
/// ```
/// use pattern_automata::nfa::{Compiler, Config};
///
/// let nfa = Compiler::new()
///     .configure(Config::new().explicit(false))
///     .build("a+b")?;
/// assert!(nfa.is_match("aab"));
/// // With in-place repetition, no new states are needed.
/// assert_eq!(4, nfa.len());
/// # Ok::<(), pattern_automata::Error>(())
/// ```
#[derive(Clone, Debug, Default)]
pub struct Compiler {
    config: Config,
}

impl Compiler {
    /// Create a new compiler with the default configuration.
    pub fn new() -> Compiler {
        Compiler::default()
    }

    /// Parse and compile the given pattern.
    ///
    /// If the pattern is not valid, an error is returned and nothing is
    /// compiled.
    pub fn build(&self, pattern: &str) -> Result<NFA, Error> {
        let expr = syntax::parse(pattern)?;
        Ok(self.build_from_ast(&expr))
    }

    /// Compile an already parsed pattern. This cannot fail.
    pub fn build_from_ast(&self, expr: &Expr) -> NFA {
        let nfa = self.c_expr(expr);
        log!(log::debug!(
            "compiled '{}' into an NFA with {} states",
            expr,
            nfa.len()
        ));
        nfa
    }

    /// Apply the given configuration options to this compiler.
    pub fn configure(&mut self, config: Config) -> &mut Compiler {
        self.config = self.config.overwrite(config);
        self
    }

    /// Returns the configuration used by this compiler.
    pub fn get_config(&self) -> &Config {
        &self.config
    }

    fn c_expr(&self, expr: &Expr) -> NFA {
        let mut terms = expr.alternates.iter().map(|t| self.c_term(t));
        match terms.next() {
            // The parser never produces this.
            None => NFA::epsilon(),
            Some(first) => first.choice_all(terms),
        }
    }

    fn c_term(&self, term: &Term) -> NFA {
        let mut factors = term.factors.iter().map(|f| self.c_factor(f));
        match factors.next() {
            None => NFA::epsilon(),
            Some(first) => first.concat_all(factors),
        }
    }

    fn c_factor(&self, factor: &Factor) -> NFA {
        let atom = self.c_atom(&factor.atom);
        let explicit = self.config.get_explicit();
        match (factor.quantifier, explicit) {
            (None, _) => atom,
            (Some(Quantifier::ZeroOrMore), true) => atom.zero_or_more_explicit(),
            (Some(Quantifier::ZeroOrMore), false) => atom.zero_or_more(),
            (Some(Quantifier::OneOrMore), true) => atom.one_or_more_explicit(),
            (Some(Quantifier::OneOrMore), false) => atom.one_or_more(),
            (Some(Quantifier::ZeroOrOne), true) => atom.optional_explicit(),
            (Some(Quantifier::ZeroOrOne), false) => atom.optional(),
        }
    }

    fn c_atom(&self, atom: &Atom) -> NFA {
        match *atom {
            Atom::Group(ref expr) => self.c_expr(expr),
            Atom::Char(ch) => self.c_char(ch),
        }
    }

    fn c_char(&self, ch: Char) -> NFA {
        match ch.class() {
            Some(Class::Digit) => NFA::digit(),
            Some(Class::Word) => NFA::word(),
            Some(Class::Space) => NFA::space(),
            None => NFA::literal(ch.as_char()),
        }
    }
}
