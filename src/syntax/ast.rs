/*!
The parse tree of a pattern.

Each grammar rule gets its own type, so a tree that does not follow the
grammar cannot be built:

```text
Expr    := Term ('|' Term)*
Term    := Factor+
Factor  := Atom ('*' | '+' | '?')?
Atom    := '(' Expr ')' | Char
Char    := '\' AnyChar | AnyChar
```
*/

use std::fmt;

/// An alternation of one or more terms.
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct Expr {
    /// The alternatives, from left to right. This is never empty.
    pub alternates: Vec<Term>,
}

/// A concatenation of one or more factors.
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct Term {
    /// The factors, from left to right. This is never empty.
    pub factors: Vec<Factor>,
}

/// An atom with an optional trailing quantifier.
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct Factor {
    /// The repeated (or not) atom.
    pub atom: Atom,
    /// The quantifier applied to `atom`, if any.
    pub quantifier: Option<Quantifier>,
}

/// The quantifiers that may follow an atom.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum Quantifier {
    /// `*`
    ZeroOrMore,
    /// `+`
    OneOrMore,
    /// `?`
    ZeroOrOne,
}

/// A parenthesized group or a single character.
#[derive(Clone, Debug, Eq, PartialEq)]
pub enum Atom {
    /// `(expr)`
    Group(Box<Expr>),
    /// A plain or escaped character.
    Char(Char),
}

/// A single character in a pattern.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum Char {
    /// An unescaped character that matches itself.
    Literal(char),
    /// The character following a `\`. Whether this is one of the classes
    /// `\d`, `\w` and `\s` or a literal is decided by [`Char::class`].
    Escape(char),
}

/// The character classes available through escapes.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum Class {
    /// `\d`: an ASCII digit.
    Digit,
    /// `\w`: an ASCII letter, digit or `_`.
    Word,
    /// `\s`: space, tab, line feed, carriage return or form feed.
    Space,
}

impl Quantifier {
    /// Returns the quantifier written as `ch`, if any.
    pub fn from_char(ch: char) -> Option<Quantifier> {
        match ch {
            '*' => Some(Quantifier::ZeroOrMore),
            '+' => Some(Quantifier::OneOrMore),
            '?' => Some(Quantifier::ZeroOrOne),
            _ => None,
        }
    }

    /// Returns the character used to write this quantifier.
    pub fn as_char(&self) -> char {
        match *self {
            Quantifier::ZeroOrMore => '*',
            Quantifier::OneOrMore => '+',
            Quantifier::ZeroOrOne => '?',
        }
    }
}

impl Char {
    /// Returns the class this escape stands for, or `None` if this is a
    /// plain literal or an escaped literal such as `\*`.
    pub fn class(&self) -> Option<Class> {
        match *self {
            Char::Escape('d') => Some(Class::Digit),
            Char::Escape('w') => Some(Class::Word),
            Char::Escape('s') => Some(Class::Space),
            Char::Literal(_) | Char::Escape(_) => None,
        }
    }

    /// Returns the character matched by this `Char` when it is not a class.
    pub fn as_char(&self) -> char {
        match *self {
            Char::Literal(ch) | Char::Escape(ch) => ch,
        }
    }
}

/// Prints the expression back in pattern syntax. Parsing the result yields
/// an equal tree.
impl fmt::Display for Expr {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        for (i, term) in self.alternates.iter().enumerate() {
            if i > 0 {
                write!(f, "|")?;
            }
            write!(f, "{}", term)?;
        }
        Ok(())
    }
}

impl fmt::Display for Term {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        for factor in self.factors.iter() {
            write!(f, "{}", factor)?;
        }
        Ok(())
    }
}

impl fmt::Display for Factor {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self.atom {
            Atom::Group(ref expr) => write!(f, "({})", expr)?,
            Atom::Char(Char::Literal(ch)) => write!(f, "{}", ch)?,
            Atom::Char(Char::Escape(ch)) => write!(f, "\\{}", ch)?,
        }
        if let Some(q) = self.quantifier {
            write!(f, "{}", q.as_char())?;
        }
        Ok(())
    }
}
