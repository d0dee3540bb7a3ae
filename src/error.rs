use std::error;
use std::fmt;

/// An error that occurred while parsing a pattern.
///
/// Compilation never produces a partial automaton: if any part of a pattern
/// fails to parse, the whole pattern is rejected with this error.
///
/// The `Display` impl renders the pattern with a caret under the offending
/// character, which makes it suitable for showing directly to end users.
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct Error {
    kind: ErrorKind,
    pattern: String,
    offset: usize,
}

/// The kind of error that occurred.
#[derive(Clone, Debug, Eq, PartialEq)]
#[non_exhaustive]
pub enum ErrorKind {
    /// The pattern ended where an atom (a character or a group) was
    /// required. This includes the empty pattern and a trailing `|`.
    UnexpectedEnd,
    /// An unescaped quantifier (`*`, `+` or `?`) appeared where an atom was
    /// required, e.g., `*a` or `a**`.
    MissingAtom(char),
    /// A `(` was never closed.
    UnclosedGroup,
    /// A `)` appeared without a preceding `(`.
    UnopenedGroup,
    /// A `|` appeared where an atom was required, e.g., `|a` or `a||b`.
    EmptyAlternative,
    /// A group contained nothing, i.e., `()`.
    EmptyGroup,
    /// The pattern ended with a lone `\`.
    TrailingEscape,
    /// Groups were nested more deeply than the given limit allows.
    NestLimitExceeded(u32),
}

impl Error {
    /// Return the kind of this error.
    pub fn kind(&self) -> &ErrorKind {
        &self.kind
    }

    /// Return the pattern that failed to parse.
    pub fn pattern(&self) -> &str {
        &self.pattern
    }

    /// Return the offset, in characters, into the pattern at which the error
    /// was detected.
    pub fn offset(&self) -> usize {
        self.offset
    }

    pub(crate) fn new(kind: ErrorKind, pattern: &str, offset: usize) -> Error {
        Error { kind, pattern: pattern.to_string(), offset }
    }
}

impl error::Error for Error {}

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        writeln!(f, "pattern parse error:")?;
        writeln!(f, "    {}", self.pattern)?;
        writeln!(f, "    {}^", " ".repeat(self.offset))?;
        write!(f, "error: {}", self.kind)
    }
}

impl fmt::Display for ErrorKind {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match *self {
            ErrorKind::UnexpectedEnd => {
                write!(f, "unexpected end of pattern, expected an atom")
            }
            ErrorKind::MissingAtom(ch) => {
                write!(f, "quantifier '{}' must follow an atom", ch)
            }
            ErrorKind::UnclosedGroup => write!(f, "unclosed group"),
            ErrorKind::UnopenedGroup => write!(f, "unopened group"),
            ErrorKind::EmptyAlternative => {
                write!(f, "alternations must not have empty branches")
            }
            ErrorKind::EmptyGroup => write!(f, "empty group"),
            ErrorKind::TrailingEscape => {
                write!(f, "incomplete escape sequence at end of pattern")
            }
            ErrorKind::NestLimitExceeded(limit) => {
                write!(f, "exceeded the maximum of {} nested groups", limit)
            }
        }
    }
}
