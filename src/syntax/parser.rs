use crate::error::{Error, ErrorKind};
use crate::syntax::ast::{Atom, Char, Expr, Factor, Quantifier, Term};

/// Parse a pattern into its syntax tree.
///
/// # Example
///
/// ```
/// use pattern_automata::syntax::{self, ast::Quantifier};
///
/// let expr = syntax::parse("ab*")?;
/// let term = &expr.alternates[0];
/// assert_eq!(None, term.factors[0].quantifier);
/// assert_eq!(Some(Quantifier::ZeroOrMore), term.factors[1].quantifier);
/// # Ok::<(), pattern_automata::Error>(())
/// ```
pub fn parse(pattern: &str) -> Result<Expr, Error> {
    Parser::new(pattern).parse()
}

/// The maximum number of groups that may be open at once.
///
/// Concatenation and alternation are parsed with loops, so only group
/// nesting uses the call stack.
const NEST_LIMIT: u32 = 250;

/// A recursive descent parser with one character of lookahead.
///
/// Positions are counted in characters, not bytes.
struct Parser<'p> {
    pattern: &'p str,
    chars: Vec<char>,
    pos: usize,
    /// The number of groups currently open.
    depth: u32,
}

impl<'p> Parser<'p> {
    fn new(pattern: &'p str) -> Parser<'p> {
        Parser { pattern, chars: pattern.chars().collect(), pos: 0, depth: 0 }
    }

    fn parse(mut self) -> Result<Expr, Error> {
        let expr = self.expr()?;
        // A top-level expression only stops early at a ')'.
        if self.peek().is_some() {
            return Err(self.error(ErrorKind::UnopenedGroup, self.pos));
        }
        Ok(expr)
    }

    fn expr(&mut self) -> Result<Expr, Error> {
        let mut alternates = vec![self.term()?];
        while self.peek() == Some('|') {
            self.bump();
            alternates.push(self.term()?);
        }
        Ok(Expr { alternates })
    }

    fn term(&mut self) -> Result<Term, Error> {
        let mut factors = vec![self.factor()?];
        loop {
            match self.peek() {
                None | Some(')') | Some('|') => break,
                Some(_) => factors.push(self.factor()?),
            }
        }
        Ok(Term { factors })
    }

    fn factor(&mut self) -> Result<Factor, Error> {
        let atom = self.atom()?;
        let quantifier = self.peek().and_then(Quantifier::from_char);
        if quantifier.is_some() {
            self.bump();
        }
        Ok(Factor { atom, quantifier })
    }

    fn atom(&mut self) -> Result<Atom, Error> {
        if self.peek() != Some('(') {
            return Ok(Atom::Char(self.char()?));
        }
        let open = self.pos;
        if self.depth >= NEST_LIMIT {
            return Err(
                self.error(ErrorKind::NestLimitExceeded(NEST_LIMIT), open)
            );
        }
        self.bump();
        if self.peek() == Some(')') {
            return Err(self.error(ErrorKind::EmptyGroup, open));
        }
        self.depth += 1;
        let expr = self.expr()?;
        self.depth -= 1;
        if self.peek() != Some(')') {
            return Err(self.error(ErrorKind::UnclosedGroup, open));
        }
        self.bump();
        Ok(Atom::Group(Box::new(expr)))
    }

    fn char(&mut self) -> Result<Char, Error> {
        let ch = match self.peek() {
            None => return Err(self.error(ErrorKind::UnexpectedEnd, self.pos)),
            Some(ch) => ch,
        };
        match ch {
            '*' | '+' | '?' => {
                Err(self.error(ErrorKind::MissingAtom(ch), self.pos))
            }
            '|' => Err(self.error(ErrorKind::EmptyAlternative, self.pos)),
            ')' if self.prev() == Some('|') => {
                Err(self.error(ErrorKind::EmptyAlternative, self.pos))
            }
            ')' => Err(self.error(ErrorKind::UnopenedGroup, self.pos)),
            '\\' => {
                let start = self.pos;
                self.bump();
                match self.peek() {
                    None => Err(self.error(ErrorKind::TrailingEscape, start)),
                    Some(escaped) => {
                        self.bump();
                        Ok(Char::Escape(escaped))
                    }
                }
            }
            _ => {
                self.bump();
                Ok(Char::Literal(ch))
            }
        }
    }

    fn peek(&self) -> Option<char> {
        self.chars.get(self.pos).copied()
    }

    fn prev(&self) -> Option<char> {
        self.pos.checked_sub(1).and_then(|i| self.chars.get(i).copied())
    }

    fn bump(&mut self) {
        self.pos += 1;
    }

    fn error(&self, kind: ErrorKind, offset: usize) -> Error {
        Error::new(kind, self.pattern, offset)
    }
}
