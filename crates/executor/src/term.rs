//! Structural decoding of ground atoms from solver output.
//!
//! A solved model arrives as text like `activity(a) trace(10,1,a)
//! assigned_value(grade,s_1,5)`. Decoding is purely structural: argument
//! shapes are recognized, nothing is checked against the originating model.

use itertools::Itertools;
use std::fmt;
use thiserror::Error;

/// Decoding failures for ground-atom text.
#[derive(Error, Debug, PartialEq, Eq)]
pub enum DecodeError {
    #[error("Decode error: unexpected end of input")]
    UnexpectedEnd,
    #[error("Decode error: unexpected character `{ch}` at byte {pos}")]
    UnexpectedChar { pos: usize, ch: char },
    #[error("Decode error: trailing input at byte {pos}")]
    TrailingInput { pos: usize },
}

/// One typed argument of a ground atom.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Term {
    /// Signed integer argument.
    Integer(i64),
    /// Bare symbolic constant, e.g. `a` or `s_1`.
    Symbol(String),
    /// Double-quoted string argument.
    Text(String),
    /// Nested function term, e.g. `f(a,2)`.
    Function(String, Vec<Term>),
}

impl fmt::Display for Term {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Integer(v) => write!(f, "{v}"),
            Self::Symbol(s) => write!(f, "{s}"),
            Self::Text(s) => write!(f, "\"{s}\""),
            Self::Function(name, args) => write!(f, "{}({})", name, args.iter().join(",")),
        }
    }
}

/// A ground atom: predicate name plus typed arguments.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Atom {
    name: String,
    args: Vec<Term>,
}

impl Atom {
    #[must_use]
    pub fn new(name: &str, args: Vec<Term>) -> Self {
        Self {
            name: name.to_string(),
            args,
        }
    }

    /// Predicate name.
    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Arguments in written order.
    #[must_use]
    pub fn args(&self) -> &[Term] {
        &self.args
    }

    /// Decode one ground atom from text; a trailing `.` is tolerated.
    pub fn parse(text: &str) -> Result<Self, DecodeError> {
        let text = text.trim().trim_end_matches('.');
        let mut decoder = Decoder::new(text);
        let atom = decoder.atom()?;
        decoder.finish()?;
        Ok(atom)
    }
}

impl fmt::Display for Atom {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.args.is_empty() {
            write!(f, "{}", self.name)
        } else {
            write!(f, "{}({})", self.name, self.args.iter().join(","))
        }
    }
}

struct Decoder<'a> {
    input: &'a str,
    pos: usize,
}

impl<'a> Decoder<'a> {
    fn new(input: &'a str) -> Self {
        Self { input, pos: 0 }
    }

    fn atom(&mut self) -> Result<Atom, DecodeError> {
        let name = self.identifier()?;
        let args = if self.peek() == Some('(') {
            self.arguments()?
        } else {
            Vec::new()
        };
        Ok(Atom::new(&name, args))
    }

    fn arguments(&mut self) -> Result<Vec<Term>, DecodeError> {
        self.expect('(')?;
        let mut args = vec![self.term()?];
        while self.peek() == Some(',') {
            self.pos += 1;
            args.push(self.term()?);
        }
        self.expect(')')?;
        Ok(args)
    }

    fn term(&mut self) -> Result<Term, DecodeError> {
        match self.peek() {
            Some('"') => self.quoted(),
            Some(c) if c == '-' || c.is_ascii_digit() => self.integer(),
            Some(c) if c.is_ascii_alphabetic() || c == '_' => {
                let name = self.identifier()?;
                if self.peek() == Some('(') {
                    Ok(Term::Function(name, self.arguments()?))
                } else {
                    Ok(Term::Symbol(name))
                }
            }
            Some(c) => Err(DecodeError::UnexpectedChar { pos: self.pos, ch: c }),
            None => Err(DecodeError::UnexpectedEnd),
        }
    }

    fn identifier(&mut self) -> Result<String, DecodeError> {
        let start = self.pos;
        while let Some(c) = self.peek() {
            if c.is_ascii_alphanumeric() || c == '_' {
                self.pos += c.len_utf8();
            } else {
                break;
            }
        }
        if self.pos == start {
            match self.peek() {
                Some(c) => Err(DecodeError::UnexpectedChar { pos: self.pos, ch: c }),
                None => Err(DecodeError::UnexpectedEnd),
            }
        } else {
            Ok(self.input[start..self.pos].to_string())
        }
    }

    fn integer(&mut self) -> Result<Term, DecodeError> {
        let start = self.pos;
        if self.peek() == Some('-') {
            self.pos += 1;
        }
        while matches!(self.peek(), Some(c) if c.is_ascii_digit()) {
            self.pos += 1;
        }
        self.input[start..self.pos]
            .parse()
            .map(Term::Integer)
            .map_err(|_| DecodeError::UnexpectedChar {
                pos: start,
                ch: self.input[start..].chars().next().unwrap_or(' '),
            })
    }

    fn quoted(&mut self) -> Result<Term, DecodeError> {
        self.expect('"')?;
        let start = self.pos;
        while let Some(c) = self.peek() {
            if c == '"' {
                let text = self.input[start..self.pos].to_string();
                self.pos += 1;
                return Ok(Term::Text(text));
            }
            self.pos += c.len_utf8();
        }
        Err(DecodeError::UnexpectedEnd)
    }

    fn expect(&mut self, expected: char) -> Result<(), DecodeError> {
        match self.peek() {
            Some(c) if c == expected => {
                self.pos += c.len_utf8();
                Ok(())
            }
            Some(c) => Err(DecodeError::UnexpectedChar { pos: self.pos, ch: c }),
            None => Err(DecodeError::UnexpectedEnd),
        }
    }

    fn peek(&self) -> Option<char> {
        self.input[self.pos..].chars().next()
    }

    fn finish(&self) -> Result<(), DecodeError> {
        if self.pos == self.input.len() {
            Ok(())
        } else {
            Err(DecodeError::TrailingInput { pos: self.pos })
        }
    }
}
