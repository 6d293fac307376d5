use super::{lexer::*, scan};
use crate::common::*;
use crate::spec::{Dice, Flat, Spec, Term};
use logos_iter::LogosIter;
#[cfg(feature = "logging")]
use log::trace;
use std::fmt;
use std::ops::Range;

type PResult<T> = Result<T, ParseError>;

#[derive(thiserror::Error, Debug, Clone, Eq, PartialEq)]
#[error("error at position {} ({slice:?}): {kind}", .span.start)]
pub struct ParseError {
    pub kind: ParseErrorKind,
    /// Byte range in the input with all whitespace removed.
    pub span: Range<usize>,
    pub slice: String,
}

impl ParseError {
    /// Whether the input breaks the grammar.
    pub fn is_malformed(&self) -> bool {
        !self.is_overflow()
    }

    /// Whether a literal was too large to represent.
    pub fn is_overflow(&self) -> bool {
        matches!(self.kind, ParseErrorKind::NumericOverflow)
    }
}

#[derive(Debug, Clone, Eq, PartialEq)]
pub enum ParseErrorKind {
    EmptySpec,
    UnexpectedToken {
        found: Option<TokenKind>,
        expected: Vec<TokenKind>,
    },
    UnexpectedString {
        expected: Vec<TokenKind>,
    },
    TrailingComma,
    NumericOverflow,
}

impl fmt::Display for ParseErrorKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::EmptySpec => f.write_str("empty dice spec"),
            Self::UnexpectedToken { found, expected } => {
                match found {
                    Some(kind) => write!(f, "unexpected token: found {}, expected ", kind)?,
                    None => f.write_str("unexpected end of input: expected ")?,
                }
                fmt_expected(expected, f)
            }
            Self::UnexpectedString { expected } => {
                write!(f, "expected ")?;
                fmt_expected(expected, f)
            }
            Self::TrailingComma => f.write_str("trailing comma in dice spec"),
            Self::NumericOverflow => write!(f, "number too big; the maximum is {}", MAX_LITERAL),
        }
    }
}

fn fmt_expected(expected: &[TokenKind], f: &mut fmt::Formatter<'_>) -> fmt::Result {
    let len = expected.len();

    if expected.is_empty() {
        Ok(())
    } else if len == 1 {
        f.write_str(expected[0].as_str())
    } else if len == 2 {
        write!(f, "{} or {}", expected[0], expected[1])
    } else {
        for exp in &expected[..len - 1] {
            write!(f, "{}, ", exp)?;
        }
        write!(f, "or {}", expected[len - 1])
    }
}

pub struct Parser<'a> {
    src: &'a str,
    lexer: Lexer<'a>,
}

impl<'a> Parser<'a> {
    /// `src` must already be stripped of whitespace.
    pub fn new(src: &'a str) -> Self {
        Self {
            src,
            lexer: lexer(src),
        }
    }

    pub fn parse(mut self) -> PResult<Spec> {
        self.parse_spec()
    }

    fn matches(&mut self, kind: TokenKind) -> bool {
        self.lexer.peek().map_or(false, |&peeked| peeked == kind)
    }

    fn matches_any(&mut self, options: &[TokenKind]) -> bool {
        self.lexer
            .peek()
            .map_or(false, |peeked| options.contains(peeked))
    }

    fn consume(&mut self, expected: TokenKind) -> PResult<()> {
        if self.matches(expected) {
            self.lexer.next();
            Ok(())
        } else {
            self.unexpected_token(vec![expected])
        }
    }

    fn error<T>(&mut self, kind: ParseErrorKind) -> PResult<T> {
        Err(ParseError {
            kind,
            span: self.lexer.span(),
            slice: self.lexer.slice().to_string(),
        })
    }

    fn error_at_end<T>(&self, kind: ParseErrorKind) -> PResult<T> {
        let end = self.src.len();
        Err(ParseError {
            kind,
            span: end..end,
            slice: String::new(),
        })
    }

    fn unexpected_token<T>(&mut self, expected: Vec<TokenKind>) -> PResult<T> {
        match self.lexer.next() {
            None => self.error_at_end(ParseErrorKind::UnexpectedToken {
                found: None,
                expected,
            }),
            Some(TokenKind::Error) => self.error(ParseErrorKind::UnexpectedString { expected }),
            found => self.error(ParseErrorKind::UnexpectedToken { found, expected }),
        }
    }

    fn parse_spec(&mut self) -> PResult<Spec> {
        if self.src.is_empty() {
            return self.error_at_end(ParseErrorKind::EmptySpec);
        }

        let mut terms = vec1![self.parse_term()?];
        while self.lexer.peek().is_some() {
            self.consume(TokenKind::Comma)?;
            let comma = self.lexer.span();
            if self.lexer.peek().is_none() {
                return Err(ParseError {
                    kind: ParseErrorKind::TrailingComma,
                    slice: self.src[comma.clone()].to_string(),
                    span: comma,
                });
            }
            terms.push(self.parse_term()?);
        }

        Ok(Spec::new(terms))
    }

    fn parse_term(&mut self) -> PResult<Term> {
        let term = if self.matches_any(TokenKind::SIGNS) {
            Term::Flat(Flat::new(self.parse_signed()?))
        } else if self.matches_any(&[TokenKind::Integer, TokenKind::Die]) {
            Term::Dice(self.parse_dice()?)
        } else {
            return self.unexpected_token(TokenKind::TERM_START.to_vec());
        };

        #[cfg(feature = "logging")]
        {
            trace!("parsed term {}", term);
        }
        Ok(term)
    }

    fn parse_dice(&mut self) -> PResult<Dice> {
        let count = if self.matches(TokenKind::Integer) {
            self.parse_unsigned()?
        } else {
            1
        };
        self.consume(TokenKind::Die)?;
        let sides = self.parse_unsigned()?;
        let modifier = if self.matches_any(TokenKind::SIGNS) {
            self.parse_signed()?
        } else {
            0
        };
        Ok(Dice::with_modifier(count, sides, modifier))
    }

    fn parse_unsigned(&mut self) -> PResult<UInt> {
        self.consume(TokenKind::Integer)?;
        match scan::scan_uint(self.lexer.slice()) {
            Ok(x) => Ok(x),
            Err(scan::Overflow) => self.error(ParseErrorKind::NumericOverflow),
        }
    }

    fn parse_signed(&mut self) -> PResult<Int> {
        let negative = self.matches(TokenKind::Minus);
        self.lexer.next();
        // `parse_unsigned` never exceeds `Int::MAX`, so both signs fit
        let x = self.parse_unsigned()? as Int;
        Ok(if negative { -x } else { x })
    }
}
