use crate::common::*;
use crate::dist::Dist;
use crate::eval::{EvalResult, Evaluate};
use crate::parse::{self, ParseError};
use crate::roll::{RollContext, Roller};
use enum_dispatch::enum_dispatch;
#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};
use std::fmt;

/// A constant added to the total, e.g. `+5`.
#[derive(Debug, Copy, Clone, Eq, PartialEq, Hash)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct Flat {
    pub modifier: Int,
}

impl Flat {
    pub const fn new(modifier: Int) -> Self {
        Self { modifier }
    }
}

impl fmt::Display for Flat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:+}", self.modifier)
    }
}

/// `count` dice with `sides` faces each, plus a modifier, e.g. `2d6+3`.
///
/// A zero `count` or `sides` is representable and only rejected once the
/// term is rolled or its distribution is computed.
#[derive(Debug, Copy, Clone, Eq, PartialEq, Hash)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct Dice {
    pub count: UInt,
    pub sides: UInt,
    pub modifier: Int,
}

impl Dice {
    pub const fn new(count: UInt, sides: UInt) -> Self {
        Self::with_modifier(count, sides, 0)
    }

    pub const fn with_modifier(count: UInt, sides: UInt, modifier: Int) -> Self {
        Self {
            count,
            sides,
            modifier,
        }
    }
}

impl fmt::Display for Dice {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}d{}", self.count, self.sides)?;
        if self.modifier != 0 {
            write!(f, "{:+}", self.modifier)?;
        }
        Ok(())
    }
}

#[enum_dispatch(Evaluate)]
#[derive(Debug, Copy, Clone, Eq, PartialEq, Hash)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub enum Term {
    Flat(Flat),
    Dice(Dice),
}

impl Term {
    pub const fn flat(modifier: Int) -> Self {
        Self::Flat(Flat::new(modifier))
    }

    pub const fn dice(count: UInt, sides: UInt, modifier: Int) -> Self {
        Self::Dice(Dice::with_modifier(count, sides, modifier))
    }

    pub const fn is_flat(&self) -> bool {
        matches!(self, Self::Flat(_))
    }

    pub const fn count(&self) -> Option<UInt> {
        match self {
            Self::Flat(_) => None,
            Self::Dice(d) => Some(d.count),
        }
    }

    pub const fn sides(&self) -> Option<UInt> {
        match self {
            Self::Flat(_) => None,
            Self::Dice(d) => Some(d.sides),
        }
    }

    pub const fn modifier(&self) -> Int {
        match self {
            Self::Flat(x) => x.modifier,
            Self::Dice(d) => d.modifier,
        }
    }
}

impl fmt::Display for Term {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Flat(x) => fmt::Display::fmt(x, f),
            Self::Dice(x) => fmt::Display::fmt(x, f),
        }
    }
}

/// An ordered, non-empty list of terms whose results are summed.
#[derive(Debug, Clone, Eq, PartialEq, Hash)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct Spec {
    terms: NonEmpty<Term>,
}

impl Spec {
    pub fn new(terms: NonEmpty<Term>) -> Self {
        Self { terms }
    }

    /// Returns `None` if `terms` is empty.
    pub fn from_terms(terms: Vec<Term>) -> Option<Self> {
        NonEmpty::try_from_vec(terms).ok().map(Self::new)
    }

    pub fn terms(&self) -> &[Term] {
        &self.terms
    }

    pub fn len(&self) -> usize {
        self.terms.len()
    }
}

impl From<Term> for Spec {
    fn from(term: Term) -> Self {
        Self::new(vec1![term])
    }
}

impl fmt::Display for Spec {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (i, term) in self.terms.iter().enumerate() {
            if i > 0 {
                f.write_str(",")?;
            }
            write!(f, "{}", term)?;
        }
        Ok(())
    }
}

impl std::str::FromStr for Spec {
    type Err = ParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        parse::parse(s)
    }
}
