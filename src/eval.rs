use crate::common::*;
use crate::dist::Dist;
use crate::roll::{RollContext, Roller};
use crate::spec::{Dice, Flat, Spec, Term};
use enum_dispatch::enum_dispatch;
#[cfg(feature = "logging")]
use log::debug;

pub type EvalResult<T> = Result<T, EvalError>;

#[derive(thiserror::Error, Debug, Clone, Eq, PartialEq)]
pub enum EvalError {
    #[error("bad dice term {count}d{sides}: count and sides must be > 0")]
    InvalidTerm { count: UInt, sides: UInt },
    #[error("roll result does not fit in a 32-bit integer")]
    ResultOverflow,
    #[error("too many dice rolled")]
    TooManyRolls,
    #[error("too many outcomes to count")]
    WaysOverflow,
    #[error("too many distinct totals to tabulate; the maximum is {}", crate::dist::MAX_TOTALS)]
    TooManyTotals,
}

/// Anything that can be rolled once or enumerated exactly.
#[enum_dispatch]
pub trait Evaluate {
    fn distribution(&self) -> EvalResult<Dist>;

    /// Draws every die through `ctx` in order, returning the unnarrowed total.
    fn roll<R: Roller>(&self, ctx: &mut RollContext<R>) -> EvalResult<Wide>;
}

impl Dice {
    /// Zero dice and zero-sided dice are valid notation but cannot be rolled.
    pub fn validate(&self) -> EvalResult<(NonZeroUInt, NonZeroUInt)> {
        match (NonZeroUInt::new(self.count), NonZeroUInt::new(self.sides)) {
            (Some(count), Some(sides)) => Ok((count, sides)),
            _ => Err(EvalError::InvalidTerm {
                count: self.count,
                sides: self.sides,
            }),
        }
    }
}

impl Evaluate for Dice {
    fn distribution(&self) -> EvalResult<Dist> {
        let (count, sides) = self.validate()?;
        Dist::of_nds(count, sides)?.shift(self.modifier.into())
    }

    fn roll<R: Roller>(&self, ctx: &mut RollContext<R>) -> EvalResult<Wide> {
        let (count, sides) = self.validate()?;
        let total = ctx
            .roll(count, sides)?
            .try_fold(Wide::from(self.modifier), |acc, x| {
                acc.checked_add(x.into())
            })
            .ok_or(EvalError::ResultOverflow)?;

        #[cfg(feature = "logging")]
        {
            debug!("rolled {} for {}", total, self);
        }
        Ok(total)
    }
}

impl Evaluate for Flat {
    fn distribution(&self) -> EvalResult<Dist> {
        Ok(Dist::constant(self.modifier.into()))
    }

    fn roll<R: Roller>(&self, _ctx: &mut RollContext<R>) -> EvalResult<Wide> {
        Ok(self.modifier.into())
    }
}

impl Evaluate for Spec {
    fn distribution(&self) -> EvalResult<Dist> {
        let dist = self
            .terms()
            .iter()
            .try_fold(Dist::identity(), |acc, term: &Term| {
                acc.convolve(&term.distribution()?)
            })?;

        #[cfg(feature = "logging")]
        {
            debug!(
                "distribution of {}: {} outcomes over [{}, {}]",
                self,
                dist.total_ways(),
                dist.min(),
                dist.max()
            );
        }
        Ok(dist)
    }

    fn roll<R: Roller>(&self, ctx: &mut RollContext<R>) -> EvalResult<Wide> {
        self.terms().iter().try_fold(0, |acc: Wide, term| {
            acc.checked_add(term.roll(ctx)?)
                .ok_or(EvalError::ResultOverflow)
        })
    }
}
