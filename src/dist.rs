use crate::common::*;
use crate::eval::{EvalError, EvalResult};
#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// Longest `ways` table any distribution may hold.
pub const MAX_TOTALS: usize = 1 << 22;

fn check_len(len: Ways) -> EvalResult<usize> {
    usize::try_from(len)
        .ok()
        .filter(|&len| len <= MAX_TOTALS)
        .ok_or(EvalError::TooManyTotals)
}

/// Exact number of ways each total can be reached.
///
/// `ways()[k]` counts the equally likely outcomes summing to `offset() + k`.
/// The first and last entries are never zero, and [`Dist::total_ways`] always
/// fits in [`Ways`].
#[derive(Debug, Clone, Eq, PartialEq, Hash)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct Dist {
    offset: Wide,
    ways: NonEmpty<Ways>,
}

impl Dist {
    /// The sum of nothing: zero, reachable one way.
    pub fn identity() -> Self {
        Self::constant(0)
    }

    pub fn constant(value: Wide) -> Self {
        Self {
            offset: value,
            ways: vec1![1],
        }
    }

    pub fn die(sides: NonZeroUInt) -> EvalResult<Self> {
        let len = check_len(sides.get().into())?;
        let mut ways = vec1![1];
        ways.extend(std::iter::repeat(1).take(len - 1));
        Ok(Self { offset: 1, ways })
    }

    /// `count` dice with `sides` faces, by repeated convolution of one die.
    pub fn of_nds(count: NonZeroUInt, sides: NonZeroUInt) -> EvalResult<Self> {
        // Fail before allocating anything if the total can't be counted
        Ways::from(sides.get())
            .checked_pow(count.get())
            .ok_or(EvalError::WaysOverflow)?;
        // count * (sides - 1) + 1 totals; can't overflow once the power fits
        check_len(Ways::from(count.get()) * Ways::from(sides.get() - 1) + 1)?;

        let die = Self::die(sides)?;
        (0..count.get()).try_fold(Self::identity(), |acc, _| acc.convolve(&die))
    }

    /// Distribution of the sum of two independent outcomes.
    pub fn convolve(&self, other: &Self) -> EvalResult<Self> {
        let offset = self
            .offset
            .checked_add(other.offset)
            .ok_or(EvalError::ResultOverflow)?;
        // Every entry and partial sum below is bounded by the product of the
        // totals, so checking it once covers the whole loop.
        self.total_ways()
            .checked_mul(other.total_ways())
            .ok_or(EvalError::WaysOverflow)?;
        let len = check_len((self.len() + other.len() - 1) as Ways)?;

        let mut ways = vec![0; len];
        for (i, &a) in self.ways.iter().enumerate() {
            for (j, &b) in other.ways.iter().enumerate() {
                ways[i + j] += a * b;
            }
        }

        match NonEmpty::try_from_vec(ways) {
            Ok(ways) => Ok(Self { offset, ways }),
            Err(_) => unreachable!("convolution of non-empty distributions is non-empty"),
        }
    }

    /// Moves every total by `delta` without changing any way count.
    pub fn shift(&self, delta: Wide) -> EvalResult<Self> {
        let offset = self
            .offset
            .checked_add(delta)
            .ok_or(EvalError::ResultOverflow)?;
        Ok(Self {
            offset,
            ways: self.ways.clone(),
        })
    }

    pub fn offset(&self) -> Wide {
        self.offset
    }

    pub fn ways(&self) -> &[Ways] {
        &self.ways
    }

    /// Number of distinct totals between [`Dist::min`] and [`Dist::max`].
    pub fn len(&self) -> usize {
        self.ways.len()
    }

    pub fn min(&self) -> Wide {
        self.offset
    }

    pub fn max(&self) -> Wide {
        self.offset + (self.len() as Wide - 1)
    }

    pub fn total_ways(&self) -> Ways {
        self.ways.iter().sum()
    }

    /// Ways to roll exactly `total`; zero outside the range.
    pub fn ways_for(&self, total: Wide) -> Ways {
        total
            .checked_sub(self.offset)
            .and_then(|k| usize::try_from(k).ok())
            .and_then(|k| self.ways.get(k).copied())
            .unwrap_or(0)
    }

    pub fn probability(&self, total: Wide) -> Float {
        self.ways_for(total) as Float / self.total_ways() as Float
    }

    /// `(total, ways)` pairs in increasing order of total.
    pub fn iter(&self) -> impl Iterator<Item = (Wide, Ways)> + '_ {
        (self.offset..).zip(self.ways.iter().copied())
    }
}
