use crate::common::{NonZeroUInt, UInt};
use rand::{
    distributions::{DistIter, Distribution, Uniform},
    Rng,
};

/// A source of uniform die faces in `1..=sides`.
pub trait Roller {
    type Faces<'a>: Iterator<Item = UInt> + 'a
    where
        Self: 'a;

    fn face(&mut self, sides: NonZeroUInt) -> UInt;

    /// `count` independent faces, drawn in order.
    fn faces(&mut self, count: usize, sides: NonZeroUInt) -> Self::Faces<'_>;
}

impl<R: Rng> Roller for R {
    type Faces<'a> = std::iter::Take<DistIter<Uniform<UInt>, &'a mut Self, UInt>>
    where
        Self: 'a;

    fn face(&mut self, sides: NonZeroUInt) -> UInt {
        self.gen_range(1..=sides.get())
    }

    fn faces(&mut self, count: usize, sides: NonZeroUInt) -> Self::Faces<'_> {
        Uniform::new_inclusive(1, sides.get())
            .sample_iter(self)
            .take(count)
    }
}

/// Wraps a plain `sides -> face` function as a [`Roller`].
///
/// The function is trusted to stay within `1..=sides`.
pub fn from_fn<F: FnMut(NonZeroUInt) -> UInt>(f: F) -> FnRoller<F> {
    FnRoller(f)
}

pub struct FnRoller<F>(F);

impl<F: FnMut(NonZeroUInt) -> UInt> Roller for FnRoller<F> {
    type Faces<'a> = Draws<'a, F>
    where
        Self: 'a;

    fn face(&mut self, sides: NonZeroUInt) -> UInt {
        (self.0)(sides)
    }

    fn faces(&mut self, count: usize, sides: NonZeroUInt) -> Self::Faces<'_> {
        Draws {
            f: &mut self.0,
            count,
            sides,
        }
    }
}

pub struct Draws<'a, F> {
    f: &'a mut F,
    count: usize,
    sides: NonZeroUInt,
}

impl<F: FnMut(NonZeroUInt) -> UInt> Iterator for Draws<'_, F> {
    type Item = UInt;

    fn next(&mut self) -> Option<Self::Item> {
        if self.count == 0 {
            None
        } else {
            self.count -= 1;
            Some((self.f)(self.sides))
        }
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        (self.count, Some(self.count))
    }
}

/// Counts up from `initial` by `step`, wrapping around each die's faces.
#[cfg(test)]
pub(crate) fn stepping(initial: UInt, step: UInt) -> impl Roller {
    let mut current = initial;
    from_fn(move |sides: NonZeroUInt| {
        let face = (current - 1) % sides.get() + 1;
        current += step;
        face
    })
}
