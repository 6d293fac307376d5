use super::roller::Roller;
use crate::common::*;
use crate::eval::{EvalError, EvalResult, Evaluate};
use crate::spec::Spec;

pub type DefaultRoller = rand::prelude::ThreadRng;

/// A roller plus an optional budget on the number of dice drawn through it.
pub struct RollContext<R = DefaultRoller> {
    max_rolls: Option<usize>,
    rolls: usize,
    roller: R,
}

impl<R: Roller> RollContext<R> {
    pub fn new(max_rolls: Option<usize>, roller: R) -> Self {
        Self {
            max_rolls,
            rolls: 0,
            roller,
        }
    }

    pub fn new_bounded(max_rolls: usize, roller: R) -> Self {
        Self::new(Some(max_rolls), roller)
    }

    pub fn new_unbounded(roller: R) -> Self {
        Self::new(None, roller)
    }

    /// Dice drawn since creation or the last [`RollContext::reset`].
    pub fn rolls(&self) -> usize {
        self.rolls
    }

    pub fn reset(&mut self) {
        self.rolls = 0;
    }

    fn count_rolls(&mut self, n: usize) -> EvalResult<()> {
        self.rolls = self.rolls.saturating_add(n);
        if self.max_rolls.map_or(false, |max| self.rolls > max) {
            Err(EvalError::TooManyRolls)
        } else {
            Ok(())
        }
    }

    pub fn roll(
        &mut self,
        num: NonZeroUInt,
        sides: NonZeroUInt,
    ) -> EvalResult<impl Iterator<Item = UInt> + '_> {
        let num = num.get() as usize;
        self.count_rolls(num)?;
        Ok(self.roller.faces(num, sides))
    }

    pub fn roll_one(&mut self, sides: NonZeroUInt) -> EvalResult<UInt> {
        self.count_rolls(1)?;
        Ok(self.roller.face(sides))
    }

    /// Rolls every term of `spec` once and returns the total.
    pub fn eval(&mut self, spec: &Spec) -> EvalResult<Int> {
        let total = spec.roll(self)?;
        Int::try_from(total).map_err(|_| EvalError::ResultOverflow)
    }
}

impl Default for RollContext {
    fn default() -> Self {
        Self::new(Some(1000), rand::thread_rng())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::common::test_utils::*;
    use crate::parse::parse;
    use crate::roll::roller::stepping;
    use proptest::prelude::*;
    use rand::{rngs::StdRng, SeedableRng};

    fn mock_roller() -> impl Roller {
        stepping(10, 1)
    }

    fn check(s: &str, expected: Int) {
        let mut ctx = RollContext::new_bounded(1000, mock_roller());
        let spec = parse(s).unwrap();
        assert_eq!(ctx.eval(&spec), Ok(expected));
    }

    fn check_err(s: &str, expected: EvalError) {
        let mut ctx = RollContext::new_bounded(1000, mock_roller());
        let spec = parse(s).unwrap();
        assert_eq!(ctx.eval(&spec), Err(expected));
    }

    #[test]
    fn test_eval_flat() {
        check("+2", 2);
        check("-2,+5", 3);
    }

    #[test]
    fn test_eval_dice() {
        check("1d20+4", 10 + 4);
        check("2d4", 2 + 3);
        check("8d6", 4 + 5 + 6 + 1 + 2 + 3 + 4 + 5);
        check("d20,d20,-1", 10 + 11 - 1);
    }

    #[test]
    fn test_err_invalid_term() {
        check_err("0d6", EvalError::InvalidTerm { count: 0, sides: 6 });
        check_err("1d0", EvalError::InvalidTerm { count: 1, sides: 0 });
    }

    #[test]
    fn test_err_too_many_rolls() {
        check_err("1001d6", EvalError::TooManyRolls);
        check_err("600d6,400d6,1d6", EvalError::TooManyRolls);
        // 1000 faces cycling 4, 5, 6, 1, 2, 3
        check("600d6,400d6,+1", 166 * 21 + 4 + 5 + 6 + 1 + 1);
    }

    #[test]
    fn test_err_result_overflow() {
        check_err("+2147483647,+1", EvalError::ResultOverflow);
        check_err("-2147483647,-2", EvalError::ResultOverflow);
        check("+2147483647,-1,+1", Int::MAX);
    }

    #[test]
    fn test_unbounded() {
        let mut ctx = RollContext::new_unbounded(mock_roller());
        let spec = spec(vec![dice(5000, 1, 0)]);
        assert_eq!(ctx.eval(&spec), Ok(5000));
        assert_eq!(ctx.rolls(), 5000);
        ctx.reset();
        assert_eq!(ctx.rolls(), 0);
    }

    #[test]
    fn test_roll_one() {
        let mut ctx = RollContext::new_bounded(1, mock_roller());
        let sides = NonZeroUInt::new(12).unwrap();
        assert_eq!(ctx.roll_one(sides), Ok(10));
        assert_eq!(ctx.roll_one(sides), Err(EvalError::TooManyRolls));
    }

    #[test]
    fn test_seeded_reproducible() {
        let spec = parse("2d6+2,3d10-1,+5").unwrap();
        let a = RollContext::new_unbounded(StdRng::seed_from_u64(123)).eval(&spec);
        let b = RollContext::new_unbounded(StdRng::seed_from_u64(123)).eval(&spec);
        assert_eq!(a, b);
    }

    proptest! {
        #[test]
        fn prop_roll_within_distribution(
            terms in prop::collection::vec((0..=1u8, 1..=4u32, 1..=12u32, -20..=20i32), 1..4),
            seed in any::<u64>(),
        ) {
            let terms = terms
                .into_iter()
                .map(|(kind, count, sides, modifier)| match kind {
                    0 => flat(modifier),
                    _ => dice(count, sides, modifier),
                })
                .collect();
            let spec = spec(terms);
            let dist = spec.distribution().unwrap();
            let mut ctx = RollContext::new_unbounded(StdRng::seed_from_u64(seed));
            for _ in 0..20 {
                let x = Wide::from(ctx.eval(&spec).unwrap());
                prop_assert!(dist.min() <= x && x <= dist.max());
                prop_assert!(dist.ways_for(x) > 0);
            }
        }
    }
}
