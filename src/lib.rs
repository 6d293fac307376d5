pub mod common;
pub mod dist;
mod error;
pub mod eval;
pub mod parse;
pub mod roll;
pub mod spec;

pub use dist::Dist;
pub use error::Error;
pub use eval::{EvalError, Evaluate};
pub use parse::{parse, ParseError, ParseErrorKind};
pub use roll::{RollContext, Roller};
pub use spec::{Dice, Flat, Spec, Term};

use common::{Int, NonZeroUInt, UInt};

/// Canonical notation for `spec`; parsing it gives back an equal [`Spec`].
///
/// # Examples
/// ```
/// let spec = dice_dist::parse("d6 + 3, 2d8, -1").unwrap();
/// assert_eq!(dice_dist::render(&spec), "1d6+3,2d8,-1");
/// ```
pub fn render(spec: &Spec) -> String {
    spec.to_string()
}

/// Rolls `spec` once, drawing every die from `roller`.
///
/// # Examples
/// ```
/// use rand::{rngs::StdRng, SeedableRng};
///
/// let spec = dice_dist::parse("2d6+2, 3d10-1, +5").unwrap();
/// let mut rng = StdRng::seed_from_u64(123);
/// let total = dice_dist::roll(&spec, &mut rng).unwrap();
/// assert!((11..=48).contains(&total));
/// ```
pub fn roll<R: Roller>(spec: &Spec, roller: R) -> Result<Int, EvalError> {
    RollContext::new_unbounded(roller).eval(spec)
}

/// Exact distribution of every total `spec` can produce.
///
/// # Examples
/// ```
/// let dist = dice_dist::distribution(&dice_dist::parse("2d6").unwrap()).unwrap();
/// assert_eq!(dist.offset(), 2);
/// assert_eq!(dist.ways_for(7), 6);
/// assert_eq!(dist.total_ways(), 36);
/// ```
pub fn distribution(spec: &Spec) -> Result<Dist, EvalError> {
    spec.distribution()
}

/// Exact distribution of `count` dice with `sides` faces.
pub fn distribution_of_nds(count: UInt, sides: UInt) -> Result<Dist, EvalError> {
    match (NonZeroUInt::new(count), NonZeroUInt::new(sides)) {
        (Some(count), Some(sides)) => Dist::of_nds(count, sides),
        _ => Err(EvalError::InvalidTerm { count, sides }),
    }
}

/// Parses and rolls `s` with the thread-local generator and the default roll
/// budget.
pub fn roll_str(s: &str) -> Result<Int, Error> {
    let spec = parse(s)?;
    Ok(RollContext::default().eval(&spec)?)
}

pub fn distribution_str(s: &str) -> Result<Dist, Error> {
    let spec = parse(s)?;
    Ok(spec.distribution()?)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::common::test_utils::*;
    use proptest::prelude::*;

    fn arb_term() -> impl Strategy<Value = Term> {
        prop_oneof![
            any::<Int>().prop_filter("MIN has no literal", |&x| x != Int::MIN).prop_map(flat),
            (0..=1000u32, 0..=1000u32, -1000..=1000i32)
                .prop_map(|(count, sides, modifier)| dice(count, sides, modifier)),
        ]
    }

    fn arb_spec() -> impl Strategy<Value = Spec> {
        prop::collection::vec(arb_term(), 1..6).prop_map(spec)
    }

    #[test]
    fn test_examples() {
        assert_eq!(parse("1d6").unwrap(), spec(vec![dice(1, 6, 0)]));
        assert_eq!(parse("2d6+3").unwrap(), spec(vec![dice(2, 6, 3)]));
        assert_eq!(parse("d20").unwrap(), spec(vec![dice(1, 20, 0)]));
        assert_eq!(
            parse("2d6+2,3d10-1,+5").unwrap(),
            spec(vec![dice(2, 6, 2), dice(3, 10, -1), flat(5)])
        );
    }

    #[test]
    fn test_error_examples() {
        assert!(parse("2d6,").unwrap_err().is_malformed());
        assert!(parse("2d").unwrap_err().is_malformed());
        assert!(parse("99999999999d6").unwrap_err().is_overflow());
        assert_eq!(
            distribution_of_nds(0, 6),
            Err(EvalError::InvalidTerm { count: 0, sides: 6 })
        );
        assert_eq!(
            distribution_of_nds(3, 0),
            Err(EvalError::InvalidTerm { count: 3, sides: 0 })
        );
    }

    #[test]
    fn test_huge_die_fails_cleanly() {
        let spec = parse("1d2147483647").unwrap();
        assert_eq!(distribution(&spec), Err(EvalError::TooManyTotals));
        assert!(matches!(
            distribution_str("2d6,1d2147483647"),
            Err(Error::Eval(EvalError::TooManyTotals))
        ));
    }

    #[test]
    fn test_symmetry_example() {
        let d = distribution_of_nds(2, 6).unwrap();
        assert_eq!(d.offset(), 2);
        assert_eq!(d.len(), 11);
        assert_eq!(d.ways()[5], 6);
        assert_eq!(d.total_ways(), 36);
    }

    #[test]
    fn test_multi_term_example() {
        assert_eq!(
            distribution(&parse("1d2,1d2").unwrap()),
            distribution_of_nds(2, 2)
        );
    }

    #[test]
    fn test_str_helpers() {
        assert!(matches!(roll_str("2d"), Err(Error::Parse(_))));
        assert!(matches!(roll_str("0d6"), Err(Error::Eval(EvalError::InvalidTerm { .. }))));
        assert!((3..=18).contains(&roll_str("3d6").unwrap()));
        assert_eq!(distribution_str("1d4-1").unwrap().min(), 0);
        assert_eq!(
            roll_str("2000d6").unwrap_err().to_string(),
            "too many dice rolled"
        );
    }

    #[test]
    fn test_render_normalizes() {
        assert_eq!(render(&parse("d6").unwrap()), "1d6");
        assert_eq!(render(&parse("2d6+0").unwrap()), "2d6");
        assert_eq!(render(&parse("-0").unwrap()), "+0");
    }

    proptest! {
        #[test]
        fn prop_render_round_trip(s in arb_spec()) {
            prop_assert_eq!(parse(&render(&s)).unwrap(), s);
        }

        #[test]
        fn prop_parse_term_count(s in arb_spec()) {
            let text = s
                .terms()
                .iter()
                .map(|t| t.to_string())
                .collect::<Vec<_>>()
                .join(" , ");
            prop_assert_eq!(parse(&text).unwrap().len(), s.len());
        }
    }
}
