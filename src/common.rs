use std::num::NonZeroU32;
pub use vec1::vec1;

/// Public result type of a roll and of a modifier.
pub type Int = i32;
/// Dice counts and face counts.
pub type UInt = u32;
pub type NonZeroUInt = NonZeroU32;

/// Accumulator for running totals and distribution offsets.
pub type Wide = i64;
/// Number of outcome combinations.
pub type Ways = u64;

pub type Float = f64;

pub type NonEmpty<T> = vec1::Vec1<T>;

/// Largest literal the scanner accepts.
pub const MAX_LITERAL: UInt = Int::MAX as UInt;
