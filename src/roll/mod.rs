mod ctx;
mod roller;

pub use ctx::{DefaultRoller, RollContext};
pub use roller::{from_fn, Draws, FnRoller, Roller};

#[cfg(test)]
pub(crate) use roller::stepping;
