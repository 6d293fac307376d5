use crate::eval::EvalError;
use crate::parse::ParseError;

/// Failure of a call that both parses and evaluates notation.
#[derive(thiserror::Error, Debug, Clone, Eq, PartialEq)]
pub enum Error {
    #[error("{0}")]
    Parse(#[from] ParseError),
    #[error("{0}")]
    Eval(#[from] EvalError),
}
