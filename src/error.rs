use crate::interval::IntervalError;
use crate::bisection::BisectionError;

use thiserror::Error;

/// Any failure that can occur while evaluating an
/// [`Lfunc`](crate::lfunc::Lfunc).
#[derive(Debug, Clone, Error, PartialEq, Eq)]
#[non_exhaustive]
pub enum EvalError {
  #[error("{0}")]
  IntervalError(#[from] IntervalError),
  #[error("{0}")]
  BisectionError(#[from] BisectionError),
}

impl EvalError {
  pub fn is_division_by_zero(&self) -> bool {
    matches!(self, EvalError::IntervalError(IntervalError::DivisionByZero(_)))
  }
}
