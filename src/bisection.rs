//! Square roots of exact rationals by the bisection method.
//!
//! See <https://en.wikipedia.org/wiki/Bisection_method>.

use crate::interval::Interval;
use crate::precision::Precision;

use num::{BigInt, BigRational, Zero, One, Signed};
use thiserror::Error;
use log::{debug, trace};

use std::cmp::Ordering;

/// Bisection search for a rational interval enclosing a square root.
///
/// The search stops once the *squares* of the bracket endpoints are
/// within the requested precision of each other, so the error is
/// bounded in the squared domain rather than on the root itself.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SqrtBisection {
  max_iterations: usize,
}

#[derive(Debug, Clone, Error, PartialEq, Eq)]
#[non_exhaustive]
pub enum BisectionError {
  #[error("Cannot take the square root of negative value {0}")]
  NegativeInput(BigRational),
  #[error("Failed to converge after {iterations} iterations")]
  FailedToConverge { iterations: usize },
}

impl SqrtBisection {
  pub const DEFAULT_MAX_ITERATIONS: usize = 10_000;

  pub fn new(max_iterations: usize) -> Self {
    Self { max_iterations }
  }

  pub fn max_iterations(&self) -> usize {
    self.max_iterations
  }

  /// Finds `[min, max]` such that `min^2 <= x <= max^2` and `max^2 -
  /// min^2 <= precision`.
  ///
  /// The initial bracket is `[1, x]` for `x >= 1` and `[x, 1]` for `0
  /// < x < 1`. Zero, and any exact rational root hit along the way,
  /// produce an exact interval.
  pub fn sqrt_bounds(&self, x: &BigRational, precision: &Precision) -> Result<Interval, BisectionError> {
    if x.is_negative() {
      return Err(BisectionError::NegativeInput(x.clone()));
    }
    if x.is_zero() {
      return Ok(Interval::exact(BigRational::zero()));
    }

    let one = BigRational::one();
    let (mut min, mut max) = if x < &one { (x.clone(), one) } else { (one, x.clone()) };
    let two = BigRational::from_integer(BigInt::from(2));

    let mut iterations = 0;
    while squared_width(&min, &max) > *precision.as_ratio() {
      if iterations == self.max_iterations {
        debug!("sqrt({}) failed to converge to {} after {} iterations", x, precision, iterations);
        return Err(BisectionError::FailedToConverge { iterations });
      }
      iterations += 1;

      let mid = (&min + &max) / &two;
      match (&mid * &mid).cmp(x) {
        Ordering::Less => min = mid,
        Ordering::Greater => max = mid,
        Ordering::Equal => {
          debug!("sqrt({}) is exactly {} (found after {} iterations)", x, mid, iterations);
          return Ok(Interval::exact(mid));
        }
      }
      trace!("sqrt({}) bracket after {} iterations: [{}, {}]", x, iterations, min, max);
    }

    debug!("sqrt({}) converged to {} after {} iterations", x, precision, iterations);
    Ok(Interval::new(min, max))
  }
}

fn squared_width(min: &BigRational, max: &BigRational) -> BigRational {
  max * max - min * min
}

impl Default for SqrtBisection {
  fn default() -> Self {
    Self::new(Self::DEFAULT_MAX_ITERATIONS)
  }
}
