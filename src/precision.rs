//! Precision thresholds for iterative refinement.

use crate::interval::Interval;

use num::{BigInt, BigRational, One, Signed};
use serde::{Serialize, Deserialize};
use thiserror::Error;

use std::convert::TryFrom;
use std::fmt::{self, Display, Formatter};

/// The maximum acceptable width of an interval, as an exact rational
/// number. A `Precision` is always strictly positive.
#[derive(Clone, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(try_from = "BigRational", into = "BigRational")]
pub struct Precision(BigRational);

#[derive(Debug, Clone, Error, PartialEq, Eq)]
#[error("Precision must be positive, got {value}")]
pub struct NonPositivePrecisionError {
  pub value: BigRational,
  _priv: (),
}

/// Returns `10^-n`, the precision needed for `n` correct decimal
/// places.
pub fn precision_from_decimal_places(n: u32) -> BigRational {
  let denom = num::pow(BigInt::from(10), n as usize);
  BigRational::new(BigInt::one(), denom)
}

impl Precision {
  pub fn new(value: BigRational) -> Result<Self, NonPositivePrecisionError> {
    if value.is_positive() {
      Ok(Precision(value))
    } else {
      Err(NonPositivePrecisionError { value, _priv: () })
    }
  }

  pub fn from_decimal_places(n: u32) -> Self {
    Precision(precision_from_decimal_places(n))
  }

  pub fn as_ratio(&self) -> &BigRational {
    &self.0
  }

  pub fn into_ratio(self) -> BigRational {
    self.0
  }

  /// Whether the interval is no wider than this precision.
  pub fn is_satisfied_by(&self, interval: &Interval) -> bool {
    interval.width() <= self.0
  }
}

impl TryFrom<BigRational> for Precision {
  type Error = NonPositivePrecisionError;

  fn try_from(value: BigRational) -> Result<Self, Self::Error> {
    Precision::new(value)
  }
}

impl From<Precision> for BigRational {
  fn from(precision: Precision) -> BigRational {
    precision.0
  }
}

impl Display for Precision {
  fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
    write!(f, "{}", self.0)
  }
}

#[cfg(test)]
mod tests {
  use super::*;

  use num::Zero;

  fn ratio(n: i64, d: i64) -> BigRational {
    BigRational::new(BigInt::from(n), BigInt::from(d))
  }

  #[test]
  fn test_precision_from_decimal_places() {
    assert_eq!(precision_from_decimal_places(0), BigRational::one());
    assert_eq!(precision_from_decimal_places(1), ratio(1, 10));
    assert_eq!(precision_from_decimal_places(6), ratio(1, 1_000_000));
  }

  #[test]
  fn test_precision_from_many_decimal_places() {
    let precision = precision_from_decimal_places(40);
    assert_eq!(precision.numer(), &BigInt::one());
    assert_eq!(precision.denom(), &num::pow(BigInt::from(10), 40));
  }

  #[test]
  fn test_new_positive() {
    let precision = Precision::new(ratio(1, 3)).unwrap();
    assert_eq!(precision.as_ratio(), &ratio(1, 3));
    assert_eq!(Precision::from_decimal_places(2).into_ratio(), ratio(1, 100));
  }

  #[test]
  fn test_new_rejects_zero_and_negative() {
    let err = Precision::new(BigRational::zero()).unwrap_err();
    assert_eq!(err.value, BigRational::zero());
    let err = Precision::new(ratio(-1, 10)).unwrap_err();
    assert_eq!(err.value, ratio(-1, 10));
  }

  #[test]
  fn test_is_satisfied_by() {
    let precision = Precision::new(ratio(1, 2)).unwrap();
    assert!(precision.is_satisfied_by(&Interval::new(ratio(0, 1), ratio(1, 2))));
    assert!(precision.is_satisfied_by(&Interval::exact(ratio(5, 1))));
    assert!(!precision.is_satisfied_by(&Interval::new(ratio(0, 1), ratio(2, 3))));
  }

  #[test]
  fn test_deserialize_rejects_nonpositive() {
    let json = serde_json::to_value(BigRational::zero()).unwrap();
    assert!(serde_json::from_value::<Precision>(json).is_err());
    let json = serde_json::to_value(ratio(1, 8)).unwrap();
    assert_eq!(serde_json::from_value::<Precision>(json).unwrap(), Precision::new(ratio(1, 8)).unwrap());
  }
}
