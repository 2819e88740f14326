//! Closed intervals of exact rational numbers, and the interval
//! arithmetic used to combine them.

use num::{BigInt, BigRational, Zero, Signed};
use serde::{Serialize, Deserialize};
use thiserror::Error;

use std::convert::TryFrom;
use std::fmt::{self, Display, Formatter};
use std::ops::{Add, Sub, Mul};

/// A closed interval `[min, max]` of rational numbers, known to
/// contain the true value of some quantity.
///
/// Intervals always satisfy `min <= max`. An interval with `min ==
/// max` is called *exact*.
#[derive(Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "RawInterval")]
pub struct Interval {
  min: BigRational,
  max: BigRational,
}

/// Deserialization target for [`Interval`]. Does not enforce the
/// ordering of the bounds.
#[derive(Deserialize)]
struct RawInterval {
  min: BigRational,
  max: BigRational,
}

#[derive(Debug, Clone, Error, PartialEq, Eq)]
#[error("Lower bound {min} exceeds upper bound {max}")]
pub struct InvertedIntervalError {
  pub min: BigRational,
  pub max: BigRational,
  _priv: (),
}

#[derive(Debug, Clone, Error, PartialEq, Eq)]
#[non_exhaustive]
pub enum IntervalError {
  #[error("Division by an interval containing zero: {0}")]
  DivisionByZero(Interval),
  #[error("Cannot average an empty collection of intervals")]
  EmptyAverage,
}

impl Interval {
  /// Constructs a new interval.
  ///
  /// Panics if `min > max`. See [`Interval::try_new`] for a
  /// non-panicking variant.
  pub fn new(min: BigRational, max: BigRational) -> Self {
    assert!(min <= max, "Lower bound {} exceeds upper bound {}", min, max);
    Self { min, max }
  }

  pub fn try_new(min: BigRational, max: BigRational) -> Result<Self, InvertedIntervalError> {
    if min <= max {
      Ok(Self { min, max })
    } else {
      Err(InvertedIntervalError { min, max, _priv: () })
    }
  }

  /// The degenerate interval `[value, value]`.
  pub fn exact(value: BigRational) -> Self {
    Self { min: value.clone(), max: value }
  }

  pub fn min(&self) -> &BigRational {
    &self.min
  }

  pub fn max(&self) -> &BigRational {
    &self.max
  }

  pub fn into_bounds(self) -> (BigRational, BigRational) {
    (self.min, self.max)
  }

  pub fn midpoint(&self) -> BigRational {
    (&self.min + &self.max) / BigRational::from_integer(BigInt::from(2))
  }

  pub fn width(&self) -> BigRational {
    &self.max - &self.min
  }

  /// The best single estimate of the enclosed value, together with
  /// the width of the interval. The estimate is off by at most half
  /// of the width.
  pub fn midpoint_and_width(&self) -> (BigRational, BigRational) {
    (self.midpoint(), self.width())
  }

  pub fn contains(&self, value: &BigRational) -> bool {
    &self.min <= value && value <= &self.max
  }

  pub fn is_exact(&self) -> bool {
    self.min == self.max
  }

  pub fn is_nonnegative(&self) -> bool {
    !self.min.is_negative()
  }

  /// Divides two intervals. Fails if the divisor contains zero,
  /// including the case where zero is one of its endpoints.
  pub fn checked_div(self, other: Interval) -> Result<Interval, IntervalError> {
    if other.contains(&BigRational::zero()) {
      return Err(IntervalError::DivisionByZero(other));
    }
    Ok(hull([
      &self.min / &other.min,
      &self.min / &other.max,
      &self.max / &other.min,
      &self.max / &other.max,
    ]))
  }

  /// The interval whose lower bound is the mean of all lower bounds
  /// and whose upper bound is the mean of all upper bounds.
  pub fn average<I>(intervals: I) -> Result<Interval, IntervalError>
  where I: IntoIterator<Item = Interval> {
    let mut count: usize = 0;
    let mut min_total = BigRational::zero();
    let mut max_total = BigRational::zero();
    for interval in intervals {
      count += 1;
      min_total += interval.min;
      max_total += interval.max;
    }
    if count == 0 {
      return Err(IntervalError::EmptyAverage);
    }
    let count = BigRational::from_integer(BigInt::from(count));
    Ok(Interval { min: min_total / &count, max: max_total / count })
  }
}

/// The smallest interval containing all of the given values.
fn hull(candidates: [BigRational; 4]) -> Interval {
  let min = candidates.iter().min().cloned().unwrap(); // unwrap: Non-empty array
  let max = candidates.into_iter().max().unwrap(); // unwrap: Non-empty array
  Interval { min, max }
}

impl TryFrom<RawInterval> for Interval {
  type Error = InvertedIntervalError;

  fn try_from(raw: RawInterval) -> Result<Self, Self::Error> {
    Interval::try_new(raw.min, raw.max)
  }
}

impl Display for Interval {
  fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
    write!(f, "[{}, {}]", self.min, self.max)
  }
}

impl Add for Interval {
  type Output = Interval;

  fn add(self, other: Interval) -> Interval {
    Interval { min: self.min + other.min, max: self.max + other.max }
  }
}

impl Sub for Interval {
  type Output = Interval;

  fn sub(self, other: Interval) -> Interval {
    Interval { min: self.min - other.max, max: self.max - other.min }
  }
}

/// Takes the extremes over all four endpoint products, so this is
/// correct for operands of any sign. For nonnegative operands, the
/// result is `[min * min, max * max]`.
impl Mul for Interval {
  type Output = Interval;

  fn mul(self, other: Interval) -> Interval {
    hull([
      &self.min * &other.min,
      &self.min * &other.max,
      &self.max * &other.min,
      &self.max * &other.max,
    ])
  }
}
