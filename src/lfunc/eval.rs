//! Recursive evaluation of [`Lfunc`] graphs.

use super::{Lfunc, Node};
use crate::bisection::SqrtBisection;
use crate::error::EvalError;
use crate::interval::Interval;
use crate::precision::Precision;

use log::trace;
use serde::{Serialize, Deserialize};

/// Tunable parameters for [`Evaluator`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct EvalConfig {
  /// Maximum number of bisection steps spent on any single square
  /// root bound.
  pub max_iterations: usize,
}

/// Evaluates [`Lfunc`] graphs depth-first. Every call walks the whole
/// graph; nothing is cached between calls.
#[derive(Debug, Clone, Default)]
pub struct Evaluator {
  bisection: SqrtBisection,
}

impl Evaluator {
  pub fn new(config: &EvalConfig) -> Self {
    Self { bisection: SqrtBisection::new(config.max_iterations) }
  }

  pub fn config(&self) -> EvalConfig {
    EvalConfig { max_iterations: self.bisection.max_iterations() }
  }

  pub fn eval(&self, func: &Lfunc, precision: &Precision) -> Result<Interval, EvalError> {
    let result = match func.node() {
      Node::Constant(value) => Interval::exact(value.clone()),
      Node::Add(x, y) => self.eval(x, precision)? + self.eval(y, precision)?,
      Node::Sub(x, y) => self.eval(x, precision)? - self.eval(y, precision)?,
      Node::Mul(x, y) => self.eval(x, precision)? * self.eval(y, precision)?,
      Node::Quotient(x, y) => {
        let numerator = self.eval(x, precision)?;
        let denominator = self.eval(y, precision)?;
        numerator.checked_div(denominator)?
      }
      Node::Average(vals) => {
        let intervals = vals.iter()
          .map(|val| self.eval(val, precision))
          .collect::<Result<Vec<_>, _>>()?;
        Interval::average(intervals)?
      }
      Node::SquareRoot(x) => self.sqrt(self.eval(x, precision)?, precision)?,
    };
    trace!("Evaluated {} node at precision {} to {}", func.node_name(), precision, result);
    Ok(result)
  }

  /// Encloses the square root of every value in `interval`, by taking
  /// the lower bound of the root of its minimum and the upper bound
  /// of the root of its maximum.
  fn sqrt(&self, interval: Interval, precision: &Precision) -> Result<Interval, EvalError> {
    let (xmin, xmax) = interval.into_bounds();
    let low = self.bisection.sqrt_bounds(&xmin, precision)?;
    if xmin == xmax {
      return Ok(low);
    }
    let high = self.bisection.sqrt_bounds(&xmax, precision)?;
    let (min, _) = low.into_bounds();
    let (_, max) = high.into_bounds();
    Ok(Interval::new(min, max))
  }
}

impl Lfunc {
  fn node_name(&self) -> &'static str {
    match self.node() {
      Node::Constant(_) => "Constant",
      Node::Add(_, _) => "Add",
      Node::Sub(_, _) => "Sub",
      Node::Mul(_, _) => "Mul",
      Node::Quotient(_, _) => "Quotient",
      Node::Average(_) => "Average",
      Node::SquareRoot(_) => "SquareRoot",
    }
  }
}

impl Default for EvalConfig {
  fn default() -> Self {
    Self { max_iterations: SqrtBisection::DEFAULT_MAX_ITERATIONS }
  }
}

#[cfg(test)]
mod tests {
  use super::*;
  use crate::bisection::BisectionError;

  use num::{BigInt, BigRational};

  fn int(n: i64) -> BigRational {
    BigRational::from_integer(BigInt::from(n))
  }

  #[test]
  fn test_default_config() {
    assert_eq!(Evaluator::default().config(), EvalConfig::default());
    assert_eq!(EvalConfig::default().max_iterations, SqrtBisection::DEFAULT_MAX_ITERATIONS);
  }

  #[test]
  fn test_config_from_json() {
    let config: EvalConfig = serde_json::from_str("{}").unwrap();
    assert_eq!(config, EvalConfig::default());
    let config: EvalConfig = serde_json::from_str(r#"{"max_iterations": 12}"#).unwrap();
    assert_eq!(config.max_iterations, 12);
    assert_eq!(Evaluator::new(&config).config(), config);
  }

  #[test]
  fn test_iteration_cap_applies_to_nested_sqrt() {
    let evaluator = Evaluator::new(&EvalConfig { max_iterations: 2 });
    let node = Lfunc::integer(1) + Lfunc::sqrt(Lfunc::integer(2));
    assert_eq!(
      evaluator.eval(&node, &Precision::from_decimal_places(6)),
      Err(EvalError::BisectionError(BisectionError::FailedToConverge { iterations: 2 })),
    );
  }

  #[test]
  fn test_iteration_cap_not_needed_for_coarse_precision() {
    let evaluator = Evaluator::new(&EvalConfig { max_iterations: 2 });
    let node = Lfunc::sqrt(Lfunc::integer(2));
    let precision = Precision::new(int(3)).unwrap();
    assert_eq!(evaluator.eval(&node, &precision), Ok(Interval::new(int(1), int(2))));
  }

  #[test]
  fn test_sqrt_of_wide_interval() {
    let evaluator = Evaluator::default();
    let precision = Precision::from_decimal_places(4);
    let square = Lfunc::sqrt(Lfunc::integer(2)) * Lfunc::sqrt(Lfunc::integer(2));
    let node = Lfunc::sqrt(Lfunc::average(vec![square, Lfunc::integer(2)]));
    let value = evaluator.eval(&node, &precision).unwrap();
    let (min, max) = (value.min(), value.max());
    assert!(min * min <= int(2));
    assert!(max * max >= int(2));
    assert!(!value.is_exact());
  }

  #[test]
  fn test_sqrt_of_exact_value_matches_bisection() {
    let precision = Precision::from_decimal_places(5);
    let evaluator = Evaluator::default();
    let value = evaluator.eval(&Lfunc::sqrt(Lfunc::integer(3)), &precision).unwrap();
    let expected = SqrtBisection::default().sqrt_bounds(&int(3), &precision).unwrap();
    assert_eq!(value, expected);
  }
}
