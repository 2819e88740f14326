//! Lazily-evaluated interval functions.
//!
//! An [`Lfunc`] is an immutable expression DAG whose leaves are exact
//! rational constants. Nothing is computed until the function is
//! evaluated at a [`Precision`], and every evaluation walks the whole
//! DAG again from scratch.

mod eval;

pub use eval::{Evaluator, EvalConfig};

use crate::error::EvalError;
use crate::interval::Interval;
use crate::precision::Precision;

use num::{BigInt, BigRational};

use std::ops;
use std::sync::Arc;

/// A handle to an immutable evaluator node. Cloning an `Lfunc` is
/// cheap and shares the underlying node, so subexpressions may be
/// reused by any number of parents.
#[derive(Debug, Clone)]
pub struct Lfunc {
  node: Arc<Node>,
}

/// The operation performed by an [`Lfunc`].
#[derive(Debug)]
#[non_exhaustive]
pub enum Node {
  Constant(BigRational),
  Add(Lfunc, Lfunc),
  Sub(Lfunc, Lfunc),
  Mul(Lfunc, Lfunc),
  Quotient(Lfunc, Lfunc),
  Average(Vec<Lfunc>),
  SquareRoot(Lfunc),
}

impl Lfunc {
  fn from_node(node: Node) -> Self {
    Self { node: Arc::new(node) }
  }

  pub fn node(&self) -> &Node {
    &self.node
  }

  /// A leaf which evaluates to `[i, i]` at any precision.
  pub fn integer(i: impl Into<BigInt>) -> Self {
    Self::constant(BigRational::from_integer(i.into()))
  }

  /// A leaf which evaluates to the exact fraction `numer / denom`.
  ///
  /// Panics if `denom == 0`.
  pub fn ratio(numer: impl Into<BigInt>, denom: impl Into<BigInt>) -> Self {
    Self::constant(BigRational::new(numer.into(), denom.into()))
  }

  pub fn constant(value: BigRational) -> Self {
    Self::from_node(Node::Constant(value))
  }

  pub fn add(x: Lfunc, y: Lfunc) -> Self {
    Self::from_node(Node::Add(x, y))
  }

  pub fn sub(x: Lfunc, y: Lfunc) -> Self {
    Self::from_node(Node::Sub(x, y))
  }

  pub fn mul(x: Lfunc, y: Lfunc) -> Self {
    Self::from_node(Node::Mul(x, y))
  }

  /// Division. Evaluation fails if the divisor's interval contains
  /// zero.
  pub fn quotient(x: Lfunc, y: Lfunc) -> Self {
    Self::from_node(Node::Quotient(x, y))
  }

  /// The mean of the given functions, taken separately over lower
  /// and upper bounds. Evaluation fails if `vals` is empty.
  pub fn average(vals: Vec<Lfunc>) -> Self {
    Self::from_node(Node::Average(vals))
  }

  pub fn sqrt(x: Lfunc) -> Self {
    Self::from_node(Node::SquareRoot(x))
  }

  /// Evaluates with the default [`EvalConfig`].
  pub fn eval(&self, precision: &Precision) -> Result<Interval, EvalError> {
    Evaluator::default().eval(self, precision)
  }

  /// Whether the two handles refer to the very same node.
  pub fn ptr_eq(&self, other: &Lfunc) -> bool {
    Arc::ptr_eq(&self.node, &other.node)
  }
}

impl From<i64> for Lfunc {
  fn from(i: i64) -> Lfunc {
    Lfunc::integer(i)
  }
}

impl From<BigInt> for Lfunc {
  fn from(i: BigInt) -> Lfunc {
    Lfunc::integer(i)
  }
}

impl From<BigRational> for Lfunc {
  fn from(value: BigRational) -> Lfunc {
    Lfunc::constant(value)
  }
}

macro_rules! impl_binary_op {
  ($trait_name:ident, $method:ident, $ctor:ident) => {
    impl ops::$trait_name for Lfunc {
      type Output = Lfunc;

      fn $method(self, other: Lfunc) -> Lfunc {
        Lfunc::$ctor(self, other)
      }
    }

    impl<'a, 'b> ops::$trait_name<&'b Lfunc> for &'a Lfunc {
      type Output = Lfunc;

      fn $method(self, other: &'b Lfunc) -> Lfunc {
        Lfunc::$ctor(self.clone(), other.clone())
      }
    }
  };
}

impl_binary_op!(Add, add, add);
impl_binary_op!(Sub, sub, sub);
impl_binary_op!(Mul, mul, mul);
impl_binary_op!(Div, div, quotient);
