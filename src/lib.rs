// The #[non_exhaustive] attribute applies at the crate-level, and I
// want module-level restrictions, which are far stricter.
#![allow(clippy::manual_non_exhaustive)]

//! Lazily-evaluated interval arithmetic over exact rational numbers.
//!
//! Build an expression out of [`Lfunc`] nodes, then evaluate it at a
//! [`Precision`] to get an [`Interval`] guaranteed to contain the
//! exact result.

pub mod bisection;
pub mod error;
pub mod interval;
pub mod lfunc;
pub mod precision;

pub use error::EvalError;
pub use interval::Interval;
pub use lfunc::Lfunc;
pub use precision::{Precision, precision_from_decimal_places};
