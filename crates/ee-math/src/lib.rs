//! # ee-math
//!
//! Mathematical utilities: the normal distribution (via statrs), random
//! number generation, polynomial least-squares regression (over nalgebra),
//! and a statistics accumulator.

#![warn(missing_docs)]
#![forbid(unsafe_code)]

// ── Modules ───────────────────────────────────────────────────────────────────

/// Probability distributions.
pub mod distributions;

/// Polynomial least-squares regression.
pub mod linear_least_squares;

/// Random number generators.
pub mod random_numbers;

/// Statistics accumulators.
pub mod statistics;

// ── Convenience re-exports ────────────────────────────────────────────────────

pub use distributions::{normal_cdf, normal_cdf_inverse, normal_pdf};
pub use linear_least_squares::{fit_and_predict, PolynomialRegression};
pub use random_numbers::{InverseCumulativeNormalRng, MersenneTwisterUniformRng};
pub use statistics::Statistics;
