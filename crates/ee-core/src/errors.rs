//! Error types for earlyex.
//!
//! Every failure the pricing core can report is a deterministic input
//! problem, so a single `thiserror`-derived enum covers them all. The
//! `ensure!` and `fail!` macros provide the short-circuiting checks used at
//! construction and use sites.

use thiserror::Error;

/// The top-level error type used throughout earlyex.
#[derive(Debug, Error, Clone, PartialEq)]
pub enum Error {
    /// A contract or engine parameter is outside its valid domain
    /// (non-positive spot, strike, maturity or volatility, zero path/step
    /// count, lattice probability outside `(0, 1)`, ...).
    #[error("invalid parameter: {0}")]
    InvalidParameter(String),

    /// A least-squares fit could not be performed.
    #[error(
        "degenerate regression: {observations} observation(s) for {coefficients} coefficient(s)"
    )]
    DegenerateRegression {
        /// Number of observations available for the fit.
        observations: usize,
        /// Number of coefficients requested (degree + 1).
        coefficients: usize,
    },

    /// Two pieces of data that must agree in size do not.
    #[error("shape mismatch in {what}: expected {expected}, got {actual}")]
    ShapeMismatch {
        /// What was being compared.
        what: &'static str,
        /// The expected size.
        expected: usize,
        /// The size actually found.
        actual: usize,
    },
}

/// Shorthand `Result` type used throughout earlyex.
pub type Result<T, E = Error> = std::result::Result<T, E>;

/// Returns `Err(Error::InvalidParameter(...))` if `$cond` is false.
///
/// # Example
/// ```
/// use ee_core::{ensure, errors::Error};
/// fn positive(x: f64) -> ee_core::errors::Result<f64> {
///     ensure!(x > 0.0, "x must be positive, got {x}");
///     Ok(x)
/// }
/// assert!(positive(1.0).is_ok());
/// assert!(matches!(positive(-1.0), Err(Error::InvalidParameter(_))));
/// ```
#[macro_export]
macro_rules! ensure {
    ($cond:expr, $($msg:tt)*) => {
        if !$cond {
            return Err($crate::errors::Error::InvalidParameter(
                format!($($msg)*)
            ));
        }
    };
}

/// Returns `Err(Error::InvalidParameter(...))` immediately.
///
/// # Example
/// ```
/// use ee_core::{fail, errors::Error};
/// fn always_err() -> ee_core::errors::Result<()> {
///     fail!("something went wrong");
/// }
/// assert!(always_err().is_err());
/// ```
#[macro_export]
macro_rules! fail {
    ($($msg:tt)*) => {
        return Err($crate::errors::Error::InvalidParameter(format!($($msg)*)))
    };
}
