//! Probability distributions.
//!
//! Only the standard normal is needed: its CDF for closed-form reference
//! prices and its inverse for turning uniforms into Gaussian draws.

pub mod normal;

pub use normal::{normal_cdf, normal_cdf_inverse, normal_pdf};
