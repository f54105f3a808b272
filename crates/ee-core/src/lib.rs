//! # ee-core
//!
//! Core types, traits, and error definitions for earlyex.
//!
//! This crate provides the building blocks shared across all other crates in
//! the workspace – type aliases, the error enum, option payoffs, the
//! immutable contract record, and the `PricingEngine` trait that makes the
//! Monte Carlo and lattice engines interchangeable price sources.

#![warn(missing_docs)]
#![forbid(unsafe_code)]

// ── Public modules ───────────────────────────────────────────────────────────

/// Contract parameters shared by every engine.
pub mod contract;

/// Error types and the `ensure!` / `fail!` macros.
pub mod errors;

/// Option type and plain-vanilla payoff.
pub mod payoff;

/// The pricing-engine trait.
pub mod pricing_engine;

// ── Primitive type aliases ────────────────────────────────────────────────────

/// Floating-point type used throughout the library.
pub type Real = f64;

/// Alias used for array sizes / indices.
pub type Size = usize;

/// A rate expressed as a decimal (e.g. 0.05 = 5 %).
pub type Rate = Real;

/// A discount factor in [0, 1].
pub type DiscountFactor = Real;

/// A price or value.
pub type Price = Real;

/// A volatility level expressed as a decimal.
pub type Volatility = Real;

/// A time measurement in years.
pub type Time = Real;

// ── Re-exports for convenience ────────────────────────────────────────────────

pub use contract::ContractParameters;
pub use errors::{Error, Result};
pub use payoff::{OptionType, PlainVanillaPayoff};
pub use pricing_engine::PricingEngine;
