//! # earlyex
//!
//! American option pricing by least-squares Monte Carlo and
//! Richardson-extrapolated binomial trees.
//!
//! This crate is a **façade** that re-exports the workspace crates.
//! Application code should depend on this crate rather than the individual
//! `ee-*` crates.
//!
//! ## Quick start
//!
//! ```rust
//! use earlyex::core::ContractParameters;
//!
//! let contract = ContractParameters::new(100.0, 100.0, 1.0 / 12.0, 0.04, 0.02, 0.2)?;
//!
//! let lattice = earlyex::price_bbsr(&contract, 500)?;
//! let monte_carlo = earlyex::price_lsmc(&contract, 4_000, 20, 2, 42)?;
//!
//! assert!((lattice - 2.226).abs() < 1e-3);
//! assert!((monte_carlo - lattice).abs() / lattice < 0.1);
//! # Ok::<(), earlyex::core::Error>(())
//! ```
//!
//! ## Features
//!
//! - `parallel` — simulate Monte Carlo paths on the rayon thread pool
//!   (`LsmcEngine::with_parallel`)
//! - `serde` — `Serialize`/`Deserialize` for contracts and engine settings

#![warn(missing_docs)]
#![forbid(unsafe_code)]

/// Core types, aliases, and error definitions.
pub use ee_core as core;

/// Mathematical utilities: normal distribution, RNG, regression, statistics.
pub use ee_math as math;

/// Stochastic process definitions.
pub use ee_processes as processes;

/// Numerical methods (lattices, Monte Carlo).
pub use ee_methods as methods;

/// Pricing engines.
pub use ee_pricingengines as pricingengines;

pub use ee_pricingengines::{price_bbsr, price_lsmc};
