//! # ee-methods
//!
//! Numerical methods: the recombining binomial lattice with backward
//! induction, and Monte Carlo path simulation.
//!
//! # Modules
//!
//! * [`lattice`] — binomial lattice construction and backward-induction pricing
//! * [`monte_carlo`] — path sets and the path simulator

#![warn(missing_docs)]
#![forbid(unsafe_code)]

// ── Modules ───────────────────────────────────────────────────────────────────

/// Lattice methods: binomial lattice, backward induction.
pub mod lattice;

/// Monte Carlo simulation: path sets and path generation.
pub mod monte_carlo;

// ── Convenience re-exports ────────────────────────────────────────────────────

pub use lattice::{price_american, price_european, BinomialLattice};
pub use monte_carlo::{simulate_paths, PathSet, PathSimulator};
