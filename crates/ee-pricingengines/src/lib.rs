//! # ee-pricingengines
//!
//! Pricing engines for American options, plus the European references they
//! are checked against.
//!
//! ## Engines
//!
//! - [`LsmcEngine`] — Longstaff-Schwartz least-squares Monte Carlo
//! - [`BinomialEngine`] — CRR binomial lattice with early exercise (BBS)
//! - [`BbsrEngine`] — Richardson-extrapolated binomial, `2·BBS(2N) − BBS(N)`
//! - [`AnalyticEuropeanEngine`] — Black-Scholes-Merton closed form for European options

#![warn(missing_docs)]
#![forbid(unsafe_code)]

pub mod analytic_european_engine;
pub mod binomial_engine;
pub mod lsmc_engine;
pub mod richardson;

pub use analytic_european_engine::{black_scholes_merton, AnalyticEuropeanEngine};
pub use binomial_engine::{price_bbs, BinomialEngine};
pub use lsmc_engine::{
    lsmc_backward_step, price_lsmc, ExerciseDecision, ExerciseStep, LsmcEngine, LsmcResults,
};
pub use richardson::{price_bbsr, richardson_extrapolate, BbsrEngine};
