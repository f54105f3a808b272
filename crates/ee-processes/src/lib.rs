//! # ee-processes
//!
//! Stochastic process definitions used by the Monte Carlo path simulator.
//!
//! * [`StochasticProcess1D`] — scalar diffusion `dX = μ(t,X) dt + σ(t,X) dW`
//! * [`BlackScholesMertonProcess`] — geometric Brownian motion with a
//!   continuous dividend yield, stepped exactly in log space

#![warn(missing_docs)]
#![forbid(unsafe_code)]

pub mod black_scholes_process;
pub mod stochastic_process;

pub use black_scholes_process::BlackScholesMertonProcess;
pub use stochastic_process::StochasticProcess1D;
