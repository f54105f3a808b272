//! Black-Scholes-Merton process.
//!
//! `dS/S = (r − q) dt + σ dW`
//!
//! with constant risk-free rate `r`, continuous dividend yield `q` and
//! volatility `σ`, all taken from a [`ContractParameters`] record.

use crate::stochastic_process::StochasticProcess1D;
use ee_core::{ContractParameters, Rate, Real, Result, Time, Volatility};

/// Geometric Brownian motion under the risk-neutral measure.
///
/// Closed-form solution: `S(t+Δt) = S(t) exp((r − q − σ²/2)Δt + σ√Δt·Z)`,
/// which [`evolve_1d`](StochasticProcess1D::evolve_1d) applies exactly, so
/// the simulated marginals carry no discretisation bias.
#[derive(Debug, Clone, PartialEq)]
pub struct BlackScholesMertonProcess {
    x0: Real,
    rate: Rate,
    dividend_yield: Rate,
    volatility: Volatility,
}

impl BlackScholesMertonProcess {
    /// Build the process implied by a contract.
    pub fn new(contract: &ContractParameters) -> Result<Self> {
        contract.validate()?;
        Ok(Self {
            x0: contract.spot,
            rate: contract.rate,
            dividend_yield: contract.dividend_yield,
            volatility: contract.volatility,
        })
    }

    /// Risk-free rate.
    pub fn rate(&self) -> Rate {
        self.rate
    }

    /// Dividend yield.
    pub fn dividend_yield(&self) -> Rate {
        self.dividend_yield
    }

    /// Volatility.
    pub fn volatility(&self) -> Volatility {
        self.volatility
    }

    /// Log-space drift per unit time, `r − q − σ²/2`.
    pub fn log_drift(&self) -> Real {
        self.rate - self.dividend_yield - 0.5 * self.volatility * self.volatility
    }
}

impl StochasticProcess1D for BlackScholesMertonProcess {
    fn x0(&self) -> Real {
        self.x0
    }

    fn drift_1d(&self, _t: Time, x: Real) -> Real {
        (self.rate - self.dividend_yield) * x
    }

    fn diffusion_1d(&self, _t: Time, x: Real) -> Real {
        self.volatility * x
    }

    /// Exact expectation `x · exp((r − q)·Δt)`.
    fn expectation_1d(&self, _t: Time, x: Real, dt: Time) -> Real {
        x * ((self.rate - self.dividend_yield) * dt).exp()
    }

    /// Exact log-normal step.
    fn evolve_1d(&self, _t: Time, x: Real, dt: Time, dw: Real) -> Real {
        x * (self.log_drift() * dt + self.volatility * dt.sqrt() * dw).exp()
    }
}
