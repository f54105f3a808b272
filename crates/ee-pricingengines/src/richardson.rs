//! Richardson-extrapolated binomial engine (BBSR).
//!
//! The CRR price converges like `P + c/N`, so pricing on `N` and `2N`
//! steps and combining
//!
//! ```text
//! BBSR(N) = 2·BBS(2N) − BBS(N)
//! ```
//!
//! cancels the leading error term.

use ee_core::{fail, ContractParameters, OptionType, Price, PricingEngine, Real, Result};

use crate::binomial_engine::BinomialEngine;

/// Two-point Richardson extrapolation for a first-order scheme whose fine
/// grid is twice the coarse grid.
#[inline]
pub fn richardson_extrapolate(coarse: Real, fine: Real) -> Real {
    2.0 * fine - coarse
}

/// Binomial engine with Richardson extrapolation over `N` and `2N` steps.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct BbsrEngine {
    /// Coarse step count `N`; the fine lattice uses `2N`.
    pub steps: usize,
    /// Put or call.
    pub option_type: OptionType,
}

impl Default for BbsrEngine {
    fn default() -> Self {
        Self {
            steps: 1_000,
            option_type: OptionType::Put,
        }
    }
}

impl BbsrEngine {
    /// Creates an engine for an American put.
    pub fn new(steps: usize) -> Self {
        Self {
            steps,
            ..Self::default()
        }
    }

    /// Prices a put or a call.
    pub fn with_option_type(mut self, option_type: OptionType) -> Self {
        self.option_type = option_type;
        self
    }

    /// The coarse (`N`) and fine (`2N`) binomial prices.
    pub fn component_prices(&self, contract: &ContractParameters) -> Result<(Price, Price)> {
        let Some(fine_steps) = self.steps.checked_mul(2) else {
            fail!("step count {} overflows when doubled", self.steps);
        };

        let coarse = BinomialEngine::new(self.steps)
            .with_option_type(self.option_type)
            .npv(contract)?;
        let fine = BinomialEngine::new(fine_steps)
            .with_option_type(self.option_type)
            .npv(contract)?;
        Ok((coarse, fine))
    }
}

impl PricingEngine for BbsrEngine {
    fn name(&self) -> &'static str {
        "binomial-richardson"
    }

    fn npv(&self, contract: &ContractParameters) -> Result<Price> {
        let span = tracing::debug_span!("bbsr", steps = self.steps);
        let _guard = span.enter();

        let (coarse, fine) = self.component_prices(contract)?;
        let price = richardson_extrapolate(coarse, fine);
        tracing::debug!(coarse, fine, price, "bbsr priced");
        Ok(price)
    }
}

/// Richardson-extrapolated binomial price of an American put,
/// `2·BBS(2N) − BBS(N)`.
pub fn price_bbsr(contract: &ContractParameters, step_count: usize) -> Result<Price> {
    BbsrEngine::new(step_count).npv(contract)
}
