//! Binomial engine for American options (BBS).
//!
//! Builds a CRR lattice with `N` steps and rolls the payoff back with the
//! `max(continuation, exercise)` rule at every node. The result is fully
//! deterministic.

use ee_core::{ContractParameters, OptionType, PlainVanillaPayoff, Price, PricingEngine, Real, Result};
use ee_methods::lattice::{price_american, price_european, BinomialLattice};

/// Cox-Ross-Rubinstein binomial engine with early exercise.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct BinomialEngine {
    /// Number of lattice steps `N`.
    pub steps: usize,
    /// Put or call.
    pub option_type: OptionType,
}

impl Default for BinomialEngine {
    fn default() -> Self {
        Self {
            steps: 1_000,
            option_type: OptionType::Put,
        }
    }
}

impl BinomialEngine {
    /// Creates an engine for an American put on `steps` lattice steps.
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

    fn setup(&self, contract: &ContractParameters) -> Result<(BinomialLattice, PlainVanillaPayoff, Real)> {
        let lattice = BinomialLattice::new(contract, self.steps)?;
        let payoff = PlainVanillaPayoff::new(self.option_type, contract.strike);
        let discount = contract.discount(lattice.dt());
        Ok((lattice, payoff, discount))
    }

    /// European price on the same lattice, without early exercise.
    pub fn european_npv(&self, contract: &ContractParameters) -> Result<Price> {
        let (lattice, payoff, discount) = self.setup(contract)?;
        Ok(price_european(&lattice, &|s| payoff.value(s), discount))
    }
}

impl PricingEngine for BinomialEngine {
    fn name(&self) -> &'static str {
        "binomial-crr"
    }

    fn npv(&self, contract: &ContractParameters) -> Result<Price> {
        let (lattice, payoff, discount) = self.setup(contract)?;
        let price = price_american(&lattice, &|s| payoff.value(s), discount);
        tracing::debug!(steps = self.steps, price, "binomial priced");
        Ok(price)
    }
}

/// Binomial (BBS) price of an American put with `steps` lattice steps.
pub fn price_bbs(contract: &ContractParameters, steps: usize) -> Result<Price> {
    BinomialEngine::new(steps).npv(contract)
}
