//! The `PricingEngine` trait.

use crate::{ContractParameters, Price, Result};

/// An engine that turns a contract into a present value.
///
/// The least-squares Monte Carlo engine and the binomial engines all
/// implement this trait, so a caller can swap one price source for another.
pub trait PricingEngine {
    /// Short human-readable engine name, used in log events.
    fn name(&self) -> &'static str;

    /// Price the contract, returning the discounted present value.
    fn npv(&self, contract: &ContractParameters) -> Result<Price>;
}
