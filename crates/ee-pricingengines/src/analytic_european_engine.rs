//! Analytic European option engine (Black-Scholes-Merton).
//!
//! The closed form is the lower bound every American price must respect, and
//! the benchmark callers compare the numerical engines against.

use ee_core::{ContractParameters, OptionType, Price, PricingEngine, Real, Result};
use ee_math::distributions::normal_cdf;

/// Black-Scholes-Merton price of a European option.
///
/// $$C = S e^{-qT} N(d_1) - K e^{-rT} N(d_2)$$
/// $$P = K e^{-rT} N(-d_2) - S e^{-qT} N(-d_1)$$
///
/// where $d_{1,2} = \frac{\ln(S/K) + (r - q \pm \sigma^2/2)T}{\sigma\sqrt{T}}$.
/// At or past expiry the intrinsic value is returned.
pub fn black_scholes_merton(
    option_type: OptionType,
    spot: Real,
    strike: Real,
    risk_free_rate: Real,
    dividend_yield: Real,
    volatility: Real,
    time_to_expiry: Real,
) -> Real {
    let phi = option_type.sign();
    let t = time_to_expiry;

    if t <= 0.0 {
        return (phi * (spot - strike)).max(0.0);
    }

    let r = risk_free_rate;
    let q = dividend_yield;
    let std_dev = volatility * t.sqrt();
    let df_r = (-r * t).exp();
    let df_q = (-q * t).exp();

    if std_dev <= 1e-15 {
        return (phi * (spot * df_q - strike * df_r)).max(0.0);
    }

    let d1 = ((spot / strike).ln() + (r - q + 0.5 * volatility * volatility) * t) / std_dev;
    let d2 = d1 - std_dev;

    phi * (spot * df_q * normal_cdf(phi * d1) - strike * df_r * normal_cdf(phi * d2))
}

/// Analytic pricing engine for European vanilla options.
#[derive(Debug, Clone, Copy, Default)]
pub struct AnalyticEuropeanEngine {
    option_type: OptionType,
}

impl AnalyticEuropeanEngine {
    /// Create an engine for the given option type.
    pub fn new(option_type: OptionType) -> Self {
        Self { option_type }
    }
}

impl PricingEngine for AnalyticEuropeanEngine {
    fn name(&self) -> &'static str {
        "analytic-european"
    }

    fn npv(&self, contract: &ContractParameters) -> Result<Price> {
        contract.validate()?;
        Ok(black_scholes_merton(
            self.option_type,
            contract.spot,
            contract.strike,
            contract.rate,
            contract.dividend_yield,
            contract.volatility,
            contract.maturity,
        ))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_abs_diff_eq;

    #[test]
    fn bs_call_price() {
        // S=100, K=100, r=5%, q=0%, σ=20%, T=1 → 10.4506
        let price = black_scholes_merton(OptionType::Call, 100.0, 100.0, 0.05, 0.0, 0.20, 1.0);
        assert_abs_diff_eq!(price, 10.4506, epsilon = 1e-4);
    }

    #[test]
    fn bs_put_call_parity_with_dividends() {
        let (s, k, r, q, sigma, t) = (100.0, 105.0, 0.08, 0.03, 0.25, 0.5);
        let call = black_scholes_merton(OptionType::Call, s, k, r, q, sigma, t);
        let put = black_scholes_merton(OptionType::Put, s, k, r, q, sigma, t);
        let parity = call - s * (-q * t).exp() + k * (-r * t).exp();
        assert_abs_diff_eq!(put, parity, epsilon = 1e-10);
    }

    #[test]
    fn short_dated_put_scenario() {
        // S=100, K=100, r=4%, q=2%, σ=20%, T=1/12
        let put = black_scholes_merton(OptionType::Put, 100.0, 100.0, 0.04, 0.02, 0.2, 1.0 / 12.0);
        assert!((put - 2.21).abs() < 0.02, "European put = {put:.4}");
    }

    #[test]
    fn expired_option_is_intrinsic() {
        let put = black_scholes_merton(OptionType::Put, 90.0, 100.0, 0.05, 0.0, 0.2, 0.0);
        assert_eq!(put, 10.0);
    }

    #[test]
    fn engine_prices_contract() {
        let c = ContractParameters::new(100.0, 100.0, 1.0, 0.05, 0.0, 0.2).unwrap();
        let engine = AnalyticEuropeanEngine::new(OptionType::Call);
        assert_abs_diff_eq!(engine.npv(&c).unwrap(), 10.4506, epsilon = 1e-4);
        assert_eq!(engine.name(), "analytic-european");
    }
}
