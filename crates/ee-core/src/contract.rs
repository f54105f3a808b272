//! The immutable contract record shared by every engine.

use crate::{ensure, Rate, Real, Result, Time, Volatility};

/// Market and contract inputs for a single-asset option under
/// Black-Scholes-Merton dynamics.
///
/// Construct through [`ContractParameters::new`], which validates every
/// field. Values obtained any other way (e.g. deserialised) should be checked
/// with [`ContractParameters::validate`] before use; every engine does so.
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct ContractParameters {
    /// Spot price `S₀ > 0`.
    pub spot: Real,
    /// Strike `K > 0`.
    pub strike: Real,
    /// Time to maturity in years, `T > 0`.
    pub maturity: Time,
    /// Continuously-compounded risk-free rate `r`.
    pub rate: Rate,
    /// Continuous dividend yield `q ≥ 0`.
    pub dividend_yield: Rate,
    /// Black-Scholes volatility `σ > 0`.
    pub volatility: Volatility,
}

impl ContractParameters {
    /// Create and validate a contract record.
    pub fn new(
        spot: Real,
        strike: Real,
        maturity: Time,
        rate: Rate,
        dividend_yield: Rate,
        volatility: Volatility,
    ) -> Result<Self> {
        let contract = Self {
            spot,
            strike,
            maturity,
            rate,
            dividend_yield,
            volatility,
        };
        contract.validate()?;
        Ok(contract)
    }

    /// Check every field against its domain.
    pub fn validate(&self) -> Result<()> {
        ensure!(
            self.spot.is_finite() && self.spot > 0.0,
            "spot must be positive, got {}",
            self.spot
        );
        ensure!(
            self.strike.is_finite() && self.strike > 0.0,
            "strike must be positive, got {}",
            self.strike
        );
        ensure!(
            self.maturity.is_finite() && self.maturity > 0.0,
            "maturity must be positive, got {}",
            self.maturity
        );
        ensure!(self.rate.is_finite(), "rate must be finite, got {}", self.rate);
        ensure!(
            self.dividend_yield.is_finite() && self.dividend_yield >= 0.0,
            "dividend yield must be non-negative, got {}",
            self.dividend_yield
        );
        ensure!(
            self.volatility.is_finite() && self.volatility > 0.0,
            "volatility must be positive, got {}",
            self.volatility
        );
        Ok(())
    }

    /// One-period discount factor `exp(−r·dt)`.
    #[inline]
    pub fn discount(&self, dt: Time) -> Real {
        (-self.rate * dt).exp()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::Error;
    use approx::assert_abs_diff_eq;

    fn atm() -> Result<ContractParameters> {
        ContractParameters::new(100.0, 100.0, 1.0 / 12.0, 0.04, 0.02, 0.2)
    }

    #[test]
    fn valid_contract() {
        let c = atm().unwrap();
        assert_abs_diff_eq!(c.discount(1.0), (-0.04_f64).exp(), epsilon = 1e-15);
    }

    #[test]
    fn rejects_bad_inputs() {
        let cases = [
            ContractParameters::new(0.0, 100.0, 1.0, 0.04, 0.0, 0.2),
            ContractParameters::new(100.0, -1.0, 1.0, 0.04, 0.0, 0.2),
            ContractParameters::new(100.0, 100.0, 0.0, 0.04, 0.0, 0.2),
            ContractParameters::new(100.0, 100.0, 1.0, f64::NAN, 0.0, 0.2),
            ContractParameters::new(100.0, 100.0, 1.0, 0.04, -0.01, 0.2),
            ContractParameters::new(100.0, 100.0, 1.0, 0.04, 0.0, 0.0),
        ];
        for case in cases {
            assert!(matches!(case, Err(Error::InvalidParameter(_))), "{case:?}");
        }
    }

    #[test]
    fn negative_rates_are_allowed() {
        assert!(ContractParameters::new(100.0, 100.0, 1.0, -0.01, 0.0, 0.2).is_ok());
    }

    #[cfg(feature = "serde")]
    #[test]
    fn deserialize_from_json() {
        let json = r#"{
            "spot": 100.0, "strike": 95.0, "maturity": 0.5,
            "rate": 0.05, "dividend_yield": 0.0, "volatility": 0.25
        }"#;
        let c: ContractParameters = serde_json::from_str(json).unwrap();
        assert!(c.validate().is_ok());
        assert_eq!(c.strike, 95.0);
    }

    proptest::proptest! {
        #[test]
        fn positive_inputs_always_validate(
            spot in 1.0_f64..500.0,
            strike in 1.0_f64..500.0,
            maturity in 0.01_f64..5.0,
            rate in -0.05_f64..0.2,
            q in 0.0_f64..0.1,
            vol in 0.01_f64..1.5,
        ) {
            proptest::prop_assert!(
                ContractParameters::new(spot, strike, maturity, rate, q, vol).is_ok()
            );
        }
    }
}
