//! End-to-end checks on the short-dated American put
//! `S₀ = K = 100, r = 4%, q = 2%, σ = 20%, T = 1/12`.

use ee_core::{ContractParameters, Error, OptionType, PricingEngine};
use ee_pricingengines::{
    black_scholes_merton, price_bbs, price_bbsr, price_lsmc, BbsrEngine, BinomialEngine,
    LsmcEngine,
};

fn contract() -> ContractParameters {
    ContractParameters::new(100.0, 100.0, 1.0 / 12.0, 0.04, 0.02, 0.2).unwrap()
}

fn european_put() -> f64 {
    black_scholes_merton(OptionType::Put, 100.0, 100.0, 0.04, 0.02, 0.2, 1.0 / 12.0)
}

// ─── Binomial / Richardson ────────────────────────────────────────────────────

#[test]
fn bbsr_scenario_price() {
    let price = price_bbsr(&contract(), 5_000).unwrap();
    assert!((price - 2.23).abs() < 0.05, "BBSR(5000) = {price:.5}");
}

#[test]
fn bbsr_is_bit_reproducible() {
    let a = price_bbsr(&contract(), 1_000).unwrap();
    let b = price_bbsr(&contract(), 1_000).unwrap();
    assert_eq!(a.to_bits(), b.to_bits());
}

#[test]
fn bbsr_equals_recombined_binomial_prices() {
    let c = contract();
    for n in [10, 101, 750] {
        let direct = 2.0 * price_bbs(&c, 2 * n).unwrap() - price_bbs(&c, n).unwrap();
        assert_eq!(price_bbsr(&c, n).unwrap().to_bits(), direct.to_bits(), "N = {n}");
    }
}

#[test]
fn american_prices_dominate_european() {
    let c = contract();
    let eu = european_put();
    assert!(price_bbs(&c, 500).unwrap() >= eu);
    assert!(price_bbsr(&c, 500).unwrap() >= eu);
}

#[test]
fn engines_are_interchangeable() {
    let c = contract();
    let engines: Vec<Box<dyn PricingEngine>> = vec![
        Box::new(BinomialEngine::new(400)),
        Box::new(BbsrEngine::new(200)),
        Box::new(LsmcEngine::new(5_000, 25, 2, 42)),
    ];
    for engine in &engines {
        let price = engine.npv(&c).unwrap();
        assert!(
            (price - 2.226).abs() < 0.15,
            "{} priced {price:.4}",
            engine.name()
        );
    }
}

// ─── Least-squares Monte Carlo ────────────────────────────────────────────────

#[test]
fn lsmc_agrees_with_bbsr_on_coarse_grid() {
    let c = contract();
    let reference = price_bbsr(&c, 5_000).unwrap();
    let lsmc = price_lsmc(&c, 10_000, 50, 2, 42).unwrap();
    let rel = (lsmc - reference).abs() / reference;
    assert!(rel < 0.05, "LSMC {lsmc:.4} vs BBSR {reference:.4}");
}

#[test]
#[ignore = "simulates a 10 000 × 5 000 path set (~400 MB)"]
fn lsmc_agrees_with_bbsr_full_scenario() {
    let c = contract();
    let reference = price_bbsr(&c, 5_000).unwrap();
    let lsmc = price_lsmc(&c, 10_000, 5_000, 2, 42).unwrap();
    let rel = (lsmc - reference).abs() / reference;
    assert!(rel < 0.05, "LSMC {lsmc:.4} vs BBSR {reference:.4}");
}

#[test]
fn lsmc_is_seed_reproducible() {
    let c = contract();
    let a = LsmcEngine::new(3_000, 20, 2, 9).calculate(&c).unwrap();
    let b = LsmcEngine::new(3_000, 20, 2, 9).calculate(&c).unwrap();
    assert_eq!(a, b);
}

#[test]
fn lsmc_reports_standard_error() {
    let c = contract();
    let result = LsmcEngine::new(10_000, 20, 2, 1).calculate(&c).unwrap();
    assert_eq!(result.paths, 10_000);
    assert_eq!(result.steps, 20);
    assert_eq!(result.exercise_steps.len(), 19);
    assert!(result.error_estimate > 0.0 && result.error_estimate < 0.05);
}

#[test]
fn lsmc_call_with_dividends_is_close_to_lattice() {
    let c = ContractParameters::new(100.0, 95.0, 0.5, 0.02, 0.06, 0.25).unwrap();
    let lattice = BbsrEngine::new(1_000)
        .with_option_type(OptionType::Call)
        .npv(&c)
        .unwrap();
    let lsmc = LsmcEngine::new(10_000, 25, 2, 3)
        .with_option_type(OptionType::Call)
        .npv(&c)
        .unwrap();
    assert!((lsmc - lattice).abs() / lattice < 0.05, "LSMC {lsmc:.4} vs BBSR {lattice:.4}");
}

// ─── Invalid inputs ───────────────────────────────────────────────────────────

#[test]
fn invalid_inputs_are_rejected() {
    let c = contract();
    assert!(matches!(price_bbsr(&c, 0), Err(Error::InvalidParameter(_))));
    assert!(matches!(price_lsmc(&c, 0, 10, 2, 1), Err(Error::InvalidParameter(_))));
    assert!(matches!(price_lsmc(&c, 100, 0, 2, 1), Err(Error::InvalidParameter(_))));
    assert!(matches!(price_lsmc(&c, 100, 10, 0, 1), Err(Error::InvalidParameter(_))));

    let mut bad = c;
    bad.volatility = -0.2;
    assert!(matches!(price_bbsr(&bad, 100), Err(Error::InvalidParameter(_))));
    assert!(matches!(price_lsmc(&bad, 100, 10, 2, 1), Err(Error::InvalidParameter(_))));
}

#[test]
fn too_few_paths_for_the_regression_is_degenerate() {
    // deep in the money: both paths enter every regression, two points
    // cannot support a quadratic fit
    let c = ContractParameters::new(50.0, 100.0, 1.0 / 12.0, 0.04, 0.02, 0.2).unwrap();
    let err = price_lsmc(&c, 2, 10, 2, 1).unwrap_err();
    assert!(matches!(err, Error::DegenerateRegression { .. }), "{err}");
}

#[test]
fn coarse_lattice_with_extreme_carry_is_rejected() {
    let c = ContractParameters::new(100.0, 100.0, 1.0, 0.5, 0.0, 0.01).unwrap();
    assert!(matches!(price_bbsr(&c, 1), Err(Error::InvalidParameter(_))));
}
