//! Least-squares Monte Carlo (Longstaff-Schwartz) engine for American
//! options.
//!
//! # Algorithm
//!
//! On a path set `S[i, t]`, `t = 0..=N`, with `Δt = T/N` and
//! `D = exp(−r·Δt)`:
//!
//! 1. Cash flows start as the payoff at maturity, `CF[i] = h(S[i, N])`.
//! 2. For `t = N−1` down to `1`: every cash flow is discounted one step,
//!    `CF[i] ← D·CF[i]`. On the in-the-money paths a polynomial in `S[i, t]`
//!    is regressed against the discounted cash flows; a path exercises when
//!    its intrinsic value beats the fitted continuation value, replacing its
//!    cash flow with the intrinsic value. Out-of-the-money paths keep the
//!    discounted cash flow untouched.
//! 3. The price is `D · mean(CF)`, the cash flows now being valued at `t = 1`.
//!
//! Step `0` never enters the regression: every path sits at `S₀` there, so
//! the cross-section has a single distinct regressor value.
//!
//! The cash-flow column is a single buffer, overwritten once per step in
//! backward order.

use ee_core::{
    ensure,
    errors::{Error, Result},
    ContractParameters, DiscountFactor, OptionType, PlainVanillaPayoff, Price, PricingEngine,
    Real,
};
use ee_math::{linear_least_squares::fit_and_predict, Statistics};
use ee_methods::monte_carlo::{PathSet, PathSimulator};
use ee_processes::BlackScholesMertonProcess;

// ─── Exercise decision ────────────────────────────────────────────────────────

/// The outcome of the exercise rule for one in-the-money path at one step.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum ExerciseDecision {
    /// Exercise now and receive the intrinsic value.
    Exercise(Real),
    /// Hold; the path keeps its discounted future cash flow.
    Continue(Real),
}

impl ExerciseDecision {
    /// Exercise iff the intrinsic value strictly exceeds the estimated
    /// continuation value. Ties continue.
    #[inline]
    pub fn decide(
        exercise_value: Real,
        continuation_estimate: Real,
        discounted_future: Real,
    ) -> Self {
        if exercise_value > continuation_estimate {
            ExerciseDecision::Exercise(exercise_value)
        } else {
            ExerciseDecision::Continue(discounted_future)
        }
    }

    /// The cash flow the path carries after the decision.
    #[inline]
    pub fn value(self) -> Real {
        match self {
            ExerciseDecision::Exercise(v) | ExerciseDecision::Continue(v) => v,
        }
    }

    /// Whether the path exercised.
    #[inline]
    pub fn is_exercise(self) -> bool {
        matches!(self, ExerciseDecision::Exercise(_))
    }
}

// ─── Results ──────────────────────────────────────────────────────────────────

/// Per-step exercise diagnostics.
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct ExerciseStep {
    /// Time-step index `t` (1 ≤ t < N).
    pub step: usize,
    /// Number of in-the-money paths used in the regression.
    pub itm_paths: usize,
    /// Number of paths that exercised.
    pub exercised_paths: usize,
    /// Estimated exercise boundary: the highest exercised spot for a put,
    /// the lowest for a call. `None` when nothing exercised.
    pub boundary: Option<Real>,
}

/// Output of a least-squares Monte Carlo run.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct LsmcResults {
    /// Discounted price estimate.
    pub price: Price,
    /// Monte Carlo standard error of the estimate.
    pub error_estimate: Real,
    /// Number of simulated paths.
    pub paths: usize,
    /// Number of time steps.
    pub steps: usize,
    /// Exercise diagnostics for steps `1..N`, in chronological order.
    pub exercise_steps: Vec<ExerciseStep>,
}

// ─── Backward step ────────────────────────────────────────────────────────────

/// Roll the cash-flow column back by one time step.
///
/// On entry `cashflows[i]` is path `i`'s cash flow valued at step `t + 1`;
/// on success it is valued at step `t`. `prices` is the cross-section
/// `S[·, t]`. Out-of-the-money paths end up with exactly
/// `discount · cashflows[i]`; only in-the-money paths enter the regression
/// and the exercise rule. On error the buffer is left untouched.
pub fn lsmc_backward_step(
    step: usize,
    prices: &[Real],
    cashflows: &mut [Real],
    payoff: &PlainVanillaPayoff,
    discount: DiscountFactor,
    degree: usize,
) -> Result<ExerciseStep> {
    if prices.len() != cashflows.len() {
        return Err(Error::ShapeMismatch {
            what: "cash flows per step",
            expected: prices.len(),
            actual: cashflows.len(),
        });
    }

    let itm: Vec<usize> = (0..prices.len())
        .filter(|&i| payoff.in_the_money(prices[i]))
        .collect();

    let mut outcome = ExerciseStep {
        step,
        itm_paths: itm.len(),
        exercised_paths: 0,
        boundary: None,
    };

    if itm.is_empty() {
        cashflows.iter_mut().for_each(|cf| *cf *= discount);
        return Ok(outcome);
    }

    let xs: Vec<Real> = itm.iter().map(|&i| prices[i]).collect();
    let ys: Vec<Real> = itm.iter().map(|&i| cashflows[i] * discount).collect();
    let continuation = fit_and_predict(&xs, &ys, degree, &xs)?;

    cashflows.iter_mut().for_each(|cf| *cf *= discount);

    for (k, &i) in itm.iter().enumerate() {
        let decision = ExerciseDecision::decide(payoff.value(xs[k]), continuation[k], ys[k]);
        if decision.is_exercise() {
            outcome.exercised_paths += 1;
            outcome.boundary = Some(match (payoff.option_type, outcome.boundary) {
                (_, None) => xs[k],
                (OptionType::Put, Some(b)) => b.max(xs[k]),
                (OptionType::Call, Some(b)) => b.min(xs[k]),
            });
        }
        cashflows[i] = decision.value();
    }

    Ok(outcome)
}

// ─── Engine ───────────────────────────────────────────────────────────────────

/// Longstaff-Schwartz least-squares Monte Carlo engine.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct LsmcEngine {
    /// Number of Monte Carlo paths `M`.
    pub paths: usize,
    /// Number of time steps `N` (exercise opportunities at steps `1..N`).
    pub steps: usize,
    /// Degree of the regression polynomial, `k ≥ 1`.
    pub degree: usize,
    /// RNG seed.
    pub seed: u64,
    /// Put or call.
    pub option_type: OptionType,
    /// Simulate paths on the rayon thread pool (needs the `parallel`
    /// feature; otherwise simulation stays serial).
    pub parallel: bool,
}

impl Default for LsmcEngine {
    fn default() -> Self {
        Self {
            paths: 10_000,
            steps: 500,
            degree: 2,
            seed: 42,
            option_type: OptionType::Put,
            parallel: false,
        }
    }
}

impl LsmcEngine {
    /// Creates an engine for an American put.
    pub fn new(paths: usize, steps: usize, degree: usize, seed: u64) -> Self {
        Self {
            paths,
            steps,
            degree,
            seed,
            ..Self::default()
        }
    }

    /// Prices a put or a call.
    pub fn with_option_type(mut self, option_type: OptionType) -> Self {
        self.option_type = option_type;
        self
    }

    /// Requests parallel path simulation.
    pub fn with_parallel(mut self, parallel: bool) -> Self {
        self.parallel = parallel;
        self
    }

    fn check_settings(&self) -> Result<()> {
        ensure!(self.paths > 0, "path count must be positive");
        ensure!(self.steps > 0, "step count must be positive");
        ensure!(self.degree >= 1, "regression degree must be at least 1");
        Ok(())
    }

    fn simulate(&self, contract: &ContractParameters) -> Result<PathSet> {
        let process = BlackScholesMertonProcess::new(contract)?;
        let simulator = PathSimulator::new(&process, contract.maturity, self.steps, self.seed)?;

        #[cfg(feature = "parallel")]
        if self.parallel {
            return simulator.simulate_parallel(self.paths);
        }
        #[cfg(not(feature = "parallel"))]
        if self.parallel {
            tracing::warn!("parallel simulation requested without the `parallel` feature");
        }

        simulator.simulate(self.paths)
    }

    /// Simulate paths and run the backward induction.
    pub fn calculate(&self, contract: &ContractParameters) -> Result<LsmcResults> {
        let span = tracing::debug_span!(
            "lsmc",
            paths = self.paths,
            steps = self.steps,
            degree = self.degree,
            seed = self.seed
        );
        let _guard = span.enter();

        contract.validate()?;
        self.check_settings()?;
        let paths = self.simulate(contract)?;
        self.price_paths(contract, &paths)
    }

    /// Run the backward induction on a caller-supplied path set.
    ///
    /// The path set must have `steps + 1` time points on the grid
    /// `Δt = T / steps`, and start every path at the contract's spot.
    pub fn price_paths(&self, contract: &ContractParameters, paths: &PathSet) -> Result<LsmcResults> {
        contract.validate()?;
        self.check_settings()?;
        if paths.steps() != self.steps {
            return Err(Error::ShapeMismatch {
                what: "path set time points",
                expected: self.steps + 1,
                actual: paths.steps() + 1,
            });
        }
        let dt = contract.maturity / self.steps as Real;
        ensure!(
            (paths.dt() - dt).abs() <= 1e-12 * dt,
            "path set time step {} does not match T/N = {dt}",
            paths.dt()
        );
        ensure!(
            paths
                .column(0)
                .iter()
                .all(|&s| (s - contract.spot).abs() <= 1e-12 * contract.spot),
            "path set does not start at spot {}",
            contract.spot
        );

        let payoff = PlainVanillaPayoff::new(self.option_type, contract.strike);
        let discount = contract.discount(dt);
        let n = self.steps;

        let mut cashflows: Vec<Real> = paths.column(n).iter().map(|&s| payoff.value(s)).collect();
        let mut exercise_steps = Vec::with_capacity(n.saturating_sub(1));

        for t in (1..n).rev() {
            let outcome = lsmc_backward_step(
                t,
                paths.column(t),
                &mut cashflows,
                &payoff,
                discount,
                self.degree,
            )
            .map_err(|e| {
                tracing::debug!(step = t, error = %e, "backward induction failed");
                e
            })?;
            tracing::trace!(
                step = t,
                itm = outcome.itm_paths,
                exercised = outcome.exercised_paths,
                "lsmc step"
            );
            exercise_steps.push(outcome);
        }
        exercise_steps.reverse();

        let mut stats = Statistics::new();
        stats.extend(cashflows.iter().map(|cf| cf * discount));
        let price = stats.mean().unwrap_or(0.0);
        let error_estimate = stats.error_estimate().unwrap_or(0.0);

        tracing::debug!(price, error_estimate, "lsmc priced");

        Ok(LsmcResults {
            price,
            error_estimate,
            paths: paths.paths(),
            steps: n,
            exercise_steps,
        })
    }
}

impl PricingEngine for LsmcEngine {
    fn name(&self) -> &'static str {
        "lsmc"
    }

    fn npv(&self, contract: &ContractParameters) -> Result<Price> {
        self.calculate(contract).map(|r| r.price)
    }
}

/// Least-squares Monte Carlo price of an American put.
pub fn price_lsmc(
    contract: &ContractParameters,
    path_count: usize,
    step_count: usize,
    regressor_degree: usize,
    rng_seed: u64,
) -> Result<Price> {
    LsmcEngine::new(path_count, step_count, regressor_degree, rng_seed).npv(contract)
}

// ─── Tests ────────────────────────────────────────────────────────────────────
