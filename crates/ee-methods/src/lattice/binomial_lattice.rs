//! Recombining Cox-Ross-Rubinstein lattice.
//!
//! ```text
//! dt = T / N,   u = exp(σ √dt),   d = 1 / u
//! p  = (exp((r − q) dt) − d) / (u − d)
//! ```
//!
//! Node `(i, j)` sits at time step `i` after `j` down-moves and `i − j`
//! up-moves, so node 0 is the top of each layer and the up/down successors of
//! `(i, j)` are `(i + 1, j)` and `(i + 1, j + 1)`.

use ee_core::{ensure, ContractParameters, Real, Result, Time};

/// A recombining binomial lattice with `steps + 1` time layers, layer `i`
/// holding `i + 1` nodes.
///
/// Since `d = 1/u`, every node price is `S₀·uᵏ` for some `k ∈ [−N, N]`; the
/// lattice stores those `2N + 1` levels once instead of the full triangle.
#[derive(Debug, Clone)]
pub struct BinomialLattice {
    steps: usize,
    dt: Time,
    up: Real,
    down: Real,
    probability: Real,
    /// `levels[N + k] = S₀·uᵏ`
    levels: Vec<Real>,
}

impl BinomialLattice {
    /// Build the lattice for `contract` with `steps` time steps.
    ///
    /// Fails with `InvalidParameter` for a zero step count, an invalid
    /// contract, or a parameter combination whose risk-neutral probability
    /// falls outside the open interval `(0, 1)` (time step too coarse for
    /// the carry `r − q` relative to `σ`).
    pub fn new(contract: &ContractParameters, steps: usize) -> Result<Self> {
        contract.validate()?;
        ensure!(steps > 0, "lattice needs at least one step");
        ensure!(
            i32::try_from(steps).is_ok(),
            "lattice step count {steps} is too large"
        );

        let dt = contract.maturity / steps as Real;
        let up = (contract.volatility * dt.sqrt()).exp();
        let down = 1.0 / up;
        let growth = ((contract.rate - contract.dividend_yield) * dt).exp();
        let probability = (growth - down) / (up - down);
        ensure!(
            probability > 0.0 && probability < 1.0,
            "risk-neutral probability {probability} outside (0, 1) for dt = {dt}; \
             increase the step count"
        );

        let n = steps as i32;
        let levels = (-n..=n)
            .map(|k| contract.spot * up.powi(k))
            .collect();

        tracing::trace!(steps, dt, up, down, probability, "built binomial lattice");

        Ok(Self {
            steps,
            dt,
            up,
            down,
            probability,
            levels,
        })
    }

    /// Number of time steps.
    pub fn steps(&self) -> usize {
        self.steps
    }

    /// Time increment per step.
    pub fn dt(&self) -> Time {
        self.dt
    }

    /// Up factor `u`.
    pub fn up(&self) -> Real {
        self.up
    }

    /// Down factor `d = 1/u`.
    pub fn down(&self) -> Real {
        self.down
    }

    /// Risk-neutral up probability `p`.
    pub fn probability(&self) -> Real {
        self.probability
    }

    /// Initial underlying value (root node).
    pub fn x0(&self) -> Real {
        self.levels[self.steps]
    }

    /// Number of nodes at time step `i` (always `i + 1`).
    pub fn size(&self, i: usize) -> usize {
        i + 1
    }

    /// Underlying price at node `(i, j)`: `S₀·u^(i − 2j)`.
    ///
    /// # Panics
    /// Panics if `i > steps()` or `j > i`.
    #[inline]
    pub fn underlying(&self, i: usize, j: usize) -> Real {
        assert!(i <= self.steps && j <= i, "node ({i}, {j}) outside lattice");
        self.levels[self.steps + i - 2 * j]
    }

    /// Materialise the full triangular grid of stock prices, layer by layer,
    /// from the recombining recurrence
    /// `S[i][0] = S[i−1][0]·u`, `S[i][j] = S[i−1][j−1]·d`.
    ///
    /// Memory is quadratic in the step count; intended for inspection of
    /// small lattices.
    pub fn stock_prices(&self) -> Vec<Vec<Real>> {
        let mut grid: Vec<Vec<Real>> = Vec::with_capacity(self.steps + 1);
        grid.push(vec![self.x0()]);
        for i in 1..=self.steps {
            let prev = &grid[i - 1];
            let mut row = Vec::with_capacity(i + 1);
            row.push(prev[0] * self.up);
            row.extend(prev.iter().map(|s| s * self.down));
            grid.push(row);
        }
        grid
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;
    use ee_core::Error;

    fn contract() -> ContractParameters {
        ContractParameters::new(100.0, 100.0, 1.0 / 12.0, 0.04, 0.02, 0.2).unwrap()
    }

    #[test]
    fn crr_parameters() {
        let lattice = BinomialLattice::new(&contract(), 50).unwrap();
        let dt = 1.0 / 12.0 / 50.0;
        assert_relative_eq!(lattice.dt(), dt, max_relative = 1e-15);
        assert_relative_eq!(lattice.up(), (0.2 * dt.sqrt()).exp(), max_relative = 1e-15);
        assert_relative_eq!(lattice.up() * lattice.down(), 1.0, max_relative = 1e-15);
        assert!(lattice.probability() > 0.0 && lattice.probability() < 1.0);
        assert_eq!(lattice.size(50), 51);
    }

    #[test]
    fn node_prices_follow_recurrence() {
        let lattice = BinomialLattice::new(&contract(), 40).unwrap();
        assert_eq!(lattice.x0(), 100.0);
        for i in 1..=40 {
            assert_relative_eq!(
                lattice.underlying(i, 0),
                lattice.underlying(i - 1, 0) * lattice.up(),
                max_relative = 1e-12
            );
            for j in 1..=i {
                assert_relative_eq!(
                    lattice.underlying(i, j),
                    lattice.underlying(i - 1, j - 1) * lattice.down(),
                    max_relative = 1e-12
                );
            }
        }
    }

    #[test]
    fn stock_price_grid_is_triangular_and_matches_nodes() {
        let lattice = BinomialLattice::new(&contract(), 12).unwrap();
        let grid = lattice.stock_prices();
        assert_eq!(grid.len(), 13);
        for (i, row) in grid.iter().enumerate() {
            assert_eq!(row.len(), i + 1);
            for (j, &s) in row.iter().enumerate() {
                assert_relative_eq!(s, lattice.underlying(i, j), max_relative = 1e-12);
            }
        }
    }

    #[test]
    fn recombines() {
        // up then down lands back on the same level
        let lattice = BinomialLattice::new(&contract(), 10).unwrap();
        assert_eq!(lattice.underlying(2, 1), lattice.x0());
        assert_eq!(lattice.underlying(4, 2), lattice.x0());
    }

    #[test]
    fn coarse_step_with_high_carry_is_rejected() {
        // growth exp((r − q)·dt) exceeds u when σ is tiny relative to r
        let c = ContractParameters::new(100.0, 100.0, 1.0, 0.5, 0.0, 0.01).unwrap();
        let err = BinomialLattice::new(&c, 1).unwrap_err();
        assert!(matches!(err, Error::InvalidParameter(ref m) if m.contains("probability")));
        // refining the grid restores a valid measure
        assert!(BinomialLattice::new(&c, 10_000).is_ok());
    }

    #[test]
    fn zero_steps_rejected() {
        assert!(matches!(
            BinomialLattice::new(&contract(), 0),
            Err(Error::InvalidParameter(_))
        ));
    }

    proptest::proptest! {
        #[test]
        fn probability_in_open_unit_interval_or_rejected(
            rate in -0.1_f64..0.3,
            q in 0.0_f64..0.1,
            vol in 0.01_f64..1.0,
            maturity in 0.01_f64..3.0,
            steps in 1_usize..200,
        ) {
            let c = ContractParameters::new(100.0, 100.0, maturity, rate, q, vol).unwrap();
            match BinomialLattice::new(&c, steps) {
                Ok(l) => proptest::prop_assert!(l.probability() > 0.0 && l.probability() < 1.0),
                Err(e) => proptest::prop_assert!(matches!(e, Error::InvalidParameter(_))),
            }
        }
    }
}
