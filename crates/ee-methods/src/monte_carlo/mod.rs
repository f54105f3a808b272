//! Monte Carlo path simulation.
//!
//! * [`PathSet`] — an `M × (N + 1)` grid of simulated prices
//! * [`PathSimulator`] — fills a path set from a 1-D stochastic process
//! * [`simulate_paths`] — convenience wrapper for a Black-Scholes-Merton
//!   contract
//!
//! The grid is stored step-major: all `M` prices of time step `t` are
//! contiguous, which is the access pattern of the Longstaff-Schwartz
//! backward pass (one cross-section per step).

use ee_core::{ensure, errors::Error, ContractParameters, Real, Result, Time};
use ee_math::random_numbers::InverseCumulativeNormalRng;
use ee_processes::{BlackScholesMertonProcess, StochasticProcess1D};

// ─── PathSet ──────────────────────────────────────────────────────────────────

/// A set of `paths` simulated trajectories on a uniform grid of `steps + 1`
/// time points `0, dt, …, steps·dt`.
#[derive(Debug, Clone, PartialEq)]
pub struct PathSet {
    paths: usize,
    steps: usize,
    dt: Time,
    /// `values[t * paths + i]` is the price of path `i` at step `t`.
    values: Vec<Real>,
}

impl PathSet {
    /// Build a path set from explicit per-path trajectories.
    ///
    /// Every row must have the same length (≥ 2) and contain only strictly
    /// positive prices.
    pub fn from_paths(rows: &[Vec<Real>], dt: Time) -> Result<Self> {
        ensure!(!rows.is_empty(), "path set needs at least one path");
        ensure!(dt > 0.0, "time step must be positive, got {dt}");
        let len = rows[0].len();
        ensure!(len >= 2, "paths need at least two time points, got {len}");
        for row in rows {
            if row.len() != len {
                return Err(Error::ShapeMismatch {
                    what: "path length",
                    expected: len,
                    actual: row.len(),
                });
            }
            ensure!(
                row.iter().all(|&s| s.is_finite() && s > 0.0),
                "path prices must be strictly positive"
            );
        }

        let paths = rows.len();
        let mut values = vec![0.0; paths * len];
        for (i, row) in rows.iter().enumerate() {
            for (t, &s) in row.iter().enumerate() {
                values[t * paths + i] = s;
            }
        }
        Ok(Self {
            paths,
            steps: len - 1,
            dt,
            values,
        })
    }

    /// Number of paths `M`.
    pub fn paths(&self) -> usize {
        self.paths
    }

    /// Number of time steps `N` (each path has `N + 1` points).
    pub fn steps(&self) -> usize {
        self.steps
    }

    /// Time step `Δt`.
    pub fn dt(&self) -> Time {
        self.dt
    }

    /// Prices of every path at time step `t`.
    ///
    /// # Panics
    /// Panics if `t > steps()`.
    pub fn column(&self, t: usize) -> &[Real] {
        &self.values[t * self.paths..(t + 1) * self.paths]
    }

    /// Price of path `i` at time step `t`.
    pub fn value(&self, i: usize, t: usize) -> Real {
        self.values[t * self.paths + i]
    }

    /// The full trajectory of path `i`.
    pub fn path(&self, i: usize) -> Vec<Real> {
        (0..=self.steps).map(|t| self.value(i, t)).collect()
    }
}

// ─── PathSimulator ────────────────────────────────────────────────────────────

/// Generates path sets of a 1-D stochastic process on a uniform time grid.
///
/// Draws one standard normal per (path, step) cell from a seeded Mersenne
/// Twister; identical seeds give bit-identical path sets.
pub struct PathSimulator<'a> {
    process: &'a dyn StochasticProcess1D,
    dt: Time,
    steps: usize,
    seed: u64,
}

impl<'a> PathSimulator<'a> {
    /// Create a new simulator.
    ///
    /// # Arguments
    /// * `process` — the stochastic process to simulate
    /// * `maturity` — total time horizon
    /// * `steps` — number of time steps `N`
    /// * `seed` — RNG seed
    pub fn new(
        process: &'a dyn StochasticProcess1D,
        maturity: Time,
        steps: usize,
        seed: u64,
    ) -> Result<Self> {
        ensure!(steps > 0, "step count must be positive");
        ensure!(maturity > 0.0, "maturity must be positive, got {maturity}");
        Ok(Self {
            process,
            dt: maturity / steps as Real,
            steps,
            seed,
        })
    }

    fn fill_path(&self, rng: &mut InverseCumulativeNormalRng, mut write: impl FnMut(usize, Real)) {
        let mut x = self.process.x0();
        write(0, x);
        for t in 1..=self.steps {
            let dw = rng.next_real();
            x = self
                .process
                .evolve_1d((t - 1) as Real * self.dt, x, self.dt, dw);
            write(t, x);
        }
    }

    /// Simulate `paths` trajectories from a single random stream, path by
    /// path.
    pub fn simulate(&self, paths: usize) -> Result<PathSet> {
        ensure!(paths > 0, "path count must be positive");
        let mut rng = InverseCumulativeNormalRng::new(self.seed);
        let mut values = vec![0.0; paths * (self.steps + 1)];
        for i in 0..paths {
            self.fill_path(&mut rng, |t, x| values[t * paths + i] = x);
        }
        tracing::trace!(paths, steps = self.steps, seed = self.seed, "simulated path set");
        Ok(PathSet {
            paths,
            steps: self.steps,
            dt: self.dt,
            values,
        })
    }

    /// Simulate `paths` trajectories in parallel.
    ///
    /// Path `i` draws from its own stream
    /// ([`InverseCumulativeNormalRng::for_stream`]), so the result depends
    /// on the seed only, never on the thread count. It differs from the
    /// single-stream output of [`simulate`](Self::simulate).
    #[cfg(feature = "parallel")]
    pub fn simulate_parallel(&self, paths: usize) -> Result<PathSet> {
        use rayon::prelude::*;

        ensure!(paths > 0, "path count must be positive");
        let width = self.steps + 1;
        let rows: Vec<Vec<Real>> = (0..paths)
            .into_par_iter()
            .map(|i| {
                let mut rng = InverseCumulativeNormalRng::for_stream(self.seed, i as u64);
                let mut row = vec![0.0; width];
                self.fill_path(&mut rng, |t, x| row[t] = x);
                row
            })
            .collect();

        let mut values = vec![0.0; paths * width];
        for (i, row) in rows.iter().enumerate() {
            for (t, &x) in row.iter().enumerate() {
                values[t * paths + i] = x;
            }
        }
        tracing::trace!(paths, steps = self.steps, seed = self.seed, "simulated path set in parallel");
        Ok(PathSet {
            paths,
            steps: self.steps,
            dt: self.dt,
            values,
        })
    }
}

/// Simulate `paths × (steps + 1)` Black-Scholes-Merton prices for `contract`.
///
/// `S[t] = S[t−1]·exp((r − q − σ²/2)Δt + σ√Δt·Z)` with `Δt = T / steps`.
pub fn simulate_paths(
    contract: &ContractParameters,
    paths: usize,
    steps: usize,
    seed: u64,
) -> Result<PathSet> {
    let process = BlackScholesMertonProcess::new(contract)?;
    PathSimulator::new(&process, contract.maturity, steps, seed)?.simulate(paths)
}

// ─── Tests ────────────────────────────────────────────────────────────────────
