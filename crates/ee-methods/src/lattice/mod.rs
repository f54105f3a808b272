//! Lattice methods for option pricing.
//!
//! * [`BinomialLattice`] — recombining CRR lattice with a validated
//!   risk-neutral probability
//! * [`price_european`] / [`price_american`] — backward-induction pricing
//!
//! Both rollbacks work on a single value buffer of `steps + 1` entries. Layer
//! `i` overwrites entries `0..=i` in increasing node order; entry `j` only
//! reads entries `j` and `j + 1` of layer `i + 1`, neither of which has been
//! overwritten yet, so no second grid is needed.

pub mod binomial_lattice;

pub use binomial_lattice::BinomialLattice;

use ee_core::Real;

fn terminal_values(lattice: &BinomialLattice, payoff: &dyn Fn(Real) -> Real) -> Vec<Real> {
    let n = lattice.steps();
    (0..lattice.size(n))
        .map(|j| payoff(lattice.underlying(n, j)))
        .collect()
}

/// Price a European option by backward induction on a binomial lattice.
///
/// # Arguments
/// * `lattice` — the binomial lattice (already constructed)
/// * `payoff` — payoff function `S → value` (e.g. `|s| (100.0 - s).max(0.0)`)
/// * `discount` — per-step discount factor, typically `exp(−r · Δt)`
pub fn price_european(
    lattice: &BinomialLattice,
    payoff: &dyn Fn(Real) -> Real,
    discount: Real,
) -> Real {
    let pu = lattice.probability();
    let pd = 1.0 - pu;
    let mut values = terminal_values(lattice, payoff);

    for i in (0..lattice.steps()).rev() {
        for j in 0..lattice.size(i) {
            values[j] = discount * (pu * values[j] + pd * values[j + 1]);
        }
    }

    values[0]
}

/// Price an American option by backward induction on a binomial lattice.
///
/// Same as European pricing, but every node takes
/// `max(continuation, immediate exercise)`.
pub fn price_american(
    lattice: &BinomialLattice,
    payoff: &dyn Fn(Real) -> Real,
    discount: Real,
) -> Real {
    let pu = lattice.probability();
    let pd = 1.0 - pu;
    let mut values = terminal_values(lattice, payoff);

    for i in (0..lattice.steps()).rev() {
        for j in 0..lattice.size(i) {
            let hold = discount * (pu * values[j] + pd * values[j + 1]);
            let exercise = payoff(lattice.underlying(i, j));
            values[j] = hold.max(exercise);
        }
    }

    values[0]
}

// ─── Tests ────────────────────────────────────────────────────────────────────
