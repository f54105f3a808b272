//! `StochasticProcess1D` — base trait for scalar diffusions.
//!
//! A process `dX = μ(t,X) dt + σ(t,X) dW` is described by its drift (`μ`),
//! its diffusion (`σ`), and an `evolve_1d` method that advances the state by
//! one time step given a standard-normal draw.

use ee_core::{Real, Time};

/// A 1-dimensional stochastic process `dX = μ(t,X) dt + σ(t,X) dW`.
pub trait StochasticProcess1D: std::fmt::Debug + Send + Sync {
    /// Initial value of the process.
    fn x0(&self) -> Real;

    /// Drift `μ(t, x)`.
    fn drift_1d(&self, t: Time, x: Real) -> Real;

    /// Diffusion `σ(t, x)`.
    fn diffusion_1d(&self, t: Time, x: Real) -> Real;

    /// Expected value `E[x(t+Δt) | x(t) = x]`.
    fn expectation_1d(&self, t: Time, x: Real, dt: Time) -> Real {
        x + self.drift_1d(t, x) * dt
    }

    /// Standard deviation `σ(t,x) · √Δt`.
    fn std_deviation_1d(&self, t: Time, x: Real, dt: Time) -> Real {
        self.diffusion_1d(t, x) * dt.sqrt()
    }

    /// Advance one step; the default is an Euler step `E + σ·√Δt · dw`.
    fn evolve_1d(&self, t: Time, x: Real, dt: Time, dw: Real) -> Real {
        self.expectation_1d(t, x, dt) + self.std_deviation_1d(t, x, dt) * dw
    }

    /// Variance of the increment over `Δt`.
    fn variance_1d(&self, t: Time, x: Real, dt: Time) -> Real {
        let s = self.diffusion_1d(t, x);
        s * s * dt
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_abs_diff_eq;

    /// dX = 0.05·dt + 0.20·dW
    #[derive(Debug)]
    struct ConstantProcess {
        x0: Real,
        mu: Real,
        sigma: Real,
    }

    impl StochasticProcess1D for ConstantProcess {
        fn x0(&self) -> Real {
            self.x0
        }

        fn drift_1d(&self, _t: Time, _x: Real) -> Real {
            self.mu
        }

        fn diffusion_1d(&self, _t: Time, _x: Real) -> Real {
            self.sigma
        }
    }

    fn process() -> ConstantProcess {
        ConstantProcess {
            x0: 100.0,
            mu: 0.05,
            sigma: 0.20,
        }
    }

    #[test]
    fn euler_step_without_noise() {
        let x_new = process().evolve_1d(0.0, 100.0, 1.0, 0.0);
        assert_abs_diff_eq!(x_new, 100.05, epsilon = 1e-12);
    }

    #[test]
    fn euler_step_with_noise() {
        // 100 + 0.05·1 + 0.20·1·1
        let x_new = process().evolve_1d(0.0, 100.0, 1.0, 1.0);
        assert_abs_diff_eq!(x_new, 100.25, epsilon = 1e-12);
    }

    #[test]
    fn variance_scales_with_dt() {
        let p = process();
        assert_abs_diff_eq!(p.x0(), 100.0, epsilon = 1e-15);
        assert_abs_diff_eq!(p.variance_1d(0.0, 100.0, 0.25), 0.01, epsilon = 1e-15);
    }
}
