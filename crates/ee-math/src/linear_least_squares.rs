//! Polynomial least-squares regression.
//!
//! Solves $\mathbf{y} = \mathbf{A}\,\boldsymbol{\beta} + \boldsymbol{\varepsilon}$
//! by SVD, where $\mathbf{A}$ is the Vandermonde design matrix
//! $A_{ij} = z_i^{\,j}$ of the standardised regressor
//! $z = (x - \bar{x}) / s$. Standardising leaves the fitted values unchanged
//! and keeps the design matrix well conditioned for higher degrees.
//!
//! This is the continuation-value estimator of the Longstaff-Schwartz
//! algorithm: one cross-sectional fit per exercise date, discarded after its
//! predictions have been used.

use ee_core::{
    errors::{Error, Result},
    Real,
};
use nalgebra::{DMatrix, DVector};

/// A fitted polynomial `ŷ(x) = Σⱼ βⱼ·((x − x̄)/s)ʲ`.
#[derive(Debug, Clone)]
pub struct PolynomialRegression {
    /// Coefficients β in powers of the standardised regressor.
    coefficients: Vec<Real>,
    center: Real,
    scale: Real,
    /// Residuals (y − ŷ) at the fitted observations.
    residuals: Vec<Real>,
}

impl PolynomialRegression {
    /// Fit a polynomial of `degree` to the observations `(x, y)`.
    ///
    /// Fails with [`Error::ShapeMismatch`] if `x` and `y` differ in length,
    /// [`Error::InvalidParameter`] if `degree` is zero, and
    /// [`Error::DegenerateRegression`] when there are fewer observations than
    /// coefficients or the design matrix is rank deficient (e.g. too few
    /// distinct `x` values).
    pub fn fit(x: &[Real], y: &[Real], degree: usize) -> Result<Self> {
        let n = x.len();
        let m = degree + 1;
        if n != y.len() {
            return Err(Error::ShapeMismatch {
                what: "regression observations",
                expected: n,
                actual: y.len(),
            });
        }
        ee_core::ensure!(degree >= 1, "regression degree must be at least 1");
        let degenerate = Error::DegenerateRegression {
            observations: n,
            coefficients: m,
        };
        if n < m {
            return Err(degenerate);
        }

        let center = x.iter().sum::<Real>() / n as Real;
        let scale = x.iter().map(|xi| (xi - center).abs()).fold(0.0, Real::max);
        if scale == 0.0 || !scale.is_finite() {
            return Err(degenerate);
        }

        let a = DMatrix::from_fn(n, m, |i, j| ((x[i] - center) / scale).powi(j as i32));
        let y_vec = DVector::from_column_slice(y);

        let svd = a.clone().svd(true, true);
        let sv_max = svd.singular_values.max();
        // Threshold: max(n,m) * eps * max(singular_values)
        let threshold = n.max(m) as Real * f64::EPSILON * sv_max;
        let rank = svd.rank(threshold);
        if rank < m {
            return Err(degenerate);
        }
        let beta = svd.solve(&y_vec, threshold).map_err(|_| degenerate)?;

        let residuals = (&y_vec - &a * &beta).iter().copied().collect();

        Ok(Self {
            coefficients: beta.iter().copied().collect(),
            center,
            scale,
            residuals,
        })
    }

    /// Polynomial degree.
    pub fn degree(&self) -> usize {
        self.coefficients.len() - 1
    }

    /// Fitted coefficients, in powers of `(x − center) / scale`.
    pub fn coefficients(&self) -> &[Real] {
        &self.coefficients
    }

    /// The regressor's sample mean used for standardisation.
    pub fn center(&self) -> Real {
        self.center
    }

    /// The regressor's half-range used for standardisation.
    pub fn scale(&self) -> Real {
        self.scale
    }

    /// Residuals (y − ŷ) at the observations used for the fit.
    pub fn residuals(&self) -> &[Real] {
        &self.residuals
    }

    /// Evaluate the fitted polynomial at `x` (Horner's scheme).
    #[inline]
    pub fn predict(&self, x: Real) -> Real {
        let z = (x - self.center) / self.scale;
        self.coefficients
            .iter()
            .rev()
            .fold(0.0, |acc, &c| acc * z + c)
    }

    /// R² statistic (coefficient of determination).
    pub fn r_squared(&self, y: &[Real]) -> Real {
        let n = y.len();
        if n == 0 {
            return 0.0;
        }
        let y_mean: Real = y.iter().sum::<Real>() / n as Real;
        let ss_tot: Real = y.iter().map(|&yi| (yi - y_mean).powi(2)).sum();
        let ss_res: Real = self.residuals.iter().map(|r| r * r).sum();
        if ss_tot == 0.0 {
            1.0
        } else {
            1.0 - ss_res / ss_tot
        }
    }
}

/// Fit a polynomial of `degree` to `(xs, ys)` and evaluate it at `query_xs`.
///
/// The fitted model is dropped on return; nothing is retained between calls.
pub fn fit_and_predict(
    xs: &[Real],
    ys: &[Real],
    degree: usize,
    query_xs: &[Real],
) -> Result<Vec<Real>> {
    let model = PolynomialRegression::fit(xs, ys, degree)?;
    Ok(query_xs.iter().map(|&x| model.predict(x)).collect())
}
