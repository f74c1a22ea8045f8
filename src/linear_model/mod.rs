//! Linear models for regression.
//!
//! Includes Ordinary Least Squares (OLS) linear regression and its
//! L2-regularized (Ridge) and L1-regularized (Lasso) variants.

mod lasso;

pub use lasso::Lasso;

use crate::error::{EnergiaError, Result};
use crate::metrics::r_squared;
use crate::primitives::{Matrix, Vector};
use crate::traits::Estimator;
use serde::{Deserialize, Serialize};

/// Ordinary Least Squares (OLS) linear regression.
///
/// Fits a linear model by minimizing the residual sum of squares between
/// observed targets and predicted targets. The model equation is:
///
/// ```text
/// y = X β + ε
/// ```
///
/// where `β` is the coefficient vector and `ε` is random error.
///
/// # Solver
///
/// Householder QR with column pivoting on the intercept-augmented design
/// matrix. Exactly collinear feature columns are dropped (coefficient zero)
/// instead of amplifying round-off through the normal equations.
///
/// # Examples
///
/// ```
/// use energia::prelude::*;
///
/// // Simple linear regression: y = 2x + 1
/// let x = Matrix::from_vec(4, 1, vec![1.0, 2.0, 3.0, 4.0]).unwrap();
/// let y = Vector::from_slice(&[3.0, 5.0, 7.0, 9.0]);
///
/// let mut model = LinearRegression::new();
/// model.fit(&x, &y).unwrap();
///
/// let r2 = model.score(&x, &y).unwrap();
/// assert!(r2 > 0.99);
/// ```
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LinearRegression {
    /// Coefficients for features (excluding intercept).
    coefficients: Option<Vector<f32>>,
    /// Intercept (bias) term.
    intercept: f32,
    /// Whether to fit an intercept.
    fit_intercept: bool,
}

impl Default for LinearRegression {
    fn default() -> Self {
        Self::new()
    }
}

impl LinearRegression {
    /// Creates a new `LinearRegression` with default settings.
    #[must_use]
    pub fn new() -> Self {
        Self {
            coefficients: None,
            intercept: 0.0,
            fit_intercept: true,
        }
    }

    /// Sets whether to fit an intercept term.
    #[must_use]
    pub fn with_intercept(mut self, fit_intercept: bool) -> Self {
        self.fit_intercept = fit_intercept;
        self
    }

    /// Returns the coefficients (excluding intercept).
    ///
    /// # Panics
    ///
    /// Panics if the model is not fitted.
    #[must_use]
    pub fn coefficients(&self) -> &Vector<f32> {
        self.coefficients
            .as_ref()
            .expect("Model not fitted. Call fit() first.")
    }

    /// Returns the intercept term.
    #[must_use]
    pub fn intercept(&self) -> f32 {
        self.intercept
    }

    /// Returns true if the model has been fitted.
    #[must_use]
    pub fn is_fitted(&self) -> bool {
        self.coefficients.is_some()
    }

    /// Adds an intercept column of ones to the design matrix.
    fn add_intercept_column(x: &Matrix<f32>) -> Matrix<f32> {
        let (n_rows, n_cols) = x.shape();
        let mut data = Vec::with_capacity(n_rows * (n_cols + 1));

        for i in 0..n_rows {
            data.push(1.0); // Intercept column
            for j in 0..n_cols {
                data.push(x.get(i, j));
            }
        }

        Matrix::from_vec(n_rows, n_cols + 1, data)
            .expect("Internal error: failed to create design matrix")
    }

    fn check_fit_inputs(
        x: &Matrix<f32>,
        y: &Vector<f32>,
        fit_intercept: bool,
    ) -> Result<(usize, usize)> {
        let (n_samples, n_features) = x.shape();

        if n_samples != y.len() {
            return Err(EnergiaError::length_mismatch(
                "target vector",
                n_samples,
                y.len(),
            ));
        }

        let required = if fit_intercept {
            n_features + 1
        } else {
            n_features.max(1)
        };

        if n_samples < required {
            return Err(EnergiaError::InsufficientData {
                n_samples,
                required,
            });
        }

        Ok((n_samples, n_features))
    }
}

impl Estimator for LinearRegression {
    /// Fits the model by QR least squares on the design matrix.
    ///
    /// # Errors
    ///
    /// Returns `ShapeMismatch` if `x` and `y` disagree on the sample count,
    /// `InsufficientData` unless there are more samples than parameters, and
    /// `SingularMatrix` if every column is negligible.
    fn fit(&mut self, x: &Matrix<f32>, y: &Vector<f32>) -> Result<()> {
        let (_, n_features) = Self::check_fit_inputs(x, y, self.fit_intercept)?;

        let x_design = if self.fit_intercept {
            Self::add_intercept_column(x)
        } else {
            x.clone()
        };

        let beta = x_design.qr_least_squares(y)?;

        if self.fit_intercept {
            self.intercept = beta[0];
            self.coefficients = Some(beta.slice(1, n_features + 1));
        } else {
            self.intercept = 0.0;
            self.coefficients = Some(beta);
        }

        Ok(())
    }

    /// Predicts target values for input data.
    ///
    /// # Errors
    ///
    /// Returns `NotFitted` if `fit` was never called, or `ShapeMismatch` if
    /// the feature width differs from the fitted width.
    fn predict(&self, x: &Matrix<f32>) -> Result<Vector<f32>> {
        let coefficients = self.coefficients.as_ref().ok_or(EnergiaError::NotFitted {
            what: "LinearRegression",
        })?;

        let result = x.matvec(coefficients)?;
        Ok(result.add_scalar(self.intercept))
    }

    /// Computes the R² score.
    fn score(&self, x: &Matrix<f32>, y: &Vector<f32>) -> Result<f32> {
        let y_pred = self.predict(x)?;
        r_squared(&y_pred, y)
    }
}

/// Ridge regression with L2 regularization.
///
/// Fits a linear model with an L2 penalty on coefficient magnitudes:
///
/// ```text
/// minimize ||y - Xβ||² + α||β||²
/// ```
///
/// # Solver
///
/// Regularized normal equations `(XᵀX + αI)β = Xᵀy` via Cholesky
/// decomposition; the regularized matrix is positive definite for α > 0.
/// The intercept term is not penalized.
///
/// # Examples
///
/// ```
/// use energia::prelude::*;
///
/// let x = Matrix::from_vec(4, 1, vec![1.0, 2.0, 3.0, 4.0]).unwrap();
/// let y = Vector::from_slice(&[3.0, 5.0, 7.0, 9.0]);
///
/// let mut model = Ridge::new(0.1);
/// model.fit(&x, &y).unwrap();
/// assert!(model.score(&x, &y).unwrap() > 0.99);
/// ```
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Ridge {
    /// Regularization strength.
    alpha: f32,
    /// Coefficients for features (excluding intercept).
    coefficients: Option<Vector<f32>>,
    /// Intercept (bias) term.
    intercept: f32,
    /// Whether to fit an intercept.
    fit_intercept: bool,
}

impl Ridge {
    /// Creates a new `Ridge` regression with the given regularization strength.
    ///
    /// # Arguments
    ///
    /// * `alpha` - Regularization strength. Larger values = more regularization.
    ///   Must be non-negative. Use 0.0 for no regularization (equivalent to OLS).
    #[must_use]
    pub fn new(alpha: f32) -> Self {
        Self {
            alpha,
            coefficients: None,
            intercept: 0.0,
            fit_intercept: true,
        }
    }

    /// Sets whether to fit an intercept term.
    #[must_use]
    pub fn with_intercept(mut self, fit_intercept: bool) -> Self {
        self.fit_intercept = fit_intercept;
        self
    }

    /// Returns the regularization strength (alpha).
    #[must_use]
    pub fn alpha(&self) -> f32 {
        self.alpha
    }

    /// Returns the coefficients (excluding intercept).
    ///
    /// # Panics
    ///
    /// Panics if the model is not fitted.
    #[must_use]
    pub fn coefficients(&self) -> &Vector<f32> {
        self.coefficients
            .as_ref()
            .expect("Model not fitted. Call fit() first.")
    }

    /// Returns the intercept term.
    #[must_use]
    pub fn intercept(&self) -> f32 {
        self.intercept
    }

    /// Returns true if the model has been fitted.
    #[must_use]
    pub fn is_fitted(&self) -> bool {
        self.coefficients.is_some()
    }
}

impl Estimator for Ridge {
    /// Fits the Ridge regression model using regularized normal equations.
    ///
    /// Solves: β = (XᵀX + αI)⁻¹ Xᵀy
    ///
    /// # Errors
    ///
    /// Returns `ShapeMismatch` on sample-count disagreement,
    /// `InvalidHyperparameter` for negative alpha, `InsufficientData` for an
    /// empty table, and `SingularMatrix` if the regularized system is not
    /// positive definite (possible only at alpha = 0).
    fn fit(&mut self, x: &Matrix<f32>, y: &Vector<f32>) -> Result<()> {
        let (n_samples, n_features) = x.shape();

        if self.alpha < 0.0 {
            return Err(EnergiaError::InvalidHyperparameter {
                param: "alpha".to_string(),
                value: self.alpha.to_string(),
                constraint: ">= 0".to_string(),
            });
        }

        if n_samples != y.len() {
            return Err(EnergiaError::length_mismatch(
                "target vector",
                n_samples,
                y.len(),
            ));
        }

        if n_samples == 0 {
            return Err(EnergiaError::InsufficientData {
                n_samples: 0,
                required: 1,
            });
        }

        let x_design = if self.fit_intercept {
            LinearRegression::add_intercept_column(x)
        } else {
            x.clone()
        };

        let n_params = if self.fit_intercept {
            n_features + 1
        } else {
            n_features
        };

        let xt = x_design.transpose();
        let mut xtx = xt.matmul(&x_design)?;

        // Add regularization: XᵀX + αI. The intercept term is not penalized.
        for i in 0..n_params {
            if self.fit_intercept && i == 0 {
                continue;
            }
            let current = xtx.get(i, i);
            xtx.set(i, i, current + self.alpha);
        }

        let xty = xt.matvec(y)?;
        let beta = xtx.cholesky_solve(&xty)?;

        if self.fit_intercept {
            self.intercept = beta[0];
            self.coefficients = Some(beta.slice(1, n_features + 1));
        } else {
            self.intercept = 0.0;
            self.coefficients = Some(beta);
        }

        Ok(())
    }

    /// Predicts target values for input data.
    ///
    /// # Errors
    ///
    /// Returns `NotFitted` if `fit` was never called, or `ShapeMismatch` if
    /// the feature width differs from the fitted width.
    fn predict(&self, x: &Matrix<f32>) -> Result<Vector<f32>> {
        let coefficients = self
            .coefficients
            .as_ref()
            .ok_or(EnergiaError::NotFitted { what: "Ridge" })?;

        let result = x.matvec(coefficients)?;
        Ok(result.add_scalar(self.intercept))
    }

    /// Computes the R² score.
    fn score(&self, x: &Matrix<f32>, y: &Vector<f32>) -> Result<f32> {
        let y_pred = self.predict(x)?;
        r_squared(&y_pred, y)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new() {
        let model = LinearRegression::new();
        assert!(!model.is_fitted());
    }

    #[test]
    fn test_simple_regression() {
        // y = 2x + 1
        let x = Matrix::from_vec(4, 1, vec![1.0, 2.0, 3.0, 4.0]).unwrap();
        let y = Vector::from_slice(&[3.0, 5.0, 7.0, 9.0]);

        let mut model = LinearRegression::new();
        model.fit(&x, &y).unwrap();

        assert!(model.is_fitted());

        let coef = model.coefficients();
        assert!((coef[0] - 2.0).abs() < 1e-4);
        assert!((model.intercept() - 1.0).abs() < 1e-4);

        let predictions = model.predict(&x).unwrap();
        for i in 0..4 {
            assert!((predictions[i] - y[i]).abs() < 1e-4);
        }

        let r2 = model.score(&x, &y).unwrap();
        assert!((r2 - 1.0).abs() < 1e-4);
    }

    #[test]
    fn test_exact_plane_recovery() {
        // y = 3*x1 - 2*x2 + 7, noise-free: coefficients recovered exactly.
        let x = Matrix::from_vec(
            6,
            2,
            vec![1.0, 1.0, 2.0, 1.0, 1.0, 2.0, 3.0, 2.0, 2.0, 3.0, 4.0, 1.0],
        )
        .unwrap();
        let y = Vector::from_vec(
            (0..6)
                .map(|i| 3.0 * x.get(i, 0) - 2.0 * x.get(i, 1) + 7.0)
                .collect(),
        );

        let mut model = LinearRegression::new();
        model.fit(&x, &y).unwrap();

        let coef = model.coefficients();
        assert!((coef[0] - 3.0).abs() < 1e-3, "got {}", coef[0]);
        assert!((coef[1] - (-2.0)).abs() < 1e-3, "got {}", coef[1]);
        assert!((model.intercept() - 7.0).abs() < 1e-3);
    }

    #[test]
    fn test_predict_midpoint_scenario() {
        // 10 rows, x = 1..10, y = 2x + 1: predict(5) = 11.
        let x = Matrix::from_vec(10, 1, (1..=10).map(|i| i as f32).collect()).unwrap();
        let y = Vector::from_vec((1..=10).map(|i| 2.0 * i as f32 + 1.0).collect());

        let mut model = LinearRegression::new();
        model.fit(&x, &y).unwrap();

        let x_new = Matrix::from_vec(1, 1, vec![5.0]).unwrap();
        let pred = model.predict(&x_new).unwrap();
        assert!((pred[0] - 11.0).abs() < 1e-4, "got {}", pred[0]);
    }

    #[test]
    fn test_training_residuals_sum_to_zero() {
        // With an intercept, OLS residuals sum to zero.
        let x = Matrix::from_vec(
            5,
            2,
            vec![1.0, 1.0, 2.0, 3.0, 3.0, 2.0, 4.0, 5.0, 5.0, 4.0],
        )
        .unwrap();
        let y = Vector::from_slice(&[6.2, 13.8, 13.1, 24.5, 22.4]);

        let mut model = LinearRegression::new();
        model.fit(&x, &y).unwrap();

        let predictions = model.predict(&x).unwrap();
        let residual_sum: f32 = (0..y.len()).map(|i| y[i] - predictions[i]).sum();
        assert!(residual_sum.abs() < 1e-3, "got {residual_sum}");
    }

    #[test]
    fn test_no_intercept() {
        // y = 2x (no intercept)
        let x = Matrix::from_vec(4, 1, vec![1.0, 2.0, 3.0, 4.0]).unwrap();
        let y = Vector::from_slice(&[2.0, 4.0, 6.0, 8.0]);

        let mut model = LinearRegression::new().with_intercept(false);
        model.fit(&x, &y).unwrap();

        let coef = model.coefficients();
        assert!((coef[0] - 2.0).abs() < 1e-4);
        assert!((model.intercept() - 0.0).abs() < 1e-4);
    }

    #[test]
    fn test_sample_count_mismatch() {
        let x = Matrix::from_vec(3, 2, vec![1.0; 6]).unwrap();
        let y = Vector::from_slice(&[1.0, 2.0]);

        let mut model = LinearRegression::new();
        assert!(matches!(
            model.fit(&x, &y),
            Err(EnergiaError::ShapeMismatch { .. })
        ));
    }

    #[test]
    fn test_insufficient_samples() {
        // 3 samples, 5 features: underdetermined.
        let x = Matrix::from_vec(3, 5, vec![1.0; 15]).unwrap();
        let y = Vector::from_slice(&[1.0, 2.0, 3.0]);

        let mut model = LinearRegression::new();
        let err = model.fit(&x, &y).unwrap_err();
        assert!(matches!(
            err,
            EnergiaError::InsufficientData {
                n_samples: 3,
                required: 6
            }
        ));
    }

    #[test]
    fn test_exactly_determined_system() {
        // n_samples == n_features + 1 is the minimum that fits.
        let x = Matrix::from_vec(
            4,
            3,
            vec![1.0, 0.0, 0.0, 0.0, 1.0, 0.0, 0.0, 0.0, 1.0, 1.0, 1.0, 1.0],
        )
        .unwrap();
        let y = Vector::from_vec(vec![1.0, 2.0, 3.0, 6.0]);

        let mut model = LinearRegression::new();
        assert!(model.fit(&x, &y).is_ok());
    }

    #[test]
    fn test_predict_width_mismatch() {
        let x = Matrix::from_vec(4, 1, vec![1.0, 2.0, 3.0, 4.0]).unwrap();
        let y = Vector::from_slice(&[3.0, 5.0, 7.0, 9.0]);

        let mut model = LinearRegression::new();
        model.fit(&x, &y).unwrap();

        // One extra feature column at predict time.
        let x_wide = Matrix::from_vec(2, 2, vec![1.0, 1.0, 2.0, 2.0]).unwrap();
        assert!(matches!(
            model.predict(&x_wide),
            Err(EnergiaError::ShapeMismatch { .. })
        ));
    }

    #[test]
    fn test_predict_unfitted() {
        let model = LinearRegression::new();
        let x = Matrix::from_vec(1, 1, vec![1.0]).unwrap();
        assert!(matches!(
            model.predict(&x),
            Err(EnergiaError::NotFitted { .. })
        ));
    }

    #[test]
    fn test_constant_target() {
        let x = Matrix::from_vec(3, 1, vec![1.0, 2.0, 3.0]).unwrap();
        let y = Vector::from_slice(&[5.0, 5.0, 5.0]);

        let mut model = LinearRegression::new();
        model.fit(&x, &y).unwrap();

        let coef = model.coefficients();
        assert!(coef[0].abs() < 1e-4);
        assert!((model.intercept() - 5.0).abs() < 1e-4);
    }

    #[test]
    fn test_collinear_features_still_fit() {
        // Second column duplicates the first; predictions stay finite and
        // reproduce the targets.
        let x = Matrix::from_vec(5, 2, vec![1.0, 1.0, 2.0, 2.0, 3.0, 3.0, 4.0, 4.0, 5.0, 5.0])
            .unwrap();
        let y = Vector::from_slice(&[3.0, 5.0, 7.0, 9.0, 11.0]);

        let mut model = LinearRegression::new();
        model.fit(&x, &y).unwrap();

        let predictions = model.predict(&x).unwrap();
        for i in 0..5 {
            assert!(predictions[i].is_finite());
            assert!((predictions[i] - y[i]).abs() < 1e-3);
        }
    }

    #[test]
    fn test_with_noise() {
        // y ≈ 2x + 1 with some noise
        let x = Matrix::from_vec(5, 1, vec![1.0, 2.0, 3.0, 4.0, 5.0]).unwrap();
        let y = Vector::from_slice(&[3.1, 4.9, 7.2, 8.8, 11.1]);

        let mut model = LinearRegression::new();
        model.fit(&x, &y).unwrap();

        let coef = model.coefficients();
        assert!((coef[0] - 2.0).abs() < 0.2);
        assert!((model.intercept() - 1.0).abs() < 0.5);

        let r2 = model.score(&x, &y).unwrap();
        assert!(r2 > 0.95);
        assert!(r2 < 1.0);
    }

    #[test]
    fn test_fitted_model_unchanged_by_predict() {
        let x = Matrix::from_vec(4, 1, vec![1.0, 2.0, 3.0, 4.0]).unwrap();
        let y = Vector::from_slice(&[3.0, 5.0, 7.0, 9.0]);

        let mut model = LinearRegression::new();
        model.fit(&x, &y).unwrap();
        let intercept_before = model.intercept();
        let coef_before = model.coefficients().clone();

        let _ = model.predict(&x).unwrap();
        let _ = model.predict(&x).unwrap();

        assert_eq!(model.intercept(), intercept_before);
        assert_eq!(model.coefficients(), &coef_before);
    }

    #[test]
    fn test_ridge_fits_line() {
        let x = Matrix::from_vec(4, 1, vec![1.0, 2.0, 3.0, 4.0]).unwrap();
        let y = Vector::from_slice(&[3.0, 5.0, 7.0, 9.0]);

        let mut model = Ridge::new(0.01);
        model.fit(&x, &y).unwrap();

        assert!(model.is_fitted());
        let coef = model.coefficients();
        assert!((coef[0] - 2.0).abs() < 0.05);
        assert!(model.score(&x, &y).unwrap() > 0.99);
    }

    #[test]
    fn test_ridge_shrinks_coefficients() {
        let x = Matrix::from_vec(5, 1, vec![1.0, 2.0, 3.0, 4.0, 5.0]).unwrap();
        let y = Vector::from_slice(&[3.0, 5.0, 7.0, 9.0, 11.0]);

        let mut ols = LinearRegression::new();
        ols.fit(&x, &y).unwrap();

        let mut ridge = Ridge::new(50.0);
        ridge.fit(&x, &y).unwrap();

        assert!(ridge.coefficients()[0].abs() < ols.coefficients()[0].abs());
    }

    #[test]
    fn test_ridge_negative_alpha_rejected() {
        let x = Matrix::from_vec(2, 1, vec![1.0, 2.0]).unwrap();
        let y = Vector::from_slice(&[1.0, 2.0]);

        let mut model = Ridge::new(-1.0);
        assert!(matches!(
            model.fit(&x, &y),
            Err(EnergiaError::InvalidHyperparameter { .. })
        ));
    }

    #[test]
    fn test_ridge_handles_collinear_features() {
        // Duplicated column: the regularized system stays positive definite.
        let x = Matrix::from_vec(4, 2, vec![1.0, 1.0, 2.0, 2.0, 3.0, 3.0, 4.0, 4.0]).unwrap();
        let y = Vector::from_slice(&[2.0, 4.0, 6.0, 8.0]);

        let mut model = Ridge::new(1.0);
        model.fit(&x, &y).unwrap();

        let coef = model.coefficients();
        assert!(coef[0].is_finite() && coef[1].is_finite());
        // Symmetric problem splits the weight evenly.
        assert!((coef[0] - coef[1]).abs() < 1e-3);
    }

    #[test]
    fn test_ridge_alpha_accessor() {
        let model = Ridge::new(0.5);
        assert!((model.alpha() - 0.5).abs() < 1e-6);
    }

    #[test]
    fn test_ridge_predict_unfitted() {
        let model = Ridge::new(1.0);
        let x = Matrix::from_vec(1, 1, vec![1.0]).unwrap();
        assert!(matches!(
            model.predict(&x),
            Err(EnergiaError::NotFitted { .. })
        ));
    }
}
