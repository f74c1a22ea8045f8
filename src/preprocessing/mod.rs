//! Preprocessing transformers for data standardization.
//!
//! # Example
//!
//! ```
//! use energia::prelude::*;
//! use energia::preprocessing::StandardScaler;
//!
//! let data = Matrix::from_vec(4, 2, vec![
//!     1.0, 100.0,
//!     2.0, 200.0,
//!     3.0, 300.0,
//!     4.0, 400.0,
//! ]).unwrap();
//!
//! let mut scaler = StandardScaler::new();
//! let scaled = scaler.fit_transform(&data).unwrap();
//!
//! // Each column now has mean ≈ 0 and std ≈ 1
//! assert!(scaled.get(0, 0).abs() < 2.0);
//! ```

use crate::error::{EnergiaError, Result};
use crate::primitives::Matrix;
use crate::traits::Transformer;
use serde::{Deserialize, Serialize};

/// Standardizes features by removing the mean and scaling to unit variance.
///
/// The standard score of a sample x is: z = (x - mean) / std
///
/// Useful ahead of regularized regression, where the penalty treats all
/// coefficients on a common scale.
///
/// # Example
///
/// ```
/// use energia::prelude::*;
/// use energia::preprocessing::StandardScaler;
///
/// let data = Matrix::from_vec(3, 1, vec![0.0, 1.0, 2.0]).unwrap();
///
/// let mut scaler = StandardScaler::new();
/// let scaled = scaler.fit_transform(&data).unwrap();
///
/// let mean: f32 = (0..3).map(|i| scaled.get(i, 0)).sum::<f32>() / 3.0;
/// assert!(mean.abs() < 1e-5);
/// ```
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StandardScaler {
    /// Mean of each feature (computed during fit).
    mean: Option<Vec<f32>>,
    /// Standard deviation of each feature (computed during fit).
    std: Option<Vec<f32>>,
}

impl Default for StandardScaler {
    fn default() -> Self {
        Self::new()
    }
}

impl StandardScaler {
    /// Creates a new `StandardScaler`.
    #[must_use]
    pub fn new() -> Self {
        Self {
            mean: None,
            std: None,
        }
    }

    /// Returns the mean of each feature.
    ///
    /// # Panics
    ///
    /// Panics if the scaler is not fitted.
    #[must_use]
    pub fn mean(&self) -> &[f32] {
        self.mean
            .as_ref()
            .expect("Scaler not fitted. Call fit() first.")
    }

    /// Returns the standard deviation of each feature.
    ///
    /// # Panics
    ///
    /// Panics if the scaler is not fitted.
    #[must_use]
    pub fn std(&self) -> &[f32] {
        self.std
            .as_ref()
            .expect("Scaler not fitted. Call fit() first.")
    }

    /// Returns true if the scaler has been fitted.
    #[must_use]
    pub fn is_fitted(&self) -> bool {
        self.mean.is_some()
    }

    fn fitted_params(&self) -> Result<(&[f32], &[f32])> {
        match (&self.mean, &self.std) {
            (Some(mean), Some(std)) => Ok((mean, std)),
            _ => Err(EnergiaError::NotFitted {
                what: "StandardScaler",
            }),
        }
    }

    /// Transforms standardized data back to the original scale.
    ///
    /// # Errors
    ///
    /// Returns an error if the scaler is not fitted or the width differs.
    pub fn inverse_transform(&self, x: &Matrix<f32>) -> Result<Matrix<f32>> {
        let (mean, std) = self.fitted_params()?;

        if x.n_cols() != mean.len() {
            return Err(EnergiaError::column_mismatch(mean.len(), x.n_cols()));
        }

        let mut data = Vec::with_capacity(x.n_rows() * x.n_cols());
        for i in 0..x.n_rows() {
            for j in 0..x.n_cols() {
                data.push(x.get(i, j) * std[j] + mean[j]);
            }
        }

        Matrix::from_vec(x.n_rows(), x.n_cols(), data)
    }
}

impl Transformer for StandardScaler {
    /// Computes per-feature mean and standard deviation.
    ///
    /// # Errors
    ///
    /// Returns an error for an empty matrix.
    fn fit(&mut self, x: &Matrix<f32>) -> Result<()> {
        let (n_rows, n_cols) = x.shape();

        if n_rows == 0 {
            return Err(EnergiaError::InsufficientData {
                n_samples: 0,
                required: 1,
            });
        }

        let mut mean = vec![0.0f32; n_cols];
        for i in 0..n_rows {
            for (j, m) in mean.iter_mut().enumerate() {
                *m += x.get(i, j);
            }
        }
        for m in &mut mean {
            *m /= n_rows as f32;
        }

        let mut std = vec![0.0f32; n_cols];
        for i in 0..n_rows {
            for (j, s) in std.iter_mut().enumerate() {
                let diff = x.get(i, j) - mean[j];
                *s += diff * diff;
            }
        }
        for s in &mut std {
            *s = (*s / n_rows as f32).sqrt();
            // Constant columns pass through unscaled.
            if *s == 0.0 {
                *s = 1.0;
            }
        }

        self.mean = Some(mean);
        self.std = Some(std);
        Ok(())
    }

    /// Standardizes data using the fitted parameters.
    ///
    /// # Errors
    ///
    /// Returns an error if the scaler is not fitted or the width differs.
    fn transform(&self, x: &Matrix<f32>) -> Result<Matrix<f32>> {
        let (mean, std) = self.fitted_params()?;

        if x.n_cols() != mean.len() {
            return Err(EnergiaError::column_mismatch(mean.len(), x.n_cols()));
        }

        let mut data = Vec::with_capacity(x.n_rows() * x.n_cols());
        for i in 0..x.n_rows() {
            for j in 0..x.n_cols() {
                data.push((x.get(i, j) - mean[j]) / std[j]);
            }
        }

        Matrix::from_vec(x.n_rows(), x.n_cols(), data)
    }
}
