//! Evaluation metrics for regression models.
//!
//! Includes MAE, MSE, RMSE, R², and a combined held-out evaluation report.

use crate::error::{EnergiaError, Result};
use crate::primitives::Vector;
use serde::{Deserialize, Serialize};

fn check_pair(y_pred: &Vector<f32>, y_true: &Vector<f32>) -> Result<usize> {
    if y_pred.len() != y_true.len() {
        return Err(EnergiaError::length_mismatch(
            "prediction vector",
            y_true.len(),
            y_pred.len(),
        ));
    }
    if y_true.is_empty() {
        return Err(EnergiaError::InsufficientData {
            n_samples: 0,
            required: 1,
        });
    }
    Ok(y_true.len())
}

/// Computes the Mean Absolute Error (MAE).
///
/// MAE = (1/n) * Σ|y_true - y_pred|
///
/// # Examples
///
/// ```
/// use energia::metrics::mae;
/// use energia::primitives::Vector;
///
/// let y_true = Vector::from_slice(&[3.0, -0.5, 2.0, 7.0]);
/// let y_pred = Vector::from_slice(&[2.5, 0.0, 2.0, 8.0]);
/// let error = mae(&y_pred, &y_true).unwrap();
/// assert!(error < 1.0);
/// ```
///
/// # Errors
///
/// Returns an error if the vectors have different lengths or are empty.
pub fn mae(y_pred: &Vector<f32>, y_true: &Vector<f32>) -> Result<f32> {
    let n = check_pair(y_pred, y_true)? as f32;

    let sum_abs_error: f32 = y_true
        .as_slice()
        .iter()
        .zip(y_pred.as_slice().iter())
        .map(|(t, p)| (t - p).abs())
        .sum();

    Ok(sum_abs_error / n)
}

/// Computes the Mean Squared Error (MSE).
///
/// MSE = (1/n) * Σ(y_true - y_pred)²
///
/// # Errors
///
/// Returns an error if the vectors have different lengths or are empty.
pub fn mse(y_pred: &Vector<f32>, y_true: &Vector<f32>) -> Result<f32> {
    let n = check_pair(y_pred, y_true)? as f32;

    let sum_sq_error: f32 = y_true
        .as_slice()
        .iter()
        .zip(y_pred.as_slice().iter())
        .map(|(t, p)| (t - p).powi(2))
        .sum();

    Ok(sum_sq_error / n)
}

/// Computes the Root Mean Squared Error (RMSE).
///
/// RMSE = sqrt(MSE)
///
/// # Errors
///
/// Returns an error if the vectors have different lengths or are empty.
pub fn rmse(y_pred: &Vector<f32>, y_true: &Vector<f32>) -> Result<f32> {
    Ok(mse(y_pred, y_true)?.sqrt())
}

/// Computes the coefficient of determination (R²).
///
/// R² = 1 - (SS_res / SS_tot)
///
/// where SS_res is the residual sum of squares and SS_tot is the total
/// sum of squares around the mean of `y_true`.
///
/// # Examples
///
/// ```
/// use energia::metrics::r_squared;
/// use energia::primitives::Vector;
///
/// let y_true = Vector::from_slice(&[3.0, -0.5, 2.0, 7.0]);
/// let y_pred = Vector::from_slice(&[2.5, 0.0, 2.0, 8.0]);
/// let r2 = r_squared(&y_pred, &y_true).unwrap();
/// assert!(r2 > 0.9);
/// ```
///
/// # Errors
///
/// Returns an error if the vectors have different lengths or are empty, or
/// `DegenerateTarget` if `y_true` has zero variance (R² is undefined; a NaN
/// is never returned silently).
pub fn r_squared(y_pred: &Vector<f32>, y_true: &Vector<f32>) -> Result<f32> {
    let n = check_pair(y_pred, y_true)?;

    let y_mean = y_true.mean();

    let ss_res: f32 = y_true
        .as_slice()
        .iter()
        .zip(y_pred.as_slice().iter())
        .map(|(t, p)| (t - p).powi(2))
        .sum();

    let ss_tot: f32 = y_true.as_slice().iter().map(|t| (t - y_mean).powi(2)).sum();

    if ss_tot == 0.0 {
        return Err(EnergiaError::DegenerateTarget { n_samples: n });
    }

    Ok(1.0 - (ss_res / ss_tot))
}

/// Held-out evaluation of a prediction vector against true targets.
///
/// The triple displayed to the user after every fit: MAE, RMSE, R².
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct RegressionReport {
    /// Mean absolute error.
    pub mae: f32,
    /// Root mean squared error.
    pub rmse: f32,
    /// Coefficient of determination.
    pub r2: f32,
}

/// Computes MAE, RMSE, and R² in one pass.
///
/// # Examples
///
/// ```
/// use energia::metrics::evaluate;
/// use energia::primitives::Vector;
///
/// let y_true = Vector::from_slice(&[1.0, 2.0, 3.0]);
/// let y_pred = Vector::from_slice(&[1.1, 1.9, 3.2]);
/// let report = evaluate(&y_pred, &y_true).unwrap();
/// assert!(report.mae < 0.2);
/// assert!(report.r2 > 0.9);
/// ```
///
/// # Errors
///
/// Returns an error under the same conditions as [`mae`], [`rmse`], and
/// [`r_squared`].
pub fn evaluate(y_pred: &Vector<f32>, y_true: &Vector<f32>) -> Result<RegressionReport> {
    Ok(RegressionReport {
        mae: mae(y_pred, y_true)?,
        rmse: rmse(y_pred, y_true)?,
        r2: r_squared(y_pred, y_true)?,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_mae_basic() {
        let y_true = Vector::from_slice(&[1.0, 2.0, 3.0]);
        let y_pred = Vector::from_slice(&[2.0, 2.0, 2.0]);
        let result = mae(&y_pred, &y_true).unwrap();
        assert!((result - 2.0 / 3.0).abs() < 1e-6);
    }

    #[test]
    fn test_mae_perfect_predictions() {
        let y = Vector::from_slice(&[1.0, 2.0, 3.0]);
        assert!(mae(&y, &y).unwrap().abs() < 1e-12);
    }

    #[test]
    fn test_mse_basic() {
        let y_true = Vector::from_slice(&[1.0, 2.0, 3.0]);
        let y_pred = Vector::from_slice(&[2.0, 2.0, 2.0]);
        // Squared errors: 1, 0, 1 => MSE = 2/3
        let result = mse(&y_pred, &y_true).unwrap();
        assert!((result - 2.0 / 3.0).abs() < 1e-6);
    }

    #[test]
    fn test_rmse_is_sqrt_of_mse() {
        let y_true = Vector::from_slice(&[1.0, 2.0, 3.0, 4.0]);
        let y_pred = Vector::from_slice(&[1.5, 2.5, 2.5, 4.5]);
        let m = mse(&y_pred, &y_true).unwrap();
        let r = rmse(&y_pred, &y_true).unwrap();
        assert!((r - m.sqrt()).abs() < 1e-6);
    }

    #[test]
    fn test_r_squared_perfect_fit() {
        let y = Vector::from_slice(&[1.0, 2.0, 3.0]);
        let r2 = r_squared(&y, &y).unwrap();
        assert!((r2 - 1.0).abs() < 1e-6);
    }

    #[test]
    fn test_r_squared_mean_predictor_is_zero() {
        // Predicting the mean for every row gives exactly R² = 0.
        let y_true = Vector::from_slice(&[2.0, 4.0, 6.0, 8.0]);
        let mean = y_true.mean();
        let y_pred = Vector::from_slice(&[mean, mean, mean, mean]);
        let r2 = r_squared(&y_pred, &y_true).unwrap();
        assert!(r2.abs() < 1e-6, "expected 0, got {r2}");
    }

    #[test]
    fn test_r_squared_worse_than_mean_is_negative() {
        let y_true = Vector::from_slice(&[1.0, 2.0, 3.0]);
        let y_pred = Vector::from_slice(&[10.0, 10.0, 10.0]);
        assert!(r_squared(&y_pred, &y_true).unwrap() < 0.0);
    }

    #[test]
    fn test_r_squared_degenerate_target() {
        let y_true = Vector::from_slice(&[5.0, 5.0, 5.0]);
        let y_pred = Vector::from_slice(&[5.0, 5.0, 5.0]);
        assert!(matches!(
            r_squared(&y_pred, &y_true),
            Err(EnergiaError::DegenerateTarget { n_samples: 3 })
        ));
    }

    #[test]
    fn test_length_mismatch() {
        let y_true = Vector::from_slice(&[1.0, 2.0]);
        let y_pred = Vector::from_slice(&[1.0]);
        assert!(matches!(
            mae(&y_pred, &y_true),
            Err(EnergiaError::ShapeMismatch { .. })
        ));
        assert!(matches!(
            r_squared(&y_pred, &y_true),
            Err(EnergiaError::ShapeMismatch { .. })
        ));
    }

    #[test]
    fn test_empty_input() {
        let empty = Vector::from_vec(vec![]);
        assert!(matches!(
            mae(&empty, &empty),
            Err(EnergiaError::InsufficientData { .. })
        ));
    }

    #[test]
    fn test_evaluate_report() {
        let y_true = Vector::from_slice(&[1.0, 2.0, 3.0, 4.0]);
        let y_pred = Vector::from_slice(&[1.1, 2.1, 2.9, 3.9]);
        let report = evaluate(&y_pred, &y_true).unwrap();
        assert!((report.mae - 0.1).abs() < 1e-5);
        assert!((report.rmse - 0.1).abs() < 1e-5);
        assert!(report.r2 > 0.99);
    }

    #[test]
    fn test_report_serializes() {
        let report = RegressionReport {
            mae: 1.5,
            rmse: 2.0,
            r2: 0.9,
        };
        let json = serde_json::to_string(&report).unwrap();
        assert!(json.contains("\"mae\""));
        assert!(json.contains("\"rmse\""));
        assert!(json.contains("\"r2\""));
    }
}
