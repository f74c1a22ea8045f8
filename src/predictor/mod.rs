//! Request/response boundary for form-driven load prediction.
//!
//! A presentation layer drives this service: it reads the per-feature bounds
//! to build a constrained input form, sends back one value per feature, and
//! displays the returned prediction plus the held-out metrics of the model
//! that produced it.

use std::collections::BTreeMap;

use crate::data::energy::{EnergyDataset, FeatureRange, Target, N_FEATURES};
use crate::error::{EnergiaError, Result};
use crate::linear_model::LinearRegression;
use crate::metrics::{evaluate, RegressionReport};
use crate::model_selection::{extract_samples, split_indices};
use crate::primitives::Matrix;
use crate::traits::Estimator;

/// One fitted model plus its held-out evaluation.
#[derive(Debug, Clone)]
struct TargetEntry {
    model: LinearRegression,
    report: RegressionReport,
}

/// Fits one regression model per load target and serves predictions.
///
/// Construction performs a single deterministic split of the dataset, fits
/// an OLS model for each target on the training rows, and evaluates it on
/// the held-out rows. The result is keyed by target in an immutable map:
/// switching targets never triggers a refit, and a `LoadPredictor` can be
/// shared read-only across concurrent callers.
///
/// # Examples
///
/// ```
/// use energia::data::DataFrame;
/// use energia::data::energy::{EnergyDataset, Target, FEATURE_COLUMNS};
/// use energia::predictor::LoadPredictor;
/// use energia::primitives::Vector;
///
/// let n = 24;
/// let mut columns: Vec<(String, Vector<f32>)> = FEATURE_COLUMNS
///     .iter()
///     .enumerate()
///     .map(|(j, name)| {
///         let col: Vec<f32> = (0..n).map(|i| ((i * (j + 3)) % 11) as f32).collect();
///         (name.to_string(), Vector::from_vec(col))
///     })
///     .collect();
/// columns.push((
///     "heating_load".to_string(),
///     Vector::from_vec((0..n).map(|i| 12.0 + (i % 7) as f32 + 0.1 * i as f32).collect()),
/// ));
/// columns.push((
///     "cooling_load".to_string(),
///     Vector::from_vec((0..n).map(|i| 18.0 + (i % 5) as f32 + 0.05 * i as f32).collect()),
/// ));
/// let df = DataFrame::new(columns).unwrap();
/// let dataset = EnergyDataset::from_dataframe(&df).unwrap();
///
/// let predictor = LoadPredictor::fit(&dataset, 0.2, 42).unwrap();
/// let ranges = predictor.feature_ranges();
/// let defaults: Vec<f32> = ranges.iter().map(|r| r.mean).collect();
/// let prediction = predictor.predict(Target::HeatingLoad, &defaults).unwrap();
/// assert!(prediction.is_finite());
/// ```
#[derive(Debug, Clone)]
pub struct LoadPredictor {
    ranges: Vec<FeatureRange>,
    entries: BTreeMap<Target, TargetEntry>,
}

impl LoadPredictor {
    /// Splits the dataset once and fits one model per target.
    ///
    /// # Errors
    ///
    /// Returns `InvalidFraction` for a degenerate split request,
    /// `InsufficientData` if the training rows can't support a fit, and
    /// `DegenerateTarget` if a target is constant on the held-out rows.
    pub fn fit(dataset: &EnergyDataset, test_size: f32, seed: u64) -> Result<Self> {
        let (train_idx, test_idx) = split_indices(dataset.n_rows(), test_size, seed)?;

        let mut entries = BTreeMap::new();
        for target in Target::ALL {
            let y = dataset.target(target);
            let (x_train, y_train) = extract_samples(dataset.features(), y, &train_idx);
            let (x_test, y_test) = extract_samples(dataset.features(), y, &test_idx);

            let mut model = LinearRegression::new();
            model.fit(&x_train, &y_train)?;

            let y_pred = model.predict(&x_test)?;
            let report = evaluate(&y_pred, &y_test)?;

            entries.insert(target, TargetEntry { model, report });
        }

        Ok(Self {
            ranges: dataset.feature_ranges(),
            entries,
        })
    }

    fn entry(&self, target: Target) -> &TargetEntry {
        self.entries
            .get(&target)
            .expect("Internal error: every target is fitted at construction")
    }

    /// Observed min/max/mean per feature, in canonical column order.
    ///
    /// The presentation layer uses these to bound its numeric inputs and
    /// pick defaults.
    #[must_use]
    pub fn feature_ranges(&self) -> &[FeatureRange] {
        &self.ranges
    }

    /// Predicts the chosen load for one feature vector.
    ///
    /// `features` must hold exactly one value per feature column, in
    /// canonical order.
    ///
    /// # Errors
    ///
    /// Returns `ShapeMismatch` if the width differs from the fitted width.
    pub fn predict(&self, target: Target, features: &[f32]) -> Result<f32> {
        if features.len() != N_FEATURES {
            return Err(EnergiaError::column_mismatch(N_FEATURES, features.len()));
        }

        let x = Matrix::from_vec(1, N_FEATURES, features.to_vec())?;
        let predictions = self.entry(target).model.predict(&x)?;
        Ok(predictions[0])
    }

    /// Held-out MAE/RMSE/R² of the model serving the chosen target.
    #[must_use]
    pub fn report(&self, target: Target) -> RegressionReport {
        self.entry(target).report
    }

    /// The fitted model serving the chosen target.
    #[must_use]
    pub fn model(&self, target: Target) -> &LinearRegression {
        &self.entry(target).model
    }
}
