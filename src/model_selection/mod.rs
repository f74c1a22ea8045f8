//! Model selection utilities: train/test splitting, cross-validation,
//! hyperparameter search, and model comparison.

use crate::error::{EnergiaError, Result};
use crate::linear_model::{Lasso, LinearRegression, Ridge};
use crate::metrics::{evaluate, RegressionReport};
use crate::primitives::{Matrix, Vector};
use crate::traits::Estimator;
use serde::Serialize;

/// Deterministically partitions row indices into train and test subsets.
///
/// Indices `0..n_samples` are shuffled with a seeded generator and cut at
/// `round(n_samples * (1 - test_size))`; the first part is training, the
/// remainder test. The same (n, fraction, seed) triple always produces the
/// identical partition, and the two subsets are disjoint and cover every
/// index.
///
/// # Examples
///
/// ```
/// use energia::model_selection::split_indices;
///
/// let (train, test) = split_indices(100, 0.2, 42).unwrap();
/// assert_eq!(train.len(), 80);
/// assert_eq!(test.len(), 20);
/// ```
///
/// # Errors
///
/// Returns `InvalidFraction` if `test_size` lies outside (0, 1) or either
/// subset would be empty.
pub fn split_indices(
    n_samples: usize,
    test_size: f32,
    seed: u64,
) -> Result<(Vec<usize>, Vec<usize>)> {
    let n_train = validate_fraction(n_samples, test_size)?;
    let indices = shuffle_indices(n_samples, Some(seed));
    Ok((indices[..n_train].to_vec(), indices[n_train..].to_vec()))
}

/// Validates a split request, returning the training-set size.
fn validate_fraction(n_samples: usize, test_size: f32) -> Result<usize> {
    if !(test_size > 0.0 && test_size < 1.0) {
        return Err(EnergiaError::InvalidFraction {
            test_size,
            n_samples,
        });
    }

    let n_train = (n_samples as f32 * (1.0 - test_size)).round() as usize;
    let n_test = n_samples - n_train;

    if n_train == 0 || n_test == 0 {
        return Err(EnergiaError::InvalidFraction {
            test_size,
            n_samples,
        });
    }

    Ok(n_train)
}

/// Shuffles indices with an optional random seed.
fn shuffle_indices(n_samples: usize, random_state: Option<u64>) -> Vec<usize> {
    use rand::seq::SliceRandom;
    use rand::SeedableRng;

    let mut indices: Vec<usize> = (0..n_samples).collect();

    if let Some(seed) = random_state {
        let mut rng = rand::rngs::StdRng::seed_from_u64(seed);
        indices.shuffle(&mut rng);
    } else {
        let mut rng = rand::thread_rng();
        indices.shuffle(&mut rng);
    }

    indices
}

/// Gathers the rows at `indices` into a new (matrix, vector) pair.
pub(crate) fn extract_samples(
    x: &Matrix<f32>,
    y: &Vector<f32>,
    indices: &[usize],
) -> (Matrix<f32>, Vector<f32>) {
    let n_features = x.shape().1;
    let mut x_data = Vec::with_capacity(indices.len() * n_features);
    let mut y_data = Vec::with_capacity(indices.len());

    for &idx in indices {
        for j in 0..n_features {
            x_data.push(x.get(idx, j));
        }
        y_data.push(y[idx]);
    }

    let x_subset = Matrix::from_vec(indices.len(), n_features, x_data)
        .expect("Internal error: gathered data size mismatch");
    let y_subset = Vector::from_vec(y_data);

    (x_subset, y_subset)
}

/// Splits arrays into random train and test subsets.
///
/// # Arguments
///
/// * `x` - Feature matrix
/// * `y` - Target vector
/// * `test_size` - Proportion of the dataset for the test split, in (0, 1)
/// * `random_state` - Optional seed for a reproducible split
///
/// # Returns
///
/// Tuple of (`x_train`, `x_test`, `y_train`, `y_test`).
///
/// # Examples
///
/// ```
/// use energia::model_selection::train_test_split;
/// use energia::primitives::{Matrix, Vector};
///
/// let x = Matrix::from_vec(10, 2, (0..20).map(|i| i as f32).collect()).unwrap();
/// let y = Vector::from_slice(&[0.0, 1.0, 0.0, 1.0, 0.0, 1.0, 0.0, 1.0, 0.0, 1.0]);
///
/// let (x_train, x_test, y_train, y_test) =
///     train_test_split(&x, &y, 0.2, Some(42)).unwrap();
/// assert_eq!(x_train.shape().0, 8);
/// assert_eq!(x_test.shape().0, 2);
/// ```
///
/// # Errors
///
/// Returns `ShapeMismatch` if `x` and `y` disagree on the sample count, or
/// `InvalidFraction` for a degenerate split request.
#[allow(clippy::type_complexity)]
pub fn train_test_split(
    x: &Matrix<f32>,
    y: &Vector<f32>,
    test_size: f32,
    random_state: Option<u64>,
) -> Result<(Matrix<f32>, Matrix<f32>, Vector<f32>, Vector<f32>)> {
    let n_samples = x.shape().0;
    if n_samples != y.len() {
        return Err(EnergiaError::length_mismatch(
            "target vector",
            n_samples,
            y.len(),
        ));
    }

    let n_train = validate_fraction(n_samples, test_size)?;
    let indices = shuffle_indices(n_samples, random_state);
    let (x_train, y_train) = extract_samples(x, y, &indices[..n_train]);
    let (x_test, y_test) = extract_samples(x, y, &indices[n_train..]);

    Ok((x_train, x_test, y_train, y_test))
}

/// K-Fold cross-validator.
///
/// Splits data into K consecutive folds. Each fold is used once as test set
/// while the remaining K-1 folds form the training set. `n_splits` must be
/// at least 2.
///
/// # Examples
///
/// ```
/// use energia::model_selection::KFold;
///
/// let kfold = KFold::new(5);
/// let splits = kfold.split(10);
/// assert_eq!(splits.len(), 5);
/// ```
#[derive(Debug, Clone)]
pub struct KFold {
    n_splits: usize,
    shuffle: bool,
    random_state: Option<u64>,
}

impl KFold {
    /// Creates a new K-Fold cross-validator with `n_splits` folds.
    #[must_use]
    pub fn new(n_splits: usize) -> Self {
        Self {
            n_splits,
            shuffle: false,
            random_state: None,
        }
    }

    /// Enables shuffling before splitting into folds.
    #[must_use]
    pub fn with_shuffle(mut self, shuffle: bool) -> Self {
        self.shuffle = shuffle;
        self
    }

    /// Sets the random state for reproducible shuffling (implies shuffle).
    #[must_use]
    pub fn with_random_state(mut self, random_state: u64) -> Self {
        self.random_state = Some(random_state);
        self.shuffle = true;
        self
    }

    /// Generates train/test indices for each fold.
    ///
    /// Returns a vector of (`train_indices`, `test_indices`) tuples.
    #[must_use]
    pub fn split(&self, n_samples: usize) -> Vec<(Vec<usize>, Vec<usize>)> {
        let indices = if self.shuffle {
            shuffle_indices(n_samples, self.random_state)
        } else {
            (0..n_samples).collect()
        };

        let fold_size = n_samples / self.n_splits;
        let remainder = n_samples % self.n_splits;

        let mut result = Vec::with_capacity(self.n_splits);
        let mut start = 0;

        for i in 0..self.n_splits {
            // Distribute the remainder across the first folds.
            let current_fold_size = if i < remainder {
                fold_size + 1
            } else {
                fold_size
            };

            let end = start + current_fold_size;

            let test_indices: Vec<usize> = indices[start..end].to_vec();

            let mut train_indices = Vec::with_capacity(n_samples - current_fold_size);
            train_indices.extend_from_slice(&indices[..start]);
            train_indices.extend_from_slice(&indices[end..]);

            result.push((train_indices, test_indices));

            start = end;
        }

        result
    }
}

/// Results from cross-validation.
#[derive(Debug, Clone, Serialize)]
pub struct CrossValidationResult {
    /// Score for each fold.
    pub scores: Vec<f32>,
}

impl CrossValidationResult {
    /// Mean score across folds.
    #[must_use]
    pub fn mean(&self) -> f32 {
        if self.scores.is_empty() {
            return 0.0;
        }
        self.scores.iter().sum::<f32>() / self.scores.len() as f32
    }

    /// Standard deviation of scores.
    #[must_use]
    pub fn std(&self) -> f32 {
        if self.scores.is_empty() {
            return 0.0;
        }
        let mean = self.mean();
        let variance = self
            .scores
            .iter()
            .map(|&score| (score - mean).powi(2))
            .sum::<f32>()
            / self.scores.len() as f32;
        variance.sqrt()
    }

    /// Minimum fold score.
    #[must_use]
    pub fn min(&self) -> f32 {
        self.scores.iter().copied().fold(f32::INFINITY, f32::min)
    }

    /// Maximum fold score.
    #[must_use]
    pub fn max(&self) -> f32 {
        self.scores
            .iter()
            .copied()
            .fold(f32::NEG_INFINITY, f32::max)
    }
}

/// Runs cross-validation on an estimator.
///
/// A fresh clone of the (unfitted) estimator is trained per fold, so no
/// state leaks between folds, and the R² score on each held-out fold is
/// collected.
///
/// # Examples
///
/// ```
/// use energia::prelude::*;
/// use energia::model_selection::{cross_validate, KFold};
///
/// let x = Matrix::from_vec(50, 1, (0..50).map(|i| i as f32).collect()).unwrap();
/// let y = Vector::from_vec((0..50).map(|i| 2.0 * i as f32).collect());
///
/// let model = LinearRegression::new();
/// let kfold = KFold::new(5).with_random_state(42);
///
/// let results = cross_validate(&model, &x, &y, &kfold).unwrap();
/// assert!(results.mean() > 0.99);
/// ```
///
/// # Errors
///
/// Propagates any fitting or scoring error from a fold (including
/// `DegenerateTarget` when a fold's target is constant).
pub fn cross_validate<E>(
    estimator: &E,
    x: &Matrix<f32>,
    y: &Vector<f32>,
    cv: &KFold,
) -> Result<CrossValidationResult>
where
    E: Estimator + Clone,
{
    let n_samples = x.shape().0;
    let splits = cv.split(n_samples);

    let mut scores = Vec::with_capacity(splits.len());

    for (train_idx, test_idx) in splits {
        let (x_train, y_train) = extract_samples(x, y, &train_idx);
        let (x_test, y_test) = extract_samples(x, y, &test_idx);

        let mut fold_model = estimator.clone();
        fold_model.fit(&x_train, &y_train)?;

        scores.push(fold_model.score(&x_test, &y_test)?);
    }

    Ok(CrossValidationResult { scores })
}

/// Regularization family searched by [`grid_search_alpha`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum Penalty {
    /// L2 regularization ([`Ridge`]).
    Ridge,
    /// L1 regularization ([`Lasso`]).
    Lasso,
}

/// Grid search result containing the best parameters and the score table.
#[derive(Debug, Clone, Serialize)]
pub struct GridSearchResult {
    /// Best alpha value found.
    pub best_alpha: f32,
    /// Best cross-validation score.
    pub best_score: f32,
    /// All alpha values tried.
    pub alphas: Vec<f32>,
    /// Corresponding mean CV scores for each alpha.
    pub scores: Vec<f32>,
}

impl GridSearchResult {
    /// Returns the index of the best alpha value.
    #[must_use]
    pub fn best_index(&self) -> usize {
        self.scores
            .iter()
            .enumerate()
            .max_by(|(_, a), (_, b)| a.total_cmp(b))
            .map_or(0, |(idx, _)| idx)
    }
}

/// Evaluates a single alpha with cross-validation for the given penalty.
///
/// A fresh model instance is constructed per call; configurations never
/// share state.
fn evaluate_alpha(
    penalty: Penalty,
    alpha: f32,
    x: &Matrix<f32>,
    y: &Vector<f32>,
    cv: &KFold,
) -> Result<f32> {
    let result = match penalty {
        Penalty::Ridge => cross_validate(&Ridge::new(alpha), x, y, cv)?,
        Penalty::Lasso => cross_validate(&Lasso::new(alpha), x, y, cv)?,
    };
    Ok(result.mean())
}

/// Performs grid search over the alpha parameter of a regularized model.
///
/// Exhaustively evaluates all provided alpha values using K-fold
/// cross-validation and returns the alpha achieving the highest mean score.
///
/// # Examples
///
/// ```
/// use energia::model_selection::{grid_search_alpha, KFold, Penalty};
/// use energia::primitives::{Matrix, Vector};
///
/// let x_data: Vec<f32> = (0..50).map(|i| i as f32).collect();
/// let y_data: Vec<f32> = x_data.iter().map(|&x| 2.0 * x + 1.0).collect();
///
/// let x = Matrix::from_vec(50, 1, x_data).unwrap();
/// let y = Vector::from_vec(y_data);
///
/// let alphas = [0.001, 0.01, 0.1, 1.0, 10.0];
/// let kfold = KFold::new(5).with_random_state(42);
///
/// let result = grid_search_alpha(Penalty::Ridge, &alphas, &x, &y, &kfold).unwrap();
/// assert!(result.best_score > 0.9);
/// ```
///
/// # Errors
///
/// Returns `InvalidHyperparameter` for an empty alpha grid, and propagates
/// any cross-validation error.
pub fn grid_search_alpha(
    penalty: Penalty,
    alphas: &[f32],
    x: &Matrix<f32>,
    y: &Vector<f32>,
    cv: &KFold,
) -> Result<GridSearchResult> {
    if alphas.is_empty() {
        return Err(EnergiaError::InvalidHyperparameter {
            param: "alphas".to_string(),
            value: "[]".to_string(),
            constraint: "at least one value".to_string(),
        });
    }

    let mut best_alpha = alphas[0];
    let mut best_score = f32::NEG_INFINITY;
    let mut all_scores = Vec::with_capacity(alphas.len());

    for &alpha in alphas {
        let score = evaluate_alpha(penalty, alpha, x, y, cv)?;
        all_scores.push(score);
        if score > best_score {
            best_score = score;
            best_alpha = alpha;
        }
    }

    Ok(GridSearchResult {
        best_alpha,
        best_score,
        alphas: alphas.to_vec(),
        scores: all_scores,
    })
}

/// Held-out evaluation of one named candidate model.
#[derive(Debug, Clone, Serialize)]
pub struct ModelReport {
    /// Candidate name.
    pub name: &'static str,
    /// Held-out MAE/RMSE/R².
    pub report: RegressionReport,
}

/// Fits and evaluates the linear-model family on a fixed split.
///
/// Each candidate (OLS, Ridge with α = 1, Lasso with α = 0.1) is a fresh
/// instance fitted on the training split and evaluated on the test split.
///
/// # Errors
///
/// Propagates any fitting or evaluation error.
pub fn compare_models(
    x_train: &Matrix<f32>,
    y_train: &Vector<f32>,
    x_test: &Matrix<f32>,
    y_test: &Vector<f32>,
) -> Result<Vec<ModelReport>> {
    let candidates: Vec<(&'static str, Box<dyn Estimator>)> = vec![
        ("linear_regression", Box::new(LinearRegression::new())),
        ("ridge", Box::new(Ridge::new(1.0))),
        ("lasso", Box::new(Lasso::new(0.1))),
    ];

    let mut results = Vec::with_capacity(candidates.len());
    for (name, mut model) in candidates {
        model.fit(x_train, y_train)?;
        let y_pred = model.predict(x_test)?;
        results.push(ModelReport {
            name,
            report: evaluate(&y_pred, y_test)?,
        });
    }

    Ok(results)
}
