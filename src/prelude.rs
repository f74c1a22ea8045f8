//! Convenience re-exports for common usage.
//!
//! # Usage
//!
//! ```
//! use energia::prelude::*;
//! ```

pub use crate::data::energy::{EnergyDataset, FeatureRange, Target};
pub use crate::data::DataFrame;
pub use crate::linear_model::{Lasso, LinearRegression, Ridge};
pub use crate::metrics::{evaluate, mae, mse, r_squared, rmse, RegressionReport};
pub use crate::model_selection::{split_indices, train_test_split, KFold};
pub use crate::predictor::LoadPredictor;
pub use crate::primitives::{Matrix, Vector};
pub use crate::traits::{Estimator, Transformer};
