//! Energia: building energy-efficiency load prediction in pure Rust.
//!
//! Models the ENB2012 building-design table (8 numeric features, heating and
//! cooling load targets), fits linear regression models, and serves
//! predictions plus held-out evaluation metrics to a presentation layer.
//!
//! # Quick Start
//!
//! ```
//! use energia::prelude::*;
//!
//! // Create training data (y = 2*x + 1)
//! let x = Matrix::from_vec(4, 1, vec![
//!     1.0,
//!     2.0,
//!     3.0,
//!     4.0,
//! ]).unwrap();
//! let y = Vector::from_slice(&[3.0, 5.0, 7.0, 9.0]);
//!
//! // Train linear regression
//! let mut model = LinearRegression::new();
//! model.fit(&x, &y).unwrap();
//!
//! // Make predictions
//! let predictions = model.predict(&x).unwrap();
//! let r2 = model.score(&x, &y).unwrap();
//! assert!(r2 > 0.99);
//! # assert_eq!(predictions.len(), 4);
//! ```
//!
//! # Modules
//!
//! - [`primitives`]: Core Vector and Matrix types
//! - [`data`]: DataFrame for named columns and the energy dataset schema
//! - [`linear_model`]: OLS, Ridge, and Lasso regression
//! - [`metrics`]: Evaluation metrics (MAE, RMSE, R²)
//! - [`model_selection`]: Train/test splitting, cross-validation, grid search
//! - [`preprocessing`]: Data transformers (standard scaling)
//! - [`predictor`]: Per-target fitted-model cache behind the prediction form

pub mod data;
pub mod error;
pub mod linear_model;
pub mod metrics;
pub mod model_selection;
pub mod predictor;
pub mod prelude;
pub mod preprocessing;
pub mod primitives;
pub mod traits;

pub use error::{EnergiaError, Result};
pub use primitives::{Matrix, Vector};
