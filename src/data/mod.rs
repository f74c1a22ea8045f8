//! Named-column table and the building-energy dataset schema.
//!
//! Provides a minimal `DataFrame` for named numeric columns plus the typed,
//! validated [`EnergyDataset`](energy::EnergyDataset) the regression engine
//! consumes. Heavy data wrangling is out of scope here.

pub mod energy;

use crate::error::{EnergiaError, Result};
use crate::primitives::{Matrix, Vector};
use serde::{Deserialize, Serialize};

/// A minimal `DataFrame` with named columns.
///
/// A thin wrapper around `Vec<(String, Vector<f32>)>`, immutable once built.
///
/// # Examples
///
/// ```
/// use energia::data::DataFrame;
/// use energia::primitives::Vector;
///
/// let columns = vec![
///     ("x".to_string(), Vector::from_slice(&[1.0, 2.0, 3.0])),
///     ("y".to_string(), Vector::from_slice(&[4.0, 5.0, 6.0])),
/// ];
/// let df = DataFrame::new(columns).unwrap();
/// assert_eq!(df.shape(), (3, 2));
/// ```
#[derive(Debug, Clone)]
pub struct DataFrame {
    columns: Vec<(String, Vector<f32>)>,
    n_rows: usize,
}

impl DataFrame {
    /// Creates a new `DataFrame` from named columns.
    ///
    /// # Errors
    ///
    /// Returns a schema error if there are no columns, columns have different
    /// lengths, or names are empty or duplicated.
    pub fn new(columns: Vec<(String, Vector<f32>)>) -> Result<Self> {
        if columns.is_empty() {
            return Err(EnergiaError::schema("table must have at least one column"));
        }

        let n_rows = columns[0].1.len();

        for (name, col) in &columns {
            if col.len() != n_rows {
                return Err(EnergiaError::schema(format!(
                    "column '{name}' has length {}, expected {n_rows}",
                    col.len()
                )));
            }
            if name.is_empty() {
                return Err(EnergiaError::schema("column names cannot be empty"));
            }
        }

        let mut names: Vec<&str> = columns.iter().map(|(n, _)| n.as_str()).collect();
        names.sort_unstable();
        for i in 1..names.len() {
            if names[i] == names[i - 1] {
                return Err(EnergiaError::schema(format!(
                    "duplicate column name '{}'",
                    names[i]
                )));
            }
        }

        Ok(Self { columns, n_rows })
    }

    /// Returns the shape as (`n_rows`, `n_cols`).
    #[must_use]
    pub fn shape(&self) -> (usize, usize) {
        (self.n_rows, self.columns.len())
    }

    /// Returns the number of rows.
    #[must_use]
    pub fn n_rows(&self) -> usize {
        self.n_rows
    }

    /// Returns the number of columns.
    #[must_use]
    pub fn n_cols(&self) -> usize {
        self.columns.len()
    }

    /// Returns the column names.
    #[must_use]
    pub fn column_names(&self) -> Vec<&str> {
        self.columns.iter().map(|(n, _)| n.as_str()).collect()
    }

    /// Returns a reference to a column by name.
    ///
    /// # Errors
    ///
    /// Returns a schema error if the column doesn't exist.
    pub fn column(&self, name: &str) -> Result<&Vector<f32>> {
        self.columns
            .iter()
            .find(|(n, _)| n == name)
            .map(|(_, v)| v)
            .ok_or_else(|| EnergiaError::schema(format!("column '{name}' not found")))
    }

    /// Selects multiple columns by name, returning a new `DataFrame`.
    ///
    /// # Errors
    ///
    /// Returns a schema error if any column doesn't exist.
    pub fn select(&self, names: &[&str]) -> Result<Self> {
        if names.is_empty() {
            return Err(EnergiaError::schema("must select at least one column"));
        }

        let mut selected = Vec::with_capacity(names.len());
        for &name in names {
            let col = self.column(name)?;
            selected.push((name.to_string(), col.clone()));
        }

        Self::new(selected)
    }

    /// Stacks the selected columns into a Matrix, preserving column order.
    ///
    /// # Errors
    ///
    /// Returns a schema error if any column doesn't exist.
    pub fn to_matrix(&self, names: &[&str]) -> Result<Matrix<f32>> {
        let cols: Vec<&Vector<f32>> = names
            .iter()
            .map(|name| self.column(name))
            .collect::<Result<_>>()?;

        let mut data = Vec::with_capacity(self.n_rows * cols.len());
        for row_idx in 0..self.n_rows {
            for col in &cols {
                data.push(col[row_idx]);
            }
        }

        Matrix::from_vec(self.n_rows, cols.len(), data)
    }

    /// Returns an iterator over columns as (name, vector) pairs.
    pub fn iter_columns(&self) -> impl Iterator<Item = (&str, &Vector<f32>)> {
        self.columns.iter().map(|(n, v)| (n.as_str(), v))
    }

    /// Returns descriptive statistics for all columns.
    #[must_use]
    pub fn describe(&self) -> Vec<ColumnStats> {
        self.columns
            .iter()
            .map(|(name, col)| ColumnStats {
                name: name.clone(),
                count: col.len(),
                mean: col.mean(),
                std: col.variance().sqrt(),
                min: col.min(),
                max: col.max(),
            })
            .collect()
    }
}

/// Descriptive statistics for a column.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ColumnStats {
    /// Column name.
    pub name: String,
    /// Number of elements.
    pub count: usize,
    /// Mean value.
    pub mean: f32,
    /// Standard deviation.
    pub std: f32,
    /// Minimum value.
    pub min: f32,
    /// Maximum value.
    pub max: f32,
}
