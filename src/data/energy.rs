//! The ENB2012 building energy-efficiency schema and typed dataset.
//!
//! Eight building-design features predict two load targets. The raw table
//! ships with coded headers (`X1..X8`, `Y1`, `Y2`); loading maps them to
//! canonical names and validates the schema up front, so everything past
//! the load step works with an immutable, fully-numeric dataset.

use std::fs::File;
use std::io::{BufRead, BufReader};
use std::path::Path;

use crate::data::DataFrame;
use crate::error::{EnergiaError, Result};
use crate::primitives::{Matrix, Vector};
use serde::{Deserialize, Serialize};

/// Canonical feature column names, in fixed order.
///
/// This order is the feature-matrix column order at both training and
/// prediction time.
pub const FEATURE_COLUMNS: [&str; 8] = [
    "relative_compactness",
    "surface_area",
    "wall_area",
    "roof_area",
    "overall_height",
    "orientation",
    "glazing_area",
    "glazing_area_distribution",
];

/// Number of feature columns.
pub const N_FEATURES: usize = FEATURE_COLUMNS.len();

/// The two predictable load targets.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum Target {
    /// Heating load (Y1).
    HeatingLoad,
    /// Cooling load (Y2).
    CoolingLoad,
}

impl Target {
    /// Both targets, in column order.
    pub const ALL: [Target; 2] = [Target::HeatingLoad, Target::CoolingLoad];

    /// Canonical column name of this target.
    #[must_use]
    pub fn column_name(self) -> &'static str {
        match self {
            Target::HeatingLoad => "heating_load",
            Target::CoolingLoad => "cooling_load",
        }
    }
}

impl std::fmt::Display for Target {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.column_name())
    }
}

/// Maps a raw or canonical header name to its canonical column name.
fn canonical_name(raw: &str) -> Option<&'static str> {
    match raw {
        "X1" | "relative_compactness" => Some("relative_compactness"),
        "X2" | "surface_area" => Some("surface_area"),
        "X3" | "wall_area" => Some("wall_area"),
        "X4" | "roof_area" => Some("roof_area"),
        "X5" | "overall_height" => Some("overall_height"),
        "X6" | "orientation" => Some("orientation"),
        "X7" | "glazing_area" => Some("glazing_area"),
        "X8" | "glazing_area_distribution" => Some("glazing_area_distribution"),
        "Y1" | "heating_load" => Some("heating_load"),
        "Y2" | "cooling_load" => Some("cooling_load"),
        _ => None,
    }
}

/// Observed bounds of one feature column, for driving a bounded numeric input.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct FeatureRange {
    /// Canonical feature name.
    pub name: &'static str,
    /// Observed minimum.
    pub min: f32,
    /// Observed maximum.
    pub max: f32,
    /// Observed mean (the natural default for an input form).
    pub mean: f32,
}

/// The validated, immutable building-energy dataset.
///
/// Owns the feature matrix (fixed column order per [`FEATURE_COLUMNS`]) and
/// both target vectors. Built once by an explicit load step and passed by
/// value into the engine; never mutated afterwards.
///
/// # Examples
///
/// ```
/// use energia::data::DataFrame;
/// use energia::data::energy::{EnergyDataset, Target, FEATURE_COLUMNS};
/// use energia::primitives::Vector;
///
/// let mut columns: Vec<(String, Vector<f32>)> = FEATURE_COLUMNS
///     .iter()
///     .enumerate()
///     .map(|(j, name)| {
///         let col: Vec<f32> = (0..12).map(|i| (i + j) as f32).collect();
///         (name.to_string(), Vector::from_vec(col))
///     })
///     .collect();
/// columns.push(("heating_load".to_string(), Vector::from_vec(vec![15.0; 12])));
/// columns.push(("cooling_load".to_string(), Vector::from_vec(vec![20.0; 12])));
///
/// let df = DataFrame::new(columns).unwrap();
/// let dataset = EnergyDataset::from_dataframe(&df).unwrap();
/// assert_eq!(dataset.n_rows(), 12);
/// assert_eq!(dataset.target(Target::HeatingLoad).len(), 12);
/// ```
#[derive(Debug, Clone)]
pub struct EnergyDataset {
    features: Matrix<f32>,
    heating: Vector<f32>,
    cooling: Vector<f32>,
}

impl EnergyDataset {
    /// Builds the dataset from a named-column table.
    ///
    /// The table must carry exactly the 8 feature columns and 2 target
    /// columns (canonical names), all values finite.
    ///
    /// # Errors
    ///
    /// Returns a schema error if columns are missing or any value is
    /// non-finite, or if the table has no rows.
    pub fn from_dataframe(df: &DataFrame) -> Result<Self> {
        if df.n_rows() == 0 {
            return Err(EnergiaError::schema("table has no rows"));
        }

        for name in FEATURE_COLUMNS
            .iter()
            .copied()
            .chain(Target::ALL.iter().map(|t| t.column_name()))
        {
            let col = df.column(name)?;
            for (i, value) in col.iter().enumerate() {
                if !value.is_finite() {
                    return Err(EnergiaError::schema(format!(
                        "column '{name}' has non-finite value at row {i}"
                    )));
                }
            }
        }

        let features = df.to_matrix(&FEATURE_COLUMNS)?;
        let heating = df.column(Target::HeatingLoad.column_name())?.clone();
        let cooling = df.column(Target::CoolingLoad.column_name())?.clone();

        Ok(Self {
            features,
            heating,
            cooling,
        })
    }

    /// Loads the dataset from a CSV file.
    ///
    /// The header may use either the raw `X1..X8,Y1,Y2` codes or the
    /// canonical names, in any column order.
    ///
    /// # Errors
    ///
    /// Returns an I/O error if the file can't be read, or a schema error if
    /// the header or any row is malformed.
    pub fn from_csv<P: AsRef<Path>>(path: P) -> Result<Self> {
        let file = File::open(path)?;
        Self::from_reader(BufReader::new(file))
    }

    /// Loads the dataset from any buffered CSV source.
    ///
    /// # Errors
    ///
    /// Same conditions as [`EnergyDataset::from_csv`].
    pub fn from_reader<R: BufRead>(reader: R) -> Result<Self> {
        let mut lines = reader.lines();

        let header = lines
            .next()
            .ok_or_else(|| EnergiaError::schema("empty CSV input"))??;

        let mut names: Vec<&'static str> = Vec::new();
        for field in header.split(',') {
            let field = field.trim();
            let name = canonical_name(field)
                .ok_or_else(|| EnergiaError::schema(format!("unknown column '{field}'")))?;
            if names.contains(&name) {
                return Err(EnergiaError::schema(format!("duplicate column '{field}'")));
            }
            names.push(name);
        }

        let expected = FEATURE_COLUMNS.len() + Target::ALL.len();
        if names.len() != expected {
            return Err(EnergiaError::schema(format!(
                "expected {expected} columns, header has {}",
                names.len()
            )));
        }

        let mut columns: Vec<Vec<f32>> = vec![Vec::new(); names.len()];
        for (line_no, line) in lines.enumerate() {
            let line = line?;
            if line.trim().is_empty() {
                continue;
            }

            let fields: Vec<&str> = line.split(',').collect();
            if fields.len() != names.len() {
                return Err(EnergiaError::schema(format!(
                    "row {} has {} fields, expected {}",
                    line_no + 2,
                    fields.len(),
                    names.len()
                )));
            }

            for (j, field) in fields.iter().enumerate() {
                let value: f32 = field.trim().parse().map_err(|_| {
                    EnergiaError::schema(format!(
                        "column '{}' has non-numeric value '{}' at row {}",
                        names[j],
                        field.trim(),
                        line_no + 2
                    ))
                })?;
                columns[j].push(value);
            }
        }

        let df = DataFrame::new(
            names
                .iter()
                .zip(columns)
                .map(|(name, data)| (name.to_string(), Vector::from_vec(data)))
                .collect(),
        )?;

        Self::from_dataframe(&df)
    }

    /// Number of records.
    #[must_use]
    pub fn n_rows(&self) -> usize {
        self.features.n_rows()
    }

    /// The feature matrix (rows = records, columns per [`FEATURE_COLUMNS`]).
    #[must_use]
    pub fn features(&self) -> &Matrix<f32> {
        &self.features
    }

    /// The target vector for the chosen load.
    #[must_use]
    pub fn target(&self, target: Target) -> &Vector<f32> {
        match target {
            Target::HeatingLoad => &self.heating,
            Target::CoolingLoad => &self.cooling,
        }
    }

    /// Observed min/max/mean per feature, in feature-column order.
    #[must_use]
    pub fn feature_ranges(&self) -> Vec<FeatureRange> {
        FEATURE_COLUMNS
            .iter()
            .enumerate()
            .map(|(j, name)| {
                let col = self.features.column(j);
                FeatureRange {
                    name,
                    min: col.min(),
                    max: col.max(),
                    mean: col.mean(),
                }
            })
            .collect()
    }
}
