//! Matrix type for 2D numeric data.

use super::Vector;
use crate::error::{EnergiaError, Result};
use serde::{Deserialize, Serialize};

/// A 2D matrix of floating-point values (row-major storage).
///
/// # Examples
///
/// ```
/// use energia::primitives::Matrix;
///
/// let m = Matrix::from_vec(2, 3, vec![1.0, 2.0, 3.0, 4.0, 5.0, 6.0]).unwrap();
/// assert_eq!(m.shape(), (2, 3));
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Matrix<T> {
    data: Vec<T>,
    rows: usize,
    cols: usize,
}

impl<T: Copy> Matrix<T> {
    /// Creates a new matrix from a vector of data.
    ///
    /// # Errors
    ///
    /// Returns an error if data length doesn't match rows * cols.
    pub fn from_vec(rows: usize, cols: usize, data: Vec<T>) -> Result<Self> {
        if data.len() != rows * cols {
            return Err(EnergiaError::length_mismatch(
                "matrix data",
                rows * cols,
                data.len(),
            ));
        }
        Ok(Self { data, rows, cols })
    }

    /// Returns the shape as (rows, cols).
    #[must_use]
    pub fn shape(&self) -> (usize, usize) {
        (self.rows, self.cols)
    }

    /// Returns the number of rows.
    #[must_use]
    pub fn n_rows(&self) -> usize {
        self.rows
    }

    /// Returns the number of columns.
    #[must_use]
    pub fn n_cols(&self) -> usize {
        self.cols
    }

    /// Gets element at (row, col).
    ///
    /// # Panics
    ///
    /// Panics if indices are out of bounds.
    #[must_use]
    pub fn get(&self, row: usize, col: usize) -> T {
        self.data[row * self.cols + col]
    }

    /// Sets element at (row, col).
    ///
    /// # Panics
    ///
    /// Panics if indices are out of bounds.
    pub fn set(&mut self, row: usize, col: usize, value: T) {
        self.data[row * self.cols + col] = value;
    }

    /// Returns a row as a Vector.
    #[must_use]
    pub fn row(&self, row_idx: usize) -> Vector<T> {
        let start = row_idx * self.cols;
        let end = start + self.cols;
        Vector::from_slice(&self.data[start..end])
    }

    /// Returns a column as a Vector.
    #[must_use]
    pub fn column(&self, col_idx: usize) -> Vector<T> {
        let data: Vec<T> = (0..self.rows)
            .map(|row| self.data[row * self.cols + col_idx])
            .collect();
        Vector::from_vec(data)
    }

    /// Returns the underlying data as a slice.
    #[must_use]
    pub fn as_slice(&self) -> &[T] {
        &self.data
    }
}

impl Matrix<f32> {
    /// Transposes the matrix.
    #[must_use]
    pub fn transpose(&self) -> Self {
        let mut data = vec![0.0; self.rows * self.cols];
        for i in 0..self.rows {
            for j in 0..self.cols {
                data[j * self.rows + i] = self.data[i * self.cols + j];
            }
        }
        Self {
            data,
            rows: self.cols,
            cols: self.rows,
        }
    }

    /// Matrix-matrix multiplication.
    ///
    /// # Errors
    ///
    /// Returns an error if dimensions don't match.
    pub fn matmul(&self, other: &Self) -> Result<Self> {
        if self.cols != other.rows {
            return Err(EnergiaError::length_mismatch(
                "left-hand columns",
                self.cols,
                other.rows,
            ));
        }

        let mut result = vec![0.0; self.rows * other.cols];
        for i in 0..self.rows {
            for j in 0..other.cols {
                let mut sum = 0.0;
                for k in 0..self.cols {
                    sum += self.get(i, k) * other.get(k, j);
                }
                result[i * other.cols + j] = sum;
            }
        }

        Ok(Self {
            data: result,
            rows: self.rows,
            cols: other.cols,
        })
    }

    /// Matrix-vector multiplication.
    ///
    /// # Errors
    ///
    /// Returns an error if dimensions don't match.
    pub fn matvec(&self, vec: &Vector<f32>) -> Result<Vector<f32>> {
        if self.cols != vec.len() {
            return Err(EnergiaError::column_mismatch(vec.len(), self.cols));
        }

        let result: Vec<f32> = (0..self.rows)
            .map(|i| {
                let row = self.row(i);
                row.dot(vec)
            })
            .collect();

        Ok(Vector::from_vec(result))
    }

    /// Solves the linear system Ax = b using Cholesky decomposition.
    ///
    /// The matrix must be symmetric positive definite.
    ///
    /// # Errors
    ///
    /// Returns an error if the matrix is not square or not positive definite.
    pub fn cholesky_solve(&self, b: &Vector<f32>) -> Result<Vector<f32>> {
        if self.rows != self.cols {
            return Err(EnergiaError::length_mismatch(
                "square matrix rows",
                self.cols,
                self.rows,
            ));
        }
        if self.rows != b.len() {
            return Err(EnergiaError::length_mismatch(
                "right-hand side",
                self.rows,
                b.len(),
            ));
        }

        let n = self.rows;

        // Cholesky decomposition: A = L * L^T
        let mut l = vec![0.0; n * n];

        for i in 0..n {
            for j in 0..=i {
                let mut sum = 0.0;

                if i == j {
                    for k in 0..j {
                        sum += l[j * n + k] * l[j * n + k];
                    }
                    let diag = self.get(j, j) - sum;
                    if diag <= 0.0 {
                        return Err(EnergiaError::SingularMatrix { pivot: diag });
                    }
                    l[j * n + j] = diag.sqrt();
                } else {
                    for k in 0..j {
                        sum += l[i * n + k] * l[j * n + k];
                    }
                    l[i * n + j] = (self.get(i, j) - sum) / l[j * n + j];
                }
            }
        }

        // Forward substitution: L * y = b
        let mut y = vec![0.0; n];
        for i in 0..n {
            let mut sum = 0.0;
            for j in 0..i {
                sum += l[i * n + j] * y[j];
            }
            y[i] = (b[i] - sum) / l[i * n + i];
        }

        // Backward substitution: L^T * x = y
        let mut x = vec![0.0; n];
        for i in (0..n).rev() {
            let mut sum = 0.0;
            for j in (i + 1)..n {
                sum += l[j * n + i] * x[j];
            }
            x[i] = (y[i] - sum) / l[i * n + i];
        }

        Ok(Vector::from_vec(x))
    }

    /// Solves the least-squares problem min ||Ax - b|| via Householder QR
    /// with column pivoting.
    ///
    /// Rank-deficient systems (exactly collinear columns) are handled by
    /// dropping the dependent columns: their coefficients come back as zero
    /// and the fit over the remaining columns is still least-squares optimal.
    ///
    /// # Errors
    ///
    /// Returns an error if the system is underdetermined (rows < cols), the
    /// right-hand side length doesn't match, or every column is negligible.
    pub fn qr_least_squares(&self, b: &Vector<f32>) -> Result<Vector<f32>> {
        let m = self.rows;
        let n = self.cols;

        if m < n {
            return Err(EnergiaError::InsufficientData {
                n_samples: m,
                required: n,
            });
        }
        if b.len() != m {
            return Err(EnergiaError::length_mismatch(
                "right-hand side",
                m,
                b.len(),
            ));
        }

        let mut r = self.data.clone();
        let mut qtb: Vec<f32> = b.as_slice().to_vec();
        let mut perm: Vec<usize> = (0..n).collect();

        // Rank tolerance relative to the largest column norm (LAPACK-style).
        let mut scale = 0.0f32;
        for j in 0..n {
            let mut s = 0.0;
            for i in 0..m {
                s += r[i * n + j] * r[i * n + j];
            }
            scale = scale.max(s.sqrt());
        }
        if scale == 0.0 {
            return Err(EnergiaError::SingularMatrix { pivot: 0.0 });
        }
        let tol = scale * m.max(n) as f32 * f32::EPSILON;

        let mut rank = n;

        for k in 0..n {
            // Pivot: bring the column with the largest remaining norm to position k.
            let mut best = k;
            let mut best_norm = 0.0f32;
            for j in k..n {
                let mut s = 0.0;
                for i in k..m {
                    s += r[i * n + j] * r[i * n + j];
                }
                let s = s.sqrt();
                if s > best_norm {
                    best_norm = s;
                    best = j;
                }
            }

            if best_norm <= tol {
                rank = k;
                break;
            }

            if best != k {
                for i in 0..m {
                    r.swap(i * n + k, i * n + best);
                }
                perm.swap(k, best);
            }

            // Householder reflection zeroing column k below the diagonal.
            let alpha = if r[k * n + k] > 0.0 {
                -best_norm
            } else {
                best_norm
            };
            let mut v = vec![0.0f32; m - k];
            v[0] = r[k * n + k] - alpha;
            for i in (k + 1)..m {
                v[i - k] = r[i * n + k];
            }
            let vtv: f32 = v.iter().map(|x| x * x).sum();

            if vtv > 0.0 {
                for j in (k + 1)..n {
                    let mut dot = 0.0;
                    for i in k..m {
                        dot += v[i - k] * r[i * n + j];
                    }
                    let s = 2.0 * dot / vtv;
                    for i in k..m {
                        r[i * n + j] -= s * v[i - k];
                    }
                }
                let mut dot = 0.0;
                for i in k..m {
                    dot += v[i - k] * qtb[i];
                }
                let s = 2.0 * dot / vtv;
                for i in k..m {
                    qtb[i] -= s * v[i - k];
                }
            }

            r[k * n + k] = alpha;
            for i in (k + 1)..m {
                r[i * n + k] = 0.0;
            }
        }

        if rank == 0 {
            return Err(EnergiaError::SingularMatrix { pivot: 0.0 });
        }

        // Back substitution on the leading rank x rank triangle; dropped
        // columns keep coefficient zero.
        let mut xp = vec![0.0f32; n];
        for i in (0..rank).rev() {
            let mut sum = qtb[i];
            for j in (i + 1)..rank {
                sum -= r[i * n + j] * xp[j];
            }
            xp[i] = sum / r[i * n + i];
        }

        // Undo the column permutation.
        let mut x = vec![0.0f32; n];
        for j in 0..n {
            x[perm[j]] = xp[j];
        }

        Ok(Vector::from_vec(x))
    }
}

#[cfg(test)]
#[path = "matrix_tests.rs"]
mod tests;
