//! Dense row-major matrix entries as stored in matrix documents.

use nalgebra::SMatrix;
use serde::{Deserialize, Serialize};

use crate::error::LoadError;

/// A dense `rows x cols` matrix of f64, stored row-major.
///
/// Two JSON shapes are accepted on input:
/// - `{ "rows": 2, "cols": 3, "data": [..6 values..] }` (extra keys such as an
///   element type tag are ignored)
/// - a nested array of equally long rows, `[[1, 2, 3], [4, 5, 6]]`
///
/// Output always uses the `{ rows, cols, data }` form.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "RawMatrix")]
pub struct MatrixEntry {
    rows: usize,
    cols: usize,
    data: Vec<f64>,
}

impl MatrixEntry {
    /// Build from row-major data. `data.len()` must equal `rows * cols`.
    pub fn new(rows: usize, cols: usize, data: Vec<f64>) -> Result<Self, String> {
        let expected = rows
            .checked_mul(cols)
            .ok_or_else(|| format!("shape {rows}x{cols} overflows"))?;
        if data.len() != expected {
            return Err(format!(
                "{rows}x{cols} matrix needs {expected} values, got {}",
                data.len()
            ));
        }
        Ok(Self { rows, cols, data })
    }

    /// Build from fixed-width rows.
    pub fn from_rows<const C: usize>(rows: &[[f64; C]]) -> Self {
        Self {
            rows: rows.len(),
            cols: C,
            data: rows.iter().flat_map(|r| r.iter().copied()).collect(),
        }
    }

    /// Build from a fixed-size nalgebra matrix.
    pub fn from_matrix<const R: usize, const C: usize>(m: &SMatrix<f64, R, C>) -> Self {
        let mut data = Vec::with_capacity(R * C);
        for r in 0..R {
            for c in 0..C {
                data.push(m[(r, c)]);
            }
        }
        Self {
            rows: R,
            cols: C,
            data,
        }
    }

    #[inline]
    pub fn rows(&self) -> usize {
        self.rows
    }

    #[inline]
    pub fn cols(&self) -> usize {
        self.cols
    }

    #[inline]
    pub fn shape(&self) -> (usize, usize) {
        (self.rows, self.cols)
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.data.is_empty()
    }

    /// Row-major element storage.
    #[inline]
    pub fn data(&self) -> &[f64] {
        &self.data
    }

    /// One row as a slice, `None` past the end.
    pub fn row(&self, index: usize) -> Option<&[f64]> {
        if index >= self.rows {
            return None;
        }
        let start = index * self.cols;
        self.data.get(start..start + self.cols)
    }

    /// Iterate rows in order.
    pub fn iter_rows(&self) -> impl Iterator<Item = &[f64]> {
        // chunks() panics on 0; a 0-column matrix has no data anyway.
        self.data.chunks(self.cols.max(1))
    }

    /// Convert into a fixed-size matrix, checking the shape. `key` is only
    /// used to label the error.
    pub fn to_matrix<const R: usize, const C: usize>(
        &self,
        key: &str,
    ) -> Result<SMatrix<f64, R, C>, LoadError> {
        if self.rows != R || self.cols != C {
            return Err(LoadError::Shape {
                key: key.to_string(),
                rows: self.rows,
                cols: self.cols,
                expected: format!("{R}x{C}"),
            });
        }
        Ok(SMatrix::<f64, R, C>::from_fn(|r, c| self.data[r * C + c]))
    }
}

// ----- JSON schema (serde) -----

#[derive(Debug, Deserialize)]
#[serde(untagged)]
enum RawMatrix {
    Dense {
        rows: usize,
        cols: usize,
        data: Vec<f64>,
    },
    Nested(Vec<Vec<f64>>),
}

impl TryFrom<RawMatrix> for MatrixEntry {
    type Error = String;

    fn try_from(raw: RawMatrix) -> Result<Self, Self::Error> {
        match raw {
            RawMatrix::Dense { rows, cols, data } => MatrixEntry::new(rows, cols, data),
            RawMatrix::Nested(rows) => {
                let cols = rows.first().map(Vec::len).unwrap_or(0);
                if let Some(bad) = rows.iter().position(|r| r.len() != cols) {
                    return Err(format!(
                        "row {bad} has {} values, expected {cols}",
                        rows[bad].len()
                    ));
                }
                let n = rows.len();
                MatrixEntry::new(n, cols, rows.into_iter().flatten().collect())
            }
        }
    }
}
