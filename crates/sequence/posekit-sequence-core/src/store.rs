//! Ordered pose rows loaded from a matrix document.

use log::debug;
use posekit_api_core::{DocumentSource, LoadError, MatrixDocument};
use posekit_transform_core::{Transform, XyzRpy};

use crate::error::DecodeError;

/// Document key holding the `N x 6` matrix of `(x, y, z, roll, pitch, yaw)` rows.
pub const SEQUENCE_KEY: &str = "XYZRPY";

const ROW_WIDTH: usize = 6;

/// Rows of pose samples. Contents change only through a successful load,
/// which replaces them wholesale; a failed load leaves them untouched.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct SequenceStore {
    rows: Vec<XyzRpy>,
}

impl SequenceStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Store with the given rows, bypassing any document.
    pub fn from_rows(rows: Vec<[f64; 6]>) -> Self {
        Self {
            rows: rows.into_iter().map(XyzRpy::from).collect(),
        }
    }

    /// Read `location` through `source` and load its `XYZRPY` entry.
    /// Returns the new row count.
    pub fn load(
        &mut self,
        source: &dyn DocumentSource,
        location: &str,
    ) -> Result<usize, LoadError> {
        let doc = source.load_document(location)?;
        self.load_document(&doc)
    }

    /// Load from an already parsed document.
    pub fn load_document(&mut self, doc: &MatrixDocument) -> Result<usize, LoadError> {
        let entry = doc.entry(SEQUENCE_KEY)?;
        // A 0-row matrix is a valid empty sequence whatever its column count.
        if entry.rows() > 0 && entry.cols() != ROW_WIDTH {
            return Err(LoadError::Shape {
                key: SEQUENCE_KEY.to_string(),
                rows: entry.rows(),
                cols: entry.cols(),
                expected: format!("Nx{ROW_WIDTH}"),
            });
        }
        let rows: Vec<XyzRpy> = entry
            .iter_rows()
            .map(|r| XyzRpy::new(r[0], r[1], r[2], r[3], r[4], r[5]))
            .collect();
        debug!("loaded {} {SEQUENCE_KEY} rows", rows.len());
        self.rows = rows;
        Ok(self.rows.len())
    }

    #[inline]
    pub fn row_count(&self) -> usize {
        self.rows.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    /// Raw row at `index`, `None` when out of bounds.
    #[inline]
    pub fn get(&self, index: usize) -> Option<XyzRpy> {
        self.rows.get(index).copied()
    }

    /// Row at `index` converted to a transform.
    pub fn decode(&self, index: usize) -> Result<Transform, DecodeError> {
        let row = self.get(index).ok_or(DecodeError::IndexOutOfRange {
            index,
            rows: self.rows.len(),
        })?;
        if !row.is_finite() {
            return Err(DecodeError::NonFinite { index });
        }
        Ok(Transform::from_xyzrpy(row))
    }
}
