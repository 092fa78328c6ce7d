use posekit_api_core::LoadError;
use thiserror::Error;

use crate::field::CalibrationField;

/// One calibration field that could not be loaded. The field keeps its
/// previous value.
#[derive(Debug, Clone, PartialEq, Error)]
#[error("{field} ('{}'): {source}", .field.key())]
pub struct FieldError {
    pub field: CalibrationField,
    #[source]
    pub source: LoadError,
}

impl FieldError {
    pub fn new(field: CalibrationField, source: LoadError) -> Self {
        Self { field, source }
    }
}
