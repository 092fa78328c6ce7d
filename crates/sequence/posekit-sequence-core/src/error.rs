//! Errors raised while turning a stored row into a transform.

use thiserror::Error;

/// A row could not be decoded at publish time. The step is skipped; nothing
/// else changes.
#[derive(Debug, Clone, PartialEq, Error)]
#[non_exhaustive]
pub enum DecodeError {
    #[error("index {index} is outside a sequence of {rows} rows")]
    IndexOutOfRange { index: usize, rows: usize },

    #[error("row {index} contains a non-finite value")]
    NonFinite { index: usize },
}
