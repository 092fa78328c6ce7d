//! Error types shared by the document loaders and configuration layers.

use thiserror::Error;

/// Failure to obtain usable data from a document. Always recoverable: callers
/// keep whatever they had loaded before.
#[derive(Debug, Clone, PartialEq, Error)]
#[non_exhaustive]
pub enum LoadError {
    /// The storage layer could not produce the document.
    #[error("could not read '{location}': {reason}")]
    Io { location: String, reason: String },

    /// The document is not a JSON object of matrix entries.
    #[error("document parse error: {reason}")]
    Parse { reason: String },

    /// A required entry is absent from the document.
    #[error("missing matrix entry '{key}'")]
    MissingKey { key: String },

    /// An entry parsed but has the wrong dimensions for its consumer.
    #[error("matrix '{key}' is {rows}x{cols}, expected {expected}")]
    Shape {
        key: String,
        rows: usize,
        cols: usize,
        expected: String,
    },

    /// An entry exists but is not a well-formed matrix.
    #[error("invalid matrix entry '{key}': {reason}")]
    InvalidEntry { key: String, reason: String },
}

impl LoadError {
    /// Short category label for log lines.
    #[inline]
    pub fn category(&self) -> &'static str {
        match self {
            Self::Io { .. } => "io",
            Self::Parse { .. } => "parse",
            Self::MissingKey { .. } => "missing",
            Self::Shape { .. } | Self::InvalidEntry { .. } => "entry",
        }
    }
}

impl From<serde_json::Error> for LoadError {
    fn from(err: serde_json::Error) -> Self {
        Self::Parse {
            reason: err.to_string(),
        }
    }
}

/// Rejected configuration. Produced while validating config structs, before
/// any component is constructed from them.
#[derive(Debug, Clone, PartialEq, Error)]
#[non_exhaustive]
pub enum ConfigError {
    #[error("property '{name}' = {value} is outside [{min}, {max}]")]
    OutOfRange {
        name: String,
        value: i64,
        min: i64,
        max: i64,
    },

    #[error("config parse error: {reason}")]
    Parse { reason: String },
}

impl From<serde_json::Error> for ConfigError {
    fn from(err: serde_json::Error) -> Self {
        Self::Parse {
            reason: err.to_string(),
        }
    }
}
