//! posekit-api-core: matrix documents, storage access and shared error types.
//!
//! Sequence and calibration data arrive as keyed matrix documents (see
//! [`MatrixDocument`]). Reading the bytes is delegated to a [`DocumentSource`]
//! so hosts can plug in their own storage; [`FileSource`] and [`MemorySource`]
//! cover the filesystem and tests.

pub mod config;
pub mod document;
pub mod error;
pub mod matrix;
pub mod source;

pub use config::parse_config_object;
pub use document::MatrixDocument;
pub use error::{ConfigError, LoadError};
pub use matrix::MatrixEntry;
pub use source::{DocumentSource, FileSource, MemorySource};
