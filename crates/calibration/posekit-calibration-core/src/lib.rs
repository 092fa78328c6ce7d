//! posekit-calibration-core
//!
//! Aggregates camera calibration (image size, intrinsics, distortion,
//! rectification, projection and extrinsics) into one [`CameraInfo`] value.
//! [`CalibrationAggregator`] reloads the matrices from a document one field at
//! a time: a bad field keeps its previous value and the rest still load.

pub mod aggregator;
pub mod camera_info;
pub mod config;
pub mod error;
pub mod field;

pub use aggregator::{CalibrationAggregator, ReloadReport};
pub use camera_info::CameraInfo;
pub use config::{CalibrationConfig, MAX_DIMENSION};
pub use error::FieldError;
pub use field::CalibrationField;

pub use posekit_api_core::{ConfigError, DocumentSource, FileSource, LoadError, MemorySource};
