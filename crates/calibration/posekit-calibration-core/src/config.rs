//! Calibration configuration.

use posekit_api_core::{parse_config_object, ConfigError};
use serde::{Deserialize, Serialize};

/// Upper bound for the configured image width and height.
pub const MAX_DIMENSION: i64 = 1280;

/// Initial calibration values and the default data location.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct CalibrationConfig {
    pub width: i64,
    pub height: i64,
    /// Initial intrinsics, row-major. Identity when absent.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub camera_matrix: Option<[[f64; 3]; 3]>,
    /// Initial distortion coefficients `(k1, k2, p1, p2, k3)`. Zero when absent.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub dist_coeffs: Option<[f64; 5]>,
    /// Initial rectification matrix, row-major. Identity when absent.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub rectification: Option<[[f64; 3]; 3]>,
    /// Initial 3x4 projection matrix, row-major. `[I | 0]` when absent.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub projection: Option<[[f64; 4]; 3]>,
    /// Initial extrinsic rotation, row-major. Identity when absent.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub rotation: Option<[[f64; 3]; 3]>,
    /// Initial extrinsic translation. Zero when absent.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub translation: Option<[f64; 3]>,
    /// Location used by `reload_configured`.
    pub data_file: String,
}

impl Default for CalibrationConfig {
    fn default() -> Self {
        Self {
            width: 640,
            height: 480,
            camera_matrix: None,
            dist_coeffs: None,
            rectification: None,
            projection: None,
            rotation: None,
            translation: None,
            data_file: String::new(),
        }
    }
}

impl CalibrationConfig {
    /// Parse a JSON object and validate it.
    pub fn from_json(s: &str) -> Result<Self, ConfigError> {
        let cfg: Self = parse_config_object(s)?;
        cfg.validate()?;
        Ok(cfg)
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        check_dimension("width", self.width)?;
        check_dimension("height", self.height)
    }

    pub fn with_data_file(mut self, path: impl Into<String>) -> Self {
        self.data_file = path.into();
        self
    }
}

fn check_dimension(name: &str, value: i64) -> Result<(), ConfigError> {
    if (0..=MAX_DIMENSION).contains(&value) {
        Ok(())
    } else {
        Err(ConfigError::OutOfRange {
            name: name.to_string(),
            value,
            min: 0,
            max: MAX_DIMENSION,
        })
    }
}
