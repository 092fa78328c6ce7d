//! Matrix fields of a calibration document.

use std::fmt;

use serde::{Deserialize, Serialize};

/// One of the six matrices a calibration document may carry.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CalibrationField {
    CameraMatrix,
    DistCoeffs,
    Rectification,
    Projection,
    Rotation,
    Translation,
}

impl CalibrationField {
    /// Reload order.
    pub const ALL: [CalibrationField; 6] = [
        Self::CameraMatrix,
        Self::DistCoeffs,
        Self::Rectification,
        Self::Projection,
        Self::Rotation,
        Self::Translation,
    ];

    /// Document key.
    pub fn key(self) -> &'static str {
        match self {
            Self::CameraMatrix => "M",
            Self::DistCoeffs => "D",
            Self::Rectification => "R",
            Self::Projection => "P",
            Self::Rotation => "ROT",
            Self::Translation => "T",
        }
    }

    /// Required `(rows, cols)`.
    pub fn shape(self) -> (usize, usize) {
        match self {
            Self::CameraMatrix | Self::Rectification | Self::Rotation => (3, 3),
            Self::DistCoeffs => (1, 5),
            Self::Projection => (3, 4),
            Self::Translation => (3, 1),
        }
    }

    pub fn from_key(key: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|f| f.key() == key)
    }
}

impl fmt::Display for CalibrationField {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Self::CameraMatrix => "camera matrix",
            Self::DistCoeffs => "distortion coefficients",
            Self::Rectification => "rectification matrix",
            Self::Projection => "projection matrix",
            Self::Rotation => "rotation matrix",
            Self::Translation => "translation vector",
        };
        f.write_str(name)
    }
}
