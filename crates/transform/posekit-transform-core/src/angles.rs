//! Position + roll/pitch/yaw tuples.

use serde::{Deserialize, Serialize};

/// Position and Euler angles (radians) of one pose sample.
/// Roll, pitch and yaw rotate about X, Y and Z and compose as `Rz · Ry · Rx`.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct XyzRpy {
    pub x: f64,
    pub y: f64,
    pub z: f64,
    /// Rotation about the x-axis
    pub roll: f64,
    /// Rotation about the y-axis
    pub pitch: f64,
    /// Rotation about the z-axis
    pub yaw: f64,
}

impl XyzRpy {
    pub fn new(x: f64, y: f64, z: f64, roll: f64, pitch: f64, yaw: f64) -> Self {
        Self {
            x,
            y,
            z,
            roll,
            pitch,
            yaw,
        }
    }

    #[inline]
    pub fn to_array(self) -> [f64; 6] {
        [self.x, self.y, self.z, self.roll, self.pitch, self.yaw]
    }

    #[inline]
    pub fn is_finite(&self) -> bool {
        self.to_array().iter().all(|v| v.is_finite())
    }
}

impl From<[f64; 6]> for XyzRpy {
    fn from(v: [f64; 6]) -> Self {
        Self::new(v[0], v[1], v[2], v[3], v[4], v[5])
    }
}

impl From<XyzRpy> for [f64; 6] {
    fn from(v: XyzRpy) -> Self {
        v.to_array()
    }
}
