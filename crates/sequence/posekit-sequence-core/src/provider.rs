//! Fixed pose source.

use log::trace;
use posekit_transform_core::{Transform, XyzRpy};

/// Publishes the same pose on every call, built from a configured offset.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct PoseOffsetProvider {
    offset: XyzRpy,
}

impl PoseOffsetProvider {
    pub fn new(offset: XyzRpy) -> Self {
        Self { offset }
    }

    #[inline]
    pub fn offset(&self) -> XyzRpy {
        self.offset
    }

    pub fn set_offset(&mut self, offset: XyzRpy) {
        self.offset = offset;
    }

    pub fn generate(&self) -> Transform {
        trace!("generating offset pose {:?}", self.offset);
        Transform::from_xyzrpy(self.offset)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_offset_is_identity() {
        assert!(PoseOffsetProvider::default().generate().is_identity(0.0));
    }

    #[test]
    fn generate_tracks_offset_updates() {
        let mut p = PoseOffsetProvider::new(XyzRpy::new(1.0, 2.0, 3.0, 0.0, 0.0, 0.0));
        assert_eq!(p.generate().translation().as_slice(), &[1.0, 2.0, 3.0]);
        p.set_offset(XyzRpy::new(0.0, 0.0, 0.0, 0.0, 0.0, 0.5));
        let expected = Transform::from_angles_and_position(0.0, 0.0, 0.0, 0.0, 0.0, 0.5);
        assert_eq!(p.generate(), expected);
    }
}
