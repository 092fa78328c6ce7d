//! Per-field calibration reload.

use log::{debug, error, info, warn};
use posekit_api_core::{ConfigError, DocumentSource, LoadError, MatrixDocument};

use crate::camera_info::CameraInfo;
use crate::config::CalibrationConfig;
use crate::error::FieldError;
use crate::field::CalibrationField;

/// Outcome of one calibration reload, field by field.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct ReloadReport {
    pub updated: Vec<CalibrationField>,
    /// Keys absent from the document; those fields were left as they were.
    pub missing: Vec<CalibrationField>,
    pub failed: Vec<FieldError>,
}

impl ReloadReport {
    /// Every field was present and loaded.
    pub fn is_complete(&self) -> bool {
        self.missing.is_empty() && self.failed.is_empty()
    }

    pub fn has_failures(&self) -> bool {
        !self.failed.is_empty()
    }
}

/// Owns the current [`CameraInfo`] and applies reloads and inbound updates.
#[derive(Clone, Debug)]
pub struct CalibrationAggregator {
    config: CalibrationConfig,
    info: CameraInfo,
}

impl CalibrationAggregator {
    pub fn new(config: CalibrationConfig) -> Result<Self, ConfigError> {
        config.validate()?;
        let info = CameraInfo::from_config(&config);
        info!("camera matrix: {}", info.camera_matrix);
        Ok(Self { config, info })
    }

    #[inline]
    pub fn config(&self) -> &CalibrationConfig {
        &self.config
    }

    /// Current values, by reference.
    #[inline]
    pub fn camera_info(&self) -> &CameraInfo {
        &self.info
    }

    /// Snapshot of the current values.
    pub fn generate(&self) -> CameraInfo {
        self.info.clone()
    }

    /// Overwrite every field with `peer`, unchecked.
    pub fn ingest(&mut self, peer: &CameraInfo) {
        debug!("ingesting camera info {}x{}", peer.width, peer.height);
        self.info = peer.clone();
    }

    /// Reload the configured `data_file`.
    pub fn reload_configured(
        &mut self,
        source: &dyn DocumentSource,
    ) -> Result<ReloadReport, LoadError> {
        let location = self.config.data_file.clone();
        self.reload(source, &location)
    }

    /// Read `location` once, then load each field independently. Only a
    /// document that cannot be read or parsed at all is an `Err`; in that case
    /// nothing changes.
    pub fn reload(
        &mut self,
        source: &dyn DocumentSource,
        location: &str,
    ) -> Result<ReloadReport, LoadError> {
        let doc = source.load_document(location).map_err(|e| {
            error!("could not read calibration '{location}': {e}");
            e
        })?;
        let report = self.apply_document(&doc);
        debug!(
            "calibration '{location}': {} updated, {} missing, {} failed",
            report.updated.len(),
            report.missing.len(),
            report.failed.len()
        );
        Ok(report)
    }

    /// Load every field present in `doc`.
    pub fn apply_document(&mut self, doc: &MatrixDocument) -> ReloadReport {
        let mut report = ReloadReport::default();
        for field in CalibrationField::ALL {
            match self.load_field(doc, field) {
                Ok(()) => report.updated.push(field),
                Err(LoadError::MissingKey { .. }) => {
                    debug!("calibration field '{}' absent", field.key());
                    report.missing.push(field);
                }
                Err(e) => {
                    warn!("keeping previous {field}: {e}");
                    report.failed.push(FieldError::new(field, e));
                }
            }
        }
        report
    }

    fn load_field(
        &mut self,
        doc: &MatrixDocument,
        field: CalibrationField,
    ) -> Result<(), LoadError> {
        let key = field.key();
        let entry = doc.entry(key)?;
        let info = &mut self.info;
        match field {
            CalibrationField::CameraMatrix => info.camera_matrix = entry.to_matrix::<3, 3>(key)?,
            CalibrationField::DistCoeffs => info.dist_coeffs = entry.to_matrix::<1, 5>(key)?,
            CalibrationField::Rectification => info.rectification = entry.to_matrix::<3, 3>(key)?,
            CalibrationField::Projection => info.projection = entry.to_matrix::<3, 4>(key)?,
            CalibrationField::Rotation => info.rotation = entry.to_matrix::<3, 3>(key)?,
            CalibrationField::Translation => info.translation = entry.to_matrix::<3, 1>(key)?,
        }
        Ok(())
    }
}
