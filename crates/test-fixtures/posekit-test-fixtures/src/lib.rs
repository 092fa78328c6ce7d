//! Shared fixture documents for the posekit crates' tests and benches.
//!
//! Fixtures live under `fixtures/` at the workspace root and are named in
//! `fixtures/manifest.json`.

use std::collections::HashMap;
use std::fs;
use std::path::{Path, PathBuf};

use anyhow::{anyhow, Context, Result};
use once_cell::sync::Lazy;
use serde::de::DeserializeOwned;
use serde::Deserialize;

static MANIFEST: Lazy<Manifest> = Lazy::new(|| {
    let raw = include_str!("../../../../fixtures/manifest.json");
    serde_json::from_str(raw).expect("fixtures manifest should parse")
});

#[derive(Debug, Deserialize)]
struct Manifest {
    sequences: HashMap<String, String>,
    calibration: HashMap<String, CalibrationEntry>,
}

#[derive(Debug, Deserialize)]
#[serde(untagged)]
enum CalibrationEntry {
    Path(String),
    Detailed {
        path: String,
        #[serde(default)]
        config: Option<String>,
    },
}

impl CalibrationEntry {
    fn as_path(&self) -> &str {
        match self {
            CalibrationEntry::Path(path) => path,
            CalibrationEntry::Detailed { path, .. } => path,
        }
    }

    fn config(&self) -> Option<&str> {
        match self {
            CalibrationEntry::Path(_) => None,
            CalibrationEntry::Detailed { config, .. } => config.as_deref(),
        }
    }
}

/// Absolute path of the fixtures directory.
pub fn fixtures_root() -> PathBuf {
    Path::new(env!("CARGO_MANIFEST_DIR")).join("../../../fixtures")
}

fn resolve_path(rel: &str) -> PathBuf {
    fixtures_root().join(rel)
}

fn read_to_string(rel: &str) -> Result<String> {
    let path = resolve_path(rel);
    fs::read_to_string(&path)
        .with_context(|| format!("failed to read fixture at {}", path.display()))
}

fn load_json<T: DeserializeOwned>(rel: &str) -> Result<T> {
    let text = read_to_string(rel)?;
    serde_json::from_str(&text).with_context(|| format!("failed to parse JSON fixture {rel}"))
}

fn lookup<'a, T>(map: &'a HashMap<String, T>, kind: &str, name: &str) -> Result<&'a T> {
    map.get(name)
        .ok_or_else(|| anyhow!("unknown {kind} fixture '{name}'"))
}

/// Recorded `XYZRPY` sequence documents.
pub mod sequences {
    use super::*;

    pub fn keys() -> Vec<String> {
        MANIFEST.sequences.keys().cloned().collect()
    }

    pub fn json(name: &str) -> Result<String> {
        let rel = lookup(&MANIFEST.sequences, "sequence", name)?;
        read_to_string(rel)
    }

    pub fn load<T: DeserializeOwned>(name: &str) -> Result<T> {
        let rel = lookup(&MANIFEST.sequences, "sequence", name)?;
        super::load_json(rel)
    }

    /// Location relative to [`fixtures_root`](super::fixtures_root).
    pub fn location(name: &str) -> Result<String> {
        lookup(&MANIFEST.sequences, "sequence", name).cloned()
    }

    pub fn path(name: &str) -> Result<PathBuf> {
        let rel = lookup(&MANIFEST.sequences, "sequence", name)?;
        Ok(resolve_path(rel))
    }
}

/// Camera calibration documents, optionally paired with a config.
///
/// A paired config is a `CalibrationConfig` JSON whose `data_file` names the
/// document it sits beside (relative to [`fixtures_root`](super::fixtures_root)),
/// so a test can build an aggregator from it and exercise `reload_configured`
/// against the real file.
pub mod calibration {
    use super::*;

    pub fn keys() -> Vec<String> {
        MANIFEST.calibration.keys().cloned().collect()
    }

    pub fn json(name: &str) -> Result<String> {
        let entry = lookup(&MANIFEST.calibration, "calibration", name)?;
        read_to_string(entry.as_path())
    }

    pub fn location(name: &str) -> Result<String> {
        let entry = lookup(&MANIFEST.calibration, "calibration", name)?;
        Ok(entry.as_path().to_string())
    }

    pub fn path(name: &str) -> Result<PathBuf> {
        let entry = lookup(&MANIFEST.calibration, "calibration", name)?;
        Ok(resolve_path(entry.as_path()))
    }

    pub fn config_json(name: &str) -> Result<Option<String>> {
        let entry = lookup(&MANIFEST.calibration, "calibration", name)?;
        match entry.config() {
            Some(rel) => read_to_string(rel).map(Some),
            None => Ok(None),
        }
    }

    pub fn config<T: DeserializeOwned>(name: &str) -> Result<Option<T>> {
        let entry = lookup(&MANIFEST.calibration, "calibration", name)?;
        match entry.config() {
            Some(rel) => super::load_json(rel).map(Some),
            None => Ok(None),
        }
    }
}
