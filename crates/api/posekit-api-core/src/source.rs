//! Storage seam: where document text comes from.
//!
//! Components never touch the filesystem directly; they ask a
//! [`DocumentSource`] for the text behind a location string.

use std::fs;
use std::path::{Path, PathBuf};

use hashbrown::HashMap;

use crate::document::MatrixDocument;
use crate::error::LoadError;

/// Something that can produce document text for a location.
pub trait DocumentSource {
    fn read_to_string(&self, location: &str) -> Result<String, LoadError>;

    /// Read and parse a matrix document.
    fn load_document(&self, location: &str) -> Result<MatrixDocument, LoadError> {
        let text = self.read_to_string(location)?;
        MatrixDocument::from_json(&text)
    }
}

impl<T: DocumentSource + ?Sized> DocumentSource for &T {
    fn read_to_string(&self, location: &str) -> Result<String, LoadError> {
        (**self).read_to_string(location)
    }
}

/// Filesystem-backed source. Relative locations resolve against `root` when
/// one is set, otherwise against the process working directory.
#[derive(Clone, Debug, Default)]
pub struct FileSource {
    root: Option<PathBuf>,
}

impl FileSource {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_root(root: impl Into<PathBuf>) -> Self {
        Self {
            root: Some(root.into()),
        }
    }

    fn resolve(&self, location: &str) -> PathBuf {
        let path = Path::new(location);
        match &self.root {
            Some(root) if path.is_relative() => root.join(path),
            _ => path.to_path_buf(),
        }
    }
}

impl DocumentSource for FileSource {
    fn read_to_string(&self, location: &str) -> Result<String, LoadError> {
        if location.is_empty() {
            return Err(LoadError::Io {
                location: String::new(),
                reason: "no location configured".into(),
            });
        }
        let path = self.resolve(location);
        fs::read_to_string(&path).map_err(|e| LoadError::Io {
            location: path.display().to_string(),
            reason: e.to_string(),
        })
    }
}

/// In-memory source keyed by location. Useful for tests and for hosts that
/// already hold document text.
#[derive(Clone, Debug, Default)]
pub struct MemorySource {
    docs: HashMap<String, String>,
}

impl MemorySource {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert(&mut self, location: impl Into<String>, text: impl Into<String>) {
        self.docs.insert(location.into(), text.into());
    }

    pub fn with(mut self, location: impl Into<String>, text: impl Into<String>) -> Self {
        self.insert(location, text);
        self
    }

    pub fn remove(&mut self, location: &str) -> Option<String> {
        self.docs.remove(location)
    }
}

impl DocumentSource for MemorySource {
    fn read_to_string(&self, location: &str) -> Result<String, LoadError> {
        self.docs
            .get(location)
            .cloned()
            .ok_or_else(|| LoadError::Io {
                location: location.to_string(),
                reason: "no such document".into(),
            })
    }
}
