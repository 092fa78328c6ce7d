//! Keyed matrix documents.
//!
//! A document is a JSON object whose values are matrix entries, e.g.
//!
//! ```json
//! { "XYZRPY": { "rows": 2, "cols": 6, "data": [0,0,0,0,0,0, 1,0,0,0,0,0] } }
//! ```
//!
//! Entries are kept as raw JSON and only converted on access, so one malformed
//! entry does not prevent reading the others.

use hashbrown::HashMap;
use serde::{Deserialize, Serialize};
use serde_json::Value as JsonValue;

use crate::error::LoadError;
use crate::matrix::MatrixEntry;

#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct MatrixDocument {
    entries: HashMap<String, JsonValue>,
}

impl MatrixDocument {
    pub fn new() -> Self {
        Self::default()
    }

    /// Parse a document. Fails only if the text is not a JSON object; entry
    /// contents are validated lazily by [`MatrixDocument::entry`].
    pub fn from_json(s: &str) -> Result<Self, LoadError> {
        let value: JsonValue = serde_json::from_str(s)?;
        match value {
            JsonValue::Object(map) => Ok(Self {
                entries: map.into_iter().collect(),
            }),
            other => Err(LoadError::Parse {
                reason: format!("expected a JSON object at top level, found {}", kind_of(&other)),
            }),
        }
    }

    pub fn to_json_pretty(&self) -> Result<String, LoadError> {
        Ok(serde_json::to_string_pretty(&self.entries)?)
    }

    #[inline]
    pub fn contains_key(&self, key: &str) -> bool {
        self.entries.contains_key(key)
    }

    pub fn keys(&self) -> impl Iterator<Item = &str> {
        self.entries.keys().map(String::as_str)
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Decode the entry stored under `key`.
    pub fn entry(&self, key: &str) -> Result<MatrixEntry, LoadError> {
        let raw = self.entries.get(key).ok_or_else(|| LoadError::MissingKey {
            key: key.to_string(),
        })?;
        MatrixEntry::deserialize(raw).map_err(|e| LoadError::InvalidEntry {
            key: key.to_string(),
            reason: e.to_string(),
        })
    }

    /// Insert or replace an entry.
    ///
    /// JSON has no NaN or infinity (serde_json writes them as `null`), so an
    /// entry holding a non-finite value is rejected and the document is left
    /// unchanged.
    pub fn insert(
        &mut self,
        key: impl Into<String>,
        entry: &MatrixEntry,
    ) -> Result<(), LoadError> {
        let key = key.into();
        if let Some(pos) = entry.data().iter().position(|v| !v.is_finite()) {
            return Err(LoadError::InvalidEntry {
                key,
                reason: format!("element {pos} is not finite"),
            });
        }
        let value = serde_json::to_value(entry)?;
        self.entries.insert(key, value);
        Ok(())
    }

    pub fn with_entry(
        mut self,
        key: impl Into<String>,
        entry: &MatrixEntry,
    ) -> Result<Self, LoadError> {
        self.insert(key, entry)?;
        Ok(self)
    }
}

fn kind_of(v: &JsonValue) -> &'static str {
    match v {
        JsonValue::Null => "null",
        JsonValue::Bool(_) => "a boolean",
        JsonValue::Number(_) => "a number",
        JsonValue::String(_) => "a string",
        JsonValue::Array(_) => "an array",
        JsonValue::Object(_) => "an object",
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn entries_decode_independently() {
        let doc = MatrixDocument::from_json(
            r#"{ "good": [[1, 2], [3, 4]], "bad": "not a matrix", "note": 3 }"#,
        )
        .unwrap();
        assert_eq!(doc.len(), 3);
        assert_eq!(doc.entry("good").unwrap().shape(), (2, 2));
        assert!(matches!(
            doc.entry("bad"),
            Err(LoadError::InvalidEntry { .. })
        ));
        assert!(matches!(
            doc.entry("absent"),
            Err(LoadError::MissingKey { .. })
        ));
    }

    #[test]
    fn top_level_must_be_an_object() {
        let err = MatrixDocument::from_json("[1, 2, 3]").unwrap_err();
        assert!(matches!(err, LoadError::Parse { .. }));
        assert!(err.to_string().contains("an array"));
    }

    #[test]
    fn inserted_entries_survive_a_json_round_trip() {
        let m = MatrixEntry::from_rows(&[[1.0, 2.0, 3.0]]);
        let doc = MatrixDocument::new().with_entry("T", &m).unwrap();
        let text = doc.to_json_pretty().unwrap();
        let back = MatrixDocument::from_json(&text).unwrap();
        assert_eq!(back.entry("T").unwrap(), m);
    }

    #[test]
    fn non_finite_entries_are_not_inserted() {
        let mut doc = MatrixDocument::new();
        let bad = MatrixEntry::from_rows(&[[1.0, f64::NAN, 3.0]]);
        let err = doc.insert("T", &bad).unwrap_err();
        assert_eq!(
            err,
            LoadError::InvalidEntry {
                key: "T".into(),
                reason: "element 1 is not finite".into(),
            }
        );
        assert!(!doc.contains_key("T"));

        let inf = MatrixEntry::from_rows(&[[f64::INFINITY]]);
        assert!(MatrixDocument::new().with_entry("M", &inf).is_err());
    }
}
