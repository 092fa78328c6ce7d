//! JSON parsing for config structs.

use serde::de::DeserializeOwned;
use serde_json::Value as JsonValue;

use crate::error::ConfigError;

/// Parse a config struct from a JSON object.
///
/// Derived struct deserializers also accept the positional array form, which
/// with `#[serde(default)]` would silently map `[1, 2]` onto the first fields.
/// Configs are keyed, so anything other than an object is rejected here.
pub fn parse_config_object<T: DeserializeOwned>(s: &str) -> Result<T, ConfigError> {
    match serde_json::from_str::<JsonValue>(s)? {
        value @ JsonValue::Object(_) => Ok(serde_json::from_value(value)?),
        _ => Err(ConfigError::Parse {
            reason: "expected a JSON object".into(),
        }),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde::Deserialize;

    #[derive(Debug, Default, Deserialize, PartialEq)]
    #[serde(default)]
    struct Sample {
        a: i64,
        b: bool,
    }

    #[test]
    fn objects_parse_with_defaults() {
        let s: Sample = parse_config_object(r#"{ "b": true }"#).unwrap();
        assert_eq!(s, Sample { a: 0, b: true });
    }

    #[test]
    fn positional_and_scalar_forms_are_rejected() {
        for text in ["[1, true]", "[]", "3", "null", "\"a\""] {
            assert!(
                matches!(parse_config_object::<Sample>(text), Err(ConfigError::Parse { .. })),
                "{text}"
            );
        }
    }
}
