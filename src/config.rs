use serde::{Deserialize, Serialize};
use typed_builder::TypedBuilder;

use crate::escape::DEFAULT_DELIMITER;
use crate::store::StoreKind;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, TypedBuilder)]
#[serde(rename_all = "camelCase", default)]
pub struct NameConfig {
    #[builder(default = DEFAULT_DELIMITER)]
    pub delimiter: char,
    #[builder(default)]
    pub store: StoreKind,
}

impl Default for NameConfig {
    fn default() -> Self {
        Self {
            delimiter: DEFAULT_DELIMITER,
            store: StoreKind::Array,
        }
    }
}

impl NameConfig {
    pub fn with_delimiter(delimiter: char) -> Self {
        Self {
            delimiter,
            ..Self::default()
        }
    }

    /// Reads a config such as `{"delimiter": "/", "store": "delimited"}`.
    /// Missing fields fall back to the defaults.
    pub fn from_json(json: &str) -> Result<Self, serde_json::Error> {
        serde_json::from_str(json)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn builder_defaults_match_default() {
        assert_eq!(NameConfig::builder().build(), NameConfig::default());
    }

    #[test]
    fn builder_overrides() {
        let config = NameConfig::builder()
            .delimiter('/')
            .store(StoreKind::Delimited)
            .build();

        assert_eq!(config.delimiter, '/');
        assert_eq!(config.store, StoreKind::Delimited);
    }

    #[test]
    fn json_fills_missing_fields() {
        let config = NameConfig::from_json(r##"{"delimiter": "#"}"##).unwrap();
        assert_eq!(config, NameConfig::with_delimiter('#'));

        let config = NameConfig::from_json(r#"{"store": "delimited"}"#).unwrap();
        assert_eq!(config.delimiter, DEFAULT_DELIMITER);
        assert_eq!(config.store, StoreKind::Delimited);
    }

    #[test]
    fn json_rejects_multi_character_delimiter() {
        assert!(NameConfig::from_json(r#"{"delimiter": "::"}"#).is_err());
    }
}
