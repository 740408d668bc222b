//! Provenance carried by every parsed node

use serde::{Deserialize, Serialize};

/// Where a component came from.
///
/// `raw_attributes` is the native attribute (or settings) map exactly as the parser saw it;
/// it is never rewritten, so a converter targeting the same dialect can restore anything the
/// canonical attributes could not express.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Metadata {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub source_dialect: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub native_name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub native_id: Option<String>,
    #[serde(default, skip_serializing_if = "serde_json::Map::is_empty")]
    pub raw_attributes: serde_json::Map<String, serde_json::Value>,
}

impl Metadata {
    pub fn from_dialect(dialect: &str, native_name: &str) -> Self {
        Self {
            source_dialect: Some(dialect.to_string()),
            native_name: Some(native_name.to_string()),
            ..Self::default()
        }
    }

    /// True when the node was parsed from `dialect`.
    pub fn is_from(&self, dialect: &str) -> bool {
        self.source_dialect.as_deref() == Some(dialect)
    }
}
