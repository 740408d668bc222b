//! JSON-tree documents in and out of [Content]

use crate::dialect::Content;
use layout_model::json::read_json;
use serde_json::Value;
use std::borrow::Cow;

/// The JSON value behind `content`. Text (and JSON string values) is parsed; anything that
/// does not parse is `None`.
pub fn document(content: &Content) -> Option<Cow<'_, Value>> {
    match content {
        Content::Json(Value::String(text)) | Content::Text(text) => {
            let trimmed = text.trim_start();
            if !(trimmed.starts_with('{') || trimmed.starts_with('[')) {
                return None;
            }
            match read_json(text) {
                Ok(value) => Some(Cow::Owned(value)),
                Err(err) => {
                    tracing::debug!(error = %err, "content is not JSON");
                    None
                }
            }
        }
        Content::Json(value) => Some(Cow::Borrowed(value)),
    }
}
