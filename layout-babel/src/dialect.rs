//! Dialect trait definition
//!
//! Every page-builder dialect implements [Dialect]: a name, a shape check, a parser into the
//! canonical tree and a converter out of it. Inputs and outputs are either text (bracket-tag
//! dialects) or JSON (JSON-tree dialects), so both directions go through the small
//! [Content] and [Output] enums.

use crate::confidence::ConfidenceSettings;
use layout_model::{Component, ComponentType, WidthTable};
use serde::{Deserialize, Serialize};
use serde_json::Value;

/// How a dialect is written
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Syntax {
    BracketTags,
    JsonTree,
}

/// Input handed to a parser
#[derive(Debug, Clone, PartialEq)]
pub enum Content {
    Text(String),
    Json(Value),
}

impl Content {
    /// The text form: bracket markup, or a JSON string value.
    pub fn as_text(&self) -> Option<&str> {
        match self {
            Content::Text(text) => Some(text),
            Content::Json(Value::String(text)) => Some(text),
            Content::Json(_) => None,
        }
    }
}

impl From<&str> for Content {
    fn from(value: &str) -> Self {
        Content::Text(value.to_string())
    }
}

impl From<String> for Content {
    fn from(value: String) -> Self {
        Content::Text(value)
    }
}

impl From<Value> for Content {
    fn from(value: Value) -> Self {
        Content::Json(value)
    }
}

/// Result of a conversion
#[derive(Debug, Clone, PartialEq)]
pub enum Output {
    Text(String),
    Json(Value),
}

impl Output {
    pub fn as_text(&self) -> Option<&str> {
        match self {
            Output::Text(text) => Some(text),
            Output::Json(_) => None,
        }
    }

    pub fn as_json(&self) -> Option<&Value> {
        match self {
            Output::Json(value) => Some(value),
            Output::Text(_) => None,
        }
    }

    /// Render as a string; `pretty` indents JSON output.
    pub fn to_text(&self, pretty: bool) -> String {
        match self {
            Output::Text(text) => text.clone(),
            Output::Json(value) if pretty => format!("{:#}", value),
            Output::Json(value) => value.to_string(),
        }
    }

    /// Feed this output back into a parser.
    pub fn into_content(self) -> Content {
        match self {
            Output::Text(text) => Content::Text(text),
            Output::Json(value) => Content::Json(value),
        }
    }
}

/// Converter options
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ConvertOptions {
    /// Indent JSON when an output is rendered to text
    pub pretty_json: bool,
    /// Write generated native ids
    pub emit_ids: bool,
}

impl Default for ConvertOptions {
    fn default() -> Self {
        Self {
            pretty_json: false,
            emit_ids: true,
        }
    }
}

/// Everything a registry needs to know about how to run
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct EngineOptions {
    pub convert: ConvertOptions,
    pub confidence: ConfidenceSettings,
}

/// Parser output with the problems it recovered from
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ParseReport {
    pub components: Vec<Component>,
    pub warnings: Vec<String>,
}

impl ParseReport {
    pub fn rejected(reason: impl Into<String>) -> Self {
        Self {
            components: Vec::new(),
            warnings: vec![reason.into()],
        }
    }
}

/// Converter output plus the types that went to the fallback block
#[derive(Debug, Clone, PartialEq)]
pub struct Conversion {
    pub output: Output,
    pub fallbacks: Vec<ComponentType>,
}

/// A page-builder dialect
pub trait Dialect: Send + Sync {
    /// Registry name ("divi", "elementor", ...)
    fn name(&self) -> &str;

    fn description(&self) -> &str {
        ""
    }

    fn syntax(&self) -> Syntax;

    /// Native widths this dialect can express
    fn width_table(&self) -> &WidthTable;

    /// Whether `kind` has a native element (otherwise it goes to the fallback block)
    fn supports(&self, kind: ComponentType) -> bool;

    /// Cheap structural check; parsing invalid content yields an empty forest.
    fn is_valid_content(&self, content: &Content) -> bool;

    fn parse(&self, content: &Content) -> ParseReport;

    fn convert(&self, components: &[Component], options: &ConvertOptions) -> Conversion;
}
