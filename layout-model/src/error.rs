//! Error types for the component model and the JSON helpers

use crate::component::ComponentId;

/// A component (or one of its descendants) breaks a model invariant.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum ValidationError {
    #[error("component {id}: width '{value}' is not a percentage between 0 and 100")]
    InvalidWidth { id: ComponentId, value: String },

    #[error("component {id}: heading level '{value}' is not h1..h6")]
    InvalidLevel { id: ComponentId, value: String },
}

/// A JSON document does not have the shape a dialect requires.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum ShapeError {
    #[error("{path}: expected an object")]
    NotAnObject { path: String },

    #[error("{path}: missing required key '{key}'")]
    MissingKey { path: String, key: String },

    #[error("{path}: key '{key}' should be {expected}")]
    WrongKind {
        path: String,
        key: String,
        expected: &'static str,
    },

    #[error("{path}: {message}")]
    Invalid { path: String, message: String },

    #[error("{path}: nested deeper than {limit} levels")]
    TooDeep { path: String, limit: usize },
}

/// Content could not be read as JSON at all.
#[derive(Debug, thiserror::Error)]
pub enum JsonError {
    #[error("invalid JSON: {0}")]
    Syntax(#[from] serde_json::Error),
}
