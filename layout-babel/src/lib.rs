//! Page-builder dialect translation
//!
//!     This crate reads page layouts written for one page builder and writes them for
//!     another. Every dialect parses into the canonical tree of layout-model and converts out
//!     of it, so N dialects need N parsers and N converters rather than N² translators.
//!
//! Architecture
//!
//!     - Dialect trait: uniform interface for all dialects (validity check, parse, convert)
//!     - DialectRegistry: discovery, dispatch, translation and batch conversion
//!     - Dialect implementations: one module per page builder
//!     - confidence: advisory scoring of a translation
//!
//!     This is a pure lib: no code here supposes a shell environment, files or a logging
//!     subscriber. Callers install their own tracing subscriber if they want the spans.
//!
//!     The file structure:
//!     .
//!     ├── error.rs
//!     ├── dialect.rs              # Dialect trait, Content/Output, options
//!     ├── registry.rs             # DialectRegistry
//!     ├── confidence.rs
//!     ├── common
//!     │   ├── rules.rs            # element and attribute tables
//!     │   ├── values.rs           # native value codec
//!     │   ├── structure.rs        # re-nesting for a target
//!     │   ├── dispatch.rs         # element choice and fallback blocks
//!     │   └── bracket             # shared bracket-tag parser and emitter
//!     ├── dialects
//!     │   ├── <bracket dialect>
//!     │   │   ├── tables.rs       # vocabulary and grammar
//!     │   │   └── mod.rs
//!     │   └── <json dialect>
//!     │       ├── tables.rs
//!     │       ├── parser.rs
//!     │       ├── converter.rs
//!     │       └── mod.rs
//!     ├── lib.rs
//!
//! Testing
//!     tests
//!     ├── <topic>.rs
//!     └── fixtures
//!         └── <docname>.<dialect>.(txt|json)
//!
//! Lossiness
//!
//!     Dialects do not share a vocabulary, so translation between two of them is lossy in
//!     general: a type the target cannot express becomes a text block marked
//!     `untranslated-<type>`, and attributes without a native slot are dropped. Writing a
//!     tree back into the dialect it came from restores native-only attributes and unknown
//!     elements from the metadata the parser kept.

pub mod common;
pub mod confidence;
pub mod dialect;
pub mod dialects;
pub mod error;
pub mod registry;

pub use confidence::{ConfidenceSettings, FallbackScores};
pub use dialect::{
    Content, Conversion, ConvertOptions, Dialect, EngineOptions, Output, ParseReport, Syntax,
};
pub use error::BabelError;
pub use registry::{DialectRegistry, Translation};

use layout_model::Component;
use once_cell::sync::Lazy;

static DEFAULT_REGISTRY: Lazy<DialectRegistry> = Lazy::new(DialectRegistry::with_defaults);

/// The registry behind the free functions: built-in dialects, default options.
pub fn default_registry() -> &'static DialectRegistry {
    &DEFAULT_REGISTRY
}

/// Parse `content` as `dialect`. Malformed input gives `Ok(vec![])`.
pub fn parse(dialect: &str, content: impl Into<Content>) -> Result<Vec<Component>, BabelError> {
    DEFAULT_REGISTRY.parse(dialect, &content.into())
}

pub fn convert(dialect: &str, components: &[Component]) -> Result<Output, BabelError> {
    DEFAULT_REGISTRY.convert(dialect, components)
}

/// Parse as `source` and convert into `target`.
pub fn translate(source: &str, target: &str, content: impl Into<Content>) -> Result<Translation, BabelError> {
    DEFAULT_REGISTRY.translate(source, target, &content.into())
}

pub fn is_valid_content(dialect: &str, content: impl Into<Content>) -> Result<bool, BabelError> {
    DEFAULT_REGISTRY.is_valid_content(dialect, &content.into())
}

pub fn width_to_percentage(token: &str, dialect: &str) -> Result<String, BabelError> {
    DEFAULT_REGISTRY.width_to_percentage(token, dialect)
}

pub fn percentage_to_dialect_token(percentage: &str, dialect: &str) -> Result<String, BabelError> {
    DEFAULT_REGISTRY.percentage_to_dialect_token(percentage, dialect)
}
