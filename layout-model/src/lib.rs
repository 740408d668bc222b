//! # layout-model
//!
//! The dialect-independent half of the layout translation engine.
//!
//! File Layout
//!
//!     src
//!       ├── component     The canonical tree (Component, kinds, attributes, metadata)
//!       ├── tokenizer     Hierarchical bracket-tag scanner, attribute lexer and writer
//!       ├── json          Shape checks and lenient readers for JSON-tree dialects
//!       ├── units         Width tables and percentage conversion
//!       └── error         Error types
//!
//!     Nothing here knows about a particular page builder. Dialects live in layout-babel and
//!     are built from these pieces: bracket-tag dialects on top of the tokenizer, JSON-tree
//!     dialects on top of the JSON helpers, and all of them on top of the component model
//!     and unit tables.

pub mod component;
pub mod error;
pub mod json;
pub mod tokenizer;
pub mod units;

pub use component::{
    AttrKey, AttrValue, Attributes, Category, Component, ComponentId, ComponentType, Metadata,
    Styles, MAX_DEPTH,
};
pub use error::{JsonError, ShapeError, ValidationError};
pub use tokenizer::{tokenize, TagNode, Tokenized, TokenizerOptions, TokenizerWarning};
pub use units::{format_percentage, parse_percentage, WidthTable};
