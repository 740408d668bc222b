//! Machinery shared by the dialect implementations
//!
//!     rules.rs      element and attribute tables
//!     values.rs     native value encodings (links, CSS blocks, spacing, objects)
//!     structure.rs  re-nesting a tree for a target dialect
//!     dispatch.rs   choosing the native element for a component
//!     content.rs    title/body splitting
//!     ids.rs        native id generation
//!     tree.rs       JSON document intake
//!     bracket/      the shared bracket-tag parser and emitter

pub mod bracket;
pub mod content;
pub mod dispatch;
pub mod ids;
pub mod rules;
pub mod structure;
pub mod tree;
pub mod values;
