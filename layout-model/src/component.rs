//! The Component Model
//!
//!     A [Component] is the single node type of the canonical layout tree. Every dialect
//!     parser produces a forest of components and every converter consumes one, so this is
//!     the only structure the dialects have in common.
//!
//! Shape
//!
//!     container
//!       └── row
//!             └── column (width: "50%")
//!                   └── heading | text | image | button | ... (widgets)
//!
//!     The nesting above is conventional, not enforced: parsers keep whatever structure the
//!     source had, and converters re-nest to satisfy their own dialect's rules.
//!
//! Ownership
//!
//!     A component owns its children exclusively. There are no parent pointers, so the tree
//!     is acyclic by construction and can be handed to any number of converters by shared
//!     reference.
//!
//! Identity
//!
//!     Ids come from a process-wide atomic counter and are never reused. They are assigned at
//!     construction and cannot be changed afterwards; deserializing a tree assigns fresh ones.

pub mod attributes;
pub mod kind;
pub mod metadata;

pub use attributes::{AttrKey, AttrValue, Attributes, Styles};
pub use kind::{Category, ComponentType};
pub use metadata::Metadata;

use crate::error::ValidationError;
use crate::units::parse_percentage;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::sync::atomic::{AtomicU64, Ordering};

static NEXT_ID: AtomicU64 = AtomicU64::new(1);

/// Deepest nesting parsers build and converters accept. Parsers stop descending at this
/// level and report it; the registry rejects deeper trees before converting them.
pub const MAX_DEPTH: usize = 100;

/// Process-unique component identifier.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct ComponentId(u64);

impl ComponentId {
    pub fn next() -> Self {
        ComponentId(NEXT_ID.fetch_add(1, Ordering::Relaxed))
    }

    pub fn get(&self) -> u64 {
        self.0
    }
}

impl fmt::Display for ComponentId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "c{}", self.0)
    }
}

/// A node of the canonical layout tree.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Component {
    #[serde(skip_deserializing, default = "ComponentId::next")]
    id: ComponentId,
    #[serde(rename = "type")]
    pub kind: ComponentType,
    #[serde(default, skip_serializing_if = "Attributes::is_empty")]
    pub attributes: Attributes,
    #[serde(default, skip_serializing_if = "Styles::is_empty")]
    pub styles: Styles,
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub content: String,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub children: Vec<Component>,
    #[serde(default)]
    pub metadata: Metadata,
}

impl Component {
    pub fn new(kind: ComponentType) -> Self {
        Self {
            id: ComponentId::next(),
            kind,
            attributes: Attributes::new(),
            styles: Styles::new(),
            content: String::new(),
            children: Vec::new(),
            metadata: Metadata::default(),
        }
    }

    pub fn id(&self) -> ComponentId {
        self.id
    }

    pub fn category(&self) -> Category {
        self.kind.category()
    }

    pub fn with_content(mut self, content: impl Into<String>) -> Self {
        self.content = content.into();
        self
    }

    pub fn with_attr(mut self, key: AttrKey, value: impl Into<AttrValue>) -> Self {
        self.attributes.insert(key, value);
        self
    }

    pub fn with_style(mut self, property: impl Into<String>, value: impl Into<String>) -> Self {
        self.styles.insert(property.into(), value.into());
        self
    }

    pub fn with_child(mut self, child: Component) -> Self {
        self.children.push(child);
        self
    }

    pub fn with_children(mut self, children: impl IntoIterator<Item = Component>) -> Self {
        self.children.extend(children);
        self
    }

    pub fn with_metadata(mut self, metadata: Metadata) -> Self {
        self.metadata = metadata;
        self
    }

    /// Width as a number of percent, when the node carries one.
    pub fn width_percent(&self) -> Option<f64> {
        self.attributes
            .get(&AttrKey::Width)
            .and_then(|v| parse_percentage(&v.to_plain_string()))
    }

    /// Check this node and every descendant.
    pub fn validate(&self) -> Result<(), ValidationError> {
        if let Some(value) = self.attributes.get(&AttrKey::Width) {
            let raw = value.to_plain_string();
            match parse_percentage(&raw) {
                Some(p) if (0.0..=100.0).contains(&p) => {}
                _ => {
                    return Err(ValidationError::InvalidWidth {
                        id: self.id,
                        value: raw,
                    })
                }
            }
        }
        if let Some(level) = self.attributes.get(&AttrKey::Level) {
            let raw = level.to_plain_string();
            if !is_heading_level(&raw) {
                return Err(ValidationError::InvalidLevel {
                    id: self.id,
                    value: raw,
                });
            }
        }
        self.children.iter().try_for_each(Component::validate)
    }

    pub fn is_valid(&self) -> bool {
        self.validate().is_ok()
    }

    /// Number of nodes in this subtree, including itself.
    /// Levels in this subtree, counting this node. Computed without recursion.
    pub fn depth(&self) -> usize {
        let mut deepest = 0;
        let mut stack = vec![(self, 1)];
        while let Some((node, level)) = stack.pop() {
            deepest = deepest.max(level);
            stack.extend(node.children.iter().map(|child| (child, level + 1)));
        }
        deepest
    }

    pub fn node_count(&self) -> usize {
        1 + self.children.iter().map(Component::node_count).sum::<usize>()
    }

    /// Depth-first, pre-order walk over this subtree.
    pub fn walk(&self) -> Walk<'_> {
        Walk { stack: vec![self] }
    }
}

/// Pre-order iterator over a subtree.
pub struct Walk<'a> {
    stack: Vec<&'a Component>,
}

impl<'a> Iterator for Walk<'a> {
    type Item = &'a Component;

    fn next(&mut self) -> Option<Self::Item> {
        let node = self.stack.pop()?;
        self.stack.extend(node.children.iter().rev());
        Some(node)
    }
}

fn is_heading_level(raw: &str) -> bool {
    matches!(raw, "h1" | "h2" | "h3" | "h4" | "h5" | "h6")
}

#[cfg(test)]
mod tests {
    use super::*;

    fn column(width: &str) -> Component {
        Component::new(ComponentType::Column).with_attr(AttrKey::Width, width)
    }

    #[test]
    fn test_ids_are_unique() {
        let a = Component::new(ComponentType::Text);
        let b = Component::new(ComponentType::Text);
        assert_ne!(a.id(), b.id());
    }

    #[test]
    fn test_category_is_derived() {
        let node = Component::new(ComponentType::Button);
        assert_eq!(node.category(), Category::Interactive);
    }

    #[test]
    fn test_validity_is_a_conjunction() {
        let good = Component::new(ComponentType::Row)
            .with_child(column("50%"))
            .with_child(column("50%"));
        assert!(good.is_valid());

        let bad = Component::new(ComponentType::Row)
            .with_child(column("50%"))
            .with_child(Component::new(ComponentType::Column).with_child(column("150%")));
        assert!(!bad.is_valid());
        assert!(matches!(
            bad.validate(),
            Err(ValidationError::InvalidWidth { .. })
        ));
    }

    #[test]
    fn test_invalid_level() {
        let node = Component::new(ComponentType::Heading).with_attr(AttrKey::Level, "h9");
        assert!(matches!(
            node.validate(),
            Err(ValidationError::InvalidLevel { .. })
        ));
    }

    #[test]
    fn test_walk_is_preorder() {
        let tree = Component::new(ComponentType::Row)
            .with_child(column("50%").with_child(Component::new(ComponentType::Heading)))
            .with_child(column("50%"));
        let kinds: Vec<_> = tree.walk().map(|c| c.kind).collect();
        assert_eq!(
            kinds,
            vec![
                ComponentType::Row,
                ComponentType::Column,
                ComponentType::Heading,
                ComponentType::Column
            ]
        );
        assert_eq!(tree.node_count(), 4);
        assert_eq!(tree.depth(), 3);
    }

    #[test]
    fn test_deserialize_assigns_fresh_ids() {
        let original = Component::new(ComponentType::Text).with_content("Hello");
        let json = serde_json::to_string(&original).unwrap();
        let restored: Component = serde_json::from_str(&json).unwrap();
        assert_eq!(restored.content, "Hello");
        assert_eq!(restored.kind, ComponentType::Text);
        assert_ne!(restored.id(), original.id());
    }

    #[test]
    fn test_width_percent() {
        assert_eq!(column("33.33%").width_percent(), Some(33.33));
        assert_eq!(Component::new(ComponentType::Column).width_percent(), None);
    }
}
