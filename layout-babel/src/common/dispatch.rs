//! Choosing what a converter writes for one node

use super::content::join_title_body;
use super::rules::{ElementSpec, Vocabulary};
use layout_model::{AttrKey, Component, ComponentType};

/// What to emit for a component
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Target<'a> {
    Element(&'static ElementSpec),
    /// Same-dialect node the tables do not know: write it back under its own name
    Verbatim(&'a str),
    /// No native element for this type
    Fallback,
}

/// Resolve the target element for `component` under `parent`.
///
/// A native name remembered from the same dialect is preferred; unknown nodes from the same
/// dialect are written verbatim, and from anywhere else they go to the fallback block.
pub fn resolve<'a>(
    vocabulary: &Vocabulary,
    dialect: &str,
    component: &'a Component,
    parent: Option<&str>,
    inner: bool,
) -> Target<'a> {
    let remembered = component
        .metadata
        .native_name
        .as_deref()
        .filter(|_| component.metadata.is_from(dialect));

    if component.kind == ComponentType::Unknown {
        return match remembered {
            Some(name) => Target::Verbatim(name),
            None => Target::Fallback,
        };
    }

    match vocabulary.element_for(component.kind, parent, inner, remembered) {
        Some(spec) => Target::Element(spec),
        None => Target::Fallback,
    }
}

/// Body of a fallback block: the heading, if any, joined with the content.
pub fn fallback_content(component: &Component, content: &str) -> String {
    let heading = component
        .attributes
        .get(&AttrKey::Heading)
        .map(|h| h.to_plain_string())
        .unwrap_or_default();
    join_title_body(&heading, content)
}

/// `untranslated-<type>` marker class.
pub fn fallback_marker(kind: ComponentType) -> String {
    format!("untranslated-{}", kind)
}
