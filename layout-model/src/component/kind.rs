//! Component kinds and categories
//!
//!     Every node of the tree carries a [ComponentType]. The set is closed: dialect parsers
//!     map their native element names onto it, and anything they cannot place becomes
//!     [ComponentType::Unknown] (the native name survives in the node's metadata).
//!
//!     The [Category] of a node is never stored. It is derived from the type with a static
//!     match and is only used for grouping and for scoring fallback conversions.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Canonical element kind.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ComponentType {
    Container,
    Row,
    Column,
    Heading,
    Text,
    Image,
    Button,
    Card,
    Tabs,
    Tab,
    Accordion,
    AccordionItem,
    Divider,
    Spacer,
    Video,
    Icon,
    Gallery,
    Code,
    Testimonial,
    Counter,
    ProgressBar,
    Form,
    SocialIcons,
    Menu,
    Map,
    #[serde(other)]
    Unknown,
}

impl ComponentType {
    /// Every kind, in declaration order.
    pub const ALL: [ComponentType; 26] = [
        ComponentType::Container,
        ComponentType::Row,
        ComponentType::Column,
        ComponentType::Heading,
        ComponentType::Text,
        ComponentType::Image,
        ComponentType::Button,
        ComponentType::Card,
        ComponentType::Tabs,
        ComponentType::Tab,
        ComponentType::Accordion,
        ComponentType::AccordionItem,
        ComponentType::Divider,
        ComponentType::Spacer,
        ComponentType::Video,
        ComponentType::Icon,
        ComponentType::Gallery,
        ComponentType::Code,
        ComponentType::Testimonial,
        ComponentType::Counter,
        ComponentType::ProgressBar,
        ComponentType::Form,
        ComponentType::SocialIcons,
        ComponentType::Menu,
        ComponentType::Map,
        ComponentType::Unknown,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            ComponentType::Container => "container",
            ComponentType::Row => "row",
            ComponentType::Column => "column",
            ComponentType::Heading => "heading",
            ComponentType::Text => "text",
            ComponentType::Image => "image",
            ComponentType::Button => "button",
            ComponentType::Card => "card",
            ComponentType::Tabs => "tabs",
            ComponentType::Tab => "tab",
            ComponentType::Accordion => "accordion",
            ComponentType::AccordionItem => "accordion_item",
            ComponentType::Divider => "divider",
            ComponentType::Spacer => "spacer",
            ComponentType::Video => "video",
            ComponentType::Icon => "icon",
            ComponentType::Gallery => "gallery",
            ComponentType::Code => "code",
            ComponentType::Testimonial => "testimonial",
            ComponentType::Counter => "counter",
            ComponentType::ProgressBar => "progress_bar",
            ComponentType::Form => "form",
            ComponentType::SocialIcons => "social_icons",
            ComponentType::Menu => "menu",
            ComponentType::Map => "map",
            ComponentType::Unknown => "unknown",
        }
    }

    pub fn category(&self) -> Category {
        match self {
            ComponentType::Container | ComponentType::Row | ComponentType::Column => {
                Category::Layout
            }
            ComponentType::Heading
            | ComponentType::Text
            | ComponentType::Card
            | ComponentType::Code
            | ComponentType::Testimonial => Category::Content,
            ComponentType::Image
            | ComponentType::Video
            | ComponentType::Icon
            | ComponentType::Gallery => Category::Media,
            ComponentType::Button
            | ComponentType::Tabs
            | ComponentType::Tab
            | ComponentType::Accordion
            | ComponentType::AccordionItem => Category::Interactive,
            ComponentType::Form => Category::Form,
            ComponentType::Counter | ComponentType::ProgressBar | ComponentType::Map => {
                Category::Data
            }
            ComponentType::SocialIcons => Category::Social,
            ComponentType::Menu => Category::Navigation,
            ComponentType::Divider | ComponentType::Spacer | ComponentType::Unknown => {
                Category::General
            }
        }
    }

    /// Structural kinds are re-nested by converters instead of being looked up as widgets.
    pub fn is_structural(&self) -> bool {
        matches!(
            self,
            ComponentType::Container | ComponentType::Row | ComponentType::Column
        )
    }
}

impl fmt::Display for ComponentType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for ComponentType {
    type Err = std::convert::Infallible;

    /// Never fails: names outside the vocabulary map to `Unknown`.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Ok(ComponentType::ALL
            .iter()
            .copied()
            .find(|kind| kind.as_str() == s)
            .unwrap_or(ComponentType::Unknown))
    }
}

/// Coarse grouping of component kinds.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Category {
    Layout,
    Content,
    Media,
    Interactive,
    Form,
    Data,
    Social,
    Navigation,
    General,
}

impl Category {
    pub fn as_str(&self) -> &'static str {
        match self {
            Category::Layout => "layout",
            Category::Content => "content",
            Category::Media => "media",
            Category::Interactive => "interactive",
            Category::Form => "form",
            Category::Data => "data",
            Category::Social => "social",
            Category::Navigation => "navigation",
            Category::General => "general",
        }
    }
}

impl fmt::Display for Category {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_names_round_trip() {
        for kind in ComponentType::ALL {
            assert_eq!(kind.as_str().parse::<ComponentType>().unwrap(), kind);
        }
    }

    #[test]
    fn test_unknown_name() {
        let kind: ComponentType = "carousel".parse().unwrap();
        assert_eq!(kind, ComponentType::Unknown);
    }

    #[test]
    fn test_categories() {
        assert_eq!(ComponentType::Column.category(), Category::Layout);
        assert_eq!(ComponentType::Gallery.category(), Category::Media);
        assert_eq!(ComponentType::AccordionItem.category(), Category::Interactive);
        assert_eq!(ComponentType::Menu.category(), Category::Navigation);
        assert_eq!(ComponentType::Unknown.category(), Category::General);
    }

    #[test]
    fn test_serde_names() {
        let json = serde_json::to_string(&ComponentType::ProgressBar).unwrap();
        assert_eq!(json, "\"progress_bar\"");
        let kind: ComponentType = serde_json::from_str("\"slider\"").unwrap();
        assert_eq!(kind, ComponentType::Unknown);
    }
}
