//! Declarative dialect tables
//!
//!     A dialect is mostly data. Its element table says which native names map to which
//!     [ComponentType], where each element keeps its content, and how that content is shaped.
//!     Its attribute table says which native keys map to which canonical [AttrKey], and how
//!     the value is encoded ([ValueKind]). Parsers read the tables forwards, converters read
//!     them backwards.
//!
//! Lookup Order
//!
//!     Attribute rules may be scoped to one element. Scoped rules are consulted before
//!     dialect-wide ones, so `src` can mean a video URL on a video element and an image URL
//!     everywhere else.
//!
//!     Element specs may be restricted to a set of parent elements (WPBakery's
//!     `vc_tta_section` is a tab under `vc_tta_tabs` and an accordion item under
//!     `vc_tta_accordion`) and to a placement (outer rows versus rows nested in a column).

use layout_model::{AttrKey, ComponentType};

/// Where an element keeps its `content`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ContentSource {
    /// Text between the open and close tag (bracket dialects)
    Inner,
    /// A named attribute or setting
    Setting(&'static str),
    /// The inner text is the image URL (Avada image frames); there is no content
    InnerAsImage,
    /// The element carries no content of its own
    None,
}

/// How a content field is shaped.
///
/// `TitleBody` means the dialect has no separate title field for this element: the title
/// and the description share one field, separated by a blank line.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ContentShape {
    Single,
    TitleBody,
}

/// Nesting position a structural element is meant for.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Placement {
    Any,
    /// Top-level rows and their columns
    Outer,
    /// Rows nested inside a column, and their columns
    Inner,
}

impl Placement {
    pub fn accepts(&self, inner: bool) -> bool {
        match self {
            Placement::Any => true,
            Placement::Outer => !inner,
            Placement::Inner => inner,
        }
    }
}

/// One row of an element table
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ElementSpec {
    pub native: &'static str,
    pub kind: ComponentType,
    pub content: ContentSource,
    pub shape: ContentShape,
    pub placement: Placement,
    /// Non-empty: only matches directly under one of these parents
    pub parents: &'static [&'static str],
    /// Never takes a closing tag
    pub void: bool,
}

impl ElementSpec {
    pub const fn new(native: &'static str, kind: ComponentType) -> Self {
        Self {
            native,
            kind,
            content: ContentSource::Inner,
            shape: ContentShape::Single,
            placement: Placement::Any,
            parents: &[],
            void: false,
        }
    }

    pub const fn setting(mut self, key: &'static str) -> Self {
        self.content = ContentSource::Setting(key);
        self
    }

    pub const fn content(mut self, content: ContentSource) -> Self {
        self.content = content;
        self
    }

    pub const fn title_body(mut self) -> Self {
        self.shape = ContentShape::TitleBody;
        self
    }

    pub const fn outer(mut self) -> Self {
        self.placement = Placement::Outer;
        self
    }

    pub const fn inner(mut self) -> Self {
        self.placement = Placement::Inner;
        self
    }

    pub const fn within(mut self, parents: &'static [&'static str]) -> Self {
        self.parents = parents;
        self
    }

    pub const fn void(mut self) -> Self {
        self.void = true;
        self
    }

    fn fits_parent(&self, parent: Option<&str>) -> bool {
        self.parents.is_empty() || parent.is_some_and(|p| self.parents.contains(&p))
    }
}

/// How a native value is encoded.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ValueKind {
    Text,
    /// Dialect boolean tokens
    Bool,
    Number,
    /// Native width token, through the dialect's width table
    Width,
    /// Comma-separated list
    List,
    /// Heading level as a bare number ("2" for h2)
    LevelNumber,
    /// One CSS property in styles
    Style(&'static str),
    /// `prop: value; prop: value`
    InlineCss,
    /// WPBakery `.vc_custom_123{prop: value !important;}`
    VcCss,
    /// Divi `top|right|bottom|left` for the named property
    Spacing(&'static str),
    /// WPBakery `url:...|title:...|target:...|rel:...`
    VcLink,
    /// WPBakery `tag:h2|text_align:left|color:%23333`
    FontContainer,
    /// Divi `url_new_window="on"`
    NewWindow,
    /// `{url, is_external, nofollow}`
    LinkObject,
    /// `{url, id, alt}`
    ImageObject,
    /// `{unit, size}`
    SizeObject,
    /// `{unit, top, right, bottom, left}` for the named property
    Dimensions(&'static str),
    /// `{value, library}`
    IconObject,
    /// `[{id, url}, ...]`
    GalleryArray,
}

const LINK_KEYS: [AttrKey; 3] = [AttrKey::Url, AttrKey::Target, AttrKey::Rel];

impl ValueKind {
    /// Canonical keys filled by this kind besides the rule's own key.
    pub fn covers(&self, own: &AttrKey, key: &AttrKey) -> bool {
        match self {
            ValueKind::VcLink | ValueKind::LinkObject => LINK_KEYS.contains(key),
            ValueKind::FontContainer => matches!(
                key,
                AttrKey::Level | AttrKey::Alignment | AttrKey::TextColor
            ),
            ValueKind::ImageObject => matches!(key, AttrKey::ImageUrl | AttrKey::AltText),
            ValueKind::NewWindow => matches!(key, AttrKey::Target),
            ValueKind::Style(_)
            | ValueKind::InlineCss
            | ValueKind::VcCss
            | ValueKind::Spacing(_)
            | ValueKind::Dimensions(_) => false,
            _ => own == key,
        }
    }

    /// Specificity of this kind for a CSS property; `None` when it does not handle it.
    pub fn style_rank(&self, property: &str) -> Option<u8> {
        match self {
            ValueKind::Style(p) if *p == property => Some(3),
            ValueKind::Spacing(p) | ValueKind::Dimensions(p) if is_box_property(p, property) => {
                Some(2)
            }
            ValueKind::InlineCss | ValueKind::VcCss => Some(1),
            _ => None,
        }
    }

    pub fn is_style(&self) -> bool {
        matches!(
            self,
            ValueKind::Style(_)
                | ValueKind::InlineCss
                | ValueKind::VcCss
                | ValueKind::Spacing(_)
                | ValueKind::Dimensions(_)
        )
    }
}

/// `margin`, `margin-top`, ... for box property `margin`.
pub fn is_box_property(base: &str, property: &str) -> bool {
    property == base
        || property
            .strip_prefix(base)
            .and_then(|rest| rest.strip_prefix('-'))
            .is_some_and(|side| matches!(side, "top" | "right" | "bottom" | "left"))
}

/// Placeholder key of style rules, which write `styles` instead of `attributes`.
pub const STYLE_KEY: AttrKey = AttrKey::Other(String::new());

/// One row of an attribute table
#[derive(Debug, Clone)]
pub struct AttrRule {
    /// Scoped to this element when set
    pub element: Option<&'static str>,
    pub native: &'static str,
    pub key: AttrKey,
    pub kind: ValueKind,
}

impl AttrRule {
    pub const fn global(native: &'static str, key: AttrKey, kind: ValueKind) -> Self {
        Self {
            element: None,
            native,
            key,
            kind,
        }
    }

    /// A rule that writes styles rather than an attribute.
    pub const fn style(native: &'static str, kind: ValueKind) -> Self {
        Self::global(native, STYLE_KEY, kind)
    }

    pub const fn scoped_style(element: &'static str, native: &'static str, kind: ValueKind) -> Self {
        Self::scoped(element, native, STYLE_KEY, kind)
    }

    pub const fn scoped(
        element: &'static str,
        native: &'static str,
        key: AttrKey,
        kind: ValueKind,
    ) -> Self {
        Self {
            element: Some(element),
            native,
            key,
            kind,
        }
    }

    fn applies_to(&self, element: &str) -> bool {
        self.element.map_or(true, |e| e == element)
    }
}

/// Boolean spelling of a dialect
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct BoolStyle {
    pub truthy: &'static str,
    pub falsy: &'static str,
}

impl BoolStyle {
    pub const ON_OFF: BoolStyle = BoolStyle {
        truthy: "on",
        falsy: "off",
    };
    pub const YES_NO: BoolStyle = BoolStyle {
        truthy: "yes",
        falsy: "no",
    };
    pub const YES_EMPTY: BoolStyle = BoolStyle {
        truthy: "yes",
        falsy: "",
    };
    pub const TRUE_FALSE: BoolStyle = BoolStyle {
        truthy: "true",
        falsy: "false",
    };

    pub fn encode(&self, value: bool) -> &'static str {
        if value {
            self.truthy
        } else {
            self.falsy
        }
    }
}

/// Element and attribute tables of one dialect
#[derive(Debug, Clone, Copy)]
pub struct Vocabulary {
    pub elements: &'static [ElementSpec],
    pub attributes: &'static [AttrRule],
}

impl Vocabulary {
    /// Element spec for a native name under `parent`.
    pub fn element(&self, native: &str, parent: Option<&str>) -> Option<&'static ElementSpec> {
        self.elements
            .iter()
            .find(|spec| spec.native == native && spec.fits_parent(parent))
            .or_else(|| self.elements.iter().find(|spec| spec.native == native))
    }

    pub fn knows(&self, native: &str) -> bool {
        self.elements.iter().any(|spec| spec.native == native)
    }

    /// Element to emit for `kind`.
    ///
    /// `preferred` (a native name remembered from the same dialect) wins when it still maps
    /// to `kind`; then specs restricted to `parent`; then unrestricted specs for the
    /// placement.
    pub fn element_for(
        &self,
        kind: ComponentType,
        parent: Option<&str>,
        inner: bool,
        preferred: Option<&str>,
    ) -> Option<&'static ElementSpec> {
        let candidates = || self.elements.iter().filter(move |spec| spec.kind == kind);
        if let Some(name) = preferred {
            if let Some(spec) = candidates()
                .find(|spec| spec.native == name && spec.placement.accepts(inner))
            {
                return Some(spec);
            }
        }
        if let Some(parent) = parent {
            if let Some(spec) = candidates().find(|spec| {
                spec.parents.contains(&parent) && spec.placement.accepts(inner)
            }) {
                return Some(spec);
            }
        }
        candidates()
            .find(|spec| spec.parents.is_empty() && spec.placement.accepts(inner))
            .or_else(|| candidates().find(|spec| spec.parents.is_empty()))
    }

    pub fn supports(&self, kind: ComponentType) -> bool {
        self.elements.iter().any(|spec| spec.kind == kind)
    }

    /// Rule for a native key on `element`.
    pub fn rule_for_native(&self, element: &str, native: &str) -> Option<&'static AttrRule> {
        self.attributes
            .iter()
            .find(|rule| rule.element == Some(element) && rule.native == native)
            .or_else(|| {
                self.attributes
                    .iter()
                    .find(|rule| rule.element.is_none() && rule.native == native)
            })
    }

    /// Rule that writes canonical `key` on `element`.
    pub fn rule_for_key(&self, element: &str, key: &AttrKey) -> Option<&'static AttrRule> {
        self.attributes
            .iter()
            .filter(|rule| rule.applies_to(element) && !rule.kind.is_style())
            .filter(|rule| rule.kind.covers(&rule.key, key))
            .min_by_key(|rule| (rule.element.is_none(), rule.key != *key))
    }

    /// Most specific rule that writes CSS `property` on `element`.
    pub fn rule_for_style(&self, element: &str, property: &str) -> Option<&'static AttrRule> {
        self.attributes
            .iter()
            .filter(|rule| rule.applies_to(element))
            .filter_map(|rule| rule.kind.style_rank(property).map(|rank| (rule, rank)))
            .max_by_key(|(rule, rank)| (*rank, rule.element.is_some()))
            .map(|(rule, _)| rule)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    static ELEMENTS: &[ElementSpec] = &[
        ElementSpec::new("row", ComponentType::Row).outer(),
        ElementSpec::new("row_inner", ComponentType::Row).inner(),
        ElementSpec::new("section", ComponentType::Tab).within(&["tabs"]),
        ElementSpec::new("section", ComponentType::AccordionItem).within(&["accordion"]),
        ElementSpec::new("toggle", ComponentType::AccordionItem),
    ];

    static ATTRIBUTES: &[AttrRule] = &[
        AttrRule::scoped("video", "src", AttrKey::VideoUrl, ValueKind::Text),
        AttrRule::global("src", AttrKey::ImageUrl, ValueKind::Text),
        AttrRule::global("target", AttrKey::Target, ValueKind::Text),
        AttrRule::scoped("button", "link", AttrKey::Url, ValueKind::VcLink),
        AttrRule::style("style", ValueKind::InlineCss),
        AttrRule::style("custom_margin", ValueKind::Spacing("margin")),
        AttrRule::style("margin_top", ValueKind::Style("margin-top")),
    ];

    const VOCAB: Vocabulary = Vocabulary {
        elements: ELEMENTS,
        attributes: ATTRIBUTES,
    };

    #[test]
    fn test_parent_constrained_elements() {
        assert_eq!(
            VOCAB.element("section", Some("tabs")).map(|s| s.kind),
            Some(ComponentType::Tab)
        );
        assert_eq!(
            VOCAB.element("section", Some("accordion")).map(|s| s.kind),
            Some(ComponentType::AccordionItem)
        );
        // Unknown parent: first spec with the name
        assert_eq!(
            VOCAB.element("section", None).map(|s| s.kind),
            Some(ComponentType::Tab)
        );
    }

    #[test]
    fn test_element_for_placement_and_preference() {
        let outer = VOCAB.element_for(ComponentType::Row, None, false, None);
        let inner = VOCAB.element_for(ComponentType::Row, None, true, None);
        assert_eq!(outer.map(|s| s.native), Some("row"));
        assert_eq!(inner.map(|s| s.native), Some("row_inner"));

        let in_accordion =
            VOCAB.element_for(ComponentType::AccordionItem, Some("accordion"), false, None);
        assert_eq!(in_accordion.map(|s| s.native), Some("section"));
        let loose = VOCAB.element_for(ComponentType::AccordionItem, None, false, None);
        assert_eq!(loose.map(|s| s.native), Some("toggle"));
        let remembered =
            VOCAB.element_for(ComponentType::AccordionItem, None, false, Some("toggle"));
        assert_eq!(remembered.map(|s| s.native), Some("toggle"));
    }

    #[test]
    fn test_scoped_rules_win() {
        let rule = VOCAB.rule_for_native("video", "src").unwrap();
        assert_eq!(rule.key, AttrKey::VideoUrl);
        let rule = VOCAB.rule_for_native("image", "src").unwrap();
        assert_eq!(rule.key, AttrKey::ImageUrl);
    }

    #[test]
    fn test_compound_rule_covers_target() {
        let rule = VOCAB.rule_for_key("button", &AttrKey::Target).unwrap();
        assert_eq!(rule.native, "link");
        let rule = VOCAB.rule_for_key("image", &AttrKey::Target).unwrap();
        assert_eq!(rule.native, "target");
        assert!(VOCAB.rule_for_key("image", &AttrKey::Rel).is_none());
    }

    #[test]
    fn test_style_rule_specificity() {
        assert_eq!(
            VOCAB.rule_for_style("text", "margin-top").map(|r| r.native),
            Some("margin_top")
        );
        assert_eq!(
            VOCAB.rule_for_style("text", "margin-left").map(|r| r.native),
            Some("custom_margin")
        );
        assert_eq!(
            VOCAB.rule_for_style("text", "color").map(|r| r.native),
            Some("style")
        );
    }

    #[test]
    fn test_box_property() {
        assert!(is_box_property("margin", "margin"));
        assert!(is_box_property("margin", "margin-top"));
        assert!(!is_box_property("margin", "margin-inline"));
        assert!(!is_box_property("padding", "margin-top"));
    }
}
