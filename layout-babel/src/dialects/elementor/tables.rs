//! Elementor vocabulary
//!
//!     Element names are `elType` for structure (`section`, `column`, `container`) and
//!     `widgetType` for widgets. Repeater rows (tab panes, accordion items, social icons)
//!     are listed as `<widget>#item` so their fields have rules like any other element.

use crate::common::ids::IdStyle;
use crate::common::rules::{AttrRule, BoolStyle, ContentSource, ElementSpec, ValueKind, Vocabulary};
use crate::common::structure::{ContainerChildren, Nesting, TopLevel};
use layout_model::json::{KeyKind, KeyRule, TreeShape};
use layout_model::{AttrKey, ComponentType as T, WidthTable};
use serde_json::{Map, Value};

pub const DIALECT: &str = "elementor";

/// `_column_size` presets of the column width control
pub const WIDTHS: WidthTable = WidthTable::new(&[
    (100.0, "100"),
    (83.33, "83"),
    (80.0, "80"),
    (75.0, "75"),
    (70.0, "70"),
    (66.66, "66"),
    (60.0, "60"),
    (50.0, "50"),
    (40.0, "40"),
    (33.33, "33"),
    (30.0, "30"),
    (25.0, "25"),
    (20.0, "20"),
    (16.66, "16"),
    (14.28, "14"),
    (12.5, "12"),
    (11.11, "11"),
    (10.0, "10"),
]);

const NONE: ContentSource = ContentSource::None;

static ELEMENTS: &[ElementSpec] = &[
    ElementSpec::new("container", T::Container).content(NONE),
    ElementSpec::new("section", T::Row).content(NONE),
    ElementSpec::new("column", T::Column).content(NONE),
    ElementSpec::new("heading", T::Heading).setting("title"),
    ElementSpec::new("text-editor", T::Text).setting("editor"),
    ElementSpec::new("image", T::Image).content(NONE),
    ElementSpec::new("button", T::Button).setting("text"),
    ElementSpec::new("icon-box", T::Card).setting("description_text"),
    ElementSpec::new("tabs", T::Tabs).content(NONE),
    ElementSpec::new("tabs#item", T::Tab).setting("tab_content").within(&["tabs"]),
    ElementSpec::new("accordion", T::Accordion).content(NONE),
    ElementSpec::new("accordion#item", T::AccordionItem)
        .setting("tab_content")
        .within(&["accordion"]),
    ElementSpec::new("toggle", T::Accordion).content(NONE),
    ElementSpec::new("toggle#item", T::AccordionItem)
        .setting("tab_content")
        .within(&["toggle"]),
    ElementSpec::new("divider", T::Divider).content(NONE),
    ElementSpec::new("spacer", T::Spacer).content(NONE),
    ElementSpec::new("video", T::Video).content(NONE),
    ElementSpec::new("social-icons#item", T::Icon)
        .content(NONE)
        .within(&["social-icons"]),
    ElementSpec::new("icon", T::Icon).content(NONE),
    ElementSpec::new("image-gallery", T::Gallery).content(NONE),
    ElementSpec::new("html", T::Code).setting("html"),
    ElementSpec::new("testimonial", T::Testimonial).setting("testimonial_content"),
    ElementSpec::new("counter", T::Counter).setting("title"),
    ElementSpec::new("progress", T::ProgressBar).setting("title"),
    ElementSpec::new("form", T::Form).content(NONE),
    ElementSpec::new("social-icons", T::SocialIcons).content(NONE),
    ElementSpec::new("nav-menu", T::Menu).content(NONE),
    ElementSpec::new("google_maps", T::Map).content(NONE),
];

static ATTRIBUTES: &[AttrRule] = &[
    AttrRule::scoped("heading", "header_size", AttrKey::Level, ValueKind::Text),
    AttrRule::scoped("heading", "title_color", AttrKey::TextColor, ValueKind::Text),
    AttrRule::scoped("button", "button_type", AttrKey::ButtonStyle, ValueKind::Text),
    AttrRule::scoped("button", "size", AttrKey::Size, ValueKind::Text),
    AttrRule::scoped("icon-box", "title_text", AttrKey::Heading, ValueKind::Text),
    AttrRule::scoped("icon-box", "selected_icon", AttrKey::Icon, ValueKind::IconObject),
    AttrRule::scoped("tabs#item", "tab_title", AttrKey::Heading, ValueKind::Text),
    AttrRule::scoped("accordion#item", "tab_title", AttrKey::Heading, ValueKind::Text),
    AttrRule::scoped("toggle#item", "tab_title", AttrKey::Heading, ValueKind::Text),
    AttrRule::scoped("divider", "color", AttrKey::TextColor, ValueKind::Text),
    AttrRule::scoped("spacer", "space", AttrKey::Height, ValueKind::SizeObject),
    AttrRule::scoped("video", "youtube_url", AttrKey::VideoUrl, ValueKind::Text),
    AttrRule::scoped("social-icons#item", "social_icon", AttrKey::Icon, ValueKind::IconObject),
    AttrRule::scoped("icon", "selected_icon", AttrKey::Icon, ValueKind::IconObject),
    AttrRule::scoped("image-gallery", "wp_gallery", AttrKey::Images, ValueKind::GalleryArray),
    AttrRule::scoped("image-gallery", "gallery_columns", AttrKey::Columns, ValueKind::Number),
    AttrRule::scoped("testimonial", "testimonial_name", AttrKey::Author, ValueKind::Text),
    AttrRule::scoped("testimonial", "testimonial_job", AttrKey::JobTitle, ValueKind::Text),
    AttrRule::scoped("testimonial", "testimonial_image", AttrKey::ImageUrl, ValueKind::ImageObject),
    AttrRule::scoped("counter", "ending_number", AttrKey::Number, ValueKind::Number),
    AttrRule::scoped("progress", "percent", AttrKey::Percent, ValueKind::SizeObject),
    AttrRule::scoped("form", "email_to", AttrKey::Email, ValueKind::Text),
    AttrRule::scoped("nav-menu", "menu", AttrKey::Menu, ValueKind::Text),
    AttrRule::scoped("google_maps", "address", AttrKey::Address, ValueKind::Text),
    AttrRule::scoped("google_maps", "zoom", AttrKey::Zoom, ValueKind::SizeObject),
    AttrRule::scoped("section", "height", AttrKey::Height, ValueKind::Text),
    AttrRule::scoped_style("section", "margin", ValueKind::Dimensions("margin")),
    AttrRule::scoped_style("section", "padding", ValueKind::Dimensions("padding")),
    AttrRule::scoped_style("column", "margin", ValueKind::Dimensions("margin")),
    AttrRule::scoped_style("column", "padding", ValueKind::Dimensions("padding")),
    AttrRule::scoped_style("container", "margin", ValueKind::Dimensions("margin")),
    AttrRule::scoped_style("container", "padding", ValueKind::Dimensions("padding")),
    AttrRule::global("link", AttrKey::Url, ValueKind::LinkObject),
    AttrRule::global("image", AttrKey::ImageUrl, ValueKind::ImageObject),
    AttrRule::global("align", AttrKey::Alignment, ValueKind::Text),
    AttrRule::global("text_color", AttrKey::TextColor, ValueKind::Text),
    AttrRule::global("background_color", AttrKey::BackgroundColor, ValueKind::Text),
    AttrRule::global("_css_classes", AttrKey::CssClass, ValueKind::Text),
    AttrRule::global("_element_id", AttrKey::CssId, ValueKind::Text),
    AttrRule::style("_margin", ValueKind::Dimensions("margin")),
    AttrRule::style("_padding", ValueKind::Dimensions("padding")),
];

pub static VOCABULARY: Vocabulary = Vocabulary {
    elements: ELEMENTS,
    attributes: ATTRIBUTES,
};

pub const BOOLS: BoolStyle = BoolStyle::YES_EMPTY;

pub const IDS: IdStyle = IdStyle::Hex(7);

pub const NESTING: Nesting = Nesting {
    top: TopLevel::SectionsOrRows,
    container_children: ContainerChildren::Any,
    nested_containers: true,
    dissolve_row_containers: true,
    structural_text: false,
};

/// Fallback widget and the setting that receives its marker
pub const FALLBACK_WIDGET: &str = "text-editor";
pub const FALLBACK_MARKER: &str = "_css_classes";

/// A widget setting holding a list of rows that become child components
#[derive(Debug, Clone, Copy)]
pub struct Repeater {
    pub widget: &'static str,
    pub field: &'static str,
    /// Element name of one row
    pub item: &'static str,
}

pub static REPEATERS: &[Repeater] = &[
    Repeater {
        widget: "tabs",
        field: "tabs",
        item: "tabs#item",
    },
    Repeater {
        widget: "accordion",
        field: "tabs",
        item: "accordion#item",
    },
    Repeater {
        widget: "toggle",
        field: "tabs",
        item: "toggle#item",
    },
    Repeater {
        widget: "social-icons",
        field: "social_icon_list",
        item: "social-icons#item",
    },
];

pub fn repeater(widget: &str) -> Option<&'static Repeater> {
    REPEATERS.iter().find(|r| r.widget == widget)
}

/// Structural element types; everything else is `elType: "widget"`.
pub const STRUCTURAL: [&str; 3] = ["section", "column", "container"];

fn widgets_are_named(node: &Map<String, Value>) -> Result<(), String> {
    match node.get("elType").and_then(Value::as_str) {
        Some("widget") if !node.get("widgetType").is_some_and(Value::is_string) => {
            Err("widget without a widgetType".to_string())
        }
        Some(kind) if kind != "widget" && !STRUCTURAL.contains(&kind) => {
            Err(format!("unknown elType '{}'", kind))
        }
        _ => Ok(()),
    }
}

pub static SHAPE: TreeShape = TreeShape {
    keys: &[
        KeyRule::optional("id", KeyKind::Scalar),
        KeyRule::required("elType", KeyKind::String),
        KeyRule::optional("settings", KeyKind::Any),
        KeyRule::optional("widgetType", KeyKind::String),
    ],
    children: "elements",
    check: Some(widgets_are_named),
};
