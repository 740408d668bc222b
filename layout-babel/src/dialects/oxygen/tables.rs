//! Oxygen vocabulary

use crate::common::ids::IdStyle;
use crate::common::rules::{AttrRule, BoolStyle, ContentSource, ElementSpec, ValueKind, Vocabulary};
use crate::common::structure::{ContainerChildren, Nesting, TopLevel};
use layout_model::json::{KeyKind, KeyRule, TreeShape};
use layout_model::{AttrKey, ComponentType as T, WidthTable};

pub const DIALECT: &str = "oxygen";

/// Option that holds text content, kept beside `original` rather than inside it
pub const CT_CONTENT: &str = "ct_content";

/// Common column widths. Oxygen widths are free numbers; converters write the exact value.
pub const WIDTHS: WidthTable = WidthTable::new(&[
    (100.0, "100"),
    (83.33, "83.33"),
    (80.0, "80"),
    (75.0, "75"),
    (66.66, "66.66"),
    (60.0, "60"),
    (50.0, "50"),
    (40.0, "40"),
    (33.33, "33.33"),
    (25.0, "25"),
    (20.0, "20"),
    (16.66, "16.66"),
]);

const NONE: ContentSource = ContentSource::None;

static ELEMENTS: &[ElementSpec] = &[
    ElementSpec::new("ct_section", T::Container).content(NONE),
    ElementSpec::new("ct_new_columns", T::Row).content(NONE),
    ElementSpec::new("ct_div_block", T::Column)
        .content(NONE)
        .within(&["ct_new_columns"]),
    ElementSpec::new("ct_div_block", T::Container).content(NONE),
    ElementSpec::new("ct_headline", T::Heading).setting(CT_CONTENT),
    ElementSpec::new("ct_text_block", T::Text).setting(CT_CONTENT),
    ElementSpec::new("ct_image", T::Image).content(NONE),
    ElementSpec::new("ct_link_button", T::Button).setting(CT_CONTENT),
    ElementSpec::new("oxy_icon_box", T::Card).setting("icon_box_text"),
    ElementSpec::new("oxy_tabs", T::Tabs).content(NONE),
    ElementSpec::new("oxy_tab", T::Tab).content(NONE),
    ElementSpec::new("ct_video", T::Video).content(NONE),
    ElementSpec::new("ct_fancy_icon", T::Icon).content(NONE),
    ElementSpec::new("oxy_gallery", T::Gallery).content(NONE),
    ElementSpec::new("ct_code_block", T::Code).setting("code-php"),
    ElementSpec::new("oxy_testimonial", T::Testimonial).setting("testimonial_text"),
    ElementSpec::new("oxy_counter", T::Counter).setting(CT_CONTENT),
    ElementSpec::new("oxy_progress_bar", T::ProgressBar).setting(CT_CONTENT),
    ElementSpec::new("ct_nav_menu", T::Menu).content(NONE),
    ElementSpec::new("oxy_map", T::Map).content(NONE),
];

static ATTRIBUTES: &[AttrRule] = &[
    AttrRule::scoped("ct_headline", "tag", AttrKey::Level, ValueKind::Text),
    AttrRule::scoped("oxy_icon_box", "icon_box_heading", AttrKey::Heading, ValueKind::Text),
    AttrRule::scoped("oxy_tab", "tab_title", AttrKey::Heading, ValueKind::Text),
    AttrRule::scoped("ct_video", "embed_src", AttrKey::VideoUrl, ValueKind::Text),
    AttrRule::scoped("ct_fancy_icon", "icon-id", AttrKey::Icon, ValueKind::Text),
    AttrRule::scoped("oxy_gallery", "image_ids", AttrKey::Images, ValueKind::List),
    AttrRule::scoped("oxy_gallery", "columns", AttrKey::Columns, ValueKind::Number),
    AttrRule::scoped("oxy_testimonial", "testimonial_author", AttrKey::Author, ValueKind::Text),
    AttrRule::scoped("oxy_testimonial", "testimonial_author_info", AttrKey::JobTitle, ValueKind::Text),
    AttrRule::scoped("oxy_testimonial", "testimonial_photo", AttrKey::ImageUrl, ValueKind::Text),
    AttrRule::scoped("oxy_counter", "counter_final_number", AttrKey::Number, ValueKind::Number),
    AttrRule::scoped("oxy_progress_bar", "progress_bar_progress", AttrKey::Percent, ValueKind::Number),
    AttrRule::scoped("ct_nav_menu", "menu_id", AttrKey::Menu, ValueKind::Text),
    AttrRule::scoped("oxy_map", "map_address", AttrKey::Address, ValueKind::Text),
    AttrRule::scoped("oxy_map", "map_zoom", AttrKey::Zoom, ValueKind::Number),
    AttrRule::global("src", AttrKey::ImageUrl, ValueKind::Text),
    AttrRule::global("alt", AttrKey::AltText, ValueKind::Text),
    AttrRule::global("url", AttrKey::Url, ValueKind::Text),
    AttrRule::global("target", AttrKey::Target, ValueKind::Text),
    AttrRule::global("background-color", AttrKey::BackgroundColor, ValueKind::Text),
    AttrRule::global("background-image", AttrKey::BackgroundImage, ValueKind::Text),
    AttrRule::global("color", AttrKey::TextColor, ValueKind::Text),
    AttrRule::global("text-align", AttrKey::Alignment, ValueKind::Text),
    AttrRule::global("height", AttrKey::Height, ValueKind::Text),
    AttrRule::style("margin-top", ValueKind::Style("margin-top")),
    AttrRule::style("margin-right", ValueKind::Style("margin-right")),
    AttrRule::style("margin-bottom", ValueKind::Style("margin-bottom")),
    AttrRule::style("margin-left", ValueKind::Style("margin-left")),
    AttrRule::style("padding-top", ValueKind::Style("padding-top")),
    AttrRule::style("padding-right", ValueKind::Style("padding-right")),
    AttrRule::style("padding-bottom", ValueKind::Style("padding-bottom")),
    AttrRule::style("padding-left", ValueKind::Style("padding-left")),
    AttrRule::style("font-size", ValueKind::Style("font-size")),
    AttrRule::style("font-weight", ValueKind::Style("font-weight")),
    AttrRule::style("border-radius", ValueKind::Style("border-radius")),
];

pub static VOCABULARY: Vocabulary = Vocabulary {
    elements: ELEMENTS,
    attributes: ATTRIBUTES,
};

pub const BOOLS: BoolStyle = BoolStyle::TRUE_FALSE;

/// Oxygen ids are plain integers; only the counter of the generator is used.
pub const IDS: IdStyle = IdStyle::Sequential("ct");

pub const NESTING: Nesting = Nesting {
    top: TopLevel::Any,
    container_children: ContainerChildren::Any,
    nested_containers: true,
    dissolve_row_containers: false,
    structural_text: false,
};

pub const FALLBACK_ELEMENT: &str = "ct_text_block";

/// Elements that hold child elements; anything else gets its children as siblings.
pub const HOLDERS: [&str; 5] = ["ct_section", "ct_new_columns", "ct_div_block", "oxy_tabs", "oxy_tab"];

pub static SHAPE: TreeShape = TreeShape {
    keys: &[
        KeyRule::required("name", KeyKind::String),
        KeyRule::optional("id", KeyKind::Scalar),
        KeyRule::optional("options", KeyKind::Object),
        KeyRule::optional("depth", KeyKind::Scalar),
    ],
    children: "children",
    check: None,
};

/// Selector stem: `ct_headline` is `headline`, `oxy_icon_box` is `icon-box`.
pub fn selector_stem(name: &str) -> String {
    name.strip_prefix("ct_")
        .or_else(|| name.strip_prefix("oxy_"))
        .unwrap_or(name)
        .replace('_', "-")
}
