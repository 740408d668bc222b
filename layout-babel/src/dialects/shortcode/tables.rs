//! Generic shortcode vocabulary

use crate::common::bracket::{BracketGrammar, Fallback, IdSlot};
use crate::common::ids::IdStyle;
use crate::common::rules::{AttrRule, BoolStyle, ElementSpec, ValueKind, Vocabulary};
use crate::common::structure::{ContainerChildren, Nesting, TopLevel};
use layout_model::{AttrKey, ComponentType as T, WidthTable};

/// Twelfths and fifths
pub const WIDTHS: WidthTable = WidthTable::new(&[
    (100.0, "1/1"),
    (91.66, "11/12"),
    (83.33, "5/6"),
    (80.0, "4/5"),
    (75.0, "3/4"),
    (66.66, "2/3"),
    (60.0, "3/5"),
    (58.33, "7/12"),
    (50.0, "1/2"),
    (41.66, "5/12"),
    (40.0, "2/5"),
    (33.33, "1/3"),
    (25.0, "1/4"),
    (20.0, "1/5"),
    (16.66, "1/6"),
    (8.33, "1/12"),
]);

static ELEMENTS: &[ElementSpec] = &[
    ElementSpec::new("section", T::Container),
    ElementSpec::new("row", T::Row),
    ElementSpec::new("column", T::Column),
    ElementSpec::new("heading", T::Heading),
    ElementSpec::new("text", T::Text),
    ElementSpec::new("image", T::Image).void(),
    ElementSpec::new("button", T::Button),
    ElementSpec::new("card", T::Card).title_body(),
    ElementSpec::new("tabs", T::Tabs),
    ElementSpec::new("tab", T::Tab),
    ElementSpec::new("accordion", T::Accordion),
    ElementSpec::new("accordion_item", T::AccordionItem),
    ElementSpec::new("divider", T::Divider).void(),
    ElementSpec::new("spacer", T::Spacer).void(),
    ElementSpec::new("video", T::Video).void(),
    ElementSpec::new("social_icon", T::Icon).within(&["social_icons"]).void(),
    ElementSpec::new("icon", T::Icon).void(),
    ElementSpec::new("gallery", T::Gallery).void(),
    ElementSpec::new("code", T::Code),
    ElementSpec::new("testimonial", T::Testimonial),
    ElementSpec::new("counter", T::Counter),
    ElementSpec::new("progress_bar", T::ProgressBar),
    ElementSpec::new("form", T::Form).void(),
    ElementSpec::new("social_icons", T::SocialIcons),
    ElementSpec::new("menu", T::Menu).void(),
    ElementSpec::new("map", T::Map).void(),
];

static ATTRIBUTES: &[AttrRule] = &[
    AttrRule::scoped("video", "src", AttrKey::VideoUrl, ValueKind::Text),
    AttrRule::scoped("social_icon", "network", AttrKey::Icon, ValueKind::Text),
    AttrRule::global("width", AttrKey::Width, ValueKind::Width),
    AttrRule::global("url", AttrKey::Url, ValueKind::Text),
    AttrRule::global("target", AttrKey::Target, ValueKind::Text),
    AttrRule::global("rel", AttrKey::Rel, ValueKind::Text),
    AttrRule::global("src", AttrKey::ImageUrl, ValueKind::Text),
    AttrRule::global("alt", AttrKey::AltText, ValueKind::Text),
    AttrRule::global("background_color", AttrKey::BackgroundColor, ValueKind::Text),
    AttrRule::global("background_image", AttrKey::BackgroundImage, ValueKind::Text),
    AttrRule::global("color", AttrKey::TextColor, ValueKind::Text),
    AttrRule::global("align", AttrKey::Alignment, ValueKind::Text),
    AttrRule::global("level", AttrKey::Level, ValueKind::Text),
    AttrRule::global("title", AttrKey::Heading, ValueKind::Text),
    AttrRule::global("icon", AttrKey::Icon, ValueKind::Text),
    AttrRule::global("open", AttrKey::Open, ValueKind::Bool),
    AttrRule::global("full_width", AttrKey::FullWidth, ValueKind::Bool),
    AttrRule::global("class", AttrKey::CssClass, ValueKind::Text),
    AttrRule::global("css_id", AttrKey::CssId, ValueKind::Text),
    AttrRule::global("height", AttrKey::Height, ValueKind::Text),
    AttrRule::global("size", AttrKey::Size, ValueKind::Text),
    AttrRule::global("variant", AttrKey::ButtonStyle, ValueKind::Text),
    AttrRule::global("number", AttrKey::Number, ValueKind::Number),
    AttrRule::global("percent", AttrKey::Percent, ValueKind::Number),
    AttrRule::global("author", AttrKey::Author, ValueKind::Text),
    AttrRule::global("job_title", AttrKey::JobTitle, ValueKind::Text),
    AttrRule::global("images", AttrKey::Images, ValueKind::List),
    AttrRule::global("columns", AttrKey::Columns, ValueKind::Number),
    AttrRule::global("address", AttrKey::Address, ValueKind::Text),
    AttrRule::global("zoom", AttrKey::Zoom, ValueKind::Number),
    AttrRule::global("email", AttrKey::Email, ValueKind::Text),
    AttrRule::global("menu", AttrKey::Menu, ValueKind::Text),
    AttrRule::style("style", ValueKind::InlineCss),
];

pub static GRAMMAR: BracketGrammar = BracketGrammar {
    dialect: "shortcode",
    prefix: "",
    vocabulary: Vocabulary {
        elements: ELEMENTS,
        attributes: ATTRIBUTES,
    },
    widths: WIDTHS,
    bools: BoolStyle::TRUE_FALSE,
    nesting: Nesting {
        top: TopLevel::Any,
        container_children: ContainerChildren::Any,
        nested_containers: true,
        dissolve_row_containers: false,
        structural_text: true,
    },
    ids: Some(IdSlot {
        key: "id",
        style: IdStyle::Sequential("node"),
        elements: &[],
    }),
    fallback: Fallback {
        element: "text",
        marker: "class",
    },
};
