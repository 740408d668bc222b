//! Divi vocabulary

use crate::common::bracket::{BracketGrammar, Fallback, IdSlot};
use crate::common::ids::IdStyle;
use crate::common::rules::{AttrRule, BoolStyle, ElementSpec, ValueKind, Vocabulary};
use crate::common::structure::{ContainerChildren, Nesting, TopLevel};
use layout_model::{AttrKey, ComponentType as T, WidthTable};

/// Column types offered by Divi rows: sixths and fifths
pub const WIDTHS: WidthTable = WidthTable::new(&[
    (100.0, "4_4"),
    (83.33, "5_6"),
    (80.0, "4_5"),
    (75.0, "3_4"),
    (66.66, "2_3"),
    (60.0, "3_5"),
    (50.0, "1_2"),
    (40.0, "2_5"),
    (33.33, "1_3"),
    (25.0, "1_4"),
    (20.0, "1_5"),
    (16.66, "1_6"),
]);

static ELEMENTS: &[ElementSpec] = &[
    ElementSpec::new("et_pb_section", T::Container),
    ElementSpec::new("et_pb_row", T::Row).outer(),
    ElementSpec::new("et_pb_row_inner", T::Row).inner(),
    ElementSpec::new("et_pb_column", T::Column).outer(),
    ElementSpec::new("et_pb_column_inner", T::Column).inner(),
    ElementSpec::new("et_pb_heading", T::Heading).setting("title"),
    ElementSpec::new("et_pb_text", T::Text),
    ElementSpec::new("et_pb_image", T::Image),
    ElementSpec::new("et_pb_button", T::Button).setting("button_text"),
    ElementSpec::new("et_pb_blurb", T::Card),
    ElementSpec::new("et_pb_tabs", T::Tabs),
    ElementSpec::new("et_pb_tab", T::Tab),
    ElementSpec::new("et_pb_accordion", T::Accordion),
    ElementSpec::new("et_pb_accordion_item", T::AccordionItem),
    ElementSpec::new("et_pb_toggle", T::AccordionItem),
    ElementSpec::new("et_pb_divider", T::Divider),
    ElementSpec::new("et_pb_video", T::Video),
    ElementSpec::new("et_pb_social_media_follow_network", T::Icon)
        .within(&["et_pb_social_media_follow"]),
    ElementSpec::new("et_pb_icon", T::Icon),
    ElementSpec::new("et_pb_gallery", T::Gallery),
    ElementSpec::new("et_pb_code", T::Code),
    ElementSpec::new("et_pb_testimonial", T::Testimonial),
    ElementSpec::new("et_pb_number_counter", T::Counter).setting("title"),
    ElementSpec::new("et_pb_contact_form", T::Form),
    ElementSpec::new("et_pb_social_media_follow", T::SocialIcons),
    ElementSpec::new("et_pb_menu", T::Menu),
    ElementSpec::new("et_pb_map", T::Map),
];

static ATTRIBUTES: &[AttrRule] = &[
    AttrRule::scoped("et_pb_column", "type", AttrKey::Width, ValueKind::Width),
    AttrRule::scoped("et_pb_column_inner", "type", AttrKey::Width, ValueKind::Width),
    AttrRule::scoped("et_pb_heading", "title_level", AttrKey::Level, ValueKind::Text),
    AttrRule::scoped("et_pb_button", "button_url", AttrKey::Url, ValueKind::Text),
    AttrRule::scoped("et_pb_video", "src", AttrKey::VideoUrl, ValueKind::Text),
    AttrRule::scoped("et_pb_blurb", "image", AttrKey::ImageUrl, ValueKind::Text),
    AttrRule::scoped("et_pb_blurb", "font_icon", AttrKey::Icon, ValueKind::Text),
    AttrRule::scoped("et_pb_icon", "font_icon", AttrKey::Icon, ValueKind::Text),
    AttrRule::scoped("et_pb_social_media_follow_network", "social_network", AttrKey::Icon, ValueKind::Text),
    AttrRule::scoped("et_pb_gallery", "gallery_ids", AttrKey::Images, ValueKind::List),
    AttrRule::scoped("et_pb_gallery", "posts_number", AttrKey::Columns, ValueKind::Number),
    AttrRule::scoped("et_pb_testimonial", "author", AttrKey::Author, ValueKind::Text),
    AttrRule::scoped("et_pb_testimonial", "job_title", AttrKey::JobTitle, ValueKind::Text),
    AttrRule::scoped("et_pb_testimonial", "portrait_url", AttrKey::ImageUrl, ValueKind::Text),
    AttrRule::scoped("et_pb_number_counter", "number", AttrKey::Number, ValueKind::Number),
    AttrRule::scoped("et_pb_contact_form", "email", AttrKey::Email, ValueKind::Text),
    AttrRule::scoped("et_pb_menu", "menu_id", AttrKey::Menu, ValueKind::Text),
    AttrRule::scoped("et_pb_map", "address", AttrKey::Address, ValueKind::Text),
    AttrRule::scoped("et_pb_map", "zoom_level", AttrKey::Zoom, ValueKind::Number),
    AttrRule::scoped("et_pb_divider", "color", AttrKey::TextColor, ValueKind::Text),
    AttrRule::scoped("et_pb_divider", "height", AttrKey::Height, ValueKind::Text),
    AttrRule::global("open", AttrKey::Open, ValueKind::Bool),
    AttrRule::global("fullwidth", AttrKey::FullWidth, ValueKind::Bool),
    AttrRule::global("url", AttrKey::Url, ValueKind::Text),
    AttrRule::global("url_new_window", AttrKey::Target, ValueKind::NewWindow),
    AttrRule::global("src", AttrKey::ImageUrl, ValueKind::Text),
    AttrRule::global("alt", AttrKey::AltText, ValueKind::Text),
    AttrRule::global("title", AttrKey::Heading, ValueKind::Text),
    AttrRule::global("module_class", AttrKey::CssClass, ValueKind::Text),
    AttrRule::global("module_id", AttrKey::CssId, ValueKind::Text),
    AttrRule::global("background_color", AttrKey::BackgroundColor, ValueKind::Text),
    AttrRule::global("background_image", AttrKey::BackgroundImage, ValueKind::Text),
    AttrRule::global("text_orientation", AttrKey::Alignment, ValueKind::Text),
    AttrRule::global("text_text_color", AttrKey::TextColor, ValueKind::Text),
    AttrRule::style("custom_margin", ValueKind::Spacing("margin")),
    AttrRule::style("custom_padding", ValueKind::Spacing("padding")),
];

pub static GRAMMAR: BracketGrammar = BracketGrammar {
    dialect: "divi",
    prefix: "et_pb_",
    vocabulary: Vocabulary {
        elements: ELEMENTS,
        attributes: ATTRIBUTES,
    },
    widths: WIDTHS,
    bools: BoolStyle::ON_OFF,
    nesting: Nesting {
        top: TopLevel::Sections,
        container_children: ContainerChildren::RowsOnly,
        nested_containers: false,
        dissolve_row_containers: false,
        structural_text: false,
    },
    ids: Some(IdSlot {
        key: "_unique_id",
        style: IdStyle::Uuid,
        elements: &[],
    }),
    fallback: Fallback {
        element: "et_pb_text",
        marker: "module_class",
    },
};
