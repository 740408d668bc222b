//! Avada (Fusion Builder) vocabulary

use crate::common::bracket::{BracketGrammar, Fallback};
use crate::common::rules::{AttrRule, BoolStyle, ContentSource, ElementSpec, ValueKind, Vocabulary};
use crate::common::structure::{ContainerChildren, Nesting, TopLevel};
use layout_model::{AttrKey, ComponentType as T, WidthTable};

pub const WIDTHS: WidthTable = WidthTable::new(&[
    (100.0, "1_1"),
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
    ElementSpec::new("fusion_builder_container", T::Container),
    ElementSpec::new("fusion_builder_row", T::Row).outer(),
    ElementSpec::new("fusion_builder_row_inner", T::Row).inner(),
    ElementSpec::new("fusion_builder_column", T::Column).outer(),
    ElementSpec::new("fusion_builder_column_inner", T::Column).inner(),
    ElementSpec::new("fusion_title", T::Heading),
    ElementSpec::new("fusion_text", T::Text),
    ElementSpec::new("fusion_imageframe", T::Image).content(ContentSource::InnerAsImage),
    ElementSpec::new("fusion_button", T::Button),
    ElementSpec::new("fusion_content_box", T::Card).title_body(),
    ElementSpec::new("fusion_tabs", T::Tabs),
    ElementSpec::new("fusion_tab", T::Tab),
    ElementSpec::new("fusion_accordion", T::Accordion),
    ElementSpec::new("fusion_toggle", T::AccordionItem),
    ElementSpec::new("fusion_separator", T::Divider).void(),
    ElementSpec::new("fusion_youtube", T::Video).void(),
    ElementSpec::new("fusion_fontawesome", T::Icon).void(),
    ElementSpec::new("fusion_gallery", T::Gallery).void(),
    ElementSpec::new("fusion_code", T::Code),
    ElementSpec::new("fusion_testimonial", T::Testimonial),
    ElementSpec::new("fusion_counter_box", T::Counter),
    ElementSpec::new("fusion_progress", T::ProgressBar),
    ElementSpec::new("fusion_menu", T::Menu).void(),
    ElementSpec::new("fusion_map", T::Map).void(),
];

static ATTRIBUTES: &[AttrRule] = &[
    AttrRule::scoped("fusion_builder_column", "type", AttrKey::Width, ValueKind::Width),
    AttrRule::scoped("fusion_builder_column_inner", "type", AttrKey::Width, ValueKind::Width),
    AttrRule::scoped("fusion_title", "size", AttrKey::Level, ValueKind::LevelNumber),
    AttrRule::scoped("fusion_imageframe", "linktarget", AttrKey::Target, ValueKind::Text),
    AttrRule::scoped("fusion_button", "color", AttrKey::ButtonStyle, ValueKind::Text),
    AttrRule::scoped("fusion_button", "size", AttrKey::Size, ValueKind::Text),
    AttrRule::scoped("fusion_content_box", "image", AttrKey::ImageUrl, ValueKind::Text),
    AttrRule::scoped("fusion_youtube", "id", AttrKey::VideoUrl, ValueKind::Text),
    AttrRule::scoped("fusion_fontawesome", "icon", AttrKey::Icon, ValueKind::Text),
    AttrRule::scoped("fusion_gallery", "image_ids", AttrKey::Images, ValueKind::List),
    AttrRule::scoped("fusion_gallery", "columns", AttrKey::Columns, ValueKind::Number),
    AttrRule::scoped("fusion_testimonial", "name", AttrKey::Author, ValueKind::Text),
    AttrRule::scoped("fusion_testimonial", "company", AttrKey::JobTitle, ValueKind::Text),
    AttrRule::scoped("fusion_testimonial", "image", AttrKey::ImageUrl, ValueKind::Text),
    AttrRule::scoped("fusion_counter_box", "value", AttrKey::Number, ValueKind::Number),
    AttrRule::scoped("fusion_progress", "percentage", AttrKey::Percent, ValueKind::Number),
    AttrRule::scoped("fusion_separator", "sep_color", AttrKey::TextColor, ValueKind::Text),
    AttrRule::scoped("fusion_map", "address", AttrKey::Address, ValueKind::Text),
    AttrRule::scoped("fusion_map", "zoom", AttrKey::Zoom, ValueKind::Number),
    AttrRule::scoped("fusion_menu", "menu", AttrKey::Menu, ValueKind::Text),
    AttrRule::global("link", AttrKey::Url, ValueKind::Text),
    AttrRule::global("target", AttrKey::Target, ValueKind::Text),
    AttrRule::global("alt", AttrKey::AltText, ValueKind::Text),
    AttrRule::global("title", AttrKey::Heading, ValueKind::Text),
    AttrRule::global("icon", AttrKey::Icon, ValueKind::Text),
    AttrRule::global("open", AttrKey::Open, ValueKind::Bool),
    AttrRule::global("hundred_percent", AttrKey::FullWidth, ValueKind::Bool),
    AttrRule::global("class", AttrKey::CssClass, ValueKind::Text),
    AttrRule::global("id", AttrKey::CssId, ValueKind::Text),
    AttrRule::global("background_color", AttrKey::BackgroundColor, ValueKind::Text),
    AttrRule::global("background_image", AttrKey::BackgroundImage, ValueKind::Text),
    AttrRule::global("content_align", AttrKey::Alignment, ValueKind::Text),
    AttrRule::global("text_color", AttrKey::TextColor, ValueKind::Text),
    AttrRule::global("height", AttrKey::Height, ValueKind::Text),
    AttrRule::style("margin_top", ValueKind::Style("margin-top")),
    AttrRule::style("margin_right", ValueKind::Style("margin-right")),
    AttrRule::style("margin_bottom", ValueKind::Style("margin-bottom")),
    AttrRule::style("margin_left", ValueKind::Style("margin-left")),
    AttrRule::style("padding_top", ValueKind::Style("padding-top")),
    AttrRule::style("padding_right", ValueKind::Style("padding-right")),
    AttrRule::style("padding_bottom", ValueKind::Style("padding-bottom")),
    AttrRule::style("padding_left", ValueKind::Style("padding-left")),
];

pub static GRAMMAR: BracketGrammar = BracketGrammar {
    dialect: "avada",
    prefix: "fusion_",
    vocabulary: Vocabulary {
        elements: ELEMENTS,
        attributes: ATTRIBUTES,
    },
    widths: WIDTHS,
    bools: BoolStyle::YES_NO,
    nesting: Nesting {
        top: TopLevel::Sections,
        container_children: ContainerChildren::RowsOnly,
        nested_containers: false,
        dissolve_row_containers: false,
        structural_text: false,
    },
    ids: None,
    fallback: Fallback {
        element: "fusion_text",
        marker: "class",
    },
};
