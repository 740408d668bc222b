//! WPBakery vocabulary

use crate::common::bracket::{BracketGrammar, Fallback, IdSlot};
use crate::common::ids::IdStyle;
use crate::common::rules::{AttrRule, BoolStyle, ElementSpec, ValueKind, Vocabulary};
use crate::common::structure::{ContainerChildren, Nesting, TopLevel};
use layout_model::{AttrKey, ComponentType as T, WidthTable};

/// Twelfths and fifths, as in the column layout picker
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
    ElementSpec::new("vc_section", T::Container),
    ElementSpec::new("vc_row", T::Row).outer(),
    ElementSpec::new("vc_row_inner", T::Row).inner(),
    ElementSpec::new("vc_column", T::Column).outer(),
    ElementSpec::new("vc_column_inner", T::Column).inner(),
    ElementSpec::new("vc_custom_heading", T::Heading).setting("text").void(),
    ElementSpec::new("vc_column_text", T::Text),
    ElementSpec::new("vc_single_image", T::Image).void(),
    ElementSpec::new("vc_btn", T::Button).setting("title").void(),
    ElementSpec::new("vc_cta", T::Card),
    ElementSpec::new("vc_tta_tabs", T::Tabs),
    ElementSpec::new("vc_tta_accordion", T::Accordion),
    ElementSpec::new("vc_tta_section", T::Tab).within(&["vc_tta_tabs", "vc_tta_tour"]),
    ElementSpec::new("vc_tta_section", T::AccordionItem).within(&["vc_tta_accordion"]),
    ElementSpec::new("vc_separator", T::Divider).void(),
    ElementSpec::new("vc_empty_space", T::Spacer).void(),
    ElementSpec::new("vc_video", T::Video).void(),
    ElementSpec::new("vc_icon", T::Icon).void(),
    ElementSpec::new("vc_gallery", T::Gallery).void(),
    ElementSpec::new("vc_raw_html", T::Code),
    ElementSpec::new("vc_progress_bar", T::ProgressBar).setting("title").void(),
    ElementSpec::new("contact-form-7", T::Form).void(),
    ElementSpec::new("vc_wp_custommenu", T::Menu).void(),
    ElementSpec::new("vc_gmaps", T::Map).void(),
];

static ATTRIBUTES: &[AttrRule] = &[
    AttrRule::scoped("vc_custom_heading", "font_container", AttrKey::Level, ValueKind::FontContainer),
    AttrRule::scoped("vc_custom_heading", "link", AttrKey::Url, ValueKind::VcLink),
    AttrRule::scoped("vc_btn", "link", AttrKey::Url, ValueKind::VcLink),
    AttrRule::scoped("vc_btn", "style", AttrKey::ButtonStyle, ValueKind::Text),
    AttrRule::scoped("vc_btn", "color", AttrKey::BackgroundColor, ValueKind::Text),
    AttrRule::scoped("vc_btn", "i_icon_fontawesome", AttrKey::Icon, ValueKind::Text),
    AttrRule::scoped("vc_cta", "h2", AttrKey::Heading, ValueKind::Text),
    AttrRule::scoped("vc_cta", "btn_link", AttrKey::Url, ValueKind::VcLink),
    AttrRule::scoped("vc_single_image", "source_url", AttrKey::ImageUrl, ValueKind::Text),
    AttrRule::scoped("vc_single_image", "link", AttrKey::Url, ValueKind::Text),
    AttrRule::scoped("vc_single_image", "img_link_target", AttrKey::Target, ValueKind::Text),
    AttrRule::scoped("vc_single_image", "alignment", AttrKey::Alignment, ValueKind::Text),
    AttrRule::scoped("vc_single_image", "img_size", AttrKey::Size, ValueKind::Text),
    AttrRule::scoped("vc_video", "link", AttrKey::VideoUrl, ValueKind::Text),
    AttrRule::scoped("vc_icon", "icon_fontawesome", AttrKey::Icon, ValueKind::Text),
    AttrRule::scoped("vc_icon", "link", AttrKey::Url, ValueKind::VcLink),
    AttrRule::scoped("vc_gallery", "images", AttrKey::Images, ValueKind::List),
    AttrRule::scoped("vc_progress_bar", "value", AttrKey::Percent, ValueKind::Number),
    AttrRule::scoped("vc_empty_space", "height", AttrKey::Height, ValueKind::Text),
    AttrRule::scoped("vc_separator", "color", AttrKey::TextColor, ValueKind::Text),
    AttrRule::scoped("vc_gmaps", "address", AttrKey::Address, ValueKind::Text),
    AttrRule::scoped("vc_gmaps", "zoom", AttrKey::Zoom, ValueKind::Number),
    AttrRule::scoped("vc_wp_custommenu", "nav_menu", AttrKey::Menu, ValueKind::Text),
    AttrRule::scoped("contact-form-7", "email", AttrKey::Email, ValueKind::Text),
    AttrRule::global("width", AttrKey::Width, ValueKind::Width),
    AttrRule::global("title", AttrKey::Heading, ValueKind::Text),
    AttrRule::global("el_class", AttrKey::CssClass, ValueKind::Text),
    AttrRule::global("el_id", AttrKey::CssId, ValueKind::Text),
    AttrRule::global("align", AttrKey::Alignment, ValueKind::Text),
    AttrRule::global("size", AttrKey::Size, ValueKind::Text),
    AttrRule::style("css", ValueKind::VcCss),
];

pub static GRAMMAR: BracketGrammar = BracketGrammar {
    dialect: "wpbakery",
    prefix: "vc_",
    vocabulary: Vocabulary {
        elements: ELEMENTS,
        attributes: ATTRIBUTES,
    },
    widths: WIDTHS,
    bools: BoolStyle::YES_EMPTY,
    nesting: Nesting {
        top: TopLevel::SectionsOrRows,
        container_children: ContainerChildren::RowsOnly,
        nested_containers: false,
        dissolve_row_containers: false,
        structural_text: false,
    },
    ids: Some(IdSlot {
        key: "tab_id",
        style: IdStyle::Timestamp,
        elements: &["vc_tta_section"],
    }),
    fallback: Fallback {
        element: "vc_column_text",
        marker: "el_class",
    },
};
