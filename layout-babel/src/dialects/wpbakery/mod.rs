//! WPBakery Page Builder dialect
//!
//!     `[vc_row][vc_column width="1/2"][vc_column_text]...` markup. Rows hold columns only;
//!     rows nested in a column are `vc_row_inner` with `vc_column_inner` children. Anything
//!     at the top level that is not a `vc_section` or `vc_row` gets wrapped in a row.
//!
//! Compound Values
//!
//!     Several attributes pack more than one canonical value:
//!
//!         link="url:https%3A%2F%2Fx.test|title:Go|target:_blank|rel:nofollow"
//!         font_container="tag:h2|text_align:center|color:%23333"
//!         css=".vc_custom_1596548123456{margin-top: 10px !important;}"
//!
//!     The first two decompose into url/target/rel and level/alignment/text_color; the css
//!     block becomes styles. Converting back rebuilds them, with a fresh `vc_custom_` class.
//!
//! Tabs and Accordions
//!
//!     `vc_tta_section` is a tab under `vc_tta_tabs` and an accordion item under
//!     `vc_tta_accordion`. Its `tab_id` is the only generated id in this dialect.

mod tables;

pub use tables::{GRAMMAR, WIDTHS};

use crate::dialect::{Content, Conversion, ConvertOptions, Dialect, ParseReport, Syntax};
use layout_model::{Component, ComponentType, WidthTable};

pub struct WpBakeryDialect;

impl Dialect for WpBakeryDialect {
    fn name(&self) -> &str {
        GRAMMAR.dialect
    }

    fn description(&self) -> &str {
        "WPBakery Page Builder shortcodes (vc_*)"
    }

    fn syntax(&self) -> Syntax {
        Syntax::BracketTags
    }

    fn width_table(&self) -> &WidthTable {
        &GRAMMAR.widths
    }

    fn supports(&self, kind: ComponentType) -> bool {
        GRAMMAR.supports(kind)
    }

    fn is_valid_content(&self, content: &Content) -> bool {
        GRAMMAR.is_valid_content(content)
    }

    fn parse(&self, content: &Content) -> ParseReport {
        GRAMMAR.parse(content)
    }

    fn convert(&self, components: &[Component], options: &ConvertOptions) -> Conversion {
        GRAMMAR.convert(components, options)
    }
}
