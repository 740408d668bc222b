//! Oxygen dialect
//!
//!     Oxygen keeps a page as one component tree under a `root` node:
//!
//!         {"id": 0, "name": "root", "depth": 0, "children": [
//!             {"id": 1, "name": "ct_section", "depth": 1,
//!              "options": {"ct_id": 1, "ct_parent": 0, "selector": "section-1",
//!                          "original": {"background-color": "#fff"}},
//!              "children": [
//!                 {"id": 2, "name": "ct_headline", "depth": 2,
//!                  "options": {"ct_id": 2, "ct_parent": 1, "selector": "headline-2",
//!                              "ct_content": "Hello", "original": {"tag": "h2"}},
//!                  "children": []}
//!              ]}
//!         ]}
//!
//!     Text lives in `options.ct_content`; everything else the editor sets is in
//!     `options.original`. `ct_div_block` is a column inside `ct_new_columns` and a plain
//!     container anywhere else; column widths are `width` plus `width-unit`, and are written
//!     as the exact percentage.
//!
//!     Nodes are always numbered, since `ct_parent` links depend on the ids.

mod converter;
mod parser;
mod tables;

pub use tables::WIDTHS;

use crate::common::values::Codec;
use crate::dialect::{Content, Conversion, ConvertOptions, Dialect, ParseReport, Syntax};
use layout_model::{Component, ComponentType, WidthTable};
use tables::{BOOLS, DIALECT, VOCABULARY};

fn codec() -> Codec<'static> {
    Codec {
        dialect: DIALECT,
        vocabulary: &VOCABULARY,
        bools: BOOLS,
        widths: &WIDTHS,
    }
}

pub struct OxygenDialect;

impl Dialect for OxygenDialect {
    fn name(&self) -> &str {
        DIALECT
    }

    fn description(&self) -> &str {
        "Oxygen Builder component tree (ct_* and oxy_* elements)"
    }

    fn syntax(&self) -> Syntax {
        Syntax::JsonTree
    }

    fn width_table(&self) -> &WidthTable {
        &WIDTHS
    }

    fn supports(&self, kind: ComponentType) -> bool {
        VOCABULARY.supports(kind)
    }

    fn is_valid_content(&self, content: &Content) -> bool {
        parser::is_valid(content)
    }

    fn parse(&self, content: &Content) -> ParseReport {
        parser::parse(content)
    }

    fn convert(&self, components: &[Component], _options: &ConvertOptions) -> Conversion {
        converter::convert(components)
    }
}
