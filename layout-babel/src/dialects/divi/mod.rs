//! Divi Builder dialect
//!
//!     `[et_pb_section][et_pb_row][et_pb_column type="1_2"][et_pb_text]...` markup. Divi only
//!     renders modules inside section > row > column, so converting into it wraps anything
//!     loose in all three. Every element is written with a closing tag.
//!
//!     Widths use underscore fractions over sixths and fifths; full width is `4_4`. Spacing is
//!     stored as `custom_margin="top|right|bottom|left|..."` and links open in a new window
//!     through a separate `url_new_window="on"` flag. Ids go in `_unique_id` as UUIDs.

mod tables;

pub use tables::{GRAMMAR, WIDTHS};

use crate::dialect::{Content, Conversion, ConvertOptions, Dialect, ParseReport, Syntax};
use layout_model::{Component, ComponentType, WidthTable};

pub struct DiviDialect;

impl Dialect for DiviDialect {
    fn name(&self) -> &str {
        GRAMMAR.dialect
    }

    fn description(&self) -> &str {
        "Divi Builder shortcodes (et_pb_*)"
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

#[cfg(test)]
mod tests {
    use super::*;
    use layout_model::AttrKey;

    const PAGE: &str = concat!(
        "[et_pb_section fb_built=\"1\" _builder_version=\"4.16\"][et_pb_row]",
        "[et_pb_column type=\"1_2\"][et_pb_text custom_margin=\"10px||20px||false|false\"]Hi[/et_pb_text][/et_pb_column]",
        "[et_pb_column type=\"1_2\"][et_pb_button button_text=\"Go\" button_url=\"https://x.test\" url_new_window=\"on\"][/et_pb_button][/et_pb_column]",
        "[/et_pb_row][/et_pb_section]"
    );

    fn quiet() -> ConvertOptions {
        ConvertOptions {
            emit_ids: false,
            ..ConvertOptions::default()
        }
    }

    fn parse(text: &str) -> Vec<Component> {
        DiviDialect.parse(&Content::from(text)).components
    }

    #[test]
    fn test_parse_page() {
        let tree = parse(PAGE);
        let section = &tree[0];
        assert_eq!(section.kind, ComponentType::Container);
        assert_eq!(
            section.attributes.get_str(&AttrKey::Other("fb_built".into())),
            Some("1")
        );

        let row = &section.children[0];
        let columns: Vec<_> = row
            .children
            .iter()
            .map(|c| c.attributes.get_str(&AttrKey::Width))
            .collect();
        assert_eq!(columns, vec![Some("50%"), Some("50%")]);

        let text = &row.children[0].children[0];
        assert_eq!(text.content, "Hi");
        assert_eq!(text.styles.get("margin-top").map(String::as_str), Some("10px"));
        assert_eq!(text.styles.get("margin-bottom").map(String::as_str), Some("20px"));

        let button = &row.children[1].children[0];
        assert_eq!(button.kind, ComponentType::Button);
        assert_eq!(button.content, "Go");
        assert_eq!(button.attributes.get_str(&AttrKey::Url), Some("https://x.test"));
        assert_eq!(button.attributes.get_str(&AttrKey::Target), Some("_blank"));
    }

    #[test]
    fn test_round_trip_keeps_native_extras() {
        let output = DiviDialect.convert(&parse(PAGE), &quiet()).output.to_text(false);
        assert!(output.starts_with("[et_pb_section fb_built=\"1\" _builder_version=\"4.16\"]"));
        assert!(output.contains("[et_pb_column type=\"1_2\"]"));
        assert!(output.contains("custom_margin=\"10px||20px|\""));
        assert!(output.contains(
            "[et_pb_button button_url=\"https://x.test\" url_new_window=\"on\" button_text=\"Go\"][/et_pb_button]"
        ));
    }

    #[test]
    fn test_loose_module_gets_full_structure() {
        let tree = vec![Component::new(ComponentType::Text).with_content("Hi")];
        let output = DiviDialect.convert(&tree, &quiet()).output.to_text(false);
        insta::assert_snapshot!(output, @r#"[et_pb_section][et_pb_row][et_pb_column type="4_4"][et_pb_text]Hi[/et_pb_text][/et_pb_column][/et_pb_row][/et_pb_section]"#);
    }

    #[test]
    fn test_unique_ids_on_every_element() {
        let tree = vec![Component::new(ComponentType::Text).with_content("Hi")];
        let output = DiviDialect
            .convert(&tree, &ConvertOptions::default())
            .output
            .to_text(false);
        let reparsed = parse(&output);
        let ids: std::collections::HashSet<_> = reparsed
            .iter()
            .flat_map(|c| c.walk())
            .filter_map(|c| c.metadata.native_id.clone())
            .collect();
        assert_eq!(ids.len(), 4);
        assert!(ids.iter().all(|id| uuid::Uuid::parse_str(id).is_ok()));
    }

    #[test]
    fn test_toggle_and_accordion_item() {
        let tree = parse("[et_pb_toggle title=\"Q\" open=\"on\"]A[/et_pb_toggle]");
        assert_eq!(tree[0].kind, ComponentType::AccordionItem);
        assert_eq!(tree[0].attributes.get_bool(&AttrKey::Open), Some(true));

        let output = DiviDialect.convert(&tree, &quiet()).output.to_text(false);
        assert!(output.contains("[et_pb_toggle title=\"Q\" open=\"on\"]A[/et_pb_toggle]"));
    }

    #[test]
    fn test_other_keys_not_leaked_across_dialects() {
        let mut text = Component::new(ComponentType::Text)
            .with_content("Hi")
            .with_attr(AttrKey::Other("el_class".into()), "x");
        text.metadata.source_dialect = Some("wpbakery".to_string());
        let output = DiviDialect.convert(&[text], &quiet()).output.to_text(false);
        assert!(!output.contains("el_class"));
    }
}
