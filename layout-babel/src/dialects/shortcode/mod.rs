//! Generic shortcode dialect
//!
//!     The builder-neutral bracket vocabulary: `[section]`, `[row]`, `[column width="1/2"]`,
//!     `[heading level="h2"]`, `[text]`, `[image src=".." /]` and so on, one tag per
//!     component type. It is the loosest dialect: any node may sit at the top level,
//!     columns and sections may hold text directly, and every type has a native tag.
//!
//!     Tags that are void unless written with a closer: image, divider, spacer, video, icon,
//!     social_icon, gallery, form, menu, map.
//!
//!     Ids are written as `id="node-N"`. Cards keep their title and body in one block,
//!     separated by a blank line.

mod tables;

pub use tables::{GRAMMAR, WIDTHS};

use crate::dialect::{Content, Conversion, ConvertOptions, Dialect, ParseReport, Syntax};
use layout_model::{Component, ComponentType, WidthTable};

/// Generic shortcode dialect
pub struct ShortcodeDialect;

impl Dialect for ShortcodeDialect {
    fn name(&self) -> &str {
        GRAMMAR.dialect
    }

    fn description(&self) -> &str {
        "Generic bracket shortcodes: [section], [row], [column], [heading], ..."
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
    use crate::dialect::Output;
    use layout_model::AttrKey;

    fn parse(text: &str) -> Vec<Component> {
        ShortcodeDialect.parse(&Content::from(text)).components
    }

    fn convert(components: &[Component]) -> String {
        let options = ConvertOptions {
            emit_ids: false,
            ..ConvertOptions::default()
        };
        match ShortcodeDialect.convert(components, &options).output {
            Output::Text(text) => text,
            Output::Json(_) => panic!("shortcode emits text"),
        }
    }

    #[test]
    fn test_same_name_nesting() {
        let tree = parse("[section][section]inner[/section][/section]");
        assert_eq!(tree.len(), 1);
        assert_eq!(tree[0].kind, ComponentType::Container);
        assert_eq!(tree[0].children.len(), 1);
        assert_eq!(tree[0].children[0].content, "inner");
    }

    #[test]
    fn test_row_with_columns() {
        let tree = parse(
            "[row][column width=\"1/2\"]Hello[/column][column width=\"1/2\"]World[/column][/row]",
        );
        let row = &tree[0];
        assert_eq!(row.kind, ComponentType::Row);
        let widths: Vec<_> = row
            .children
            .iter()
            .map(|c| c.attributes.get_str(&AttrKey::Width))
            .collect();
        assert_eq!(widths, vec![Some("50%"), Some("50%")]);
        assert_eq!(row.children[0].content, "Hello");
        assert_eq!(row.children[1].content, "World");
        assert!(row
            .walk()
            .all(|node| node.metadata.is_from("shortcode")));
    }

    #[test]
    fn test_round_trip_is_compact() {
        let source =
            "[row][column width=\"1/2\"]Hello[/column][column width=\"1/2\"]World[/column][/row]";
        insta::assert_snapshot!(convert(&parse(source)), @r#"[row][column width="1/2"]Hello[/column][column width="1/2"]World[/column][/row]"#);
    }

    #[test]
    fn test_card_title_and_body() {
        let tree = parse("[card]Fast\n\nShips in a day.[/card]");
        assert_eq!(tree[0].kind, ComponentType::Card);
        assert_eq!(tree[0].attributes.get_str(&AttrKey::Heading), Some("Fast"));
        assert_eq!(tree[0].content, "Ships in a day.");
        assert_eq!(convert(&tree), "[card]Fast\n\nShips in a day.[/card]");
    }

    #[test]
    fn test_void_elements() {
        let tree = parse("[column][image src=\"a.png\" alt=\"A\"][divider][/column]");
        let column = &tree[0];
        assert_eq!(column.children.len(), 2);
        assert_eq!(
            column.children[0].attributes.get_str(&AttrKey::ImageUrl),
            Some("a.png")
        );
        insta::assert_snapshot!(convert(&tree), @r#"[row][column][image src="a.png" alt="A"][divider][/column][/row]"#);
    }

    #[test]
    fn test_unknown_tag_kept_verbatim() {
        let source = "[row][column][pricing_table plan=\"pro\"]$9[/pricing_table][/column][/row]";
        let tree = parse(source);
        let unknown = &tree[0].children[0].children[0];
        assert_eq!(unknown.kind, ComponentType::Unknown);
        assert_eq!(unknown.metadata.native_name.as_deref(), Some("pricing_table"));
        assert_eq!(unknown.content, "$9");
        assert_eq!(convert(&tree), source);
    }

    #[test]
    fn test_foreign_unknown_goes_to_fallback() {
        let mut unknown = Component::new(ComponentType::Unknown).with_content("Legacy");
        unknown.metadata.source_dialect = Some("divi".to_string());
        unknown.metadata.native_name = Some("et_pb_pricing".to_string());
        let conversion = ShortcodeDialect.convert(&[unknown], &ConvertOptions::default());
        assert_eq!(conversion.fallbacks, vec![ComponentType::Unknown]);
        assert_eq!(
            conversion.output.to_text(false),
            "[text class=\"untranslated-unknown\"]Legacy[/text]"
        );
    }

    #[test]
    fn test_ids_are_sequential() {
        let tree = parse("[row][column]A[/column][/row]");
        let output = ShortcodeDialect
            .convert(&tree, &ConvertOptions::default())
            .output
            .to_text(false);
        assert_eq!(output, "[row id=\"node-1\"][column id=\"node-2\"]A[/column][/row]");

        // Ids are read into metadata, not attributes
        let reparsed = parse(&output);
        assert_eq!(reparsed[0].metadata.native_id.as_deref(), Some("node-1"));
        assert!(reparsed[0].attributes.is_empty());
    }

    #[test]
    fn test_validity_check() {
        assert!(ShortcodeDialect.is_valid_content(&Content::from("[row][/row]")));
        assert!(!ShortcodeDialect.is_valid_content(&Content::from("[vc_row][/vc_row]")));
        assert!(!ShortcodeDialect.is_valid_content(&Content::from("no tags at all")));
        assert!(ShortcodeDialect
            .parse(&Content::from("[et_pb_section][/et_pb_section]"))
            .components
            .is_empty());
    }

    #[test]
    fn test_top_level_text_between_tags() {
        let tree = parse("Intro [divider] Outro");
        let kinds: Vec<_> = tree.iter().map(|c| c.kind).collect();
        assert_eq!(
            kinds,
            vec![ComponentType::Text, ComponentType::Divider, ComponentType::Text]
        );
        assert_eq!(tree[2].content, "Outro");
    }
}
