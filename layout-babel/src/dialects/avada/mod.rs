//! Avada (Fusion Builder) dialect
//!
//!     `[fusion_builder_container][fusion_builder_row][fusion_builder_column type="1_2"]...`
//!     markup. Like Divi it only renders inside container > row > column, and nested rows
//!     use the `_inner` row and column elements.
//!
//!     Avada keeps a few values in odd places: image frames carry their URL as inner text,
//!     content boxes put the title and the body in one block separated by a blank line, and
//!     heading levels are bare numbers (`size="2"`). Booleans are `yes`/`no`. There is no
//!     generated id.

mod tables;

pub use tables::{GRAMMAR, WIDTHS};

use crate::dialect::{Content, Conversion, ConvertOptions, Dialect, ParseReport, Syntax};
use layout_model::{Component, ComponentType, WidthTable};

pub struct AvadaDialect;

impl Dialect for AvadaDialect {
    fn name(&self) -> &str {
        GRAMMAR.dialect
    }

    fn description(&self) -> &str {
        "Avada Fusion Builder shortcodes (fusion_*)"
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
        "[fusion_builder_container hundred_percent=\"no\"][fusion_builder_row]",
        "[fusion_builder_column type=\"1_3\"]",
        "[fusion_title size=\"2\" content_align=\"center\"]Welcome[/fusion_title]",
        "[fusion_imageframe alt=\"Logo\" link=\"https://x.test\" linktarget=\"_blank\"]https://x.test/logo.png[/fusion_imageframe]",
        "[/fusion_builder_column][/fusion_builder_row][/fusion_builder_container]"
    );

    fn parse(text: &str) -> Vec<Component> {
        AvadaDialect.parse(&Content::from(text)).components
    }

    fn convert(components: &[Component]) -> String {
        AvadaDialect
            .convert(components, &ConvertOptions::default())
            .output
            .to_text(false)
    }

    #[test]
    fn test_parse_page() {
        let tree = parse(PAGE);
        let container = &tree[0];
        assert_eq!(container.attributes.get_bool(&AttrKey::FullWidth), Some(false));

        let column = &container.children[0].children[0];
        assert_eq!(column.attributes.get_str(&AttrKey::Width), Some("33.33%"));

        let title = &column.children[0];
        assert_eq!(title.kind, ComponentType::Heading);
        assert_eq!(title.content, "Welcome");
        assert_eq!(title.attributes.get_str(&AttrKey::Level), Some("h2"));
        assert_eq!(title.attributes.get_str(&AttrKey::Alignment), Some("center"));

        let image = &column.children[1];
        assert_eq!(image.kind, ComponentType::Image);
        assert_eq!(image.content, "");
        assert_eq!(
            image.attributes.get_str(&AttrKey::ImageUrl),
            Some("https://x.test/logo.png")
        );
        assert_eq!(image.attributes.get_str(&AttrKey::Target), Some("_blank"));
    }

    #[test]
    fn test_round_trip() {
        let output = convert(&parse(PAGE));
        assert!(output.contains("[fusion_builder_column type=\"1_3\"]"));
        assert!(output.contains("[fusion_title size=\"2\" content_align=\"center\"]Welcome[/fusion_title]"));
        assert!(output.contains(
            "[fusion_imageframe alt=\"Logo\" link=\"https://x.test\" linktarget=\"_blank\"]https://x.test/logo.png[/fusion_imageframe]"
        ));
    }

    #[test]
    fn test_content_box_shares_one_block() {
        let tree = parse("[fusion_content_box]Fast\n\nShips in a day.[/fusion_content_box]");
        let card = &tree[0];
        assert_eq!(card.kind, ComponentType::Card);
        assert_eq!(card.attributes.get_str(&AttrKey::Heading), Some("Fast"));
        assert_eq!(card.content, "Ships in a day.");
        assert!(convert(&tree)
            .contains("[fusion_content_box]Fast\n\nShips in a day.[/fusion_content_box]"));
    }

    #[test]
    fn test_numbers_and_toggles() {
        let tree = parse(
            "[fusion_counter_box value=\"75\"]Clients[/fusion_counter_box][fusion_toggle title=\"Q\" open=\"yes\"]A[/fusion_toggle]",
        );
        assert_eq!(tree[0].attributes.get_number(&AttrKey::Number), Some(75.0));
        assert_eq!(tree[0].content, "Clients");
        assert_eq!(tree[1].kind, ComponentType::AccordionItem);
        assert_eq!(tree[1].attributes.get_bool(&AttrKey::Open), Some(true));
    }

    #[test]
    fn test_loose_text_gets_full_structure() {
        let tree = vec![Component::new(ComponentType::Text).with_content("Hi")];
        insta::assert_snapshot!(convert(&tree), @r#"[fusion_builder_container][fusion_builder_row][fusion_builder_column type="1_1"][fusion_text]Hi[/fusion_text][/fusion_builder_column][/fusion_builder_row][/fusion_builder_container]"#);
    }

    #[test]
    fn test_social_icons_fall_back() {
        let tree = vec![Component::new(ComponentType::SocialIcons)
            .with_child(Component::new(ComponentType::Icon).with_attr(AttrKey::Icon, "fa-twitter"))];
        let conversion = AvadaDialect.convert(&tree, &ConvertOptions::default());
        assert_eq!(conversion.fallbacks, vec![ComponentType::SocialIcons]);
        let output = conversion.output.to_text(false);
        assert!(output.contains(
            "[fusion_text class=\"untranslated-social_icons\"][/fusion_text][fusion_fontawesome icon=\"fa-twitter\"]"
        ));
    }
}
