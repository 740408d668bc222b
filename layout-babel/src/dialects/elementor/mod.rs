//! Elementor dialect
//!
//!     Elementor stores a page as JSON. An export (what the template library writes and
//!     reads) looks like:
//!
//!         {"version": "0.4", "title": "...", "type": "page", "page_settings": {},
//!          "content": [
//!             {"id": "a1b2c3d", "elType": "section", "settings": {...}, "isInner": false,
//!              "elements": [
//!                 {"id": "...", "elType": "column", "settings": {"_column_size": 50, "_inline_size": null},
//!                  "elements": [
//!                     {"id": "...", "elType": "widget", "widgetType": "heading",
//!                      "settings": {"title": "Hello", "header_size": "h2"}, "elements": []}
//!                  ]}
//!              ]}
//!          ]}
//!
//!     Sections are rows: they hold columns, and a section inside a column is an inner
//!     section (`isInner: true`). Flexbox `container` elements hold anything. The parser also
//!     accepts a bare list of elements or a single element.
//!
//! Settings
//!
//!     Links, images, sizes and icons are small objects (`{"url", "is_external", "nofollow"}`,
//!     `{"url", "id", "alt"}`, `{"unit", "size"}`, `{"value", "library"}`), and margins and
//!     paddings are dimension objects with one value per side. Column width is the
//!     `_column_size` preset plus an optional exact `_inline_size`.
//!
//!     Tabs, accordions, toggles and social icons keep their rows in a repeater setting
//!     (`tabs`, `social_icon_list`); each row becomes a child component and is folded back
//!     into the repeater on the way out.

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

pub struct ElementorDialect;

impl Dialect for ElementorDialect {
    fn name(&self) -> &str {
        DIALECT
    }

    fn description(&self) -> &str {
        "Elementor JSON export (sections, columns, containers and widgets)"
    }

    fn syntax(&self) -> Syntax {
        Syntax::JsonTree
    }

    fn width_table(&self) -> &WidthTable {
        &WIDTHS
    }

    fn supports(&self, kind: ComponentType) -> bool {
        kind.is_structural() || VOCABULARY.supports(kind)
    }

    fn is_valid_content(&self, content: &Content) -> bool {
        parser::is_valid(content)
    }

    fn parse(&self, content: &Content) -> ParseReport {
        parser::parse(content)
    }

    fn convert(&self, components: &[Component], options: &ConvertOptions) -> Conversion {
        converter::convert(components, options)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use layout_model::AttrKey;
    use serde_json::{json, Value};

    fn page() -> Value {
        json!({
            "version": "0.4",
            "title": "Home",
            "type": "page",
            "content": [{
                "id": "1a2b3c4",
                "elType": "section",
                "settings": {"background_color": "#fafafa", "padding": {"unit": "px", "top": "20", "right": "0", "bottom": "20", "left": "0", "isLinked": false}},
                "isInner": false,
                "elements": [{
                    "id": "2b3c4d5",
                    "elType": "column",
                    "settings": {"_column_size": 33, "_inline_size": null},
                    "elements": [
                        {"id": "3c4d5e6", "elType": "widget", "widgetType": "heading",
                         "settings": {"title": "Welcome", "header_size": "h1", "link": {"url": "https://x.test", "is_external": "on", "nofollow": ""}},
                         "elements": []},
                        {"id": "4d5e6f7", "elType": "widget", "widgetType": "tabs",
                         "settings": {"tabs": [
                             {"_id": "t1", "tab_title": "One", "tab_content": "First"},
                             {"_id": "t2", "tab_title": "Two", "tab_content": "Second"}
                         ]},
                         "elements": []}
                    ]
                }, {
                    "id": "5e6f7a8",
                    "elType": "column",
                    "settings": {"_column_size": 66, "_inline_size": 45.5},
                    "elements": [
                        {"id": "6f7a8b9", "elType": "widget", "widgetType": "image",
                         "settings": {"image": {"url": "https://x.test/a.png", "id": 12, "alt": "A"}},
                         "elements": []}
                    ]
                }]
            }]
        })
    }

    fn parse(value: Value) -> Vec<Component> {
        ElementorDialect.parse(&Content::Json(value)).components
    }

    fn convert(components: &[Component]) -> Value {
        let options = ConvertOptions {
            emit_ids: false,
            ..ConvertOptions::default()
        };
        match ElementorDialect.convert(components, &options).output {
            crate::dialect::Output::Json(value) => value,
            other => panic!("expected JSON, got {:?}", other),
        }
    }

    #[test]
    fn test_parse_export() {
        let tree = parse(page());
        let section = &tree[0];
        assert_eq!(section.kind, ComponentType::Row);
        assert_eq!(section.metadata.native_id.as_deref(), Some("1a2b3c4"));
        assert_eq!(
            section.attributes.get_str(&AttrKey::BackgroundColor),
            Some("#fafafa")
        );
        assert_eq!(section.styles.get("padding-top").map(String::as_str), Some("20px"));

        let first = &section.children[0];
        assert_eq!(first.attributes.get_str(&AttrKey::Width), Some("33.33%"));
        let second = &section.children[1];
        assert_eq!(second.attributes.get_str(&AttrKey::Width), Some("45.5%"));

        let heading = &first.children[0];
        assert_eq!(heading.content, "Welcome");
        assert_eq!(heading.attributes.get_str(&AttrKey::Level), Some("h1"));
        assert_eq!(heading.attributes.get_str(&AttrKey::Url), Some("https://x.test"));
        assert_eq!(heading.attributes.get_str(&AttrKey::Target), Some("_blank"));

        let tabs = &first.children[1];
        assert_eq!(tabs.kind, ComponentType::Tabs);
        let titles: Vec<_> = tabs
            .children
            .iter()
            .map(|tab| (tab.kind, tab.attributes.get_str(&AttrKey::Heading), tab.content.as_str()))
            .collect();
        assert_eq!(
            titles,
            vec![
                (ComponentType::Tab, Some("One"), "First"),
                (ComponentType::Tab, Some("Two"), "Second"),
            ]
        );

        let image = &second.children[0];
        assert_eq!(image.attributes.get_str(&AttrKey::ImageUrl), Some("https://x.test/a.png"));
        assert_eq!(image.attributes.get_str(&AttrKey::AltText), Some("A"));
    }

    #[test]
    fn test_round_trip_restores_compound_settings() {
        let output = convert(&parse(page()));
        let section = &output["content"][0];
        assert_eq!(section["elType"], "section");
        assert_eq!(section["settings"]["padding"]["top"], "20");
        assert_eq!(section["settings"]["padding"]["unit"], "px");

        let first = &section["elements"][0];
        assert_eq!(first["settings"]["_column_size"], 33);
        assert_eq!(first["settings"]["_inline_size"], Value::Null);
        let second = &section["elements"][1];
        assert_eq!(second["settings"]["_column_size"], 50);
        assert_eq!(second["settings"]["_inline_size"], 45.5);

        let heading = &first["elements"][0];
        assert_eq!(heading["widgetType"], "heading");
        assert_eq!(heading["settings"]["title"], "Welcome");
        assert_eq!(heading["settings"]["link"]["is_external"], "on");

        let tabs = &first["elements"][1]["settings"]["tabs"];
        assert_eq!(tabs[1]["tab_title"], "Two");
        assert_eq!(tabs[1]["tab_content"], "Second");
    }

    #[test]
    fn test_export_shape() {
        let output = convert(&[Component::new(ComponentType::Text).with_content("Hi")]);
        let keys: Vec<_> = output.as_object().unwrap().keys().cloned().collect();
        assert_eq!(keys, vec!["version", "title", "type", "page_settings", "content"]);
        insta::assert_snapshot!(output["content"].to_string(), @r#"[{"elType":"section","settings":{},"elements":[{"elType":"column","settings":{"_column_size":100,"_inline_size":null},"elements":[{"elType":"widget","settings":{"editor":"Hi"},"elements":[],"isInner":false,"widgetType":"text-editor"}],"isInner":false}],"isInner":false}]"#);
    }

    #[test]
    fn test_ids_are_short_hex() {
        let output = ElementorDialect
            .convert(
                &[Component::new(ComponentType::Text).with_content("Hi")],
                &ConvertOptions::default(),
            )
            .output;
        let json = output.as_json().unwrap();
        let id = json["content"][0]["id"].as_str().unwrap();
        assert_eq!(id.len(), 7);
        assert_ne!(id, json["content"][0]["elements"][0]["id"].as_str().unwrap());
    }

    #[test]
    fn test_wpbakery_tab_children_fold_into_rows() {
        let tab = Component::new(ComponentType::Tab)
            .with_attr(AttrKey::Heading, "One")
            .with_child(Component::new(ComponentType::Text).with_content("Alpha"))
            .with_child(Component::new(ComponentType::Text).with_content("Beta"));
        let output = convert(&[Component::new(ComponentType::Tabs).with_child(tab)]);
        let widget = &output["content"][0]["elements"][0]["elements"][0];
        assert_eq!(widget["widgetType"], "tabs");
        assert_eq!(widget["settings"]["tabs"][0]["tab_content"], "Alpha\n\nBeta");
    }

    #[test]
    fn test_unsupported_inside_widget_list_falls_back() {
        let output = ElementorDialect.convert(
            &[Component::new(ComponentType::Tab).with_content("Loose")],
            &ConvertOptions::default(),
        );
        assert_eq!(output.fallbacks, vec![ComponentType::Tab]);
        let json = output.output.as_json().unwrap().clone();
        let widget = &json["content"][0]["elements"][0]["elements"][0];
        assert_eq!(widget["widgetType"], "text-editor");
        assert_eq!(widget["settings"]["_css_classes"], "untranslated-tab");
    }

    #[test]
    fn test_shape_checks() {
        assert!(ElementorDialect.is_valid_content(&Content::Json(page())));
        assert!(ElementorDialect.is_valid_content(&Content::from(page().to_string())));
        let missing_type = json!([{"elType": "widget", "settings": {}}]);
        assert!(!ElementorDialect.is_valid_content(&Content::Json(missing_type)));
        assert!(!ElementorDialect.is_valid_content(&Content::from("[row][/row]")));
        assert!(parse(json!({"name": "root", "children": []})).is_empty());
    }

    #[test]
    fn test_unknown_widget_round_trips_verbatim() {
        let doc = json!([{"id": "1", "elType": "widget", "widgetType": "price-table",
                           "settings": {"heading": "Pro", "price": "9"}, "elements": []}]);
        let tree = parse(doc);
        assert_eq!(tree[0].kind, ComponentType::Unknown);
        let output = convert(&tree);
        let widget = &output["content"][0]["elements"][0]["elements"][0];
        assert_eq!(widget["widgetType"], "price-table");
        assert_eq!(widget["settings"], json!({"heading": "Pro", "price": "9"}));
    }
}
