//! Elementor JSON to canonical components

use super::tables::{repeater, Repeater, DIALECT, SHAPE, VOCABULARY, WIDTHS};
use super::codec;
use crate::common::rules::ContentSource;
use crate::common::tree::document;
use crate::common::values::Codec;
use crate::dialect::{Content, ParseReport};
use layout_model::json::{lenient_f64, lenient_string, validate_nodes};
use layout_model::{format_percentage, AttrKey, Component, ComponentType, Metadata};
use serde_json::{Map, Value};

/// Top-level elements of a document: the `content` of an export object, a bare list of
/// elements, or one element on its own.
fn elements(document: &Value) -> Result<&[Value], String> {
    let nodes: &[Value] = match document {
        Value::Object(object) if object.contains_key("content") => object
            .get("content")
            .and_then(Value::as_array)
            .map(Vec::as_slice)
            .ok_or_else(|| "export 'content' is not a list".to_string())?,
        Value::Object(object) if object.contains_key("elType") => std::slice::from_ref(document),
        Value::Array(items) if !items.is_empty() => items,
        _ => return Err("expected an Elementor export, element list or element".to_string()),
    };
    validate_nodes(nodes, &SHAPE, "$").map_err(|err| err.to_string())?;
    Ok(nodes)
}

pub fn is_valid(content: &Content) -> bool {
    document(content).is_some_and(|doc| elements(&doc).is_ok())
}

pub fn parse(content: &Content) -> ParseReport {
    let Some(document) = document(content) else {
        return ParseReport::rejected("content is not JSON");
    };
    let nodes = match elements(&document) {
        Ok(nodes) => nodes,
        Err(reason) => {
            tracing::debug!(%reason, "rejected Elementor document");
            return ParseReport::rejected(reason);
        }
    };

    let reader = Reader { codec: codec() };
    ParseReport {
        components: nodes
            .iter()
            .filter_map(|node| reader.node(node, None))
            .collect(),
        warnings: Vec::new(),
    }
}

struct Reader {
    codec: Codec<'static>,
}

impl Reader {
    fn node(&self, node: &Value, parent: Option<&str>) -> Option<Component> {
        let object = node.as_object()?;
        let el_type = object.get("elType").and_then(Value::as_str)?;
        let native = match el_type {
            "widget" => object.get("widgetType").and_then(Value::as_str)?,
            other => other,
        };
        let empty = Map::new();
        let settings = object
            .get("settings")
            .and_then(Value::as_object)
            .unwrap_or(&empty);

        let spec = VOCABULARY.element(native, parent);
        let mut component = Component::new(spec.map_or(ComponentType::Unknown, |spec| spec.kind));
        component.metadata = Metadata::from_dialect(DIALECT, native);
        component.metadata.native_id = object.get("id").and_then(lenient_string);
        component.metadata.raw_attributes = settings.clone();

        let content_source = spec.map_or(ContentSource::None, |spec| spec.content);
        let rows = spec.and(repeater(native));
        let is_column = el_type == "column";

        for (key, value) in settings {
            if is_column && matches!(key.as_str(), "_column_size" | "_inline_size") {
                continue;
            }
            if rows.is_some_and(|r| r.field == key) {
                continue;
            }
            if matches!(content_source, ContentSource::Setting(setting) if setting == key) {
                component.content = lenient_string(value).unwrap_or_default();
                continue;
            }
            self.codec.decode(native, key, value, &mut component);
        }

        if is_column {
            if let Some(width) = column_width(settings) {
                component.attributes.insert(AttrKey::Width, width);
            }
        }

        if let Some(rows) = rows {
            if let Some(Value::Array(items)) = settings.get(rows.field) {
                component
                    .children
                    .extend(items.iter().filter_map(|item| self.row(rows, item)));
            }
        }

        if let Some(Value::Array(children)) = object.get("elements") {
            component
                .children
                .extend(children.iter().filter_map(|child| self.node(child, Some(native))));
        }
        Some(component)
    }

    /// One repeater row as a child component.
    fn row(&self, rows: &Repeater, item: &Value) -> Option<Component> {
        let fields = item.as_object()?;
        let spec = VOCABULARY.element(rows.item, Some(rows.widget))?;
        let mut component = Component::new(spec.kind);
        component.metadata = Metadata::from_dialect(DIALECT, rows.item);
        component.metadata.native_id = fields.get("_id").and_then(lenient_string);
        component.metadata.raw_attributes = fields.clone();

        for (key, value) in fields {
            if key == "_id" {
                continue;
            }
            if matches!(spec.content, ContentSource::Setting(setting) if setting == key) {
                component.content = lenient_string(value).unwrap_or_default();
                continue;
            }
            self.codec.decode(rows.item, key, value, &mut component);
        }
        Some(component)
    }
}

/// `_inline_size` is the exact width when set; otherwise the `_column_size` preset.
fn column_width(settings: &Map<String, Value>) -> Option<String> {
    if let Some(exact) = settings.get("_inline_size").and_then(lenient_f64) {
        return Some(format_percentage(exact));
    }
    settings
        .get("_column_size")
        .and_then(lenient_string)
        .map(|token| WIDTHS.token_to_canonical(&token))
}
