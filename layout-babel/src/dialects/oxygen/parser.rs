//! Oxygen JSON to canonical components

use super::codec;
use super::tables::{CT_CONTENT, DIALECT, SHAPE, VOCABULARY, WIDTHS};
use crate::common::rules::ContentSource;
use crate::common::tree::document;
use crate::common::values::Codec;
use crate::dialect::{Content, ParseReport};
use layout_model::json::{lenient_f64, lenient_string, validate_nodes};
use layout_model::{format_percentage, AttrKey, Component, ComponentType, Metadata};
use serde_json::{Map, Value};

/// Top-level nodes: the children of a `root` node, a bare node list, or one node.
fn nodes(document: &Value) -> Result<&[Value], String> {
    let nodes: &[Value] = match document {
        Value::Object(object) if object.get("name").and_then(Value::as_str) == Some("root") => {
            match object.get("children") {
                Some(Value::Array(children)) => children,
                None => &[],
                Some(_) => return Err("root 'children' is not a list".to_string()),
            }
        }
        Value::Object(object) if object.contains_key("name") => std::slice::from_ref(document),
        Value::Array(items) if !items.is_empty() => items,
        _ => return Err("expected an Oxygen root, node list or node".to_string()),
    };
    validate_nodes(nodes, &SHAPE, "$").map_err(|err| err.to_string())?;
    Ok(nodes)
}

pub fn is_valid(content: &Content) -> bool {
    document(content).is_some_and(|doc| nodes(&doc).is_ok())
}

pub fn parse(content: &Content) -> ParseReport {
    let Some(document) = document(content) else {
        return ParseReport::rejected("content is not JSON");
    };
    let nodes = match nodes(&document) {
        Ok(nodes) => nodes,
        Err(reason) => {
            tracing::debug!(%reason, "rejected Oxygen document");
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
        let name = object.get("name").and_then(Value::as_str)?;
        let empty = Map::new();
        let options = object
            .get("options")
            .and_then(Value::as_object)
            .unwrap_or(&empty);
        let original = options
            .get("original")
            .and_then(Value::as_object)
            .unwrap_or(&empty);

        let spec = VOCABULARY.element(name, parent);
        let kind = spec.map_or(ComponentType::Unknown, |spec| spec.kind);
        let mut component = Component::new(kind);
        component.metadata = Metadata::from_dialect(DIALECT, name);
        component.metadata.native_id = options
            .get("ct_id")
            .or_else(|| object.get("id"))
            .and_then(lenient_string);
        component.metadata.raw_attributes = options.clone();

        let content_key = match spec.map(|spec| spec.content) {
            Some(ContentSource::Setting(key)) => Some(key),
            None => Some(CT_CONTENT),
            Some(_) => None,
        };
        if let Some(key) = content_key {
            let text = if key == CT_CONTENT {
                options.get(CT_CONTENT)
            } else {
                original.get(key)
            };
            component.content = text.and_then(lenient_string).unwrap_or_default();
        }

        if let Some(Value::Array(classes)) = options.get("classes") {
            let classes: Vec<String> = classes.iter().filter_map(lenient_string).collect();
            if !classes.is_empty() {
                component.attributes.insert(AttrKey::CssClass, classes.join(" "));
            }
        }

        let is_column = kind == ComponentType::Column;
        for (key, value) in original {
            if is_column && matches!(key.as_str(), "width" | "width-unit") {
                continue;
            }
            if content_key == Some(key.as_str()) {
                continue;
            }
            self.codec.decode(name, key, value, &mut component);
        }

        if is_column {
            if let Some(width) = column_width(original) {
                component.attributes.insert(AttrKey::Width, width);
            }
        }

        if let Some(Value::Array(children)) = object.get("children") {
            component
                .children
                .extend(children.iter().filter_map(|child| self.node(child, Some(name))));
        }
        Some(component)
    }
}

/// Percentage widths only; pixel widths stay unset.
fn column_width(original: &Map<String, Value>) -> Option<String> {
    let unit = original
        .get("width-unit")
        .and_then(Value::as_str)
        .unwrap_or("%");
    if unit != "%" {
        return None;
    }
    let width = original.get("width")?;
    match lenient_f64(width) {
        Some(percent) => Some(format_percentage(percent)),
        None => lenient_string(width).map(|token| WIDTHS.token_to_canonical(&token)),
    }
}
