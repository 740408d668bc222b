//! Canonical components to an Elementor export

use super::codec;
use super::tables::{
    repeater, DIALECT, FALLBACK_MARKER, FALLBACK_WIDGET, IDS, NESTING, STRUCTURAL, VOCABULARY,
    WIDTHS,
};
use crate::common::dispatch::{fallback_content, fallback_marker, resolve, Target};
use crate::common::ids::IdGenerator;
use crate::common::rules::{ContentSource, ElementSpec};
use crate::common::structure::{shape, Shaped};
use crate::common::values::Codec;
use crate::dialect::{Conversion, ConvertOptions, Output};
use layout_model::units::truncate2;
use layout_model::{AttrValue, Component, ComponentType};
use serde_json::{json, Map, Value};

pub fn convert(components: &[Component], options: &ConvertOptions) -> Conversion {
    let shaped = shape(components, &NESTING);
    let mut emitter = Emitter {
        codec: codec(),
        ids: IdGenerator::new(IDS),
        emit_ids: options.emit_ids,
        fallbacks: Vec::new(),
    };
    let mut content = Vec::new();
    for node in &shaped {
        content.extend(emitter.node(node, None));
    }
    Conversion {
        output: Output::Json(export(content)),
        fallbacks: emitter.fallbacks,
    }
}

/// Wrap top-level elements in a template export object.
fn export(content: Vec<Value>) -> Value {
    json!({
        "version": "0.4",
        "title": "Translated layout",
        "type": "page",
        "page_settings": {},
        "content": content,
    })
}

struct Emitter {
    codec: Codec<'static>,
    ids: IdGenerator,
    emit_ids: bool,
    fallbacks: Vec<ComponentType>,
}

impl Emitter {
    /// Elements for one node; more than one when children cannot live inside it.
    fn node(&mut self, shaped: &Shaped<'_>, parent: Option<&str>) -> Vec<Value> {
        match resolve(&VOCABULARY, DIALECT, &shaped.node, parent, shaped.inner) {
            Target::Element(spec) => self.element(spec, shaped, parent),
            Target::Verbatim(name) => vec![self.verbatim(name, shaped)],
            Target::Fallback => self.fallback(shaped, parent),
        }
    }

    fn element(&mut self, spec: &ElementSpec, shaped: &Shaped<'_>, parent: Option<&str>) -> Vec<Value> {
        let component = &*shaped.node;
        let mut settings = self.settings(spec, component, shaped.content());
        let mut elements = Vec::new();
        let mut trailing = Vec::new();

        if STRUCTURAL.contains(&spec.native) {
            if spec.kind == ComponentType::Column {
                settings = with_column_size(component, settings);
            }
            for child in &shaped.children {
                elements.extend(self.node(child, Some(spec.native)));
            }
        } else if let Some(rows) = repeater(spec.native) {
            let item = VOCABULARY.element(rows.item, Some(rows.widget));
            let mut items = Vec::new();
            for child in &shaped.children {
                match item.filter(|item| item.kind == child.kind()) {
                    Some(item) => items.push(self.row(item, child)),
                    None => trailing.extend(self.node(child, parent)),
                }
            }
            settings.insert(rows.field.to_string(), Value::Array(items));
        } else {
            for child in &shaped.children {
                trailing.extend(self.node(child, parent));
            }
        }

        let mut out = vec![self.wrap(spec.native, settings, elements, shaped.inner)];
        out.extend(trailing);
        out
    }

    /// A repeater row. Rows hold no elements, so the text of everything below the node is
    /// folded into its content.
    fn row(&mut self, spec: &ElementSpec, shaped: &Shaped<'_>) -> Value {
        let content = folded_text(shaped);
        let fields = self.settings(spec, &shaped.node, &content);
        let mut row = Map::new();
        if self.emit_ids {
            row.insert("_id".to_string(), Value::String(self.ids.next_id()));
        }
        row.extend(fields);
        Value::Object(row)
    }

    fn settings(&mut self, spec: &ElementSpec, component: &Component, content: &str) -> Map<String, Value> {
        let same_dialect = component.metadata.is_from(DIALECT);
        let mut settings: Map<String, Value> = self
            .codec
            .encode(component, spec.native, &[], same_dialect, &mut self.ids)
            .into_iter()
            .collect();
        if let ContentSource::Setting(key) = spec.content {
            if !content.is_empty() {
                settings.insert(key.to_string(), Value::String(content.to_string()));
            }
        }
        settings
    }

    fn verbatim(&mut self, name: &str, shaped: &Shaped<'_>) -> Value {
        let settings = shaped.node.metadata.raw_attributes.clone();
        let mut elements = Vec::new();
        for child in &shaped.children {
            elements.extend(self.node(child, Some(name)));
        }
        self.wrap(name, settings, elements, shaped.inner)
    }

    /// A text-editor widget carrying the content and an `untranslated-<type>` class. Children
    /// follow it as siblings.
    fn fallback(&mut self, shaped: &Shaped<'_>, parent: Option<&str>) -> Vec<Value> {
        let component = &*shaped.node;
        tracing::debug!(dialect = DIALECT, kind = %component.kind, "no native element; using fallback widget");
        self.fallbacks.push(component.kind);

        let mut settings = Map::new();
        settings.insert(
            "editor".to_string(),
            Value::String(fallback_content(component, shaped.content())),
        );
        settings.insert(
            FALLBACK_MARKER.to_string(),
            Value::String(fallback_marker(component.kind)),
        );
        let mut out = vec![self.wrap(FALLBACK_WIDGET, settings, Vec::new(), false)];
        for child in &shaped.children {
            out.extend(self.node(child, parent));
        }
        out
    }

    fn wrap(&mut self, name: &str, settings: Map<String, Value>, elements: Vec<Value>, inner: bool) -> Value {
        let structural = STRUCTURAL.contains(&name);
        let mut node = Map::new();
        if self.emit_ids {
            node.insert("id".to_string(), Value::String(self.ids.next_id()));
        }
        let el_type = if structural { name } else { "widget" };
        node.insert("elType".to_string(), Value::String(el_type.to_string()));
        node.insert("settings".to_string(), Value::Object(settings));
        node.insert("elements".to_string(), Value::Array(elements));
        node.insert("isInner".to_string(), Value::Bool(structural && inner));
        if !structural {
            node.insert("widgetType".to_string(), Value::String(name.to_string()));
        }
        Value::Object(node)
    }
}

/// `_column_size` is the nearest preset; `_inline_size` the exact width, or null when the
/// preset already is exact.
fn with_column_size(component: &Component, settings: Map<String, Value>) -> Map<String, Value> {
    let percent = truncate2(component.width_percent().unwrap_or(100.0));
    let token = WIDTHS.to_token(percent);
    let size = token
        .parse::<u64>()
        .map(Value::from)
        .unwrap_or_else(|_| Value::String(token.to_string()));
    let inline = if (WIDTHS.to_percentage(token) - percent).abs() < 0.005 {
        Value::Null
    } else {
        AttrValue::Number(percent).to_json()
    };

    let mut out = Map::new();
    out.insert("_column_size".to_string(), size);
    out.insert("_inline_size".to_string(), inline);
    out.extend(settings);
    out
}

fn folded_text(shaped: &Shaped<'_>) -> String {
    let mut parts = Vec::new();
    collect_text(shaped, &mut parts);
    parts.join("\n\n")
}

fn collect_text<'a>(shaped: &'a Shaped<'_>, parts: &mut Vec<&'a str>) {
    let content = shaped.content().trim();
    if !content.is_empty() {
        parts.push(content);
    }
    for child in &shaped.children {
        collect_text(child, parts);
    }
}
