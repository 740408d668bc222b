//! Canonical components to an Oxygen component tree

use super::codec;
use super::tables::{
    selector_stem, CT_CONTENT, DIALECT, FALLBACK_ELEMENT, HOLDERS, IDS, NESTING, VOCABULARY,
};
use crate::common::dispatch::{fallback_content, fallback_marker, resolve, Target};
use crate::common::ids::IdGenerator;
use crate::common::rules::{ContentSource, ElementSpec};
use crate::common::structure::{shape, Shaped};
use crate::common::values::Codec;
use crate::dialect::{Conversion, Output};
use layout_model::units::truncate2;
use layout_model::{AttrKey, AttrValue, Component, ComponentType};
use serde_json::{json, Map, Value};

pub fn convert(components: &[Component]) -> Conversion {
    let shaped = shape(components, &NESTING);
    let mut emitter = Emitter {
        codec: codec(),
        ids: IdGenerator::new(IDS),
        fallbacks: Vec::new(),
    };
    let top = Place {
        parent: None,
        parent_id: 0,
        depth: 1,
    };
    let mut children = Vec::new();
    for node in &shaped {
        children.extend(emitter.node(node, top));
    }
    Conversion {
        output: Output::Json(json!({
            "id": 0,
            "name": "root",
            "depth": 0,
            "children": children,
        })),
        fallbacks: emitter.fallbacks,
    }
}

/// Where a node is written: its parent element, the parent's `ct_id` and the tree depth
#[derive(Debug, Clone, Copy)]
struct Place<'p> {
    parent: Option<&'p str>,
    parent_id: u64,
    depth: u64,
}

impl<'p> Place<'p> {
    fn below(name: &'p str, id: u64, depth: u64) -> Self {
        Place {
            parent: Some(name),
            parent_id: id,
            depth: depth + 1,
        }
    }
}

struct Emitter {
    codec: Codec<'static>,
    ids: IdGenerator,
    fallbacks: Vec<ComponentType>,
}

impl Emitter {
    fn node(&mut self, shaped: &Shaped<'_>, place: Place<'_>) -> Vec<Value> {
        match resolve(&VOCABULARY, DIALECT, &shaped.node, place.parent, shaped.inner) {
            Target::Element(spec) => self.element(spec, shaped, place),
            Target::Verbatim(name) => vec![self.verbatim(name, shaped, place)],
            Target::Fallback => self.fallback(shaped, place),
        }
    }

    fn element(&mut self, spec: &ElementSpec, shaped: &Shaped<'_>, place: Place<'_>) -> Vec<Value> {
        let component = &*shaped.node;
        let id = self.ids.next_number();
        let same_dialect = component.metadata.is_from(DIALECT);

        let mut original: Map<String, Value> = self
            .codec
            .encode(
                component,
                spec.native,
                &[AttrKey::Width, AttrKey::CssClass],
                same_dialect,
                &mut self.ids,
            )
            .into_iter()
            .collect();
        if spec.kind == ComponentType::Column {
            let percent = truncate2(component.width_percent().unwrap_or(100.0));
            original.insert("width".to_string(), AttrValue::Number(percent).to_json());
            original.insert("width-unit".to_string(), Value::String("%".to_string()));
        }

        let content = shaped.content();
        let mut ct_content = None;
        if let ContentSource::Setting(key) = spec.content {
            if key == CT_CONTENT {
                ct_content = Some(content.to_string());
            } else if !content.is_empty() {
                original.insert(key.to_string(), Value::String(content.to_string()));
            }
        }

        let mut options = self.options(spec.native, id, place.parent_id);
        if let Some(text) = ct_content {
            options.insert(CT_CONTENT.to_string(), Value::String(text));
        }
        if let Some(classes) = component.attributes.get(&AttrKey::CssClass) {
            let classes: Vec<Value> = classes
                .to_plain_string()
                .split_whitespace()
                .map(|class| Value::String(class.to_string()))
                .collect();
            if !classes.is_empty() {
                options.insert("classes".to_string(), Value::Array(classes));
            }
        }
        options.insert("original".to_string(), Value::Object(original));

        let mut children = Vec::new();
        let mut trailing = Vec::new();
        if HOLDERS.contains(&spec.native) {
            let below = Place::below(spec.native, id, place.depth);
            for child in &shaped.children {
                children.extend(self.node(child, below));
            }
        } else {
            for child in &shaped.children {
                trailing.extend(self.node(child, place));
            }
        }

        let mut out = vec![tree_node(id, spec.native, options, place.depth, children)];
        out.extend(trailing);
        out
    }

    /// Re-emit a node this dialect could not interpret, with fresh ids.
    fn verbatim(&mut self, name: &str, shaped: &Shaped<'_>, place: Place<'_>) -> Value {
        let id = self.ids.next_number();
        let mut options = shaped.node.metadata.raw_attributes.clone();
        options.extend(self.options(name, id, place.parent_id));

        let below = Place::below(name, id, place.depth);
        let mut children = Vec::new();
        for child in &shaped.children {
            children.extend(self.node(child, below));
        }
        tree_node(id, name, options, place.depth, children)
    }

    /// A text block carrying the content and an `untranslated-<type>` class. Children follow
    /// it as siblings.
    fn fallback(&mut self, shaped: &Shaped<'_>, place: Place<'_>) -> Vec<Value> {
        let component = &*shaped.node;
        tracing::debug!(dialect = DIALECT, kind = %component.kind, "no native element; using fallback block");
        self.fallbacks.push(component.kind);

        let id = self.ids.next_number();
        let mut options = self.options(FALLBACK_ELEMENT, id, place.parent_id);
        options.insert(
            CT_CONTENT.to_string(),
            Value::String(fallback_content(component, shaped.content())),
        );
        options.insert(
            "classes".to_string(),
            json!([fallback_marker(component.kind)]),
        );
        options.insert("original".to_string(), json!({}));

        let mut out = vec![tree_node(id, FALLBACK_ELEMENT, options, place.depth, Vec::new())];
        for child in &shaped.children {
            out.extend(self.node(child, place));
        }
        out
    }

    fn options(&self, name: &str, id: u64, parent_id: u64) -> Map<String, Value> {
        let mut options = Map::new();
        options.insert("ct_id".to_string(), Value::from(id));
        options.insert("ct_parent".to_string(), Value::from(parent_id));
        options.insert(
            "selector".to_string(),
            Value::String(format!("{}-{}", selector_stem(name), id)),
        );
        options
    }
}

fn tree_node(id: u64, name: &str, options: Map<String, Value>, depth: u64, children: Vec<Value>) -> Value {
    json!({
        "id": id,
        "name": name,
        "options": options,
        "depth": depth,
        "children": children,
    })
}
