//! Tag forest to canonical components

use super::BracketGrammar;
use crate::common::content::split_title_body;
use crate::common::rules::{ContentShape, ContentSource};
use crate::common::values::Codec;
use crate::dialect::ParseReport;
use layout_model::tokenizer::writer::unescape_text;
use layout_model::tokenizer::TagNode;
use layout_model::{tokenize, AttrKey, Component, ComponentType, Metadata, TokenizerOptions};
use serde_json::{Map, Value};

pub fn parse(grammar: &BracketGrammar, text: &str) -> ParseReport {
    let voids = grammar.void_elements();
    let tokenized = tokenize(text, &TokenizerOptions::with_self_closing(&voids));
    for warning in &tokenized.warnings {
        tracing::warn!(dialect = grammar.dialect, "{}", warning);
    }

    let reader = Reader {
        grammar,
        codec: grammar.codec(),
    };
    let components = tokenized
        .nodes
        .iter()
        .filter_map(|node| reader.node(node, None))
        .collect();

    ParseReport {
        components,
        warnings: tokenized.warnings.iter().map(ToString::to_string).collect(),
    }
}

struct Reader<'g> {
    grammar: &'g BracketGrammar,
    codec: Codec<'g>,
}

impl Reader<'_> {
    fn node(&self, node: &TagNode, parent: Option<&str>) -> Option<Component> {
        if node.is_text() {
            let text = node.content();
            if text.is_empty() {
                return None;
            }
            let mut component = Component::new(ComponentType::Text).with_content(unescape_text(text));
            component.metadata.source_dialect = Some(self.grammar.dialect.to_string());
            return Some(component);
        }

        let spec = self.grammar.vocabulary.element(&node.name, parent);
        let kind = spec.map_or(ComponentType::Unknown, |spec| spec.kind);
        let mut component = Component::new(kind);
        component.metadata = Metadata::from_dialect(self.grammar.dialect, &node.name);
        component.metadata.raw_attributes = node
            .attributes
            .iter()
            .map(|(k, v)| (k.clone(), Value::String(v.clone())))
            .collect::<Map<String, Value>>();

        let content_source = spec.map_or(ContentSource::Inner, |spec| spec.content);
        let id_key = self
            .grammar
            .ids
            .filter(|slot| slot.applies_to(&node.name))
            .map(|slot| slot.key);

        for (key, value) in &node.attributes {
            if Some(key.as_str()) == id_key {
                component.metadata.native_id = Some(value.clone());
                continue;
            }
            if matches!(content_source, ContentSource::Setting(setting) if setting == key.as_str()) {
                component.content = value.trim().to_string();
                continue;
            }
            self.codec
                .decode(&node.name, key, &Value::String(value.clone()), &mut component);
        }

        let inner = node.content();
        match content_source {
            ContentSource::InnerAsImage => {
                if !inner.is_empty() {
                    component.attributes.insert(AttrKey::ImageUrl, inner);
                }
            }
            _ if component.content.is_empty() => component.content = unescape_text(inner).into_owned(),
            _ => {}
        }

        if spec.is_some_and(|spec| spec.shape == ContentShape::TitleBody)
            && !component.attributes.contains(&AttrKey::Heading)
        {
            if let (Some(title), body) = split_title_body(&component.content) {
                component.attributes.insert(AttrKey::Heading, title);
                component.content = body;
            }
        }

        component.children = node
            .children
            .iter()
            .filter_map(|child| self.node(child, Some(&node.name)))
            .collect();

        if !node.closed {
            tracing::debug!(dialect = self.grammar.dialect, tag = %node.name, "parsed unterminated tag");
        }
        Some(component)
    }
}
