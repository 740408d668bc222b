//! Canonical components to markup

use super::BracketGrammar;
use crate::common::content::join_title_body;
use crate::common::dispatch::{fallback_content, fallback_marker, resolve, Target};
use crate::common::ids::{IdGenerator, IdStyle};
use crate::common::rules::{ContentShape, ContentSource, ElementSpec};
use crate::common::structure::{shape, Shaped};
use crate::common::values::{to_native_string, Codec};
use crate::dialect::{Conversion, ConvertOptions, Output};
use layout_model::tokenizer::writer::TagWriter;
use layout_model::{AttrKey, ComponentType};

pub fn emit(
    grammar: &BracketGrammar,
    components: &[layout_model::Component],
    options: &ConvertOptions,
) -> Conversion {
    let shaped = shape(components, &grammar.nesting);
    let style = grammar.ids.map_or(IdStyle::Timestamp, |slot| slot.style);
    let mut emitter = Emitter {
        grammar,
        codec: grammar.codec(),
        writer: TagWriter::new(),
        ids: IdGenerator::new(style),
        emit_ids: options.emit_ids,
        fallbacks: Vec::new(),
    };
    for (i, node) in shaped.iter().enumerate() {
        if i > 0 {
            emitter.writer.newline();
        }
        emitter.node(node, None);
    }
    Conversion {
        output: Output::Text(emitter.writer.finish()),
        fallbacks: emitter.fallbacks,
    }
}

type Pairs = Vec<(String, String)>;

struct Emitter<'g> {
    grammar: &'g BracketGrammar,
    codec: Codec<'g>,
    writer: TagWriter,
    ids: IdGenerator,
    emit_ids: bool,
    fallbacks: Vec<ComponentType>,
}

impl Emitter<'_> {
    fn node(&mut self, shaped: &Shaped<'_>, parent: Option<&str>) {
        let component = &*shaped.node;
        match resolve(
            &self.grammar.vocabulary,
            self.grammar.dialect,
            component,
            parent,
            shaped.inner,
        ) {
            Target::Element(spec) => {
                let same_dialect = component.metadata.is_from(self.grammar.dialect);
                self.element(spec, shaped, same_dialect)
            }
            Target::Verbatim(name) => self.verbatim(name, shaped),
            Target::Fallback => self.fallback(shaped, parent),
        }
    }

    fn element(&mut self, spec: &ElementSpec, shaped: &Shaped<'_>, same_dialect: bool) {
        let component = &*shaped.node;
        let mut skip = Vec::new();
        let mut content = shaped.content().to_string();

        if spec.shape == ContentShape::TitleBody {
            if let Some(title) = component.attributes.get(&AttrKey::Heading) {
                content = join_title_body(&title.to_plain_string(), &content);
                skip.push(AttrKey::Heading);
            }
        }
        if spec.content == ContentSource::InnerAsImage {
            skip.push(AttrKey::ImageUrl);
        }

        let mut attributes = self
            .codec
            .encode(component, spec.native, &skip, same_dialect, &mut self.ids);

        let body = match spec.content {
            ContentSource::Inner => content,
            ContentSource::Setting(key) => {
                if !content.is_empty() {
                    attributes.insert(key.to_string(), serde_json::Value::String(content));
                }
                String::new()
            }
            ContentSource::InnerAsImage => component
                .attributes
                .get(&AttrKey::ImageUrl)
                .map(|url| url.to_plain_string())
                .unwrap_or_default(),
            ContentSource::None => String::new(),
        };

        let mut pairs: Pairs = attributes
            .iter()
            .map(|(k, v)| (k.clone(), to_native_string(v)))
            .collect();
        if let Some(slot) = self.grammar.ids.filter(|slot| slot.applies_to(spec.native)) {
            if self.emit_ids {
                pairs.retain(|(k, _)| k != slot.key);
                pairs.push((slot.key.to_string(), self.ids.next_id()));
            }
        }

        self.write(spec.native, &pairs, &body, shaped, spec.void, false);
    }

    /// Same-dialect node the tables do not know: written back as it was read.
    fn verbatim(&mut self, name: &str, shaped: &Shaped<'_>) {
        let pairs: Pairs = shaped
            .node
            .metadata
            .raw_attributes
            .iter()
            .map(|(k, v)| (k.clone(), to_native_string(v)))
            .collect();
        let content = shaped.content().to_string();
        self.write(name, &pairs, &content, shaped, true, true);
    }

    /// Text block carrying the content and an `untranslated-<type>` marker. Children follow
    /// it as siblings.
    fn fallback(&mut self, shaped: &Shaped<'_>, parent: Option<&str>) {
        let component = &*shaped.node;
        tracing::debug!(
            dialect = self.grammar.dialect,
            kind = %component.kind,
            "no native element; using fallback block"
        );
        self.fallbacks.push(component.kind);

        let content = fallback_content(component, shaped.content());
        let marker = fallback_marker(component.kind);
        let element = self.grammar.fallback.element;
        let pairs: Pairs = vec![(self.grammar.fallback.marker.to_string(), marker)];

        self.writer.open(element, &pairs);
        self.writer.text(&content);
        self.writer.close(element);
        for child in &shaped.children {
            self.node(child, parent);
        }
    }

    fn write(
        &mut self,
        name: &str,
        pairs: &Pairs,
        body: &str,
        shaped: &Shaped<'_>,
        void: bool,
        explicit: bool,
    ) {
        if void && body.is_empty() && shaped.children.is_empty() {
            self.writer.void(name, pairs, explicit);
            return;
        }
        self.writer.open(name, pairs);
        self.writer.text(body);
        for child in &shaped.children {
            self.node(child, Some(name));
        }
        self.writer.close(name);
    }
}
