//! Bracket-tag dialects
//!
//!     WordPress-style builders (the generic shortcode set, WPBakery, Divi, Avada) share one
//!     syntax and differ only in vocabulary, so they share one parser and one emitter. A
//!     dialect is a static [BracketGrammar]: its element and attribute tables, width table,
//!     boolean spelling, nesting rules, id slot and fallback element.
//!
//!     parser.rs   tokenizer forest -> canonical components
//!     emitter.rs  canonical components -> markup

pub mod emitter;
pub mod parser;

use super::ids::IdStyle;
use super::rules::{BoolStyle, Vocabulary};
use super::structure::Nesting;
use super::values::Codec;
use crate::dialect::{Content, Conversion, ConvertOptions, ParseReport};
use layout_model::tokenizer::TagNode;
use layout_model::{tokenize, Component, ComponentType, TokenizerOptions, WidthTable};

/// Attribute that carries a generated id
#[derive(Debug, Clone, Copy)]
pub struct IdSlot {
    pub key: &'static str,
    pub style: IdStyle,
    /// Elements that carry it; empty means all
    pub elements: &'static [&'static str],
}

impl IdSlot {
    pub fn applies_to(&self, element: &str) -> bool {
        self.elements.is_empty() || self.elements.contains(&element)
    }
}

/// Element used for types the dialect cannot express
#[derive(Debug, Clone, Copy)]
pub struct Fallback {
    pub element: &'static str,
    /// Attribute receiving the `untranslated-<type>` marker
    pub marker: &'static str,
}

#[derive(Debug, Clone, Copy)]
pub struct BracketGrammar {
    pub dialect: &'static str,
    /// Tag prefix shared by the dialect's elements; empty for the generic set
    pub prefix: &'static str,
    pub vocabulary: Vocabulary,
    pub widths: WidthTable,
    pub bools: BoolStyle,
    pub nesting: Nesting,
    pub ids: Option<IdSlot>,
    pub fallback: Fallback,
}

impl BracketGrammar {
    pub fn codec(&self) -> Codec<'_> {
        Codec {
            dialect: self.dialect,
            vocabulary: &self.vocabulary,
            bools: self.bools,
            widths: &self.widths,
        }
    }

    /// Names the tokenizer must treat as void.
    pub fn void_elements(&self) -> Vec<&'static str> {
        self.vocabulary
            .elements
            .iter()
            .filter(|spec| spec.void)
            .map(|spec| spec.native)
            .collect()
    }

    pub fn is_own_tag(&self, name: &str) -> bool {
        (!self.prefix.is_empty() && name.starts_with(self.prefix)) || self.vocabulary.knows(name)
    }

    pub fn supports(&self, kind: ComponentType) -> bool {
        kind.is_structural() || self.vocabulary.supports(kind)
    }

    /// At least one tag of this dialect anywhere in the markup.
    pub fn is_valid_content(&self, content: &Content) -> bool {
        let Some(text) = content.as_text() else {
            return false;
        };
        if !text.contains('[') {
            return false;
        }
        let voids = self.void_elements();
        let tokenized = tokenize(text, &TokenizerOptions::with_self_closing(&voids));
        tokenized.nodes.iter().any(|node| self.has_own_tag(node))
    }

    fn has_own_tag(&self, node: &TagNode) -> bool {
        self.is_own_tag(&node.name) || node.children.iter().any(|child| self.has_own_tag(child))
    }

    pub fn parse(&self, content: &Content) -> ParseReport {
        match content.as_text() {
            Some(text) if self.is_valid_content(content) => parser::parse(self, text),
            _ => ParseReport::rejected(format!("content is not {} markup", self.dialect)),
        }
    }

    pub fn convert(&self, components: &[Component], options: &ConvertOptions) -> Conversion {
        emitter::emit(self, components, options)
    }
}
