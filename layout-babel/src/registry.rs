//! Dialect registry for discovery and dispatch
//!
//! This module provides a centralized registry for all available dialects. Dialects are
//! registered and retrieved by name, and every operation the crate exposes (parse, convert,
//! translate, detection, batch conversion) is routed through here.

use crate::confidence::tree_score;
use crate::dialect::{Content, Conversion, Dialect, EngineOptions, Output, ParseReport};
use crate::error::BabelError;
use layout_model::{parse_percentage, Component, ComponentType, MAX_DEPTH};
use rayon::prelude::*;
use std::collections::HashMap;

/// The vendor-neutral dialect; detection only picks it when nothing more specific matches.
const GENERIC_DIALECT: &str = "shortcode";

/// Result of a translation between two dialects
#[derive(Debug, Clone, PartialEq)]
pub struct Translation {
    pub output: Output,
    /// Advisory score in [0, 1]
    pub confidence: f64,
    /// Problems the source parser recovered from
    pub warnings: Vec<String>,
    /// Types the target wrote through its fallback block, in document order
    pub fallbacks: Vec<ComponentType>,
}

/// Registry of page-builder dialects
///
/// # Examples
///
/// ```ignore
/// let registry = DialectRegistry::with_defaults();
/// let translation = registry.translate("wpbakery", "divi", &Content::from(markup))?;
/// println!("{}", translation.output.to_text(false));
/// ```
pub struct DialectRegistry {
    dialects: HashMap<String, Box<dyn Dialect>>,
    options: EngineOptions,
}

impl DialectRegistry {
    /// Create a new empty registry
    pub fn new() -> Self {
        DialectRegistry {
            dialects: HashMap::new(),
            options: EngineOptions::default(),
        }
    }

    /// Create a registry with the built-in dialects
    pub fn with_defaults() -> Self {
        Self::with_options(EngineOptions::default())
    }

    /// Built-in dialects, converting and scoring with `options`
    pub fn with_options(options: EngineOptions) -> Self {
        let mut registry = Self::new();
        registry.options = options;

        registry.register(crate::dialects::ShortcodeDialect);
        registry.register(crate::dialects::WpBakeryDialect);
        registry.register(crate::dialects::DiviDialect);
        registry.register(crate::dialects::AvadaDialect);
        registry.register(crate::dialects::ElementorDialect);
        registry.register(crate::dialects::OxygenDialect);

        registry
    }

    pub fn options(&self) -> &EngineOptions {
        &self.options
    }

    /// Register a dialect
    ///
    /// If a dialect with the same name already exists, it will be replaced.
    pub fn register<D: Dialect + 'static>(&mut self, dialect: D) {
        self.dialects
            .insert(dialect.name().to_string(), Box::new(dialect));
    }

    /// Get a dialect by name
    pub fn get(&self, name: &str) -> Result<&dyn Dialect, BabelError> {
        self.dialects
            .get(name)
            .map(|d| d.as_ref())
            .ok_or_else(|| BabelError::UnknownDialect(name.to_string()))
    }

    /// Check if a dialect exists
    pub fn has(&self, name: &str) -> bool {
        self.dialects.contains_key(name)
    }

    /// List all available dialect names (sorted)
    pub fn list_dialects(&self) -> Vec<String> {
        let mut names: Vec<_> = self.dialects.keys().cloned().collect();
        names.sort();
        names
    }

    /// Parse `content` as `dialect`. Malformed input gives an empty forest.
    pub fn parse(&self, dialect: &str, content: &Content) -> Result<Vec<Component>, BabelError> {
        Ok(self.parse_with_report(dialect, content)?.components)
    }

    /// Parse and keep the warnings the parser recovered from.
    #[tracing::instrument(level = "debug", skip(self, content))]
    pub fn parse_with_report(&self, dialect: &str, content: &Content) -> Result<ParseReport, BabelError> {
        let report = self.get(dialect)?.parse(content);
        for warning in &report.warnings {
            tracing::warn!(dialect, %warning, "recovered while parsing");
        }
        Ok(report)
    }

    /// Convert a canonical forest into `dialect`.
    pub fn convert(&self, dialect: &str, components: &[Component]) -> Result<Output, BabelError> {
        Ok(self.convert_with_report(dialect, components)?.output)
    }

    /// Convert and keep the list of types that went to the fallback block.
    #[tracing::instrument(level = "debug", skip(self, components), fields(nodes = components.len()))]
    pub fn convert_with_report(&self, dialect: &str, components: &[Component]) -> Result<Conversion, BabelError> {
        let target = self.get(dialect)?;
        check_depth(components)?;
        let conversion = target.convert(components, &self.options.convert);
        if !conversion.fallbacks.is_empty() {
            tracing::debug!(dialect, fallbacks = conversion.fallbacks.len(), "fallback blocks written");
        }
        Ok(conversion)
    }

    /// Parse as `source`, convert into `target` and score the result.
    #[tracing::instrument(skip(self, content))]
    pub fn translate(&self, source: &str, target: &str, content: &Content) -> Result<Translation, BabelError> {
        let target_dialect = self.get(target)?;
        let report = self.parse_with_report(source, content)?;
        let confidence = tree_score(&report.components, target_dialect, &self.options.confidence);
        let conversion = target_dialect.convert(&report.components, &self.options.convert);
        tracing::debug!(confidence, fallbacks = conversion.fallbacks.len(), "translated");
        Ok(Translation {
            output: conversion.output,
            confidence,
            warnings: report.warnings,
            fallbacks: conversion.fallbacks,
        })
    }

    /// Render an output as text, indenting JSON when `convert.pretty_json` is set.
    pub fn render(&self, output: &Output) -> Result<String, BabelError> {
        Ok(match output {
            Output::Text(text) => text.clone(),
            Output::Json(value) if self.options.convert.pretty_json => {
                serde_json::to_string_pretty(value)?
            }
            Output::Json(value) => serde_json::to_string(value)?,
        })
    }

    pub fn is_valid_content(&self, dialect: &str, content: &Content) -> Result<bool, BabelError> {
        Ok(self.get(dialect)?.is_valid_content(content))
    }

    /// Names of every dialect that accepts `content` (sorted)
    pub fn detect(&self, content: &Content) -> Vec<String> {
        let mut names: Vec<String> = self
            .dialects
            .values()
            .filter(|d| d.is_valid_content(content))
            .map(|d| d.name().to_string())
            .collect();
        names.sort();
        names
    }

    /// The one dialect `content` is most likely written in. A vendor dialect wins over the
    /// generic shortcode set.
    pub fn detect_source(&self, content: &Content) -> Result<String, BabelError> {
        let detected = self.detect(content);
        detected
            .iter()
            .find(|name| name.as_str() != GENERIC_DIALECT)
            .or_else(|| detected.first())
            .cloned()
            .ok_or_else(|| {
                BabelError::NotSupported("content does not match any registered dialect".to_string())
            })
    }

    /// Convert into every registered dialect except `source`, in parallel. Results are
    /// sorted by dialect name.
    #[tracing::instrument(level = "debug", skip(self, components))]
    pub fn convert_all(
        &self,
        components: &[Component],
        source: Option<&str>,
    ) -> Result<Vec<(String, Conversion)>, BabelError> {
        if let Some(source) = source {
            self.get(source)?;
        }
        check_depth(components)?;
        let mut results: Vec<(String, Conversion)> = self
            .dialects
            .par_iter()
            .filter(|(name, _)| Some(name.as_str()) != source)
            .map(|(name, dialect)| {
                (name.clone(), dialect.convert(components, &self.options.convert))
            })
            .collect();
        results.sort_by(|a, b| a.0.cmp(&b.0));
        Ok(results)
    }

    /// Canonical percentage for a native width token of `dialect`.
    pub fn width_to_percentage(&self, token: &str, dialect: &str) -> Result<String, BabelError> {
        Ok(self.get(dialect)?.width_table().token_to_canonical(token))
    }

    /// Nearest native width token of `dialect` for a percentage ("50%", "33.33", ...).
    /// Unreadable percentages count as full width.
    pub fn percentage_to_dialect_token(&self, percentage: &str, dialect: &str) -> Result<String, BabelError> {
        let table = self.get(dialect)?.width_table();
        let percent = parse_percentage(percentage).unwrap_or(100.0);
        Ok(table.to_token(percent).to_string())
    }
}

/// Parsers never build trees deeper than [MAX_DEPTH]; hand-built ones are held to the same
/// limit before the recursive converters see them.
fn check_depth(components: &[Component]) -> Result<(), BabelError> {
    match components.iter().map(Component::depth).max() {
        Some(depth) if depth > MAX_DEPTH => Err(BabelError::NotSupported(format!(
            "tree nests {} levels; at most {} are supported",
            depth, MAX_DEPTH
        ))),
        _ => Ok(()),
    }
}

impl Default for DialectRegistry {
    fn default() -> Self {
        Self::with_defaults()
    }
}
