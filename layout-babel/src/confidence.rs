//! Conversion confidence
//!
//!     An advisory score in [0, 1] for how faithfully a tree is expected to survive
//!     conversion into a target dialect. Each node gets a base score: higher when it already
//!     came from the target, lower (per category) when the target has no native element for
//!     it and it will land in the fallback block. Wide nodes lose a little. The tree score
//!     is the mean over every node.

use crate::dialect::Dialect;
use layout_model::{Category, Component};
use serde::{Deserialize, Serialize};

/// Scores used when the target falls back for a node's type
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct FallbackScores {
    pub layout: f64,
    pub content: f64,
    pub media: f64,
    pub interactive: f64,
    pub form: f64,
    pub data: f64,
    pub social: f64,
    pub navigation: f64,
    pub general: f64,
}

impl Default for FallbackScores {
    fn default() -> Self {
        Self {
            layout: 0.6,
            content: 0.5,
            media: 0.4,
            interactive: 0.3,
            form: 0.2,
            data: 0.3,
            social: 0.3,
            navigation: 0.3,
            general: 0.4,
        }
    }
}

impl FallbackScores {
    pub fn for_category(&self, category: Category) -> f64 {
        match category {
            Category::Layout => self.layout,
            Category::Content => self.content,
            Category::Media => self.media,
            Category::Interactive => self.interactive,
            Category::Form => self.form,
            Category::Data => self.data,
            Category::Social => self.social,
            Category::Navigation => self.navigation,
            Category::General => self.general,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ConfidenceSettings {
    /// Node translated into a foreign dialect
    pub base: f64,
    /// Node written back into the dialect it was parsed from
    pub same_dialect: f64,
    pub fallback: FallbackScores,
    /// Nodes with more children than this are penalized
    pub child_threshold: usize,
    pub nesting_penalty: f64,
}

impl Default for ConfidenceSettings {
    fn default() -> Self {
        Self {
            base: 0.8,
            same_dialect: 0.95,
            fallback: FallbackScores::default(),
            child_threshold: 5,
            nesting_penalty: 0.05,
        }
    }
}

/// Whether `target` will write `component` through its fallback block.
///
/// Unknown nodes from the target itself are re-emitted verbatim, so they do not count.
pub fn falls_back(component: &Component, target: &dyn Dialect) -> bool {
    let verbatim =
        component.metadata.is_from(target.name()) && component.metadata.native_name.is_some();
    !verbatim && !target.supports(component.kind)
}

/// Score of one node, ignoring its descendants.
pub fn node_score(component: &Component, target: &dyn Dialect, settings: &ConfidenceSettings) -> f64 {
    let mut score = if falls_back(component, target) {
        settings.fallback.for_category(component.category())
    } else if component.metadata.is_from(target.name()) {
        settings.same_dialect
    } else {
        settings.base
    };
    if component.children.len() > settings.child_threshold {
        score -= settings.nesting_penalty;
    }
    score.clamp(0.0, 1.0)
}

/// Mean node score over every node of the forest; 0 for an empty forest.
pub fn tree_score(components: &[Component], target: &dyn Dialect, settings: &ConfidenceSettings) -> f64 {
    let (sum, count) = components
        .iter()
        .flat_map(Component::walk)
        .fold((0.0, 0usize), |(sum, count), node| {
            (sum + node_score(node, target, settings), count + 1)
        });
    if count == 0 {
        0.0
    } else {
        sum / count as f64
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::dialects::{DiviDialect, ElementorDialect, OxygenDialect};
    use layout_model::{ComponentType, Metadata};

    fn settings() -> ConfidenceSettings {
        ConfidenceSettings::default()
    }

    #[test]
    fn test_foreign_node_gets_base() {
        let text = Component::new(ComponentType::Text);
        assert_eq!(node_score(&text, &DiviDialect, &settings()), 0.8);
    }

    #[test]
    fn test_same_dialect_node_scores_higher() {
        let text = Component::new(ComponentType::Text)
            .with_metadata(Metadata::from_dialect("divi", "et_pb_text"));
        assert_eq!(node_score(&text, &DiviDialect, &settings()), 0.95);
    }

    #[test]
    fn test_fallback_uses_category_score() {
        let form = Component::new(ComponentType::Form);
        assert_eq!(node_score(&form, &OxygenDialect, &settings()), 0.2);
        let accordion = Component::new(ComponentType::Accordion);
        assert_eq!(node_score(&accordion, &OxygenDialect, &settings()), 0.3);
    }

    #[test]
    fn test_unknown_from_target_is_not_a_fallback() {
        let widget = Component::new(ComponentType::Unknown)
            .with_metadata(Metadata::from_dialect("elementor", "price-table"));
        assert!(!falls_back(&widget, &ElementorDialect));
        assert!(falls_back(&widget, &DiviDialect));
    }

    #[test]
    fn test_wide_nodes_are_penalized() {
        let row = Component::new(ComponentType::Container)
            .with_children((0..6).map(|_| Component::new(ComponentType::Text)));
        let score = node_score(&row, &DiviDialect, &settings());
        assert!((score - 0.75).abs() < 1e-9);
    }

    #[test]
    fn test_tree_score_is_mean() {
        let tree = vec![Component::new(ComponentType::Container)
            .with_child(Component::new(ComponentType::Form))];
        let score = tree_score(&tree, &OxygenDialect, &settings());
        assert!((score - (0.8 + 0.2) / 2.0).abs() < 1e-9);
    }

    #[test]
    fn test_empty_tree_scores_zero() {
        assert_eq!(tree_score(&[], &DiviDialect, &settings()), 0.0);
    }

    #[test]
    fn test_scores_are_clamped() {
        let harsh = ConfidenceSettings {
            nesting_penalty: 5.0,
            ..ConfidenceSettings::default()
        };
        let wide = Component::new(ComponentType::Row)
            .with_children((0..10).map(|_| Component::new(ComponentType::Column)));
        assert_eq!(node_score(&wide, &DiviDialect, &harsh), 0.0);
    }
}
