use indexmap::IndexSet;
use serde_json::Value;

use crate::core::{RootSelectionRule, ValidatorConfig};
use crate::registry::SpecDictionary;

/// Chooses the root schema for a payload from its shape.
#[derive(Debug, Clone)]
pub struct RootSelector {
    rules: Vec<RootSelectionRule>,
    known_roots: IndexSet<String>,
}

impl RootSelector {
    pub fn new(rules: Vec<RootSelectionRule>, known_roots: IndexSet<String>) -> Self {
        Self { rules, known_roots }
    }

    pub fn from_config(config: &ValidatorConfig, dictionary: &SpecDictionary) -> Self {
        Self::new(
            config.root_selection.clone(),
            dictionary.root_names().map(str::to_string).collect(),
        )
    }

    /// The first rule whose element is a top-level key decides: its first
    /// variant with a present marker wins, otherwise its default root.
    /// Without a matching rule, the first top-level key naming a known root
    /// is used.
    pub fn select(&self, payload: &Value) -> Option<String> {
        let object = payload.as_object()?;

        for rule in &self.rules {
            let Some(element) = object.get(&rule.element) else {
                continue;
            };
            let root = rule
                .variants
                .iter()
                .find(|variant| marker_present(element, &variant.marker))
                .map(|variant| variant.root.clone())
                .unwrap_or_else(|| rule.default_root.clone());
            tracing::debug!("Selected root {} for element {}", root, rule.element);
            return Some(root);
        }

        object
            .keys()
            .find(|key| self.known_roots.contains(key.as_str()))
            .cloned()
    }
}

/// True if the dotted `marker` path resolves to a non-null value.
fn marker_present(element: &Value, marker: &str) -> bool {
    marker
        .split('.')
        .try_fold(element, |current, segment| current.get(segment))
        .is_some_and(|value| !value.is_null())
}

/// Top-level keys of a payload, for "no root found" reports.
pub fn top_level_keys(payload: &Value) -> Vec<String> {
    payload
        .as_object()
        .map(|object| object.keys().cloned().collect())
        .unwrap_or_default()
}
