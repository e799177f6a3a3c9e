use serde_json::{Map, Value};
use std::sync::Arc;

use super::{
    FieldValidator, Finding, FindingCategory, PayloadValidator, ValidationResult, json_type_name,
};
use crate::core::ValidatorConfig;
use crate::registry::SpecDictionary;
use crate::types::{Branch, SchemaNode};

/// Structural validator: walks a payload against a root schema.
///
/// Holds only shared read-only state, so one engine can serve concurrent
/// validations.
#[derive(Debug, Clone)]
pub struct SpecValidationEngine {
    dictionary: Arc<SpecDictionary>,
    config: ValidatorConfig,
    fields: FieldValidator,
}

impl SpecValidationEngine {
    pub fn new(dictionary: Arc<SpecDictionary>, config: ValidatorConfig) -> Self {
        Self {
            fields: FieldValidator::new(Arc::clone(&dictionary)),
            dictionary,
            config,
        }
    }

    /// Engine over the embedded dictionary with the given policy.
    pub fn with_config(config: ValidatorConfig) -> Self {
        Self::new(SpecDictionary::embedded(), config)
    }

    pub fn dictionary(&self) -> &Arc<SpecDictionary> {
        &self.dictionary
    }

    pub fn config(&self) -> &ValidatorConfig {
        &self.config
    }

    /// Walk `data` against `branch`, appending findings for every child of
    /// the branch and for every key of `data` the branch does not know.
    pub fn walk_node(
        &self,
        data: &Map<String, Value>,
        branch: &Branch,
        path: &str,
        result: &mut ValidationResult,
    ) {
        result.stats.sections_walked += 1;

        let active_groups: Vec<&[String]> = self
            .config
            .exclusive_groups
            .iter()
            .map(|group| group.members.as_slice())
            .filter(|members| members.iter().all(|m| branch.contains(m)))
            .collect();

        for (name, child) in &branch.children {
            let field_path = format!("{path}.{name}");
            let value = data.get(name);

            match child {
                SchemaNode::Leaf(leaf) => {
                    self.fields.validate_field(value, leaf, &field_path, result);
                }
                SchemaNode::Branch(child_branch) => match value {
                    Some(Value::Array(items)) => {
                        for (index, item) in items.iter().enumerate() {
                            let item_path = format!("{field_path}[{index}]");
                            match item {
                                Value::Object(map) => {
                                    self.walk_node(map, child_branch, &item_path, result)
                                }
                                other => result.push(expected_object(&item_path, other)),
                            }
                        }
                    }
                    Some(Value::Object(map)) => {
                        self.walk_node(map, child_branch, &field_path, result)
                    }
                    Some(Value::Null) | None => {
                        let in_active_group = active_groups
                            .iter()
                            .any(|members| members.iter().any(|m| m == name));
                        if in_active_group || self.config.is_optional_section(name) {
                            continue;
                        }
                        if child_branch.has_required_children() {
                            result.push(Finding::error(
                                FindingCategory::Structural,
                                "missing-required-section",
                                &field_path,
                                format!("missing required section: {field_path}"),
                            ));
                        }
                    }
                    Some(other) => result.push(expected_object(&field_path, other)),
                },
            }
        }

        for members in active_groups {
            let present = members
                .iter()
                .filter(|m| data.get(m.as_str()).is_some_and(|v| !v.is_null()))
                .count();
            if present != 1 {
                result.push(Finding::error(
                    FindingCategory::Structural,
                    "exclusive-choice-violation",
                    path,
                    format!(
                        "Exactly one of {} must be present (found {present})",
                        members.join(", ")
                    ),
                ));
            }
        }

        for key in data.keys() {
            if !branch.contains(key) {
                result.push(Finding::warning(
                    FindingCategory::Quality,
                    "unexpected-field",
                    format!("{path}.{key}"),
                    "unexpected field not in specification",
                ));
            }
        }
    }
}

impl PayloadValidator for SpecValidationEngine {
    fn validate(&self, root_name: &str, payload: &Value) -> ValidationResult {
        let mut result = ValidationResult::new();

        let Some(root) = self.dictionary.root(root_name) else {
            result.push(Finding::error(
                FindingCategory::Structural,
                "unknown-root",
                root_name,
                format!("Unknown root element: {root_name}"),
            ));
            return result;
        };

        let element = &root.element;
        match payload.get(element) {
            Some(Value::Object(data)) => {
                tracing::debug!("Validating payload against root {}", root_name);
                self.walk_node(data, &root.body, element, &mut result);
            }
            Some(Value::Null) | None => {
                result.push(Finding::error(
                    FindingCategory::Structural,
                    "missing-root-element",
                    element.as_str(),
                    format!("Missing root element: {element}"),
                ));
            }
            Some(other) => result.push(expected_object(element, other)),
        }

        tracing::debug!(
            "Validation of {} finished: {} errors, {} warnings, {} info, {} fields checked",
            root_name,
            result.error_count(),
            result.warning_count(),
            result.info_count(),
            result.stats.fields_checked
        );

        result
    }
}

impl Default for SpecValidationEngine {
    fn default() -> Self {
        Self::with_config(ValidatorConfig::default())
    }
}

fn expected_object(path: &str, value: &Value) -> Finding {
    Finding::error(
        FindingCategory::Structural,
        "expected-object",
        path,
        format!("Expected object but got {}", json_type_name(value)),
    )
}
