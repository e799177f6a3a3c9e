//! Leaf checks: required presence, length, code set membership and base
//! type format.

use serde_json::Value;
use std::sync::Arc;

use super::{Finding, FindingCategory, PrimitiveValidator, ValidationResult};
use crate::registry::SpecDictionary;
use crate::types::{BaseType, Leaf, LengthConstraint};

/// Validates single leaf values against their specification types.
#[derive(Debug, Clone)]
pub struct FieldValidator {
    dictionary: Arc<SpecDictionary>,
    primitives: PrimitiveValidator,
}

impl FieldValidator {
    pub fn new(dictionary: Arc<SpecDictionary>) -> Self {
        Self {
            dictionary,
            primitives: PrimitiveValidator::new(),
        }
    }

    /// Validate the value found for `leaf` at `path`.
    ///
    /// A missing required value is reported once and no further checks run
    /// for it. Array values of repeating leaves are checked item by item.
    pub fn validate_field(
        &self,
        value: Option<&Value>,
        leaf: &Leaf,
        path: &str,
        result: &mut ValidationResult,
    ) {
        let Some(value) = value.filter(|v| !is_blank(v)) else {
            if leaf.cardinality.is_required() {
                result.push(Finding::error(
                    FindingCategory::Structural,
                    "missing-required-field",
                    path,
                    format!("missing required field: {} ({})", path, leaf.cardinality),
                ));
            }
            return;
        };

        match value {
            Value::Array(items) if leaf.cardinality.is_repeating() => {
                if !leaf.cardinality.allows(items.len()) {
                    result.push(Finding::error(
                        FindingCategory::Structural,
                        "too-many-occurrences",
                        path,
                        format!(
                            "Too many occurrences: {} (cardinality {})",
                            items.len(),
                            leaf.cardinality
                        ),
                    ));
                }
                for (index, item) in items.iter().enumerate() {
                    if !is_blank(item) {
                        self.check_value(item, &leaf.spec_type, &format!("{path}[{index}]"), result);
                    }
                }
            }
            _ => self.check_value(value, &leaf.spec_type, path, result),
        }
    }

    /// Apply length, code set and base type rules of `type_name`. Each
    /// applicable rule runs independently.
    pub fn check_value(
        &self,
        value: &Value,
        type_name: &str,
        path: &str,
        result: &mut ValidationResult,
    ) {
        result.stats.fields_checked += 1;

        match self.dictionary.spec_type(type_name) {
            Some(spec_type) => {
                if let Some(length) = &spec_type.length {
                    check_length(value, length, path, result);
                }
                if let Some(code_set) = &spec_type.code_set {
                    self.check_code_set(value, code_set, path, result);
                }
                let base_type = self.dictionary.effective_base_type(spec_type);
                self.check_base_type(value, base_type, path, result);
            }
            None => self.check_base_type(value, type_name, path, result),
        }
    }

    pub fn check_code_set(
        &self,
        value: &Value,
        code_set_name: &str,
        path: &str,
        result: &mut ValidationResult,
    ) {
        let Some(code_set) = self.dictionary.code_set(code_set_name) else {
            tracing::warn!("Code set {} not found, skipping {}", code_set_name, path);
            return;
        };

        let code = value_to_string(value);
        match code_set.find(&code) {
            Some(entry) => {
                let message = match &entry.label {
                    Some(label) => format!("Valid code \"{code}\" ({label})"),
                    None => format!("Valid code \"{code}\""),
                };
                result.push(Finding::info("valid-code", path, message));
            }
            None => result.push(Finding::error(
                FindingCategory::Format,
                "invalid-code",
                path,
                format!(
                    "Invalid code \"{}\". Valid codes: {}",
                    code,
                    code_set.codes().collect::<Vec<_>>().join(", ")
                ),
            )),
        }
    }

    /// Unknown base type names are accepted without a check.
    pub fn check_base_type(
        &self,
        value: &Value,
        base_type_name: &str,
        path: &str,
        result: &mut ValidationResult,
    ) {
        if let Some(base_type) = BaseType::parse(base_type_name) {
            self.primitives.check(base_type, value, path, result);
        }
    }
}

pub fn check_length(
    value: &Value,
    constraint: &LengthConstraint,
    path: &str,
    result: &mut ValidationResult,
) {
    let len = value_to_string(value).chars().count();
    if let Some(violation) = constraint.check(len) {
        result.push(Finding::error(
            FindingCategory::Format,
            "length-violation",
            path,
            violation.to_string(),
        ));
    }
}

/// Text form of a value used by length, pattern and code checks.
pub fn value_to_string(value: &Value) -> String {
    match value {
        Value::String(s) => s.clone(),
        Value::Number(n) => n.to_string(),
        Value::Bool(b) => b.to_string(),
        other => other.to_string(),
    }
}

/// Absent for required/optional purposes: null, empty string, empty array.
fn is_blank(value: &Value) -> bool {
    match value {
        Value::Null => true,
        Value::String(s) => s.is_empty(),
        Value::Array(items) => items.is_empty(),
        _ => false,
    }
}
