//! Payload validation against the message specification tree.
//!
//! [`SpecValidationEngine`] walks a parsed payload and the schema tree in
//! lock-step and never stops at the first problem: every finding lands in
//! the returned [`ValidationResult`].

pub mod engine;
pub mod field_validator;
pub mod primitive;
pub mod root_selector;

use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::fmt;

pub use engine::SpecValidationEngine;
pub use field_validator::{FieldValidator, value_to_string};
pub use primitive::PrimitiveValidator;
pub use root_selector::RootSelector;

/// Validates a payload against a named root schema.
pub trait PayloadValidator {
    /// Total for any parsed JSON value: problems become findings, never errors.
    fn validate(&self, root_name: &str, payload: &Value) -> ValidationResult;
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Severity {
    Info,
    Warning,
    Error,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum FindingCategory {
    /// Missing or misplaced fields and sections.
    Structural,
    /// Pattern, calendar, length or code set violations.
    Format,
    /// Data that is accepted but suspicious.
    Quality,
    /// Confirmations.
    Note,
    /// The payload text was not valid JSON.
    Parse,
}

/// One reported issue or confirmation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Finding {
    pub severity: Severity,
    pub category: FindingCategory,
    /// Machine-readable identifier such as `invalid-uuid`.
    pub code: String,
    /// Dotted field path from the root element, with `[i]` for array items.
    pub path: String,
    pub message: String,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ValidationStats {
    /// Leaf values that went through type checks.
    pub fields_checked: usize,
    /// Objects walked against a branch.
    pub sections_walked: usize,
}

/// Findings of one validation run, bucketed by severity in emission order.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ValidationResult {
    pub errors: Vec<Finding>,
    pub warnings: Vec<Finding>,
    pub info: Vec<Finding>,
    pub stats: ValidationStats,
}

impl Severity {
    pub fn as_str(&self) -> &'static str {
        match self {
            Severity::Info => "info",
            Severity::Warning => "warning",
            Severity::Error => "error",
        }
    }
}

impl fmt::Display for Severity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl Finding {
    pub fn new(
        severity: Severity,
        category: FindingCategory,
        code: impl Into<String>,
        path: impl Into<String>,
        message: impl Into<String>,
    ) -> Self {
        Self {
            severity,
            category,
            code: code.into(),
            path: path.into(),
            message: message.into(),
        }
    }

    pub fn error(
        category: FindingCategory,
        code: impl Into<String>,
        path: impl Into<String>,
        message: impl Into<String>,
    ) -> Self {
        Self::new(Severity::Error, category, code, path, message)
    }

    pub fn warning(
        category: FindingCategory,
        code: impl Into<String>,
        path: impl Into<String>,
        message: impl Into<String>,
    ) -> Self {
        Self::new(Severity::Warning, category, code, path, message)
    }

    pub fn info(code: impl Into<String>, path: impl Into<String>, message: impl Into<String>) -> Self {
        Self::new(Severity::Info, FindingCategory::Note, code, path, message)
    }
}

impl fmt::Display for Finding {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.path.is_empty() {
            write!(f, "{}", self.message)
        } else {
            write!(f, "{}: {}", self.path, self.message)
        }
    }
}

impl ValidationResult {
    pub fn new() -> Self {
        Self::default()
    }

    /// Append a finding to the bucket matching its severity.
    pub fn push(&mut self, finding: Finding) {
        match finding.severity {
            Severity::Error => self.errors.push(finding),
            Severity::Warning => self.warnings.push(finding),
            Severity::Info => self.info.push(finding),
        }
    }

    /// Pass iff there are no errors and no warnings. Info never fails a run.
    pub fn is_pass(&self) -> bool {
        self.errors.is_empty() && self.warnings.is_empty()
    }

    pub fn error_count(&self) -> usize {
        self.errors.len()
    }

    pub fn warning_count(&self) -> usize {
        self.warnings.len()
    }

    pub fn info_count(&self) -> usize {
        self.info.len()
    }

    /// Errors, then warnings, then info.
    pub fn findings(&self) -> impl Iterator<Item = &Finding> {
        self.errors
            .iter()
            .chain(self.warnings.iter())
            .chain(self.info.iter())
    }

    /// Findings located at `path` or below it.
    pub fn findings_at<'a>(&'a self, path: &'a str) -> impl Iterator<Item = &'a Finding> + 'a {
        self.findings().filter(move |finding| {
            finding.path == path
                || finding
                    .path
                    .strip_prefix(path)
                    .is_some_and(|rest| rest.starts_with('.') || rest.starts_with('['))
        })
    }

    pub fn has_code(&self, code: &str) -> bool {
        self.findings().any(|finding| finding.code == code)
    }
}

/// Runtime type name used in "expected object" findings.
pub fn json_type_name(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "boolean",
        Value::Number(_) => "number",
        Value::String(_) => "string",
        Value::Array(_) => "array",
        Value::Object(_) => "object",
    }
}
