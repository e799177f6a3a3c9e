//! Caller side of validation: turning raw payload text into a root choice
//! and a [`ValidationResult`].

use serde::Serialize;
use serde_json::Value;
use std::fmt;

use crate::validation::root_selector::top_level_keys;
use crate::validation::{
    Finding, FindingCategory, PayloadValidator, RootSelector, ValidationResult,
};

/// JSON syntax error with the parser's 1-based position.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ParseFailure {
    pub message: String,
    pub line: usize,
    pub column: usize,
}

/// What happened to one payload text.
#[derive(Debug, Clone, PartialEq)]
pub enum Outcome {
    ParseError(ParseFailure),
    /// No root could be chosen; carries the payload's top-level keys.
    UnresolvedRoot(Vec<String>),
    Validated {
        root: String,
        result: ValidationResult,
    },
}

impl ParseFailure {
    pub fn to_finding(&self) -> Finding {
        Finding::error(
            FindingCategory::Parse,
            "parse-error",
            "",
            format!("Invalid JSON: {}", self),
        )
    }
}

impl fmt::Display for ParseFailure {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} (line {}, column {})",
            self.message, self.line, self.column
        )
    }
}

impl From<serde_json::Error> for ParseFailure {
    fn from(error: serde_json::Error) -> Self {
        let full = error.to_string();
        // serde_json appends " at line X column Y" to its messages
        let message = full
            .rsplit_once(" at line ")
            .map(|(head, _)| head.to_string())
            .unwrap_or(full);
        Self {
            message,
            line: error.line(),
            column: error.column(),
        }
    }
}

impl Outcome {
    pub fn is_pass(&self) -> bool {
        matches!(self, Outcome::Validated { result, .. } if result.is_pass())
    }

    pub fn result(&self) -> Option<&ValidationResult> {
        match self {
            Outcome::Validated { result, .. } => Some(result),
            _ => None,
        }
    }
}

pub fn parse_payload(text: &str) -> Result<Value, ParseFailure> {
    serde_json::from_str(text).map_err(ParseFailure::from)
}

/// Parse `text`, pick a root (unless `root_override` is given) and validate.
pub fn validate_text<V: PayloadValidator + ?Sized>(
    validator: &V,
    selector: &RootSelector,
    text: &str,
    root_override: Option<&str>,
) -> Outcome {
    let payload = match parse_payload(text) {
        Ok(payload) => payload,
        Err(failure) => {
            tracing::debug!("Payload is not valid JSON: {}", failure);
            return Outcome::ParseError(failure);
        }
    };

    let root = match root_override {
        Some(root) => root.to_string(),
        None => match selector.select(&payload) {
            Some(root) => root,
            None => return Outcome::UnresolvedRoot(top_level_keys(&payload)),
        },
    };

    let result = validator.validate(&root, &payload);
    Outcome::Validated { root, result }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::ValidatorConfig;
    use crate::registry::SpecDictionary;
    use crate::validation::SpecValidationEngine;

    fn selector() -> RootSelector {
        RootSelector::from_config(&ValidatorConfig::default(), &SpecDictionary::embedded())
    }

    #[test]
    fn test_parse_failure_position() {
        let failure = parse_payload("{\n  \"a\": 1,\n  \"b\": }").unwrap_err();
        assert_eq!(failure.line, 3);
        assert!(failure.column > 0);
        assert!(!failure.message.contains(" at line "));

        let finding = failure.to_finding();
        assert_eq!(finding.category, FindingCategory::Parse);
        assert_eq!(finding.code, "parse-error");
        assert!(finding.message.contains("line 3"));
    }

    #[test]
    fn test_validate_text_outcomes() {
        let engine = SpecValidationEngine::default();

        assert!(matches!(
            validate_text(&engine, &selector(), "not json", None),
            Outcome::ParseError(_)
        ));

        match validate_text(&engine, &selector(), r#"{"foo": {}}"#, None) {
            Outcome::UnresolvedRoot(keys) => assert_eq!(keys, vec!["foo"]),
            other => panic!("unexpected outcome {other:?}"),
        }

        match validate_text(&engine, &selector(), r#"{"foo": {}}"#, Some("OCserviceRequest")) {
            Outcome::Validated { root, result } => {
                assert_eq!(root, "OCserviceRequest");
                assert_eq!(result.errors[0].code, "missing-root-element");
            }
            other => panic!("unexpected outcome {other:?}"),
        }
    }
}
