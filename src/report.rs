//! Human and machine renderings of validation outcomes.
//!
//! Presentation only: sorting and truncation here never change whether a
//! result passes.

use serde_json::json;
use std::fmt::{self, Write};

use crate::core::ReportConfig;
use crate::error::Result;
use crate::payload::Outcome;
use crate::validation::{Finding, ValidationResult};

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Reporter {
    /// Info entries shown before the "+N more" line.
    pub info_limit: usize,
}

impl Default for Reporter {
    fn default() -> Self {
        Self::from_config(&ReportConfig::default())
    }
}

impl Reporter {
    pub fn new(info_limit: usize) -> Self {
        Self { info_limit }
    }

    pub fn from_config(config: &ReportConfig) -> Self {
        Self::new(config.info_limit)
    }

    pub fn render_text(&self, root: &str, result: &ValidationResult) -> String {
        let mut out = String::new();
        self.write_text(&mut out, root, result)
            .expect("formatting into a String");
        out
    }

    fn write_text(&self, out: &mut String, root: &str, result: &ValidationResult) -> fmt::Result {
        if result.is_pass() {
            writeln!(out, "✅ VALIDATION PASSED: {root}")?;
            writeln!(out, "   {} fields verified", result.stats.fields_checked)?;
        } else {
            writeln!(out, "❌ VALIDATION FAILED: {root}")?;
        }

        write_sorted_section(out, "Errors", &result.errors)?;
        write_sorted_section(out, "Warnings", &result.warnings)?;

        if !result.info.is_empty() {
            writeln!(out, "\nInfo ({}):", result.info.len())?;
            for (index, finding) in result.info.iter().take(self.info_limit).enumerate() {
                writeln!(out, "  {}. {}", index + 1, finding)?;
            }
            if result.info.len() > self.info_limit {
                writeln!(out, "  ... +{} more", result.info.len() - self.info_limit)?;
            }
        }

        writeln!(
            out,
            "\nTotals: {} errors, {} warnings, {} info",
            result.error_count(),
            result.warning_count(),
            result.info_count()
        )
    }

    pub fn render_outcome_text(&self, outcome: &Outcome) -> String {
        match outcome {
            Outcome::ParseError(failure) => {
                format!("❌ PARSE ERROR\n  {}\n", failure.to_finding().message)
            }
            Outcome::UnresolvedRoot(keys) => format!(
                "❌ NO ROOT ELEMENT FOUND\n  Top-level keys: {}\n",
                if keys.is_empty() {
                    "(none)".to_string()
                } else {
                    keys.join(", ")
                }
            ),
            Outcome::Validated { root, result } => self.render_text(root, result),
        }
    }

    /// JSON document with a `status` of `pass`, `fail`, `parse-error` or
    /// `unresolved-root`.
    pub fn render_json(&self, outcome: &Outcome) -> Result<String> {
        let document = match outcome {
            Outcome::ParseError(failure) => json!({
                "status": "parse-error",
                "error": failure,
                "finding": failure.to_finding(),
            }),
            Outcome::UnresolvedRoot(keys) => json!({
                "status": "unresolved-root",
                "topLevelKeys": keys,
            }),
            Outcome::Validated { root, result } => json!({
                "status": (if result.is_pass() { "pass" } else { "fail" }),
                "root": root,
                "result": result,
            }),
        };
        Ok(serde_json::to_string_pretty(&document)?)
    }
}

fn write_sorted_section(out: &mut String, title: &str, findings: &[Finding]) -> fmt::Result {
    if findings.is_empty() {
        return Ok(());
    }
    let mut sorted: Vec<&Finding> = findings.iter().collect();
    sorted.sort_by(|a, b| a.message.cmp(&b.message));

    writeln!(out, "\n{title} ({}):", findings.len())?;
    for (index, finding) in sorted.iter().enumerate() {
        writeln!(out, "  {}. {}", index + 1, finding)?;
    }
    Ok(())
}
