//! Base type format checks.
//!
//! Each base type has its own independent rules; one value can collect
//! several findings of different severities.

use chrono::{NaiveDate, NaiveDateTime, Timelike};
use regex::Regex;
use serde_json::Value;

use super::field_validator::value_to_string;
use super::{Finding, FindingCategory, ValidationResult};
use crate::types::BaseType;

/// Base type validator with precompiled patterns.
#[derive(Debug, Clone)]
pub struct PrimitiveValidator {
    uuid_regex: Regex,
    datetime_regex: Regex,
    date_regex: Regex,
    time_regex: Regex,
    digits_regex: Regex,
    amount_regex: Regex,
}

impl PrimitiveValidator {
    pub fn new() -> Self {
        Self {
            uuid_regex: Regex::new(
                r"(?i)^[0-9a-f]{8}-[0-9a-f]{4}-[0-9a-f]{4}-[0-9a-f]{4}-[0-9a-f]{12}$",
            )
            .unwrap(),
            datetime_regex: Regex::new(
                r"^[0-9]{4}-[0-9]{2}-[0-9]{2}T[0-9]{2}:[0-9]{2}:[0-9]{2}(\.[0-9]{3})?Z?$",
            )
            .unwrap(),
            date_regex: Regex::new(r"^([0-9]{4})-([0-9]{2})-([0-9]{2})$").unwrap(),
            time_regex: Regex::new(r"^([0-9]{2}):([0-9]{2}):([0-9]{2})$").unwrap(),
            digits_regex: Regex::new(r"^[0-9]+$").unwrap(),
            // exactly two decimal places, no sign
            amount_regex: Regex::new(r"^[0-9]+\.[0-9]{2}$").unwrap(),
        }
    }

    /// Run the rules of `base_type` against `value`.
    pub fn check(
        &self,
        base_type: BaseType,
        value: &Value,
        path: &str,
        result: &mut ValidationResult,
    ) {
        match base_type {
            BaseType::Uuid => self.check_uuid(value, path, result),
            BaseType::IsoDateTime => self.check_datetime(value, path, result),
            BaseType::IsoDate => self.check_date(value, path, result),
            BaseType::IsoTime => self.check_time(value, path, result),
            BaseType::Boolean => {
                if !value.is_boolean() {
                    result.push(format_error(
                        "invalid-boolean",
                        path,
                        "Must be a boolean (true or false)",
                    ));
                }
            }
            BaseType::Number => {
                if parse_number(value).is_none() {
                    result.push(format_error("invalid-number", path, "Must be a valid number"));
                }
            }
            BaseType::DigitString => {
                if !self.digits_regex.is_match(&value_to_string(value)) {
                    result.push(format_error(
                        "invalid-digit-string",
                        path,
                        "Must contain digits only",
                    ));
                }
            }
            BaseType::Amount => self.check_amount(value, path, result),
            BaseType::TextString => {
                if !value.is_string() {
                    result.push(format_error(
                        "invalid-text-string",
                        path,
                        "Must be a text string",
                    ));
                }
            }
            BaseType::Indicator => {
                let text = value_to_string(value);
                if text != "0" && text != "1" {
                    result.push(format_error(
                        "invalid-indicator",
                        path,
                        "Indicator must be 0 or 1",
                    ));
                }
            }
            BaseType::PercentageRate => {
                if parse_number(value).is_none() {
                    result.push(format_error(
                        "invalid-percentage-rate",
                        path,
                        "Must be a valid percentage rate",
                    ));
                }
            }
            // membership is checked against the code set itself
            BaseType::CodeSet => {}
        }
    }

    fn check_uuid(&self, value: &Value, path: &str, result: &mut ValidationResult) {
        if !self.uuid_regex.is_match(&value_to_string(value)) {
            result.push(format_error("invalid-uuid", path, "Invalid UUID format"));
        }
    }

    fn check_datetime(&self, value: &Value, path: &str, result: &mut ValidationResult) {
        let text = value_to_string(value);
        if !self.datetime_regex.is_match(&text) {
            result.push(format_error(
                "invalid-datetime-format",
                path,
                "Invalid ISODateTime format (expected YYYY-MM-DDThh:mm:ss[.sss][Z])",
            ));
            return;
        }

        let local = text.strip_suffix('Z').unwrap_or(&text);
        let parsed = NaiveDateTime::parse_from_str(local, "%Y-%m-%dT%H:%M:%S%.3f")
            .or_else(|_| NaiveDateTime::parse_from_str(local, "%Y-%m-%dT%H:%M:%S"));
        // chrono reads second 60 as a leap second
        let is_real = parsed.is_ok_and(|parsed| parsed.nanosecond() < 1_000_000_000);
        if !is_real {
            result.push(format_error(
                "invalid-datetime",
                path,
                format!("Invalid date/time value: {text}"),
            ));
        }
    }

    fn check_date(&self, value: &Value, path: &str, result: &mut ValidationResult) {
        let text = value_to_string(value);
        let Some(captures) = self.date_regex.captures(&text) else {
            result.push(format_error(
                "invalid-date-format",
                path,
                "Invalid ISODate format (expected YYYY-MM-DD)",
            ));
            return;
        };

        let year = captures[1].parse::<i32>().unwrap_or_default();
        let month = captures[2].parse::<u32>().unwrap_or_default();
        let day = captures[3].parse::<u32>().unwrap_or_default();
        if NaiveDate::from_ymd_opt(year, month, day).is_none() {
            result.push(format_error("invalid-date", path, "Invalid calendar date"));
        }
    }

    fn check_time(&self, value: &Value, path: &str, result: &mut ValidationResult) {
        let text = value_to_string(value);
        let Some(captures) = self.time_regex.captures(&text) else {
            result.push(format_error(
                "invalid-time-format",
                path,
                "Invalid ISOTime format (expected hh:mm:ss)",
            ));
            return;
        };

        let hours = captures[1].parse::<u32>().unwrap_or_default();
        let minutes = captures[2].parse::<u32>().unwrap_or_default();
        let seconds = captures[3].parse::<u32>().unwrap_or_default();
        if hours > 23 || minutes > 59 || seconds > 59 {
            result.push(format_error(
                "invalid-time",
                path,
                "Invalid time value (hours 00-23, minutes and seconds 00-59)",
            ));
        }
    }

    fn check_amount(&self, value: &Value, path: &str, result: &mut ValidationResult) {
        match parse_number(value) {
            None => result.push(format_error(
                "invalid-amount",
                path,
                "Amount must be a valid number",
            )),
            Some(amount) if amount < 0.0 => result.push(format_error(
                "negative-amount",
                path,
                "Amount must not be negative",
            )),
            Some(_) => {}
        }

        if !self.amount_regex.is_match(&value_to_string(value)) {
            result.push(Finding::warning(
                FindingCategory::Quality,
                "amount-decimal-places",
                path,
                "Amount should have exactly two decimal places",
            ));
        }
    }
}

impl Default for PrimitiveValidator {
    fn default() -> Self {
        Self::new()
    }
}

/// Numeric reading of a JSON number or a numeric string. Non-finite values
/// are rejected.
pub fn parse_number(value: &Value) -> Option<f64> {
    let number = match value {
        Value::Number(n) => n.as_f64(),
        Value::String(s) => s.trim().parse::<f64>().ok(),
        _ => None,
    }?;
    number.is_finite().then_some(number)
}

fn format_error(code: &str, path: &str, message: impl Into<String>) -> Finding {
    Finding::error(FindingCategory::Format, code, path, message)
}
