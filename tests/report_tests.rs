mod common;

use common::*;
use paymsg_spec::*;
use pretty_assertions::assert_eq;
use serde_json::{Value, json};

#[test]
fn test_passing_sale_report() {
    let result = engine().validate("OCserviceRequest", &valid_sale_payload());
    let text = Reporter::default().render_text("OCserviceRequest", &result);

    let mut lines = text.lines();
    assert_eq!(lines.next(), Some("✅ VALIDATION PASSED: OCserviceRequest"));
    assert_eq!(lines.next(), Some("   18 fields verified"));
    assert!(text.contains("\nInfo (5):\n"));
    assert!(text.contains("  1. OCserviceRequest.header.messageFunction: Valid code \"AUTQ\" (SaleRequest)"));
    assert!(!text.contains("Errors ("));
    assert!(text.ends_with("Totals: 0 errors, 0 warnings, 5 info\n"));
}

#[test]
fn test_failing_report_sorts_by_message() {
    let mut payload = valid_sale_payload();
    set_path(&mut payload, "OCserviceRequest.header.exchangeIdentification", json!("nope"));
    set_path(&mut payload, "OCserviceRequest.header.protocolVersion", json!("2.0.0.1"));

    let result = engine().validate("OCserviceRequest", &payload);
    let text = Reporter::default().render_text("OCserviceRequest", &result);

    assert!(text.starts_with("❌ VALIDATION FAILED: OCserviceRequest\n"));
    let first = text.find("1. OCserviceRequest.header.exchangeIdentification: Invalid UUID format");
    let second = text.find("2. OCserviceRequest.header.protocolVersion: ");
    assert!(first.is_some() && second.is_some());
    assert!(first < second);
}

#[test]
fn test_info_limit_truncates() {
    let result = engine().validate("OCserviceRequest", &valid_sale_payload());
    let text = Reporter::new(2).render_text("OCserviceRequest", &result);

    assert!(text.contains("  2. "));
    assert!(!text.contains("  3. "));
    assert!(text.contains("  ... +3 more"));
    // truncation is presentation only
    assert!(text.contains("Totals: 0 errors, 0 warnings, 5 info"));
}

#[test]
fn test_parse_error_report() {
    let outcome = validate_text(&engine(), &selector(), "{\"OCserviceRequest\": ", None);
    let text = Reporter::default().render_outcome_text(&outcome);

    assert!(text.starts_with("❌ PARSE ERROR\n  Invalid JSON: "));
    assert!(text.contains("(line 1, column"));
}

#[test]
fn test_unresolved_root_report() {
    let outcome = validate_text(&engine(), &selector(), r#"{"hello": 1, "world": 2}"#, None);
    let text = Reporter::default().render_outcome_text(&outcome);
    assert_eq!(text, "❌ NO ROOT ELEMENT FOUND\n  Top-level keys: hello, world\n");

    let outcome = validate_text(&engine(), &selector(), "[]", None);
    let text = Reporter::default().render_outcome_text(&outcome);
    assert_eq!(text, "❌ NO ROOT ELEMENT FOUND\n  Top-level keys: (none)\n");
}

#[test]
fn test_json_report_statuses() {
    let reporter = Reporter::default();
    let render = |text: &str| -> Value {
        let outcome = validate_text(&engine(), &selector(), text, None);
        serde_json::from_str(&reporter.render_json(&outcome).unwrap()).unwrap()
    };

    let valid = serde_json::to_string(&valid_sale_payload()).unwrap();
    let document = render(&valid);
    assert_eq!(document["status"], "pass");
    assert_eq!(document["root"], "OCserviceRequest");
    assert_eq!(document["result"]["stats"]["fields_checked"], 18);
    assert_eq!(document["result"]["info"].as_array().unwrap().len(), 5);

    let mut broken = valid_sale_payload();
    remove_path(&mut broken, "OCserviceRequest.header.messageFunction");
    let document = render(&serde_json::to_string(&broken).unwrap());
    assert_eq!(document["status"], "fail");
    assert_eq!(document["result"]["errors"][0]["severity"], "error");
    assert_eq!(document["result"]["errors"][0]["code"], "missing-required-field");

    assert_eq!(render("nope")["status"], "parse-error");
    assert_eq!(render("{}")["status"], "unresolved-root");
}
