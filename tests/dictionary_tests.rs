mod common;

use common::*;
use paymsg_spec::registry::embedded::{
    BASE_TYPES_JSON, CODE_SETS_JSON, SCHEMAS_JSON, SPEC_TYPES_JSON,
};
use paymsg_spec::registry::{BASE_TYPES_FILE, CODE_SETS_FILE, SCHEMAS_FILE, SPEC_TYPES_FILE};
use paymsg_spec::*;
use pretty_assertions::assert_eq;
use serde_json::{Value, json};
use std::path::Path;
use std::sync::Arc;
use tempfile::TempDir;

fn write_dictionary(dir: &Path, code_sets: &str) {
    std::fs::write(dir.join(BASE_TYPES_FILE), BASE_TYPES_JSON).unwrap();
    std::fs::write(dir.join(SPEC_TYPES_FILE), SPEC_TYPES_JSON).unwrap();
    std::fs::write(dir.join(CODE_SETS_FILE), code_sets).unwrap();
    std::fs::write(dir.join(SCHEMAS_FILE), SCHEMAS_JSON).unwrap();
}

#[test]
fn test_directory_dictionary_matches_embedded() {
    let temp_dir = TempDir::new().unwrap();
    write_dictionary(temp_dir.path(), CODE_SETS_JSON);

    let loaded = SpecDictionary::from_dir(temp_dir.path()).unwrap();
    let embedded = SpecDictionary::embedded();

    assert_eq!(
        loaded.root_names().collect::<Vec<_>>(),
        embedded.root_names().collect::<Vec<_>>()
    );
    assert_eq!(loaded.spec_types().count(), embedded.spec_types().count());
    assert!(loaded.check_integrity().is_empty());
    assert_eq!(
        loaded.root("OCbatchResponse").unwrap().element,
        "OCserviceResponse"
    );
}

#[test]
fn test_missing_dictionary_file() {
    let temp_dir = TempDir::new().unwrap();
    std::fs::write(temp_dir.path().join(BASE_TYPES_FILE), BASE_TYPES_JSON).unwrap();

    let error = SpecDictionary::from_dir(temp_dir.path()).unwrap_err();
    assert!(matches!(error, PaymsgError::Load { .. }));
    assert!(error.to_string().contains(SPEC_TYPES_FILE));
}

#[test]
fn test_malformed_dictionary_file() {
    let temp_dir = TempDir::new().unwrap();
    write_dictionary(temp_dir.path(), "{ not json");

    let error = SpecDictionary::from_dir(temp_dir.path()).unwrap_err();
    assert!(error.to_string().contains(CODE_SETS_FILE));
}

#[test]
fn test_custom_code_set_changes_validation() {
    let mut code_sets: Value = serde_json::from_str(CODE_SETS_JSON).unwrap();
    code_sets["CS-TransactionType"]
        .as_array_mut()
        .unwrap()
        .retain(|entry| entry["code"] != "CRDP");

    let temp_dir = TempDir::new().unwrap();
    write_dictionary(temp_dir.path(), &code_sets.to_string());
    let dictionary = Arc::new(SpecDictionary::from_dir(temp_dir.path()).unwrap());

    let engine = SpecValidationEngine::new(dictionary, ValidatorConfig::default());
    let result = engine.validate("OCserviceRequest", &valid_sale_payload());

    assert_eq!(result.error_count(), 1);
    assert_eq!(
        result.errors[0].path,
        "OCserviceRequest.serviceRequest.paymentRequest.transactionType"
    );
    assert!(result.errors[0].message.starts_with("Invalid code \"CRDP\""));
}

#[test]
fn test_dangling_references_are_reported_not_fatal() {
    let mut code_sets: Value = serde_json::from_str(CODE_SETS_JSON).unwrap();
    code_sets.as_object_mut().unwrap().shift_remove("CS-DeviceType");

    let temp_dir = TempDir::new().unwrap();
    write_dictionary(temp_dir.path(), &code_sets.to_string());
    let dictionary = Arc::new(SpecDictionary::from_dir(temp_dir.path()).unwrap());

    let issues = dictionary.check_integrity();
    assert_eq!(issues.len(), 1);
    assert!(issues[0].to_string().contains("CS-DeviceType"));

    // the missing set is skipped, so both party types lose their info entry
    let engine = SpecValidationEngine::new(dictionary, ValidatorConfig::default());
    let result = engine.validate("OCserviceRequest", &valid_sale_payload());
    assert!(result.is_pass());
    assert_eq!(result.info_count(), 3);
}

#[test]
fn test_config_file_round_trip() {
    let temp_dir = TempDir::new().unwrap();
    let path = temp_dir.path().join("validator.json");
    std::fs::write(
        &path,
        json!({
            "optional_sections": ["paymentRequest"],
            "report": { "info_limit": 3 }
        })
        .to_string(),
    )
    .unwrap();

    let config = ValidatorConfig::from_path(&path).unwrap();
    assert!(config.is_optional_section("paymentRequest"));
    assert!(!config.is_optional_section("detailedAmount"));
    assert_eq!(config.report.info_limit, 3);
    assert_eq!(config.exclusive_groups.len(), 2);

    let mut payload = valid_sale_payload();
    remove_path(&mut payload, "OCserviceRequest.serviceRequest.paymentRequest");
    let engine = SpecValidationEngine::with_config(config);
    assert!(engine.validate("OCserviceRequest", &payload).is_pass());
}

#[test]
fn test_invalid_config_files() {
    let temp_dir = TempDir::new().unwrap();

    let missing = ValidatorConfig::from_path(temp_dir.path().join("absent.json")).unwrap_err();
    assert!(matches!(missing, PaymsgError::Config { .. }));

    let path = temp_dir.path().join("groups.json");
    std::fs::write(&path, r#"{"exclusive_groups": [{"members": ["loginRequest"]}]}"#).unwrap();
    let lonely = ValidatorConfig::from_path(&path).unwrap_err();
    assert!(lonely.to_string().contains("at least two members"));
}

#[test]
fn test_every_root_tree_resolves() {
    let dictionary = SpecDictionary::embedded();
    for root in dictionary.roots() {
        let mut leaves = 0;
        root.body.walk_leaves(&root.element, &mut |path, leaf| {
            assert!(path.starts_with(&root.element));
            assert!(
                dictionary.spec_type(&leaf.spec_type).is_some()
                    || dictionary.is_base_type(&leaf.spec_type),
                "{path} has unknown type {}",
                leaf.spec_type
            );
            leaves += 1;
        });
        assert_eq!(leaves, root.body.leaf_count());
    }
}

#[test]
fn test_engine_over_dictionary_built_in_code() {
    let status = CodeSet::new(vec![
        CodeEntry::new("OK").with_label("Ready"),
        CodeEntry::new("KO").with_label("Out of service"),
    ]);
    let dictionary = SpecDictionary::default()
        .with_spec_type(
            SpecificationType::new("ST-Status", "CodeSet")
                .with_code_set("CS-Status")
                .with_length(LengthConstraint::Exact(2)),
        )
        .with_spec_type(SpecificationType::new("ST-Total", "Decimal").with_base_type("Amount"))
        .with_code_set("CS-Status", status)
        .with_root(
            RootSchema::new(
                "StatusReport",
                Branch::new()
                    .with_leaf("status", Leaf::required("ST-Status"))
                    .with_branch("totals", Branch::new().with_leaf("sales", Leaf::required("ST-Total"))),
            )
            .with_description("Terminal status report"),
        );

    let engine = SpecValidationEngine::new(Arc::new(dictionary), ValidatorConfig::strict());

    let ready = json!({"StatusReport": {"status": "OK", "totals": {"sales": "10.00"}}});
    let result = engine.validate("StatusReport", &ready);
    assert!(result.is_pass());
    assert!(result.has_code("valid-code"));

    let broken = json!({"StatusReport": {"status": "MAYBE", "totals": {"sales": "-3"}}});
    let result = engine.validate("StatusReport", &broken);
    assert!(result.has_code("invalid-code"));
    assert!(result.has_code("length-violation"));
    assert!(result.has_code("negative-amount"));
    assert!(result.has_code("amount-decimal-places"));
    assert!(!result.has_code("valid-code"));

    let missing = json!({"StatusReport": {"status": "KO"}});
    let result = engine.validate("StatusReport", &missing);
    assert_eq!(result.error_count(), 1);
    assert!(result.has_code("missing-required-section"));
}
