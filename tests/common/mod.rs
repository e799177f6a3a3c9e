use paymsg_spec::*;
use serde_json::{Value, json};

pub const EXCHANGE_ID: &str = "550e8400-e29b-41d4-a716-446655440000";
pub const AUTH_KEY: &str = "6FA459EA-EE8A-4CA4-894E-DB77E160355E";

#[allow(dead_code)]
pub fn engine() -> SpecValidationEngine {
    SpecValidationEngine::default()
}

#[allow(dead_code)]
pub fn selector() -> RootSelector {
    RootSelector::from_config(&ValidatorConfig::default(), &SpecDictionary::embedded())
}

#[allow(dead_code)]
pub fn header(message_function: &str) -> Value {
    json!({
        "messageFunction": message_function,
        "protocolVersion": "2.0",
        "exchangeIdentification": EXCHANGE_ID,
        "creationDateTime": "2025-10-01T15:30:45.123Z",
        "initiatingParty": {
            "identification": "20000004",
            "type": "PID",
            "shortName": "Cash Register ID",
            "authenticationKey": AUTH_KEY
        },
        "recipientParty": {
            "identification": "11000499",
            "type": "TID",
            "shortName": "Terminal ID"
        }
    })
}

#[allow(dead_code)]
pub fn environment() -> Value {
    json!({
        "merchant": { "identification": "7800199838" },
        "POI": { "identification": "11000499" }
    })
}

/// A complete, valid sale request.
#[allow(dead_code)]
pub fn valid_sale_payload() -> Value {
    json!({
        "OCserviceRequest": {
            "header": header("AUTQ"),
            "serviceRequest": {
                "environment": environment(),
                "context": {
                    "saleContext": {
                        "cashierIdentification": "",
                        "invoiceNumber": "",
                        "identificationType": ""
                    }
                },
                "serviceContent": "FSPQ",
                "paymentRequest": {
                    "transactionType": "CRDP",
                    "transactionDetails": {
                        "totalAmount": "25.00",
                        "MOTOIndicator": false,
                        "detailedAmount": {
                            "amountGoodsAndServices": "25.00"
                        }
                    }
                }
            }
        }
    })
}

#[allow(dead_code)]
pub fn valid_payment_response() -> Value {
    json!({
        "OCserviceResponse": {
            "header": header("AUTP"),
            "serviceResponse": {
                "environment": environment(),
                "serviceContent": "FSPP",
                "response": {
                    "response": "APPR"
                },
                "paymentResponse": {
                    "transactionIdentification": "000000000042",
                    "transactionDateTime": "2025-10-01T15:30:47.000Z",
                    "transactionDetails": {
                        "totalAmount": "25.00"
                    }
                }
            }
        }
    })
}

fn pointer(path: &str) -> String {
    format!("/{}", path.replace('.', "/"))
}

#[allow(dead_code)]
pub fn lookup<'a>(payload: &'a Value, path: &str) -> Option<&'a Value> {
    payload.pointer(&pointer(path))
}

#[allow(dead_code)]
pub fn set_path(payload: &mut Value, path: &str, value: Value) {
    let (parent, key) = path.rsplit_once('.').expect("dotted path");
    payload
        .pointer_mut(&pointer(parent))
        .and_then(Value::as_object_mut)
        .expect("parent object")
        .insert(key.to_string(), value);
}

#[allow(dead_code)]
pub fn remove_path(payload: &mut Value, path: &str) -> Option<Value> {
    let (parent, key) = path.rsplit_once('.')?;
    payload
        .pointer_mut(&pointer(parent))
        .and_then(Value::as_object_mut)?
        .remove(key)
}

/// Dotted paths of leaves of `root` that are present in `payload`.
#[allow(dead_code)]
pub fn present_leaves(root: &str, payload: &Value, required: bool) -> Vec<String> {
    let dictionary = SpecDictionary::embedded();
    let schema = dictionary.root(root).expect("known root");
    let mut paths = Vec::new();
    schema.body.walk_leaves(&schema.element, &mut |path, leaf| {
        if leaf.cardinality.is_required() == required && lookup(payload, path).is_some() {
            paths.push(path.to_string());
        }
    });
    paths
}
