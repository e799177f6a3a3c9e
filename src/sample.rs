//! Sample payload generator for the supported message kinds.

use chrono::{DateTime, Utc};
use serde_json::{Value, json};
use std::fmt;
use std::str::FromStr;
use uuid::Uuid;

use crate::error::PaymsgError;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SampleKind {
    Sale,
    Refund,
    PreAuth,
    Void,
    Settlement,
    Report,
    Login,
    Logout,
}

/// Inputs of the generator. Defaults match the demo register/terminal pair.
#[derive(Debug, Clone, PartialEq)]
pub struct SampleOptions {
    pub amount: f64,
    pub register_id: String,
    pub terminal_id: String,
    pub merchant_id: String,
    /// Transaction being voided; a placeholder is used when absent.
    pub original_transaction: Option<String>,
    pub operator_id: String,
}

impl Default for SampleOptions {
    fn default() -> Self {
        Self {
            amount: 25.00,
            register_id: "20000004".to_string(),
            terminal_id: "11000499".to_string(),
            merchant_id: "7800199838".to_string(),
            original_transaction: None,
            operator_id: "CASHIER01".to_string(),
        }
    }
}

impl SampleKind {
    pub const ALL: [SampleKind; 8] = [
        SampleKind::Sale,
        SampleKind::Refund,
        SampleKind::PreAuth,
        SampleKind::Void,
        SampleKind::Settlement,
        SampleKind::Report,
        SampleKind::Login,
        SampleKind::Logout,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            SampleKind::Sale => "sale",
            SampleKind::Refund => "refund",
            SampleKind::PreAuth => "preauth",
            SampleKind::Void => "void",
            SampleKind::Settlement => "settlement",
            SampleKind::Report => "report",
            SampleKind::Login => "login",
            SampleKind::Logout => "logout",
        }
    }

    pub fn message_function(&self) -> &'static str {
        match self {
            SampleKind::Sale => "AUTQ",
            SampleKind::Refund => "RNFQ",
            SampleKind::PreAuth => "FAUQ",
            SampleKind::Void => "FMPV",
            SampleKind::Settlement => "RCLQ",
            SampleKind::Report => "RPTQ",
            SampleKind::Login | SampleKind::Logout => "SASQ",
        }
    }

    /// Root schema a generated payload of this kind validates against.
    pub fn root(&self) -> &'static str {
        match self {
            SampleKind::Sale | SampleKind::Refund | SampleKind::PreAuth => "OCserviceRequest",
            SampleKind::Void => "OCreversalRequest",
            SampleKind::Settlement => "OCbatchRequest",
            SampleKind::Report => "OCreportRequest",
            SampleKind::Login | SampleKind::Logout => "OCsessionManagementRequest",
        }
    }

    fn transaction_type(&self) -> &'static str {
        match self {
            SampleKind::Refund => "RFND",
            SampleKind::PreAuth => "RESV",
            _ => "CRDP",
        }
    }
}

impl fmt::Display for SampleKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for SampleKind {
    type Err = PaymsgError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let wanted = s.trim().to_ascii_lowercase().replace(['-', '_'], "");
        SampleKind::ALL
            .into_iter()
            .find(|kind| kind.as_str() == wanted)
            .ok_or_else(|| {
                PaymsgError::parsing(format!(
                    "Unknown sample kind '{s}' (expected one of: {})",
                    SampleKind::ALL.map(|k| k.as_str()).join(", ")
                ))
            })
    }
}

/// Build a fresh sample payload with new identifiers and the current time.
pub fn generate(kind: SampleKind, options: &SampleOptions) -> Value {
    generate_at(kind, options, Utc::now())
}

pub fn generate_at(kind: SampleKind, options: &SampleOptions, now: DateTime<Utc>) -> Value {
    let timestamp = now.format("%Y-%m-%dT%H:%M:%S%.3fZ").to_string();
    let amount = format!("{:.2}", options.amount);
    let header = header(kind, options, &timestamp);

    let body = match kind {
        SampleKind::Sale | SampleKind::Refund | SampleKind::PreAuth => json!({
            "header": header,
            "serviceRequest": {
                "environment": environment(options),
                "context": {
                    "saleContext": {
                        "cashierIdentification": "",
                        "invoiceNumber": "",
                        "identificationType": ""
                    }
                },
                "serviceContent": "FSPQ",
                "paymentRequest": {
                    "transactionType": kind.transaction_type(),
                    "transactionDetails": {
                        "totalAmount": amount,
                        "MOTOIndicator": false,
                        "detailedAmount": {
                            "amountGoodsAndServices": amount
                        }
                    }
                }
            }
        }),
        SampleKind::Void => json!({
            "header": header,
            "serviceRequest": {
                "environment": environment(options),
                "serviceContent": "FSRQ",
                "reversalRequest": {
                    "originalTransaction": {
                        "transactionIdentification": options
                            .original_transaction
                            .clone()
                            .unwrap_or_else(|| "000000000001".to_string()),
                        "transactionType": "CRDP"
                    },
                    "reversedAmount": amount
                }
            }
        }),
        SampleKind::Settlement => json!({
            "header": header,
            "serviceRequest": {
                "environment": environment(options),
                "serviceContent": "FSCQ",
                "reconciliationRequest": {
                    "closePeriod": true
                }
            }
        }),
        SampleKind::Report => json!({
            "header": header,
            "reportRequest": {
                "environment": environment(options),
                "reportType": "TOTL",
                "reportDate": now.format("%Y-%m-%d").to_string()
            }
        }),
        SampleKind::Login => json!({
            "header": header,
            "sessionManagementRequest": {
                "environment": { "POI": { "identification": options.terminal_id } },
                "loginRequest": {
                    "operatorIdentification": options.operator_id,
                    "operatorLanguage": "en",
                    "loginDateTime": timestamp
                }
            }
        }),
        SampleKind::Logout => json!({
            "header": header,
            "sessionManagementRequest": {
                "environment": { "POI": { "identification": options.terminal_id } },
                "logoutRequest": {
                    "maintenanceAllowed": "1"
                }
            }
        }),
    };

    json!({ "OCserviceRequest": body })
}

fn header(kind: SampleKind, options: &SampleOptions, timestamp: &str) -> Value {
    json!({
        "messageFunction": kind.message_function(),
        "protocolVersion": "2.0",
        "exchangeIdentification": Uuid::new_v4().to_string(),
        "creationDateTime": timestamp,
        "initiatingParty": {
            "identification": options.register_id,
            "type": "PID",
            "shortName": "Cash Register ID",
            "authenticationKey": Uuid::new_v4().to_string().to_uppercase()
        },
        "recipientParty": {
            "identification": options.terminal_id,
            "type": "TID",
            "shortName": "Terminal ID"
        }
    })
}

fn environment(options: &SampleOptions) -> Value {
    json!({
        "merchant": { "identification": options.merchant_id },
        "POI": { "identification": options.terminal_id }
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    #[test]
    fn test_kind_parsing() {
        assert_eq!("Sale".parse::<SampleKind>().unwrap(), SampleKind::Sale);
        assert_eq!("pre-auth".parse::<SampleKind>().unwrap(), SampleKind::PreAuth);
        assert_eq!("PRE_AUTH".parse::<SampleKind>().unwrap(), SampleKind::PreAuth);
        assert!("capture".parse::<SampleKind>().is_err());
    }

    #[test]
    fn test_sale_shape() {
        let now = Utc.with_ymd_and_hms(2025, 10, 1, 15, 30, 45).unwrap();
        let payload = generate_at(SampleKind::Refund, &SampleOptions::default(), now);
        let root = &payload["OCserviceRequest"];

        assert_eq!(root["header"]["messageFunction"], "RNFQ");
        assert_eq!(root["header"]["creationDateTime"], "2025-10-01T15:30:45.000Z");
        assert_eq!(root["serviceRequest"]["paymentRequest"]["transactionType"], "RFND");
        assert_eq!(
            root["serviceRequest"]["paymentRequest"]["transactionDetails"]["totalAmount"],
            "25.00"
        );

        let key = root["header"]["initiatingParty"]["authenticationKey"].as_str().unwrap();
        assert_eq!(key, key.to_uppercase());
        assert_ne!(root["header"]["exchangeIdentification"].as_str().unwrap(), key.to_lowercase());
    }

    #[test]
    fn test_void_uses_original_transaction() {
        let options = SampleOptions {
            original_transaction: Some("TX-42".to_string()),
            amount: 7.5,
            ..Default::default()
        };
        let payload = generate(SampleKind::Void, &options);
        let reversal = &payload["OCserviceRequest"]["serviceRequest"]["reversalRequest"];
        assert_eq!(reversal["originalTransaction"]["transactionIdentification"], "TX-42");
        assert_eq!(reversal["reversedAmount"], "7.50");
    }
}
