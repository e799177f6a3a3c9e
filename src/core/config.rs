use indexmap::IndexSet;
use serde::{Deserialize, Serialize};
use std::path::Path;

use crate::error::{PaymsgError, Result};

/// Policy knobs of the structural validator, the root selector and the
/// reporter. Every section falls back to the built-in policy when omitted
/// from a config file.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ValidatorConfig {
    /// Branch names that may be absent even when they hold required leaves.
    pub optional_sections: IndexSet<String>,
    pub exclusive_groups: Vec<ExclusiveGroup>,
    pub root_selection: Vec<RootSelectionRule>,
    pub report: ReportConfig,
}

/// Sibling branches of which exactly one must be present.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ExclusiveGroup {
    pub members: Vec<String>,
}

/// Picks a root schema for payloads whose top-level key is `element`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RootSelectionRule {
    pub element: String,
    pub default_root: String,
    #[serde(default)]
    pub variants: Vec<RootVariant>,
}

/// `marker` is a dotted path below the element; its presence selects `root`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RootVariant {
    pub marker: String,
    pub root: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ReportConfig {
    pub info_limit: usize,
}

const DEFAULT_OPTIONAL_SECTIONS: &[&str] = &[
    "detailedAmount",
    "DCCRefund",
    "VehicleRentalData",
    "LodgingData",
    "TravelData",
    "PickupLocation",
    "ReturnLocation",
    "DetailedCharge",
    "Property",
    "RoomDetail",
    "TravelAgency",
    "TripSegment",
    "CruiseData",
    "paymentResponse",
    "transactionReport",
    "loginRequest",
    "logoutRequest",
    "loginResponse",
    "logoutResponse",
    "cardData",
];

impl Default for ValidatorConfig {
    fn default() -> Self {
        Self {
            optional_sections: DEFAULT_OPTIONAL_SECTIONS
                .iter()
                .map(|name| name.to_string())
                .collect(),
            exclusive_groups: vec![
                ExclusiveGroup::new(["loginRequest", "logoutRequest"]),
                ExclusiveGroup::new(["loginResponse", "logoutResponse"]),
            ],
            root_selection: vec![
                RootSelectionRule::new("OCserviceRequest", "OCserviceRequest")
                    .with_variant("reportRequest", "OCreportRequest")
                    .with_variant("sessionManagementRequest", "OCsessionManagementRequest")
                    .with_variant("serviceRequest.reversalRequest", "OCreversalRequest")
                    .with_variant("serviceRequest.reconciliationRequest", "OCbatchRequest"),
                RootSelectionRule::new("OCserviceResponse", "OCserviceResponse")
                    .with_variant("reportResponse", "OCreportResponse")
                    .with_variant("sessionManagementResponse", "OCsessionManagementResponse")
                    .with_variant("serviceResponse.reversalResponse", "OCreversalResponse")
                    .with_variant("serviceResponse.reconciliationResponse", "OCbatchResponse"),
            ],
            report: ReportConfig::default(),
        }
    }
}

impl Default for ReportConfig {
    fn default() -> Self {
        Self { info_limit: 10 }
    }
}

impl ValidatorConfig {
    /// Load a JSON config file. Missing sections keep their defaults.
    pub fn from_path(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let content = std::fs::read_to_string(path).map_err(|e| {
            PaymsgError::config(format!("Cannot read config file {}: {e}", path.display()))
        })?;
        Self::from_json(&content)
    }

    pub fn from_json(content: &str) -> Result<Self> {
        let config: Self = serde_json::from_str(content)
            .map_err(|e| PaymsgError::config(format!("Invalid validator config: {e}")))?;
        config.check()?;
        Ok(config)
    }

    fn check(&self) -> Result<()> {
        if let Some(group) = self.exclusive_groups.iter().find(|g| g.members.len() < 2) {
            return Err(PaymsgError::config(format!(
                "Exclusive group {:?} needs at least two members",
                group.members
            )));
        }
        Ok(())
    }

    pub fn is_optional_section(&self, name: &str) -> bool {
        self.optional_sections.contains(name)
    }

    pub fn with_optional_section(mut self, name: impl Into<String>) -> Self {
        self.optional_sections.insert(name.into());
        self
    }

    pub fn with_exclusive_group(mut self, group: ExclusiveGroup) -> Self {
        self.exclusive_groups.push(group);
        self
    }

    pub fn with_info_limit(mut self, info_limit: usize) -> Self {
        self.report.info_limit = info_limit;
        self
    }

    /// No allowlist and no exclusive groups: every section holding a
    /// required leaf must be present.
    pub fn strict() -> Self {
        Self {
            optional_sections: IndexSet::new(),
            exclusive_groups: Vec::new(),
            ..Default::default()
        }
    }
}

impl ExclusiveGroup {
    pub fn new<I, S>(members: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            members: members.into_iter().map(Into::into).collect(),
        }
    }

    pub fn contains(&self, name: &str) -> bool {
        self.members.iter().any(|member| member == name)
    }
}

impl RootSelectionRule {
    pub fn new(element: impl Into<String>, default_root: impl Into<String>) -> Self {
        Self {
            element: element.into(),
            default_root: default_root.into(),
            variants: Vec::new(),
        }
    }

    pub fn with_variant(mut self, marker: impl Into<String>, root: impl Into<String>) -> Self {
        self.variants.push(RootVariant {
            marker: marker.into(),
            root: root.into(),
        });
        self
    }
}
