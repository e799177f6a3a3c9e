//! # paymsg-spec
//!
//! Specification-driven validation of payment-terminal protocol messages.
//!
//! ## Features
//!
//! - **Data dictionary**: base types, specification types and code sets,
//!   embedded at compile time or loaded from a directory
//! - **Message trees**: root message shapes as explicit leaf/branch trees
//! - **Validation**: one-pass structural and field validation producing
//!   errors, warnings and info findings
//! - **Root selection**: picks the request/response variant from payload shape
//! - **Samples**: generates valid payloads for every supported message kind
//!
//! ## Quick Start
//!
//! ```rust,no_run
//! use paymsg_spec::*;
//!
//! let engine = SpecValidationEngine::default();
//! let payload = sample::generate(SampleKind::Sale, &SampleOptions::default());
//!
//! let result = engine.validate("OCserviceRequest", &payload);
//! assert!(result.is_pass());
//! println!("{}", Reporter::default().render_text("OCserviceRequest", &result));
//! ```

pub mod core;
pub mod error;
pub mod payload;
pub mod registry;
pub mod report;
pub mod sample;
pub mod types;
pub mod validation;

pub use crate::core::{ExclusiveGroup, ReportConfig, RootSelectionRule, RootVariant, ValidatorConfig};
pub use error::{PaymsgError, Result};
pub use payload::{Outcome, ParseFailure, parse_payload, validate_text};
pub use registry::{IntegrityIssue, SpecDictionary};
pub use report::Reporter;
pub use sample::{SampleKind, SampleOptions};
pub use types::*;
pub use validation::{
    FieldValidator, Finding, FindingCategory, PayloadValidator, PrimitiveValidator, RootSelector,
    Severity, SpecValidationEngine, ValidationResult, ValidationStats,
};
