pub mod config;

pub use config::{ExclusiveGroup, ReportConfig, RootSelectionRule, RootVariant, ValidatorConfig};
