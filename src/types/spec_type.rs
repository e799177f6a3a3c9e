use serde::{Deserialize, Serialize};
use std::fmt;

use super::LengthConstraint;

/// Primitive value kinds the field validator knows how to check.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum BaseType {
    Uuid,
    IsoDateTime,
    IsoDate,
    IsoTime,
    Boolean,
    Number,
    DigitString,
    Amount,
    TextString,
    Indicator,
    PercentageRate,
    CodeSet,
}

impl BaseType {
    /// Resolve a base type from its dictionary name. `Decimal` is an alias
    /// for `Number`; unknown names yield `None`.
    pub fn parse(name: &str) -> Option<Self> {
        match name {
            "UUID" => Some(BaseType::Uuid),
            "ISODateTime" => Some(BaseType::IsoDateTime),
            "ISODate" => Some(BaseType::IsoDate),
            "ISOTime" => Some(BaseType::IsoTime),
            "Boolean" => Some(BaseType::Boolean),
            "Number" | "Decimal" => Some(BaseType::Number),
            "DigitString" => Some(BaseType::DigitString),
            "Amount" => Some(BaseType::Amount),
            "TextString" => Some(BaseType::TextString),
            "Indicator" => Some(BaseType::Indicator),
            "PercentageRate" => Some(BaseType::PercentageRate),
            "CodeSet" => Some(BaseType::CodeSet),
            _ => None,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            BaseType::Uuid => "UUID",
            BaseType::IsoDateTime => "ISODateTime",
            BaseType::IsoDate => "ISODate",
            BaseType::IsoTime => "ISOTime",
            BaseType::Boolean => "Boolean",
            BaseType::Number => "Number",
            BaseType::DigitString => "DigitString",
            BaseType::Amount => "Amount",
            BaseType::TextString => "TextString",
            BaseType::Indicator => "Indicator",
            BaseType::PercentageRate => "PercentageRate",
            BaseType::CodeSet => "CodeSet",
        }
    }
}

impl fmt::Display for BaseType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Descriptive entry of the base type table.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BaseTypeInfo {
    pub definition: String,
    pub format: String,
    pub example: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub notes: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub reference: Option<String>,
}

/// A named, reusable leaf type: a base type plus an optional length rule
/// and an optional code set reference.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SpecificationType {
    /// Filled from the registry key after loading.
    #[serde(skip)]
    pub name: String,

    /// Declared kind. Either a base type name, a more primitive
    /// specification type, or a descriptive label such as `DateTime`.
    #[serde(rename = "type")]
    pub kind: String,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub base_type: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub length: Option<LengthConstraint>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub code_set: Option<String>,

    #[serde(default, rename = "desc", skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
}

impl SpecificationType {
    pub fn new(name: impl Into<String>, kind: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            kind: kind.into(),
            base_type: None,
            length: None,
            code_set: None,
            description: None,
        }
    }

    pub fn with_base_type(mut self, base_type: impl Into<String>) -> Self {
        self.base_type = Some(base_type.into());
        self
    }

    pub fn with_length(mut self, length: LengthConstraint) -> Self {
        self.length = Some(length);
        self
    }

    pub fn with_code_set(mut self, code_set: impl Into<String>) -> Self {
        self.code_set = Some(code_set.into());
        self
    }

    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }
}

impl fmt::Display for SpecificationType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} ({})", self.name, self.kind)?;
        if let Some(length) = &self.length {
            write!(f, " length {length}")?;
        }
        if let Some(code_set) = &self.code_set {
            write!(f, " codes {code_set}")?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_base_type_aliases() {
        assert_eq!(BaseType::parse("Decimal"), Some(BaseType::Number));
        assert_eq!(BaseType::parse("Number"), Some(BaseType::Number));
        assert_eq!(BaseType::parse("DateTime"), None);
        assert_eq!(BaseType::parse("UUID").unwrap().to_string(), "UUID");
    }

    #[test]
    fn test_deserialize_dictionary_entry() {
        let st: SpecificationType = serde_json::from_str(
            r#"{"type": "Decimal", "baseType": "Amount", "length": "[1,15]", "desc": "Monetary amount"}"#,
        )
        .unwrap();

        assert_eq!(st.kind, "Decimal");
        assert_eq!(st.base_type.as_deref(), Some("Amount"));
        assert_eq!(
            st.length,
            Some(LengthConstraint::Range {
                min: 1,
                max: Some(15)
            })
        );
        assert_eq!(st.description.as_deref(), Some("Monetary amount"));
        assert!(st.code_set.is_none());
    }

    #[test]
    fn test_bad_length_is_a_load_error() {
        let result =
            serde_json::from_str::<SpecificationType>(r#"{"type": "TextString", "length": "3-6"}"#);
        assert!(result.is_err());
    }
}
