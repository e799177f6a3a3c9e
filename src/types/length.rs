use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::error::PaymsgError;

/// Length rule attached to a specification type.
///
/// Written as `{n}` for an exact length, `[min,max]` for a bounded range and
/// `[min,*]` for an open-ended minimum.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub enum LengthConstraint {
    Exact(usize),
    Range { min: usize, max: Option<usize> },
}

/// Outcome of checking a length against a [`LengthConstraint`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LengthViolation {
    NotExactly { expected: usize, actual: usize },
    TooShort { min: usize, actual: usize },
    TooLong { max: usize, actual: usize },
}

impl LengthConstraint {
    pub fn check(&self, len: usize) -> Option<LengthViolation> {
        match *self {
            LengthConstraint::Exact(expected) if len != expected => {
                Some(LengthViolation::NotExactly {
                    expected,
                    actual: len,
                })
            }
            LengthConstraint::Exact(_) => None,
            LengthConstraint::Range { min, .. } if len < min => {
                Some(LengthViolation::TooShort { min, actual: len })
            }
            LengthConstraint::Range { max: Some(max), .. } if len > max => {
                Some(LengthViolation::TooLong { max, actual: len })
            }
            LengthConstraint::Range { .. } => None,
        }
    }
}

impl fmt::Display for LengthViolation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            LengthViolation::NotExactly { expected, actual } => {
                write!(f, "Length must be exactly {expected} (current: {actual})")
            }
            LengthViolation::TooShort { min, actual } => {
                write!(f, "Length must be at least {min} (current: {actual})")
            }
            LengthViolation::TooLong { max, actual } => {
                write!(f, "Length must be at most {max} (current: {actual})")
            }
        }
    }
}

impl fmt::Display for LengthConstraint {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            LengthConstraint::Exact(n) => write!(f, "{{{n}}}"),
            LengthConstraint::Range { min, max: Some(max) } => write!(f, "[{min},{max}]"),
            LengthConstraint::Range { min, max: None } => write!(f, "[{min},*]"),
        }
    }
}

impl FromStr for LengthConstraint {
    type Err = PaymsgError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let trimmed = s.trim();
        let invalid = || PaymsgError::parsing(format!("Invalid length constraint '{s}'"));

        if let Some(inner) = trimmed
            .strip_prefix('{')
            .and_then(|rest| rest.strip_suffix('}'))
        {
            let n = inner.trim().parse::<usize>().map_err(|_| invalid())?;
            return Ok(LengthConstraint::Exact(n));
        }

        let inner = trimmed
            .strip_prefix('[')
            .and_then(|rest| rest.strip_suffix(']'))
            .ok_or_else(invalid)?;
        let (min, max) = inner.split_once(',').ok_or_else(invalid)?;
        let min = min.trim().parse::<usize>().map_err(|_| invalid())?;
        let max = match max.trim() {
            "*" => None,
            other => Some(other.parse::<usize>().map_err(|_| invalid())?),
        };

        if max.is_some_and(|max| max < min) {
            return Err(invalid());
        }

        Ok(LengthConstraint::Range { min, max })
    }
}

impl TryFrom<String> for LengthConstraint {
    type Error = PaymsgError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.parse()
    }
}

impl From<LengthConstraint> for String {
    fn from(value: LengthConstraint) -> Self {
        value.to_string()
    }
}
