use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::error::PaymsgError;

/// Occurrence constraint on a schema field, written `[min..max]`.
///
/// `max == None` stands for the unbounded `*` form. Parsing is lenient about
/// surrounding whitespace and missing brackets, so `0..1`, `[ 1..* ]` and
/// `[0..2]` are all accepted.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct Cardinality {
    pub min: u32,
    pub max: Option<u32>,
}

impl Cardinality {
    pub const REQUIRED: Cardinality = Cardinality {
        min: 1,
        max: Some(1),
    };
    pub const OPTIONAL: Cardinality = Cardinality {
        min: 0,
        max: Some(1),
    };

    pub fn new(min: u32, max: Option<u32>) -> Self {
        Self { min, max }
    }

    pub fn is_required(&self) -> bool {
        self.min >= 1
    }

    /// True when more than one occurrence is allowed.
    pub fn is_repeating(&self) -> bool {
        self.max.is_none_or(|max| max > 1)
    }

    pub fn allows(&self, occurrences: usize) -> bool {
        match self.max {
            Some(max) => occurrences <= max as usize,
            None => true,
        }
    }
}

impl fmt::Display for Cardinality {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.max {
            Some(max) => write!(f, "[{}..{}]", self.min, max),
            None => write!(f, "[{}..*]", self.min),
        }
    }
}

impl FromStr for Cardinality {
    type Err = PaymsgError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let inner = s
            .trim()
            .trim_start_matches('[')
            .trim_end_matches(']')
            .trim();

        let (min, max) = inner
            .split_once("..")
            .ok_or_else(|| PaymsgError::parsing(format!("Invalid cardinality '{s}'")))?;

        let min = min
            .trim()
            .parse::<u32>()
            .map_err(|_| PaymsgError::parsing(format!("Invalid cardinality minimum in '{s}'")))?;

        let max = match max.trim() {
            "*" | "n" => None,
            other => Some(other.parse::<u32>().map_err(|_| {
                PaymsgError::parsing(format!("Invalid cardinality maximum in '{s}'"))
            })?),
        };

        if let Some(max) = max {
            if max < min {
                return Err(PaymsgError::parsing(format!(
                    "Cardinality maximum is lower than minimum in '{s}'"
                )));
            }
        }

        Ok(Self { min, max })
    }
}

impl TryFrom<String> for Cardinality {
    type Error = PaymsgError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.parse()
    }
}

impl From<Cardinality> for String {
    fn from(value: Cardinality) -> Self {
        value.to_string()
    }
}
