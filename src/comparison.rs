use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Comparison operator of one filter clause.
///
/// This is the operator vocabulary handed over by the filter-text parser.
/// The textual spellings follow the FIQL-style grammar: each operator has a
/// symbolic form and an `=xx=` alternative.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Comparison {
    Equal,
    NotEqual,
    GreaterThan,
    GreaterEqual,
    LessThan,
    LessEqual,
}

impl Comparison {
    /// Canonical operator token as written in filter expressions.
    pub fn token(&self) -> &'static str {
        match self {
            Comparison::Equal => "==",
            Comparison::NotEqual => "!=",
            Comparison::GreaterThan => "=gt=",
            Comparison::GreaterEqual => "=ge=",
            Comparison::LessThan => "=lt=",
            Comparison::LessEqual => "=le=",
        }
    }
}

impl fmt::Display for Comparison {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.token())
    }
}

/// An operator token that is not part of the comparison vocabulary.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("unknown comparison operator '{0}'")]
pub struct UnknownOperator(pub String);

impl FromStr for Comparison {
    type Err = UnknownOperator;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "==" | "=eq=" => Ok(Comparison::Equal),
            "!=" | "=ne=" => Ok(Comparison::NotEqual),
            ">" | "=gt=" => Ok(Comparison::GreaterThan),
            ">=" | "=ge=" => Ok(Comparison::GreaterEqual),
            "<" | "=lt=" => Ok(Comparison::LessThan),
            "<=" | "=le=" => Ok(Comparison::LessEqual),
            other => Err(UnknownOperator(other.to_string())),
        }
    }
}
