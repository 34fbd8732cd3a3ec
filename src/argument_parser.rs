//! Conversion of raw textual filter arguments into typed values.
//!
//! The filter grammar delivers every argument as a string. Before a
//! predicate can be built, the argument has to be cast to the native type
//! of the property it is compared against. That cast lives behind the
//! [`ArgumentParser`] trait so callers can swap in their own conversion
//! rules; [`DefaultArgumentParser`] covers the built-in type vocabulary.

use chrono::{DateTime, NaiveDate, Utc};
use std::fmt;
use thiserror::Error;
use uuid::Uuid;

use crate::entity_catalog::property_type::PropertyType;

/// Literal argument text that denotes an SQL NULL.
pub const NULL_ARGUMENT: &str = "NULL";

/// A filter argument cast to the native type of its target property.
///
/// The literal argument text `NULL` is kept as its own variant instead of
/// an absent value, so the equality operators can distinguish "compare
/// against NULL" from any real value of the property type.
#[derive(Debug, Clone, PartialEq)]
pub enum TypedArgument {
    Text(String),
    Integer(i64),
    Float(f64),
    Boolean(bool),
    Date(NaiveDate),
    DateTime(DateTime<Utc>),
    Uuid(Uuid),
    /// The literal argument text `NULL`.
    NullLiteral,
}

impl TypedArgument {
    pub fn is_null_literal(&self) -> bool {
        matches!(self, TypedArgument::NullLiteral)
    }

    /// Textual content, if the argument is of a textual type.
    pub fn as_text(&self) -> Option<&str> {
        match self {
            TypedArgument::Text(s) => Some(s),
            _ => None,
        }
    }
}

impl fmt::Display for TypedArgument {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TypedArgument::Text(v) => write!(f, "{v}"),
            TypedArgument::Integer(v) => write!(f, "{v}"),
            TypedArgument::Float(v) => write!(f, "{v}"),
            TypedArgument::Boolean(v) => write!(f, "{v}"),
            TypedArgument::Date(v) => write!(f, "{v}"),
            TypedArgument::DateTime(v) => write!(f, "{}", v.to_rfc3339()),
            TypedArgument::Uuid(v) => write!(f, "{v}"),
            TypedArgument::NullLiteral => f.write_str(NULL_ARGUMENT),
        }
    }
}

/// The argument text cannot be converted to the target type.
#[derive(Debug, Clone, Error, PartialEq)]
#[error("cannot cast '{argument}' to type {}", .expected.map_or("<unresolved>", |ty| ty.name()))]
pub struct ArgumentFormatError {
    pub argument: String,
    /// `None` when the target type itself could not be resolved.
    pub expected: Option<PropertyType>,
}

impl ArgumentFormatError {
    pub fn expected_name(&self) -> &'static str {
        match self.expected {
            Some(ty) => ty.name(),
            None => "<unresolved>",
        }
    }
}

/// Converts the raw string argument of a filter clause into a typed value.
///
/// Implementations must return [`TypedArgument::NullLiteral`] for the
/// literal text `NULL` regardless of the target type, and must fail with a
/// format error when no target type was resolved.
pub trait ArgumentParser: Send + Sync {
    fn parse(
        &self,
        argument: &str,
        target: Option<PropertyType>,
    ) -> Result<TypedArgument, ArgumentFormatError>;
}

/// Built-in parser for the catalog's type vocabulary.
///
/// Dates are accepted in `YYYY-MM-DD` form, timestamps as RFC 3339, and
/// booleans as `true`/`false` in any letter case.
#[derive(Debug, Clone, Copy, Default)]
pub struct DefaultArgumentParser;

impl DefaultArgumentParser {
    pub fn new() -> Self {
        DefaultArgumentParser
    }
}

impl ArgumentParser for DefaultArgumentParser {
    fn parse(
        &self,
        argument: &str,
        target: Option<PropertyType>,
    ) -> Result<TypedArgument, ArgumentFormatError> {
        if argument == NULL_ARGUMENT {
            return Ok(TypedArgument::NullLiteral);
        }
        let fail = || ArgumentFormatError {
            argument: argument.to_string(),
            expected: target,
        };
        let ty = target.ok_or_else(fail)?;

        match ty {
            PropertyType::Text => Ok(TypedArgument::Text(argument.to_string())),
            PropertyType::Integer => argument
                .parse::<i64>()
                .map(TypedArgument::Integer)
                .map_err(|_| fail()),
            PropertyType::Float => argument
                .parse::<f64>()
                .map(TypedArgument::Float)
                .map_err(|_| fail()),
            PropertyType::Boolean => match argument.to_ascii_lowercase().as_str() {
                "true" => Ok(TypedArgument::Boolean(true)),
                "false" => Ok(TypedArgument::Boolean(false)),
                _ => Err(fail()),
            },
            PropertyType::Date => NaiveDate::parse_from_str(argument, "%Y-%m-%d")
                .map(TypedArgument::Date)
                .map_err(|_| fail()),
            PropertyType::DateTime => DateTime::parse_from_rfc3339(argument)
                .map(|dt| TypedArgument::DateTime(dt.with_timezone(&Utc)))
                .map_err(|_| fail()),
            PropertyType::Uuid => Uuid::parse_str(argument)
                .map(TypedArgument::Uuid)
                .map_err(|_| fail()),
        }
    }
}
