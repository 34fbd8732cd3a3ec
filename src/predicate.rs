//! Leaf predicate shapes and their SQL text rendering.
//!
//! A [`Predicate`] is the single constraint produced for one filter clause.
//! Composition into AND/OR trees is the caller's concern; this crate only
//! ever emits leaves.

use std::fmt;

use crate::argument_parser::TypedArgument;

/// One backend constraint over an alias-qualified property path.
#[derive(Debug, Clone, PartialEq)]
pub enum Predicate {
    Equal { path: String, value: TypedArgument },
    NotEqual { path: String, value: TypedArgument },
    GreaterThan { path: String, value: TypedArgument },
    GreaterEqual { path: String, value: TypedArgument },
    LessThan { path: String, value: TypedArgument },
    LessEqual { path: String, value: TypedArgument },
    /// Case-insensitive pattern match. The pattern already uses the
    /// backend's `%` wildcard.
    ILike { path: String, pattern: String },
    NotILike { path: String, pattern: String },
    IsNull { path: String },
    IsNotNull { path: String },
}

impl Predicate {
    /// The alias-qualified property path this predicate constrains.
    pub fn path(&self) -> &str {
        match self {
            Predicate::Equal { path, .. }
            | Predicate::NotEqual { path, .. }
            | Predicate::GreaterThan { path, .. }
            | Predicate::GreaterEqual { path, .. }
            | Predicate::LessThan { path, .. }
            | Predicate::LessEqual { path, .. }
            | Predicate::ILike { path, .. }
            | Predicate::NotILike { path, .. }
            | Predicate::IsNull { path }
            | Predicate::IsNotNull { path } => path,
        }
    }

    /// Render the predicate as backend SQL text.
    pub fn to_sql(&self) -> String {
        match self {
            Predicate::Equal { path, value } => {
                format!("({} = {})", path, sql_literal(value))
            }
            Predicate::NotEqual { path, value } => {
                format!("({} != {})", path, sql_literal(value))
            }
            Predicate::GreaterThan { path, value } => {
                format!("({} > {})", path, sql_literal(value))
            }
            Predicate::GreaterEqual { path, value } => {
                format!("({} >= {})", path, sql_literal(value))
            }
            Predicate::LessThan { path, value } => {
                format!("({} < {})", path, sql_literal(value))
            }
            Predicate::LessEqual { path, value } => {
                format!("({} <= {})", path, sql_literal(value))
            }
            Predicate::ILike { path, pattern } => {
                format!("({} ILIKE {})", path, quote(pattern))
            }
            Predicate::NotILike { path, pattern } => {
                format!("({} NOT ILIKE {})", path, quote(pattern))
            }
            Predicate::IsNull { path } => format!("({} IS NULL)", path),
            Predicate::IsNotNull { path } => format!("({} IS NOT NULL)", path),
        }
    }
}

impl fmt::Display for Predicate {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.to_sql())
    }
}

/// SQL literal text for a typed value.
fn sql_literal(value: &TypedArgument) -> String {
    match value {
        TypedArgument::Text(v) => quote(v),
        TypedArgument::Integer(v) => v.to_string(),
        TypedArgument::Float(v) => v.to_string(),
        TypedArgument::Boolean(v) => v.to_string(),
        TypedArgument::Date(v) => quote(&v.to_string()),
        TypedArgument::DateTime(v) => quote(&v.to_rfc3339()),
        TypedArgument::Uuid(v) => quote(&v.to_string()),
        TypedArgument::NullLiteral => "NULL".to_string(),
    }
}

/// Single-quoted SQL string literal with embedded quotes doubled.
fn quote(text: &str) -> String {
    format!("'{}'", text.replace('\'', "''"))
}
