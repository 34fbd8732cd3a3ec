//! Shared operator-to-predicate translation.
//!
//! Every builder funnels through [`translate`] once it has an
//! alias-qualified property path and a typed argument. Equality operators
//! dispatch three ways on the argument: a textual argument containing the
//! `*` wildcard becomes a case-insensitive pattern match, the NULL literal
//! becomes a null check, anything else a plain (in)equality. Ordering
//! operators always produce ordering predicates.
//!
//! Known limitation: only `*` is rewritten to the backend's `%` wildcard.
//! A literal `%` or `_` in the argument is passed through untouched and
//! keeps its wildcard meaning at the backend.

use crate::argument_parser::TypedArgument;
use crate::comparison::Comparison;
use crate::predicate::Predicate;

/// Wildcard character of the filter grammar, rewritten to SQL `%`.
pub const LIKE_WILDCARD: char = '*';

/// Build the predicate for one resolved clause.
pub fn translate(path: &str, operator: Comparison, argument: TypedArgument) -> Predicate {
    log::trace!("building predicate: {} {} {}", path, operator, argument);

    match operator {
        Comparison::Equal => {
            if let Some(pattern) = wildcard_pattern(&argument) {
                Predicate::ILike { path: path.to_string(), pattern }
            } else if argument.is_null_literal() {
                Predicate::IsNull { path: path.to_string() }
            } else {
                Predicate::Equal { path: path.to_string(), value: argument }
            }
        }
        Comparison::NotEqual => {
            if let Some(pattern) = wildcard_pattern(&argument) {
                Predicate::NotILike { path: path.to_string(), pattern }
            } else if argument.is_null_literal() {
                Predicate::IsNotNull { path: path.to_string() }
            } else {
                Predicate::NotEqual { path: path.to_string(), value: argument }
            }
        }
        Comparison::GreaterThan => {
            Predicate::GreaterThan { path: path.to_string(), value: argument }
        }
        Comparison::GreaterEqual => {
            Predicate::GreaterEqual { path: path.to_string(), value: argument }
        }
        Comparison::LessThan => {
            Predicate::LessThan { path: path.to_string(), value: argument }
        }
        Comparison::LessEqual => {
            Predicate::LessEqual { path: path.to_string(), value: argument }
        }
    }
}

/// SQL pattern for a wildcard-bearing textual argument, `None` otherwise.
fn wildcard_pattern(argument: &TypedArgument) -> Option<String> {
    match argument.as_text() {
        Some(text) if text.contains(LIKE_WILDCARD) => {
            Some(text.replace(LIKE_WILDCARD, "%"))
        }
        _ => None,
    }
}
