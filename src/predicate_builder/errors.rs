use thiserror::Error;

use crate::argument_parser::ArgumentFormatError;

/// Errors raised while resolving one filter clause into a predicate.
///
/// `UnknownSelector` and `ArgumentFormat` are terminal for the single
/// clause that produced them. `AssociationsLimitExceeded` is a circuit
/// breaker against pathological filter expressions and aborts the whole
/// translation request; `is_fatal` tells the two classes apart.
#[derive(Debug, Clone, Error, PartialEq)]
pub enum PredicateBuilderError {
    #[error("unknown selector '{selector}' for entity '{entity}'")]
    UnknownSelector { selector: String, entity: String },

    #[error("argument '{}' of selector '{selector}' must be of type {}", .source.argument, .source.expected_name())]
    ArgumentFormat {
        selector: String,
        #[source]
        source: ArgumentFormatError,
    },

    #[error("association joins limit ({limit}) exceeded")]
    AssociationsLimitExceeded { limit: usize },

    #[error("no entity mapping found for '{entity}' while resolving selector '{selector}'")]
    MissingMetadata { entity: String, selector: String },
}

impl PredicateBuilderError {
    /// Wrap a parse failure with the selector it belongs to.
    pub fn argument_format(selector: impl Into<String>, source: ArgumentFormatError) -> Self {
        PredicateBuilderError::ArgumentFormat { selector: selector.into(), source }
    }

    /// Whether this error aborts the whole translation request rather than
    /// just the clause that produced it.
    pub fn is_fatal(&self) -> bool {
        matches!(self, PredicateBuilderError::AssociationsLimitExceeded { .. })
    }
}
