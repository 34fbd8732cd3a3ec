use thiserror::Error;

/// Errors raised while loading or validating an entity catalog.
#[derive(Debug, Clone, Error, PartialEq)]
pub enum EntityCatalogError {
    #[error("failed to read catalog file: {error}")]
    ConfigReadError { error: String },
    #[error("failed to parse catalog definition: {error}")]
    ConfigParseError { error: String },
    #[error("association '{property}' of entity '{entity}' targets unknown entity '{target}'")]
    UnknownAssociationTarget {
        entity: String,
        property: String,
        target: String,
    },
    #[error("natural identifier '{property}' of entity '{entity}' is not a declared property")]
    UnknownNaturalId { entity: String, property: String },
    #[error(
        "association '{property}' of entity '{entity}' collides with a declared scalar property"
    )]
    AmbiguousProperty { entity: String, property: String },
}
