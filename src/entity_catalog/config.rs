//! Entity catalog configuration management.
//!
//! This module handles loading and validation of entity mapping definitions
//! from YAML or JSON configuration files. It supports:
//!
//! - Loading from YAML files or inline YAML/JSON strings
//! - Structural validation of the definitions (association targets,
//!   natural-identifier references)
//! - Plain type descriptors for non-mapped types used by the structural
//!   fallback lookup
//!
//! Catalogs are defined in YAML with the following structure:
//!
//! ```yaml
//! name: crm_catalog          # Configuration name
//! version: "1.0"             # Definition version
//! entities:                  # Entity mappings
//!   Department:
//!     identifier:            # Surrogate identifier
//!       property: id
//!       type: integer
//!     properties:            # Scalar properties
//!       name: text
//!       code: text
//!       budget: float
//!     associations:          # To-many association properties
//!       employees:
//!         target: Person
//!     natural_ids: [code]    # Business keys, in declared order
//! types:                     # Plain descriptors for non-mapped types
//!   AuditStamp:
//!     createdAt: datetime
//! ```

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fs;
use std::path::Path;

use super::errors::EntityCatalogError;
use super::property_type::PropertyType;

/// Top-level catalog definition as read from a configuration file.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct CatalogConfig {
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub version: Option<String>,
    #[serde(default)]
    pub entities: BTreeMap<String, EntityConfig>,
    /// Property shapes of plain, non-mapped types. Consulted only by the
    /// structural fallback when an entity has no mapping at all.
    #[serde(default)]
    pub types: BTreeMap<String, BTreeMap<String, PropertyType>>,
}

/// Mapping definition of a single entity.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EntityConfig {
    pub identifier: IdentifierConfig,
    #[serde(default)]
    pub properties: BTreeMap<String, PropertyType>,
    #[serde(default)]
    pub associations: BTreeMap<String, AssociationConfig>,
    /// Natural-identifier property names. The list order is the declared
    /// order consumers observe.
    #[serde(default)]
    pub natural_ids: Vec<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct IdentifierConfig {
    pub property: String,
    #[serde(rename = "type")]
    pub ty: PropertyType,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AssociationConfig {
    /// Entity name of the collection element.
    pub target: String,
}

impl CatalogConfig {
    /// Load a catalog definition from a YAML file.
    pub fn from_yaml_file(path: impl AsRef<Path>) -> Result<Self, EntityCatalogError> {
        let content = fs::read_to_string(path.as_ref()).map_err(|e| {
            EntityCatalogError::ConfigReadError { error: e.to_string() }
        })?;
        Self::from_yaml_str(&content)
    }

    /// Parse a catalog definition from an inline YAML string.
    pub fn from_yaml_str(content: &str) -> Result<Self, EntityCatalogError> {
        let config: CatalogConfig = serde_yaml::from_str(content).map_err(|e| {
            EntityCatalogError::ConfigParseError { error: e.to_string() }
        })?;
        config.validate()?;
        Ok(config)
    }

    /// Parse a catalog definition from an inline JSON string.
    pub fn from_json_str(content: &str) -> Result<Self, EntityCatalogError> {
        let config: CatalogConfig = serde_json::from_str(content).map_err(|e| {
            EntityCatalogError::ConfigParseError { error: e.to_string() }
        })?;
        config.validate()?;
        Ok(config)
    }

    /// Structural validation of the definition.
    ///
    /// Checks that every association targets a defined entity, that no
    /// association name collides with a scalar property, and that every
    /// natural-identifier entry names a declared scalar property.
    pub fn validate(&self) -> Result<(), EntityCatalogError> {
        for (entity_name, entity) in &self.entities {
            for (prop_name, association) in &entity.associations {
                if entity.properties.contains_key(prop_name) {
                    return Err(EntityCatalogError::AmbiguousProperty {
                        entity: entity_name.clone(),
                        property: prop_name.clone(),
                    });
                }
                if !self.entities.contains_key(&association.target) {
                    return Err(EntityCatalogError::UnknownAssociationTarget {
                        entity: entity_name.clone(),
                        property: prop_name.clone(),
                        target: association.target.clone(),
                    });
                }
            }
            for natural_id in &entity.natural_ids {
                if !entity.properties.contains_key(natural_id) {
                    return Err(EntityCatalogError::UnknownNaturalId {
                        entity: entity_name.clone(),
                        property: natural_id.clone(),
                    });
                }
            }
        }
        Ok(())
    }
}
