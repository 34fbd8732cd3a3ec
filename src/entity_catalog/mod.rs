//! Mapped entity model and metadata queries.
//!
//! The catalog is the metadata facade the predicate builders resolve
//! selectors against. It answers, for an entity name: which properties
//! exist, what their native types are, which properties are to-many
//! associations and what entity they point at, what the identifier type
//! is, and which properties form the natural identifier.
//!
//! Catalogs are shared, read-only values. They are built once, either
//! programmatically or from a configuration file, and then consulted by
//! any number of concurrent resolution requests.

use std::collections::HashMap;

pub mod config;
pub mod errors;
pub mod property_type;

use config::CatalogConfig;
use errors::EntityCatalogError;
use property_type::{PropertyType, StructDescriptor};

/// Metadata of one mapped entity.
#[derive(Debug, Clone)]
pub struct EntityMapping {
    name: String,
    identifier_property: String,
    identifier_type: PropertyType,
    /// Scalar properties in declared order.
    properties: Vec<(String, PropertyType)>,
    /// To-many association properties and their element entity names.
    associations: Vec<(String, String)>,
    /// Natural-identifier property names, in declared order.
    natural_ids: Vec<String>,
}

impl EntityMapping {
    pub fn new(
        name: impl Into<String>,
        identifier_property: impl Into<String>,
        identifier_type: PropertyType,
    ) -> Self {
        EntityMapping {
            name: name.into(),
            identifier_property: identifier_property.into(),
            identifier_type,
            properties: Vec::new(),
            associations: Vec::new(),
            natural_ids: Vec::new(),
        }
    }

    pub fn with_property(mut self, name: impl Into<String>, ty: PropertyType) -> Self {
        self.properties.push((name.into(), ty));
        self
    }

    pub fn with_association(
        mut self,
        name: impl Into<String>,
        target: impl Into<String>,
    ) -> Self {
        self.associations.push((name.into(), target.into()));
        self
    }

    /// Mark an already declared scalar property as part of the natural
    /// identifier. Call order defines the declared order.
    pub fn with_natural_id(mut self, property: impl Into<String>) -> Self {
        self.natural_ids.push(property.into());
        self
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    /// Declared property names, scalars first, then associations.
    pub fn property_names(&self) -> Vec<&str> {
        self.properties
            .iter()
            .map(|(name, _)| name.as_str())
            .chain(self.associations.iter().map(|(name, _)| name.as_str()))
            .collect()
    }

    pub fn has_property(&self, name: &str) -> bool {
        self.properties.iter().any(|(p, _)| p == name)
            || self.associations.iter().any(|(p, _)| p == name)
    }

    /// Native type of a scalar property. `None` for association properties
    /// and for names the entity does not declare.
    pub fn property_type(&self, name: &str) -> Option<PropertyType> {
        self.properties
            .iter()
            .find(|(p, _)| p == name)
            .map(|(_, ty)| *ty)
    }

    pub fn is_collection_of_associations(&self, name: &str) -> bool {
        self.associations.iter().any(|(p, _)| p == name)
    }

    /// Element entity name of a to-many association property.
    pub fn association_target(&self, name: &str) -> Option<&str> {
        self.associations
            .iter()
            .find(|(p, _)| p == name)
            .map(|(_, target)| target.as_str())
    }

    pub fn identifier_property(&self) -> &str {
        &self.identifier_property
    }

    pub fn identifier_type(&self) -> PropertyType {
        self.identifier_type
    }

    pub fn has_natural_identifier(&self) -> bool {
        !self.natural_ids.is_empty()
    }

    /// Natural-identifier properties as (name, type) pairs, in declared
    /// order. Entries whose name does not resolve to a scalar property are
    /// skipped; catalog construction validates against that.
    pub fn natural_identifier_properties(&self) -> Vec<(&str, PropertyType)> {
        self.natural_ids
            .iter()
            .filter_map(|id| {
                self.property_type(id).map(|ty| (id.as_str(), ty))
            })
            .collect()
    }
}

/// The entity metadata catalog.
///
/// Holds entity mappings keyed by entity name, plus plain struct
/// descriptors for types that carry no mapping. All query methods take the
/// entity name as a string so that callers never need a handle to mapping
/// internals.
#[derive(Debug, Clone, Default)]
pub struct EntityCatalog {
    entities: HashMap<String, EntityMapping>,
    structs: HashMap<String, StructDescriptor>,
}

impl EntityCatalog {
    pub fn new() -> Self {
        Self::default()
    }

    /// Build a catalog from a parsed configuration.
    pub fn from_config(config: CatalogConfig) -> Result<Self, EntityCatalogError> {
        config.validate()?;

        let mut catalog = EntityCatalog::new();
        for (name, entity) in &config.entities {
            let mut mapping = EntityMapping::new(
                name.clone(),
                entity.identifier.property.clone(),
                entity.identifier.ty,
            );
            for (prop, ty) in &entity.properties {
                mapping = mapping.with_property(prop.clone(), *ty);
            }
            for (prop, association) in &entity.associations {
                mapping = mapping.with_association(prop.clone(), association.target.clone());
            }
            for natural_id in &entity.natural_ids {
                mapping = mapping.with_natural_id(natural_id.clone());
            }
            catalog.register_entity(mapping);
        }
        for (type_name, properties) in &config.types {
            let descriptor = properties
                .iter()
                .map(|(prop, ty)| (prop.clone(), *ty))
                .collect();
            catalog.register_struct(type_name.clone(), descriptor);
        }
        Ok(catalog)
    }

    /// Load a catalog straight from a YAML configuration file.
    pub fn from_yaml_file(
        path: impl AsRef<std::path::Path>,
    ) -> Result<Self, EntityCatalogError> {
        Self::from_config(CatalogConfig::from_yaml_file(path)?)
    }

    pub fn register_entity(&mut self, mapping: EntityMapping) {
        self.entities.insert(mapping.name.clone(), mapping);
    }

    pub fn register_struct(&mut self, name: impl Into<String>, descriptor: StructDescriptor) {
        self.structs.insert(name.into(), descriptor);
    }

    /// Mapping of an entity, if one is registered under that name.
    pub fn mapping(&self, entity: &str) -> Option<&EntityMapping> {
        self.entities.get(entity)
    }

    pub fn has_property(&self, entity: &str, name: &str) -> bool {
        self.mapping(entity).is_some_and(|m| m.has_property(name))
    }

    pub fn property_type(&self, entity: &str, name: &str) -> Option<PropertyType> {
        self.mapping(entity).and_then(|m| m.property_type(name))
    }

    pub fn is_collection_of_associations(&self, entity: &str, name: &str) -> bool {
        self.mapping(entity)
            .is_some_and(|m| m.is_collection_of_associations(name))
    }

    /// Element entity name of a to-many association property.
    pub fn collection_element_type(&self, entity: &str, name: &str) -> Option<&str> {
        self.mapping(entity).and_then(|m| m.association_target(name))
    }

    pub fn identifier_type(&self, entity: &str) -> Option<PropertyType> {
        self.mapping(entity).map(|m| m.identifier_type())
    }

    pub fn natural_identifier_properties(&self, entity: &str) -> Vec<(&str, PropertyType)> {
        self.mapping(entity)
            .map(|m| m.natural_identifier_properties())
            .unwrap_or_default()
    }

    /// Structural fallback for types without an entity mapping: property
    /// type from a registered struct descriptor, `None` when either the
    /// descriptor or the property is absent.
    pub fn struct_property_type(&self, type_name: &str, property: &str) -> Option<PropertyType> {
        self.structs
            .get(type_name)
            .and_then(|d| d.property_type(property))
    }
}
