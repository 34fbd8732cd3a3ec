use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::fmt;

/// Native value type of a mapped entity property.
///
/// Every scalar property in the catalog declares one of these types. The
/// argument parser uses it as the cast target when converting the raw
/// textual argument of a filter clause.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PropertyType {
    Text,
    Integer,
    Float,
    Boolean,
    Date,
    DateTime,
    Uuid,
}

impl PropertyType {
    /// Lowercase name as it appears in catalog configuration files.
    pub fn name(&self) -> &'static str {
        match self {
            PropertyType::Text => "text",
            PropertyType::Integer => "integer",
            PropertyType::Float => "float",
            PropertyType::Boolean => "boolean",
            PropertyType::Date => "date",
            PropertyType::DateTime => "datetime",
            PropertyType::Uuid => "uuid",
        }
    }
}

impl fmt::Display for PropertyType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Property shape of a plain (non-mapped) type.
///
/// Types that carry no entity mapping can still appear in filter clauses,
/// e.g. when an association points at a value object that the persistence
/// layer never registered. For those the catalog falls back to a structural
/// lookup over one of these descriptors instead of entity metadata. An
/// absent property resolves to `None` rather than an error; rejecting the
/// clause is left to the argument parser, which refuses to cast against an
/// unresolved type.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct StructDescriptor {
    properties: HashMap<String, PropertyType>,
}

impl StructDescriptor {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_property(mut self, name: impl Into<String>, ty: PropertyType) -> Self {
        self.properties.insert(name.into(), ty);
        self
    }

    pub fn property_type(&self, name: &str) -> Option<PropertyType> {
        self.properties.get(name).copied()
    }
}

impl FromIterator<(String, PropertyType)> for StructDescriptor {
    fn from_iter<T: IntoIterator<Item = (String, PropertyType)>>(iter: T) -> Self {
        StructDescriptor { properties: iter.into_iter().collect() }
    }
}
