//! Builders for to-many association properties.
//!
//! A filter clause on a collection-of-associations property constrains the
//! associated entity, not the collection itself. Both builders here join
//! through the association and compare against a key of the element
//! entity: its surrogate identifier, or its natural identifier when the
//! element entity declares one.

use crate::comparison::Comparison;
use crate::predicate::Predicate;

use super::errors::PredicateBuilderError;
use super::operator_translator::translate;
use super::{PredicateBuilder, ResolutionContext};

/// Element entity and join alias of a resolved association traversal.
struct CollectionElement {
    entity: String,
    alias: String,
}

/// Resolve the element entity of a to-many association property and
/// register a join alias for the traversal path.
///
/// Shared by both collection builders; the alias path is the current
/// prefix plus the property name, so the same traversal resolves to the
/// same alias within one request.
fn resolve_collection_element(
    property: &str,
    entity: &str,
    alias_prefix: &str,
    ctx: &mut ResolutionContext,
) -> Result<CollectionElement, PredicateBuilderError> {
    let element = ctx
        .catalog()
        .collection_element_type(entity, property)
        .ok_or_else(|| PredicateBuilderError::UnknownSelector {
            selector: property.to_string(),
            entity: entity.to_string(),
        })?
        .to_string();

    if ctx.catalog().mapping(&element).is_none() {
        return Err(PredicateBuilderError::MissingMetadata {
            entity: element,
            selector: property.to_string(),
        });
    }

    let alias = ctx.aliases().alias_for(&format!("{alias_prefix}{property}"))?;
    Ok(CollectionElement { entity: element, alias })
}

/// Builds predicates over the element entity's surrogate identifier.
///
/// The argument is parsed against the identifier type of the associated
/// entity, never against the collection's own declared type, and the
/// predicate path is the join alias plus `.id`.
#[derive(Debug, Clone, Copy, Default)]
pub struct IdentifierCollectionBuilder;

impl PredicateBuilder for IdentifierCollectionBuilder {
    fn accepts(&self, property: &str, entity: &str, ctx: &ResolutionContext) -> bool {
        ctx.catalog().is_collection_of_associations(entity, property)
    }

    fn build(
        &self,
        property: &str,
        operator: Comparison,
        argument: &str,
        entity: &str,
        alias_prefix: &str,
        ctx: &mut ResolutionContext,
    ) -> Result<Predicate, PredicateBuilderError> {
        let element = resolve_collection_element(property, entity, alias_prefix, ctx)?;
        let id_type = ctx.catalog().identifier_type(&element.entity);

        log::debug!(
            "property '{}' is a collection of '{}' associations, parsing argument as identifier type {:?}",
            property,
            element.entity,
            id_type
        );

        let typed = ctx
            .parser()
            .parse(argument, id_type)
            .map_err(|e| PredicateBuilderError::argument_format(property, e))?;

        Ok(translate(&format!("{}.id", element.alias), operator, typed))
    }
}

/// Builds predicates over the element entity's natural identifier.
///
/// Accepts only associations whose element entity declares at least one
/// natural-identifier property; ordered before
/// [`IdentifierCollectionBuilder`] in the chain so the business key wins
/// over the surrogate identifier where both apply. When several
/// natural-identifier properties are declared, only the first one in
/// declared order is used and a warning is logged.
#[derive(Debug, Clone, Copy, Default)]
pub struct NaturalIdCollectionBuilder;

impl PredicateBuilder for NaturalIdCollectionBuilder {
    fn accepts(&self, property: &str, entity: &str, ctx: &ResolutionContext) -> bool {
        if !ctx.catalog().is_collection_of_associations(entity, property) {
            return false;
        }
        match ctx.catalog().collection_element_type(entity, property) {
            Some(element) => !ctx.catalog().natural_identifier_properties(element).is_empty(),
            None => false,
        }
    }

    fn build(
        &self,
        property: &str,
        operator: Comparison,
        argument: &str,
        entity: &str,
        alias_prefix: &str,
        ctx: &mut ResolutionContext,
    ) -> Result<Predicate, PredicateBuilderError> {
        let element = resolve_collection_element(property, entity, alias_prefix, ctx)?;

        let natural_ids = ctx.catalog().natural_identifier_properties(&element.entity);
        let Some(&(natural_name, natural_type)) = natural_ids.first() else {
            return Err(PredicateBuilderError::UnknownSelector {
                selector: property.to_string(),
                entity: entity.to_string(),
            });
        };
        if natural_ids.len() > 1 {
            log::warn!(
                "entity '{}' declares {} natural identifier properties, only '{}' will be used",
                element.entity,
                natural_ids.len(),
                natural_name
            );
        }
        log::debug!(
            "entity '{}' has natural identifier '{}' of type {}",
            element.entity,
            natural_name,
            natural_type
        );
        let natural_name = natural_name.to_string();

        let typed = ctx
            .parser()
            .parse(argument, Some(natural_type))
            .map_err(|e| PredicateBuilderError::argument_format(property, e))?;

        Ok(translate(&format!("{}.{}", element.alias, natural_name), operator, typed))
    }
}
