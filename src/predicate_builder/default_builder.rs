//! Catch-all builder for plain properties.

use crate::comparison::Comparison;
use crate::predicate::Predicate;

use super::errors::PredicateBuilderError;
use super::operator_translator::translate;
use super::{PredicateBuilder, ResolutionContext};

/// Handles every property the more specific builders left unclaimed.
///
/// For mapped entities the property must exist, otherwise the clause fails
/// with an unknown-selector error. Types without an entity mapping fall
/// back to the catalog's struct descriptors; an unresolved type is passed
/// on to the argument parser, which rejects it. Plain properties never
/// create a join alias, the path is simply the prefix plus the property
/// name.
#[derive(Debug, Clone, Copy, Default)]
pub struct DefaultPredicateBuilder;

impl PredicateBuilder for DefaultPredicateBuilder {
    fn accepts(&self, _property: &str, _entity: &str, _ctx: &ResolutionContext) -> bool {
        true
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
        let target = match ctx.catalog().mapping(entity) {
            Some(mapping) => {
                if !mapping.has_property(property) {
                    return Err(PredicateBuilderError::UnknownSelector {
                        selector: property.to_string(),
                        entity: entity.to_string(),
                    });
                }
                mapping.property_type(property)
            }
            None => {
                log::debug!(
                    "no entity mapping for '{}', using structural lookup for '{}'",
                    entity,
                    property
                );
                ctx.catalog().struct_property_type(entity, property)
            }
        };

        let typed = ctx
            .parser()
            .parse(argument, target)
            .map_err(|e| PredicateBuilderError::argument_format(property, e))?;

        Ok(translate(&format!("{alias_prefix}{property}"), operator, typed))
    }
}
