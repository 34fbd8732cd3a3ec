//! The predicate builder chain.
//!
//! Resolution of one filter clause runs through an ordered set of
//! builders. Each builder declares via [`PredicateBuilder::accepts`]
//! whether it is responsible for a property, and the first acceptor
//! builds the predicate. The order is a contract: most specific first
//! (natural-identifier association, then identifier association), with the
//! plain-property catch-all always last. The chain owns that catch-all
//! separately, so no builder arrangement can drop it or move it forward.
//!
//! Builders are stateless and shared; everything request-scoped (the join
//! alias registry, the catalog and parser handles) travels in a
//! [`ResolutionContext`] created fresh per top-level resolution request.

use crate::argument_parser::ArgumentParser;
use crate::comparison::Comparison;
use crate::entity_catalog::EntityCatalog;
use crate::predicate::Predicate;

pub mod alias_registry;
pub mod collection_builders;
pub mod default_builder;
pub mod errors;
pub mod operator_translator;

use alias_registry::AliasRegistry;
use collection_builders::{IdentifierCollectionBuilder, NaturalIdCollectionBuilder};
use default_builder::DefaultPredicateBuilder;
use errors::PredicateBuilderError;

/// Per-request resolution state.
///
/// Holds shared read-only collaborators (entity catalog, argument parser)
/// and the request's own mutable alias registry. One context per
/// top-level resolution request; never share across concurrent requests.
pub struct ResolutionContext<'a> {
    catalog: &'a EntityCatalog,
    parser: &'a dyn ArgumentParser,
    aliases: AliasRegistry,
}

impl<'a> ResolutionContext<'a> {
    pub fn new(
        catalog: &'a EntityCatalog,
        parser: &'a dyn ArgumentParser,
        max_joins: usize,
    ) -> Self {
        ResolutionContext { catalog, parser, aliases: AliasRegistry::new(max_joins) }
    }

    pub fn catalog(&self) -> &EntityCatalog {
        self.catalog
    }

    pub fn parser(&self) -> &dyn ArgumentParser {
        self.parser
    }

    pub fn aliases(&mut self) -> &mut AliasRegistry {
        &mut self.aliases
    }

    /// Number of join aliases created so far in this request.
    pub fn alias_count(&self) -> usize {
        self.aliases.alias_count()
    }
}

/// One handler in the chain.
///
/// Implementations must be stateless: every call gets the full clause and
/// the request context, and nothing may be cached between requests.
pub trait PredicateBuilder: Send + Sync {
    /// Whether this builder is responsible for the given property.
    fn accepts(&self, property: &str, entity: &str, ctx: &ResolutionContext) -> bool;

    /// Build the predicate for an accepted clause.
    ///
    /// `alias_prefix` is the association alias accumulated by the caller,
    /// either empty or ending in a dot; it prefixes the property both in
    /// predicate paths and in alias-registry paths.
    fn build(
        &self,
        property: &str,
        operator: Comparison,
        argument: &str,
        entity: &str,
        alias_prefix: &str,
        ctx: &mut ResolutionContext,
    ) -> Result<Predicate, PredicateBuilderError>;
}

/// Ordered builder chain with a guaranteed plain-property fallback.
///
/// The chain and its builders are immutable after construction and safe to
/// share across threads; concurrency is bounded only by each request
/// bringing its own [`ResolutionContext`].
///
/// # Example
///
/// ```
/// use filterion::argument_parser::DefaultArgumentParser;
/// use filterion::entity_catalog::{EntityCatalog, EntityMapping};
/// use filterion::entity_catalog::property_type::PropertyType;
/// use filterion::predicate_builder::PredicateBuilderChain;
/// use filterion::Comparison;
///
/// let mut catalog = EntityCatalog::new();
/// catalog.register_entity(
///     EntityMapping::new("Person", "id", PropertyType::Integer)
///         .with_property("fullName", PropertyType::Text),
/// );
///
/// let chain = PredicateBuilderChain::new();
/// let parser = DefaultArgumentParser::new();
/// let mut ctx = chain.context(&catalog, &parser);
/// let predicate = chain
///     .resolve("Person", "fullName", Comparison::Equal, "Ada*", "", &mut ctx)
///     .unwrap();
/// assert_eq!(predicate.to_sql(), "(fullName ILIKE 'Ada%')");
/// ```
pub struct PredicateBuilderChain {
    builders: Vec<Box<dyn PredicateBuilder>>,
    fallback: DefaultPredicateBuilder,
    max_joins: usize,
}

impl PredicateBuilderChain {
    pub const DEFAULT_MAX_JOINS: usize = 10;

    /// Chain with the built-in builder order: natural-identifier
    /// association, identifier association, then the plain-property
    /// fallback.
    pub fn new() -> Self {
        Self::with_builders(vec![
            Box::new(NaturalIdCollectionBuilder),
            Box::new(IdentifierCollectionBuilder),
        ])
    }

    /// Chain over caller-supplied builders, evaluated in the given order.
    /// The plain-property fallback is always appended behind them.
    pub fn with_builders(builders: Vec<Box<dyn PredicateBuilder>>) -> Self {
        PredicateBuilderChain {
            builders,
            fallback: DefaultPredicateBuilder,
            max_joins: Self::DEFAULT_MAX_JOINS,
        }
    }

    pub fn with_max_joins(mut self, max_joins: usize) -> Self {
        self.max_joins = max_joins;
        self
    }

    pub fn max_joins(&self) -> usize {
        self.max_joins
    }

    /// Fresh per-request context carrying this chain's join limit.
    pub fn context<'a>(
        &self,
        catalog: &'a EntityCatalog,
        parser: &'a dyn ArgumentParser,
    ) -> ResolutionContext<'a> {
        ResolutionContext::new(catalog, parser, self.max_joins)
    }

    /// Resolve one filter clause into a predicate.
    ///
    /// Walks the builders in order and hands the clause to the first one
    /// that accepts the property; the fallback takes everything the
    /// specific builders declined.
    pub fn resolve(
        &self,
        entity: &str,
        property: &str,
        operator: Comparison,
        argument: &str,
        alias_prefix: &str,
        ctx: &mut ResolutionContext,
    ) -> Result<Predicate, PredicateBuilderError> {
        for builder in &self.builders {
            if builder.accepts(property, entity, ctx) {
                return builder.build(property, operator, argument, entity, alias_prefix, ctx);
            }
        }
        self.fallback
            .build(property, operator, argument, entity, alias_prefix, ctx)
    }
}

impl Default for PredicateBuilderChain {
    fn default() -> Self {
        Self::new()
    }
}
