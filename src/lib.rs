//! Filterion - filter clauses to query predicates over a mapped entity model
//!
//! This crate is the predicate-construction layer of a filter-to-query
//! translation stack. It takes one parsed filter clause (a property
//! selector, a comparison operator, a raw textual argument) and produces
//! one backend-native leaf predicate through:
//! - An entity catalog describing mapped entities, their properties,
//!   associations and identifiers
//! - An ordered builder chain deciding which handler resolves a selector
//! - Join-alias management with a hard limit on association traversals
//! - Typed argument parsing against the target property's native type
//!
//! Parsing filter syntax and executing the assembled predicates are the
//! concern of the surrounding stack, not of this crate.

pub mod argument_parser;
pub mod comparison;
pub mod entity_catalog;
pub mod predicate;
pub mod predicate_builder;

pub use argument_parser::{ArgumentParser, DefaultArgumentParser, TypedArgument};
pub use comparison::Comparison;
pub use entity_catalog::{EntityCatalog, EntityMapping};
pub use predicate::Predicate;
pub use predicate_builder::errors::PredicateBuilderError;
pub use predicate_builder::{PredicateBuilder, PredicateBuilderChain, ResolutionContext};
