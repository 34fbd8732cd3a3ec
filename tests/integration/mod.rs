//! End-to-end tests for the predicate builder chain.
//!
//! Every test drives the public `resolve` entry point against an in-code
//! entity catalog, the same way the surrounding AST walker consumes the
//! chain: one clause in, one leaf predicate (or error) out.

use filterion::argument_parser::DefaultArgumentParser;
use filterion::entity_catalog::property_type::{PropertyType, StructDescriptor};
use filterion::entity_catalog::{EntityCatalog, EntityMapping};
use filterion::predicate::Predicate;
use filterion::{Comparison, PredicateBuilderChain, PredicateBuilderError, TypedArgument};

use test_case::test_case;

fn init_logging() {
    let _ = env_logger::builder().is_test(true).try_init();
}

/// Catalog used across the tests:
/// Department --employees--> Person --memberships--> Group (natural id)
fn catalog() -> EntityCatalog {
    init_logging();
    let mut catalog = EntityCatalog::new();
    catalog.register_entity(
        EntityMapping::new("Department", "id", PropertyType::Integer)
            .with_property("name", PropertyType::Text)
            .with_property("code", PropertyType::Text)
            .with_property("budget", PropertyType::Float)
            .with_property("active", PropertyType::Boolean)
            .with_property("founded", PropertyType::Date)
            .with_association("employees", "Person")
            .with_natural_id("code"),
    );
    catalog.register_entity(
        EntityMapping::new("Person", "id", PropertyType::Integer)
            .with_property("fullName", PropertyType::Text)
            .with_association("memberships", "Group"),
    );
    catalog.register_entity(
        EntityMapping::new("Group", "id", PropertyType::Uuid)
            .with_property("slug", PropertyType::Text)
            .with_property("title", PropertyType::Text)
            .with_natural_id("slug"),
    );
    catalog.register_struct(
        "AuditStamp",
        StructDescriptor::new().with_property("revision", PropertyType::Integer),
    );
    catalog
}

fn resolve(
    entity: &str,
    property: &str,
    operator: Comparison,
    argument: &str,
) -> Result<Predicate, PredicateBuilderError> {
    let catalog = catalog();
    let parser = DefaultArgumentParser::new();
    let chain = PredicateBuilderChain::new();
    let mut ctx = chain.context(&catalog, &parser);
    chain.resolve(entity, property, operator, argument, "", &mut ctx)
}

mod plain_properties {
    use super::*;

    #[test_case("name", Comparison::Equal, "Physics", TypedArgument::Text("Physics".into()))]
    #[test_case("budget", Comparison::Equal, "1500.5", TypedArgument::Float(1500.5))]
    #[test_case("active", Comparison::Equal, "true", TypedArgument::Boolean(true))]
    fn equal_parses_argument_to_native_type(
        property: &str,
        operator: Comparison,
        argument: &str,
        expected: TypedArgument,
    ) {
        let predicate = resolve("Department", property, operator, argument).unwrap();
        assert_eq!(
            predicate,
            Predicate::Equal { path: property.to_string(), value: expected }
        );
    }

    #[test]
    fn not_equal_produces_the_negated_shape() {
        let predicate =
            resolve("Department", "name", Comparison::NotEqual, "Physics").unwrap();
        assert_eq!(
            predicate,
            Predicate::NotEqual {
                path: "name".into(),
                value: TypedArgument::Text("Physics".into())
            }
        );
    }

    #[test_case(Comparison::GreaterThan, "(budget > 1000)")]
    #[test_case(Comparison::GreaterEqual, "(budget >= 1000)")]
    #[test_case(Comparison::LessThan, "(budget < 1000)")]
    #[test_case(Comparison::LessEqual, "(budget <= 1000)")]
    fn ordering_operators_build_range_predicates(operator: Comparison, sql: &str) {
        let predicate = resolve("Department", "budget", operator, "1000").unwrap();
        assert_eq!(predicate.to_sql(), sql);
    }

    #[test]
    fn date_arguments_follow_the_property_type() {
        let predicate =
            resolve("Department", "founded", Comparison::GreaterEqual, "1950-01-01").unwrap();
        assert_eq!(predicate.to_sql(), "(founded >= '1950-01-01')");
    }

    #[test]
    fn alias_prefix_qualifies_the_path() {
        let catalog = catalog();
        let parser = DefaultArgumentParser::new();
        let chain = PredicateBuilderChain::new();
        let mut ctx = chain.context(&catalog, &parser);

        let predicate = chain
            .resolve("Person", "fullName", Comparison::Equal, "Ada", "a1.", &mut ctx)
            .unwrap();
        assert_eq!(predicate.path(), "a1.fullName");
    }
}

mod wildcard_and_null {
    use super::*;

    #[test]
    fn wildcard_argument_becomes_case_insensitive_pattern() {
        let predicate = resolve("Department", "name", Comparison::Equal, "Phys*").unwrap();
        assert_eq!(
            predicate,
            Predicate::ILike { path: "name".into(), pattern: "Phys%".into() }
        );

        let negated = resolve("Department", "name", Comparison::NotEqual, "*ics").unwrap();
        assert_eq!(
            negated,
            Predicate::NotILike { path: "name".into(), pattern: "%ics".into() }
        );
    }

    #[test_case("name")]
    #[test_case("budget")]
    #[test_case("founded")]
    fn null_literal_builds_null_checks_for_any_property_type(property: &str) {
        let is_null = resolve("Department", property, Comparison::Equal, "NULL").unwrap();
        assert_eq!(is_null, Predicate::IsNull { path: property.to_string() });

        let not_null = resolve("Department", property, Comparison::NotEqual, "NULL").unwrap();
        assert_eq!(not_null, Predicate::IsNotNull { path: property.to_string() });
    }
}

mod association_properties {
    use super::*;

    #[test]
    fn collection_clause_joins_and_compares_the_identifier() -> anyhow::Result<()> {
        let catalog = catalog();
        let parser = DefaultArgumentParser::new();
        let chain = PredicateBuilderChain::new();
        let mut ctx = chain.context(&catalog, &parser);

        let predicate =
            chain.resolve("Department", "employees", Comparison::Equal, "42", "", &mut ctx)?;

        // The argument is parsed against Person's identifier type, not the
        // collection's declared container type.
        assert_eq!(
            predicate,
            Predicate::Equal { path: "a1.id".into(), value: TypedArgument::Integer(42) }
        );
        assert_eq!(ctx.alias_count(), 1);
        Ok(())
    }

    #[test]
    fn natural_identifier_wins_over_surrogate_identifier() {
        let catalog = catalog();
        let parser = DefaultArgumentParser::new();
        let chain = PredicateBuilderChain::new();
        let mut ctx = chain.context(&catalog, &parser);

        let predicate = chain
            .resolve("Person", "memberships", Comparison::Equal, "admins", "", &mut ctx)
            .unwrap();

        assert_eq!(
            predicate,
            Predicate::Equal {
                path: "a1.slug".into(),
                value: TypedArgument::Text("admins".into())
            }
        );
    }

    #[test]
    fn element_without_natural_id_falls_to_the_identifier_builder() {
        // Person declares no natural identifier, so a clause on
        // Department.employees must parse as Person's id type.
        let err = resolve("Department", "employees", Comparison::Equal, "not-a-number")
            .unwrap_err();
        assert_eq!(
            err,
            PredicateBuilderError::ArgumentFormat {
                selector: "employees".into(),
                source: filterion::argument_parser::ArgumentFormatError {
                    argument: "not-a-number".into(),
                    expected: Some(PropertyType::Integer),
                },
            }
        );
    }

    #[test]
    fn same_association_path_reuses_one_alias_per_request() {
        let catalog = catalog();
        let parser = DefaultArgumentParser::new();
        let chain = PredicateBuilderChain::new();
        let mut ctx = chain.context(&catalog, &parser);

        let first = chain
            .resolve("Department", "employees", Comparison::Equal, "1", "", &mut ctx)
            .unwrap();
        let second = chain
            .resolve("Department", "employees", Comparison::NotEqual, "2", "", &mut ctx)
            .unwrap();

        assert_eq!(first.path(), "a1.id");
        assert_eq!(second.path(), "a1.id");
        assert_eq!(ctx.alias_count(), 1);
    }

    #[test]
    fn unmapped_association_target_is_reported() {
        let mut catalog = EntityCatalog::new();
        catalog.register_entity(
            EntityMapping::new("Department", "id", PropertyType::Integer)
                .with_association("employees", "Ghost"),
        );
        let parser = DefaultArgumentParser::new();
        let chain = PredicateBuilderChain::new();
        let mut ctx = chain.context(&catalog, &parser);

        let err = chain
            .resolve("Department", "employees", Comparison::Equal, "1", "", &mut ctx)
            .unwrap_err();
        assert_eq!(
            err,
            PredicateBuilderError::MissingMetadata {
                entity: "Ghost".into(),
                selector: "employees".into(),
            }
        );
    }
}

mod join_limit {
    use super::*;

    #[test]
    fn exceeding_the_limit_aborts_before_any_predicate() {
        let catalog = catalog();
        let parser = DefaultArgumentParser::new();
        let chain = PredicateBuilderChain::new().with_max_joins(1);
        let mut ctx = chain.context(&catalog, &parser);

        chain
            .resolve("Department", "employees", Comparison::Equal, "1", "", &mut ctx)
            .unwrap();

        // A second distinct traversal needs a second join.
        let err = chain
            .resolve("Person", "memberships", Comparison::Equal, "admins", "a1.", &mut ctx)
            .unwrap_err();
        assert_eq!(err, PredicateBuilderError::AssociationsLimitExceeded { limit: 1 });
        assert!(err.is_fatal());
        assert_eq!(ctx.alias_count(), 1);
    }

    #[test]
    fn per_clause_errors_are_not_fatal() {
        let err = resolve("Department", "missing", Comparison::Equal, "x").unwrap_err();
        assert!(!err.is_fatal());
    }
}

mod selector_resolution {
    use super::*;

    #[test]
    fn unknown_property_on_mapped_entity_is_rejected() {
        let err = resolve("Department", "missing", Comparison::Equal, "x").unwrap_err();
        assert_eq!(
            err,
            PredicateBuilderError::UnknownSelector {
                selector: "missing".into(),
                entity: "Department".into(),
            }
        );
    }

    #[test]
    fn structural_lookup_applies_only_to_unmapped_types() {
        // AuditStamp has no entity mapping; its struct descriptor resolves
        // the property type.
        let predicate = resolve("AuditStamp", "revision", Comparison::Equal, "5").unwrap();
        assert_eq!(
            predicate,
            Predicate::Equal { path: "revision".into(), value: TypedArgument::Integer(5) }
        );

        // An absent descriptor property leaves the type unresolved and the
        // argument parser rejects the clause.
        let err = resolve("AuditStamp", "missing", Comparison::Equal, "5").unwrap_err();
        assert_eq!(
            err,
            PredicateBuilderError::ArgumentFormat {
                selector: "missing".into(),
                source: filterion::argument_parser::ArgumentFormatError {
                    argument: "5".into(),
                    expected: None,
                },
            }
        );
    }

    #[test]
    fn malformed_argument_reports_selector_and_expected_type() {
        let err = resolve("Department", "budget", Comparison::Equal, "lots").unwrap_err();
        match &err {
            PredicateBuilderError::ArgumentFormat { selector, source } => {
                assert_eq!(selector, "budget");
                assert_eq!(source.argument, "lots");
                assert_eq!(source.expected, Some(PropertyType::Float));
            }
            other => panic!("expected ArgumentFormat, got {other:?}"),
        }
        assert_eq!(
            err.to_string(),
            "argument 'lots' of selector 'budget' must be of type float"
        );
    }
}

mod idempotence {
    use super::*;

    #[test]
    fn fresh_requests_yield_structurally_equal_predicates() {
        let cases = [
            ("Department", "name", Comparison::Equal, "Phys*"),
            ("Department", "employees", Comparison::Equal, "42"),
            ("Person", "memberships", Comparison::LessEqual, "admins"),
        ];
        for (entity, property, operator, argument) in cases {
            let first = resolve(entity, property, operator, argument).unwrap();
            let second = resolve(entity, property, operator, argument).unwrap();
            assert_eq!(first, second);
        }
    }
}

mod configured_catalogs {
    use super::*;
    use filterion::entity_catalog::config::CatalogConfig;

    #[test]
    fn yaml_defined_catalog_resolves_clauses() -> anyhow::Result<()> {
        init_logging();
        let config = CatalogConfig::from_yaml_str(
            r#"
entities:
  Project:
    identifier: { property: id, type: integer }
    properties:
      title: text
    associations:
      labels:
        target: Label
  Label:
    identifier: { property: id, type: integer }
    properties:
      slug: text
    natural_ids: [slug]
"#,
        )?;
        let catalog = EntityCatalog::from_config(config)?;
        let parser = DefaultArgumentParser::new();
        let chain = PredicateBuilderChain::new();

        let mut ctx = chain.context(&catalog, &parser);
        let predicate =
            chain.resolve("Project", "labels", Comparison::Equal, "backend", "", &mut ctx)?;
        assert_eq!(predicate.to_sql(), "(a1.slug = 'backend')");

        let mut ctx = chain.context(&catalog, &parser);
        let predicate =
            chain.resolve("Project", "title", Comparison::NotEqual, "*old*", "", &mut ctx)?;
        assert_eq!(predicate.to_sql(), "(title NOT ILIKE '%old%')");
        Ok(())
    }
}

mod degraded_paths {
    use super::*;

    #[test]
    fn multiple_natural_ids_use_the_first_declared() {
        init_logging();
        let mut catalog = EntityCatalog::new();
        catalog.register_entity(
            EntityMapping::new("Article", "id", PropertyType::Integer)
                .with_association("tags", "Tag"),
        );
        catalog.register_entity(
            EntityMapping::new("Tag", "id", PropertyType::Integer)
                .with_property("namespace", PropertyType::Text)
                .with_property("label", PropertyType::Text)
                .with_natural_id("namespace")
                .with_natural_id("label"),
        );
        let parser = DefaultArgumentParser::new();
        let chain = PredicateBuilderChain::new();
        let mut ctx = chain.context(&catalog, &parser);

        let predicate = chain
            .resolve("Article", "tags", Comparison::Equal, "core", "", &mut ctx)
            .unwrap();
        assert_eq!(predicate.path(), "a1.namespace");
    }
}
