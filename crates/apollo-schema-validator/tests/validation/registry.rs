use crate::sdl;
use apollo_schema_validator::ast::DirectiveDefinition;
use apollo_schema_validator::ast::DirectiveLocation;
use apollo_schema_validator::name;
use apollo_schema_validator::schema::ObjectType;
use apollo_schema_validator::validation::DiagnosticData;
use apollo_schema_validator::Node;
use apollo_schema_validator::Schema;
use expect_test::expect;
use pretty_assertions::assert_eq;
use unindent::unindent;

fn directive(name: apollo_schema_validator::Name) -> DirectiveDefinition {
    DirectiveDefinition {
        name,
        arguments: Vec::new(),
        repeatable: false,
        locations: vec![DirectiveLocation::FieldDefinition],
    }
}

#[test]
fn built_in_definitions_are_valid() {
    let schema = sdl::parse_schema("type Query { a: Int b: String c: Float d: Boolean e: ID }");
    assert!(schema.directive_definitions().contains_key("deprecated"));
    assert!(schema.types().contains_key("ID"));
    assert!(schema.validate().is_empty());
}

#[test]
fn directive_registered_under_another_name() {
    let mut builder = Schema::builder();
    builder
        .add_type(ObjectType::new(name!(Query)))
        .add_directive_definition(directive(name!(fine)))
        .insert_directive_definition(name!(alias), directive(name!(real)));
    let schema = builder.build();
    assert_eq!(
        schema.validate().messages(),
        ["Expected directive but got: @real registered as @alias."]
    );
}

#[test]
fn type_registered_under_another_name() {
    let mut builder = Schema::builder();
    builder
        .add_type(ObjectType::new(name!(Query)))
        .insert_type(name!(Alias), ObjectType::new(name!(Real)));
    let schema = builder.build();
    let errors = schema.validate();
    assert_eq!(
        errors.messages(),
        ["Expected a valid type but got: Real registered as Alias."]
    );
    assert_eq!(
        errors.errors()[0].data,
        DiagnosticData::TypeRegistryMismatch {
            key: name!(Alias),
            name: name!(Real),
        }
    );
}

#[test]
fn duplicate_implements_are_reported_once_per_repetition() {
    let input = unindent(
        "
        type Query { pet: Pet }
        interface Pet { name: String }
        type Dog implements Pet & Pet { name: String }
        extend type Dog implements Pet
        ",
    );
    let document = sdl::parse("schema.graphql", &input);
    let mut builder = Schema::builder();
    builder.add_document(&document);
    let schema = builder.build();

    let errors = schema.validate();
    expect![[r#"
        [
            "Dog must declare it implements Pet only once.",
            "Dog must declare it implements Pet only once.",
        ]
    "#]]
    .assert_debug_eq(&errors.messages());

    // `Pet` is referenced on lines 1 and 2 before the `implements` clauses
    let references = vec![
        sdl::find(&document, "Pet", 2),
        sdl::find(&document, "Pet", 3),
        sdl::find(&document, "Pet", 4),
    ];
    for error in errors.errors() {
        assert_eq!(error.location, Some(references[0]));
        assert_eq!(error.data.secondary_locations(), &references[1..]);
    }
}

#[test]
fn duplicate_implements_are_checked_for_conformance_once() {
    let input = unindent(
        "
        type Query { pet: Pet }
        interface Pet { name: String }
        type Dog implements Pet & Pet { age: Int }
        ",
    );
    let schema = sdl::parse_schema(&input);
    expect![[r#"
        [
            "Interface field Pet.name expected but Dog does not provide it.",
            "Dog must declare it implements Pet only once.",
        ]
    "#]]
    .assert_debug_eq(&schema.validate().messages());
}

#[test]
fn implemented_types_must_be_interfaces() {
    let input = unindent(
        "
        type Query { dog: Dog }
        union Animal = Dog
        type Dog implements Query & Animal & Missing { a: Int }
        ",
    );
    let document = sdl::parse("schema.graphql", &input);
    let mut builder = Schema::builder();
    builder.add_document(&document);
    let schema = builder.build();

    let errors = schema.validate();
    expect![[r#"
        [
            "Dog must only implement Interface types, it cannot implement Query.",
            "Dog must only implement Interface types, it cannot implement Animal.",
            "Dog cannot implement undefined interface Missing.",
        ]
    "#]]
    .assert_debug_eq(&errors.messages());
    assert_eq!(
        errors.errors()[2].location,
        Some(sdl::find(&document, "Missing", 0))
    );
}

#[test]
fn checks_follow_registry_order() {
    let input = unindent(
        "
        type Query { a: Int }
        interface Named { name: String }
        type B implements Named { id: ID }
        type A implements Named { id: ID }
        ",
    );
    let schema = sdl::parse_schema(&input);
    assert_eq!(
        schema.validate().messages(),
        [
            "Interface field Named.name expected but B does not provide it.",
            "Interface field Named.name expected but A does not provide it.",
        ]
    );
}

#[test]
fn programmatic_directive_definition_keeps_its_node() {
    let definition = Node::new(directive(name!(tag)));
    let mut builder = Schema::builder();
    builder
        .add_type(ObjectType::new(name!(Query)))
        .add_directive_definition(definition.clone());
    let schema = builder.build();
    assert!(schema.directive_definitions()["tag"].ptr_eq(&definition));
    assert!(schema.validate().is_empty());
}
