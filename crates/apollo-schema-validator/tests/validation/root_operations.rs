use crate::sdl;
use apollo_schema_validator::ast::OperationType;
use apollo_schema_validator::name;
use apollo_schema_validator::schema::ObjectType;
use apollo_schema_validator::schema::ScalarType;
use apollo_schema_validator::Schema;
use expect_test::expect;
use unindent::unindent;

#[test]
fn implicit_query_root() {
    let schema = sdl::parse_schema("type Query { a: Int }");
    assert!(schema.validate().is_empty());
}

#[test]
fn missing_query_root() {
    let _ = env_logger::try_init();
    let schema = sdl::parse_schema("type Foo { a: Int }");
    let errors = schema.validate();
    expect![[r#"
        [
            "Query root type must be provided.",
        ]
    "#]]
    .assert_debug_eq(&errors.messages());
    // Nothing to point at without a `schema` definition
    assert_eq!(errors.errors()[0].location, None);
}

#[test]
fn schema_definition_without_query() {
    let input = unindent(
        "
        schema { mutation: Mutation }
        type Mutation { a: Int }
        ",
    );
    let document = sdl::parse("schema.graphql", &input);
    let mut builder = Schema::builder();
    builder.add_document(&document);
    let schema = builder.build();

    let errors = schema.validate();
    assert_eq!(errors.messages(), ["Query root type must be provided."]);
    assert_eq!(
        errors.errors()[0].location,
        document.definitions[0].location()
    );
}

#[test]
fn scalar_named_query_is_not_an_implicit_root() {
    let schema = sdl::parse_schema("scalar Query");
    assert_eq!(
        schema.validate().messages(),
        ["Query root type must be provided."]
    );
}

#[test]
fn root_types_must_be_objects() {
    let input = unindent(
        "
        schema { query: Foo mutation: M subscription: S }
        scalar Foo
        input M { a: Int }
        union S = Bar
        type Bar { a: Int }
        ",
    );
    let document = sdl::parse("schema.graphql", &input);
    let mut builder = Schema::builder();
    builder.add_document(&document);
    let schema = builder.build();

    let errors = schema.validate();
    expect![[r#"
        [
            "Query root type must be Object type, it cannot be Foo.",
            "Mutation root type must be Object type if provided, it cannot be M.",
            "Subscription root type must be Object type if provided, it cannot be S.",
        ]
    "#]]
    .assert_debug_eq(&errors.messages());

    let locations: Vec<_> = errors.errors().iter().map(|error| error.location).collect();
    assert_eq!(
        locations,
        [
            Some(sdl::find(&document, "query: Foo", 0)),
            Some(sdl::find(&document, "mutation: M", 0)),
            Some(sdl::find(&document, "subscription: S", 0)),
        ]
    );
}

#[test]
fn root_type_declared_in_schema_extension() {
    let input = unindent(
        "
        schema { query: Query }
        type Query { a: Int }
        extend schema { mutation: Int }
        ",
    );
    let document = sdl::parse("schema.graphql", &input);
    let mut builder = Schema::builder();
    builder.add_document(&document);
    let schema = builder.build();

    let errors = schema.validate();
    assert_eq!(
        errors.messages(),
        ["Mutation root type must be Object type if provided, it cannot be Int."]
    );
    assert_eq!(
        errors.errors()[0].location,
        Some(sdl::find(&document, "mutation: Int", 0))
    );
}

#[test]
fn undefined_root_types() {
    let input = unindent(
        "
        schema { query: Query subscription: Events }
        type Query { a: Int }
        ",
    );
    let schema = sdl::parse_schema(&input);
    assert_eq!(
        schema.validate().messages(),
        ["Subscription root type Events is not defined in the schema."]
    );
}

#[test]
fn programmatic_roots() {
    let mut builder = Schema::builder();
    builder
        .add_type(ObjectType::new(name!(RootQuery)))
        .add_type(ScalarType {
            name: name!(Mutation),
        })
        .root_operation(OperationType::Query, name!(RootQuery))
        .root_operation(OperationType::Mutation, name!(Mutation));
    let schema = builder.build();

    assert_eq!(schema.root_operation(OperationType::Query), Some(&name!(RootQuery)));
    let errors = schema.validate();
    assert_eq!(
        errors.messages(),
        ["Mutation root type must be Object type if provided, it cannot be Mutation."]
    );
    assert_eq!(errors.errors()[0].location, None);
}
