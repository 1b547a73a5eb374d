use crate::sdl;
use apollo_schema_validator::name;
use apollo_schema_validator::schema::ComponentOrigin;
use apollo_schema_validator::schema::FieldDefinition;
use apollo_schema_validator::schema::InputValueDefinition;
use apollo_schema_validator::schema::InterfaceType;
use apollo_schema_validator::schema::ObjectType;
use apollo_schema_validator::ty;
use apollo_schema_validator::validation::ArgumentVariance;
use apollo_schema_validator::validation::DiagnosticData;
use apollo_schema_validator::FileId;
use apollo_schema_validator::Node;
use apollo_schema_validator::NodeLocation;
use apollo_schema_validator::Schema;
use apollo_schema_validator::Validator;
use expect_test::expect;
use pretty_assertions::assert_eq;
use unindent::unindent;

fn build(input: &str) -> (apollo_schema_validator::ast::Document, Schema) {
    let document = sdl::parse("schema.graphql", &unindent(input));
    let mut builder = Schema::builder();
    builder.add_document(&document);
    (document, builder.build())
}

#[test]
fn conforming_implementations() {
    let _ = env_logger::try_init();
    let (_, schema) = build(
        "
        type Query { pets: [Pet] }
        interface Pet { name(short: Boolean): String friend: Pet friends: [Pet] }
        interface Named { name(short: Boolean): String }
        type Dog implements Pet & Named {
          name(short: Boolean, locale: String = \"en\"): String!
          friend: Dog!
          friends: [Dog!]!
          barks: Boolean
        }
        ",
    );
    assert!(schema.validate().is_empty());
}

#[test]
fn missing_field_points_at_every_declaration() {
    let (document, schema) = build(
        "
        type Query { dog: Dog }
        interface Pet { name: String age: Int }
        type Dog implements Pet { name: String }
        extend type Dog { owner: String }
        ",
    );
    let errors = schema.validate();
    assert_eq!(
        errors.messages(),
        ["Interface field Pet.age expected but Dog does not provide it."]
    );
    let error = &errors.errors()[0];
    assert_eq!(
        error.location,
        Some(sdl::find(&document, "age: Int", 0))
    );
    assert_eq!(
        error.data.secondary_locations(),
        [
            document.definitions[2].location().unwrap(),
            document.definitions[3].location().unwrap(),
        ]
    );
}

#[test]
fn field_provided_by_an_extension() {
    let (_, schema) = build(
        "
        type Query { dog: Dog }
        interface Pet { name: String }
        type Dog implements Pet
        extend type Dog { name: String }
        ",
    );
    assert!(schema.validate().is_empty());
}

#[test]
fn interface_fields_from_extensions_are_required() {
    let (document, schema) = build(
        "
        type Query { dog: Dog }
        interface Pet { name: String }
        extend interface Pet { age: Int }
        type Dog implements Pet { name: String }
        ",
    );
    let errors = schema.validate();
    assert_eq!(
        errors.messages(),
        ["Interface field Pet.age expected but Dog does not provide it."]
    );
    assert_eq!(
        errors.errors()[0].location,
        Some(sdl::find(&document, "age: Int", 0))
    );
}

#[test]
fn field_types_must_be_subtypes() {
    let (document, schema) = build(
        "
        type Query { dog: Dog }
        interface Pet { name: String! tags: [String] friend: Pet id: ID }
        type Cat { a: Int }
        type Dog implements Pet { name: String tags: String friend: Cat id: [ID] }
        ",
    );
    let errors = schema.validate();
    expect![[r#"
        [
            "Interface field Pet.name expects type String! but Dog.name is type String.",
            "Interface field Pet.tags expects type [String] but Dog.tags is type String.",
            "Interface field Pet.friend expects type Pet but Dog.friend is type Cat.",
            "Interface field Pet.id expects type ID but Dog.id is type [ID].",
        ]
    "#]]
    .assert_debug_eq(&errors.messages());

    let error = &errors.errors()[0];
    assert_eq!(
        error.location,
        Some(sdl::find(&document, "name: String!", 0))
    );
    assert_eq!(
        error.data.secondary_locations(),
        [sdl::find(&document, "name: String", 1)]
    );
}

#[test]
fn missing_argument() {
    let (document, schema) = build(
        "
        type Query { dog: Dog }
        interface Pet { name(short: Boolean): String }
        type Dog implements Pet { name: String }
        ",
    );
    let errors = schema.validate();
    assert_eq!(
        errors.messages(),
        ["Interface field argument Pet.name(short:) expected but Dog.name does not provide it."]
    );
    let error = &errors.errors()[0];
    assert_eq!(
        error.location,
        Some(sdl::find(&document, "short: Boolean", 0))
    );
    assert_eq!(
        error.data.secondary_locations(),
        [sdl::find(&document, "name: String", 0)]
    );
}

#[test]
fn argument_types_are_invariant_by_default() {
    let input = "
        type Query { dog: Dog }
        interface Pet { name(short: Boolean!, limit: [Int]): String }
        type Dog implements Pet { name(short: Boolean, limit: [Int!]): String }
        ";
    let (document, schema) = build(input);
    let errors = schema.validate();
    expect![[r#"
        [
            "Interface field argument Pet.name(short:) expects type Boolean! but Dog.name(short:) is type Boolean.",
            "Interface field argument Pet.name(limit:) expects type [Int] but Dog.name(limit:) is type [Int!].",
        ]
    "#]]
    .assert_debug_eq(&errors.messages());
    let error = &errors.errors()[0];
    assert_eq!(
        error.location,
        Some(sdl::find(&document, "short: Boolean!", 0))
    );
    assert_eq!(
        error.data.secondary_locations(),
        [sdl::find(&document, "short: Boolean", 1)]
    );

    // Accepting a nullable argument where the interface requires one is fine
    // when arguments are contravariant. The reverse is not.
    let validator = Validator::new().argument_variance(ArgumentVariance::Contravariant);
    let errors = validator.validate(&schema);
    assert_eq!(
        errors.messages(),
        ["Interface field argument Pet.name(limit:) expects type [Int] but Dog.name(limit:) is type [Int!]."]
    );
}

#[test]
fn additional_arguments_must_be_optional() {
    let (document, schema) = build(
        "
        type Query { dog: Dog }
        interface Pet { name: String }
        type Dog implements Pet { name(locale: String!, short: Boolean, limit: Int! = 10): String }
        ",
    );
    let errors = schema.validate();
    expect![[r#"
        [
            "Object field argument Dog.name(locale:) is of required type String! but is not also provided by the Interface field Pet.name.",
            "Object field argument Dog.name(limit:) is of required type Int! but is not also provided by the Interface field Pet.name.",
        ]
    "#]]
    .assert_debug_eq(&errors.messages());
    let error = &errors.errors()[0];
    assert_eq!(
        error.location,
        Some(sdl::find(&document, "locale: String!", 0))
    );
    assert_eq!(
        error.data.secondary_locations(),
        [sdl::find(&document, "name: String", 0)]
    );
}

#[test]
fn every_problem_is_reported() {
    let (_, schema) = build(
        "
        type Query { dog: Dog }
        interface Pet { name(short: Boolean): String age: Int }
        type Dog implements Pet { name(extra: ID!): Int }
        ",
    );
    let errors = schema.validate();
    let kinds: Vec<_> = errors
        .errors()
        .iter()
        .map(|error| match &error.data {
            DiagnosticData::InterfaceFieldTypeMismatch { .. } => "type",
            DiagnosticData::MissingInterfaceFieldArgument { .. } => "missing argument",
            DiagnosticData::RequiredArgumentNotInInterface { .. } => "required argument",
            DiagnosticData::MissingInterfaceField { .. } => "missing field",
            _ => "other",
        })
        .collect();
    assert_eq!(
        kinds,
        ["type", "missing argument", "required argument", "missing field"]
    );
}

#[test]
fn interfaces_implementing_interfaces_are_not_checked() {
    let (_, schema) = build(
        "
        type Query { a: Int }
        interface Node { id: ID! }
        interface Resource implements Node { url: String }
        ",
    );
    assert!(schema.validate().is_empty());
}

#[test]
fn programmatic_interface_fields_are_located() {
    let file_id = FileId::new();
    let at = |offset| NodeLocation::new(file_id, offset, 4);
    let short = Node::new_parsed(
        InputValueDefinition {
            name: name!(short),
            ty: Node::new(ty!(Boolean)),
            default_value: None,
        },
        at(10),
    );
    let name_field = Node::new_parsed(
        FieldDefinition {
            name: name!(name),
            arguments: vec![short],
            ty: ty!(String),
        },
        at(5),
    );
    let age_field = Node::new_parsed(
        FieldDefinition {
            name: name!(age),
            arguments: Vec::new(),
            ty: ty!(Int),
        },
        at(20),
    );
    let mut pet = InterfaceType::new(name!(Pet));
    for field in [name_field, age_field] {
        let component = field.to_component(ComponentOrigin::Definition);
        pet.fields.insert(field.name.clone(), component);
    }
    let dog_name = FieldDefinition {
        name: name!(name),
        arguments: Vec::new(),
        ty: ty!(String),
    };
    let mut dog = ObjectType::new(name!(Dog));
    dog.implements_interfaces.push(name!(Pet).into());
    dog.fields.insert(name!(name), dog_name.into());

    let mut builder = Schema::builder();
    builder
        .add_type(ObjectType::new(name!(Query)))
        .add_type(pet)
        .add_type(dog);
    let errors = builder.build().validate();
    assert_eq!(
        errors.messages(),
        [
            "Interface field argument Pet.name(short:) expected but Dog.name does not provide it.",
            "Interface field Pet.age expected but Dog does not provide it.",
        ]
    );
    let locations: Vec<_> = errors.errors().iter().map(|error| error.location).collect();
    assert_eq!(locations, [Some(at(10)), Some(at(20))]);
}
