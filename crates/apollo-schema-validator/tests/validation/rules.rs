use crate::sdl;
use apollo_schema_validator::validation::validate_document;
use apollo_schema_validator::validation::SPECIFIED_RULES;
use expect_test::expect;

const SCHEMA: &str = "type Query { dog: Dog } type Dog { name: String }";

#[test]
fn unique_operation_names() {
    let _ = env_logger::try_init();
    let schema = sdl::parse_schema(SCHEMA);
    let document = sdl::parse(
        "query.graphql",
        "query A { dog { name } }
fragment A on Dog { name }
fragment A on Dog { name }
query B { ...A }
mutation A { dog { name } }
{ dog { name } }
{ dog { ... on Dog { name } } }
",
    );
    let errors = validate_document(&schema, &document, SPECIFIED_RULES).unwrap();
    expect![[r#"
        [
            "There can be only one operation named \"A\".",
        ]
    "#]]
    .assert_debug_eq(&errors.messages());

    let json = serde_json::to_value(errors.to_json()).unwrap();
    assert_eq!(
        json[0]["locations"],
        serde_json::json!([
            { "line": 1, "column": 7 },
            { "line": 5, "column": 10 },
        ])
    );
}

#[test]
fn rules_require_a_valid_schema() {
    let schema = sdl::parse_schema("type Foo { a: Int }");
    let document = sdl::parse("query.graphql", "query A { a } query A { a }");
    let error = validate_document(&schema, &document, SPECIFIED_RULES).unwrap_err();
    assert_eq!(error.to_string(), "Query root type must be provided.");
}

#[test]
fn no_rules() {
    let schema = sdl::parse_schema(SCHEMA);
    let document = sdl::parse("query.graphql", "query A { dog { name } } query A { dog { name } }");
    let errors = document.validate(&schema, &[]).unwrap();
    assert!(errors.is_empty());
}
