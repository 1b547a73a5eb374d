use crate::sdl;
use apollo_schema_validator::diagnostic::Color;
use apollo_schema_validator::Schema;
use expect_test::expect;

const SDL: &str = "type Query { dog: Dog }
interface Pet {
  name: String
  age: Int
}
type Dog implements Pet {
  name: String
}
extend type Dog {
  owner: String
}
";

fn schema() -> Schema {
    let mut builder = Schema::builder();
    builder.add_document(&sdl::parse("pets.graphql", SDL));
    builder.build()
}

#[test]
fn json_includes_every_location() {
    let errors = schema().validate();
    let json = serde_json::to_string_pretty(&errors.to_json()).unwrap();
    expect![[r#"
        [
          {
            "message": "Interface field Pet.age expected but Dog does not provide it.",
            "locations": [
              {
                "line": 4,
                "column": 3
              },
              {
                "line": 6,
                "column": 1
              },
              {
                "line": 9,
                "column": 1
              }
            ]
          }
        ]"#]]
    .assert_eq(&json);
}

#[test]
fn line_column_of_main_location() {
    let errors = schema().validate();
    let diagnostic = errors.iter().next().unwrap();
    let location = diagnostic.line_column().unwrap();
    assert_eq!((location.line, location.column), (4, 3));
}

#[test]
fn cli_report_names_the_file() {
    let errors = schema().validate();
    let mut output = Vec::new();
    errors
        .iter()
        .next()
        .unwrap()
        .write(Color::Never, &mut output)
        .unwrap();
    let output = String::from_utf8(output).unwrap();
    assert!(output.contains("Interface field Pet.age expected but Dog does not provide it."));
    assert!(output.contains("pets.graphql"));
    assert!(output.contains("add `age` field to this type"));

    let display = errors.to_string();
    assert!(display.contains("pets.graphql"));
}

#[test]
fn locations_without_sources_are_skipped() {
    let schema = sdl::parse_schema("type Foo { a: Int }");
    let json = serde_json::to_value(schema.validate().to_json()).unwrap();
    assert_eq!(
        json,
        serde_json::json!([{ "message": "Query root type must be provided." }])
    );
}
