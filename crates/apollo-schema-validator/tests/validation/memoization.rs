use crate::sdl;
use apollo_schema_validator::ast::Type;
use apollo_schema_validator::schema::StandardSubtyping;
use apollo_schema_validator::schema::SubtypeOracle;
use apollo_schema_validator::Schema;
use apollo_schema_validator::Validator;
use expect_test::expect;
use std::sync::atomic::AtomicUsize;
use std::sync::atomic::Ordering;
use std::sync::Arc;

/// Standard subtyping that counts how often it is consulted
#[derive(Debug, Default)]
struct Counting {
    calls: AtomicUsize,
}

impl Counting {
    fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }
}

impl SubtypeOracle for Counting {
    fn is_subtype(&self, schema: &Schema, candidate: &Type, required: &Type) -> bool {
        self.calls.fetch_add(1, Ordering::SeqCst);
        StandardSubtyping.is_subtype(schema, candidate, required)
    }
}

const SDL: &str = "
type Query { pet: Pet }
interface Pet { name: String }
type Dog implements Pet { name: Int }
";

#[test]
fn second_validation_is_cached() {
    let _ = env_logger::try_init();
    let schema = sdl::parse_schema(SDL);
    let validator = Validator::with_oracle(Counting::default());

    let first = validator.validate(&schema);
    assert_eq!(first.len(), 1);
    let calls = validator.oracle().calls();
    assert_eq!(calls, 1);

    let second = validator.validate(&schema);
    assert!(Arc::ptr_eq(&first, &second));
    assert_eq!(validator.oracle().calls(), calls);

    // Clones share an identity
    let clone = schema.clone();
    assert!(Arc::ptr_eq(&first, &validator.validate(&clone)));
    assert_eq!(validator.oracle().calls(), calls);
}

#[test]
fn cache_is_keyed_by_identity_not_content() {
    let validator = Validator::with_oracle(Counting::default());
    let first = validator.validate(&sdl::parse_schema(SDL));
    let rebuilt = validator.validate(&sdl::parse_schema(SDL));
    assert!(!Arc::ptr_eq(&first, &rebuilt));
    assert_eq!(first.messages(), rebuilt.messages());
    assert_eq!(validator.oracle().calls(), 2);
}

#[test]
fn validators_have_separate_caches() {
    let schema = sdl::parse_schema(SDL);
    let a = Validator::new();
    let b = Validator::new();
    let from_a = a.validate(&schema);
    let from_b = b.validate(&schema);
    assert!(!Arc::ptr_eq(&from_a, &from_b));
    assert_eq!(*from_a, *from_b);
}

#[test]
fn process_wide_validation_is_cached() {
    let schema = sdl::parse_schema(SDL);
    let first = schema.validate();
    let second = apollo_schema_validator::validate(&schema);
    assert!(Arc::ptr_eq(&first, &second));
}

#[test]
fn concurrent_callers_share_one_result() {
    let schema = sdl::parse_schema(SDL);
    let validator = Validator::with_oracle(Counting::default());
    let results: Vec<_> = std::thread::scope(|scope| {
        let handles: Vec<_> = (0..8)
            .map(|_| scope.spawn(|| validator.validate(&schema)))
            .collect();
        handles
            .into_iter()
            .map(|handle| handle.join().unwrap())
            .collect()
    });
    for result in &results[1..] {
        assert!(Arc::ptr_eq(&results[0], result));
    }
    assert_eq!(validator.oracle().calls(), 1);
}

#[test]
fn assert_valid_joins_messages() {
    let schema = sdl::parse_schema(
        "
        type Foo { pet: Pet }
        interface Pet { name: String }
        type Dog implements Pet { name: Int }
        ",
    );
    assert!(sdl::parse_schema("type Query { a: Int }")
        .assert_valid()
        .is_ok());

    let error = apollo_schema_validator::assert_valid(&schema).unwrap_err();
    assert_eq!(error.diagnostics.len(), 2);
    expect![[r#"
        Query root type must be provided.

        Interface field Pet.name expects type String but Dog.name is type Int."#]]
    .assert_eq(&error.to_string());
}
