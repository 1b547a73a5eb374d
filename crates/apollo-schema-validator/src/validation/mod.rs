//! Type system validation of a [`Schema`]
//!
//! ```
//! use apollo_schema_validator::schema::ObjectType;
//! use apollo_schema_validator::Schema;
//!
//! let mut builder = Schema::builder();
//! builder.add_type(ObjectType::new(apollo_schema_validator::name!(Query)));
//! let schema = builder.build();
//! assert!(schema.validate().is_empty());
//! ```

use crate::ast::Document;
use crate::diagnostic::Diagnostic;
use crate::response::GraphQLError;
use crate::schema::StandardSubtyping;
use crate::schema::SubtypeOracle;
use crate::NodeLocation;
use crate::Schema;
use crate::SourceMap;
use std::collections::HashMap;
use std::fmt;
use std::sync::Arc;
use std::sync::Mutex;
use std::sync::OnceLock;
use std::sync::PoisonError;
use std::sync::Weak;

pub(crate) mod diagnostics;
mod directive;
mod interface;
mod locate;
pub mod rules;
mod schema;
mod types;

pub use self::diagnostics::DiagnosticData;
pub use self::diagnostics::ValidationError;
pub use self::rules::validate_document;
pub use self::rules::Rule;
pub use self::rules::ValidationContext;
pub use self::rules::SPECIFIED_RULES;

/// How an implementing field's argument types must relate to the interface's.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
pub enum ArgumentVariance {
    /// Argument types must be exactly the same type
    #[default]
    Invariant,
    /// An implementing argument may accept a supertype of the interface argument type
    Contravariant,
}

/// A collection of diagnostics, in the order the checks produced them.
#[derive(Clone)]
pub struct DiagnosticList {
    sources: SourceMap,
    errors: Vec<ValidationError>,
}

impl DiagnosticList {
    /// Creates an empty diagnostic list with the given source map.
    pub fn new(sources: SourceMap) -> Self {
        Self {
            sources,
            errors: Vec::new(),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.errors.is_empty()
    }

    pub fn len(&self) -> usize {
        self.errors.len()
    }

    /// Source files the diagnostics may point into
    pub fn sources(&self) -> &SourceMap {
        &self.sources
    }

    /// The raw errors, without source context
    pub fn errors(&self) -> &[ValidationError] {
        &self.errors
    }

    pub fn iter(&self) -> impl Iterator<Item = Diagnostic<'_, &ValidationError>> + '_ {
        self.errors.iter().map(|error| Diagnostic {
            sources: &self.sources,
            error,
        })
    }

    /// The message of each diagnostic, in order
    pub fn messages(&self) -> Vec<String> {
        self.errors.iter().map(|error| error.to_string()).collect()
    }

    /// Serializable errors in the shape of a GraphQL response `errors` list
    pub fn to_json(&self) -> Vec<GraphQLError> {
        self.iter().map(|diagnostic| diagnostic.to_json()).collect()
    }

    pub(crate) fn push(&mut self, location: Option<NodeLocation>, data: DiagnosticData) {
        self.errors.push(ValidationError::new(location, data))
    }
}

impl fmt::Display for DiagnosticList {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for diagnostic in self.iter() {
            fmt::Display::fmt(&diagnostic, f)?
        }
        Ok(())
    }
}

impl fmt::Debug for DiagnosticList {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for diagnostic in self.iter() {
            fmt::Debug::fmt(&diagnostic, f)?
        }
        Ok(())
    }
}

impl PartialEq for DiagnosticList {
    fn eq(&self, other: &Self) -> bool {
        self.errors == other.errors
    }
}

impl Eq for DiagnosticList {}

/// Returned by `assert_valid` for a schema with diagnostics.
///
/// Displays every message, separated by a blank line.
#[derive(Clone, thiserror::Error)]
pub struct InvalidSchemaError {
    pub diagnostics: Arc<DiagnosticList>,
}

impl fmt::Display for InvalidSchemaError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (i, error) in self.diagnostics.errors().iter().enumerate() {
            if i > 0 {
                f.write_str("\n\n")?;
            }
            write!(f, "{error}")?;
        }
        Ok(())
    }
}

impl fmt::Debug for InvalidSchemaError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Debug::fmt(&self.diagnostics, f)
    }
}

/// Checks schemas and remembers the results.
///
/// Results are cached by schema identity: validating the same [`Schema`] (or a clone of it)
/// again returns the same [`Arc`] without running any checks. Rebuilding a schema,
/// even with the same content, produces a new identity.
///
/// Concurrent calls for the same schema compute the result once.
pub struct Validator<O = StandardSubtyping> {
    oracle: O,
    argument_variance: ArgumentVariance,
    cache: Mutex<HashMap<usize, CacheEntry>>,
}

struct CacheEntry {
    identity: Weak<()>,
    result: Arc<OnceLock<Arc<DiagnosticList>>>,
}

impl Validator<StandardSubtyping> {
    pub fn new() -> Self {
        Self::with_oracle(StandardSubtyping)
    }
}

impl Default for Validator<StandardSubtyping> {
    fn default() -> Self {
        Self::new()
    }
}

impl<O: SubtypeOracle> Validator<O> {
    /// Use a custom subtyping relation for interface conformance checks.
    pub fn with_oracle(oracle: O) -> Self {
        Self {
            oracle,
            argument_variance: ArgumentVariance::default(),
            cache: Mutex::new(HashMap::new()),
        }
    }

    /// Configure how implementing field arguments are compared to interface arguments.
    ///
    /// Defaults to [`ArgumentVariance::Invariant`].
    pub fn argument_variance(mut self, argument_variance: ArgumentVariance) -> Self {
        self.argument_variance = argument_variance;
        self
    }

    pub fn oracle(&self) -> &O {
        &self.oracle
    }

    /// Returns every diagnostic for `schema`, running the checks on first use only.
    pub fn validate(&self, schema: &Schema) -> Arc<DiagnosticList> {
        let cell = self.cell_for(schema);
        let mut computed = false;
        let result = cell.get_or_init(|| {
            computed = true;
            Arc::new(self.run(schema))
        });
        if !computed {
            log::trace!("reusing validation result for schema");
        }
        Arc::clone(result)
    }

    /// Returns an error containing every diagnostic if there are any.
    pub fn assert_valid(&self, schema: &Schema) -> Result<(), InvalidSchemaError> {
        let diagnostics = self.validate(schema);
        if diagnostics.is_empty() {
            Ok(())
        } else {
            Err(InvalidSchemaError { diagnostics })
        }
    }

    fn cell_for(&self, schema: &Schema) -> Arc<OnceLock<Arc<DiagnosticList>>> {
        let identity = schema.identity();
        let key = Arc::as_ptr(identity) as usize;
        let mut cache = self.cache.lock().unwrap_or_else(PoisonError::into_inner);
        if let Some(entry) = cache.get(&key) {
            if entry
                .identity
                .upgrade()
                .is_some_and(|live| Arc::ptr_eq(&live, identity))
            {
                return Arc::clone(&entry.result);
            }
        }
        // Schemas that were dropped can never be asked about again
        cache.retain(|_, entry| entry.identity.strong_count() > 0);
        let result = Arc::new(OnceLock::new());
        cache.insert(
            key,
            CacheEntry {
                identity: Arc::downgrade(identity),
                result: Arc::clone(&result),
            },
        );
        result
    }

    fn run(&self, schema: &Schema) -> DiagnosticList {
        log::debug!(
            "validating schema with {} types and {} directives",
            schema.types().len(),
            schema.directive_definitions().len()
        );
        let mut errors = DiagnosticList::new(schema.sources().clone());
        schema::validate_root_operations(&mut errors, schema);
        directive::validate_directive_definitions(&mut errors, schema);
        let conformance = interface::InterfaceConformance {
            schema,
            oracle: &self.oracle,
            argument_variance: self.argument_variance,
        };
        types::validate_type_definitions(&mut errors, &conformance);
        log::debug!("schema validation found {} diagnostics", errors.len());
        errors
    }
}

impl<O: fmt::Debug> fmt::Debug for Validator<O> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Validator")
            .field("oracle", &self.oracle)
            .field("argument_variance", &self.argument_variance)
            .finish_non_exhaustive()
    }
}

fn default_validator() -> &'static Validator {
    static DEFAULT: OnceLock<Validator> = OnceLock::new();
    DEFAULT.get_or_init(Validator::new)
}

/// Validates `schema` with standard subtyping and invariant arguments.
///
/// Results are shared process-wide and cached by schema identity.
pub fn validate(schema: &Schema) -> Arc<DiagnosticList> {
    default_validator().validate(schema)
}

/// Validates `schema` and fails with every diagnostic message if there are any.
pub fn assert_valid(schema: &Schema) -> Result<(), InvalidSchemaError> {
    default_validator().assert_valid(schema)
}

impl Document {
    /// Runs document validation `rules` after checking that `schema` is valid.
    pub fn validate(
        &self,
        schema: &Schema,
        rules: &[Rule],
    ) -> Result<DiagnosticList, InvalidSchemaError> {
        validate_document(schema, self, rules)
    }
}
