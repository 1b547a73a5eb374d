//! Type system validation for GraphQL schemas.
//!
//! Build a [`Schema`] from syntax nodes or programmatically with [`SchemaBuilder`],
//! then check it with [`Schema::validate`]. Every problem is reported, each as a
//! [`ValidationError`] pointing at the declarations involved:
//!
//! * a `query` root operation type must exist, and every root operation type
//!   must be an object type
//! * registries must hold each type and directive definition under its own name
//! * an object type must declare each interface once, and provide every field and
//!   argument of the interfaces it implements with compatible types
//!
//! Results are cached per schema. Use [`Validator`] to configure how types are
//! compared, and [`validation::validate_document`] to run document rules
//! against a valid schema.

#[macro_use]
mod name;
#[macro_use]
mod macros;
pub mod ast;
pub mod diagnostic;
mod node;
pub mod response;
pub mod schema;
mod sources;
pub mod validation;

pub use self::name::InvalidNameError;
pub use self::name::Name;
pub use self::node::FileId;
pub use self::node::Node;
pub use self::node::NodeLocation;
pub use self::schema::Schema;
pub use self::schema::SchemaBuilder;
pub use self::sources::SourceFile;
pub use self::sources::SourceMap;
pub use self::validation::assert_valid;
pub use self::validation::validate;
pub use self::validation::DiagnosticList;
pub use self::validation::InvalidSchemaError;
pub use self::validation::ValidationError;
pub use self::validation::Validator;
