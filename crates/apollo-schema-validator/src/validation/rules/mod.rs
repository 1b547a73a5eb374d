//! Validation of executable documents against a valid schema, through pluggable rules.
//!
//! A [`Rule`] creates a [`Visitor`] for each document being validated. Visitors report
//! problems through the shared [`ValidationContext`].

use crate::ast::visitor;
use crate::ast::visitor::Visitor;
use crate::ast::Document;
use crate::validation::DiagnosticData;
use crate::validation::DiagnosticList;
use crate::validation::InvalidSchemaError;
use crate::NodeLocation;
use crate::Schema;

mod operation_name;

pub use self::operation_name::unique_operation_names;

/// Creates a visitor for one document validation run.
pub type Rule = fn(&ValidationContext<'_>) -> Box<dyn Visitor>;

/// Rules run by default
pub const SPECIFIED_RULES: &[Rule] = &[unique_operation_names];

/// State shared by every rule while validating one document.
pub struct ValidationContext<'a> {
    schema: &'a Schema,
    document: &'a Document,
    errors: DiagnosticList,
}

impl<'a> ValidationContext<'a> {
    fn new(schema: &'a Schema, document: &'a Document) -> Self {
        Self {
            schema,
            document,
            errors: DiagnosticList::new(document.sources.clone()),
        }
    }

    pub fn schema(&self) -> &'a Schema {
        self.schema
    }

    pub fn document(&self) -> &'a Document {
        self.document
    }

    /// Record a problem. The first location is the main one.
    pub fn report_error(
        &mut self,
        message: impl Into<String>,
        locations: impl IntoIterator<Item = NodeLocation>,
    ) {
        let mut locations = locations.into_iter();
        let location = locations.next();
        self.errors.push(
            location,
            DiagnosticData::Reported {
                message: message.into(),
                other_locations: locations.collect(),
            },
        );
    }

    /// Problems reported so far
    pub fn errors(&self) -> &DiagnosticList {
        &self.errors
    }
}

/// Runs `rules` over `document`.
///
/// Fails without running any rule if `schema` has type system errors.
pub fn validate_document(
    schema: &Schema,
    document: &Document,
    rules: &[Rule],
) -> Result<DiagnosticList, InvalidSchemaError> {
    schema.assert_valid()?;
    let mut context = ValidationContext::new(schema, document);
    let visitors = rules.iter().map(|rule| rule(&context)).collect();
    visitor::walk(document, &mut context, visitors);
    log::debug!(
        "document validation with {} rules found {} diagnostics",
        rules.len(),
        context.errors.len()
    );
    Ok(context.errors)
}
