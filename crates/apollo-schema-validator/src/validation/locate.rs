//! Finds the source nodes a diagnostic should point at.
//!
//! Types remember the declarations they were built from (a definition and any extensions).
//! Lookups search those in order and the first match wins, consistent with
//! which declaration of a repeated field the schema keeps.

use crate::ast::FieldDefinition;
use crate::ast::FieldsDeclaration;
use crate::ast::InputValueDefinition;
use crate::ast::OperationType;
use crate::Node;
use crate::NodeLocation;
use crate::Schema;

/// The first declaration of `field` among `declarations`
pub(crate) fn field<'a>(
    declarations: impl IntoIterator<Item = &'a dyn FieldsDeclaration>,
    field: &str,
) -> Option<&'a Node<FieldDefinition>> {
    declarations
        .into_iter()
        .flat_map(|declaration| declaration.fields())
        .find(|definition| definition.name == field)
}

/// Location of the first declaration of `definition`'s field.
///
/// Falls back to the node itself for types built without syntax.
pub(crate) fn field_location<'a>(
    declarations: impl IntoIterator<Item = &'a dyn FieldsDeclaration>,
    definition: &Node<FieldDefinition>,
) -> Option<NodeLocation> {
    field(declarations, &definition.name)
        .and_then(|declared| declared.location())
        .or_else(|| definition.location())
}

/// Location of `argument` on the first declaration of `definition`'s field.
///
/// Only that declaration is searched. Falls back to the argument node itself.
pub(crate) fn argument_location<'a>(
    declarations: impl IntoIterator<Item = &'a dyn FieldsDeclaration>,
    definition: &Node<FieldDefinition>,
    argument: &Node<InputValueDefinition>,
) -> Option<NodeLocation> {
    field(declarations, &definition.name)
        .and_then(|declared| declared.argument_by_name(&argument.name))
        .and_then(|declared| declared.location())
        .or_else(|| argument.location())
}

/// Every reference to `interface` in `implements` clauses
pub(crate) fn implements_locations<'a>(
    declarations: impl IntoIterator<Item = &'a dyn FieldsDeclaration>,
    interface: &str,
) -> Vec<NodeLocation> {
    declarations
        .into_iter()
        .flat_map(|declaration| declaration.implements_interfaces())
        .filter(|name| *name == interface)
        .filter_map(|name| name.location())
        .collect()
}

/// Where an object type is declared: its definition then each extension.
///
/// Falls back to the type's own node for types built without syntax.
pub(crate) fn object_locations(object: &Node<crate::schema::ObjectType>) -> Vec<NodeLocation> {
    let locations: Vec<_> = object
        .definition
        .iter()
        .filter_map(|definition| definition.location())
        .chain(
            object
                .extensions
                .iter()
                .filter_map(|extension| extension.location()),
        )
        .collect();
    if locations.is_empty() {
        object.location().into_iter().collect()
    } else {
        locations
    }
}

/// The `query: Name` style declaration naming a root operation type,
/// or else the declaration of the named type itself.
pub(crate) fn root_operation_location(
    schema: &Schema,
    operation_type: OperationType,
) -> Option<NodeLocation> {
    let definition = schema.schema_definition();
    let declared = definition
        .root_operation_nodes()
        .find(|node| node.0 == operation_type)
        .and_then(|node| node.location());
    if declared.is_some() {
        return declared;
    }
    let name = definition.root(operation_type)?;
    name.location().or_else(|| {
        schema
            .types()
            .get(name.as_str())
            .and_then(|ty| ty.location())
    })
}
