use crate::ast::OperationType;
use crate::schema::ExtendedType;
use crate::validation::diagnostics::DiagnosticData;
use crate::validation::locate;
use crate::validation::DiagnosticList;
use crate::Schema;

/// Checks that root operation types exist and are object types.
///
/// A `query` root is required, `mutation` and `subscription` are optional.
pub(crate) fn validate_root_operations(errors: &mut DiagnosticList, schema: &Schema) {
    let schema_definition = schema.schema_definition();
    for operation_type in [
        OperationType::Query,
        OperationType::Mutation,
        OperationType::Subscription,
    ] {
        let Some(name) = schema_definition.root(operation_type) else {
            if operation_type == OperationType::Query {
                errors.push(
                    schema_definition.location(),
                    DiagnosticData::QueryRootOperationType,
                );
            }
            continue;
        };
        let location = locate::root_operation_location(schema, operation_type);
        match schema.types().get(name.as_str()) {
            Some(ExtendedType::Object(_)) => {}
            Some(ty) => errors.push(
                location,
                DiagnosticData::RootOperationObjectType {
                    operation_type,
                    name: name.name.clone(),
                    describe_type: ty.describe(),
                },
            ),
            None => errors.push(
                location,
                DiagnosticData::UndefinedRootOperationType {
                    operation_type,
                    name: name.name.clone(),
                },
            ),
        }
    }
}
