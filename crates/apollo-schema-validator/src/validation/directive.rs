use crate::validation::diagnostics::DiagnosticData;
use crate::validation::DiagnosticList;
use crate::Schema;

/// Every directive definition must be registered under its own name.
pub(crate) fn validate_directive_definitions(errors: &mut DiagnosticList, schema: &Schema) {
    for (key, definition) in schema.directive_definitions() {
        if definition.name != *key {
            errors.push(
                definition.location(),
                DiagnosticData::DirectiveRegistryMismatch {
                    key: key.clone(),
                    name: definition.name.clone(),
                },
            );
        }
    }
}
