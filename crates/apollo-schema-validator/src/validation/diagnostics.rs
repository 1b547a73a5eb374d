use crate::ast::OperationType;
use crate::ast::Type;
use crate::diagnostic::CliReport;
use crate::diagnostic::ToCliReport;
use crate::Name;
use crate::NodeLocation;
use std::fmt;
use thiserror::Error;

/// A single problem found in a schema (or document), with the declarations it concerns.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub struct ValidationError {
    /// The main location for this error
    pub location: Option<NodeLocation>,
    pub data: DiagnosticData,
}

impl ValidationError {
    pub fn new(location: Option<NodeLocation>, data: DiagnosticData) -> Self {
        Self { location, data }
    }

    /// The error message, without source code context
    pub fn message(&self) -> String {
        self.data.to_string()
    }

    /// The main location followed by every other location this error refers to
    pub fn locations(&self) -> Vec<NodeLocation> {
        ToCliReport::locations(self)
    }
}

impl fmt::Display for ValidationError {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        self.data.fmt(f)
    }
}

/// Structured data about a diagnostic.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
#[non_exhaustive]
pub enum DiagnosticData {
    #[error("Query root type must be provided.")]
    QueryRootOperationType,

    #[error(
        "{} root type must be Object type{}, it cannot be {name}.",
        .operation_type.label(),
        if_provided(.operation_type)
    )]
    RootOperationObjectType {
        operation_type: OperationType,
        /// Name of the root operation type
        name: Name,
        /// Category of the type
        describe_type: &'static str,
    },

    #[error("{} root type {name} is not defined in the schema.", .operation_type.label())]
    UndefinedRootOperationType {
        operation_type: OperationType,
        /// Name of the missing root operation type
        name: Name,
    },

    #[error("Expected directive but got: @{name} registered as @{key}.")]
    DirectiveRegistryMismatch {
        /// Key of the directive registry entry
        key: Name,
        /// Name of the directive definition found under that key
        name: Name,
    },

    #[error("Expected a valid type but got: {name} registered as {key}.")]
    TypeRegistryMismatch {
        /// Key of the type registry entry
        key: Name,
        /// Name of the type found under that key
        name: Name,
    },

    #[error("{type_name} must declare it implements {interface} only once.")]
    DuplicateImplementsInterface {
        type_name: Name,
        interface: Name,
        /// Every other place the interface is referenced from the type and its extensions
        other_locations: Vec<NodeLocation>,
    },

    #[error("{type_name} must only implement Interface types, it cannot implement {name}.")]
    ImplementsNonInterface {
        type_name: Name,
        /// Name of the implemented type that is not an interface
        name: Name,
        /// Category of the type
        describe_type: &'static str,
    },

    #[error("{type_name} cannot implement undefined interface {name}.")]
    UndefinedInterface {
        type_name: Name,
        /// Name of the interface not in the schema
        name: Name,
    },

    #[error("Interface field {interface}.{field} expected but {type_name} does not provide it.")]
    MissingInterfaceField {
        interface: Name,
        field: Name,
        type_name: Name,
        /// Declarations of the implementing type (definition and extensions)
        type_locations: Vec<NodeLocation>,
    },

    #[error(
        "Interface field {interface}.{field} expects type {expected} \
         but {type_name}.{field} is type {actual}."
    )]
    InterfaceFieldTypeMismatch {
        interface: Name,
        field: Name,
        type_name: Name,
        expected: Type,
        actual: Type,
        /// Location of the field declared by the implementing type
        field_location: Option<NodeLocation>,
    },

    #[error(
        "Interface field argument {interface}.{field}({argument}:) expected \
         but {type_name}.{field} does not provide it."
    )]
    MissingInterfaceFieldArgument {
        interface: Name,
        field: Name,
        argument: Name,
        type_name: Name,
        /// Location of the field declared by the implementing type
        field_location: Option<NodeLocation>,
    },

    #[error(
        "Interface field argument {interface}.{field}({argument}:) expects type {expected} \
         but {type_name}.{field}({argument}:) is type {actual}."
    )]
    InterfaceFieldArgumentTypeMismatch {
        interface: Name,
        field: Name,
        argument: Name,
        type_name: Name,
        expected: Type,
        actual: Type,
        /// Location of the argument declared by the implementing type
        argument_location: Option<NodeLocation>,
    },

    #[error(
        "Object field argument {type_name}.{field}({argument}:) is of required type {ty} \
         but is not also provided by the Interface field {interface}.{field}."
    )]
    RequiredArgumentNotInInterface {
        type_name: Name,
        field: Name,
        argument: Name,
        ty: Type,
        interface: Name,
        /// Location of the interface field
        interface_field_location: Option<NodeLocation>,
    },

    /// Reported by a document validation rule
    #[error("{message}")]
    Reported {
        message: String,
        other_locations: Vec<NodeLocation>,
    },
}

fn if_provided(operation_type: &OperationType) -> &'static str {
    match operation_type {
        OperationType::Query => "",
        OperationType::Mutation | OperationType::Subscription => " if provided",
    }
}

impl DiagnosticData {
    /// Locations this error refers to, in addition to the main location
    pub fn secondary_locations(&self) -> Vec<NodeLocation> {
        match self {
            DiagnosticData::DuplicateImplementsInterface {
                other_locations, ..
            }
            | DiagnosticData::Reported {
                other_locations, ..
            } => other_locations.clone(),
            DiagnosticData::MissingInterfaceField { type_locations, .. } => type_locations.clone(),
            DiagnosticData::InterfaceFieldTypeMismatch { field_location, .. }
            | DiagnosticData::MissingInterfaceFieldArgument { field_location, .. } => {
                field_location.iter().copied().collect()
            }
            DiagnosticData::InterfaceFieldArgumentTypeMismatch {
                argument_location, ..
            } => argument_location.iter().copied().collect(),
            DiagnosticData::RequiredArgumentNotInInterface {
                interface_field_location,
                ..
            } => interface_field_location.iter().copied().collect(),
            DiagnosticData::QueryRootOperationType
            | DiagnosticData::RootOperationObjectType { .. }
            | DiagnosticData::UndefinedRootOperationType { .. }
            | DiagnosticData::DirectiveRegistryMismatch { .. }
            | DiagnosticData::TypeRegistryMismatch { .. }
            | DiagnosticData::ImplementsNonInterface { .. }
            | DiagnosticData::UndefinedInterface { .. } => Vec::new(),
        }
    }
}

impl ToCliReport for ValidationError {
    fn location(&self) -> Option<NodeLocation> {
        self.location
    }

    fn locations(&self) -> Vec<NodeLocation> {
        let mut locations: Vec<_> = self.location.into_iter().collect();
        locations.extend(self.data.secondary_locations());
        locations
    }

    fn report(&self, report: &mut CliReport) {
        match &self.data {
            DiagnosticData::QueryRootOperationType => {
                report.with_label_opt(
                    self.location,
                    "`query` root operation type must be defined here",
                );
            }
            DiagnosticData::RootOperationObjectType { describe_type, .. } => {
                report.with_label_opt(self.location, format_args!("this is {describe_type}"));
                report.with_help("Root operation type must be an object type.");
            }
            DiagnosticData::UndefinedRootOperationType { .. } => {
                report.with_label_opt(self.location, "not found in this schema");
            }
            DiagnosticData::DirectiveRegistryMismatch { key, .. } => {
                report.with_label_opt(
                    self.location,
                    format_args!("this definition is registered as `@{key}`"),
                );
            }
            DiagnosticData::TypeRegistryMismatch { key, .. } => {
                report.with_label_opt(
                    self.location,
                    format_args!("this definition is registered as `{key}`"),
                );
            }
            DiagnosticData::DuplicateImplementsInterface {
                interface,
                other_locations,
                ..
            } => {
                report.with_label_opt(
                    self.location,
                    format_args!("`{interface}` implemented here"),
                );
                for location in other_locations {
                    report.with_label_opt(Some(*location), "... and here");
                }
            }
            DiagnosticData::ImplementsNonInterface { describe_type, .. } => {
                report.with_label_opt(self.location, format_args!("this is {describe_type}"));
                report.with_help("Only interface types can be implemented.");
            }
            DiagnosticData::UndefinedInterface { .. } => {
                report.with_label_opt(self.location, "not found in this schema");
            }
            DiagnosticData::MissingInterfaceField {
                field,
                type_locations,
                ..
            } => {
                report.with_label_opt(
                    self.location,
                    format_args!("`{field}` was originally defined here"),
                );
                for location in type_locations {
                    report.with_label_opt(
                        Some(*location),
                        format_args!("add `{field}` field to this type"),
                    );
                }
            }
            DiagnosticData::InterfaceFieldTypeMismatch {
                expected,
                actual,
                field_location,
                ..
            } => {
                report.with_label_opt(
                    self.location,
                    format_args!("interface expects `{expected}`"),
                );
                report.with_label_opt(*field_location, format_args!("this is `{actual}`"));
                report.with_help(format_args!(
                    "An implementing field may return a subtype of `{expected}`."
                ));
            }
            DiagnosticData::MissingInterfaceFieldArgument {
                argument,
                field_location,
                ..
            } => {
                report.with_label_opt(
                    self.location,
                    format_args!("`{argument}` was originally defined here"),
                );
                report.with_label_opt(
                    *field_location,
                    format_args!("add `{argument}` argument to this field"),
                );
            }
            DiagnosticData::InterfaceFieldArgumentTypeMismatch {
                expected,
                actual,
                argument_location,
                ..
            } => {
                report.with_label_opt(
                    self.location,
                    format_args!("interface expects `{expected}`"),
                );
                report.with_label_opt(*argument_location, format_args!("this is `{actual}`"));
                report.with_help("Argument types must match the interface exactly.");
            }
            DiagnosticData::RequiredArgumentNotInInterface {
                interface,
                field,
                interface_field_location,
                ..
            } => {
                report.with_label_opt(self.location, "this argument is required");
                report.with_label_opt(
                    *interface_field_location,
                    format_args!("`{interface}.{field}` does not define it"),
                );
                report.with_help("Make the argument nullable or add it to the interface field.");
            }
            DiagnosticData::Reported {
                other_locations, ..
            } => {
                report.with_label_opt(self.location, "reported here");
                for location in other_locations {
                    report.with_label_opt(Some(*location), "and here");
                }
            }
        }
    }
}
