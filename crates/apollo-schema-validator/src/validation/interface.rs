use crate::schema::ComponentName;
use crate::schema::ExtendedType;
use crate::schema::ObjectType;
use crate::schema::SubtypeOracle;
use crate::validation::diagnostics::DiagnosticData;
use crate::validation::locate;
use crate::validation::ArgumentVariance;
use crate::validation::DiagnosticList;
use crate::Node;
use crate::Schema;

/// Checks that an object type honours the contract of each interface it implements.
pub(crate) struct InterfaceConformance<'a> {
    pub(crate) schema: &'a Schema,
    pub(crate) oracle: &'a dyn SubtypeOracle,
    pub(crate) argument_variance: ArgumentVariance,
}

impl InterfaceConformance<'_> {
    pub(crate) fn check(
        &self,
        errors: &mut DiagnosticList,
        object: &Node<ObjectType>,
        implemented: &ComponentName,
    ) {
        let reference_location = implemented.location().or_else(|| {
            locate::implements_locations(object.declarations(), implemented)
                .first()
                .copied()
        });
        let interface = match self.schema.types().get(implemented.as_str()) {
            Some(ExtendedType::Interface(interface)) => interface,
            Some(ty) => {
                errors.push(
                    reference_location,
                    DiagnosticData::ImplementsNonInterface {
                        type_name: object.name.clone(),
                        name: implemented.name.clone(),
                        describe_type: ty.describe(),
                    },
                );
                return;
            }
            None => {
                errors.push(
                    reference_location,
                    DiagnosticData::UndefinedInterface {
                        type_name: object.name.clone(),
                        name: implemented.name.clone(),
                    },
                );
                return;
            }
        };
        log::trace!(
            "checking {} against interface {}",
            object.name,
            interface.name
        );

        for (field_name, interface_field) in &interface.fields {
            let interface_field_location =
                locate::field_location(interface.declarations(), interface_field);
            let Some(object_field) = object.fields.get(field_name) else {
                errors.push(
                    interface_field_location,
                    DiagnosticData::MissingInterfaceField {
                        interface: interface.name.clone(),
                        field: field_name.clone(),
                        type_name: object.name.clone(),
                        type_locations: locate::object_locations(object),
                    },
                );
                continue;
            };
            let object_field_location =
                locate::field_location(object.declarations(), object_field);

            // Return types are covariant
            if !self
                .oracle
                .is_subtype(self.schema, &object_field.ty, &interface_field.ty)
            {
                errors.push(
                    interface_field_location,
                    DiagnosticData::InterfaceFieldTypeMismatch {
                        interface: interface.name.clone(),
                        field: field_name.clone(),
                        type_name: object.name.clone(),
                        expected: interface_field.ty.clone(),
                        actual: object_field.ty.clone(),
                        field_location: object_field_location,
                    },
                );
            }

            for interface_argument in &interface_field.arguments {
                let interface_argument_location = locate::argument_location(
                    interface.declarations(),
                    interface_field,
                    interface_argument,
                );
                let Some(object_argument) = object_field.argument_by_name(&interface_argument.name)
                else {
                    errors.push(
                        interface_argument_location,
                        DiagnosticData::MissingInterfaceFieldArgument {
                            interface: interface.name.clone(),
                            field: field_name.clone(),
                            argument: interface_argument.name.clone(),
                            type_name: object.name.clone(),
                            field_location: object_field_location,
                        },
                    );
                    continue;
                };
                if !self.argument_type_matches(&interface_argument.ty, &object_argument.ty) {
                    errors.push(
                        interface_argument_location,
                        DiagnosticData::InterfaceFieldArgumentTypeMismatch {
                            interface: interface.name.clone(),
                            field: field_name.clone(),
                            argument: interface_argument.name.clone(),
                            type_name: object.name.clone(),
                            expected: (*interface_argument.ty).clone(),
                            actual: (*object_argument.ty).clone(),
                            argument_location: locate::argument_location(
                                object.declarations(),
                                object_field,
                                object_argument,
                            ),
                        },
                    );
                }
            }

            // Arguments the interface doesn't declare must be optional
            for object_argument in &object_field.arguments {
                if interface_field
                    .argument_by_name(&object_argument.name)
                    .is_some()
                    || !object_argument.ty.is_non_null()
                {
                    continue;
                }
                errors.push(
                    locate::argument_location(
                        object.declarations(),
                        object_field,
                        object_argument,
                    ),
                    DiagnosticData::RequiredArgumentNotInInterface {
                        type_name: object.name.clone(),
                        field: field_name.clone(),
                        argument: object_argument.name.clone(),
                        ty: (*object_argument.ty).clone(),
                        interface: interface.name.clone(),
                        interface_field_location,
                    },
                );
            }
        }
    }

    fn argument_type_matches(
        &self,
        interface_type: &crate::ast::Type,
        object_type: &crate::ast::Type,
    ) -> bool {
        match self.argument_variance {
            ArgumentVariance::Invariant => self.oracle.is_equal_type(interface_type, object_type),
            ArgumentVariance::Contravariant => {
                self.oracle
                    .is_subtype(self.schema, interface_type, object_type)
            }
        }
    }
}
