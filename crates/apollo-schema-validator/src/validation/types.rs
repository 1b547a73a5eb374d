use crate::schema::ExtendedType;
use crate::validation::diagnostics::DiagnosticData;
use crate::validation::interface::InterfaceConformance;
use crate::validation::locate;
use crate::validation::DiagnosticList;
use std::collections::HashSet;

/// Walks the type registry in insertion order.
///
/// Every entry must be registered under its own name. Object types must declare each
/// interface once: every repeated declaration after the first is reported, pointing at
/// all references to that interface. The first declaration is checked for conformance.
pub(crate) fn validate_type_definitions(
    errors: &mut DiagnosticList,
    conformance: &InterfaceConformance<'_>,
) {
    for (key, ty) in conformance.schema.types() {
        if ty.name() != key {
            errors.push(
                ty.location(),
                DiagnosticData::TypeRegistryMismatch {
                    key: key.clone(),
                    name: ty.name().clone(),
                },
            );
        }

        let ExtendedType::Object(object) = ty else {
            continue;
        };
        let mut seen = HashSet::with_capacity(object.implements_interfaces.len());
        for interface in &object.implements_interfaces {
            if seen.insert(interface.as_str()) {
                conformance.check(errors, object, interface);
                continue;
            }
            let mut locations = locate::implements_locations(object.declarations(), interface);
            if locations.is_empty() {
                locations.extend(
                    object
                        .implements_interfaces
                        .iter()
                        .filter(|name| *name == interface.as_str())
                        .filter_map(|name| name.location()),
                );
            }
            let (location, other_locations) = match locations.split_first() {
                Some((first, rest)) => (Some(*first), rest.to_vec()),
                None => (None, Vec::new()),
            };
            errors.push(
                location,
                DiagnosticData::DuplicateImplementsInterface {
                    type_name: object.name.clone(),
                    interface: interface.name.clone(),
                    other_locations,
                },
            );
        }
    }
}
