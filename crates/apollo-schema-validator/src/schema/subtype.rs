//! Subtyping between type references, as used to check interface conformance.

use crate::ast::Type;
use crate::Schema;

/// Decides type substitutability for a schema.
///
/// Validation asks the oracle whether a field declared by an object type
/// can stand in for the field its interface declares.
pub trait SubtypeOracle: Send + Sync {
    /// Returns whether a value of type `candidate` is always a valid value of type `required`.
    fn is_subtype(&self, schema: &Schema, candidate: &Type, required: &Type) -> bool;

    /// Returns whether two type references are the same type,
    /// including list and non-null wrappers.
    fn is_equal_type(&self, a: &Type, b: &Type) -> bool {
        a == b
    }
}

/// Standard GraphQL subtyping, as used by
/// [`IsValidImplementationFieldType`](https://spec.graphql.org/October2021/#IsValidImplementationFieldType)
#[derive(Debug, Clone, Copy, Default)]
pub struct StandardSubtyping;

impl SubtypeOracle for StandardSubtyping {
    fn is_subtype(&self, schema: &Schema, candidate: &Type, required: &Type) -> bool {
        if candidate == required {
            return true;
        }
        match (candidate, required) {
            // A nullable type can never stand in for a non-null one
            (Type::Named(_) | Type::List(_), Type::NonNullNamed(_) | Type::NonNullList(_)) => false,
            (Type::NonNullNamed(_) | Type::NonNullList(_), _) => self.is_subtype(
                schema,
                &candidate.clone().nullable(),
                &required.clone().nullable(),
            ),
            (Type::List(candidate_item), Type::List(required_item)) => {
                self.is_subtype(schema, candidate_item, required_item)
            }
            (Type::List(_), Type::Named(_)) | (Type::Named(_), Type::List(_)) => false,
            (Type::Named(candidate), Type::Named(required)) => {
                schema.is_subtype(required, candidate)
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::schema::InterfaceType;
    use crate::schema::ObjectType;
    use crate::schema::UnionType;
    use crate::SchemaBuilder;

    fn pets() -> Schema {
        let mut pet = InterfaceType::new(name!(Pet));
        pet.fields.insert(
            name!(name),
            crate::ast::FieldDefinition {
                name: name!(name),
                arguments: Vec::new(),
                ty: ty!(String),
            }
            .into(),
        );
        let mut dog = ObjectType::new(name!(Dog));
        dog.implements_interfaces.push(name!(Pet).into());
        let cat = ObjectType::new(name!(Cat));
        let union = UnionType {
            name: name!(CatOrDog),
            members: [name!(Cat), name!(Dog)].into_iter().collect(),
        };
        let mut builder = SchemaBuilder::new();
        builder.add_type(pet);
        builder.add_type(dog);
        builder.add_type(cat);
        builder.add_type(union);
        builder.build()
    }

    #[test]
    fn wrappers() {
        let schema = pets();
        let oracle = StandardSubtyping;
        assert!(oracle.is_subtype(&schema, &ty!(Int!), &ty!(Int)));
        assert!(!oracle.is_subtype(&schema, &ty!(Int), &ty!(Int!)));
        assert!(oracle.is_subtype(&schema, &ty!([Int!]!), &ty!([Int])));
        assert!(!oracle.is_subtype(&schema, &ty!([Int]), &ty!([Int!])));
        assert!(!oracle.is_subtype(&schema, &ty!([Int]), &ty!(Int)));
        assert!(!oracle.is_subtype(&schema, &ty!(Int), &ty!([Int])));
        assert!(!oracle.is_subtype(&schema, &ty!(Int), &ty!(String)));
    }

    #[test]
    fn abstract_types() {
        let schema = pets();
        let oracle = StandardSubtyping;
        assert!(oracle.is_subtype(&schema, &ty!(Dog), &ty!(Pet)));
        assert!(oracle.is_subtype(&schema, &ty!([Dog!]), &ty!([Pet])));
        assert!(!oracle.is_subtype(&schema, &ty!(Cat), &ty!(Pet)));
        assert!(!oracle.is_subtype(&schema, &ty!(Pet), &ty!(Dog)));
        assert!(oracle.is_subtype(&schema, &ty!(Cat!), &ty!(CatOrDog)));
    }

    #[test]
    fn equality_is_structural() {
        let oracle = StandardSubtyping;
        assert!(oracle.is_equal_type(&ty!([Int!]), &ty!([Int!])));
        assert!(!oracle.is_equal_type(&ty!([Int!]), &ty!([Int])));
        assert!(!oracle.is_equal_type(&ty!(Int!), &ty!(Int)));
    }
}
