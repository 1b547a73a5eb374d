//! High-level representation of a GraphQL schema

use crate::ast;
use crate::validation::DiagnosticList;
use crate::validation::InvalidSchemaError;
use crate::Name;
use crate::Node;
use crate::NodeLocation;
use indexmap::IndexMap;
use indexmap::IndexSet;
use std::sync::Arc;

mod builder;
mod component;
pub mod subtype;

pub use self::builder::SchemaBuilder;
pub use self::component::Component;
pub use self::component::ComponentName;
pub use self::component::ComponentOrigin;
pub use self::component::ExtensionId;
pub use self::subtype::StandardSubtyping;
pub use self::subtype::SubtypeOracle;
pub use crate::ast::DirectiveDefinition;
pub use crate::ast::DirectiveLocation;
pub use crate::ast::EnumValueDefinition;
pub use crate::ast::FieldDefinition;
pub use crate::ast::InputValueDefinition;
pub use crate::ast::NamedType;
pub use crate::ast::OperationType;
pub use crate::ast::Type;
pub use crate::ast::Value;

/// High-level representation of a GraphQL schema
///
/// A `Schema` is immutable once built: create one with [`SchemaBuilder`].
/// Clones share the same identity, which is what validation results are cached by.
#[derive(Clone)]
pub struct Schema {
    identity: Arc<()>,

    sources: crate::SourceMap,

    schema_definition: Node<SchemaDefinition>,

    directive_definitions: IndexMap<Name, Node<DirectiveDefinition>>,

    types: IndexMap<NamedType, ExtendedType>,
}

/// The `schema` definition and its extensions, defining root operations
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct SchemaDefinition {
    /// Name of the object type for the `query` root operation
    pub query: Option<ComponentName>,

    /// Name of the object type for the `mutation` root operation
    pub mutation: Option<ComponentName>,

    /// Name of the object type for the `subscription` root operation
    pub subscription: Option<ComponentName>,

    /// The `schema` definition this was built from, if any
    pub definition: Option<Node<ast::SchemaDefinition>>,

    /// `extend schema` declarations folded into this definition
    pub extensions: Vec<Node<ast::SchemaExtension>>,
}

/// The definition of a named type, with all information from type extensions folded in.
///
/// The source location is that of the "main" definition.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ExtendedType {
    Scalar(Node<ScalarType>),
    Object(Node<ObjectType>),
    Interface(Node<InterfaceType>),
    Union(Node<UnionType>),
    Enum(Node<EnumType>),
    InputObject(Node<InputObjectType>),
}

#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct ScalarType {
    pub name: Name,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ObjectType {
    pub name: Name,

    /// Implemented interfaces in declaration order, definition first then extensions.
    ///
    /// Repeated names are kept as declared so that validation can report them.
    pub implements_interfaces: Vec<ComponentName>,

    pub fields: IndexMap<Name, Component<FieldDefinition>>,

    /// The declaration this type was built from, if any
    pub definition: Option<Node<ast::ObjectTypeDefinition>>,

    /// Extensions folded into this type, in the order they were added
    pub extensions: Vec<Node<ast::ObjectTypeExtension>>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct InterfaceType {
    pub name: Name,
    pub implements_interfaces: Vec<ComponentName>,
    pub fields: IndexMap<Name, Component<FieldDefinition>>,
    pub definition: Option<Node<ast::InterfaceTypeDefinition>>,
    pub extensions: Vec<Node<ast::InterfaceTypeExtension>>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UnionType {
    pub name: Name,

    /// Names of member object types
    pub members: IndexSet<Name>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EnumType {
    pub name: Name,
    pub values: IndexMap<Name, Component<EnumValueDefinition>>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct InputObjectType {
    pub name: Name,
    pub fields: IndexMap<Name, Component<InputValueDefinition>>,
}

impl Schema {
    /// Returns a new builder, starting with built-in directives and built-in scalars.
    pub fn builder() -> SchemaBuilder {
        SchemaBuilder::new()
    }

    pub(crate) fn from_parts(
        sources: crate::SourceMap,
        schema_definition: Node<SchemaDefinition>,
        directive_definitions: IndexMap<Name, Node<DirectiveDefinition>>,
        types: IndexMap<NamedType, ExtendedType>,
    ) -> Self {
        Self {
            identity: Arc::new(()),
            sources,
            schema_definition,
            directive_definitions,
            types,
        }
    }

    /// The allocation validation results are cached by.
    pub(crate) fn identity(&self) -> &Arc<()> {
        &self.identity
    }

    /// Source files, if any, that contributed definitions to this schema.
    pub fn sources(&self) -> &crate::SourceMap {
        &self.sources
    }

    /// The `schema` definition and its extensions, defining root operations
    pub fn schema_definition(&self) -> &Node<SchemaDefinition> {
        &self.schema_definition
    }

    /// Built-in and explicit directive definitions, keyed by the name they were registered under
    pub fn directive_definitions(&self) -> &IndexMap<Name, Node<DirectiveDefinition>> {
        &self.directive_definitions
    }

    /// Built-in and explicit types, keyed by the name they were registered under
    pub fn types(&self) -> &IndexMap<NamedType, ExtendedType> {
        &self.types
    }

    /// Returns the type with the given name, if it is a scalar type
    pub fn get_scalar(&self, name: &str) -> Option<&Node<ScalarType>> {
        if let Some(ExtendedType::Scalar(ty)) = self.types.get(name) {
            Some(ty)
        } else {
            None
        }
    }

    /// Returns the type with the given name, if it is a object type
    pub fn get_object(&self, name: &str) -> Option<&Node<ObjectType>> {
        if let Some(ExtendedType::Object(ty)) = self.types.get(name) {
            Some(ty)
        } else {
            None
        }
    }

    /// Returns the name of the object type for the root operation with the given operation kind
    pub fn root_operation(&self, operation_type: ast::OperationType) -> Option<&NamedType> {
        self.schema_definition
            .root(operation_type)
            .map(|component| &component.name)
    }

    /// Returns whether `maybe_subtype` is a subtype of `abstract_type`, which means either:
    ///
    /// * `maybe_subtype` implements the interface `abstract_type`
    /// * `maybe_subtype` is a member of the union type `abstract_type`
    pub fn is_subtype(&self, abstract_type: &str, maybe_subtype: &str) -> bool {
        self.types.get(abstract_type).is_some_and(|ty| match ty {
            ExtendedType::Interface(_) => self.types.get(maybe_subtype).is_some_and(|ty2| {
                match ty2 {
                    ExtendedType::Object(def) => &def.implements_interfaces,
                    ExtendedType::Interface(def) => &def.implements_interfaces,
                    ExtendedType::Scalar(_)
                    | ExtendedType::Union(_)
                    | ExtendedType::Enum(_)
                    | ExtendedType::InputObject(_) => return false,
                }
                .iter()
                .any(|implemented| implemented == abstract_type)
            }),
            ExtendedType::Union(def) => def.members.contains(maybe_subtype),
            ExtendedType::Scalar(_)
            | ExtendedType::Object(_)
            | ExtendedType::Enum(_)
            | ExtendedType::InputObject(_) => false,
        })
    }

    /// Check this schema against the type system rules, using the process-wide default validator.
    ///
    /// Results are cached: calling this again for the same schema (or a clone of it)
    /// returns the same list without checking again.
    pub fn validate(&self) -> Arc<DiagnosticList> {
        crate::validation::validate(self)
    }

    /// Returns an error listing every diagnostic if the schema is not valid.
    pub fn assert_valid(&self) -> Result<(), InvalidSchemaError> {
        crate::validation::assert_valid(self)
    }
}

impl SchemaDefinition {
    /// Returns the root operation type name for the given kind of operation, if any
    pub fn root(&self, operation_type: ast::OperationType) -> Option<&ComponentName> {
        match operation_type {
            ast::OperationType::Query => &self.query,
            ast::OperationType::Mutation => &self.mutation,
            ast::OperationType::Subscription => &self.subscription,
        }
        .as_ref()
    }

    /// Root operation declarations of the `schema` definition, then of each extension
    pub fn root_operation_nodes(
        &self,
    ) -> impl Iterator<Item = &Node<(ast::OperationType, NamedType)>> {
        self.definition
            .iter()
            .flat_map(|def| def.root_operations.iter())
            .chain(
                self.extensions
                    .iter()
                    .flat_map(|ext| ext.root_operations.iter()),
            )
    }
}

impl ExtendedType {
    pub fn name(&self) -> &Name {
        match self {
            Self::Scalar(def) => &def.name,
            Self::Object(def) => &def.name,
            Self::Interface(def) => &def.name,
            Self::Union(def) => &def.name,
            Self::Enum(def) => &def.name,
            Self::InputObject(def) => &def.name,
        }
    }

    /// Return the source location of the type's base definition.
    ///
    /// If the type has extensions, those are not covered by this location.
    pub fn location(&self) -> Option<NodeLocation> {
        match self {
            Self::Scalar(ty) => ty.location(),
            Self::Object(ty) => ty.location(),
            Self::Interface(ty) => ty.location(),
            Self::Union(ty) => ty.location(),
            Self::Enum(ty) => ty.location(),
            Self::InputObject(ty) => ty.location(),
        }
    }

    pub(crate) fn describe(&self) -> &'static str {
        match self {
            Self::Scalar(_) => "a scalar type",
            Self::Object(_) => "an object type",
            Self::Interface(_) => "an interface type",
            Self::Union(_) => "a union type",
            Self::Enum(_) => "an enum type",
            Self::InputObject(_) => "an input object type",
        }
    }

    pub fn is_object(&self) -> bool {
        matches!(self, Self::Object(_))
    }

    pub fn is_built_in(&self) -> bool {
        match self {
            Self::Scalar(ty) => ty.is_built_in(),
            Self::Object(ty) => ty.is_built_in(),
            Self::Interface(ty) => ty.is_built_in(),
            Self::Union(ty) => ty.is_built_in(),
            Self::Enum(ty) => ty.is_built_in(),
            Self::InputObject(ty) => ty.is_built_in(),
        }
    }
}

impl ObjectType {
    pub fn new(name: Name) -> Self {
        Self {
            name,
            implements_interfaces: Vec::new(),
            fields: IndexMap::new(),
            definition: None,
            extensions: Vec::new(),
        }
    }

    /// Returns whether this type declares it implements `interface`
    pub fn implements(&self, interface: &str) -> bool {
        self.implements_interfaces
            .iter()
            .any(|implemented| implemented == interface)
    }

    /// Field declarations, definition first then extensions, in declaration order
    pub fn declarations(&self) -> impl Iterator<Item = &dyn ast::FieldsDeclaration> {
        declarations(&self.definition, &self.extensions)
    }
}

impl InterfaceType {
    pub fn new(name: Name) -> Self {
        Self {
            name,
            implements_interfaces: Vec::new(),
            fields: IndexMap::new(),
            definition: None,
            extensions: Vec::new(),
        }
    }

    /// Field declarations, definition first then extensions, in declaration order
    pub fn declarations(&self) -> impl Iterator<Item = &dyn ast::FieldsDeclaration> {
        declarations(&self.definition, &self.extensions)
    }
}

fn declarations<'a, D, E>(
    definition: &'a Option<Node<D>>,
    extensions: &'a [Node<E>],
) -> impl Iterator<Item = &'a dyn ast::FieldsDeclaration>
where
    D: ast::FieldsDeclaration,
    E: ast::FieldsDeclaration,
{
    definition
        .iter()
        .map(|def| &**def as &dyn ast::FieldsDeclaration)
        .chain(
            extensions
                .iter()
                .map(|ext| &**ext as &dyn ast::FieldsDeclaration),
        )
}

impl Eq for Schema {}

impl PartialEq for Schema {
    fn eq(&self, other: &Self) -> bool {
        let Self {
            identity: _, // ignored
            sources: _,  // ignored
            schema_definition,
            directive_definitions,
            types,
        } = self;
        *schema_definition == other.schema_definition
            && *directive_definitions == other.directive_definitions
            && *types == other.types
    }
}

macro_rules! impl_from_for_extended_type {
    ($($variant: ident($ty: ident)),+ $(,)?) => {
        $(
            impl From<Node<$ty>> for ExtendedType {
                fn from(ty: Node<$ty>) -> Self {
                    Self::$variant(ty)
                }
            }

            impl From<$ty> for ExtendedType {
                fn from(ty: $ty) -> Self {
                    Self::$variant(ty.into())
                }
            }
        )+
    };
}

impl_from_for_extended_type!(
    Scalar(ScalarType),
    Object(ObjectType),
    Interface(InterfaceType),
    Union(UnionType),
    Enum(EnumType),
    InputObject(InputObjectType),
);

impl std::fmt::Debug for Schema {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let Self {
            identity: _,
            sources,
            schema_definition,
            directive_definitions,
            types,
        } = self;
        f.debug_struct("Schema")
            .field("sources", sources)
            .field("schema_definition", schema_definition)
            .field(
                "directive_definitions",
                &DebugDirectiveDefinitions(directive_definitions),
            )
            .field("types", &DebugTypes(types))
            .finish()
    }
}

struct DebugDirectiveDefinitions<'a>(&'a IndexMap<Name, Node<DirectiveDefinition>>);

struct DebugTypes<'a>(&'a IndexMap<Name, ExtendedType>);

impl std::fmt::Debug for DebugDirectiveDefinitions<'_> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let mut map = f.debug_map();
        for (name, def) in self.0 {
            if !def.is_built_in() {
                map.entry(name, def);
            } else {
                map.entry(name, &format_args!("built_in_directive!({name:?})"));
            }
        }
        map.finish()
    }
}

impl std::fmt::Debug for DebugTypes<'_> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let mut map = f.debug_map();
        for (name, def) in self.0 {
            if !def.is_built_in() {
                map.entry(name, def);
            } else {
                map.entry(name, &format_args!("built_in_type!({name:?})"));
            }
        }
        map.finish()
    }
}
