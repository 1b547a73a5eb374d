use super::*;
use crate::ast::OperationType;
use crate::FileId;
use crate::SourceFile;
use std::sync::OnceLock;

/// Folds type system definitions and extensions into a [`Schema`].
///
/// Definitions are "sticky": when a name is defined more than once, the first definition wins
/// and later ones are ignored with a warning. Type extensions may come before the type they
/// extend. They are held until its definition is added.
pub struct SchemaBuilder {
    sources: IndexMap<FileId, Arc<SourceFile>>,
    schema_definition: SchemaDefinitionStatus,
    root_operations: SchemaDefinition,
    schema_definition_location: Option<NodeLocation>,
    has_programmatic_roots: bool,
    directive_definitions: IndexMap<Name, Node<DirectiveDefinition>>,
    types: IndexMap<NamedType, ExtendedType>,
    orphan_type_extensions: IndexMap<Name, Vec<ast::Definition>>,
}

enum SchemaDefinitionStatus {
    Found,
    NoneSoFar {
        orphan_extensions: Vec<Node<ast::SchemaExtension>>,
    },
}

impl Default for SchemaBuilder {
    fn default() -> Self {
        Self::new()
    }
}

impl SchemaBuilder {
    /// Returns a new schema builder initialized with built-in directives and built-in scalars
    pub fn new() -> Self {
        let mut builder = SchemaBuilder {
            sources: IndexMap::new(),
            schema_definition: SchemaDefinitionStatus::NoneSoFar {
                orphan_extensions: Vec::new(),
            },
            root_operations: SchemaDefinition::default(),
            schema_definition_location: None,
            has_programmatic_roots: false,
            directive_definitions: IndexMap::new(),
            types: IndexMap::new(),
            orphan_type_extensions: IndexMap::new(),
        };
        for definition in built_in_definitions() {
            builder.add_definition(definition)
        }
        builder
    }

    /// Add an AST document to the schema being built
    ///
    /// The document's source files are kept for diagnostics.
    /// Executable definitions, if any, will be silently ignored.
    pub fn add_document(&mut self, document: &ast::Document) {
        self.sources.extend(
            document
                .sources
                .iter()
                .map(|(file_id, file)| (*file_id, file.clone())),
        );
        for definition in &document.definitions {
            self.add_definition(definition)
        }
    }

    /// Add a single type system definition or extension to the schema being built
    pub fn add_definition(&mut self, definition: &ast::Definition) {
        match definition {
            ast::Definition::SchemaDefinition(def) => match self.schema_definition {
                SchemaDefinitionStatus::NoneSoFar {
                    ref mut orphan_extensions,
                } => {
                    let orphan_extensions = std::mem::take(orphan_extensions);
                    self.schema_definition = SchemaDefinitionStatus::Found;
                    self.set_schema_ast(def, orphan_extensions);
                }
                SchemaDefinitionStatus::Found => {
                    log::warn!(
                        "ignoring a second `schema` definition at {:?}",
                        def.location()
                    );
                }
            },
            ast::Definition::DirectiveDefinition(def) => {
                insert_sticky(&mut self.directive_definitions, &def.name, || def.clone())
            }
            ast::Definition::ScalarTypeDefinition(def) => {
                insert_sticky(&mut self.types, &def.name, || {
                    ExtendedType::Scalar(def.same_location(ScalarType {
                        name: def.name.clone(),
                    }))
                })
            }
            ast::Definition::ObjectTypeDefinition(def) => {
                let extensions = self.take_orphans(&def.name);
                insert_sticky(&mut self.types, &def.name, || {
                    ExtendedType::Object(ObjectType::from_ast(def, extensions))
                })
            }
            ast::Definition::InterfaceTypeDefinition(def) => {
                let extensions = self.take_orphans(&def.name);
                insert_sticky(&mut self.types, &def.name, || {
                    ExtendedType::Interface(InterfaceType::from_ast(def, extensions))
                })
            }
            ast::Definition::UnionTypeDefinition(def) => {
                let extensions = self.take_orphans(&def.name);
                insert_sticky(&mut self.types, &def.name, || {
                    ExtendedType::Union(UnionType::from_ast(def, extensions))
                })
            }
            ast::Definition::EnumTypeDefinition(def) => {
                let extensions = self.take_orphans(&def.name);
                insert_sticky(&mut self.types, &def.name, || {
                    ExtendedType::Enum(EnumType::from_ast(def, extensions))
                })
            }
            ast::Definition::InputObjectTypeDefinition(def) => {
                let extensions = self.take_orphans(&def.name);
                insert_sticky(&mut self.types, &def.name, || {
                    ExtendedType::InputObject(InputObjectType::from_ast(def, extensions))
                })
            }
            ast::Definition::SchemaExtension(ext) => match self.schema_definition {
                SchemaDefinitionStatus::Found => self.extend_schema_ast(ext),
                SchemaDefinitionStatus::NoneSoFar {
                    ref mut orphan_extensions,
                } => orphan_extensions.push(ext.clone()),
            },
            ast::Definition::ObjectTypeExtension(ext) => match self.types.get_mut(&ext.name) {
                Some(ExtendedType::Object(ty)) => ty.make_mut().extend_ast(ext),
                Some(ty) => kind_mismatch(definition, ty),
                None => self.add_orphan(&ext.name, definition),
            },
            ast::Definition::InterfaceTypeExtension(ext) => match self.types.get_mut(&ext.name) {
                Some(ExtendedType::Interface(ty)) => ty.make_mut().extend_ast(ext),
                Some(ty) => kind_mismatch(definition, ty),
                None => self.add_orphan(&ext.name, definition),
            },
            ast::Definition::UnionTypeExtension(ext) => match self.types.get_mut(&ext.name) {
                Some(ExtendedType::Union(ty)) => ty.make_mut().extend_ast(ext),
                Some(ty) => kind_mismatch(definition, ty),
                None => self.add_orphan(&ext.name, definition),
            },
            ast::Definition::EnumTypeExtension(ext) => match self.types.get_mut(&ext.name) {
                Some(ExtendedType::Enum(ty)) => ty.make_mut().extend_ast(ext),
                Some(ty) => kind_mismatch(definition, ty),
                None => self.add_orphan(&ext.name, definition),
            },
            ast::Definition::InputObjectTypeExtension(ext) => match self.types.get_mut(&ext.name) {
                Some(ExtendedType::InputObject(ty)) => ty.make_mut().extend_ast(ext),
                Some(ty) => kind_mismatch(definition, ty),
                None => self.add_orphan(&ext.name, definition),
            },
            ast::Definition::OperationDefinition(_) | ast::Definition::FragmentDefinition(_) => {
                // Operation-only definitions are not relevant to the type system.
            }
        }
    }

    /// Add a type created programatically, keyed by its own name.
    ///
    /// Like definitions from documents, the first type added with a given name wins.
    pub fn add_type(&mut self, ty: impl Into<ExtendedType>) -> &mut Self {
        let ty = ty.into();
        let name = ty.name().clone();
        insert_sticky(&mut self.types, &name, || ty);
        self
    }

    /// Register `ty` under `key`, replacing any type previously registered under that key.
    ///
    /// Unlike [`add_type`][Self::add_type], the key is not required to match the type's name.
    /// Validation reports registry entries where they differ.
    pub fn insert_type(&mut self, key: Name, ty: impl Into<ExtendedType>) -> &mut Self {
        self.types.insert(key, ty.into());
        self
    }

    /// Add a directive definition created programatically, keyed by its own name.
    pub fn add_directive_definition(
        &mut self,
        definition: impl Into<Node<DirectiveDefinition>>,
    ) -> &mut Self {
        let definition = definition.into();
        let name = definition.name.clone();
        insert_sticky(&mut self.directive_definitions, &name, || definition);
        self
    }

    /// Register `definition` under `key`, replacing any directive previously registered under it.
    ///
    /// Validation reports registry entries where the key and the directive's name differ.
    pub fn insert_directive_definition(
        &mut self,
        key: Name,
        definition: impl Into<Node<DirectiveDefinition>>,
    ) -> &mut Self {
        self.directive_definitions.insert(key, definition.into());
        self
    }

    /// Set the root operation type for the given kind of operation,
    /// replacing any previous one.
    ///
    /// The named type does not need to exist yet, or at all: validation reports that.
    pub fn root_operation(&mut self, operation_type: OperationType, name: Name) -> &mut Self {
        self.has_programmatic_roots = true;
        *root_slot(&mut self.root_operations, operation_type) =
            Some(name.to_component(ComponentOrigin::Definition));
        self
    }

    /// Returns the schema built from all added documents and types
    ///
    /// Type extensions whose type was never defined, and schema extensions
    /// without a `schema` definition, are dropped with a warning.
    pub fn build(self) -> Schema {
        let Self {
            sources,
            schema_definition,
            mut root_operations,
            schema_definition_location,
            has_programmatic_roots,
            directive_definitions,
            types,
            orphan_type_extensions,
        } = self;
        if let SchemaDefinitionStatus::NoneSoFar { orphan_extensions } = schema_definition {
            for ext in &orphan_extensions {
                log::warn!(
                    "ignoring schema extension at {:?} without a schema definition",
                    ext.location()
                );
            }
            if !has_programmatic_roots {
                // Implicit `schema`, ignoring extensions
                let if_has_object_type = |ty: OperationType| {
                    let name = ty.default_type_name();
                    types
                        .get(&name)?
                        .is_object()
                        .then(|| name.to_component(ComponentOrigin::Definition))
                };
                root_operations.query = if_has_object_type(OperationType::Query);
                root_operations.mutation = if_has_object_type(OperationType::Mutation);
                root_operations.subscription = if_has_object_type(OperationType::Subscription);
            }
        }
        for (name, extensions) in &orphan_type_extensions {
            for ext in extensions {
                log::warn!(
                    "ignoring {} at {:?} for undefined type `{name}`",
                    ext.kind(),
                    ext.location()
                );
            }
        }
        let schema_definition = Node::new_opt_location(root_operations, schema_definition_location);
        log::debug!(
            "built schema with {} types and {} directives",
            types.len(),
            directive_definitions.len()
        );
        Schema::from_parts(
            Arc::new(sources),
            schema_definition,
            directive_definitions,
            types,
        )
    }

    fn take_orphans(&mut self, name: &Name) -> Vec<ast::Definition> {
        self.orphan_type_extensions
            .shift_remove(name)
            .unwrap_or_default()
    }

    fn add_orphan(&mut self, name: &Name, definition: &ast::Definition) {
        self.orphan_type_extensions
            .entry(name.clone())
            .or_default()
            .push(definition.clone())
    }

    fn set_schema_ast(
        &mut self,
        definition: &Node<ast::SchemaDefinition>,
        extensions: Vec<Node<ast::SchemaExtension>>,
    ) {
        self.schema_definition_location = definition.location();
        self.root_operations.definition = Some(definition.clone());
        self.add_root_operations(ComponentOrigin::Definition, &definition.root_operations);
        for ext in &extensions {
            self.extend_schema_ast(ext)
        }
    }

    fn extend_schema_ast(&mut self, extension: &Node<ast::SchemaExtension>) {
        let origin = ComponentOrigin::Extension(ExtensionId::new(extension));
        self.root_operations.extensions.push(extension.clone());
        self.add_root_operations(origin, &extension.root_operations)
    }

    fn add_root_operations(
        &mut self,
        origin: ComponentOrigin,
        root_operations: &[Node<(OperationType, NamedType)>],
    ) {
        for root_operation in root_operations {
            let (operation_type, object_type_name) = &**root_operation;
            let slot = root_slot(&mut self.root_operations, *operation_type);
            if slot.is_some() {
                log::warn!(
                    "ignoring duplicate `{operation_type}` root operation at {:?}",
                    root_operation.location()
                );
            }
            slot.get_or_insert_with(|| object_type_name.to_component(origin.clone()));
        }
    }
}

fn root_slot(
    definition: &mut SchemaDefinition,
    operation_type: OperationType,
) -> &mut Option<ComponentName> {
    match operation_type {
        OperationType::Query => &mut definition.query,
        OperationType::Mutation => &mut definition.mutation,
        OperationType::Subscription => &mut definition.subscription,
    }
}

fn kind_mismatch(extension: &ast::Definition, ty: &ExtendedType) {
    log::warn!(
        "ignoring {} at {:?}: `{}` is {}",
        extension.kind(),
        extension.location(),
        ty.name(),
        ty.describe()
    )
}

impl ObjectType {
    fn from_ast(
        definition: &Node<ast::ObjectTypeDefinition>,
        extensions: Vec<ast::Definition>,
    ) -> Node<Self> {
        let mut ty = Self {
            name: definition.name.clone(),
            implements_interfaces: definition
                .implements_interfaces
                .iter()
                .map(|name| name.to_component(ComponentOrigin::Definition))
                .collect(),
            fields: collect_sticky(
                definition
                    .fields
                    .iter()
                    .map(|field| (&field.name, field.to_component(ComponentOrigin::Definition))),
            ),
            definition: Some(definition.clone()),
            extensions: Vec::new(),
        };
        for def in &extensions {
            if let ast::Definition::ObjectTypeExtension(ext) = def {
                ty.extend_ast(ext)
            }
        }
        definition.same_location(ty)
    }

    fn extend_ast(&mut self, extension: &Node<ast::ObjectTypeExtension>) {
        let origin = ComponentOrigin::Extension(ExtensionId::new(extension));
        self.implements_interfaces.extend(
            extension
                .implements_interfaces
                .iter()
                .map(|name| name.to_component(origin.clone())),
        );
        extend_sticky(
            &mut self.fields,
            extension
                .fields
                .iter()
                .map(|field| (&field.name, field.to_component(origin.clone()))),
        );
        self.extensions.push(extension.clone());
    }
}

impl InterfaceType {
    fn from_ast(
        definition: &Node<ast::InterfaceTypeDefinition>,
        extensions: Vec<ast::Definition>,
    ) -> Node<Self> {
        let mut ty = Self {
            name: definition.name.clone(),
            implements_interfaces: definition
                .implements_interfaces
                .iter()
                .map(|name| name.to_component(ComponentOrigin::Definition))
                .collect(),
            fields: collect_sticky(
                definition
                    .fields
                    .iter()
                    .map(|field| (&field.name, field.to_component(ComponentOrigin::Definition))),
            ),
            definition: Some(definition.clone()),
            extensions: Vec::new(),
        };
        for def in &extensions {
            if let ast::Definition::InterfaceTypeExtension(ext) = def {
                ty.extend_ast(ext)
            }
        }
        definition.same_location(ty)
    }

    fn extend_ast(&mut self, extension: &Node<ast::InterfaceTypeExtension>) {
        let origin = ComponentOrigin::Extension(ExtensionId::new(extension));
        self.implements_interfaces.extend(
            extension
                .implements_interfaces
                .iter()
                .map(|name| name.to_component(origin.clone())),
        );
        extend_sticky(
            &mut self.fields,
            extension
                .fields
                .iter()
                .map(|field| (&field.name, field.to_component(origin.clone()))),
        );
        self.extensions.push(extension.clone());
    }
}

impl UnionType {
    fn from_ast(
        definition: &Node<ast::UnionTypeDefinition>,
        extensions: Vec<ast::Definition>,
    ) -> Node<Self> {
        let mut ty = Self {
            name: definition.name.clone(),
            members: definition.members.iter().cloned().collect(),
        };
        for def in &extensions {
            if let ast::Definition::UnionTypeExtension(ext) = def {
                ty.extend_ast(ext)
            }
        }
        definition.same_location(ty)
    }

    fn extend_ast(&mut self, extension: &Node<ast::UnionTypeExtension>) {
        self.members.extend(extension.members.iter().cloned());
    }
}

impl EnumType {
    fn from_ast(
        definition: &Node<ast::EnumTypeDefinition>,
        extensions: Vec<ast::Definition>,
    ) -> Node<Self> {
        let mut ty = Self {
            name: definition.name.clone(),
            values: collect_sticky(definition.values.iter().map(|value_def| {
                (
                    &value_def.value,
                    value_def.to_component(ComponentOrigin::Definition),
                )
            })),
        };
        for def in &extensions {
            if let ast::Definition::EnumTypeExtension(ext) = def {
                ty.extend_ast(ext)
            }
        }
        definition.same_location(ty)
    }

    fn extend_ast(&mut self, extension: &Node<ast::EnumTypeExtension>) {
        let origin = ComponentOrigin::Extension(ExtensionId::new(extension));
        extend_sticky(
            &mut self.values,
            extension
                .values
                .iter()
                .map(|value_def| (&value_def.value, value_def.to_component(origin.clone()))),
        )
    }
}

impl InputObjectType {
    fn from_ast(
        definition: &Node<ast::InputObjectTypeDefinition>,
        extensions: Vec<ast::Definition>,
    ) -> Node<Self> {
        let mut ty = Self {
            name: definition.name.clone(),
            fields: collect_sticky(
                definition
                    .fields
                    .iter()
                    .map(|field| (&field.name, field.to_component(ComponentOrigin::Definition))),
            ),
        };
        for def in &extensions {
            if let ast::Definition::InputObjectTypeExtension(ext) = def {
                ty.extend_ast(ext)
            }
        }
        definition.same_location(ty)
    }

    fn extend_ast(&mut self, extension: &Node<ast::InputObjectTypeExtension>) {
        let origin = ComponentOrigin::Extension(ExtensionId::new(extension));
        extend_sticky(
            &mut self.fields,
            extension
                .fields
                .iter()
                .map(|field| (&field.name, field.to_component(origin.clone()))),
        )
    }
}

/// Built-in scalars and directives, located in [`FileId::BUILT_IN`]
fn built_in_definitions() -> &'static [ast::Definition] {
    static BUILT_IN: OnceLock<Vec<ast::Definition>> = OnceLock::new();
    BUILT_IN.get_or_init(|| {
        let location = NodeLocation::new(FileId::BUILT_IN, 0, 0);
        let located = |name: Name| name.with_location(Some(location));
        let scalar = |name: Name| {
            ast::Definition::ScalarTypeDefinition(Node::new_parsed(
                ast::ScalarTypeDefinition {
                    name: located(name),
                },
                location,
            ))
        };
        let argument = |name: Name, ty: Type, default_value: Option<Value>| {
            Node::new_parsed(
                ast::InputValueDefinition {
                    name: located(name),
                    ty: Node::new_parsed(ty, location),
                    default_value: default_value.map(|value| Node::new_parsed(value, location)),
                },
                location,
            )
        };
        let directive = |name: Name,
                         arguments: Vec<Node<InputValueDefinition>>,
                         locations: Vec<DirectiveLocation>| {
            ast::Definition::DirectiveDefinition(Node::new_parsed(
                DirectiveDefinition {
                    name: located(name),
                    arguments,
                    repeatable: false,
                    locations,
                },
                location,
            ))
        };
        vec![
            directive(
                name!(skip),
                vec![argument(name!("if"), ty!(Boolean!), None)],
                vec![
                    DirectiveLocation::Field,
                    DirectiveLocation::FragmentSpread,
                    DirectiveLocation::InlineFragment,
                ],
            ),
            directive(
                name!(include),
                vec![argument(name!("if"), ty!(Boolean!), None)],
                vec![
                    DirectiveLocation::Field,
                    DirectiveLocation::FragmentSpread,
                    DirectiveLocation::InlineFragment,
                ],
            ),
            directive(
                name!(deprecated),
                vec![argument(
                    name!(reason),
                    ty!(String),
                    Some(Value::String("No longer supported".into())),
                )],
                vec![
                    DirectiveLocation::FieldDefinition,
                    DirectiveLocation::ArgumentDefinition,
                    DirectiveLocation::InputFieldDefinition,
                    DirectiveLocation::EnumValue,
                ],
            ),
            directive(
                name!(specifiedBy),
                vec![argument(name!(url), ty!(String!), None)],
                vec![DirectiveLocation::Scalar],
            ),
            scalar(name!(Int)),
            scalar(name!(Float)),
            scalar(name!(String)),
            scalar(name!(Boolean)),
            scalar(name!(ID)),
        ]
    })
}

/// Like `IndexMap::insert`, but does not replace the value if an equivalent key is already in the map.
fn insert_sticky<K, V>(map: &mut IndexMap<K, V>, key: &K, make_value: impl FnOnce() -> V)
where
    K: std::hash::Hash + Eq + Clone + std::fmt::Display,
{
    if map.contains_key(key) {
        log::warn!("ignoring a second definition of `{key}`");
    } else {
        map.insert(key.clone(), make_value());
    }
}

/// Like `IndexMap::extend`, but does not replace a value if an equivalent key is already in the map.
fn extend_sticky<'a, V>(
    map: &mut IndexMap<Name, V>,
    iter: impl IntoIterator<Item = (&'a Name, V)>,
) {
    for (key, value) in iter.into_iter() {
        map.entry(key.clone()).or_insert(value);
    }
}

/// Like `IndexMap::from_iterator`, but does not replace a value if an equivalent key is already in the map.
fn collect_sticky<'a, V>(iter: impl IntoIterator<Item = (&'a Name, V)>) -> IndexMap<Name, V> {
    let mut map = IndexMap::new();
    extend_sticky(&mut map, iter);
    map
}

#[cfg(test)]
mod tests {
    use super::*;

    fn object(name: Name, implements: &[Name]) -> ast::Definition {
        ast::Definition::ObjectTypeDefinition(Node::new(ast::ObjectTypeDefinition {
            name,
            implements_interfaces: implements.to_vec(),
            fields: Vec::new(),
        }))
    }

    #[test]
    fn built_ins_are_registered() {
        let schema = SchemaBuilder::new().build();
        for scalar in ["Int", "Float", "String", "Boolean", "ID"] {
            assert!(schema.get_scalar(scalar).is_some_and(|ty| ty.is_built_in()));
        }
        for directive in ["skip", "include", "deprecated", "specifiedBy"] {
            assert!(schema.directive_definitions().contains_key(directive));
        }
        assert!(schema.root_operation(OperationType::Query).is_none());
    }

    #[test]
    fn implicit_roots_require_object_types() {
        let mut builder = SchemaBuilder::new();
        builder.add_definition(&object(name!(Query), &[]));
        builder.add_definition(&ast::Definition::ScalarTypeDefinition(Node::new(
            ast::ScalarTypeDefinition {
                name: name!(Mutation),
            },
        )));
        let schema = builder.build();
        assert_eq!(
            schema.root_operation(OperationType::Query),
            Some(&name!(Query))
        );
        assert_eq!(schema.root_operation(OperationType::Mutation), None);
    }

    #[test]
    fn orphan_extension_is_applied_later() {
        let mut builder = SchemaBuilder::new();
        builder.add_definition(&ast::Definition::ObjectTypeExtension(Node::new(
            ast::ObjectTypeExtension {
                name: name!(Dog),
                implements_interfaces: vec![name!(Pet)],
                fields: Vec::new(),
            },
        )));
        builder.add_definition(&object(name!(Dog), &[name!(Named)]));
        let schema = builder.build();
        let dog = schema.get_object("Dog").unwrap();
        let implemented: Vec<&str> = dog
            .implements_interfaces
            .iter()
            .map(|name| name.as_str())
            .collect();
        assert_eq!(implemented, ["Named", "Pet"]);
        assert_eq!(dog.extensions.len(), 1);
        assert!(dog.implements_interfaces[1].origin.extension_id().is_some());
    }

    #[test]
    fn duplicate_implements_are_kept() {
        let mut builder = SchemaBuilder::new();
        builder.add_definition(&object(name!(Dog), &[name!(Pet), name!(Pet)]));
        let schema = builder.build();
        assert_eq!(
            schema
                .get_object("Dog")
                .unwrap()
                .implements_interfaces
                .len(),
            2
        );
    }

    #[test]
    fn first_definition_wins() {
        let mut builder = SchemaBuilder::new();
        builder.add_definition(&object(name!(Dog), &[name!(Pet)]));
        builder.add_definition(&object(name!(Dog), &[]));
        let schema = builder.build();
        assert!(schema.get_object("Dog").unwrap().implements("Pet"));
    }

    #[test]
    fn explicit_schema_definition() {
        let mut builder = SchemaBuilder::new();
        builder.add_definition(&object(name!(Query), &[]));
        builder.add_definition(&object(name!(Root), &[]));
        builder.add_definition(&ast::Definition::SchemaDefinition(Node::new(
            ast::SchemaDefinition {
                root_operations: vec![Node::new((OperationType::Query, name!(Root)))],
            },
        )));
        let schema = builder.build();
        assert_eq!(
            schema.root_operation(OperationType::Query),
            Some(&name!(Root))
        );
        assert!(schema.schema_definition().definition.is_some());
    }
}
