use crate::coercion::ScalarImpl;
use crate::introspection::INTROSPECTION_SDL;
use crate::loc;
use crate::schema::Schema;
use crate::schema::TypeValidationError;
use crate::schema::schema::MetaFields;
use crate::types::Directive;
use crate::types::DirectiveAnnotation;
use crate::types::Field;
use crate::types::GraphQLType;
use crate::types::GraphQLTypeKind;
use crate::types::ObjectOrInterfaceTypeData;
use crate::types::ObjectType;
use crate::types::Parameter;
use crate::types::TypeAnnotation;
use crate::types::TypeBuilder;
use crate::types::TypesMapBuilder;
use crate::types::type_builder::check_parameter_names;
use indexmap::IndexMap;
use raclette_parser::GraphQLParseError;
use raclette_parser::ast;
use raclette_parser::ast::DirectiveLocation;
use raclette_parser::ast::OperationKind;
use std::collections::HashMap;
use std::sync::Arc;
use thiserror::Error;

type Result<T> = std::result::Result<T, SchemaBuildError>;

/// Utility for building a [`Schema`].
///
/// ```
/// use raclette_core::schema::SchemaBuilder;
///
/// let schema = SchemaBuilder::new()
///     .load_str(None, "type Query { recipe(id: Int!): Recipe }")?
///     .load_str(None, "type Recipe { id: Int! name: String! }")?
///     .build()?;
/// assert_eq!(schema.query_type().name(), "Query");
/// # Ok::<(), raclette_core::schema::SchemaBuildError>(())
/// ```
pub struct SchemaBuilder {
    directive_defs: IndexMap<String, Directive>,
    mutation_type: Option<NamedTypeDefLocation>,
    query_type: Option<NamedTypeDefLocation>,
    scalar_impls: HashMap<String, Arc<dyn ScalarImpl>>,
    str_load_counter: u16,
    subscription_type: Option<NamedTypeDefLocation>,
    type_builder: TypeBuilder,
    types_map_builder: TypesMapBuilder,
}
impl SchemaBuilder {
    pub fn build(mut self) -> Result<Schema> {
        self.inject_introspection_types()?;
        self.type_builder.finalize(&mut self.types_map_builder)?;
        let types = self.types_map_builder.into_types_map()?;

        check_directive_definitions(&self.directive_defs, &types)?;
        check_directive_annotations(&self.directive_defs, &types)?;

        for type_ in types.values() {
            if let GraphQLType::Scalar(scalar) = type_
                && !self.scalar_impls.contains_key(scalar.name())
            {
                return Err(SchemaBuildError::MissingScalarImplementation {
                    scalar_name: scalar.name().to_string(),
                    def_location: scalar.def_location().to_owned(),
                });
            }
        }
        let mut registered_names: Vec<&String> = self.scalar_impls.keys().collect();
        registered_names.sort();
        for scalar_name in registered_names {
            if !matches!(types.get(scalar_name), Some(GraphQLType::Scalar(_))) {
                return Err(SchemaBuildError::ScalarImplementationForUndefinedType {
                    scalar_name: scalar_name.to_string(),
                });
            }
        }

        let query_type = resolve_root_type(&types, OperationKind::Query, self.query_type.take())?
            .ok_or(SchemaBuildError::NoQueryOperationTypeDefined)?;
        let mutation_type = resolve_root_type(&types, OperationKind::Mutation, self.mutation_type.take())?;
        let subscription_type =
            resolve_root_type(&types, OperationKind::Subscription, self.subscription_type.take())?;

        // https://spec.graphql.org/October2021/#sel-FAHTRLCAACG0B57a
        let roots = [
            (OperationKind::Query, Some(&query_type)),
            (OperationKind::Mutation, mutation_type.as_ref()),
            (OperationKind::Subscription, subscription_type.as_ref()),
        ];
        for (idx, (kind1, type1)) in roots.iter().enumerate() {
            for (kind2, type2) in &roots[idx + 1..] {
                if let (Some(type1), Some(type2)) = (type1, type2)
                    && type1.name() == type2.name()
                {
                    return Err(SchemaBuildError::NonUniqueOperationTypes {
                        reused_type_name: type1.name().to_string(),
                        operation1: *kind1,
                        operation2: *kind2,
                    });
                }
            }
        }

        let meta_fields = MetaFields {
            schema: Field::builtin(
                query_type.name(),
                "__schema",
                TypeAnnotation::named("__Schema", false),
                vec![],
            ),
            type_: Field::builtin(
                query_type.name(),
                "__type",
                TypeAnnotation::named("__Type", true),
                vec![Parameter::builtin(
                    "name",
                    TypeAnnotation::named("String", false),
                    None,
                    None,
                )],
            ),
            typename: Field::builtin("", "__typename", TypeAnnotation::named("String", false), vec![]),
        };

        tracing::debug!(
            types = types.len(),
            directives = self.directive_defs.len(),
            query_type = query_type.name(),
            "built schema",
        );

        Ok(Schema {
            directive_defs: self.directive_defs,
            meta_fields,
            mutation_type,
            query_type,
            scalar_impls: self.scalar_impls,
            subscription_type,
            types,
        })
    }

    pub fn new() -> Self {
        Self {
            directive_defs: Directive::builtins()
                .into_iter()
                .map(|directive| (directive.name.clone(), directive))
                .collect(),
            mutation_type: None,
            query_type: None,
            scalar_impls: HashMap::new(),
            str_load_counter: 0,
            subscription_type: None,
            type_builder: TypeBuilder::new(),
            types_map_builder: TypesMapBuilder::new(),
        }
    }

    /// Parses `content` as SDL and visits every definition in it.
    ///
    /// `source_name` is used in definition locations; sources loaded without
    /// one are named `str://0`, `str://1`, ...
    pub fn load_str(mut self, source_name: Option<&str>, content: &str) -> Result<Self> {
        let source_name = match source_name {
            Some(source_name) => source_name.to_string(),
            None => {
                let ctr = self.str_load_counter;
                self.str_load_counter += 1;
                format!("str://{ctr}")
            }
        };

        let ast_doc = raclette_parser::parse_schema(content).map_err(|errors| {
            SchemaBuildError::ParseError {
                source_name: source_name.clone(),
                errors,
            }
        })?;

        for def in ast_doc.definitions {
            self.visit_ast_def(&source_name, def)?;
        }

        Ok(self)
    }

    /// Binds the input and output rules of the custom scalar `name`.
    pub fn register_scalar(mut self, name: &str, scalar_impl: impl ScalarImpl + 'static) -> Self {
        self.scalar_impls.insert(name.to_string(), Arc::new(scalar_impl));
        self
    }

    fn inject_introspection_types(&mut self) -> Result<()> {
        let ast_doc = raclette_parser::parse_schema(INTROSPECTION_SDL).map_err(|errors| {
            SchemaBuildError::ParseError {
                source_name: "<introspection>".to_string(),
                errors,
            }
        })?;
        for def in &ast_doc.definitions {
            if let ast::Definition::Type(type_def) = def {
                self.type_builder.visit_type_def(&mut self.types_map_builder, None, type_def)?;
            }
        }
        Ok(())
    }

    fn visit_ast_def(&mut self, source_name: &str, def: ast::Definition) -> Result<()> {
        match def {
            ast::Definition::Schema(schema_def) | ast::Definition::SchemaExtension(schema_def) => {
                self.visit_ast_schemablock_def(source_name, schema_def)
            }
            ast::Definition::Type(type_def) => {
                self.type_builder
                    .visit_type_def(&mut self.types_map_builder, Some(source_name), &type_def)
            }
            ast::Definition::TypeExtension(type_ext) => {
                self.type_builder.visit_type_extension(Some(source_name), type_ext);
                Ok(())
            }
            ast::Definition::Directive(directive_def) => {
                self.visit_ast_directive_def(source_name, directive_def)
            }
            // The schema parser rejects executable definitions.
            ast::Definition::Operation(_) | ast::Definition::Fragment(_) => Ok(()),
        }
    }

    fn visit_ast_directive_def(
        &mut self,
        source_name: &str,
        def: ast::DirectiveDefinition,
    ) -> Result<()> {
        let location: loc::SchemaDefLocation =
            loc::FilePosition::from_pos(source_name, def.position).into();

        if let Some(existing) = self.directive_defs.get(&def.name) {
            if existing.is_builtin() {
                return Err(SchemaBuildError::RedefinitionOfBuiltinDirective {
                    directive_name: def.name,
                    location,
                });
            }
            return Err(SchemaBuildError::DuplicateDirectiveDefinition {
                directive_name: def.name,
                location1: existing.def_location().to_owned(),
                location2: location,
            });
        }

        if def.name.starts_with("__") {
            return Err(SchemaBuildError::InvalidDunderPrefixedDirectiveName {
                def_location: location,
                directive_name: def.name,
            });
        }

        check_parameter_names(Some(source_name), &format!("@{}", def.name), &def.arguments)?;
        self.directive_defs
            .insert(def.name.clone(), Directive::from_ast(Some(source_name), &def));
        Ok(())
    }

    fn visit_ast_schemablock_def(
        &mut self,
        source_name: &str,
        schema_def: ast::SchemaDefinition,
    ) -> Result<()> {
        let roots = [
            (OperationKind::Query, schema_def.query),
            (OperationKind::Mutation, schema_def.mutation),
            (OperationKind::Subscription, schema_def.subscription),
        ];
        for (kind, type_name) in roots {
            let Some(type_name) = type_name else {
                continue;
            };
            let typedef_loc = NamedTypeDefLocation {
                def_location: loc::FilePosition::from_pos(source_name, schema_def.position).into(),
                type_name,
            };
            let slot = match kind {
                OperationKind::Query => &mut self.query_type,
                OperationKind::Mutation => &mut self.mutation_type,
                OperationKind::Subscription => &mut self.subscription_type,
            };
            if let Some(existing) = slot {
                return Err(SchemaBuildError::DuplicateOperationDefinition {
                    operation: kind,
                    location1: existing.clone(),
                    location2: typedef_loc,
                });
            }
            *slot = Some(typedef_loc);
        }
        Ok(())
    }
}
impl Default for SchemaBuilder {
    fn default() -> Self {
        Self::new()
    }
}
impl std::fmt::Debug for SchemaBuilder {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SchemaBuilder")
            .field("directive_defs", &self.directive_defs.keys().collect::<Vec<_>>())
            .field("query_type", &self.query_type)
            .field("mutation_type", &self.mutation_type)
            .field("subscription_type", &self.subscription_type)
            .field("types_map_builder", &self.types_map_builder)
            .finish_non_exhaustive()
    }
}

fn resolve_root_type(
    types: &IndexMap<String, GraphQLType>,
    kind: OperationKind,
    declared: Option<NamedTypeDefLocation>,
) -> Result<Option<ObjectType>> {
    let declared_name = declared.as_ref().map(|d| d.type_name.as_str());
    let type_name = declared_name.unwrap_or(match kind {
        OperationKind::Query => "Query",
        OperationKind::Mutation => "Mutation",
        OperationKind::Subscription => "Subscription",
    });

    match (types.get(type_name), declared) {
        (Some(GraphQLType::Object(obj)), _) => Ok(Some(obj.clone())),
        (Some(other), Some(declared)) => Err(SchemaBuildError::InvalidRootOperationType {
            operation: kind,
            type_name: declared.type_name,
            type_kind: other.kind(),
            location: declared.def_location,
        }),
        (None, Some(declared)) => Err(SchemaBuildError::UndefinedRootOperationType {
            operation: kind,
            type_name: declared.type_name,
            location: declared.def_location,
        }),
        // A default-named type of another kind is just a type, not a root.
        (_, None) => Ok(None),
    }
}

fn check_directive_definitions(
    directive_defs: &IndexMap<String, Directive>,
    types: &IndexMap<String, GraphQLType>,
) -> Result<()> {
    let mut errors = vec![];
    for directive in directive_defs.values() {
        for (param_name, param) in directive.parameters() {
            let innermost_type_name = param.type_annotation().innermost_type_name();
            match types.get(innermost_type_name) {
                Some(param_type) if !param_type.is_input_type() => {
                    errors.push(TypeValidationError::InvalidParameterWithOutputOnlyType {
                        def_location: param.def_location().to_owned(),
                        owner: format!("@{}", directive.name()),
                        parameter_name: param_name.to_string(),
                        outputonly_type_name: innermost_type_name.to_string(),
                    });
                }
                Some(_) => (),
                None => errors.push(TypeValidationError::UndefinedTypeName {
                    ref_location: param.def_location().to_owned(),
                    referenced_by: format!("@{}({param_name}:)", directive.name()),
                    undefined_type_name: innermost_type_name.to_string(),
                }),
            }
        }
    }
    if errors.is_empty() {
        Ok(())
    } else {
        Err(SchemaBuildError::TypeValidationErrors { errors })
    }
}

/// Every directive applied in SDL must be defined, allowed where it is used
/// and, unless repeatable, used at most once per element.
fn check_directive_annotations(
    directive_defs: &IndexMap<String, Directive>,
    types: &IndexMap<String, GraphQLType>,
) -> Result<()> {
    let check = |annots: &[DirectiveAnnotation],
                 dir_location: DirectiveLocation,
                 element: String,
                 location: &loc::SchemaDefLocation|
     -> Result<()> {
        for (idx, annot) in annots.iter().enumerate() {
            let Some(directive) = directive_defs.get(annot.name()) else {
                return Err(SchemaBuildError::UndefinedDirective {
                    directive_name: annot.name().to_string(),
                    element,
                    location: location.to_owned(),
                });
            };
            if !directive.locations().contains(&dir_location) {
                return Err(SchemaBuildError::MisplacedDirective {
                    directive_name: annot.name().to_string(),
                    directive_location: dir_location,
                    element,
                    location: location.to_owned(),
                });
            }
            if !directive.is_repeatable() && annots[..idx].iter().any(|a| a.name() == annot.name()) {
                return Err(SchemaBuildError::DuplicateNonRepeatableDirective {
                    directive_name: annot.name().to_string(),
                    element,
                    location: location.to_owned(),
                });
            }
        }
        Ok(())
    };

    let check_params = |params: &IndexMap<String, Parameter>,
                        dir_location: DirectiveLocation,
                        owner: &str|
     -> Result<()> {
        for (param_name, param) in params {
            check(
                param.directives(),
                dir_location,
                format!("{owner}({param_name}:)"),
                param.def_location(),
            )?;
        }
        Ok(())
    };

    let check_object_like = |data: &ObjectOrInterfaceTypeData, dir_location: DirectiveLocation| -> Result<()> {
        let type_name = data.name();
        check(data.directives(), dir_location, type_name.to_string(), data.def_location())?;
        for (field_name, field) in data.fields() {
            let owner = format!("{type_name}.{field_name}");
            check(
                field.directives(),
                DirectiveLocation::FieldDefinition,
                owner.clone(),
                field.def_location(),
            )?;
            check_params(field.parameters(), DirectiveLocation::ArgumentDefinition, &owner)?;
        }
        Ok(())
    };

    for type_ in types.values() {
        let type_name = type_.name();
        let type_location = type_.def_location();
        match type_ {
            GraphQLType::Scalar(scalar) => {
                check(scalar.directives(), DirectiveLocation::Scalar, type_name.to_string(), type_location)?
            }
            GraphQLType::Object(obj) => check_object_like(&obj.0, DirectiveLocation::Object)?,
            GraphQLType::Interface(iface) => check_object_like(&iface.0, DirectiveLocation::Interface)?,
            GraphQLType::Union(union_type) => {
                check(union_type.directives(), DirectiveLocation::Union, type_name.to_string(), type_location)?
            }
            GraphQLType::Enum(enum_type) => {
                check(enum_type.directives(), DirectiveLocation::Enum, type_name.to_string(), type_location)?;
                for (value_name, value) in enum_type.values() {
                    check(
                        value.directives(),
                        DirectiveLocation::EnumValue,
                        format!("{type_name}.{value_name}"),
                        value.def_location(),
                    )?;
                }
            }
            GraphQLType::InputObject(input_type) => {
                check(
                    input_type.directives(),
                    DirectiveLocation::InputObject,
                    type_name.to_string(),
                    type_location,
                )?;
                for (field_name, field) in input_type.fields() {
                    check(
                        field.directives(),
                        DirectiveLocation::InputFieldDefinition,
                        format!("{type_name}.{field_name}"),
                        field.def_location(),
                    )?;
                }
            }
            GraphQLType::Bool | GraphQLType::Float | GraphQLType::ID | GraphQLType::Int | GraphQLType::String => (),
        }
    }

    for directive in directive_defs.values() {
        check_params(
            directive.parameters(),
            DirectiveLocation::ArgumentDefinition,
            &format!("@{}", directive.name()),
        )?;
    }
    Ok(())
}

#[derive(Clone, Debug, Error, PartialEq)]
pub enum SchemaBuildError {
    #[error("The `@{directive_name}` directive is defined more than once")]
    DuplicateDirectiveDefinition {
        directive_name: String,
        location1: loc::SchemaDefLocation,
        location2: loc::SchemaDefLocation,
    },

    #[error("The `{enum_name}` enum defines the `{value_name}` value more than once")]
    DuplicateEnumValueDefinition {
        enum_name: String,
        value_name: String,
        def1: loc::SchemaDefLocation,
        def2: loc::SchemaDefLocation,
    },

    #[error("The `{type_name}` type defines the `{field_name}` field more than once")]
    DuplicateFieldNameDefinition {
        type_name: String,
        field_name: String,
        def1: loc::SchemaDefLocation,
        def2: loc::SchemaDefLocation,
    },

    #[error("The non-repeatable `@{directive_name}` directive is applied to `{element}` more than once")]
    DuplicateNonRepeatableDirective {
        directive_name: String,
        element: String,
        location: loc::SchemaDefLocation,
    },

    #[error("The {operation} root operation type is declared more than once")]
    DuplicateOperationDefinition {
        operation: OperationKind,
        location1: NamedTypeDefLocation,
        location2: NamedTypeDefLocation,
    },

    #[error("`{owner}` defines the `{param_name}` parameter more than once")]
    DuplicateParameterDefinition {
        owner: String,
        param_name: String,
        def1: loc::SchemaDefLocation,
        def2: loc::SchemaDefLocation,
    },

    #[error("Multiple GraphQL types named `{type_name}` were defined")]
    DuplicateTypeDefinition {
        type_name: String,
        def1: loc::SchemaDefLocation,
        def2: loc::SchemaDefLocation,
    },

    #[error("The `{type_name}` enum must define one or more values")]
    EnumWithNoValues {
        type_name: String,
        location: loc::SchemaDefLocation,
    },

    #[error("Attempted to extend the `{type_name}` type, which is not defined")]
    ExtensionOfUndefinedType {
        type_name: String,
        extension_location: loc::SchemaDefLocation,
    },

    #[error("Custom directive names must not start with `__`: `@{directive_name}`")]
    InvalidDunderPrefixedDirectiveName {
        def_location: loc::SchemaDefLocation,
        directive_name: String,
    },

    #[error("Field names must not start with `__`: `{type_name}.{field_name}`")]
    InvalidDunderPrefixedFieldName {
        location: loc::SchemaDefLocation,
        field_name: String,
        type_name: String,
    },

    #[error("Parameter names must not start with `__`: `{param_name}` on `{owner}`")]
    InvalidDunderPrefixedParamName {
        location: loc::SchemaDefLocation,
        owner: String,
        param_name: String,
    },

    #[error("Type names must not start with `__`: `{type_name}`")]
    InvalidDunderPrefixedTypeName {
        def_location: loc::SchemaDefLocation,
        type_name: String,
    },

    #[error("`{value_name}` can not be used as a value of the `{enum_name}` enum")]
    InvalidEnumValueName {
        enum_name: String,
        value_name: String,
        location: loc::SchemaDefLocation,
    },

    #[error(
        "Attempted to extend the `{type_name}` type with an extension of a \
        different kind; `{type_name}` is {}",
        type_kind.article_name(),
    )]
    InvalidExtensionType {
        type_name: String,
        type_kind: GraphQLTypeKind,
        extension_location: loc::SchemaDefLocation,
    },

    #[error(
        "The {operation} root operation type must be an object type, but \
        `{type_name}` is {}",
        type_kind.article_name(),
    )]
    InvalidRootOperationType {
        operation: OperationKind,
        type_name: String,
        type_kind: GraphQLTypeKind,
        location: loc::SchemaDefLocation,
    },

    #[error("The `@{directive_name}` directive may not be used on {directive_location} (`{element}`)")]
    MisplacedDirective {
        directive_name: String,
        directive_location: DirectiveLocation,
        element: String,
        location: loc::SchemaDefLocation,
    },

    #[error("The custom scalar `{scalar_name}` has no registered implementation")]
    MissingScalarImplementation {
        scalar_name: String,
        def_location: loc::SchemaDefLocation,
    },

    #[error("Attempted to build a schema that has no Query operation type defined")]
    NoQueryOperationTypeDefined,

    #[error(
        "The {operation1} and {operation2} root operations are both defined \
        with the `{reused_type_name}` type, but all root operation types must \
        be different types."
    )]
    NonUniqueOperationTypes {
        reused_type_name: String,
        operation1: OperationKind,
        operation2: OperationKind,
    },

    #[error(
        "Error parsing schema source `{source_name}`:\n{}",
        errors.iter().map(|e| format!("  * {e}")).collect::<Vec<_>>().join("\n"),
    )]
    ParseError {
        source_name: String,
        errors: Vec<GraphQLParseError>,
    },

    #[error("Attempted to redefine the built-in `@{directive_name}` directive")]
    RedefinitionOfBuiltinDirective {
        directive_name: String,
        location: loc::SchemaDefLocation,
    },

    #[error("A scalar implementation was registered for `{scalar_name}`, which is not a custom scalar of this schema")]
    ScalarImplementationForUndefinedType {
        scalar_name: String,
    },

    #[error(
        "Encountered the following type-validation errors while building the \
        schema:\n\n{}",
        errors.iter()
            .map(|s| format!("  * {s}"))
            .collect::<Vec<_>>()
            .join("\n"),
    )]
    TypeValidationErrors {
        errors: Vec<TypeValidationError>,
    },

    #[error("`{element}` is annotated with the undefined directive `@{directive_name}`")]
    UndefinedDirective {
        directive_name: String,
        element: String,
        location: loc::SchemaDefLocation,
    },

    #[error("The {operation} root operation type `{type_name}` is not defined")]
    UndefinedRootOperationType {
        operation: OperationKind,
        type_name: String,
        location: loc::SchemaDefLocation,
    },
}

/// Where a root operation type was declared in a `schema { ... }` block.
#[derive(Clone, Debug, PartialEq)]
pub struct NamedTypeDefLocation {
    pub def_location: loc::SchemaDefLocation,
    pub type_name: String,
}
