use crate::loc;
use crate::schema::SchemaBuildError;
use crate::types::DirectiveAnnotation;
use crate::types::EnumType;
use crate::types::EnumValue;
use crate::types::Field;
use crate::types::GraphQLType;
use crate::types::GraphQLTypeKind;
use crate::types::InputObjectType;
use crate::types::InterfaceType;
use crate::types::ObjectOrInterfaceTypeData;
use crate::types::ObjectType;
use crate::types::Parameter;
use crate::types::ScalarType;
use crate::types::TypesMapBuilder;
use crate::types::UnionType;
use indexmap::IndexMap;
use raclette_parser::ast;

type Result<T> = std::result::Result<T, SchemaBuildError>;

/// Turns type definitions into [`GraphQLType`]s and merges type extensions
/// into them once every definition has been visited.
#[derive(Debug, Default)]
pub struct TypeBuilder {
    extensions: Vec<(Option<String>, ast::TypeDefinition)>,
}
impl TypeBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    /// Extensions are applied in the order they were visited.
    pub fn finalize(self, types_builder: &mut TypesMapBuilder) -> Result<()> {
        for (source, ext) in self.extensions {
            let source = source.as_deref();
            let ext_location = loc::def_location(source, ext.position());
            match types_builder.get_type_mut(ext.name()) {
                Some(type_) if type_.kind() == ast_type_kind(&ext) => {
                    merge_type_extension(type_, source, ext)?
                }

                Some(type_) => {
                    return Err(SchemaBuildError::InvalidExtensionType {
                        type_name: ext.name().to_string(),
                        type_kind: type_.kind(),
                        extension_location: ext_location,
                    });
                }

                None => {
                    return Err(SchemaBuildError::ExtensionOfUndefinedType {
                        type_name: ext.name().to_string(),
                        extension_location: ext_location,
                    });
                }
            }
        }
        Ok(())
    }

    pub fn visit_type_def(
        &mut self,
        types_builder: &mut TypesMapBuilder,
        source: Option<&str>,
        def: &ast::TypeDefinition,
    ) -> Result<()> {
        let def_location = loc::def_location(source, def.position());
        let directives = directives_from_ast(def.directives());
        let description = def.description().map(str::to_string);
        let name = def.name().to_string();

        let type_ = match def {
            ast::TypeDefinition::Scalar(_) => GraphQLType::Scalar(ScalarType {
                def_location: def_location.clone(),
                description,
                directives,
                name,
            }),

            ast::TypeDefinition::Object(obj_def) => GraphQLType::Object(ObjectType(
                ObjectOrInterfaceTypeData {
                    def_location: def_location.clone(),
                    description,
                    directives,
                    fields: fields_from_ast(source, &obj_def.name, &obj_def.fields)?,
                    interfaces: unique_names(&obj_def.implements_interfaces),
                    name,
                },
            )),

            ast::TypeDefinition::Interface(iface_def) => GraphQLType::Interface(InterfaceType(
                ObjectOrInterfaceTypeData {
                    def_location: def_location.clone(),
                    description,
                    directives,
                    fields: fields_from_ast(source, &iface_def.name, &iface_def.fields)?,
                    interfaces: unique_names(&iface_def.implements_interfaces),
                    name,
                },
            )),

            ast::TypeDefinition::Union(union_def) => GraphQLType::Union(UnionType {
                def_location: def_location.clone(),
                description,
                directives,
                members: unique_names(&union_def.members),
                name,
            }),

            ast::TypeDefinition::Enum(enum_def) => {
                let values = enum_values_from_ast(source, &enum_def.name, &enum_def.values)?;
                if values.is_empty() {
                    return Err(SchemaBuildError::EnumWithNoValues {
                        type_name: name,
                        location: def_location,
                    });
                }
                GraphQLType::Enum(EnumType {
                    def_location: def_location.clone(),
                    description,
                    directives,
                    name,
                    values,
                })
            }

            ast::TypeDefinition::InputObject(input_def) => GraphQLType::InputObject(InputObjectType {
                def_location: def_location.clone(),
                description,
                directives,
                fields: parameters_from_ast(source, &input_def.name, &input_def.fields)?,
                name,
            }),
        };

        types_builder.add_new_type(def.name(), &def_location, type_)
    }

    pub fn visit_type_extension(&mut self, source: Option<&str>, ext: ast::TypeDefinition) {
        self.extensions.push((source.map(str::to_string), ext));
    }
}

fn ast_type_kind(def: &ast::TypeDefinition) -> GraphQLTypeKind {
    match def {
        ast::TypeDefinition::Scalar(_) => GraphQLTypeKind::Scalar,
        ast::TypeDefinition::Object(_) => GraphQLTypeKind::Object,
        ast::TypeDefinition::Interface(_) => GraphQLTypeKind::Interface,
        ast::TypeDefinition::Union(_) => GraphQLTypeKind::Union,
        ast::TypeDefinition::Enum(_) => GraphQLTypeKind::Enum,
        ast::TypeDefinition::InputObject(_) => GraphQLTypeKind::InputObject,
    }
}

fn merge_type_extension(
    type_: &mut GraphQLType,
    source: Option<&str>,
    ext: ast::TypeDefinition,
) -> Result<()> {
    let ext_directives = directives_from_ast(ext.directives());
    match (type_, ext) {
        (GraphQLType::Scalar(scalar), ast::TypeDefinition::Scalar(_)) => {
            scalar.directives.extend(ext_directives);
        }

        (GraphQLType::Object(ObjectType(data)), ast::TypeDefinition::Object(ext)) => {
            merge_fields_extension(data, source, ext_directives, &ext.name, ext.implements_interfaces, &ext.fields)?
        }

        (GraphQLType::Interface(InterfaceType(data)), ast::TypeDefinition::Interface(ext)) => {
            merge_fields_extension(data, source, ext_directives, &ext.name, ext.implements_interfaces, &ext.fields)?
        }

        (GraphQLType::Union(union_type), ast::TypeDefinition::Union(ext)) => {
            union_type.directives.extend(ext_directives);
            for member in ext.members {
                if !union_type.members.contains(&member) {
                    union_type.members.push(member);
                }
            }
        }

        (GraphQLType::Enum(enum_type), ast::TypeDefinition::Enum(ext)) => {
            enum_type.directives.extend(ext_directives);
            for (value_name, value) in enum_values_from_ast(source, &ext.name, &ext.values)? {
                if let Some(existing) = enum_type.values.get(&value_name) {
                    return Err(SchemaBuildError::DuplicateEnumValueDefinition {
                        enum_name: ext.name.to_string(),
                        value_name,
                        def1: existing.def_location.clone(),
                        def2: value.def_location,
                    });
                }
                enum_type.values.insert(value_name, value);
            }
        }

        (GraphQLType::InputObject(input_type), ast::TypeDefinition::InputObject(ext)) => {
            input_type.directives.extend(ext_directives);
            for (field_name, field) in parameters_from_ast(source, &ext.name, &ext.fields)? {
                if let Some(existing) = input_type.fields.get(&field_name) {
                    return Err(SchemaBuildError::DuplicateFieldNameDefinition {
                        type_name: ext.name.to_string(),
                        field_name,
                        def1: existing.def_location.clone(),
                        def2: field.def_location,
                    });
                }
                input_type.fields.insert(field_name, field);
            }
        }

        // Kinds are checked by the caller.
        _ => (),
    }
    Ok(())
}

fn merge_fields_extension(
    data: &mut ObjectOrInterfaceTypeData,
    source: Option<&str>,
    ext_directives: Vec<DirectiveAnnotation>,
    type_name: &str,
    ext_interfaces: Vec<String>,
    ext_fields: &[ast::FieldDefinition],
) -> Result<()> {
    data.directives.extend(ext_directives);
    for iface_name in ext_interfaces {
        if !data.interfaces.contains(&iface_name) {
            data.interfaces.push(iface_name);
        }
    }
    for (field_name, field) in fields_from_ast(source, type_name, ext_fields)? {
        if let Some(existing) = data.fields.get(&field_name) {
            return Err(SchemaBuildError::DuplicateFieldNameDefinition {
                type_name: type_name.to_string(),
                field_name,
                def1: existing.def_location.clone(),
                def2: field.def_location,
            });
        }
        data.fields.insert(field_name, field);
    }
    Ok(())
}

fn directives_from_ast(directives: &[ast::DirectiveAnnotation]) -> Vec<DirectiveAnnotation> {
    directives.iter().map(DirectiveAnnotation::from_ast).collect()
}

fn unique_names(names: &[String]) -> Vec<String> {
    let mut unique: Vec<String> = Vec::with_capacity(names.len());
    for name in names {
        if !unique.contains(name) {
            unique.push(name.clone());
        }
    }
    unique
}

pub(crate) fn fields_from_ast(
    source: Option<&str>,
    type_name: &str,
    fields: &[ast::FieldDefinition],
) -> Result<IndexMap<String, Field>> {
    let mut field_map: IndexMap<String, Field> = IndexMap::new();
    for field_def in fields {
        let field = Field::from_ast(source, type_name, field_def);

        // https://spec.graphql.org/October2021/#sel-IAHZhCFDBDCAACCTl4L
        if field.name.starts_with("__") && source.is_some() {
            return Err(SchemaBuildError::InvalidDunderPrefixedFieldName {
                location: field.def_location,
                field_name: field.name,
                type_name: type_name.to_string(),
            });
        }

        if let Some(existing) = field_map.get(&field.name) {
            return Err(SchemaBuildError::DuplicateFieldNameDefinition {
                type_name: type_name.to_string(),
                field_name: field.name,
                def1: existing.def_location.clone(),
                def2: field.def_location,
            });
        }

        check_parameter_names(source, &format!("{type_name}.{}", field.name), &field_def.arguments)?;
        field_map.insert(field.name.clone(), field);
    }
    Ok(field_map)
}

pub(crate) fn parameters_from_ast(
    source: Option<&str>,
    owner: &str,
    params: &[ast::InputValueDefinition],
) -> Result<IndexMap<String, Parameter>> {
    check_parameter_names(source, owner, params)?;
    Ok(params
        .iter()
        .map(|param| (param.name.clone(), Parameter::from_ast(source, param)))
        .collect())
}

/// Rejects reserved (`__`-prefixed) and repeated parameter names.
pub(crate) fn check_parameter_names(
    source: Option<&str>,
    owner: &str,
    params: &[ast::InputValueDefinition],
) -> Result<()> {
    for (idx, param) in params.iter().enumerate() {
        let location = loc::def_location(source, param.position);

        // https://spec.graphql.org/October2021/#sel-KAHZhCFDBHBBCAACCTlrG
        if param.name.starts_with("__") && source.is_some() {
            return Err(SchemaBuildError::InvalidDunderPrefixedParamName {
                location,
                owner: owner.to_string(),
                param_name: param.name.clone(),
            });
        }

        if let Some(earlier) = params[..idx].iter().find(|p| p.name == param.name) {
            return Err(SchemaBuildError::DuplicateParameterDefinition {
                owner: owner.to_string(),
                param_name: param.name.clone(),
                def1: loc::def_location(source, earlier.position),
                def2: location,
            });
        }
    }
    Ok(())
}

fn enum_values_from_ast(
    source: Option<&str>,
    enum_name: &str,
    values: &[ast::EnumValueDefinition],
) -> Result<IndexMap<String, EnumValue>> {
    let mut value_map: IndexMap<String, EnumValue> = IndexMap::new();
    for value_def in values {
        let value = EnumValue {
            def_location: loc::def_location(source, value_def.position),
            description: value_def.description.clone(),
            directives: directives_from_ast(&value_def.directives),
            name: value_def.name.clone(),
        };

        // https://spec.graphql.org/October2021/#EnumValue
        if matches!(value.name.as_str(), "true" | "false" | "null") {
            return Err(SchemaBuildError::InvalidEnumValueName {
                enum_name: enum_name.to_string(),
                value_name: value.name,
                location: value.def_location,
            });
        }

        if let Some(existing) = value_map.get(&value.name) {
            return Err(SchemaBuildError::DuplicateEnumValueDefinition {
                enum_name: enum_name.to_string(),
                value_name: value.name,
                def1: existing.def_location.clone(),
                def2: value.def_location,
            });
        }
        value_map.insert(value.name.clone(), value);
    }
    Ok(value_map)
}
