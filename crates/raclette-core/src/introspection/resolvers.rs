use crate::TYPENAME_KEY;
use crate::Value;
use crate::directives::apply_introspection_hooks;
use crate::execution::FieldError;
use crate::execution::ResolverMap;
use crate::schema::Schema;
use crate::types::Directive;
use crate::types::DirectiveAnnotation;
use crate::types::EnumValue;
use crate::types::Field;
use crate::types::GraphQLType;
use crate::types::Parameter;
use indexmap::IndexMap;

/// The key of a `__Type` value holding the annotation it describes, e.g.
/// `[Recipe!]!`.
const TYPE_REF_KEY: &str = "__typeRef";

/// Whether the field is resolved by the introspection system rather than by
/// user resolvers.
pub(crate) fn resolves(schema: &Schema, parent_type_name: &str, field_name: &str) -> bool {
    schema.is_introspection_type(parent_type_name)
        || (parent_type_name == schema.query_type().name() && matches!(field_name, "__schema" | "__type"))
}

/// Resolves a field of the introspection system. Elements of definitions
/// carrying directives go through their `on_introspection` hooks first;
/// `includeDeprecated` filters on the hooked elements.
pub(crate) fn resolve_field(
    schema: &Schema,
    resolvers: &ResolverMap,
    parent_type_name: &str,
    field_name: &str,
    parent: &Value,
    arguments: &IndexMap<String, Value>,
) -> Result<Value, FieldError> {
    let include_deprecated = arguments
        .get("includeDeprecated")
        .and_then(Value::as_bool)
        .unwrap_or(false);

    match (parent_type_name, field_name) {
        (_, "__schema") => Ok(Value::object().with(TYPENAME_KEY, "__Schema")),
        (_, "__type") => {
            let name = arguments.get("name").and_then(Value::as_str).unwrap_or_default();
            Ok(match schema.lookup(name) {
                Some(type_) => named_type_value(resolvers, schema, type_)?.unwrap_or_default(),
                None => Value::Null,
            })
        }
        ("__Schema", _) => resolve_schema_field(schema, resolvers, field_name),
        ("__Type", _) => {
            if let Some(overridden) = parent.get(field_name) {
                return Ok(overridden.clone());
            }
            let Some(annot) = parent.get(TYPE_REF_KEY).and_then(Value::as_str) else {
                return Err(FieldError::new("Malformed __Type value"));
            };
            resolve_type_field(schema, resolvers, annot, field_name, include_deprecated)
        }
        (_, "args") => Ok(match parent.get("args") {
            Some(Value::List(args)) => Value::List(
                args.iter()
                    .filter(|arg| visible(arg, include_deprecated))
                    .cloned()
                    .collect(),
            ),
            _ => Value::List(vec![]),
        }),
        _ => Ok(parent.get(field_name).cloned().unwrap_or_default()),
    }
}

fn resolve_schema_field(schema: &Schema, resolvers: &ResolverMap, field_name: &str) -> Result<Value, FieldError> {
    Ok(match field_name {
        "types" => Value::List(elements(
            resolvers,
            schema,
            schema.all_types(),
            GraphQLType::directives,
            |type_| Ok(named_type_element(type_)),
        )?),
        "queryType" => type_ref(schema.query_type().name()),
        "mutationType" => schema
            .mutation_type()
            .map(|t| type_ref(t.name()))
            .unwrap_or_default(),
        "subscriptionType" => schema
            .subscription_type()
            .map(|t| type_ref(t.name()))
            .unwrap_or_default(),
        "directives" => Value::List(
            schema
                .all_directives()
                .values()
                .map(|directive| directive_value(resolvers, schema, directive))
                .collect::<Result<_, _>>()?,
        ),
        _ => Value::Null,
    })
}

/// A wrapper level of a type annotation as introspection sees it.
enum TypeRef<'a> {
    List(&'a str),
    Named(&'a str),
    NonNull(&'a str),
}
impl<'a> TypeRef<'a> {
    fn parse(annot: &'a str) -> Self {
        if let Some(inner) = annot.strip_suffix('!') {
            Self::NonNull(inner)
        } else if let Some(inner) = annot.strip_prefix('[').and_then(|s| s.strip_suffix(']')) {
            Self::List(inner)
        } else {
            Self::Named(annot)
        }
    }
}

fn resolve_type_field(
    schema: &Schema,
    resolvers: &ResolverMap,
    annot: &str,
    field_name: &str,
    include_deprecated: bool,
) -> Result<Value, FieldError> {
    let named = match TypeRef::parse(annot) {
        TypeRef::NonNull(inner) => {
            return Ok(match field_name {
                "kind" => Value::Enum("NON_NULL".to_string()),
                "ofType" => type_ref(inner),
                _ => Value::Null,
            });
        }
        TypeRef::List(inner) => {
            return Ok(match field_name {
                "kind" => Value::Enum("LIST".to_string()),
                "ofType" => type_ref(inner),
                _ => Value::Null,
            });
        }
        TypeRef::Named(name) => name,
    };
    let Some(type_) = schema.lookup(named) else {
        return Err(FieldError::new(format!("Unknown type \"{named}\".")));
    };

    Ok(match field_name {
        "kind" => Value::Enum(type_.kind().introspection_name().to_string()),
        "name" => Value::from(type_.name()),
        "description" => optional_string(type_.description()),
        "specifiedByURL" => optional_string(type_.as_scalar().and_then(|scalar| scalar.specified_by_url())),
        "fields" => {
            let fields = match type_ {
                GraphQLType::Object(obj) => obj.fields(),
                GraphQLType::Interface(iface) => iface.fields(),
                _ => return Ok(Value::Null),
            };
            let fields = elements(
                resolvers,
                schema,
                fields.values().filter(|field| !field.name().starts_with("__")),
                Field::directives,
                |field| field_value(resolvers, schema, field),
            )?;
            visible_list(fields, include_deprecated)
        }
        "interfaces" => match type_ {
            GraphQLType::Object(obj) => Value::List(obj.interface_names().into_iter().map(type_ref).collect()),
            GraphQLType::Interface(iface) => {
                Value::List(iface.interface_names().into_iter().map(type_ref).collect())
            }
            _ => Value::Null,
        },
        "possibleTypes" if type_.is_abstract() => Value::List(
            schema
                .possible_types(type_.name())
                .into_iter()
                .map(|obj| type_ref(obj.name()))
                .collect(),
        ),
        "enumValues" => match type_.as_enum() {
            Some(enum_type) => visible_list(
                elements(resolvers, schema, enum_type.values().values(), EnumValue::directives, |value| {
                    Ok(enum_value_value(value))
                })?,
                include_deprecated,
            ),
            None => Value::Null,
        },
        "inputFields" => match type_.as_input_object() {
            Some(input_type) => visible_list(input_values(resolvers, schema, input_type.fields())?, include_deprecated),
            None => Value::Null,
        },
        _ => Value::Null,
    })
}

/// Builds the introspection elements of `items` with `element`, dropping
/// those an `on_introspection` hook hides.
fn elements<'i, T: 'i>(
    resolvers: &ResolverMap,
    schema: &Schema,
    items: impl IntoIterator<Item = &'i T>,
    directives: impl Fn(&T) -> &[DirectiveAnnotation],
    element: impl Fn(&T) -> Result<Value, FieldError>,
) -> Result<Vec<Value>, FieldError> {
    let mut elements = vec![];
    for item in items {
        if let Some(hooked) = apply_introspection_hooks(resolvers, schema, directives(item), element(item)?)? {
            elements.push(hooked);
        }
    }
    Ok(elements)
}

fn visible(element: &Value, include_deprecated: bool) -> bool {
    include_deprecated || element.get("isDeprecated") != Some(&Value::Boolean(true))
}

fn visible_list(elements: Vec<Value>, include_deprecated: bool) -> Value {
    Value::List(
        elements
            .into_iter()
            .filter(|element| visible(element, include_deprecated))
            .collect(),
    )
}

/// The hooked `__Type` element of a named type; `None` when a hook hides
/// the type.
fn named_type_value(resolvers: &ResolverMap, schema: &Schema, type_: &GraphQLType) -> Result<Option<Value>, FieldError> {
    apply_introspection_hooks(resolvers, schema, type_.directives(), named_type_element(type_))
}

/// A reference to a named type. With directives on the type its scalar
/// entries are filled in eagerly, so hooks can rewrite them.
fn named_type_element(type_: &GraphQLType) -> Value {
    if type_.directives().is_empty() {
        return type_ref(type_.name());
    }
    type_ref(type_.name())
        .with("name", type_.name())
        .with("description", optional_string(type_.description()))
}

fn type_ref(annot: impl std::fmt::Display) -> Value {
    Value::object()
        .with(TYPENAME_KEY, "__Type")
        .with(TYPE_REF_KEY, annot.to_string())
}

fn optional_string(s: Option<&str>) -> Value {
    s.map(Value::from).unwrap_or_default()
}

fn deprecation_entries(value: Value, reason: Option<&str>) -> Value {
    value
        .with("isDeprecated", reason.is_some())
        .with("deprecationReason", optional_string(reason))
}

fn field_value(resolvers: &ResolverMap, schema: &Schema, field: &Field) -> Result<Value, FieldError> {
    let value = Value::object()
        .with(TYPENAME_KEY, "__Field")
        .with("name", field.name())
        .with("description", optional_string(field.description()))
        .with("args", Value::List(input_values(resolvers, schema, field.parameters())?))
        .with("type", type_ref(field.type_annotation()));
    Ok(deprecation_entries(value, field.deprecation_reason()))
}

fn input_values(
    resolvers: &ResolverMap,
    schema: &Schema,
    params: &IndexMap<String, Parameter>,
) -> Result<Vec<Value>, FieldError> {
    elements(resolvers, schema, params.values(), Parameter::directives, |param| {
        Ok(input_value_value(param))
    })
}

fn input_value_value(param: &Parameter) -> Value {
    let value = Value::object()
        .with(TYPENAME_KEY, "__InputValue")
        .with("name", param.name())
        .with("description", optional_string(param.description()))
        .with("type", type_ref(param.type_annotation()))
        .with(
            "defaultValue",
            param
                .default_value()
                .map(|literal| Value::String(literal.to_string()))
                .unwrap_or_default(),
        );
    deprecation_entries(value, param.deprecation_reason())
}

fn enum_value_value(enum_value: &EnumValue) -> Value {
    let value = Value::object()
        .with(TYPENAME_KEY, "__EnumValue")
        .with("name", enum_value.name())
        .with("description", optional_string(enum_value.description()));
    deprecation_entries(value, enum_value.deprecation_reason())
}

fn directive_value(resolvers: &ResolverMap, schema: &Schema, directive: &Directive) -> Result<Value, FieldError> {
    Ok(Value::object()
        .with(TYPENAME_KEY, "__Directive")
        .with("name", directive.name())
        .with("description", optional_string(directive.description()))
        .with(
            "locations",
            Value::List(
                directive
                    .locations()
                    .iter()
                    .map(|loc| Value::Enum(loc.as_str().to_string()))
                    .collect(),
            ),
        )
        .with("args", Value::List(input_values(resolvers, schema, directive.parameters())?))
        .with("isRepeatable", directive.is_repeatable()))
}
