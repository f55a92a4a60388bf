use crate::Value;
use crate::coercion::BuiltinScalar;
use crate::coercion::CoercionError;
use crate::coercion::InputPathSegment;
use crate::schema::Schema;
use crate::types::GraphQLType;
use crate::types::InputObjectType;
use crate::types::TypeAnnotation;
use indexmap::IndexMap;
use raclette_parser::ast;

#[derive(Clone, Copy)]
enum Variables<'a> {
    /// Coerced runtime variable values.
    Runtime(&'a IndexMap<String, Value>),
    /// Static checking: variable references are assumed to hold a valid
    /// value and their usage is checked separately.
    Unknown,
}

/// Coerces a literal from the document to the internal representation of
/// `type_annotation`, substituting `variables` (already coerced) for
/// variable references.
///
/// A variable absent from `variables` behaves like an omitted value: inside
/// an input object literal the field falls back to its default.
pub fn coerce_literal(
    literal: &ast::Value,
    type_annotation: &TypeAnnotation,
    schema: &Schema,
    variables: &IndexMap<String, Value>,
) -> Result<Value, CoercionError> {
    coerce(literal, type_annotation, schema, Variables::Runtime(variables), &[])
}

/// Checks that `literal` could be coerced to `type_annotation` whatever the
/// values of the variables it references.
pub(crate) fn check_literal(
    literal: &ast::Value,
    type_annotation: &TypeAnnotation,
    schema: &Schema,
) -> Result<(), CoercionError> {
    coerce(literal, type_annotation, schema, Variables::Unknown, &[]).map(|_| ())
}

fn coerce(
    literal: &ast::Value,
    type_annotation: &TypeAnnotation,
    schema: &Schema,
    variables: Variables<'_>,
    path: &[InputPathSegment],
) -> Result<Value, CoercionError> {
    let non_null_violation = || {
        CoercionError::new(format!(
            "Expected non-nullable type < {type_annotation} > not to be null",
        ))
        .at(path)
    };

    if let ast::Value::Variable(var_name) = literal {
        return match variables {
            Variables::Unknown => Ok(Value::Null),
            Variables::Runtime(values) => match values.get(var_name) {
                Some(value) if value.is_null() && !type_annotation.nullable() => {
                    Err(non_null_violation())
                }
                Some(value) => Ok(value.clone()),
                None if type_annotation.nullable() => Ok(Value::Null),
                None => Err(non_null_violation()),
            },
        };
    }

    if let ast::Value::Null = literal {
        return if type_annotation.nullable() {
            Ok(Value::Null)
        } else {
            Err(non_null_violation())
        };
    }

    match type_annotation {
        TypeAnnotation::List(list_annot) => {
            let inner = list_annot.inner_type_annotation();
            match literal {
                ast::Value::List(items) => items
                    .iter()
                    .enumerate()
                    .map(|(idx, item)| {
                        let mut item_path = path.to_vec();
                        item_path.push(InputPathSegment::Index(idx));
                        coerce(item, inner, schema, variables, &item_path)
                    })
                    .collect::<Result<Vec<_>, _>>()
                    .map(Value::List),
                single => Ok(Value::List(vec![coerce(single, inner, schema, variables, path)?])),
            }
        }

        TypeAnnotation::Named(named_annot) => {
            let type_name = named_annot.graphql_type_name();
            let Some(type_) = schema.lookup(type_name) else {
                return Err(CoercionError::new(format!("Unknown type < {type_name} >")).at(path));
            };
            coerce_named(literal, type_, schema, variables, path)
        }
    }
}

fn coerce_named(
    literal: &ast::Value,
    type_: &GraphQLType,
    schema: &Schema,
    variables: Variables<'_>,
    path: &[InputPathSegment],
) -> Result<Value, CoercionError> {
    let expected_type = || CoercionError::new(format!("Expected type < {} >", type_.name())).at(path);

    match type_ {
        GraphQLType::Bool
        | GraphQLType::Float
        | GraphQLType::ID
        | GraphQLType::Int
        | GraphQLType::String => {
            let scalar = BuiltinScalar::from_type(type_).ok_or_else(expected_type)?;
            scalar.parse_literal(literal).ok_or_else(expected_type)
        }

        GraphQLType::Scalar(scalar_type) => {
            let Some(scalar_impl) = schema.scalar_impl(scalar_type.name()) else {
                return Err(expected_type());
            };
            let substituted;
            let literal = match variables {
                Variables::Runtime(values) if literal.contains_variables() => {
                    substituted = substitute_variables(literal, values);
                    &substituted
                }
                // Custom scalars can't be checked against unknown variables.
                Variables::Unknown if literal.contains_variables() => return Ok(Value::Null),
                _ => literal,
            };
            scalar_impl
                .parse_literal(literal)
                .map_err(|err| expected_type().with_reason(err.message()))
        }

        GraphQLType::Enum(enum_type) => match literal {
            ast::Value::Enum(name) if enum_type.value(name).is_some() => Ok(Value::Enum(name.clone())),
            _ => Err(expected_type()),
        },

        GraphQLType::InputObject(input_type) => match literal {
            ast::Value::Object(fields) => coerce_input_object(fields, input_type, schema, variables, path),
            _ => Err(CoercionError::new(format!(
                "Expected type < {} > to be an object",
                input_type.name(),
            ))
            .at(path)),
        },

        GraphQLType::Interface(_) | GraphQLType::Object(_) | GraphQLType::Union(_) => {
            Err(CoercionError::new(format!(
                "Type < {} > can not be used as an input type",
                type_.name(),
            ))
            .at(path))
        }
    }
}

fn coerce_input_object(
    fields: &[(String, ast::Value)],
    input_type: &InputObjectType,
    schema: &Schema,
    variables: Variables<'_>,
    path: &[InputPathSegment],
) -> Result<Value, CoercionError> {
    if let Some((unknown, _)) = fields.iter().find(|(name, _)| input_type.field(name).is_none()) {
        return Err(CoercionError::new(format!(
            "Field < {unknown} > is not defined by type < {} >",
            input_type.name(),
        ))
        .at(path));
    }

    let mut coerced = IndexMap::new();
    for (field_name, field_def) in input_type.fields() {
        let mut field_path = path.to_vec();
        field_path.push(InputPathSegment::Field(field_name.to_string()));

        let provided = fields
            .iter()
            .find(|(name, _)| name == field_name)
            .map(|(_, value)| value)
            .filter(|value| match (value, variables) {
                (ast::Value::Variable(var_name), Variables::Runtime(values)) => {
                    values.contains_key(var_name)
                }
                _ => true,
            });

        match provided {
            Some(field_literal) => {
                let value = coerce(field_literal, field_def.type_annotation(), schema, variables, &field_path)?;
                coerced.insert(field_name.to_string(), value);
            }

            None => {
                if let Some(default_value) = field_def.default_value() {
                    let value = coerce(
                        default_value,
                        field_def.type_annotation(),
                        schema,
                        Variables::Runtime(&IndexMap::new()),
                        &field_path,
                    )?;
                    coerced.insert(field_name.to_string(), value);
                } else if !field_def.type_annotation().nullable() {
                    return Err(CoercionError::new(format!(
                        "Field < {} > of required type < {} > was not provided",
                        crate::coercion::render_input_path(&field_path),
                        field_def.type_annotation(),
                    )));
                }
            }
        }
    }
    Ok(Value::Object(coerced))
}

fn substitute_variables(literal: &ast::Value, variables: &IndexMap<String, Value>) -> ast::Value {
    match literal {
        ast::Value::Variable(name) => variables.get(name).map(value_to_literal).unwrap_or(ast::Value::Null),
        ast::Value::List(items) => {
            ast::Value::List(items.iter().map(|item| substitute_variables(item, variables)).collect())
        }
        ast::Value::Object(fields) => ast::Value::Object(
            fields
                .iter()
                .map(|(name, value)| (name.clone(), substitute_variables(value, variables)))
                .collect(),
        ),
        other => other.clone(),
    }
}

fn value_to_literal(value: &Value) -> ast::Value {
    match value {
        Value::Null => ast::Value::Null,
        Value::Boolean(b) => ast::Value::Boolean(*b),
        Value::Int(i) => ast::Value::Int(*i),
        Value::Float(f) => ast::Value::Float(*f),
        Value::String(s) => ast::Value::String(s.clone()),
        Value::Enum(name) => ast::Value::Enum(name.clone()),
        Value::List(items) => ast::Value::List(items.iter().map(value_to_literal).collect()),
        Value::Object(fields) => ast::Value::Object(
            fields
                .iter()
                .map(|(name, value)| (name.clone(), value_to_literal(value)))
                .collect(),
        ),
    }
}
