use crate::Value;
use crate::coercion::BuiltinScalar;
use crate::coercion::CoercionError;
use crate::coercion::InputPathSegment;
use crate::coercion::coerce_literal;
use crate::schema::Schema;
use crate::types::GraphQLType;
use crate::types::InputObjectType;
use crate::types::TypeAnnotation;
use indexmap::IndexMap;

/// Coerces an externally supplied value (typically a JSON variable) to the
/// internal representation of `type_annotation`.
///
/// Enum values arrive as strings and come out as [`Value::Enum`]. A
/// non-list value supplied where a list is expected becomes a one-element
/// list. Input objects come out with their fields in declaration order and
/// defaults applied.
pub fn coerce_input_value(
    value: &Value,
    type_annotation: &TypeAnnotation,
    schema: &Schema,
    path: &[InputPathSegment],
) -> Result<Value, CoercionError> {
    if value.is_null() {
        return if type_annotation.nullable() {
            Ok(Value::Null)
        } else {
            Err(CoercionError::new(format!(
                "Expected non-nullable type < {type_annotation} > not to be null",
            ))
            .at(path))
        };
    }

    match type_annotation {
        TypeAnnotation::List(list_annot) => {
            let inner = list_annot.inner_type_annotation();
            match value {
                Value::List(items) => items
                    .iter()
                    .enumerate()
                    .map(|(idx, item)| {
                        let mut item_path = path.to_vec();
                        item_path.push(InputPathSegment::Index(idx));
                        coerce_input_value(item, inner, schema, &item_path)
                    })
                    .collect::<Result<Vec<_>, _>>()
                    .map(Value::List),
                single => Ok(Value::List(vec![coerce_input_value(single, inner, schema, path)?])),
            }
        }

        TypeAnnotation::Named(named_annot) => {
            let type_name = named_annot.graphql_type_name();
            let Some(type_) = schema.lookup(type_name) else {
                return Err(CoercionError::new(format!("Unknown type < {type_name} >")).at(path));
            };
            coerce_named_input_value(value, type_, schema, path)
        }
    }
}

fn coerce_named_input_value(
    value: &Value,
    type_: &GraphQLType,
    schema: &Schema,
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
            scalar.parse_value(value).ok_or_else(expected_type)
        }

        GraphQLType::Scalar(scalar_type) => match schema.scalar_impl(scalar_type.name()) {
            Some(scalar_impl) => scalar_impl
                .parse_value(value)
                .map_err(|err| expected_type().with_reason(err.message())),
            None => Err(expected_type()),
        },

        GraphQLType::Enum(enum_type) => match value {
            Value::String(name) | Value::Enum(name) if enum_type.value(name).is_some() => {
                Ok(Value::Enum(name.clone()))
            }
            _ => Err(expected_type()),
        },

        GraphQLType::InputObject(input_type) => {
            let Value::Object(fields) = value else {
                return Err(CoercionError::new(format!(
                    "Expected type < {} > to be an object",
                    input_type.name(),
                ))
                .at(path));
            };
            coerce_input_object_fields(fields, input_type, schema, path)
        }

        GraphQLType::Interface(_) | GraphQLType::Object(_) | GraphQLType::Union(_) => {
            Err(CoercionError::new(format!(
                "Type < {} > can not be used as an input type",
                type_.name(),
            ))
            .at(path))
        }
    }
}

fn coerce_input_object_fields(
    fields: &IndexMap<String, Value>,
    input_type: &InputObjectType,
    schema: &Schema,
    path: &[InputPathSegment],
) -> Result<Value, CoercionError> {
    if let Some(unknown) = fields.keys().find(|name| input_type.field(name).is_none()) {
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

        match fields.get(field_name) {
            Some(field_value) => {
                let field_value =
                    coerce_input_value(field_value, field_def.type_annotation(), schema, &field_path)?;
                coerced.insert(field_name.to_string(), field_value);
            }

            None => {
                if let Some(default_value) = field_def.default_value() {
                    let field_value = coerce_literal(
                        default_value,
                        field_def.type_annotation(),
                        schema,
                        &IndexMap::new(),
                    )?;
                    coerced.insert(field_name.to_string(), field_value);
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
