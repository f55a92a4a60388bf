use crate::Value;
use crate::coercion::BuiltinScalar;
use crate::coercion::CoercionError;
use crate::schema::Schema;
use crate::types::GraphQLType;

/// Serializes a resolved, non-null value of a leaf type (scalar or enum)
/// for the response.
pub fn serialize_leaf(value: &Value, leaf_type: &GraphQLType, schema: &Schema) -> Result<Value, CoercionError> {
    match leaf_type {
        GraphQLType::Bool
        | GraphQLType::Float
        | GraphQLType::ID
        | GraphQLType::Int
        | GraphQLType::String => match BuiltinScalar::from_type(leaf_type) {
            Some(scalar) => scalar.serialize(value).map_err(CoercionError::new),
            None => Err(not_a_leaf(leaf_type)),
        },

        GraphQLType::Scalar(scalar_type) => match schema.scalar_impl(scalar_type.name()) {
            Some(scalar_impl) => scalar_impl.serialize(value).map_err(|err| {
                CoercionError::new(format!("Expected a value of type < {} >", scalar_type.name()))
                    .with_reason(err.message())
            }),
            None => Err(CoercionError::new(format!(
                "No implementation registered for the < {} > scalar",
                scalar_type.name(),
            ))),
        },

        GraphQLType::Enum(enum_type) => match value.as_str() {
            Some(name) if enum_type.value(name).is_some() => Ok(Value::Enum(name.to_string())),
            _ => Err(CoercionError::new(format!(
                "Enum < {} > cannot represent value: < {value} >",
                enum_type.name(),
            ))),
        },

        GraphQLType::InputObject(_)
        | GraphQLType::Interface(_)
        | GraphQLType::Object(_)
        | GraphQLType::Union(_) => Err(not_a_leaf(leaf_type)),
    }
}

fn not_a_leaf(type_: &GraphQLType) -> CoercionError {
    CoercionError::new(format!("< {} > is not a leaf type", type_.name()))
}
