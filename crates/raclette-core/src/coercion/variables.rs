use crate::Value;
use crate::coercion::CoercionError;
use crate::coercion::coerce_input_value;
use crate::coercion::coerce_literal;
use crate::schema::Schema;
use crate::types::TypeAnnotation;
use indexmap::IndexMap;
use raclette_parser::ast;

/// Coerces the raw variable values supplied with a request against the
/// variable definitions of `operation`.
///
/// Omitted variables take their default value; omitted variables without a
/// default are left out of the result. Every failing variable contributes
/// one error, in definition order.
pub fn coerce_variables(
    schema: &Schema,
    operation: &ast::OperationDefinition,
    raw_variables: &IndexMap<String, Value>,
) -> Result<IndexMap<String, Value>, Vec<(ast::AstPos, CoercionError)>> {
    let mut coerced = IndexMap::new();
    let mut errors = vec![];

    for var_def in &operation.variable_definitions {
        let var_name = &var_def.name;
        let var_type = TypeAnnotation::from_ast_type(&var_def.var_type);

        if schema
            .lookup(var_type.innermost_type_name())
            .is_none_or(|type_| !type_.is_input_type())
        {
            errors.push((
                var_def.position,
                CoercionError::new(format!(
                    "Variable < ${var_name} > expected value of type < {var_type} > which \
                    cannot be used as an input type.",
                )),
            ));
            continue;
        }

        let raw_value = raw_variables.get(var_name);
        if raw_value.is_none()
            && let Some(default_value) = &var_def.default_value
        {
            match coerce_literal(default_value, &var_type, schema, &IndexMap::new()) {
                Ok(value) => {
                    coerced.insert(var_name.to_string(), value);
                }
                Err(err) => errors.push((var_def.position, err)),
            }
            continue;
        }

        if raw_value.is_none_or(Value::is_null) && !var_type.nullable() {
            let message = if raw_value.is_some() {
                format!("Variable < ${var_name} > of non-null type < {var_type} > must not be null.")
            } else {
                format!("Variable < ${var_name} > of required type < {var_type} > was not provided.")
            };
            errors.push((var_def.position, CoercionError::new(message)));
            continue;
        }

        let Some(raw_value) = raw_value else { continue };
        match coerce_input_value(raw_value, &var_type, schema, &[]) {
            Ok(value) => {
                coerced.insert(var_name.to_string(), value);
            }
            Err(err) => errors.push((
                var_def.position,
                CoercionError::new(format!("Variable < ${var_name} > got invalid value < {raw_value} >"))
                    .with_reason(err.to_string()),
            )),
        }
    }

    if errors.is_empty() {
        Ok(coerced)
    } else {
        Err(errors)
    }
}
