use crate::Value;
use crate::coercion::CoercionError;
use crate::coercion::coerce_literal;
use crate::schema::Schema;
use crate::types::Parameter;
use indexmap::IndexMap;
use raclette_parser::ast;

/// Coerces the arguments written on a field or directive against its
/// parameter definitions.
///
/// Parameters are visited in declaration order. Omitted parameters take
/// their default value when they have one and are left out of the result
/// otherwise, so resolvers can tell "not provided" apart from `null`.
pub fn coerce_arguments(
    params: &IndexMap<String, Parameter>,
    arguments: &[ast::Argument],
    variables: &IndexMap<String, Value>,
    schema: &Schema,
) -> Result<IndexMap<String, Value>, CoercionError> {
    let mut coerced = IndexMap::new();

    for (name, param) in params {
        let arg_type = param.type_annotation();
        let argument = arguments.iter().find(|arg| arg.name == *name);

        let (has_value, is_null) = match argument.map(|arg| &arg.value) {
            Some(ast::Value::Variable(var_name)) => match variables.get(var_name) {
                Some(value) => (true, value.is_null()),
                None => (false, false),
            },
            Some(ast::Value::Null) => (true, true),
            Some(_) => (true, false),
            None => (false, false),
        };

        if !has_value {
            if let Some(default_value) = param.default_value() {
                let value = coerce_literal(default_value, arg_type, schema, &IndexMap::new())?;
                coerced.insert(name.to_string(), value);
            } else if !arg_type.nullable() {
                return Err(CoercionError::new(match argument.map(|arg| &arg.value) {
                    Some(ast::Value::Variable(var_name)) => format!(
                        "Argument < {name} > of required type < {arg_type} > was provided the \
                        variable < ${var_name} > which was not provided a runtime value.",
                    ),
                    _ => format!("Argument < {name} > of required type < {arg_type} > was not provided."),
                }));
            }
            continue;
        }

        if is_null && !arg_type.nullable() {
            return Err(CoercionError::new(format!(
                "Argument < {name} > of non-null type < {arg_type} > must not be null.",
            )));
        }

        let Some(argument) = argument else { continue };
        let value = match &argument.value {
            ast::Value::Null => Value::Null,
            ast::Value::Variable(var_name) => variables.get(var_name).cloned().unwrap_or_default(),
            literal => coerce_literal(literal, arg_type, schema, variables).map_err(|err| {
                CoercionError::new(format!("Argument < {name} > has invalid value < {literal} >"))
                    .with_reason(err.to_string())
            })?,
        };
        coerced.insert(name.to_string(), value);
    }

    Ok(coerced)
}
