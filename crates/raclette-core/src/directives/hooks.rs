use crate::Value;
use crate::directives::DirectiveImpl;
use crate::directives::coerce_annotation_arguments;
use crate::execution::FieldError;
use crate::execution::ResolveInfo;
use crate::execution::ResolverMap;
use crate::schema::Schema;
use crate::types::DirectiveAnnotation;
use crate::types::EnumValue;
use crate::types::GraphQLType;
use crate::types::Parameter;
use crate::types::TypeAnnotation;
use indexmap::IndexMap;
use std::sync::Arc;

type BoundDirective<'r> = (&'r Arc<dyn DirectiveImpl>, IndexMap<String, Value>);

/// The implementations bound to `annotations`, in the order the directives
/// are applied, each with its coerced arguments.
pub(crate) fn bound_directives<'r>(
    resolvers: &'r ResolverMap,
    schema: &Schema,
    annotations: &[DirectiveAnnotation],
) -> Result<Vec<BoundDirective<'r>>, FieldError> {
    let mut bound = vec![];
    for annotation in annotations {
        let (Some(directive_impl), Some(directive_def)) = (
            resolvers.directive(annotation.name()),
            schema.directive(annotation.name()),
        ) else {
            continue;
        };
        let args = coerce_annotation_arguments(directive_def, annotation, schema)
            .map_err(|err| FieldError::new(err.to_string()))?;
        bound.push((directive_impl, args));
    }
    Ok(bound)
}

/// Runs the input hooks over coerced field arguments: the value hooks of
/// each argument (see [`apply_input_hooks`]), then `on_argument_coerced`
/// for the directives on the argument definition.
pub(crate) fn apply_argument_hooks(
    resolvers: &ResolverMap,
    schema: &Schema,
    params: &IndexMap<String, Parameter>,
    mut arguments: IndexMap<String, Value>,
) -> Result<IndexMap<String, Value>, FieldError> {
    if resolvers.directives.is_empty() {
        return Ok(arguments);
    }
    for (name, param) in params {
        let Some(value) = arguments.get_mut(name) else {
            continue;
        };
        let mut coerced = apply_input_hooks(resolvers, schema, param.type_annotation(), std::mem::take(value))?;
        for (directive_impl, args) in bound_directives(resolvers, schema, param.directives())? {
            coerced = directive_impl.on_argument_coerced(&args, coerced)?;
        }
        *value = coerced;
    }
    Ok(arguments)
}

/// Runs `on_post_input_coercion` over a coerced input value, innermost
/// first: the fields of an input object (their own value, then the
/// directives of the input field definition), then the enum value
/// definition, then the named type.
pub(crate) fn apply_input_hooks(
    resolvers: &ResolverMap,
    schema: &Schema,
    annot: &TypeAnnotation,
    value: Value,
) -> Result<Value, FieldError> {
    if value.is_null() {
        return Ok(value);
    }
    let (named, value) = match (annot, value) {
        (TypeAnnotation::List(list_annot), Value::List(items)) => {
            let inner = list_annot.inner_type_annotation();
            return items
                .into_iter()
                .map(|item| apply_input_hooks(resolvers, schema, inner, item))
                .collect::<Result<Vec<_>, _>>()
                .map(Value::List);
        }
        (TypeAnnotation::List(_), value) => return Ok(value),
        (TypeAnnotation::Named(named), value) => (named, value),
    };
    let Some(type_) = schema.lookup(named.graphql_type_name()) else {
        return Ok(value);
    };

    let mut value = match (type_, value) {
        (GraphQLType::InputObject(input_type), Value::Object(mut fields)) => {
            for (field_name, field_def) in input_type.fields() {
                let Some(field_value) = fields.get_mut(field_name) else {
                    continue;
                };
                let mut coerced =
                    apply_input_hooks(resolvers, schema, field_def.type_annotation(), std::mem::take(field_value))?;
                for (directive_impl, args) in bound_directives(resolvers, schema, field_def.directives())? {
                    coerced = directive_impl.on_post_input_coercion(&args, coerced)?;
                }
                *field_value = coerced;
            }
            Value::Object(fields)
        }
        (_, value) => value,
    };

    for (directive_impl, args) in bound_directives(resolvers, schema, enum_value_directives(type_, &value))? {
        value = directive_impl.on_post_input_coercion(&args, value)?;
    }
    for (directive_impl, args) in bound_directives(resolvers, schema, type_.directives())? {
        value = directive_impl.on_post_input_coercion(&args, value)?;
    }
    Ok(value)
}

/// Runs `on_pre_output_coercion` for the directives of the type `value`
/// completes as, then for those of its enum value definition.
pub(crate) fn apply_output_hooks(
    resolvers: &ResolverMap,
    schema: &Schema,
    type_: &GraphQLType,
    mut value: Value,
    info: &ResolveInfo,
) -> Result<Value, FieldError> {
    if resolvers.directives.is_empty() {
        return Ok(value);
    }
    for (directive_impl, args) in bound_directives(resolvers, schema, type_.directives())? {
        value = directive_impl.on_pre_output_coercion(&args, value, info)?;
    }
    for (directive_impl, args) in bound_directives(resolvers, schema, enum_value_directives(type_, &value))? {
        value = directive_impl.on_pre_output_coercion(&args, value, info)?;
    }
    Ok(value)
}

/// Runs `on_introspection` for `annotations` over an introspection element;
/// `None` once a hook hides it.
pub(crate) fn apply_introspection_hooks(
    resolvers: &ResolverMap,
    schema: &Schema,
    annotations: &[DirectiveAnnotation],
    element: Value,
) -> Result<Option<Value>, FieldError> {
    let mut element = element;
    for (directive_impl, args) in bound_directives(resolvers, schema, annotations)? {
        match directive_impl.on_introspection(&args, element)? {
            Some(next) => element = next,
            None => return Ok(None),
        }
    }
    Ok(Some(element))
}

fn enum_value_directives<'s>(type_: &'s GraphQLType, value: &Value) -> &'s [DirectiveAnnotation] {
    let name = match value {
        Value::Enum(name) | Value::String(name) => name,
        _ => return &[],
    };
    type_
        .as_enum()
        .and_then(|enum_type| enum_type.value(name))
        .map(EnumValue::directives)
        .unwrap_or_default()
}
