use crate::Value;
use crate::coercion::CoercionError;
use crate::coercion::coerce_arguments;
use crate::execution::FieldError;
use crate::execution::ResolveInfo;
use crate::schema::Schema;
use crate::types::Directive;
use crate::types::DirectiveAnnotation;
use indexmap::IndexMap;
use raclette_parser::ast;

/**
 * The behavior bound to a custom directive through
 * [`EngineBuilder::directive`](crate::engine::EngineBuilder::directive).
 *
 * Every hook defaults to passing the value through unchanged, so an
 * implementation only overrides the ones it needs. `args` are the
 * directive's arguments coerced against its definition.
 *
 * Which hook runs depends on where the directive is applied:
 *
 * | Applied on | Hook |
 * | --- | --- |
 * | field definition, query field | [`on_field_resolved`](Self::on_field_resolved) |
 * | argument definition | [`on_argument_coerced`](Self::on_argument_coerced) |
 * | input field, enum value, scalar, enum, input object (input values) | [`on_post_input_coercion`](Self::on_post_input_coercion) |
 * | scalar, enum, enum value, object, interface, union (output values) | [`on_pre_output_coercion`](Self::on_pre_output_coercion) |
 * | any introspectable definition | [`on_introspection`](Self::on_introspection) |
 *
 * For a field, hooks on the schema field definition run first, then hooks
 * on every occurrence of the field in the query, each in the order the
 * directives are written.
 */
pub trait DirectiveImpl: Send + Sync {
    /// Transforms a field's resolved value before it is completed.
    fn on_field_resolved(
        &self,
        args: &IndexMap<String, Value>,
        value: Value,
        info: &ResolveInfo,
    ) -> Result<Value, FieldError> {
        let _ = (args, info);
        Ok(value)
    }

    /// Transforms the coerced value of an argument whose definition carries
    /// this directive.
    fn on_argument_coerced(
        &self,
        args: &IndexMap<String, Value>,
        value: Value,
    ) -> Result<Value, FieldError> {
        let _ = args;
        Ok(value)
    }

    /// Transforms an input value once coerced to a type, enum value or input
    /// field whose definition carries this directive. Runs for field
    /// arguments, including the values nested in lists and input objects.
    fn on_post_input_coercion(
        &self,
        args: &IndexMap<String, Value>,
        value: Value,
    ) -> Result<Value, FieldError> {
        let _ = args;
        Ok(value)
    }

    /// Transforms a value about to be completed as a type (or enum value)
    /// whose definition carries this directive. For abstract types the hooks
    /// of the abstract type run first, then those of the runtime object type.
    fn on_pre_output_coercion(
        &self,
        args: &IndexMap<String, Value>,
        value: Value,
        info: &ResolveInfo,
    ) -> Result<Value, FieldError> {
        let _ = (args, info);
        Ok(value)
    }

    /// Rewrites the introspection element (a `__Type`, `__Field`,
    /// `__InputValue` or `__EnumValue` value) of a definition carrying this
    /// directive. Returning `None` hides the definition from introspection.
    fn on_introspection(
        &self,
        args: &IndexMap<String, Value>,
        element: Value,
    ) -> Result<Option<Value>, FieldError> {
        let _ = args;
        Ok(Some(element))
    }
}

/// Coerces the literal arguments of a directive applied in the schema.
pub(crate) fn coerce_annotation_arguments(
    directive: &Directive,
    annotation: &DirectiveAnnotation,
    schema: &Schema,
) -> Result<IndexMap<String, Value>, CoercionError> {
    let arguments: Vec<ast::Argument> = annotation
        .arguments()
        .iter()
        .map(|(name, value)| ast::Argument {
            position: ast::AstPos::default(),
            name: name.clone(),
            value: value.clone(),
        })
        .collect();
    coerce_arguments(directive.parameters(), &arguments, &IndexMap::new(), schema)
}
