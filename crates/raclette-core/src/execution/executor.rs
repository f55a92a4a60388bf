use crate::EngineConfig;
use crate::Value;
use crate::coercion::coerce_arguments;
use crate::coercion::serialize_leaf;
use crate::directives;
use crate::execution::Context;
use crate::execution::FieldError;
use crate::execution::GraphQLError;
use crate::execution::PreparedDocument;
use crate::execution::ResolveInfo;
use crate::execution::ResolverMap;
use crate::execution::ResolverParams;
use crate::execution::Response;
use crate::execution::ResponsePath;
use crate::execution::field_collection::FieldGroup;
use crate::execution::field_collection::Occurrence;
use crate::execution::field_collection::group_fields;
use crate::introspection;
use crate::schema::Schema;
use crate::types::Field;
use crate::types::GraphQLType;
use crate::types::TypeAnnotation;
use futures::FutureExt;
use futures::future::BoxFuture;
use futures::future::join_all;
use indexmap::IndexMap;
use raclette_parser::ast;
use std::sync::Arc;
use std::sync::Mutex;
use std::sync::PoisonError;

/// Marks a field whose value is null at a non-null position. The error is
/// already recorded; the null propagates to the nearest nullable parent.
#[derive(Debug)]
struct NullBubble;

type Completion = Result<Value, NullBubble>;

/// Field errors of one execution, kept with the ordinals of their response
/// path so they can be ordered by selection declaration.
pub(crate) struct ErrorCollector {
    errors: Mutex<Vec<(Vec<usize>, GraphQLError)>>,
}
impl ErrorCollector {
    pub(crate) fn new() -> Self {
        Self {
            errors: Mutex::new(vec![]),
        }
    }

    fn push(&self, path: &ResponsePath, error: GraphQLError) {
        self.errors
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .push((path.ordinals(), error));
    }

    fn into_sorted(self, max_errors: Option<usize>) -> Vec<GraphQLError> {
        let mut errors = self.errors.into_inner().unwrap_or_else(PoisonError::into_inner);
        errors.sort_by(|(a, _), (b, _)| a.cmp(b));
        let mut errors: Vec<GraphQLError> = errors.into_iter().map(|(_, err)| err).collect();
        if let Some(max) = max_errors {
            errors.truncate(max);
        }
        errors
    }
}

/// The state of one execution: one request, or one subscription event.
pub(crate) struct ExecutionContext<'a> {
    pub(crate) config: &'a EngineConfig,
    pub(crate) context: Context,
    pub(crate) errors: ErrorCollector,
    /// Set while executing a subscription event: root fields without a
    /// resolver read their value from the event.
    pub(crate) is_subscription_event: bool,
    pub(crate) operation: &'a ast::OperationDefinition,
    pub(crate) prepared: &'a PreparedDocument,
    pub(crate) resolvers: &'a ResolverMap,
    pub(crate) schema: &'a Schema,
    pub(crate) variables: IndexMap<String, Value>,
}
impl<'a> ExecutionContext<'a> {
    fn record(&self, path: &ResponsePath, fields: &[Arc<ast::Field>], message: impl Into<String>) {
        self.record_field_error(path, fields, FieldError::new(message));
    }

    fn record_field_error(&self, path: &ResponsePath, fields: &[Arc<ast::Field>], err: FieldError) {
        tracing::trace!(path = %path, message = %err.message, "field error");
        let error = self.located_error(path, fields, err);
        self.errors.push(path, error);
    }

    /// Turns `err` into a response error at `path`, located at the first of
    /// `fields`, and passes it through the error coercer.
    pub(crate) fn located_error(&self, path: &ResponsePath, fields: &[Arc<ast::Field>], err: FieldError) -> GraphQLError {
        let mut error = GraphQLError::new(err.message).with_path(path.to_vec());
        if let Some(field) = fields.first() {
            error = error.at(field.position);
        }
        error.extensions = err.extensions;
        match &self.resolvers.error_coercer {
            Some(coercer) => coercer.coerce(error),
            None => error,
        }
    }

    /// The root fields of the operation that survive `@skip`/`@include`,
    /// merged by response key.
    pub(crate) fn root_fields(&self, root_type_name: &str) -> Vec<FieldGroup> {
        let root_fields = self
            .prepared
            .collect_fields(self.schema, root_type_name, &self.operation.selection_set);
        group_fields([root_fields.as_slice()], &self.variables)
    }

    /// Merges the sub-selections of `fields` for values of `type_name`.
    fn collect_subfields(&self, type_name: &str, fields: &[Arc<ast::Field>]) -> Vec<FieldGroup> {
        let collected: Vec<Arc<Vec<Occurrence>>> = fields
            .iter()
            .filter_map(|field| field.selection_set.as_ref())
            .map(|selection_set| self.prepared.collect_fields(self.schema, type_name, selection_set))
            .collect();
        group_fields(collected.iter().map(|occurrences| occurrences.as_slice()), &self.variables)
    }
}

/// Runs the selected operation with `root_value` as the parent of its root
/// fields. The root type must exist.
pub(crate) async fn execute_operation(ctx: ExecutionContext<'_>, root_type_name: &str, root_value: Value) -> Response {
    let operation = ctx.operation;
    let groups = ctx.root_fields(root_type_name);
    let serial = operation.kind == ast::OperationKind::Mutation && ctx.config.serial_mutations;
    tracing::debug!(
        kind = %operation.kind,
        name = operation.name.as_deref().unwrap_or(""),
        root_fields = groups.len(),
        serial,
        "executing operation",
    );

    let data = execute_fields(
        &ctx,
        root_type_name,
        Arc::new(root_value),
        &groups,
        &ResponsePath::default(),
        serial,
    )
    .await
    .unwrap_or(Value::Null);

    Response {
        data: Some(data),
        errors: ctx.errors.into_sorted(ctx.config.max_errors),
        extensions: None,
    }
}

/// The response to a subscription event that failed at its source: each
/// root field is null, with `err` recorded on it.
pub(crate) fn event_error_response(ctx: ExecutionContext<'_>, root_type_name: &str, err: FieldError) -> Response {
    let groups = ctx.root_fields(root_type_name);
    let mut data = IndexMap::with_capacity(groups.len());
    let mut bubbled = false;
    for (ordinal, group) in groups.iter().enumerate() {
        let path = ResponsePath::default().key(&group.response_key, ordinal);
        ctx.record_field_error(&path, &group.fields, err.clone());
        bubbled |= ctx
            .schema
            .field_def(root_type_name, &group.first().name)
            .is_some_and(|def| !def.type_annotation().nullable());
        data.insert(group.response_key.clone(), Value::Null);
    }

    Response {
        data: Some(if bubbled { Value::Null } else { Value::Object(data) }),
        errors: ctx.errors.into_sorted(ctx.config.max_errors),
        extensions: None,
    }
}

async fn execute_fields(
    ctx: &ExecutionContext<'_>,
    type_name: &str,
    parent: Arc<Value>,
    groups: &[FieldGroup],
    path: &ResponsePath,
    serial: bool,
) -> Completion {
    let results = if serial {
        let mut results = Vec::with_capacity(groups.len());
        for (ordinal, group) in groups.iter().enumerate() {
            results.push(execute_field(ctx, type_name, &parent, group, path.key(&group.response_key, ordinal)).await);
        }
        results
    } else {
        join_all(groups.iter().enumerate().map(|(ordinal, group)| {
            execute_field(ctx, type_name, &parent, group, path.key(&group.response_key, ordinal))
        }))
        .await
    };

    let mut object = IndexMap::with_capacity(groups.len());
    for (group, result) in groups.iter().zip(results) {
        object.insert(group.response_key.clone(), result?);
    }
    Ok(Value::Object(object))
}

async fn execute_field(
    ctx: &ExecutionContext<'_>,
    parent_type_name: &str,
    parent: &Arc<Value>,
    group: &FieldGroup,
    path: ResponsePath,
) -> Completion {
    let field_name = group.first().name.as_str();
    if field_name == "__typename" {
        return Ok(Value::String(parent_type_name.to_string()));
    }
    let Some(field_def) = ctx.schema.field_def(parent_type_name, field_name) else {
        ctx.record(
            &path,
            &group.fields,
            format!("Cannot query field \"{field_name}\" on type \"{parent_type_name}\"."),
        );
        return Ok(Value::Null);
    };

    let info = ResolveInfo {
        field_name: field_name.to_string(),
        field_nodes: group.fields.clone(),
        parent_type_name: parent_type_name.to_string(),
        path: path.clone(),
        return_type: field_def.type_annotation().clone(),
    };
    tracing::trace!(path = %path, "resolving field");

    let resolved = match resolve_field_value(ctx, field_def, parent, &info).await {
        Ok(value) => apply_field_directives(ctx, field_def, &group.fields, value, &info),
        Err(err) => Err(err),
    };
    match resolved {
        Ok(value) => complete_value(ctx, &info.return_type, &info, path, value).await,
        Err(err) => {
            ctx.record_field_error(&path, &group.fields, err);
            if info.return_type.nullable() {
                Ok(Value::Null)
            } else {
                Err(NullBubble)
            }
        }
    }
}

async fn resolve_field_value(
    ctx: &ExecutionContext<'_>,
    field_def: &Field,
    parent: &Arc<Value>,
    info: &ResolveInfo,
) -> Result<Value, FieldError> {
    let field_node = &info.field_nodes[0];
    let arguments = coerce_arguments(field_def.parameters(), &field_node.arguments, &ctx.variables, ctx.schema)
        .map_err(|err| FieldError::new(err.to_string()))?;
    let arguments = directives::apply_argument_hooks(ctx.resolvers, ctx.schema, field_def.parameters(), arguments)?;

    if introspection::resolves(ctx.schema, &info.parent_type_name, &info.field_name) {
        return introspection::resolve_field(
            ctx.schema,
            ctx.resolvers,
            &info.parent_type_name,
            &info.field_name,
            parent,
            &arguments,
        );
    }

    let params = ResolverParams {
        arguments,
        context: ctx.context.clone(),
        info: info.clone(),
        parent: parent.clone(),
    };
    if let Some(resolver) = ctx.resolvers.field(&info.parent_type_name, &info.field_name) {
        return resolver.resolve(params).await;
    }
    if ctx.is_subscription_event && info.path.depth() == 1 {
        return Ok(match parent.get(&info.field_name) {
            Some(value) => value.clone(),
            None => Value::clone(parent),
        });
    }
    if let Some(default_resolver) = &ctx.resolvers.default_resolver {
        return default_resolver.resolve(params).await;
    }
    Ok(parent.get(&info.field_name).cloned().unwrap_or_default())
}

/// Runs `on_field_resolved` for the directives of the schema field
/// definition, then for those written on each occurrence of the field in
/// the query. A directive repeated verbatim on several merged occurrences
/// runs once.
fn apply_field_directives(
    ctx: &ExecutionContext<'_>,
    field_def: &Field,
    field_nodes: &[Arc<ast::Field>],
    mut value: Value,
    info: &ResolveInfo,
) -> Result<Value, FieldError> {
    for (directive_impl, args) in directives::bound_directives(ctx.resolvers, ctx.schema, field_def.directives())? {
        value = directive_impl.on_field_resolved(&args, value, info)?;
    }

    let mut applied: Vec<&ast::DirectiveAnnotation> = vec![];
    for annotation in field_nodes.iter().flat_map(|node| &node.directives) {
        if applied.iter().any(|seen| same_annotation(seen, annotation)) {
            continue;
        }
        applied.push(annotation);
        let (Some(directive_impl), Some(directive_def)) = (
            ctx.resolvers.directive(&annotation.name),
            ctx.schema.directive(&annotation.name),
        ) else {
            continue;
        };
        let args = coerce_arguments(directive_def.parameters(), &annotation.arguments, &ctx.variables, ctx.schema)
            .map_err(|err| FieldError::new(err.to_string()))?;
        value = directive_impl.on_field_resolved(&args, value, info)?;
    }
    Ok(value)
}

fn same_annotation(a: &ast::DirectiveAnnotation, b: &ast::DirectiveAnnotation) -> bool {
    a.name == b.name
        && a.arguments.len() == b.arguments.len()
        && a.arguments
            .iter()
            .zip(&b.arguments)
            .all(|(a, b)| a.name == b.name && a.value == b.value)
}

/// Completes `value` against `annot`, recording an error and bubbling when
/// a null ends up at a non-null position.
fn complete_value<'a>(
    ctx: &'a ExecutionContext<'a>,
    annot: &'a TypeAnnotation,
    info: &'a ResolveInfo,
    path: ResponsePath,
    value: Value,
) -> BoxFuture<'a, Completion> {
    async move {
        let completed = match (annot, value) {
            (_, Value::Null) => Ok(Value::Null),

            (TypeAnnotation::List(list_annot), Value::List(items)) => {
                let inner = list_annot.inner_type_annotation();
                let items = join_all(
                    items
                        .into_iter()
                        .enumerate()
                        .map(|(idx, item)| complete_value(ctx, inner, info, path.index(idx), item)),
                )
                .await;
                items.into_iter().collect::<Result<Vec<_>, _>>().map(Value::List)
            }

            (TypeAnnotation::List(_), _) => {
                ctx.record(
                    &path,
                    &info.field_nodes,
                    format!(
                        "Expected Iterable, but did not find one for field {}.{}.",
                        info.parent_type_name, info.field_name,
                    ),
                );
                Err(NullBubble)
            }

            (TypeAnnotation::Named(named), value) => {
                complete_named_value(ctx, named.graphql_type_name(), info, &path, value).await
            }
        };

        match completed {
            Ok(Value::Null) if !annot.nullable() => {
                ctx.record(
                    &path,
                    &info.field_nodes,
                    format!(
                        "Cannot return null for non-nullable field {}.{}.",
                        info.parent_type_name, info.field_name,
                    ),
                );
                Err(NullBubble)
            }
            Err(NullBubble) if annot.nullable() => Ok(Value::Null),
            other => other,
        }
    }
    .boxed()
}

async fn complete_named_value(
    ctx: &ExecutionContext<'_>,
    type_name: &str,
    info: &ResolveInfo,
    path: &ResponsePath,
    value: Value,
) -> Completion {
    let Some(type_) = ctx.schema.lookup(type_name) else {
        ctx.record(path, &info.field_nodes, format!("Unknown type \"{type_name}\"."));
        return Err(NullBubble);
    };
    let value = match apply_output_hooks(ctx, type_, value, info, path)? {
        Value::Null => return Ok(Value::Null),
        value => value,
    };

    if type_.is_leaf() {
        return serialize_leaf(&value, type_, ctx.schema).map_err(|err| {
            ctx.record(path, &info.field_nodes, err.to_string());
            NullBubble
        });
    }

    let object_type_name = if type_.is_abstract() {
        match resolve_runtime_type(ctx, type_, &value, info) {
            Ok(name) => name,
            Err(message) => {
                ctx.record(path, &info.field_nodes, message);
                return Err(NullBubble);
            }
        }
    } else {
        type_.name().to_string()
    };
    let value = match ctx.schema.lookup(&object_type_name) {
        Some(object_type) if type_.is_abstract() => match apply_output_hooks(ctx, object_type, value, info, path)? {
            Value::Null => return Ok(Value::Null),
            value => value,
        },
        _ => value,
    };

    let groups = ctx.collect_subfields(&object_type_name, &info.field_nodes);
    execute_fields(ctx, &object_type_name, Arc::new(value), &groups, path, false).await
}

/// Runs the `on_pre_output_coercion` hooks of `type_`, recording a hook
/// failure as a field error.
fn apply_output_hooks(
    ctx: &ExecutionContext<'_>,
    type_: &GraphQLType,
    value: Value,
    info: &ResolveInfo,
    path: &ResponsePath,
) -> Completion {
    directives::apply_output_hooks(ctx.resolvers, ctx.schema, type_, value, info).map_err(|err| {
        ctx.record_field_error(path, &info.field_nodes, err);
        NullBubble
    })
}

/// Picks the object type of a value at an interface or union position:
/// the bound type resolver if any, the value's `__typename` otherwise.
fn resolve_runtime_type(
    ctx: &ExecutionContext<'_>,
    abstract_type: &GraphQLType,
    value: &Value,
    info: &ResolveInfo,
) -> Result<String, String> {
    let abstract_name = abstract_type.name();
    let resolved = match ctx.resolvers.type_resolver(abstract_name) {
        Some(type_resolver) => type_resolver.resolve_type(value, info),
        None => value.typename().map(str::to_string),
    };
    let Some(object_type_name) = resolved else {
        return Err(format!(
            "Abstract type \"{abstract_name}\" must resolve to an Object type at runtime for field \"{}.{}\". \
            Either the \"{abstract_name}\" type should have a type resolver or the value should carry a \
            \"__typename\" key.",
            info.parent_type_name, info.field_name,
        ));
    };

    match ctx.schema.lookup(&object_type_name) {
        Some(GraphQLType::Object(_)) if ctx.schema.is_subtype(&object_type_name, abstract_name) => {
            Ok(object_type_name)
        }
        Some(GraphQLType::Object(_)) => Err(format!(
            "Runtime Object type < {object_type_name} > is not a possible type for < {abstract_name} >.",
        )),
        _ => Err(format!(
            "Abstract type \"{abstract_name}\" was resolved to a type \"{object_type_name}\" that does not exist \
            inside the schema.",
        )),
    }
}
