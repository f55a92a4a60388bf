//! Subscription operations.
//!
//! The root field's [`SubscriptionResolver`](crate::execution::SubscriptionResolver)
//! produces an event source; every event is executed as the root value of a
//! fresh execution, yielding one [`Response`] per event.

use crate::Value;
use crate::coercion::coerce_arguments;
use crate::directives::apply_argument_hooks;
use crate::engine::Engine;
use crate::engine::Request;
use crate::engine::RequestError;
use crate::execution::EventStream;
use crate::execution::ExecutionContext;
use crate::execution::FieldError;
use crate::execution::PreparedDocument;
use crate::execution::ResolveInfo;
use crate::execution::ResolverParams;
use crate::execution::Response;
use crate::execution::ResponsePath;
use crate::execution::event_error_response;
use crate::execution::execute_operation;
use futures::FutureExt;
use futures::StreamExt;
use futures::future;
use futures::future::BoxFuture;
use futures::stream;
use futures::stream::BoxStream;
use indexmap::IndexMap;
use raclette_parser::ast;
use std::sync::Arc;
use tracing::Instrument;

pub(crate) fn subscribe(engine: Engine, request: Request) -> BoxStream<'static, Response> {
    let span = tracing::debug_span!(
        "subscribe",
        operation = request.operation_name.as_deref().unwrap_or_default(),
    );
    stream::once(start(engine, request).instrument(span))
        .flat_map(|started| match started {
            Ok(responses) => responses,
            Err(response) => single(response),
        })
        .boxed()
}

fn single(response: Response) -> BoxStream<'static, Response> {
    stream::once(future::ready(response)).boxed()
}

/// Everything an event needs to be executed, owned by the response stream.
struct EventExecutor {
    context: crate::execution::Context,
    engine: Engine,
    events: usize,
    operation_name: Option<String>,
    prepared: Arc<PreparedDocument>,
    variables: IndexMap<String, Value>,
}
impl EventExecutor {
    async fn execute(
        engine: Engine,
        prepared: Arc<PreparedDocument>,
        operation_name: Option<String>,
        variables: IndexMap<String, Value>,
        context: crate::execution::Context,
        event: Result<Value, FieldError>,
    ) -> Response {
        let operation = match prepared.operation(operation_name.as_deref()) {
            Ok(operation) => operation,
            Err(err) => return engine.error_response(RequestError::Operation(err)),
        };
        let Some(root_type) = engine.schema().root_type(operation.kind) else {
            return Response::from_errors(vec![]);
        };
        let ctx = ExecutionContext {
            config: engine.config(),
            context,
            errors: crate::execution::ErrorCollector::new(),
            is_subscription_event: true,
            operation,
            prepared: &prepared,
            resolvers: engine.resolvers(),
            schema: engine.schema(),
            variables,
        };
        match event {
            Ok(event) => execute_operation(ctx, root_type.name(), event).await,
            Err(err) => event_error_response(ctx, root_type.name(), err),
        }
    }

    fn next_event(&mut self, event: Result<Value, FieldError>) -> BoxFuture<'static, Response> {
        self.events += 1;
        tracing::trace!(event = self.events, "subscription event");
        Self::execute(
            self.engine.clone(),
            self.prepared.clone(),
            self.operation_name.clone(),
            self.variables.clone(),
            self.context.clone(),
            event,
        )
        .boxed()
    }
}
impl Drop for EventExecutor {
    fn drop(&mut self) {
        tracing::debug!(
            operation = self.operation_name.as_deref().unwrap_or_default(),
            events = self.events,
            "subscription stopped",
        );
    }
}

/// Prepares the request and opens the event source; `Err` carries the
/// single response to send instead.
async fn start(engine: Engine, request: Request) -> Result<BoxStream<'static, Response>, Response> {
    let prepared = engine.prepare(&request.query)?;

    let (source, variables) = {
        let selected = engine
            .select_operation(&prepared, &request)
            .map_err(|err| engine.error_response(err))?;
        if selected.operation.kind != ast::OperationKind::Subscription {
            let root_type_name = selected.root_type_name;
            let ctx = engine.execution_context(&prepared, selected, request.context.clone(), false);
            let response = execute_operation(ctx, root_type_name, request.root_value.clone()).await;
            return Ok(single(response));
        }

        let root_type_name = selected.root_type_name;
        let ctx = engine.execution_context(&prepared, selected, request.context.clone(), false);
        let source = open_event_source(&ctx, root_type_name, request.root_value.clone()).await?;
        (source, ctx.variables)
    };

    tracing::debug!(operation = request.operation_name.as_deref().unwrap_or_default(), "subscription started");
    let mut executor = EventExecutor {
        context: request.context,
        engine,
        events: 0,
        operation_name: request.operation_name,
        prepared,
        variables,
    };
    Ok(source.then(move |event| executor.next_event(event)).boxed())
}

/// Runs the subscription resolver of the operation's root field.
async fn open_event_source(
    ctx: &ExecutionContext<'_>,
    root_type_name: &str,
    root_value: Value,
) -> Result<EventStream, Response> {
    let groups = ctx.root_fields(root_type_name);
    let Some(group) = groups.first() else {
        // Every root field was skipped.
        return Err(Response {
            data: Some(Value::object()),
            ..Response::default()
        });
    };
    let field = group.first();
    let path = ResponsePath::default().key(&group.response_key, 0);
    let fail = |err: FieldError| Response::from_errors(vec![ctx.located_error(&path, &group.fields, err)]);

    let Some(field_def) = ctx.schema.field_def(root_type_name, &field.name) else {
        return Err(fail(FieldError::new(format!(
            "Cannot query field \"{}\" on type \"{root_type_name}\".",
            field.name,
        ))));
    };
    let Some(resolver) = ctx.resolvers.subscription(root_type_name, &field.name) else {
        return Err(fail(FieldError::new(format!(
            "Subscription field \"{root_type_name}.{}\" has no subscription resolver.",
            field.name,
        ))));
    };
    let arguments = coerce_arguments(field_def.parameters(), &field.arguments, &ctx.variables, ctx.schema)
        .map_err(|err| fail(FieldError::new(err.to_string())))?;
    let arguments = apply_argument_hooks(ctx.resolvers, ctx.schema, field_def.parameters(), arguments).map_err(fail)?;

    let params = ResolverParams {
        arguments,
        context: ctx.context.clone(),
        info: ResolveInfo {
            field_name: field.name.clone(),
            field_nodes: group.fields.clone(),
            parent_type_name: root_type_name.to_string(),
            path: path.clone(),
            return_type: field_def.type_annotation().clone(),
        },
        parent: Arc::new(root_value),
    };
    resolver.subscribe(params).map(|opened| opened.map_err(fail)).await
}
