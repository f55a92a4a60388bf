use crate::Value;
use crate::execution::FieldError;
use crate::execution::GraphQLError;
use crate::execution::ResponsePath;
use crate::types::TypeAnnotation;
use futures::future::BoxFuture;
use futures::stream::BoxStream;
use indexmap::IndexMap;
use raclette_parser::ast;
use std::any::Any;
use std::future::Future;
use std::sync::Arc;

/// The user-supplied request context, shared by every resolver of one
/// request.
pub type Context = Arc<dyn Any + Send + Sync>;

/// An event source produced by a subscription resolver.
pub type EventStream = BoxStream<'static, Result<Value, FieldError>>;

/// Describes the field being resolved.
#[derive(Clone, Debug)]
pub struct ResolveInfo {
    pub field_name: String,
    /// Every selection of the field merged under this response key.
    pub field_nodes: Vec<Arc<ast::Field>>,
    pub parent_type_name: String,
    pub path: ResponsePath,
    pub return_type: TypeAnnotation,
}
impl ResolveInfo {
    /// The alias or field name the value is written under.
    pub fn response_key(&self) -> &str {
        self.field_nodes
            .first()
            .map(|field| field.response_key())
            .unwrap_or(&self.field_name)
    }
}

/// Everything a resolver gets to work with.
#[derive(Clone)]
pub struct ResolverParams {
    pub arguments: IndexMap<String, Value>,
    pub context: Context,
    pub info: ResolveInfo,
    pub parent: Arc<Value>,
}
impl ResolverParams {
    /// The coerced argument `name`; `None` when it was omitted and has no
    /// default.
    pub fn arg(&self, name: &str) -> Option<&Value> {
        self.arguments.get(name)
    }

    /// Downcasts the request context.
    pub fn context<T: Any + Send + Sync>(&self) -> Option<&T> {
        self.context.downcast_ref::<T>()
    }
}
impl std::fmt::Debug for ResolverParams {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ResolverParams")
            .field("arguments", &self.arguments)
            .field("info", &self.info)
            .field("parent", &self.parent)
            .finish_non_exhaustive()
    }
}

/// Produces the value of one field.
///
/// Implemented for every `Fn(ResolverParams) -> impl Future<Output =
/// Result<Value, FieldError>>`:
///
/// ```
/// use raclette_core::Value;
/// use raclette_core::execution::{FieldError, FieldResolver, ResolverParams};
///
/// fn assert_resolver(_: impl FieldResolver) {}
/// assert_resolver(|params: ResolverParams| async move {
///     let id = params.arg("id").cloned().unwrap_or_default();
///     Ok::<_, FieldError>(Value::object().with("id", id))
/// });
/// ```
pub trait FieldResolver: Send + Sync {
    fn resolve(&self, params: ResolverParams) -> BoxFuture<'static, Result<Value, FieldError>>;
}
impl<F, Fut> FieldResolver for F
where
    F: Fn(ResolverParams) -> Fut + Send + Sync,
    Fut: Future<Output = Result<Value, FieldError>> + Send + 'static,
{
    fn resolve(&self, params: ResolverParams) -> BoxFuture<'static, Result<Value, FieldError>> {
        Box::pin(self(params))
    }
}

/// Produces the event source of a subscription root field.
pub trait SubscriptionResolver: Send + Sync {
    fn subscribe(&self, params: ResolverParams) -> BoxFuture<'static, Result<EventStream, FieldError>>;
}
impl<F, Fut, S> SubscriptionResolver for F
where
    F: Fn(ResolverParams) -> Fut + Send + Sync,
    Fut: Future<Output = Result<S, FieldError>> + Send + 'static,
    S: futures::Stream<Item = Result<Value, FieldError>> + Send + 'static,
{
    fn subscribe(&self, params: ResolverParams) -> BoxFuture<'static, Result<EventStream, FieldError>> {
        let fut = self(params);
        Box::pin(async move {
            let stream = fut.await?;
            Ok(Box::pin(stream) as EventStream)
        })
    }
}

/// Picks the concrete object type of a value returned for an interface- or
/// union-typed field.
pub trait TypeResolver: Send + Sync {
    fn resolve_type(&self, value: &Value, info: &ResolveInfo) -> Option<String>;
}
impl<F> TypeResolver for F
where
    F: Fn(&Value, &ResolveInfo) -> Option<String> + Send + Sync,
{
    fn resolve_type(&self, value: &Value, info: &ResolveInfo) -> Option<String> {
        self(value, info)
    }
}

/// Maps every error before it is placed in a response, e.g. to attach
/// extensions or to hide internal messages.
pub trait ErrorCoercer: Send + Sync {
    fn coerce(&self, error: GraphQLError) -> GraphQLError;
}
impl<F> ErrorCoercer for F
where
    F: Fn(GraphQLError) -> GraphQLError + Send + Sync,
{
    fn coerce(&self, error: GraphQLError) -> GraphQLError {
        self(error)
    }
}
