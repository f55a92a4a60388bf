use crate::EngineConfig;
use crate::Value;
use crate::coercion::coerce_variables;
use crate::directives::DirectiveImpl;
use crate::execution::Context;
use crate::execution::ErrorCoercer;
use crate::execution::ErrorCollector;
use crate::execution::ExecutionContext;
use crate::execution::FieldResolver;
use crate::execution::GraphQLError;
use crate::execution::Location;
use crate::execution::PreparedDocument;
use crate::execution::ResolverMap;
use crate::execution::Response;
use crate::execution::SubscriptionResolver;
use crate::execution::TypeResolver;
use crate::execution::execute_operation;
use crate::schema::Schema;
use crate::subscription;
use crate::types::GraphQLType;
use crate::validation::DocumentValidator;
use crate::validation::ValidationError;
use futures::stream::BoxStream;
use indexmap::IndexMap;
use raclette_parser::GraphQLParseError;
use raclette_parser::ast;
use std::any::Any;
use std::sync::Arc;
use thiserror::Error;
use tracing::Instrument;

/// A schema together with the resolvers, directive implementations and
/// settings needed to execute requests against it.
///
/// Cheap to clone; clones share everything.
///
/// ```
/// use raclette_core::{Engine, Request, Value};
/// use raclette_core::execution::{FieldError, ResolverParams};
/// use raclette_core::schema::Schema;
///
/// let schema = Schema::builder()
///     .load_str(None, "type Query { greeting(name: String!): String! }")?
///     .build()?;
/// let engine = Engine::builder(schema)
///     .resolver("Query", "greeting", |params: ResolverParams| async move {
///         let name = params.arg("name").and_then(Value::as_str).unwrap_or_default().to_string();
///         Ok::<_, FieldError>(Value::String(format!("Bonjour, {name}!")))
///     })
///     .build()?;
///
/// let response = futures::executor::block_on(
///     engine.execute(Request::new(r#"{ greeting(name: "Reblochon") }"#)),
/// );
/// assert_eq!(
///     response.to_json(),
///     serde_json::json!({ "data": { "greeting": "Bonjour, Reblochon!" } }),
/// );
/// # Ok::<(), Box<dyn std::error::Error>>(())
/// ```
#[derive(Clone)]
pub struct Engine {
    inner: Arc<EngineInner>,
}

struct EngineInner {
    config: EngineConfig,
    resolvers: ResolverMap,
    schema: Arc<Schema>,
}

/// The operation a request runs, with its variables coerced.
pub(crate) struct SelectedOperation<'a> {
    pub(crate) operation: &'a ast::OperationDefinition,
    pub(crate) root_type_name: &'a str,
    pub(crate) variables: IndexMap<String, Value>,
}

impl Engine {
    pub fn builder(schema: impl Into<Arc<Schema>>) -> EngineBuilder {
        EngineBuilder::new(schema)
    }

    pub fn config(&self) -> &EngineConfig {
        &self.inner.config
    }

    pub fn resolvers(&self) -> &ResolverMap {
        &self.inner.resolvers
    }

    pub fn schema(&self) -> &Arc<Schema> {
        &self.inner.schema
    }

    /// Parses and validates `query` once so it can be executed many times
    /// with [`Engine::execute_prepared`].
    ///
    /// A document with syntax or validation errors yields the data-less
    /// [`Response`] to send back instead.
    pub fn prepare(&self, query: &str) -> Result<Arc<PreparedDocument>, Response> {
        self.try_prepare(query).map_err(|err| self.error_response(err))
    }

    pub(crate) fn try_prepare(&self, query: &str) -> Result<Arc<PreparedDocument>, RequestError> {
        let document = raclette_parser::parse_query(query).map_err(RequestError::Syntax)?;

        let validator = DocumentValidator::new(&self.inner.schema, &document);
        let validator = if self.inner.config.introspection {
            validator
        } else {
            validator.without_introspection()
        };
        let errors = validator.validate();
        if !errors.is_empty() {
            return Err(RequestError::Validation(errors));
        }
        Ok(Arc::new(PreparedDocument::new(document)))
    }

    /// Parses, validates and executes `request`.
    pub async fn execute(&self, request: Request) -> Response {
        match self.prepare(&request.query) {
            Ok(prepared) => self.execute_prepared(&prepared, request).await,
            Err(response) => response,
        }
    }

    /// Executes `request` against an already prepared document; the
    /// request's query text is ignored.
    pub async fn execute_prepared(&self, prepared: &PreparedDocument, request: Request) -> Response {
        let span = tracing::debug_span!(
            "execute",
            operation = request.operation_name.as_deref().unwrap_or_default(),
        );
        async move {
            let selected = match self.select_operation(prepared, &request) {
                Ok(selected) => selected,
                Err(err) => return self.error_response(err),
            };
            let root_type_name = selected.root_type_name;
            let ctx = self.execution_context(prepared, selected, request.context, false);
            execute_operation(ctx, root_type_name, request.root_value).await
        }
        .instrument(span)
        .await
    }

    /// Starts a subscription: one response per event of the root field's
    /// event source, in emission order.
    ///
    /// Request errors, and a root field that fails to produce its event
    /// source, yield a stream with a single error response. A query or
    /// mutation yields its one response. Dropping the stream drops the
    /// event source.
    pub fn subscribe(&self, request: Request) -> BoxStream<'static, Response> {
        subscription::subscribe(self.clone(), request)
    }

    /// Picks the operation of `request` in `prepared` and coerces its
    /// variables.
    pub(crate) fn select_operation<'a>(
        &'a self,
        prepared: &'a PreparedDocument,
        request: &Request,
    ) -> Result<SelectedOperation<'a>, RequestError> {
        let schema = &self.inner.schema;
        let operation = prepared
            .operation(request.operation_name.as_deref())
            .map_err(RequestError::Operation)?;
        let Some(root_type) = schema.root_type(operation.kind) else {
            return Err(RequestError::Operation(
                GraphQLError::new(format!("Schema is not configured for {}s.", operation.kind)).at(operation.position),
            ));
        };

        let variables = coerce_variables(schema, operation, &request.variables).map_err(|errors| {
            RequestError::VariableCoercion(
                errors
                    .into_iter()
                    .map(|(pos, err)| GraphQLError::new(err.to_string()).at(pos))
                    .collect(),
            )
        })?;

        tracing::debug!(
            kind = %operation.kind,
            name = operation.name.as_deref().unwrap_or_default(),
            variables = variables.len(),
            "selected operation",
        );
        Ok(SelectedOperation {
            operation,
            root_type_name: root_type.name(),
            variables,
        })
    }

    pub(crate) fn execution_context<'a>(
        &'a self,
        prepared: &'a PreparedDocument,
        selected: SelectedOperation<'a>,
        context: Context,
        is_subscription_event: bool,
    ) -> ExecutionContext<'a> {
        ExecutionContext {
            config: &self.inner.config,
            context,
            errors: ErrorCollector::new(),
            is_subscription_event,
            operation: selected.operation,
            prepared,
            resolvers: &self.inner.resolvers,
            schema: &self.inner.schema,
            variables: selected.variables,
        }
    }

    /// The data-less response to a request that failed before execution.
    pub(crate) fn error_response(&self, err: RequestError) -> Response {
        tracing::debug!(error = %err, "request failed before execution");
        let errors = err
            .into_errors()
            .into_iter()
            .map(|error| match &self.inner.resolvers.error_coercer {
                Some(coercer) => coercer.coerce(error),
                None => error,
            })
            .collect();
        Response::from_errors(errors)
    }
}
impl std::fmt::Debug for Engine {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Engine")
            .field("config", &self.inner.config)
            .field("resolvers", &self.inner.resolvers)
            .finish_non_exhaustive()
    }
}

/// Collects the bindings of an [`Engine`], checking each against the
/// schema.
///
/// The first binding that does not fit the schema is reported by
/// [`EngineBuilder::build`].
pub struct EngineBuilder {
    config: EngineConfig,
    error: Option<EngineBuildError>,
    resolvers: ResolverMap,
    schema: Arc<Schema>,
}
impl EngineBuilder {
    pub fn new(schema: impl Into<Arc<Schema>>) -> Self {
        Self {
            config: EngineConfig::default(),
            error: None,
            resolvers: ResolverMap::default(),
            schema: schema.into(),
        }
    }

    pub fn build(self) -> Result<Engine, EngineBuildError> {
        if let Some(err) = self.error {
            return Err(err);
        }
        tracing::debug!(resolvers = ?self.resolvers, "built engine");
        Ok(Engine {
            inner: Arc::new(EngineInner {
                config: self.config,
                resolvers: self.resolvers,
                schema: self.schema,
            }),
        })
    }

    pub fn config(mut self, config: EngineConfig) -> Self {
        self.config = config;
        self
    }

    /// Replaces the fallback used for fields without a bound resolver,
    /// which otherwise reads the same-named key of the parent object.
    pub fn default_resolver(mut self, resolver: impl FieldResolver + 'static) -> Self {
        self.resolvers.default_resolver = Some(Arc::new(resolver));
        self
    }

    /// Binds the hooks of a custom directive defined in the schema.
    pub fn directive(mut self, directive_name: &str, directive_impl: impl DirectiveImpl + 'static) -> Self {
        let binding_error = match self.schema.directive(directive_name) {
            None => Some(EngineBuildError::UndefinedDirective {
                directive_name: directive_name.to_string(),
            }),
            Some(directive) if directive.is_builtin() => Some(EngineBuildError::BuiltinDirectiveBinding {
                directive_name: directive_name.to_string(),
            }),
            Some(_) => None,
        };
        if let Some(err) = binding_error {
            return self.fail(err);
        }
        self.resolvers
            .directives
            .insert(directive_name.to_string(), Arc::new(directive_impl));
        self
    }

    pub fn error_coercer(mut self, coercer: impl ErrorCoercer + 'static) -> Self {
        self.resolvers.error_coercer = Some(Arc::new(coercer));
        self
    }

    /// Binds the resolver of `type_name.field_name`, which must be a field
    /// of an object type.
    pub fn resolver(mut self, type_name: &str, field_name: &str, resolver: impl FieldResolver + 'static) -> Self {
        if let Err(err) = self.check_field_binding(type_name, field_name) {
            return self.fail(err);
        }
        self.resolvers.insert_field(type_name, field_name, Arc::new(resolver));
        self
    }

    /// Binds the event source of a root field of the subscription type.
    pub fn subscription(
        mut self,
        type_name: &str,
        field_name: &str,
        resolver: impl SubscriptionResolver + 'static,
    ) -> Self {
        if let Err(err) = self.check_field_binding(type_name, field_name) {
            return self.fail(err);
        }
        if self
            .schema
            .subscription_type()
            .is_none_or(|root| root.name() != type_name)
        {
            return self.fail(EngineBuildError::SubscriptionOutsideRoot {
                type_name: type_name.to_string(),
                field_name: field_name.to_string(),
            });
        }
        self.resolvers.insert_subscription(type_name, field_name, Arc::new(resolver));
        self
    }

    /// Binds the runtime type picker of an interface or union type.
    pub fn type_resolver(mut self, type_name: &str, resolver: impl TypeResolver + 'static) -> Self {
        let binding_error = if type_name.starts_with("__") {
            Some(EngineBuildError::ReservedName {
                type_name: type_name.to_string(),
            })
        } else {
            match self.schema.lookup(type_name) {
                None => Some(EngineBuildError::UndefinedType {
                    type_name: type_name.to_string(),
                }),
                Some(type_) if !type_.is_abstract() => Some(EngineBuildError::NonAbstractTypeResolver {
                    type_name: type_name.to_string(),
                }),
                Some(_) => None,
            }
        };
        if let Some(err) = binding_error {
            return self.fail(err);
        }
        self.resolvers
            .type_resolvers
            .insert(type_name.to_string(), Arc::new(resolver));
        self
    }

    fn check_field_binding(&self, type_name: &str, field_name: &str) -> Result<(), EngineBuildError> {
        if type_name.starts_with("__") {
            return Err(EngineBuildError::ReservedName {
                type_name: type_name.to_string(),
            });
        }
        match self.schema.lookup(type_name) {
            Some(GraphQLType::Object(obj)) if obj.field(field_name).is_some() => Ok(()),
            _ => Err(EngineBuildError::UndefinedField {
                type_name: type_name.to_string(),
                field_name: field_name.to_string(),
            }),
        }
    }

    fn fail(mut self, err: EngineBuildError) -> Self {
        self.error.get_or_insert(err);
        self
    }
}

#[derive(Clone, Debug, Error, PartialEq)]
pub enum EngineBuildError {
    #[error("The built-in `@{directive_name}` directive cannot be rebound")]
    BuiltinDirectiveBinding { directive_name: String },

    #[error("A type resolver was bound to `{type_name}`, which is neither an interface nor a union")]
    NonAbstractTypeResolver { type_name: String },

    #[error("`{type_name}` is reserved for introspection and cannot be bound")]
    ReservedName { type_name: String },

    #[error(
        "A subscription resolver was bound to `{type_name}.{field_name}`, but `{type_name}` is not the \
        subscription root type"
    )]
    SubscriptionOutsideRoot { type_name: String, field_name: String },

    #[error("The `@{directive_name}` directive is not defined in the schema")]
    UndefinedDirective { directive_name: String },

    #[error("A resolver was bound to `{type_name}.{field_name}`, which is not a field of an object type")]
    UndefinedField { type_name: String, field_name: String },

    #[error("The `{type_name}` type is not defined in the schema")]
    UndefinedType { type_name: String },
}

/// One GraphQL request: the document text, and what to execute it with.
#[derive(Clone)]
pub struct Request {
    pub(crate) context: Context,
    pub(crate) operation_name: Option<String>,
    pub(crate) query: String,
    pub(crate) root_value: Value,
    pub(crate) variables: IndexMap<String, Value>,
}
impl Request {
    pub fn new(query: impl Into<String>) -> Self {
        Self {
            context: Arc::new(()),
            operation_name: None,
            query: query.into(),
            root_value: Value::object(),
            variables: IndexMap::new(),
        }
    }

    /// The request context, handed to every resolver through
    /// [`ResolverParams::context`](crate::execution::ResolverParams::context).
    pub fn context<T: Any + Send + Sync>(mut self, context: T) -> Self {
        self.context = Arc::new(context);
        self
    }

    pub fn operation_name(mut self, operation_name: impl Into<String>) -> Self {
        self.operation_name = Some(operation_name.into());
        self
    }

    pub fn query(&self) -> &str {
        &self.query
    }

    /// The parent value of the root fields. Defaults to an empty object.
    pub fn root_value(mut self, root_value: impl Into<Value>) -> Self {
        self.root_value = root_value.into();
        self
    }

    pub fn variables(mut self, variables: IndexMap<String, Value>) -> Self {
        self.variables = variables;
        self
    }

    /// Takes the variables from a JSON object, as sent by HTTP clients.
    /// Anything other than an object means no variables.
    pub fn variables_json(self, variables: serde_json::Value) -> Self {
        let variables = match Value::from_json(variables) {
            Value::Object(variables) => variables,
            _ => IndexMap::new(),
        };
        self.variables(variables)
    }
}
impl std::fmt::Debug for Request {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Request")
            .field("query", &self.query)
            .field("operation_name", &self.operation_name)
            .field("variables", &self.variables)
            .field("root_value", &self.root_value)
            .finish_non_exhaustive()
    }
}

/// A failure that stops a request before any resolver runs.
#[derive(Clone, Debug, Error)]
pub enum RequestError {
    #[error("the document has {} syntax error(s)", .0.len())]
    Syntax(Vec<GraphQLParseError>),

    #[error("the document failed validation with {} error(s)", .0.len())]
    Validation(Vec<ValidationError>),

    #[error("{} variable(s) could not be coerced", .0.len())]
    VariableCoercion(Vec<GraphQLError>),

    #[error("{0}")]
    Operation(GraphQLError),
}
impl RequestError {
    /// The errors to report in the response.
    pub fn into_errors(self) -> Vec<GraphQLError> {
        match self {
            Self::Syntax(errors) => errors
                .into_iter()
                .map(|err| GraphQLError::new(format!("Syntax Error: {}", err.message())).at(err.position()))
                .collect(),
            Self::Validation(errors) => errors
                .into_iter()
                .map(|err| {
                    let mut error = GraphQLError::new(err.message());
                    error.locations = err.locations().iter().copied().map(Location::from).collect();
                    error
                })
                .collect(),
            Self::VariableCoercion(errors) => errors,
            Self::Operation(error) => vec![error],
        }
    }
}
impl std::convert::From<RequestError> for Response {
    fn from(err: RequestError) -> Self {
        Response::from_errors(err.into_errors())
    }
}
