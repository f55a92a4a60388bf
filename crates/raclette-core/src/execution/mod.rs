//! Resolver dispatch, value completion and response assembly.

mod executor;
mod field_collection;
mod field_error;
mod graphql_error;
mod prepared_document;
mod resolver;
mod resolver_map;
mod response;
mod response_path;

pub(crate) use executor::ErrorCollector;
pub(crate) use executor::ExecutionContext;
pub(crate) use executor::event_error_response;
pub(crate) use executor::execute_operation;
pub use field_error::FieldError;
pub use graphql_error::GraphQLError;
pub use graphql_error::Location;
pub use graphql_error::PathSegment;
pub use prepared_document::PreparedDocument;
pub use resolver::Context;
pub use resolver::ErrorCoercer;
pub use resolver::EventStream;
pub use resolver::FieldResolver;
pub use resolver::ResolveInfo;
pub use resolver::ResolverParams;
pub use resolver::SubscriptionResolver;
pub use resolver::TypeResolver;
pub use resolver_map::ResolverMap;
pub use response::Response;
pub use response_path::ResponsePath;

#[cfg(test)]
mod tests;
