//! A schema-first GraphQL execution engine.
//!
//! A [`Schema`](schema::Schema) is built from SDL, resolvers are bound to it
//! through an [`EngineBuilder`], and the resulting [`Engine`] parses,
//! validates and executes requests, producing [`Response`]s that serialize
//! to the standard `{"data": ..., "errors": [...]}` shape.
//!
//! ```
//! use raclette_core::{Engine, Request, Value};
//! use raclette_core::execution::{FieldError, ResolverParams};
//! use raclette_core::schema::Schema;
//!
//! let schema = Schema::builder()
//!     .load_str(None, "type Query { cheese: String! }")?
//!     .build()?;
//! let engine = Engine::builder(schema)
//!     .resolver("Query", "cheese", |_: ResolverParams| async {
//!         Ok::<_, FieldError>(Value::from("Raclette"))
//!     })
//!     .build()?;
//!
//! let response = futures::executor::block_on(engine.execute(Request::new("{ cheese }")));
//! assert!(response.is_ok());
//! assert_eq!(response.to_json()["data"]["cheese"], "Raclette");
//! # Ok::<(), Box<dyn std::error::Error>>(())
//! ```

pub mod coercion;
mod config;
pub mod directives;
mod engine;
pub mod execution;
mod introspection;
pub mod loc;
pub mod schema;
mod subscription;
pub mod types;
pub mod validation;
mod value;

pub use config::EngineConfig;
pub use engine::Engine;
pub use engine::EngineBuildError;
pub use engine::EngineBuilder;
pub use engine::Request;
pub use engine::RequestError;
pub use execution::GraphQLError;
pub use execution::Response;
pub use value::TYPENAME_KEY;
pub use value::Value;

#[cfg(test)]
mod tests;
