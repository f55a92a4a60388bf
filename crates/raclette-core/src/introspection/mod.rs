//! The `__schema`/`__type` meta-fields and the `__`-prefixed types they
//! return.
//!
//! Introspection values are built lazily: a `__Type` value only carries a
//! reference to the type annotation it describes, and its fields are
//! computed from the [`Schema`](crate::schema::Schema) when selected.

mod introspection_types;
mod resolvers;

pub(crate) use introspection_types::INTROSPECTION_SDL;
pub(crate) use introspection_types::INTROSPECTION_TYPE_NAMES;
pub(crate) use resolvers::resolve_field;
pub(crate) use resolvers::resolves;

#[cfg(test)]
mod tests;
