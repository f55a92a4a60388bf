//! Conversion between external values (variables, document literals,
//! resolver results) and the internal [`Value`](crate::Value)
//! representation of each input or output type.

mod arguments;
mod builtin_scalars;
mod coercion_error;
mod input_value;
mod literal;
mod output;
mod scalar_impl;
mod variables;

pub use arguments::coerce_arguments;
pub(crate) use builtin_scalars::BuiltinScalar;
pub use coercion_error::CoercionError;
pub use coercion_error::InputPathSegment;
pub(crate) use coercion_error::render_input_path;
pub use input_value::coerce_input_value;
pub(crate) use literal::check_literal;
pub use literal::coerce_literal;
pub use output::serialize_leaf;
pub use scalar_impl::ScalarError;
pub use scalar_impl::ScalarImpl;
pub use variables::coerce_variables;

#[cfg(test)]
mod tests;
