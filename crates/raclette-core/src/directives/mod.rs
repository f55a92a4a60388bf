//! Directive behavior at execution time: `@skip`/`@include` inclusion
//! conditions and user-bound [`DirectiveImpl`] hooks.

mod directive_impl;
mod hooks;
mod inclusion;

pub use directive_impl::DirectiveImpl;
pub(crate) use directive_impl::coerce_annotation_arguments;
pub(crate) use hooks::apply_argument_hooks;
pub(crate) use hooks::apply_introspection_hooks;
pub(crate) use hooks::apply_output_hooks;
pub(crate) use hooks::bound_directives;
pub(crate) use inclusion::InclusionCondition;
pub(crate) use inclusion::is_included;
