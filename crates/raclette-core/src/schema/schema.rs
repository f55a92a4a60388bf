use crate::coercion::ScalarImpl;
use crate::introspection::INTROSPECTION_TYPE_NAMES;
use crate::schema::SchemaBuilder;
use crate::types::Directive;
use crate::types::Field;
use crate::types::GraphQLType;
use crate::types::ObjectType;
use crate::types::is_named_subtype;
use indexmap::IndexMap;
use raclette_parser::ast::OperationKind;
use std::collections::HashMap;
use std::sync::Arc;

/// The fields every selection set may use without the type declaring them.
#[derive(Clone, Debug, PartialEq)]
pub(crate) struct MetaFields {
    pub(crate) schema: Field,
    pub(crate) type_: Field,
    pub(crate) typename: Field,
}

/// Represents a fully typechecked and immutable GraphQL schema.
///
/// Build one with [`SchemaBuilder`], then share it behind an `Arc` across
/// every execution.
#[derive(Clone)]
pub struct Schema {
    pub(crate) directive_defs: IndexMap<String, Directive>,
    pub(crate) meta_fields: MetaFields,
    pub(crate) mutation_type: Option<ObjectType>,
    pub(crate) query_type: ObjectType,
    pub(crate) scalar_impls: HashMap<String, Arc<dyn ScalarImpl>>,
    pub(crate) subscription_type: Option<ObjectType>,
    pub(crate) types: IndexMap<String, GraphQLType>,
}
impl Schema {
    /// All directives, built-in ones (`@skip`, `@include`, `@deprecated`,
    /// `@specifiedBy`) first.
    pub fn all_directives(&self) -> &IndexMap<String, Directive> {
        &self.directive_defs
    }

    /// All named types: the built-in scalars, the types defined while
    /// building this schema and the introspection types.
    pub fn all_types(&self) -> impl Iterator<Item = &GraphQLType> {
        self.types.values()
    }

    /// Helper function that just delegates to [`SchemaBuilder::new()`].
    pub fn builder() -> SchemaBuilder {
        SchemaBuilder::new()
    }

    pub fn directive(&self, name: &str) -> Option<&Directive> {
        self.directive_defs.get(name)
    }

    /// The definition of `field_name` as selected on `parent_type_name`.
    ///
    /// Unlike [`GraphQLType::field`] this also knows the meta-fields:
    /// `__typename` on every composite type and `__schema`/`__type` on the
    /// query root.
    pub fn field_def(&self, parent_type_name: &str, field_name: &str) -> Option<&Field> {
        match field_name {
            "__typename" => Some(&self.meta_fields.typename),
            "__schema" if parent_type_name == self.query_type.name() => Some(&self.meta_fields.schema),
            "__type" if parent_type_name == self.query_type.name() => Some(&self.meta_fields.type_),
            _ => self.lookup(parent_type_name)?.field(field_name),
        }
    }

    /// Whether `type_name` names one of the `__`-prefixed introspection types.
    pub fn is_introspection_type(&self, type_name: &str) -> bool {
        INTROSPECTION_TYPE_NAMES.contains(&type_name)
    }

    /// Whether a value of the named type `maybe_subtype` may appear where
    /// `supertype` is expected: the same type, an object or interface
    /// implementing the interface `supertype`, or an object member of the
    /// union `supertype`.
    pub fn is_subtype(&self, maybe_subtype: &str, supertype: &str) -> bool {
        is_named_subtype(&self.types, maybe_subtype, supertype)
    }

    pub fn lookup(&self, type_name: &str) -> Option<&GraphQLType> {
        self.types.get(type_name)
    }

    /// Returns this [`Schema`]'s Mutation root operation type, if any.
    pub fn mutation_type(&self) -> Option<&ObjectType> {
        self.mutation_type.as_ref()
    }

    /// The object types a value of the named type may have at runtime, in
    /// schema order. For an object type that is the type itself; for an
    /// interface every implementing object; for a union its members.
    pub fn possible_types(&self, type_name: &str) -> Vec<&ObjectType> {
        match self.types.get(type_name) {
            Some(GraphQLType::Object(obj)) => vec![obj],
            Some(GraphQLType::Interface(_)) => self
                .types
                .values()
                .filter_map(GraphQLType::as_object)
                .filter(|obj| obj.interfaces.iter().any(|name| name == type_name))
                .collect(),
            Some(GraphQLType::Union(union_type)) => union_type
                .members
                .iter()
                .filter_map(|member| self.types.get(member)?.as_object())
                .collect(),
            _ => vec![],
        }
    }

    /// Returns this [`Schema`]'s Query root operation type.
    ///
    /// GraphQL names it `Query` by default, but a `schema { query: ... }`
    /// block may pick any object type.
    pub fn query_type(&self) -> &ObjectType {
        &self.query_type
    }

    /// The root type for operations of `kind`.
    pub fn root_type(&self, kind: OperationKind) -> Option<&ObjectType> {
        match kind {
            OperationKind::Query => Some(&self.query_type),
            OperationKind::Mutation => self.mutation_type.as_ref(),
            OperationKind::Subscription => self.subscription_type.as_ref(),
        }
    }

    /// The implementation registered for a custom scalar.
    pub fn scalar_impl(&self, scalar_name: &str) -> Option<&Arc<dyn ScalarImpl>> {
        self.scalar_impls.get(scalar_name)
    }

    /// Returns this [`Schema`]'s Subscription root operation type, if any.
    pub fn subscription_type(&self) -> Option<&ObjectType> {
        self.subscription_type.as_ref()
    }

    pub(crate) fn types_map(&self) -> &IndexMap<String, GraphQLType> {
        &self.types
    }
}
impl std::fmt::Debug for Schema {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let mut scalar_impl_names: Vec<&String> = self.scalar_impls.keys().collect();
        scalar_impl_names.sort();
        f.debug_struct("Schema")
            .field("query_type", &self.query_type.name())
            .field("mutation_type", &self.mutation_type.as_ref().map(|t| t.name()))
            .field("subscription_type", &self.subscription_type.as_ref().map(|t| t.name()))
            .field("types", &self.types.keys().collect::<Vec<_>>())
            .field("directives", &self.directive_defs.keys().collect::<Vec<_>>())
            .field("scalar_impls", &scalar_impl_names)
            .finish()
    }
}
