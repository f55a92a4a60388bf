use crate::schema::Schema;
use crate::types::GraphQLType;
use crate::types::ListTypeAnnotation;
use crate::types::NamedTypeAnnotation;
use crate::types::graphql_type::is_named_subtype;
use indexmap::IndexMap;
use raclette_parser::ast;

/// Represents the annotated type of a [`Field`](crate::types::Field),
/// [`Parameter`](crate::types::Parameter) or operation variable.
///
/// Non-null is a flag on each level rather than a wrapper, so a
/// non-null-of-non-null annotation cannot be represented.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub enum TypeAnnotation {
    List(ListTypeAnnotation),
    Named(NamedTypeAnnotation),
}
impl TypeAnnotation {
    pub fn named(name: impl Into<String>, nullable: bool) -> Self {
        Self::Named(NamedTypeAnnotation {
            name: name.into(),
            nullable,
        })
    }

    pub fn list(inner: TypeAnnotation, nullable: bool) -> Self {
        Self::List(ListTypeAnnotation {
            inner_type_ref: Box::new(inner),
            nullable,
        })
    }

    pub fn from_ast_type(ast_type: &ast::Type) -> Self {
        Self::from_ast_type_impl(ast_type, /* nullable = */ true)
    }

    fn from_ast_type_impl(ast_type: &ast::Type, nullable: bool) -> Self {
        match ast_type {
            ast::Type::List(inner) => Self::list(Self::from_ast_type_impl(inner, true), nullable),
            ast::Type::Named(name) => Self::named(name.as_str(), nullable),
            ast::Type::NonNull(inner) => Self::from_ast_type_impl(inner, false),
        }
    }

    /// Unwrap the [`ListTypeAnnotation`] if this annotation is one.
    pub fn as_list_annotation(&self) -> Option<&ListTypeAnnotation> {
        if let Self::List(annot) = self {
            Some(annot)
        } else {
            None
        }
    }

    /// Unwrap the [`NamedTypeAnnotation`] if this annotation is one.
    pub fn as_named_annotation(&self) -> Option<&NamedTypeAnnotation> {
        if let Self::Named(annot) = self {
            Some(annot)
        } else {
            None
        }
    }

    /// Recursively unwrap this annotation and return the name of the
    /// inner-most named type.
    pub fn innermost_type_name(&self) -> &str {
        match self {
            Self::List(list) => list.inner_type_annotation().innermost_type_name(),
            Self::Named(named) => named.graphql_type_name(),
        }
    }

    /// Indicates if this annotation is [nullable or
    /// non-nullable](https://spec.graphql.org/October2021/#sec-Non-Null).
    pub fn nullable(&self) -> bool {
        match self {
            Self::List(list) => list.nullable(),
            Self::Named(named) => named.nullable(),
        }
    }

    /// This annotation with the outermost nullability replaced.
    pub fn with_nullable(&self, nullable: bool) -> Self {
        let mut annot = self.clone();
        match &mut annot {
            Self::List(list) => list.nullable = nullable,
            Self::Named(named) => named.nullable = nullable,
        }
        annot
    }

    /// Check if two type annotations are definitionally equal: same
    /// structure, same nullability at each level and same inner-most type.
    pub fn is_equivalent_to(&self, other: &Self) -> bool {
        self == other
    }

    /// Whether a value of this type can be used where `other` is expected.
    ///
    /// Non-null is a subtype of nullable, lists are covariant, and a named
    /// type is a subtype of another when the schema says so (identity,
    /// object-implements-interface or object-in-union).
    pub fn is_subtype_of(&self, schema: &Schema, other: &Self) -> bool {
        self.is_subtype_of_impl(schema.types_map(), other)
    }

    pub(crate) fn is_subtype_of_impl(
        &self,
        types_map: &IndexMap<String, GraphQLType>,
        other: &Self,
    ) -> bool {
        if self.nullable() && !other.nullable() {
            return false;
        }
        match (self, other) {
            (Self::List(self_list), Self::List(other_list)) => self_list
                .inner_type_annotation()
                .is_subtype_of_impl(types_map, other_list.inner_type_annotation()),
            (Self::Named(self_named), Self::Named(other_named)) => is_named_subtype(
                types_map,
                self_named.graphql_type_name(),
                other_named.graphql_type_name(),
            ),
            _ => false,
        }
    }

    pub fn to_graphql_string(&self) -> String {
        self.to_string()
    }
}
impl std::convert::From<ListTypeAnnotation> for TypeAnnotation {
    fn from(value: ListTypeAnnotation) -> Self {
        Self::List(value)
    }
}
impl std::convert::From<NamedTypeAnnotation> for TypeAnnotation {
    fn from(value: NamedTypeAnnotation) -> Self {
        Self::Named(value)
    }
}
impl std::fmt::Display for TypeAnnotation {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::List(list_annot) => write!(
                f,
                "[{}]{}",
                list_annot.inner_type_annotation(),
                if list_annot.nullable() { "" } else { "!" },
            ),

            Self::Named(named_annot) => write!(
                f,
                "{}{}",
                named_annot.graphql_type_name(),
                if named_annot.nullable() { "" } else { "!" },
            ),
        }
    }
}
