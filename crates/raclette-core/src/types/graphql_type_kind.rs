use crate::types::GraphQLType;

/// The kind of a named type, as reported by introspection's `__TypeKind`.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum GraphQLTypeKind {
    Enum,
    InputObject,
    Interface,
    Object,
    Scalar,
    Union,
}
impl GraphQLTypeKind {
    /// The `__TypeKind` enum value name.
    pub fn introspection_name(&self) -> &'static str {
        match self {
            Self::Enum => "ENUM",
            Self::InputObject => "INPUT_OBJECT",
            Self::Interface => "INTERFACE",
            Self::Object => "OBJECT",
            Self::Scalar => "SCALAR",
            Self::Union => "UNION",
        }
    }

    /// e.g. "an interface", for use in error messages.
    pub fn article_name(&self) -> &'static str {
        match self {
            Self::Enum => "an enum",
            Self::InputObject => "an input object",
            Self::Interface => "an interface",
            Self::Object => "an object",
            Self::Scalar => "a scalar",
            Self::Union => "a union",
        }
    }
}
impl std::convert::From<&GraphQLType> for GraphQLTypeKind {
    fn from(value: &GraphQLType) -> Self {
        match value {
            GraphQLType::Bool
            | GraphQLType::Float
            | GraphQLType::ID
            | GraphQLType::Int
            | GraphQLType::String
            | GraphQLType::Scalar(_) => GraphQLTypeKind::Scalar,
            GraphQLType::Enum(_) => GraphQLTypeKind::Enum,
            GraphQLType::InputObject(_) => GraphQLTypeKind::InputObject,
            GraphQLType::Interface(_) => GraphQLTypeKind::Interface,
            GraphQLType::Object(_) => GraphQLTypeKind::Object,
            GraphQLType::Union(_) => GraphQLTypeKind::Union,
        }
    }
}
