use crate::loc;
use crate::types::DirectiveAnnotation;
use crate::types::EnumType;
use crate::types::Field;
use crate::types::GraphQLTypeKind;
use crate::types::InputObjectType;
use crate::types::InterfaceType;
use crate::types::ObjectType;
use crate::types::ScalarType;
use crate::types::UnionType;
use indexmap::IndexMap;

/// Represents a defined GraphQL type
#[derive(Clone, Debug, PartialEq)]
pub enum GraphQLType {
    Bool,
    Enum(EnumType),
    Float,
    ID,
    InputObject(InputObjectType),
    Int,
    Interface(InterfaceType),
    Object(ObjectType),
    Scalar(ScalarType),
    String,
    Union(UnionType),
}
impl GraphQLType {
    pub fn as_enum(&self) -> Option<&EnumType> {
        if let Self::Enum(type_) = self { Some(type_) } else { None }
    }

    pub fn as_input_object(&self) -> Option<&InputObjectType> {
        if let Self::InputObject(type_) = self { Some(type_) } else { None }
    }

    pub fn as_interface(&self) -> Option<&InterfaceType> {
        if let Self::Interface(type_) = self { Some(type_) } else { None }
    }

    pub fn as_object(&self) -> Option<&ObjectType> {
        if let Self::Object(type_) = self { Some(type_) } else { None }
    }

    pub fn as_scalar(&self) -> Option<&ScalarType> {
        if let Self::Scalar(type_) = self { Some(type_) } else { None }
    }

    pub fn as_union(&self) -> Option<&UnionType> {
        if let Self::Union(type_) = self { Some(type_) } else { None }
    }

    pub fn def_location(&self) -> &loc::SchemaDefLocation {
        static BUILTIN: loc::SchemaDefLocation = loc::SchemaDefLocation::GraphQLBuiltIn;
        match self {
            Self::Bool | Self::Float | Self::ID | Self::Int | Self::String => &BUILTIN,
            Self::Enum(t) => t.def_location(),
            Self::InputObject(t) => t.def_location(),
            Self::Interface(t) => t.def_location(),
            Self::Object(t) => t.def_location(),
            Self::Scalar(t) => t.def_location(),
            Self::Union(t) => t.def_location(),
        }
    }

    pub fn description(&self) -> Option<&str> {
        match self {
            Self::Bool => Some("The `Boolean` scalar type represents `true` or `false`."),
            Self::Float => Some(
                "The `Float` scalar type represents signed double-precision fractional values.",
            ),
            Self::ID => Some(
                "The `ID` scalar type represents a unique identifier, serialized as a string.",
            ),
            Self::Int => Some(
                "The `Int` scalar type represents non-fractional signed whole numeric values \
                 between -(2^31) and 2^31 - 1.",
            ),
            Self::String => Some(
                "The `String` scalar type represents textual data as UTF-8 character sequences.",
            ),
            Self::Enum(t) => t.description(),
            Self::InputObject(t) => t.description(),
            Self::Interface(t) => t.description(),
            Self::Object(t) => t.description(),
            Self::Scalar(t) => t.description(),
            Self::Union(t) => t.description(),
        }
    }

    /// The directives applied to the type definition; none for built-in
    /// scalars.
    pub fn directives(&self) -> &[DirectiveAnnotation] {
        match self {
            Self::Bool | Self::Float | Self::ID | Self::Int | Self::String => &[],
            Self::Enum(t) => t.directives(),
            Self::InputObject(t) => t.directives(),
            Self::Interface(t) => t.directives(),
            Self::Object(t) => t.directives(),
            Self::Scalar(t) => t.directives(),
            Self::Union(t) => t.directives(),
        }
    }

    /// The field named `name` on an object or interface type.
    pub fn field(&self, name: &str) -> Option<&Field> {
        match self {
            Self::Object(t) => t.field(name),
            Self::Interface(t) => t.field(name),
            _ => None,
        }
    }

    pub fn kind(&self) -> GraphQLTypeKind {
        GraphQLTypeKind::from(self)
    }

    /// Interfaces and unions.
    pub fn is_abstract(&self) -> bool {
        matches!(self, Self::Interface(_) | Self::Union(_))
    }

    pub fn is_builtin_scalar(&self) -> bool {
        matches!(self, Self::Bool | Self::Float | Self::ID | Self::Int | Self::String)
    }

    /// Objects, interfaces and unions: the types that take a selection set.
    pub fn is_composite(&self) -> bool {
        matches!(self, Self::Object(_) | Self::Interface(_) | Self::Union(_))
    }

    /// Scalars, enums and input objects.
    pub fn is_input_type(&self) -> bool {
        !matches!(self, Self::Object(_) | Self::Interface(_) | Self::Union(_))
    }

    /// Scalars and enums.
    pub fn is_leaf(&self) -> bool {
        !self.is_composite() && !matches!(self, Self::InputObject(_))
    }

    /// Everything except input objects.
    pub fn is_output_type(&self) -> bool {
        !matches!(self, Self::InputObject(_))
    }

    pub fn name(&self) -> &str {
        match self {
            Self::Bool => "Boolean",
            Self::Float => "Float",
            Self::ID => "ID",
            Self::Int => "Int",
            Self::String => "String",
            Self::Enum(t) => t.name(),
            Self::InputObject(t) => t.name(),
            Self::Interface(t) => t.name(),
            Self::Object(t) => t.name(),
            Self::Scalar(t) => t.name(),
            Self::Union(t) => t.name(),
        }
    }
}

/// Identity, object-or-interface implements interface, or object is a
/// member of union.
pub(crate) fn is_named_subtype(
    types_map: &IndexMap<String, GraphQLType>,
    maybe_subtype_name: &str,
    supertype_name: &str,
) -> bool {
    if maybe_subtype_name == supertype_name {
        return true;
    }
    let Some(subtype) = types_map.get(maybe_subtype_name) else {
        return false;
    };
    match types_map.get(supertype_name) {
        Some(GraphQLType::Interface(_)) => match subtype {
            GraphQLType::Object(obj) => obj.interfaces.iter().any(|i| i == supertype_name),
            GraphQLType::Interface(iface) => iface.interfaces.iter().any(|i| i == supertype_name),
            _ => false,
        },
        Some(GraphQLType::Union(union_type)) => {
            subtype.as_object().is_some()
                && union_type.members.iter().any(|m| m == maybe_subtype_name)
        }
        _ => false,
    }
}
