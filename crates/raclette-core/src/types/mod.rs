mod directive;
mod directive_annotation;
mod enum_type;
mod field;
mod graphql_type;
mod graphql_type_kind;
mod input_object_type;
mod input_object_type_validator;
mod list_type_annotation;
mod named_type_annotation;
mod object_or_interface_type_data;
mod object_or_interface_type_validator;
mod parameter;
mod scalar_type;
pub(crate) mod type_builder;
mod type_annotation;
mod types_map_builder;
mod union_type;
mod union_type_validator;

pub use directive::Directive;
pub use directive_annotation::DirectiveAnnotation;
pub use directive_annotation::DEFAULT_DEPRECATION_REASON;
pub use enum_type::EnumType;
pub use enum_type::EnumValue;
pub use field::Field;
pub use graphql_type::GraphQLType;
pub(crate) use graphql_type::is_named_subtype;
pub use graphql_type_kind::GraphQLTypeKind;
pub use input_object_type::InputObjectType;
use input_object_type_validator::InputObjectTypeValidator;
pub use list_type_annotation::ListTypeAnnotation;
pub use named_type_annotation::NamedTypeAnnotation;
pub use object_or_interface_type_data::InterfaceType;
pub use object_or_interface_type_data::ObjectOrInterfaceTypeData;
pub use object_or_interface_type_data::ObjectType;
use object_or_interface_type_validator::ObjectOrInterfaceTypeValidator;
pub use parameter::Parameter;
pub use scalar_type::ScalarType;
pub(crate) use type_builder::TypeBuilder;
pub use type_annotation::TypeAnnotation;
pub(crate) use types_map_builder::TypesMapBuilder;
pub use union_type::UnionType;
use union_type_validator::UnionTypeValidator;
