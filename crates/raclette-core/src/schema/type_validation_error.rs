use crate::loc;
use crate::types::GraphQLTypeKind;
use crate::types::TypeAnnotation;
use thiserror::Error;

/// A cross-type inconsistency found once every definition and extension of
/// a schema has been loaded.
#[derive(Clone, Debug, Error, PartialEq)]
pub enum TypeValidationError {
    #[error(
        "Input object fields may reference an input object type only if the \
        resulting chain of types can be broken by at least one nullable or \
        list field. Unbroken input-object cycle found: {}",
        circular_field_path.join(" -> "),
    )]
    CircularInputFieldChain {
        circular_field_path: Vec<String>,
    },

    #[error(
        "The `{type_name}` type implements `{non_interface_type_name}`, which \
        is not an interface type"
    )]
    ImplementsNonInterfaceType {
        type_name: String,
        non_interface_type_name: String,
        location: loc::SchemaDefLocation,
    },

    #[error(
        "The `{type_name}` type implements `{undefined_interface_name}`, \
        which is not defined in the schema"
    )]
    ImplementsUndefinedInterface {
        type_name: String,
        undefined_interface_name: String,
        location: loc::SchemaDefLocation,
    },

    #[error(
        "Input fields can not be declared with a non-input type: the \
        `{parent_type_name}.{field_name}` field is an input field, but the \
        `{invalid_type_name}` type is an output-only type."
    )]
    InvalidInputFieldWithOutputType {
        def_location: loc::SchemaDefLocation,
        field_name: String,
        invalid_type_name: String,
        parent_type_name: String,
    },

    #[error(
        "Output fields can not be declared with an input type: the \
        `{parent_type_name}.{field_name}` field is an output field, but the \
        `{input_type_name}` type is an input object type."
    )]
    InvalidOutputFieldWithInputType {
        def_location: loc::SchemaDefLocation,
        field_name: String,
        input_type_name: String,
        parent_type_name: String,
    },

    #[error(
        "Parameters can only be declared with input types: the \
        `{parameter_name}` parameter of `{owner}` was declared with the \
        `{outputonly_type_name}` type, which is an output-only type."
    )]
    InvalidParameterWithOutputOnlyType {
        def_location: loc::SchemaDefLocation,
        owner: String,
        parameter_name: String,
        outputonly_type_name: String,
    },

    #[error(
        "Invalid parameter type: `{type_name}.{field_name}` defines the \
        `{parameter_name}` parameter with type `{invalid_parameter_type}`, but \
        `{interface_name}.{field_name}` defines it with type \
        `{expected_parameter_type}`"
    )]
    InvalidInterfaceSpecifiedFieldParameterType {
        def_location: loc::SchemaDefLocation,
        expected_parameter_type: TypeAnnotation,
        field_name: String,
        interface_name: String,
        invalid_parameter_type: TypeAnnotation,
        parameter_name: String,
        type_name: String,
    },

    #[error(
        "Invalid interface-specified field type: `{type_name}.{field_name}` \
        is declared as `{invalid_field_type}`, which is not a subtype of \
        `{interface_name}.{field_name}`'s type `{expected_field_type}`"
    )]
    InvalidInterfaceSpecifiedFieldType {
        def_location: loc::SchemaDefLocation,
        expected_field_type: TypeAnnotation,
        field_name: String,
        interface_name: String,
        invalid_field_type: TypeAnnotation,
        type_name: String,
    },

    #[error(
        "`{type_name}.{field_name}` adds a required `{parameter_name}` \
        parameter to a field specified by `{interface_name}`; additional \
        parameters must be optional"
    )]
    InvalidRequiredAdditionalParameterOnInterfaceSpecifiedField {
        def_location: loc::SchemaDefLocation,
        field_name: String,
        interface_name: String,
        parameter_name: String,
        type_name: String,
    },

    #[error(
        "Invalid union member type: the `{union_type_name}` union lists \
        `{member_type_name}` as a member, but it is {} type and union members \
        can only be object types.",
        member_type_kind.article_name(),
    )]
    InvalidUnionMemberTypeKind {
        location: loc::SchemaDefLocation,
        member_type_kind: GraphQLTypeKind,
        member_type_name: String,
        union_type_name: String,
    },

    #[error(
        "The `{type_name}` type implements the `{interface_name}` interface, \
        but does not define a field named `{field_name}`"
    )]
    MissingInterfaceSpecifiedField {
        def_location: loc::SchemaDefLocation,
        field_name: String,
        interface_name: String,
        type_name: String,
    },

    #[error(
        "The `{interface_name}.{field_name}` field declares a \
        `{missing_parameter_name}` parameter, but `{type_name}.{field_name}` \
        does not"
    )]
    MissingInterfaceSpecifiedFieldParameter {
        def_location: loc::SchemaDefLocation,
        field_name: String,
        interface_name: String,
        missing_parameter_name: String,
        type_name: String,
    },

    #[error(
        "The `{type_name}` type implements `{}` but not \
        `{missing_recursive_interface_name}`, which that interface implements",
        inheritance_path.join(" -> "),
    )]
    MissingRecursiveInterfaceImplementation {
        def_location: loc::SchemaDefLocation,
        inheritance_path: Vec<String>,
        missing_recursive_interface_name: String,
        type_name: String,
    },

    #[error("`{referenced_by}` refers to the undefined type `{undefined_type_name}`")]
    UndefinedTypeName {
        ref_location: loc::SchemaDefLocation,
        referenced_by: String,
        undefined_type_name: String,
    },
}
