use crate::loc;
use crate::types::DirectiveAnnotation;
use crate::types::Parameter;
use crate::types::TypeAnnotation;
use crate::types::directive_annotation::deprecation_reason;
use indexmap::IndexMap;
use raclette_parser::ast;

/// A field defined on an object or interface type.
#[derive(Clone, Debug, PartialEq)]
pub struct Field {
    pub(crate) def_location: loc::SchemaDefLocation,
    pub(crate) description: Option<String>,
    pub(crate) directives: Vec<DirectiveAnnotation>,
    pub(crate) name: String,
    pub(crate) parameters: IndexMap<String, Parameter>,
    pub(crate) parent_type_name: String,
    pub(crate) type_annotation: TypeAnnotation,
}
impl Field {
    pub(crate) fn from_ast(source: Option<&str>, parent_type_name: &str, def: &ast::FieldDefinition) -> Self {
        Self {
            def_location: loc::def_location(source, def.position),
            description: def.description.clone(),
            directives: def.directives.iter().map(DirectiveAnnotation::from_ast).collect(),
            name: def.name.clone(),
            parameters: def
                .arguments
                .iter()
                .map(|arg| (arg.name.clone(), Parameter::from_ast(source, arg)))
                .collect(),
            parent_type_name: parent_type_name.to_string(),
            type_annotation: TypeAnnotation::from_ast_type(&def.field_type),
        }
    }

    pub(crate) fn builtin(
        parent_type_name: &str,
        name: &str,
        type_annotation: TypeAnnotation,
        parameters: Vec<Parameter>,
    ) -> Self {
        Self {
            def_location: loc::SchemaDefLocation::GraphQLBuiltIn,
            description: None,
            directives: vec![],
            name: name.to_string(),
            parameters: parameters
                .into_iter()
                .map(|param| (param.name.clone(), param))
                .collect(),
            parent_type_name: parent_type_name.to_string(),
            type_annotation,
        }
    }

    pub fn def_location(&self) -> &loc::SchemaDefLocation {
        &self.def_location
    }

    pub fn deprecation_reason(&self) -> Option<&str> {
        deprecation_reason(&self.directives)
    }

    pub fn description(&self) -> Option<&str> {
        self.description.as_deref()
    }

    pub fn directives(&self) -> &[DirectiveAnnotation] {
        &self.directives
    }

    pub fn is_deprecated(&self) -> bool {
        self.deprecation_reason().is_some()
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn parameters(&self) -> &IndexMap<String, Parameter> {
        &self.parameters
    }

    /// The name of the object or interface type this field is defined on.
    pub fn parent_type_name(&self) -> &str {
        &self.parent_type_name
    }

    pub fn type_annotation(&self) -> &TypeAnnotation {
        &self.type_annotation
    }
}
