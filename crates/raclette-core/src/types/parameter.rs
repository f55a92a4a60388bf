use crate::loc;
use crate::types::DirectiveAnnotation;
use crate::types::TypeAnnotation;
use crate::types::directive_annotation::deprecation_reason;
use raclette_parser::ast;

/// An argument of a field or directive, or a field of an input object
/// type.
#[derive(Clone, Debug, PartialEq)]
pub struct Parameter {
    pub(crate) def_location: loc::SchemaDefLocation,
    pub(crate) default_value: Option<ast::Value>,
    pub(crate) description: Option<String>,
    pub(crate) directives: Vec<DirectiveAnnotation>,
    pub(crate) name: String,
    pub(crate) type_annotation: TypeAnnotation,
}
impl Parameter {
    pub(crate) fn from_ast(source: Option<&str>, def: &ast::InputValueDefinition) -> Self {
        Self {
            def_location: loc::def_location(source, def.position),
            default_value: def.default_value.clone(),
            description: def.description.clone(),
            directives: def.directives.iter().map(DirectiveAnnotation::from_ast).collect(),
            name: def.name.clone(),
            type_annotation: TypeAnnotation::from_ast_type(&def.value_type),
        }
    }

    pub(crate) fn builtin(
        name: &str,
        type_annotation: TypeAnnotation,
        default_value: Option<ast::Value>,
        description: Option<&str>,
    ) -> Self {
        Self {
            def_location: loc::SchemaDefLocation::GraphQLBuiltIn,
            default_value,
            description: description.map(str::to_string),
            directives: vec![],
            name: name.to_string(),
            type_annotation,
        }
    }

    pub fn def_location(&self) -> &loc::SchemaDefLocation {
        &self.def_location
    }

    /// The default literal, applied when no value is supplied.
    pub fn default_value(&self) -> Option<&ast::Value> {
        self.default_value.as_ref()
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

    /// A parameter is required when it is non-null and has no default.
    pub fn is_required(&self) -> bool {
        !self.type_annotation.nullable() && self.default_value.is_none()
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn type_annotation(&self) -> &TypeAnnotation {
        &self.type_annotation
    }
}
