use crate::loc;
use crate::types::Parameter;
use crate::types::TypeAnnotation;
use crate::types::directive_annotation::DEFAULT_DEPRECATION_REASON;
use indexmap::IndexMap;
use raclette_parser::ast;
use raclette_parser::ast::DirectiveLocation;

/// A directive definition: built in (`@skip`, `@include`, `@deprecated`,
/// `@specifiedBy`) or declared in the schema with `directive @name ...`.
#[derive(Clone, Debug, PartialEq)]
pub struct Directive {
    pub(crate) def_location: loc::SchemaDefLocation,
    pub(crate) description: Option<String>,
    pub(crate) locations: Vec<DirectiveLocation>,
    pub(crate) name: String,
    pub(crate) parameters: IndexMap<String, Parameter>,
    pub(crate) repeatable: bool,
}
impl Directive {
    pub(crate) fn from_ast(source: Option<&str>, def: &ast::DirectiveDefinition) -> Self {
        Self {
            def_location: loc::def_location(source, def.position),
            description: def.description.clone(),
            locations: def.locations.clone(),
            name: def.name.clone(),
            parameters: def
                .arguments
                .iter()
                .map(|arg| (arg.name.clone(), Parameter::from_ast(source, arg)))
                .collect(),
            repeatable: def.repeatable,
        }
    }

    fn builtin(
        name: &str,
        description: &str,
        locations: Vec<DirectiveLocation>,
        parameters: Vec<Parameter>,
    ) -> Self {
        Self {
            def_location: loc::SchemaDefLocation::GraphQLBuiltIn,
            description: Some(description.to_string()),
            locations,
            name: name.to_string(),
            parameters: parameters
                .into_iter()
                .map(|param| (param.name.clone(), param))
                .collect(),
            repeatable: false,
        }
    }

    /// The directives every schema has, in introspection order.
    pub(crate) fn builtins() -> Vec<Directive> {
        let if_param = |description: &str| {
            Parameter::builtin(
                "if",
                TypeAnnotation::named("Boolean", false),
                None,
                Some(description),
            )
        };
        let selection_locations = vec![
            DirectiveLocation::Field,
            DirectiveLocation::FragmentSpread,
            DirectiveLocation::InlineFragment,
        ];
        vec![
            Directive::builtin(
                "skip",
                "Directs the executor to skip this field or fragment when the `if` argument is true.",
                selection_locations.clone(),
                vec![if_param("Skipped when true.")],
            ),
            Directive::builtin(
                "include",
                "Directs the executor to include this field or fragment only when the `if` argument is true.",
                selection_locations,
                vec![if_param("Included when true.")],
            ),
            Directive::builtin(
                "deprecated",
                "Marks an element of a GraphQL schema as no longer supported.",
                vec![
                    DirectiveLocation::FieldDefinition,
                    DirectiveLocation::ArgumentDefinition,
                    DirectiveLocation::InputFieldDefinition,
                    DirectiveLocation::EnumValue,
                ],
                vec![Parameter::builtin(
                    "reason",
                    TypeAnnotation::named("String", true),
                    Some(ast::Value::String(DEFAULT_DEPRECATION_REASON.to_string())),
                    Some("Explains why this element was deprecated."),
                )],
            ),
            Directive::builtin(
                "specifiedBy",
                "Exposes a URL that specifies the behaviour of this scalar.",
                vec![DirectiveLocation::Scalar],
                vec![Parameter::builtin(
                    "url",
                    TypeAnnotation::named("String", false),
                    None,
                    Some("The URL that specifies the behaviour of this scalar."),
                )],
            ),
        ]
    }

    pub fn def_location(&self) -> &loc::SchemaDefLocation {
        &self.def_location
    }

    pub fn description(&self) -> Option<&str> {
        self.description.as_deref()
    }

    pub fn is_builtin(&self) -> bool {
        matches!(self.def_location, loc::SchemaDefLocation::GraphQLBuiltIn)
    }

    pub fn is_repeatable(&self) -> bool {
        self.repeatable
    }

    pub fn locations(&self) -> &[DirectiveLocation] {
        &self.locations
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn parameters(&self) -> &IndexMap<String, Parameter> {
        &self.parameters
    }
}
