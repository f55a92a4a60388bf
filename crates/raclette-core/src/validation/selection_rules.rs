use crate::coercion::CoercionError;
use crate::coercion::check_literal;
use crate::types::GraphQLType;
use crate::types::Parameter;
use crate::validation::DocumentValidator;
use crate::validation::ValidationRule;
use indexmap::IndexMap;
use raclette_parser::ast;
use raclette_parser::ast::DirectiveLocation;
use std::collections::HashSet;

/// What a list of arguments is written on, for error messages.
pub(super) enum ArgumentOwner<'a> {
    Directive(&'a str),
    Field { parent_type_name: &'a str, field_name: &'a str },
}
impl std::fmt::Display for ArgumentOwner<'_> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Directive(name) => write!(f, "directive \"@{name}\""),
            Self::Field {
                parent_type_name,
                field_name,
            } => write!(f, "field \"{parent_type_name}.{field_name}\""),
        }
    }
}

impl<'a> DocumentValidator<'a> {
    /// Validates a selection set whose values are of `parent_type`: the
    /// root of an operation, a fragment definition or a field's
    /// sub-selection.
    pub(super) fn check_selection_set(&mut self, parent_type: &'a GraphQLType, selection_set: &'a ast::SelectionSet) {
        self.check_overlapping_fields(parent_type, selection_set);
        self.check_selections(parent_type, selection_set);
    }

    fn check_selections(&mut self, parent_type: &'a GraphQLType, selection_set: &'a ast::SelectionSet) {
        for selection in &selection_set.selections {
            match selection {
                ast::Selection::Field(field) => self.check_field(parent_type, field),
                ast::Selection::InlineFragment(inline) => self.check_inline_fragment(parent_type, inline),
                ast::Selection::FragmentSpread(spread) => self.check_fragment_spread(parent_type, spread),
            }
        }
    }

    fn check_field(&mut self, parent_type: &'a GraphQLType, field: &'a ast::Field) {
        let schema = self.schema;
        self.check_directives(&field.directives, DirectiveLocation::Field);

        if !self.allow_introspection && matches!(field.name.as_str(), "__schema" | "__type") {
            self.report(
                ValidationRule::NoIntrospection,
                format!(
                    "GraphQL introspection has been disabled, but the requested query contained the field \"{}\".",
                    field.name,
                ),
                vec![field.position],
            );
        }

        // https://spec.graphql.org/October2021/#sec-Field-Selections
        let Some(field_def) = schema.field_def(parent_type.name(), &field.name) else {
            self.report(
                ValidationRule::FieldsOnCorrectType,
                format!("Cannot query field \"{}\" on type \"{}\".", field.name, parent_type.name()),
                vec![field.position],
            );
            return;
        };

        self.check_arguments(
            &field.arguments,
            field_def.parameters(),
            field.position,
            ArgumentOwner::Field {
                parent_type_name: parent_type.name(),
                field_name: &field.name,
            },
        );

        // https://spec.graphql.org/October2021/#sec-Leaf-Field-Selections
        let return_annot = field_def.type_annotation();
        let Some(return_type) = schema.lookup(return_annot.innermost_type_name()) else {
            return;
        };
        match &field.selection_set {
            Some(_) if return_type.is_leaf() => self.report(
                ValidationRule::ScalarLeafs,
                format!(
                    "Field \"{}\" must not have a selection since type \"{return_annot}\" has no subfields.",
                    field.name,
                ),
                vec![field.position],
            ),
            None if !return_type.is_leaf() => self.report(
                ValidationRule::ScalarLeafs,
                format!(
                    "Field \"{}\" of type \"{return_annot}\" must have a selection of subfields. \
                    Did you mean \"{} {{ ... }}\"?",
                    field.name, field.name,
                ),
                vec![field.position],
            ),
            Some(sub_selection_set) => self.check_selection_set(return_type, sub_selection_set),
            None => (),
        }
    }

    fn check_inline_fragment(&mut self, parent_type: &'a GraphQLType, inline: &'a ast::InlineFragment) {
        let schema = self.schema;
        self.check_directives(&inline.directives, DirectiveLocation::InlineFragment);

        let fragment_type = match &inline.type_condition {
            None => parent_type,
            Some(type_condition) => {
                let Some(fragment_type) = schema.lookup(type_condition) else {
                    self.report(
                        ValidationRule::KnownTypeNames,
                        format!("Unknown type \"{type_condition}\"."),
                        vec![inline.position],
                    );
                    return;
                };
                if !fragment_type.is_composite() {
                    self.report(
                        ValidationRule::FragmentsOnCompositeTypes,
                        format!("Fragment cannot condition on non composite type \"{type_condition}\"."),
                        vec![inline.position],
                    );
                    return;
                }
                if !self.types_overlap(parent_type, fragment_type) {
                    self.report(
                        ValidationRule::PossibleFragmentSpreads,
                        format!(
                            "Fragment cannot be spread here as objects of type \"{}\" can never be of type \
                            \"{type_condition}\".",
                            parent_type.name(),
                        ),
                        vec![inline.position],
                    );
                }
                fragment_type
            }
        };
        self.check_selections(fragment_type, &inline.selection_set);
    }

    fn check_fragment_spread(&mut self, parent_type: &'a GraphQLType, spread: &'a ast::FragmentSpread) {
        let schema = self.schema;
        self.check_directives(&spread.directives, DirectiveLocation::FragmentSpread);

        // https://spec.graphql.org/October2021/#sec-Fragment-spread-target-defined
        let Some(fragment) = self.fragments.get(spread.fragment_name.as_str()).copied() else {
            self.report(
                ValidationRule::KnownFragmentNames,
                format!("Unknown fragment \"{}\".", spread.fragment_name),
                vec![spread.position],
            );
            return;
        };

        // https://spec.graphql.org/October2021/#sec-Fragment-spread-is-possible
        if let Some(fragment_type) = schema.lookup(&fragment.type_condition)
            && fragment_type.is_composite()
            && !self.types_overlap(parent_type, fragment_type)
        {
            self.report(
                ValidationRule::PossibleFragmentSpreads,
                format!(
                    "Fragment \"{}\" cannot be spread here as objects of type \"{}\" can never be of type \"{}\".",
                    spread.fragment_name,
                    parent_type.name(),
                    fragment.type_condition,
                ),
                vec![spread.position],
            );
        }
    }

    /// Whether some object type is a possible type of both.
    fn types_overlap(&self, a: &GraphQLType, b: &GraphQLType) -> bool {
        let a_possible: HashSet<&str> = self
            .schema
            .possible_types(a.name())
            .into_iter()
            .map(|obj| obj.name())
            .collect();
        self.schema
            .possible_types(b.name())
            .into_iter()
            .any(|obj| a_possible.contains(obj.name()))
    }

    // https://spec.graphql.org/October2021/#sec-Directives-Are-Defined
    // https://spec.graphql.org/October2021/#sec-Directives-Are-In-Valid-Locations
    // https://spec.graphql.org/October2021/#sec-Directives-Are-Unique-Per-Location
    pub(super) fn check_directives(&mut self, directives: &'a [ast::DirectiveAnnotation], location: DirectiveLocation) {
        let schema = self.schema;
        let mut seen: HashSet<&str> = HashSet::new();
        for directive in directives {
            let Some(directive_def) = schema.directive(&directive.name) else {
                self.report(
                    ValidationRule::KnownDirectives,
                    format!("Unknown directive \"@{}\".", directive.name),
                    vec![directive.position],
                );
                continue;
            };
            if !directive_def.locations().contains(&location) {
                self.report(
                    ValidationRule::KnownDirectives,
                    format!("Directive \"@{}\" may not be used on {}.", directive.name, location.as_str()),
                    vec![directive.position],
                );
            }
            if !seen.insert(&directive.name) && !directive_def.is_repeatable() {
                self.report(
                    ValidationRule::UniqueDirectivesPerLocation,
                    format!("The directive \"@{}\" can only be used once at this location.", directive.name),
                    vec![directive.position],
                );
            }
            self.check_arguments(
                &directive.arguments,
                directive_def.parameters(),
                directive.position,
                ArgumentOwner::Directive(&directive.name),
            );
        }
    }

    // https://spec.graphql.org/October2021/#sec-Argument-Names
    // https://spec.graphql.org/October2021/#sec-Argument-Uniqueness
    // https://spec.graphql.org/October2021/#sec-Required-Arguments
    // https://spec.graphql.org/October2021/#sec-Values-of-Correct-Type
    fn check_arguments(
        &mut self,
        arguments: &'a [ast::Argument],
        params: &IndexMap<String, Parameter>,
        owner_position: ast::AstPos,
        owner: ArgumentOwner<'_>,
    ) {
        let mut seen: HashSet<&str> = HashSet::new();
        for argument in arguments {
            if !seen.insert(&argument.name) {
                self.report(
                    ValidationRule::UniqueArgumentNames,
                    format!("There can be only one argument named \"{}\".", argument.name),
                    vec![argument.position],
                );
                continue;
            }
            let Some(param) = params.get(&argument.name) else {
                self.report(
                    ValidationRule::KnownArgumentNames,
                    format!("Unknown argument \"{}\" on {owner}.", argument.name),
                    vec![argument.position],
                );
                continue;
            };
            if let Err(err) = check_literal(&argument.value, param.type_annotation(), self.schema) {
                let err = CoercionError::new(format!(
                    "Argument < {} > has invalid value < {} >",
                    argument.name, argument.value,
                ))
                .with_reason(err.to_string());
                self.report(ValidationRule::ValuesOfCorrectType, err.to_string(), vec![argument.position]);
            }
        }

        for (name, param) in params {
            if param.is_required() && !seen.contains(name.as_str()) {
                self.report(
                    ValidationRule::ProvidedRequiredArguments,
                    format!(
                        "{} argument \"{name}\" of type \"{}\" is required, but it was not provided.",
                        capitalize(&owner.to_string()),
                        param.type_annotation(),
                    ),
                    vec![owner_position],
                );
            }
        }
    }
}

fn capitalize(s: &str) -> String {
    let mut chars = s.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().chain(chars).collect(),
        None => String::new(),
    }
}
