use crate::coercion::CoercionError;
use crate::coercion::check_literal;
use crate::types::GraphQLType;
use crate::types::Parameter;
use crate::types::TypeAnnotation;
use crate::validation::DocumentValidator;
use crate::validation::ValidationRule;
use indexmap::IndexMap;
use raclette_parser::ast;
use raclette_parser::ast::DirectiveLocation;
use std::collections::HashMap;
use std::collections::HashSet;

/// A variable reference together with the type expected where it appears.
struct VariableUsage<'a> {
    /// `None` when the expected type is unknown (e.g. an undefined
    /// argument); such usages only count as uses.
    location_type: Option<TypeAnnotation>,
    /// Whether the argument or input field the variable is passed to has a
    /// default value.
    location_has_default: bool,
    name: &'a str,
    /// The argument the variable is written in.
    position: ast::AstPos,
}

impl<'a> DocumentValidator<'a> {
    // https://spec.graphql.org/October2021/#sec-Variable-Uniqueness
    // https://spec.graphql.org/October2021/#sec-Variables-Are-Input-Types
    pub(super) fn check_variable_definitions(&mut self, operation: &'a ast::OperationDefinition) {
        let schema = self.schema;
        let mut seen: HashSet<&str> = HashSet::new();
        for var_def in &operation.variable_definitions {
            if !seen.insert(&var_def.name) {
                self.report(
                    ValidationRule::UniqueVariableNames,
                    format!("There can be only one variable named \"${}\".", var_def.name),
                    vec![var_def.position],
                );
            }
            self.check_directives(&var_def.directives, DirectiveLocation::VariableDefinition);

            let var_type = TypeAnnotation::from_ast_type(&var_def.var_type);
            let Some(named_type) = schema.lookup(var_type.innermost_type_name()) else {
                self.report(
                    ValidationRule::KnownTypeNames,
                    format!("Unknown type \"{}\".", var_type.innermost_type_name()),
                    vec![var_def.position],
                );
                continue;
            };
            if !named_type.is_input_type() {
                self.report(
                    ValidationRule::VariablesAreInputTypes,
                    format!("Variable \"${}\" cannot be non-input type \"{var_type}\".", var_def.name),
                    vec![var_def.position],
                );
                continue;
            }

            if let Some(default_value) = &var_def.default_value
                && let Err(err) = check_literal(default_value, &var_type, schema)
            {
                let err = CoercionError::new(format!(
                    "Variable < ${} > has invalid default value < {default_value} >",
                    var_def.name,
                ))
                .with_reason(err.to_string());
                self.report(ValidationRule::ValuesOfCorrectType, err.to_string(), vec![var_def.position]);
            }
        }
    }

    // https://spec.graphql.org/October2021/#sec-All-Variable-Uses-Defined
    // https://spec.graphql.org/October2021/#sec-All-Variables-Used
    // https://spec.graphql.org/October2021/#sec-All-Variable-Usages-are-Allowed
    pub(super) fn check_variable_usages(&mut self, operation: &'a ast::OperationDefinition) {
        let schema = self.schema;
        let mut usages = vec![];
        let mut visited_fragments = HashSet::new();
        self.collect_directive_usages(&operation.directives, &mut usages);
        if let Some(root_type) = schema
            .root_type(operation.kind)
            .and_then(|root| schema.lookup(root.name()))
        {
            self.collect_usages(Some(root_type), &operation.selection_set, &mut visited_fragments, &mut usages);
        }

        let definitions: HashMap<&str, &ast::VariableDefinition> = operation
            .variable_definitions
            .iter()
            .map(|def| (def.name.as_str(), def))
            .collect();
        let operation_suffix = match &operation.name {
            Some(name) => format!(" by operation \"{name}\""),
            None => String::new(),
        };

        for usage in &usages {
            let Some(var_def) = definitions.get(usage.name) else {
                self.report(
                    ValidationRule::NoUndefinedVariables,
                    format!("Variable \"${}\" is not defined{operation_suffix}.", usage.name),
                    vec![usage.position, operation.position],
                );
                continue;
            };
            let Some(location_type) = &usage.location_type else {
                continue;
            };
            let var_type = TypeAnnotation::from_ast_type(&var_def.var_type);
            if !is_variable_usage_allowed(self, var_def, &var_type, location_type, usage.location_has_default) {
                self.report(
                    ValidationRule::VariablesInAllowedPosition,
                    format!(
                        "Variable \"${}\" of type \"{var_type}\" used in position expecting type \"{location_type}\".",
                        usage.name,
                    ),
                    vec![var_def.position, usage.position],
                );
            }
        }

        let used: HashSet<&str> = usages.iter().map(|usage| usage.name).collect();
        let unused_suffix = match &operation.name {
            Some(name) => format!(" in operation \"{name}\""),
            None => String::new(),
        };
        for var_def in &operation.variable_definitions {
            if !used.contains(var_def.name.as_str()) {
                self.report(
                    ValidationRule::NoUnusedVariables,
                    format!("Variable \"${}\" is never used{unused_suffix}.", var_def.name),
                    vec![var_def.position],
                );
            }
        }
    }

    fn collect_usages(
        &self,
        parent_type: Option<&'a GraphQLType>,
        selection_set: &'a ast::SelectionSet,
        visited_fragments: &mut HashSet<&'a str>,
        usages: &mut Vec<VariableUsage<'a>>,
    ) {
        let schema = self.schema;
        for selection in &selection_set.selections {
            self.collect_directive_usages(selection.directives(), usages);
            match selection {
                ast::Selection::Field(field) => {
                    let field_def = parent_type.and_then(|parent| schema.field_def(parent.name(), &field.name));
                    for argument in &field.arguments {
                        let param = field_def.and_then(|def| def.parameters().get(&argument.name));
                        collect_value_usages(self, &argument.value, param, argument.position, usages);
                    }
                    if let Some(sub_selection_set) = &field.selection_set {
                        let field_type = field_def
                            .and_then(|def| schema.lookup(def.type_annotation().innermost_type_name()));
                        self.collect_usages(field_type, sub_selection_set, visited_fragments, usages);
                    }
                }
                ast::Selection::InlineFragment(inline) => {
                    let fragment_type = match &inline.type_condition {
                        Some(type_condition) => schema.lookup(type_condition),
                        None => parent_type,
                    };
                    self.collect_usages(fragment_type, &inline.selection_set, visited_fragments, usages);
                }
                ast::Selection::FragmentSpread(spread) => {
                    if !visited_fragments.insert(&spread.fragment_name) {
                        continue;
                    }
                    if let Some(fragment) = self.fragments.get(spread.fragment_name.as_str()).copied() {
                        self.collect_directive_usages(&fragment.directives, usages);
                        let fragment_type = schema.lookup(&fragment.type_condition);
                        self.collect_usages(fragment_type, &fragment.selection_set, visited_fragments, usages);
                    }
                }
            }
        }
    }

    fn collect_directive_usages(&self, directives: &'a [ast::DirectiveAnnotation], usages: &mut Vec<VariableUsage<'a>>) {
        for directive in directives {
            let directive_def = self.schema.directive(&directive.name);
            for argument in &directive.arguments {
                let param = directive_def.and_then(|def| def.parameters().get(&argument.name));
                collect_value_usages(self, &argument.value, param, argument.position, usages);
            }
        }
    }
}

/// Records every variable in `value`, which is passed to `param`.
fn collect_value_usages<'a>(
    validator: &DocumentValidator<'a>,
    value: &'a ast::Value,
    param: Option<&Parameter>,
    position: ast::AstPos,
    usages: &mut Vec<VariableUsage<'a>>,
) {
    let location = param.map(|param| (param.type_annotation().clone(), param.default_value().is_some()));
    collect_nested_usages(validator, value, location, position, usages);
}

fn collect_nested_usages<'a>(
    validator: &DocumentValidator<'a>,
    value: &'a ast::Value,
    location: Option<(TypeAnnotation, bool)>,
    position: ast::AstPos,
    usages: &mut Vec<VariableUsage<'a>>,
) {
    match value {
        ast::Value::Variable(name) => {
            let (location_type, location_has_default) = match location {
                Some((annot, has_default)) => (Some(annot), has_default),
                None => (None, false),
            };
            usages.push(VariableUsage {
                location_type,
                location_has_default,
                name,
                position,
            });
        }

        ast::Value::List(items) => {
            let item_location = location.and_then(|(annot, _)| {
                annot
                    .as_list_annotation()
                    .map(|list| (list.inner_type_annotation().clone(), false))
            });
            for item in items {
                collect_nested_usages(validator, item, item_location.clone(), position, usages);
            }
        }

        ast::Value::Object(fields) => {
            let input_fields: Option<&IndexMap<String, Parameter>> = location
                .as_ref()
                .and_then(|(annot, _)| annot.as_named_annotation())
                .and_then(|named| validator.schema.lookup(named.graphql_type_name()))
                .and_then(GraphQLType::as_input_object)
                .map(|input| input.fields());
            for (field_name, field_value) in fields {
                let field_param = input_fields.and_then(|input_fields| input_fields.get(field_name));
                collect_value_usages(validator, field_value, field_param, position, usages);
            }
        }

        _ => (),
    }
}

fn is_variable_usage_allowed(
    validator: &DocumentValidator<'_>,
    var_def: &ast::VariableDefinition,
    var_type: &TypeAnnotation,
    location_type: &TypeAnnotation,
    location_has_default: bool,
) -> bool {
    if !location_type.nullable() && var_type.nullable() {
        let has_non_null_default = matches!(&var_def.default_value, Some(default) if *default != ast::Value::Null);
        if !has_non_null_default && !location_has_default {
            return false;
        }
        return var_type.is_subtype_of(validator.schema, &location_type.with_nullable(true));
    }
    var_type.is_subtype_of(validator.schema, location_type)
}
