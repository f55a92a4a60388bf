use crate::schema::Schema;
use crate::validation::ValidationError;
use crate::validation::ValidationRule;
use crate::validation::overlapping_fields::Conflict;
use raclette_parser::ast;
use raclette_parser::ast::DirectiveLocation;
use std::collections::HashMap;
use std::collections::HashSet;

pub(crate) struct DocumentValidator<'a> {
    pub(super) allow_introspection: bool,
    /// Outcome of every field pair compared for mergeability, keyed by the
    /// two AST nodes and whether their parents are exclusive.
    pub(super) compared_fields: HashMap<(usize, usize, bool), Option<Conflict>>,
    pub(super) document: &'a ast::Document,
    pub(super) errors: Vec<ValidationError>,
    /// The first definition of each fragment name.
    pub(super) fragments: HashMap<&'a str, &'a ast::FragmentDefinition>,
    /// Field pairs already reported as conflicting.
    pub(super) reported_conflicts: HashSet<(usize, usize)>,
    pub(super) schema: &'a Schema,
}
impl<'a> DocumentValidator<'a> {
    pub fn new(schema: &'a Schema, document: &'a ast::Document) -> Self {
        let mut fragments = HashMap::new();
        for fragment in document.fragments() {
            fragments.entry(fragment.name.as_str()).or_insert(fragment);
        }
        Self {
            allow_introspection: true,
            compared_fields: HashMap::new(),
            document,
            errors: vec![],
            fragments,
            reported_conflicts: HashSet::new(),
            schema,
        }
    }

    /// Rejects every `__schema` and `__type` selection.
    pub fn without_introspection(mut self) -> Self {
        self.allow_introspection = false;
        self
    }

    pub fn validate(mut self) -> Vec<ValidationError> {
        self.check_executable_definitions();
        self.check_operation_names();
        self.check_fragment_names();

        let document = self.document;
        for operation in document.operations() {
            self.check_operation(operation);
        }
        for fragment in document.fragments() {
            self.check_fragment_definition(fragment);
        }

        self.check_unused_fragments();
        self.check_fragment_cycles();
        self.errors
    }

    pub(super) fn report(&mut self, rule: ValidationRule, message: impl Into<String>, locations: Vec<ast::AstPos>) {
        self.errors.push(ValidationError::new(rule, message, locations));
    }

    // https://spec.graphql.org/October2021/#sec-Executable-Definitions
    fn check_executable_definitions(&mut self) {
        let document = self.document;
        for def in &document.definitions {
            if !def.is_executable() {
                self.report(
                    ValidationRule::ExecutableDefinitions,
                    format!("The {} is not executable.", def.describe()),
                    vec![def.position()],
                );
            }
        }
    }

    // https://spec.graphql.org/October2021/#sec-Operation-Name-Uniqueness
    // https://spec.graphql.org/October2021/#sec-Lone-Anonymous-Operation
    fn check_operation_names(&mut self) {
        let document = self.document;
        let operation_count = document.operations().count();
        let mut seen: HashMap<&str, ast::AstPos> = HashMap::new();
        for operation in document.operations() {
            match &operation.name {
                Some(name) => {
                    if let Some(first_pos) = seen.get(name.as_str()) {
                        self.report(
                            ValidationRule::UniqueOperationNames,
                            format!("There can be only one operation named \"{name}\"."),
                            vec![*first_pos, operation.position],
                        );
                    } else {
                        seen.insert(name, operation.position);
                    }
                }
                None if operation_count > 1 => self.report(
                    ValidationRule::LoneAnonymousOperation,
                    "This anonymous operation must be the only defined operation.",
                    vec![operation.position],
                ),
                None => (),
            }
        }
    }

    // https://spec.graphql.org/October2021/#sec-Fragment-Name-Uniqueness
    fn check_fragment_names(&mut self) {
        let document = self.document;
        let mut seen: HashMap<&str, ast::AstPos> = HashMap::new();
        for fragment in document.fragments() {
            if let Some(first_pos) = seen.get(fragment.name.as_str()) {
                self.report(
                    ValidationRule::UniqueFragmentNames,
                    format!("There can be only one fragment named \"{}\".", fragment.name),
                    vec![*first_pos, fragment.position],
                );
            } else {
                seen.insert(&fragment.name, fragment.position);
            }
        }
    }

    fn check_operation(&mut self, operation: &'a ast::OperationDefinition) {
        let location = match operation.kind {
            ast::OperationKind::Query => DirectiveLocation::Query,
            ast::OperationKind::Mutation => DirectiveLocation::Mutation,
            ast::OperationKind::Subscription => DirectiveLocation::Subscription,
        };
        self.check_directives(&operation.directives, location);
        self.check_variable_definitions(operation);

        if operation.kind == ast::OperationKind::Subscription {
            self.check_subscription_root_fields(operation);
        }

        // A missing root type is reported when the operation is selected.
        let schema = self.schema;
        let root_type = schema
            .root_type(operation.kind)
            .and_then(|root| schema.lookup(root.name()));
        if let Some(root_type) = root_type {
            self.check_selection_set(root_type, &operation.selection_set);
        }

        self.check_variable_usages(operation);
    }

    // https://spec.graphql.org/October2021/#sec-Single-root-field
    fn check_subscription_root_fields(&mut self, operation: &'a ast::OperationDefinition) {
        let mut root_fields: Vec<&ast::Field> = vec![];
        let mut visited = HashSet::new();
        self.collect_root_fields(&operation.selection_set, &mut visited, &mut root_fields);

        let mut response_keys: Vec<&str> = vec![];
        for field in &root_fields {
            if !response_keys.contains(&field.response_key()) {
                response_keys.push(field.response_key());
            }
        }
        let subject = match &operation.name {
            Some(name) => format!("Subscription \"{name}\""),
            None => "Anonymous Subscription".to_string(),
        };

        if response_keys.len() > 1 {
            self.report(
                ValidationRule::SingleFieldSubscriptions,
                format!("{subject} must select only one top level field."),
                root_fields.iter().skip(1).map(|field| field.position).collect(),
            );
        }
        for field in root_fields.iter().filter(|field| field.name.starts_with("__")) {
            self.report(
                ValidationRule::SingleFieldSubscriptions,
                format!("{subject} must not select an introspection top level field."),
                vec![field.position],
            );
        }
    }

    fn collect_root_fields(
        &self,
        selection_set: &'a ast::SelectionSet,
        visited: &mut HashSet<&'a str>,
        root_fields: &mut Vec<&'a ast::Field>,
    ) {
        for selection in &selection_set.selections {
            match selection {
                ast::Selection::Field(field) => root_fields.push(field),
                ast::Selection::InlineFragment(inline) => {
                    self.collect_root_fields(&inline.selection_set, visited, root_fields)
                }
                ast::Selection::FragmentSpread(spread) => {
                    if !visited.insert(&spread.fragment_name) {
                        continue;
                    }
                    if let Some(fragment) = self.fragments.get(spread.fragment_name.as_str()).copied() {
                        self.collect_root_fields(&fragment.selection_set, visited, root_fields);
                    }
                }
            }
        }
    }

    // https://spec.graphql.org/October2021/#sec-Fragments-On-Composite-Types
    fn check_fragment_definition(&mut self, fragment: &'a ast::FragmentDefinition) {
        self.check_directives(&fragment.directives, DirectiveLocation::FragmentDefinition);
        let schema = self.schema;
        let Some(type_) = schema.lookup(&fragment.type_condition) else {
            self.report(
                ValidationRule::KnownTypeNames,
                format!("Unknown type \"{}\".", fragment.type_condition),
                vec![fragment.position],
            );
            return;
        };
        if !type_.is_composite() {
            self.report(
                ValidationRule::FragmentsOnCompositeTypes,
                format!(
                    "Fragment \"{}\" cannot condition on non composite type \"{}\".",
                    fragment.name, fragment.type_condition,
                ),
                vec![fragment.position],
            );
            return;
        }
        self.check_selection_set(type_, &fragment.selection_set);
    }

    // https://spec.graphql.org/October2021/#sec-Fragments-Must-Be-Used
    fn check_unused_fragments(&mut self) {
        let document = self.document;
        let mut used: HashSet<&str> = HashSet::new();
        let mut pending: Vec<&str> = vec![];
        for operation in document.operations() {
            pending.extend(spread_names(&operation.selection_set));
        }
        while let Some(name) = pending.pop() {
            if !used.insert(name) {
                continue;
            }
            if let Some(fragment) = self.fragments.get(name).copied() {
                pending.extend(spread_names(&fragment.selection_set));
            }
        }

        for fragment in document.fragments() {
            if !used.contains(fragment.name.as_str()) {
                self.report(
                    ValidationRule::NoUnusedFragments,
                    format!("Fragment \"{}\" is never used.", fragment.name),
                    vec![fragment.position],
                );
            }
        }
    }

    // https://spec.graphql.org/October2021/#sec-Fragment-spreads-must-not-form-cycles
    fn check_fragment_cycles(&mut self) {
        let document = self.document;
        let mut visited: HashSet<&str> = HashSet::new();
        let mut spread_path: Vec<&ast::FragmentSpread> = vec![];
        let mut path_index_by_name: HashMap<&str, usize> = HashMap::new();
        for fragment in document.fragments() {
            self.detect_cycle(fragment, &mut visited, &mut spread_path, &mut path_index_by_name);
        }
    }

    fn detect_cycle(
        &mut self,
        fragment: &'a ast::FragmentDefinition,
        visited: &mut HashSet<&'a str>,
        spread_path: &mut Vec<&'a ast::FragmentSpread>,
        path_index_by_name: &mut HashMap<&'a str, usize>,
    ) {
        if !visited.insert(&fragment.name) {
            return;
        }
        let mut spreads = vec![];
        collect_spreads(&fragment.selection_set, &mut spreads);
        if spreads.is_empty() {
            return;
        }

        path_index_by_name.insert(&fragment.name, spread_path.len());
        for spread in spreads {
            let spread_name = spread.fragment_name.as_str();
            let cycle_index = path_index_by_name.get(spread_name).copied();
            spread_path.push(spread);
            match cycle_index {
                None => {
                    if let Some(target) = self.fragments.get(spread_name).copied() {
                        self.detect_cycle(target, visited, spread_path, path_index_by_name);
                    }
                }
                Some(cycle_index) => {
                    let cycle_path = &spread_path[cycle_index..];
                    let via: Vec<String> = cycle_path[..cycle_path.len() - 1]
                        .iter()
                        .map(|s| format!("\"{}\"", s.fragment_name))
                        .collect();
                    let message = if via.is_empty() {
                        format!("Cannot spread fragment \"{spread_name}\" within itself.")
                    } else {
                        format!("Cannot spread fragment \"{spread_name}\" within itself via {}.", via.join(", "))
                    };
                    let locations = cycle_path.iter().map(|s| s.position).collect();
                    self.report(ValidationRule::NoFragmentCycles, message, locations);
                }
            }
            spread_path.pop();
        }
        path_index_by_name.remove(fragment.name.as_str());
    }
}

/// Every fragment spread in `selection_set`, including those nested in
/// fields and inline fragments.
pub(super) fn collect_spreads<'a>(selection_set: &'a ast::SelectionSet, spreads: &mut Vec<&'a ast::FragmentSpread>) {
    for selection in &selection_set.selections {
        match selection {
            ast::Selection::Field(field) => {
                if let Some(sub_selection_set) = &field.selection_set {
                    collect_spreads(sub_selection_set, spreads);
                }
            }
            ast::Selection::InlineFragment(inline) => collect_spreads(&inline.selection_set, spreads),
            ast::Selection::FragmentSpread(spread) => spreads.push(spread),
        }
    }
}

fn spread_names(selection_set: &ast::SelectionSet) -> Vec<&str> {
    let mut spreads = vec![];
    collect_spreads(selection_set, &mut spreads);
    spreads.into_iter().map(|s| s.fragment_name.as_str()).collect()
}
