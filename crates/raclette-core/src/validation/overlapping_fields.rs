use crate::types::Field;
use crate::types::GraphQLType;
use crate::types::TypeAnnotation;
use crate::validation::DocumentValidator;
use crate::validation::ValidationRule;
use indexmap::IndexMap;
use raclette_parser::ast;
use std::collections::HashSet;

/// A field selection with the type it is selected on and its definition,
/// when both are known.
#[derive(Clone, Copy)]
struct FieldAndDef<'a> {
    def: Option<&'a Field>,
    field: &'a ast::Field,
    parent_type: Option<&'a GraphQLType>,
}

#[derive(Clone)]
pub(super) struct Conflict {
    locations: Vec<ast::AstPos>,
    reason: String,
}

impl<'a> DocumentValidator<'a> {
    // https://spec.graphql.org/October2021/#sec-Field-Selection-Merging
    pub(super) fn check_overlapping_fields(&mut self, parent_type: &'a GraphQLType, selection_set: &'a ast::SelectionSet) {
        let fields_by_key = self.fields_by_response_key(Some(parent_type), [selection_set]);
        for (response_key, fields) in &fields_by_key {
            for (i, a) in fields.iter().enumerate() {
                for b in &fields[i + 1..] {
                    let pair = (
                        a.field as *const ast::Field as usize,
                        b.field as *const ast::Field as usize,
                    );
                    if self.reported_conflicts.contains(&pair) {
                        continue;
                    }
                    if let Some(conflict) = self.find_conflict(*a, *b, false) {
                        self.reported_conflicts.insert(pair);
                        self.report(
                            ValidationRule::OverlappingFieldsCanBeMerged,
                            format!(
                                "Fields \"{response_key}\" conflict because {}. Use different aliases on the \
                                fields to fetch both if this was intentional.",
                                conflict.reason,
                            ),
                            conflict.locations,
                        );
                    }
                }
            }
        }
    }

    /// Every field selected by `selection_sets` for values of
    /// `parent_type`, with fragments expanded, grouped by response key.
    fn fields_by_response_key(
        &self,
        parent_type: Option<&'a GraphQLType>,
        selection_sets: impl IntoIterator<Item = &'a ast::SelectionSet>,
    ) -> IndexMap<&'a str, Vec<FieldAndDef<'a>>> {
        let mut fields_by_key = IndexMap::new();
        let mut visited_fragments = HashSet::new();
        for selection_set in selection_sets {
            self.collect_fields_and_defs(parent_type, selection_set, &mut visited_fragments, &mut fields_by_key);
        }
        fields_by_key
    }

    fn collect_fields_and_defs(
        &self,
        parent_type: Option<&'a GraphQLType>,
        selection_set: &'a ast::SelectionSet,
        visited_fragments: &mut HashSet<&'a str>,
        fields_by_key: &mut IndexMap<&'a str, Vec<FieldAndDef<'a>>>,
    ) {
        let schema = self.schema;
        for selection in &selection_set.selections {
            match selection {
                ast::Selection::Field(field) => {
                    let def = parent_type.and_then(|parent| schema.field_def(parent.name(), &field.name));
                    fields_by_key
                        .entry(field.response_key())
                        .or_default()
                        .push(FieldAndDef {
                            def,
                            field,
                            parent_type,
                        });
                }
                ast::Selection::InlineFragment(inline) => {
                    let fragment_type = match &inline.type_condition {
                        Some(type_condition) => schema.lookup(type_condition),
                        None => parent_type,
                    };
                    self.collect_fields_and_defs(fragment_type, &inline.selection_set, visited_fragments, fields_by_key);
                }
                ast::Selection::FragmentSpread(spread) => {
                    if !visited_fragments.insert(&spread.fragment_name) {
                        continue;
                    }
                    if let Some(fragment) = self.fragments.get(spread.fragment_name.as_str()).copied() {
                        let fragment_type = schema.lookup(&fragment.type_condition);
                        self.collect_fields_and_defs(fragment_type, &fragment.selection_set, visited_fragments, fields_by_key);
                    }
                }
            }
        }
    }

    /// Whether `a` and `b`, sharing a response key, cannot be merged.
    ///
    /// `parents_exclusive` is set once some ancestors were selected on two
    /// distinct object types, which can never apply to the same value; only
    /// the shapes of the results must agree then.
    ///
    /// Outcomes are memoized per field pair, so documents repeating the same
    /// fragments at every level stay linear to validate. A pair met again
    /// while it is still being compared (through recursive fragments) counts
    /// as mergeable; the cycle itself is reported by the fragment rules.
    fn find_conflict(&mut self, a: FieldAndDef<'a>, b: FieldAndDef<'a>, parents_exclusive: bool) -> Option<Conflict> {
        if std::ptr::eq(a.field, b.field) {
            return None;
        }
        let key = (
            a.field as *const ast::Field as usize,
            b.field as *const ast::Field as usize,
            parents_exclusive,
        );
        if let Some(outcome) = self.compared_fields.get(&key) {
            return outcome.clone();
        }
        self.compared_fields.insert(key, None);
        let outcome = self.compare_fields(a, b, parents_exclusive);
        self.compared_fields.insert(key, outcome.clone());
        outcome
    }

    fn compare_fields(&mut self, a: FieldAndDef<'a>, b: FieldAndDef<'a>, parents_exclusive: bool) -> Option<Conflict> {
        let exclusive = parents_exclusive
            || match (a.parent_type, b.parent_type) {
                (Some(GraphQLType::Object(a_obj)), Some(GraphQLType::Object(b_obj))) => a_obj.name() != b_obj.name(),
                _ => false,
            };
        let locations = vec![a.field.position, b.field.position];

        if !exclusive {
            if a.field.name != b.field.name {
                return Some(Conflict {
                    locations,
                    reason: format!("\"{}\" and \"{}\" are different fields", a.field.name, b.field.name),
                });
            }
            if !same_arguments(&a.field.arguments, &b.field.arguments) {
                return Some(Conflict {
                    locations,
                    reason: "they have differing arguments".to_string(),
                });
            }
        }

        if let (Some(a_def), Some(b_def)) = (a.def, b.def)
            && types_conflict(self, a_def.type_annotation(), b_def.type_annotation())
        {
            return Some(Conflict {
                locations,
                reason: format!(
                    "they return conflicting types \"{}\" and \"{}\"",
                    a_def.type_annotation(),
                    b_def.type_annotation(),
                ),
            });
        }

        let (Some(a_set), Some(b_set)) = (&a.field.selection_set, &b.field.selection_set) else {
            return None;
        };
        let a_type = a.def.and_then(|def| self.schema.lookup(def.type_annotation().innermost_type_name()));
        let b_type = b.def.and_then(|def| self.schema.lookup(def.type_annotation().innermost_type_name()));
        let a_subfields = self.fields_by_response_key(a_type, [a_set]);
        let b_subfields = self.fields_by_response_key(b_type, [b_set]);
        for (response_key, a_fields) in &a_subfields {
            let Some(b_fields) = b_subfields.get(response_key) else {
                continue;
            };
            for a_sub in a_fields {
                for b_sub in b_fields {
                    if let Some(sub_conflict) = self.find_conflict(*a_sub, *b_sub, exclusive) {
                        let mut locations = locations;
                        locations.extend(sub_conflict.locations);
                        return Some(Conflict {
                            locations,
                            reason: format!(
                                "subfields \"{response_key}\" conflict because {}",
                                sub_conflict.reason,
                            ),
                        });
                    }
                }
            }
        }
        None
    }
}

fn same_arguments(a: &[ast::Argument], b: &[ast::Argument]) -> bool {
    a.len() == b.len()
        && a.iter().all(|a_arg| {
            b.iter()
                .any(|b_arg| a_arg.name == b_arg.name && a_arg.value == b_arg.value)
        })
}

/// Whether two return types can never produce the same response shape.
fn types_conflict(validator: &DocumentValidator<'_>, a: &TypeAnnotation, b: &TypeAnnotation) -> bool {
    if a.nullable() != b.nullable() {
        return true;
    }
    match (a, b) {
        (TypeAnnotation::List(a_list), TypeAnnotation::List(b_list)) => types_conflict(
            validator,
            a_list.inner_type_annotation(),
            b_list.inner_type_annotation(),
        ),
        (TypeAnnotation::List(_), _) | (_, TypeAnnotation::List(_)) => true,
        (TypeAnnotation::Named(a_named), TypeAnnotation::Named(b_named)) => {
            let is_leaf = |name: &str| validator.schema.lookup(name).is_some_and(GraphQLType::is_leaf);
            let (a_name, b_name) = (a_named.graphql_type_name(), b_named.graphql_type_name());
            (is_leaf(a_name) || is_leaf(b_name)) && a_name != b_name
        }
    }
}
