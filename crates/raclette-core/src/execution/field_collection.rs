use crate::Value;
use crate::directives::InclusionCondition;
use crate::directives::is_included;
use crate::schema::Schema;
use indexmap::IndexMap;
use raclette_parser::ast;
use std::sync::Arc;

/// A field selection reachable from a selection set for one object type,
/// with fragments already flattened away.
///
/// Inclusion conditions from the field and from every enclosing fragment
/// are kept unevaluated, so one collection serves every set of variables.
#[derive(Clone, Debug)]
pub(crate) struct Occurrence {
    pub(crate) conditions: Vec<InclusionCondition>,
    pub(crate) field: Arc<ast::Field>,
    pub(crate) response_key: String,
}

/// Every included selection of one response key, in document order.
#[derive(Clone, Debug)]
pub(crate) struct FieldGroup {
    pub(crate) fields: Vec<Arc<ast::Field>>,
    pub(crate) response_key: String,
}
impl FieldGroup {
    pub(crate) fn first(&self) -> &Arc<ast::Field> {
        &self.fields[0]
    }
}

/// Flattens `selection_set` for values of the object type `type_name`.
/// Fragments whose type condition does not apply to `type_name` are left
/// out; a fragment spread inside its own expansion is ignored.
pub(crate) fn collect_occurrences(
    schema: &Schema,
    document: &ast::Document,
    type_name: &str,
    selection_set: &ast::SelectionSet,
) -> Vec<Occurrence> {
    let mut occurrences = vec![];
    let mut visiting = vec![];
    collect_into(
        schema,
        document,
        type_name,
        selection_set,
        &[],
        &mut visiting,
        &mut occurrences,
    );
    occurrences
}

fn collect_into<'doc>(
    schema: &Schema,
    document: &'doc ast::Document,
    type_name: &str,
    selection_set: &ast::SelectionSet,
    conditions: &[InclusionCondition],
    visiting: &mut Vec<&'doc str>,
    occurrences: &mut Vec<Occurrence>,
) {
    let with_conditions = |directives: &[ast::DirectiveAnnotation]| -> Vec<InclusionCondition> {
        conditions
            .iter()
            .cloned()
            .chain(InclusionCondition::from_directives(directives))
            .collect()
    };

    for selection in &selection_set.selections {
        match selection {
            ast::Selection::Field(field) => occurrences.push(Occurrence {
                conditions: with_conditions(&field.directives),
                field: Arc::new(field.clone()),
                response_key: field.response_key().to_string(),
            }),

            ast::Selection::InlineFragment(inline) => {
                if let Some(type_condition) = &inline.type_condition
                    && !schema.is_subtype(type_name, type_condition)
                {
                    continue;
                }
                collect_into(
                    schema,
                    document,
                    type_name,
                    &inline.selection_set,
                    &with_conditions(&inline.directives),
                    visiting,
                    occurrences,
                );
            }

            ast::Selection::FragmentSpread(spread) => {
                let Some(fragment) = document.fragment(&spread.fragment_name) else {
                    continue;
                };
                if visiting.contains(&fragment.name.as_str())
                    || !schema.is_subtype(type_name, &fragment.type_condition)
                {
                    continue;
                }
                visiting.push(&fragment.name);
                collect_into(
                    schema,
                    document,
                    type_name,
                    &fragment.selection_set,
                    &with_conditions(&spread.directives),
                    visiting,
                    occurrences,
                );
                visiting.pop();
            }
        }
    }
}

/// Evaluates inclusion conditions and merges the surviving occurrences by
/// response key. Groups are ordered by the first included occurrence of
/// each key.
pub(crate) fn group_fields<'a>(
    occurrence_lists: impl IntoIterator<Item = &'a [Occurrence]>,
    variables: &IndexMap<String, Value>,
) -> Vec<FieldGroup> {
    let mut groups: IndexMap<&str, Vec<Arc<ast::Field>>> = IndexMap::new();
    for occurrence in occurrence_lists.into_iter().flatten() {
        if is_included(&occurrence.conditions, variables) {
            groups
                .entry(occurrence.response_key.as_str())
                .or_default()
                .push(occurrence.field.clone());
        }
    }
    groups
        .into_iter()
        .map(|(response_key, fields)| FieldGroup {
            fields,
            response_key: response_key.to_string(),
        })
        .collect()
}
