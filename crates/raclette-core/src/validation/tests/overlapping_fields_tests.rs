use super::*;

fn conflict(response_key: &str, reason: &str) -> (ValidationRule, String) {
    (
        ValidationRule::OverlappingFieldsCanBeMerged,
        format!(
            "Fields \"{response_key}\" conflict because {reason}. Use different aliases on the fields to fetch both \
            if this was intentional."
        ),
    )
}

#[test]
fn alias_for_different_fields() {
    assert_eq!(
        errors("{ recipes { title: name title: cookingTime } }"),
        vec![conflict("title", "\"name\" and \"cookingTime\" are different fields")],
    );
}

#[test]
fn differing_arguments() {
    assert_eq!(
        errors("{ recipe(id: 1) { id } recipe(id: 2) { name } }"),
        vec![conflict("recipe", "they have differing arguments")],
    );
}

#[test]
fn identical_fields_merge() {
    assert_eq!(
        errors("{ recipe(id: 1) { id } recipe(id: 1) { name } ... on Query { recipe(id: 1) { id } } }"),
        vec![],
    );
}

#[test]
fn exclusive_parents_still_need_compatible_types() {
    assert_eq!(
        errors(r#"{ search(term: "x") { ... on Recipe { name } ... on Ingredient { name } } }"#),
        vec![conflict("name", "they return conflicting types \"String!\" and \"String\"")],
    );
}

#[test]
fn exclusive_parents_may_select_different_fields() {
    assert_eq!(
        errors(r#"{ search(term: "x") { ... on Recipe { key: id } ... on Ingredient { key: id } } }"#),
        vec![],
    );
    assert_eq!(
        errors(r#"{ search(term: "x") { ... on Recipe { size: cookingTime } ... on Ingredient { size: quantity } } }"#),
        vec![conflict("size", "they return conflicting types \"Int\" and \"Float\"")],
    );
}

#[test]
fn conflicting_subfields() {
    assert_eq!(
        errors("{ recipe(id: 1) { ingredients { n: name } } recipe(id: 1) { ingredients { n: quantity } } }"),
        vec![conflict(
            "recipe",
            "subfields \"ingredients\" conflict because subfields \"n\" conflict because \"name\" and \"quantity\" \
            are different fields",
        )],
    );
}

#[test]
fn conflict_inside_shared_fragment_is_reported_once() {
    assert_eq!(
        rules("{ recipes { ...F } recipe(id: 1) { ...F } } fragment F on Recipe { t: name t: id }"),
        vec![ValidationRule::OverlappingFieldsCanBeMerged],
    );
}

mod repeated_fragments {
    use super::*;

    const STEPS_SDL: &str = "type Query { root: Step } type Step { id: ID!, next: Step }";

    fn steps_errors(query: &str) -> Vec<ValidationRule> {
        let schema = Schema::builder()
            .load_str(None, STEPS_SDL)
            .and_then(|builder| builder.build())
            .expect("schema is valid");
        validate(&schema, &parse(query)).iter().map(ValidationError::rule).collect()
    }

    /// Every level selects `next` twice over the level below it.
    fn doubling_fragments(depth: usize) -> String {
        let mut query = format!("{{ root {{ ...F{depth} }} }}\nfragment F0 on Step {{ id }}\n");
        for level in 1..=depth {
            let below = level - 1;
            query.push_str(&format!(
                "fragment F{level} on Step {{ next {{ ...F{below} }} next {{ ...F{below} }} }}\n"
            ));
        }
        query
    }

    #[test]
    fn deeply_doubling_fragments_validate_quickly() {
        let started = std::time::Instant::now();
        assert_eq!(steps_errors(&doubling_fragments(20)), vec![]);
        assert!(started.elapsed() < std::time::Duration::from_secs(5), "{:?}", started.elapsed());
    }

    #[test]
    fn conflicts_below_doubling_fragments_are_found() {
        let query = doubling_fragments(12).replace("fragment F0 on Step { id }", "fragment F0 on Step { id id: next { id } }");
        assert!(steps_errors(&query).contains(&ValidationRule::OverlappingFieldsCanBeMerged));
    }

    #[test]
    fn recursive_fragments_terminate() {
        let rules = steps_errors("{ root { ...F } } fragment F on Step { next { ...F } next { ...F } }");
        assert!(rules.contains(&ValidationRule::NoFragmentCycles), "{rules:?}");
        assert!(!rules.contains(&ValidationRule::OverlappingFieldsCanBeMerged), "{rules:?}");
    }
}
