use super::*;

mod fields {
    use super::*;

    #[test]
    fn unknown_field() {
        assert_eq!(
            errors("{ recipe(id: 1) { calories } }"),
            vec![(
                ValidationRule::FieldsOnCorrectType,
                "Cannot query field \"calories\" on type \"Recipe\".".to_string(),
            )],
        );
    }

    #[test]
    fn typename_is_known_on_every_composite_type() {
        assert_eq!(
            errors("{ __typename recipes { __typename } search(term: \"x\") { __typename } }"),
            vec![],
        );
    }

    #[test]
    fn composite_fields_need_a_selection() {
        assert_eq!(
            errors("{ recipe(id: 1) }"),
            vec![(
                ValidationRule::ScalarLeafs,
                "Field \"recipe\" of type \"Recipe\" must have a selection of subfields. \
                Did you mean \"recipe { ... }\"?"
                    .to_string(),
            )],
        );
    }

    #[test]
    fn leaf_fields_have_no_selection() {
        assert_eq!(
            errors("{ recipe(id: 1) { name { length } } }"),
            vec![(
                ValidationRule::ScalarLeafs,
                "Field \"name\" must not have a selection since type \"String!\" has no subfields.".to_string(),
            )],
        );
    }
}

mod arguments {
    use super::*;

    #[test]
    fn duplicate_and_unknown_arguments() {
        assert_eq!(
            errors("{ recipe(id: 1, id: 2, servings: 3) { id } }"),
            vec![
                (
                    ValidationRule::UniqueArgumentNames,
                    "There can be only one argument named \"id\".".to_string(),
                ),
                (
                    ValidationRule::KnownArgumentNames,
                    "Unknown argument \"servings\" on field \"Query.recipe\".".to_string(),
                ),
            ],
        );
    }

    #[test]
    fn required_argument_missing() {
        assert_eq!(
            errors("{ recipe { id } }"),
            vec![(
                ValidationRule::ProvidedRequiredArguments,
                "Field \"Query.recipe\" argument \"id\" of type \"Int!\" is required, but it was not provided."
                    .to_string(),
            )],
        );
    }

    #[test]
    fn arguments_with_defaults_are_optional() {
        assert_eq!(errors("{ recipes { id } }"), vec![]);
    }

    #[test]
    fn literal_of_wrong_type() {
        let errors = validate_query(r#"{ recipe(id: "one") { id } }"#);
        assert_eq!(errors.len(), 1);
        assert_eq!(errors[0].rule(), ValidationRule::ValuesOfCorrectType);
        assert!(
            errors[0].message().starts_with("Argument < id > has invalid value"),
            "{}",
            errors[0].message(),
        );
    }

    #[test]
    fn input_object_literal_is_checked_deeply() {
        assert_eq!(rules("{ filtered(filter: { diet: VEGAN }) { id } }"), vec![ValidationRule::ValuesOfCorrectType]);
        assert_eq!(rules("{ filtered(filter: { name: \"tart\", diet: KETO }) { id } }"), vec![
            ValidationRule::ValuesOfCorrectType
        ]);
        assert_eq!(rules("{ filtered(filter: { name: \"tart\", diet: VEGAN }) { id } }"), vec![]);
    }
}

mod directives {
    use super::*;

    #[test]
    fn unknown_and_repeated_directives() {
        assert_eq!(
            errors("{ recipes @skip(if: true) @skip(if: false) @unknown { id } }"),
            vec![
                (
                    ValidationRule::UniqueDirectivesPerLocation,
                    "The directive \"@skip\" can only be used once at this location.".to_string(),
                ),
                (ValidationRule::KnownDirectives, "Unknown directive \"@unknown\".".to_string()),
            ],
        );
    }

    #[test]
    fn directive_in_wrong_location() {
        assert_eq!(
            errors("query @include(if: true) { recipes { id } }"),
            vec![(
                ValidationRule::KnownDirectives,
                "Directive \"@include\" may not be used on QUERY.".to_string(),
            )],
        );
    }

    #[test]
    fn directive_arguments_are_checked() {
        assert_eq!(
            errors("{ recipes @skip { id } }"),
            vec![(
                ValidationRule::ProvidedRequiredArguments,
                "Directive \"@skip\" argument \"if\" of type \"Boolean!\" is required, but it was not provided."
                    .to_string(),
            )],
        );
    }
}

mod inline_fragments {
    use super::*;

    #[test]
    fn unknown_type_condition() {
        assert_eq!(
            errors("{ recipe(id: 1) { ... on Pie { id } } }"),
            vec![(ValidationRule::KnownTypeNames, "Unknown type \"Pie\".".to_string())],
        );
    }

    #[test]
    fn condition_on_leaf_type() {
        assert_eq!(
            errors("{ recipe(id: 1) { ... on Diet { id } } }"),
            vec![(
                ValidationRule::FragmentsOnCompositeTypes,
                "Fragment cannot condition on non composite type \"Diet\".".to_string(),
            )],
        );
    }

    #[test]
    fn impossible_condition() {
        assert_eq!(
            errors("{ recipe(id: 1) { ... on Ingredient { quantity } } }"),
            vec![(
                ValidationRule::PossibleFragmentSpreads,
                "Fragment cannot be spread here as objects of type \"Recipe\" can never be of type \"Ingredient\"."
                    .to_string(),
            )],
        );
    }

    #[test]
    fn abstract_conditions_that_overlap() {
        assert_eq!(
            errors("{ search(term: \"x\") { ... on Node { id } } node(id: \"1\") { ... on Recipe { name } } }"),
            vec![],
        );
    }

    #[test]
    fn condition_less_fragment_keeps_parent_type() {
        assert_eq!(errors("{ recipe(id: 1) { ... @include(if: true) { name } } }"), vec![]);
    }
}
