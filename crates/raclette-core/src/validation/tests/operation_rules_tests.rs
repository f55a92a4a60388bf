use super::*;
use crate::validation::DocumentValidator;

mod basics {
    use super::*;

    #[test]
    fn valid_document_has_no_errors() {
        let errors = errors(
            r#"
            query Recipe($id: Int!, $diet: Diet = VEGAN) {
              recipe(id: $id) { ...RecipeParts }
              recipes(diet: $diet) { name @include(if: true) }
              search(term: "cheese") {
                __typename
                ... on Recipe { name }
                ... on Ingredient { quantity }
              }
            }

            fragment RecipeParts on Recipe { id name ingredients { name } }
            "#,
        );
        assert_eq!(errors, vec![]);
    }

    #[test]
    fn type_system_definitions_are_not_executable() {
        let mut document = raclette_parser::parse_schema("type Extra { a: Int }").expect("valid schema document");
        document
            .definitions
            .extend(parse("{ recipes { id } }").definitions);

        let errors: Vec<String> = validate(&kitchen_schema(), &document)
            .into_iter()
            .map(|err| err.message().to_string())
            .collect();
        assert_eq!(errors, vec!["The type definition `Extra` is not executable.".to_string()]);
    }
}

mod operation_names {
    use super::*;

    #[test]
    fn operation_names_are_unique() {
        let errors = validate_query("query A { recipes { id } } query A { recipes { name } }");
        assert_eq!(errors.len(), 1);
        assert_eq!(errors[0].rule(), ValidationRule::UniqueOperationNames);
        assert_eq!(errors[0].message(), "There can be only one operation named \"A\".");
        assert_eq!(errors[0].locations().len(), 2);
    }

    #[test]
    fn anonymous_operation_must_be_alone() {
        assert_eq!(
            errors("{ recipes { id } } query B { recipes { id } }"),
            vec![(
                ValidationRule::LoneAnonymousOperation,
                "This anonymous operation must be the only defined operation.".to_string(),
            )],
        );
    }
}

mod subscriptions {
    use super::*;

    #[test]
    fn single_root_field() {
        assert_eq!(
            errors("subscription Feed { recipeAdded { id } ratingChanged(id: 1) }"),
            vec![(
                ValidationRule::SingleFieldSubscriptions,
                "Subscription \"Feed\" must select only one top level field.".to_string(),
            )],
        );
    }

    #[test]
    fn no_introspection_root_field() {
        assert_eq!(
            errors("subscription { __typename }"),
            vec![(
                ValidationRule::SingleFieldSubscriptions,
                "Anonymous Subscription must not select an introspection top level field.".to_string(),
            )],
        );
    }

    #[test]
    fn fragments_count_towards_root_fields() {
        assert_eq!(
            rules("subscription { ...Feed } fragment Feed on Subscription { recipeAdded { id } ratingChanged(id: 1) }"),
            vec![ValidationRule::SingleFieldSubscriptions],
        );
    }
}

mod introspection {
    use super::*;

    const QUERY: &str = "{ __schema { queryType { name } } }";

    #[test]
    fn allowed_by_default() {
        assert_eq!(errors(QUERY), vec![]);
    }

    #[test]
    fn rejected_when_disabled() {
        let schema = kitchen_schema();
        let document = parse(QUERY);
        let errors = DocumentValidator::new(&schema, &document)
            .without_introspection()
            .validate();
        assert_eq!(errors.len(), 1);
        assert_eq!(errors[0].rule(), ValidationRule::NoIntrospection);
        assert_eq!(
            errors[0].message(),
            "GraphQL introspection has been disabled, but the requested query contained the field \"__schema\".",
        );
    }
}
