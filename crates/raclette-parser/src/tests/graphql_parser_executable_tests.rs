//! Tests for parsing operations, fragments, selections and values.

use crate::ast;
use crate::ast::AstPos;
use crate::tests::utils::first_field;
use crate::tests::utils::parse_executable;
use crate::tests::utils::parse_single_operation;

#[test]
fn shorthand_query() {
    let op = parse_single_operation("{ recipe { name } }");
    assert_eq!(op.kind, ast::OperationKind::Query);
    assert!(op.name.is_none());
    assert!(op.is_shorthand());

    let recipe = first_field(&op.selection_set);
    assert_eq!(recipe.name, "recipe");
    assert_eq!(first_field(recipe.selection_set.as_ref().unwrap()).name, "name");
}

#[test]
fn named_operations_of_each_kind() {
    for (source, kind) in [
        ("query Q { a }", ast::OperationKind::Query),
        ("mutation M { a }", ast::OperationKind::Mutation),
        ("subscription S { a }", ast::OperationKind::Subscription),
    ] {
        let op = parse_single_operation(source);
        assert_eq!(op.kind, kind);
        assert!(op.name.is_some());
    }
}

#[test]
fn variable_definitions_with_defaults_and_directives() {
    let op = parse_single_operation(
        "query Recipes($first: Int = 10, $tags: [String!]! @deprecated) { recipes { name } }",
    );
    assert_eq!(op.variable_definitions.len(), 2);

    let first = &op.variable_definitions[0];
    assert_eq!(first.name, "first");
    assert_eq!(first.var_type, ast::Type::Named("Int".to_string()));
    assert_eq!(first.default_value, Some(ast::Value::Int(10)));

    let tags = &op.variable_definitions[1];
    assert_eq!(tags.var_type.to_string(), "[String!]!");
    assert_eq!(tags.directives[0].name, "deprecated");
}

#[test]
fn aliases_arguments_and_directives() {
    let op = parse_single_operation(
        r#"{ cheese: recipe(id: 2, name: "raclette") @include(if: $withCheese) { name } }"#,
    );
    let field = first_field(&op.selection_set);
    assert_eq!(field.alias.as_deref(), Some("cheese"));
    assert_eq!(field.name, "recipe");
    assert_eq!(field.response_key(), "cheese");
    assert_eq!(field.arguments.len(), 2);
    assert_eq!(
        field.argument("name").map(|a| &a.value),
        Some(&ast::Value::String("raclette".to_string())),
    );
    assert_eq!(
        field.directives[0].argument("if").map(|a| &a.value),
        Some(&ast::Value::Variable("withCheese".to_string())),
    );
}

#[test]
fn fragments_spreads_and_inline_fragments() {
    let result = parse_executable(
        "query { search { ...RecipeParts ... on Dish { name } ... @skip(if: true) { id } } }
         fragment RecipeParts on Recipe { name cookingTime }",
    );
    let doc = result.valid_ast().expect("valid document");
    assert_eq!(doc.definitions.len(), 2);

    let op = doc.operations().next().unwrap();
    let search = first_field(&op.selection_set);
    let selections = search.selections();
    assert!(matches!(
        &selections[0],
        ast::Selection::FragmentSpread(spread) if spread.fragment_name == "RecipeParts"
    ));
    assert!(matches!(
        &selections[1],
        ast::Selection::InlineFragment(inline) if inline.type_condition.as_deref() == Some("Dish")
    ));
    assert!(matches!(
        &selections[2],
        ast::Selection::InlineFragment(inline)
            if inline.type_condition.is_none() && inline.directives[0].name == "skip"
    ));

    let fragment = doc.fragment("RecipeParts").unwrap();
    assert_eq!(fragment.type_condition, "Recipe");
    assert_eq!(fragment.selection_set.selections.len(), 2);
}

#[test]
fn every_value_kind() {
    let op = parse_single_operation(
        r#"{ f(a: 1, b: -2.5, c: "s", d: true, e: null, f: MELTED, g: [1, [2]], h: { x: $v, y: [] }) }"#,
    );
    let values: Vec<_> = first_field(&op.selection_set)
        .arguments
        .iter()
        .map(|a| a.value.clone())
        .collect();
    assert_eq!(
        values,
        vec![
            ast::Value::Int(1),
            ast::Value::Float(-2.5),
            ast::Value::String("s".to_string()),
            ast::Value::Boolean(true),
            ast::Value::Null,
            ast::Value::Enum("MELTED".to_string()),
            ast::Value::List(vec![
                ast::Value::Int(1),
                ast::Value::List(vec![ast::Value::Int(2)]),
            ]),
            ast::Value::Object(vec![
                ("x".to_string(), ast::Value::Variable("v".to_string())),
                ("y".to_string(), ast::Value::List(vec![])),
            ]),
        ],
    );
    assert_eq!(values[7].variable_names(), vec!["v"]);
}

/// `true`, `false` and `null` are valid field names.
#[test]
fn keyword_like_field_names() {
    let op = parse_single_operation("{ null true: false }");
    let names: Vec<_> = op
        .selection_set
        .selections
        .iter()
        .map(|s| match s {
            ast::Selection::Field(f) => (f.alias.clone(), f.name.clone()),
            _ => panic!("expected fields"),
        })
        .collect();
    assert_eq!(
        names,
        vec![
            (None, "null".to_string()),
            (Some("true".to_string()), "false".to_string()),
        ],
    );
}

#[test]
fn positions_are_one_based() {
    let op = parse_single_operation("query {\n  recipe\n}");
    assert_eq!(op.position, AstPos { line: 1, column: 1 });
    assert_eq!(
        first_field(&op.selection_set).position,
        AstPos { line: 2, column: 3 },
    );
}
