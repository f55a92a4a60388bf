use crate::ast;

fn print_query(source: &str) -> String {
    crate::parse_query(source)
        .expect("valid query")
        .to_graphql_string()
}

fn print_schema(source: &str) -> String {
    crate::parse_schema(source)
        .expect("valid schema")
        .to_graphql_string()
}

#[test]
fn prints_operations_and_fragments() {
    let printed = print_query(
        "query Recipes($first: Int = 10, $tags: [String!]!) @live {
            recipes(first: $first, tags: $tags) {
                ...RecipeParts
                ... on Dessert @include(if: true) { sweetness }
                ... { id }
            }
        }
        fragment RecipeParts on Recipe { title: name }",
    );
    assert_eq!(
        printed,
        "query Recipes($first: Int = 10, $tags: [String!]!) @live {
  recipes(first: $first, tags: $tags) {
    ...RecipeParts
    ... on Dessert @include(if: true) {
      sweetness
    }
    ... {
      id
    }
  }
}

fragment RecipeParts on Recipe {
  title: name
}
",
    );
}

#[test]
fn prints_values() {
    let printed = print_query(
        r#"{ f(a: 1.5, b: 1e3, c: "say \"hi\"\n", d: {x: [1, 2], y: {}}, e: null, g: RED) }"#,
    );
    assert_eq!(
        printed,
        r#"{
  f(a: 1.5, b: 1000.0, c: "say \"hi\"\n", d: { x: [1, 2], y: {} }, e: null, g: RED)
}
"#,
    );
}

#[test]
fn value_and_type_display() {
    let value = ast::Value::List(vec![
        ast::Value::Int(-3),
        ast::Value::Variable("limit".to_string()),
        ast::Value::Object(vec![("unit".to_string(), ast::Value::Enum("GRAM".to_string()))]),
    ]);
    assert_eq!(value.to_string(), "[-3, $limit, { unit: GRAM }]");

    let ty = ast::Type::NonNull(Box::new(ast::Type::List(Box::new(ast::Type::Named(
        "Recipe".to_string(),
    )))));
    assert_eq!(ty.to_string(), "[Recipe]!");
    assert_eq!(ty.innermost_name(), "Recipe");
}

#[test]
fn prints_type_system_definitions() {
    let printed = print_schema(
        r#"
        schema { query: Query }
        "A recipe."
        type Recipe implements Node & Dish @key(fields: "id") {
            id: ID!
            "Minutes."
            cookingTime(unit: TimeUnit = MINUTES, rounded: Boolean = false): Int @deprecated(reason: "gone")
        }
        union SearchResult = Recipe | Ingredient
        enum Unit { GRAM KILOGRAM @deprecated }
        input RecipeInput { name: String! tags: [String] = [] }
        scalar Date @specifiedBy(url: "https://example.com")
        directive @round(digits: Int = 0) repeatable on FIELD_DEFINITION | FIELD
        extend type Recipe { rating: Float }
        "#,
    );
    assert_eq!(
        printed,
        r#"schema {
  query: Query
}

"A recipe."
type Recipe implements Node & Dish @key(fields: "id") {
  id: ID!
  "Minutes."
  cookingTime(unit: TimeUnit = MINUTES, rounded: Boolean = false): Int @deprecated(reason: "gone")
}

union SearchResult = Recipe | Ingredient

enum Unit {
  GRAM
  KILOGRAM @deprecated
}

input RecipeInput {
  name: String!
  tags: [String] = []
}

scalar Date @specifiedBy(url: "https://example.com")

directive @round(digits: Int = 0) repeatable on FIELD_DEFINITION | FIELD

extend type Recipe {
  rating: Float
}
"#,
    );
}

#[test]
fn block_string_descriptions_print_as_escaped_strings() {
    let printed = print_schema("\"\"\"\n  Multi\n  line\n\"\"\"\nscalar Date");
    assert_eq!(printed, "\"Multi\\nline\"\nscalar Date\n");
}
