mod operation_rules_tests;
mod overlapping_fields_tests;
mod selection_rules_tests;

use crate::schema::Schema;
use crate::validation::ValidationError;
use crate::validation::ValidationRule;
use crate::validation::validate;
use raclette_parser::ast;

const KITCHEN_SDL: &str = r#"
type Query {
  recipe(id: Int!): Recipe
  recipes(diet: Diet, first: Int = 10): [Recipe!]!
  search(term: String!): [SearchResult!]!
  node(id: ID!): Node
  filtered(filter: RecipeFilter): [Recipe!]!
}

type Mutation { rateRecipe(id: Int!, stars: Int!): Recipe }

type Subscription {
  recipeAdded: Recipe
  ratingChanged(id: Int!): Int
}

interface Node { id: ID! }

type Recipe implements Node {
  id: ID!
  name: String!
  cookingTime: Int
  ingredients: [Ingredient!]!
}

type Ingredient implements Node {
  id: ID!
  name: String
  quantity: Float
}

union SearchResult = Recipe | Ingredient

enum Diet { VEGAN VEGETARIAN OMNIVORE }

input RecipeFilter {
  name: String!
  diet: Diet
  maxTime: Int = 30
}
"#;

fn kitchen_schema() -> Schema {
    Schema::builder()
        .load_str(None, KITCHEN_SDL)
        .and_then(|builder| builder.build())
        .expect("schema is valid")
}

fn parse(query: &str) -> ast::Document {
    raclette_parser::parse_query(query).expect("query is syntactically valid")
}

fn validate_query(query: &str) -> Vec<ValidationError> {
    validate(&kitchen_schema(), &parse(query))
}

/// `(rule, message)` for every error reported on `query`.
fn errors(query: &str) -> Vec<(ValidationRule, String)> {
    validate_query(query)
        .into_iter()
        .map(|err| (err.rule(), err.message().to_string()))
        .collect()
}

fn rules(query: &str) -> Vec<ValidationRule> {
    validate_query(query).iter().map(ValidationError::rule).collect()
}
