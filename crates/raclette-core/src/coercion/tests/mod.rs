mod arguments_tests;
mod output_tests;

use crate::schema::Schema;

pub(super) const RECIPES_SDL: &str = r#"
type Query {
  recipe(id: Int!, servings: Int = 4, diet: Diet, filter: RecipeFilter): Recipe
}

type Recipe { id: Int!, name: String! }

enum Diet { VEGAN VEGETARIAN OMNIVORE }

input RecipeFilter {
  name: String!
  tags: [String!]
  maxTime: Int = 30
  diet: Diet
}
"#;

pub(super) fn recipes_schema() -> Schema {
    Schema::builder()
        .load_str(None, RECIPES_SDL)
        .and_then(|builder| builder.build())
        .expect("schema is valid")
}
