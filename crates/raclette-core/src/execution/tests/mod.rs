mod abstract_type_tests;
mod directive_tests;
mod request_tests;

use crate::Engine;
use crate::EngineBuilder;
use crate::Request;
use crate::Response;
use crate::TYPENAME_KEY;
use crate::Value;
use crate::directives::DirectiveImpl;
use crate::execution::FieldError;
use crate::execution::ResolveInfo;
use crate::execution::ResolverParams;
use crate::schema::Schema;
use indexmap::IndexMap;
use std::time::Duration;

const KITCHEN_SDL: &str = r#"
directive @upper on FIELD_DEFINITION | FIELD
directive @trim on ARGUMENT_DEFINITION

type Query {
  recipe(id: Int!): Recipe
  recipes(diet: Diet, first: Int = 2): [Recipe!]!
  strictRecipe: Recipe!
  search(term: String!): [SearchResult!]!
  node(id: ID!): Node
  ratings: [Int!]
  looseRatings: [Int]
  chef: String
  shout(text: String!): String @upper
  greeting(name: String! @trim): String
}

type Mutation {
  addStar(id: Int!): Int!
}

interface Node { id: ID! }

type Recipe implements Node {
  id: ID!
  name: String!
  cookingTime: Int
  diet: Diet
}

type Ingredient implements Node {
  id: ID!
  name: String
}

union SearchResult = Recipe | Ingredient

enum Diet { VEGAN OMNIVORE }
"#;

fn kitchen_schema() -> Schema {
    Schema::builder()
        .load_str(Some("kitchen.graphql"), KITCHEN_SDL)
        .expect("kitchen schema loads")
        .build()
        .expect("kitchen schema builds")
}

/// Recipes 1 and 2 are complete; recipe 3 is missing its (non-null) name.
fn recipe_value(id: i64) -> Option<Value> {
    let (name, cooking_time, diet) = match id {
        1 => (Value::from("Tartiflette"), 45, "OMNIVORE"),
        2 => (Value::from("Ratatouille"), 60, "VEGAN"),
        3 => (Value::Null, 10, "VEGAN"),
        _ => return None,
    };
    Some(
        Value::object()
            .with(TYPENAME_KEY, "Recipe")
            .with("id", id)
            .with("name", name)
            .with("cookingTime", cooking_time)
            .with("diet", diet),
    )
}

fn ingredient_value(id: i64, name: &str) -> Value {
    Value::object()
        .with(TYPENAME_KEY, "Ingredient")
        .with("id", id)
        .with("name", name)
}

struct Chef(&'static str);

struct Upper;
impl DirectiveImpl for Upper {
    fn on_field_resolved(
        &self,
        _args: &IndexMap<String, Value>,
        value: Value,
        _info: &ResolveInfo,
    ) -> Result<Value, FieldError> {
        Ok(match value {
            Value::String(s) => Value::String(s.to_uppercase()),
            other => other,
        })
    }
}

struct Trim;
impl DirectiveImpl for Trim {
    fn on_argument_coerced(&self, _args: &IndexMap<String, Value>, value: Value) -> Result<Value, FieldError> {
        Ok(match value {
            Value::String(s) => Value::String(s.trim().to_string()),
            other => other,
        })
    }
}

/// The kitchen engine, with every resolver bound but no type resolver.
fn kitchen_builder() -> EngineBuilder {
    Engine::builder(kitchen_schema())
        .resolver("Query", "recipe", |params: ResolverParams| async move {
            let id = params.arg("id").and_then(Value::as_i64).unwrap_or_default();
            if id > 90 {
                // Failures finish in reverse id order.
                tokio::time::sleep(Duration::from_millis(((100 - id) * 5) as u64)).await;
                return Err(FieldError::new(format!("Recipe {id} not found")).with_extension("code", "NOT_FOUND"));
            }
            Ok(recipe_value(id).unwrap_or_default())
        })
        .resolver("Query", "recipes", |params: ResolverParams| async move {
            let first = params.arg("first").and_then(Value::as_i64).unwrap_or(10);
            let diet = params.arg("diet").and_then(Value::as_str).map(str::to_string);
            let recipes: Vec<Value> = (1..=2)
                .filter_map(recipe_value)
                .filter(|recipe| diet.is_none() || recipe.get("diet").and_then(Value::as_str) == diet.as_deref())
                .take(first as usize)
                .collect();
            Ok::<_, FieldError>(Value::List(recipes))
        })
        .resolver("Query", "strictRecipe", |_: ResolverParams| async {
            Ok::<_, FieldError>(recipe_value(3).unwrap_or_default())
        })
        .resolver("Query", "search", |_: ResolverParams| async {
            Ok::<_, FieldError>(Value::List(vec![
                recipe_value(1).unwrap_or_default(),
                ingredient_value(10, "Reblochon"),
            ]))
        })
        .resolver("Query", "node", |params: ResolverParams| async move {
            let id = params.arg("id").and_then(Value::as_str).unwrap_or_default().to_string();
            Ok::<_, FieldError>(match id.as_str() {
                "1" => recipe_value(1).unwrap_or_default(),
                // No `__typename`.
                "10" => Value::object().with("id", 10).with("name", "Reblochon"),
                _ => Value::Null,
            })
        })
        .resolver("Query", "ratings", |_: ResolverParams| async {
            Ok::<_, FieldError>(Value::List(vec![Value::from(5), Value::from("five"), Value::from(3)]))
        })
        .resolver("Query", "looseRatings", |_: ResolverParams| async {
            Ok::<_, FieldError>(Value::List(vec![Value::from(5), Value::from("five"), Value::from(3)]))
        })
        .resolver("Query", "chef", |params: ResolverParams| async move {
            Ok::<_, FieldError>(Value::from(params.context::<Chef>().map(|chef| chef.0)))
        })
        .resolver("Query", "shout", |params: ResolverParams| async move {
            Ok::<_, FieldError>(params.arg("text").cloned().unwrap_or_default())
        })
        .resolver("Query", "greeting", |params: ResolverParams| async move {
            let name = params.arg("name").and_then(Value::as_str).unwrap_or_default().to_string();
            Ok::<_, FieldError>(Value::String(format!("Bonjour, {name}!")))
        })
        .directive("upper", Upper)
        .directive("trim", Trim)
}

fn kitchen_engine() -> Engine {
    kitchen_builder().build().expect("kitchen engine builds")
}

async fn run(engine: &Engine, query: &str) -> Response {
    engine.execute(Request::new(query)).await
}

fn data(response: &Response) -> serde_json::Value {
    response.to_json()["data"].clone()
}

fn messages(response: &Response) -> Vec<&str> {
    response.errors.iter().map(|err| err.message.as_str()).collect()
}

fn keys(value: &serde_json::Value) -> Vec<&str> {
    value
        .as_object()
        .map(|fields| fields.keys().map(String::as_str).collect())
        .unwrap_or_default()
}
