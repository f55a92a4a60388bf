use crate::Engine;
use crate::Request;
use crate::Value;
use crate::execution::FieldError;
use crate::execution::ResolverParams;
use crate::schema::Schema;
use futures::StreamExt;
use futures::stream;
use serde_json::json;

const SDL: &str = r#"
type Query {
  dish(name: String!): Dish
}

type Subscription {
  cheeseMelted: Int!
}

"A dish from Savoy."
type Dish {
  name: String!
  cheese: String
}
"#;

fn engine() -> Engine {
    let schema = Schema::builder()
        .load_str(Some("savoy.graphql"), SDL)
        .expect("schema loads")
        .build()
        .expect("schema builds");
    Engine::builder(schema)
        .resolver("Query", "dish", |params: ResolverParams| async move {
            let name = params.arg("name").and_then(Value::as_str).unwrap_or_default().to_string();
            if name != "Tartiflette" {
                return Err(FieldError::new(format!("No dish named {name}")));
            }
            Ok(Value::object().with("name", name).with("cheese", "Reblochon"))
        })
        .subscription("Subscription", "cheeseMelted", |_: ResolverParams| async {
            Ok::<_, FieldError>(stream::iter([10, 20].map(|grams| Ok::<_, FieldError>(Value::from(grams)))))
        })
        .build()
        .expect("engine builds")
}

#[tokio::test]
async fn queries_execute_end_to_end() {
    let response = engine()
        .execute(Request::new(r#"{ dish(name: "Tartiflette") { name cheese } }"#))
        .await;

    assert_eq!(
        response.to_json(),
        json!({ "data": { "dish": { "name": "Tartiflette", "cheese": "Reblochon" } } }),
    );
}

#[tokio::test]
async fn field_errors_are_reported_with_their_path() {
    let response = engine()
        .execute(Request::new(r#"{ dish(name: "Fondue") { name } }"#))
        .await;

    assert_eq!(
        response.to_json(),
        json!({
            "data": { "dish": null },
            "errors": [{
                "message": "No dish named Fondue",
                "locations": [{ "line": 1, "column": 3 }],
                "path": ["dish"],
            }],
        }),
    );
}

#[tokio::test]
async fn subscriptions_stream_responses() {
    let responses: Vec<serde_json::Value> = engine()
        .subscribe(Request::new("subscription { cheeseMelted }"))
        .map(|response| response.to_json())
        .collect()
        .await;

    assert_eq!(
        responses,
        vec![
            json!({ "data": { "cheeseMelted": 10 } }),
            json!({ "data": { "cheeseMelted": 20 } }),
        ],
    );
}

#[test]
fn parser_is_reexported() {
    let document = crate::parser::parse_query("{ dish(name: \"Tartiflette\") { name } }").expect("query parses");
    assert_eq!(document.operations().count(), 1);
}
