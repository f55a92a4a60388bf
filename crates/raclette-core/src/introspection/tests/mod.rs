use crate::Engine;
use crate::EngineConfig;
use crate::Request;
use crate::schema::Schema;
use crate::types::DEFAULT_DEPRECATION_REASON;
use serde_json::json;

const PANTRY_SDL: &str = r#"
type Query {
  recipe(id: ID!, servings: Int = 4): Recipe
  node: Node
}

"A dish worth cooking."
type Recipe implements Node {
  id: ID!
  name: String!
  tags: [String!]
  oldName: String @deprecated(reason: "Use name.")
}

interface Node { id: ID! }

union Dish = Recipe

enum Diet { VEGAN OMNIVORE @deprecated }

input RecipeFilter { name: String, maxTime: Int = 30 }
"#;

fn pantry_engine(config: EngineConfig) -> Engine {
    let schema = Schema::builder()
        .load_str(None, PANTRY_SDL)
        .expect("pantry schema loads")
        .build()
        .expect("pantry schema builds");
    Engine::builder(schema).config(config).build().expect("engine builds")
}

async fn introspect(query: &str) -> serde_json::Value {
    let response = pantry_engine(EngineConfig::default()).execute(Request::new(query)).await;
    assert!(response.is_ok(), "{:?}", response.errors);
    response.to_json()["data"].clone()
}

mod type_meta_field {
    use super::*;

    #[tokio::test]
    async fn object_type() {
        let data = introspect(
            r#"{ __type(name: "Recipe") {
                kind
                name
                description
                fields { name type { kind name ofType { kind name } } }
                interfaces { name }
                possibleTypes { name }
            } }"#,
        )
        .await;

        assert_eq!(
            data,
            json!({
                "__type": {
                    "kind": "OBJECT",
                    "name": "Recipe",
                    "description": "A dish worth cooking.",
                    "fields": [
                        { "name": "id", "type": { "kind": "NON_NULL", "name": null, "ofType": { "kind": "SCALAR", "name": "ID" } } },
                        { "name": "name", "type": { "kind": "NON_NULL", "name": null, "ofType": { "kind": "SCALAR", "name": "String" } } },
                        { "name": "tags", "type": { "kind": "LIST", "name": null, "ofType": { "kind": "NON_NULL", "name": null } } },
                    ],
                    "interfaces": [{ "name": "Node" }],
                    "possibleTypes": null,
                },
            }),
        );
    }

    #[tokio::test]
    async fn abstract_types_list_their_possible_types() {
        let data = introspect(
            r#"{
                node: __type(name: "Node") { kind possibleTypes { name } }
                dish: __type(name: "Dish") { kind possibleTypes { name } fields { name } }
            }"#,
        )
        .await;

        assert_eq!(
            data,
            json!({
                "node": { "kind": "INTERFACE", "possibleTypes": [{ "name": "Recipe" }] },
                "dish": { "kind": "UNION", "possibleTypes": [{ "name": "Recipe" }], "fields": null },
            }),
        );
    }

    #[tokio::test]
    async fn input_object_fields_and_defaults() {
        let data = introspect(
            r#"{ __type(name: "RecipeFilter") { kind inputFields { name defaultValue type { name } } } }"#,
        )
        .await;

        assert_eq!(
            data,
            json!({
                "__type": {
                    "kind": "INPUT_OBJECT",
                    "inputFields": [
                        { "name": "name", "defaultValue": null, "type": { "name": "String" } },
                        { "name": "maxTime", "defaultValue": "30", "type": { "name": "Int" } },
                    ],
                },
            }),
        );
    }

    #[tokio::test]
    async fn unknown_type_is_null() {
        let data = introspect(r#"{ __type(name: "Fondue") { name } }"#).await;
        assert_eq!(data, json!({ "__type": null }));
    }
}

mod deprecation {
    use super::*;

    #[tokio::test]
    async fn deprecated_fields_are_hidden_unless_requested() {
        let data = introspect(
            r#"{ __type(name: "Recipe") {
                fields { name }
                all: fields(includeDeprecated: true) { name isDeprecated deprecationReason }
            } }"#,
        )
        .await;

        assert_eq!(data["__type"]["fields"].as_array().map(Vec::len), Some(3));
        assert_eq!(
            data["__type"]["all"][3],
            json!({ "name": "oldName", "isDeprecated": true, "deprecationReason": "Use name." }),
        );
        assert_eq!(
            data["__type"]["all"][0],
            json!({ "name": "id", "isDeprecated": false, "deprecationReason": null }),
        );
    }

    #[tokio::test]
    async fn deprecated_enum_values() {
        let data = introspect(
            r#"{ __type(name: "Diet") {
                enumValues { name }
                all: enumValues(includeDeprecated: true) { name isDeprecated deprecationReason }
            } }"#,
        )
        .await;

        assert_eq!(data["__type"]["enumValues"], json!([{ "name": "VEGAN" }]));
        assert_eq!(
            data["__type"]["all"],
            json!([
                { "name": "VEGAN", "isDeprecated": false, "deprecationReason": null },
                { "name": "OMNIVORE", "isDeprecated": true, "deprecationReason": DEFAULT_DEPRECATION_REASON },
            ]),
        );
    }
}

mod schema_meta_field {
    use super::*;

    #[tokio::test]
    async fn root_types() {
        let data = introspect(
            "{ __schema { queryType { name } mutationType { name } subscriptionType { name } } }",
        )
        .await;

        assert_eq!(
            data,
            json!({
                "__schema": { "queryType": { "name": "Query" }, "mutationType": null, "subscriptionType": null },
            }),
        );
    }

    #[tokio::test]
    async fn types_and_directives() {
        let data = introspect("{ __schema { types { name } directives { name locations isRepeatable } } }").await;

        let type_names: Vec<&str> = data["__schema"]["types"]
            .as_array()
            .expect("types is a list")
            .iter()
            .filter_map(|t| t["name"].as_str())
            .collect();
        for name in ["Query", "Recipe", "Node", "Dish", "Diet", "RecipeFilter", "String", "__Schema", "__Type"] {
            assert!(type_names.contains(&name), "{name} missing from {type_names:?}");
        }

        let directives = data["__schema"]["directives"].as_array().expect("directives is a list");
        let skip = directives
            .iter()
            .find(|d| d["name"] == "skip")
            .expect("@skip is listed");
        assert_eq!(skip["isRepeatable"], json!(false));
        assert_eq!(skip["locations"], json!(["FIELD", "FRAGMENT_SPREAD", "INLINE_FRAGMENT"]));
        assert!(directives.iter().any(|d| d["name"] == "include"));
        assert!(directives.iter().any(|d| d["name"] == "deprecated"));
    }

    #[tokio::test]
    async fn field_arguments() {
        let data = introspect(
            "{ __schema { queryType { fields { name args { name defaultValue type { kind name } } } } } }",
        )
        .await;

        assert_eq!(
            data["__schema"]["queryType"]["fields"][0],
            json!({
                "name": "recipe",
                "args": [
                    { "name": "id", "defaultValue": null, "type": { "kind": "NON_NULL", "name": null } },
                    { "name": "servings", "defaultValue": "4", "type": { "kind": "SCALAR", "name": "Int" } },
                ],
            }),
        );
    }
}

mod disabled {
    use super::*;

    #[tokio::test]
    async fn meta_fields_are_rejected() {
        let engine = pantry_engine(EngineConfig {
            introspection: false,
            ..EngineConfig::default()
        });
        let response = engine.execute(Request::new("{ __schema { queryType { name } } }")).await;

        assert_eq!(response.data, None);
        assert_eq!(
            response.errors[0].message,
            "GraphQL introspection has been disabled, but the requested query contained the field \"__schema\".",
        );
    }

    #[tokio::test]
    async fn typename_stays_available() {
        let engine = pantry_engine(EngineConfig {
            introspection: false,
            ..EngineConfig::default()
        });
        let response = engine.execute(Request::new("{ __typename }")).await;

        assert_eq!(response.to_json(), json!({ "data": { "__typename": "Query" } }));
    }
}
