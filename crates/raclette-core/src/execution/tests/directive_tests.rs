use super::*;
use serde_json::json;

#[tokio::test]
async fn schema_field_directive_transforms_the_resolved_value() {
    let engine = kitchen_engine();
    let response = run(&engine, r#"{ shout(text: "raclette") }"#).await;

    assert_eq!(data(&response), json!({ "shout": "RACLETTE" }));
}

#[tokio::test]
async fn query_field_directive_transforms_the_resolved_value() {
    let engine = kitchen_engine();
    let response = run(&engine, "{ recipe(id: 1) { loud: name @upper name } }").await;

    assert!(response.is_ok(), "{:?}", response.errors);
    assert_eq!(data(&response), json!({ "recipe": { "loud": "TARTIFLETTE", "name": "Tartiflette" } }));
}

#[tokio::test]
async fn argument_directive_transforms_the_coerced_argument() {
    let engine = kitchen_engine();
    let response = engine
        .execute(
            Request::new("query($name: String!) { greeting(name: $name) }")
                .variables_json(serde_json::json!({ "name": "  Abondance " })),
        )
        .await;

    assert_eq!(data(&response), json!({ "greeting": "Bonjour, Abondance!" }));
}

#[tokio::test]
async fn unbound_directives_are_inert() {
    let engine = Engine::builder(kitchen_schema())
        .resolver("Query", "shout", |params: ResolverParams| async move {
            Ok::<_, FieldError>(params.arg("text").cloned().unwrap_or_default())
        })
        .build()
        .expect("engine builds");
    let response = run(&engine, r#"{ shout(text: "raclette") }"#).await;

    assert_eq!(data(&response), json!({ "shout": "raclette" }));
}

#[tokio::test]
async fn failing_hook_is_a_field_error() {
    struct Forbidden;
    impl DirectiveImpl for Forbidden {
        fn on_field_resolved(
            &self,
            _args: &IndexMap<String, Value>,
            _value: Value,
            info: &ResolveInfo,
        ) -> Result<Value, FieldError> {
            Err(FieldError::new(format!("{} is forbidden", info.field_name)))
        }
    }

    let engine = Engine::builder(kitchen_schema())
        .directive("upper", Forbidden)
        .build()
        .expect("engine builds");
    let response = engine
        .execute(Request::new("{ chef @upper }").root_value(Value::object().with("chef", "Marie")))
        .await;

    assert_eq!(data(&response), json!({ "chef": null }));
    assert_eq!(messages(&response), vec!["chef is forbidden"]);
}

#[tokio::test]
async fn query_directives_of_every_merged_occurrence_run() {
    let engine = kitchen_engine();
    let response = run(&engine, "{ recipe(id: 1) { name } recipe(id: 1) { name @upper } }").await;

    assert!(response.is_ok(), "{:?}", response.errors);
    assert_eq!(data(&response), json!({ "recipe": { "name": "TARTIFLETTE" } }));
}

#[tokio::test]
async fn identical_query_directives_on_merged_occurrences_run_once() {
    struct Exclaim;
    impl DirectiveImpl for Exclaim {
        fn on_field_resolved(
            &self,
            _args: &IndexMap<String, Value>,
            value: Value,
            _info: &ResolveInfo,
        ) -> Result<Value, FieldError> {
            Ok(match value {
                Value::String(s) => Value::String(format!("{s}!")),
                other => other,
            })
        }
    }

    let engine = kitchen_builder().directive("upper", Exclaim).build().expect("engine builds");
    let response = run(&engine, "{ recipe(id: 1) { name @upper name @upper } }").await;

    assert_eq!(data(&response), json!({ "recipe": { "name": "Tartiflette!" } }));
}

mod value_hooks {
    use super::*;
    use crate::coercion::ScalarError;
    use crate::coercion::ScalarImpl;
    use raclette_parser::ast;

    const PANTRY_SDL: &str = r#"
    directive @lowercase on SCALAR | INPUT_FIELD_DEFINITION
    directive @stamp(text: String!) on INPUT_OBJECT
    directive @retired on ENUM_VALUE
    directive @redact(field: String!) on OBJECT
    directive @internal on FIELD_DEFINITION | ARGUMENT_DEFINITION | OBJECT

    scalar Tag @lowercase

    enum Grade { FRESH STALE @retired AGED }

    input CheeseFilter @stamp(text: "checked") {
      name: String @lowercase
      grade: Grade
    }

    type Cheese @redact(field: "secret") {
      name: String!
      grade: Grade
      secret: String @internal
    }

    type Vault @internal { id: ID }

    type Query {
      cheese(id: ID, debug: Boolean @internal): Cheese
      describe(filter: CheeseFilter!): String
      tags(tags: [Tag!]!): [Tag!]!
      vault: Vault
    }
    "#;

    struct Tag;
    impl ScalarImpl for Tag {
        fn serialize(&self, value: &Value) -> Result<Value, ScalarError> {
            Ok(value.clone())
        }

        fn parse_value(&self, value: &Value) -> Result<Value, ScalarError> {
            Ok(value.clone())
        }

        fn parse_literal(&self, literal: &ast::Value) -> Result<Value, ScalarError> {
            match literal {
                ast::Value::String(s) => Ok(Value::String(s.clone())),
                _ => Err(ScalarError::new("expected a string")),
            }
        }
    }

    struct Lowercase;
    impl DirectiveImpl for Lowercase {
        fn on_post_input_coercion(&self, _args: &IndexMap<String, Value>, value: Value) -> Result<Value, FieldError> {
            Ok(match value {
                Value::String(s) => Value::String(s.to_lowercase()),
                other => other,
            })
        }
    }

    struct Stamp;
    impl DirectiveImpl for Stamp {
        fn on_post_input_coercion(&self, args: &IndexMap<String, Value>, value: Value) -> Result<Value, FieldError> {
            let text = args.get("text").cloned().unwrap_or_default();
            Ok(match value {
                Value::Object(fields) => Value::Object(fields).with("stamp", text),
                other => other,
            })
        }
    }

    struct Retired;
    impl DirectiveImpl for Retired {
        fn on_post_input_coercion(&self, _args: &IndexMap<String, Value>, value: Value) -> Result<Value, FieldError> {
            Err(FieldError::new(format!(
                "Grade {} is retired",
                value.as_str().unwrap_or_default(),
            )))
        }

        fn on_introspection(
            &self,
            _args: &IndexMap<String, Value>,
            _element: Value,
        ) -> Result<Option<Value>, FieldError> {
            Ok(None)
        }
    }

    struct Redact;
    impl DirectiveImpl for Redact {
        fn on_pre_output_coercion(
            &self,
            args: &IndexMap<String, Value>,
            value: Value,
            _info: &ResolveInfo,
        ) -> Result<Value, FieldError> {
            let field = args.get("field").and_then(Value::as_str).unwrap_or_default().to_string();
            Ok(match value {
                Value::Object(mut fields) if fields.contains_key(&field) => {
                    fields.insert(field, Value::from("[redacted]"));
                    Value::Object(fields)
                }
                other => other,
            })
        }

        fn on_introspection(
            &self,
            args: &IndexMap<String, Value>,
            element: Value,
        ) -> Result<Option<Value>, FieldError> {
            let field = args.get("field").and_then(Value::as_str).unwrap_or_default();
            Ok(Some(element.with("description", format!("Redacts {field}."))))
        }
    }

    struct Internal;
    impl DirectiveImpl for Internal {
        fn on_introspection(
            &self,
            _args: &IndexMap<String, Value>,
            _element: Value,
        ) -> Result<Option<Value>, FieldError> {
            Ok(None)
        }
    }

    fn pantry_engine() -> Engine {
        let schema = Schema::builder()
            .register_scalar("Tag", Tag)
            .load_str(Some("pantry.graphql"), PANTRY_SDL)
            .expect("pantry schema loads")
            .build()
            .expect("pantry schema builds");
        Engine::builder(schema)
            .resolver("Query", "cheese", |_: ResolverParams| async {
                Ok::<_, FieldError>(
                    Value::object()
                        .with("name", "Comté")
                        .with("grade", "AGED")
                        .with("secret", "cave 7"),
                )
            })
            .resolver("Query", "describe", |params: ResolverParams| async move {
                let filter = params.arg("filter").cloned().unwrap_or_default();
                let entry = |key: &str| filter.get(key).and_then(Value::as_str).unwrap_or("-").to_string();
                Ok::<_, FieldError>(Value::String(format!(
                    "{}/{}/{}",
                    entry("name"),
                    entry("grade"),
                    entry("stamp"),
                )))
            })
            .resolver("Query", "tags", |params: ResolverParams| async move {
                Ok::<_, FieldError>(params.arg("tags").cloned().unwrap_or_default())
            })
            .directive("lowercase", Lowercase)
            .directive("stamp", Stamp)
            .directive("retired", Retired)
            .directive("redact", Redact)
            .directive("internal", Internal)
            .build()
            .expect("pantry engine builds")
    }

    #[tokio::test]
    async fn scalar_hooks_run_on_every_list_item() {
        let engine = pantry_engine();
        let response = run(&engine, r#"{ tags(tags: ["Comté", "BRIE"]) }"#).await;

        assert!(response.is_ok(), "{:?}", response.errors);
        assert_eq!(data(&response), json!({ "tags": ["comté", "brie"] }));
    }

    #[tokio::test]
    async fn input_field_and_input_object_hooks_run_innermost_first() {
        let engine = pantry_engine();
        let response = engine
            .execute(
                Request::new("query($filter: CheeseFilter!) { describe(filter: $filter) }")
                    .variables_json(json!({ "filter": { "name": "MORBIER", "grade": "AGED" } })),
            )
            .await;

        assert!(response.is_ok(), "{:?}", response.errors);
        assert_eq!(data(&response), json!({ "describe": "morbier/AGED/checked" }));
    }

    #[tokio::test]
    async fn failing_enum_value_hook_is_a_field_error() {
        let engine = pantry_engine();
        let response = run(&engine, r#"{ describe(filter: { name: "Bleu", grade: STALE }) }"#).await;

        assert_eq!(data(&response), json!({ "describe": null }));
        assert_eq!(messages(&response), vec!["Grade STALE is retired"]);
    }

    #[tokio::test]
    async fn object_type_hook_runs_before_subfields_complete() {
        let engine = pantry_engine();
        let response = run(&engine, "{ cheese { name grade secret } }").await;

        assert!(response.is_ok(), "{:?}", response.errors);
        assert_eq!(
            data(&response),
            json!({ "cheese": { "name": "Comté", "grade": "AGED", "secret": "[redacted]" } }),
        );
    }

    #[tokio::test]
    async fn introspection_hooks_rewrite_and_hide_definitions() {
        let engine = pantry_engine();
        let response = run(
            &engine,
            r#"{
              cheese: __type(name: "Cheese") { name description fields { name } }
              grade: __type(name: "Grade") { enumValues(includeDeprecated: true) { name } }
              query: __type(name: "Query") { fields { name args { name } } }
              vault: __type(name: "Vault") { name }
              __schema { types { name } }
            }"#,
        )
        .await;
        assert!(response.is_ok(), "{:?}", response.errors);
        let data = data(&response);

        assert_eq!(
            data["cheese"],
            json!({ "name": "Cheese", "description": "Redacts secret.", "fields": [{ "name": "name" }, { "name": "grade" }] }),
        );
        assert_eq!(data["grade"], json!({ "enumValues": [{ "name": "FRESH" }, { "name": "AGED" }] }));
        assert_eq!(data["query"]["fields"][0], json!({ "name": "cheese", "args": [{ "name": "id" }] }));
        assert_eq!(data["vault"], json!(null));
        let type_names: Vec<&str> = data["__schema"]["types"]
            .as_array()
            .map(|types| types.iter().filter_map(|t| t["name"].as_str()).collect())
            .unwrap_or_default();
        assert!(type_names.contains(&"Cheese"));
        assert!(!type_names.contains(&"Vault"));
    }
}
