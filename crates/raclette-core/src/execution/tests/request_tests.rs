use super::*;
use crate::EngineConfig;
use serde_json::json;
use std::sync::Arc;
use std::sync::atomic::AtomicUsize;
use std::sync::atomic::Ordering;

mod variables {
    use super::*;

    #[tokio::test]
    async fn variables_from_json() {
        let engine = kitchen_engine();
        let response = engine
            .execute(Request::new("query($id: Int!) { recipe(id: $id) { name } }").variables_json(json!({ "id": 2 })))
            .await;

        assert_eq!(data(&response), json!({ "recipe": { "name": "Ratatouille" } }));
    }

    #[tokio::test]
    async fn variable_defaults_apply() {
        let engine = kitchen_engine();
        let response = run(&engine, "query($id: Int! = 1) { recipe(id: $id) { name } }").await;

        assert_eq!(data(&response), json!({ "recipe": { "name": "Tartiflette" } }));
    }

    #[tokio::test]
    async fn missing_required_variable_stops_the_request() {
        let engine = kitchen_engine();
        let response = run(&engine, "query($id: Int!) { recipe(id: $id) { name } }").await;

        assert_eq!(response.data, None);
        assert_eq!(
            response.to_json(),
            json!({
                "errors": [{
                    "message": "Variable < $id > of required type < Int! > was not provided.",
                    "locations": [{ "line": 1, "column": 7 }],
                }],
            }),
        );
    }

    #[tokio::test]
    async fn non_object_json_means_no_variables() {
        let engine = kitchen_engine();
        let response = engine
            .execute(Request::new("query($id: Int = 2) { recipe(id: 1) { name } other: recipe(id: $id) { name } }")
                .variables_json(json!([1, 2])))
            .await;

        assert_eq!(
            data(&response),
            json!({ "recipe": { "name": "Tartiflette" }, "other": { "name": "Ratatouille" } }),
        );
    }
}

mod request_errors {
    use super::*;

    #[tokio::test]
    async fn syntax_errors() {
        let engine = kitchen_engine();
        let response = run(&engine, "{ recipe(id: 1) { name }").await;

        assert_eq!(response.data, None);
        assert!(!response.errors.is_empty());
        assert!(
            response.errors[0].message.starts_with("Syntax Error: "),
            "{}",
            response.errors[0].message,
        );
        assert_eq!(response.errors[0].locations.len(), 1);
    }

    #[tokio::test]
    async fn validation_errors_prevent_execution() {
        let engine = kitchen_engine();
        let response = run(&engine, "{ recipe(id: 1) { unknown } other: recipe(id: 99) { id } }").await;

        assert_eq!(response.data, None);
        assert_eq!(messages(&response), vec!["Cannot query field \"unknown\" on type \"Recipe\"."]);
        assert_eq!(response.errors[0].locations[0].line, 1);
    }

    #[tokio::test]
    async fn no_resolver_runs_for_an_invalid_document() {
        let calls = Arc::new(AtomicUsize::new(0));
        let counted = calls.clone();
        let engine = kitchen_builder()
            .resolver("Query", "recipe", move |_: ResolverParams| {
                counted.fetch_add(1, Ordering::SeqCst);
                async { Ok::<_, FieldError>(recipe_value(1).unwrap_or_default()) }
            })
            .build()
            .expect("engine builds");

        let response = run(&engine, "{ recipe(id: 1) { name } other: recipe(id: 2) { unknown } }").await;
        assert_eq!(response.data, None);
        assert_eq!(calls.load(Ordering::SeqCst), 0);

        run(&engine, "{ recipe(id: 1) { name } }").await;
        assert_eq!(calls.load(Ordering::SeqCst), 1);
    }

    #[tokio::test]
    async fn operation_selection() {
        let engine = kitchen_engine();
        let document = "query A { recipe(id: 1) { name } } query B { recipe(id: 2) { name } }";

        let response = run(&engine, document).await;
        assert_eq!(
            messages(&response),
            vec!["Must provide operation name if query contains multiple operations."],
        );

        let response = engine.execute(Request::new(document).operation_name("B")).await;
        assert_eq!(data(&response), json!({ "recipe": { "name": "Ratatouille" } }));

        let response = engine.execute(Request::new(document).operation_name("C")).await;
        assert_eq!(response.data, None);
        assert_eq!(messages(&response), vec!["Unknown operation named \"C\"."]);
    }

    #[tokio::test]
    async fn unconfigured_root_type() {
        let schema = Schema::builder()
            .load_str(None, "type Query { chef: String }")
            .expect("schema loads")
            .build()
            .expect("schema builds");
        let engine = Engine::builder(schema).build().expect("engine builds");
        let response = run(&engine, "mutation { chef }").await;

        assert_eq!(response.data, None);
        assert_eq!(messages(&response), vec!["Schema is not configured for mutations."]);
        assert_eq!(response.errors[0].locations[0].column, 1);
    }
}

mod prepared_documents {
    use super::*;

    #[tokio::test]
    async fn prepared_documents_execute_many_times() {
        let engine = kitchen_engine();
        let prepared = engine
            .prepare("query($id: Int!) { recipe(id: $id) { ...Name } } fragment Name on Recipe { name }")
            .expect("document is valid");

        let mut names = vec![];
        for id in [1, 2] {
            let response = engine
                .execute_prepared(&prepared, Request::new("").variables_json(json!({ "id": id })))
                .await;
            names.push(data(&response)["recipe"]["name"].clone());
        }
        assert_eq!(names, vec![json!("Tartiflette"), json!("Ratatouille")]);
    }

    #[tokio::test]
    async fn field_collection_is_cached_per_selection_set() {
        let engine = kitchen_engine();
        let prepared = engine
            .prepare("{ recipes { ...F } } fragment F on Recipe { name }")
            .expect("document is valid");

        let response = engine.execute_prepared(&prepared, Request::new("")).await;
        assert!(response.is_ok(), "{:?}", response.errors);
        // The root selection on Query, then the `recipes` selection on Recipe.
        assert_eq!(prepared.cached_collections(), 2);

        engine.execute_prepared(&prepared, Request::new("")).await;
        assert_eq!(prepared.cached_collections(), 2);
    }

    #[test]
    fn invalid_documents_yield_the_error_response() {
        let engine = kitchen_engine();
        let response = engine.prepare("{ recipes }").expect_err("document is invalid");

        assert_eq!(response.data, None);
        assert_eq!(response.errors.len(), 1);
    }
}

mod config {
    use super::*;

    #[test]
    fn config_deserializes_with_defaults() {
        let config: EngineConfig = serde_json::from_value(json!({ "introspection": false })).expect("valid config");

        assert_eq!(
            config,
            EngineConfig {
                introspection: false,
                max_errors: None,
                serial_mutations: true,
            },
        );
    }
}
