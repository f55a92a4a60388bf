use super::*;
use serde_json::json;

#[tokio::test]
async fn union_members_resolve_through_typename() {
    let engine = kitchen_engine();
    let response = run(
        &engine,
        r#"{ search(term: "cheese") {
            __typename
            ... on Recipe { title: name cookingTime }
            ... on Ingredient { label: name }
        } }"#,
    )
    .await;

    assert!(response.is_ok(), "{:?}", response.errors);
    assert_eq!(
        data(&response),
        json!({
            "search": [
                { "__typename": "Recipe", "title": "Tartiflette", "cookingTime": 45 },
                { "__typename": "Ingredient", "label": "Reblochon" },
            ],
        }),
    );
}

#[tokio::test]
async fn interface_fields_and_fragments() {
    let engine = kitchen_engine();
    let response = run(&engine, r#"{ node(id: "1") { id ... on Recipe { diet } } }"#).await;

    assert_eq!(data(&response), json!({ "node": { "id": "1", "diet": "OMNIVORE" } }));
}

#[tokio::test]
async fn value_without_typename_needs_a_type_resolver() {
    let engine = kitchen_engine();
    let response = run(&engine, r#"{ node(id: "10") { id } }"#).await;

    assert_eq!(data(&response), json!({ "node": null }));
    assert_eq!(
        messages(&response),
        vec![
            "Abstract type \"Node\" must resolve to an Object type at runtime for field \"Query.node\". Either the \
            \"Node\" type should have a type resolver or the value should carry a \"__typename\" key.",
        ],
    );
}

#[tokio::test]
async fn bound_type_resolver_wins_over_typename() {
    let engine = kitchen_builder()
        .type_resolver("Node", |value: &Value, _: &ResolveInfo| {
            Some(if value.get("cookingTime").is_some() { "Recipe" } else { "Ingredient" }.to_string())
        })
        .build()
        .expect("engine builds");
    let response = run(&engine, r#"{ node(id: "10") { __typename id } }"#).await;

    assert!(response.is_ok(), "{:?}", response.errors);
    assert_eq!(data(&response), json!({ "node": { "__typename": "Ingredient", "id": "10" } }));
}

#[tokio::test]
async fn runtime_type_must_be_a_possible_type() {
    let engine = kitchen_builder()
        .type_resolver("Node", |_: &Value, _: &ResolveInfo| Some("Query".to_string()))
        .build()
        .expect("engine builds");
    let response = run(&engine, r#"{ node(id: "1") { id } }"#).await;
    assert_eq!(
        messages(&response),
        vec!["Runtime Object type < Query > is not a possible type for < Node >."],
    );

    let engine = kitchen_builder()
        .type_resolver("Node", |_: &Value, _: &ResolveInfo| Some("Cheese".to_string()))
        .build()
        .expect("engine builds");
    let response = run(&engine, r#"{ node(id: "1") { id } }"#).await;
    assert_eq!(
        messages(&response),
        vec!["Abstract type \"Node\" was resolved to a type \"Cheese\" that does not exist inside the schema."],
    );
    assert_eq!(data(&response), json!({ "node": null }));
}
