use super::*;
use crate::Engine;
use crate::EngineBuilder;
use crate::Request;
use crate::Response;
use crate::Value;
use crate::execution::FieldError;
use crate::execution::ResolverParams;
use futures::StreamExt;
use futures::channel::mpsc;
use futures::stream;
use serde_json::json;
use std::sync::Arc;
use std::sync::Mutex;

fn rating(id: i64, stars: i64) -> Value {
    Value::object().with("id", id).with("stars", stars)
}

fn ratings_builder() -> EngineBuilder {
    Engine::builder(ratings_schema())
        .subscription("Subscription", "ratingChanged", |params: ResolverParams| async move {
            let id = params.arg("id").and_then(Value::as_i64).unwrap_or_default();
            Ok::<_, FieldError>(stream::iter(vec![
                Ok(rating(id, 4)),
                Err(FieldError::new("The oven exploded")),
                Ok(rating(id, 5)),
            ]))
        })
        .subscription("Subscription", "ticks", |_: ResolverParams| async {
            Ok::<_, FieldError>(stream::iter(
                (1..=2).map(|tick| Ok::<_, FieldError>(Value::object().with("ticks", tick))),
            ))
        })
        .subscription("Subscription", "broken", |_: ResolverParams| async {
            Err::<stream::Empty<Result<Value, FieldError>>, _>(
                FieldError::new("No broadcaster").with_extension("code", "UNAVAILABLE"),
            )
        })
}

async fn collect(engine: &Engine, request: Request) -> Vec<serde_json::Value> {
    engine
        .subscribe(request)
        .map(|response: Response| response.to_json())
        .collect()
        .await
}

#[tokio::test]
async fn one_response_per_event() {
    init_tracing();
    let engine = ratings_builder().build().expect("engine builds");
    let responses = collect(
        &engine,
        Request::new("subscription($id: Int!) { ratingChanged(id: $id) { id stars } }")
            .variables_json(json!({ "id": 7 })),
    )
    .await;

    assert_eq!(
        responses,
        vec![
            json!({ "data": { "ratingChanged": { "id": 7, "stars": 4 } } }),
            json!({
                "data": { "ratingChanged": null },
                "errors": [{
                    "message": "The oven exploded",
                    "locations": [{ "line": 1, "column": 27 }],
                    "path": ["ratingChanged"],
                }],
            }),
            json!({ "data": { "ratingChanged": { "id": 7, "stars": 5 } } }),
        ],
    );
}

#[tokio::test]
async fn events_keyed_by_the_root_field_are_unwrapped() {
    let engine = ratings_builder().build().expect("engine builds");
    let responses = collect(&engine, Request::new("subscription { count: ticks }")).await;

    assert_eq!(
        responses,
        vec![json!({ "data": { "count": 1 } }), json!({ "data": { "count": 2 } })],
    );
}

#[tokio::test]
async fn failing_event_source_ends_the_subscription() {
    let engine = ratings_builder().build().expect("engine builds");
    let responses = collect(&engine, Request::new("subscription { broken }")).await;

    assert_eq!(
        responses,
        vec![json!({
            "errors": [{
                "message": "No broadcaster",
                "locations": [{ "line": 1, "column": 16 }],
                "path": ["broken"],
                "extensions": { "code": "UNAVAILABLE" },
            }],
        })],
    );
}

#[tokio::test]
async fn unbound_subscription_field() {
    let engine = Engine::builder(ratings_schema()).build().expect("engine builds");
    let responses = collect(&engine, Request::new("subscription { ticks }")).await;

    assert_eq!(responses.len(), 1);
    assert_eq!(responses[0]["data"], serde_json::Value::Null);
    assert_eq!(
        responses[0]["errors"][0]["message"],
        "Subscription field \"Subscription.ticks\" has no subscription resolver.",
    );
}

#[tokio::test]
async fn request_errors_yield_a_single_response() {
    let engine = ratings_builder().build().expect("engine builds");

    let responses = collect(&engine, Request::new("subscription { ticks broken }")).await;
    assert_eq!(responses.len(), 1);
    assert!(responses[0].get("data").is_none());
    assert_eq!(responses[0]["errors"].as_array().map(Vec::len), Some(1));

    let responses = collect(&engine, Request::new("subscription { ratingChanged(id: $id) { id } }")).await;
    assert_eq!(responses.len(), 1);
    assert!(responses[0].get("data").is_none());
}

#[tokio::test]
async fn queries_through_subscribe_yield_their_response() {
    let engine = ratings_builder().build().expect("engine builds");
    let responses = collect(&engine, Request::new("{ chef }").root_value(Value::object().with("chef", "Marie"))).await;

    assert_eq!(responses, vec![json!({ "data": { "chef": "Marie" } })]);
}

#[tokio::test]
async fn dropping_the_stream_drops_the_event_source() {
    let (sender, receiver) = mpsc::unbounded::<Result<Value, FieldError>>();
    let receiver = Arc::new(Mutex::new(Some(receiver)));
    let engine = Engine::builder(ratings_schema())
        .subscription("Subscription", "ticks", move |_: ResolverParams| {
            let receiver = receiver.lock().expect("receiver lock").take();
            async move { receiver.ok_or_else(|| FieldError::new("already subscribed")) }
        })
        .build()
        .expect("engine builds");

    let mut responses = engine.subscribe(Request::new("subscription { ticks }"));
    sender
        .unbounded_send(Ok(Value::object().with("ticks", 1)))
        .expect("subscription is open");
    let first = responses.next().await.expect("one response");
    assert_eq!(first.to_json(), json!({ "data": { "ticks": 1 } }));
    assert!(!sender.is_closed());

    drop(responses);
    assert!(sender.is_closed());
}

#[tokio::test]
async fn response_streams_can_be_spawned() {
    let engine = ratings_builder().build().expect("engine builds");
    let responses = engine.subscribe(Request::new("subscription { ticks }"));
    let handle = tokio::spawn(async move { responses.count().await });

    assert_eq!(handle.await.expect("task completes"), 2);
}
