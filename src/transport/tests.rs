use std::sync::Arc;

use axum::Router;
use axum::body::Body;
use axum::http::{Request, StatusCode};
use serde_json::{Value, json};
use tower::ServiceExt;

use super::{AppState, build_router};
use crate::broker::memory::MemoryBroker;
use crate::config::PurgeSettings;
use crate::explorer::Explorer;

fn test_app() -> Router {
    let broker = Arc::new(MemoryBroker::new());
    let explorer = Explorer::new(
        broker,
        PurgeSettings {
            batch_size: 100,
            wait_timeout_ms: 10,
        },
    );
    build_router(Arc::new(AppState {
        explorer,
        broker_endpoint: "http://localhost:5300/".to_string(),
    }))
}

fn json_request(method: &str, uri: &str, body: Value) -> Request<Body> {
    Request::builder()
        .method(method)
        .uri(uri)
        .header("content-type", "application/json")
        .body(Body::from(body.to_string()))
        .expect("request")
}

fn get(uri: &str) -> Request<Body> {
    Request::builder().uri(uri).body(Body::empty()).expect("request")
}

fn delete(uri: &str) -> Request<Body> {
    Request::builder()
        .method("DELETE")
        .uri(uri)
        .body(Body::empty())
        .expect("request")
}

async fn read_json(response: axum::response::Response) -> Value {
    let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .expect("body");
    serde_json::from_slice(&bytes).expect("json")
}

#[tokio::test]
async fn queue_crud_roundtrip() {
    let app = test_app();

    let response = app.clone().oneshot(get("/api/queues")).await.unwrap();
    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(read_json(response).await, json!([]));

    let response = app
        .clone()
        .oneshot(json_request(
            "POST",
            "/api/queues",
            json!({ "queueName": "orders" }),
        ))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(read_json(response).await["success"], json!(true));

    let response = app.clone().oneshot(get("/api/queues")).await.unwrap();
    let queues = read_json(response).await;
    assert_eq!(queues[0]["name"], json!("orders"));
    assert_eq!(queues[0]["messageCount"], json!(0));
    assert_eq!(queues[0]["deadLetterMessageCount"], json!(0));
    assert_eq!(queues[0]["status"], json!("Active"));

    let response = app
        .clone()
        .oneshot(delete("/api/queues?name=orders"))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);

    let response = app.clone().oneshot(get("/api/queues")).await.unwrap();
    assert_eq!(read_json(response).await, json!([]));
}

#[tokio::test]
async fn duplicate_queue_creation_is_a_server_error() {
    let app = test_app();
    let create = || json_request("POST", "/api/queues", json!({ "queueName": "orders" }));

    let response = app.clone().oneshot(create()).await.unwrap();
    assert_eq!(response.status(), StatusCode::OK);

    let response = app.clone().oneshot(create()).await.unwrap();
    assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);
    let body = read_json(response).await;
    assert!(body["error"].as_str().unwrap().contains("orders"));
}

#[tokio::test]
async fn delete_queue_without_name_is_a_bad_request() {
    let app = test_app();
    let response = app.clone().oneshot(delete("/api/queues")).await.unwrap();
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    assert_eq!(
        read_json(response).await["error"],
        json!("Queue name required")
    );
}

#[tokio::test]
async fn send_peek_and_purge_a_queue() {
    let app = test_app();
    app.clone()
        .oneshot(json_request(
            "POST",
            "/api/queues",
            json!({ "queueName": "orders" }),
        ))
        .await
        .unwrap();

    let response = app
        .clone()
        .oneshot(json_request(
            "POST",
            "/api/messages",
            json!({
                "entityType": "queue",
                "entityName": "orders",
                "message": "hello",
                "properties": { "k": "v" }
            }),
        ))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);

    let response = app
        .clone()
        .oneshot(get("/api/messages?entityType=queue&entityName=orders&maxMessages=1"))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);
    let messages = read_json(response).await;
    assert_eq!(messages.as_array().unwrap().len(), 1);
    assert_eq!(messages[0]["body"], json!("hello"));
    assert_eq!(messages[0]["properties"]["k"], json!("v"));
    assert_eq!(messages[0]["deliveryCount"], json!(0));
    assert!(messages[0]["messageId"].is_string());

    let response = app
        .clone()
        .oneshot(delete(
            "/api/messages?entityType=queue&entityName=orders&purgeAll=true",
        ))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);
    let body = read_json(response).await;
    assert_eq!(body["deletedCount"], json!(1));
    assert_eq!(body["message"], json!("Deleted 1 messages"));

    // Purging an already-empty queue succeeds with a zero count.
    let response = app
        .clone()
        .oneshot(delete(
            "/api/messages?entityType=queue&entityName=orders&purgeAll=true",
        ))
        .await
        .unwrap();
    assert_eq!(read_json(response).await["deletedCount"], json!(0));
}

#[tokio::test]
async fn delete_without_purge_flag_touches_nothing() {
    let app = test_app();
    app.clone()
        .oneshot(json_request(
            "POST",
            "/api/queues",
            json!({ "queueName": "orders" }),
        ))
        .await
        .unwrap();
    app.clone()
        .oneshot(json_request(
            "POST",
            "/api/messages",
            json!({ "entityType": "queue", "entityName": "orders", "message": "keep" }),
        ))
        .await
        .unwrap();

    let response = app
        .clone()
        .oneshot(delete("/api/messages?entityType=queue&entityName=orders"))
        .await
        .unwrap();
    assert_eq!(read_json(response).await["deletedCount"], json!(0));

    let response = app
        .clone()
        .oneshot(get("/api/messages?entityType=queue&entityName=orders"))
        .await
        .unwrap();
    assert_eq!(read_json(response).await.as_array().unwrap().len(), 1);
}

#[tokio::test]
async fn queue_peek_with_subscription_name_is_rejected() {
    let app = test_app();
    app.clone()
        .oneshot(json_request(
            "POST",
            "/api/queues",
            json!({ "queueName": "orders" }),
        ))
        .await
        .unwrap();

    let response = app
        .clone()
        .oneshot(get(
            "/api/messages?entityType=queue&entityName=orders&subscriptionName=stray",
        ))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn peek_without_entity_parameters_is_rejected() {
    let app = test_app();
    let response = app.clone().oneshot(get("/api/messages")).await.unwrap();
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    assert_eq!(
        read_json(response).await["error"],
        json!("Entity type and name required")
    );
}

#[tokio::test]
async fn subscription_flow_through_the_api() {
    let app = test_app();
    app.clone()
        .oneshot(json_request(
            "POST",
            "/api/topics",
            json!({ "topicName": "events" }),
        ))
        .await
        .unwrap();
    app.clone()
        .oneshot(json_request(
            "POST",
            "/api/subscriptions",
            json!({ "topicName": "events", "subscriptionName": "audit" }),
        ))
        .await
        .unwrap();

    // Sending to the subscription addresses the topic; the broker fans out.
    app.clone()
        .oneshot(json_request(
            "POST",
            "/api/messages",
            json!({
                "entityType": "subscription",
                "entityName": "events",
                "subscriptionName": "audit",
                "message": { "kind": "structured" }
            }),
        ))
        .await
        .unwrap();

    let response = app
        .clone()
        .oneshot(get("/api/subscriptions?topic=events"))
        .await
        .unwrap();
    let subs = read_json(response).await;
    assert_eq!(subs[0]["name"], json!("audit"));
    assert_eq!(subs[0]["messageCount"], json!(1));

    let response = app.clone().oneshot(get("/api/topics")).await.unwrap();
    let topics = read_json(response).await;
    assert_eq!(topics[0]["subscriptionCount"], json!(1));

    let response = app
        .clone()
        .oneshot(get(
            "/api/messages?entityType=subscription&entityName=events&subscriptionName=audit",
        ))
        .await
        .unwrap();
    let messages = read_json(response).await;
    assert_eq!(messages[0]["body"], json!({ "kind": "structured" }));
}

#[tokio::test]
async fn info_reports_the_broker_endpoint() {
    let app = test_app();
    let response = app.clone().oneshot(get("/api/info")).await.unwrap();
    assert_eq!(response.status(), StatusCode::OK);
    let body = read_json(response).await;
    assert_eq!(body["name"], json!("busboard"));
    assert_eq!(body["brokerEndpoint"], json!("http://localhost:5300/"));
}
