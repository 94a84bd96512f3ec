use std::sync::Arc;

use axum::extract::{Query, State};
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::routing::get;
use axum::{Json, Router};
use serde::Serialize;
use tower_http::cors::{Any, CorsLayer};
use tower_http::trace::TraceLayer;

use crate::broker::{EntityRef, ManagedEntity, OutboundMessage};
use crate::explorer::Explorer;
use crate::transport::message::{
    CreateQueueRequest, CreateSubscriptionRequest, CreateTopicRequest, MessageView, NameQuery,
    PeekQuery, PurgeQuery, PurgeResponse, SendMessageRequest, StatusResponse, SubscriptionQuery,
    TopicQuery,
};
use crate::utils::error::BrokerError;

/// Messages to peek when the caller does not say how many.
const DEFAULT_PEEK_COUNT: usize = 10;

/// Shared application state handed to every request handler.
pub struct AppState {
    pub explorer: Explorer,
    pub broker_endpoint: String,
}

/// API error response.
///
/// Broker-originated failures keep their message text verbatim under a
/// generic failure status; validation failures reject with 400 before any
/// broker call is made.
#[derive(Debug, Serialize)]
pub struct ApiError {
    pub error: String,
    #[serde(skip)]
    pub code: StatusCode,
}

impl ApiError {
    fn bad_request(message: impl Into<String>) -> Self {
        Self {
            error: message.into(),
            code: StatusCode::BAD_REQUEST,
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        (self.code, Json(self)).into_response()
    }
}

impl From<BrokerError> for ApiError {
    fn from(err: BrokerError) -> Self {
        let code = match err {
            BrokerError::Validation(_) => StatusCode::BAD_REQUEST,
            _ => StatusCode::INTERNAL_SERVER_ERROR,
        };
        Self {
            error: err.to_string(),
            code,
        }
    }
}

/// Builds the full application router with CORS and request tracing.
pub fn build_router(state: Arc<AppState>) -> Router {
    Router::new()
        .route(
            "/api/queues",
            get(list_queues).post(create_queue).delete(delete_queue),
        )
        .route(
            "/api/topics",
            get(list_topics).post(create_topic).delete(delete_topic),
        )
        .route(
            "/api/subscriptions",
            get(list_subscriptions)
                .post(create_subscription)
                .delete(delete_subscription),
        )
        .route(
            "/api/messages",
            get(peek_messages).post(send_message).delete(delete_messages),
        )
        .route("/api/info", get(info))
        .layer(
            CorsLayer::new()
                .allow_origin(Any)
                .allow_methods(Any)
                .allow_headers(Any),
        )
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

/// GET /api/queues
async fn list_queues(State(state): State<Arc<AppState>>) -> Result<Response, ApiError> {
    let queues = state.explorer.list_queues().await?;
    Ok(Json(queues).into_response())
}

/// POST /api/queues
async fn create_queue(
    State(state): State<Arc<AppState>>,
    Json(req): Json<CreateQueueRequest>,
) -> Result<Response, ApiError> {
    state
        .explorer
        .create_entity(&ManagedEntity::queue(req.queue_name))
        .await?;
    Ok(Json(StatusResponse::ok("Queue created")).into_response())
}

/// DELETE /api/queues?name=
async fn delete_queue(
    State(state): State<Arc<AppState>>,
    Query(query): Query<NameQuery>,
) -> Result<Response, ApiError> {
    let name = query
        .name
        .ok_or_else(|| ApiError::bad_request("Queue name required"))?;
    state
        .explorer
        .delete_entity(&ManagedEntity::queue(name))
        .await?;
    Ok(Json(StatusResponse::ok("Queue deleted")).into_response())
}

/// GET /api/topics
async fn list_topics(State(state): State<Arc<AppState>>) -> Result<Response, ApiError> {
    let topics = state.explorer.list_topics().await?;
    Ok(Json(topics).into_response())
}

/// POST /api/topics
async fn create_topic(
    State(state): State<Arc<AppState>>,
    Json(req): Json<CreateTopicRequest>,
) -> Result<Response, ApiError> {
    state
        .explorer
        .create_entity(&ManagedEntity::topic(req.topic_name))
        .await?;
    Ok(Json(StatusResponse::ok("Topic created")).into_response())
}

/// DELETE /api/topics?name=
async fn delete_topic(
    State(state): State<Arc<AppState>>,
    Query(query): Query<NameQuery>,
) -> Result<Response, ApiError> {
    let name = query
        .name
        .ok_or_else(|| ApiError::bad_request("Topic name required"))?;
    state
        .explorer
        .delete_entity(&ManagedEntity::topic(name))
        .await?;
    Ok(Json(StatusResponse::ok("Topic deleted")).into_response())
}

/// GET /api/subscriptions?topic=
async fn list_subscriptions(
    State(state): State<Arc<AppState>>,
    Query(query): Query<TopicQuery>,
) -> Result<Response, ApiError> {
    let topic = query
        .topic
        .ok_or_else(|| ApiError::bad_request("Topic name required"))?;
    let subscriptions = state.explorer.list_subscriptions(&topic).await?;
    Ok(Json(subscriptions).into_response())
}

/// POST /api/subscriptions
async fn create_subscription(
    State(state): State<Arc<AppState>>,
    Json(req): Json<CreateSubscriptionRequest>,
) -> Result<Response, ApiError> {
    state
        .explorer
        .create_entity(&ManagedEntity::subscription(
            req.topic_name,
            req.subscription_name,
        ))
        .await?;
    Ok(Json(StatusResponse::ok("Subscription created")).into_response())
}

/// DELETE /api/subscriptions?topic=&name=
async fn delete_subscription(
    State(state): State<Arc<AppState>>,
    Query(query): Query<SubscriptionQuery>,
) -> Result<Response, ApiError> {
    let (topic, name) = match (query.topic, query.name) {
        (Some(topic), Some(name)) => (topic, name),
        _ => return Err(ApiError::bad_request("Topic and subscription name required")),
    };
    state
        .explorer
        .delete_entity(&ManagedEntity::subscription(topic, name))
        .await?;
    Ok(Json(StatusResponse::ok("Subscription deleted")).into_response())
}

/// GET /api/messages?entityType=&entityName=&subscriptionName=&maxMessages=
async fn peek_messages(
    State(state): State<Arc<AppState>>,
    Query(query): Query<PeekQuery>,
) -> Result<Response, ApiError> {
    let entity = entity_from_query(
        query.entity_type.as_deref(),
        query.entity_name.as_deref(),
        query.subscription_name.as_deref(),
    )?;
    let max_count = query.max_messages.unwrap_or(DEFAULT_PEEK_COUNT);
    let records = state.explorer.peek_messages(&entity, max_count).await?;
    let views: Vec<MessageView> = records.into_iter().map(MessageView::from).collect();
    Ok(Json(views).into_response())
}

/// POST /api/messages
async fn send_message(
    State(state): State<Arc<AppState>>,
    Json(req): Json<SendMessageRequest>,
) -> Result<Response, ApiError> {
    let entity = entity_from_query(
        req.entity_type.as_deref(),
        req.entity_name.as_deref(),
        req.subscription_name.as_deref(),
    )?;
    let message =
        OutboundMessage::with_properties(req.message, req.properties.unwrap_or_default());
    state.explorer.send_message(&entity, message).await?;
    Ok(Json(StatusResponse::ok("Message sent")).into_response())
}

/// DELETE /api/messages?entityType=&entityName=&subscriptionName=&purgeAll=
async fn delete_messages(
    State(state): State<Arc<AppState>>,
    Query(query): Query<PurgeQuery>,
) -> Result<Response, ApiError> {
    let entity = entity_from_query(
        query.entity_type.as_deref(),
        query.entity_name.as_deref(),
        query.subscription_name.as_deref(),
    )?;
    let deleted_count = if query.purge_all.unwrap_or(false) {
        state.explorer.purge_all(&entity).await?
    } else {
        state.explorer.probe(&entity).await?;
        0
    };
    Ok(Json(PurgeResponse {
        success: true,
        deleted_count,
        message: format!("Deleted {deleted_count} messages"),
    })
    .into_response())
}

/// GET /api/info
async fn info(State(state): State<Arc<AppState>>) -> Response {
    let info = serde_json::json!({
        "name": env!("CARGO_PKG_NAME"),
        "version": env!("CARGO_PKG_VERSION"),
        "brokerEndpoint": state.broker_endpoint,
    });
    Json(info).into_response()
}

/// Resolves the loose entity parameters every message route shares.
///
/// Missing type or name rejects with 400 before any broker work happens.
fn entity_from_query(
    kind: Option<&str>,
    name: Option<&str>,
    subscription: Option<&str>,
) -> Result<EntityRef, ApiError> {
    let (kind, name) = match (kind, name) {
        (Some(kind), Some(name)) => (kind, name),
        _ => return Err(ApiError::bad_request("Entity type and name required")),
    };
    Ok(EntityRef::from_parts(kind, name, subscription)?)
}
