use std::sync::Arc;

use tracing::info;

use busboard::broker::memory::MemoryBroker;
use busboard::config::{ConnectionString, load_config};
use busboard::explorer::Explorer;
use busboard::transport::{AppState, build_router};
use busboard::utils::logging;

#[tokio::main]
async fn main() {
    dotenvy::dotenv().ok();
    logging::init("info");

    let config = load_config().expect("Failed to load configuration");
    let connection = ConnectionString::parse(&config.broker.connection_string)
        .expect("Invalid broker connection string");

    let broker = Arc::new(MemoryBroker::new());
    let explorer = Explorer::new(broker, config.purge);
    let state = Arc::new(AppState {
        explorer,
        broker_endpoint: connection.admin_endpoint(),
    });

    let addr = format!("{}:{}", config.server.host, config.server.port);
    info!("busboard listening on http://{}", addr);
    info!("broker admin endpoint: {}", connection.admin_endpoint());

    let listener = tokio::net::TcpListener::bind(&addr).await.expect("Can't bind");
    axum::serve(listener, build_router(state)).await.expect("Server error");
}
