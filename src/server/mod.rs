//! Server initialization and routing

use std::sync::Arc;
use std::time::Duration;

use anyhow::Result;
use axum::{
    extract::DefaultBodyLimit,
    routing::{get, post},
    Router,
};
use tokio::net::TcpListener;
use tower_http::{
    cors::{Any, CorsLayer},
    timeout::TimeoutLayer,
    trace::TraceLayer,
};
use tracing::info;

use crate::api;
use crate::config::Config;
use crate::dispatch::MailDispatcher;
use crate::transport;

/// Request body cap. Comfortably above the attachment limit so an oversize
/// resume is rejected by validation with a field error, not by the framework.
const MAX_BODY_BYTES: usize = 10 * 1024 * 1024;

/// Slack added on top of the outbound send timeout for request handling
const REQUEST_TIMEOUT_SLACK_SECS: u64 = 5;

/// Application state shared across handlers
#[derive(Clone)]
pub struct AppState {
    pub config: Arc<Config>,
    pub dispatcher: Arc<MailDispatcher>,
}

/// Build the HTTP router
pub fn build_router(state: AppState) -> Router {
    // CORS configuration
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    let request_timeout =
        Duration::from_secs(state.config.send_timeout_secs + REQUEST_TIMEOUT_SLACK_SECS);

    Router::new()
        // Health endpoint
        .route("/health", get(api::health::health))
        // Form endpoints
        .route(
            "/api/v1/forms/contact",
            post(api::contact::submit)
                .options(api::preflight)
                .fallback(api::method_not_allowed),
        )
        .route(
            "/api/v1/forms/career",
            post(api::career::submit)
                .options(api::preflight)
                .fallback(api::method_not_allowed),
        )
        // Add middleware
        .layer(DefaultBodyLimit::max(MAX_BODY_BYTES))
        .layer(TimeoutLayer::new(request_timeout))
        .layer(TraceLayer::new_for_http())
        .layer(cors)
        .with_state(state)
}

/// Run the server
pub async fn run(config: Config) -> Result<()> {
    // Build the configured transport; a transport/flow mismatch fails here,
    // before the server ever binds.
    let mail_transport = transport::from_config(&config.transport, config.send_timeout())?;
    info!("Mail transport: {}", mail_transport.transport_name());

    let dispatcher = MailDispatcher::new(mail_transport, config.forms.clone())?;

    let state = AppState {
        config: Arc::new(config.clone()),
        dispatcher: Arc::new(dispatcher),
    };

    let app = build_router(state);

    let http_addr = config.http_addr();
    let listener = TcpListener::bind(&http_addr).await?;
    info!("HTTP server started on {}", http_addr);
    axum::serve(listener, app).await?;

    Ok(())
}
