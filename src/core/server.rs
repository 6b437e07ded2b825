//! Server Implementation
//!
//! Router assembly and HTTP serving with graceful shutdown.

use axum::{Router, middleware};
use std::net::SocketAddr;
use tower::limit::ConcurrencyLimitLayer;
use tower_http::compression::CompressionLayer;
use tower_http::cors::CorsLayer;

use crate::core::{Config, ServerState};
use crate::utils::AppError;

/// Backpressure cap on concurrently processed requests
const MAX_IN_FLIGHT_REQUESTS: usize = 512;

/// HTTP request log middleware
async fn log_request(
    request: http::Request<axum::body::Body>,
    next: middleware::Next,
) -> http::Response<axum::body::Body> {
    let method = request.method().clone();
    let uri = request.uri().clone();

    let response = next.run(request).await;

    let status = response.status();

    tracing::info!(target: "http_access", "{} {} {}", method, uri, status);

    response
}

/// Build the Axum router (without state)
pub fn build_app() -> Router<ServerState> {
    Router::<ServerState>::new()
        // Core APIs
        .merge(crate::api::health::router())
        .merge(crate::api::auth::router())
        .merge(crate::api::uploads::router())
        // Content APIs
        .merge(crate::api::members::router())
        .merge(crate::api::mentors::router())
        .merge(crate::api::trainings::router())
        .merge(crate::api::projects::router())
        .merge(crate::api::services::router())
        .merge(crate::api::catalog::router())
        .merge(crate::api::opportunities::router())
}

/// HTTP Server
pub struct Server {
    config: Config,
    state: ServerState,
}

impl Server {
    pub fn with_state(config: Config, state: ServerState) -> Self {
        Self { config, state }
    }

    pub async fn run(&self) -> Result<(), AppError> {
        let app = build_app()
            .with_state(self.state.clone())
            // The public site and the admin frontend live on other origins
            .layer(CorsLayer::permissive())
            .layer(CompressionLayer::new())
            .layer(ConcurrencyLimitLayer::new(MAX_IN_FLIGHT_REQUESTS))
            .layer(middleware::from_fn(log_request));

        let addr = SocketAddr::from(([0, 0, 0, 0], self.config.http_port));
        tracing::info!("Leafclutch admin backend listening on {}", addr);

        let handle = axum_server::Handle::new();

        let handle_clone = handle.clone();
        tokio::spawn(async move {
            let _ = tokio::signal::ctrl_c().await;
            tracing::info!("Shutting down...");
            handle_clone.graceful_shutdown(Some(std::time::Duration::from_secs(10)));
        });

        axum_server::bind(addr)
            .handle(handle)
            .serve(app.into_make_service())
            .await
            .map_err(|e| AppError::internal(format!("Server error: {e}")))?;

        Ok(())
    }
}
