// Copyright (c) 2025 Fabstir
// SPDX-License-Identifier: BUSL-1.1
use axum::{
    extract::DefaultBodyLimit,
    routing::{get, post},
    Router,
};
use std::sync::Arc;
use tower_http::{
    cors::{Any, CorsLayer},
    trace::TraceLayer,
};

use super::handlers::health_handler;
use super::process_passport::process_passport_handler;
use crate::config::ServiceConfig;
use crate::vision::image_utils::MAX_IMAGE_SIZE;
use crate::vision::VisionModelManager;

/// Shared, read-only state handed to every request
#[derive(Clone)]
pub struct AppState {
    pub vision: Arc<VisionModelManager>,
    pub max_upload_bytes: usize,
}

impl AppState {
    pub fn new(vision: Arc<VisionModelManager>) -> Self {
        Self {
            vision,
            max_upload_bytes: MAX_IMAGE_SIZE,
        }
    }

    pub fn with_max_upload_bytes(mut self, max_upload_bytes: usize) -> Self {
        self.max_upload_bytes = max_upload_bytes;
        self
    }
}

/// Build the router with all routes and middleware
pub fn create_app(state: AppState) -> Router {
    let body_limit = state.max_upload_bytes;

    Router::new()
        // Health check
        .route("/health", get(health_handler))
        // Passport extraction endpoint
        .route("/process-passport", post(process_passport_handler))
        .layer(DefaultBodyLimit::max(body_limit))
        .layer(
            CorsLayer::new()
                .allow_origin(Any)
                .allow_methods(Any)
                .allow_headers(Any),
        )
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

pub async fn start_server(config: &ServiceConfig, state: AppState) -> anyhow::Result<()> {
    let app = create_app(state);

    let addr = config.bind_addr()?;
    let listener = tokio::net::TcpListener::bind(addr).await?;

    tracing::info!("API server listening on {}", addr);

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    tracing::info!("API server stopped");
    Ok(())
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        tracing::warn!("Failed to listen for shutdown signal: {}", e);
        std::future::pending::<()>().await;
    }
    tracing::info!("Shutdown signal received, draining requests");
}
