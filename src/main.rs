// Copyright (c) 2025 Fabstir
// SPDX-License-Identifier: BUSL-1.1
use anyhow::Result;
use clap::Parser;
use passport_ocr_service::{
    api::{start_server, AppState},
    config::ServiceConfig,
    version,
    vision::{VisionModelConfig, VisionModelManager},
};
use std::{env, sync::Arc};

#[tokio::main]
async fn main() -> Result<()> {
    dotenv::dotenv().ok();

    // Initialize tracing subscriber for logging
    if env::var("RUST_LOG").is_err() {
        env::set_var("RUST_LOG", "info");
    }
    tracing_subscriber::fmt::init();

    let config = ServiceConfig::parse();

    tracing::info!("🚀 Starting passport OCR service");
    tracing::info!("📦 BUILD VERSION: {}", version::VERSION);
    tracing::info!("📅 Build Date: {}", version::BUILD_DATE);
    tracing::info!("🔢 Version {}, features: {}", version::VERSION_NUMBER, version::FEATURES.join(", "));
    if !version::face_detection_compiled() {
        tracing::warn!("⚠️ Face detection not compiled in (build with --features opencv)");
    }

    let vision_config = VisionModelConfig::from(&config);
    let manager = VisionModelManager::new(&vision_config);
    for model in manager.list_models() {
        tracing::info!(
            "   {} ({}): {}",
            model.name,
            model.model_type,
            if model.available { "available" } else { "unavailable" }
        );
    }

    let state = AppState::new(Arc::new(manager)).with_max_upload_bytes(config.max_upload_bytes);
    start_server(&config, state).await
}
