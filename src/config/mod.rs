// Copyright (c) 2025 Fabstir
// SPDX-License-Identifier: BUSL-1.1
//! Service configuration from command-line flags and environment variables

use std::net::SocketAddr;

use anyhow::{Context, Result};
use clap::Parser;

use crate::vision::image_utils::MAX_IMAGE_SIZE;

/// Passport OCR service
#[derive(Parser, Debug, Clone)]
#[command(name = "passport-ocr-service")]
#[command(about = "Extract OCR text, MRZ fields and the holder's face from passport photos", long_about = None)]
pub struct ServiceConfig {
    /// Address to bind the HTTP server to
    #[arg(long, env = "HOST", default_value = "0.0.0.0")]
    pub host: String,

    /// Port to listen on
    #[arg(long, env = "PORT", default_value_t = 5000)]
    pub port: u16,

    /// Tesseract language for free-form OCR
    #[arg(long, env = "OCR_LANGUAGE", default_value = "eng")]
    pub ocr_language: String,

    /// Tesseract language for reading the MRZ
    #[arg(long, env = "MRZ_LANGUAGE", default_value = "eng")]
    pub mrz_language: String,

    /// Haar cascade XML used for face detection
    #[arg(
        long = "haar-cascade",
        env = "HAAR_CASCADE_PATH",
        default_value = "/usr/share/opencv4/haarcascades/haarcascade_frontalface_default.xml"
    )]
    pub haar_cascade_path: String,

    /// Largest accepted request body, in bytes
    #[arg(long, env = "MAX_UPLOAD_BYTES", default_value_t = MAX_IMAGE_SIZE)]
    pub max_upload_bytes: usize,
}

impl ServiceConfig {
    /// Socket address built from `host` and `port`
    pub fn bind_addr(&self) -> Result<SocketAddr> {
        format!("{}:{}", self.host, self.port)
            .parse::<SocketAddr>()
            .with_context(|| format!("invalid bind address {}:{}", self.host, self.port))
    }
}

impl Default for ServiceConfig {
    fn default() -> Self {
        Self {
            host: "0.0.0.0".to_string(),
            port: 5000,
            ocr_language: "eng".to_string(),
            mrz_language: "eng".to_string(),
            haar_cascade_path: "/usr/share/opencv4/haarcascades/haarcascade_frontalface_default.xml"
                .to_string(),
            max_upload_bytes: MAX_IMAGE_SIZE,
        }
    }
}
