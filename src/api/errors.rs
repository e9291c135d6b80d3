// Copyright (c) 2025 Fabstir
// SPDX-License-Identifier: BUSL-1.1
use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde::{Deserialize, Serialize};
use std::fmt;

/// Top-level error body: `{"error": "<message>"}`
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct ErrorResponse {
    pub error: String,
}

/// Request-level failures that short-circuit the whole request
#[derive(Debug, Clone, PartialEq)]
pub enum ApiError {
    /// No `file` upload part in the form
    NoFileProvided,
    /// `file` part present with an empty filename
    NoFileSelected,
    /// Body exceeded the configured upload limit
    PayloadTooLarge(String),
    /// Undecodable image or any other unexpected failure
    ServerError(String),
}

impl ApiError {
    pub fn to_response(&self) -> ErrorResponse {
        ErrorResponse {
            error: self.to_string(),
        }
    }

    pub fn status_code(&self) -> u16 {
        match self {
            ApiError::NoFileProvided | ApiError::NoFileSelected => 400,
            ApiError::PayloadTooLarge(_) => 413,
            ApiError::ServerError(_) => 500,
        }
    }
}

impl fmt::Display for ApiError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ApiError::NoFileProvided => write!(f, "No file provided"),
            ApiError::NoFileSelected => write!(f, "No file selected"),
            ApiError::PayloadTooLarge(msg) => write!(f, "Upload too large: {}", msg),
            ApiError::ServerError(msg) => write!(f, "Server error: {}", msg),
        }
    }
}

impl std::error::Error for ApiError {}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status =
            StatusCode::from_u16(self.status_code()).unwrap_or(StatusCode::INTERNAL_SERVER_ERROR);
        (status, Json(self.to_response())).into_response()
    }
}
