// Copyright (c) 2025 Fabstir
// SPDX-License-Identifier: BUSL-1.1
//! Passport processing endpoint handler

use std::sync::Arc;
use std::time::Instant;

use axum::{extract::State, Json};
use axum_extra::extract::multipart::{Multipart, MultipartRejection};
use tracing::{debug, info, warn};

use super::aggregate::run_extractors;
use super::request::UploadedImage;
use super::response::PassportResponse;
use crate::api::errors::ApiError;
use crate::api::http_server::AppState;
use crate::vision::decode_image_bytes;

/// POST /process-passport - Extract OCR text, MRZ fields and the face
///
/// Accepts a multipart form with the photo in the `file` field.
///
/// # Response
/// - `ocr_text`: Trimmed OCR text (may be empty)
/// - `mrz_data`: Labeled MRZ fields (`{}` if no MRZ was read)
/// - `face_image`: Base64 JPEG of the largest face, or null
/// - `error`: Sub-task failures joined with " | ", or null
///
/// Sub-task failures never change the status: a decodable image always
/// yields 200.
///
/// # Errors
/// - 400 Bad Request: no `file` upload, or an empty filename
/// - 413 Payload Too Large: body over the configured limit
/// - 500 Internal Server Error: the upload is not a decodable image
pub async fn process_passport_handler(
    State(state): State<AppState>,
    multipart: Result<Multipart, MultipartRejection>,
) -> Result<Json<PassportResponse>, ApiError> {
    let started = Instant::now();

    let multipart = multipart.map_err(|e| {
        warn!("Request is not a multipart upload: {}", e);
        ApiError::NoFileProvided
    })?;

    let upload = UploadedImage::from_multipart(multipart).await.map_err(|e| {
        warn!("Upload rejected: {}", e);
        e
    })?;
    debug!(
        "Passport upload received: {} ({} bytes)",
        upload.filename,
        upload.bytes.len()
    );

    let (bitmap, image_info) = decode_image_bytes(&upload.bytes).map_err(|e| {
        warn!("Failed to decode image {}: {}", upload.filename, e);
        ApiError::ServerError(e.to_string())
    })?;
    debug!(
        "Decoded image: {}x{}, format {:?}",
        image_info.width, image_info.height, image_info.format
    );

    let response = run_extractors(&state.vision, Arc::new(bitmap)).await;

    if let Some(ref error) = response.error {
        warn!("Passport sub-task failures: {}", error);
    }
    info!(
        "Passport processed: {} OCR chars, {} MRZ fields, face {}, {}ms",
        response.ocr_text.len(),
        response.mrz_data.len(),
        if response.face_image.is_some() { "found" } else { "not found" },
        started.elapsed().as_millis()
    );

    Ok(Json(response))
}

