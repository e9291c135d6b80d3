// Copyright (c) 2025 Fabstir
// SPDX-License-Identifier: BUSL-1.1
//! Multipart upload parsing

use axum::http::StatusCode;
use axum_extra::extract::multipart::{Multipart, MultipartError};
use bytes::Bytes;

use crate::api::errors::ApiError;

/// Name of the form field carrying the passport photo
pub const FILE_FIELD: &str = "file";

/// Raw upload taken from the `file` form field
#[derive(Debug, Clone)]
pub struct UploadedImage {
    pub filename: String,
    pub bytes: Bytes,
}

impl UploadedImage {
    /// Pull the first `file` upload out of the form
    ///
    /// Parts named `file` without a filename are plain form values, not
    /// uploads, and are skipped.
    pub async fn from_multipart(mut multipart: Multipart) -> Result<Self, ApiError> {
        while let Some(field) = multipart.next_field().await.map_err(multipart_error)? {
            if field.name() != Some(FILE_FIELD) {
                continue;
            }

            let filename = match field.file_name() {
                Some(name) => name.to_string(),
                None => continue,
            };
            if filename.is_empty() {
                return Err(ApiError::NoFileSelected);
            }

            let bytes = field.bytes().await.map_err(multipart_error)?;
            return Ok(Self { filename, bytes });
        }

        Err(ApiError::NoFileProvided)
    }
}

fn multipart_error(e: MultipartError) -> ApiError {
    if e.status() == StatusCode::PAYLOAD_TOO_LARGE {
        ApiError::PayloadTooLarge(e.body_text())
    } else {
        ApiError::ServerError(e.body_text())
    }
}
