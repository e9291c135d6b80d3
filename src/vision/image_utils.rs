// Copyright (c) 2025 Fabstir
// SPDX-License-Identifier: BUSL-1.1
//! Image loading and encoding helpers for passport processing

use std::io::Cursor;

use base64::{engine::general_purpose::STANDARD, Engine as _};
use image::{codecs::jpeg::JpegEncoder, ImageFormat, RgbImage};
use thiserror::Error;

/// Default upload size limit (10MB)
pub const MAX_IMAGE_SIZE: usize = 10 * 1024 * 1024;

/// JPEG quality used when re-encoding face crops
const JPEG_QUALITY: u8 = 75;

/// Custom error types for image processing
#[derive(Debug, Error)]
pub enum ImageError {
    #[error("Image data is empty")]
    EmptyData,

    #[error("Failed to decode image: {0}")]
    DecodeFailed(String),

    #[error("Failed to encode image: {0}")]
    EncodeFailed(String),
}

/// Image information extracted during loading
#[derive(Debug, Clone)]
pub struct ImageInfo {
    /// Width in pixels
    pub width: u32,
    /// Height in pixels
    pub height: u32,
    /// Format guessed from the content, if any
    pub format: Option<ImageFormat>,
    /// Size in bytes
    pub size_bytes: usize,
}

/// Decode raw uploaded bytes into an RGB bitmap
///
/// Any format the `image` crate can decode is accepted; there is no
/// up-front format allow-list. Grayscale, palette and alpha sources are
/// converted to 8-bit RGB.
///
/// # Returns
/// * `Ok((RgbImage, ImageInfo))` - The decoded bitmap and metadata
/// * `Err(ImageError)` - If the bytes are empty or not an image
///
/// Upload size is bounded by the router's body limit, not here.
pub fn decode_image_bytes(bytes: &[u8]) -> Result<(RgbImage, ImageInfo), ImageError> {
    if bytes.is_empty() {
        return Err(ImageError::EmptyData);
    }

    let format = image::guess_format(bytes).ok();

    let img = image::load_from_memory(bytes)
        .map_err(|e| ImageError::DecodeFailed(e.to_string()))?;

    let info = ImageInfo {
        width: img.width(),
        height: img.height(),
        format,
        size_bytes: bytes.len(),
    };

    Ok((img.to_rgb8(), info))
}

/// Encode an RGB bitmap as JPEG and return the bytes as standard base64
pub fn encode_jpeg_base64(image: &RgbImage) -> Result<String, ImageError> {
    let mut buffer = Cursor::new(Vec::new());
    let encoder = JpegEncoder::new_with_quality(&mut buffer, JPEG_QUALITY);
    image
        .write_with_encoder(encoder)
        .map_err(|e| ImageError::EncodeFailed(e.to_string()))?;

    Ok(STANDARD.encode(buffer.into_inner()))
}
