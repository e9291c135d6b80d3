// Copyright (c) 2025 Fabstir
// SPDX-License-Identifier: BUSL-1.1
//! Free-form text extraction from passport images
//!
//! Components:
//! - `engine` - `TextRecognizer` trait and the Tesseract-backed engine
//! - `extract_text` - runs a recognizer and trims the result

pub mod engine;

pub use engine::{OcrError, TesseractEngine, TextRecognizer};

use image::RgbImage;
use tracing::debug;

use crate::vision::extraction::{ExtractionError, ExtractionResult, Extractor};

/// Extract text from the bitmap with surrounding whitespace removed
///
/// An empty string is a valid result (no text detected). Engine failures
/// are reported as an OCR sub-task error.
pub fn extract_text(recognizer: &dyn TextRecognizer, image: &RgbImage) -> ExtractionResult<String> {
    let text = recognizer
        .recognize(image)
        .map_err(|e| ExtractionError::new(Extractor::Ocr, e.to_string()))?;

    let trimmed = text.trim().to_string();
    debug!("OCR extracted {} chars", trimmed.len());
    Ok(trimmed)
}
