// Copyright (c) 2025 Fabstir
// SPDX-License-Identifier: BUSL-1.1
//! Tesseract text recognition engine

use std::collections::HashMap;

use image::{DynamicImage, RgbImage};
use rusty_tesseract::{Args, Image};
use thiserror::Error;

/// Errors raised by a text recognition engine
#[derive(Debug, Error)]
pub enum OcrError {
    #[error("OCR extraction failed: {0}")]
    Engine(String),

    #[error("OCR engine not available: {0}")]
    Unavailable(String),
}

/// A text recognition engine
///
/// Implementations must be safe to share across request tasks; they are
/// loaded once at startup and only read afterwards.
#[cfg_attr(test, mockall::automock)]
pub trait TextRecognizer: Send + Sync {
    /// Recognize all text in the bitmap
    fn recognize(&self, image: &RgbImage) -> Result<String, OcrError>;
}

/// Tesseract OCR via the system `tesseract` binary
pub struct TesseractEngine {
    args: Args,
}

impl TesseractEngine {
    /// Engine for a single fixed language with tesseract's default
    /// page segmentation
    pub fn new(language: &str) -> Self {
        Self::with_args(Args {
            lang: language.to_string(),
            config_variables: HashMap::new(),
            dpi: None,
            psm: Some(3),
            oem: Some(3),
        })
    }

    pub fn with_args(args: Args) -> Self {
        Self { args }
    }

    pub fn language(&self) -> &str {
        &self.args.lang
    }

    /// Probe the installed tesseract binary
    pub fn version() -> Result<String, OcrError> {
        rusty_tesseract::get_tesseract_version()
            .map(|v| v.trim().to_string())
            .map_err(|e| OcrError::Unavailable(e.to_string()))
    }
}

impl TextRecognizer for TesseractEngine {
    fn recognize(&self, image: &RgbImage) -> Result<String, OcrError> {
        let dynamic = DynamicImage::ImageRgb8(image.clone());
        let tess_image =
            Image::from_dynamic_image(&dynamic).map_err(|e| OcrError::Engine(e.to_string()))?;

        rusty_tesseract::image_to_string(&tess_image, &self.args)
            .map_err(|e| OcrError::Engine(e.to_string()))
    }
}
