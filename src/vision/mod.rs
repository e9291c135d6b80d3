// Copyright (c) 2025 Fabstir
// SPDX-License-Identifier: BUSL-1.1
//! Vision processing module for passport images
//!
//! This module provides:
//! - Image decoding and JPEG re-encoding
//! - Free-form OCR via Tesseract
//! - MRZ reading and ICAO 9303 parsing
//! - Face detection and cropping via a Haar cascade
//!
//! Each extractor returns an `ExtractionResult` so callers can combine
//! independent successes and failures.

pub mod extraction;
pub mod face;
pub mod image_utils;
pub mod model_manager;
pub mod mrz;
pub mod ocr;

pub use extraction::{combine_errors, ExtractionError, ExtractionResult, Extractor};
pub use face::extract_face;
pub use image_utils::{decode_image_bytes, encode_jpeg_base64, ImageError, ImageInfo};
pub use model_manager::{VisionModelConfig, VisionModelInfo, VisionModelManager};
pub use mrz::{extract_mrz, MrzFields};
pub use ocr::extract_text;
