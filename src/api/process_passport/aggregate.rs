// Copyright (c) 2025 Fabstir
// SPDX-License-Identifier: BUSL-1.1
//! Runs the three extractors against one decoded bitmap and merges results

use std::sync::Arc;

use image::RgbImage;
use tokio::task::{spawn_blocking, JoinError};

use super::response::PassportResponse;
use crate::vision::extraction::{ExtractionError, ExtractionResult, Extractor};
use crate::vision::{extract_face, extract_mrz, extract_text, VisionModelManager};

/// Run OCR, MRZ and face extraction concurrently on the blocking pool
///
/// The bitmap is shared read-only. Every extractor runs to completion and
/// a failure (or panic) in one never affects the others.
pub async fn run_extractors(manager: &VisionModelManager, image: Arc<RgbImage>) -> PassportResponse {
    let recognizer = manager.text_recognizer();
    let bitmap = image.clone();
    let ocr = spawn_blocking(move || extract_text(recognizer.as_ref(), &bitmap));

    let reader = manager.mrz_reader();
    let bitmap = image.clone();
    let mrz = spawn_blocking(move || extract_mrz(reader.as_ref(), &bitmap));

    let detector = manager.face_detector();
    let bitmap = image;
    let face = spawn_blocking(move || extract_face(detector.as_deref(), &bitmap));

    let (ocr, mrz, face) = tokio::join!(ocr, mrz, face);

    PassportResponse::from_results(
        joined(ocr, Extractor::Ocr),
        joined(mrz, Extractor::Mrz),
        joined(face, Extractor::Face),
    )
}

fn joined<T>(
    result: Result<ExtractionResult<T>, JoinError>,
    extractor: Extractor,
) -> ExtractionResult<T> {
    result.unwrap_or_else(|e| {
        Err(ExtractionError::new(
            extractor,
            format!("extraction task failed: {}", e),
        ))
    })
}
