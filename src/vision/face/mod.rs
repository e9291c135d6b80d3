// Copyright (c) 2025 Fabstir
// SPDX-License-Identifier: BUSL-1.1
//! Face extraction from passport images
//!
//! Components:
//! - `detector` - `FaceDetector` trait, parameters and grayscale conversion
//! - `crop` - largest-face selection and padded cropping
//! - `haar` - OpenCV Haar cascade (only with the `opencv` feature)

pub mod crop;
pub mod detector;
#[cfg(feature = "opencv")]
pub mod haar;

pub use crop::{padded_region, select_largest, FACE_PADDING};
pub use detector::{to_detector_gray, DetectionParams, FaceDetector, FaceError, FaceRect};
#[cfg(feature = "opencv")]
pub use haar::HaarCascadeDetector;

use image::RgbImage;
use tracing::debug;

use crate::vision::extraction::{ExtractionError, ExtractionResult, Extractor};
use crate::vision::image_utils::encode_jpeg_base64;

/// Detect the largest face and return it as a base64 JPEG
///
/// `Ok(None)` means no face was found, which is not an error.
pub fn extract_face(
    detector: Option<&dyn FaceDetector>,
    image: &RgbImage,
) -> ExtractionResult<Option<String>> {
    find_and_encode(detector, image).map_err(|e| ExtractionError::new(Extractor::Face, e.to_string()))
}

fn find_and_encode(
    detector: Option<&dyn FaceDetector>,
    image: &RgbImage,
) -> Result<Option<String>, FaceError> {
    let detector = detector.ok_or(FaceError::NotLoaded)?;

    let gray = to_detector_gray(image);
    let faces = detector.detect(&gray, &DetectionParams::default())?;
    debug!("Face detector returned {} candidates", faces.len());

    let Some(face) = select_largest(&faces) else {
        return Ok(None);
    };

    let (width, height) = image.dimensions();
    let region = padded_region(&face, width, height, FACE_PADDING).ok_or(FaceError::EmptyRegion {
        x: face.x,
        y: face.y,
    })?;

    let face_image = crop::crop(image, &region);
    Ok(Some(encode_jpeg_base64(&face_image)?))
}
