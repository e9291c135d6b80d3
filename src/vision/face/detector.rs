// Copyright (c) 2025 Fabstir
// SPDX-License-Identifier: BUSL-1.1
//! Face detector interface and detection parameters

use image::{GrayImage, Luma, RgbImage};
use thiserror::Error;

use crate::vision::image_utils::ImageError;

/// Fixed-point BT.601 luma weights (sum to 1 << 14)
const R_WEIGHT: u32 = 4899;
const G_WEIGHT: u32 = 9617;
const B_WEIGHT: u32 = 1868;
const LUMA_SHIFT: u32 = 14;

#[derive(Debug, Error)]
pub enum FaceError {
    #[error("face detector not loaded")]
    NotLoaded,

    #[error("Failed to load face detector: {0}")]
    ModelLoad(String),

    #[error("Face extraction failed: {0}")]
    Detection(String),

    #[error("Face extraction failed: empty crop region at ({x}, {y})")]
    EmptyRegion { x: u32, y: u32 },

    #[error("Face extraction failed: {0}")]
    Encode(#[from] ImageError),
}

/// Axis-aligned face rectangle in bitmap pixel coordinates
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FaceRect {
    pub x: u32,
    pub y: u32,
    pub width: u32,
    pub height: u32,
}

impl FaceRect {
    pub fn new(x: u32, y: u32, width: u32, height: u32) -> Self {
        Self { x, y, width, height }
    }

    pub fn area(&self) -> u64 {
        u64::from(self.width) * u64::from(self.height)
    }
}

/// Multiscale sliding-window parameters
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct DetectionParams {
    /// Image pyramid step between scales
    pub scale_factor: f64,
    /// Overlapping hits needed to keep a candidate
    pub min_neighbors: i32,
    /// Smallest detectable face edge, in pixels
    pub min_size: u32,
}

impl Default for DetectionParams {
    fn default() -> Self {
        Self {
            scale_factor: 1.1,
            min_neighbors: 5,
            min_size: 30,
        }
    }
}

/// Pluggable face detection backend.
///
/// Detectors are loaded once and shared read-only across requests.
#[cfg_attr(test, mockall::automock)]
pub trait FaceDetector: Send + Sync {
    /// Detect faces in a grayscale bitmap
    fn detect(&self, gray: &GrayImage, params: &DetectionParams) -> Result<Vec<FaceRect>, FaceError>;
}

/// Grayscale conversion matching the weights cascade detectors are trained with
pub fn to_detector_gray(image: &RgbImage) -> GrayImage {
    let mut gray = GrayImage::new(image.width(), image.height());
    for (x, y, pixel) in image.enumerate_pixels() {
        let [r, g, b] = pixel.0;
        let luma = (u32::from(r) * R_WEIGHT
            + u32::from(g) * G_WEIGHT
            + u32::from(b) * B_WEIGHT
            + (1 << (LUMA_SHIFT - 1)))
            >> LUMA_SHIFT;
        gray.put_pixel(x, y, Luma([luma as u8]));
    }
    gray
}
