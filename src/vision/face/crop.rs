// Copyright (c) 2025 Fabstir
// SPDX-License-Identifier: BUSL-1.1
//! Face selection and padded cropping

use image::{imageops, RgbImage};

use super::detector::FaceRect;

/// Margin added on each side of the detected face
pub const FACE_PADDING: u32 = 10;

/// Largest face by pixel area; the first one wins on equal area
pub fn select_largest(faces: &[FaceRect]) -> Option<FaceRect> {
    faces.iter().copied().fold(None, |best, face| match best {
        Some(b) if b.area() >= face.area() => Some(b),
        _ => Some(face),
    })
}

/// Grow `face` by `padding` on every side, clamped to a `width` x `height` bitmap
///
/// Returns `None` if nothing of the face lies inside the bitmap.
pub fn padded_region(face: &FaceRect, width: u32, height: u32, padding: u32) -> Option<FaceRect> {
    let x0 = face.x.saturating_sub(padding);
    let y0 = face.y.saturating_sub(padding);
    let x1 = face
        .x
        .saturating_add(face.width)
        .saturating_add(padding)
        .min(width);
    let y1 = face
        .y
        .saturating_add(face.height)
        .saturating_add(padding)
        .min(height);

    if x1 <= x0 || y1 <= y0 {
        return None;
    }
    Some(FaceRect::new(x0, y0, x1 - x0, y1 - y0))
}

/// Copy a region out of the bitmap
pub fn crop(image: &RgbImage, region: &FaceRect) -> RgbImage {
    imageops::crop_imm(image, region.x, region.y, region.width, region.height).to_image()
}
