// Copyright (c) 2025 Fabstir
// SPDX-License-Identifier: BUSL-1.1
//! OpenCV Haar-cascade frontal face detector

use std::sync::Mutex;

use image::GrayImage;
use opencv::{
    core::{Mat, Rect, Scalar, Size, Vector, CV_8UC1},
    objdetect::CascadeClassifier,
    prelude::*,
};

use super::detector::{DetectionParams, FaceDetector, FaceError, FaceRect};

/// Haar cascade loaded from an OpenCV XML model
///
/// `detectMultiScale` needs mutable access to the classifier, so calls
/// are serialized behind a mutex.
pub struct HaarCascadeDetector {
    classifier: Mutex<CascadeClassifier>,
}

impl HaarCascadeDetector {
    pub fn load(path: &str) -> Result<Self, FaceError> {
        let classifier =
            CascadeClassifier::new(path).map_err(|e| FaceError::ModelLoad(e.to_string()))?;

        if classifier
            .empty()
            .map_err(|e| FaceError::ModelLoad(e.to_string()))?
        {
            return Err(FaceError::ModelLoad(format!("no cascade in {}", path)));
        }

        Ok(Self {
            classifier: Mutex::new(classifier),
        })
    }
}

impl FaceDetector for HaarCascadeDetector {
    fn detect(&self, gray: &GrayImage, params: &DetectionParams) -> Result<Vec<FaceRect>, FaceError> {
        let (width, height) = gray.dimensions();
        let mut mat = Mat::new_rows_cols_with_default(
            height as i32,
            width as i32,
            CV_8UC1,
            Scalar::all(0.0),
        )
        .map_err(detection_error)?;
        mat.data_bytes_mut()
            .map_err(detection_error)?
            .copy_from_slice(gray.as_raw());

        let min_size = params.min_size as i32;
        let mut faces = Vector::<Rect>::new();
        let mut classifier = self
            .classifier
            .lock()
            .map_err(|_| FaceError::Detection("cascade classifier lock poisoned".to_string()))?;

        classifier
            .detect_multi_scale(
                &mat,
                &mut faces,
                params.scale_factor,
                params.min_neighbors,
                0,
                Size::new(min_size, min_size),
                Size::new(0, 0),
            )
            .map_err(detection_error)?;

        Ok(faces
            .iter()
            .map(|r| {
                FaceRect::new(
                    r.x.max(0) as u32,
                    r.y.max(0) as u32,
                    r.width.max(0) as u32,
                    r.height.max(0) as u32,
                )
            })
            .collect())
    }
}

fn detection_error(e: opencv::Error) -> FaceError {
    FaceError::Detection(e.to_string())
}
