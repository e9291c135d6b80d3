// Copyright (c) 2025 Fabstir
// SPDX-License-Identifier: BUSL-1.1

//! Shared helpers for integration tests: in-process fake engines,
//! generated images and hand-built multipart bodies.

#![allow(dead_code)]

use std::io::Cursor;
use std::sync::Arc;

use axum::{body::Body, http::Request, Router};
use image::{GrayImage, ImageFormat, Rgb, RgbImage};
use passport_ocr_service::{
    api::{create_app, AppState},
    vision::{
        face::{DetectionParams, FaceDetector, FaceError, FaceRect},
        mrz::OcrMrzReader,
        ocr::{OcrError, TextRecognizer},
        VisionModelManager,
    },
};

pub const BOUNDARY: &str = "passport-test-boundary";

pub const TD3_MRZ_TEXT: &str = "P<UTOERIKSSON<<ANNA<MARIA<<<<<<<<<<<<<<<<<<<\n\
                                L898902C36UTO7408122F1204159ZE184226B<<<<<10";

/// Recognizer that returns a fixed transcript or a fixed failure
pub struct FakeRecognizer {
    result: Result<String, String>,
}

impl FakeRecognizer {
    pub fn text(text: &str) -> Self {
        Self {
            result: Ok(text.to_string()),
        }
    }

    pub fn failing(message: &str) -> Self {
        Self {
            result: Err(message.to_string()),
        }
    }
}

impl TextRecognizer for FakeRecognizer {
    fn recognize(&self, _image: &RgbImage) -> Result<String, OcrError> {
        self.result.clone().map_err(OcrError::Engine)
    }
}

/// Detector that returns fixed rectangles
pub struct FakeDetector {
    faces: Vec<FaceRect>,
}

impl FakeDetector {
    pub fn new(faces: Vec<FaceRect>) -> Self {
        Self { faces }
    }
}

impl FaceDetector for FakeDetector {
    fn detect(&self, _gray: &GrayImage, _params: &DetectionParams) -> Result<Vec<FaceRect>, FaceError> {
        Ok(self.faces.clone())
    }
}

pub fn manager(
    ocr: FakeRecognizer,
    mrz: FakeRecognizer,
    faces: Option<Vec<FaceRect>>,
) -> VisionModelManager {
    let face_detector = faces.map(|f| Arc::new(FakeDetector::new(f)) as Arc<dyn FaceDetector>);
    VisionModelManager::from_parts(Arc::new(ocr), Arc::new(OcrMrzReader::new(mrz)), face_detector)
}

pub fn app(manager: VisionModelManager) -> Router {
    create_app(AppState::new(Arc::new(manager)))
}

/// Solid-colour PNG of the given size
pub fn png_bytes(width: u32, height: u32) -> Vec<u8> {
    png_from(&RgbImage::from_pixel(width, height, Rgb([230, 225, 210])))
}

/// Encode any bitmap as PNG
pub fn png_from(img: &RgbImage) -> Vec<u8> {
    let mut out = Cursor::new(Vec::new());
    img.write_to(&mut out, ImageFormat::Png).unwrap();
    out.into_inner()
}

/// Paint a solid rectangle
pub fn fill(img: &mut RgbImage, rect: FaceRect, colour: Rgb<u8>) {
    for y in rect.y..rect.y + rect.height {
        for x in rect.x..rect.x + rect.width {
            img.put_pixel(x, y, colour);
        }
    }
}

/// Every channel within 40 of the expected colour (JPEG is lossy)
pub fn near(pixel: &Rgb<u8>, expected: Rgb<u8>) -> bool {
    pixel
        .0
        .iter()
        .zip(expected.0.iter())
        .all(|(a, b)| a.abs_diff(*b) <= 40)
}

/// One multipart part; `filename: None` makes it a plain form value
pub struct Part<'a> {
    pub name: &'a str,
    pub filename: Option<&'a str>,
    pub data: &'a [u8],
}

pub fn multipart_body(parts: &[Part<'_>]) -> Vec<u8> {
    let mut body = Vec::new();
    for part in parts {
        body.extend_from_slice(format!("--{}\r\n", BOUNDARY).as_bytes());
        match part.filename {
            Some(filename) => {
                body.extend_from_slice(
                    format!(
                        "Content-Disposition: form-data; name=\"{}\"; filename=\"{}\"\r\n",
                        part.name, filename
                    )
                    .as_bytes(),
                );
                body.extend_from_slice(b"Content-Type: application/octet-stream\r\n");
            }
            None => {
                body.extend_from_slice(
                    format!("Content-Disposition: form-data; name=\"{}\"\r\n", part.name).as_bytes(),
                );
            }
        }
        body.extend_from_slice(b"\r\n");
        body.extend_from_slice(part.data);
        body.extend_from_slice(b"\r\n");
    }
    body.extend_from_slice(format!("--{}--\r\n", BOUNDARY).as_bytes());
    body
}

pub fn upload_request(parts: &[Part<'_>]) -> Request<Body> {
    Request::builder()
        .method("POST")
        .uri("/process-passport")
        .header(
            "content-type",
            format!("multipart/form-data; boundary={}", BOUNDARY),
        )
        .body(Body::from(multipart_body(parts)))
        .unwrap()
}

pub fn file_request(filename: &str, data: &[u8]) -> Request<Body> {
    upload_request(&[Part {
        name: "file",
        filename: Some(filename),
        data,
    }])
}

pub async fn json_body(response: axum::response::Response) -> serde_json::Value {
    let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .unwrap();
    serde_json::from_slice(&bytes).unwrap()
}
