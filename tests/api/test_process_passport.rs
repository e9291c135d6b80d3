// Copyright (c) 2025 Fabstir
// SPDX-License-Identifier: BUSL-1.1

//! POST /process-passport tests
//!
//! These tests verify that the endpoint:
//! - Rejects requests without a usable `file` upload (400)
//! - Reports undecodable uploads as server errors (500)
//! - Always returns all four fields for a decodable image
//! - Isolates sub-task failures into the combined `error` field

use axum::http::StatusCode;
use base64::{engine::general_purpose::STANDARD, Engine as _};
use image::{Rgb, RgbImage};
use passport_ocr_service::vision::face::FaceRect;
use serde_json::json;
use tower::util::ServiceExt; // for `oneshot`

use crate::common::{
    app, file_request, fill, json_body, manager, near, png_bytes, png_from, upload_request,
    FakeRecognizer, Part, TD3_MRZ_TEXT,
};

fn decoded_dims(encoded: &str) -> (u32, u32) {
    let bytes = STANDARD.decode(encoded).unwrap();
    let img = image::load_from_memory(&bytes).unwrap();
    (img.width(), img.height())
}

// =============================================================================
// Request-level errors
// =============================================================================

#[tokio::test]
async fn test_missing_file_field_is_400() {
    let app = app(manager(
        FakeRecognizer::text(""),
        FakeRecognizer::text(""),
        None,
    ));

    let request = upload_request(&[Part {
        name: "photo",
        filename: Some("passport.png"),
        data: &png_bytes(10, 10),
    }]);
    let response = app.oneshot(request).await.unwrap();

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    assert_eq!(json_body(response).await, json!({ "error": "No file provided" }));
}

#[tokio::test]
async fn test_file_field_without_filename_is_not_an_upload() {
    let app = app(manager(
        FakeRecognizer::text(""),
        FakeRecognizer::text(""),
        None,
    ));

    let request = upload_request(&[Part {
        name: "file",
        filename: None,
        data: b"just a form value",
    }]);
    let response = app.oneshot(request).await.unwrap();

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    assert_eq!(json_body(response).await, json!({ "error": "No file provided" }));
}

#[tokio::test]
async fn test_empty_filename_is_400() {
    let app = app(manager(
        FakeRecognizer::text(""),
        FakeRecognizer::text(""),
        None,
    ));

    let response = app.oneshot(file_request("", &png_bytes(10, 10))).await.unwrap();

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    assert_eq!(json_body(response).await, json!({ "error": "No file selected" }));
}

#[tokio::test]
async fn test_not_multipart_is_400() {
    let app = app(manager(
        FakeRecognizer::text(""),
        FakeRecognizer::text(""),
        None,
    ));

    let request = axum::http::Request::builder()
        .method("POST")
        .uri("/process-passport")
        .header("content-type", "application/json")
        .body(axum::body::Body::from("{}"))
        .unwrap();
    let response = app.oneshot(request).await.unwrap();

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    assert_eq!(json_body(response).await, json!({ "error": "No file provided" }));
}

#[tokio::test]
async fn test_undecodable_upload_is_500() {
    let app = app(manager(
        FakeRecognizer::text(""),
        FakeRecognizer::text(""),
        None,
    ));

    let response = app
        .oneshot(file_request("notes.txt", b"definitely not an image"))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);
    let body = json_body(response).await;
    let error = body["error"].as_str().unwrap();
    assert!(error.starts_with("Server error: "), "got {error}");
}

// =============================================================================
// Successful extraction
// =============================================================================

#[tokio::test]
async fn test_full_extraction() {
    let app = app(manager(
        FakeRecognizer::text("  PASSPORT\nUtopia\n  "),
        FakeRecognizer::text(TD3_MRZ_TEXT),
        Some(vec![FaceRect::new(20, 20, 40, 50)]),
    ));

    let response = app
        .oneshot(file_request("passport.png", &png_bytes(200, 150)))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    let body = json_body(response).await;

    assert_eq!(body["ocr_text"], "PASSPORT\nUtopia");
    assert_eq!(
        body["mrz_data"],
        json!({
            "Surname": "ERIKSSON",
            "Given Names": "ANNA MARIA",
            "Passport Number": "L898902C3",
            "Nationality": "UTO",
            "DOB": "740812",
            "Sex": "F",
            "Expiry Date": "120415",
        })
    );
    let face = body["face_image"].as_str().unwrap();
    assert_eq!(decoded_dims(face), (60, 70));
    assert!(body["error"].is_null());
}

#[tokio::test]
async fn test_response_always_has_four_fields() {
    let app = app(manager(
        FakeRecognizer::text(""),
        FakeRecognizer::text(""),
        Some(vec![]),
    ));

    let response = app
        .oneshot(file_request("blank.png", &png_bytes(32, 32)))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    let body = json_body(response).await;
    let obj = body.as_object().unwrap();
    assert_eq!(obj.len(), 4);
    assert_eq!(body["ocr_text"], "");
    assert_eq!(body["mrz_data"], json!({}));
    assert!(body["face_image"].is_null());
    assert!(body["error"].is_null());
}

#[tokio::test]
async fn test_overlapping_faces_crop_the_larger_one() {
    let small = FaceRect::new(90, 50, 40, 40);
    let large = FaceRect::new(125, 80, 70, 65);

    let mut page = RgbImage::from_pixel(200, 150, Rgb([255, 255, 255]));
    fill(&mut page, small, Rgb([0, 0, 255]));
    fill(&mut page, FaceRect::new(150, 110, 40, 30), Rgb([255, 0, 0]));

    let app = app(manager(
        FakeRecognizer::text(""),
        FakeRecognizer::text(""),
        Some(vec![small, large]),
    ));

    let response = app
        .oneshot(file_request("passport.png", &png_from(&page)))
        .await
        .unwrap();

    let body = json_body(response).await;
    let face = body["face_image"].as_str().unwrap();
    let crop = image::load_from_memory(&STANDARD.decode(face).unwrap())
        .unwrap()
        .to_rgb8();

    // x: 115..200, y: 70..150, clamped on the right and bottom
    assert_eq!(crop.dimensions(), (85, 80));
    assert!(near(crop.get_pixel(5, 8), Rgb([0, 0, 255])));
    assert!(near(crop.get_pixel(70, 10), Rgb([255, 255, 255])));
    assert!(near(crop.get_pixel(55, 55), Rgb([255, 0, 0])));
}

// =============================================================================
// Partial failures
// =============================================================================

#[tokio::test]
async fn test_ocr_failure_does_not_affect_other_results() {
    let app = app(manager(
        FakeRecognizer::failing("tesseract crashed"),
        FakeRecognizer::text(TD3_MRZ_TEXT),
        Some(vec![FaceRect::new(20, 20, 40, 50)]),
    ));

    let response = app
        .oneshot(file_request("passport.png", &png_bytes(200, 150)))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    let body = json_body(response).await;

    assert_eq!(body["ocr_text"], "");
    assert_eq!(body["mrz_data"]["Surname"], "ERIKSSON");
    assert!(body["face_image"].is_string());
    assert_eq!(
        body["error"],
        "OCR error: OCR extraction failed: tesseract crashed"
    );
}

#[tokio::test]
async fn test_all_failures_are_joined_in_order() {
    let app = app(manager(
        FakeRecognizer::failing("no tesseract"),
        FakeRecognizer::failing("no tesseract"),
        None,
    ));

    let response = app
        .oneshot(file_request("passport.png", &png_bytes(64, 64)))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    let body = json_body(response).await;
    let error = body["error"].as_str().unwrap();

    let parts: Vec<&str> = error.split(" | ").collect();
    assert_eq!(parts.len(), 3);
    assert!(parts[0].starts_with("OCR error: "));
    assert!(parts[1].starts_with("MRZ error: "));
    assert_eq!(parts[2], "Face extraction error: face detector not loaded");
    assert_eq!(body["mrz_data"], json!({}));
    assert!(body["face_image"].is_null());
}

#[tokio::test]
async fn test_unreadable_mrz_is_empty_mapping() {
    let app = app(manager(
        FakeRecognizer::text("some visual zone text"),
        FakeRecognizer::text("NOT AN MRZ\nAT ALL"),
        Some(vec![]),
    ));

    let response = app
        .oneshot(file_request("passport.png", &png_bytes(64, 64)))
        .await
        .unwrap();

    let body = json_body(response).await;
    assert_eq!(body["mrz_data"], json!({}));
    assert!(body["error"].is_null());
}

// =============================================================================
// Body limit
// =============================================================================

#[tokio::test]
async fn test_upload_over_limit_is_413() {
    use passport_ocr_service::api::{create_app, AppState};
    use std::sync::Arc;

    let state = AppState::new(Arc::new(manager(
        FakeRecognizer::text(""),
        FakeRecognizer::text(""),
        None,
    )))
    .with_max_upload_bytes(1024);
    let app = create_app(state);

    let response = app
        .oneshot(file_request("huge.png", &vec![0u8; 8 * 1024]))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::PAYLOAD_TOO_LARGE);
}
