// Copyright (c) 2025 Fabstir
// SPDX-License-Identifier: BUSL-1.1
// Version information for the passport OCR service

/// Full version string with feature description
pub const VERSION: &str = "v0.1.0-passport-extraction-2026-10-19";

/// Semantic version number
pub const VERSION_NUMBER: &str = env!("CARGO_PKG_VERSION");

/// Build date
pub const BUILD_DATE: &str = "2026-10-19";

/// Supported features in this version
pub const FEATURES: &[&str] = &[
    "ocr-text",
    "mrz-td1",
    "mrz-td2",
    "mrz-td3",
    "face-crop",
    "parallel-extraction",
    "cors",
];

/// Whether this build includes the OpenCV face detector
pub fn face_detection_compiled() -> bool {
    cfg!(feature = "opencv")
}
