// Copyright (c) 2025 Fabstir
// SPDX-License-Identifier: BUSL-1.1
//! Vision model manager for the OCR, MRZ and face detection engines

use std::sync::Arc;

use crate::config::ServiceConfig;
use crate::vision::face::FaceDetector;
use crate::vision::mrz::{MrzReader, OcrMrzReader};
use crate::vision::ocr::{TesseractEngine, TextRecognizer};

/// Configuration for loading vision engines
#[derive(Debug, Clone)]
pub struct VisionModelConfig {
    /// Tesseract language for free-form OCR
    pub ocr_language: String,
    /// Tesseract language for reading the MRZ band
    pub mrz_language: String,
    /// Path to the Haar cascade XML (optional)
    pub haar_cascade_path: Option<String>,
}

impl Default for VisionModelConfig {
    fn default() -> Self {
        Self {
            ocr_language: "eng".to_string(),
            mrz_language: "eng".to_string(),
            haar_cascade_path: Some(
                "/usr/share/opencv4/haarcascades/haarcascade_frontalface_default.xml".to_string(),
            ),
        }
    }
}

impl From<&ServiceConfig> for VisionModelConfig {
    fn from(config: &ServiceConfig) -> Self {
        Self {
            ocr_language: config.ocr_language.clone(),
            mrz_language: config.mrz_language.clone(),
            haar_cascade_path: Some(config.haar_cascade_path.clone()),
        }
    }
}

/// Information about a loaded vision engine
#[derive(Debug, Clone)]
pub struct VisionModelInfo {
    /// Engine name
    pub name: String,
    /// Model type (ocr, mrz, face)
    pub model_type: String,
    /// Whether the engine is available
    pub available: bool,
}

/// Manager for the process-wide vision engines
///
/// Engines are loaded once at startup and only read afterwards, so the
/// manager is shared between requests behind an `Arc`.
pub struct VisionModelManager {
    text_recognizer: Arc<dyn TextRecognizer>,
    mrz_reader: Arc<dyn MrzReader>,
    face_detector: Option<Arc<dyn FaceDetector>>,
    tesseract_version: Option<String>,
}

impl VisionModelManager {
    /// Load all engines from the given configuration
    ///
    /// Missing engines are handled gracefully: a missing tesseract binary
    /// surfaces later as per-request OCR/MRZ errors, and a missing cascade
    /// leaves the face slot empty.
    pub fn new(config: &VisionModelConfig) -> Self {
        let tesseract_version = match TesseractEngine::version() {
            Ok(version) => {
                tracing::info!("✅ Tesseract available: {}", version.lines().next().unwrap_or(""));
                Some(version)
            }
            Err(e) => {
                tracing::warn!("⚠️ Tesseract not available: {}", e);
                None
            }
        };

        let face_detector = match config.haar_cascade_path {
            Some(ref path) => load_face_detector(path),
            None => None,
        };

        Self {
            text_recognizer: Arc::new(TesseractEngine::new(&config.ocr_language)),
            mrz_reader: Arc::new(OcrMrzReader::tesseract(&config.mrz_language)),
            face_detector,
            tesseract_version,
        }
    }

    /// Build a manager from already-constructed engines
    pub fn from_parts(
        text_recognizer: Arc<dyn TextRecognizer>,
        mrz_reader: Arc<dyn MrzReader>,
        face_detector: Option<Arc<dyn FaceDetector>>,
    ) -> Self {
        Self {
            text_recognizer,
            mrz_reader,
            face_detector,
            tesseract_version: None,
        }
    }

    pub fn text_recognizer(&self) -> Arc<dyn TextRecognizer> {
        self.text_recognizer.clone()
    }

    pub fn mrz_reader(&self) -> Arc<dyn MrzReader> {
        self.mrz_reader.clone()
    }

    pub fn face_detector(&self) -> Option<Arc<dyn FaceDetector>> {
        self.face_detector.clone()
    }

    /// Check if face detection is available
    pub fn has_face_detector(&self) -> bool {
        self.face_detector.is_some()
    }

    /// List all vision engines and whether they can be used
    pub fn list_models(&self) -> Vec<VisionModelInfo> {
        let tesseract = self.tesseract_version.is_some();

        vec![
            VisionModelInfo {
                name: "tesseract".to_string(),
                model_type: "ocr".to_string(),
                available: tesseract,
            },
            VisionModelInfo {
                name: "tesseract-mrz".to_string(),
                model_type: "mrz".to_string(),
                available: tesseract,
            },
            VisionModelInfo {
                name: "haarcascade-frontalface".to_string(),
                model_type: "face".to_string(),
                available: self.face_detector.is_some(),
            },
        ]
    }
}

#[cfg(feature = "opencv")]
fn load_face_detector(path: &str) -> Option<Arc<dyn FaceDetector>> {
    use crate::vision::face::HaarCascadeDetector;

    match HaarCascadeDetector::load(path) {
        Ok(detector) => {
            tracing::info!("✅ Haar cascade loaded from {}", path);
            Some(Arc::new(detector))
        }
        Err(e) => {
            tracing::warn!("⚠️ Failed to load Haar cascade from {}: {}", path, e);
            None
        }
    }
}

#[cfg(not(feature = "opencv"))]
fn load_face_detector(path: &str) -> Option<Arc<dyn FaceDetector>> {
    tracing::warn!(
        "⚠️ Built without the `opencv` feature, ignoring Haar cascade at {}",
        path
    );
    None
}
