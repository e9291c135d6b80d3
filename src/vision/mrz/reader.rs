// Copyright (c) 2025 Fabstir
// SPDX-License-Identifier: BUSL-1.1
//! MRZ readers: locate and decode the machine-readable zone of a bitmap

use std::collections::HashMap;

use image::{imageops, RgbImage};
use rusty_tesseract::Args;
use thiserror::Error;
use tracing::debug;

use super::parser::{find_mrz, MrzRecord};
use crate::vision::ocr::{OcrError, TesseractEngine, TextRecognizer};

/// Characters that can appear in an MRZ
const MRZ_ALPHABET: &str = "ABCDEFGHIJKLMNOPQRSTUVWXYZ0123456789<";


#[derive(Debug, Error)]
pub enum MrzError {
    #[error("MRZ parsing failed: {0}")]
    Ocr(#[from] OcrError),
}

/// Reads an MRZ record from a bitmap, or reports that none was found
#[cfg_attr(test, mockall::automock)]
pub trait MrzReader: Send + Sync {
    fn read(&self, image: &RgbImage) -> Result<Option<MrzRecord>, MrzError>;
}

/// MRZ reader that runs a text recognizer restricted to the MRZ alphabet
/// and parses the result with the ICAO 9303 grammar
pub struct OcrMrzReader<R: TextRecognizer> {
    recognizer: R,
}

impl OcrMrzReader<TesseractEngine> {
    /// Tesseract configured for a uniform text block over the MRZ alphabet
    pub fn tesseract(language: &str) -> Self {
        let mut config_variables = HashMap::new();
        config_variables.insert(
            "tessedit_char_whitelist".to_string(),
            MRZ_ALPHABET.to_string(),
        );

        Self::new(TesseractEngine::with_args(Args {
            lang: language.to_string(),
            config_variables,
            dpi: None,
            psm: Some(6),
            oem: Some(3),
        }))
    }
}

impl<R: TextRecognizer> OcrMrzReader<R> {
    pub fn new(recognizer: R) -> Self {
        Self { recognizer }
    }
}

impl<R: TextRecognizer> MrzReader for OcrMrzReader<R> {
    fn read(&self, image: &RgbImage) -> Result<Option<MrzRecord>, MrzError> {
        let band = mrz_band(image);
        let text = self.recognizer.recognize(&band)?;
        if let Some(record) = find_mrz(&text) {
            debug!("MRZ found in lower band (score {})", record.valid_score);
            return Ok(Some(record));
        }

        let text = self.recognizer.recognize(image)?;
        let record = find_mrz(&text);
        debug!("MRZ full-page fallback found: {}", record.is_some());
        Ok(record)
    }
}

/// Lower 40% of the page, where passport MRZs are printed
pub fn mrz_band(image: &RgbImage) -> RgbImage {
    let (width, height) = image.dimensions();
    let band_height = (height * 2).div_ceil(5);
    let top = height - band_height;
    imageops::crop_imm(image, 0, top, width, band_height).to_image()
}
