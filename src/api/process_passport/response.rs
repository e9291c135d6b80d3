// Copyright (c) 2025 Fabstir
// SPDX-License-Identifier: BUSL-1.1
//! Passport processing response types

use serde::{Deserialize, Serialize};

use crate::vision::extraction::{combine_errors, ExtractionResult};
use crate::vision::mrz::MrzFields;

/// Combined result of the three extractors
///
/// All four fields are always present. Failed sub-tasks leave their
/// payload at the empty default and contribute to `error`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PassportResponse {
    /// Free-form OCR text, trimmed
    pub ocr_text: String,
    /// Labeled MRZ fields, `{}` when no MRZ was read
    pub mrz_data: MrzFields,
    /// Base64 JPEG of the largest face, `null` when none was found
    pub face_image: Option<String>,
    /// Sub-task failures joined with " | ", `null` when all succeeded
    pub error: Option<String>,
}

impl PassportResponse {
    pub fn from_results(
        ocr: ExtractionResult<String>,
        mrz: ExtractionResult<MrzFields>,
        face: ExtractionResult<Option<String>>,
    ) -> Self {
        let error = combine_errors(
            [ocr.as_ref().err(), mrz.as_ref().err(), face.as_ref().err()]
                .into_iter()
                .flatten(),
        );

        Self {
            ocr_text: ocr.unwrap_or_default(),
            mrz_data: mrz.unwrap_or_default(),
            face_image: face.unwrap_or_default(),
            error,
        }
    }
}
