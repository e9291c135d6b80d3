// Copyright (c) 2025 Fabstir
// SPDX-License-Identifier: BUSL-1.1
//! Per-sub-task outcome types shared by the three extractors

use std::fmt;

/// Separator placed between sub-task failure messages in the aggregate error
pub const ERROR_SEPARATOR: &str = " | ";

/// Which extractor produced a failure
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Extractor {
    Ocr,
    Mrz,
    Face,
}

impl Extractor {
    fn label(&self) -> &'static str {
        match self {
            Extractor::Ocr => "OCR error",
            Extractor::Mrz => "MRZ error",
            Extractor::Face => "Face extraction error",
        }
    }
}

/// A sub-task failure, tagged with the extractor it came from
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExtractionError {
    pub extractor: Extractor,
    pub message: String,
}

impl ExtractionError {
    pub fn new(extractor: Extractor, message: impl Into<String>) -> Self {
        Self {
            extractor,
            message: message.into(),
        }
    }
}

impl fmt::Display for ExtractionError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}: {}", self.extractor.label(), self.message)
    }
}

impl std::error::Error for ExtractionError {}

/// Outcome of one extractor: a payload or a failure, never both
pub type ExtractionResult<T> = Result<T, ExtractionError>;

/// Join sub-task failures in the order given, or `None` if there are none
pub fn combine_errors<'a, I>(errors: I) -> Option<String>
where
    I: IntoIterator<Item = &'a ExtractionError>,
{
    let messages: Vec<String> = errors.into_iter().map(|e| e.to_string()).collect();
    if messages.is_empty() {
        None
    } else {
        Some(messages.join(ERROR_SEPARATOR))
    }
}
