// Copyright (c) 2025 Fabstir
// SPDX-License-Identifier: BUSL-1.1
//! Machine-readable zone extraction
//!
//! Components:
//! - `parser` - ICAO 9303 grammar (TD1/TD2/TD3) and check digits
//! - `reader` - `MrzReader` trait and the OCR-backed reader
//! - `fields` - labeled field mapping returned to clients

pub mod fields;
pub mod parser;
pub mod reader;

pub use fields::MrzFields;
pub use parser::{find_mrz, MrzFormat, MrzRecord};
pub use reader::{MrzError, MrzReader, OcrMrzReader};

use image::RgbImage;
use tracing::{debug, warn};

use crate::vision::extraction::{ExtractionError, ExtractionResult, Extractor};

/// Read the MRZ and map it to labeled fields
///
/// "No MRZ found" is an empty mapping, not an error.
pub fn extract_mrz(reader: &dyn MrzReader, image: &RgbImage) -> ExtractionResult<MrzFields> {
    let record = reader
        .read(image)
        .map_err(|e| ExtractionError::new(Extractor::Mrz, e.to_string()))?;

    match record {
        Some(record) => {
            if record.valid_score < 100 {
                warn!(
                    "MRZ check digits partially failed ({:?}, score {})",
                    record.format, record.valid_score
                );
            }
            Ok(MrzFields::from_record(&record))
        }
        None => {
            debug!("No MRZ found");
            Ok(MrzFields::default())
        }
    }
}
