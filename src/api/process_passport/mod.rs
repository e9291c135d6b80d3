// Copyright (c) 2025 Fabstir
// SPDX-License-Identifier: BUSL-1.1
//! Passport processing endpoint module
//!
//! Provides POST /process-passport: OCR text, MRZ fields and a face crop
//! extracted from one uploaded photo.

pub mod aggregate;
pub mod handler;
pub mod request;
pub mod response;

pub use aggregate::run_extractors;
pub use handler::process_passport_handler;
pub use request::UploadedImage;
pub use response::PassportResponse;
