// Copyright (c) 2025 Fabstir
// SPDX-License-Identifier: BUSL-1.1
//! Human-labeled MRZ field mapping returned to clients

use serde::{Deserialize, Serialize};

use super::parser::MrzRecord;

/// Recognized MRZ fields, keyed by display label
///
/// Only non-empty fields are serialized, so a missing MRZ renders as `{}`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct MrzFields {
    #[serde(rename = "Surname", default, skip_serializing_if = "Option::is_none")]
    pub surname: Option<String>,

    #[serde(rename = "Given Names", default, skip_serializing_if = "Option::is_none")]
    pub given_names: Option<String>,

    #[serde(rename = "Passport Number", default, skip_serializing_if = "Option::is_none")]
    pub passport_number: Option<String>,

    #[serde(rename = "Nationality", default, skip_serializing_if = "Option::is_none")]
    pub nationality: Option<String>,

    #[serde(rename = "DOB", default, skip_serializing_if = "Option::is_none")]
    pub date_of_birth: Option<String>,

    #[serde(rename = "Sex", default, skip_serializing_if = "Option::is_none")]
    pub sex: Option<String>,

    #[serde(rename = "Expiry Date", default, skip_serializing_if = "Option::is_none")]
    pub expiry_date: Option<String>,
}

impl MrzFields {
    pub fn from_record(record: &MrzRecord) -> Self {
        Self {
            surname: non_empty(&record.surname),
            given_names: non_empty(&record.names.join(" ")),
            passport_number: non_empty(&record.number),
            nationality: non_empty(&record.nationality),
            date_of_birth: non_empty(&record.date_of_birth),
            sex: non_empty(&record.sex),
            expiry_date: non_empty(&record.expiration_date),
        }
    }

    /// Number of fields present
    pub fn len(&self) -> usize {
        [
            &self.surname,
            &self.given_names,
            &self.passport_number,
            &self.nationality,
            &self.date_of_birth,
            &self.sex,
            &self.expiry_date,
        ]
        .iter()
        .filter(|f| f.is_some())
        .count()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

fn non_empty(value: &str) -> Option<String> {
    let value = value.trim();
    if value.is_empty() {
        None
    } else {
        Some(value.to_string())
    }
}
