// Copyright (c) 2025 Fabstir
// SPDX-License-Identifier: BUSL-1.1
//! ICAO 9303 machine-readable zone grammar
//!
//! Recognizes TD1 (3x30), TD2 (2x36) and TD3 (2x44) blocks in OCR output,
//! splits them into fields and scores them by their check digits.

/// How far an OCR line may drift from the nominal MRZ line length
const LENGTH_TOLERANCE: usize = 2;

/// Check digit weights, repeated across the field
const WEIGHTS: [u32; 3] = [7, 3, 1];

/// MRZ document layout
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MrzFormat {
    /// ID cards: three lines of 30
    Td1,
    /// Older ID cards and visas: two lines of 36
    Td2,
    /// Passport booklets: two lines of 44
    Td3,
}

impl MrzFormat {
    pub fn line_len(&self) -> usize {
        match self {
            MrzFormat::Td1 => 30,
            MrzFormat::Td2 => 36,
            MrzFormat::Td3 => 44,
        }
    }

    pub fn line_count(&self) -> usize {
        match self {
            MrzFormat::Td1 => 3,
            MrzFormat::Td2 | MrzFormat::Td3 => 2,
        }
    }

    fn accepts_len(&self, len: usize) -> bool {
        len.abs_diff(self.line_len()) <= LENGTH_TOLERANCE
    }
}

/// A parsed MRZ block
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MrzRecord {
    pub format: MrzFormat,
    pub document_type: String,
    pub country: String,
    pub surname: String,
    pub names: Vec<String>,
    pub number: String,
    pub nationality: String,
    /// YYMMDD
    pub date_of_birth: String,
    pub sex: String,
    /// YYMMDD
    pub expiration_date: String,
    pub optional_data: String,
    /// Percentage of check digits that verified (0-100)
    pub valid_score: u8,
}

/// Compute the ICAO 9303 check digit for a field
pub fn check_digit(field: &str) -> char {
    let sum: u32 = field
        .chars()
        .enumerate()
        .map(|(i, c)| char_value(c) * WEIGHTS[i % 3])
        .sum();
    char::from_digit(sum % 10, 10).unwrap_or('0')
}

fn char_value(c: char) -> u32 {
    match c {
        '0'..='9' => c as u32 - '0' as u32,
        'A'..='Z' => c as u32 - 'A' as u32 + 10,
        _ => 0,
    }
}

/// Normalize one line of OCR output into MRZ alphabet
///
/// Uppercases, drops whitespace and anything outside `[A-Z0-9<]`, and
/// expands the `«` ligature tesseract sometimes emits for `<<`.
pub fn normalize_line(line: &str) -> String {
    let mut out = String::with_capacity(line.len());
    for c in line.chars() {
        match c {
            '«' => out.push_str("<<"),
            c if c.is_ascii_alphanumeric() => out.push(c.to_ascii_uppercase()),
            '<' => out.push('<'),
            _ => {}
        }
    }
    out
}

/// Find the best-scoring MRZ block in OCR text
///
/// Ties keep the first block encountered, so identical text always
/// yields the same record.
pub fn find_mrz(text: &str) -> Option<MrzRecord> {
    let lines: Vec<String> = text
        .lines()
        .map(normalize_line)
        .filter(|l| !l.is_empty())
        .collect();

    let mut best: Option<MrzRecord> = None;
    for format in [MrzFormat::Td3, MrzFormat::Td2, MrzFormat::Td1] {
        let count = format.line_count();
        if lines.len() < count {
            continue;
        }

        for window in lines.windows(count) {
            if !window.iter().all(|l| format.accepts_len(l.len())) {
                continue;
            }
            let fitted: Vec<String> = window
                .iter()
                .map(|l| fit_line(l, format.line_len()))
                .collect();

            if let Some(record) = parse_lines(format, &fitted) {
                let better = best
                    .as_ref()
                    .map_or(true, |b| record.valid_score > b.valid_score);
                if better {
                    best = Some(record);
                }
            }
        }
    }
    best
}

/// Parse already-fitted lines of the given format
///
/// Lines whose document number and birth date check digits both fail are
/// not an MRZ, however well they fit the layout.
pub fn parse_lines(format: MrzFormat, lines: &[String]) -> Option<MrzRecord> {
    if lines.len() != format.line_count()
        || lines.iter().any(|l| l.len() != format.line_len() || !l.is_ascii())
    {
        return None;
    }
    if !lines[0].starts_with(|c: char| c.is_ascii_alphabetic()) {
        return None;
    }

    match format {
        MrzFormat::Td3 | MrzFormat::Td2 => parse_two_line(format, &lines[0], &lines[1]),
        MrzFormat::Td1 => parse_td1(&lines[0], &lines[1], &lines[2]),
    }
}

fn parse_two_line(format: MrzFormat, l1: &str, l2: &str) -> Option<MrzRecord> {
    let end = format.line_len();
    let (surname, names) = split_name(&l1[5..end]);

    let optional_end = end - 1 - usize::from(format == MrzFormat::Td3);
    let composite_src = format!("{}{}{}", &l2[0..10], &l2[13..20], &l2[21..end - 1]);

    let checks = [
        verify(&l2[0..9], &l2[9..10]),
        verify(&l2[13..19], &l2[19..20]),
        verify(&l2[21..27], &l2[27..28]),
        verify(&composite_src, &l2[end - 1..end]),
    ];
    if !anchored(&checks) {
        return None;
    }

    Some(MrzRecord {
        format,
        document_type: clean(&l1[0..2]),
        country: clean(&l1[2..5]),
        surname,
        names,
        number: clean(&l2[0..9]),
        nationality: clean(&l2[10..13]),
        date_of_birth: l2[13..19].to_string(),
        sex: clean(&l2[20..21]),
        expiration_date: l2[21..27].to_string(),
        optional_data: clean(&l2[28..optional_end]),
        valid_score: score(&checks),
    })
}

fn parse_td1(l1: &str, l2: &str, l3: &str) -> Option<MrzRecord> {
    let (surname, names) = split_name(l3);
    let composite_src = format!("{}{}{}{}", &l1[5..30], &l2[0..7], &l2[8..15], &l2[18..29]);

    let checks = [
        verify(&l1[5..14], &l1[14..15]),
        verify(&l2[0..6], &l2[6..7]),
        verify(&l2[8..14], &l2[14..15]),
        verify(&composite_src, &l2[29..30]),
    ];

    if !anchored(&checks) {
        return None;
    }

    let optional = format!("{}{}", clean(&l1[15..30]), clean(&l2[18..29]));

    Some(MrzRecord {
        format: MrzFormat::Td1,
        document_type: clean(&l1[0..2]),
        country: clean(&l1[2..5]),
        surname,
        names,
        number: clean(&l1[5..14]),
        nationality: clean(&l2[15..18]),
        date_of_birth: l2[0..6].to_string(),
        sex: clean(&l2[7..8]),
        expiration_date: l2[8..14].to_string(),
        optional_data: optional,
        valid_score: score(&checks),
    })
}

/// Document number (first) or birth date (second) check digit verified
fn anchored(checks: &[bool; 4]) -> bool {
    checks[0] || checks[1]
}

/// Pad with filler or truncate to the nominal length
fn fit_line(line: &str, len: usize) -> String {
    let mut fitted: String = line.chars().take(len).collect();
    while fitted.len() < len {
        fitted.push('<');
    }
    fitted
}

/// `SURNAME<<GIVEN<NAMES<<<` -> ("SURNAME", ["GIVEN", "NAMES"])
fn split_name(field: &str) -> (String, Vec<String>) {
    let (surname, given) = match field.split_once("<<") {
        Some((s, g)) => (s, g),
        None => (field, ""),
    };

    let names = given
        .split('<')
        .filter(|n| !n.is_empty())
        .map(str::to_string)
        .collect();

    (clean(surname), names)
}

/// Strip filler and turn inner filler into spaces
fn clean(field: &str) -> String {
    field
        .trim_matches('<')
        .split('<')
        .filter(|p| !p.is_empty())
        .collect::<Vec<_>>()
        .join(" ")
}

fn verify(field: &str, digit: &str) -> bool {
    // '<' in a check position means zero
    let expected = match digit {
        "<" => '0',
        d => d.chars().next().unwrap_or(' '),
    };
    check_digit(field) == expected
}

fn score(checks: &[bool]) -> u8 {
    let passed = checks.iter().filter(|ok| **ok).count();
    (passed * 100 / checks.len()) as u8
}
