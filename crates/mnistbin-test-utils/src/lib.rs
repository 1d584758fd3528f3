//! Testing utilities for the mnistbin workspace
//!
//! Builders for text records, well-formed or deliberately broken.

#![allow(missing_docs)]

use mnistbin_codec::{TextRecord, IMAGE_COLS, IMAGE_PIXEL_COUNT, IMAGE_ROWS};

/// Render a record in the text input format
pub fn record_text(record: &TextRecord) -> String {
    let mut text = format!("{}\n", record.label());
    for row in record.rows() {
        let tokens: Vec<String> = row.iter().map(u8::to_string).collect();
        text.push_str(&tokens.join(" "));
        text.push('\n');
    }
    text
}

/// Record whose pixels are all `value`
pub fn uniform_record(label: i32, value: u8) -> TextRecord {
    TextRecord::new(label, [value; IMAGE_PIXEL_COUNT])
}

pub fn uniform_record_text(label: i32, value: u8) -> String {
    record_text(&uniform_record(label, value))
}

/// Record with a label-dependent pixel pattern, so records differ from each other
pub fn patterned_record(label: i32) -> TextRecord {
    let mut pixels = [0u8; IMAGE_PIXEL_COUNT];
    for (i, p) in pixels.iter_mut().enumerate() {
        *p = ((i as i64 * 7 + i64::from(label) * 13).rem_euclid(256)) as u8;
    }
    TextRecord::new(label, pixels)
}

/// Concatenated text of one patterned record per label
pub fn records_text(labels: &[i32]) -> String {
    labels
        .iter()
        .map(|&label| record_text(&patterned_record(label)))
        .collect()
}

/// Text of a record whose last row carries `IMAGE_COLS + delta` tokens
pub fn miscounted_record_text(label: i32, delta: isize) -> String {
    let mut text = format!("{label}\n");
    for row in 0..IMAGE_ROWS {
        let count = if row == IMAGE_ROWS - 1 {
            IMAGE_COLS.saturating_add_signed(delta)
        } else {
            IMAGE_COLS
        };
        text.push_str(&vec!["1"; count].join(" "));
        text.push('\n');
    }
    text
}

/// Text of a label followed by only `rows` pixel rows
pub fn truncated_record_text(label: i32, rows: usize) -> String {
    let mut text = format!("{label}\n");
    for _ in 0..rows.min(IMAGE_ROWS) {
        text.push_str(&vec!["0"; IMAGE_COLS].join(" "));
        text.push('\n');
    }
    text
}
