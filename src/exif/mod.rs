//! Capture-date extraction from JPEG files. Hand-rolled, no metadata crate.
//!
//! | Stage | Module | Output |
//! |---|---|---|
//! | **Segment scan** | [`jpeg`] | offset of the TIFF header inside the Exif APP1 |
//! | **IFD walk** | [`tiff`] | raw DateTimeOriginal text |
//! | **Normalize** | [`crate::date`] | `YYYY-MM-DD` |
//!
//! Every read goes through [`reader::ByteReader`], which bounds-checks
//! against the whole file. Internally each failure has its own
//! [`ExifError`] variant. The public [`read_capture_date`] reduces them all
//! to `None`: embedded metadata is best-effort and many files have none.

pub mod jpeg;
pub mod reader;
pub mod tiff;

use crate::date::to_iso_date;
use std::path::Path;
use thiserror::Error;

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ExifError {
    #[error("File too short to be a JPEG ({0} bytes)")]
    TooShort(usize),
    #[error("Missing JPEG start-of-image marker")]
    NotJpeg,
    #[error("Expected marker prefix 0xFF at offset {offset}, found {found:#04x}")]
    BadMarker { offset: usize, found: u8 },
    #[error("Invalid segment length {length} at offset {offset}")]
    BadSegmentLength { offset: usize, length: u16 },
    #[error("Reading {needed} bytes at offset {offset} runs past the end of the file")]
    Truncated { offset: usize, needed: usize },
    #[error("No Exif APP1 segment before start of scan")]
    NoExifSegment,
    #[error("Unknown TIFF byte order {0:?}")]
    BadByteOrder([u8; 2]),
    #[error("IFD0 has no Exif sub-IFD pointer")]
    NoExifPointer,
    #[error("Exif IFD has no DateTimeOriginal entry")]
    NoDateTag,
    #[error("DateTimeOriginal has field type {0}, expected ASCII")]
    NotAscii(u16),
    #[error("DateTimeOriginal count {0} is too short to hold a date")]
    DateCountTooShort(u32),
    #[error("Unparseable capture date {0:?}")]
    Unparseable(String),
}

/// Raw DateTimeOriginal text, e.g. `"2023:07:04 10:11:12"`.
pub fn extract_raw_date(data: &[u8]) -> Result<String, ExifError> {
    let tiff_start = jpeg::find_tiff_header(data)?;
    tiff::read_date_time_original(data, tiff_start)
}

/// Capture date normalized to `YYYY-MM-DD`, with the failure cause on error.
pub fn extract_capture_date(data: &[u8]) -> Result<String, ExifError> {
    let raw = extract_raw_date(data)?;
    to_iso_date(Some(&raw)).ok_or(ExifError::Unparseable(raw))
}

/// Capture date of an in-memory JPEG, or `None` when it has no usable one.
///
/// Never panics, whatever the input.
pub fn read_capture_date(data: &[u8]) -> Option<String> {
    match extract_capture_date(data) {
        Ok(date) => Some(date),
        Err(e) => {
            log::debug!("no capture date: {e}");
            None
        }
    }
}

/// Read a file and extract its capture date.
/// Returns `None` when the file cannot be read.
pub fn read_capture_date_from_file(path: &Path) -> Option<String> {
    match std::fs::read(path) {
        Ok(bytes) => read_capture_date(&bytes),
        Err(e) => {
            log::warn!("cannot read {}: {e}", path.display());
            None
        }
    }
}
