//! Shared test utilities for the snapdate test suite.
//!
//! Builds synthetic JPEG files carrying an Exif APP1 segment, so the scanner
//! and walker can be exercised without binary fixtures on disk.
//!
//! # Usage
//!
//! ```rust,ignore
//! use crate::test_helpers::*;
//!
//! let tiff = TiffBuilder::new(ByteOrder::Big)
//!     .exif_entry(TestEntry::date_time_original("2023:07:04 10:11:12"))
//!     .build();
//! let jpeg = JpegBuilder::new().app1_exif(&tiff).build();
//! assert_eq!(read_capture_date(&jpeg).as_deref(), Some("2023-07-04"));
//! ```

use std::path::Path;
use tempfile::TempDir;

use crate::exif::reader::ByteOrder;
use crate::exif::tiff::{TAG_DATE_TIME_ORIGINAL, TAG_EXIF_IFD_POINTER, TYPE_ASCII};

const TYPE_LONG: u16 = 4;

// =========================================================================
// IFD entries
// =========================================================================

/// Where an entry's value bytes end up in the built TIFF block.
#[derive(Debug, Clone)]
pub enum TestValue {
    /// Written straight into the entry's 4-byte value field.
    Inline([u8; 4]),
    /// Appended to the data area; the entry stores its offset.
    External(Vec<u8>),
}

#[derive(Debug, Clone)]
pub struct TestEntry {
    pub tag: u16,
    pub field_type: u16,
    pub count: u32,
    pub value: TestValue,
}

impl TestEntry {
    /// A NUL-terminated ASCII entry, placed inline when it fits.
    pub fn ascii(tag: u16, text: &str) -> Self {
        let mut bytes = text.as_bytes().to_vec();
        bytes.push(0);
        let count = bytes.len() as u32;
        let value = if bytes.len() <= 4 {
            let mut inline = [0u8; 4];
            inline[..bytes.len()].copy_from_slice(&bytes);
            TestValue::Inline(inline)
        } else {
            TestValue::External(bytes)
        };
        Self {
            tag,
            field_type: TYPE_ASCII,
            count,
            value,
        }
    }

    pub fn date_time_original(text: &str) -> Self {
        Self::ascii(TAG_DATE_TIME_ORIGINAL, text)
    }

    /// A single LONG, using the value field as a plain number.
    pub fn long(tag: u16, value: u32) -> Self {
        Self {
            tag,
            field_type: TYPE_LONG,
            count: 1,
            value: TestValue::Inline(value.to_be_bytes()),
        }
    }
}

// =========================================================================
// TIFF block
// =========================================================================

/// Assembles a TIFF header followed by IFD0 and an Exif sub-IFD.
///
/// Layout: header (8) → IFD0 → Exif IFD → shared data area. IFD0 gets the
/// Exif pointer as its last entry unless [`TiffBuilder::without_exif_pointer`]
/// is used.
pub struct TiffBuilder {
    order: ByteOrder,
    with_pointer: bool,
    ifd0: Vec<TestEntry>,
    exif: Vec<TestEntry>,
}

impl TiffBuilder {
    pub fn new(order: ByteOrder) -> Self {
        Self {
            order,
            with_pointer: true,
            ifd0: Vec::new(),
            exif: Vec::new(),
        }
    }

    pub fn without_exif_pointer(mut self) -> Self {
        self.with_pointer = false;
        self
    }

    pub fn ifd0_entry(mut self, entry: TestEntry) -> Self {
        self.ifd0.push(entry);
        self
    }

    pub fn exif_entry(mut self, entry: TestEntry) -> Self {
        self.exif.push(entry);
        self
    }

    pub fn build(&self) -> Vec<u8> {
        let ifd0_count = self.ifd0.len() + usize::from(self.with_pointer);
        let ifd0_len = 2 + 12 * ifd0_count + 4;
        let exif_offset = 8 + ifd0_len;
        let exif_len = 2 + 12 * self.exif.len() + 4;
        let data_offset = exif_offset + exif_len;

        let mut out = Vec::new();
        let mut data = Vec::new();

        out.extend_from_slice(match self.order {
            ByteOrder::Little => b"II",
            ByteOrder::Big => b"MM",
        });
        self.put_u16(&mut out, 42);
        self.put_u32(&mut out, 8);

        self.put_u16(&mut out, ifd0_count as u16);
        for entry in &self.ifd0 {
            self.put_entry(&mut out, &mut data, data_offset, entry);
        }
        if self.with_pointer {
            self.put_u16(&mut out, TAG_EXIF_IFD_POINTER);
            self.put_u16(&mut out, TYPE_LONG);
            self.put_u32(&mut out, 1);
            self.put_u32(&mut out, exif_offset as u32);
        }
        self.put_u32(&mut out, 0);

        self.put_u16(&mut out, self.exif.len() as u16);
        for entry in &self.exif {
            self.put_entry(&mut out, &mut data, data_offset, entry);
        }
        self.put_u32(&mut out, 0);

        debug_assert_eq!(out.len(), data_offset);
        out.extend_from_slice(&data);
        out
    }

    fn put_entry(
        &self,
        out: &mut Vec<u8>,
        data: &mut Vec<u8>,
        data_offset: usize,
        e: &TestEntry,
    ) {
        self.put_u16(out, e.tag);
        self.put_u16(out, e.field_type);
        self.put_u32(out, e.count);
        match &e.value {
            // LONG values are stored as numbers in the file's byte order
            TestValue::Inline(bytes) if e.field_type == TYPE_LONG => {
                self.put_u32(out, u32::from_be_bytes(*bytes));
            }
            TestValue::Inline(bytes) => out.extend_from_slice(bytes),
            TestValue::External(bytes) => {
                self.put_u32(out, (data_offset + data.len()) as u32);
                data.extend_from_slice(bytes);
            }
        }
    }

    fn put_u16(&self, out: &mut Vec<u8>, v: u16) {
        out.extend_from_slice(&match self.order {
            ByteOrder::Little => v.to_le_bytes(),
            ByteOrder::Big => v.to_be_bytes(),
        });
    }

    fn put_u32(&self, out: &mut Vec<u8>, v: u32) {
        out.extend_from_slice(&match self.order {
            ByteOrder::Little => v.to_le_bytes(),
            ByteOrder::Big => v.to_be_bytes(),
        });
    }
}

// =========================================================================
// JPEG container
// =========================================================================

/// Assembles `SOI`, the given marker segments, then `SOS` with a few bytes
/// of fake scan data.
#[derive(Default)]
pub struct JpegBuilder {
    segments: Vec<(u8, Vec<u8>)>,
}

impl JpegBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn segment(mut self, marker: u8, payload: &[u8]) -> Self {
        self.segments.push((marker, payload.to_vec()));
        self
    }

    /// APP1 carrying `Exif\0\0` followed by `tiff`.
    pub fn app1_exif(self, tiff: &[u8]) -> Self {
        let mut payload = b"Exif\0\0".to_vec();
        payload.extend_from_slice(tiff);
        self.segment(0xE1, &payload)
    }

    pub fn build(&self) -> Vec<u8> {
        let mut out = vec![0xFF, 0xD8];
        for (marker, payload) in &self.segments {
            out.extend_from_slice(&[0xFF, *marker]);
            out.extend_from_slice(&((payload.len() + 2) as u16).to_be_bytes());
            out.extend_from_slice(payload);
        }
        out.extend_from_slice(&[0xFF, 0xDA, 0x00, 0x08, 0x01, 0x01, 0x00, 0x00, 0x3F, 0x00]);
        out.extend_from_slice(&[0x12, 0x34, 0x56, 0xFF, 0xD9]);
        out
    }
}

/// A complete JPEG whose Exif IFD carries `date` as DateTimeOriginal.
pub fn jpeg_with_date(order: ByteOrder, date: &str) -> Vec<u8> {
    let tiff = TiffBuilder::new(order)
        .exif_entry(TestEntry::date_time_original(date))
        .build();
    JpegBuilder::new()
        .segment(0xE0, b"JFIF\0\x01\x02\0\0\x01\0\x01\0\0")
        .app1_exif(&tiff)
        .build()
}

// =========================================================================
// Filesystem fixtures
// =========================================================================

/// Create a temp folder holding the given `(file name, bytes)` pairs.
pub fn image_folder<B: AsRef<[u8]>>(files: &[(&str, B)]) -> TempDir {
    let tmp = TempDir::new().unwrap();
    for (name, bytes) in files {
        write_file(tmp.path(), name, bytes.as_ref());
    }
    tmp
}

pub fn write_file(dir: &Path, name: &str, bytes: &[u8]) {
    std::fs::write(dir.join(name), bytes).unwrap();
}
