//! JPEG marker segment scanner.
//!
//! Walks the segment chain from `SOI` and stops at the first APP1 segment
//! carrying the `Exif\0\0` signature. Segment structure:
//!
//! ```text
//! FF D8                      SOI (no length)
//! FF xx LL LL <LL-2 bytes>   marker segment, big-endian length includes itself
//! ...
//! FF DA ...                  SOS: entropy-coded data follows, scanning stops
//! ```
//!
//! Exif always precedes the scan data, so nothing past `SOS` is examined.

use super::ExifError;
use super::reader::{ByteOrder, ByteReader};

pub const SOI: [u8; 2] = [0xFF, 0xD8];
pub const EXIF_SIGNATURE: &[u8; 6] = b"Exif\0\0";

const MARKER_PREFIX: u8 = 0xFF;
const SOS: u8 = 0xDA;
const APP1: u8 = 0xE1;
const MIN_FILE_LEN: usize = 4;

/// Locate the TIFF header of the Exif APP1 segment.
///
/// Returns the absolute offset of the byte right after `Exif\0\0`. APP1
/// segments with a different signature (XMP, for instance) are skipped.
pub fn find_tiff_header(data: &[u8]) -> Result<usize, ExifError> {
    if data.len() < MIN_FILE_LEN {
        return Err(ExifError::TooShort(data.len()));
    }
    if !data.starts_with(&SOI) {
        return Err(ExifError::NotJpeg);
    }

    let mut reader = ByteReader::at(data, SOI.len());
    loop {
        let offset = reader.position();
        let [prefix, marker] = reader.read_array::<2>()?;
        if prefix != MARKER_PREFIX {
            return Err(ExifError::BadMarker {
                offset,
                found: prefix,
            });
        }
        if marker == SOS {
            return Err(ExifError::NoExifSegment);
        }

        let length = reader.read_u16(ByteOrder::Big)?;
        if length < 2 {
            return Err(ExifError::BadSegmentLength { offset, length });
        }
        let payload_len = usize::from(length - 2);

        if marker == APP1
            && payload_len >= EXIF_SIGNATURE.len()
            && reader.peek_slice(EXIF_SIGNATURE.len())? == EXIF_SIGNATURE
        {
            return Ok(reader.position() + EXIF_SIGNATURE.len());
        }

        reader.skip(payload_len)?;
    }
}
