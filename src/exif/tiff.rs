//! TIFF header and IFD walker.
//!
//! The Exif payload is a small TIFF structure. All offsets inside it are
//! relative to the start of the TIFF header:
//!
//! ```text
//! +0  "II" | "MM"     byte order for everything below
//! +2  0x002A          magic
//! +4  u32             offset of IFD0
//!
//! IFD:  u16 count, then `count` 12-byte entries
//!       tag u16 | type u16 | count u32 | value-or-offset u32
//! ```
//!
//! The capture date lives two directories deep: IFD0 holds the Exif
//! sub-IFD pointer (0x8769), and the sub-IFD holds DateTimeOriginal (0x9003).

use super::ExifError;
use super::reader::{ByteOrder, ByteReader};

/// ExifIFDPointer.
pub const TAG_EXIF_IFD_POINTER: u16 = 0x8769;
/// DateTimeOriginal, `"YYYY:MM:DD HH:MM:SS\0"`.
pub const TAG_DATE_TIME_ORIGINAL: u16 = 0x9003;
pub const TYPE_ASCII: u16 = 2;
pub const IFD_ENTRY_LEN: usize = 12;

/// Shortest DateTimeOriginal count accepted.
const MIN_DATE_COUNT: u32 = 10;
/// Values up to this many bytes sit in the entry's own value field.
const INLINE_VALUE_LEN: u32 = 4;

/// Single IFD entry (tag, type, count, value/offset).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct IfdEntry {
    pub tag: u16,
    pub field_type: u16,
    pub count: u32,
    pub value_offset: u32,
    /// Absolute position of the 4-byte value field itself.
    pub value_field: usize,
}

impl IfdEntry {
    /// Absolute position of this entry's one-byte-per-count value.
    ///
    /// Inline when `count <= 4`, otherwise `tiff_start + value_offset`.
    pub fn value_position(&self, tiff_start: usize) -> usize {
        if self.count <= INLINE_VALUE_LEN {
            self.value_field
        } else {
            tiff_start.saturating_add(self.value_offset as usize)
        }
    }
}

/// Reader bound to one TIFF header and its byte order.
#[derive(Debug, Clone, Copy)]
pub struct Tiff<'a> {
    data: &'a [u8],
    start: usize,
    order: ByteOrder,
}

impl<'a> Tiff<'a> {
    /// Read the byte-order tag at `start`.
    pub fn new(data: &'a [u8], start: usize) -> Result<Self, ExifError> {
        let tag = ByteReader::at(data, start).read_array::<2>()?;
        let order = ByteOrder::from_tag(tag).ok_or(ExifError::BadByteOrder(tag))?;
        Ok(Self { data, start, order })
    }

    pub fn byte_order(&self) -> ByteOrder {
        self.order
    }

    /// Turn a header-relative offset into an absolute one.
    pub fn resolve(&self, offset: u32) -> usize {
        self.start.saturating_add(offset as usize)
    }

    pub fn ifd0(&self) -> Result<usize, ExifError> {
        let offset = ByteReader::at(self.data, self.start + 4).read_u32(self.order)?;
        Ok(self.resolve(offset))
    }

    /// First entry in the IFD at absolute `ifd` with the given tag.
    pub fn find_entry(&self, ifd: usize, tag: u16) -> Result<Option<IfdEntry>, ExifError> {
        let mut reader = ByteReader::at(self.data, ifd);
        let count = reader.read_u16(self.order)?;
        for _ in 0..count {
            let entry = self.read_entry(&mut reader)?;
            if entry.tag == tag {
                return Ok(Some(entry));
            }
        }
        Ok(None)
    }

    fn read_entry(&self, reader: &mut ByteReader<'a>) -> Result<IfdEntry, ExifError> {
        // Fail on a partial entry before decoding any of it
        reader.peek_slice(IFD_ENTRY_LEN)?;
        let tag = reader.read_u16(self.order)?;
        let field_type = reader.read_u16(self.order)?;
        let count = reader.read_u32(self.order)?;
        let value_field = reader.position();
        let value_offset = reader.read_u32(self.order)?;
        Ok(IfdEntry {
            tag,
            field_type,
            count,
            value_offset,
            value_field,
        })
    }

    /// Text of an ASCII entry: `count - 1` bytes (dropping the terminator),
    /// trimmed of whitespace and stray NULs.
    ///
    /// NULs are trimmed too, so a count that includes padding bytes past the
    /// terminator still yields clean text.
    pub fn read_ascii(&self, entry: &IfdEntry) -> Result<String, ExifError> {
        let position = entry.value_position(self.start);
        let len = (entry.count as usize).saturating_sub(1);
        let bytes = ByteReader::at(self.data, position).read_slice(len)?;
        Ok(String::from_utf8_lossy(bytes)
            .trim_matches(|c: char| c.is_whitespace() || c == '\0')
            .to_string())
    }
}

/// Raw DateTimeOriginal text for the TIFF structure starting at `tiff_start`.
pub fn read_date_time_original(data: &[u8], tiff_start: usize) -> Result<String, ExifError> {
    let tiff = Tiff::new(data, tiff_start)?;

    let ifd0 = tiff.ifd0()?;
    let pointer = tiff
        .find_entry(ifd0, TAG_EXIF_IFD_POINTER)?
        .filter(|e| e.value_offset != 0)
        .ok_or(ExifError::NoExifPointer)?;

    let exif_ifd = tiff.resolve(pointer.value_offset);
    let entry = tiff
        .find_entry(exif_ifd, TAG_DATE_TIME_ORIGINAL)?
        .ok_or(ExifError::NoDateTag)?;

    if entry.field_type != TYPE_ASCII {
        return Err(ExifError::NotAscii(entry.field_type));
    }
    if entry.count < MIN_DATE_COUNT {
        return Err(ExifError::DateCountTooShort(entry.count));
    }

    tiff.read_ascii(&entry)
}
