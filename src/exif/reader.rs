//! Bounds-checked cursor over an in-memory file.
//!
//! Every read either returns the requested bytes and advances, or fails with
//! [`ExifError::Truncated`] and leaves the position untouched. Offsets taken
//! from the file itself are never trusted: seeking past the end is allowed,
//! but the next read reports the truncation.

use super::ExifError;

/// Layout of multi-byte integers inside a TIFF structure.
///
/// Chosen once from the `II`/`MM` tag at the start of the TIFF header and
/// passed to every subsequent read for that file.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ByteOrder {
    /// `II` (Intel)
    Little,
    /// `MM` (Motorola)
    Big,
}

impl ByteOrder {
    /// Interpret a TIFF byte-order tag. Anything other than `II` or `MM` is rejected.
    pub fn from_tag(tag: [u8; 2]) -> Option<Self> {
        match &tag {
            b"II" => Some(ByteOrder::Little),
            b"MM" => Some(ByteOrder::Big),
            _ => None,
        }
    }

    #[inline]
    pub fn u16(self, bytes: [u8; 2]) -> u16 {
        match self {
            ByteOrder::Little => u16::from_le_bytes(bytes),
            ByteOrder::Big => u16::from_be_bytes(bytes),
        }
    }

    #[inline]
    pub fn u32(self, bytes: [u8; 4]) -> u32 {
        match self {
            ByteOrder::Little => u32::from_le_bytes(bytes),
            ByteOrder::Big => u32::from_be_bytes(bytes),
        }
    }
}

/// Cursor over a whole file buffer whose reads fail instead of running past the end.
#[derive(Debug, Clone)]
pub struct ByteReader<'a> {
    buf: &'a [u8],
    position: usize,
}

impl<'a> ByteReader<'a> {
    pub fn new(buf: &'a [u8]) -> Self {
        Self { buf, position: 0 }
    }

    /// Start reading at an absolute `position`, which may lie past the end.
    pub fn at(buf: &'a [u8], position: usize) -> Self {
        Self { buf, position }
    }

    pub fn position(&self) -> usize {
        self.position
    }

    /// Bytes left between the cursor and the end of the buffer.
    pub fn remaining(&self) -> usize {
        self.buf.len().saturating_sub(self.position)
    }

    pub fn seek(&mut self, position: usize) {
        self.position = position;
    }

    /// Look at the next `count` bytes without advancing.
    pub fn peek_slice(&self, count: usize) -> Result<&'a [u8], ExifError> {
        if self.remaining() < count {
            return Err(ExifError::Truncated {
                offset: self.position,
                needed: count,
            });
        }
        Ok(&self.buf[self.position..self.position + count])
    }

    pub fn read_slice(&mut self, count: usize) -> Result<&'a [u8], ExifError> {
        let slice = self.peek_slice(count)?;
        self.position += count;
        Ok(slice)
    }

    /// Advance by `count` bytes. Landing exactly on the end is fine.
    pub fn skip(&mut self, count: usize) -> Result<(), ExifError> {
        self.read_slice(count).map(|_| ())
    }

    pub fn read_array<const N: usize>(&mut self) -> Result<[u8; N], ExifError> {
        let slice = self.read_slice(N)?;
        let mut out = [0u8; N];
        out.copy_from_slice(slice);
        Ok(out)
    }

    pub fn read_u8(&mut self) -> Result<u8, ExifError> {
        let [byte] = self.read_array::<1>()?;
        Ok(byte)
    }

    pub fn read_u16(&mut self, order: ByteOrder) -> Result<u16, ExifError> {
        self.read_array::<2>().map(|b| order.u16(b))
    }

    pub fn read_u32(&mut self, order: ByteOrder) -> Result<u32, ExifError> {
        self.read_array::<4>().map(|b| order.u32(b))
    }
}
