//! # Byte Cursors
//!
//! Sequential, little-endian binary buffer assembly and parsing primitives.
//!
//! [`ByteWriter`] accumulates an ordered list of chunks and concatenates them
//! once in [`ByteWriter::finish`]; [`ByteReader`] walks an immutable buffer
//! with a byte offset. Every read advances the offset by exactly the number
//! of bytes consumed, and reading past the end is a reported
//! [`CodecError::UnexpectedEof`], never a panic or silent truncation.

use crate::error::{CodecError, Result};
use bytes::{Bytes, BytesMut};

/// Write cursor assembling a container byte stream.
#[derive(Default)]
pub struct ByteWriter {
    parts: Vec<Bytes>,
    total_len: usize,
}

impl ByteWriter {
    /// Create an empty writer.
    pub fn new() -> Self {
        Self::default()
    }

    /// Append a single byte.
    pub fn write_byte(&mut self, value: u8) {
        self.write_bytes(vec![value]);
    }

    /// Append a u32 as 4 bytes, least-significant byte first.
    pub fn write_u32_le(&mut self, value: u32) {
        self.write_bytes(value.to_le_bytes().to_vec());
    }

    /// Append a chunk verbatim.
    pub fn write_bytes(&mut self, data: impl Into<Bytes>) {
        let data = data.into();
        self.total_len += data.len();
        self.parts.push(data);
    }

    /// Total number of bytes written so far.
    pub fn len(&self) -> usize {
        self.total_len
    }

    /// True if nothing has been written.
    pub fn is_empty(&self) -> bool {
        self.total_len == 0
    }

    /// Concatenate all appended chunks into one contiguous buffer.
    pub fn finish(&self) -> Bytes {
        let mut out = BytesMut::with_capacity(self.total_len);
        for part in &self.parts {
            out.extend_from_slice(part);
        }
        out.freeze()
    }
}

/// Read cursor over an immutable byte buffer.
pub struct ByteReader<'a> {
    buf: &'a [u8],
    offset: usize,
}

impl<'a> ByteReader<'a> {
    /// Create a reader positioned at the start of `buf`.
    pub fn new(buf: &'a [u8]) -> Self {
        Self { buf, offset: 0 }
    }

    /// Number of unread bytes.
    pub fn remaining(&self) -> usize {
        self.buf.len() - self.offset
    }

    /// True iff the offset has reached the end of the buffer.
    pub fn at_end(&self) -> bool {
        self.offset >= self.buf.len()
    }

    fn underrun(&self, needed: usize) -> CodecError {
        CodecError::UnexpectedEof {
            needed,
            remaining: self.remaining(),
        }
    }

    /// Read the next byte.
    pub fn read_byte(&mut self) -> Result<u8> {
        if self.remaining() < 1 {
            return Err(self.underrun(1));
        }
        let value = self.buf[self.offset];
        self.offset += 1;
        Ok(value)
    }

    /// Read the next 4 bytes as an unsigned little-endian integer.
    pub fn read_u32_le(&mut self) -> Result<u32> {
        if self.remaining() < 4 {
            return Err(self.underrun(4));
        }
        let mut raw = [0u8; 4];
        raw.copy_from_slice(&self.buf[self.offset..self.offset + 4]);
        self.offset += 4;
        Ok(u32::from_le_bytes(raw))
    }

    /// Read the next `n` bytes as a borrowed slice.
    pub fn read_bytes(&mut self, n: usize) -> Result<&'a [u8]> {
        if self.remaining() < n {
            return Err(self.underrun(n));
        }
        let value = &self.buf[self.offset..self.offset + n];
        self.offset += n;
        Ok(value)
    }
}
