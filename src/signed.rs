//! Signed single-value reader/writer adapters: the
//! [`zigzag`](crate::zigzag) transform composed with exactly one underlying
//! unsigned [`UniversalCode`] instance over an in-memory byte sequence.
//!
//! The adapter owns its code; releasing it when the adapter goes out of
//! scope is plain ownership.
//!
//! Note that `i64::MIN` folds to `u64::MAX`, which is the one value the
//! codes reserve, so it is the single unencodable signed value.

use crate::bits::{BitCursor, BitWriter};
use crate::{zigzag, CodecError, UniversalCode};

/// Writes zigzag-folded signed values through an unsigned code into an
/// in-memory byte stream.
#[derive(Debug)]
pub struct SignedWriter<C: UniversalCode> {
    code: C,
    writer: BitWriter,
}

impl<C: UniversalCode> SignedWriter<C> {
    /// Creates a writer owning `code`.
    pub fn new(code: C) -> Self {
        SignedWriter {
            code,
            writer: BitWriter::new(),
        }
    }

    /// Appends one signed value.
    pub fn write_value(&mut self, value: i64) -> Result<(), CodecError> {
        self.code.encode_value(&mut self.writer, zigzag::encode(value))
    }

    /// Number of bits written so far.
    pub fn bit_len(&self) -> usize {
        self.writer.bit_len()
    }

    /// Finishes the stream, flushing the final zero-padded byte.
    pub fn into_bytes(self) -> Vec<u8> {
        self.writer.into_bytes()
    }
}

/// Reads zigzag-folded signed values back out of an in-memory byte stream.
#[derive(Debug)]
pub struct SignedReader<'a, C: UniversalCode> {
    code: C,
    cursor: BitCursor<'a>,
}

impl<'a, C: UniversalCode> SignedReader<'a, C> {
    /// Creates a reader over `bytes`, owning `code`.
    pub fn new(code: C, bytes: &'a [u8]) -> Self {
        SignedReader {
            code,
            cursor: BitCursor::new(bytes),
        }
    }

    /// Reads the next signed value; [`CodecError::EndOfInput`] once the
    /// buffer is exhausted mid-codeword or empty.
    pub fn read_value(&mut self) -> Result<i64, CodecError> {
        let unsigned = self.code.decode_value(&mut self.cursor)?;
        Ok(zigzag::decode(unsigned))
    }

    /// How far we have processed into the buffer, in bits.
    pub fn bits_processed(&self) -> usize {
        self.cursor.position()
    }
}
