//! Bit-level plumbing shared by all engines: an accumulator packing single
//! bits into bytes (most-significant-bit first), a writer coupling it with a
//! byte sink, and a resumable read cursor over a byte slice.

/// Packs single bits into 8-bit groups, most-significant-bit first.
///
/// The accumulator is "dirty" while it holds a partial byte. At end of
/// stream the partial byte is flushed with zero-padding in the low bits.
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct BitAccumulator {
    byte: u8,
    count: u8,
}

impl BitAccumulator {
    /// Creates an empty accumulator.
    pub fn new() -> Self {
        Default::default()
    }

    /// Appends one bit; returns `true` when this bit completed a byte,
    /// which must then be taken via [`take_byte`](Self::take_byte).
    pub fn push_bit(&mut self, bit: bool) -> bool {
        self.byte = (self.byte << 1) | bit as u8;
        self.count += 1;
        self.count == 8
    }

    /// Returns the completed byte and clears the accumulator.
    pub fn take_byte(&mut self) -> u8 {
        let byte = self.byte;
        self.byte = 0;
        self.count = 0;
        byte
    }

    /// Flushes a partial byte, zero-padded in the low-order bits.
    /// Returns `None` when the accumulator is empty.
    pub fn flush(&mut self) -> Option<u8> {
        if self.count == 0 {
            return None;
        }
        let byte = self.byte << (8 - self.count);
        self.byte = 0;
        self.count = 0;
        Some(byte)
    }

    /// True while a partial byte is held.
    pub fn is_dirty(&self) -> bool {
        self.count > 0
    }

    /// Number of bits currently accumulated (0..8).
    pub fn count(&self) -> u8 {
        self.count
    }
}

/// Writes bits into an in-memory byte sink through a [`BitAccumulator`].
#[derive(Debug, Default, Clone)]
pub struct BitWriter {
    out: Vec<u8>,
    acc: BitAccumulator,
}

impl BitWriter {
    /// Creates an empty writer.
    pub fn new() -> Self {
        Default::default()
    }

    /// Creates a writer with `capacity` bytes preallocated.
    pub fn with_capacity(capacity: usize) -> Self {
        BitWriter {
            out: Vec::with_capacity(capacity),
            acc: BitAccumulator::new(),
        }
    }

    /// Appends a single bit.
    pub fn write_bit(&mut self, bit: bool) {
        if self.acc.push_bit(bit) {
            self.out.push(self.acc.take_byte());
        }
    }

    /// Appends the low `nbits` bits of `value`, most-significant first.
    pub fn write_int(&mut self, value: u64, nbits: usize) {
        for shift in (0..nbits).rev() {
            self.write_bit((value >> shift) & 1 == 1);
        }
    }

    /// Number of bits written so far.
    pub fn bit_len(&self) -> usize {
        self.out.len() * 8 + self.acc.count() as usize
    }

    /// Finishes the stream: flushes any partial byte (zero-padded) and
    /// returns the bytes.
    pub fn into_bytes(mut self) -> Vec<u8> {
        if let Some(byte) = self.acc.flush() {
            self.out.push(byte);
        }
        self.out
    }
}

/// A bit/byte cursor over an in-memory byte slice.
///
/// The position is held explicitly so decoding can stop and resume at any
/// bit; reading past the end yields `None` rather than failing.
#[derive(Debug, Clone)]
pub struct BitCursor<'a> {
    bytes: &'a [u8],
    pos: usize,
}

impl<'a> BitCursor<'a> {
    /// Creates a cursor at the start of `bytes`.
    pub fn new(bytes: &'a [u8]) -> Self {
        BitCursor { bytes, pos: 0 }
    }

    /// Reads the next bit, advancing the cursor.
    pub fn read_bit(&mut self) -> Option<bool> {
        if self.pos >= self.bytes.len() * 8 {
            return None;
        }
        let byte = self.bytes[self.pos / 8];
        let bit = (byte >> (7 - self.pos % 8)) & 1 == 1;
        self.pos += 1;
        Some(bit)
    }

    /// How far we have processed into the buffer, in bits.
    pub fn position(&self) -> usize {
        self.pos
    }

    /// Bits left in the buffer.
    pub fn remaining(&self) -> usize {
        self.bytes.len() * 8 - self.pos
    }
}
