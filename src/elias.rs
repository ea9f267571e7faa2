//! Elias coding of integer sequences: omega with a full streaming decoder,
//! gamma and delta as the non-recursive members of the same
//! length-prefix family.
//!
//! An omega codeword is a chain of nested binary groups, each group's value
//! giving the bit-length of the next, terminated by a single `0` bit. With
//! the zero offset enabled (the default) every value is shifted by `+1` at
//! encode and `−1` at decode so zero is representable; with it disabled,
//! encoding zero fails.
//!
//! # Usage
//! ```rust
//! use varicode::elias::{encode_with_header, decode_with_header};
//!
//! let encoded = encode_with_header(&[0u64, 5, 100], true).unwrap();
//! assert_eq!(decode_with_header(&encoded, true).unwrap(), vec![0, 5, 100]);
//! ```
//!
//! Without a header the decoder cannot tell trailing zero-padding from
//! encoded data (a `0` bit is a complete codeword), so headerless byte
//! streams only round-trip when the caller controls the bit length.

use crate::bits::{BitCursor, BitWriter};
use crate::queue::ValueQueue;
use crate::{CodecError, DecodeStatus, UniversalCode, MAX_VALUE};
use funty::Unsigned;

const DEFAULT_CAPACITY: usize = 8;
const GROWTH_FACTOR: usize = 2;

/// Applies the encode-side zero offset and range check.
fn offset_encode(value: u64, allow_zeros: bool) -> Result<u64, CodecError> {
    if value > MAX_VALUE {
        return Err(CodecError::Overflow);
    }
    if allow_zeros {
        Ok(value + 1)
    } else if value == 0 {
        Err(CodecError::Domain("cannot encode zero with the zero offset disabled"))
    } else {
        Ok(value)
    }
}

fn bit_length(n: u64) -> u32 {
    u64::BITS - n.leading_zeros()
}

/// Appends the omega codeword for the (already offset) positive `n`:
/// groups are built inward from the value and emitted in reverse, smallest
/// first, with the terminal `0` bit last.
fn push_omega(sink: &mut BitWriter, mut n: u64) {
    let mut groups: Vec<(u32, u64)> = Vec::new();
    while n > 1 {
        let nbits = bit_length(n);
        groups.push((nbits, n));
        n = (nbits - 1) as u64;
    }
    while let Some((nbits, group)) = groups.pop() {
        sink.write_int(group, nbits as usize);
    }
    sink.write_bit(false);
}

/// Per-codeword omega decode state, resumable at any bit.
///
/// `remaining == 0` means the next bit decides: `0` completes the codeword
/// with value `n`, `1` opens a group of `n` further bits accumulated in
/// `acc`.
#[derive(Debug, Clone, PartialEq, Eq)]
struct OmegaState {
    n: u64,
    acc: u64,
    remaining: u32,
}

impl OmegaState {
    /// Adds one bit; returns the decoded (still offset) value when the
    /// terminal `0` is reached.
    fn update(&mut self, bit: bool) -> Result<Option<u64>, CodecError> {
        if self.remaining > 0 {
            self.acc = (self.acc << 1) | bit as u64;
            self.remaining -= 1;
            if self.remaining == 0 {
                self.n = self.acc;
            }
            return Ok(None);
        }
        if bit {
            // a group of n + 1 bits follows; more than 64 cannot be a u64
            if self.n > 63 {
                return Err(CodecError::Overflow);
            }
            self.acc = 1;
            self.remaining = self.n as u32;
            Ok(None)
        } else {
            let value = self.n;
            *self = OmegaState::default();
            Ok(Some(value))
        }
    }

    /// True between codewords (no group open, length back at the start).
    fn is_clean(&self) -> bool {
        self.remaining == 0 && self.n == 1
    }
}

impl Default for OmegaState {
    fn default() -> Self {
        OmegaState {
            n: 1,
            acc: 0,
            remaining: 0,
        }
    }
}

/// Elias-omega-encodes a sequence of integers into a byte stream.
pub fn encode<T: Unsigned>(data: &[T], allow_zeros: bool) -> Result<Vec<u8>, CodecError> {
    let mut sink = BitWriter::with_capacity(data.len() / 8 + 1);
    for &x in data {
        let n = offset_encode(x.as_u64(), allow_zeros)?;
        push_omega(&mut sink, n);
    }
    Ok(sink.into_bytes())
}

/// Like [`encode`], but first encodes the element count as an ordinary
/// codeword of the same scheme.
pub fn encode_with_header<T: Unsigned>(
    data: &[T],
    allow_zeros: bool,
) -> Result<Vec<u8>, CodecError> {
    let mut sink = BitWriter::with_capacity(data.len() / 8 + 2);
    push_omega(&mut sink, offset_encode(data.len() as u64, allow_zeros)?);
    for &x in data {
        push_omega(&mut sink, offset_encode(x.as_u64(), allow_zeros)?);
    }
    Ok(sink.into_bytes())
}

/// Decodes a whole byte stream of omega codewords, padding included: every
/// zero-padding bit decodes as a codeword of its own, so prefer
/// [`decode_with_header`] unless the bit length is externally known.
pub fn decode(bytes: &[u8], allow_zeros: bool) -> Result<Vec<u64>, CodecError> {
    let mut dec = EliasDecoder::new(allow_zeros, false);
    match dec.feed(bytes)? {
        DecodeStatus::Complete => Ok(dec.into_values()),
        DecodeStatus::NeedMoreInput => Err(CodecError::EndOfInput),
    }
}

/// Decodes a byte stream whose first value is the declared element count;
/// trailing padding is left unconsumed.
pub fn decode_with_header(bytes: &[u8], allow_zeros: bool) -> Result<Vec<u64>, CodecError> {
    let mut dec = EliasDecoder::new(allow_zeros, true);
    match dec.feed(bytes)? {
        DecodeStatus::Complete => Ok(dec.into_values()),
        DecodeStatus::NeedMoreInput => Err(CodecError::EndOfInput),
    }
}

/// Streaming decoder session for Elias omega streams, mirroring
/// [`FibonacciDecoder`](crate::fibonacci::FibonacciDecoder): explicit
/// bit-level state, fragment-friendly [`feed`](Self::feed), optional count
/// header, grow-on-demand output queue.
#[derive(Debug)]
pub struct EliasDecoder {
    allow_zeros: bool,
    with_header: bool,
    expected: Option<usize>,
    state: OmegaState,
    out: ValueQueue,
    done: bool,
}

impl EliasDecoder {
    /// Creates a session. `allow_zeros` must match the encoder's setting.
    pub fn new(allow_zeros: bool, with_header: bool) -> Self {
        EliasDecoder {
            allow_zeros,
            with_header,
            expected: None,
            state: OmegaState::default(),
            out: ValueQueue::with_capacity(0),
            done: false,
        }
    }

    /// Creates a headerless session with the output queue pre-sized to
    /// `hint` values.
    pub fn with_capacity(allow_zeros: bool, hint: usize) -> Self {
        EliasDecoder {
            allow_zeros,
            with_header: false,
            expected: None,
            state: OmegaState::default(),
            out: ValueQueue::with_capacity(hint),
            done: false,
        }
    }

    /// Consumes one input fragment; see
    /// [`FibonacciDecoder::feed`](crate::fibonacci::FibonacciDecoder::feed)
    /// for the status contract.
    pub fn feed(&mut self, bytes: &[u8]) -> Result<DecodeStatus, CodecError> {
        'stream: for &byte in bytes {
            if self.done {
                break;
            }
            for shift in (0..8).rev() {
                let bit = (byte >> shift) & 1 == 1;
                if let Some(n) = self.state.update(bit)? {
                    let value = if self.allow_zeros { n - 1 } else { n };
                    self.emit(value)?;
                    if self.done {
                        break 'stream;
                    }
                }
            }
        }
        Ok(self.status())
    }

    fn emit(&mut self, value: u64) -> Result<(), CodecError> {
        if self.with_header && self.expected.is_none() {
            let count = value as usize;
            self.expected = Some(count);
            self.out.resize(count)?;
            self.done = count == 0;
            return Ok(());
        }
        if self.out.is_full() {
            let grown = if self.out.capacity() == 0 {
                DEFAULT_CAPACITY
            } else {
                self.out.capacity() * GROWTH_FACTOR
            };
            self.out.resize(grown)?;
        }
        self.out.enqueue(value)?;
        if self.expected == Some(self.out.len()) {
            self.done = true;
        }
        Ok(())
    }

    fn status(&self) -> DecodeStatus {
        let complete = match self.expected {
            Some(_) => self.done,
            None if self.with_header => false,
            None => self.state.is_clean(),
        };
        if complete {
            DecodeStatus::Complete
        } else {
            DecodeStatus::NeedMoreInput
        }
    }

    /// Number of values decoded and not yet dequeued.
    pub fn decoded_len(&self) -> usize {
        self.out.len()
    }

    /// Removes and returns the oldest decoded value.
    pub fn try_dequeue(&mut self) -> Option<u64> {
        self.out.try_dequeue()
    }

    /// Ends the session, draining all decoded values in order.
    pub fn into_values(self) -> Vec<u64> {
        self.out.into_vec()
    }
}

/// The Elias omega code as a single-value [`UniversalCode`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct EliasOmega {
    /// Offset every value by `+1`/`−1` so zero is representable.
    pub allow_zeros: bool,
}

impl Default for EliasOmega {
    fn default() -> Self {
        EliasOmega { allow_zeros: true }
    }
}

impl EliasOmega {
    /// Creates the code; `allow_zeros` enables the ±1 zero offset.
    pub fn new(allow_zeros: bool) -> Self {
        EliasOmega { allow_zeros }
    }
}

impl UniversalCode for EliasOmega {
    fn encode_value(&self, sink: &mut BitWriter, value: u64) -> Result<(), CodecError> {
        push_omega(sink, offset_encode(value, self.allow_zeros)?);
        Ok(())
    }

    fn decode_value(&self, source: &mut BitCursor) -> Result<u64, CodecError> {
        let mut state = OmegaState::default();
        loop {
            let bit = source.read_bit().ok_or(CodecError::EndOfInput)?;
            if let Some(n) = state.update(bit)? {
                return Ok(if self.allow_zeros { n - 1 } else { n });
            }
        }
    }
}

/// Appends the gamma codeword for the positive `n`: a unary run of
/// `bit_length(n) − 1` zeros, then `n` itself.
fn push_gamma(sink: &mut BitWriter, n: u64) {
    let nbits = bit_length(n);
    for _ in 1..nbits {
        sink.write_bit(false);
    }
    sink.write_int(n, nbits as usize);
}

/// Reads one gamma codeword, returning the raw positive value.
fn read_gamma(source: &mut BitCursor) -> Result<u64, CodecError> {
    let mut zeros = 0u32;
    loop {
        let bit = source.read_bit().ok_or(CodecError::EndOfInput)?;
        if bit {
            break;
        }
        zeros += 1;
        // a longer mantissa cannot fit in a u64
        if zeros > 63 {
            return Err(CodecError::Overflow);
        }
    }
    let mut n = 1u64;
    for _ in 0..zeros {
        let bit = source.read_bit().ok_or(CodecError::EndOfInput)?;
        n = (n << 1) | bit as u64;
    }
    Ok(n)
}

/// The Elias gamma code: the bit-length is sent in unary ahead of the
/// value. A non-recursive restriction of the omega idea.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct EliasGamma {
    /// Offset every value by `+1`/`−1` so zero is representable.
    pub allow_zeros: bool,
}

impl Default for EliasGamma {
    fn default() -> Self {
        EliasGamma { allow_zeros: true }
    }
}

impl EliasGamma {
    /// Creates the code; `allow_zeros` enables the ±1 zero offset.
    pub fn new(allow_zeros: bool) -> Self {
        EliasGamma { allow_zeros }
    }
}

impl UniversalCode for EliasGamma {
    fn encode_value(&self, sink: &mut BitWriter, value: u64) -> Result<(), CodecError> {
        push_gamma(sink, offset_encode(value, self.allow_zeros)?);
        Ok(())
    }

    fn decode_value(&self, source: &mut BitCursor) -> Result<u64, CodecError> {
        let n = read_gamma(source)?;
        Ok(if self.allow_zeros { n - 1 } else { n })
    }
}

/// The Elias delta code: the bit-length is sent gamma-coded, followed by
/// the value's mantissa. One recursion step of the omega idea.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct EliasDelta {
    /// Offset every value by `+1`/`−1` so zero is representable.
    pub allow_zeros: bool,
}

impl Default for EliasDelta {
    fn default() -> Self {
        EliasDelta { allow_zeros: true }
    }
}

impl EliasDelta {
    /// Creates the code; `allow_zeros` enables the ±1 zero offset.
    pub fn new(allow_zeros: bool) -> Self {
        EliasDelta { allow_zeros }
    }
}

impl UniversalCode for EliasDelta {
    fn encode_value(&self, sink: &mut BitWriter, value: u64) -> Result<(), CodecError> {
        let n = offset_encode(value, self.allow_zeros)?;
        let nbits = bit_length(n);
        push_gamma(sink, nbits as u64);
        // mantissa: everything below the (implicit) leading one
        sink.write_int(n, nbits as usize - 1);
        Ok(())
    }

    fn decode_value(&self, source: &mut BitCursor) -> Result<u64, CodecError> {
        let nbits = read_gamma(source)?;
        if nbits > u64::BITS as u64 {
            return Err(CodecError::Overflow);
        }
        let mut n = 1u64;
        for _ in 1..nbits {
            let bit = source.read_bit().ok_or(CodecError::EndOfInput)?;
            n = (n << 1) | bit as u64;
        }
        Ok(if self.allow_zeros { n - 1 } else { n })
    }
}
