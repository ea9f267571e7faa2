//! Fibonacci (Zeckendorf) encoding and decoding of integer sequences.
//! See [here](https://en.wikipedia.org/wiki/Fibonacci_coding).
//!
//! Every value is offset by `+1` before encoding so zero is codable; the
//! codeword is the Zeckendorf representation (sum of non-adjacent Fibonacci
//! numbers) followed by an extra `1` bit. Since no valid representation
//! contains two adjacent terms, `11` only ever appears at the terminator,
//! making the code self-delimiting.
//!
//! # Usage
//! ```rust
//! use varicode::fibonacci::{encode, decode, FibonacciDecoder};
//!
//! let encoded = encode(&[34u64, 12]).unwrap();
//! assert_eq!(decode(&encoded).unwrap(), vec![34, 12]);
//!
//! // streaming: feed fragments of any size
//! let mut dec = FibonacciDecoder::new(false);
//! for chunk in encoded.chunks(1) {
//!     dec.feed(chunk).unwrap();
//! }
//! assert_eq!(dec.into_values(), vec![34, 12]);
//! ```

use crate::bits::{BitCursor, BitWriter};
use crate::partial::{DecResult, Partial};
use crate::queue::ValueQueue;
use crate::utils::FIB64;
use crate::{CodecError, DecodeStatus, UniversalCode, MAX_VALUE};
use funty::Unsigned;
use num::CheckedSub;

/// Capacity of the lazily created output queue when neither a header nor a
/// size hint exists.
const DEFAULT_CAPACITY: usize = 8;
/// Factor by which a full output queue grows.
const GROWTH_FACTOR: usize = 2;

/// Appends the Zeckendorf codeword of `n` (which must be positive) to the
/// sink: greedy subtraction over `table` from the highest fitting index,
/// emitted lowest index first, then the terminating `1`.
fn push_codeword<T>(n: T, table: &[T], sink: &mut BitWriter) -> Result<(), CodecError>
where
    T: CheckedSub + PartialOrd + Copy,
{
    let split_pos = table
        .iter()
        .rposition(|elt| *elt <= n)
        .ok_or(CodecError::Domain("zeckendorf form needs a positive value"))?;

    let mut selected = 0u128;
    let mut current = n;
    for (idx, elt) in table[..=split_pos].iter().enumerate().rev() {
        if *elt <= current {
            current = current.checked_sub(elt).ok_or(CodecError::Overflow)?;
            selected |= 1u128 << idx;
        }
    }
    for idx in 0..=split_pos {
        sink.write_bit(selected >> idx & 1 == 1);
    }
    sink.write_bit(true);
    Ok(())
}

fn encode_value_into(sink: &mut BitWriter, value: u64) -> Result<(), CodecError> {
    if value > MAX_VALUE {
        return Err(CodecError::Overflow);
    }
    push_codeword(value + 1, &FIB64[..], sink)
}

/// Fibonacci-encodes a sequence of integers into a byte stream.
///
/// Fails with [`CodecError::Overflow`] if any value exceeds
/// [`MAX_VALUE`](crate::MAX_VALUE). Empty input produces zero bytes.
pub fn encode<T: Unsigned>(data: &[T]) -> Result<Vec<u8>, CodecError> {
    // minimum of 2 bits per element, i.e. every element encoding to `11`
    let mut sink = BitWriter::with_capacity(data.len() / 4 + 1);
    for &x in data {
        encode_value_into(&mut sink, x.as_u64())?;
    }
    Ok(sink.into_bytes())
}

/// Like [`encode`], but first encodes the element count as an ordinary
/// codeword, so a decoder can size its output exactly.
pub fn encode_with_header<T: Unsigned>(data: &[T]) -> Result<Vec<u8>, CodecError> {
    let mut sink = BitWriter::with_capacity(data.len() / 4 + 2);
    encode_value_into(&mut sink, data.len() as u64)?;
    for &x in data {
        encode_value_into(&mut sink, x.as_u64())?;
    }
    Ok(sink.into_bytes())
}

/// Fibonacci-decodes a whole byte stream (no header) into integers.
///
/// Trailing zero-padding after the last `11` is accepted; input ending in
/// the middle of a codeword fails with [`CodecError::EndOfInput`].
pub fn decode(bytes: &[u8]) -> Result<Vec<u64>, CodecError> {
    let mut dec = FibonacciDecoder::new(false);
    match dec.feed(bytes)? {
        DecodeStatus::Complete => Ok(dec.into_values()),
        DecodeStatus::NeedMoreInput => Err(CodecError::EndOfInput),
    }
}

/// Decodes a byte stream whose first value is the declared element count.
///
/// Exactly that many values are returned; fails with
/// [`CodecError::EndOfInput`] if the stream ends short of the count.
pub fn decode_with_header(bytes: &[u8]) -> Result<Vec<u64>, CodecError> {
    let mut dec = FibonacciDecoder::new(true);
    match dec.feed(bytes)? {
        DecodeStatus::Complete => Ok(dec.into_values()),
        DecodeStatus::NeedMoreInput => Err(CodecError::EndOfInput),
    }
}

/// Streaming decoder session for Fibonacci encoded integer sequences.
///
/// Owns all decode state (per-symbol [`Partial`] plus the output queue) so
/// input may arrive in arbitrary fragments via [`feed`](Self::feed).
/// Independent streams need independent sessions; a session is not meant to
/// be shared.
///
/// With a header, the first decoded value declares how many follow: the
/// output queue is sized exactly to it and the session stops consuming once
/// satisfied, leaving any trailing bytes untouched. Without one the queue
/// grows by a fixed factor on demand.
#[derive(Debug)]
pub struct FibonacciDecoder {
    with_header: bool,
    expected: Option<usize>,
    partial: Partial,
    out: ValueQueue,
    done: bool,
}

impl FibonacciDecoder {
    /// Creates a session; `with_header` makes the first decoded value the
    /// declared element count.
    pub fn new(with_header: bool) -> Self {
        FibonacciDecoder {
            with_header,
            expected: None,
            partial: Partial::default(),
            out: ValueQueue::with_capacity(0),
            done: false,
        }
    }

    /// Creates a headerless session with the output queue pre-sized to
    /// `hint` values (it still grows past the hint if needed).
    pub fn with_capacity(hint: usize) -> Self {
        FibonacciDecoder {
            with_header: false,
            expected: None,
            partial: Partial::default(),
            out: ValueQueue::with_capacity(hint),
            done: false,
        }
    }

    /// Consumes one input fragment, decoding bit by bit into the output
    /// queue.
    ///
    /// Returns [`DecodeStatus::Complete`] when nothing more is expected and
    /// [`DecodeStatus::NeedMoreInput`] when a codeword or a header-declared
    /// count is still pending. Structurally invalid input (a codeword
    /// running past the lookup table) fails with [`CodecError::Overflow`];
    /// the session is then unusable.
    pub fn feed(&mut self, bytes: &[u8]) -> Result<DecodeStatus, CodecError> {
        'stream: for &byte in bytes {
            if self.done {
                break;
            }
            for shift in (0..8).rev() {
                let bit = (byte >> shift) as u64 & 1;
                match self.partial.update(bit)? {
                    DecResult::Incomplete => {}
                    DecResult::Complete(num) => {
                        self.partial = Partial::default();
                        // remove the +1 domain offset
                        self.emit(num - 1)?;
                        if self.done {
                            break 'stream;
                        }
                    }
                }
            }
        }
        Ok(self.status())
    }

    fn emit(&mut self, value: u64) -> Result<(), CodecError> {
        if self.with_header && self.expected.is_none() {
            // first value is the declared count: size the output exactly
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
            // the header value itself has not arrived yet
            None if self.with_header => false,
            None => self.partial.is_clean(),
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

/// The Fibonacci code as a single-value [`UniversalCode`].
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct Fibonacci;

impl UniversalCode for Fibonacci {
    fn encode_value(&self, sink: &mut BitWriter, value: u64) -> Result<(), CodecError> {
        encode_value_into(sink, value)
    }

    fn decode_value(&self, source: &mut BitCursor) -> Result<u64, CodecError> {
        let mut partial = Partial::default();
        loop {
            let bit = source.read_bit().ok_or(CodecError::EndOfInput)? as u64;
            match partial.update(bit)? {
                DecResult::Incomplete => {}
                DecResult::Complete(num) => return Ok(num - 1),
            }
        }
    }
}

#[cfg(test)]
mod test {
    use super::*;
    use crate::utils::{bits_to_bytes, create_bitvector};

    mod test_codewords {
        use super::*;

        fn codeword_bits(value: u64) -> Vec<u8> {
            let mut sink = BitWriter::new();
            encode_value_into(&mut sink, value).unwrap();
            let nbits = sink.bit_len();
            let bytes = sink.into_bytes();
            let mut cursor = BitCursor::new(&bytes);
            (0..nbits)
                .map(|_| cursor.read_bit().unwrap() as u8)
                .collect()
        }

        #[test]
        fn test_0() {
            // 0 + 1 = 1 -> `1` + terminator
            assert_eq!(codeword_bits(0), vec![1, 1]);
        }

        #[test]
        fn test_1() {
            // 1 + 1 = 2 -> `01` + terminator
            assert_eq!(codeword_bits(1), vec![0, 1, 1]);
        }

        #[test]
        fn test_13() {
            // 13 + 1 = 14 = 1 + 13 -> `100001` + terminator
            assert_eq!(codeword_bits(13), vec![1, 0, 0, 0, 0, 1, 1]);
        }

        #[test]
        fn test_no_adjacent_ones_before_terminator() {
            for value in 0..200u64 {
                let bits = codeword_bits(value);
                let body = &bits[..bits.len() - 2];
                assert!(
                    body.windows(2).all(|w| w != [1, 1]),
                    "adjacent terms in codeword of {}",
                    value
                );
            }
        }
    }

    #[test]
    fn test_encode_zero_yields_0xc0() {
        assert_eq!(encode(&[0u64]).unwrap(), vec![0xC0]);
    }

    #[test]
    fn test_encode_multiple() {
        // 1 -> 011, 2 -> 0011, packed MSB-first and zero-padded
        let expected = bits_to_bytes(&create_bitvector(vec![0, 1, 1, 0, 0, 1, 1]));
        assert_eq!(encode(&[1u64, 2]).unwrap(), expected);
    }

    #[test]
    fn test_encode_empty_is_empty() {
        assert_eq!(encode(&[] as &[u64]).unwrap(), Vec::<u8>::new());
    }

    #[test]
    fn test_encode_generic_widths() {
        assert_eq!(encode(&[7u8, 2]).unwrap(), encode(&[7u64, 2]).unwrap());
        assert_eq!(encode(&[7u32, 2]).unwrap(), encode(&[7u64, 2]).unwrap());
    }

    #[test]
    fn test_encode_overflow() {
        assert_eq!(encode(&[MAX_VALUE + 1]), Err(CodecError::Overflow));
        assert!(encode(&[MAX_VALUE]).is_ok());
    }

    #[test]
    fn test_decode_0xc0_is_zero() {
        assert_eq!(decode(&[0xC0]).unwrap(), vec![0]);
    }

    #[test]
    fn test_decode_skips_zero_padding() {
        // 0011 (value 2) padded to a byte
        assert_eq!(decode(&[0b0011_0000]).unwrap(), vec![2]);
    }

    #[test]
    fn test_decode_mid_codeword_fails() {
        // 00110101: value 2, then a dangling `0101`
        assert_eq!(decode(&[0b0011_0101]), Err(CodecError::EndOfInput));
    }

    #[test]
    fn test_corrupt_stream_overflows() {
        // 12 zero bytes: 96 bits with no terminator run past the table
        assert_eq!(decode(&[0u8; 12]), Err(CodecError::Overflow));
    }

    #[test]
    fn test_round_trip_boundaries() {
        let values = [0, 1, FIB64[45] - 1, FIB64[45], FIB64[91], MAX_VALUE];
        let bytes = encode(&values).unwrap();
        assert_eq!(decode(&bytes).unwrap(), values);
    }

    #[test]
    fn test_header_round_trip() {
        let values = [5u64, 0, 99, 3];
        let bytes = encode_with_header(&values).unwrap();
        assert_eq!(decode_with_header(&bytes).unwrap(), values);
    }

    #[test]
    fn test_header_halts_before_trailing_bytes() {
        let mut bytes = encode_with_header(&[1u64, 2]).unwrap();
        // garbage after the declared count must be ignored
        bytes.extend_from_slice(&[0xFF, 0xFF]);

        let mut dec = FibonacciDecoder::new(true);
        assert_eq!(dec.feed(&bytes).unwrap(), DecodeStatus::Complete);
        assert_eq!(dec.into_values(), vec![1, 2]);
    }

    #[test]
    fn test_header_sizes_output_exactly() {
        let bytes = encode_with_header(&[9u64, 9, 9]).unwrap();
        let mut dec = FibonacciDecoder::new(true);
        dec.feed(&bytes).unwrap();
        assert_eq!(dec.decoded_len(), 3);
        assert_eq!(dec.into_values(), vec![9, 9, 9]);
    }

    #[test]
    fn test_header_empty_sequence() {
        let bytes = encode_with_header(&[] as &[u64]).unwrap();
        let mut dec = FibonacciDecoder::new(true);
        assert_eq!(dec.feed(&bytes).unwrap(), DecodeStatus::Complete);
        assert!(dec.into_values().is_empty());
    }

    #[test]
    fn test_queue_grows_without_reordering() {
        let values: Vec<u64> = (0..20).collect();
        let bytes = encode(&values).unwrap();

        let mut dec = FibonacciDecoder::with_capacity(2);
        assert_eq!(dec.feed(&bytes).unwrap(), DecodeStatus::Complete);
        assert_eq!(dec.into_values(), values);
    }

    #[test]
    fn test_feed_byte_by_byte() {
        let values = [34u64, 12, 0, 7];
        let bytes = encode(&values).unwrap();

        let mut dec = FibonacciDecoder::new(false);
        for chunk in bytes.chunks(1) {
            dec.feed(chunk).unwrap();
        }
        assert_eq!(dec.into_values(), values);
    }

    #[test]
    fn test_universal_code_single_values() {
        let code = Fibonacci;
        let mut sink = BitWriter::new();
        code.encode_value(&mut sink, 34).unwrap();
        code.encode_value(&mut sink, 0).unwrap();
        let bytes = sink.into_bytes();

        let mut cursor = BitCursor::new(&bytes);
        assert_eq!(code.decode_value(&mut cursor).unwrap(), 34);
        assert_eq!(code.decode_value(&mut cursor).unwrap(), 0);
    }

    #[test]
    fn test_universal_code_end_of_input() {
        let code = Fibonacci;
        let mut cursor = BitCursor::new(&[]);
        assert_eq!(code.decode_value(&mut cursor), Err(CodecError::EndOfInput));
    }
}
