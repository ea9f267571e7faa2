//! Universal variable-length codes for unsigned (and, via the
//! [zigzag](zigzag) transform, signed) 64-bit integers:
//! [Fibonacci/Zeckendorf coding](https://en.wikipedia.org/wiki/Fibonacci_coding)
//! and the [Elias family](https://en.wikipedia.org/wiki/Elias_omega_coding)
//! (omega, gamma, delta).
//!
//! ## Introduction
//! Both schemes are *prefix-free*: no codeword is a prefix of another, so a
//! concatenated stream can be decoded without explicit delimiters. Fibonacci
//! codewords end in `11` and never contain `11` elsewhere; Elias codewords
//! carry nested length prefixes and end in a single `0` bit. Codewords are
//! packed most-significant-bit first into bytes, the final byte zero-padded.
//!
//! Every value is offset by `+1` on the wire so that zero is codable
//! (Fibonacci always, Elias when the zero offset is enabled), which reserves
//! [`MAX_VALUE`] = 2^64 − 2 as the largest encodable magnitude.
//!
//! Decoding is *streaming*: a decoder session keeps explicit bit-level state
//! and can be fed a byte stream in arbitrary fragments. An optional count
//! header lets the decoder size its output exactly; without one it grows its
//! output queue on demand.
//!
//! # Examples
//! Whole-buffer encoding and decoding:
//! ```rust
//! use varicode::{fibonacci, elias};
//!
//! let bytes = fibonacci::encode(&[4u64, 7, 86]).unwrap();
//! assert_eq!(fibonacci::decode(&bytes).unwrap(), vec![4, 7, 86]);
//!
//! // Elias omega, with a count header bounding the decode
//! let bytes = elias::encode_with_header(&[4u64, 7, 86], true).unwrap();
//! assert_eq!(elias::decode_with_header(&bytes, true).unwrap(), vec![4, 7, 86]);
//! ```
//!
//! Streaming decode across fragment boundaries:
//! ```rust
//! use varicode::{fibonacci, fibonacci::FibonacciDecoder, DecodeStatus};
//!
//! let bytes = fibonacci::encode_with_header(&[1u64, 2, 3]).unwrap();
//! let (first, rest) = bytes.split_at(1);
//!
//! let mut dec = FibonacciDecoder::new(true);
//! assert_eq!(dec.feed(first).unwrap(), DecodeStatus::NeedMoreInput);
//! assert_eq!(dec.feed(rest).unwrap(), DecodeStatus::Complete);
//! assert_eq!(dec.into_values(), vec![1, 2, 3]);
//! ```
//!
//! Signed payloads over any unsigned code:
//! ```rust
//! use varicode::elias::EliasOmega;
//! use varicode::signed::{SignedReader, SignedWriter};
//!
//! let mut writer = SignedWriter::new(EliasOmega::default());
//! writer.write_value(-3).unwrap();
//! writer.write_value(7).unwrap();
//! let bytes = writer.into_bytes();
//!
//! let mut reader = SignedReader::new(EliasOmega::default(), &bytes);
//! assert_eq!(reader.read_value().unwrap(), -3);
//! assert_eq!(reader.read_value().unwrap(), 7);
//! ```

pub mod bits;
pub mod elias;
mod error;
pub mod fibonacci;
mod partial;
pub mod queue;
pub mod signed;
pub mod utils;
pub mod zigzag;

use bitvec::prelude as bv;

pub use error::CodecError;

/// The type of bitvector used in the crate.
/// Importantly, some code *relies* on `Msb0`
pub type MyBitSlice = bv::BitSlice<u8, bv::Msb0>;
/// reftype that goes with [`MyBitSlice`]
pub type MyBitVector = bv::BitVec<u8, bv::Msb0>;

/// The largest encodable value, 2^64 − 2.
///
/// Every value is offset by `+1` on the wire (so zero is codable), which
/// makes `u64::MAX` itself unrepresentable.
pub const MAX_VALUE: u64 = u64::MAX - 1;

/// Outcome of feeding bytes into a decoder session.
///
/// Structurally invalid input is reported separately, as a [`CodecError`],
/// making the overall decode result three-way.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DecodeStatus {
    /// The stream is fully consumed and nothing more is expected: every
    /// header-declared value arrived, or (without a header) the session is
    /// not mid-codeword.
    Complete,
    /// More input is required: a codeword is still partially decoded, or a
    /// header-declared count has not been satisfied yet.
    NeedMoreInput,
}

/// A universal code over positive integers: single-value encode into a
/// [`bits::BitWriter`] and decode from a [`bits::BitCursor`].
///
/// This is the seam the [`signed`] adapter plugs into; both the
/// [`fibonacci::Fibonacci`] and the Elias codes implement it.
pub trait UniversalCode {
    /// Appends the codeword for `value` to `sink`.
    fn encode_value(&self, sink: &mut bits::BitWriter, value: u64) -> Result<(), CodecError>;

    /// Reads one codeword from `source`.
    ///
    /// Fails with [`CodecError::EndOfInput`] if the cursor runs out of bits
    /// before the codeword completes.
    fn decode_value(&self, source: &mut bits::BitCursor) -> Result<u64, CodecError>;
}
