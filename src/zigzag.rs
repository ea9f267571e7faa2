//! The sign-fold ("zigzag") transform: a bijection interleaving signed
//! integers into the unsigned domain by magnitude, `0, -1, 1, -2, 2, …`.
//!
//! This lets any unsigned-only code carry signed payloads without embedding
//! sign logic; see [`signed`](crate::signed) for the composed adapter.

/// Folds a signed value into the unsigned domain.
///
/// Small magnitudes map to small values regardless of sign, which keeps
/// variable-length codewords short for payloads centered around zero.
#[inline]
pub fn encode(value: i64) -> u64 {
    ((value << 1) ^ (value >> 63)) as u64
}

/// Inverse of [`encode`]: unfolds an unsigned value back to its signed
/// original.
#[inline]
pub fn decode(value: u64) -> i64 {
    ((value >> 1) as i64) ^ -((value & 1) as i64)
}
