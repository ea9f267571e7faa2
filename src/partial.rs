//! Decoding a Fibonacci codeword in several steps.
//! Each bit updates a partial decoding result and, once `11` is
//! encountered, yields the completed symbol.

use crate::utils::FIB64;
use crate::CodecError;

/// A partial Fibonacci-decoding result: the per-symbol accumulator, the
/// next lookup index and the previously seen bit.
///
/// The state persists across input fragments until a symbol completes,
/// then resets. The lookup index advances unconditionally per bit and is
/// bounded by the table length; exceeding it is how corrupt input is kept
/// from growing the state without limit.
#[derive(Debug, PartialEq, Eq, Clone)]
pub(crate) struct Partial {
    pub(crate) num: u64,
    pub(crate) i_fibo: usize,
    pub(crate) last_bit: u64,
}

#[derive(Debug, PartialEq, Eq)]
pub(crate) enum DecResult {
    Incomplete,
    Complete(u64),
}

impl Partial {
    pub(crate) fn new(num: u64, i_fibo: usize, last_bit: u64) -> Self {
        Self {
            num,
            i_fibo,
            last_bit,
        }
    }

    /// Adds one bit to the decoding: either the symbol completes (we hit
    /// `11`), or the state advances by one lookup index.
    pub(crate) fn update(&mut self, bit: u64) -> Result<DecResult, CodecError> {
        if self.last_bit + bit >= 2 {
            return Ok(DecResult::Complete(self.num));
        }
        if self.i_fibo >= FIB64.len() {
            return Err(CodecError::Overflow);
        }
        self.num = self
            .num
            .checked_add(bit * FIB64[self.i_fibo])
            .ok_or(CodecError::Overflow)?;
        self.i_fibo += 1;
        self.last_bit = bit;
        Ok(DecResult::Incomplete)
    }

    /// Checks whether any real decoding is pending, or just a run of zeros
    /// which could be considered padding.
    pub(crate) fn is_clean(&self) -> bool {
        // i_fibo doesn't matter, it advances even for zeros
        self.last_bit == 0 && self.num == 0
    }
}

impl Default for Partial {
    fn default() -> Self {
        Self::new(0, 0, 0)
    }
}
