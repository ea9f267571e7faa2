//! The Fibonacci lookup table and small helpers for tests, benches and
//! debugging.

use crate::bits::BitWriter;
use crate::{MyBitSlice, MyBitVector};
use bitvec::{order::BitOrder, slice::BitSlice, store::BitStore};
use itertools::Itertools;
use once_cell::sync::Lazy;
use rand::{distributions::Uniform, prelude::Distribution};

/// All Fibonacci numbers spanning the 64-bit domain:
/// `FIB64[0] = 1`, `FIB64[1] = 2`, `FIB64[i] = FIB64[i-1] + FIB64[i-2]`.
///
/// Strictly increasing, built once, read-only afterwards. The last entry is
/// 12200160415121876738, the largest Fibonacci number fitting in a `u64`.
pub static FIB64: Lazy<[u64; 92]> = Lazy::new(|| {
    let mut table = [0u64; 92];
    table[0] = 1;
    table[1] = 2;
    for i in 2..table.len() {
        table[i] = table[i - 1] + table[i - 2];
    }
    table
});

/// Generates `n_elements` random integers in `[min, max)`.
pub fn random_values(n_elements: usize, min: u64, max: u64) -> Vec<u64> {
    let data_dist = Uniform::from(min..max);
    let mut rng = rand::thread_rng();
    let mut data: Vec<u64> = Vec::with_capacity(n_elements);
    for _ in 0..n_elements {
        data.push(data_dist.sample(&mut rng));
    }
    data
}

/// just for debugging purpose
pub fn bitstream_to_string<T: BitStore, O: BitOrder>(buffer: &BitSlice<T, O>) -> String {
    buffer.iter().map(|x| if *x { "1" } else { "0" }).join("")
}

/// Turns a `0`/`1` integer list into a bitvector; handy for spelling out
/// bit-exact streams in tests.
pub fn create_bitvector(bits: Vec<usize>) -> MyBitVector {
    bits.iter().map(|&b| b == 1).collect()
}

/// Packs a bitslice into bytes, most-significant-bit first, the final byte
/// zero-padded.
pub fn bits_to_bytes(bits: &MyBitSlice) -> Vec<u8> {
    let mut writer = BitWriter::with_capacity(bits.len() / 8 + 1);
    for bit in bits.iter().by_vals() {
        writer.write_bit(bit);
    }
    writer.into_bytes()
}
