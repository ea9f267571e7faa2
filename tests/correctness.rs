//! Randomized end-to-end correctness checks for both engines, cross-checking
//! the streaming sessions against the one-shot functions.

use pretty_assertions::assert_eq;
use varicode::bits::{BitCursor, BitWriter};
use varicode::elias::{self, EliasDecoder, EliasDelta, EliasGamma, EliasOmega};
use varicode::fibonacci::{self, Fibonacci, FibonacciDecoder};
use varicode::signed::{SignedReader, SignedWriter};
use varicode::utils::random_values;
use varicode::{DecodeStatus, UniversalCode, MAX_VALUE};

// create some random values, encode and return both
fn create_random_fibonacci() -> (Vec<u8>, Vec<u64>) {
    let data = random_values(100_000, 0, 10_000);
    let bytes = fibonacci::encode(&data).unwrap();
    (bytes, data)
}

#[test]
fn test_fibonacci_one_shot_matches_streaming() {
    let (bytes, data) = create_random_fibonacci();

    assert_eq!(fibonacci::decode(&bytes).unwrap(), data);

    let mut dec = FibonacciDecoder::new(false);
    for chunk in bytes.chunks(997) {
        dec.feed(chunk).unwrap();
    }
    assert_eq!(dec.into_values(), data);
}

#[test]
fn test_fibonacci_header_fragmented() {
    let data = random_values(10_000, 0, 1_000_000);
    let bytes = fibonacci::encode_with_header(&data).unwrap();

    let mut dec = FibonacciDecoder::new(true);
    let mut status = DecodeStatus::NeedMoreInput;
    for chunk in bytes.chunks(1) {
        status = dec.feed(chunk).unwrap();
    }
    assert_eq!(status, DecodeStatus::Complete);
    assert_eq!(dec.into_values(), data);
}

#[test]
fn test_fibonacci_growth_from_tiny_queue() {
    let data = random_values(5_000, 0, 100);
    let bytes = fibonacci::encode(&data).unwrap();

    let mut dec = FibonacciDecoder::with_capacity(1);
    assert_eq!(dec.feed(&bytes).unwrap(), DecodeStatus::Complete);
    assert_eq!(dec.into_values(), data);
}

#[test]
fn test_elias_header_round_trip() {
    let data = random_values(50_000, 0, u64::MAX - 1);
    let bytes = elias::encode_with_header(&data, true).unwrap();
    assert_eq!(elias::decode_with_header(&bytes, true).unwrap(), data);
}

#[test]
fn test_elias_header_fragmented() {
    let data = random_values(5_000, 0, 10_000);
    let bytes = elias::encode_with_header(&data, true).unwrap();

    let mut dec = EliasDecoder::new(true, true);
    let mut status = DecodeStatus::NeedMoreInput;
    for chunk in bytes.chunks(3) {
        status = dec.feed(chunk).unwrap();
    }
    assert_eq!(status, DecodeStatus::Complete);
    assert_eq!(dec.into_values(), data);
}

#[test]
fn test_single_value_codes_agree_on_random_input() {
    let data = random_values(10_000, 0, u64::MAX - 1);

    let fib = Fibonacci;
    let omega = EliasOmega::default();
    let gamma = EliasGamma::default();
    let delta = EliasDelta::default();

    let mut sinks: Vec<BitWriter> = (0..4).map(|_| BitWriter::new()).collect();
    for &v in &data {
        fib.encode_value(&mut sinks[0], v).unwrap();
        omega.encode_value(&mut sinks[1], v).unwrap();
        gamma.encode_value(&mut sinks[2], v).unwrap();
        delta.encode_value(&mut sinks[3], v).unwrap();
    }
    let buffers: Vec<Vec<u8>> = sinks.into_iter().map(BitWriter::into_bytes).collect();

    let mut cursors: Vec<BitCursor> = buffers.iter().map(|b| BitCursor::new(b)).collect();
    for &v in &data {
        assert_eq!(fib.decode_value(&mut cursors[0]).unwrap(), v);
        assert_eq!(omega.decode_value(&mut cursors[1]).unwrap(), v);
        assert_eq!(gamma.decode_value(&mut cursors[2]).unwrap(), v);
        assert_eq!(delta.decode_value(&mut cursors[3]).unwrap(), v);
    }
}

#[test]
fn test_boundary_values_everywhere() {
    let boundaries = [0u64, 1, 2, MAX_VALUE - 1, MAX_VALUE];

    let bytes = fibonacci::encode_with_header(&boundaries).unwrap();
    assert_eq!(fibonacci::decode_with_header(&bytes).unwrap(), boundaries);

    let bytes = elias::encode_with_header(&boundaries, true).unwrap();
    assert_eq!(elias::decode_with_header(&bytes, true).unwrap(), boundaries);
}

#[test]
fn test_signed_random_round_trip() {
    let magnitudes = random_values(10_000, 0, i64::MAX as u64);
    let data: Vec<i64> = magnitudes
        .iter()
        .enumerate()
        .map(|(i, &m)| if i % 2 == 0 { m as i64 } else { -(m as i64) })
        .collect();

    let mut writer = SignedWriter::new(EliasDelta::default());
    for &v in &data {
        writer.write_value(v).unwrap();
    }
    let bytes = writer.into_bytes();

    let mut reader = SignedReader::new(EliasDelta::default(), &bytes);
    for &v in &data {
        assert_eq!(reader.read_value().unwrap(), v);
    }
}
