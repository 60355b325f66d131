//! Cairo calldata serialization for the handful of types the vault
//! entrypoints take. This is the only place the native signed tick index is
//! lowered to the chain's magnitude/sign representation.

use starknet::core::types::Felt;

use crate::tick_math::{Bounds, PoolKey, Tick};

/// Bytes that fit in one `ByteArray` data word without overflowing the field.
const BYTE_ARRAY_WORD_LEN: usize = 31;

/// Append a `u256` as its (low, high) 128-bit limbs.
pub fn serialize_u256(out: &mut Vec<Felt>, value: u128) {
    out.push(Felt::from(value));
    out.push(Felt::ZERO);
}

/// Append a signed tick as an `i129`: magnitude followed by a sign flag.
pub fn serialize_tick(out: &mut Vec<Felt>, tick: Tick) {
    let (mag, sign) = tick.to_parts();
    out.push(Felt::from(mag));
    out.push(if sign { Felt::ONE } else { Felt::ZERO });
}

/// Append a bounds pair as two consecutive `i129` values.
pub fn serialize_bounds(out: &mut Vec<Felt>, bounds: &Bounds) {
    serialize_tick(out, bounds.lower);
    serialize_tick(out, bounds.upper);
}

/// Append a pool key in its declared field order.
pub fn serialize_pool_key(out: &mut Vec<Felt>, key: &PoolKey) {
    out.push(key.token0);
    out.push(key.token1);
    out.push(Felt::from(key.fee));
    out.push(Felt::from(key.tick_spacing));
    out.push(key.extension);
}

/// Append a UTF-8 string as a Cairo `ByteArray`:
/// `[full_words_len, full_words…, pending_word, pending_word_len]`, where
/// each full word packs 31 bytes big-endian.
pub fn serialize_byte_array(out: &mut Vec<Felt>, s: &str) {
    let bytes = s.as_bytes();
    let mut chunks = bytes.chunks_exact(BYTE_ARRAY_WORD_LEN);
    let full_words: Vec<Felt> = chunks
        .by_ref()
        .map(Felt::from_bytes_be_slice)
        .collect();
    let pending = chunks.remainder();

    out.push(Felt::from(full_words.len() as u64));
    out.extend(full_words);
    out.push(Felt::from_bytes_be_slice(pending));
    out.push(Felt::from(pending.len() as u64));
}

/// Append a length-prefixed span of already-serialized elements.
pub fn serialize_span(out: &mut Vec<Felt>, element_count: usize, words: &[Felt]) {
    out.push(Felt::from(element_count as u64));
    out.extend_from_slice(words);
}
