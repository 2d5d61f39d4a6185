//! Merkle-Damgard padding for SM3.
//!
//! A message of `n` bytes is followed by `0x80`, then zero bytes up to the
//! next position congruent to 56 mod 64, then the bit length `8n` as a
//! big-endian `u64`. The total padded length is a multiple of the block size.

use super::SM3_BLOCK_SIZE;

/// Size of the trailing big-endian length field.
const LENGTH_FIELD_SIZE: usize = 8;

/// Number of padding bytes appended to a message of `message_len` bytes.
///
/// Always in `[9, 72]`.
pub const fn padding_len(message_len: u64) -> usize {
    let residue = (message_len % SM3_BLOCK_SIZE as u64) as usize;
    // (55 - residue) mod 64 without going negative.
    let zeros = (SM3_BLOCK_SIZE + 55 - residue) % SM3_BLOCK_SIZE;
    1 + zeros + LENGTH_FIELD_SIZE
}

/// Padding bytes for a message of `message_len` bytes.
pub fn md_padding(message_len: u64) -> Vec<u8> {
    let mut out = vec![0u8; padding_len(message_len)];
    write_padding(message_len, &mut out);
    out
}

/// Write the padding for a `message_len`-byte message into the front of `out`.
///
/// Returns the number of bytes written. `out` must hold at least
/// `padding_len(message_len)` bytes.
pub(crate) fn write_padding(message_len: u64, out: &mut [u8]) -> usize {
    let len = padding_len(message_len);
    let out = &mut out[..len];
    out[0] = 0x80;
    out[1..len - LENGTH_FIELD_SIZE].fill(0);
    // The length field counts bits modulo 2^64.
    out[len - LENGTH_FIELD_SIZE..].copy_from_slice(&message_len.wrapping_mul(8).to_be_bytes());
    len
}
