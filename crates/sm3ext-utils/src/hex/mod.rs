//! Hexadecimal encoding and decoding.
//!
//! Digests are displayed and compared as lowercase hex. Decoding accepts
//! either case and ignores surrounding whitespace.

use sm3ext_types::CryptoError;

const ENCODE_TABLE: &[u8; 16] = b"0123456789abcdef";

/// Encode bytes to a lowercase hex string.
pub fn encode(input: &[u8]) -> String {
    let mut output = String::with_capacity(input.len() * 2);
    for &b in input {
        output.push(ENCODE_TABLE[(b >> 4) as usize] as char);
        output.push(ENCODE_TABLE[(b & 0x0f) as usize] as char);
    }
    output
}

/// Decode a hex string to bytes.
pub fn decode(input: &str) -> Result<Vec<u8>, CryptoError> {
    let input = input.trim().as_bytes();
    if input.len() % 2 != 0 {
        return Err(CryptoError::InvalidLength("odd number of hex digits"));
    }

    let mut output = Vec::with_capacity(input.len() / 2);
    for pair in input.chunks_exact(2) {
        let hi = decode_nibble(pair[0])?;
        let lo = decode_nibble(pair[1])?;
        output.push((hi << 4) | lo);
    }
    Ok(output)
}

/// Decode a hex string that must hold exactly `N` bytes.
pub fn decode_array<const N: usize>(input: &str) -> Result<[u8; N], CryptoError> {
    let bytes = decode(input)?;
    bytes
        .try_into()
        .map_err(|_| CryptoError::InvalidLength("hex input has the wrong decoded size"))
}

fn decode_nibble(c: u8) -> Result<u8, CryptoError> {
    match c {
        b'0'..=b'9' => Ok(c - b'0'),
        b'a'..=b'f' => Ok(c - b'a' + 10),
        b'A'..=b'F' => Ok(c - b'A' + 10),
        _ => Err(CryptoError::InvalidArg),
    }
}
