//!
//! Hex helpers shared by the id, hash and script types.
//!

use thiserror::Error;

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum HexError {
    #[error("hex string has odd length {0}")]
    OddLength(usize),

    #[error("expected {expected} hex chars but got {actual}")]
    InvalidLength { expected: usize, actual: usize },

    #[error("invalid hex character")]
    InvalidChar,
}

pub trait ToHex {
    fn to_hex(&self) -> String;
}

impl<T: AsRef<[u8]>> ToHex for T {
    fn to_hex(&self) -> String {
        faster_hex::hex_string(self.as_ref())
    }
}

/// Decodes a hex string of any even length.
pub fn decode_hex(hex: &str) -> Result<Vec<u8>, HexError> {
    if hex.len() % 2 != 0 {
        return Err(HexError::OddLength(hex.len()));
    }
    if hex.is_empty() {
        return Ok(vec![]);
    }
    let mut bytes = vec![0u8; hex.len() / 2];
    faster_hex::hex_decode(hex.as_bytes(), &mut bytes).map_err(|_| HexError::InvalidChar)?;
    Ok(bytes)
}

/// Decodes a hex string into a fixed size array. The string must be exactly `2 * N` chars.
pub fn decode_hex_array<const N: usize>(hex: &str) -> Result<[u8; N], HexError> {
    if hex.len() != N * 2 {
        return Err(HexError::InvalidLength { expected: N * 2, actual: hex.len() });
    }
    let mut bytes = [0u8; N];
    faster_hex::hex_decode(hex.as_bytes(), &mut bytes).map_err(|_| HexError::InvalidChar)?;
    Ok(bytes)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_hex_helpers() {
        assert_eq!([0xde, 0xad, 0xbe, 0xef].to_hex(), "deadbeef");
        assert_eq!(decode_hex("DEADbeef").unwrap(), vec![0xde, 0xad, 0xbe, 0xef]);
        assert_eq!(decode_hex(""), Ok(vec![]));
        assert_eq!(decode_hex("abc"), Err(HexError::OddLength(3)));
        assert_eq!(decode_hex("zz"), Err(HexError::InvalidChar));
        assert_eq!(decode_hex_array::<2>("0a0b"), Ok([0x0a, 0x0b]));
        assert_eq!(decode_hex_array::<2>("0a0b0c"), Err(HexError::InvalidLength { expected: 4, actual: 6 }));
    }
}
