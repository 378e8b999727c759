//!
//! Human friendly, display-only reference of an atomical: the commit transaction id in
//! lowercase Crockford base-32 (no checksum) followed by `i<output index>`.
//!

use crate::tx::TransactionId;

const CHARSET: &[u8; 32] = b"0123456789abcdefghjkmnpqrstvwxyz";

/// Encodes bytes into 5-bit groups, padding the last group with zero bits on the right
fn encode_base32(data: &[u8]) -> String {
    let mut out = String::with_capacity((data.len() * 8).div_ceil(5));
    let mut acc = 0u32;
    let mut bits = 0u32;
    for &byte in data {
        acc = (acc << 8) | byte as u32;
        bits += 8;
        while bits >= 5 {
            bits -= 5;
            out.push(CHARSET[((acc >> bits) & 0x1f) as usize] as char);
        }
        acc &= (1 << bits) - 1;
    }
    if bits > 0 {
        out.push(CHARSET[((acc << (5 - bits)) & 0x1f) as usize] as char);
    }
    out
}

/// Builds the reference of an atomical minted from `commit_txid` and imprinted at `output_index`
pub fn atomical_ref(commit_txid: &TransactionId, output_index: u32) -> String {
    format!("{}i{}", encode_base32(&commit_txid.to_reversed_bytes()), output_index)
}
