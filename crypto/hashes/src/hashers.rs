use crate::{HASH_SIZE, Hash};
use sha2::{Digest, Sha256};

/// Length of the truncated script hash the index keys its records with
pub const HASHX_LEN: usize = 11;

pub type HashX = [u8; HASHX_LEN];

#[inline]
pub fn sha256(data: &[u8]) -> Hash {
    Hash::from_bytes(Sha256::digest(data).into())
}

#[inline]
pub fn double_sha256(data: &[u8]) -> Hash {
    let first: [u8; HASH_SIZE] = Sha256::digest(data).into();
    Hash::from_bytes(Sha256::digest(first).into())
}

/// The index key of an output script: the first [`HASHX_LEN`] bytes of its sha256
pub fn hash_x(script: &[u8]) -> HashX {
    let digest = Sha256::digest(script);
    let mut hash_x = [0u8; HASHX_LEN];
    hash_x.copy_from_slice(&digest[..HASHX_LEN]);
    hash_x
}

#[cfg(test)]
mod tests {
    use super::*;
    use atomicals_core::hex::ToHex;

    #[test]
    fn test_sha256_vectors() {
        // Empty input, in internal byte order
        assert_eq!(sha256(b"").as_bytes().to_hex(), "e3b0c44298fc1c149afbf4c8996fb92427ae41e4649b934ca495991b7852b855");
        assert_eq!(double_sha256(b"").as_bytes().to_hex(), "5df6e0e2761359d30a8275058e299fcc0381534545f55cf43e41983f5d4c9456");
        assert_eq!(double_sha256(b"hello").as_bytes().to_hex(), "9595c9df90075148eb06860365df33584b75bff782a510c6cd4883a419833d50");
    }

    #[test]
    fn test_hash_x_is_sha256_prefix() {
        let script = [0x51u8, 0x20, 0x01, 0x02];
        assert_eq!(hash_x(&script)[..], sha256(&script).as_bytes()[..HASHX_LEN]);
    }
}
