//!
//! The 36 byte identifier shared by atomicals and their locations: a transaction hash followed by
//! a little-endian output index. The compact text form is `<64 hex>i<index>` where the hex is the
//! transaction id as displayed by the base ledger (byte-reversed).
//!

use crate::{
    config::constants::protocol::COMPACT_ID_MAX_OUTPUT_INDEX,
    errors::atomical_id::{AtomicalIdError, AtomicalIdResult},
    tx::{TransactionId, TransactionOutpoint},
};
use atomicals_hashes::{HASH_SIZE, Hash};
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::{
    fmt::{Debug, Display, Formatter},
    str::FromStr,
};

/// Size of the binary form of an [`AtomicalId`]
pub const ATOMICAL_ID_SIZE: usize = HASH_SIZE + 4;

/// Offset of the output separator in the compact form
const COMPACT_SEPARATOR_OFFSET: usize = HASH_SIZE * 2;

#[derive(Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct AtomicalId {
    pub txid: TransactionId,
    pub index: u32,
}

/// A location has exactly the shape of an atomical id (the outpoint currently holding an atomical)
pub type Location = AtomicalId;

impl AtomicalId {
    pub const fn new(txid: TransactionId, index: u32) -> Self {
        Self { txid, index }
    }

    pub fn to_bytes(&self) -> [u8; ATOMICAL_ID_SIZE] {
        let mut bytes = [0u8; ATOMICAL_ID_SIZE];
        bytes[..HASH_SIZE].copy_from_slice(&self.txid.as_bytes());
        bytes[HASH_SIZE..].copy_from_slice(&self.index.to_le_bytes());
        bytes
    }

    pub fn from_bytes(bytes: &[u8]) -> AtomicalIdResult<Self> {
        if bytes.len() != ATOMICAL_ID_SIZE {
            return Err(AtomicalIdError::InvalidLength(bytes.len()));
        }
        let txid = Hash::from_slice(&bytes[..HASH_SIZE]);
        let mut index = [0u8; 4];
        index.copy_from_slice(&bytes[HASH_SIZE..]);
        Ok(Self { txid, index: u32::from_le_bytes(index) })
    }

    /// Parses the compact form accepting output indexes up to `max_index` (inclusive).
    /// No partial result is ever produced: any violation fails the whole parse.
    pub fn from_compact(compact: &str, max_index: u32) -> AtomicalIdResult<Self> {
        if compact.find('i') != Some(COMPACT_SEPARATOR_OFFSET) {
            return Err(AtomicalIdError::MissingSeparator);
        }
        let (hash_part, index_part) = (&compact[..COMPACT_SEPARATOR_OFFSET], &compact[COMPACT_SEPARATOR_OFFSET + 1..]);
        let txid = Hash::from_str(hash_part).map_err(|_| AtomicalIdError::InvalidHash)?;

        if index_part.is_empty() || !index_part.bytes().all(|b| b.is_ascii_digit()) {
            return Err(AtomicalIdError::InvalidIndex(index_part.to_owned()));
        }
        let index: u64 = index_part.parse().map_err(|_| AtomicalIdError::InvalidIndex(index_part.to_owned()))?;
        if index > max_index as u64 {
            return Err(AtomicalIdError::IndexOutOfRange(index, max_index));
        }
        Ok(Self { txid, index: index as u32 })
    }

    pub fn to_compact(&self) -> String {
        format!("{}i{}", self.txid, self.index)
    }

    /// Whether `value` parses as a compact id with the default index bound
    pub fn is_compact(value: &str) -> bool {
        Self::from_str(value).is_ok()
    }
}

impl From<TransactionOutpoint> for AtomicalId {
    fn from(outpoint: TransactionOutpoint) -> Self {
        Self { txid: outpoint.transaction_id, index: outpoint.index }
    }
}

impl FromStr for AtomicalId {
    type Err = AtomicalIdError;

    fn from_str(compact: &str) -> Result<Self, Self::Err> {
        Self::from_compact(compact, COMPACT_ID_MAX_OUTPUT_INDEX)
    }
}

impl TryFrom<&[u8]> for AtomicalId {
    type Error = AtomicalIdError;

    fn try_from(bytes: &[u8]) -> Result<Self, Self::Error> {
        Self::from_bytes(bytes)
    }
}

impl Display for AtomicalId {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}i{}", self.txid, self.index)
    }
}

impl Debug for AtomicalId {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        Display::fmt(self, f)
    }
}

impl Serialize for AtomicalId {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

impl<'de> Deserialize<'de> for AtomicalId {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let s = <std::borrow::Cow<'de, str>>::deserialize(deserializer)?;
        AtomicalId::from_str(&s).map_err(serde::de::Error::custom)
    }
}
