//!
//! Snapshot of the atomicals moved by each input of a transaction, as resolved by the index.
//!

use crate::{
    atomical_id::AtomicalId,
    errors::spent::{SpentRecordError, SpentRecordResult},
};
use std::collections::BTreeMap;

/// An atomical located at a spent outpoint together with the value of that outpoint
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SpentAtomical {
    pub atomical_id: AtomicalId,
    pub value: u64,
}

impl SpentAtomical {
    pub fn new(atomical_id: AtomicalId, value: u64) -> Self {
        Self { atomical_id, value }
    }

    /// Reads the little-endian value stored at `value_offset` of an index location record
    /// (by default the record starts with a hashX and a script hash)
    pub fn from_record(atomical_id: AtomicalId, record: &[u8], value_offset: usize) -> SpentRecordResult<Self> {
        let bytes = value_offset
            .checked_add(8)
            .and_then(|end| record.get(value_offset..end))
            .ok_or(SpentRecordError::RecordTooShort(record.len(), value_offset))?;
        let mut value = [0u8; 8];
        value.copy_from_slice(bytes);
        Ok(Self { atomical_id, value: u64::from_le_bytes(value) })
    }
}

/// Atomicals spent at each input index, inputs in ascending order
pub type AtomicalsSpentAtInputs = BTreeMap<usize, Vec<SpentAtomical>>;

/// A spent-atomical location record as handed over by the index
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SpentRecord {
    pub atomical_id: AtomicalId,
    pub data: Vec<u8>,
}

impl SpentRecord {
    pub fn new(atomical_id: AtomicalId, data: Vec<u8>) -> Self {
        Self { atomical_id, data }
    }
}

/// Raw records of the atomicals spent at each input index
pub type SpentRecordsAtInputs = BTreeMap<usize, Vec<SpentRecord>>;

/// Decodes the records of every input. A single malformed record fails the whole set.
pub fn decode_spent_records(records: &SpentRecordsAtInputs, value_offset: usize) -> SpentRecordResult<AtomicalsSpentAtInputs> {
    records
        .iter()
        .map(|(&input_index, entries)| {
            let spent = entries
                .iter()
                .map(|record| SpentAtomical::from_record(record.atomical_id, &record.data, value_offset))
                .collect::<SpentRecordResult<Vec<_>>>()?;
            Ok((input_index, spent))
        })
        .collect()
}

/// Total value of the inputs carrying `atomical_id`, over all inputs
pub fn total_spent_value(spent: &AtomicalsSpentAtInputs, atomical_id: &AtomicalId) -> u128 {
    spent.values().flatten().filter(|entry| entry.atomical_id == *atomical_id).map(|entry| entry.value as u128).sum()
}

/// Input indexes at which `atomical_id` was spent
pub fn input_indexes_of(spent: &AtomicalsSpentAtInputs, atomical_id: &AtomicalId) -> Vec<usize> {
    spent
        .iter()
        .filter(|(_, entries)| entries.iter().any(|entry| entry.atomical_id == *atomical_id))
        .map(|(&input_index, _)| input_index)
        .collect()
}
