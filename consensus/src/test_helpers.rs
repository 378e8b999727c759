//!
//! Builders for reveal transactions and spent-atomical snapshots used by tests and benchmarks.
//!

use atomicals_consensus_core::{
    AtomicalId, OpType,
    payload::{PayloadMap, PayloadValue},
    spent::{AtomicalsSpentAtInputs, SpentAtomical},
    tx::{Transaction, TransactionId, TransactionInput, TransactionOutpoint, TransactionOutput},
};
use atomicals_hashes::Hash;
use atomicals_txscript::script_builder::EnvelopeBuilder;

/// Key pushed at the start of every reveal script built here
pub const REVEAL_KEY: [u8; 32] = [0x11; 32];

/// Encodes a payload map as CBOR
pub fn cbor(payload: &PayloadMap) -> Vec<u8> {
    PayloadValue::Map(payload.clone()).to_cbor_bytes().unwrap()
}

/// A hash with every byte set to `byte`
pub fn hash(byte: u8) -> TransactionId {
    Hash::from_bytes([byte; 32])
}

/// A hash whose displayed (byte-reversed) hex starts with `prefix`, the rest being `fill`
pub fn hash_with_display_prefix(prefix: &str, fill: u8) -> TransactionId {
    let mut displayed = [fill; 32];
    let prefix = atomicals_core::hex::decode_hex(prefix).unwrap();
    displayed[..prefix.len()].copy_from_slice(&prefix);
    displayed.reverse();
    Hash::from_bytes(displayed)
}

pub struct TxBuilder {
    id: TransactionId,
    inputs: Vec<TransactionInput>,
    outputs: Vec<TransactionOutput>,
}

impl TxBuilder {
    pub fn new() -> Self {
        Self { id: hash(0xee), inputs: Vec::new(), outputs: Vec::new() }
    }

    pub fn id(mut self, id: TransactionId) -> Self {
        self.id = id;
        self
    }

    fn next_outpoint(&self) -> TransactionOutpoint {
        TransactionOutpoint::new(hash(self.inputs.len() as u8 + 1), self.inputs.len() as u32)
    }

    /// Adds an input without any envelope
    pub fn input(mut self) -> Self {
        let outpoint = self.next_outpoint();
        self.inputs.push(TransactionInput::new(outpoint, vec![vec![0x30; 64]]));
        self
    }

    /// Adds an input spending a default commit outpoint and revealing `op` with `payload`
    pub fn reveal_input(self, op: OpType, payload: &[u8]) -> Self {
        let outpoint = self.next_outpoint();
        self.reveal_input_from(outpoint, op, payload)
    }

    /// Adds an input spending `commit` and revealing `op` with `payload`
    pub fn reveal_input_from(mut self, commit: TransactionOutpoint, op: OpType, payload: &[u8]) -> Self {
        let script = EnvelopeBuilder::new(&REVEAL_KEY).payload(payload).build(op).unwrap();
        // Signature, reveal script, control block
        let witness = vec![vec![0x01; 64], script, vec![0xc0; 33]];
        self.inputs.push(TransactionInput::new(commit, witness));
        self
    }

    pub fn output(mut self, value: u64, script: Vec<u8>) -> Self {
        self.outputs.push(TransactionOutput::new(value, script));
        self
    }

    pub fn build(self) -> Transaction {
        Transaction::new(self.id, self.inputs, self.outputs)
    }
}

impl Default for TxBuilder {
    fn default() -> Self {
        Self::new()
    }
}

/// Builds a spent-atomicals snapshot from `(input index, atomical id, value)` triples
pub fn spent_at_inputs(entries: &[(usize, AtomicalId, u64)]) -> AtomicalsSpentAtInputs {
    let mut spent = AtomicalsSpentAtInputs::new();
    for &(input_index, atomical_id, value) in entries {
        spent.entry(input_index).or_default().push(SpentAtomical::new(atomical_id, value));
    }
    spent
}
