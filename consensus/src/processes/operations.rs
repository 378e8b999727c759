//!
//! Locates the protocol operation carried by a transaction.
//!

use atomicals_consensus_core::{
    AtomicalId, Location, OpType,
    payload::{PayloadMap, decode_sanitized_payload},
    tx::{Transaction, TransactionId},
};
use atomicals_core::debug;
use atomicals_txscript::parse_witness_envelope;

/// An operation found in the witness of one of the transaction inputs
#[derive(Debug, Clone, PartialEq)]
pub struct OperationFound {
    pub op: OpType,
    pub payload: PayloadMap,
    pub payload_bytes: Vec<u8>,
    /// Index of the input whose witness carries the operation
    pub input_index: usize,
    pub commit_txid: TransactionId,
    pub commit_index: u32,
    pub commit_location: Location,
    pub reveal_location_txid: TransactionId,
    /// The first output always receives what the operation creates
    pub reveal_location_index: u32,
}

impl OperationFound {
    /// Whether this operation is `op` and was found at input 0
    pub fn is_at_first_input(&self, op: OpType) -> bool {
        self.op == op && self.input_index == 0
    }
}

/// Scans the inputs in index order and returns the first operation with a valid payload.
///
/// Within an input the first witness element holding an envelope decides; if its payload is
/// empty, undecodable or fails sanitization the input is skipped and the next one is tried.
pub fn find_operation(tx: &Transaction) -> Option<OperationFound> {
    let reveal_txid = tx.id();
    for (input_index, input) in tx.inputs.iter().enumerate() {
        let Some(envelope) = parse_witness_envelope(&input.witness) else {
            continue;
        };
        let payload = match decode_sanitized_payload(&envelope.payload) {
            Ok(payload) => payload,
            Err(err) => {
                debug!("tx {reveal_txid}: skipping {} operation at input {input_index}: {err}", envelope.op);
                continue;
            }
        };
        let outpoint = input.previous_outpoint;
        return Some(OperationFound {
            op: envelope.op,
            payload,
            payload_bytes: envelope.payload,
            input_index,
            commit_txid: outpoint.transaction_id,
            commit_index: outpoint.index,
            commit_location: AtomicalId::from(outpoint),
            reveal_location_txid: reveal_txid,
            reveal_location_index: 0,
        });
    }
    None
}
