//!
//! The view of a base ledger transaction that the protocol consumes. Only the fields read by
//! operation extraction and mint validation are modeled.
//!

use atomicals_hashes::Hash;
use std::fmt::Display;

/// Represents the ID of a base ledger transaction (internal byte order)
pub type TransactionId = Hash;

/// A witness stack: one byte vector per element
pub type Witness = Vec<Vec<u8>>;

/// Represents a transaction outpoint
#[derive(Eq, Hash, PartialEq, Debug, Copy, Clone, PartialOrd, Ord)]
pub struct TransactionOutpoint {
    pub transaction_id: TransactionId,
    pub index: u32,
}

impl TransactionOutpoint {
    pub const fn new(transaction_id: TransactionId, index: u32) -> Self {
        Self { transaction_id, index }
    }
}

impl Display for TransactionOutpoint {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "({}, {})", self.transaction_id, self.index)
    }
}

/// Represents a transaction input
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TransactionInput {
    pub previous_outpoint: TransactionOutpoint,
    pub witness: Witness,
}

impl TransactionInput {
    pub fn new(previous_outpoint: TransactionOutpoint, witness: Witness) -> Self {
        Self { previous_outpoint, witness }
    }
}

/// Represents a transaction output
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TransactionOutput {
    pub value: u64,
    pub script_public_key: Vec<u8>,
}

impl TransactionOutput {
    pub fn new(value: u64, script_public_key: Vec<u8>) -> Self {
        Self { value, script_public_key }
    }
}

/// Represents a base ledger transaction
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Transaction {
    id: TransactionId,
    pub inputs: Vec<TransactionInput>,
    pub outputs: Vec<TransactionOutput>,
}

impl Transaction {
    pub fn new(id: TransactionId, inputs: Vec<TransactionInput>, outputs: Vec<TransactionOutput>) -> Self {
        Self { id, inputs, outputs }
    }

    /// Returns the transaction ID
    pub fn id(&self) -> TransactionId {
        self.id
    }

    pub fn output_values(&self) -> impl ExactSizeIterator<Item = u64> + '_ {
        self.outputs.iter().map(|output| output.value)
    }
}
