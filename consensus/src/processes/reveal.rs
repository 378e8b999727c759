//!
//! What a reveal transaction yields, given the records of the atomicals spent at its inputs.
//!

use super::{dmint::get_dmt_ticker, mint_validator::MintValidator, operations::OperationFound, operations::find_operation};
use atomicals_consensus_core::{
    OpType,
    config::Config,
    errors::spent::SpentRecordResult,
    mint::MintInfo,
    spent::{AtomicalsSpentAtInputs, SpentRecordsAtInputs, decode_spent_records},
    tx::Transaction,
};

#[derive(Debug, Clone, PartialEq)]
pub struct RevealOutcome {
    pub operation: Option<OperationFound>,
    pub mint: Option<MintInfo>,
    /// Ticker of a well formed decentralized mint claim
    pub dmt_ticker: Option<String>,
    pub spent: AtomicalsSpentAtInputs,
}

#[derive(Clone)]
pub struct RevealProcessor {
    config: Config,
    mint_validator: MintValidator,
}

impl RevealProcessor {
    pub fn new(config: &Config) -> Self {
        Self { config: config.clone(), mint_validator: MintValidator::with_config(config) }
    }

    /// Fails only when the spent records are malformed, which means the index is corrupted
    pub fn process(&self, tx: &Transaction, records: &SpentRecordsAtInputs) -> SpentRecordResult<RevealOutcome> {
        let spent = decode_spent_records(records, self.config.spent_record_value_offset)?;
        let operation = find_operation(tx);
        let mint = operation.as_ref().and_then(|op| self.mint_validator.get_mint_info(op, tx, &spent));
        let dmt_ticker = operation.as_ref().filter(|op| op.op == OpType::Dmt).and_then(get_dmt_ticker);
        Ok(RevealOutcome { operation, mint, dmt_ticker, spent })
    }
}
