//!
//! Format checks of decentralized mint claims (`dmt`) against a deployed ticker.
//!
//! Only the shape of the claim is validated here. Whether the ticker exists, the claim is
//! within the deployment's `max_mints`, and the per-claim bitwork is satisfied is decided by
//! the index which knows the deployment.
//!

use super::operations::OperationFound;
use crate::errors::{DmtError, DmtResult};
use atomicals_consensus_core::{OpType, name::is_valid_ticker_name, payload::PayloadValue};
use atomicals_core::debug;

/// Returns the ticker claimed by a well-formed `dmt` operation
pub fn check_dmt_op_format(op: &OperationFound) -> DmtResult<String> {
    if op.op != OpType::Dmt {
        return Err(DmtError::NotADmtOperation(op.op));
    }
    if op.input_index != 0 {
        return Err(DmtError::NotAtFirstInput(op.input_index));
    }
    for field in ["meta", "args", "ctx", "init"] {
        if op.payload.get(field).is_some_and(|value| value.as_map().is_none()) {
            return Err(DmtError::FieldNotAMap(field));
        }
    }
    op.payload
        .get("args")
        .and_then(PayloadValue::as_map)
        .and_then(|args| args.get("mint_ticker"))
        .and_then(PayloadValue::as_text)
        .filter(|ticker| is_valid_ticker_name(ticker))
        .map(str::to_owned)
        .ok_or(DmtError::InvalidTicker)
}

/// Like [`check_dmt_op_format`], logging the rejection reason of a `dmt` operation
pub fn get_dmt_ticker(op: &OperationFound) -> Option<String> {
    match check_dmt_op_format(op) {
        Ok(ticker) => Some(ticker),
        Err(DmtError::NotADmtOperation(_)) => None,
        Err(err) => {
            debug!("tx {}: ignoring dmt claim: {err}", op.reveal_location_txid);
            None
        }
    }
}
