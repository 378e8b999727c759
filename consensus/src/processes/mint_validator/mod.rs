//!
//! Validation of mint operations (`nft`, `ft`, `dft`) into [`MintInfo`] records.
//!
//! Each `check_*` step either yields its part of the record or the rejection reason, and the
//! steps run in a fixed order so that a given transaction always fails on the same reason.
//!

mod mint_args_validation;
mod mint_type_validation;

use super::operations::OperationFound;
use crate::errors::{MintError, MintResult};
use atomicals_consensus_core::{
    AtomicalId, OpType,
    atomical_ref::atomical_ref,
    config::{Config, params::Params},
    mint::{AtomicalType, FtSubtype, MintInfo},
    payload::{PayloadMap, PayloadValue},
    spent::AtomicalsSpentAtInputs,
    tx::Transaction,
};
use atomicals_core::{debug, warn};
use atomicals_hashes::{double_sha256, hash_x};
use mint_args_validation::check_name_request_count;
use mint_type_validation::check_ticker_request;

#[derive(Clone)]
pub struct MintValidator {
    params: Params,
    enable_sanity_checks: bool,
}

/// The `args`, `meta`, `ctx` and `init` maps of a payload (empty when absent)
struct MintFields {
    args: PayloadMap,
    meta: PayloadMap,
    ctx: PayloadMap,
    init: PayloadMap,
}

impl MintValidator {
    pub fn new(params: Params) -> Self {
        Self { params, enable_sanity_checks: false }
    }

    pub fn with_config(config: &Config) -> Self {
        Self { params: config.params.clone(), enable_sanity_checks: config.enable_sanity_checks }
    }

    pub fn params(&self) -> &Params {
        &self.params
    }

    /// Validates a located operation as a mint. Rejections are logged and yield `None`.
    pub fn get_mint_info(&self, op: &OperationFound, tx: &Transaction, spent: &AtomicalsSpentAtInputs) -> Option<MintInfo> {
        match self.validate_mint(op, tx, spent) {
            Ok(mint_info) => Some(mint_info),
            Err(MintError::NotAMintOperation(_)) => None,
            Err(err) => {
                let atomical_id = op.commit_location;
                match err {
                    MintError::NotAtFirstInput(_) | MintError::NoOutputs => debug!("tx {}: ignoring mint {atomical_id}: {err}", tx.id()),
                    _ => warn!("tx {}: rejected mint {atomical_id}: {err}", tx.id()),
                }
                None
            }
        }
    }

    pub fn validate_mint(&self, op: &OperationFound, tx: &Transaction, spent: &AtomicalsSpentAtInputs) -> MintResult<MintInfo> {
        let (atomical_type, subtype) = check_mint_operation(op)?;
        let output = tx.outputs.first().ok_or(MintError::NoOutputs)?;
        let fields = check_mint_fields(&op.payload)?;

        let bitwork = self.check_bitwork_commitments(op, &fields.args)?;
        let name_type_requiring_bitwork = check_name_request_count(&fields.args)?;
        let parents = self.check_parents(&fields.args, spent)?;

        let (request, dmint) = match op.op {
            OpType::Nft => (self.check_nft_request(&fields.args)?, None),
            OpType::Ft => (Some(check_ticker_request(&fields.args)?), None),
            OpType::Dft => {
                let request = check_ticker_request(&fields.args)?;
                (Some(request), Some(self.check_decentralized_mint(&fields.args)?))
            }
            op => return Err(MintError::NotAMintOperation(op)),
        };

        self.check_name_bitwork(name_type_requiring_bitwork, &bitwork)?;

        let atomical_id = AtomicalId::new(op.commit_txid, op.commit_index);
        if self.enable_sanity_checks {
            assert_eq!(op.commit_location, atomical_id, "operation commit location does not match its commit outpoint");
        }
        let reveal_location = AtomicalId::new(op.reveal_location_txid, op.reveal_location_index);

        Ok(MintInfo {
            atomical_id,
            atomical_ref: atomical_ref(&op.commit_txid, op.reveal_location_index),
            atomical_type,
            subtype,
            commit_txid: op.commit_txid,
            commit_index: op.commit_index,
            commit_location: op.commit_location,
            reveal_location_txid: op.reveal_location_txid,
            reveal_location_index: op.reveal_location_index,
            reveal_location,
            reveal_location_scripthash: double_sha256(&output.script_public_key),
            reveal_location_hash_x: hash_x(&output.script_public_key),
            reveal_location_value: output.value,
            reveal_location_script: output.script_public_key.clone(),
            args: fields.args,
            meta: fields.meta,
            ctx: fields.ctx,
            init: fields.init,
            bitwork,
            request,
            parents,
            dmint,
        })
    }
}

fn check_mint_operation(op: &OperationFound) -> MintResult<(AtomicalType, Option<FtSubtype>)> {
    let kind = match op.op {
        OpType::Nft => (AtomicalType::Nft, None),
        OpType::Ft => (AtomicalType::Ft, Some(FtSubtype::Direct)),
        OpType::Dft => (AtomicalType::Ft, Some(FtSubtype::Decentralized)),
        other => return Err(MintError::NotAMintOperation(other)),
    };
    if op.input_index != 0 {
        return Err(MintError::NotAtFirstInput(op.input_index));
    }
    Ok(kind)
}

fn field_map(payload: &PayloadMap, field: &'static str) -> MintResult<PayloadMap> {
    match payload.get(field) {
        None => Ok(PayloadMap::new()),
        Some(PayloadValue::Map(map)) => Ok(map.clone()),
        Some(_) => Err(MintError::FieldNotAMap(field)),
    }
}

fn check_mint_fields(payload: &PayloadMap) -> MintResult<MintFields> {
    Ok(MintFields {
        meta: field_map(payload, "meta")?,
        args: field_map(payload, "args")?,
        ctx: field_map(payload, "ctx")?,
        init: field_map(payload, "init")?,
    })
}

/// Returns the value under `key` unless it is absent or blank
fn non_blank<'a>(args: &'a PayloadMap, key: &str) -> Option<&'a PayloadValue> {
    args.get(key).filter(|value| !value.is_blank())
}
