use super::{MintValidator, non_blank};
use crate::{
    errors::{MintError, MintResult},
    processes::operations::OperationFound,
};
use atomicals_consensus_core::{
    AtomicalId,
    bitwork::Bitwork,
    mint::{BitworkCommitments, NameType},
    payload::{PayloadMap, PayloadValue},
    spent::{AtomicalsSpentAtInputs, input_indexes_of, total_spent_value},
    tx::TransactionId,
};
use indexmap::IndexMap;

impl MintValidator {
    /// Validates the optional `bitworkc`/`bitworkr` requirements against the commit/reveal ids
    pub(super) fn check_bitwork_commitments(&self, op: &OperationFound, args: &PayloadMap) -> MintResult<BitworkCommitments> {
        let bitworkc = check_bitwork_satisfied(args, "bitworkc", op.commit_txid)?;
        let bitworkr = check_bitwork_satisfied(args, "bitworkr", op.reveal_location_txid)?;
        Ok(BitworkCommitments { bitworkc, bitworkr })
    }

    /// Realm, container and ticker claims need a commit bitwork with a long enough prefix
    pub(super) fn check_name_bitwork(&self, name_type: Option<NameType>, bitwork: &BitworkCommitments) -> MintResult<()> {
        let Some(name_type) = name_type else {
            return Ok(());
        };
        let min_len = self.params.name_bitworkc_min_prefix_len;
        match &bitwork.bitworkc {
            None => Err(MintError::MissingNameBitwork(name_type)),
            Some(bitworkc) if bitworkc.prefix().len() < min_len => {
                Err(MintError::NameBitworkTooShort(name_type, bitworkc.prefix().len(), min_len))
            }
            Some(_) => Ok(()),
        }
    }

    /// Validates `args.parents`: each listed parent must have been spent by this transaction
    /// with a total value (over all inputs) of at least the listed minimum
    pub(super) fn check_parents(
        &self,
        args: &PayloadMap,
        spent: &AtomicalsSpentAtInputs,
    ) -> MintResult<Option<IndexMap<AtomicalId, u64>>> {
        let Some(parents) = non_blank(args, "parents") else {
            return Ok(None);
        };
        let parents = parents.as_map().ok_or(MintError::ParentsNotAMap)?;
        if spent.is_empty() {
            return Err(MintError::ParentsWithoutSpentAtomicals);
        }

        let mut checked = IndexMap::with_capacity(parents.len());
        for (compact, minimum) in parents {
            let parent_id = AtomicalId::from_compact(compact, self.params.compact_id_max_output_index)
                .map_err(|err| MintError::InvalidParentId(compact.clone(), err))?;
            let minimum = minimum
                .as_int()
                .and_then(|minimum| u64::try_from(minimum).ok())
                .ok_or(MintError::InvalidParentMinimum(parent_id))?;

            if input_indexes_of(spent, &parent_id).is_empty() {
                return Err(MintError::MissingParent(parent_id));
            }
            let total = total_spent_value(spent, &parent_id);
            if total < minimum as u128 {
                return Err(MintError::InsufficientParentValue(parent_id, total, minimum));
            }
            checked.insert(parent_id, minimum);
        }
        Ok(Some(checked))
    }
}

/// Parses a bitwork argument, which must be a well-formed string
pub(super) fn parse_bitwork(field: &'static str, value: &PayloadValue) -> MintResult<Bitwork> {
    let text = value.as_text().ok_or(MintError::BitworkNotText(field))?;
    Bitwork::parse(text).map_err(|err| MintError::InvalidBitwork(field, err))
}

fn check_bitwork_satisfied(args: &PayloadMap, field: &'static str, txid: TransactionId) -> MintResult<Option<Bitwork>> {
    let Some(value) = non_blank(args, field) else {
        return Ok(None);
    };
    let bitwork = parse_bitwork(field, value)?;
    if !bitwork.matches(&txid.to_string()) {
        return Err(MintError::BitworkUnsatisfied(field, bitwork.to_string(), txid));
    }
    Ok(Some(bitwork))
}

/// At most one name may be requested. Returns the requested name type when it needs a commit bitwork.
pub(super) fn check_name_request_count(args: &PayloadMap) -> MintResult<Option<NameType>> {
    let requested: Vec<NameType> =
        NameType::ALL.into_iter().filter(|name_type| non_blank(args, name_type.request_key()).is_some()).collect();
    if requested.len() > 1 {
        return Err(MintError::MultipleNameRequests(requested.len()));
    }
    Ok(requested.into_iter().find(|name_type| name_type.requires_bitwork()))
}
