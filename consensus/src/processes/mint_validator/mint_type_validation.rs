use super::{MintValidator, mint_args_validation::parse_bitwork, non_blank};
use crate::errors::{MintError, MintResult};
use atomicals_consensus_core::{
    AtomicalId,
    mint::{ClaimType, DecentralizedMint, NameRequest, NameType},
    name::{is_valid_container_name, is_valid_realm_name, is_valid_subrealm_name, is_valid_ticker_name},
    payload::PayloadMap,
};
use std::ops::RangeInclusive;

impl MintValidator {
    /// An NFT may claim a realm, else a subrealm, else a container; otherwise it is a plain NFT.
    /// Only string values count as a claim.
    pub(super) fn check_nft_request(&self, args: &PayloadMap) -> MintResult<Option<NameRequest>> {
        if let Some(realm) = text_arg(args, NameType::Realm.request_key()) {
            if !is_valid_realm_name(realm) {
                return Err(MintError::InvalidName(NameType::Realm, realm.to_owned()));
            }
            return Ok(Some(NameRequest::Realm { name: realm.to_owned() }));
        }

        if let Some(subrealm) = text_arg(args, NameType::Subrealm.request_key()) {
            if !is_valid_subrealm_name(subrealm) {
                return Err(MintError::InvalidName(NameType::Subrealm, subrealm.to_owned()));
            }
            let claim_type = text_arg(args, "claim_type")
                .and_then(|claim_type| claim_type.parse::<ClaimType>().ok())
                .ok_or(MintError::InvalidClaimType)?;
            let parent_realm = text_arg(args, "parent_realm")
                .and_then(|compact| AtomicalId::from_compact(compact, self.params.compact_id_max_output_index).ok())
                .ok_or(MintError::InvalidParentRealm)?;
            return Ok(Some(NameRequest::Subrealm { name: subrealm.to_owned(), parent_realm, claim_type }));
        }

        if let Some(container) = text_arg(args, NameType::Container.request_key()) {
            if !is_valid_container_name(container) {
                return Err(MintError::InvalidName(NameType::Container, container.to_owned()));
            }
            return Ok(Some(NameRequest::Container { name: container.to_owned() }));
        }

        Ok(None)
    }

    /// Deployment parameters of a `dft` mint
    pub(super) fn check_decentralized_mint(&self, args: &PayloadMap) -> MintResult<DecentralizedMint> {
        let mint_height = int_arg_in_range(args, "mint_height", self.params.dft_mint_height_range())?;
        let mint_amount = int_arg_in_range(args, "mint_amount", self.params.dft_mint_amount_range())?;
        let max_mints = int_arg_in_range(args, "max_mints", self.params.dft_max_mints_range())?;
        let mint_bitworkc = non_blank(args, "mint_bitworkc").map(|value| parse_bitwork("mint_bitworkc", value)).transpose()?;
        let mint_bitworkr = non_blank(args, "mint_bitworkr").map(|value| parse_bitwork("mint_bitworkr", value)).transpose()?;
        Ok(DecentralizedMint { mint_height, mint_amount, max_mints, mint_bitworkc, mint_bitworkr })
    }
}

/// Fungible token mints must request a valid ticker
pub(super) fn check_ticker_request(args: &PayloadMap) -> MintResult<NameRequest> {
    let ticker = text_arg(args, NameType::Ticker.request_key()).ok_or(MintError::NameNotText(NameType::Ticker))?;
    if !is_valid_ticker_name(ticker) {
        return Err(MintError::InvalidName(NameType::Ticker, ticker.to_owned()));
    }
    Ok(NameRequest::Ticker { name: ticker.to_owned() })
}

fn text_arg<'a>(args: &'a PayloadMap, key: &str) -> Option<&'a str> {
    args.get(key).and_then(|value| value.as_text())
}

fn int_arg_in_range(args: &PayloadMap, key: &'static str, range: RangeInclusive<u64>) -> MintResult<u64> {
    args.get(key)
        .and_then(|value| value.as_int())
        .and_then(|value| u64::try_from(value).ok())
        .filter(|value| range.contains(value))
        .ok_or(MintError::DftParamOutOfRange(key, *range.start(), *range.end()))
}
