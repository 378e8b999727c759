pub use super::constants::{index::*, protocol::*};
use serde::{Deserialize, Serialize};
use std::{borrow::Cow, ops::RangeInclusive};

/// Protocol parameters. Every process reads its constants from here so that alternate
/// network parameters can be substituted without rebuilding.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Params {
    /// Maximum commit to reveal height gap of any mint
    pub general_commit_reveal_delay_blocks: u64,

    /// Maximum commit to reveal height gap of a name claim
    pub name_commit_reveal_delay_blocks: u64,

    /// Blocks after the commit during which a subrealm claim may be paid for
    pub subrealm_payment_delay_blocks: u64,

    /// Blocks after which a recorded subrealm rule update becomes effective
    pub subrealm_rules_effective_delay_blocks: u64,

    /// Mod path holding the subrealm mint rules
    pub subrealm_mint_path: Cow<'static, str>,

    pub subrealm_min_payment: u64,
    pub max_subrealm_rule_size_bytes: usize,

    pub dft_mint_height_min: u64,
    pub dft_mint_height_max: u64,
    pub dft_mint_amount_min: u64,
    pub dft_mint_amount_max: u64,
    pub dft_max_mints_min: u64,
    pub dft_max_mints_max: u64,

    pub compact_id_max_output_index: u32,
    pub name_bitworkc_min_prefix_len: usize,

    /// Offset of the value field inside a spent-atomical record
    pub spent_record_value_offset: usize,
}

impl Params {
    pub fn dft_mint_height_range(&self) -> RangeInclusive<u64> {
        self.dft_mint_height_min..=self.dft_mint_height_max
    }

    pub fn dft_mint_amount_range(&self) -> RangeInclusive<u64> {
        self.dft_mint_amount_min..=self.dft_mint_amount_max
    }

    pub fn dft_max_mints_range(&self) -> RangeInclusive<u64> {
        self.dft_max_mints_min..=self.dft_max_mints_max
    }
}

impl Default for Params {
    fn default() -> Self {
        MAINNET_PARAMS
    }
}

pub const MAINNET_PARAMS: Params = Params {
    general_commit_reveal_delay_blocks: MINT_GENERAL_COMMIT_REVEAL_DELAY_BLOCKS,
    name_commit_reveal_delay_blocks: MINT_NAME_COMMIT_REVEAL_DELAY_BLOCKS,
    subrealm_payment_delay_blocks: MINT_SUBREALM_COMMIT_PAYMENT_DELAY_BLOCKS,
    subrealm_rules_effective_delay_blocks: MINT_SUBREALM_RULES_BECOME_EFFECTIVE_IN_BLOCKS,
    subrealm_mint_path: Cow::Borrowed(SUBREALM_MINT_PATH),
    subrealm_min_payment: SUBREALM_MINT_MIN_PAYMENT_DUST_LIMIT,
    max_subrealm_rule_size_bytes: MAX_SUBREALM_RULE_SIZE_BYTES,
    dft_mint_height_min: DFT_MINT_HEIGHT_MIN,
    dft_mint_height_max: DFT_MINT_HEIGHT_MAX,
    dft_mint_amount_min: DFT_MINT_AMOUNT_MIN,
    dft_mint_amount_max: DFT_MINT_AMOUNT_MAX,
    dft_max_mints_min: DFT_MINT_MAX_MIN_COUNT,
    dft_max_mints_max: DFT_MINT_MAX_MAX_COUNT,
    compact_id_max_output_index: COMPACT_ID_MAX_OUTPUT_INDEX,
    name_bitworkc_min_prefix_len: NAME_BITWORKC_MIN_PREFIX_LEN,
    spent_record_value_offset: SPENT_RECORD_VALUE_OFFSET,
};
