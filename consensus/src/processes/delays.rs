//!
//! Height windows of the commit/reveal scheme.
//!

use atomicals_consensus_core::config::params::Params;

/// Any mint must be revealed within `general_commit_reveal_delay_blocks` of its commit
pub fn is_within_general_reveal_delay(params: &Params, commit_height: u64, reveal_height: u64) -> bool {
    commit_height >= reveal_height.saturating_sub(params.general_commit_reveal_delay_blocks)
}

/// A realm, subrealm, container or ticker claim must be revealed within
/// `name_commit_reveal_delay_blocks` of its commit
pub fn is_within_name_reveal_delay(params: &Params, commit_height: u64, reveal_height: u64) -> bool {
    commit_height >= reveal_height.saturating_sub(params.name_commit_reveal_delay_blocks)
}

/// Whether a subrealm payment observed at `current_height` is still within the payment window
pub fn is_within_subrealm_payment_window(params: &Params, commit_height: u64, current_height: u64) -> bool {
    current_height <= commit_height + params.subrealm_payment_delay_blocks
}

/// First height at which paying for a subrealm claim is recommended. Until then an earlier
/// competing commit may still be revealed.
pub fn make_payment_from_height(params: &Params, commit_height: u64) -> u64 {
    commit_height + params.name_commit_reveal_delay_blocks
}

/// Last height at which a payment for a subrealm claim is accepted
pub fn payment_due_no_later_than_height(params: &Params, commit_height: u64) -> u64 {
    commit_height + params.subrealm_payment_delay_blocks
}
