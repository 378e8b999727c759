//!
//! Status of a name claim among the competing candidates for the same name.
//!
//! Which candidate leads is decided by the index from commit ordering. Given that outcome, the
//! heights of the claim and, for subrealms, its payment record, the functions here derive the
//! status reported for one particular candidate.
//!

use super::delays::{is_within_name_reveal_delay, make_payment_from_height, payment_due_no_later_than_height};
use atomicals_consensus_core::{AtomicalId, config::params::Params, mint::NameType, tx::TransactionId};
use serde::Serialize;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum CandidateStatus {
    Verified,
    ClaimedByOther,
    Pending,
    PendingCandidate,
    PendingClaimedByOther,
    PendingAwaitingConfirmations,
    PendingAwaitingConfirmationsForPaymentWindow,
    PendingAwaitingConfirmationsPaymentReceivedPrematurely,
    PendingAwaitingPayment,
    ExpiredRevealedLate,
    ExpiredPaymentNotReceived,
    InvalidRequestSubrealmNoMatchedApplicableRule,
}

/// State of the leading candidate of a name as tracked by the index
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum WinnerStatus {
    Verified,
    Pending,
    PendingAwaitingPayment,
}

impl From<WinnerStatus> for CandidateStatus {
    fn from(status: WinnerStatus) -> Self {
        match status {
            WinnerStatus::Verified => CandidateStatus::Verified,
            WinnerStatus::Pending => CandidateStatus::Pending,
            WinnerStatus::PendingAwaitingPayment => CandidateStatus::PendingAwaitingPayment,
        }
    }
}

/// The leading candidate of a name
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Winner {
    pub status: WinnerStatus,
    pub atomical_id: Option<AtomicalId>,
}

/// The candidate whose status is requested
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct NameClaim {
    pub atomical_id: AtomicalId,
    pub commit_height: u64,
    pub reveal_location_height: u64,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum SubrealmPaymentType {
    /// Paid for according to the parent realm rules
    ApplicableRule,
    /// Minted by the owner of the parent realm, no payment needed
    ParentInitiated,
}

/// Payment record of a subrealm candidate
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SubrealmPayment {
    pub payment_type: SubrealmPaymentType,
    /// Whether a rule of the parent realm matched the requested name
    pub has_applicable_rule: bool,
    /// The transaction which paid for the claim, if any
    pub payment: Option<TransactionId>,
    /// Deadline stored with the candidate when it was recorded. Derived from the commit height
    /// when absent.
    pub payment_due_no_later_than_height: Option<u64>,
}

/// Heights bounding the payment of a subrealm claimed by rule
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct PaymentWindow {
    pub make_payment_from_height: u64,
    pub payment_due_no_later_than_height: u64,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CandidateReport {
    pub status: CandidateStatus,
    /// The leading candidate the status refers to
    pub candidate_atomical_id: Option<AtomicalId>,
    pub note: Option<String>,
}

impl CandidateReport {
    fn new(status: CandidateStatus, candidate_atomical_id: Option<AtomicalId>, note: impl Into<String>) -> Self {
        Self { status, candidate_atomical_id, note: Some(note.into()) }
    }

    fn bare(status: CandidateStatus, candidate_atomical_id: Option<AtomicalId>) -> Self {
        Self { status, candidate_atomical_id, note: None }
    }
}

#[derive(Clone)]
pub struct NameCandidateArbiter {
    params: Params,
}

impl NameCandidateArbiter {
    pub fn new(params: Params) -> Self {
        Self { params }
    }

    /// Payment heights of a subrealm candidate. Only claims by rule are paid for.
    pub fn payment_window(&self, commit_height: u64, payment: &SubrealmPayment) -> Option<PaymentWindow> {
        (payment.payment_type == SubrealmPaymentType::ApplicableRule).then(|| PaymentWindow {
            make_payment_from_height: make_payment_from_height(&self.params, commit_height),
            payment_due_no_later_than_height: self.payment_due(commit_height, payment),
        })
    }

    fn payment_due(&self, commit_height: u64, payment: &SubrealmPayment) -> u64 {
        payment.payment_due_no_later_than_height.unwrap_or_else(|| payment_due_no_later_than_height(&self.params, commit_height))
    }

    /// Status of a realm, container or ticker candidate
    pub fn name_request_status(&self, claim: &NameClaim, winner: &Winner, name_type: NameType) -> CandidateReport {
        let delay = self.params.name_commit_reveal_delay_blocks;
        if !is_within_name_reveal_delay(&self.params, claim.commit_height, claim.reveal_location_height) {
            return CandidateReport::new(
                CandidateStatus::ExpiredRevealedLate,
                None,
                format!("The maximum number of blocks between commit and reveal is {delay} blocks"),
            );
        }

        let is_winner = winner.atomical_id == Some(claim.atomical_id);
        match winner.status {
            WinnerStatus::Verified if is_winner => CandidateReport::new(
                CandidateStatus::Verified,
                winner.atomical_id,
                format!("Successfully verified and claimed {name_type} for current Atomical"),
            ),
            WinnerStatus::Verified => CandidateReport::new(
                CandidateStatus::ClaimedByOther,
                winner.atomical_id,
                format!("Failed to claim {name_type} for current Atomical because it was claimed first by another Atomical"),
            ),
            WinnerStatus::Pending if name_type != NameType::Subrealm && is_winner => CandidateReport::new(
                CandidateStatus::PendingCandidate,
                winner.atomical_id,
                format!(
                    "The current Atomical is the leading candidate for the {name_type}. Wait the {delay} blocks after commit to achieve confirmation"
                ),
            ),
            WinnerStatus::Pending if name_type != NameType::Subrealm => CandidateReport::new(
                CandidateStatus::PendingClaimedByOther,
                winner.atomical_id,
                format!("Failed to claim {name_type} for current Atomical because it was claimed first by another Atomical"),
            ),
            status => CandidateReport::bare(status.into(), winner.atomical_id),
        }
    }

    /// Status of a subrealm candidate: the common name rules overlaid with the payment rules
    pub fn subrealm_request_status(
        &self,
        current_height: u64,
        claim: &NameClaim,
        winner: &Winner,
        payment: &SubrealmPayment,
    ) -> CandidateReport {
        let base = self.name_request_status(claim, winner, NameType::Subrealm);
        if matches!(base.status, CandidateStatus::ExpiredRevealedLate | CandidateStatus::Verified) {
            return base;
        }

        let by_rule = payment.payment_type == SubrealmPaymentType::ApplicableRule;
        if by_rule && !payment.has_applicable_rule {
            return CandidateReport::bare(CandidateStatus::InvalidRequestSubrealmNoMatchedApplicableRule, None);
        }
        if base.status == CandidateStatus::ClaimedByOther {
            return CandidateReport::new(
                CandidateStatus::ClaimedByOther,
                winner.atomical_id,
                "Failed to claim subrealm for current Atomical because it was claimed first by another Atomical",
            );
        }

        let delay = self.params.name_commit_reveal_delay_blocks;
        let payment_due = self.payment_due(claim.commit_height, payment);
        if by_rule && payment.payment.is_none() && current_height > payment_due {
            return CandidateReport::new(
                CandidateStatus::ExpiredPaymentNotReceived,
                None,
                "A valid payment was not received before the 'payment_due_no_later_than_height' limit",
            );
        }

        if current_height < claim.commit_height + delay {
            return match (payment.payment_type, payment.payment) {
                (SubrealmPaymentType::ApplicableRule, Some(_)) => CandidateReport::new(
                    CandidateStatus::PendingAwaitingConfirmationsPaymentReceivedPrematurely,
                    winner.atomical_id,
                    format!("A payment was received, but the minimum delay of {delay} blocks has not yet elapsed to declare a winner"),
                ),
                (SubrealmPaymentType::ApplicableRule, None) => CandidateReport::new(
                    CandidateStatus::PendingAwaitingConfirmationsForPaymentWindow,
                    winner.atomical_id,
                    "Await until the 'make_payment_from_height' block height for the payment window to be open with status 'pending_awaiting_payment'",
                ),
                (SubrealmPaymentType::ParentInitiated, _) => CandidateReport::new(
                    CandidateStatus::PendingAwaitingConfirmations,
                    winner.atomical_id,
                    format!("Await {delay} blocks has elapsed to verify"),
                ),
            };
        }

        if winner.status == WinnerStatus::PendingAwaitingPayment {
            let note = if winner.atomical_id == Some(claim.atomical_id) {
                format!("The payment must be received by block height {payment_due} to claim successfully")
            } else {
                format!("Another Atomical is the leading candidate and they have until block height {payment_due} to claim successfully.")
            };
            return CandidateReport::new(CandidateStatus::PendingAwaitingPayment, winner.atomical_id, note);
        }

        CandidateReport::bare(winner.status.into(), winner.atomical_id)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_helpers::hash;
    use atomicals_consensus_core::config::params::MAINNET_PARAMS;

    fn claim(commit_height: u64, reveal_location_height: u64) -> NameClaim {
        NameClaim { atomical_id: AtomicalId::new(hash(1), 0), commit_height, reveal_location_height }
    }

    fn winner(status: WinnerStatus, byte: u8) -> Winner {
        Winner { status, atomical_id: Some(AtomicalId::new(hash(byte), 0)) }
    }

    fn by_rule(payment: Option<TransactionId>) -> SubrealmPayment {
        SubrealmPayment { payment_type: SubrealmPaymentType::ApplicableRule, has_applicable_rule: true, payment, payment_due_no_later_than_height: None }
    }

    fn parent_initiated() -> SubrealmPayment {
        SubrealmPayment { payment_type: SubrealmPaymentType::ParentInitiated, has_applicable_rule: false, ..by_rule(None) }
    }

    #[test]
    fn test_name_request_status() {
        let arbiter = NameCandidateArbiter::new(MAINNET_PARAMS);
        let on_time = claim(100, 103);
        let cases = [
            (WinnerStatus::Verified, 1, CandidateStatus::Verified),
            (WinnerStatus::Verified, 2, CandidateStatus::ClaimedByOther),
            (WinnerStatus::Pending, 1, CandidateStatus::PendingCandidate),
            (WinnerStatus::Pending, 2, CandidateStatus::PendingClaimedByOther),
            (WinnerStatus::PendingAwaitingPayment, 1, CandidateStatus::PendingAwaitingPayment),
        ];
        for (status, byte, expected) in cases {
            let report = arbiter.name_request_status(&on_time, &winner(status, byte), NameType::Realm);
            assert_eq!(report.status, expected, "{status:?} {byte}");
            assert_eq!(report.candidate_atomical_id, Some(AtomicalId::new(hash(byte), 0)));
        }

        let report = arbiter.name_request_status(&on_time, &winner(WinnerStatus::Verified, 1), NameType::Container);
        assert_eq!(report.note.unwrap(), "Successfully verified and claimed container for current Atomical");
        let report = arbiter.name_request_status(&on_time, &winner(WinnerStatus::Pending, 1), NameType::Ticker);
        assert_eq!(
            report.note.unwrap(),
            "The current Atomical is the leading candidate for the ticker. Wait the 3 blocks after commit to achieve confirmation"
        );
    }

    #[test]
    fn test_revealed_late_overrides_all() {
        let arbiter = NameCandidateArbiter::new(MAINNET_PARAMS);
        let late = claim(100, 104);
        for status in [WinnerStatus::Verified, WinnerStatus::Pending, WinnerStatus::PendingAwaitingPayment] {
            for byte in [1, 2] {
                let report = arbiter.name_request_status(&late, &winner(status, byte), NameType::Realm);
                assert_eq!(report.status, CandidateStatus::ExpiredRevealedLate);
                assert_eq!(report.candidate_atomical_id, None);
                assert_eq!(report.note.unwrap(), "The maximum number of blocks between commit and reveal is 3 blocks");

                let report = arbiter.subrealm_request_status(200, &late, &winner(status, byte), &by_rule(None));
                assert_eq!(report.status, CandidateStatus::ExpiredRevealedLate);
            }
        }
    }

    #[test]
    fn test_subrealm_request_status() {
        let arbiter = NameCandidateArbiter::new(MAINNET_PARAMS);
        let on_time = claim(100, 101);
        let parent_initiated = parent_initiated();
        let no_rule = SubrealmPayment { has_applicable_rule: false, ..by_rule(None) };
        let paid = by_rule(Some(hash(9)));

        let cases = [
            (101, winner(WinnerStatus::Verified, 1), by_rule(None), CandidateStatus::Verified),
            (101, winner(WinnerStatus::Verified, 2), no_rule, CandidateStatus::InvalidRequestSubrealmNoMatchedApplicableRule),
            (101, winner(WinnerStatus::Verified, 2), paid, CandidateStatus::ClaimedByOther),
            (116, winner(WinnerStatus::PendingAwaitingPayment, 1), by_rule(None), CandidateStatus::ExpiredPaymentNotReceived),
            (115, winner(WinnerStatus::PendingAwaitingPayment, 1), by_rule(None), CandidateStatus::PendingAwaitingPayment),
            (102, winner(WinnerStatus::Pending, 1), paid, CandidateStatus::PendingAwaitingConfirmationsPaymentReceivedPrematurely),
            (102, winner(WinnerStatus::Pending, 1), by_rule(None), CandidateStatus::PendingAwaitingConfirmationsForPaymentWindow),
            (102, winner(WinnerStatus::Pending, 1), parent_initiated, CandidateStatus::PendingAwaitingConfirmations),
            (103, winner(WinnerStatus::Pending, 1), parent_initiated, CandidateStatus::Pending),
            (120, winner(WinnerStatus::Pending, 2), paid, CandidateStatus::Pending),
        ];
        for (current_height, winner, payment, expected) in cases {
            let report = arbiter.subrealm_request_status(current_height, &on_time, &winner, &payment);
            assert_eq!(report.status, expected, "{current_height} {winner:?} {payment:?}");
        }

        let report = arbiter.subrealm_request_status(110, &on_time, &winner(WinnerStatus::PendingAwaitingPayment, 1), &by_rule(None));
        assert_eq!(report.note.unwrap(), "The payment must be received by block height 115 to claim successfully");
        let report = arbiter.subrealm_request_status(110, &on_time, &winner(WinnerStatus::PendingAwaitingPayment, 2), &by_rule(None));
        assert_eq!(
            report.note.unwrap(),
            "Another Atomical is the leading candidate and they have until block height 115 to claim successfully."
        );
    }

    #[test]
    fn test_payment_window() {
        let arbiter = NameCandidateArbiter::new(MAINNET_PARAMS);
        assert_eq!(
            arbiter.payment_window(100, &by_rule(None)),
            Some(PaymentWindow { make_payment_from_height: 103, payment_due_no_later_than_height: 115 })
        );
        assert_eq!(arbiter.payment_window(100, &parent_initiated()), None);
    }

    #[test]
    fn test_stored_payment_deadline() {
        let arbiter = NameCandidateArbiter::new(MAINNET_PARAMS);
        let on_time = claim(100, 101);
        let leading = winner(WinnerStatus::PendingAwaitingPayment, 1);
        let stored = SubrealmPayment { payment_due_no_later_than_height: Some(120), ..by_rule(None) };

        assert_eq!(
            arbiter.payment_window(100, &stored),
            Some(PaymentWindow { make_payment_from_height: 103, payment_due_no_later_than_height: 120 })
        );
        // Past the derived deadline of 115 but within the stored one
        let report = arbiter.subrealm_request_status(118, &on_time, &leading, &stored);
        assert_eq!(report.status, CandidateStatus::PendingAwaitingPayment);
        assert_eq!(report.note.unwrap(), "The payment must be received by block height 120 to claim successfully");
        assert_eq!(arbiter.subrealm_request_status(120, &on_time, &leading, &stored).status, CandidateStatus::PendingAwaitingPayment);
        assert_eq!(arbiter.subrealm_request_status(121, &on_time, &leading, &stored).status, CandidateStatus::ExpiredPaymentNotReceived);

        let earlier = SubrealmPayment { payment_due_no_later_than_height: Some(110), ..by_rule(None) };
        assert_eq!(arbiter.subrealm_request_status(111, &on_time, &leading, &earlier).status, CandidateStatus::ExpiredPaymentNotReceived);
    }
}
