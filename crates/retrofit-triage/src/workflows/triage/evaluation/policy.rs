use super::super::domain::{HouseholdInput, ManualReview, Outcome};
use super::property::SAP_CEILING;
use serde::{Deserialize, Serialize};

/// Inputs the priority tiers are decided on.
#[derive(Debug, Clone, Copy)]
pub(crate) struct PrioritySignals {
    pub(crate) financial_eligible: bool,
    pub(crate) property_eligible: bool,
    pub(crate) cavity_feasible: bool,
    pub(crate) vulnerability_count: usize,
    pub(crate) manual_review: ManualReview,
}

pub(crate) fn classify_priority(signals: &PrioritySignals) -> Outcome {
    let outcome = if !(signals.financial_eligible && signals.property_eligible) {
        Outcome::NotEligible
    } else if signals.cavity_feasible {
        match signals.vulnerability_count {
            0 => Outcome::Year1Priority3,
            1 => Outcome::Year1Priority2,
            _ => Outcome::Year1Priority1,
        }
    } else {
        Outcome::Year2
    };

    // A confirmed DE review supersedes every computed tier.
    if signals.manual_review == ManualReview::Yes {
        Outcome::ReferToDE
    } else {
        outcome
    }
}

/// Explanation attached to a negative outcome.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RejectionReason {
    NoFinancialPathway,
    ReviewedPropertyIneligible,
    EpcRatingOutOfRange,
    SapScoreTooHigh,
    PropertyNotEligible,
}

impl RejectionReason {
    pub fn summary(&self) -> &'static str {
        match self {
            RejectionReason::NoFinancialPathway => "No eligible financial pathway",
            RejectionReason::ReviewedPropertyIneligible => "DE review: property ineligible",
            RejectionReason::EpcRatingOutOfRange => "EPC rating must be D to G",
            RejectionReason::SapScoreTooHigh => "SAP score must be below 70",
            RejectionReason::PropertyNotEligible => "Property not eligible",
        }
    }
}

pub(crate) fn rejection_reason(
    outcome: Outcome,
    financial_eligible: bool,
    input: &HouseholdInput,
) -> Option<RejectionReason> {
    if outcome != Outcome::NotEligible {
        return None;
    }

    if !financial_eligible {
        return Some(RejectionReason::NoFinancialPathway);
    }

    let rating_ok = input
        .epc_rating
        .map(|rating| rating.is_retrofit_band())
        .unwrap_or(false);

    let reason = if input.manual_review == ManualReview::NotEligible {
        RejectionReason::ReviewedPropertyIneligible
    } else if !rating_ok {
        RejectionReason::EpcRatingOutOfRange
    } else if input.sap_score >= SAP_CEILING {
        RejectionReason::SapScoreTooHigh
    } else {
        // Unreachable through the property rule today; kept as the catch-all.
        RejectionReason::PropertyNotEligible
    };

    Some(reason)
}
