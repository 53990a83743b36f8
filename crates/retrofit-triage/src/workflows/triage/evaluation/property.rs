use super::super::domain::{HouseholdInput, ManualReview};

/// SAP scores at or above this are too efficient for the scheme.
pub(crate) const SAP_CEILING: u32 = 70;

const BORDERLINE_SAP: std::ops::RangeInclusive<u32> = 60..=68;

pub(crate) fn meets_property_rule(input: &HouseholdInput) -> bool {
    input
        .epc_rating
        .map(|rating| rating.is_retrofit_band())
        .unwrap_or(false)
        && input.sap_score < SAP_CEILING
}

/// Any recorded review decision takes the case out of the automatic gate.
/// A confirmed referral is resolved at the outcome level instead.
pub(crate) fn property_eligible(input: &HouseholdInput) -> bool {
    match input.manual_review {
        ManualReview::NotEligible | ManualReview::Yes => false,
        ManualReview::None => meets_property_rule(input),
    }
}

/// Already-upgraded homes sitting just under the ceiling need a review first.
pub fn borderline_review_required(input: &HouseholdInput) -> bool {
    input.already_upgraded && BORDERLINE_SAP.contains(&input.sap_score)
}
