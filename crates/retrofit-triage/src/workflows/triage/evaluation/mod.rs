mod financial;
mod income;
mod policy;
mod property;
mod proxy;

pub use income::{equivalised_income, equivalised_threshold, qualifies_after_housing_costs};
pub use policy::RejectionReason;
pub use property::borderline_review_required;
pub use proxy::proxies_form_qualifying_pair;

pub(crate) use financial::assess_financial;
pub(crate) use property::property_eligible;

use super::domain::{Advisories, EligibilityResult, HouseholdInput};
use crate::workflows::deprivation::DeprivationLookup;
use policy::{classify_priority, rejection_reason, PrioritySignals};
use tracing::debug;

/// Decides eligibility and priority for one household.
///
/// Pure over its arguments: the same input and lookup always give the same result.
pub fn evaluate(input: &HouseholdInput, lookup: &DeprivationLookup) -> EligibilityResult {
    let financial = assess_financial(input, lookup);
    let financial_eligible = financial.eligible();
    let property_eligible = property_eligible(input);

    let outcome = classify_priority(&PrioritySignals {
        financial_eligible,
        property_eligible,
        cavity_feasible: input.cavity_feasible,
        vulnerability_count: input.vulnerabilities.len(),
        manual_review: input.manual_review,
    });
    let rejection_reason = rejection_reason(outcome, financial_eligible, input);

    debug!(
        outcome = outcome.label(),
        pathway = financial.pathway.map(|pathway| pathway.label()),
        financial_eligible,
        property_eligible,
        "household evaluated"
    );

    EligibilityResult {
        outcome,
        pathway: financial.pathway,
        possible_pathways: financial.possible,
        rejection_reason,
        property_eligible,
        financial_eligible,
        advisories: Advisories {
            borderline_review_required: borderline_review_required(input),
            supporting_sections_required: outcome.requires_supporting_sections(),
        },
    }
}
