//! Eligibility and priority triage for retrofit assistance applicants.
//!
//! Financial and property eligibility are evaluated independently, combined into a
//! priority tier, and explained when the answer is negative. The core is the pure
//! [`evaluate`] function; [`TriageEngine`] pairs it with a loaded lookup for the
//! intake surfaces.

pub mod domain;
pub(crate) mod evaluation;
pub mod intake;
pub mod router;

#[cfg(test)]
mod tests;

pub use domain::{
    Advisories, CaseDetails, EligibilityResult, EpcRating, FinancialPathway, HouseholdInput,
    ManualReview, Outcome, ProxyCode,
};
pub use evaluation::{
    borderline_review_required, equivalised_income, equivalised_threshold, evaluate,
    proxies_form_qualifying_pair, qualifies_after_housing_costs, RejectionReason,
};
pub use intake::{ConsentFlags, ContactLog, IntakeForm, IntakeSnapshot};
pub use router::triage_router;

use crate::workflows::deprivation::{DeprivationLookup, PostcodeCheck};
use serde::{Deserialize, Serialize};
use std::sync::Arc;

/// Evaluator bound to a fully loaded, read-only postcode lookup.
#[derive(Debug, Clone)]
pub struct TriageEngine {
    lookup: Arc<DeprivationLookup>,
}

impl TriageEngine {
    pub fn new(lookup: Arc<DeprivationLookup>) -> Self {
        Self { lookup }
    }

    pub fn lookup(&self) -> &DeprivationLookup {
        &self.lookup
    }

    pub fn evaluate(&self, input: &HouseholdInput) -> EligibilityResult {
        evaluate(input, &self.lookup)
    }

    /// Evaluates a captured form and returns the result alongside its audit snapshot.
    pub fn assess(&self, form: &IntakeForm) -> Assessment {
        let snapshot = form.snapshot();
        let result = self.evaluate(&snapshot.household);
        let summary = result.summary(&snapshot.case);

        Assessment {
            result,
            summary,
            snapshot,
        }
    }

    pub fn check_postcode(&self, postcode: &str) -> PostcodeCheck {
        self.lookup.check(postcode)
    }
}

/// Everything produced for one completed intake form.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Assessment {
    pub result: EligibilityResult,
    pub summary: String,
    pub snapshot: IntakeSnapshot,
}
