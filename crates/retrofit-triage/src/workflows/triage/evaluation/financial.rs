use super::super::domain::{FinancialPathway, HouseholdInput};
use super::income::qualifies_after_housing_costs;
use super::proxy::proxies_form_qualifying_pair;
use crate::workflows::deprivation::DeprivationLookup;
use std::collections::BTreeSet;

const GROSS_INCOME_CEILING: f64 = 36_000.0;

/// Chosen route plus every route the household independently satisfies.
#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) struct FinancialAssessment {
    pub(crate) pathway: Option<FinancialPathway>,
    pub(crate) possible: BTreeSet<FinancialPathway>,
}

impl FinancialAssessment {
    pub(crate) fn eligible(&self) -> bool {
        self.pathway.is_some()
    }
}

pub(crate) fn assess_financial(
    input: &HouseholdInput,
    lookup: &DeprivationLookup,
) -> FinancialAssessment {
    let possible: BTreeSet<FinancialPathway> = FinancialPathway::PRECEDENCE
        .into_iter()
        .filter(|pathway| pathway_satisfied(*pathway, input, lookup))
        .collect();

    // PRECEDENCE order matches the enum's Ord, so the first member wins.
    let pathway = possible.iter().next().copied();

    FinancialAssessment { pathway, possible }
}

pub(crate) fn pathway_satisfied(
    pathway: FinancialPathway,
    input: &HouseholdInput,
    lookup: &DeprivationLookup,
) -> bool {
    match pathway {
        FinancialPathway::Deprivation => lookup.is_eligible(&input.postcode),
        FinancialPathway::MeansTestedBenefits => !input.benefits.is_empty(),
        FinancialPathway::FlexProxyPair => proxies_form_qualifying_pair(&input.proxies),
        FinancialPathway::GrossIncome => {
            input.gross_income > 0.0 && input.gross_income <= GROSS_INCOME_CEILING
        }
        FinancialPathway::AfterHousingCosts => qualifies_after_housing_costs(
            input.net_income,
            input.housing_cost,
            input.adults,
            input.dependents,
        ),
    }
}
