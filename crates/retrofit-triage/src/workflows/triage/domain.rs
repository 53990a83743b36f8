use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;
use std::fmt;

/// Energy Performance Certificate band.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum EpcRating {
    A,
    B,
    C,
    D,
    E,
    F,
    G,
}

impl EpcRating {
    pub fn parse(value: &str) -> Option<Self> {
        match value.trim().to_ascii_uppercase().as_str() {
            "A" => Some(Self::A),
            "B" => Some(Self::B),
            "C" => Some(Self::C),
            "D" => Some(Self::D),
            "E" => Some(Self::E),
            "F" => Some(Self::F),
            "G" => Some(Self::G),
            _ => None,
        }
    }

    /// Bands D through G are the only ones the scheme treats as poorly performing.
    pub fn is_retrofit_band(self) -> bool {
        matches!(self, Self::D | Self::E | Self::F | Self::G)
    }
}

impl fmt::Display for EpcRating {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{self:?}")
    }
}

/// Outcome of the manual Declaration of Eligibility review, when one took place.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ManualReview {
    #[default]
    None,
    NotEligible,
    Yes,
}

impl ManualReview {
    /// Unknown values are treated as "no review recorded".
    pub fn parse(value: &str) -> Self {
        match value.trim().to_ascii_lowercase().as_str() {
            "not eligible" | "not_eligible" | "noteligible" | "nonoteligible" | "no" => {
                Self::NotEligible
            }
            "yes" | "eligible" => Self::Yes,
            _ => Self::None,
        }
    }
}

/// Hardship proxy indicator used by the flexible route, numbered 1 to 7.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(try_from = "u8", into = "u8")]
pub struct ProxyCode(u8);

impl ProxyCode {
    pub const MIN: u8 = 1;
    pub const MAX: u8 = 7;

    pub fn new(code: u8) -> Option<Self> {
        (Self::MIN..=Self::MAX).contains(&code).then_some(Self(code))
    }

    pub fn parse(value: &str) -> Option<Self> {
        value.trim().parse::<u8>().ok().and_then(Self::new)
    }

    pub fn get(self) -> u8 {
        self.0
    }
}

impl TryFrom<u8> for ProxyCode {
    type Error = String;

    fn try_from(value: u8) -> Result<Self, Self::Error> {
        Self::new(value).ok_or_else(|| format!("proxy code {value} is outside 1..=7"))
    }
}

impl From<ProxyCode> for u8 {
    fn from(value: ProxyCode) -> Self {
        value.0
    }
}

/// Typed household snapshot evaluated by the triage rules.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct HouseholdInput {
    pub postcode: String,
    pub benefits: BTreeSet<String>,
    pub proxies: BTreeSet<ProxyCode>,
    pub gross_income: f64,
    pub net_income: f64,
    pub housing_cost: f64,
    pub adults: u32,
    pub dependents: u32,
    pub vulnerabilities: BTreeSet<String>,
    pub cavity_feasible: bool,
    pub already_upgraded: bool,
    pub epc_rating: Option<EpcRating>,
    pub sap_score: u32,
    pub manual_review: ManualReview,
}

/// Financial qualification routes in precedence order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum FinancialPathway {
    #[serde(rename = "Pathway 1 – IMD")]
    Deprivation,
    #[serde(rename = "Pathway 2 – benefits")]
    MeansTestedBenefits,
    #[serde(rename = "Pathway 2 – ECO Flex Route 2")]
    FlexProxyPair,
    #[serde(rename = "Pathway 3 – income")]
    GrossIncome,
    #[serde(rename = "Pathway 3 – AHC equalisation")]
    AfterHousingCosts,
}

impl FinancialPathway {
    pub const PRECEDENCE: [FinancialPathway; 5] = [
        FinancialPathway::Deprivation,
        FinancialPathway::MeansTestedBenefits,
        FinancialPathway::FlexProxyPair,
        FinancialPathway::GrossIncome,
        FinancialPathway::AfterHousingCosts,
    ];

    pub fn label(self) -> &'static str {
        match self {
            FinancialPathway::Deprivation => "Pathway 1 – IMD",
            FinancialPathway::MeansTestedBenefits => "Pathway 2 – benefits",
            FinancialPathway::FlexProxyPair => "Pathway 2 – ECO Flex Route 2",
            FinancialPathway::GrossIncome => "Pathway 3 – income",
            FinancialPathway::AfterHousingCosts => "Pathway 3 – AHC equalisation",
        }
    }
}

/// Final priority tier.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Outcome {
    NotEligible,
    Year1Priority1,
    Year1Priority2,
    Year1Priority3,
    Year2,
    ReferToDE,
}

impl Outcome {
    pub fn label(self) -> &'static str {
        match self {
            Outcome::NotEligible => "Not eligible",
            Outcome::Year1Priority1 => "Year 1 Priority 1",
            Outcome::Year1Priority2 => "Year 1 Priority 2",
            Outcome::Year1Priority3 => "Year 1 Priority 3",
            Outcome::Year2 => "Year 2",
            Outcome::ReferToDE => "Refer to DE",
        }
    }

    /// Outcomes that open the supporting-documents and measures sections.
    pub fn requires_supporting_sections(self) -> bool {
        matches!(self, Outcome::Year1Priority1 | Outcome::Year1Priority2)
    }
}

/// Advisory flags for the intake surface; they never change the outcome.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Advisories {
    pub borderline_review_required: bool,
    pub supporting_sections_required: bool,
}

/// Decision for one household.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EligibilityResult {
    pub outcome: Outcome,
    pub pathway: Option<FinancialPathway>,
    pub possible_pathways: BTreeSet<FinancialPathway>,
    pub rejection_reason: Option<super::RejectionReason>,
    pub property_eligible: bool,
    pub financial_eligible: bool,
    pub advisories: Advisories,
}

impl EligibilityResult {
    pub fn pathway_label(&self) -> &'static str {
        self.pathway.map(FinancialPathway::label).unwrap_or("")
    }

    pub fn possible_pathway_labels(&self) -> Vec<&'static str> {
        self.possible_pathways
            .iter()
            .map(|pathway| pathway.label())
            .collect()
    }

    /// Plain-text summary shown to the call handler.
    pub fn summary(&self, case: &CaseDetails) -> String {
        let docs_by = case
            .docs_by
            .map(|date| date.format("%Y-%m-%d").to_string())
            .unwrap_or_else(|| "N/A".to_string());

        let mut summary = format!(
            "Outcome: {}\nFinancial pathway: {}\nTenure: {}\nDocs by: {}",
            self.outcome.label(),
            self.pathway_label(),
            case.tenure,
            docs_by
        );
        if let Some(reason) = &self.rejection_reason {
            summary.push_str(&format!("\nReason: {}", reason.summary()));
        }
        summary
    }
}

/// Case metadata echoed in the summary but never evaluated.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct CaseDetails {
    pub tenure: String,
    pub docs_by: Option<NaiveDate>,
}
