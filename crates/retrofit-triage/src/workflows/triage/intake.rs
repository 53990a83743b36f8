//! Lenient intake form as captured by the call handler, and its coercion into the
//! typed [`HouseholdInput`]. Formatting problems never fail: numbers that cannot be
//! read become zero and unknown codes are dropped.

use super::domain::{CaseDetails, EpcRating, HouseholdInput, ManualReview, ProxyCode};
use chrono::NaiveDate;
use serde::{Deserialize, Deserializer, Serialize};
use std::collections::BTreeSet;

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct IntakeForm {
    #[serde(deserialize_with = "lenient_text")]
    pub postcode: String,
    #[serde(deserialize_with = "lenient_codes")]
    pub benefits: Vec<String>,
    #[serde(deserialize_with = "lenient_codes")]
    pub proxies: Vec<String>,
    #[serde(deserialize_with = "lenient_text")]
    pub gross_income: String,
    #[serde(deserialize_with = "lenient_text")]
    pub net_income: String,
    #[serde(deserialize_with = "lenient_text")]
    pub housing_cost: String,
    #[serde(deserialize_with = "lenient_text")]
    pub adults: String,
    #[serde(deserialize_with = "lenient_text")]
    pub dependents: String,
    #[serde(deserialize_with = "lenient_codes")]
    pub vulnerabilities: Vec<String>,
    #[serde(deserialize_with = "lenient_flag")]
    pub cavity_feasible: bool,
    #[serde(deserialize_with = "lenient_flag")]
    pub already_upgraded: bool,
    #[serde(deserialize_with = "lenient_text")]
    pub epc_rating: String,
    #[serde(deserialize_with = "lenient_text")]
    pub sap_score: String,
    #[serde(deserialize_with = "lenient_text")]
    pub manual_review: String,
    #[serde(deserialize_with = "lenient_text")]
    pub tenure: String,
    #[serde(deserialize_with = "lenient_text")]
    pub docs_by: String,
    #[serde(deserialize_with = "lenient_consent")]
    pub consent: ConsentFlags,
    #[serde(deserialize_with = "lenient_text")]
    pub call_time: String,
    #[serde(deserialize_with = "lenient_text")]
    pub attempt: String,
    #[serde(deserialize_with = "lenient_codes")]
    pub documents: Vec<String>,
    #[serde(deserialize_with = "lenient_codes")]
    pub measures: Vec<String>,
}

/// Consents recorded at the start of the call.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ConsentFlags {
    #[serde(deserialize_with = "lenient_flag")]
    pub general: bool,
    #[serde(deserialize_with = "lenient_flag")]
    pub health: bool,
    #[serde(deserialize_with = "lenient_flag")]
    pub share: bool,
}

/// When the applicant was called and which attempt this was.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ContactLog {
    pub call_time: String,
    pub attempt: String,
}

/// Audit record of everything captured on the form.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct IntakeSnapshot {
    pub consent: ConsentFlags,
    pub contact: ContactLog,
    pub case: CaseDetails,
    pub household: HouseholdInput,
    pub documents: BTreeSet<String>,
    pub measures: BTreeSet<String>,
}

impl IntakeForm {
    pub fn household(&self) -> HouseholdInput {
        HouseholdInput {
            postcode: self.postcode.trim().to_string(),
            benefits: code_set(&self.benefits),
            proxies: self
                .proxies
                .iter()
                .filter_map(|code| ProxyCode::parse(code))
                .collect(),
            gross_income: parse_amount(&self.gross_income),
            net_income: parse_amount(&self.net_income),
            housing_cost: parse_amount(&self.housing_cost),
            adults: parse_count(&self.adults),
            dependents: parse_count(&self.dependents),
            vulnerabilities: code_set(&self.vulnerabilities),
            cavity_feasible: self.cavity_feasible,
            already_upgraded: self.already_upgraded,
            epc_rating: EpcRating::parse(&self.epc_rating),
            sap_score: parse_count(&self.sap_score),
            manual_review: ManualReview::parse(&self.manual_review),
        }
    }

    pub fn case_details(&self) -> CaseDetails {
        CaseDetails {
            tenure: self.tenure.trim().to_string(),
            docs_by: NaiveDate::parse_from_str(self.docs_by.trim(), "%Y-%m-%d").ok(),
        }
    }

    pub fn snapshot(&self) -> IntakeSnapshot {
        IntakeSnapshot {
            consent: self.consent,
            contact: ContactLog {
                call_time: self.call_time.trim().to_string(),
                attempt: self.attempt.trim().to_string(),
            },
            case: self.case_details(),
            household: self.household(),
            documents: code_set(&self.documents),
            measures: code_set(&self.measures),
        }
    }
}

fn code_set(values: &[String]) -> BTreeSet<String> {
    values
        .iter()
        .map(|value| value.trim())
        .filter(|value| !value.is_empty())
        .map(str::to_string)
        .collect()
}

/// Monetary amount; blank, garbage, non-finite or negative input reads as zero.
pub(crate) fn parse_amount(value: &str) -> f64 {
    match value.trim().replace(',', "").parse::<f64>() {
        Ok(amount) if amount.is_finite() && amount > 0.0 => amount,
        _ => 0.0,
    }
}

/// Whole count; decimals truncate, anything unreadable reads as zero.
pub(crate) fn parse_count(value: &str) -> u32 {
    let trimmed = value.trim();
    if let Ok(count) = trimmed.parse::<u32>() {
        return count;
    }

    match trimmed.parse::<f64>() {
        Ok(count) if count.is_finite() && count >= 0.0 && count <= u32::MAX as f64 => {
            count as u32
        }
        _ => 0,
    }
}

/// Accepts a JSON string, number, or null and keeps the raw text.
fn lenient_text<'de, D>(deserializer: D) -> Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Option::<serde_json::Value>::deserialize(deserializer)?;
    Ok(match value {
        Some(serde_json::Value::String(text)) => text,
        Some(serde_json::Value::Number(number)) => number.to_string(),
        Some(serde_json::Value::Bool(flag)) => flag.to_string(),
        _ => String::new(),
    })
}

/// Accepts a list of strings or numbers, a single scalar, or null. Other elements are skipped.
fn lenient_codes<'de, D>(deserializer: D) -> Result<Vec<String>, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Option::<serde_json::Value>::deserialize(deserializer)?;
    Ok(match value {
        Some(serde_json::Value::Array(items)) => items.into_iter().filter_map(scalar_text).collect(),
        Some(other) => scalar_text(other).into_iter().collect(),
        None => Vec::new(),
    })
}

fn scalar_text(value: serde_json::Value) -> Option<String> {
    match value {
        serde_json::Value::String(text) => Some(text),
        serde_json::Value::Number(number) => Some(number.to_string()),
        _ => None,
    }
}

/// Checkbox value; `true`, `"on"`, `"yes"`, `"1"` and non-zero numbers are ticked.
fn lenient_flag<'de, D>(deserializer: D) -> Result<bool, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Option::<serde_json::Value>::deserialize(deserializer)?;
    Ok(match value {
        Some(serde_json::Value::Bool(flag)) => flag,
        Some(serde_json::Value::String(text)) => matches!(
            text.trim().to_ascii_lowercase().as_str(),
            "true" | "on" | "yes" | "y" | "1" | "checked"
        ),
        Some(serde_json::Value::Number(number)) => number.as_f64().is_some_and(|n| n != 0.0),
        _ => false,
    })
}

/// Consent block; anything other than an object reads as no consent given.
fn lenient_consent<'de, D>(deserializer: D) -> Result<ConsentFlags, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Option::<serde_json::Value>::deserialize(deserializer)?;
    Ok(match value {
        Some(object @ serde_json::Value::Object(_)) => {
            serde_json::from_value(object).unwrap_or_default()
        }
        _ => ConsentFlags::default(),
    })
}
