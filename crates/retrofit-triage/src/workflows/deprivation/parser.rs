use super::normalizer::normalize_postcode;
use serde::{Deserialize, Serialize};
use std::collections::HashSet;
use std::io::Read;
use tracing::warn;

/// Deciles published for a single postcode.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct DeprivationRecord {
    pub imd_decile: u8,
    pub income_decile: u8,
}

#[derive(Debug)]
pub(crate) struct DeprivationRow {
    pub(crate) postcode: String,
    pub(crate) record: DeprivationRecord,
}

pub(crate) struct ParsedRows<T> {
    pub(crate) rows: Vec<T>,
    pub(crate) skipped: usize,
}

impl<T> Default for ParsedRows<T> {
    fn default() -> Self {
        Self {
            rows: Vec::new(),
            skipped: 0,
        }
    }
}

/// Reads the eligible list: one postcode per record, header first. Only the first
/// column is used, so quoted values and trailing commas are tolerated.
pub(crate) fn parse_eligible_list<R: Read>(
    reader: R,
) -> Result<ParsedRows<String>, csv::Error> {
    let mut csv_reader = csv::ReaderBuilder::new()
        .has_headers(true)
        .flexible(true)
        .trim(csv::Trim::All)
        .from_reader(reader);
    let mut seen = HashSet::new();
    let mut rows = Vec::new();
    let mut skipped = 0;

    for (index, record) in csv_reader.records().enumerate() {
        let record = match record {
            Ok(record) => record,
            Err(err) if err.is_io_error() => return Err(err),
            Err(err) => {
                warn!(row = index + 2, error = %err, "skipping unreadable eligible postcode row");
                skipped += 1;
                continue;
            }
        };

        let normalized = normalize_postcode(record.get(0).unwrap_or_default());
        if normalized.is_empty() {
            continue;
        }
        if seen.insert(normalized.clone()) {
            rows.push(normalized);
        }
    }

    Ok(ParsedRows { rows, skipped })
}

/// Reads `postcode,imdDecile,incomeDecile` rows, skipping any row that does not parse.
pub(crate) fn parse_deprivation_table<R: Read>(
    reader: R,
) -> Result<ParsedRows<DeprivationRow>, csv::Error> {
    let mut csv_reader = csv::ReaderBuilder::new()
        .has_headers(true)
        .flexible(true)
        .trim(csv::Trim::All)
        .from_reader(reader);
    let mut rows = Vec::new();
    let mut skipped = 0;

    for (index, record) in csv_reader.records().enumerate() {
        let record = match record {
            Ok(record) => record,
            Err(err) if err.is_io_error() => return Err(err),
            Err(err) => {
                warn!(row = index + 2, error = %err, "skipping unreadable deprivation row");
                skipped += 1;
                continue;
            }
        };

        match row_from_fields(record.get(0), record.get(1), record.get(2)) {
            Some(row) => rows.push(row),
            None => {
                warn!(row = index + 2, "skipping malformed deprivation row");
                skipped += 1;
            }
        }
    }

    Ok(ParsedRows { rows, skipped })
}

fn row_from_fields(
    postcode: Option<&str>,
    imd: Option<&str>,
    income: Option<&str>,
) -> Option<DeprivationRow> {
    let postcode = normalize_postcode(postcode?);
    if postcode.is_empty() {
        return None;
    }

    Some(DeprivationRow {
        postcode,
        record: DeprivationRecord {
            imd_decile: parse_decile(imd?)?,
            income_decile: parse_decile(income?)?,
        },
    })
}

fn parse_decile(value: &str) -> Option<u8> {
    let trimmed = value.trim().trim_matches('"');
    let decile = trimmed
        .parse::<u8>()
        .ok()
        .or_else(|| match trimmed.parse::<f64>() {
            Ok(float) if float.fract() == 0.0 => Some(float as u8),
            _ => None,
        })?;

    (1..=10).contains(&decile).then_some(decile)
}
