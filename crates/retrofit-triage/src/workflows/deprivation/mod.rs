//! Postcode reference data: the deprivation-eligible list and per-postcode deciles.
//!
//! Loading happens once, before any evaluation. The resulting [`DeprivationLookup`]
//! is read-only and every query goes through [`normalize_postcode`].

mod normalizer;
mod parser;

pub use normalizer::normalize_postcode;
pub use parser::DeprivationRecord;

use parser::{DeprivationRow, ParsedRows};

use serde::{Deserialize, Serialize};
use std::collections::{HashMap, HashSet};
use std::fs::File;
use std::io::Read;
use std::path::{Path, PathBuf};
use tracing::info;

#[derive(Debug, thiserror::Error)]
pub enum LookupLoadError {
    #[error("failed to read reference data {}: {source}", .path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("failed to parse reference data {}: {detail}", .path.display())]
    Parse { path: PathBuf, detail: String },
    #[error("failed to read reference data: {0}")]
    Csv(#[from] csv::Error),
}

/// Row counts gathered while loading, for startup logging.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct LoadReport {
    pub eligible_postcodes: usize,
    pub deprivation_records: usize,
    pub skipped_rows: usize,
}

/// Immutable postcode lookup consulted by the financial evaluator.
#[derive(Debug, Clone, Default)]
pub struct DeprivationLookup {
    eligible: HashSet<String>,
    records: HashMap<String, DeprivationRecord>,
}

impl DeprivationLookup {
    pub fn empty() -> Self {
        Self::default()
    }

    /// Builds a lookup whose eligible set is exactly `postcodes`, normalized.
    pub fn with_eligible_postcodes<I, S>(postcodes: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let eligible = postcodes
            .into_iter()
            .map(|postcode| normalize_postcode(postcode.as_ref()))
            .filter(|postcode| !postcode.is_empty())
            .collect();

        Self {
            eligible,
            records: HashMap::new(),
        }
    }

    pub fn with_record(mut self, postcode: &str, record: DeprivationRecord) -> Self {
        self.records.insert(normalize_postcode(postcode), record);
        self
    }

    /// Loads whichever datasets are configured; a missing path contributes nothing.
    pub fn load(
        eligible_path: Option<&Path>,
        table_path: Option<&Path>,
    ) -> Result<(Self, LoadReport), LookupLoadError> {
        let eligible = match eligible_path {
            Some(path) => {
                parser::parse_eligible_list(open(path)?).map_err(|err| at_path(path, err))?
            }
            None => ParsedRows::default(),
        };
        let table = match table_path {
            Some(path) => {
                parser::parse_deprivation_table(open(path)?).map_err(|err| at_path(path, err))?
            }
            None => ParsedRows::default(),
        };

        Ok(Self::assemble(eligible, table))
    }

    pub fn from_readers<E: Read, T: Read>(
        eligible: E,
        table: T,
    ) -> Result<(Self, LoadReport), LookupLoadError> {
        let eligible = parser::parse_eligible_list(eligible)?;
        let table = parser::parse_deprivation_table(table)?;
        Ok(Self::assemble(eligible, table))
    }

    fn assemble(
        eligible_rows: ParsedRows<String>,
        table_rows: ParsedRows<DeprivationRow>,
    ) -> (Self, LoadReport) {
        let eligible: HashSet<String> = eligible_rows.rows.into_iter().collect();
        let records: HashMap<String, DeprivationRecord> = table_rows
            .rows
            .into_iter()
            .map(|row| (row.postcode, row.record))
            .collect();

        let report = LoadReport {
            eligible_postcodes: eligible.len(),
            deprivation_records: records.len(),
            skipped_rows: eligible_rows.skipped + table_rows.skipped,
        };
        info!(
            eligible = report.eligible_postcodes,
            records = report.deprivation_records,
            skipped = report.skipped_rows,
            "deprivation lookup loaded"
        );

        (Self { eligible, records }, report)
    }

    pub fn is_eligible(&self, postcode: &str) -> bool {
        self.eligible.contains(&normalize_postcode(postcode))
    }

    pub fn record(&self, postcode: &str) -> Option<&DeprivationRecord> {
        self.records.get(&normalize_postcode(postcode))
    }

    pub fn check(&self, postcode: &str) -> PostcodeCheck {
        let normalized = normalize_postcode(postcode);
        PostcodeCheck {
            postcode: postcode.to_string(),
            imd_eligible: self.eligible.contains(&normalized),
            deprivation: self.records.get(&normalized).copied(),
            normalized,
        }
    }

    pub fn eligible_len(&self) -> usize {
        self.eligible.len()
    }

    pub fn records_len(&self) -> usize {
        self.records.len()
    }
}

/// Live postcode flag shown while the postcode is being typed.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PostcodeCheck {
    pub postcode: String,
    pub normalized: String,
    pub imd_eligible: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub deprivation: Option<DeprivationRecord>,
}

impl PostcodeCheck {
    pub fn flag_label(&self) -> &'static str {
        if self.imd_eligible {
            "Yes"
        } else {
            "No"
        }
    }
}

fn open(path: &Path) -> Result<File, LookupLoadError> {
    File::open(path).map_err(|source| LookupLoadError::Io {
        path: path.to_path_buf(),
        source,
    })
}

fn at_path(path: &Path, err: csv::Error) -> LookupLoadError {
    let path = path.to_path_buf();
    match err.into_kind() {
        csv::ErrorKind::Io(source) => LookupLoadError::Io { path, source },
        kind => LookupLoadError::Parse {
            path,
            detail: format!("{kind:?}"),
        },
    }
}
