pub mod deprivation;
pub mod triage;
