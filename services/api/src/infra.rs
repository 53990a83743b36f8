use crate::cli::DataArgs;
use metrics_exporter_prometheus::PrometheusHandle;
use retrofit_triage::config::DataConfig;
use retrofit_triage::error::AppError;
use retrofit_triage::workflows::deprivation::DeprivationLookup;
use std::sync::atomic::AtomicBool;
use std::sync::Arc;
use tracing::warn;

#[derive(Clone)]
pub(crate) struct AppState {
    pub(crate) readiness: Arc<AtomicBool>,
    pub(crate) metrics: Arc<PrometheusHandle>,
}

/// Command-line paths win over configured ones.
pub(crate) fn merge_data_paths(mut config: DataConfig, args: DataArgs) -> DataConfig {
    if let Some(path) = args.eligible_postcodes {
        config.eligible_postcodes = Some(path);
    }
    if let Some(path) = args.deprivation_table {
        config.deprivation_table = Some(path);
    }
    config
}

/// Completes the preload phase; evaluation must not start before this returns.
pub(crate) fn load_lookup(data: &DataConfig) -> Result<DeprivationLookup, AppError> {
    if data.eligible_postcodes.is_none() {
        warn!("no eligible postcode list configured; the IMD pathway will never match");
    }

    let (lookup, _report) = DeprivationLookup::load(
        data.eligible_postcodes.as_deref(),
        data.deprivation_table.as_deref(),
    )?;
    Ok(lookup)
}
