use crate::cli::DataArgs;
use crate::infra::{load_lookup, merge_data_paths};
use clap::Args;
use retrofit_triage::config::AppConfig;
use retrofit_triage::error::AppError;
use retrofit_triage::telemetry;
use retrofit_triage::workflows::deprivation::PostcodeCheck;
use retrofit_triage::workflows::triage::{Assessment, IntakeForm, TriageEngine};
use std::path::PathBuf;
use std::sync::Arc;

#[derive(Args, Debug)]
pub(crate) struct AssessArgs {
    /// Intake form JSON file
    #[arg(long)]
    pub(crate) input: PathBuf,
    /// Also print the audit snapshot of the captured form
    #[arg(long)]
    pub(crate) snapshot: bool,
    /// Print the full assessment as JSON instead of the text summary
    #[arg(long)]
    pub(crate) json: bool,
    #[command(flatten)]
    pub(crate) data: DataArgs,
}

#[derive(Args, Debug)]
pub(crate) struct PostcodeArgs {
    /// Postcode to check (spacing and case are ignored)
    pub(crate) postcode: String,
    #[command(flatten)]
    pub(crate) data: DataArgs,
}

fn engine_from(data: DataArgs) -> Result<TriageEngine, AppError> {
    let config = AppConfig::load()?;
    telemetry::init(&config.telemetry)?;

    let data = merge_data_paths(config.data, data);
    let lookup = load_lookup(&data)?;
    Ok(TriageEngine::new(Arc::new(lookup)))
}

pub(crate) fn run_assess(args: AssessArgs) -> Result<(), AppError> {
    let AssessArgs {
        input,
        snapshot,
        json,
        data,
    } = args;

    let raw = std::fs::read_to_string(input)?;
    let form: IntakeForm = serde_json::from_str(&raw)?;
    let engine = engine_from(data)?;
    let assessment = engine.assess(&form);

    if json {
        println!("{}", serde_json::to_string_pretty(&assessment)?);
    } else {
        render_assessment(&assessment, snapshot)?;
    }

    Ok(())
}

pub(crate) fn run_postcode(args: PostcodeArgs) -> Result<(), AppError> {
    let engine = engine_from(args.data)?;
    render_postcode(&engine.check_postcode(&args.postcode));
    Ok(())
}

fn render_assessment(assessment: &Assessment, include_snapshot: bool) -> Result<(), AppError> {
    let result = &assessment.result;
    println!("{}", assessment.summary);

    let possible = result.possible_pathway_labels();
    if !possible.is_empty() {
        println!("Possible pathways: {}", possible.join(", "));
    }
    if result.advisories.borderline_review_required {
        println!("Borderline SAP on an upgraded home: DE review required before finalising");
    }
    if result.advisories.supporting_sections_required {
        println!("Collect supporting documents and select measures");
    }

    if include_snapshot {
        println!("\nCaptured form:");
        println!("{}", serde_json::to_string_pretty(&assessment.snapshot)?);
    }

    Ok(())
}

fn render_postcode(check: &PostcodeCheck) {
    println!("Postcode: {} ({})", check.postcode, check.normalized);
    println!("IMD eligibility: {}", check.flag_label());
    match check.deprivation {
        Some(record) => println!(
            "IMD decile: {} | income decile: {}",
            record.imd_decile, record.income_decile
        ),
        None => println!("No deprivation record for this postcode"),
    }
}
