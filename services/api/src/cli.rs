use crate::assess::{run_assess, run_postcode, AssessArgs, PostcodeArgs};
use crate::server;
use clap::{Args, Parser, Subcommand};
use retrofit_triage::error::AppError;
use std::path::PathBuf;

#[derive(Parser, Debug)]
#[command(
    name = "Retrofit Triage",
    about = "Assess retrofit assistance eligibility from the command line or over HTTP",
    version
)]
struct Cli {
    #[command(subcommand)]
    command: Option<Command>,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Start the HTTP service (default command)
    Serve(ServeArgs),
    /// Evaluate a captured intake form (JSON) and print the outcome
    Assess(AssessArgs),
    /// Show whether a postcode is on the deprivation-eligible list
    Postcode(PostcodeArgs),
}

#[derive(Args, Debug, Default)]
pub(crate) struct ServeArgs {
    /// Override the configured host for the HTTP server
    #[arg(long)]
    pub(crate) host: Option<String>,
    /// Override the configured port for the HTTP server
    #[arg(long)]
    pub(crate) port: Option<u16>,
    #[command(flatten)]
    pub(crate) data: DataArgs,
}

/// Reference dataset overrides shared by every command.
#[derive(Args, Debug, Default, Clone)]
pub(crate) struct DataArgs {
    /// Eligible postcode list (one postcode per line, header first)
    #[arg(long)]
    pub(crate) eligible_postcodes: Option<PathBuf>,
    /// Deprivation table CSV (postcode,imdDecile,incomeDecile)
    #[arg(long)]
    pub(crate) deprivation_table: Option<PathBuf>,
}

pub(crate) async fn run() -> Result<(), AppError> {
    let cli = Cli::parse();
    let command = cli
        .command
        .unwrap_or_else(|| Command::Serve(ServeArgs::default()));

    match command {
        Command::Serve(args) => server::run(args).await,
        Command::Assess(args) => run_assess(args),
        Command::Postcode(args) => run_postcode(args),
    }
}
