use clap::{Args, Parser, Subcommand};
use std::path::PathBuf;
use visabuddy::error::AppError;

use crate::demo::{run_demo, run_preview, DemoArgs};
use crate::server;

#[derive(Parser, Debug)]
#[command(
    name = "VisaBuddy Assessment Service",
    about = "Run the applicant context and risk scoring engine from the command line",
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
    /// Assess a questionnaire payload from a JSON file and print the context
    Preview(PreviewArgs),
    /// Run the canned demo applicants through the engine
    Demo(DemoArgs),
}

#[derive(Args, Debug, Default)]
pub(crate) struct ServeArgs {
    /// Override the configured host for the HTTP server
    #[arg(long)]
    pub(crate) host: Option<String>,
    /// Override the configured port for the HTTP server
    #[arg(long)]
    pub(crate) port: Option<u16>,
}

#[derive(Args, Debug)]
pub(crate) struct PreviewArgs {
    /// Path to a raw questionnaire payload (any of the three known shapes)
    #[arg(long)]
    pub(crate) payload: Option<PathBuf>,
    /// Destination country recorded on the application
    #[arg(long, default_value = "US")]
    pub(crate) country: String,
    /// Applicant's app language
    #[arg(long, default_value = "en")]
    pub(crate) language: String,
    /// Override the assessment date (defaults to today)
    #[arg(long, value_parser = crate::infra::parse_date)]
    pub(crate) today: Option<chrono::NaiveDate>,
}

pub(crate) async fn run() -> Result<(), AppError> {
    let cli = Cli::parse();
    let command = cli
        .command
        .unwrap_or_else(|| Command::Serve(ServeArgs::default()));

    match command {
        Command::Serve(args) => server::run(args).await,
        Command::Preview(args) => run_preview(args),
        Command::Demo(args) => run_demo(args),
    }
}
