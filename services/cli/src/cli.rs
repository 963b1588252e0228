use crate::demo::{run_demo, DemoArgs};
use crate::report::{run_analyze, run_batch, AnalyzeArgs, BatchArgs};
use clap::{Parser, Subcommand};
use convo_score::config::AppConfig;
use convo_score::error::AppError;
use convo_score::telemetry;
use tracing::debug;

#[derive(Parser, Debug)]
#[command(
    name = "convo-score",
    about = "Score the quality of AI support conversations from the command line",
    version
)]
struct Cli {
    #[command(subcommand)]
    command: Option<Command>,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Analyze every conversation in an export and print its metrics
    Analyze(AnalyzeArgs),
    /// Import an export and score it with the concurrent batch runner
    Batch(BatchArgs),
    /// Score the built-in sample conversations (default command)
    Demo(DemoArgs),
}

pub(crate) async fn run() -> Result<(), AppError> {
    let cli = Cli::parse();
    let config = AppConfig::load()?;
    telemetry::init(&config.telemetry)?;
    debug!(environment = ?config.environment, "configuration loaded");

    let command = cli
        .command
        .unwrap_or_else(|| Command::Demo(DemoArgs::default()));

    match command {
        Command::Analyze(args) => run_analyze(args, &config),
        Command::Batch(args) => run_batch(args, &config).await,
        Command::Demo(args) => run_demo(args, &config),
    }
}
