mod cli;
mod demo;
mod infra;
mod report;

use convo_score::error::AppError;

pub async fn run() -> Result<(), AppError> {
    cli::run().await
}
