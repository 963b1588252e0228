use crate::infra::{in_memory_service, InMemoryService};
use chrono::Utc;
use clap::Args;
use convo_score::config::AppConfig;
use convo_score::conversations::{
    AnalysisRecord, BatchRunner, ConversationRepository, ConversationServiceError,
    FleetAnalytics, NewConversation,
};
use convo_score::error::AppError;
use convo_score::import::{ImportFormat, TranscriptImporter};
use convo_score::scoring::ScoringConfig;
use std::path::{Path, PathBuf};
use std::sync::Arc;
use tracing::warn;

#[derive(Args, Debug)]
pub(crate) struct AnalyzeArgs {
    /// Transcript export to analyze
    #[arg(long)]
    pub(crate) input: PathBuf,
    /// Export layout (json or csv). Guessed from the file extension when omitted.
    #[arg(long)]
    pub(crate) format: Option<ImportFormat>,
    /// Print the weighted contribution of every scoring dimension
    #[arg(long)]
    pub(crate) breakdown: bool,
    /// Emit the stored analysis records as JSON instead of the text report
    #[arg(long)]
    pub(crate) json: bool,
}

#[derive(Args, Debug)]
pub(crate) struct BatchArgs {
    /// Transcript export to analyze
    #[arg(long)]
    pub(crate) input: PathBuf,
    /// Export layout (json or csv). Guessed from the file extension when omitted.
    #[arg(long)]
    pub(crate) format: Option<ImportFormat>,
    /// Concurrent analyses; defaults to APP_BATCH_WORKERS
    #[arg(long)]
    pub(crate) workers: Option<usize>,
}

pub(crate) fn run_analyze(args: AnalyzeArgs, config: &AppConfig) -> Result<(), AppError> {
    let AnalyzeArgs {
        input,
        format,
        breakdown,
        json,
    } = args;

    let service = in_memory_service(&config.scoring)?;
    let imported = import(&input, format)?;
    let stored = store_conversations(&service, imported)?;

    let mut records = Vec::with_capacity(stored);
    for conversation in service.conversations().unanalyzed(usize::MAX)? {
        records.push(service.analyze(&conversation.id)?.record);
    }

    if json {
        match serde_json::to_string_pretty(&records) {
            Ok(payload) => println!("{payload}"),
            Err(err) => println!("Analysis payload unavailable: {}", err),
        }
        return Ok(());
    }

    println!("Conversation analysis ({} conversations)", stored);
    for record in &records {
        render_record(record, breakdown.then_some(&config.scoring));
    }
    render_analytics(service.analytics()?.as_ref());
    Ok(())
}

pub(crate) async fn run_batch(args: BatchArgs, config: &AppConfig) -> Result<(), AppError> {
    let BatchArgs {
        input,
        format,
        workers,
    } = args;

    let service = Arc::new(in_memory_service(&config.scoring)?);
    let imported = import(&input, format)?;
    store_conversations(&service, imported)?;

    let workers = workers.unwrap_or(config.batch.workers);
    let report = BatchRunner::analyze_pending(Arc::clone(&service), workers).await?;
    service.purge_expired(Utc::now(), config.batch.retention_days)?;

    println!("Batch analysis");
    println!("  Analyzed: {}", report.analyzed);
    println!("  Failed: {}", report.failed);
    render_analytics(service.analytics()?.as_ref());
    Ok(())
}

fn import(input: &Path, format: Option<ImportFormat>) -> Result<Vec<NewConversation>, AppError> {
    let format = format.unwrap_or_else(|| ImportFormat::from_path(input));
    Ok(TranscriptImporter::from_path(input, format)?)
}

/// Store imported conversations, skipping the ones without messages.
pub(crate) fn store_conversations(
    service: &InMemoryService,
    conversations: Vec<NewConversation>,
) -> Result<usize, AppError> {
    let mut stored = 0;
    for conversation in conversations {
        let title = conversation.title.clone();
        match service.create(conversation) {
            Ok(_) => stored += 1,
            Err(ConversationServiceError::NoMessages) => {
                warn!(%title, "skipping conversation without messages");
            }
            Err(err) => return Err(err.into()),
        }
    }
    Ok(stored)
}

pub(crate) fn render_record(record: &AnalysisRecord, breakdown: Option<&ScoringConfig>) {
    let result = &record.result;
    println!(
        "\n{} [{}] overall {:.1}",
        record.conversation_title, record.conversation_id, result.overall_score
    );
    println!(
        "  Clarity {:.1} | Relevance {:.1} | Accuracy {:.1} | Completeness {:.1} | Empathy {:.1}",
        result.clarity_score,
        result.relevance_score,
        result.accuracy_score,
        result.completeness_score,
        result.empathy_score
    );
    println!(
        "  Sentiment: {} ({:.3})",
        result.sentiment, result.sentiment_score
    );
    println!(
        "  Resolved: {} | Escalation needed: {} | Fallbacks: {} | Avg response: {:.1}s",
        yes_no(result.resolution),
        yes_no(result.escalation_needed),
        result.fallback_count,
        result.response_time_avg
    );

    if let Some(config) = breakdown {
        println!("  Score components:");
        for component in result.breakdown(config) {
            println!(
                "    - {:<12} value {:>5.1} x weight {:.2} = {:>5.2}",
                component.dimension, component.value, component.weight, component.contribution
            );
        }
    }
}

pub(crate) fn render_analytics(analytics: Option<&FleetAnalytics>) {
    let Some(analytics) = analytics else {
        println!("\nFleet analytics: no analyzed conversations");
        return;
    };

    println!("\nFleet analytics");
    println!("  Conversations analyzed: {}", analytics.total_conversations);
    println!("  Average overall score: {:.2}", analytics.average_overall_score);
    println!(
        "  Average sentiment score: {:.2}",
        analytics.average_sentiment_score
    );
    println!(
        "  Needing escalation: {}",
        analytics.conversations_needing_escalation
    );
    println!(
        "  Resolved: {} ({:.2}%)",
        analytics.conversations_resolved, analytics.resolution_rate
    );
}

fn yes_no(flag: bool) -> &'static str {
    if flag {
        "yes"
    } else {
        "no"
    }
}
