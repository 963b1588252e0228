use std::sync::Arc;

use serde::Serialize;
use tokio::sync::Semaphore;
use tokio::task::JoinSet;
use tracing::{debug, error, info, warn};

use super::domain::ConversationId;
use super::repository::{AnalysisRepository, ConversationRepository};
use super::service::{ConversationAnalysisService, ConversationServiceError};

/// Counts reported after a batch pass.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct BatchReport {
    pub analyzed: usize,
    pub failed: usize,
}

impl BatchReport {
    pub fn total(&self) -> usize {
        self.analyzed + self.failed
    }
}

/// Scheduled pass analyzing every conversation that has no stored result yet.
///
/// One conversation per task; a failing conversation is logged and counted, never
/// retried, and never stops the rest of the batch.
pub struct BatchRunner;

impl BatchRunner {
    pub async fn analyze_pending<C, A>(
        service: Arc<ConversationAnalysisService<C, A>>,
        workers: usize,
    ) -> Result<BatchReport, ConversationServiceError>
    where
        C: ConversationRepository + 'static,
        A: AnalysisRepository + 'static,
    {
        let pending = service.conversations().unanalyzed(usize::MAX)?;
        if pending.is_empty() {
            info!("no new conversations to analyze");
            return Ok(BatchReport::default());
        }

        let workers = workers.clamp(1, Semaphore::MAX_PERMITS);
        let permits = Arc::new(Semaphore::new(workers));
        info!(count = pending.len(), workers, "starting conversation analysis batch");
        let mut tasks: JoinSet<(ConversationId, Result<(), ConversationServiceError>)> =
            JoinSet::new();

        for conversation in pending {
            let service = Arc::clone(&service);
            let permits = Arc::clone(&permits);
            let id = conversation.id;

            tasks.spawn(async move {
                let Ok(_permit) = permits.acquire_owned().await else {
                    let closed = ConversationServiceError::Aborted("worker pool closed".to_string());
                    return (id, Err(closed));
                };
                let task_id = id.clone();
                let outcome = tokio::task::spawn_blocking(move || {
                    service.analyze(&task_id).map(|_| ())
                })
                .await;

                match outcome {
                    Ok(result) => (id, result),
                    Err(join_error) => {
                        error!(conversation = %id, %join_error, "analysis task aborted");
                        (
                            id,
                            Err(ConversationServiceError::Aborted(join_error.to_string())),
                        )
                    }
                }
            });
        }

        let mut report = BatchReport::default();
        while let Some(joined) = tasks.join_next().await {
            match joined {
                Ok((id, Ok(()))) => {
                    report.analyzed += 1;
                    debug!(conversation = %id, "analyzed conversation");
                }
                Ok((id, Err(err))) => {
                    report.failed += 1;
                    warn!(conversation = %id, error = %err, "failed to analyze conversation");
                }
                Err(join_error) => {
                    report.failed += 1;
                    error!(%join_error, "batch task panicked");
                }
            }
        }

        info!(
            analyzed = report.analyzed,
            failed = report.failed,
            "conversation analysis batch complete"
        );
        Ok(report)
    }
}
