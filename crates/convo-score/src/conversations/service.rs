use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;

use chrono::{DateTime, Duration, Utc};
use tracing::{debug, info};

use super::analytics::FleetAnalytics;
use super::domain::{Conversation, ConversationId, NewConversation};
use super::repository::{
    AnalysisFilter, AnalysisRecord, AnalysisRepository, ConversationRepository, RepositoryError,
    UpsertOutcome,
};
use crate::scoring::{AnalysisError, ScoringEngine};

static CONVERSATION_SEQUENCE: AtomicU64 = AtomicU64::new(1);

fn next_conversation_id() -> ConversationId {
    let id = CONVERSATION_SEQUENCE.fetch_add(1, Ordering::Relaxed);
    ConversationId(format!("conv-{id:06}"))
}

/// Result of an on-demand analysis.
#[derive(Debug, Clone)]
pub struct AnalysisOutcome {
    pub record: AnalysisRecord,
    pub created: bool,
}

/// Service composing conversation storage, analysis storage and the scoring engine.
pub struct ConversationAnalysisService<C, A> {
    conversations: Arc<C>,
    analyses: Arc<A>,
    engine: Arc<ScoringEngine>,
}

impl<C, A> ConversationAnalysisService<C, A>
where
    C: ConversationRepository + 'static,
    A: AnalysisRepository + 'static,
{
    pub fn new(conversations: Arc<C>, analyses: Arc<A>, engine: ScoringEngine) -> Self {
        Self {
            conversations,
            analyses,
            engine: Arc::new(engine),
        }
    }

    pub fn engine(&self) -> &ScoringEngine {
        &self.engine
    }

    pub fn conversations(&self) -> &C {
        &self.conversations
    }

    /// Store a conversation with its messages in submission order.
    pub fn create(
        &self,
        new: NewConversation,
    ) -> Result<Conversation, ConversationServiceError> {
        if new.messages.is_empty() {
            return Err(ConversationServiceError::NoMessages);
        }

        let conversation = Conversation::from_new(next_conversation_id(), new, Utc::now());
        let stored = self.conversations.insert(conversation)?;
        debug!(
            conversation = %stored.id,
            messages = stored.message_count(),
            "conversation stored"
        );
        Ok(stored)
    }

    /// Score a conversation, replacing any earlier analysis.
    pub fn analyze(
        &self,
        id: &ConversationId,
    ) -> Result<AnalysisOutcome, ConversationServiceError> {
        let conversation = self
            .conversations
            .fetch(id)?
            .ok_or(RepositoryError::NotFound)?;

        let result = self.engine.analyze(&conversation.transcript())?;
        let now = Utc::now();
        let record = AnalysisRecord {
            conversation_id: conversation.id.clone(),
            conversation_title: conversation.title.clone(),
            result,
            created_at: now,
            updated_at: now,
        };

        let outcome = self.analyses.upsert(record)?;
        self.conversations.mark_analyzed(&conversation.id)?;

        let record = self
            .analyses
            .fetch(&conversation.id)?
            .ok_or(RepositoryError::NotFound)?;

        debug!(
            conversation = %conversation.id,
            overall = record.result.overall_score,
            ?outcome,
            "conversation analyzed"
        );

        Ok(AnalysisOutcome {
            record,
            created: outcome == UpsertOutcome::Created,
        })
    }

    pub fn analysis(&self, id: &ConversationId) -> Result<AnalysisRecord, ConversationServiceError> {
        let record = self
            .analyses
            .fetch(id)?
            .ok_or(RepositoryError::NotFound)?;
        Ok(record)
    }

    pub fn analyses(
        &self,
        filter: &AnalysisFilter,
    ) -> Result<Vec<AnalysisRecord>, ConversationServiceError> {
        Ok(self.analyses.list(filter)?)
    }

    /// Fleet-wide aggregate, `None` until something has been analyzed.
    pub fn analytics(&self) -> Result<Option<FleetAnalytics>, ConversationServiceError> {
        let records = self.analyses.list(&AnalysisFilter::default())?;
        Ok(FleetAnalytics::from_records(&records))
    }

    /// Drop analyses older than the retention window.
    pub fn purge_expired(
        &self,
        now: DateTime<Utc>,
        retention_days: u32,
    ) -> Result<usize, ConversationServiceError> {
        let Some(cutoff) = Duration::try_days(i64::from(retention_days))
            .and_then(|window| now.checked_sub_signed(window))
        else {
            debug!(
                retention_days,
                "retention window exceeds representable time, nothing to purge"
            );
            return Ok(0);
        };
        let removed = self.analyses.purge_older_than(cutoff)?;
        info!(removed, %cutoff, "purged expired analyses");
        Ok(removed)
    }
}

/// Error raised by the conversation analysis service.
#[derive(Debug, thiserror::Error)]
pub enum ConversationServiceError {
    #[error("conversation has no messages")]
    NoMessages,
    #[error(transparent)]
    Analysis(#[from] AnalysisError),
    #[error(transparent)]
    Repository(#[from] RepositoryError),
    #[error("analysis task aborted: {0}")]
    Aborted(String),
}
