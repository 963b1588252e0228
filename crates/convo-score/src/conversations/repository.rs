use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::domain::{Conversation, ConversationId};
use crate::scoring::{AnalysisResult, SentimentLabel};

/// Stored analysis for one conversation. At most one exists per conversation.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AnalysisRecord {
    pub conversation_id: ConversationId,
    pub conversation_title: String,
    #[serde(flatten)]
    pub result: AnalysisResult,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Whether an upsert created a record or replaced one.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum UpsertOutcome {
    Created,
    Updated,
}

/// Optional filters applied when listing analyses.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct AnalysisFilter {
    pub sentiment: Option<SentimentLabel>,
    pub escalation_needed: Option<bool>,
    pub resolution: Option<bool>,
}

impl AnalysisFilter {
    pub fn matches(&self, record: &AnalysisRecord) -> bool {
        let result = &record.result;
        self.sentiment.map_or(true, |label| result.sentiment == label)
            && self
                .escalation_needed
                .map_or(true, |flag| result.escalation_needed == flag)
            && self.resolution.map_or(true, |flag| result.resolution == flag)
    }
}

/// Conversation storage so the service can be exercised in isolation.
pub trait ConversationRepository: Send + Sync {
    fn insert(&self, conversation: Conversation) -> Result<Conversation, RepositoryError>;
    fn fetch(&self, id: &ConversationId) -> Result<Option<Conversation>, RepositoryError>;
    /// Conversations without a stored analysis, oldest first.
    fn unanalyzed(&self, limit: usize) -> Result<Vec<Conversation>, RepositoryError>;
    fn mark_analyzed(&self, id: &ConversationId) -> Result<(), RepositoryError>;
}

/// Analysis storage with upsert semantics: re-analysis replaces the prior record.
pub trait AnalysisRepository: Send + Sync {
    fn upsert(&self, record: AnalysisRecord) -> Result<UpsertOutcome, RepositoryError>;
    fn fetch(&self, id: &ConversationId) -> Result<Option<AnalysisRecord>, RepositoryError>;
    fn list(&self, filter: &AnalysisFilter) -> Result<Vec<AnalysisRecord>, RepositoryError>;
    /// Remove analyses created before `cutoff`, returning how many were dropped.
    fn purge_older_than(&self, cutoff: DateTime<Utc>) -> Result<usize, RepositoryError>;
}

/// Error enumeration for repository failures.
#[derive(Debug, thiserror::Error)]
pub enum RepositoryError {
    #[error("record already exists")]
    Conflict,
    #[error("record not found")]
    NotFound,
    #[error("repository unavailable: {0}")]
    Unavailable(String),
}
