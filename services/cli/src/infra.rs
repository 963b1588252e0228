use chrono::{DateTime, Utc};
use convo_score::conversations::{
    AnalysisFilter, AnalysisRecord, AnalysisRepository, Conversation, ConversationAnalysisService,
    ConversationId, ConversationRepository, RepositoryError, UpsertOutcome,
};
use convo_score::config::ConfigError;
use convo_score::error::AppError;
use convo_score::scoring::{ScoringConfig, ScoringEngine};
use std::collections::BTreeMap;
use std::sync::{Arc, Mutex, MutexGuard};

pub(crate) type InMemoryService =
    ConversationAnalysisService<InMemoryConversationRepository, InMemoryAnalysisRepository>;

pub(crate) fn in_memory_service(scoring: &ScoringConfig) -> Result<InMemoryService, AppError> {
    let engine =
        ScoringEngine::with_lexicon(scoring.clone()).map_err(ConfigError::InvalidScoring)?;
    Ok(ConversationAnalysisService::new(
        Arc::new(InMemoryConversationRepository::default()),
        Arc::new(InMemoryAnalysisRepository::default()),
        engine,
    ))
}

fn lock<T>(mutex: &Mutex<T>) -> Result<MutexGuard<'_, T>, RepositoryError> {
    mutex
        .lock()
        .map_err(|_| RepositoryError::Unavailable("in-memory store poisoned".to_string()))
}

#[derive(Default, Clone)]
pub(crate) struct InMemoryConversationRepository {
    records: Arc<Mutex<BTreeMap<ConversationId, Conversation>>>,
}

impl ConversationRepository for InMemoryConversationRepository {
    fn insert(&self, conversation: Conversation) -> Result<Conversation, RepositoryError> {
        let mut guard = lock(&self.records)?;
        if guard.contains_key(&conversation.id) {
            return Err(RepositoryError::Conflict);
        }
        guard.insert(conversation.id.clone(), conversation.clone());
        Ok(conversation)
    }

    fn fetch(&self, id: &ConversationId) -> Result<Option<Conversation>, RepositoryError> {
        Ok(lock(&self.records)?.get(id).cloned())
    }

    fn unanalyzed(&self, limit: usize) -> Result<Vec<Conversation>, RepositoryError> {
        let guard = lock(&self.records)?;
        let mut pending: Vec<Conversation> = guard
            .values()
            .filter(|conversation| !conversation.is_analyzed)
            .cloned()
            .collect();
        pending.sort_by(|a, b| a.created_at.cmp(&b.created_at).then_with(|| a.id.cmp(&b.id)));
        pending.truncate(limit);
        Ok(pending)
    }

    fn mark_analyzed(&self, id: &ConversationId) -> Result<(), RepositoryError> {
        let mut guard = lock(&self.records)?;
        let conversation = guard.get_mut(id).ok_or(RepositoryError::NotFound)?;
        conversation.is_analyzed = true;
        Ok(())
    }
}

#[derive(Default, Clone)]
pub(crate) struct InMemoryAnalysisRepository {
    records: Arc<Mutex<BTreeMap<ConversationId, AnalysisRecord>>>,
}

impl AnalysisRepository for InMemoryAnalysisRepository {
    fn upsert(&self, mut record: AnalysisRecord) -> Result<UpsertOutcome, RepositoryError> {
        let mut guard = lock(&self.records)?;
        let outcome = match guard.get(&record.conversation_id) {
            Some(existing) => {
                record.created_at = existing.created_at;
                UpsertOutcome::Updated
            }
            None => UpsertOutcome::Created,
        };
        guard.insert(record.conversation_id.clone(), record);
        Ok(outcome)
    }

    fn fetch(&self, id: &ConversationId) -> Result<Option<AnalysisRecord>, RepositoryError> {
        Ok(lock(&self.records)?.get(id).cloned())
    }

    fn list(&self, filter: &AnalysisFilter) -> Result<Vec<AnalysisRecord>, RepositoryError> {
        Ok(lock(&self.records)?
            .values()
            .filter(|record| filter.matches(record))
            .cloned()
            .collect())
    }

    fn purge_older_than(&self, cutoff: DateTime<Utc>) -> Result<usize, RepositoryError> {
        let mut guard = lock(&self.records)?;
        let before = guard.len();
        guard.retain(|_, record| record.created_at >= cutoff);
        Ok(before - guard.len())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Duration;
    use convo_score::conversations::{MessageInput, NewConversation};
    use convo_score::scoring::Sender;

    fn support_chat(title: &str) -> NewConversation {
        NewConversation {
            title: title.to_string(),
            messages: vec![
                MessageInput {
                    sender: Sender::User,
                    text: "My invoice shows the wrong amount".to_string(),
                },
                MessageInput {
                    sender: Sender::Ai,
                    text: "I understand, I have corrected the invoice amount for you.".to_string(),
                },
            ],
        }
    }

    #[test]
    fn invalid_scoring_config_fails_service_build() {
        let config = ScoringConfig {
            neutral_default: -1.0,
            ..ScoringConfig::default()
        };

        let err = in_memory_service(&config)
            .err()
            .expect("out-of-range neutral default rejected");

        assert!(matches!(
            err,
            AppError::Config(ConfigError::InvalidScoring(_))
        ));
    }

    #[test]
    fn reanalysis_keeps_first_created_at() {
        let service = in_memory_service(&ScoringConfig::default()).expect("service builds");
        let conversation = service.create(support_chat("Billing")).expect("created");

        let first = service.analyze(&conversation.id).expect("first analysis");
        let second = service.analyze(&conversation.id).expect("second analysis");

        assert!(first.created);
        assert!(!second.created);
        assert_eq!(second.record.created_at, first.record.created_at);
        assert!(second.record.updated_at >= first.record.updated_at);
        assert_eq!(
            service
                .analyses(&AnalysisFilter::default())
                .expect("list analyses")
                .len(),
            1
        );
    }

    #[test]
    fn unanalyzed_skips_analyzed_and_respects_limit() {
        let service = in_memory_service(&ScoringConfig::default()).expect("service builds");
        let first = service.create(support_chat("First")).expect("created");
        service.create(support_chat("Second")).expect("created");
        service.create(support_chat("Third")).expect("created");
        service.analyze(&first.id).expect("analyzed");

        let pending = service.conversations().unanalyzed(1).expect("pending listed");

        assert_eq!(pending.len(), 1);
        assert_eq!(pending[0].title, "Second");
    }

    #[test]
    fn purge_drops_only_expired_records() {
        let repository = InMemoryAnalysisRepository::default();
        let service = in_memory_service(&ScoringConfig::default()).expect("service builds");
        let conversation = service.create(support_chat("Old")).expect("created");
        let mut record = service.analyze(&conversation.id).expect("analyzed").record;

        record.created_at = Utc::now() - Duration::days(120);
        repository.upsert(record.clone()).expect("old record stored");
        record.conversation_id = ConversationId("fresh".to_string());
        record.created_at = Utc::now();
        repository.upsert(record).expect("fresh record stored");

        let removed = repository
            .purge_older_than(Utc::now() - Duration::days(90))
            .expect("purge succeeds");

        assert_eq!(removed, 1);
        let remaining = repository
            .list(&AnalysisFilter::default())
            .expect("list analyses");
        assert_eq!(remaining.len(), 1);
        assert_eq!(remaining[0].conversation_id.0, "fresh");
    }
}
