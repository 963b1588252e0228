//! Rule-based conversation scoring.
//!
//! [`ScoringEngine::analyze`] is the entry point: it validates the transcript, runs the
//! per-message metrics over AI turns, the sentiment classifier over user turns and the
//! conversation-level heuristics, then folds everything into one weighted score.

mod aggregate;
mod config;
mod domain;
pub mod heuristics;
pub mod metrics;
mod sentiment;

#[cfg(test)]
mod tests;

pub use aggregate::{overall_score, AnalysisResult, QualityAverages, ScoreComponent};
pub use config::{ScoreWeights, ScoringConfig, ScoringConfigError};
pub use domain::{Message, Sender, Transcript};
pub use sentiment::{
    LexiconSentimentScorer, SentimentClassifier, SentimentLabel, SentimentScorer,
    SentimentThresholds,
};

use std::sync::Arc;

/// Failure raised by [`ScoringEngine::analyze`].
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum AnalysisError {
    #[error("transcript has no messages to analyze")]
    EmptyTranscript,
}

/// Stateless analyzer applying a [`ScoringConfig`] with an injected sentiment scorer.
///
/// Holds no per-conversation state, so one instance can be shared across threads.
#[derive(Clone)]
pub struct ScoringEngine {
    config: ScoringConfig,
    scorer: Arc<dyn SentimentScorer>,
}

impl ScoringEngine {
    /// Rejects configurations that could push a score outside its bound.
    pub fn new(
        config: ScoringConfig,
        scorer: Arc<dyn SentimentScorer>,
    ) -> Result<Self, ScoringConfigError> {
        config.validate()?;
        Ok(Self { config, scorer })
    }

    /// Engine with the built-in lexicon scorer.
    pub fn with_lexicon(config: ScoringConfig) -> Result<Self, ScoringConfigError> {
        Self::new(config, Arc::new(LexiconSentimentScorer::new()))
    }

    pub fn config(&self) -> &ScoringConfig {
        &self.config
    }

    fn classifier(&self) -> SentimentClassifier<'_> {
        SentimentClassifier::new(
            self.scorer.as_ref(),
            SentimentThresholds {
                positive: self.config.positive_threshold,
                negative: self.config.negative_threshold,
            },
        )
    }

    /// Score one transcript. Identical input always yields identical output.
    pub fn analyze(&self, transcript: &Transcript) -> Result<AnalysisResult, AnalysisError> {
        if transcript.is_empty() {
            return Err(AnalysisError::EmptyTranscript);
        }

        let messages = transcript.messages();
        let config = &self.config;
        let averages = aggregate::quality_averages(messages, config);

        let classifier = self.classifier();
        let user_texts: Vec<&str> = transcript
            .user_messages()
            .map(|message| message.text.as_str())
            .collect();
        let per_message: Vec<f64> = user_texts
            .iter()
            .map(|text| classifier.score(text))
            .collect();
        let sentiment_score = aggregate::mean_sentiment(&per_message);
        let (sentiment, _) = classifier.classify(&user_texts.join(" "));

        let fallback_count = heuristics::fallback_count(messages);
        let resolution = heuristics::resolution_detected(messages, config);
        let escalation_needed = heuristics::escalation_needed(messages, sentiment, config);
        let response_time_avg = heuristics::average_response_time(messages, config);

        let overall_score = overall_score(
            &averages,
            resolution,
            escalation_needed,
            fallback_count,
            config,
        );

        Ok(AnalysisResult {
            clarity_score: averages.clarity,
            relevance_score: averages.relevance,
            accuracy_score: averages.accuracy,
            completeness_score: averages.completeness,
            sentiment,
            sentiment_score,
            empathy_score: averages.empathy,
            response_time_avg,
            resolution,
            escalation_needed,
            fallback_count,
            overall_score,
        })
    }
}

impl std::fmt::Debug for ScoringEngine {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ScoringEngine")
            .field("config", &self.config)
            .finish_non_exhaustive()
    }
}
