use std::sync::Arc;

use crate::scoring::{
    Message, ScoringConfig, ScoringEngine, SentimentScorer, Sender, Transcript,
};

pub(super) fn scoring_config() -> ScoringConfig {
    ScoringConfig::default()
}

pub(super) fn engine() -> ScoringEngine {
    ScoringEngine::with_lexicon(scoring_config()).expect("default config is valid")
}

/// Scorer returning the same compound for every text.
pub(super) struct FixedScorer(pub f64);

impl SentimentScorer for FixedScorer {
    fn compound(&self, _text: &str) -> f64 {
        self.0
    }
}

pub(super) fn engine_with_fixed_sentiment(compound: f64) -> ScoringEngine {
    ScoringEngine::new(scoring_config(), Arc::new(FixedScorer(compound)))
        .expect("default config is valid")
}

pub(super) fn transcript(turns: &[(Sender, &str)]) -> Transcript {
    Transcript::from_turns(turns.iter().map(|(sender, text)| (*sender, *text)))
}

pub(super) fn messages(turns: &[(Sender, &str)]) -> Vec<Message> {
    transcript(turns).messages().to_vec()
}

pub(super) fn late_order_transcript() -> Transcript {
    transcript(&[
        (Sender::User, "My order is late"),
        (
            Sender::Ai,
            "I understand your frustration, here's an example of what happened",
        ),
    ])
}

pub(super) fn resolved_transcript() -> Transcript {
    transcript(&[
        (Sender::User, "Hi, I can't log into my account"),
        (
            Sender::Ai,
            "Sorry to hear that. Please reset your password from the login page.",
        ),
        (Sender::User, "That worked, I'm in now"),
        (
            Sender::Ai,
            "Great! Let me know if there is anything else I can help with.",
        ),
        (Sender::User, "thanks, that's perfect"),
    ])
}

pub(super) fn assert_close(actual: f64, expected: f64) {
    assert!(
        (actual - expected).abs() < 1e-9,
        "expected {expected}, got {actual}"
    );
}
