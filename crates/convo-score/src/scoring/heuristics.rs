use super::config::ScoringConfig;
use super::domain::Message;
use super::metrics::{count_phrases, word_count};
use super::sentiment::SentimentLabel;

const FALLBACK_PHRASES: [&str; 7] = [
    "i don't know",
    "i'm not sure",
    "i can't help",
    "unable to",
    "beyond my knowledge",
    "not available",
    "cannot determine",
];

const RESOLUTION_KEYWORDS: [&str; 8] = [
    "thanks",
    "thank you",
    "ok",
    "okay",
    "perfect",
    "great",
    "done",
    "resolved",
];

/// Fallback phrases used by the AI, counted per phrase per message.
pub fn fallback_count(messages: &[Message]) -> u32 {
    messages
        .iter()
        .filter(|message| message.is_ai())
        .map(|message| count_phrases(&message.text, &FALLBACK_PHRASES) as u32)
        .sum()
}

/// Whether the user's last word suggests the issue is settled.
pub fn resolution_detected(messages: &[Message], config: &ScoringConfig) -> bool {
    let Some(last_user) = messages.iter().rev().find(|message| message.is_user()) else {
        return false;
    };

    let has_keyword = count_phrases(&last_user.text, &RESOLUTION_KEYWORDS) > 0;
    let is_brief = word_count(&last_user.text) < config.resolution_brief_word_limit;

    has_keyword || (is_brief && messages.len() > config.resolution_min_messages)
}

/// Negative conversations with repeated fallbacks escalate, as does any conversation
/// where the user kept coming back.
pub fn escalation_needed(
    messages: &[Message],
    sentiment: SentimentLabel,
    config: &ScoringConfig,
) -> bool {
    let user_turns = messages.iter().filter(|message| message.is_user()).count();
    if user_turns > config.escalation_user_turn_limit {
        return true;
    }

    sentiment == SentimentLabel::Negative
        && fallback_count(messages) > config.escalation_fallback_limit
}

/// Mean seconds per AI reply.
///
/// Non-authoritative: transcripts carry no timestamps, so every AI reply after the
/// opening turn is credited the configured constant. Replace this contract once real
/// latency data is available.
pub fn average_response_time(messages: &[Message], config: &ScoringConfig) -> f64 {
    let replies = messages
        .iter()
        .enumerate()
        .filter(|(index, message)| *index > 0 && message.is_ai())
        .count();

    if replies == 0 {
        return 0.0;
    }

    let total = replies as f64 * config.response_time_seconds;
    total / replies as f64
}
