//! Per-message quality metrics. Every function is total: empty or odd input degrades to
//! a documented default instead of failing.

use std::collections::HashSet;

const STOP_WORDS: [&str; 10] = ["the", "a", "an", "is", "are", "i", "you", "it", "and", "or"];

pub(crate) const UNCERTAINTY_PHRASES: [&str; 9] = [
    "i think",
    "i believe",
    "maybe",
    "possibly",
    "i'm not sure",
    "i don't know",
    "i'm unsure",
    "approximately",
    "roughly",
];

const DETAIL_MARKERS: [&str; 4] = ["example", "specifically", "such as", "like"];

const CLOSURE_MARKERS: [&str; 4] = ["help", "anything else", "let me know", "thanks"];

pub(crate) const EMPATHY_PHRASES: [&str; 14] = [
    "i understand",
    "i appreciate",
    "thank you",
    "sorry",
    "apologize",
    "help",
    "support",
    "concern",
    "feel",
    "important",
    "matter",
    "appreciate your",
    "understand your",
    "i get it",
];

const MAX_SCORE: f64 = 100.0;

/// Number of lexicon phrases found in `text` (case-insensitive substring match).
///
/// Each phrase counts at most once, however often it repeats.
pub(crate) fn count_phrases(text: &str, phrases: &[&str]) -> usize {
    let lowered = text.to_lowercase();
    phrases
        .iter()
        .filter(|phrase| lowered.contains(**phrase))
        .count()
}

fn contains_any(text: &str, phrases: &[&str]) -> bool {
    count_phrases(text, phrases) > 0
}

pub(crate) fn word_count(text: &str) -> usize {
    text.split_whitespace().count()
}

/// Short sentences read clearer: 100 minus twice the mean sentence length, plus 10.
pub fn clarity(text: &str) -> f64 {
    if text.trim().is_empty() {
        return 0.0;
    }

    let lengths: Vec<usize> = text
        .split('.')
        .filter(|sentence| !sentence.trim().is_empty())
        .map(word_count)
        .collect();

    if lengths.is_empty() {
        return 0.0;
    }

    let average = lengths.iter().sum::<usize>() as f64 / lengths.len() as f64;
    let length_score = (MAX_SCORE - average * 2.0).max(0.0);
    (length_score + 10.0).min(MAX_SCORE)
}

/// Word overlap between a user message and the reply to it, plus a flat bonus.
pub fn relevance(user_text: &str, ai_text: &str, bonus: f64) -> f64 {
    let user_lower = user_text.to_lowercase();
    let ai_lower = ai_text.to_lowercase();
    let user_tokens: HashSet<&str> = user_lower.split_whitespace().collect();
    let ai_tokens: HashSet<&str> = ai_lower.split_whitespace().collect();

    if user_tokens.is_empty() {
        return bonus.clamp(0.0, MAX_SCORE);
    }

    let overlap = user_tokens
        .intersection(&ai_tokens)
        .filter(|token| !STOP_WORDS.contains(*token))
        .count();

    let ratio = overlap as f64 / user_tokens.len() as f64 * 100.0;
    (ratio + bonus).clamp(0.0, MAX_SCORE)
}

/// Confident replies score higher; each hedge costs 15 points.
pub fn accuracy(ai_text: &str) -> f64 {
    let hedges = count_phrases(ai_text, &UNCERTAINTY_PHRASES) as f64;
    (MAX_SCORE - hedges * 15.0).max(0.0)
}

/// Length, detail and closure components, capped at 100.
pub fn completeness(ai_text: &str) -> f64 {
    let length_score: f64 = match word_count(ai_text) {
        0..=9 => 20.0,
        10..=29 => 50.0,
        _ => 80.0,
    };

    let details_score = if contains_any(ai_text, &DETAIL_MARKERS) {
        30.0
    } else {
        15.0
    };

    let closure_score = if contains_any(ai_text, &CLOSURE_MARKERS) {
        20.0
    } else {
        10.0
    };

    (length_score + details_score + closure_score).min(MAX_SCORE)
}

/// 15 points per empathy phrase, capped at 100.
pub fn empathy(ai_text: &str) -> f64 {
    let matches = count_phrases(ai_text, &EMPATHY_PHRASES) as f64;
    (matches * 15.0).min(MAX_SCORE)
}
