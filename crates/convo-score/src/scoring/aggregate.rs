use serde::{Deserialize, Serialize};

use super::config::ScoringConfig;
use super::domain::Message;
use super::metrics;
use super::sentiment::SentimentLabel;

/// Scores derived from one transcript. Recomputed, never edited.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AnalysisResult {
    pub clarity_score: f64,
    pub relevance_score: f64,
    pub accuracy_score: f64,
    pub completeness_score: f64,
    pub sentiment: SentimentLabel,
    pub sentiment_score: f64,
    pub empathy_score: f64,
    /// Placeholder latency; see [`super::heuristics::average_response_time`].
    pub response_time_avg: f64,
    pub resolution: bool,
    pub escalation_needed: bool,
    pub fallback_count: u32,
    pub overall_score: f64,
}

impl AnalysisResult {
    /// Per-dimension contribution to `overall_score` under `config`'s weights.
    pub fn breakdown(&self, config: &ScoringConfig) -> Vec<ScoreComponent> {
        let values = dimension_values(
            &QualityAverages {
                clarity: self.clarity_score,
                relevance: self.relevance_score,
                accuracy: self.accuracy_score,
                completeness: self.completeness_score,
                empathy: self.empathy_score,
            },
            self.resolution,
            self.escalation_needed,
            self.fallback_count,
            config.fallback_penalty,
        );

        config
            .weights
            .entries()
            .into_iter()
            .zip(values)
            .map(|((dimension, weight), value)| ScoreComponent {
                dimension,
                value,
                weight,
                contribution: value * weight,
            })
            .collect()
    }
}

/// One weighted term of the overall score.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ScoreComponent {
    pub dimension: &'static str,
    /// Dimension normalized to 0-100 before weighting.
    pub value: f64,
    pub weight: f64,
    pub contribution: f64,
}

/// Mean per-message quality metrics over a transcript's AI turns.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct QualityAverages {
    pub clarity: f64,
    pub relevance: f64,
    pub accuracy: f64,
    pub completeness: f64,
    pub empathy: f64,
}

#[derive(Default)]
struct MetricSamples {
    clarity: Vec<f64>,
    relevance: Vec<f64>,
    accuracy: Vec<f64>,
    completeness: Vec<f64>,
    empathy: Vec<f64>,
}

fn mean_or(values: &[f64], default: f64) -> f64 {
    if values.is_empty() {
        default
    } else {
        values.iter().sum::<f64>() / values.len() as f64
    }
}

/// Scores every AI turn; relevance only when the AI answers a user turn directly.
pub(crate) fn quality_averages(messages: &[Message], config: &ScoringConfig) -> QualityAverages {
    let mut samples = MetricSamples::default();

    for (index, message) in messages.iter().enumerate() {
        if !message.is_ai() {
            continue;
        }

        samples.clarity.push(metrics::clarity(&message.text));
        samples.accuracy.push(metrics::accuracy(&message.text));
        samples
            .completeness
            .push(metrics::completeness(&message.text));
        samples.empathy.push(metrics::empathy(&message.text));

        if let Some(previous) = index.checked_sub(1).map(|prev| &messages[prev]) {
            if previous.is_user() {
                samples.relevance.push(metrics::relevance(
                    &previous.text,
                    &message.text,
                    config.relevance_bonus,
                ));
            }
        }
    }

    let fallback = config.neutral_default;
    QualityAverages {
        clarity: mean_or(&samples.clarity, fallback),
        relevance: mean_or(&samples.relevance, fallback),
        accuracy: mean_or(&samples.accuracy, fallback),
        completeness: mean_or(&samples.completeness, fallback),
        empathy: mean_or(&samples.empathy, fallback),
    }
}

/// Mean of a list of compound scores, `0.0` when there are none.
pub(crate) fn mean_sentiment(scores: &[f64]) -> f64 {
    mean_or(scores, 0.0).clamp(-1.0, 1.0)
}

fn dimension_values(
    averages: &QualityAverages,
    resolution: bool,
    escalation_needed: bool,
    fallback_count: u32,
    fallback_penalty: f64,
) -> [f64; 8] {
    let resolution_value = if resolution { 100.0 } else { 0.0 };
    let escalation_value = if escalation_needed { 0.0 } else { 100.0 };
    let fallback_value = (100.0 - fallback_count as f64 * fallback_penalty).max(0.0);

    [
        averages.clarity,
        averages.relevance,
        averages.accuracy,
        averages.completeness,
        averages.empathy,
        resolution_value,
        escalation_value,
        fallback_value,
    ]
}

/// Weighted sum of all dimensions, clamped to `[0, 100]`.
pub fn overall_score(
    averages: &QualityAverages,
    resolution: bool,
    escalation_needed: bool,
    fallback_count: u32,
    config: &ScoringConfig,
) -> f64 {
    let values = dimension_values(
        averages,
        resolution,
        escalation_needed,
        fallback_count,
        config.fallback_penalty,
    );

    let overall: f64 = config
        .weights
        .entries()
        .iter()
        .zip(values)
        .map(|((_, weight), value)| weight * value)
        .sum();

    overall.clamp(0.0, 100.0)
}
