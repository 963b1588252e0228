use serde::{Deserialize, Serialize};

use super::repository::AnalysisRecord;

/// Aggregate view across every analyzed conversation.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FleetAnalytics {
    pub total_conversations: usize,
    pub average_overall_score: f64,
    pub average_sentiment_score: f64,
    pub conversations_needing_escalation: usize,
    pub conversations_resolved: usize,
    /// Resolved share of all analyzed conversations, in percent.
    pub resolution_rate: f64,
}

impl FleetAnalytics {
    pub fn from_records(records: &[AnalysisRecord]) -> Option<Self> {
        if records.is_empty() {
            return None;
        }

        let total = records.len();
        let overall_sum: f64 = records.iter().map(|record| record.result.overall_score).sum();
        let sentiment_sum: f64 = records
            .iter()
            .map(|record| record.result.sentiment_score)
            .sum();
        let escalations = records
            .iter()
            .filter(|record| record.result.escalation_needed)
            .count();
        let resolved = records
            .iter()
            .filter(|record| record.result.resolution)
            .count();

        Some(Self {
            total_conversations: total,
            average_overall_score: round2(overall_sum / total as f64),
            average_sentiment_score: round2(sentiment_sum / total as f64),
            conversations_needing_escalation: escalations,
            conversations_resolved: resolved,
            resolution_rate: round2(resolved as f64 / total as f64 * 100.0),
        })
    }
}

fn round2(value: f64) -> f64 {
    (value * 100.0).round() / 100.0
}
