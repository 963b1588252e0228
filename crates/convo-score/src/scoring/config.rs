use serde::{Deserialize, Serialize};

const WEIGHT_TOLERANCE: f64 = 1e-6;

/// Tunable constants of the scoring rubric.
///
/// Every field has a default matching the reference rubric, so a partial JSON document
/// only overrides what it names.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ScoringConfig {
    pub weights: ScoreWeights,
    /// Flat bonus added to the word-overlap ratio for relevance.
    pub relevance_bonus: f64,
    /// Value reported for a metric that had nothing to average.
    pub neutral_default: f64,
    /// Seconds credited per AI reply. Placeholder until real timestamps exist.
    pub response_time_seconds: f64,
    /// Points subtracted from the fallback dimension per fallback phrase.
    pub fallback_penalty: f64,
    pub positive_threshold: f64,
    pub negative_threshold: f64,
    /// More user turns than this always escalates.
    pub escalation_user_turn_limit: usize,
    /// Negative conversations escalate with more fallbacks than this.
    pub escalation_fallback_limit: u32,
    /// Last user message shorter than this many words counts as brief.
    pub resolution_brief_word_limit: usize,
    /// Brief closings only resolve conversations longer than this.
    pub resolution_min_messages: usize,
}

impl Default for ScoringConfig {
    fn default() -> Self {
        Self {
            weights: ScoreWeights::default(),
            relevance_bonus: 20.0,
            neutral_default: 50.0,
            response_time_seconds: 3.0,
            fallback_penalty: 10.0,
            positive_threshold: 0.05,
            negative_threshold: -0.05,
            escalation_user_turn_limit: 5,
            escalation_fallback_limit: 1,
            resolution_brief_word_limit: 10,
            resolution_min_messages: 3,
        }
    }
}

impl ScoringConfig {
    pub fn validate(&self) -> Result<(), ScoringConfigError> {
        self.weights.validate()?;

        if self.negative_threshold > self.positive_threshold {
            return Err(ScoringConfigError::InvertedThresholds {
                positive: self.positive_threshold,
                negative: self.negative_threshold,
            });
        }

        if !(0.0..=100.0).contains(&self.neutral_default) {
            return Err(ScoringConfigError::OutOfRange {
                field: "neutral_default",
                value: self.neutral_default,
            });
        }

        for (field, value) in [
            ("relevance_bonus", self.relevance_bonus),
            ("response_time_seconds", self.response_time_seconds),
            ("fallback_penalty", self.fallback_penalty),
        ] {
            if value < 0.0 || !value.is_finite() {
                return Err(ScoringConfigError::OutOfRange { field, value });
            }
        }

        Ok(())
    }
}

/// Weight of each dimension in the overall score. Must sum to 1.0.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ScoreWeights {
    pub clarity: f64,
    pub relevance: f64,
    pub accuracy: f64,
    pub completeness: f64,
    pub empathy: f64,
    pub resolution: f64,
    pub escalation: f64,
    pub fallback: f64,
}

impl Default for ScoreWeights {
    fn default() -> Self {
        Self {
            clarity: 0.15,
            relevance: 0.15,
            accuracy: 0.15,
            completeness: 0.10,
            empathy: 0.10,
            resolution: 0.20,
            escalation: 0.05,
            fallback: 0.10,
        }
    }
}

impl ScoreWeights {
    pub fn total(&self) -> f64 {
        self.entries().iter().map(|(_, weight)| weight).sum()
    }

    pub(crate) fn entries(&self) -> [(&'static str, f64); 8] {
        [
            ("clarity", self.clarity),
            ("relevance", self.relevance),
            ("accuracy", self.accuracy),
            ("completeness", self.completeness),
            ("empathy", self.empathy),
            ("resolution", self.resolution),
            ("escalation", self.escalation),
            ("fallback", self.fallback),
        ]
    }

    pub fn validate(&self) -> Result<(), ScoringConfigError> {
        if let Some((name, weight)) = self
            .entries()
            .into_iter()
            .find(|(_, weight)| *weight < 0.0 || !weight.is_finite())
        {
            return Err(ScoringConfigError::NegativeWeight { name, weight });
        }

        let total = self.total();
        if (total - 1.0).abs() > WEIGHT_TOLERANCE {
            return Err(ScoringConfigError::WeightSum { total });
        }

        Ok(())
    }
}

#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum ScoringConfigError {
    #[error("weights must sum to 1.0 (got {total:.6})")]
    WeightSum { total: f64 },
    #[error("weight for {name} must be a non-negative number (got {weight})")]
    NegativeWeight { name: &'static str, weight: f64 },
    #[error("negative threshold {negative} exceeds positive threshold {positive}")]
    InvertedThresholds { positive: f64, negative: f64 },
    #[error("{field} is out of range (got {value})")]
    OutOfRange { field: &'static str, value: f64 },
}
