//! Polarity scoring for user messages.
//!
//! The engine only needs a compound score in `[-1, 1]`; anything implementing
//! [`SentimentScorer`] can be injected. [`LexiconSentimentScorer`] is the built-in,
//! fully deterministic default.

use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::fmt;
use std::sync::LazyLock;

/// Capability turning text into a compound polarity score in `[-1, 1]`.
pub trait SentimentScorer: Send + Sync {
    fn compound(&self, text: &str) -> f64;
}

/// Three-way polarity label derived from a compound score.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SentimentLabel {
    Positive,
    Neutral,
    Negative,
}

impl SentimentLabel {
    pub fn label(&self) -> &'static str {
        match self {
            SentimentLabel::Positive => "positive",
            SentimentLabel::Neutral => "neutral",
            SentimentLabel::Negative => "negative",
        }
    }
}

impl fmt::Display for SentimentLabel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// Applies the positive/negative cut-offs to a compound score.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SentimentThresholds {
    pub positive: f64,
    pub negative: f64,
}

impl Default for SentimentThresholds {
    fn default() -> Self {
        Self {
            positive: 0.05,
            negative: -0.05,
        }
    }
}

impl SentimentThresholds {
    pub fn classify(&self, compound: f64) -> SentimentLabel {
        if compound >= self.positive {
            SentimentLabel::Positive
        } else if compound <= self.negative {
            SentimentLabel::Negative
        } else {
            SentimentLabel::Neutral
        }
    }
}

const NORMALIZATION_ALPHA: f64 = 15.0;
const NEGATION_SCALAR: f64 = -0.74;
const BOOSTER_INCREMENT: f64 = 0.293;
const EXCLAMATION_INCREMENT: f64 = 0.292;
const MAX_EXCLAMATIONS: usize = 4;
const NEGATION_WINDOW: usize = 3;

static VALENCE: LazyLock<HashMap<&'static str, f64>> = LazyLock::new(|| {
    [
        // positive
        ("good", 1.9),
        ("great", 3.1),
        ("excellent", 2.7),
        ("perfect", 2.7),
        ("awesome", 3.1),
        ("amazing", 2.8),
        ("wonderful", 2.7),
        ("fantastic", 2.6),
        ("nice", 1.8),
        ("love", 3.2),
        ("like", 1.5),
        ("happy", 2.7),
        ("glad", 2.0),
        ("pleased", 1.9),
        ("satisfied", 1.8),
        ("thanks", 1.9),
        ("thank", 1.5),
        ("appreciate", 1.7),
        ("helpful", 1.9),
        ("useful", 1.9),
        ("works", 1.0),
        ("fixed", 1.1),
        ("solved", 1.3),
        ("resolved", 1.2),
        ("easy", 1.9),
        ("fast", 1.0),
        ("quick", 1.0),
        ("clear", 1.6),
        ("ok", 0.9),
        ("okay", 0.9),
        ("fine", 0.8),
        ("yes", 1.2),
        ("best", 3.2),
        ("kind", 2.4),
        ("friendly", 2.2),
        ("relieved", 1.5),
        // negative
        ("bad", -2.5),
        ("terrible", -2.1),
        ("awful", -2.0),
        ("horrible", -2.5),
        ("worst", -3.1),
        ("hate", -2.7),
        ("angry", -2.3),
        ("annoyed", -1.6),
        ("annoying", -1.7),
        ("frustrated", -2.4),
        ("frustrating", -1.9),
        ("upset", -1.6),
        ("disappointed", -1.9),
        ("disappointing", -2.2),
        ("useless", -1.8),
        ("broken", -1.3),
        ("wrong", -2.1),
        ("problem", -1.7),
        ("issue", -0.8),
        ("late", -0.6),
        ("slow", -1.0),
        ("fail", -2.5),
        ("failed", -2.3),
        ("error", -1.7),
        ("missing", -1.2),
        ("lost", -1.3),
        ("never", -0.5),
        ("unhappy", -1.8),
        ("sad", -2.1),
        ("ridiculous", -2.0),
        ("unacceptable", -2.0),
        ("confused", -1.3),
        ("stuck", -1.2),
        ("damaged", -1.9),
        ("refund", -0.3),
        ("cancel", -0.6),
        ("complaint", -1.5),
        ("sorry", -0.3),
    ]
    .into_iter()
    .collect()
});

static BOOSTERS: LazyLock<HashMap<&'static str, f64>> = LazyLock::new(|| {
    [
        ("very", BOOSTER_INCREMENT),
        ("really", BOOSTER_INCREMENT),
        ("extremely", BOOSTER_INCREMENT),
        ("so", BOOSTER_INCREMENT),
        ("incredibly", BOOSTER_INCREMENT),
        ("totally", BOOSTER_INCREMENT),
        ("absolutely", BOOSTER_INCREMENT),
        ("completely", BOOSTER_INCREMENT),
        ("super", BOOSTER_INCREMENT),
        ("slightly", -BOOSTER_INCREMENT),
        ("somewhat", -BOOSTER_INCREMENT),
        ("barely", -BOOSTER_INCREMENT),
        ("kinda", -BOOSTER_INCREMENT),
    ]
    .into_iter()
    .collect()
});

const NEGATIONS: [&str; 12] = [
    "not", "no", "never", "nothing", "nobody", "none", "neither", "nor", "cannot", "without",
    "hardly", "isnt",
];

fn is_negation(token: &str) -> bool {
    NEGATIONS.contains(&token) || token.ends_with("n't")
}

/// Valence-lexicon scorer with booster words, negation and exclamation emphasis.
#[derive(Debug, Clone, Copy, Default)]
pub struct LexiconSentimentScorer;

impl LexiconSentimentScorer {
    pub fn new() -> Self {
        Self
    }

    fn tokens(text: &str) -> Vec<String> {
        text.to_lowercase()
            .replace(['\u{2019}', '\u{2018}'], "'")
            .split_whitespace()
            .map(|word| {
                word.trim_matches(|c: char| c.is_ascii_punctuation() && c != '\'')
                    .trim_matches('\'')
                    .to_string()
            })
            .filter(|word| !word.is_empty())
            .collect()
    }

    fn token_valence(tokens: &[String], index: usize) -> f64 {
        let Some(base) = VALENCE.get(tokens[index].as_str()).copied() else {
            return 0.0;
        };

        let window_start = index.saturating_sub(NEGATION_WINDOW);
        let preceding = &tokens[window_start..index];

        let mut valence = base;
        if let Some(booster) = preceding
            .last()
            .and_then(|token| BOOSTERS.get(token.as_str()))
        {
            valence += booster * base.signum();
        }

        if preceding.iter().any(|token| is_negation(token)) {
            valence *= NEGATION_SCALAR;
        }

        valence
    }
}

impl SentimentScorer for LexiconSentimentScorer {
    fn compound(&self, text: &str) -> f64 {
        let tokens = Self::tokens(text);
        if tokens.is_empty() {
            return 0.0;
        }

        let mut sum: f64 = (0..tokens.len())
            .map(|index| Self::token_valence(&tokens, index))
            .sum();

        if sum != 0.0 {
            let exclamations = text.matches('!').count().min(MAX_EXCLAMATIONS) as f64;
            sum += exclamations * EXCLAMATION_INCREMENT * sum.signum();
        }

        let compound = sum / (sum * sum + NORMALIZATION_ALPHA).sqrt();
        compound.clamp(-1.0, 1.0)
    }
}

/// Pairs an injected scorer with classification thresholds.
pub struct SentimentClassifier<'a> {
    scorer: &'a dyn SentimentScorer,
    thresholds: SentimentThresholds,
}

impl<'a> SentimentClassifier<'a> {
    pub fn new(scorer: &'a dyn SentimentScorer, thresholds: SentimentThresholds) -> Self {
        Self { scorer, thresholds }
    }

    /// Compound score clamped into `[-1, 1]`, whatever the scorer returns.
    pub fn score(&self, text: &str) -> f64 {
        let compound = self.scorer.compound(text);
        if compound.is_nan() {
            return 0.0;
        }
        compound.clamp(-1.0, 1.0)
    }

    pub fn classify(&self, text: &str) -> (SentimentLabel, f64) {
        let compound = self.score(text);
        (self.thresholds.classify(compound), compound)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn thresholds_are_inclusive() {
        let thresholds = SentimentThresholds::default();
        assert_eq!(thresholds.classify(0.05), SentimentLabel::Positive);
        assert_eq!(thresholds.classify(-0.05), SentimentLabel::Negative);
        assert_eq!(thresholds.classify(0.049), SentimentLabel::Neutral);
        assert_eq!(thresholds.classify(0.0), SentimentLabel::Neutral);
    }

    #[test]
    fn lexicon_scorer_reads_polarity() {
        let scorer = LexiconSentimentScorer::new();
        assert!(scorer.compound("Thanks, that's perfect") > 0.05);
        assert!(scorer.compound("This is terrible and I am frustrated") < -0.05);
        assert_eq!(scorer.compound(""), 0.0);
        assert_eq!(scorer.compound("the order number is 1234"), 0.0);
    }

    #[test]
    fn negation_flips_polarity() {
        let scorer = LexiconSentimentScorer::new();
        assert!(scorer.compound("this is good") > 0.0);
        assert!(scorer.compound("this is not good") < 0.0);
        assert!(scorer.compound("this isn't good") < 0.0);
    }

    #[test]
    fn boosters_and_exclamations_intensify() {
        let scorer = LexiconSentimentScorer::new();
        let plain = scorer.compound("good");
        assert!(scorer.compound("very good") > plain);
        assert!(scorer.compound("good!!") > plain);
    }

    #[test]
    fn classifier_clamps_out_of_range_scorers() {
        struct Loud;
        impl SentimentScorer for Loud {
            fn compound(&self, _text: &str) -> f64 {
                7.5
            }
        }

        let classifier = SentimentClassifier::new(&Loud, SentimentThresholds::default());
        assert_eq!(classifier.classify("anything"), (SentimentLabel::Positive, 1.0));
    }
}
