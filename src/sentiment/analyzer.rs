use anyhow::Result;
use serde::{Deserialize, Serialize};

/// Document-level emotion scores for a text passage.
///
/// Each score is the likelihood, between 0 and 1, that the passage conveys
/// that emotion.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct EmotionScores {
    pub anger: f64,
    pub disgust: f64,
    pub fear: f64,
    pub joy: f64,
    pub sadness: f64,
}

impl EmotionScores {
    pub fn zero() -> Self {
        Self {
            anger: 0.0,
            disgust: 0.0,
            fear: 0.0,
            joy: 0.0,
            sadness: 0.0,
        }
    }
}

/// An emotion analysis together with when it was produced.
///
/// A timestamp of 0 means "never analyzed": the scores are the all-zero
/// default and any freshness window has long expired.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct EmotionRecord {
    /// When the analysis completed (ms since epoch)
    pub timestamp: i64,

    #[serde(flatten)]
    pub scores: EmotionScores,
}

impl EmotionRecord {
    pub fn never_analyzed() -> Self {
        Self {
            timestamp: 0,
            scores: EmotionScores::zero(),
        }
    }
}

/// An external service that scores the emotional content of text.
#[async_trait::async_trait]
pub trait EmotionAnalyzer: Send + Sync {
    async fn analyze(&self, text: &str) -> Result<EmotionScores>;
}
