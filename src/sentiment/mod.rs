//! Emotion analysis of call transcripts
//!
//! Analyses come from an external text-analysis service and are cached per
//! call and party with an age-based staleness policy, so polling clients
//! don't turn into a flood of service calls.

mod analyzer;
mod cache;
mod remote;

pub use analyzer::{EmotionAnalyzer, EmotionRecord, EmotionScores};
pub use cache::SentimentCache;
pub use remote::{AnalyzerConfig, RemoteAnalyzer};
