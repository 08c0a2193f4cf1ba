use super::analyzer::{EmotionAnalyzer, EmotionScores};
use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use tracing::debug;

/// Settings for the text-analysis service.
#[derive(Debug, Clone, Deserialize)]
pub struct AnalyzerConfig {
    /// Base URL of the service instance
    pub url: String,

    /// API key, sent as basic-auth material
    pub api_key: String,

    /// API version date, e.g. `2021-08-01`
    pub version: String,

    /// Language the transcripts are assumed to be in
    pub language: String,
}

#[derive(Debug, Serialize)]
struct AnalyzeRequest<'a> {
    text: &'a str,
    language: &'a str,
    features: Features,
}

/// Feature selection for the analysis. Only emotion scoring is requested;
/// the service supports others (sentiment, tone) that this system doesn't
/// use.
#[derive(Debug, Default, Serialize)]
struct Features {
    emotion: EmotionOptions,
}

#[derive(Debug, Default, Serialize)]
struct EmotionOptions {}

#[derive(Debug, Deserialize)]
struct AnalyzeResponse {
    emotion: EmotionResult,
}

#[derive(Debug, Deserialize)]
struct EmotionResult {
    document: DocumentEmotion,
}

#[derive(Debug, Deserialize)]
struct DocumentEmotion {
    emotion: EmotionScores,
}

/// Emotion analysis through the service's HTTP API.
pub struct RemoteAnalyzer {
    config: AnalyzerConfig,
    client: reqwest::Client,
}

impl RemoteAnalyzer {
    pub fn new(config: AnalyzerConfig) -> Self {
        Self {
            config,
            client: reqwest::Client::new(),
        }
    }

    fn endpoint(&self) -> String {
        format!("{}/v1/analyze", self.config.url.trim_end_matches('/'))
    }
}

#[async_trait::async_trait]
impl EmotionAnalyzer for RemoteAnalyzer {
    async fn analyze(&self, text: &str) -> Result<EmotionScores> {
        let request = AnalyzeRequest {
            text,
            language: &self.config.language,
            features: Features::default(),
        };

        debug!("submitting {} characters for emotion analysis", text.len());

        let response = self
            .client
            .post(self.endpoint())
            .query(&[("version", self.config.version.as_str())])
            .basic_auth("apikey", Some(&self.config.api_key))
            .json(&request)
            .send()
            .await
            .context("failed to reach analysis service")?
            .error_for_status()
            .context("analysis service rejected the request")?;

        let analysis: AnalyzeResponse = response
            .json()
            .await
            .context("unparseable analysis response")?;

        Ok(analysis.emotion.document.emotion)
    }
}
