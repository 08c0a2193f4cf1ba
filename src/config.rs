use crate::sentiment::AnalyzerConfig;
use crate::stt::SttConfig;
use anyhow::Result;
use serde::Deserialize;

#[derive(Debug, Deserialize)]
pub struct Config {
    pub service: ServiceConfig,
    pub stt: SttConfig,
    pub sentiment: SentimentConfig,
}

#[derive(Debug, Deserialize)]
pub struct ServiceConfig {
    pub name: String,
    pub http: HttpConfig,
}

#[derive(Debug, Deserialize)]
pub struct HttpConfig {
    pub bind: String,
    pub port: u16,
}

#[derive(Debug, Deserialize)]
pub struct SentimentConfig {
    #[serde(flatten)]
    pub analyzer: AnalyzerConfig,

    /// How long an emotion analysis is reused before requesting a new one
    pub cache_time_secs: u64,
}

impl Config {
    /// Load configuration from a file, with `CALLSCRIBE__*` environment
    /// variables taking precedence (e.g. `CALLSCRIBE__STT__API_KEY`).
    pub fn load(path: &str) -> Result<Self> {
        let settings = config::Config::builder()
            .add_source(config::File::with_name(path))
            .add_source(config::Environment::with_prefix("CALLSCRIBE").separator("__"))
            .build()?;

        Ok(settings.try_deserialize()?)
    }
}
