use super::analyzer::{EmotionAnalyzer, EmotionRecord};
use crate::store::{CallId, CallRecord, Party, TranscriptStore};
use anyhow::{Context, Result};
use std::collections::HashMap;
use std::sync::Arc;
use std::time::Duration;
use tokio::sync::Mutex;
use tracing::debug;

/// Cache of emotion analyses, one per call and party.
///
/// Calling the analysis service is expensive and polling clients ask often,
/// so each response is reused for a freshness window before a new analysis
/// is requested. The window is measured from when the analysis completed,
/// not when it was asked for.
///
/// The cache reads transcripts from the store but never mutates them.
pub struct SentimentCache {
    store: Arc<TranscriptStore>,
    analyzer: Arc<dyn EmotionAnalyzer>,
    cache_time: Duration,
    cache: Mutex<HashMap<CallId, ConversationEmotion>>,
}

#[derive(Debug, Clone, Copy)]
struct ConversationEmotion {
    caller: EmotionRecord,
    receiver: EmotionRecord,
}

impl ConversationEmotion {
    fn never_analyzed() -> Self {
        Self {
            caller: EmotionRecord::never_analyzed(),
            receiver: EmotionRecord::never_analyzed(),
        }
    }

    fn get(&self, who: Party) -> EmotionRecord {
        match who {
            Party::Caller => self.caller,
            Party::Receiver => self.receiver,
        }
    }

    fn set(&mut self, who: Party, record: EmotionRecord) {
        match who {
            Party::Caller => self.caller = record,
            Party::Receiver => self.receiver = record,
        }
    }
}

impl SentimentCache {
    pub fn new(
        store: Arc<TranscriptStore>,
        analyzer: Arc<dyn EmotionAnalyzer>,
        cache_time: Duration,
    ) -> Self {
        Self {
            store,
            analyzer,
            cache_time,
            cache: Mutex::new(HashMap::new()),
        }
    }

    /// How long an analysis is reused before a fresh one is requested.
    pub fn cache_time(&self) -> Duration {
        self.cache_time
    }

    /// An emotion analysis of everything `who` has said in call `call_id`.
    ///
    /// Returns the cached analysis while it is fresh, which means the result
    /// can lag the transcript by up to the freshness window. Once stale, the
    /// party's finalized utterances are combined and submitted for a new
    /// analysis — at most one service call per invocation. A party that has
    /// said nothing keeps its cached record (all-zero until they speak) and
    /// costs no service call at all.
    pub async fn analyze(&self, call_id: CallId, who: Party) -> Result<EmotionRecord> {
        let cached = {
            let mut cache = self.cache.lock().await;
            cache
                .entry(call_id)
                .or_insert_with(ConversationEmotion::never_analyzed)
                .get(who)
        };

        if !self.is_stale(&cached) {
            debug!("reusing cached analysis for call {} {}", call_id, who);
            return Ok(cached);
        }

        let record = self.store.get_transcript(call_id).await;
        let transcript = match combined_transcript(&record, who) {
            Some(transcript) => transcript,
            None => return Ok(cached),
        };

        debug!("requesting new analysis for call {} {}", call_id, who);
        let scores = self
            .analyzer
            .analyze(&transcript)
            .await
            .context("emotion analysis request failed")?;

        let fresh = EmotionRecord {
            timestamp: chrono::Utc::now().timestamp_millis(),
            scores,
        };

        let mut cache = self.cache.lock().await;
        cache
            .entry(call_id)
            .or_insert_with(ConversationEmotion::never_analyzed)
            .set(who, fresh);

        Ok(fresh)
    }

    fn is_stale(&self, record: &EmotionRecord) -> bool {
        let now = chrono::Utc::now().timestamp_millis();
        now - self.cache_time.as_millis() as i64 > record.timestamp
    }
}

/// Everything this party has said in the call so far, newline-joined in
/// history order. `None` if they haven't said anything yet.
fn combined_transcript(record: &CallRecord, who: Party) -> Option<String> {
    let utterances: Vec<&str> = record
        .history
        .iter()
        .filter(|t| t.who == who)
        .map(|t| t.transcript.as_str())
        .collect();

    if utterances.is_empty() {
        return None;
    }
    Some(utterances.join("\n"))
}
