use super::record::{CallId, CallRecord, Transcription};
use std::collections::HashMap;
use tokio::sync::RwLock;
use tracing::debug;

/// In-memory store of transcriptions for every call seen since startup.
///
/// Call records are created lazily on first reference, by writes and reads
/// alike: asking for a call that was never seen yields a fresh empty record
/// rather than an error. Collaborators rely on that forgiving behavior, so it
/// is part of the contract, not an accident.
///
/// All state is process-wide and discarded on exit.
pub struct TranscriptStore {
    calls: RwLock<Calls>,
}

#[derive(Default)]
struct Calls {
    records: HashMap<CallId, CallRecord>,
    /// Call ids in first-seen order
    order: Vec<CallId>,
}

impl Calls {
    fn entry(&mut self, call_id: CallId) -> &mut CallRecord {
        self.records.entry(call_id).or_insert_with(|| {
            debug!("preparing record for new call {}", call_id);
            self.order.push(call_id);
            CallRecord::new(call_id)
        })
    }
}

impl TranscriptStore {
    pub fn new() -> Self {
        Self {
            calls: RwLock::new(Calls::default()),
        }
    }

    /// Timestamps of all calls stored so far, in first-seen order.
    pub async fn call_ids(&self) -> Vec<CallId> {
        let calls = self.calls.read().await;
        calls.order.clone()
    }

    /// Store a finalized transcription.
    ///
    /// The utterance is appended to the call's history and the party's live
    /// slot is reset to an empty placeholder stamped with the utterance's own
    /// timestamp, ready for the next utterance.
    pub async fn append_final(&self, call_id: CallId, transcription: Transcription) {
        let mut calls = self.calls.write().await;
        let record = calls.entry(call_id);
        let placeholder = Transcription::empty(transcription.who, transcription.timestamp);
        record.history.push(transcription);
        record.live.set(placeholder);
    }

    /// Store an interim transcription.
    ///
    /// Replaces the party's live slot wholesale: each interim result is the
    /// transcription service's cumulative best guess for the current
    /// utterance, so there is nothing to merge.
    pub async fn update_live(&self, call_id: CallId, transcription: Transcription) {
        let mut calls = self.calls.write().await;
        calls.entry(call_id).live.set(transcription);
    }

    /// The full record for a single call.
    ///
    /// Never fails: an unknown call id materializes an empty record with
    /// both live slots present.
    pub async fn get_transcript(&self, call_id: CallId) -> CallRecord {
        let mut calls = self.calls.write().await;
        calls.entry(call_id).clone()
    }
}

impl Default for TranscriptStore {
    fn default() -> Self {
        Self::new()
    }
}
