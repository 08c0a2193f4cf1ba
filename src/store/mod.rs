//! In-memory transcript storage
//!
//! This module holds, per call, the finalized utterance history and the
//! current in-progress utterance for each end of the phone line. It is a pure
//! state machine with no I/O; notification of changes is the caller's job.

mod record;
mod store;

pub use record::{CallId, CallRecord, LiveTranscriptions, Party, Transcription};
pub use store::TranscriptStore;
