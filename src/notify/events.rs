use crate::store::{CallId, Transcription};
use serde::{Deserialize, Serialize};

/// An update pushed to every subscribed observer.
///
/// Serializes to the wire shapes observers expect:
///
/// ```json
/// { "event": "new-call", "timestamp": 1653170890054 }
/// { "event": "end-call", "timestamp": 1653170890054 }
/// { "event": "final-transcription", "callTimestamp": 1653170890054,
///   "transcription": { "who": "caller", "timestamp": 1653170899120,
///                      "transcript": "hello" } }
/// { "event": "interim-transcription", "callTimestamp": 1653170890054,
///   "transcription": { "who": "caller", "timestamp": 1653170899120,
///                      "transcript": "hel" } }
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "event", rename_all = "kebab-case")]
pub enum CallEvent {
    /// A new phone call has started
    NewCall { timestamp: CallId },

    /// A phone call has ended
    EndCall { timestamp: CallId },

    /// A completed utterance was transcribed
    FinalTranscription {
        #[serde(rename = "callTimestamp")]
        call_timestamp: CallId,
        transcription: Transcription,
    },

    /// The in-progress utterance for one party was revised
    InterimTranscription {
        #[serde(rename = "callTimestamp")]
        call_timestamp: CallId,
        transcription: Transcription,
    },
}
