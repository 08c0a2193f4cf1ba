use anyhow::Result;
use serde::Deserialize;
use tokio::sync::mpsc;

/// One hypothesis for an utterance, as reported by the speech service.
#[derive(Debug, Clone, Deserialize)]
pub struct Alternative {
    pub transcript: String,

    /// Confidence score (0.0 to 1.0), if the service provides one
    #[serde(default)]
    pub confidence: Option<f64>,
}

/// One recognition result within an update from the speech service.
#[derive(Debug, Clone, Deserialize)]
pub struct RecognitionResult {
    /// true once the service has moved on to the next utterance and will
    /// not revise this transcript again
    #[serde(default, rename = "final")]
    pub is_final: bool,

    #[serde(default)]
    pub alternatives: Vec<Alternative>,
}

/// An update received on a recognition stream.
///
/// The service interleaves transcription updates with housekeeping payloads
/// (keep-alive pings, listening-state changes) that carry no results; those
/// are not significant and should be ignored.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct RecognitionUpdate {
    #[serde(default)]
    pub results: Vec<RecognitionResult>,
}

impl RecognitionUpdate {
    /// The transcript carried by this update, if it carries one.
    ///
    /// Returns the first alternative of the first result together with the
    /// final flag, or `None` for updates with no results or no alternatives.
    pub fn transcript(&self) -> Option<(&str, bool)> {
        let result = self.results.first()?;
        let alternative = result.alternatives.first()?;
        Some((alternative.transcript.as_str(), result.is_final))
    }
}

/// Event emitted by a recognition stream.
///
/// The stream is considered closed when the event channel closes, whatever
/// the reason; an `Error` event is informational and does not by itself end
/// the stream.
#[derive(Debug)]
pub enum SttEvent {
    /// A payload arrived from the service (may or may not be significant)
    Update(RecognitionUpdate),

    /// The service reported an error for this stream
    Error(String),
}

/// An open streaming-recognition session.
pub struct SttStream {
    /// Raw audio bytes are sent here, in order
    pub audio: mpsc::Sender<Vec<u8>>,

    /// Recognition events arrive here; channel close means the session ended
    pub results: mpsc::Receiver<SttEvent>,
}

/// A streaming speech-to-text service.
///
/// One session is opened per audio leg; sessions are independent and a
/// failure in one must not affect another.
#[async_trait::async_trait]
pub trait SttBackend: Send + Sync {
    /// Open a new recognition session.
    async fn start_stream(&self) -> Result<SttStream>;
}
