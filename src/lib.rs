pub mod call;
pub mod config;
pub mod http;
pub mod notify;
pub mod sentiment;
pub mod store;
pub mod stt;

pub use call::CallCoordinator;
pub use config::Config;
pub use http::{create_router, AppState};
pub use notify::{CallEvent, NotificationHub, ObserverHandle};
pub use sentiment::{
    AnalyzerConfig, EmotionAnalyzer, EmotionRecord, EmotionScores, RemoteAnalyzer, SentimentCache,
};
pub use store::{CallId, CallRecord, LiveTranscriptions, Party, Transcription, TranscriptStore};
pub use stt::{RecognitionUpdate, SttBackend, SttConfig, SttEvent, SttStream, WebSocketStt};
