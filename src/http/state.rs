use crate::call::CallCoordinator;
use crate::notify::NotificationHub;
use crate::sentiment::SentimentCache;
use crate::store::TranscriptStore;
use std::sync::Arc;

/// Shared application state for HTTP and WebSocket handlers
#[derive(Clone)]
pub struct AppState {
    /// Transcripts for every call seen since startup
    pub store: Arc<TranscriptStore>,

    /// Cached emotion analyses
    pub sentiment: Arc<SentimentCache>,

    /// Fan-out of call events to observers
    pub hub: Arc<NotificationHub>,

    /// Correlates audio legs into calls
    pub coordinator: Arc<CallCoordinator>,
}
