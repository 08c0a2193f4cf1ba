use super::events::CallEvent;
use crate::store::{CallId, Transcription};
use tokio::sync::{mpsc, Mutex};
use uuid::Uuid;

use tracing::{debug, error};

/// Handle identifying one subscribed observer, used for correlated teardown.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ObserverHandle(Uuid);

/// Fan-out broadcaster of call lifecycle and transcription events.
///
/// The hub owns nothing but its live subscriber set. It does not read store
/// state; every event it delivers was handed to it through an explicit
/// `notify_*` call. Delivery is best-effort: a subscriber whose channel has
/// gone away is logged and pruned without disturbing the remaining
/// subscribers or the caller. Events reach each individual subscriber in the
/// order the `notify_*` calls were made.
pub struct NotificationHub {
    observers: Mutex<Vec<Observer>>,
}

struct Observer {
    handle: ObserverHandle,
    events: mpsc::UnboundedSender<CallEvent>,
}

impl NotificationHub {
    pub fn new() -> Self {
        Self {
            observers: Mutex::new(Vec::new()),
        }
    }

    /// Register a new observer.
    ///
    /// Returns the handle to unsubscribe with later and the channel the
    /// observer's events will arrive on.
    pub async fn subscribe(&self) -> (ObserverHandle, mpsc::UnboundedReceiver<CallEvent>) {
        let handle = ObserverHandle(Uuid::new_v4());
        let (tx, rx) = mpsc::unbounded_channel();

        let mut observers = self.observers.lock().await;
        observers.push(Observer { handle, events: tx });
        debug!("observer {:?} subscribed ({} active)", handle, observers.len());

        (handle, rx)
    }

    /// Remove an observer. A no-op for unknown or already-removed handles.
    pub async fn unsubscribe(&self, handle: ObserverHandle) {
        let mut observers = self.observers.lock().await;
        observers.retain(|observer| observer.handle != handle);
        debug!(
            "observer {:?} unsubscribed ({} active)",
            handle,
            observers.len()
        );
    }

    /// Notify observers about a new call.
    pub async fn notify_new_call(&self, call_id: CallId) {
        self.broadcast(CallEvent::NewCall { timestamp: call_id }).await;
    }

    /// Notify observers that a call has ended.
    pub async fn notify_end_call(&self, call_id: CallId) {
        self.broadcast(CallEvent::EndCall { timestamp: call_id }).await;
    }

    /// Notify observers about a finalized transcription.
    pub async fn notify_final(&self, call_id: CallId, transcription: Transcription) {
        self.broadcast(CallEvent::FinalTranscription {
            call_timestamp: call_id,
            transcription,
        })
        .await;
    }

    /// Notify observers about a revised interim transcription.
    pub async fn notify_interim(&self, call_id: CallId, transcription: Transcription) {
        self.broadcast(CallEvent::InterimTranscription {
            call_timestamp: call_id,
            transcription,
        })
        .await;
    }

    async fn broadcast(&self, event: CallEvent) {
        let mut observers = self.observers.lock().await;
        observers.retain(|observer| {
            if let Err(e) = observer.events.send(event.clone()) {
                error!(
                    "failed to deliver notification to observer {:?}: {}",
                    observer.handle, e
                );
                return false;
            }
            true
        });
    }
}

impl Default for NotificationHub {
    fn default() -> Self {
        Self::new()
    }
}
