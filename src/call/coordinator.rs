use super::frame;
use crate::notify::NotificationHub;
use crate::stt::{SttBackend, SttEvent};
use crate::store::{CallId, Party, Transcription, TranscriptStore};
use anyhow::{Context, Result};
use std::sync::Arc;
use tokio::sync::{mpsc, Mutex};
use tracing::{debug, error, info, warn};

/// Classified event from one leg's recognition stream, routed to the
/// per-call router task. Channel order is delivery order, which makes
/// within-leg ordering an explicit guarantee.
#[derive(Debug)]
enum LegEvent {
    Final(Transcription),
    Interim(Transcription),
    Error(String),
    Closed(Party),
}

#[derive(Clone)]
struct ActiveCall {
    call_id: CallId,
    events: mpsc::Sender<LegEvent>,
}

/// Correlates the two audio legs of a phone call and feeds transcription
/// events downstream.
///
/// Each call arrives as two independent stream connections, one per party,
/// with no call identifier attached. The provider guarantees the caller's
/// leg connects first, so legs are correlated by arrival order: a caller leg
/// starts a new call, a receiver leg attaches to the most recently started
/// one. This is a documented protocol assumption, not something the
/// coordinator can verify.
///
/// Per leg, the coordinator runs two tasks: one decoding provider frames
/// into raw audio for the recognition stream, one classifying recognition
/// results. Classified events from both legs funnel into a single router
/// task per call, which owns all store writes and notifications for that
/// call.
pub struct CallCoordinator {
    store: Arc<TranscriptStore>,
    hub: Arc<NotificationHub>,
    stt: Arc<dyn SttBackend>,
    current_call: Mutex<Option<ActiveCall>>,
}

impl CallCoordinator {
    pub fn new(
        store: Arc<TranscriptStore>,
        hub: Arc<NotificationHub>,
        stt: Arc<dyn SttBackend>,
    ) -> Self {
        Self {
            store,
            hub,
            stt,
            current_call: Mutex::new(None),
        }
    }

    /// Start the pipeline for one leg of a call.
    ///
    /// Returns the channel the transport should feed raw provider frames
    /// into. Dropping the sender ends the leg: the recognition stream is
    /// flushed and closed, which in turn ends the call if it hasn't ended
    /// already.
    pub async fn begin_leg(&self, who: Party) -> Result<mpsc::Sender<String>> {
        let call = match who {
            Party::Caller => self.begin_call().await,
            Party::Receiver => self.attach_to_current_call().await,
        };

        info!("starting {} leg for call {}", who, call.call_id);

        let stream = self
            .stt
            .start_stream()
            .await
            .with_context(|| format!("failed to open recognition stream for {} leg", who))?;

        let (frames_tx, frames_rx) = mpsc::channel::<String>(64);

        tokio::spawn(pump_frames(who, frames_rx, stream.audio));
        tokio::spawn(classify_results(who, stream.results, call.events));

        Ok(frames_tx)
    }

    /// The id of the call currently in progress, if any.
    pub async fn current_call_id(&self) -> Option<CallId> {
        let current = self.current_call.lock().await;
        current.as_ref().map(|call| call.call_id)
    }

    async fn begin_call(&self) -> ActiveCall {
        let call_id = chrono::Utc::now().timestamp_millis();
        info!("new call {}", call_id);

        let (events_tx, events_rx) = mpsc::channel::<LegEvent>(64);
        tokio::spawn(route_call_events(
            Arc::clone(&self.store),
            Arc::clone(&self.hub),
            call_id,
            events_rx,
        ));

        self.hub.notify_new_call(call_id).await;

        let call = ActiveCall {
            call_id,
            events: events_tx,
        };
        let mut current = self.current_call.lock().await;
        *current = Some(call.clone());
        call
    }

    /// The receiver's leg joins whichever call started most recently.
    ///
    /// A receiver arriving before any caller breaks the provider's
    /// connection-order guarantee; the best available recovery is to treat
    /// it as the start of a call of its own.
    async fn attach_to_current_call(&self) -> ActiveCall {
        {
            let current = self.current_call.lock().await;
            if let Some(call) = current.as_ref() {
                return call.clone();
            }
        }
        warn!("receiver leg arrived before any caller leg");
        self.begin_call().await
    }
}

/// Decode framed provider messages into raw audio for the recognition
/// stream. A frame that fails to parse is logged and dropped; the leg keeps
/// going.
async fn pump_frames(
    who: Party,
    mut frames: mpsc::Receiver<String>,
    audio: mpsc::Sender<Vec<u8>>,
) {
    while let Some(raw) = frames.recv().await {
        match frame::decode_media(&raw) {
            Ok(Some(bytes)) => {
                if audio.send(bytes).await.is_err() {
                    debug!("{} recognition stream is gone, discarding audio", who);
                    break;
                }
            }
            Ok(None) => {}
            Err(e) => {
                warn!("dropping malformed frame on {} leg: {:#}", who, e);
            }
        }
    }
    debug!("{} leg audio ended", who);
}

/// Classify recognition events for one leg and forward them to the call's
/// router. An update without a transcript (keep-alive, listening state) is
/// silently ignored. A service error ends the leg: the audio source cannot
/// be resumed, so there is no retry. Whatever the reason the stream ends,
/// the router is told the leg is done.
async fn classify_results(
    who: Party,
    mut results: mpsc::Receiver<SttEvent>,
    events: mpsc::Sender<LegEvent>,
) {
    while let Some(event) = results.recv().await {
        let (classified, last) = match event {
            SttEvent::Update(update) => match update.transcript() {
                Some((transcript, is_final)) => {
                    let transcription = Transcription {
                        who,
                        timestamp: chrono::Utc::now().timestamp_millis(),
                        transcript: transcript.to_string(),
                    };
                    if is_final {
                        (LegEvent::Final(transcription), false)
                    } else {
                        (LegEvent::Interim(transcription), false)
                    }
                }
                None => continue,
            },
            SttEvent::Error(message) => (LegEvent::Error(message), true),
        };

        if events.send(classified).await.is_err() {
            debug!("call router is gone, dropping {} leg events", who);
            return;
        }
        if last {
            break;
        }
    }

    let _ = events.send(LegEvent::Closed(who)).await;
}

/// Single writer for one call: applies classified events from both legs to
/// the store and broadcasts them. Signals end-of-call exactly once, when the
/// first leg's recognition stream closes.
async fn route_call_events(
    store: Arc<TranscriptStore>,
    hub: Arc<NotificationHub>,
    call_id: CallId,
    mut events: mpsc::Receiver<LegEvent>,
) {
    let mut ended = false;

    while let Some(event) = events.recv().await {
        match event {
            LegEvent::Final(transcription) => {
                store.append_final(call_id, transcription.clone()).await;
                hub.notify_final(call_id, transcription).await;
            }
            LegEvent::Interim(transcription) => {
                store.update_live(call_id, transcription.clone()).await;
                hub.notify_interim(call_id, transcription).await;
            }
            LegEvent::Error(message) => {
                error!("recognition error on call {}: {}", call_id, message);
            }
            LegEvent::Closed(who) => {
                debug!("{} leg closed on call {}", who, call_id);
                if !ended {
                    ended = true;
                    hub.notify_end_call(call_id).await;
                }
            }
        }
    }

    info!("call {} finished", call_id);
}
