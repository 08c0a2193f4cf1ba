use super::state::AppState;
use crate::store::Party;
use axum::{
    extract::ws::{Message, WebSocket, WebSocketUpgrade},
    extract::State,
    response::Response,
};
use futures::{SinkExt, StreamExt};
use tracing::{debug, error, warn};

/// GET /ws/caller
/// Audio stream for the person who made the phone call
pub async fn caller_leg(ws: WebSocketUpgrade, State(state): State<AppState>) -> Response {
    ws.on_upgrade(move |socket| handle_leg(socket, state, Party::Caller))
}

/// GET /ws/receiver
/// Audio stream for the person who received the phone call
pub async fn receiver_leg(ws: WebSocketUpgrade, State(state): State<AppState>) -> Response {
    ws.on_upgrade(move |socket| handle_leg(socket, state, Party::Receiver))
}

/// Feed one leg's framed provider messages into the coordinator until the
/// provider hangs up. Dropping the frame sender is what ends the pipeline.
async fn handle_leg(mut socket: WebSocket, state: AppState, who: Party) {
    debug!("received new {} audio stream connection", who);

    let frames = match state.coordinator.begin_leg(who).await {
        Ok(frames) => frames,
        Err(e) => {
            error!("could not start {} leg: {:#}", who, e);
            return;
        }
    };

    while let Some(message) = socket.recv().await {
        match message {
            Ok(Message::Text(text)) => {
                if frames.send(text).await.is_err() {
                    debug!("{} leg pipeline has stopped accepting frames", who);
                    break;
                }
            }
            Ok(Message::Close(_)) => break,
            Ok(_) => {}
            Err(e) => {
                warn!("{} audio stream error: {}", who, e);
                break;
            }
        }
    }

    debug!("{} audio stream disconnected", who);
}

/// GET /ws/updates
/// Push call lifecycle and transcription events to an observing client
pub async fn updates(ws: WebSocketUpgrade, State(state): State<AppState>) -> Response {
    ws.on_upgrade(move |socket| handle_observer(socket, state))
}

async fn handle_observer(socket: WebSocket, state: AppState) {
    let (handle, mut events) = state.hub.subscribe().await;
    debug!("received new observer connection");

    let (mut sender, mut receiver) = socket.split();

    loop {
        tokio::select! {
            event = events.recv() => {
                let Some(event) = event else { break };
                let payload = match serde_json::to_string(&event) {
                    Ok(payload) => payload,
                    Err(e) => {
                        error!("failed to serialize notification: {}", e);
                        continue;
                    }
                };
                if sender.send(Message::Text(payload)).await.is_err() {
                    break;
                }
            }
            message = receiver.next() => {
                match message {
                    Some(Ok(Message::Close(_))) | None => break,
                    Some(Ok(_)) => {}
                    Some(Err(e)) => {
                        debug!("observer socket error: {}", e);
                        break;
                    }
                }
            }
        }
    }

    state.hub.unsubscribe(handle).await;
    debug!("observer connection closed");
}
