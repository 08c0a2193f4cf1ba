use super::backend::{RecognitionResult, RecognitionUpdate, SttBackend, SttEvent, SttStream};
use anyhow::{Context, Result};
use base64::Engine;
use futures::{SinkExt, StreamExt};
use serde::{Deserialize, Serialize};
use tokio::sync::mpsc;
use tokio_tungstenite::{
    connect_async,
    tungstenite::{
        client::IntoClientRequest,
        http::header::{HeaderValue, AUTHORIZATION},
        protocol::Message,
    },
};
use tracing::{debug, error, warn};

/// Settings for the speech service's streaming-recognition endpoint.
#[derive(Debug, Clone, Deserialize)]
pub struct SttConfig {
    /// Base URL of the service instance, e.g.
    /// `wss://api.eu-gb.speech-to-text.example.cloud/instances/xxxx`
    pub url: String,

    /// API key, sent as basic-auth material
    pub api_key: String,

    /// Recognition model, e.g. `en-GB_Telephony`
    pub model: String,

    /// Content type of the audio the provider delivers
    pub content_type: String,

    /// Ask the service for in-progress transcriptions rather than waiting
    /// for the end of each utterance
    pub interim_results: bool,

    /// Seconds of silence the service will tolerate before closing the
    /// stream on its own
    pub inactivity_timeout: u32,
}

/// Message that opens a recognition session.
#[derive(Debug, Serialize)]
struct StartMessage<'a> {
    action: &'a str,
    #[serde(rename = "content-type")]
    content_type: &'a str,
    interim_results: bool,
    inactivity_timeout: u32,
}

/// Payload received on the recognition socket.
///
/// The service multiplexes state notifications, recognition results, and
/// errors over one socket; absent fields distinguish them.
#[derive(Debug, Deserialize)]
struct ServerFrame {
    #[serde(default)]
    error: Option<String>,
    #[serde(default)]
    state: Option<String>,
    #[serde(default)]
    results: Option<Vec<RecognitionResult>>,
}

/// Streaming speech-to-text over the service's WebSocket API.
///
/// Each session is its own socket: audio goes out as binary frames, results
/// come back as JSON text frames. Closing the audio channel sends a stop
/// action so the service flushes its last hypothesis before hanging up.
pub struct WebSocketStt {
    config: SttConfig,
}

impl WebSocketStt {
    pub fn new(config: SttConfig) -> Self {
        Self { config }
    }

    fn endpoint(&self) -> String {
        format!(
            "{}/v1/recognize?model={}",
            self.config.url.trim_end_matches('/'),
            self.config.model
        )
    }

    fn authorization(&self) -> Result<HeaderValue> {
        let credentials = base64::engine::general_purpose::STANDARD
            .encode(format!("apikey:{}", self.config.api_key));
        HeaderValue::from_str(&format!("Basic {}", credentials))
            .context("API key is not valid header material")
    }
}

#[async_trait::async_trait]
impl SttBackend for WebSocketStt {
    async fn start_stream(&self) -> Result<SttStream> {
        let endpoint = self.endpoint();
        debug!("opening recognition stream to {}", endpoint);

        let mut request = endpoint
            .as_str()
            .into_client_request()
            .context("invalid speech service URL")?;
        request
            .headers_mut()
            .insert(AUTHORIZATION, self.authorization()?);

        let (socket, _) = connect_async(request)
            .await
            .context("failed to connect to speech service")?;
        let (mut sink, mut stream) = socket.split();

        let start = StartMessage {
            action: "start",
            content_type: &self.config.content_type,
            interim_results: self.config.interim_results,
            inactivity_timeout: self.config.inactivity_timeout,
        };
        sink.send(Message::Text(serde_json::to_string(&start)?))
            .await
            .context("failed to open recognition session")?;

        let (audio_tx, mut audio_rx) = mpsc::channel::<Vec<u8>>(64);
        let (result_tx, result_rx) = mpsc::channel::<SttEvent>(32);

        // Outbound: forward audio until the sender side hangs up, then ask
        // the service to finish the last utterance.
        tokio::spawn(async move {
            while let Some(audio) = audio_rx.recv().await {
                if let Err(e) = sink.send(Message::Binary(audio)).await {
                    error!("failed to send audio to speech service: {}", e);
                    break;
                }
            }
            let _ = sink
                .send(Message::Text(r#"{"action":"stop"}"#.to_string()))
                .await;
            let _ = sink.close().await;
        });

        // Inbound: surface recognition payloads and errors as events. The
        // result channel closing is the session-ended signal.
        tokio::spawn(async move {
            while let Some(message) = stream.next().await {
                match message {
                    Ok(Message::Text(text)) => {
                        let frame: ServerFrame = match serde_json::from_str(&text) {
                            Ok(frame) => frame,
                            Err(e) => {
                                warn!("unparseable payload from speech service: {}", e);
                                continue;
                            }
                        };

                        if let Some(error) = frame.error {
                            if result_tx.send(SttEvent::Error(error)).await.is_err() {
                                break;
                            }
                        } else if let Some(results) = frame.results {
                            let update = RecognitionUpdate { results };
                            if result_tx.send(SttEvent::Update(update)).await.is_err() {
                                break;
                            }
                        } else if let Some(state) = frame.state {
                            debug!("speech service state: {}", state);
                        }
                    }
                    Ok(Message::Close(_)) => break,
                    Ok(_) => {}
                    Err(e) => {
                        let _ = result_tx.send(SttEvent::Error(e.to_string())).await;
                        break;
                    }
                }
            }
        });

        Ok(SttStream {
            audio: audio_tx,
            results: result_rx,
        })
    }
}
