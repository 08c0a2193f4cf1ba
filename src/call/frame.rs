use anyhow::{Context, Result};
use base64::Engine;
use serde::Deserialize;

/// A framed message from the telephony provider's audio stream.
///
/// Expected shape:
///
/// ```json
/// {
///     "event": "media",
///     "media": {
///         "payload": "<base64-encoded audio>",
///         "track": "inbound"
///     }
/// }
/// ```
///
/// The provider also sends lifecycle events (`connected`, `start`, `stop`,
/// mark acknowledgements) on the same stream; only `media` frames carry
/// audio.
#[derive(Debug, Deserialize)]
pub struct StreamFrame {
    pub event: String,

    #[serde(default)]
    pub media: Option<MediaPayload>,
}

#[derive(Debug, Deserialize)]
pub struct MediaPayload {
    /// Base64-encoded audio bytes
    pub payload: String,

    #[serde(default)]
    pub track: Option<String>,
}

/// Extract the audio bytes from one framed provider message.
///
/// Returns `Ok(None)` for well-formed non-media events, which are dropped
/// without forwarding anything downstream. Malformed frames are an error for
/// the caller to log; they must never take down the leg.
pub fn decode_media(raw: &str) -> Result<Option<Vec<u8>>> {
    let frame: StreamFrame =
        serde_json::from_str(raw).context("unparseable provider frame")?;

    if frame.event != "media" {
        return Ok(None);
    }

    let media = frame
        .media
        .context("media frame is missing its media payload")?;
    let audio = base64::engine::general_purpose::STANDARD
        .decode(media.payload)
        .context("media payload is not valid base64")?;

    Ok(Some(audio))
}
