//! Streaming speech-to-text
//!
//! The `SttBackend` trait abstracts the external recognition service: one
//! session per audio leg, raw audio in, recognition events out. The bundled
//! implementation speaks the service's WebSocket protocol.

mod backend;
mod websocket;

pub use backend::{Alternative, RecognitionResult, RecognitionUpdate, SttBackend, SttEvent, SttStream};
pub use websocket::{SttConfig, WebSocketStt};
