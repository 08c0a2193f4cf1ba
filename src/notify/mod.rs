//! Observer notifications
//!
//! Fan-out of call lifecycle and transcription events to any number of
//! subscribed observers (typically WebSocket clients). Decoupled from the
//! transcript store: the hub is told about every event explicitly and never
//! reads stored state.

mod events;
mod hub;

pub use events::CallEvent;
pub use hub::{NotificationHub, ObserverHandle};
