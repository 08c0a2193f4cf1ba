//! Call session coordination
//!
//! This module manages the lifecycle of one phone call's two audio legs:
//! - correlating the caller and receiver streams into a single logical call
//! - decoding provider framing into raw audio for the recognition service
//! - classifying recognition results as interim or final
//! - routing results into the transcript store and out to observers

mod coordinator;
mod frame;

pub use coordinator::CallCoordinator;
pub use frame::{decode_media, MediaPayload, StreamFrame};
