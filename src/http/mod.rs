//! HTTP and WebSocket API
//!
//! The transport surface of the service:
//! - GET /ws/caller, /ws/receiver - inbound call audio, one leg each
//! - GET /ws/updates - push notifications for observing clients
//! - GET /api/calls - list processed calls
//! - GET /api/calls/:timestamp/transcript - full record for one call
//! - GET /api/calls/:timestamp/analysis/:who - speaker emotion analysis
//! - GET /health - health check

mod handlers;
mod routes;
mod state;
mod ws;

pub use routes::create_router;
pub use state::AppState;
