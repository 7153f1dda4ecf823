//! Web page surface
//!
//! Serves a single page that asks questions over server-sent events and
//! plays the background clip while the answer streams in.

pub mod handlers;
pub mod routes;
pub mod server;
pub mod sse;
pub mod state;

pub use server::start_server;
pub use state::AppState;
