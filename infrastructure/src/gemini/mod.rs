//! Google Gemini adapter.
//!
//! Calls the Generative Language REST API directly with an API key:
//!
//! - [`gateway::GeminiGateway`] — implements the `LlmGateway` port
//! - [`types`] — request/response bodies and SSE framing

pub mod gateway;
pub mod types;

pub use gateway::{GeminiGateway, GeminiSettings};
