//! Port definitions (interfaces for external adapters)
//!
//! Ports define the contracts that infrastructure and presentation adapters
//! must implement.

pub mod conversation_logger;
pub mod llm_gateway;
pub mod speech;
pub mod surface;
pub mod video_library;
pub mod web_search;
