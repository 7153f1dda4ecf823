//! Infrastructure layer for nico-assistant
//!
//! This crate contains adapters that implement the ports defined in the
//! application layer, plus configuration file loading.

pub mod config;
pub mod gemini;
pub mod logging;
pub mod media;
pub mod search;
pub mod speech;

// Re-export commonly used types
pub use config::{
    ConfigIssue, ConfigLoader, FileAssistantConfig, FileConfig, FileGeminiConfig,
    FileLoggingConfig, FileReplConfig, FileSearchConfig, FileSpeechConfig, FileVideoConfig,
    FileWebConfig, Severity,
};
pub use gemini::{GeminiGateway, GeminiSettings};
pub use logging::JsonlConversationLogger;
pub use media::DirectoryVideoLibrary;
pub use search::DuckDuckGoSearch;
pub use speech::EspeakEngine;
