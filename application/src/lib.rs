//! Application layer for nico-assistant
//!
//! This crate contains the ask-assistant use case, the response relay, the
//! narrator, and the port definitions implemented by infrastructure
//! adapters. It depends only on the domain layer.

pub mod config;
pub mod ports;
pub mod services;
pub mod use_cases;

// Re-export commonly used types
pub use config::{AssistantSettings, NarrationMode};
pub use ports::{
    conversation_logger::{ConversationEvent, ConversationLogger, NoConversationLogger},
    llm_gateway::{GatewayError, GenerationRequest, LlmGateway, StreamHandle},
    speech::{SpeechEngine, SpeechError},
    surface::{AnswerSurface, NoSurface, StatusLevel},
    video_library::{VideoError, VideoLibrary},
    web_search::{SearchError, WebSearchPort},
};
pub use services::{narrator::Narrator, relay::{RelayOutcome, ResponseRelay}};
pub use use_cases::ask_assistant::{AskAssistantUseCase, AskError, AskInput, AskOutcome};
