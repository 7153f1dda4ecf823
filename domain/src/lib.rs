//! Domain layer for nico-assistant
//!
//! This crate contains the value objects that describe a single question and
//! answer exchange. It has no dependencies on infrastructure or presentation
//! concerns.
//!
//! # Core Concepts
//!
//! - **Question**: the user's input, never blank
//! - **Prompt**: system prompt + question + optional web context, composed
//!   into the single string sent to the generation API
//! - **Answer buffer**: the accumulated response, which only grows
//! - **Fragments**: the space-delimited pieces the relay replays at a fixed
//!   cadence to the display and speech surfaces

pub mod answer;
pub mod core;
pub mod generation;
pub mod media;
pub mod prompt;
pub mod search;
pub mod speech;
pub mod util;

// Re-export commonly used types
pub use answer::{
    buffer::AnswerBuffer,
    fragments::split_fragments,
    stream::StreamEvent,
};
pub use core::{error::DomainError, model::GeminiModel, question::Question};
pub use generation::params::{GenerationParams, ParamError};
pub use media::video::{VideoClip, VideoEmbed, VideoFormat};
pub use prompt::template::PromptTemplate;
pub use search::trigger::SearchTrigger;
pub use speech::voice::{Voice, VoicePreference, VoiceSettings};
