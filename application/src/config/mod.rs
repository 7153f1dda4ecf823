//! Application-level configuration.
//!
//! - [`AssistantSettings`] — everything one question needs besides the question
//! - [`NarrationMode`] — how narration units are scheduled

pub mod assistant_settings;

pub use assistant_settings::{AssistantSettings, NarrationMode};
