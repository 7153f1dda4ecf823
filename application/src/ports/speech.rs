//! Speech engine port
//!
//! Engines are blocking: `speak` returns once the utterance has been played.
//! The [`Narrator`](crate::services::narrator::Narrator) keeps those calls
//! off the async runtime.

use nico_domain::{Voice, VoiceSettings};
use thiserror::Error;

/// Errors from a speech engine
#[derive(Error, Debug)]
pub enum SpeechError {
    #[error("Speech engine not available: {0}")]
    Unavailable(String),

    #[error("Voice not found: {0}")]
    VoiceNotFound(String),

    #[error("Speech engine failed: {0}")]
    Failed(String),
}

/// A local text-to-speech engine.
pub trait SpeechEngine: Send + Sync {
    /// Voices installed on this machine.
    fn voices(&self) -> Result<Vec<Voice>, SpeechError>;

    /// Speak `text` and block until playback ends.
    fn speak(&self, text: &str, settings: &VoiceSettings) -> Result<(), SpeechError>;
}
