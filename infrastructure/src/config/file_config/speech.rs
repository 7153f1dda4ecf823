//! Speech configuration from TOML (`[speech]` section)

use nico_application::NarrationMode;
use nico_domain::VoicePreference;
use serde::{Deserialize, Serialize};

/// Raw speech configuration from TOML
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct FileSpeechConfig {
    /// `off`, `per-fragment` or `sequential`
    pub narration: NarrationMode,
    /// Explicit espeak binary; detected on PATH when unset
    pub program: Option<String>,
    /// Voice id fragments, most wanted first
    pub preferred_voices: Vec<String>,
    pub fallback_voice: String,
    /// Words per minute
    pub rate: u32,
    pub pause_after_ms: u64,
}

impl Default for FileSpeechConfig {
    fn default() -> Self {
        let preference = VoicePreference::default();
        Self {
            narration: NarrationMode::default(),
            program: None,
            preferred_voices: preference.preferred,
            fallback_voice: preference.fallback,
            rate: preference.rate,
            pause_after_ms: preference.pause_after_ms,
        }
    }
}

impl FileSpeechConfig {
    pub fn voice_preference(&self) -> VoicePreference {
        VoicePreference {
            preferred: self.preferred_voices.clone(),
            fallback: self.fallback_voice.clone(),
            rate: self.rate,
            pause_after_ms: self.pause_after_ms,
        }
    }
}
