//! Voice preference and selection.

use serde::{Deserialize, Serialize};

/// A voice reported by the speech engine.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Voice {
    pub id: String,
    pub name: String,
    pub language: String,
}

impl Voice {
    pub fn new(id: impl Into<String>, name: impl Into<String>, language: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            language: language.into(),
        }
    }
}

/// Settings handed to the engine for one utterance.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct VoiceSettings {
    pub voice: String,
    /// Words per minute.
    pub rate: u32,
    /// Silence kept after the utterance, in milliseconds.
    pub pause_after_ms: u64,
}

/// Which voice the narrator should use.
///
/// The engine's voice list is walked in the order the engine reports it, and
/// the first voice whose id or name contains any `preferred` entry
/// (case-insensitive) wins. The order of `preferred` does not rank voices.
/// When none match, `fallback` is passed to the engine as-is.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct VoicePreference {
    pub preferred: Vec<String>,
    pub fallback: String,
    pub rate: u32,
    pub pause_after_ms: u64,
}

impl Default for VoicePreference {
    fn default() -> Self {
        Self {
            preferred: vec!["spanish-mbrola-2".to_string(), "mexican-mbrola-1".to_string()],
            fallback: "spanish-mbrola-2".to_string(),
            rate: 160,
            pause_after_ms: 400,
        }
    }
}

impl VoicePreference {
    /// Pick a voice from what the engine offers.
    pub fn select(&self, available: &[Voice]) -> VoiceSettings {
        let wanted: Vec<String> = self.preferred.iter().map(|p| p.to_lowercase()).collect();
        let voice = available
            .iter()
            .find(|v| {
                let id = v.id.to_lowercase();
                let name = v.name.to_lowercase();
                wanted.iter().any(|p| id.contains(p) || name.contains(p))
            })
            .map(|v| v.id.clone())
            .unwrap_or_else(|| self.fallback.clone());

        VoiceSettings {
            voice,
            rate: self.rate,
            pause_after_ms: self.pause_after_ms,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn voices() -> Vec<Voice> {
        vec![
            Voice::new("en-us", "English_(America)", "en-us"),
            Voice::new("mb/mb-mx1", "Mexican-MBROLA-1", "es-mx"),
            Voice::new("es", "Spanish_(Spain)", "es"),
        ]
    }

    #[test]
    fn selects_preferred_by_name_case_insensitive() {
        let settings = VoicePreference::default().select(&voices());
        assert_eq!(settings.voice, "mb/mb-mx1");
        assert_eq!(settings.rate, 160);
        assert_eq!(settings.pause_after_ms, 400);
    }

    #[test]
    fn first_matching_engine_voice_wins() {
        let mut available = voices();
        available.push(Voice::new("spanish-mbrola-2", "spanish-mbrola-2", "es"));
        let settings = VoicePreference::default().select(&available);
        assert_eq!(settings.voice, "mb/mb-mx1");

        available.reverse();
        let settings = VoicePreference::default().select(&available);
        assert_eq!(settings.voice, "spanish-mbrola-2");
    }

    #[test]
    fn falls_back_when_nothing_matches() {
        let settings = VoicePreference::default().select(&[Voice::new("en", "English", "en")]);
        assert_eq!(settings.voice, "spanish-mbrola-2");

        let empty = VoicePreference::default().select(&[]);
        assert_eq!(empty.voice, "spanish-mbrola-2");
    }
}
