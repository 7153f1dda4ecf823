//! Assistant configuration from TOML (`[assistant]` section)

use serde::{Deserialize, Serialize};

/// Raw assistant configuration from TOML
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct FileAssistantConfig {
    /// Persona placed before every question
    pub system_prompt: Option<String>,
    /// Delay between replayed words, in milliseconds
    pub word_delay_ms: u64,
}

impl Default for FileAssistantConfig {
    fn default() -> Self {
        Self {
            system_prompt: None,
            word_delay_ms: 40,
        }
    }
}
