//! Gemini configuration from TOML (`[gemini]` section)
//!
//! ```toml
//! [gemini]
//! model = "gemini-1.5-flash"
//! api_key_env = "GEMINI_API_KEY"
//! stream = false
//! ```

use nico_domain::GeminiModel;
use serde::{Deserialize, Serialize};

/// Raw Gemini configuration from TOML
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct FileGeminiConfig {
    pub model: GeminiModel,
    /// Inline key. Prefer `api_key_env`.
    pub api_key: Option<String>,
    /// Environment variable holding the key
    pub api_key_env: String,
    pub base_url: String,
    pub timeout_secs: u64,
    /// Use `streamGenerateContent` over SSE
    pub stream: bool,
}

impl Default for FileGeminiConfig {
    fn default() -> Self {
        Self {
            model: GeminiModel::default(),
            api_key: None,
            api_key_env: "GEMINI_API_KEY".to_string(),
            base_url: crate::gemini::gateway::DEFAULT_BASE_URL.to_string(),
            timeout_secs: 60,
            stream: false,
        }
    }
}

impl FileGeminiConfig {
    /// The inline key if set, else the value of `api_key_env`.
    pub fn resolve_api_key(&self) -> Option<String> {
        self.resolve_api_key_with(|name| std::env::var(name).ok())
    }

    pub(crate) fn resolve_api_key_with(
        &self,
        lookup: impl Fn(&str) -> Option<String>,
    ) -> Option<String> {
        self.api_key
            .clone()
            .filter(|k| !k.trim().is_empty())
            .or_else(|| lookup(&self.api_key_env).filter(|k| !k.trim().is_empty()))
    }
}
