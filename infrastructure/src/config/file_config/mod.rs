//! Raw TOML configuration data types
//!
//! These structs represent the exact structure of the TOML config file.
//! They are deserialized directly and use domain types where appropriate.

mod assistant;
mod gemini;
mod logging;
mod repl;
mod search;
mod speech;
mod video;
mod web;

pub use assistant::FileAssistantConfig;
pub use gemini::FileGeminiConfig;
pub use logging::FileLoggingConfig;
pub use repl::FileReplConfig;
pub use search::FileSearchConfig;
pub use speech::FileSpeechConfig;
pub use video::FileVideoConfig;
pub use web::FileWebConfig;

use super::issue::ConfigIssue;
use nico_application::AssistantSettings;
use nico_domain::{GenerationParams, ParamError, PromptTemplate};
use serde::{Deserialize, Serialize};
use std::time::Duration;

/// Complete file configuration (raw TOML structure)
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct FileConfig {
    pub assistant: FileAssistantConfig,
    pub gemini: FileGeminiConfig,
    /// Sampling parameters (uses domain type)
    pub generation: GenerationParams,
    pub search: FileSearchConfig,
    pub speech: FileSpeechConfig,
    pub video: FileVideoConfig,
    pub web: FileWebConfig,
    pub repl: FileReplConfig,
    pub logging: FileLoggingConfig,
}

impl FileConfig {
    /// Validate the entire configuration, returning all detected issues.
    pub fn validate(&self) -> Vec<ConfigIssue> {
        let mut issues = Vec::new();

        if self.gemini.model.as_str().trim().is_empty() {
            issues.push(ConfigIssue::error("gemini.model", "model name cannot be empty"));
        }
        if self.gemini.timeout_secs == 0 {
            issues.push(ConfigIssue::error("gemini.timeout_secs", "timeout cannot be 0"));
        }
        if self.gemini.api_key.is_some() {
            issues.push(ConfigIssue::warning(
                "gemini.api_key",
                format!(
                    "API key stored in a config file; consider setting {} instead",
                    self.gemini.api_key_env
                ),
            ));
        }

        for error in self.generation.validate() {
            let field = match error {
                ParamError::Temperature(_) => "generation.temperature",
                ParamError::TopP(_) => "generation.top_p",
                ParamError::MaxOutputTokens(_) => "generation.max_output_tokens",
            };
            issues.push(ConfigIssue::error(field, error.to_string()));
        }

        if self.assistant.word_delay_ms > 2_000 {
            issues.push(ConfigIssue::warning(
                "assistant.word_delay_ms",
                format!(
                    "{} ms between words will make answers very slow",
                    self.assistant.word_delay_ms
                ),
            ));
        }
        if let Some(prompt) = &self.assistant.system_prompt
            && prompt.trim().is_empty()
        {
            issues.push(ConfigIssue::warning(
                "assistant.system_prompt",
                "empty system prompt; the model gets no persona",
            ));
        }

        if self.search.enabled && self.search.trigger().keywords().is_empty() {
            issues.push(ConfigIssue::warning(
                "search.keywords",
                "search is enabled but no keywords are set, so it never runs",
            ));
        }
        if self.search.timeout_secs == 0 {
            issues.push(ConfigIssue::error("search.timeout_secs", "timeout cannot be 0"));
        }

        if self.speech.rate == 0 {
            issues.push(ConfigIssue::error("speech.rate", "speech rate cannot be 0"));
        }

        if self.video.enabled && self.video.dir.trim().is_empty() {
            issues.push(ConfigIssue::error("video.dir", "video directory cannot be empty"));
        }

        if self.web.port == 0 {
            issues.push(ConfigIssue::error("web.port", "port cannot be 0"));
        }

        issues
    }

    /// Per-question settings built from this file.
    pub fn assistant_settings(&self) -> AssistantSettings {
        let template = match &self.assistant.system_prompt {
            Some(prompt) => PromptTemplate::default().with_system_prompt(prompt.clone()),
            None => PromptTemplate::default(),
        };

        AssistantSettings::default()
            .with_model(self.gemini.model.clone())
            .with_params(self.generation)
            .with_template(template)
            .with_trigger(self.search.trigger())
            .with_web_search(self.search.enabled)
            .with_word_delay(Duration::from_millis(self.assistant.word_delay_ms))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::issue::Severity;
    use nico_application::NarrationMode;
    use nico_domain::GeminiModel;

    #[test]
    fn test_deserialize_full_config() {
        let toml_str = r#"
[assistant]
system_prompt = "Eres Nico."
word_delay_ms = 0

[gemini]
model = "gemini-2.0-flash-lite-001"
stream = true

[generation]
temperature = 0.2
top_p = 0.5
max_output_tokens = 512

[search]
keywords = ["Clima", "hoy"]

[speech]
narration = "sequential"
preferred_voices = ["mexican-mbrola-1"]

[video]
dir = "/srv/nico/videos"

[web]
port = 9000

[repl]
history_file = "~/.local/share/nico/history.txt"

[logging]
transcript = true
"#;

        let config: FileConfig = toml::from_str(toml_str).unwrap();
        assert_eq!(config.gemini.model, GeminiModel::Gemini20FlashLite001);
        assert!(config.gemini.stream);
        assert_eq!(config.generation.max_output_tokens, 512);
        assert_eq!(config.speech.narration, NarrationMode::Sequential);
        assert_eq!(config.speech.voice_preference().preferred, vec!["mexican-mbrola-1"]);
        assert_eq!(config.video.dir, "/srv/nico/videos");
        assert_eq!(config.web.bind_address(), "127.0.0.1:9000");
        assert!(config.logging.transcript);

        let settings = config.assistant_settings();
        assert_eq!(settings.template.system_prompt, "Eres Nico.");
        assert_eq!(settings.word_delay, Duration::ZERO);
        assert_eq!(settings.trigger.keywords(), &["clima", "hoy"]);
    }

    #[test]
    fn test_deserialize_partial_config() {
        let config: FileConfig = toml::from_str("[generation]\ntemperature = 1.0\n").unwrap();
        assert!((config.generation.temperature - 1.0).abs() < f32::EPSILON);
        assert_eq!(config.generation.max_output_tokens, 200);
        assert_eq!(config.gemini.model, GeminiModel::Gemini15Flash);
        assert_eq!(config.search.keywords.len(), 10);
        assert_eq!(config.speech.narration, NarrationMode::PerFragment);
        assert_eq!(config.video.dir, "videos");
    }

    #[test]
    fn test_custom_model_name() {
        let config: FileConfig = toml::from_str("[gemini]\nmodel = \"gemini-exp\"\n").unwrap();
        assert_eq!(config.gemini.model, GeminiModel::Custom("gemini-exp".to_string()));
    }

    #[test]
    fn test_validate_valid_config() {
        assert!(FileConfig::default().validate().is_empty());
    }

    #[test]
    fn test_validate_reports_out_of_range_params() {
        let mut config = FileConfig::default();
        config.generation.temperature = 3.0;
        config.generation.max_output_tokens = 10;
        config.web.port = 0;

        let issues = config.validate();
        let fields: Vec<&str> = issues.iter().map(|i| i.field.as_str()).collect();
        assert_eq!(
            fields,
            vec!["generation.temperature", "generation.max_output_tokens", "web.port"]
        );
        assert!(issues.iter().all(|i| i.severity == Severity::Error));
    }

    #[test]
    fn test_validate_warnings() {
        let mut config = FileConfig::default();
        config.gemini.api_key = Some("secret".to_string());
        config.search.keywords = vec!["  ".to_string()];
        config.assistant.word_delay_ms = 5_000;

        let issues = config.validate();
        assert_eq!(issues.len(), 3);
        assert!(issues.iter().all(|i| !i.is_error()));
        assert!(!issues.iter().any(|i| i.message.contains("secret")));
    }

    #[test]
    fn test_api_key_resolution() {
        let mut gemini = FileGeminiConfig::default();
        let env = |name: &str| (name == "GEMINI_API_KEY").then(|| "from-env".to_string());

        assert_eq!(gemini.resolve_api_key_with(env), Some("from-env".to_string()));

        gemini.api_key = Some("inline".to_string());
        assert_eq!(gemini.resolve_api_key_with(env), Some("inline".to_string()));

        gemini.api_key = Some("   ".to_string());
        gemini.api_key_env = "OTHER".to_string();
        assert_eq!(gemini.resolve_api_key_with(env), None);
    }
}
