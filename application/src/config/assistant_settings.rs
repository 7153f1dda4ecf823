//! Per-question settings for the ask-assistant use case.
//!
//! [`AssistantSettings`] groups the model choice, sampling parameters,
//! prompt template, search trigger and relay cadence. These are
//! application-layer concerns: the presentation layer builds them from the
//! config file and CLI flags, then hands a copy to every question.

use nico_domain::{GeminiModel, GenerationParams, PromptTemplate, SearchTrigger};
use serde::{Deserialize, Serialize};
use std::time::Duration;

/// How narration units are scheduled.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum NarrationMode {
    /// No speech at all.
    Off,
    /// One detached thread per fragment; utterances may overlap.
    #[default]
    PerFragment,
    /// A single worker speaks fragments in arrival order.
    Sequential,
}

impl std::str::FromStr for NarrationMode {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "off" | "none" | "disabled" => Ok(NarrationMode::Off),
            "per-fragment" | "per_fragment" | "fragment" => Ok(NarrationMode::PerFragment),
            "sequential" | "queue" => Ok(NarrationMode::Sequential),
            other => Err(format!(
                "unknown narration mode '{}' (expected off, per-fragment or sequential)",
                other
            )),
        }
    }
}

/// Settings applied to one question.
#[derive(Debug, Clone)]
pub struct AssistantSettings {
    /// Model answering the question.
    pub model: GeminiModel,
    /// Sampling parameters.
    pub params: GenerationParams,
    /// Prompt layout and persona.
    pub template: PromptTemplate,
    /// Keywords that enable the web search step.
    pub trigger: SearchTrigger,
    /// Whether the web search step may run at all.
    pub web_search: bool,
    /// Delay between replayed fragments.
    pub word_delay: Duration,
}

impl Default for AssistantSettings {
    fn default() -> Self {
        Self {
            model: GeminiModel::default(),
            params: GenerationParams::default(),
            template: PromptTemplate::default(),
            trigger: SearchTrigger::default(),
            web_search: true,
            word_delay: Duration::from_millis(40),
        }
    }
}

impl AssistantSettings {
    // ==================== Builder Methods ====================

    pub fn with_model(mut self, model: GeminiModel) -> Self {
        self.model = model;
        self
    }

    pub fn with_params(mut self, params: GenerationParams) -> Self {
        self.params = params;
        self
    }

    pub fn with_template(mut self, template: PromptTemplate) -> Self {
        self.template = template;
        self
    }

    pub fn with_trigger(mut self, trigger: SearchTrigger) -> Self {
        self.trigger = trigger;
        self
    }

    pub fn with_web_search(mut self, enabled: bool) -> Self {
        self.web_search = enabled;
        self
    }

    pub fn with_word_delay(mut self, delay: Duration) -> Self {
        self.word_delay = delay;
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_match_assistant_behavior() {
        let settings = AssistantSettings::default();
        assert_eq!(settings.model, GeminiModel::Gemini15Flash);
        assert_eq!(settings.word_delay, Duration::from_millis(40));
        assert!(settings.web_search);
        assert_eq!(settings.trigger.keywords().len(), 10);
    }

    #[test]
    fn builder_overrides() {
        let settings = AssistantSettings::default()
            .with_model(GeminiModel::Gemini15Pro)
            .with_web_search(false)
            .with_word_delay(Duration::ZERO);
        assert_eq!(settings.model, GeminiModel::Gemini15Pro);
        assert!(!settings.web_search);
        assert_eq!(settings.word_delay, Duration::ZERO);
    }

    #[test]
    fn narration_mode_parsing() {
        assert_eq!("off".parse::<NarrationMode>(), Ok(NarrationMode::Off));
        assert_eq!(
            "Per-Fragment".parse::<NarrationMode>(),
            Ok(NarrationMode::PerFragment)
        );
        assert_eq!(
            "sequential".parse::<NarrationMode>(),
            Ok(NarrationMode::Sequential)
        );
        assert!("loud".parse::<NarrationMode>().is_err());
    }
}
