//! Prompt template sent to the generation API.

use serde::{Deserialize, Serialize};

/// Default persona for the assistant.
pub const DEFAULT_SYSTEM_PROMPT: &str =
    "Eres un asistente de la UMSNH. Responde claro, conciso y en 1–3 líneas.";

/// Composes the single prompt string from its parts.
///
/// The labels are part of the persona: the model sees them verbatim.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct PromptTemplate {
    pub system_prompt: String,
    pub instruction_label: String,
    pub web_label: String,
    pub assistant_marker: String,
}

impl Default for PromptTemplate {
    fn default() -> Self {
        Self {
            system_prompt: DEFAULT_SYSTEM_PROMPT.to_string(),
            instruction_label: "Instrucción:".to_string(),
            web_label: "Información web (si aplica):".to_string(),
            assistant_marker: "assistant:".to_string(),
        }
    }
}

impl PromptTemplate {
    pub fn with_system_prompt(mut self, system_prompt: impl Into<String>) -> Self {
        self.system_prompt = system_prompt.into();
        self
    }

    /// Build the full prompt. `web_context` may be empty; its label is
    /// still emitted.
    pub fn compose(&self, question: &str, web_context: &str) -> String {
        format!(
            "{}\n\n{} {}\n\n{} {}\n\n{}",
            self.system_prompt,
            self.instruction_label,
            question,
            self.web_label,
            web_context,
            self.assistant_marker
        )
    }
}
