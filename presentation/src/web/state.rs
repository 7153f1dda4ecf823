//! Shared state handed to every request.

use nico_application::{AskAssistantUseCase, AssistantSettings};
use nico_domain::GeminiModel;
use std::sync::Arc;
use tokio_util::sync::CancellationToken;

#[derive(Clone)]
pub struct AppState {
    pub use_case: Arc<AskAssistantUseCase>,
    /// Defaults for every question; the page may override the model,
    /// sampling parameters and system prompt per request.
    pub settings: AssistantSettings,
    /// Models the page may pick from
    pub models: Vec<GeminiModel>,
    /// Page title and heading
    pub title: String,
    /// Cancelled when the server shuts down; stops answers in flight.
    pub shutdown: CancellationToken,
}

impl AppState {
    pub fn new(use_case: Arc<AskAssistantUseCase>, settings: AssistantSettings) -> Self {
        Self {
            use_case,
            settings,
            models: GeminiModel::selectable(),
            title: "Hola soy Nico tu asistente de la UMSNH".to_string(),
            shutdown: CancellationToken::new(),
        }
    }

    pub fn with_shutdown(mut self, shutdown: CancellationToken) -> Self {
        self.shutdown = shutdown;
        self
    }

    pub fn with_title(mut self, title: impl Into<String>) -> Self {
        self.title = title.into();
        self
    }

    pub fn with_models(mut self, models: Vec<GeminiModel>) -> Self {
        self.models = models;
        self
    }
}
