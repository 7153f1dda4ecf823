//! LLM Gateway port
//!
//! Defines the interface for communicating with the generative-language API.

use async_trait::async_trait;
use nico_domain::{GeminiModel, GenerationParams, StreamEvent};
use thiserror::Error;
use tokio::sync::mpsc;

/// Errors that can occur during LLM gateway operations
#[derive(Error, Debug)]
pub enum GatewayError {
    /// The API answered with a non-success status.
    #[error("HTTP {status}: {body}")]
    Http { status: u16, body: String },

    #[error("Connection error: {0}")]
    ConnectionError(String),

    #[error("Invalid response: {0}")]
    InvalidResponse(String),

    #[error("Missing API key")]
    MissingApiKey,

    #[error("Timeout")]
    Timeout,
}

impl GatewayError {
    /// Message shown to the user in place of an answer.
    pub fn user_message(&self) -> String {
        match self {
            GatewayError::Http { body, .. } => {
                format!("⚠️ Error al conectar con Gemini: {}", body)
            }
            other => format!("Error al conectar con Gemini: {}", other),
        }
    }
}

/// One generation call.
#[derive(Debug, Clone, PartialEq)]
pub struct GenerationRequest {
    pub model: GeminiModel,
    pub prompt: String,
    pub params: GenerationParams,
}

impl GenerationRequest {
    pub fn new(model: GeminiModel, prompt: impl Into<String>, params: GenerationParams) -> Self {
        Self {
            model,
            prompt: prompt.into(),
            params,
        }
    }
}

/// Handle for receiving streaming events from a generation call.
///
/// Wraps an `mpsc::Receiver<StreamEvent>`.
pub struct StreamHandle {
    pub receiver: mpsc::Receiver<StreamEvent>,
}

impl StreamHandle {
    pub fn new(receiver: mpsc::Receiver<StreamEvent>) -> Self {
        Self { receiver }
    }

    /// A handle that yields a single `Completed` event.
    pub fn completed(text: impl Into<String>) -> Self {
        let (tx, rx) = mpsc::channel(1);
        // Capacity 1 and a fresh channel: try_send cannot fail here
        let _ = tx.try_send(StreamEvent::Completed(text.into()));
        Self::new(rx)
    }

    /// A handle that yields a single `Error` event.
    pub fn failed(message: impl Into<String>) -> Self {
        let (tx, rx) = mpsc::channel(1);
        let _ = tx.try_send(StreamEvent::Error(message.into()));
        Self::new(rx)
    }

    /// Receive the next event, or None when the sender is gone.
    pub async fn next(&mut self) -> Option<StreamEvent> {
        self.receiver.recv().await
    }
}

/// Gateway for text generation
///
/// Implementations (adapters) live in the infrastructure layer.
#[async_trait]
pub trait LlmGateway: Send + Sync {
    /// Send a prompt and wait for the whole completion.
    async fn generate(&self, request: &GenerationRequest) -> Result<String, GatewayError>;

    /// Send a prompt and get a streaming response.
    ///
    /// Default implementation calls `generate()` and wraps the result in a
    /// single `Completed` event.
    async fn generate_streaming(
        &self,
        request: &GenerationRequest,
    ) -> Result<StreamHandle, GatewayError> {
        let text = self.generate(request).await?;
        Ok(StreamHandle::completed(text))
    }

    /// Models this gateway can serve.
    fn available_models(&self) -> Vec<GeminiModel> {
        GeminiModel::selectable()
    }
}
