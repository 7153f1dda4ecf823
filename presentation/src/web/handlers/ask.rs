//! `GET /api/ask?q=...` streams one answer as server-sent events.
//!
//! Besides `q`, the page sends its sidebar choices (`model`, `temperature`,
//! `top_p`, `max_tokens`, `system_prompt`). Each one present overrides the
//! server default for that question only.

use crate::web::sse::{SseSurface, WebEvent};
use crate::web::state::AppState;
use axum::{
    extract::{Query, State},
    response::sse::{Event, KeepAlive, Sse},
};
use futures::stream::Stream;
use nico_application::{AskInput, AssistantSettings};
use nico_domain::{GeminiModel, Question};
use serde::Deserialize;
use std::convert::Infallible;
use tokio::sync::mpsc;
use tokio_stream::StreamExt;
use tokio_stream::wrappers::UnboundedReceiverStream;
use tracing::{info, warn};

#[derive(Debug, Default, Deserialize)]
pub struct AskParams {
    #[serde(default)]
    pub q: String,
    pub model: Option<String>,
    pub temperature: Option<f32>,
    pub top_p: Option<f32>,
    pub max_tokens: Option<u32>,
    pub system_prompt: Option<String>,
}

impl AskParams {
    pub fn question(q: impl Into<String>) -> Self {
        Self {
            q: q.into(),
            ..Self::default()
        }
    }

    /// Overlay the page's choices on `state.settings`.
    ///
    /// Only models offered by the page are accepted. Parameter ranges are
    /// left to the use case, which rejects the whole question.
    pub fn settings(&self, state: &AppState) -> Result<AssistantSettings, String> {
        let mut settings = state.settings.clone();

        if let Some(name) = self.model.as_deref().map(str::trim).filter(|m| !m.is_empty()) {
            let model = GeminiModel::from(name);
            if model != settings.model && !state.models.contains(&model) {
                return Err(format!("Unknown model '{}'", name));
            }
            settings.model = model;
        }
        if let Some(temperature) = self.temperature {
            settings.params.temperature = temperature;
        }
        if let Some(top_p) = self.top_p {
            settings.params.top_p = top_p;
        }
        if let Some(max_tokens) = self.max_tokens {
            settings.params.max_output_tokens = max_tokens;
        }
        if let Some(prompt) = self.system_prompt.as_deref().filter(|p| !p.trim().is_empty()) {
            settings.template.system_prompt = prompt.to_string();
        }
        Ok(settings)
    }
}

pub async fn ask(
    State(state): State<AppState>,
    Query(params): Query<AskParams>,
) -> Sse<impl Stream<Item = Result<Event, Infallible>>> {
    info!("SSE question received ({} chars)", params.q.chars().count());

    let receiver = spawn_question(state, params);
    let stream = UnboundedReceiverStream::new(receiver).map(|event| Ok(event.to_event()));

    Sse::new(stream).keep_alive(KeepAlive::default())
}

/// Answer `params.q` in a background task and return its events.
///
/// A blank question produces a single `done` event.
pub fn spawn_question(state: AppState, params: AskParams) -> mpsc::UnboundedReceiver<WebEvent> {
    let (tx, rx) = mpsc::unbounded_channel();

    let Some(question) = Question::try_new(params.q.as_str()) else {
        let _ = tx.send(WebEvent::Done { success: false });
        return rx;
    };

    let settings = match params.settings(&state) {
        Ok(settings) => settings,
        Err(message) => {
            warn!("Question rejected: {}", message);
            let _ = tx.send(WebEvent::Error { message });
            let _ = tx.send(WebEvent::Done { success: false });
            return rx;
        }
    };

    tokio::spawn(async move {
        let surface = SseSurface::new(tx.clone());
        let input = AskInput::new(question, settings);
        let result = tokio::select! {
            biased;
            _ = state.shutdown.cancelled() => {
                let _ = tx.send(WebEvent::Done { success: false });
                return;
            }
            result = state.use_case.execute(input, &surface) => result,
        };
        if let Err(e) = result {
            warn!("Question rejected: {}", e);
            let _ = tx.send(WebEvent::Error {
                message: e.to_string(),
            });
            let _ = tx.send(WebEvent::Done { success: false });
        }
    });

    rx
}

#[cfg(test)]
mod tests {
    use super::*;
    use nico_application::{
        AskAssistantUseCase, AssistantSettings, GatewayError, GenerationRequest, LlmGateway,
    };
    use std::sync::{Arc, Mutex};
    use std::time::Duration;

    struct CannedGateway(Result<&'static str, u16>);

    #[derive(Clone, Default)]
    struct CapturingGateway {
        requests: Arc<Mutex<Vec<GenerationRequest>>>,
    }

    #[async_trait::async_trait]
    impl LlmGateway for CapturingGateway {
        async fn generate(&self, request: &GenerationRequest) -> Result<String, GatewayError> {
            self.requests.lock().unwrap().push(request.clone());
            Ok("listo".to_string())
        }
    }

    #[async_trait::async_trait]
    impl LlmGateway for CannedGateway {
        async fn generate(&self, _request: &GenerationRequest) -> Result<String, GatewayError> {
            match self.0 {
                Ok(text) => Ok(text.to_string()),
                Err(status) => Err(GatewayError::Http {
                    status,
                    body: "quota exceeded".to_string(),
                }),
            }
        }
    }

    fn state(gateway: impl LlmGateway + 'static) -> AppState {
        let use_case = AskAssistantUseCase::new(Arc::new(gateway));
        let settings = AssistantSettings::default().with_word_delay(Duration::ZERO);
        AppState::new(Arc::new(use_case), settings)
    }

    async fn collect(mut rx: mpsc::UnboundedReceiver<WebEvent>) -> Vec<WebEvent> {
        let mut events = Vec::new();
        while let Some(event) = rx.recv().await {
            events.push(event);
        }
        events
    }

    #[tokio::test]
    async fn streams_question_answer_and_done() {
        let rx = spawn_question(state(CannedGateway(Ok("Hola desde Morelia"))), AskParams::question("hola"));
        let events = collect(rx).await;

        let names: Vec<&str> = events.iter().map(WebEvent::event_type).collect();
        assert_eq!(names, vec!["question", "answer", "answer", "answer", "done"]);
        assert_eq!(
            events[3],
            WebEvent::Answer {
                fragment: "Morelia ".into(),
                text: "Hola desde Morelia ".into()
            }
        );
        assert_eq!(events[4], WebEvent::Done { success: true });
    }

    #[tokio::test]
    async fn gateway_failure_becomes_error_event() {
        let rx = spawn_question(state(CannedGateway(Err(429))), AskParams::question("hola"));
        let events = collect(rx).await;
        assert!(events.contains(&WebEvent::Error {
            message: "⚠️ Error al conectar con Gemini: quota exceeded".into()
        }));
        assert_eq!(events.last(), Some(&WebEvent::Done { success: false }));
    }

    #[tokio::test]
    async fn shutdown_ends_the_stream() {
        let state = state(CannedGateway(Ok("uno dos tres")))
            .with_shutdown(tokio_util::sync::CancellationToken::new());
        state.shutdown.cancel();
        let events = collect(spawn_question(state, AskParams::question("hola"))).await;
        assert_eq!(events.last(), Some(&WebEvent::Done { success: false }));
    }

    #[tokio::test]
    async fn blank_question_is_ignored() {
        let events = collect(spawn_question(
            state(CannedGateway(Ok("unused"))),
            AskParams::question("   "),
        ))
        .await;
        assert_eq!(events, vec![WebEvent::Done { success: false }]);
    }

    #[tokio::test]
    async fn page_choices_override_server_defaults() {
        let gateway = CapturingGateway::default();
        let params = AskParams {
            q: "hola".into(),
            model: Some("gemini-1.5-pro".into()),
            temperature: Some(1.25),
            top_p: Some(0.5),
            max_tokens: Some(512),
            system_prompt: Some("Responde como poeta.".into()),
        };
        let events = collect(spawn_question(state(gateway.clone()), params)).await;
        assert_eq!(events.last(), Some(&WebEvent::Done { success: true }));

        let requests = gateway.requests.lock().unwrap();
        assert_eq!(requests.len(), 1);
        let request = &requests[0];
        assert_eq!(request.model, GeminiModel::Gemini15Pro);
        assert_eq!(request.params.temperature, 1.25);
        assert_eq!(request.params.top_p, 0.5);
        assert_eq!(request.params.max_output_tokens, 512);
        assert!(request.prompt.starts_with("Responde como poeta."));
    }

    #[tokio::test]
    async fn out_of_range_choice_becomes_error_event() {
        let gateway = CapturingGateway::default();
        let params = AskParams {
            temperature: Some(3.0),
            ..AskParams::question("hola")
        };
        let events = collect(spawn_question(state(gateway.clone()), params)).await;

        assert!(matches!(
            &events[0],
            WebEvent::Error { message } if message.contains("temperature 3")
        ));
        assert_eq!(events.last(), Some(&WebEvent::Done { success: false }));
        assert!(gateway.requests.lock().unwrap().is_empty());
    }

    #[tokio::test]
    async fn unknown_model_is_refused() {
        let gateway = CapturingGateway::default();
        let params = AskParams {
            model: Some("../../secret".into()),
            ..AskParams::question("hola")
        };
        let events = collect(spawn_question(state(gateway.clone()), params)).await;

        assert_eq!(
            events,
            vec![
                WebEvent::Error {
                    message: "Unknown model '../../secret'".into()
                },
                WebEvent::Done { success: false },
            ]
        );
        assert!(gateway.requests.lock().unwrap().is_empty());
    }

    #[test]
    fn blank_system_prompt_keeps_default() {
        let state = state(CannedGateway(Ok("unused")));
        let params = AskParams {
            system_prompt: Some("   ".into()),
            ..AskParams::question("hola")
        };
        let settings = params.settings(&state).unwrap();
        assert_eq!(
            settings.template.system_prompt,
            state.settings.template.system_prompt
        );
    }
}
