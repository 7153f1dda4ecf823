//! Response streaming relay.
//!
//! Replays a completion to the display surface and the narrator one
//! fragment at a time, sleeping a fixed cadence after each fragment. The
//! cadence is independent of how the completion arrived: a single
//! `Completed` event is cut into fragments exactly like a run of `Delta`s.

use crate::ports::llm_gateway::StreamHandle;
use crate::ports::surface::AnswerSurface;
use crate::services::narrator::Narrator;
use nico_domain::{AnswerBuffer, StreamEvent, split_fragments};
use std::time::Duration;
use tracing::debug;

/// Result of one relay run.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RelayOutcome {
    /// Fragments replayed.
    pub fragments: usize,
    /// Error reported by the stream, already shown on the surface.
    pub error: Option<String>,
}

impl RelayOutcome {
    pub fn is_success(&self) -> bool {
        self.error.is_none()
    }
}

/// Replays fragments at a fixed cadence.
#[derive(Debug, Clone, Copy)]
pub struct ResponseRelay {
    cadence: Duration,
}

impl Default for ResponseRelay {
    fn default() -> Self {
        Self::new(Duration::from_millis(40))
    }
}

impl ResponseRelay {
    pub fn new(cadence: Duration) -> Self {
        Self { cadence }
    }

    pub fn cadence(&self) -> Duration {
        self.cadence
    }

    /// Drain `handle` into `buffer`, mirroring every fragment to `surface`
    /// and `narrator`.
    ///
    /// Text from `Delta` events is held back until a space arrives, so a
    /// word split across two deltas is replayed whole. An `Error` event
    /// flushes what was received, then reports the message through
    /// [`AnswerSurface::on_answer_error`] and the narrator.
    pub async fn relay(
        &self,
        mut handle: StreamHandle,
        surface: &dyn AnswerSurface,
        narrator: Option<&Narrator>,
        buffer: &mut AnswerBuffer,
    ) -> RelayOutcome {
        let mut outcome = RelayOutcome::default();
        let mut pending = String::new();
        let mut saw_delta = false;

        while let Some(event) = handle.next().await {
            match event {
                StreamEvent::Delta(chunk) => {
                    saw_delta = true;
                    pending.push_str(&chunk);
                    if let Some(idx) = pending.rfind(' ') {
                        let ready = pending[..idx].to_string();
                        pending.replace_range(..=idx, "");
                        for piece in ready.split(' ') {
                            self.emit(&format!("{piece} "), surface, narrator, buffer, &mut outcome)
                                .await;
                        }
                    }
                }
                StreamEvent::Completed(text) => {
                    if !saw_delta {
                        pending.push_str(&text);
                    }
                    break;
                }
                StreamEvent::Error(message) => {
                    self.flush(&mut pending, surface, narrator, buffer, &mut outcome)
                        .await;
                    surface.on_answer_error(&message);
                    if let Some(narrator) = narrator {
                        narrator.narrate(&message);
                    }
                    outcome.error = Some(message);
                    return outcome;
                }
            }
        }

        self.flush(&mut pending, surface, narrator, buffer, &mut outcome)
            .await;
        debug!("Relayed {} fragments", outcome.fragments);
        outcome
    }

    async fn flush(
        &self,
        pending: &mut String,
        surface: &dyn AnswerSurface,
        narrator: Option<&Narrator>,
        buffer: &mut AnswerBuffer,
        outcome: &mut RelayOutcome,
    ) {
        let text = std::mem::take(pending);
        for fragment in split_fragments(&text) {
            self.emit(&fragment, surface, narrator, buffer, outcome).await;
        }
    }

    async fn emit(
        &self,
        fragment: &str,
        surface: &dyn AnswerSurface,
        narrator: Option<&Narrator>,
        buffer: &mut AnswerBuffer,
        outcome: &mut RelayOutcome,
    ) {
        buffer.append(fragment);
        outcome.fragments += 1;
        surface.on_answer_update(fragment, buffer);
        if let Some(narrator) = narrator {
            narrator.narrate(fragment);
        }
        if !self.cadence.is_zero() {
            tokio::time::sleep(self.cadence).await;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::NarrationMode;
    use crate::ports::speech::{SpeechEngine, SpeechError};
    use crate::ports::surface::StatusLevel;
    use nico_domain::{Question, Voice, VoicePreference, VoiceSettings};
    use std::sync::{Arc, Mutex};
    use tokio::sync::mpsc;

    #[derive(Default)]
    struct RecordingEngine {
        spoken: Mutex<Vec<String>>,
    }

    impl SpeechEngine for RecordingEngine {
        fn voices(&self) -> Result<Vec<Voice>, SpeechError> {
            Ok(Vec::new())
        }

        fn speak(&self, text: &str, _settings: &VoiceSettings) -> Result<(), SpeechError> {
            self.spoken.lock().unwrap().push(text.to_string());
            Ok(())
        }
    }

    #[derive(Default)]
    struct RecordingSurface {
        fragments: Mutex<Vec<String>>,
        snapshots: Mutex<Vec<String>>,
        errors: Mutex<Vec<String>>,
    }

    impl AnswerSurface for RecordingSurface {
        fn on_status(&self, _level: StatusLevel, _message: &str) {}
        fn on_question(&self, _question: &Question) {}

        fn on_answer_update(&self, fragment: &str, answer: &AnswerBuffer) {
            self.fragments.lock().unwrap().push(fragment.to_string());
            self.snapshots.lock().unwrap().push(answer.as_str().to_string());
        }

        fn on_answer_error(&self, message: &str) {
            self.errors.lock().unwrap().push(message.to_string());
        }

        fn on_answer_complete(&self, _answer: &AnswerBuffer) {}
    }

    #[tokio::test(start_paused = true)]
    async fn completed_text_is_replayed_word_by_word_at_cadence() {
        let relay = ResponseRelay::default();
        let surface = RecordingSurface::default();
        let mut buffer = AnswerBuffer::new();

        let start = tokio::time::Instant::now();
        let outcome = relay
            .relay(
                StreamHandle::completed("La UMSNH está en Morelia"),
                &surface,
                None,
                &mut buffer,
            )
            .await;

        assert!(outcome.is_success());
        assert_eq!(outcome.fragments, 5);
        assert_eq!(buffer.as_str(), "La UMSNH está en Morelia ");
        assert_eq!(
            *surface.fragments.lock().unwrap(),
            vec!["La ", "UMSNH ", "está ", "en ", "Morelia "]
        );
        assert!(start.elapsed() >= Duration::from_millis(200));
    }

    #[tokio::test]
    async fn snapshots_only_grow() {
        let relay = ResponseRelay::new(Duration::ZERO);
        let surface = RecordingSurface::default();
        let mut buffer = AnswerBuffer::new();
        relay
            .relay(
                StreamHandle::completed("uno dos tres"),
                &surface,
                None,
                &mut buffer,
            )
            .await;

        let snapshots = surface.snapshots.lock().unwrap();
        assert_eq!(*snapshots, vec!["uno ", "uno dos ", "uno dos tres "]);
    }

    #[tokio::test]
    async fn deltas_are_rejoined_on_word_boundaries() {
        let relay = ResponseRelay::new(Duration::ZERO);
        let surface = RecordingSurface::default();
        let mut buffer = AnswerBuffer::new();

        let (tx, rx) = mpsc::channel(8);
        for chunk in ["Bien", "venido a ", "la uni", "versidad"] {
            tx.send(StreamEvent::Delta(chunk.to_string())).await.unwrap();
        }
        tx.send(StreamEvent::Completed("ignored".to_string()))
            .await
            .unwrap();
        drop(tx);

        relay
            .relay(StreamHandle::new(rx), &surface, None, &mut buffer)
            .await;

        assert_eq!(
            *surface.fragments.lock().unwrap(),
            vec!["Bienvenido ", "a ", "la ", "universidad "]
        );
        assert_eq!(buffer.as_str(), "Bienvenido a la universidad ");
    }

    #[tokio::test]
    async fn error_event_flushes_then_reports() {
        let relay = ResponseRelay::new(Duration::ZERO);
        let surface = RecordingSurface::default();
        let mut buffer = AnswerBuffer::new();

        let (tx, rx) = mpsc::channel(4);
        tx.send(StreamEvent::Delta("parcial".to_string()))
            .await
            .unwrap();
        tx.send(StreamEvent::Error("⚠️ Error al conectar con Gemini: quota".to_string()))
            .await
            .unwrap();
        drop(tx);

        let outcome = relay
            .relay(StreamHandle::new(rx), &surface, None, &mut buffer)
            .await;

        assert_eq!(
            outcome.error.as_deref(),
            Some("⚠️ Error al conectar con Gemini: quota")
        );
        assert_eq!(buffer.as_str(), "parcial ");
        assert_eq!(surface.errors.lock().unwrap().len(), 1);
    }

    #[tokio::test]
    async fn empty_completion_replays_nothing() {
        let relay = ResponseRelay::new(Duration::ZERO);
        let surface = RecordingSurface::default();
        let mut buffer = AnswerBuffer::new();
        let outcome = relay
            .relay(StreamHandle::completed(""), &surface, None, &mut buffer)
            .await;
        assert_eq!(outcome.fragments, 0);
        assert!(buffer.is_empty());
    }

    #[tokio::test]
    async fn fragments_and_error_are_narrated_but_error_is_not_appended() {
        let relay = ResponseRelay::new(Duration::ZERO);
        let surface = RecordingSurface::default();
        let engine = Arc::new(RecordingEngine::default());
        let preference = VoicePreference {
            pause_after_ms: 0,
            ..VoicePreference::default()
        };
        let narrator = Narrator::new(engine.clone(), &preference, NarrationMode::Sequential);
        let mut buffer = AnswerBuffer::new();

        let (tx, rx) = mpsc::channel(4);
        tx.send(StreamEvent::Delta("Hola ".to_string())).await.unwrap();
        tx.send(StreamEvent::Delta("soy Nico ".to_string()))
            .await
            .unwrap();
        tx.send(StreamEvent::Error("Error al conectar con Gemini: Timeout".to_string()))
            .await
            .unwrap();
        drop(tx);

        let outcome = relay
            .relay(StreamHandle::new(rx), &surface, Some(&narrator), &mut buffer)
            .await;
        narrator.wait_idle();

        assert!(!outcome.is_success());
        assert_eq!(buffer.as_str(), "Hola soy Nico ");
        assert_eq!(
            *engine.spoken.lock().unwrap(),
            vec!["Hola", "soy", "Nico", "Error al conectar con Gemini: Timeout"]
        );
    }
}
