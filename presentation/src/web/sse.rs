//! Server-sent events surface
//!
//! [`SseSurface`] turns surface callbacks into [`WebEvent`]s on a channel;
//! the ask handler forwards them to the browser as SSE.

use axum::response::sse::Event;
use nico_application::{AnswerSurface, StatusLevel};
use nico_domain::{AnswerBuffer, Question, VideoEmbed};
use serde::Serialize;
use tokio::sync::mpsc;

/// One message for the page.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(untagged)]
pub enum WebEvent {
    Status { level: String, message: String },
    Video { name: String, mime: String, data_uri: String },
    Question { text: String },
    /// `text` is the whole answer so far.
    Answer { fragment: String, text: String },
    Error { message: String },
    Done { success: bool },
}

impl WebEvent {
    /// SSE event name.
    pub fn event_type(&self) -> &'static str {
        match self {
            WebEvent::Status { .. } => "status",
            WebEvent::Video { .. } => "video",
            WebEvent::Question { .. } => "question",
            WebEvent::Answer { .. } => "answer",
            WebEvent::Error { .. } => "error",
            WebEvent::Done { .. } => "done",
        }
    }

    pub fn to_sse_data(&self) -> String {
        serde_json::to_string(self).unwrap_or_else(|_| "{}".to_string())
    }

    pub fn to_event(&self) -> Event {
        Event::default()
            .event(self.event_type())
            .data(self.to_sse_data())
    }
}

/// Surface that forwards everything to a channel.
pub struct SseSurface {
    tx: mpsc::UnboundedSender<WebEvent>,
    failed: std::sync::atomic::AtomicBool,
}

impl SseSurface {
    pub fn new(tx: mpsc::UnboundedSender<WebEvent>) -> Self {
        Self {
            tx,
            failed: std::sync::atomic::AtomicBool::new(false),
        }
    }

    fn send(&self, event: WebEvent) {
        // The browser may have gone away; nothing to do then
        let _ = self.tx.send(event);
    }
}

impl AnswerSurface for SseSurface {
    fn on_status(&self, level: StatusLevel, message: &str) {
        self.send(WebEvent::Status {
            level: level.as_str().to_string(),
            message: message.to_string(),
        });
    }

    fn on_video(&self, embed: &VideoEmbed) {
        self.send(WebEvent::Video {
            name: embed.name.clone(),
            mime: embed.mime.clone(),
            data_uri: embed.data_uri.clone(),
        });
    }

    fn on_question(&self, question: &Question) {
        self.send(WebEvent::Question {
            text: question.content().to_string(),
        });
    }

    fn on_answer_update(&self, fragment: &str, answer: &AnswerBuffer) {
        self.send(WebEvent::Answer {
            fragment: fragment.to_string(),
            text: answer.as_str().to_string(),
        });
    }

    fn on_answer_error(&self, message: &str) {
        self.failed
            .store(true, std::sync::atomic::Ordering::Relaxed);
        self.send(WebEvent::Error {
            message: message.to_string(),
        });
    }

    fn on_answer_complete(&self, _answer: &AnswerBuffer) {
        let failed = self.failed.load(std::sync::atomic::Ordering::Relaxed);
        self.send(WebEvent::Done { success: !failed });
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn event_names() {
        let events = [
            (WebEvent::Status { level: "info".into(), message: "m".into() }, "status"),
            (WebEvent::Question { text: "q".into() }, "question"),
            (WebEvent::Error { message: "e".into() }, "error"),
            (WebEvent::Done { success: true }, "done"),
        ];
        for (event, name) in events {
            assert_eq!(event.event_type(), name);
        }
    }

    #[test]
    fn payload_is_flat_json() {
        let event = WebEvent::Answer {
            fragment: "Morelia ".into(),
            text: "En Morelia ".into(),
        };
        let value: serde_json::Value = serde_json::from_str(&event.to_sse_data()).unwrap();
        assert_eq!(value["fragment"], "Morelia ");
        assert_eq!(value["text"], "En Morelia ");
    }

    #[test]
    fn surface_forwards_in_order_and_reports_failure() {
        let (tx, mut rx) = mpsc::unbounded_channel();
        let surface = SseSurface::new(tx);
        let mut buffer = AnswerBuffer::new();

        surface.on_status(StatusLevel::Warning, "No videos");
        surface.on_question(&Question::new("hola").unwrap());
        buffer.append("parcial ");
        surface.on_answer_update("parcial ", &buffer);
        surface.on_answer_error("⚠️ Error al conectar con Gemini: 500");
        surface.on_answer_complete(&buffer);

        let names: Vec<&str> = std::iter::from_fn(|| rx.try_recv().ok())
            .map(|e| e.event_type())
            .collect();
        assert_eq!(names, vec!["status", "question", "answer", "error", "done"]);
    }

    #[test]
    fn done_is_successful_without_error() {
        let (tx, mut rx) = mpsc::unbounded_channel();
        let surface = SseSurface::new(tx);
        surface.on_answer_complete(&AnswerBuffer::new());
        assert_eq!(rx.try_recv().unwrap(), WebEvent::Done { success: true });
    }

    #[test]
    fn closed_channel_is_ignored() {
        let (tx, rx) = mpsc::unbounded_channel();
        drop(rx);
        let surface = SseSurface::new(tx);
        surface.on_status(StatusLevel::Info, "nobody listening");
    }
}
