//! Answer surface port
//!
//! Defines where a question's progress and answer are shown. The console,
//! the chat REPL and the web page each implement [`AnswerSurface`].

use nico_domain::{AnswerBuffer, GeminiModel, Question, VideoEmbed};

/// Severity of a status line.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StatusLevel {
    Info,
    Success,
    Warning,
    Error,
}

impl StatusLevel {
    pub fn as_str(&self) -> &'static str {
        match self {
            StatusLevel::Info => "info",
            StatusLevel::Success => "success",
            StatusLevel::Warning => "warning",
            StatusLevel::Error => "error",
        }
    }
}

/// Callbacks fired while one question is answered.
///
/// Calls arrive in this order: any number of `on_status`, then
/// `on_video` (only when a clip was found), `on_question`,
/// `on_generation_start`, one `on_answer_update` per fragment, optionally
/// `on_answer_error`, and finally `on_answer_complete`.
pub trait AnswerSurface: Send + Sync {
    /// A status line (search progress, warnings).
    fn on_status(&self, level: StatusLevel, message: &str);

    /// A background clip to loop while the answer streams.
    fn on_video(&self, _embed: &VideoEmbed) {}

    /// The question being answered.
    fn on_question(&self, question: &Question);

    /// The generation call is about to be sent.
    fn on_generation_start(&self, _model: &GeminiModel) {}

    /// A fragment was appended; `answer` is the whole buffer so far.
    fn on_answer_update(&self, fragment: &str, answer: &AnswerBuffer);

    /// The generation failed; `message` is already worded for display.
    fn on_answer_error(&self, message: &str);

    /// The answer is finished (successfully or not). Stops the video.
    fn on_answer_complete(&self, answer: &AnswerBuffer);
}

/// No-op surface for tests and headless runs
pub struct NoSurface;

impl AnswerSurface for NoSurface {
    fn on_status(&self, _level: StatusLevel, _message: &str) {}
    fn on_question(&self, _question: &Question) {}
    fn on_answer_update(&self, _fragment: &str, _answer: &AnswerBuffer) {}
    fn on_answer_error(&self, _message: &str) {}
    fn on_answer_complete(&self, _answer: &AnswerBuffer) {}
}
