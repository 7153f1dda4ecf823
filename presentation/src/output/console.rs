//! Console answer surface
//!
//! Prints status lines in colour, shows a spinner while Gemini is thinking,
//! then writes the answer inline as fragments arrive.

use colored::Colorize;
use indicatif::{ProgressBar, ProgressStyle};
use nico_application::{AnswerSurface, StatusLevel};
use nico_domain::{AnswerBuffer, GeminiModel, Question, VideoEmbed};
use std::io::Write;
use std::sync::Mutex;
use std::time::Duration;

/// Renders a question on the terminal.
pub struct ConsoleSurface {
    show_progress: bool,
    spinner: Mutex<Option<ProgressBar>>,
    answer_started: Mutex<bool>,
}

impl ConsoleSurface {
    pub fn new() -> Self {
        Self {
            show_progress: true,
            spinner: Mutex::new(None),
            answer_started: Mutex::new(false),
        }
    }

    /// Set whether to show the spinner
    pub fn with_progress(mut self, show: bool) -> Self {
        self.show_progress = show;
        self
    }

    fn spinner_style() -> ProgressStyle {
        ProgressStyle::default_spinner()
            .template("{spinner:.green} {msg}")
            .unwrap_or_else(|_| ProgressStyle::default_spinner())
    }

    fn stop_spinner(&self) {
        if let Ok(mut spinner) = self.spinner.lock()
            && let Some(pb) = spinner.take()
        {
            pb.finish_and_clear();
        }
    }

    /// One formatted status line.
    pub fn status_line(level: StatusLevel, message: &str) -> String {
        match level {
            StatusLevel::Info => format!("{} {}", "->".cyan(), message),
            StatusLevel::Success => format!("{} {}", "v".green(), message.green()),
            StatusLevel::Warning => format!("{} {}", "!".yellow(), message.yellow()),
            StatusLevel::Error => format!("{} {}", "x".red(), message.red()),
        }
    }

    pub fn question_line(question: &Question) -> String {
        format!("{} {}", "You:".cyan().bold(), question)
    }

    pub fn answer_prefix() -> String {
        format!("{} ", "Nico:".magenta().bold())
    }
}

impl Default for ConsoleSurface {
    fn default() -> Self {
        Self::new()
    }
}

impl AnswerSurface for ConsoleSurface {
    fn on_status(&self, level: StatusLevel, message: &str) {
        println!("{}", Self::status_line(level, message));
    }

    fn on_video(&self, embed: &VideoEmbed) {
        println!("{} {}", "Background clip:".dimmed(), embed.name.dimmed());
    }

    fn on_question(&self, question: &Question) {
        if let Ok(mut started) = self.answer_started.lock() {
            *started = false;
        }
        println!("{}", Self::question_line(question));
    }

    fn on_generation_start(&self, model: &GeminiModel) {
        if !self.show_progress {
            return;
        }
        let pb = ProgressBar::new_spinner();
        pb.set_style(Self::spinner_style());
        pb.set_message(format!("Asking {}...", model));
        pb.enable_steady_tick(Duration::from_millis(100));
        if let Ok(mut spinner) = self.spinner.lock() {
            *spinner = Some(pb);
        }
    }

    fn on_answer_update(&self, fragment: &str, _answer: &AnswerBuffer) {
        self.stop_spinner();

        let mut stdout = std::io::stdout().lock();
        if let Ok(mut started) = self.answer_started.lock()
            && !*started
        {
            *started = true;
            let _ = write!(stdout, "{}", Self::answer_prefix());
        }
        let _ = write!(stdout, "{}", fragment);
        let _ = stdout.flush();
    }

    fn on_answer_error(&self, message: &str) {
        self.stop_spinner();
        if self.answer_started.lock().map(|s| *s).unwrap_or(false) {
            println!();
        }
        println!("{}", Self::status_line(StatusLevel::Error, message));
    }

    fn on_answer_complete(&self, answer: &AnswerBuffer) {
        self.stop_spinner();
        if !answer.is_empty() {
            println!();
        }
        println!();
    }
}
