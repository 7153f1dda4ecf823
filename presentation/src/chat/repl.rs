//! REPL (Read-Eval-Print Loop) for interactive chat

use crate::output::console::ConsoleSurface;
use colored::Colorize;
use nico_application::{AskAssistantUseCase, AskInput, AssistantSettings};
use nico_domain::{GeminiModel, Question};
use reedline::{DefaultPrompt, DefaultPromptSegment, FileBackedHistory, Reedline, Signal};
use std::path::PathBuf;
use std::sync::Arc;
use tracing::warn;

const HISTORY_CAPACITY: usize = 500;

/// A parsed slash command.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ReplCommand {
    Help,
    Models,
    /// Switch model; `None` shows the current one.
    Model(Option<String>),
    /// Toggle web search for following questions.
    Search(Option<bool>),
    Quit,
    Unknown(String),
}

impl ReplCommand {
    /// Parse a line starting with `/`.
    pub fn parse(line: &str) -> Self {
        let mut parts = line.split_whitespace();
        let head = parts.next().unwrap_or_default();
        let arg = parts.next().map(str::to_string);
        match head {
            "/quit" | "/exit" | "/q" => ReplCommand::Quit,
            "/help" | "/h" | "/?" => ReplCommand::Help,
            "/models" => ReplCommand::Models,
            "/model" => ReplCommand::Model(arg),
            "/search" => ReplCommand::Search(match arg.as_deref() {
                Some("on") => Some(true),
                Some("off") => Some(false),
                _ => None,
            }),
            other => ReplCommand::Unknown(other.to_string()),
        }
    }
}

/// Interactive chat REPL
pub struct ChatRepl {
    use_case: Arc<AskAssistantUseCase>,
    settings: AssistantSettings,
    models: Vec<GeminiModel>,
    show_progress: bool,
    history_path: Option<PathBuf>,
}

impl ChatRepl {
    pub fn new(use_case: Arc<AskAssistantUseCase>, settings: AssistantSettings) -> Self {
        Self {
            use_case,
            settings,
            models: GeminiModel::selectable(),
            show_progress: true,
            history_path: None,
        }
    }

    /// Set whether to show progress
    pub fn with_progress(mut self, show: bool) -> Self {
        self.show_progress = show;
        self
    }

    /// Models listed by `/models`
    pub fn with_models(mut self, models: Vec<GeminiModel>) -> Self {
        self.models = models;
        self
    }

    pub fn with_history_path(mut self, path: Option<PathBuf>) -> Self {
        self.history_path = path;
        self
    }

    fn line_editor(&self) -> Reedline {
        let editor = Reedline::create();
        let Some(path) = &self.history_path else {
            return editor;
        };
        if let Some(parent) = path.parent() {
            let _ = std::fs::create_dir_all(parent);
        }
        match FileBackedHistory::with_file(HISTORY_CAPACITY, path.clone()) {
            Ok(history) => editor.with_history(Box::new(history)),
            Err(e) => {
                warn!("Could not open history {}: {}", path.display(), e);
                editor
            }
        }
    }

    /// Run the interactive REPL
    pub async fn run(&mut self) -> std::io::Result<()> {
        let mut editor = self.line_editor();
        let prompt = DefaultPrompt::new(
            DefaultPromptSegment::Basic("nico".to_string()),
            DefaultPromptSegment::Empty,
        );

        self.print_welcome();

        loop {
            match editor.read_line(&prompt)? {
                Signal::Success(line) => {
                    let line = line.trim();
                    if line.is_empty() {
                        continue;
                    }

                    if line.starts_with('/') {
                        if self.handle_command(ReplCommand::parse(line)) {
                            break;
                        }
                        continue;
                    }

                    self.process_question(line).await;
                }
                Signal::CtrlC => {
                    println!("^C");
                    continue;
                }
                Signal::CtrlD => {
                    println!("¡Hasta luego!");
                    break;
                }
            }
        }

        Ok(())
    }

    fn print_welcome(&self) {
        println!();
        println!("╭─────────────────────────────────────────────╮");
        println!("│    Hola, soy Nico, tu asistente de la UMSNH │");
        println!("╰─────────────────────────────────────────────╯");
        println!();
        println!("Model: {}", self.settings.model.to_string().cyan());
        println!();
        Self::print_help();
    }

    fn print_help() {
        println!("Commands:");
        println!("  /help, /h, /?      - Show this help");
        println!("  /models            - List available models");
        println!("  /model [NAME]      - Show or switch the model");
        println!("  /search [on|off]   - Show or toggle web search");
        println!("  /quit, /exit, /q   - Exit chat");
        println!();
    }

    /// Handle slash commands. Returns true if should exit.
    fn handle_command(&mut self, command: ReplCommand) -> bool {
        match command {
            ReplCommand::Quit => {
                println!("¡Hasta luego!");
                return true;
            }
            ReplCommand::Help => {
                println!();
                Self::print_help();
            }
            ReplCommand::Models => {
                println!();
                println!("Available models:");
                for model in &self.models {
                    let marker = if *model == self.settings.model { "*" } else { " " };
                    println!("  {} {}", marker, model);
                }
                println!();
            }
            ReplCommand::Model(None) => {
                println!("Current model: {}", self.settings.model);
            }
            ReplCommand::Model(Some(name)) => {
                let model = GeminiModel::from(name.as_str());
                if model.is_custom() {
                    println!(
                        "{} '{}' is not a known model, using it anyway",
                        "!".yellow(),
                        model
                    );
                }
                println!("Model set to {}", model.to_string().cyan());
                self.settings.model = model;
            }
            ReplCommand::Search(None) => {
                println!(
                    "Web search is {}",
                    if self.settings.web_search { "on" } else { "off" }
                );
            }
            ReplCommand::Search(Some(enabled)) => {
                self.settings.web_search = enabled;
                println!("Web search {}", if enabled { "enabled" } else { "disabled" });
            }
            ReplCommand::Unknown(cmd) => {
                println!("Unknown command: {}", cmd);
                println!("Type /help for available commands");
            }
        }
        false
    }

    async fn process_question(&self, line: &str) {
        let Some(question) = Question::try_new(line) else {
            return;
        };
        println!();

        let surface = ConsoleSurface::new().with_progress(self.show_progress);
        let input = AskInput::new(question, self.settings.clone());
        if let Err(e) = self.use_case.execute(input, &surface).await {
            eprintln!("{} {}", "Error:".red().bold(), e);
        }
    }
}
