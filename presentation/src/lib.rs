//! Presentation layer for nico-assistant
//!
//! This crate contains the CLI definition, the console surface, the
//! interactive chat REPL and the web page.

pub mod chat;
pub mod cli;
pub mod output;
pub mod web;

// Re-export commonly used types
pub use chat::ChatRepl;
pub use cli::commands::Cli;
pub use output::console::ConsoleSurface;
pub use web::{AppState, start_server};
