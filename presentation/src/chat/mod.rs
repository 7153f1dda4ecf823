//! Interactive chat module
//!
//! Provides a line-editor chat interface where every line is a question
//! for Nico.

mod repl;

pub use repl::{ChatRepl, ReplCommand};
