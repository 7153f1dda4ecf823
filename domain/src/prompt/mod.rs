//! Prompt composition.

pub mod template;
