//! Use cases (application services)
//!
//! - [`ask_assistant`] — answer one question end to end

pub mod ask_assistant;
