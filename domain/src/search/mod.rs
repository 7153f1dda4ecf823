//! Deciding when a question needs fresh information from the web.

pub mod trigger;
