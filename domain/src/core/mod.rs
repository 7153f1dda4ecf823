//! Core domain concepts shared across all subdomains.
//!
//! - [`model::GeminiModel`] — the generative model answering questions
//! - [`question::Question`] — a validated, non-blank question
//! - [`error::DomainError`] — domain-level errors

pub mod error;
pub mod model;
pub mod question;
