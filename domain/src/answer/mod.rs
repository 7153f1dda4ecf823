//! Answer domain.
//!
//! - [`buffer::AnswerBuffer`] — the accumulated answer, append-only
//! - [`fragments::split_fragments`] — how a completion is cut for replay
//! - [`stream::StreamEvent`] — events flowing out of the generation gateway

pub mod buffer;
pub mod fragments;
pub mod stream;
