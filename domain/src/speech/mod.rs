//! Voice selection for narration.

pub mod voice;
