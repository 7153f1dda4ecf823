//! Text-to-speech adapters.

pub mod espeak;

pub use espeak::EspeakEngine;
