//! Video library port
//!
//! Supplies the background clip looped while an answer is being streamed.

use nico_domain::{VideoClip, VideoEmbed};
use thiserror::Error;

/// Errors from a video library
#[derive(Error, Debug)]
pub enum VideoError {
    #[error("Video directory unavailable: {0}")]
    Directory(String),

    #[error("Failed to read clip {path}: {reason}")]
    Read { path: String, reason: String },
}

/// A collection of background clips.
pub trait VideoLibrary: Send + Sync {
    /// All clips, sorted by path.
    fn clips(&self) -> Result<Vec<VideoClip>, VideoError>;

    /// Load one clip as an inline embed.
    fn embed(&self, clip: &VideoClip) -> Result<VideoEmbed, VideoError>;

    /// Choose a clip at random and embed it. `Ok(None)` when the library is
    /// empty.
    fn pick(&self) -> Result<Option<VideoEmbed>, VideoError>;
}
