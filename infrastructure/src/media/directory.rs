//! Video library backed by a local directory.
//!
//! Every `.mp4`, `.webm`, `.ogg` or `.ogv` file directly inside the directory
//! is a candidate. The directory is created on first use so a fresh checkout
//! works without setup.

use base64::Engine as _;
use base64::engine::general_purpose::STANDARD;
use nico_application::ports::video_library::{VideoError, VideoLibrary};
use nico_domain::{VideoClip, VideoEmbed};
use rand::seq::SliceRandom;
use std::path::{Path, PathBuf};
use tracing::{debug, warn};

/// Clips stored as files in one directory.
#[derive(Debug, Clone)]
pub struct DirectoryVideoLibrary {
    dir: PathBuf,
}

impl DirectoryVideoLibrary {
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self { dir: dir.into() }
    }

    pub fn dir(&self) -> &Path {
        &self.dir
    }

    fn ensure_dir(&self) -> Result<(), VideoError> {
        std::fs::create_dir_all(&self.dir)
            .map_err(|e| VideoError::Directory(format!("{}: {}", self.dir.display(), e)))
    }
}

impl VideoLibrary for DirectoryVideoLibrary {
    fn clips(&self) -> Result<Vec<VideoClip>, VideoError> {
        self.ensure_dir()?;

        let entries = std::fs::read_dir(&self.dir)
            .map_err(|e| VideoError::Directory(format!("{}: {}", self.dir.display(), e)))?;

        let mut clips: Vec<VideoClip> = entries
            .filter_map(|entry| match entry {
                Ok(entry) => Some(entry.path()),
                Err(e) => {
                    warn!("Skipping unreadable entry in {}: {}", self.dir.display(), e);
                    None
                }
            })
            .filter(|path| path.is_file())
            .filter_map(VideoClip::from_path)
            .collect();
        clips.sort();

        debug!("{} clips in {}", clips.len(), self.dir.display());
        Ok(clips)
    }

    fn embed(&self, clip: &VideoClip) -> Result<VideoEmbed, VideoError> {
        let bytes = std::fs::read(&clip.path).map_err(|e| VideoError::Read {
            path: clip.path.display().to_string(),
            reason: e.to_string(),
        })?;
        let payload = STANDARD.encode(bytes);
        Ok(VideoEmbed::from_base64(clip.file_name(), clip.format, &payload))
    }

    fn pick(&self) -> Result<Option<VideoEmbed>, VideoError> {
        let clips = self.clips()?;
        let Some(clip) = clips.choose(&mut rand::thread_rng()) else {
            return Ok(None);
        };
        debug!("Selected background clip {}", clip.file_name());
        self.embed(clip).map(Some)
    }
}
