//! Video clip value objects.

use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

/// Container formats the page can embed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum VideoFormat {
    Mp4,
    Webm,
    Ogg,
}

impl VideoFormat {
    /// Recognize a clip by file extension (case-insensitive).
    pub fn from_extension(ext: &str) -> Option<Self> {
        match ext.to_ascii_lowercase().as_str() {
            "mp4" => Some(VideoFormat::Mp4),
            "webm" => Some(VideoFormat::Webm),
            "ogg" | "ogv" => Some(VideoFormat::Ogg),
            _ => None,
        }
    }

    pub fn from_path(path: &Path) -> Option<Self> {
        path.extension()
            .and_then(|e| e.to_str())
            .and_then(Self::from_extension)
    }

    pub fn mime_type(&self) -> &'static str {
        match self {
            VideoFormat::Mp4 => "video/mp4",
            VideoFormat::Webm => "video/webm",
            VideoFormat::Ogg => "video/ogg",
        }
    }
}

/// A clip found in the video directory.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord)]
pub struct VideoClip {
    pub path: PathBuf,
    pub format: VideoFormat,
}

impl VideoClip {
    /// Returns None when the extension is not a supported video format.
    pub fn from_path(path: impl Into<PathBuf>) -> Option<Self> {
        let path = path.into();
        let format = VideoFormat::from_path(&path)?;
        Some(Self { path, format })
    }

    pub fn file_name(&self) -> String {
        self.path
            .file_name()
            .map(|n| n.to_string_lossy().into_owned())
            .unwrap_or_default()
    }
}

/// A clip ready to be inlined into the page.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct VideoEmbed {
    pub name: String,
    pub mime: String,
    pub data_uri: String,
}

impl VideoEmbed {
    /// Build an embed from an already base64-encoded payload.
    pub fn from_base64(name: impl Into<String>, format: VideoFormat, payload: &str) -> Self {
        let mime = format.mime_type();
        Self {
            name: name.into(),
            mime: mime.to_string(),
            data_uri: format!("data:{mime};base64,{payload}"),
        }
    }
}
