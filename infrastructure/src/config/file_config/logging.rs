//! Logging configuration from TOML (`[logging]` section)

use serde::{Deserialize, Serialize};

/// Raw logging configuration from TOML
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct FileLoggingConfig {
    /// Directory for the daily rolling diagnostic log; none when unset
    pub dir: Option<String>,
    /// Write a JSONL conversation transcript
    pub transcript: bool,
    /// Transcript directory; defaults to `dir`, then the data directory
    pub transcript_dir: Option<String>,
}
