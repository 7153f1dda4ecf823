//! Background video configuration from TOML (`[video]` section)

use serde::{Deserialize, Serialize};

/// Raw video configuration from TOML
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct FileVideoConfig {
    pub enabled: bool,
    /// Directory scanned for clips, created when missing
    pub dir: String,
}

impl Default for FileVideoConfig {
    fn default() -> Self {
        Self {
            enabled: true,
            dir: "videos".to_string(),
        }
    }
}
