//! Configuration file loading for nico-assistant
//!
//! Sources are merged in this priority order (highest first):
//!
//! 1. `NICO_*` environment variables (`__` separates nested keys)
//! 2. `--config <path>` specified file
//! 3. Project root: `./nico.toml` or `./.nico.toml`
//! 4. XDG config: `$XDG_CONFIG_HOME/nico/config.toml`
//! 5. Default values
//!
//! CLI flags are applied on top by the binary.

mod file_config;
mod issue;
mod loader;

pub use file_config::{
    FileAssistantConfig, FileConfig, FileGeminiConfig, FileLoggingConfig, FileReplConfig,
    FileSearchConfig, FileSpeechConfig, FileVideoConfig, FileWebConfig,
};
pub use issue::{ConfigIssue, Severity};
pub use loader::ConfigLoader;
