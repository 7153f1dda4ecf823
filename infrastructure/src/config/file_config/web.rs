//! Web UI configuration from TOML (`[web]` section)

use serde::{Deserialize, Serialize};

/// Raw web server configuration from TOML
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct FileWebConfig {
    pub host: String,
    pub port: u16,
    /// Page title and heading
    pub title: String,
}

impl Default for FileWebConfig {
    fn default() -> Self {
        Self {
            host: "127.0.0.1".to_string(),
            port: 8501,
            title: "Hola soy Nico tu asistente de la UMSNH".to_string(),
        }
    }
}

impl FileWebConfig {
    pub fn bind_address(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }
}
