//! Web search configuration from TOML (`[search]` section)

use nico_domain::SearchTrigger;
use nico_domain::search::trigger::DEFAULT_KEYWORDS;
use serde::{Deserialize, Serialize};

/// Raw search configuration from TOML
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct FileSearchConfig {
    pub enabled: bool,
    /// Substrings that make a question trigger a search
    pub keywords: Vec<String>,
    pub timeout_secs: u64,
    /// DuckDuckGo `kl` region
    pub region: String,
    pub max_chars: usize,
    pub base_url: Option<String>,
}

impl Default for FileSearchConfig {
    fn default() -> Self {
        Self {
            enabled: true,
            keywords: DEFAULT_KEYWORDS.iter().map(|k| k.to_string()).collect(),
            timeout_secs: 8,
            region: "es-es".to_string(),
            max_chars: 200,
            base_url: None,
        }
    }
}

impl FileSearchConfig {
    pub fn trigger(&self) -> SearchTrigger {
        SearchTrigger::new(&self.keywords)
    }
}
