//! Web search port
//!
//! A search returns a short plain-text snippet used as extra prompt context.

use async_trait::async_trait;
use thiserror::Error;

/// Errors from a web search adapter
#[derive(Error, Debug)]
pub enum SearchError {
    #[error("Search request failed: {0}")]
    RequestFailed(String),

    #[error("Search API returned status {0}")]
    Status(u16),

    #[error("Failed to parse search results: {0}")]
    Parse(String),
}

/// Looks up a question on the web.
#[async_trait]
pub trait WebSearchPort: Send + Sync {
    /// Return a snippet for `query`, or an empty string when nothing useful
    /// was found.
    async fn lookup(&self, query: &str) -> Result<String, SearchError>;
}
