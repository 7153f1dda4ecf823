//! DuckDuckGo Instant Answer search.
//!
//! Uses the [DuckDuckGo Instant Answer API](https://api.duckduckgo.com/),
//! which needs no API key. It returns abstracts and related topics rather
//! than full result listings; one short snippet is all the prompt needs.

use async_trait::async_trait;
use nico_application::ports::web_search::{SearchError, WebSearchPort};
use nico_domain::util::truncate_chars;
use serde_json::Value;
use std::time::Duration;
use tracing::debug;

/// Instant Answer endpoint.
pub const DDG_API_URL: &str = "https://api.duckduckgo.com/";

/// Snippet length in characters.
pub const DEFAULT_SNIPPET_CHARS: usize = 200;

/// Searches DuckDuckGo and returns a single snippet.
pub struct DuckDuckGoSearch {
    client: reqwest::Client,
    base_url: String,
    region: String,
    max_chars: usize,
}

impl DuckDuckGoSearch {
    pub fn new(timeout: Duration) -> Result<Self, SearchError> {
        let client = reqwest::Client::builder()
            .timeout(timeout)
            .user_agent(concat!("nico-assistant/", env!("CARGO_PKG_VERSION")))
            .build()
            .map_err(|e| SearchError::RequestFailed(e.to_string()))?;

        Ok(Self {
            client,
            base_url: DDG_API_URL.to_string(),
            region: "es-es".to_string(),
            max_chars: DEFAULT_SNIPPET_CHARS,
        })
    }

    pub fn with_base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = base_url.into();
        self
    }

    /// DuckDuckGo `kl` region code.
    pub fn with_region(mut self, region: impl Into<String>) -> Self {
        self.region = region.into();
        self
    }

    pub fn with_max_chars(mut self, max_chars: usize) -> Self {
        self.max_chars = max_chars;
        self
    }
}

#[async_trait]
impl WebSearchPort for DuckDuckGoSearch {
    async fn lookup(&self, query: &str) -> Result<String, SearchError> {
        let response = self
            .client
            .get(&self.base_url)
            .query(&[
                ("q", query),
                ("format", "json"),
                ("kl", self.region.as_str()),
            ])
            .send()
            .await
            .map_err(|e| SearchError::RequestFailed(e.to_string()))?;

        if !response.status().is_success() {
            return Err(SearchError::Status(response.status().as_u16()));
        }

        let body: Value = response
            .json()
            .await
            .map_err(|e| SearchError::Parse(e.to_string()))?;

        let snippet = extract_snippet(&body, self.max_chars);
        debug!("DuckDuckGo snippet: {} chars", snippet.chars().count());
        Ok(snippet)
    }
}

/// Pick the abstract, or else the first related topic that has text.
///
/// Nested topic groups (entries with a `Topics` array instead of `Text`)
/// are skipped. The result is cut to `max_chars` characters.
pub fn extract_snippet(data: &Value, max_chars: usize) -> String {
    let abstract_text = data["AbstractText"].as_str().unwrap_or("");
    let text = if !abstract_text.is_empty() {
        abstract_text
    } else {
        data["RelatedTopics"]
            .as_array()
            .and_then(|topics| {
                topics
                    .iter()
                    .filter_map(|t| t["Text"].as_str())
                    .find(|text| !text.is_empty())
            })
            .unwrap_or("")
    };
    truncate_chars(text, max_chars).to_string()
}
