//! Gemini gateway implementation
//!
//! Implements the `LlmGateway` port against the Generative Language REST
//! API. Whole completions use `generateContent`; when streaming is enabled
//! `streamGenerateContent?alt=sse` is read chunk by chunk and forwarded as
//! `StreamEvent::Delta`s.

use super::types::{GenerateContentRequest, GenerateContentResponse, drain_sse_data};
use async_trait::async_trait;
use futures::StreamExt;
use nico_application::ports::llm_gateway::{
    GatewayError, GenerationRequest, LlmGateway, StreamHandle,
};
use nico_domain::{GeminiModel, StreamEvent};
use std::time::Duration;
use tokio::sync::mpsc;
use tracing::{debug, info, warn};

pub const DEFAULT_BASE_URL: &str = "https://generativelanguage.googleapis.com";

/// Connection settings for [`GeminiGateway`].
#[derive(Debug, Clone)]
pub struct GeminiSettings {
    pub api_key: String,
    pub base_url: String,
    pub timeout: Duration,
    /// Use server-sent events instead of one blocking call.
    pub stream: bool,
}

impl GeminiSettings {
    pub fn new(api_key: impl Into<String>) -> Self {
        Self {
            api_key: api_key.into(),
            base_url: DEFAULT_BASE_URL.to_string(),
            timeout: Duration::from_secs(60),
            stream: false,
        }
    }

    pub fn with_base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = base_url.into();
        self
    }

    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    pub fn with_stream(mut self, stream: bool) -> Self {
        self.stream = stream;
        self
    }
}

/// Gateway to Google Gemini.
pub struct GeminiGateway {
    client: reqwest::Client,
    settings: GeminiSettings,
}

impl GeminiGateway {
    pub fn new(settings: GeminiSettings) -> Result<Self, GatewayError> {
        if settings.api_key.trim().is_empty() {
            return Err(GatewayError::MissingApiKey);
        }

        let client = reqwest::Client::builder()
            .timeout(settings.timeout)
            .build()
            .map_err(|e| GatewayError::ConnectionError(e.to_string()))?;

        info!(
            "Gemini gateway ready ({}, streaming: {})",
            settings.base_url, settings.stream
        );
        Ok(Self { client, settings })
    }

    pub fn settings(&self) -> &GeminiSettings {
        &self.settings
    }

    /// `{base}/{version}/models/{model}:{method}` without the key.
    pub fn endpoint(&self, model: &GeminiModel, method: &str) -> String {
        format!(
            "{}/{}/models/{}:{}",
            self.settings.base_url.trim_end_matches('/'),
            model.api_version(),
            model.as_str(),
            method
        )
    }

    async fn post(
        &self,
        request: &GenerationRequest,
        method: &str,
        sse: bool,
    ) -> Result<reqwest::Response, GatewayError> {
        let url = self.endpoint(&request.model, method);
        let body = GenerateContentRequest::from_prompt(&request.prompt, &request.params);
        debug!("POST {} (prompt: {} bytes)", url, request.prompt.len());

        let mut query: Vec<(&str, &str)> = vec![("key", self.settings.api_key.as_str())];
        if sse {
            query.push(("alt", "sse"));
        }

        let response = self
            .client
            .post(&url)
            .query(&query)
            .json(&body)
            .send()
            .await
            .map_err(map_transport_error)?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            warn!("Gemini returned HTTP {}", status.as_u16());
            return Err(GatewayError::Http {
                status: status.as_u16(),
                body,
            });
        }
        Ok(response)
    }
}

fn map_transport_error(e: reqwest::Error) -> GatewayError {
    if e.is_timeout() {
        GatewayError::Timeout
    } else {
        // Strip the URL so the key never reaches logs or the screen
        GatewayError::ConnectionError(e.without_url().to_string())
    }
}

#[async_trait]
impl LlmGateway for GeminiGateway {
    async fn generate(&self, request: &GenerationRequest) -> Result<String, GatewayError> {
        let response = self.post(request, "generateContent", false).await?;
        let parsed: GenerateContentResponse = response
            .json()
            .await
            .map_err(|e| GatewayError::InvalidResponse(e.without_url().to_string()))?;

        if let Some(reason) = parsed.finish_reason() {
            debug!("Finish reason: {}", reason);
        }
        Ok(parsed.text())
    }

    async fn generate_streaming(
        &self,
        request: &GenerationRequest,
    ) -> Result<StreamHandle, GatewayError> {
        if !self.settings.stream {
            let text = self.generate(request).await?;
            return Ok(StreamHandle::completed(text));
        }

        let response = self.post(request, "streamGenerateContent", true).await?;
        let (tx, rx) = mpsc::channel(64);

        tokio::spawn(async move {
            let mut bytes = response.bytes_stream();
            let mut buffer: Vec<u8> = Vec::new();
            let mut full_text = String::new();

            while let Some(chunk) = bytes.next().await {
                let chunk = match chunk {
                    Ok(chunk) => chunk,
                    Err(e) => {
                        let _ = tx
                            .send(StreamEvent::Error(
                                GatewayError::ConnectionError(e.without_url().to_string())
                                    .user_message(),
                            ))
                            .await;
                        return;
                    }
                };
                buffer.extend_from_slice(&chunk);

                for payload in drain_sse_data(&mut buffer) {
                    match serde_json::from_str::<GenerateContentResponse>(&payload) {
                        Ok(parsed) => {
                            let text = parsed.text();
                            if text.is_empty() {
                                continue;
                            }
                            full_text.push_str(&text);
                            if tx.send(StreamEvent::Delta(text)).await.is_err() {
                                return;
                            }
                        }
                        Err(e) => debug!("Skipping unparsable SSE payload: {}", e),
                    }
                }
            }

            let _ = tx.send(StreamEvent::Completed(full_text)).await;
        });

        Ok(StreamHandle::new(rx))
    }

    fn available_models(&self) -> Vec<GeminiModel> {
        GeminiModel::selectable()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn gateway(base_url: &str) -> GeminiGateway {
        GeminiGateway::new(GeminiSettings::new("test-key").with_base_url(base_url)).unwrap()
    }

    #[test]
    fn missing_key_is_rejected() {
        let result = GeminiGateway::new(GeminiSettings::new("  "));
        assert!(matches!(result, Err(GatewayError::MissingApiKey)));
    }

    #[test]
    fn endpoint_uses_beta_api_for_15_models() {
        let gw = gateway(DEFAULT_BASE_URL);
        assert_eq!(
            gw.endpoint(&GeminiModel::Gemini15Flash, "generateContent"),
            "https://generativelanguage.googleapis.com/v1beta/models/gemini-1.5-flash:generateContent"
        );
    }

    #[test]
    fn endpoint_uses_v1_for_20_models() {
        let gw = gateway("http://localhost:9999/");
        assert_eq!(
            gw.endpoint(&GeminiModel::Gemini20FlashLite001, "generateContent"),
            "http://localhost:9999/v1/models/gemini-2.0-flash-lite-001:generateContent"
        );
    }

    #[test]
    fn endpoint_never_contains_key() {
        let gw = gateway(DEFAULT_BASE_URL);
        let url = gw.endpoint(&GeminiModel::Gemini15Pro, "streamGenerateContent");
        assert!(!url.contains("test-key"));
    }

    #[test]
    fn settings_builder() {
        let settings = GeminiSettings::new("k")
            .with_timeout(Duration::from_secs(5))
            .with_stream(true);
        assert_eq!(settings.timeout, Duration::from_secs(5));
        assert!(settings.stream);
        assert_eq!(settings.base_url, DEFAULT_BASE_URL);
    }

    #[tokio::test]
    async fn unreachable_host_maps_to_transport_error() {
        let gw = gateway("http://127.0.0.1:9");
        let request = GenerationRequest::new(
            GeminiModel::default(),
            "hola",
            nico_domain::GenerationParams::default(),
        );
        let err = gw.generate(&request).await.unwrap_err();
        assert!(matches!(
            err,
            GatewayError::ConnectionError(_) | GatewayError::Timeout
        ));
        assert!(!err.to_string().contains("test-key"));
    }

    /// Serve one HTTP request with an SSE body written in `chunks`.
    async fn serve_sse_chunks(chunks: Vec<Vec<u8>>) -> String {
        use tokio::io::{AsyncReadExt, AsyncWriteExt};

        let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();

        tokio::spawn(async move {
            let (mut socket, _) = listener.accept().await.unwrap();

            let mut request = Vec::new();
            let mut buf = [0u8; 1024];
            loop {
                let n = socket.read(&mut buf).await.unwrap();
                request.extend_from_slice(&buf[..n]);
                let text = String::from_utf8_lossy(&request).to_lowercase();
                if let Some(header_end) = text.find("\r\n\r\n") {
                    let length = text
                        .lines()
                        .find_map(|l| l.strip_prefix("content-length:"))
                        .and_then(|v| v.trim().parse::<usize>().ok())
                        .unwrap_or(0);
                    if request.len() >= header_end + 4 + length {
                        break;
                    }
                }
                if n == 0 {
                    break;
                }
            }

            socket
                .write_all(
                    b"HTTP/1.1 200 OK\r\ncontent-type: text/event-stream\r\nconnection: close\r\n\r\n",
                )
                .await
                .unwrap();
            for chunk in chunks {
                socket.write_all(&chunk).await.unwrap();
                socket.flush().await.unwrap();
                tokio::time::sleep(Duration::from_millis(20)).await;
            }
            socket.shutdown().await.unwrap();
        });

        format!("http://{}", addr)
    }

    #[tokio::test]
    async fn streaming_keeps_characters_split_across_chunks() {
        let event = "data: {\"candidates\":[{\"content\":{\"parts\":[{\"text\":\"canción \"}]}}]}\n\n"
            .as_bytes()
            .to_vec();
        let split = event.iter().position(|&b| b == 0xC3).unwrap() + 1;
        let base_url = serve_sse_chunks(vec![event[..split].to_vec(), event[split..].to_vec()]).await;

        let gw = GeminiGateway::new(
            GeminiSettings::new("test-key")
                .with_base_url(base_url)
                .with_stream(true),
        )
        .unwrap();
        let request = GenerationRequest::new(
            GeminiModel::default(),
            "canta",
            nico_domain::GenerationParams::default(),
        );
        let mut handle = gw.generate_streaming(&request).await.unwrap();

        let mut deltas = String::new();
        let mut completed = None;
        while let Some(event) = handle.next().await {
            match event {
                StreamEvent::Delta(text) => deltas.push_str(&text),
                StreamEvent::Completed(text) => completed = Some(text),
                StreamEvent::Error(e) => panic!("unexpected error: {e}"),
            }
        }
        assert_eq!(deltas, "canción ");
        assert_eq!(completed.as_deref(), Some("canción "));
    }
}
