//! Blocking Ollama client for streamed chat generation.
//!
//! Behaviour:
//! - Readiness is checked via `GET /api/version`.
//! - Generation posts to `/api/chat` with `stream: true` and hands back the
//!   response body as an iterator of chunks, read line by line as it arrives.
//! - Generation has no overall request timeout; only connection setup is
//!   bounded. The readiness check is bounded as a whole by the same duration.

use std::io::BufReader;
use std::time::Duration;

use reqwest::blocking::Client;
use tracing::debug;

use crate::llm::chat::{ChatChunk, ChatRequest, NdjsonChunks};
use crate::llm::error::{GenerationError, GenerationResult};

/// Default Ollama API base URL.
pub const DEFAULT_OLLAMA_URL: &str = "http://127.0.0.1:11434";

/// Default connection setup timeout.
pub const DEFAULT_CONNECT_TIMEOUT: Duration = Duration::from_secs(5);

/// Chunks of one streamed response, in arrival order.
pub type ChunkStream<'a> = Box<dyn Iterator<Item = GenerationResult<ChatChunk>> + 'a>;

/// A model endpoint able to stream a chat completion.
///
/// Implementations hold no per-call state, so one value can serve any number
/// of sequential or parallel calls.
pub trait ChatEndpoint: Send + Sync {
    /// Send `request` and return the stream of response chunks.
    ///
    /// # Errors
    /// Returns an error if the request cannot be sent or is rejected.
    fn stream_chat(&self, request: &ChatRequest<'_>) -> GenerationResult<ChunkStream<'_>>;

    /// Whether the endpoint currently answers.
    fn is_ready(&self) -> bool;
}

/// Ollama HTTP client.
pub struct OllamaClient {
    client: Client,
    base_url: String,
    ready_timeout: Duration,
}

impl OllamaClient {
    /// Create a client for the default local Ollama server.
    ///
    /// # Errors
    /// Returns an error if the HTTP client cannot be built.
    pub fn new_default() -> GenerationResult<Self> {
        Self::new(DEFAULT_OLLAMA_URL, DEFAULT_CONNECT_TIMEOUT)
    }

    /// Create a client for the Ollama server at `base_url`.
    ///
    /// # Errors
    /// Returns an error if the HTTP client cannot be built.
    pub fn new(base_url: &str, connect_timeout: Duration) -> GenerationResult<Self> {
        let client = Client::builder()
            .connect_timeout(connect_timeout)
            .timeout(None::<Duration>)
            .build()?;
        Ok(Self {
            client,
            base_url: base_url.trim_end_matches('/').to_string(),
            ready_timeout: connect_timeout,
        })
    }

    /// Base URL requests are sent to.
    #[must_use]
    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    fn endpoint(&self, path: &str) -> String {
        format!("{}{path}", self.base_url)
    }
}

impl ChatEndpoint for OllamaClient {
    fn stream_chat(&self, request: &ChatRequest<'_>) -> GenerationResult<ChunkStream<'_>> {
        let url = self.endpoint("/api/chat");
        debug!("POST {url} model={}", request.model);

        let response = self.client.post(&url).json(request).send()?;
        let status = response.status();
        if !status.is_success() {
            let body = response.text().unwrap_or_default();
            return Err(GenerationError::HttpStatusNotOk {
                status: status.as_u16(),
                body,
            });
        }

        Ok(Box::new(NdjsonChunks::new(BufReader::new(response))))
    }

    fn is_ready(&self) -> bool {
        let url = self.endpoint("/api/version");
        match self.client.get(&url).timeout(self.ready_timeout).send() {
            Ok(response) => response.status().is_success(),
            Err(err) => {
                debug!("Ollama not reachable at {url}: {err}");
                false
            }
        }
    }
}
