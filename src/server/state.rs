//! Application state shared across all request handlers.

use std::sync::Arc;

use tokio::sync::RwLock;

use crate::article::export::GeneratedArticle;
use crate::config::ServerConfig;
use crate::llm::ollama_client::{ChatEndpoint, OllamaClient};

/// Shared application state.
pub struct AppState {
    /// Model endpoint used for generation.
    pub endpoint: Arc<dyn ChatEndpoint>,
    /// Server configuration.
    pub config: ServerConfig,
    /// Most recent article, the only transcript kept.
    latest: RwLock<Option<GeneratedArticle>>,
}

impl AppState {
    /// Create a new application state backed by Ollama.
    ///
    /// Call this outside the async runtime: the blocking HTTP client must not
    /// be built or dropped from async code.
    ///
    /// # Errors
    /// Returns an error if the Ollama client cannot be created.
    pub fn new(config: ServerConfig) -> Result<Arc<Self>, Box<dyn std::error::Error + Send + Sync>> {
        let client = OllamaClient::new(&config.ollama_url, config.connect_timeout())
            .map_err(|e| format!("Failed to create Ollama client: {e}"))?;

        Ok(Self::with_endpoint(config, Arc::new(client)))
    }

    /// Create a state around any chat endpoint.
    #[must_use]
    pub fn with_endpoint(config: ServerConfig, endpoint: Arc<dyn ChatEndpoint>) -> Arc<Self> {
        Arc::new(Self {
            endpoint,
            config,
            latest: RwLock::new(None),
        })
    }

    /// The most recently generated article, if any.
    pub async fn latest_article(&self) -> Option<GeneratedArticle> {
        self.latest.read().await.clone()
    }

    /// Replace the stored article.
    pub async fn store_article(&self, article: GeneratedArticle) {
        *self.latest.write().await = Some(article);
    }
}
