//! Model endpoint access: chat wire types, the Ollama client, and generation.

pub mod chat;
pub mod error;
pub mod generation;
pub mod ollama_client;

pub use chat::{ChatChunk, ChatOptions, ChatRequest, NdjsonChunks};
pub use error::{GenerationError, GenerationResult};
pub use generation::{SYSTEM_PROMPT, accumulate_deltas, generate_article};
pub use ollama_client::{ChatEndpoint, ChunkStream, OllamaClient};
