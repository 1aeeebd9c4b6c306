//! Error type for model generation.

use thiserror::Error;

/// Any failure while talking to the model endpoint.
///
/// Callers treat every variant the same way: the generation attempt is over
/// and no partial text is kept.
#[derive(Debug, Error)]
pub enum GenerationError {
    /// Connection or transport failure.
    #[error("generation failed: http client error: {0}")]
    HttpClient(#[from] reqwest::Error),
    /// Endpoint answered with a non-success status.
    #[error("generation failed: endpoint returned status {status}: {body}")]
    HttpStatusNotOk {
        /// HTTP status code.
        status: u16,
        /// Response body, for the error message.
        body: String,
    },
    /// Endpoint reported an error inside the stream.
    #[error("generation failed: endpoint error: {0}")]
    Endpoint(String),
    /// Reading the stream failed part-way.
    #[error("generation failed: stream read error: {0}")]
    Stream(#[from] std::io::Error),
    /// A stream line was not a valid chunk.
    #[error("generation failed: malformed chunk: {0}")]
    MalformedChunk(#[from] serde_json::Error),
}

/// Convenience result alias for generation.
pub type GenerationResult<T> = Result<T, GenerationError>;
