//! Article generation against a chat endpoint.

use tracing::{debug, warn};

use crate::article::request::GenConfig;
use crate::llm::chat::{ChatChunk, ChatMessage, ChatOptions, ChatRequest, ChatRole};
use crate::llm::error::GenerationResult;
use crate::llm::ollama_client::ChatEndpoint;

/// System instruction sent ahead of every prompt.
pub const SYSTEM_PROMPT: &str = "Write clear, accurate, reader-friendly content. Prefer Markdown.";

/// Build the two-message streaming request for `prompt`.
#[must_use]
pub fn chat_request<'a>(prompt: &'a str, config: &'a GenConfig) -> ChatRequest<'a> {
    ChatRequest {
        model: &config.model,
        messages: vec![
            ChatMessage {
                role: ChatRole::System,
                content: SYSTEM_PROMPT,
            },
            ChatMessage {
                role: ChatRole::User,
                content: prompt,
            },
        ],
        stream: true,
        options: ChatOptions {
            temperature: config.temperature,
            seed: config.seed,
        },
    }
}

/// Drain `chunks` and concatenate their deltas in order.
///
/// Stops after a chunk flagged `done` or when the iterator ends.
///
/// # Errors
/// Returns the first error in the sequence; text gathered before it is dropped.
pub fn accumulate_deltas<I>(chunks: I) -> GenerationResult<String>
where
    I: IntoIterator<Item = GenerationResult<ChatChunk>>,
{
    let mut text = String::new();
    let mut count = 0_usize;

    for chunk in chunks {
        let chunk = chunk?;
        text.push_str(chunk.delta());
        count += 1;
        if chunk.done {
            break;
        }
    }

    debug!("Stream finished after {count} chunks ({} bytes)", text.len());
    Ok(text)
}

/// Generate the full article text for `prompt`.
///
/// Blocks until the endpoint has streamed the whole response.
///
/// # Errors
/// Returns an error if the request fails or the stream breaks; no partial
/// text is returned.
pub fn generate_article(
    endpoint: &dyn ChatEndpoint,
    prompt: &str,
    config: &GenConfig,
) -> GenerationResult<String> {
    debug!(
        "Generating with model={} temperature={} seed={:?} prompt_chars={}",
        config.model,
        config.temperature,
        config.seed,
        prompt.chars().count()
    );

    let request = chat_request(prompt, config);
    let result = endpoint
        .stream_chat(&request)
        .and_then(accumulate_deltas);

    if let Err(err) = &result {
        warn!("{err}");
    }
    result
}
