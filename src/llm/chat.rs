//! Wire types for the Ollama chat API and the streamed chunk reader.
//!
//! A streaming `/api/chat` response is newline-delimited JSON, one chunk per
//! line, ending with a chunk whose `done` flag is set.

use std::io::BufRead;

use serde::{Deserialize, Serialize};

use crate::llm::error::{GenerationError, GenerationResult};

/// Message author.
#[derive(Clone, Copy, Debug, Eq, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ChatRole {
    /// Instructions for the model.
    System,
    /// The user's prompt.
    User,
    /// Model output.
    Assistant,
}

/// One message of the exchange.
#[derive(Clone, Debug, Serialize)]
pub struct ChatMessage<'a> {
    /// Author.
    pub role: ChatRole,
    /// Text.
    pub content: &'a str,
}

/// Sampling options. `seed` is left out of the JSON entirely when unset.
#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct ChatOptions {
    /// Sampling temperature.
    pub temperature: f64,
    /// Fixed seed.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub seed: Option<i64>,
}

/// Body of `POST /api/chat`.
#[derive(Clone, Debug, Serialize)]
pub struct ChatRequest<'a> {
    /// Model name.
    pub model: &'a str,
    /// Ordered messages.
    pub messages: Vec<ChatMessage<'a>>,
    /// Always `true` for this client.
    pub stream: bool,
    /// Sampling options.
    pub options: ChatOptions,
}

/// Message payload inside a chunk.
#[derive(Clone, Debug, Default, Deserialize)]
pub struct ChunkMessage {
    /// Author, normally `assistant`.
    #[serde(default)]
    pub role: Option<ChatRole>,
    /// Text delta.
    #[serde(default)]
    pub content: Option<String>,
}

/// One streamed unit of the response.
#[derive(Clone, Debug, Default, Deserialize)]
pub struct ChatChunk {
    /// Message delta, absent on some final chunks.
    #[serde(default)]
    pub message: Option<ChunkMessage>,
    /// Set on the last chunk.
    pub done: bool,
}

impl ChatChunk {
    /// Chunk carrying `text`, not final.
    #[must_use]
    pub fn text(text: impl Into<String>) -> Self {
        Self {
            message: Some(ChunkMessage {
                role: Some(ChatRole::Assistant),
                content: Some(text.into()),
            }),
            done: false,
        }
    }

    /// Empty final chunk.
    #[must_use]
    pub const fn finished() -> Self {
        Self {
            message: None,
            done: true,
        }
    }

    /// Text delta, empty when the chunk carries none.
    #[must_use]
    pub fn delta(&self) -> &str {
        self.message
            .as_ref()
            .and_then(|message| message.content.as_deref())
            .unwrap_or("")
    }
}

#[derive(Deserialize)]
struct EndpointErrorLine {
    error: String,
}

/// Iterator over the chunks of a newline-delimited JSON stream.
///
/// Yields at most one error, after which it is exhausted. The underlying
/// reader is consumed; the sequence cannot be replayed.
pub struct NdjsonChunks<R> {
    reader: R,
    line: String,
    finished: bool,
}

impl<R: BufRead> NdjsonChunks<R> {
    /// Wrap a buffered reader positioned at the start of the stream.
    pub const fn new(reader: R) -> Self {
        Self {
            reader,
            line: String::new(),
            finished: false,
        }
    }

    fn next_chunk(&mut self) -> Option<GenerationResult<ChatChunk>> {
        loop {
            self.line.clear();
            match self.reader.read_line(&mut self.line) {
                Ok(0) => return None,
                Ok(_) => {}
                Err(err) => return Some(Err(GenerationError::from(err))),
            }

            let line = self.line.trim();
            if line.is_empty() {
                continue;
            }

            if let Ok(reported) = serde_json::from_str::<EndpointErrorLine>(line) {
                return Some(Err(GenerationError::Endpoint(reported.error)));
            }

            return Some(serde_json::from_str::<ChatChunk>(line).map_err(GenerationError::from));
        }
    }
}

impl<R: BufRead> Iterator for NdjsonChunks<R> {
    type Item = GenerationResult<ChatChunk>;

    fn next(&mut self) -> Option<Self::Item> {
        if self.finished {
            return None;
        }

        let item = self.next_chunk();
        match &item {
            None | Some(Err(_)) => self.finished = true,
            Some(Ok(chunk)) => self.finished = chunk.done,
        }
        item
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Cursor;

    fn chunks(body: &str) -> Vec<GenerationResult<ChatChunk>> {
        NdjsonChunks::new(Cursor::new(body.as_bytes().to_vec())).collect()
    }

    #[test]
    fn test_seed_omitted_when_unset() {
        let options = ChatOptions {
            temperature: 0.7,
            seed: None,
        };
        let json = serde_json::to_value(&options).unwrap();
        assert!(json.get("seed").is_none());
        assert_eq!(json["temperature"], 0.7);
    }

    #[test]
    fn test_seed_included_when_set() {
        let options = ChatOptions {
            temperature: 0.2,
            seed: Some(42),
        };
        let json = serde_json::to_value(&options).unwrap();
        assert_eq!(json["seed"], 42);
    }

    #[test]
    fn test_request_shape() {
        let request = ChatRequest {
            model: "phi3:3.8b",
            messages: vec![
                ChatMessage {
                    role: ChatRole::System,
                    content: "sys",
                },
                ChatMessage {
                    role: ChatRole::User,
                    content: "prompt",
                },
            ],
            stream: true,
            options: ChatOptions {
                temperature: 1.0,
                seed: None,
            },
        };
        let json = serde_json::to_value(&request).unwrap();
        assert_eq!(json["model"], "phi3:3.8b");
        assert_eq!(json["stream"], true);
        assert_eq!(json["messages"][0]["role"], "system");
        assert_eq!(json["messages"][1]["role"], "user");
        assert_eq!(json["messages"][1]["content"], "prompt");
    }

    #[test]
    fn test_reads_until_done() {
        let body = concat!(
            r#"{"model":"m","message":{"role":"assistant","content":"Hel"},"done":false}"#,
            "\n",
            r#"{"model":"m","message":{"role":"assistant","content":"lo"},"done":false}"#,
            "\n\n",
            r#"{"model":"m","message":{"role":"assistant","content":""},"done":true,"total_duration":12}"#,
            "\n",
            r#"{"model":"m","message":{"role":"assistant","content":"ignored"},"done":false}"#,
            "\n",
        );
        let items = chunks(body);
        assert_eq!(items.len(), 3);
        let deltas: Vec<String> = items
            .into_iter()
            .map(|item| item.unwrap().delta().to_string())
            .collect();
        assert_eq!(deltas, vec!["Hel", "lo", ""]);
    }

    #[test]
    fn test_missing_message_is_empty_delta() {
        let items = chunks("{\"done\":true}\n");
        assert_eq!(items.len(), 1);
        assert_eq!(items[0].as_ref().unwrap().delta(), "");
    }

    #[test]
    fn test_endpoint_error_line() {
        let items = chunks("{\"error\":\"model 'nope' not found\"}\n{\"done\":true}\n");
        assert_eq!(items.len(), 1);
        assert!(matches!(&items[0], Err(GenerationError::Endpoint(msg)) if msg.contains("nope")));
    }

    #[test]
    fn test_malformed_chunk() {
        let items = chunks("{\"message\":{\"content\":\"a\"},\"done\":false}\nnot json\n");
        assert_eq!(items.len(), 2);
        assert!(items[0].is_ok());
        assert!(matches!(items[1], Err(GenerationError::MalformedChunk(_))));

        let missing_done = chunks("{\"message\":{\"content\":\"a\"}}\n");
        assert!(matches!(missing_done[0], Err(GenerationError::MalformedChunk(_))));
    }
}
