//! Value types describing one article generation.
//!
//! Both types are built fresh from the form for every request and never
//! mutated afterwards.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::article::error::{ArticleError, ArticleResult};

/// Default audience.
pub const DEFAULT_AUDIENCE: &str = "General readers";
/// Default tone.
pub const DEFAULT_TONE: &str = "Informative and engaging";
/// Default output language.
pub const DEFAULT_LANGUAGE: &str = "English";
/// Default target length in words.
pub const DEFAULT_TARGET_WORDS: u32 = 1_000;
/// Default Ollama model, small enough to run on CPU.
pub const DEFAULT_MODEL: &str = "phi3:3.8b";
/// Default sampling temperature.
pub const DEFAULT_TEMPERATURE: f64 = 0.7;

/// Reading level requested for the article.
#[derive(Clone, Copy, Debug, Default, Eq, Hash, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ReadingLevel {
    /// Grade 8 to 10.
    #[default]
    Easy,
    /// Grade 11 to 12.
    Intermediate,
    /// Specialist readers.
    Advanced,
}

impl ReadingLevel {
    /// All levels, in the order they are offered to the user.
    pub const ALL: [Self; 3] = [Self::Easy, Self::Intermediate, Self::Advanced];

    /// Stable identifier used on the wire.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Easy => "easy",
            Self::Intermediate => "intermediate",
            Self::Advanced => "advanced",
        }
    }

    /// Human-readable label, as written into the prompt.
    #[must_use]
    pub const fn label(self) -> &'static str {
        match self {
            Self::Easy => "Easy to read (Grade 8–10)",
            Self::Intermediate => "Intermediate (Grade 11–12)",
            Self::Advanced => "Advanced/Technical",
        }
    }
}

impl fmt::Display for ReadingLevel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

impl FromStr for ReadingLevel {
    type Err = ArticleError;

    /// Accepts either the identifier or the full label.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let needle = s.trim();
        Self::ALL
            .into_iter()
            .find(|level| {
                level.as_str().eq_ignore_ascii_case(needle) || level.label() == needle
            })
            .ok_or_else(|| ArticleError::UnknownReadingLevel(needle.to_string()))
    }
}

/// Everything the prompt builder needs to describe the article.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct ArticleRequest {
    /// Article topic. Must not be blank.
    pub topic: String,
    /// Primary keywords, in the order given.
    pub keywords: Vec<String>,
    /// Intended audience.
    pub audience: String,
    /// Tone of voice.
    pub tone: String,
    /// Output language.
    pub language: String,
    /// Approximate length in words.
    pub target_words: u32,
    /// Ask for an outline before the article.
    pub include_outline: bool,
    /// Ask for an SEO block after the article.
    pub include_seo: bool,
    /// Ask for a references section.
    pub include_references: bool,
    /// Reading level.
    pub reading_level: ReadingLevel,
    /// Free text appended to the prompt as-is.
    pub extra_instructions: String,
}

impl ArticleRequest {
    /// Create a request for `topic` with every other field at its default.
    #[must_use]
    pub fn new(topic: impl Into<String>) -> Self {
        Self {
            topic: topic.into(),
            keywords: Vec::new(),
            audience: DEFAULT_AUDIENCE.to_string(),
            tone: DEFAULT_TONE.to_string(),
            language: DEFAULT_LANGUAGE.to_string(),
            target_words: DEFAULT_TARGET_WORDS,
            include_outline: true,
            include_seo: true,
            include_references: false,
            reading_level: ReadingLevel::default(),
            extra_instructions: String::new(),
        }
    }

    /// Set the keyword list.
    #[must_use]
    pub fn with_keywords<I, S>(mut self, keywords: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.keywords = keywords.into_iter().map(Into::into).collect();
        self
    }

    /// Set the audience.
    #[must_use]
    pub fn with_audience(mut self, audience: impl Into<String>) -> Self {
        self.audience = audience.into();
        self
    }

    /// Set the tone.
    #[must_use]
    pub fn with_tone(mut self, tone: impl Into<String>) -> Self {
        self.tone = tone.into();
        self
    }

    /// Set the output language.
    #[must_use]
    pub fn with_language(mut self, language: impl Into<String>) -> Self {
        self.language = language.into();
        self
    }

    /// Set the target length.
    #[must_use]
    pub const fn with_target_words(mut self, words: u32) -> Self {
        self.target_words = words;
        self
    }

    /// Toggle the outline.
    #[must_use]
    pub const fn with_outline(mut self, include: bool) -> Self {
        self.include_outline = include;
        self
    }

    /// Toggle the SEO block.
    #[must_use]
    pub const fn with_seo(mut self, include: bool) -> Self {
        self.include_seo = include;
        self
    }

    /// Toggle the references section.
    #[must_use]
    pub const fn with_references(mut self, include: bool) -> Self {
        self.include_references = include;
        self
    }

    /// Set the reading level.
    #[must_use]
    pub const fn with_reading_level(mut self, level: ReadingLevel) -> Self {
        self.reading_level = level;
        self
    }

    /// Set the extra instructions.
    #[must_use]
    pub fn with_extra_instructions(mut self, extra: impl Into<String>) -> Self {
        self.extra_instructions = extra.into();
        self
    }

    /// Check the request before it is used.
    ///
    /// # Errors
    /// Returns [`ArticleError::BlankTopic`] if the topic is empty or whitespace.
    pub fn validate(&self) -> ArticleResult<()> {
        if self.topic.trim().is_empty() {
            return Err(ArticleError::BlankTopic);
        }
        if self.target_words == 0 {
            return Err(ArticleError::InvalidTargetWords);
        }
        Ok(())
    }
}

/// Model invocation settings.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct GenConfig {
    /// Ollama model name.
    pub model: String,
    /// Sampling temperature, intended range 0.0 to 1.5.
    pub temperature: f64,
    /// Fixed seed for deterministic sampling.
    pub seed: Option<i64>,
}

impl Default for GenConfig {
    fn default() -> Self {
        Self {
            model: DEFAULT_MODEL.to_string(),
            temperature: DEFAULT_TEMPERATURE,
            seed: None,
        }
    }
}

impl GenConfig {
    /// Create a config for `model` with default sampling.
    #[must_use]
    pub fn new(model: impl Into<String>) -> Self {
        Self {
            model: model.into(),
            ..Self::default()
        }
    }

    /// Set the temperature.
    #[must_use]
    pub const fn with_temperature(mut self, temperature: f64) -> Self {
        self.temperature = temperature;
        self
    }

    /// Set or clear the seed.
    #[must_use]
    pub const fn with_seed(mut self, seed: Option<i64>) -> Self {
        self.seed = seed;
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_request_defaults() {
        let req = ArticleRequest::new("Rust ownership");
        assert_eq!(req.audience, DEFAULT_AUDIENCE);
        assert_eq!(req.target_words, 1_000);
        assert!(req.include_outline);
        assert!(req.include_seo);
        assert!(!req.include_references);
        assert_eq!(req.reading_level, ReadingLevel::Easy);
        assert!(req.keywords.is_empty());
    }

    #[test]
    fn test_validate_rejects_blank_topic() {
        assert!(matches!(
            ArticleRequest::new("").validate(),
            Err(ArticleError::BlankTopic)
        ));
        assert!(matches!(
            ArticleRequest::new(" \t\n").validate(),
            Err(ArticleError::BlankTopic)
        ));
        assert!(ArticleRequest::new("Tide pools").validate().is_ok());
    }

    #[test]
    fn test_reading_level_parse() {
        assert_eq!("advanced".parse::<ReadingLevel>().ok(), Some(ReadingLevel::Advanced));
        assert_eq!(
            "Intermediate (Grade 11–12)".parse::<ReadingLevel>().ok(),
            Some(ReadingLevel::Intermediate)
        );
        assert!("expert".parse::<ReadingLevel>().is_err());
    }

    #[test]
    fn test_gen_config_defaults() {
        let cfg = GenConfig::default();
        assert_eq!(cfg.model, DEFAULT_MODEL);
        assert!((cfg.temperature - 0.7).abs() < f64::EPSILON);
        assert_eq!(cfg.seed, None);
    }
}
