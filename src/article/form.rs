//! Raw form input and its conversion into request values.
//!
//! The form carries whatever the user typed. Converting it applies the
//! same rules as the input widgets: text is trimmed, keywords are split on
//! commas, sliders are clamped to their bounds, and the seed only counts
//! when the fixed-seed toggle is on.

use serde::{Deserialize, Serialize};

use crate::article::error::ArticleResult;
use crate::article::request::{
    ArticleRequest, DEFAULT_AUDIENCE, DEFAULT_LANGUAGE, DEFAULT_TARGET_WORDS, DEFAULT_TEMPERATURE,
    DEFAULT_TONE, GenConfig, ReadingLevel,
};

/// Lower bound of the temperature slider.
pub const MIN_TEMPERATURE: f64 = 0.0;
/// Upper bound of the temperature slider.
pub const MAX_TEMPERATURE: f64 = 1.5;
/// Lower bound of the length slider.
pub const MIN_TARGET_WORDS: u32 = 300;
/// Upper bound of the length slider.
pub const MAX_TARGET_WORDS: u32 = 3_000;
/// Seed shown in the form before the user changes it.
pub const DEFAULT_SEED: i64 = 42;

/// Form state as submitted by the presentation layer.
#[derive(Clone, Debug, Serialize, Deserialize)]
#[serde(default)]
pub struct ArticleForm {
    /// Topic, required.
    pub topic: String,
    /// Comma-separated keywords.
    pub keywords: String,
    /// Audience.
    pub audience: String,
    /// Tone.
    pub tone: String,
    /// Language.
    pub language: String,
    /// Reading level choice.
    pub reading_level: ReadingLevel,
    /// Outline toggle.
    pub include_outline: bool,
    /// SEO block toggle.
    pub include_seo: bool,
    /// References toggle.
    pub include_references: bool,
    /// Extra instructions.
    pub extra_instructions: String,
    /// Model name. Blank falls back to the server default.
    pub model: String,
    /// Temperature slider value.
    pub temperature: f64,
    /// Fixed-seed toggle.
    pub use_seed: bool,
    /// Seed value, ignored unless `use_seed` is set.
    pub seed: i64,
    /// Length slider value.
    pub target_words: u32,
}

impl Default for ArticleForm {
    fn default() -> Self {
        Self {
            topic: String::new(),
            keywords: String::new(),
            audience: DEFAULT_AUDIENCE.to_string(),
            tone: DEFAULT_TONE.to_string(),
            language: DEFAULT_LANGUAGE.to_string(),
            reading_level: ReadingLevel::default(),
            include_outline: true,
            include_seo: true,
            include_references: false,
            extra_instructions: String::new(),
            model: String::new(),
            temperature: DEFAULT_TEMPERATURE,
            use_seed: false,
            seed: DEFAULT_SEED,
            target_words: DEFAULT_TARGET_WORDS,
        }
    }
}

impl ArticleForm {
    /// Convert the form into the request and model settings for one generation.
    ///
    /// # Errors
    /// Returns [`crate::article::ArticleError::BlankTopic`] when the topic is
    /// blank; nothing should be sent to the model in that case.
    pub fn into_parts(self, default_model: &str) -> ArticleResult<(ArticleRequest, GenConfig)> {
        let request = ArticleRequest {
            topic: self.topic.trim().to_string(),
            keywords: split_keywords(&self.keywords),
            audience: self.audience.trim().to_string(),
            tone: self.tone.trim().to_string(),
            language: self.language.trim().to_string(),
            target_words: self.target_words.clamp(MIN_TARGET_WORDS, MAX_TARGET_WORDS),
            include_outline: self.include_outline,
            include_seo: self.include_seo,
            include_references: self.include_references,
            reading_level: self.reading_level,
            extra_instructions: self.extra_instructions.trim().to_string(),
        };
        request.validate()?;

        let model = match self.model.trim() {
            "" => default_model.to_string(),
            name => name.to_string(),
        };
        let config = GenConfig::new(model)
            .with_temperature(clamp_temperature(self.temperature))
            .with_seed(self.use_seed.then_some(self.seed));

        Ok((request, config))
    }
}

/// Split comma-separated keywords, trimming each and dropping empty entries.
#[must_use]
pub fn split_keywords(raw: &str) -> Vec<String> {
    raw.split(',')
        .map(str::trim)
        .filter(|keyword| !keyword.is_empty())
        .map(ToString::to_string)
        .collect()
}

fn clamp_temperature(value: f64) -> f64 {
    if value.is_nan() {
        DEFAULT_TEMPERATURE
    } else {
        value.clamp(MIN_TEMPERATURE, MAX_TEMPERATURE)
    }
}
