//! Downloadable Markdown artifact for a generated article.

use chrono::{DateTime, Local, TimeZone};
use serde::Serialize;

/// MIME type of the downloaded file.
pub const MARKDOWN_MIME: &str = "text/markdown";

/// A finished article, ready to display or download.
#[derive(Clone, Debug, Serialize)]
pub struct GeneratedArticle {
    /// Markdown text returned by the model.
    pub content: String,
    /// Download name, `article_<YYYYMMDD_HHMMSS>.md`.
    pub file_name: String,
    /// Model that produced the text.
    pub model: String,
    /// Local time the generation finished.
    pub generated_at: DateTime<Local>,
}

impl GeneratedArticle {
    /// Wrap `content`, stamping it with the current local time.
    #[must_use]
    pub fn new(content: String, model: impl Into<String>) -> Self {
        Self::at(content, model, Local::now())
    }

    /// Wrap `content` with an explicit timestamp.
    #[must_use]
    pub fn at(content: String, model: impl Into<String>, generated_at: DateTime<Local>) -> Self {
        Self {
            file_name: article_file_name(&generated_at),
            content,
            model: model.into(),
            generated_at,
        }
    }

    /// File contents as UTF-8 bytes.
    #[must_use]
    pub fn to_bytes(&self) -> Vec<u8> {
        self.content.as_bytes().to_vec()
    }
}

/// `article_<YYYYMMDD_HHMMSS>.md` for the given instant.
#[must_use]
pub fn article_file_name<Tz>(when: &DateTime<Tz>) -> String
where
    Tz: TimeZone,
    Tz::Offset: std::fmt::Display,
{
    format!("article_{}.md", when.format("%Y%m%d_%H%M%S"))
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{NaiveDate, Utc};

    #[test]
    fn test_file_name_format() {
        let when = NaiveDate::from_ymd_opt(2024, 3, 9)
            .and_then(|d| d.and_hms_opt(7, 5, 30))
            .map(|naive| Utc.from_utc_datetime(&naive))
            .unwrap();
        assert_eq!(article_file_name(&when), "article_20240309_070530.md");
    }

    #[test]
    fn test_bytes_are_utf8_content() {
        let article = GeneratedArticle::new("# Café ☕\n".to_string(), "phi3:3.8b");
        assert_eq!(article.to_bytes(), "# Café ☕\n".as_bytes());
        assert!(article.file_name.starts_with("article_"));
        assert!(article.file_name.ends_with(".md"));
        assert_eq!(article.file_name.len(), "article_YYYYMMDD_HHMMSS.md".len());
    }
}
