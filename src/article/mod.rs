//! Article inputs, prompt construction, and the downloadable result.

pub mod error;
pub mod export;
pub mod form;
pub mod prompt_builder;
pub mod request;

pub use error::{ArticleError, ArticleResult};
pub use export::{GeneratedArticle, MARKDOWN_MIME, article_file_name};
pub use form::ArticleForm;
pub use prompt_builder::build_prompt;
pub use request::{ArticleRequest, GenConfig, ReadingLevel};
