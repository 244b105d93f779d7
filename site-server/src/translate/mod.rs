//! Italian → English translation of admin-edited page text

mod walker;
mod workers_ai;

use async_trait::async_trait;
use thiserror::Error;

pub use walker::{AutoTranslate, WalkRules};
pub use workers_ai::WorkersAiTranslator;

/// Page slugs that are stored as submitted, without translation
pub const UNTRANSLATED_SLUGS: &[&str] = &["gallery", "covers"];

/// Errors raised by a translation backend
#[derive(Error, Debug)]
pub enum TranslateError {
    /// HTTP request to the translation service failed
    #[error("HTTP request failed: {0}")]
    Request(#[from] reqwest::Error),

    /// Translation service answered with a non-success status
    #[error("Translation service returned {status}: {body}")]
    Status { status: u16, body: String },

    /// Translation backend refused or could not produce a result
    #[error("Translation failed: {0}")]
    Upstream(String),
}

/// Italian → English text translator
#[async_trait]
pub trait Translator: Send + Sync {
    /// Translate one string. Blank input yields `""`.
    async fn translate(&self, text: &str) -> Result<String, TranslateError>;
}
