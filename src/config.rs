//! Configuration for corpus columns, tokenization and ranking.

use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::error::{RecommendError, Result};

/// Which stop-word list the tokenizer filters with.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum StopWords {
    #[default]
    English,
    None,
}

/// Tokenizer / vectorizer settings.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct VectorizerConfig {
    /// Lowercase text before tokenizing.
    pub lowercase: bool,
    pub stop_words: StopWords,
    /// Shortest token (in chars) kept in the vocabulary.
    pub min_token_chars: usize,
}

impl Default for VectorizerConfig {
    fn default() -> Self {
        Self {
            lowercase: true,
            stop_words: StopWords::English,
            min_token_chars: 2,
        }
    }
}

/// Top-level recommender configuration.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct RecommenderConfig {
    /// Column holding the lookup key.
    pub title_column: String,
    /// Column holding the free text the model is built from.
    pub summary_column: String,
    /// Maximum number of titles returned per query.
    pub top_k: usize,
    pub vectorizer: VectorizerConfig,
}

impl Default for RecommenderConfig {
    fn default() -> Self {
        Self {
            title_column: "title".to_string(),
            summary_column: "summary".to_string(),
            top_k: 5,
            vectorizer: VectorizerConfig::default(),
        }
    }
}

impl RecommenderConfig {
    /// Read a JSON config file. Missing keys fall back to defaults.
    pub fn from_json_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let text = std::fs::read_to_string(path.as_ref())?;
        Self::from_json_str(&text)
    }

    pub fn from_json_str(text: &str) -> Result<Self> {
        serde_json::from_str(text).map_err(|e| RecommendError::Config(e.to_string()))
    }
}
