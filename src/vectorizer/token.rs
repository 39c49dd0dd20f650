use indexmap::IndexMap;

use crate::config::{StopWords, VectorizerConfig};
use crate::vectorizer::stop_words::is_english_stop_word;

/// テキストをトークン列に分割する
///
/// - `lowercase` なら小文字化
/// - 英数字と `_` の連続をトークンとする
/// - `min_token_chars` 未満の短いトークンとストップワードは除外
pub fn tokenize(text: &str, config: &VectorizerConfig) -> Vec<String> {
    let buffer = if config.lowercase {
        text.to_lowercase()
    } else {
        text.to_string()
    };
    let keep = |token: &str| -> bool {
        if token.chars().count() < config.min_token_chars {
            return false;
        }
        match config.stop_words {
            StopWords::English => !is_english_stop_word(token),
            StopWords::None => true,
        }
    };

    let mut tokens = Vec::new();
    let mut start: Option<usize> = None;
    for (i, c) in buffer.char_indices() {
        if c.is_alphanumeric() || c == '_' {
            if start.is_none() {
                start = Some(i);
            }
        } else if let Some(s) = start.take() {
            let token = &buffer[s..i];
            if keep(token) {
                tokens.push(token.to_string());
            }
        }
    }
    // 末尾のトークン
    if let Some(s) = start {
        let token = &buffer[s..];
        if keep(token) {
            tokens.push(token.to_string());
        }
    }
    tokens
}

/// TokenFrequency 構造体
/// 1ドキュメント内の token の出現回数を管理します
#[derive(Debug, Clone, Default)]
pub struct TokenFrequency {
    token_count: IndexMap<String, u32>,
    total_token_count: u64,
}

impl TokenFrequency {
    pub fn new() -> Self {
        TokenFrequency {
            token_count: IndexMap::new(),
            total_token_count: 0,
        }
    }

    /// tokenを追加する
    #[inline]
    pub fn add_token(&mut self, token: &str) -> &mut Self {
        let count = self.token_count.entry(token.to_string()).or_insert(0);
        *count += 1;
        self.total_token_count += 1;
        self
    }

    /// 複数のtokenを追加する
    #[inline]
    pub fn add_tokens<T>(&mut self, tokens: &[T]) -> &mut Self
    where
        T: AsRef<str>,
    {
        for token in tokens {
            self.add_token(token.as_ref());
        }
        self
    }

    /// Tokenize `text` and count the surviving tokens.
    pub fn from_text(text: &str, config: &VectorizerConfig) -> Self {
        let mut freq = TokenFrequency::new();
        freq.add_tokens(&tokenize(text, config));
        freq
    }

    /// 特定のtokenの出現回数
    #[inline]
    pub fn token_count(&self, token: &str) -> u32 {
        self.token_count.get(token).copied().unwrap_or(0)
    }

    /// 全tokenの合計出現回数
    #[inline]
    pub fn token_sum(&self) -> u64 {
        self.total_token_count
    }

    /// ユニークな token の数
    #[inline]
    pub fn token_num(&self) -> usize {
        self.token_count.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.token_count.is_empty()
    }

    /// (token, count) を挿入順に返す
    pub fn iter(&self) -> impl Iterator<Item = (&str, u32)> + '_ {
        self.token_count.iter().map(|(t, &c)| (t.as_str(), c))
    }

    /// ユニークな token の参照
    pub fn token_set_ref_str(&self) -> Vec<&str> {
        self.token_count.keys().map(|s| s.as_str()).collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn tokenize_lowercases_and_drops_stop_words() {
        let cfg = VectorizerConfig::default();
        let tokens = tokenize("A Fast CAR, racing-story!", &cfg);
        assert_eq!(tokens, vec!["fast", "car", "racing", "story"]);
    }

    #[test]
    fn tokenize_drops_single_char_tokens() {
        let cfg = VectorizerConfig::default();
        let tokens = tokenize("x y zz 7 42", &cfg);
        assert_eq!(tokens, vec!["zz", "42"]);
    }

    #[test]
    fn tokenize_without_stop_words_keeps_them() {
        let cfg = VectorizerConfig {
            stop_words: StopWords::None,
            ..VectorizerConfig::default()
        };
        let tokens = tokenize("the car", &cfg);
        assert_eq!(tokens, vec!["the", "car"]);
    }

    #[test]
    fn frequency_counts_repeats() {
        let cfg = VectorizerConfig::default();
        let freq = TokenFrequency::from_text("car car racing car", &cfg);
        assert_eq!(freq.token_count("car"), 3);
        assert_eq!(freq.token_count("racing"), 1);
        assert_eq!(freq.token_count("boat"), 0);
        assert_eq!(freq.token_sum(), 4);
        assert_eq!(freq.token_num(), 2);
    }

    #[test]
    fn only_stop_words_gives_empty_frequency() {
        let cfg = VectorizerConfig::default();
        let freq = TokenFrequency::from_text("the and of a", &cfg);
        assert!(freq.is_empty());
    }
}
