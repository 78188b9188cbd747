//! Item content and tokenization state

use serde::{Deserialize, Serialize};
use std::fmt;

/// The content of a corpus item: raw text or a token sequence
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum Content {
    /// Raw, untokenized text
    Text(String),
    /// Ordered token sequence
    Tokens(Vec<String>),
}

impl Content {
    /// Returns true if this content is a token sequence
    pub fn is_tokens(&self) -> bool {
        matches!(self, Content::Tokens(_))
    }

    /// Borrow the raw text, if this is text
    pub fn as_text(&self) -> Option<&str> {
        match self {
            Content::Text(text) => Some(text),
            Content::Tokens(_) => None,
        }
    }

    /// Borrow the tokens, if this is a token sequence
    pub fn as_tokens(&self) -> Option<&[String]> {
        match self {
            Content::Text(_) => None,
            Content::Tokens(tokens) => Some(tokens),
        }
    }

    /// Take the tokens, if this is a token sequence
    pub fn into_tokens(self) -> Option<Vec<String>> {
        match self {
            Content::Text(_) => None,
            Content::Tokens(tokens) => Some(tokens),
        }
    }

    /// Collapse into a single string, joining tokens with one space
    pub fn into_text(self) -> String {
        match self {
            Content::Text(text) => text,
            Content::Tokens(tokens) => tokens.join(" "),
        }
    }
}

impl fmt::Display for Content {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Content::Text(text) => f.write_str(text),
            Content::Tokens(tokens) => write!(f, "[{}]", tokens.join(", ")),
        }
    }
}

impl From<String> for Content {
    fn from(text: String) -> Self {
        Content::Text(text)
    }
}

impl From<&str> for Content {
    fn from(text: &str) -> Self {
        Content::Text(text.to_string())
    }
}

impl From<Vec<String>> for Content {
    fn from(tokens: Vec<String>) -> Self {
        Content::Tokens(tokens)
    }
}

impl From<Vec<&str>> for Content {
    fn from(tokens: Vec<&str>) -> Self {
        Content::Tokens(tokens.into_iter().map(str::to_string).collect())
    }
}

/// Corpus-wide tokenization switch
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TokenizeMode {
    /// Join token sequences back into text
    Off,
    /// Tokenize text and apply stop/go filters
    On,
    /// Pass content through unchanged
    #[default]
    Unset,
}

/// Whether an item's stored content is already a token sequence
///
/// Starts `Unknown` and is fixed on first observation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Tokenized {
    #[default]
    Unknown,
    Yes,
    No,
}

impl Tokenized {
    /// Returns true once the item has been observed as a token sequence
    pub fn is_yes(self) -> bool {
        self == Tokenized::Yes
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_into_text_joins_with_single_space() {
        let content = Content::from(vec!["rough", "winds", "do", "shake"]);
        assert_eq!(content.into_text(), "rough winds do shake");
    }

    #[test]
    fn test_shape_accessors() {
        let text = Content::from("summer's day");
        assert!(!text.is_tokens());
        assert_eq!(text.as_text(), Some("summer's day"));
        assert!(text.as_tokens().is_none());

        let tokens = Content::from(vec!["a", "b"]);
        assert!(tokens.is_tokens());
        assert_eq!(tokens.as_tokens().map(<[String]>::len), Some(2));
    }

    #[test]
    fn test_untagged_json_shape() {
        let text: Content = serde_json::from_str("\"hello\"").unwrap();
        assert_eq!(text, Content::from("hello"));

        let tokens: Content = serde_json::from_str("[\"a\", \"b\"]").unwrap();
        assert_eq!(tokens, Content::from(vec!["a", "b"]));
    }

    #[test]
    fn test_tokenize_mode_default_is_unset() {
        assert_eq!(TokenizeMode::default(), TokenizeMode::Unset);
        let mode: TokenizeMode = serde_json::from_str("\"on\"").unwrap();
        assert_eq!(mode, TokenizeMode::On);
    }
}
