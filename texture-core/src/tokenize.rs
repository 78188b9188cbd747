//! Tokenizer collaborators and stop/go word filtering

use crate::error::TokenizeError;
use regex::Regex;
use std::collections::HashSet;
use std::sync::{Arc, OnceLock};

/// Default pattern for runs of non-word characters
pub const NON_WORD_PATTERN: &str = r"[^\w]+";

static NON_WORD: OnceLock<Arc<Regex>> = OnceLock::new();

/// Turns raw text into an ordered token sequence
///
/// Implementations must be deterministic for a given input.
pub trait Tokenizer: Send + Sync {
    /// Tokenize the given text
    fn tokenize(&self, text: &str) -> Result<Vec<String>, TokenizeError>;
}

impl<F> Tokenizer for F
where
    F: Fn(&str) -> Result<Vec<String>, TokenizeError> + Send + Sync,
{
    fn tokenize(&self, text: &str) -> Result<Vec<String>, TokenizeError> {
        self(text)
    }
}

/// Regex-driven word tokenizer
///
/// Every run of separator characters becomes a single space, the text is
/// optionally lowercased, and the result is split on whitespace.
#[derive(Debug, Clone)]
pub struct WordTokenizer {
    separator: Arc<Regex>,
    lowercase: bool,
}

impl WordTokenizer {
    /// Create a lowercasing tokenizer that splits on non-word characters
    pub fn new() -> Self {
        let separator = NON_WORD.get_or_init(|| {
            Arc::new(Regex::new(NON_WORD_PATTERN).expect("Default separator pattern should compile"))
        });
        Self {
            separator: Arc::clone(separator),
            lowercase: true,
        }
    }

    /// Create a tokenizer with a custom separator pattern
    pub fn with_separator(pattern: &str) -> Result<Self, TokenizeError> {
        let separator = Regex::new(pattern)
            .map_err(|e| TokenizeError::new(format!("invalid separator pattern: {e}")))?;
        Ok(Self {
            separator: Arc::new(separator),
            lowercase: true,
        })
    }

    /// Enable or disable lowercasing
    pub fn lowercase(mut self, lowercase: bool) -> Self {
        self.lowercase = lowercase;
        self
    }
}

impl Default for WordTokenizer {
    fn default() -> Self {
        Self::new()
    }
}

impl Tokenizer for WordTokenizer {
    fn tokenize(&self, text: &str) -> Result<Vec<String>, TokenizeError> {
        let spaced = self.separator.replace_all(text, " ");
        let normalized = if self.lowercase {
            spaced.to_lowercase()
        } else {
            spaced.into_owned()
        };
        Ok(normalized.split_whitespace().map(str::to_string).collect())
    }
}

/// Emits letter n-grams for every word produced by an inner tokenizer
#[derive(Clone)]
pub struct LetterNgramTokenizer {
    inner: Arc<dyn Tokenizer>,
    min_n: usize,
    max_n: usize,
    mark_boundaries: bool,
    duplicate_boundaries: bool,
    begin_marker: char,
    end_marker: char,
}

impl std::fmt::Debug for LetterNgramTokenizer {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("LetterNgramTokenizer")
            .field("min_n", &self.min_n)
            .field("max_n", &self.max_n)
            .field("mark_boundaries", &self.mark_boundaries)
            .field("duplicate_boundaries", &self.duplicate_boundaries)
            .finish_non_exhaustive()
    }
}

impl LetterNgramTokenizer {
    /// Create an n-gram tokenizer for the inclusive range `min_n..=max_n`
    pub fn new(min_n: usize, max_n: usize) -> Result<Self, TokenizeError> {
        if min_n == 0 || min_n > max_n {
            return Err(TokenizeError::new(format!(
                "invalid n-gram range ({min_n}, {max_n})"
            )));
        }
        Ok(Self {
            inner: Arc::new(WordTokenizer::new()),
            min_n,
            max_n,
            mark_boundaries: true,
            duplicate_boundaries: true,
            begin_marker: '^',
            end_marker: '$',
        })
    }

    /// Replace the tokenizer used to find words
    pub fn with_inner(mut self, inner: Arc<dyn Tokenizer>) -> Self {
        self.inner = inner;
        self
    }

    /// Mark word-initial and word-final n-grams
    pub fn mark_boundaries(mut self, mark: bool) -> Self {
        self.mark_boundaries = mark;
        self
    }

    /// Emit marked boundary n-grams in addition to the plain n-gram
    pub fn duplicate_boundaries(mut self, duplicate: bool) -> Self {
        self.duplicate_boundaries = duplicate;
        self
    }

    /// Set the boundary marker characters
    pub fn markers(mut self, begin: char, end: char) -> Self {
        self.begin_marker = begin;
        self.end_marker = end;
        self
    }

    /// Compute letter n-grams for already tokenized words
    pub fn ngrams(&self, words: &[String]) -> Vec<String> {
        let mut grams = Vec::new();
        for word in words {
            let chars: Vec<char> = word.chars().collect();
            for n in self.min_n..=self.max_n {
                let Some(positions) = (chars.len() + 1).checked_sub(n) else {
                    continue;
                };
                for pos in 0..positions {
                    let mut plain: String = chars[pos..pos + n].iter().collect();
                    let mut extra = Vec::new();
                    if self.mark_boundaries {
                        if pos == 0 {
                            if self.duplicate_boundaries {
                                extra.push(format!("{}{}", self.begin_marker, plain));
                            } else {
                                plain.insert(0, self.begin_marker);
                            }
                        }
                        if pos + 1 == positions {
                            if self.duplicate_boundaries {
                                extra.push(format!("{}{}", plain, self.end_marker));
                            } else {
                                plain.push(self.end_marker);
                            }
                        }
                    }
                    grams.push(plain);
                    grams.extend(extra);
                }
            }
        }
        grams
    }
}

impl Tokenizer for LetterNgramTokenizer {
    fn tokenize(&self, text: &str) -> Result<Vec<String>, TokenizeError> {
        let words = self.inner.tokenize(text)?;
        Ok(self.ngrams(&words))
    }
}

/// Stopword removal followed by goword retention
///
/// Stopwords are always removed before gowords are evaluated, so a word in
/// both sets is dropped. An empty set behaves as if it were not configured.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct WordFilter {
    stopwords: Option<HashSet<String>>,
    gowords: Option<HashSet<String>>,
}

impl WordFilter {
    /// Create a filter from optional stop and go sets
    pub fn new(stopwords: Option<HashSet<String>>, gowords: Option<HashSet<String>>) -> Self {
        Self {
            stopwords: stopwords.filter(|s| !s.is_empty()),
            gowords: gowords.filter(|s| !s.is_empty()),
        }
    }

    /// Replace the stopword set
    pub fn set_stopwords(&mut self, stopwords: HashSet<String>) {
        self.stopwords = Some(stopwords).filter(|s| !s.is_empty());
    }

    /// Replace the goword set
    pub fn set_gowords(&mut self, gowords: HashSet<String>) {
        self.gowords = Some(gowords).filter(|s| !s.is_empty());
    }

    /// Returns true if neither set is configured
    pub fn is_empty(&self) -> bool {
        self.stopwords.is_none() && self.gowords.is_none()
    }

    /// Apply the stopword pass, then the goword pass
    pub fn apply(&self, mut tokens: Vec<String>) -> Vec<String> {
        if let Some(stop) = &self.stopwords {
            tokens.retain(|t| !stop.contains(t));
        }
        if let Some(go) = &self.gowords {
            tokens.retain(|t| go.contains(t));
        }
        tokens
    }
}

/// Build a word set from anything yielding string-like items
pub fn word_set<I, S>(words: I) -> HashSet<String>
where
    I: IntoIterator<Item = S>,
    S: Into<String>,
{
    words.into_iter().map(Into::into).collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn strings(words: &[&str]) -> Vec<String> {
        words.iter().map(|w| w.to_string()).collect()
    }

    #[test]
    fn test_word_tokenizer_lowercases_and_strips_punctuation() {
        let tokenizer = WordTokenizer::new();
        let tokens = tokenizer
            .tokenize("Rough winds do shake the darling buds of May,")
            .unwrap();
        assert_eq!(
            tokens,
            strings(&["rough", "winds", "do", "shake", "the", "darling", "buds", "of", "may"])
        );
    }

    #[test]
    fn test_word_tokenizer_apostrophe_splits() {
        let tokens = WordTokenizer::new()
            .tokenize("Shall I compare thee to a summer's day?")
            .unwrap();
        assert_eq!(&tokens[..4], &strings(&["shall", "i", "compare", "thee"])[..]);
        assert!(tokens.contains(&"summer".to_string()));
    }

    #[test]
    fn test_word_tokenizer_preserves_case_when_asked() {
        let tokens = WordTokenizer::new()
            .lowercase(false)
            .tokenize("Thou art")
            .unwrap();
        assert_eq!(tokens, strings(&["Thou", "art"]));
    }

    #[test]
    fn test_invalid_separator_pattern() {
        assert!(WordTokenizer::with_separator("[unclosed").is_err());
    }

    #[test]
    fn test_closure_is_a_tokenizer() {
        let split = |text: &str| -> Result<Vec<String>, TokenizeError> {
            Ok(text.split('-').map(str::to_string).collect())
        };
        assert_eq!(split.tokenize("a-b-c").unwrap(), strings(&["a", "b", "c"]));
    }

    #[test]
    fn test_letter_ngrams_duplicate_boundaries() {
        let tokenizer = LetterNgramTokenizer::new(2, 2).unwrap();
        let grams = tokenizer.tokenize("cat").unwrap();
        assert_eq!(grams, strings(&["ca", "^ca", "at", "at$"]));
    }

    #[test]
    fn test_letter_ngrams_inline_boundaries() {
        let tokenizer = LetterNgramTokenizer::new(1, 1)
            .unwrap()
            .duplicate_boundaries(false);
        let grams = tokenizer.tokenize("ox").unwrap();
        assert_eq!(grams, strings(&["^o", "x$"]));

        let single = tokenizer.tokenize("a").unwrap();
        assert_eq!(single, strings(&["^a$"]));
    }

    #[test]
    fn test_letter_ngrams_skip_short_words() {
        let tokenizer = LetterNgramTokenizer::new(3, 3)
            .unwrap()
            .mark_boundaries(false);
        let grams = tokenizer.tokenize("to be").unwrap();
        assert!(grams.is_empty());
    }

    #[test]
    fn test_letter_ngrams_rejects_bad_range() {
        assert!(LetterNgramTokenizer::new(0, 2).is_err());
        assert!(LetterNgramTokenizer::new(3, 2).is_err());
    }

    #[test]
    fn test_stopwords_before_gowords() {
        let filter = WordFilter::new(
            Some(word_set(["the"])),
            Some(word_set(["the", "rough"])),
        );
        let kept = filter.apply(strings(&["rough", "winds", "the", "buds"]));
        assert_eq!(kept, strings(&["rough"]));
    }

    #[test]
    fn test_empty_sets_do_not_filter() {
        let filter = WordFilter::new(Some(HashSet::new()), Some(HashSet::new()));
        assert!(filter.is_empty());
        let tokens = strings(&["a", "b"]);
        assert_eq!(filter.apply(tokens.clone()), tokens);
    }
}
