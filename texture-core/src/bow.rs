//! Bag-of-words dictionary over tokenized items

use crate::content::Content;
use crate::error::{CorpusError, Result};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;

/// Dense token ids assigned in first-seen order
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Dictionary {
    ids: HashMap<String, usize>,
    tokens: Vec<String>,
    doc_freq: Vec<usize>,
    documents: usize,
}

/// Sparse `(token id, count)` pairs sorted by id
pub type Bow = Vec<(usize, usize)>;

impl Dictionary {
    pub fn new() -> Self {
        Self::default()
    }

    /// Build a dictionary from every item of an iterator of processed pairs
    ///
    /// Every item must be tokenized.
    pub fn from_corpus<I>(items: I) -> Result<Self>
    where
        I: IntoIterator<Item = Result<(String, Content)>>,
    {
        let mut dictionary = Self::new();
        for item in items {
            let (label, content) = item?;
            dictionary.add_document(&expect_tokens(label, &content)?);
        }
        log::info!(
            "Built dictionary of {} tokens from {} documents",
            dictionary.len(),
            dictionary.documents
        );
        Ok(dictionary)
    }

    /// Register one document's tokens
    pub fn add_document<S: AsRef<str>>(&mut self, tokens: &[S]) {
        let mut seen = vec![false; self.tokens.len()];
        for token in tokens {
            let token = token.as_ref();
            let id = match self.ids.get(token) {
                Some(&id) => id,
                None => {
                    let id = self.tokens.len();
                    self.ids.insert(token.to_string(), id);
                    self.tokens.push(token.to_string());
                    self.doc_freq.push(0);
                    seen.push(false);
                    id
                }
            };
            if !seen[id] {
                seen[id] = true;
                self.doc_freq[id] += 1;
            }
        }
        self.documents += 1;
    }

    /// Number of distinct tokens
    pub fn len(&self) -> usize {
        self.tokens.len()
    }

    pub fn is_empty(&self) -> bool {
        self.tokens.is_empty()
    }

    /// Number of documents added
    pub fn documents(&self) -> usize {
        self.documents
    }

    pub fn id(&self, token: &str) -> Option<usize> {
        self.ids.get(token).copied()
    }

    pub fn token(&self, id: usize) -> Option<&str> {
        self.tokens.get(id).map(String::as_str)
    }

    /// Number of documents containing the token with this id
    pub fn doc_freq(&self, id: usize) -> Option<usize> {
        self.doc_freq.get(id).copied()
    }

    /// Count known tokens; unknown ones are ignored
    pub fn doc2bow<S: AsRef<str>>(&self, tokens: &[S]) -> Bow {
        let mut counts: HashMap<usize, usize> = HashMap::new();
        for id in tokens.iter().filter_map(|t| self.id(t.as_ref())) {
            *counts.entry(id).or_insert(0) += 1;
        }
        let mut bow: Bow = counts.into_iter().collect();
        bow.sort_unstable();
        bow
    }
}

/// Build a dictionary and one bag of words per item, in item order
pub fn bow_corpus<I>(items: I) -> Result<(Dictionary, Vec<(String, Bow)>)>
where
    I: IntoIterator<Item = Result<(String, Content)>>,
{
    let documents = items
        .into_iter()
        .map(|item| {
            let (label, content) = item?;
            let tokens = expect_tokens(label.clone(), &content)?;
            Ok((label, tokens))
        })
        .collect::<Result<Vec<_>>>()?;

    let mut dictionary = Dictionary::new();
    for (_, tokens) in &documents {
        dictionary.add_document(tokens);
    }
    let bags = documents
        .into_iter()
        .map(|(label, tokens)| {
            let bow = dictionary.doc2bow(&tokens);
            (label, bow)
        })
        .collect();
    Ok((dictionary, bags))
}

fn expect_tokens(label: String, content: &Content) -> Result<Vec<String>> {
    content
        .as_tokens()
        .map(<[String]>::to_vec)
        .ok_or(CorpusError::ContentShape {
            label,
            expected: "tokens",
        })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::content::TokenizeMode;
    use crate::corpus::{Corpus, CorpusParams};

    fn corpus() -> Corpus {
        let mut corpus = Corpus::bind(
            vec![
                ("first.txt", "And summer's lease hath all too short a date."),
                ("second.txt", "Shall I compare thee to a summer's day?"),
            ],
            None,
        )
        .unwrap();
        corpus.configure(CorpusParams::new().tokenize(TokenizeMode::On));
        corpus
    }

    #[test]
    fn test_ids_follow_first_appearance() {
        let mut corpus = corpus();
        let dictionary = Dictionary::from_corpus(corpus.iter()).unwrap();
        assert_eq!(dictionary.id("and"), Some(0));
        assert_eq!(dictionary.id("summer"), Some(1));
        assert_eq!(dictionary.token(2), Some("s"));
        assert_eq!(dictionary.documents(), 2);
    }

    #[test]
    fn test_doc_freq_counts_documents_not_occurrences() {
        let mut dictionary = Dictionary::new();
        dictionary.add_document(&["more", "lovely", "more"]);
        dictionary.add_document(&["more", "temperate"]);
        assert_eq!(dictionary.doc_freq(dictionary.id("more").unwrap()), Some(2));
        assert_eq!(dictionary.doc_freq(dictionary.id("lovely").unwrap()), Some(1));
    }

    #[test]
    fn test_doc2bow_sorted_and_ignores_unknown() {
        let mut dictionary = Dictionary::new();
        dictionary.add_document(&["rough", "winds", "do", "shake"]);
        let bow = dictionary.doc2bow(&["shake", "rough", "shake", "buds"]);
        assert_eq!(bow, vec![(0, 1), (3, 2)]);
    }

    #[test]
    fn test_bow_corpus() {
        let mut corpus = corpus();
        let (dictionary, bags) = bow_corpus(corpus.iter()).unwrap();
        assert_eq!(bags.len(), 2);
        assert_eq!(bags[1].0, "second.txt");
        let a = dictionary.id("a").unwrap();
        assert!(bags[0].1.contains(&(a, 1)));
        assert!(bags[1].1.contains(&(a, 1)));
    }

    #[test]
    fn test_untokenized_content_is_rejected() {
        let mut corpus = Corpus::bind(vec![("a", "plain text")], None).unwrap();
        let err = Dictionary::from_corpus(corpus.iter()).unwrap_err();
        assert!(matches!(err, CorpusError::ContentShape { .. }));
    }
}
