//! Per-item lazy state
//!
//! Each bound item owns exactly one state record. The corpus mutates a
//! record only while processing that item, so residency, tokenization
//! status and the cached token count can never drift apart.

use crate::content::{Content, Tokenized};
use std::path::{Path, PathBuf};

/// Where an item's content lives
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Backing {
    /// Content was supplied in memory (or by an external source)
    Memory,
    /// Content must be read from a file on access
    FileRef,
}

/// What the corpus currently holds for an item
#[derive(Debug, Clone)]
pub(crate) enum Payload {
    /// Raw content held in memory
    Content(Content),
    /// Path to read on access
    File(PathBuf),
    /// Fetched from the corpus's external source on access
    External,
}

/// One labeled item and its lazy state
#[derive(Debug, Clone)]
pub struct CorpusItem {
    label: String,
    pub(crate) payload: Payload,
    backing: Backing,
    pub(crate) resident: bool,
    pub(crate) tokenized: Tokenized,
    pub(crate) token_count: Option<usize>,
}

impl CorpusItem {
    pub(crate) fn in_memory(label: String, content: Content) -> Self {
        Self {
            label,
            payload: Payload::Content(content),
            backing: Backing::Memory,
            resident: true,
            tokenized: Tokenized::Unknown,
            token_count: None,
        }
    }

    pub(crate) fn file(label: String, path: PathBuf) -> Self {
        Self {
            label,
            payload: Payload::File(path),
            backing: Backing::FileRef,
            resident: false,
            tokenized: Tokenized::Unknown,
            token_count: None,
        }
    }

    pub(crate) fn external(label: String) -> Self {
        Self {
            label,
            payload: Payload::External,
            backing: Backing::Memory,
            resident: true,
            tokenized: Tokenized::Unknown,
            token_count: None,
        }
    }

    /// The item's label (not necessarily unique)
    pub fn label(&self) -> &str {
        &self.label
    }

    /// Where the item's content comes from
    pub fn backing(&self) -> Backing {
        self.backing
    }

    /// Returns true once the raw content is held in memory
    pub fn is_resident(&self) -> bool {
        self.resident
    }

    /// Tokenization status, `Unknown` until first access
    pub fn tokenized(&self) -> Tokenized {
        self.tokenized
    }

    /// Length of the unfiltered token sequence, once known
    pub fn token_count(&self) -> Option<usize> {
        self.token_count
    }

    /// The backing file path, for file-backed items
    pub fn path(&self) -> Option<&Path> {
        match &self.payload {
            Payload::File(path) => Some(path),
            _ => None,
        }
    }

    /// Records the shape of the first observed content; later calls are no-ops
    pub(crate) fn observe(&mut self, content: &Content) {
        if self.tokenized != Tokenized::Unknown {
            return;
        }
        match content {
            Content::Tokens(tokens) => {
                self.tokenized = Tokenized::Yes;
                self.token_count = Some(tokens.len());
            }
            Content::Text(_) => self.tokenized = Tokenized::No,
        }
    }

    /// Keeps raw content in memory; residency never reverts
    pub(crate) fn retain(&mut self, raw: Content) {
        if self.resident {
            return;
        }
        self.payload = Payload::Content(raw);
        self.resident = true;
    }

    /// Short single-line preview for summaries
    pub(crate) fn preview(&self) -> String {
        match &self.payload {
            Payload::Content(Content::Text(text)) => text.replace('\n', " "),
            Payload::Content(Content::Tokens(tokens)) => tokens.join(" "),
            Payload::File(path) => path.display().to_string(),
            Payload::External => "<external>".to_string(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_file_item_starts_unresident() {
        let item = CorpusItem::file("a.txt".into(), PathBuf::from("/data/a.txt"));
        assert_eq!(item.backing(), Backing::FileRef);
        assert!(!item.is_resident());
        assert_eq!(item.tokenized(), Tokenized::Unknown);
        assert_eq!(item.path(), Some(Path::new("/data/a.txt")));
    }

    #[test]
    fn test_observe_is_fixed_after_first_call() {
        let mut item = CorpusItem::in_memory("a".into(), Content::from(vec!["x", "y"]));
        item.observe(&Content::from(vec!["x", "y"]));
        assert_eq!(item.tokenized(), Tokenized::Yes);
        assert_eq!(item.token_count(), Some(2));

        item.observe(&Content::from("plain text"));
        assert_eq!(item.tokenized(), Tokenized::Yes);
        assert_eq!(item.token_count(), Some(2));
    }

    #[test]
    fn test_retain_is_one_way() {
        let mut item = CorpusItem::file("a.txt".into(), PathBuf::from("a.txt"));
        item.retain(Content::from("first"));
        assert!(item.is_resident());
        assert_eq!(item.backing(), Backing::FileRef);

        item.retain(Content::from("second"));
        assert!(matches!(&item.payload, Payload::Content(Content::Text(t)) if t == "first"));
    }
}
