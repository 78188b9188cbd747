//! Capability traits shared by corpora and their wrappers

use crate::content::Content;
use crate::corpus::CorpusParams;
use crate::error::Result;
use crate::source::Source;

/// An externally defined, indexable sequence of labeled content
///
/// Bound as-is: the corpus treats every item as resident and never looks
/// behind `fetch`.
pub trait TextSource: Send {
    /// Number of items
    fn len(&self) -> usize;

    /// Returns true if there are no items
    fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Label of the item at `index`
    fn label(&self, index: usize) -> String;

    /// Content of the item at `index`
    fn fetch(&mut self, index: usize) -> Result<Content>;
}

/// A labeled-text corpus that can be bound, configured and processed
///
/// Wrappers such as the chunk engine and the structured extractor are
/// written against this trait rather than a concrete corpus.
pub trait TextCorpus {
    /// Bind a source, normalizing it into items
    fn bind(source: Source, file_backed: Option<bool>) -> Result<Self>
    where
        Self: Sized;

    /// Merge the given settings into the current ones
    fn configure(&mut self, params: CorpusParams);

    /// Number of bound items
    fn len(&self) -> usize;

    /// Returns true if no items are bound
    fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Label of the item at `index`
    fn label(&self, index: usize) -> Option<&str>;

    /// Run the processing pipeline for one item
    fn process(&mut self, index: usize) -> Result<(String, Content)>;
}
