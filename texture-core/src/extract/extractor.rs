//! Structured extraction over any [`TextCorpus`]

use super::query::{Extracted, MergePolicy, RecordFilter};
use super::record::{Record, RecordParser};
use crate::content::{Content, TokenizeMode};
use crate::corpus::{Corpus, CorpusParams, Preprocessor};
use crate::error::{CorpusError, Result};
use crate::source::Source;
use crate::traits::TextCorpus;
use std::sync::Arc;

/// Parses each item into records, selects some and merges them
///
/// The wrapped corpus always runs with tokenization off, so the parser
/// sees raw text. Tokenization, if requested, is applied here to the joined
/// output instead.
pub struct StructuredExtractor<C: TextCorpus = Corpus> {
    corpus: C,
    parser: Arc<dyn RecordParser>,
    filter: RecordFilter,
    merge: MergePolicy,
    tokenize: bool,
    preprocessor: Preprocessor,
}

impl StructuredExtractor<Corpus> {
    /// Bind a source and wrap the resulting corpus
    pub fn bind(
        source: impl Into<Source>,
        file_backed: Option<bool>,
        parser: impl RecordParser + 'static,
    ) -> Result<Self> {
        Ok(Self::new(Corpus::bind(source, file_backed)?, parser))
    }
}

impl<C: TextCorpus> StructuredExtractor<C> {
    /// Wrap a corpus, switching its tokenization off
    pub fn new(mut corpus: C, parser: impl RecordParser + 'static) -> Self {
        corpus.configure(CorpusParams::new().tokenize(TokenizeMode::Off));
        Self {
            corpus,
            parser: Arc::new(parser),
            filter: RecordFilter::default(),
            merge: MergePolicy::default(),
            tokenize: false,
            preprocessor: Preprocessor::default(),
        }
    }

    /// Replace the record filter
    pub fn with_filter(mut self, filter: RecordFilter) -> Self {
        self.filter = filter;
        self
    }

    /// Replace the merge policy
    pub fn with_merge(mut self, merge: MergePolicy) -> Self {
        self.merge = merge;
        self
    }

    pub fn set_filter(&mut self, filter: RecordFilter) {
        self.filter = filter;
    }

    pub fn set_merge(&mut self, merge: MergePolicy) {
        self.merge = merge;
    }

    pub fn filter(&self) -> &RecordFilter {
        &self.filter
    }

    pub fn merge(&self) -> MergePolicy {
        self.merge
    }

    /// Merge corpus settings
    ///
    /// The tokenize mode and word filters apply to the extracted text; the
    /// wrapped corpus keeps reading raw text.
    pub fn configure(&mut self, mut params: CorpusParams) {
        match params.tokenize.take() {
            Some(TokenizeMode::On) => self.tokenize = true,
            Some(TokenizeMode::Off) => self.tokenize = false,
            Some(TokenizeMode::Unset) | None => {}
        }
        self.preprocessor.apply_params(&params);
        self.corpus.configure(params);
    }

    /// The wrapped corpus
    pub fn corpus(&self) -> &C {
        &self.corpus
    }

    /// Unwrap the corpus
    pub fn into_inner(self) -> C {
        self.corpus
    }

    pub fn len(&self) -> usize {
        self.corpus.len()
    }

    pub fn is_empty(&self) -> bool {
        self.corpus.is_empty()
    }

    /// Parsed records of one item, before filtering
    ///
    /// A parser failure is logged and yields no records.
    pub fn records(&mut self, index: usize) -> Result<(String, Vec<Record>)> {
        let (label, content) = self.corpus.process(index)?;
        let raw = match content {
            Content::Text(text) => text,
            Content::Tokens(_) => {
                return Err(CorpusError::ContentShape {
                    label,
                    expected: "text",
                })
            }
        };

        let records = match self.parser.parse(&label, &raw) {
            Ok(records) => records,
            Err(e) => {
                log::error!("Ignoring '{label}': {e}");
                Vec::new()
            }
        };
        Ok((label, records))
    }

    /// Filtered and merged output of one item
    pub fn get(&mut self, index: usize) -> Result<(String, Extracted)> {
        let (label, records) = self.records(index)?;
        let selected = self.filter.apply(records);

        let extracted = match self.merge.merge(&selected) {
            Extracted::Text(text) if self.tokenize => {
                let tokens = self.preprocessor.tokenize(&label, &text)?;
                Extracted::Tokens(self.preprocessor.filter(tokens))
            }
            other => other,
        };
        Ok((label, extracted))
    }

    /// Lazily iterate over every item
    pub fn iter(&mut self) -> Extractions<'_, C> {
        let stop = self.corpus.len();
        Extractions {
            extractor: self,
            next: 0,
            stop,
            step: 1,
        }
    }

    /// Lazily iterate over items `start..stop` by `step`
    pub fn slice(&mut self, start: usize, stop: usize, step: usize) -> Result<Extractions<'_, C>> {
        if step == 0 {
            return Err(CorpusError::config("slice step must be greater than 0"));
        }
        let stop = stop.min(self.corpus.len());
        Ok(Extractions {
            extractor: self,
            next: start,
            stop,
            step,
        })
    }
}

/// Lazy iterator over extracted items
pub struct Extractions<'a, C: TextCorpus> {
    extractor: &'a mut StructuredExtractor<C>,
    next: usize,
    stop: usize,
    step: usize,
}

impl<C: TextCorpus> Iterator for Extractions<'_, C> {
    type Item = Result<(String, Extracted)>;

    fn next(&mut self) -> Option<Self::Item> {
        if self.next >= self.stop {
            return None;
        }
        let index = self.next;
        self.next = self.next.saturating_add(self.step);
        Some(self.extractor.get(index))
    }
}
