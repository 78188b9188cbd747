//! The corpus store and its processing pipeline
//!
//! A [`Corpus`] owns an ordered list of labeled items. Every read, whether
//! by index, iteration or slice, funnels through one pipeline:
//!
//! 1. read the backing file if the item is not resident
//! 2. record whether the item is already tokenized (first access only)
//! 3. apply the tokenize mode: tokenize and filter, join tokens, or pass
//! 4. keep the raw content in memory if asked
//!
//! Only the raw, pre-transform content is ever kept, so changing the
//! tokenize mode or the word filters after items have been read takes
//! effect for every item on the next access.

use crate::content::{Content, TokenizeMode};
use crate::error::{CorpusError, Result};
use crate::item::{CorpusItem, Payload};
use crate::reader::{ContentReader, FsReader};
use crate::source::{normalize, Source};
use crate::tokenize::{Tokenizer, WordFilter, WordTokenizer};
use crate::traits::{TextCorpus, TextSource};
use std::collections::HashSet;
#[cfg(feature = "parallel")]
use std::collections::VecDeque;
use std::fmt;
use std::ops::{Bound, RangeBounds};
#[cfg(feature = "parallel")]
use std::path::{Path, PathBuf};
use std::sync::Arc;

/// Rows shown by `Display` before the summary switches to head and tail
const SUMMARY_ROWS: usize = 40;

/// Prefetch window per rayon thread
#[cfg(feature = "parallel")]
const PREFETCH_PER_THREAD: usize = 4;

/// Settings merged into a corpus by [`Corpus::configure`]
///
/// Every field is optional; `None` leaves the current setting untouched.
#[derive(Clone, Default)]
pub struct CorpusParams {
    pub tokenize: Option<TokenizeMode>,
    pub tokenizer: Option<Arc<dyn Tokenizer>>,
    pub stopwords: Option<HashSet<String>>,
    pub gowords: Option<HashSet<String>>,
    pub keep_in_memory: Option<bool>,
}

impl fmt::Debug for CorpusParams {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("CorpusParams")
            .field("tokenize", &self.tokenize)
            .field("tokenizer", &self.tokenizer.as_ref().map(|_| "<tokenizer>"))
            .field("stopwords", &self.stopwords.as_ref().map(HashSet::len))
            .field("gowords", &self.gowords.as_ref().map(HashSet::len))
            .field("keep_in_memory", &self.keep_in_memory)
            .finish()
    }
}

impl CorpusParams {
    /// Empty parameter set; changes nothing when applied
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the tokenize mode
    pub fn tokenize(mut self, mode: TokenizeMode) -> Self {
        self.tokenize = Some(mode);
        self
    }

    /// Replace the tokenizer
    pub fn tokenizer(mut self, tokenizer: impl Tokenizer + 'static) -> Self {
        self.tokenizer = Some(Arc::new(tokenizer));
        self
    }

    /// Replace the tokenizer with a shared one
    pub fn shared_tokenizer(mut self, tokenizer: Arc<dyn Tokenizer>) -> Self {
        self.tokenizer = Some(tokenizer);
        self
    }

    /// Set the words removed after tokenization
    pub fn stopwords(mut self, words: HashSet<String>) -> Self {
        self.stopwords = Some(words);
        self
    }

    /// Set the words retained after stopword removal
    pub fn gowords(mut self, words: HashSet<String>) -> Self {
        self.gowords = Some(words);
        self
    }

    /// Keep raw content in memory once it has been read
    pub fn keep_in_memory(mut self, keep: bool) -> Self {
        self.keep_in_memory = Some(keep);
        self
    }
}

/// Tokenizer plus stop/go filtering, shared with the structured extractor
#[derive(Clone)]
pub struct Preprocessor {
    tokenizer: Arc<dyn Tokenizer>,
    filter: WordFilter,
}

impl Default for Preprocessor {
    fn default() -> Self {
        Self {
            tokenizer: Arc::new(WordTokenizer::new()),
            filter: WordFilter::default(),
        }
    }
}

impl fmt::Debug for Preprocessor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Preprocessor")
            .field("filter", &self.filter)
            .finish_non_exhaustive()
    }
}

impl Preprocessor {
    /// Merge tokenizer and word-set settings
    pub fn apply_params(&mut self, params: &CorpusParams) {
        if let Some(tokenizer) = &params.tokenizer {
            self.tokenizer = Arc::clone(tokenizer);
        }
        if let Some(stop) = &params.stopwords {
            self.filter.set_stopwords(stop.clone());
        }
        if let Some(go) = &params.gowords {
            self.filter.set_gowords(go.clone());
        }
    }

    /// Tokenize raw text, reporting failures against `label`
    pub fn tokenize(&self, label: &str, text: &str) -> Result<Vec<String>> {
        self.tokenizer
            .tokenize(text)
            .map_err(|source| CorpusError::Tokenization {
                label: label.to_string(),
                source,
            })
    }

    /// Apply stopword then goword filtering
    pub fn filter(&self, tokens: Vec<String>) -> Vec<String> {
        self.filter.apply(tokens)
    }
}

/// An ordered, lazily materialized collection of labeled texts
pub struct Corpus {
    items: Vec<CorpusItem>,
    external: Option<Box<dyn TextSource>>,
    reader: Arc<dyn ContentReader>,
    tokenize: TokenizeMode,
    preprocessor: Preprocessor,
    keep_in_memory: bool,
}

impl fmt::Debug for Corpus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Corpus")
            .field("items", &self.items.len())
            .field("tokenize", &self.tokenize)
            .field("keep_in_memory", &self.keep_in_memory)
            .field("preprocessor", &self.preprocessor)
            .finish_non_exhaustive()
    }
}

impl Corpus {
    /// Bind a source
    ///
    /// `file_backed` must be `Some(true)` for `(label, filename)` pairs. For
    /// bare filenames and glob patterns it defaults to true with a warning.
    pub fn bind(source: impl Into<Source>, file_backed: Option<bool>) -> Result<Self> {
        let normalized = normalize(source.into(), file_backed)?;
        log::info!("Bound {} texts to the corpus", normalized.items.len());

        Ok(Self {
            items: normalized.items,
            external: normalized.external,
            reader: Arc::new(FsReader),
            tokenize: TokenizeMode::default(),
            preprocessor: Preprocessor::default(),
            keep_in_memory: false,
        })
    }

    /// Replace the reader used for file-backed items
    pub fn with_reader(mut self, reader: Arc<dyn ContentReader>) -> Self {
        self.reader = reader;
        self
    }

    /// Merge settings; omitted fields keep their current values
    pub fn configure(&mut self, params: CorpusParams) -> &mut Self {
        if let Some(mode) = params.tokenize {
            self.tokenize = mode;
        }
        if let Some(keep) = params.keep_in_memory {
            self.keep_in_memory = keep;
        }
        self.preprocessor.apply_params(&params);
        log::debug!("Corpus configured: {params:?}");
        self
    }

    /// Number of bound items
    pub fn len(&self) -> usize {
        self.items.len()
    }

    /// Returns true if no items are bound
    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    /// Current tokenize mode
    pub fn tokenize_mode(&self) -> TokenizeMode {
        self.tokenize
    }

    /// Whether raw content is kept after the first read
    pub fn keeps_in_memory(&self) -> bool {
        self.keep_in_memory
    }

    /// The state record of one item
    pub fn item(&self, index: usize) -> Option<&CorpusItem> {
        self.items.get(index)
    }

    /// All labels in source order
    pub fn labels(&self) -> Vec<&str> {
        self.items.iter().map(CorpusItem::label).collect()
    }

    /// The shared tokenize/filter stage
    pub fn preprocessor(&self) -> &Preprocessor {
        &self.preprocessor
    }

    /// Process and return one item
    pub fn get(&mut self, index: usize) -> Result<(String, Content)> {
        self.process_with(index, None)
    }

    /// Iterate over every item in source order
    pub fn iter(&mut self) -> Items<'_> {
        let stop = self.items.len();
        Items {
            corpus: self,
            next: 0,
            stop,
            step: 1,
        }
    }

    /// Lazily iterate over `range`, taking every `step`-th item
    ///
    /// The end of the range is clamped to the corpus length.
    pub fn slice(&mut self, range: impl RangeBounds<usize>, step: usize) -> Result<Items<'_>> {
        if step == 0 {
            return Err(CorpusError::config("slice step must be greater than 0"));
        }
        let len = self.items.len();
        let start = match range.start_bound() {
            Bound::Included(&s) => s,
            Bound::Excluded(&s) => s.saturating_add(1),
            Bound::Unbounded => 0,
        };
        let stop = match range.end_bound() {
            Bound::Included(&e) => e.saturating_add(1),
            Bound::Excluded(&e) => e,
            Bound::Unbounded => len,
        }
        .min(len);

        Ok(Items {
            corpus: self,
            next: start,
            stop,
            step,
        })
    }

    /// Run the pipeline for one item, optionally with content read elsewhere
    fn process_with(&mut self, index: usize, preloaded: Option<String>) -> Result<(String, Content)> {
        let len = self.items.len();
        let Corpus {
            items,
            external,
            reader,
            tokenize,
            preprocessor,
            keep_in_memory,
        } = self;
        let item = items
            .get_mut(index)
            .ok_or(CorpusError::IndexOutOfRange { index, len })?;

        let raw = match &item.payload {
            Payload::Content(content) => content.clone(),
            Payload::File(path) => {
                let text = match preloaded {
                    Some(text) => text,
                    None => reader.read_text(path).map_err(|source| CorpusError::Io {
                        path: path.clone(),
                        source,
                    })?,
                };
                log::debug!("Read '{}' from {}", item.label(), path.display());
                Content::Text(text)
            }
            Payload::External => match external.as_mut() {
                Some(source) => source.fetch(index)?,
                None => {
                    return Err(CorpusError::config(
                        "external item bound without an external source",
                    ))
                }
            },
        };

        item.observe(&raw);
        if raw.is_tokens() != item.tokenized.is_yes() {
            return Err(CorpusError::ContentShape {
                label: item.label().to_string(),
                expected: if item.tokenized.is_yes() {
                    "tokens"
                } else {
                    "text"
                },
            });
        }

        if *keep_in_memory && !item.resident {
            item.retain(raw.clone());
        }

        let content = match (*tokenize, raw) {
            (TokenizeMode::On, Content::Text(text)) => {
                let tokens = preprocessor.tokenize(item.label(), &text)?;
                item.token_count = Some(tokens.len());
                Content::Tokens(preprocessor.filter(tokens))
            }
            (TokenizeMode::On, Content::Tokens(tokens)) => {
                Content::Tokens(preprocessor.filter(tokens))
            }
            (TokenizeMode::Off, Content::Tokens(tokens)) => Content::Text(tokens.join(" ")),
            (_, raw) => raw,
        };

        Ok((item.label().to_string(), content))
    }

    /// Iterate in source order, reading upcoming files on the rayon pool
    ///
    /// At most one window of file contents is held ahead of the consumer;
    /// the window is a few items per pool thread.
    #[cfg(feature = "parallel")]
    pub fn iter_prefetched(&mut self) -> Prefetched<'_> {
        let window = rayon::current_num_threads().max(1) * PREFETCH_PER_THREAD;
        self.iter_prefetched_by(window)
    }

    /// Like [`Corpus::iter_prefetched`] with an explicit window size
    ///
    /// Files are read concurrently one window at a time. The pipeline and
    /// every in-memory write stay on the calling thread, and a failed read
    /// surfaces when its item is reached.
    #[cfg(feature = "parallel")]
    pub fn iter_prefetched_by(&mut self, window: usize) -> Prefetched<'_> {
        Prefetched {
            corpus: self,
            next: 0,
            window: window.max(1),
            buffer: VecDeque::new(),
        }
    }
}

impl TextCorpus for Corpus {
    fn bind(source: Source, file_backed: Option<bool>) -> Result<Self> {
        Corpus::bind(source, file_backed)
    }

    fn configure(&mut self, params: CorpusParams) {
        Corpus::configure(self, params);
    }

    fn len(&self) -> usize {
        self.items.len()
    }

    fn label(&self, index: usize) -> Option<&str> {
        self.items.get(index).map(CorpusItem::label)
    }

    fn process(&mut self, index: usize) -> Result<(String, Content)> {
        self.process_with(index, None)
    }
}

/// A corpus can itself be the external source of another corpus
impl TextSource for Corpus {
    fn len(&self) -> usize {
        self.items.len()
    }

    fn label(&self, index: usize) -> String {
        self.items
            .get(index)
            .map(|item| item.label().to_string())
            .unwrap_or_default()
    }

    fn fetch(&mut self, index: usize) -> Result<Content> {
        self.get(index).map(|(_, content)| content)
    }
}

impl From<Corpus> for Source {
    fn from(corpus: Corpus) -> Self {
        Source::External(Box::new(corpus))
    }
}

impl fmt::Display for Corpus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "No. of texts: {}", self.items.len())?;
        writeln!(f, "Tokenize: {:?}", self.tokenize)?;
        writeln!(f, "Keep in Memory: {}", self.keep_in_memory)?;
        writeln!(f)?;

        let len = self.items.len();
        if len > SUMMARY_ROWS {
            let half = SUMMARY_ROWS / 2;
            for (i, item) in self.items.iter().enumerate().take(half) {
                summary_row(f, i, item)?;
            }
            writeln!(f, "...")?;
            for (i, item) in self.items.iter().enumerate().skip(len - half) {
                summary_row(f, i, item)?;
            }
        } else {
            for (i, item) in self.items.iter().enumerate() {
                summary_row(f, i, item)?;
            }
        }
        Ok(())
    }
}

fn summary_row(f: &mut fmt::Formatter<'_>, index: usize, item: &CorpusItem) -> fmt::Result {
    writeln!(f, "{:>6}) {:20.18}: {:.100}", index, item.label(), item.preview())
}

/// Lazy iterator over processed `(label, content)` pairs
///
/// Each call to `next` processes exactly one item.
pub struct Items<'a> {
    corpus: &'a mut Corpus,
    next: usize,
    stop: usize,
    step: usize,
}

impl Iterator for Items<'_> {
    type Item = Result<(String, Content)>;

    fn next(&mut self) -> Option<Self::Item> {
        if self.next >= self.stop {
            return None;
        }
        let index = self.next;
        self.next = self.next.saturating_add(self.step);
        Some(self.corpus.process_with(index, None))
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        let remaining = self.stop.saturating_sub(self.next).div_ceil(self.step);
        (remaining, Some(remaining))
    }
}

impl ExactSizeIterator for Items<'_> {}

/// Ordered iterator that reads file-backed items ahead in bounded windows
#[cfg(feature = "parallel")]
pub struct Prefetched<'a> {
    corpus: &'a mut Corpus,
    next: usize,
    window: usize,
    buffer: VecDeque<(usize, Option<std::io::Result<String>>)>,
}

#[cfg(feature = "parallel")]
impl Prefetched<'_> {
    fn fill(&mut self) {
        use rayon::prelude::*;

        let stop = (self.next + self.window).min(self.corpus.items.len());
        let jobs: Vec<(usize, Option<PathBuf>)> = (self.next..stop)
            .map(|i| (i, self.corpus.items[i].path().map(Path::to_path_buf)))
            .collect();

        let reader = Arc::clone(&self.corpus.reader);
        let loaded: Vec<(usize, Option<std::io::Result<String>>)> = jobs
            .into_par_iter()
            .map(|(i, path)| (i, path.map(|path| reader.read_text(&path))))
            .collect();

        log::debug!("Prefetched items {}..{stop}", self.next);
        self.buffer.extend(loaded);
        self.next = stop;
    }
}

#[cfg(feature = "parallel")]
impl Iterator for Prefetched<'_> {
    type Item = Result<(String, Content)>;

    fn next(&mut self) -> Option<Self::Item> {
        if self.buffer.is_empty() {
            if self.next >= self.corpus.items.len() {
                return None;
            }
            self.fill();
        }

        let (index, loaded) = self.buffer.pop_front()?;
        let preloaded = match loaded {
            None => None,
            Some(Ok(text)) => Some(text),
            Some(Err(source)) => {
                let path = self.corpus.items[index]
                    .path()
                    .map(Path::to_path_buf)
                    .unwrap_or_default();
                return Some(Err(CorpusError::Io { path, source }));
            }
        };
        Some(self.corpus.process_with(index, preloaded))
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        let remaining = self.buffer.len() + self.corpus.items.len() - self.next;
        (remaining, Some(remaining))
    }
}
