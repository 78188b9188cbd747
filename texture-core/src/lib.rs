//! Lazy labeled-text corpora
//!
//! A [`Corpus`] binds an ordered collection of labeled texts from memory,
//! files or another corpus, and produces `(label, content)` pairs on demand.
//! Nothing is read, tokenized or filtered until an item is requested.
//!
//! Two wrappers build on the [`TextCorpus`] contract:
//! - [`ChunkEngine`] cuts tokenized items into fixed-size, optionally
//!   overlapping chunks with cached boundaries
//! - [`StructuredExtractor`] parses items into typed records, selects a
//!   subset and merges them back into text
//!
//! # Example
//!
//! ```rust
//! use texture_core::{ChunkEngine, ChunkPolicy};
//!
//! let texts = vec![("a", "Shall I compare thee to a summer's day?")];
//! let policy = ChunkPolicy::chunk_size(4).unwrap();
//! let mut engine = ChunkEngine::bind(texts, None, policy).unwrap();
//!
//! let first = engine.iter().next().unwrap().unwrap();
//! assert_eq!(first.label, "a_0000");
//! assert_eq!(first.tokens, vec!["shall", "i", "compare", "thee"]);
//! ```

pub mod bow;
pub mod chunk;
pub mod content;
pub mod corpus;
pub mod error;
pub mod extract;
pub mod item;
pub mod reader;
pub mod source;
pub mod tokenize;
pub mod traits;

pub use bow::{bow_corpus, Bow, Dictionary};
pub use chunk::{
    Amount, Chunk, ChunkEngine, ChunkPlan, ChunkPolicy, ChunkPolicyBuilder, Chunks, Sizing, Span,
};
pub use content::{Content, TokenizeMode, Tokenized};
#[cfg(feature = "parallel")]
pub use corpus::Prefetched;
pub use corpus::{Corpus, CorpusParams, Items, Preprocessor};
pub use error::{CorpusError, ParseError, Result, TokenizeError};
pub use extract::{
    Extracted, JsonRecordParser, MergePolicy, Record, RecordFilter, RecordParser,
    StructuredExtractor,
};
pub use item::{Backing, CorpusItem};
pub use reader::{ContentReader, FsReader};
pub use source::{Entry, Source};
pub use tokenize::{word_set, LetterNgramTokenizer, Tokenizer, WordFilter, WordTokenizer};
pub use traits::{TextCorpus, TextSource};
