//! Structured extraction: parse items into typed records, select and merge
//!
//! Independent of chunking; both wrap the same [`TextCorpus`](crate::TextCorpus)
//! contract and are never stacked on one corpus.

mod extractor;
mod query;
mod record;

pub use extractor::{Extractions, StructuredExtractor};
pub use query::{Extracted, MergePolicy, RecordFilter};
pub use record::{JsonRecordParser, Record, RecordParser};
