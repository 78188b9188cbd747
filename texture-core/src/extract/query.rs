//! Record selection and merging

use super::record::Record;
use serde::{Deserialize, Serialize};

/// Conjunction of field-equality predicates over records
///
/// An unset field matches everything. A set field drops every record that
/// lacks that field, so restricting by speaker keeps only speeches.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct RecordFilter {
    pub acts: Option<Vec<u32>>,
    pub scenes: Option<Vec<u32>>,
    pub speakers: Option<Vec<String>>,
}

impl RecordFilter {
    /// A filter that keeps every record
    pub fn new() -> Self {
        Self::default()
    }

    /// Keep records from these acts
    pub fn acts(mut self, acts: impl IntoIterator<Item = u32>) -> Self {
        self.acts = Some(acts.into_iter().collect());
        self
    }

    /// Keep records from these scenes
    pub fn scenes(mut self, scenes: impl IntoIterator<Item = u32>) -> Self {
        self.scenes = Some(scenes.into_iter().collect());
        self
    }

    /// Keep speeches by these speakers
    pub fn speakers<S: Into<String>>(mut self, speakers: impl IntoIterator<Item = S>) -> Self {
        self.speakers = Some(speakers.into_iter().map(Into::into).collect());
        self
    }

    /// Returns true if the record satisfies every configured predicate
    pub fn matches(&self, record: &Record) -> bool {
        fn allowed<T: PartialEq>(wanted: &Option<Vec<T>>, value: Option<T>) -> bool {
            match wanted {
                None => true,
                Some(set) => value.is_some_and(|v| set.contains(&v)),
            }
        }

        allowed(&self.acts, record.act())
            && allowed(&self.scenes, record.scene())
            && match &self.speakers {
                None => true,
                Some(set) => record
                    .speaker()
                    .is_some_and(|s| set.iter().any(|wanted| wanted == s)),
            }
    }

    /// Keep matching records, in order
    pub fn apply(&self, records: Vec<Record>) -> Vec<Record> {
        records.into_iter().filter(|r| self.matches(r)).collect()
    }
}

/// How selected records become an item's output
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum MergePolicy {
    /// Join every text field with single spaces
    #[default]
    Joined,
    /// Keep `(speaker, text)` pairs for records that have both
    Attributed,
}

/// Output of the extractor for one item
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(untagged)]
pub enum Extracted {
    Text(String),
    Tokens(Vec<String>),
    Attributed(Vec<(String, String)>),
}

impl MergePolicy {
    /// Merge filtered records
    pub fn merge(self, records: &[Record]) -> Extracted {
        match self {
            MergePolicy::Joined => Extracted::Text(
                records
                    .iter()
                    .filter_map(Record::text)
                    .collect::<Vec<_>>()
                    .join(" "),
            ),
            MergePolicy::Attributed => Extracted::Attributed(
                records
                    .iter()
                    .filter_map(|r| Some((r.speaker()?.to_string(), r.text()?.to_string())))
                    .collect(),
            ),
        }
    }
}
