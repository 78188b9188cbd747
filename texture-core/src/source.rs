//! Bind-time input shapes and their normalization
//!
//! Every accepted shape is converted into one ordered list of
//! [`CorpusItem`]s before any processing happens. Nothing downstream ever
//! inspects the original shape again.

use crate::content::Content;
use crate::error::{CorpusError, Result};
use crate::item::CorpusItem;
use crate::traits::TextSource;
use std::collections::{BTreeMap, HashMap};
use std::path::{Path, PathBuf};

/// One element of a sequence source
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Entry {
    /// A `(label, content)` pair; content is a filename when file-backed
    Pair(String, Content),
    /// Unlabeled content; only strings (filenames) are accepted
    Bare(Content),
}

/// Anything a corpus can be bound to
pub enum Source {
    /// Label to content mapping, bound in ascending label order
    Mapping(BTreeMap<String, Content>),
    /// Ordered pairs, or bare filenames
    Sequence(Vec<Entry>),
    /// A filesystem glob pattern
    Pattern(String),
    /// An opaque, already resident sequence
    External(Box<dyn TextSource>),
}

impl std::fmt::Debug for Source {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Source::Mapping(map) => f.debug_tuple("Mapping").field(map).finish(),
            Source::Sequence(entries) => f.debug_tuple("Sequence").field(entries).finish(),
            Source::Pattern(pattern) => f.debug_tuple("Pattern").field(pattern).finish(),
            Source::External(source) => f
                .debug_tuple("External")
                .field(&format!("<{} items>", source.len()))
                .finish(),
        }
    }
}

impl Source {
    /// A glob pattern such as `data/*.txt`
    pub fn pattern(pattern: impl Into<String>) -> Self {
        Source::Pattern(pattern.into())
    }

    /// Bare filenames; labels become the final path segment
    pub fn files<I, P>(paths: I) -> Self
    where
        I: IntoIterator<Item = P>,
        P: AsRef<Path>,
    {
        Source::Sequence(
            paths
                .into_iter()
                .map(|p| Entry::Bare(Content::Text(p.as_ref().to_string_lossy().into_owned())))
                .collect(),
        )
    }

    /// An externally defined sequence
    pub fn external(source: impl TextSource + 'static) -> Self {
        Source::External(Box::new(source))
    }
}

impl<L, C> From<Vec<(L, C)>> for Source
where
    L: Into<String>,
    C: Into<Content>,
{
    fn from(pairs: Vec<(L, C)>) -> Self {
        Source::Sequence(
            pairs
                .into_iter()
                .map(|(label, content)| Entry::Pair(label.into(), content.into()))
                .collect(),
        )
    }
}

impl From<Vec<Entry>> for Source {
    fn from(entries: Vec<Entry>) -> Self {
        Source::Sequence(entries)
    }
}

impl<C: Into<Content>> From<BTreeMap<String, C>> for Source {
    fn from(map: BTreeMap<String, C>) -> Self {
        Source::Mapping(map.into_iter().map(|(k, v)| (k, v.into())).collect())
    }
}

impl<C: Into<Content>> From<HashMap<String, C>> for Source {
    fn from(map: HashMap<String, C>) -> Self {
        Source::Mapping(map.into_iter().map(|(k, v)| (k, v.into())).collect())
    }
}

impl From<Box<dyn TextSource>> for Source {
    fn from(source: Box<dyn TextSource>) -> Self {
        Source::External(source)
    }
}

/// The canonical result of binding
pub(crate) struct Normalized {
    pub items: Vec<CorpusItem>,
    pub external: Option<Box<dyn TextSource>>,
}

/// Convert any accepted source shape into canonical items
pub(crate) fn normalize(source: Source, file_backed: Option<bool>) -> Result<Normalized> {
    let items = match source {
        Source::Mapping(map) => {
            if map.is_empty() {
                return Err(empty_source());
            }
            pairs_to_items(map.into_iter().collect(), file_backed == Some(true))?
        }
        Source::Sequence(entries) => normalize_sequence(entries, file_backed)?,
        Source::Pattern(pattern) => {
            let paths = expand_pattern(&pattern)?;
            if paths.is_empty() {
                return Err(CorpusError::config(format!(
                    "no files matched pattern '{pattern}'"
                )));
            }
            require_file_backing(file_backed)?;
            paths.into_iter().map(labeled_path).collect()
        }
        Source::External(source) => {
            if source.is_empty() {
                return Err(empty_source());
            }
            let items = (0..source.len())
                .map(|i| CorpusItem::external(source.label(i)))
                .collect();
            return Ok(Normalized {
                items,
                external: Some(source),
            });
        }
    };

    Ok(Normalized {
        items,
        external: None,
    })
}

fn normalize_sequence(entries: Vec<Entry>, file_backed: Option<bool>) -> Result<Vec<CorpusItem>> {
    match entries.first() {
        None => Err(empty_source()),
        Some(Entry::Pair(..)) => {
            let pairs = entries
                .into_iter()
                .map(|entry| match entry {
                    Entry::Pair(label, content) => Ok((label, content)),
                    Entry::Bare(_) => Err(CorpusError::config(
                        "mixed sequence: expected (label, content) pairs throughout",
                    )),
                })
                .collect::<Result<Vec<_>>>()?;
            pairs_to_items(pairs, file_backed == Some(true))
        }
        Some(Entry::Bare(Content::Text(_))) => {
            require_file_backing(file_backed)?;
            entries
                .into_iter()
                .map(|entry| match entry {
                    Entry::Bare(Content::Text(name)) => Ok(labeled_path(PathBuf::from(name))),
                    _ => Err(CorpusError::config(
                        "mixed sequence: expected filenames throughout",
                    )),
                })
                .collect()
        }
        Some(Entry::Bare(Content::Tokens(_))) => Err(CorpusError::config(
            "ambiguous source: expected (label, content) pairs or filenames",
        )),
    }
}

fn pairs_to_items(pairs: Vec<(String, Content)>, file_backed: bool) -> Result<Vec<CorpusItem>> {
    if !file_backed {
        return Ok(pairs
            .into_iter()
            .map(|(label, content)| CorpusItem::in_memory(label, content))
            .collect());
    }
    pairs
        .into_iter()
        .map(|(label, content)| match content {
            Content::Text(path) => Ok(CorpusItem::file(label, PathBuf::from(path))),
            Content::Tokens(_) => Err(CorpusError::config(format!(
                "file-backed item '{label}' must name a file"
            ))),
        })
        .collect()
}

/// Bare filenames and patterns imply file backing unless it was refused
fn require_file_backing(file_backed: Option<bool>) -> Result<()> {
    match file_backed {
        Some(true) => Ok(()),
        None => {
            log::warn!("Assuming that strings are filenames; pass file_backed = true to silence this");
            Ok(())
        }
        Some(false) => Err(CorpusError::config(
            "filenames supplied but file backing was explicitly disabled",
        )),
    }
}

fn labeled_path(path: PathBuf) -> CorpusItem {
    let label = path
        .file_name()
        .map(|name| name.to_string_lossy().into_owned())
        .unwrap_or_else(|| path.to_string_lossy().into_owned());
    CorpusItem::file(label, path)
}

fn expand_pattern(pattern: &str) -> Result<Vec<PathBuf>> {
    let paths = glob::glob(pattern)
        .map_err(|e| CorpusError::config(format!("invalid glob pattern '{pattern}': {e}")))?;

    let mut files = Vec::new();
    for entry in paths {
        let path = entry.map_err(|e| CorpusError::Io {
            path: e.path().to_path_buf(),
            source: e.into_error(),
        })?;
        if path.is_file() {
            files.push(path);
        }
    }
    Ok(files)
}

fn empty_source() -> CorpusError {
    CorpusError::config("received an empty source")
}
