//! Configuration module
//!
//! Every section is optional in the file; command-line flags override the
//! values read here.

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};
use texture_core::{Amount, MergePolicy, RecordFilter};

/// CLI configuration structure
#[derive(Debug, Clone, Default, PartialEq, Deserialize, Serialize)]
pub struct CliConfig {
    /// Corpus settings shared by every command
    #[serde(default)]
    pub corpus: CorpusConfig,

    /// Settings for the chunk command
    #[serde(default)]
    pub chunk: ChunkConfig,

    /// Settings for the extract command
    #[serde(default)]
    pub extract: ExtractConfig,
}

/// Corpus-related configuration
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize, Serialize)]
#[serde(default)]
pub struct CorpusConfig {
    /// Keep file contents in memory after the first read
    pub keep_in_memory: bool,

    /// File with one stopword per line
    pub stopwords: Option<PathBuf>,

    /// File with one goword per line
    pub gowords: Option<PathBuf>,
}

/// Chunking configuration
#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
#[serde(default)]
pub struct ChunkConfig {
    /// Tokens per chunk; an integer count or a fraction of the item
    pub size: Option<Amount>,

    /// Number of chunks per item
    pub n_chunks: Option<usize>,

    /// Overlap; an integer count or a fraction of the chunk size
    pub overlap: Amount,

    /// Spread leftover tokens over the chunks
    pub rounded: bool,

    /// Drop items smaller than one chunk
    pub min_size: bool,

    /// Resample items smaller than one chunk
    pub upscale: bool,

    /// Seed for upscale sampling
    pub seed: Option<u64>,
}

impl Default for ChunkConfig {
    fn default() -> Self {
        Self {
            size: None,
            n_chunks: None,
            overlap: Amount::Count(0),
            rounded: false,
            min_size: false,
            upscale: false,
            seed: None,
        }
    }
}

/// Extraction configuration
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize, Serialize)]
#[serde(default)]
pub struct ExtractConfig {
    pub acts: Option<Vec<u32>>,
    pub scenes: Option<Vec<u32>>,
    pub speakers: Option<Vec<String>>,

    /// `joined` or `attributed`
    pub merge: MergePolicy,

    /// Tokenize the joined text
    pub tokenize: bool,
}

impl ExtractConfig {
    /// The record filter described by this section
    pub fn filter(&self) -> RecordFilter {
        RecordFilter {
            acts: self.acts.clone(),
            scenes: self.scenes.clone(),
            speakers: self.speakers.clone(),
        }
    }
}

impl CliConfig {
    /// Load from a TOML file, or use defaults when no path is given
    pub fn load(path: Option<&Path>) -> Result<Self> {
        let Some(path) = path else {
            return Ok(Self::default());
        };
        let content = fs::read_to_string(path)
            .with_context(|| format!("Failed to read config file: {}", path.display()))?;
        let config: CliConfig = toml::from_str(&content)
            .with_context(|| format!("Failed to parse config file: {}", path.display()))?;
        log::debug!("Loaded configuration from {}: {config:?}", path.display());
        Ok(config)
    }
}
