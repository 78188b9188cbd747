//! Stopword and goword list files

use crate::error::CliError;
use anyhow::{Context, Result};
use std::collections::HashSet;
use std::fs;
use std::path::Path;

/// Read one word per line; blank lines and `#` comments are skipped
///
/// Words are lowercased to match the default tokenizer's output.
pub fn read_word_list(path: &Path) -> Result<HashSet<String>> {
    let content = fs::read_to_string(path)
        .with_context(|| format!("Failed to read word list: {}", path.display()))?;

    let words: HashSet<String> = content
        .lines()
        .map(str::trim)
        .filter(|line| !line.is_empty() && !line.starts_with('#'))
        .map(str::to_lowercase)
        .collect();

    if words.is_empty() {
        return Err(CliError::WordList {
            path: path.to_path_buf(),
            reason: "no words found".to_string(),
        }
        .into());
    }

    log::debug!("Loaded {} words from {}", words.len(), path.display());
    Ok(words)
}
