//! Input pattern resolution using glob

use crate::error::CliError;
use anyhow::{Context, Result};
use glob::glob;
use std::path::PathBuf;

/// Expand every pattern into regular files, sorted and deduplicated
///
/// A pattern that matches nothing is only reported; it is an error for all
/// of them to come up empty.
pub fn resolve_patterns(patterns: &[String]) -> Result<Vec<PathBuf>> {
    let mut files = Vec::new();

    for pattern in patterns {
        let before = files.len();
        let paths = glob(pattern).with_context(|| format!("Invalid glob pattern: {pattern}"))?;

        for entry in paths {
            let path = entry.with_context(|| format!("Error resolving pattern: {pattern}"))?;
            if path.is_file() {
                files.push(path);
            }
        }

        if files.len() == before {
            log::warn!("Pattern '{pattern}' matched no files");
        }
    }

    if files.is_empty() {
        return Err(CliError::NoInput(patterns.to_vec()).into());
    }

    files.sort();
    files.dedup();
    log::info!("Resolved {} input files", files.len());

    Ok(files)
}
