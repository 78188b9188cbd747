//! Show command implementation

use super::CommonArgs;
use crate::output::{create_formatter, open_writer, Body, OutputFormatter};
use crate::progress::ProgressReporter;
use anyhow::{Context, Result};
use clap::Args;
use std::io::Write;
use texture_core::{Content, Corpus, TokenizeMode};

/// Arguments for the show command
#[derive(Debug, Args)]
pub struct ShowArgs {
    #[command(flatten)]
    pub common: CommonArgs,

    /// Tokenize texts and apply any stop/go word lists
    #[arg(short, long)]
    pub tokenize: bool,

    /// Print a corpus summary instead of the texts
    #[arg(short, long)]
    pub summary: bool,
}

impl ShowArgs {
    /// Execute the show command
    pub fn execute(&self) -> Result<()> {
        self.common.init_logging();
        log::debug!("Arguments: {self:?}");

        let config = self.common.load_config()?;
        let mut corpus = self.common.bind_corpus()?;
        let mut params = self.common.corpus_params(&config)?;
        if self.tokenize {
            params = params.tokenize(TokenizeMode::On);
        }
        corpus.configure(params);

        let mut writer = open_writer(self.common.output.as_deref())?;
        if self.summary {
            write!(writer, "{corpus}")?;
            writer.flush()?;
            return Ok(());
        }

        let mut formatter = create_formatter(self.common.format, writer);
        let mut progress = ProgressReporter::new(self.common.quiet);
        progress.init_items(corpus.len() as u64);

        let written = write_items(corpus.iter_prefetched(), formatter.as_mut(), &mut progress);
        formatter.finish()?;
        progress.finish();
        log::info!("Wrote {} of {} texts", progress.completed(), corpus.len());
        written
    }
}

/// Stream items into the formatter in source order, stopping at the first failure
///
/// Items before a failing one have already been handed to the formatter.
fn write_items<I>(
    items: I,
    formatter: &mut dyn OutputFormatter,
    progress: &mut ProgressReporter,
) -> Result<()>
where
    I: Iterator<Item = texture_core::Result<(String, Content)>>,
{
    for (index, item) in items.enumerate() {
        let (label, content) = item.with_context(|| format!("Failed to read text {index}"))?;
        formatter.format_item(&label, &Body::from(content))?;
        progress.item_completed(&label);
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::TempDir;

    use crate::output::TextFormatter;

    fn bind(dir: &TempDir) -> Corpus {
        let pattern = format!("{}/*.txt", dir.path().display());
        Corpus::bind(texture_core::Source::pattern(pattern), Some(true)).unwrap()
    }

    #[test]
    fn test_write_items_in_source_order() {
        let temp_dir = TempDir::new().unwrap();
        fs::write(temp_dir.path().join("b.txt"), "Thou art more lovely").unwrap();
        fs::write(temp_dir.path().join("a.txt"), "Shall I compare thee").unwrap();
        let mut corpus = bind(&temp_dir);

        let mut out = Vec::new();
        let mut formatter = TextFormatter::new(&mut out);
        let mut progress = ProgressReporter::new(true);
        write_items(corpus.iter_prefetched(), &mut formatter, &mut progress).unwrap();
        formatter.finish().unwrap();
        drop(formatter);

        assert_eq!(
            String::from_utf8(out).unwrap(),
            "a.txt\tShall I compare thee\nb.txt\tThou art more lovely\n"
        );
        assert_eq!(progress.completed(), 2);
    }

    #[test]
    fn test_write_items_stops_at_unreadable_text() {
        let temp_dir = TempDir::new().unwrap();
        fs::write(temp_dir.path().join("a.txt"), "Shall I compare thee").unwrap();
        fs::write(temp_dir.path().join("b.txt"), "Thou art more lovely").unwrap();
        fs::write(temp_dir.path().join("c.txt"), "Rough winds do shake").unwrap();
        let mut corpus = bind(&temp_dir);
        fs::remove_file(temp_dir.path().join("c.txt")).unwrap();

        let mut out = Vec::new();
        let mut formatter = TextFormatter::new(&mut out);
        let mut progress = ProgressReporter::new(true);
        let err = write_items(corpus.iter_prefetched(), &mut formatter, &mut progress)
            .unwrap_err();
        formatter.finish().unwrap();
        drop(formatter);

        assert!(err.to_string().contains("Failed to read text 2"));
        assert_eq!(
            String::from_utf8(out).unwrap(),
            "a.txt\tShall I compare thee\nb.txt\tThou art more lovely\n"
        );
        assert_eq!(progress.completed(), 2);
    }
}
