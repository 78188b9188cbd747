//! Extract command implementation

use super::CommonArgs;
use crate::config::ExtractConfig;
use crate::output::{create_formatter, open_writer, Body};
use crate::progress::ProgressReporter;
use anyhow::{Context, Result};
use clap::Args;
use texture_core::{
    JsonRecordParser, MergePolicy, RecordFilter, StructuredExtractor, TokenizeMode,
};

/// Arguments for the extract command
///
/// Input files hold JSON arrays of records tagged by `"type"`:
/// `character`, `location`, `stagedir` or `speech`.
#[derive(Debug, Args)]
pub struct ExtractArgs {
    #[command(flatten)]
    pub common: CommonArgs,

    /// Keep records from these acts
    #[arg(long = "act", value_name = "N", value_delimiter = ',')]
    pub acts: Vec<u32>,

    /// Keep records from these scenes
    #[arg(long = "scene", value_name = "N", value_delimiter = ',')]
    pub scenes: Vec<u32>,

    /// Keep speeches by these speakers
    #[arg(long = "speaker", value_name = "NAME")]
    pub speakers: Vec<String>,

    /// Emit (speaker, text) pairs instead of one joined text
    #[arg(long)]
    pub attributed: bool,

    /// Tokenize the joined text
    #[arg(short, long)]
    pub tokenize: bool,
}

impl ExtractArgs {
    /// Execute the extract command
    pub fn execute(&self) -> Result<()> {
        self.common.init_logging();
        log::info!("Starting extraction");
        log::debug!("Arguments: {self:?}");

        let config = self.common.load_config()?;
        let corpus = self.common.bind_corpus()?;
        let mut extractor = StructuredExtractor::new(corpus, JsonRecordParser)
            .with_filter(self.filter(&config.extract))
            .with_merge(self.merge(&config.extract));

        let mut params = self.common.corpus_params(&config)?;
        if self.tokenize || config.extract.tokenize {
            params = params.tokenize(TokenizeMode::On);
        }
        extractor.configure(params);

        let writer = open_writer(self.common.output.as_deref())?;
        let mut formatter = create_formatter(self.common.format, writer);
        let mut progress = ProgressReporter::new(self.common.quiet);
        progress.init_items(extractor.len() as u64);

        for index in 0..extractor.len() {
            let (label, extracted) = extractor
                .get(index)
                .with_context(|| format!("Failed to extract item {index}"))?;
            formatter.format_item(&label, &Body::from(extracted))?;
            progress.item_completed(&label);
        }

        formatter.finish()?;
        progress.finish();
        log::info!("Extracted {} texts", progress.completed());
        Ok(())
    }

    /// Record filter from flags; each flag given replaces the file's value
    pub fn filter(&self, config: &ExtractConfig) -> RecordFilter {
        let mut filter = config.filter();
        if !self.acts.is_empty() {
            filter.acts = Some(self.acts.clone());
        }
        if !self.scenes.is_empty() {
            filter.scenes = Some(self.scenes.clone());
        }
        if !self.speakers.is_empty() {
            filter.speakers = Some(self.speakers.clone());
        }
        filter
    }

    pub fn merge(&self, config: &ExtractConfig) -> MergePolicy {
        if self.attributed {
            MergePolicy::Attributed
        } else {
            config.merge
        }
    }
}
