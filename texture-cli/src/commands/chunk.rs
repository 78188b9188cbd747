//! Chunk command implementation

use super::CommonArgs;
use crate::config::ChunkConfig;
use crate::error::CliError;
use crate::output::{create_formatter, open_writer, Body};
use crate::progress::ProgressReporter;
use anyhow::{Context, Result};
use clap::Args;
use texture_core::{Amount, ChunkEngine, ChunkPolicy};

/// Arguments for the chunk command
#[derive(Debug, Args)]
pub struct ChunkArgs {
    #[command(flatten)]
    pub common: CommonArgs,

    /// Tokens per chunk: a count such as 200, or a fraction such as 0.25
    #[arg(short, long, value_name = "AMOUNT", conflicts_with = "n_chunks")]
    pub size: Option<Amount>,

    /// Number of chunks per text
    #[arg(short, long, value_name = "N")]
    pub n_chunks: Option<usize>,

    /// Overlap between chunks: a count, or a fraction of the chunk size
    #[arg(long, value_name = "AMOUNT")]
    pub overlap: Option<Amount>,

    /// Spread leftover tokens over the chunks instead of dropping them
    #[arg(long)]
    pub rounded: bool,

    /// Drop texts smaller than one chunk
    #[arg(long, conflicts_with = "upscale")]
    pub min_size: bool,

    /// Resample texts smaller than one chunk up to the chunk size
    #[arg(long)]
    pub upscale: bool,

    /// Seed for upscale sampling
    #[arg(long, value_name = "SEED")]
    pub seed: Option<u64>,
}

impl ChunkArgs {
    /// Execute the chunk command
    pub fn execute(&self) -> Result<()> {
        self.common.init_logging();
        log::info!("Starting chunking");
        log::debug!("Arguments: {self:?}");

        let config = self.common.load_config()?;
        let policy = self.policy(&config.chunk)?;
        let seed = self.seed.or(config.chunk.seed);

        let corpus = self.common.bind_corpus()?;
        let mut engine = ChunkEngine::new(corpus, policy);
        if let Some(seed) = seed {
            engine = engine.with_seed(seed);
        }
        engine.configure(self.common.corpus_params(&config)?);

        let writer = open_writer(self.common.output.as_deref())?;
        let mut formatter = create_formatter(self.common.format, writer);
        let mut progress = ProgressReporter::new(self.common.quiet);
        progress.init_items(engine.len() as u64);

        let mut emitted = 0usize;
        for index in 0..engine.len() {
            let label = engine
                .corpus()
                .item(index)
                .map(|item| item.label().to_string())
                .unwrap_or_default();
            let chunks = engine
                .get(index)
                .with_context(|| format!("Failed to chunk {label}"))?;
            for chunk in chunks {
                formatter.format_item(&chunk.label, &Body::Tokens(chunk.tokens))?;
                emitted += 1;
            }
            progress.item_completed(&label);
        }

        formatter.finish()?;
        progress.finish();
        log::info!(
            "Emitted {emitted} chunks from {} of {} texts",
            progress.completed(),
            engine.len()
        );
        Ok(())
    }

    /// Build the policy from flags, falling back to the configuration file
    pub fn policy(&self, config: &ChunkConfig) -> Result<ChunkPolicy> {
        let mut builder = ChunkPolicy::builder()
            .overlap(self.overlap.unwrap_or(config.overlap))
            .rounded_size(self.rounded || config.rounded)
            .min_size(self.min_size || config.min_size)
            .upscale(self.upscale || config.upscale);

        builder = match (self.size, self.n_chunks) {
            (Some(size), _) => builder.chunk_size(size),
            (None, Some(n)) => builder.n_chunks(n),
            (None, None) => match (config.size, config.n_chunks) {
                (Some(size), None) => builder.chunk_size(size),
                (None, Some(n)) => builder.n_chunks(n),
                (Some(_), Some(_)) => {
                    return Err(CliError::InvalidOptions(
                        "config sets both chunk.size and chunk.n_chunks".to_string(),
                    )
                    .into())
                }
                (None, None) => {
                    return Err(CliError::InvalidOptions(
                        "one of --size or --n-chunks is required".to_string(),
                    )
                    .into())
                }
            },
        };

        builder.build().context("Invalid chunk policy")
    }
}
