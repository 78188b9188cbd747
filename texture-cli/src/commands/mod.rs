//! CLI command implementations

use crate::config::CliConfig;
use crate::input::{read_word_list, resolve_patterns};
use crate::output::OutputFormat;
use anyhow::{Context, Result};
use clap::{Args, Subcommand};
use std::path::PathBuf;
use texture_core::{Corpus, CorpusParams, Source};

pub mod chunk;
pub mod extract;
pub mod show;

/// Available CLI commands
#[derive(Debug, Subcommand)]
pub enum Commands {
    /// Cut tokenized texts into labeled chunks
    Chunk(chunk::ChunkArgs),

    /// Extract selected records from structured play files
    Extract(extract::ExtractArgs),

    /// Print texts, or a summary of the corpus
    Show(show::ShowArgs),
}

impl Commands {
    /// Execute the selected command
    pub fn execute(&self) -> Result<()> {
        match self {
            Commands::Chunk(args) => args.execute(),
            Commands::Extract(args) => args.execute(),
            Commands::Show(args) => args.execute(),
        }
    }
}

/// Arguments shared by every command
#[derive(Debug, Args)]
pub struct CommonArgs {
    /// Input files or patterns (supports glob)
    #[arg(short, long, value_name = "FILE/PATTERN", required = true)]
    pub input: Vec<String>,

    /// Output file (default: stdout)
    #[arg(short, long, value_name = "FILE")]
    pub output: Option<PathBuf>,

    /// Output format
    #[arg(short, long, value_enum, default_value = "text")]
    pub format: OutputFormat,

    /// Configuration file
    #[arg(short, long, value_name = "FILE", env = "TEXTURE_CONFIG")]
    pub config: Option<PathBuf>,

    /// File with one stopword per line
    #[arg(long, value_name = "FILE")]
    pub stopwords: Option<PathBuf>,

    /// File with one goword per line
    #[arg(long, value_name = "FILE")]
    pub gowords: Option<PathBuf>,

    /// Keep file contents in memory after the first read
    #[arg(long)]
    pub keep_in_memory: bool,

    /// Suppress progress output
    #[arg(short, long)]
    pub quiet: bool,

    /// Increase verbosity
    #[arg(short, long, action = clap::ArgAction::Count)]
    pub verbose: u8,
}

impl CommonArgs {
    /// Initialize logging based on verbosity level
    pub fn init_logging(&self) {
        let log_level = match self.verbose {
            0 => "warn",
            1 => "info",
            2 => "debug",
            _ => "trace",
        };

        if !self.quiet {
            env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(log_level))
                .init();
        }
    }

    /// Load the configuration file, if any
    pub fn load_config(&self) -> Result<CliConfig> {
        CliConfig::load(self.config.as_deref())
    }

    /// Resolve the input patterns and bind them as a file-backed corpus
    pub fn bind_corpus(&self) -> Result<Corpus> {
        let files = resolve_patterns(&self.input)?;
        Corpus::bind(Source::files(&files), Some(true)).context("Failed to bind input files")
    }

    /// Corpus settings from flags, falling back to the configuration file
    pub fn corpus_params(&self, config: &CliConfig) -> Result<CorpusParams> {
        let mut params =
            CorpusParams::new().keep_in_memory(self.keep_in_memory || config.corpus.keep_in_memory);

        if let Some(path) = self.stopwords.as_ref().or(config.corpus.stopwords.as_ref()) {
            params = params.stopwords(read_word_list(path)?);
        }
        if let Some(path) = self.gowords.as_ref().or(config.corpus.gowords.as_ref()) {
            params = params.gowords(read_word_list(path)?);
        }
        Ok(params)
    }
}
