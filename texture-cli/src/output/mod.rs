//! Output formatting module

use anyhow::{Context, Result};
use serde::Serialize;
use std::fs::File;
use std::io::{self, BufWriter, Write};
use std::path::Path;
use texture_core::{Content, Extracted};

pub mod json;
pub mod text;

pub use json::JsonFormatter;
pub use text::TextFormatter;

/// Content of one emitted item
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(untagged)]
pub enum Body {
    Text(String),
    Tokens(Vec<String>),
    Attributed(Vec<(String, String)>),
}

impl From<Content> for Body {
    fn from(content: Content) -> Self {
        match content {
            Content::Text(text) => Body::Text(text),
            Content::Tokens(tokens) => Body::Tokens(tokens),
        }
    }
}

impl From<Extracted> for Body {
    fn from(extracted: Extracted) -> Self {
        match extracted {
            Extracted::Text(text) => Body::Text(text),
            Extracted::Tokens(tokens) => Body::Tokens(tokens),
            Extracted::Attributed(pairs) => Body::Attributed(pairs),
        }
    }
}

/// Trait for output formatters
pub trait OutputFormatter {
    /// Format and output a single labeled item
    fn format_item(&mut self, label: &str, body: &Body) -> Result<()>;

    /// Finalize output (e.g., write the collected JSON array)
    fn finish(&mut self) -> Result<()>;
}

/// Supported output formats
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, clap::ValueEnum)]
pub enum OutputFormat {
    /// One item per line, label and content separated by a tab
    #[default]
    Text,
    /// JSON array of `{label, content}` objects
    Json,
}

/// Open the output destination, stdout when no path is given
pub fn open_writer(path: Option<&Path>) -> Result<Box<dyn Write>> {
    Ok(match path {
        Some(path) => {
            let file = File::create(path)
                .with_context(|| format!("Failed to create output file: {}", path.display()))?;
            Box::new(BufWriter::new(file))
        }
        None => Box::new(io::stdout().lock()),
    })
}

/// Create a formatter for the requested format
pub fn create_formatter<'a>(
    format: OutputFormat,
    writer: Box<dyn Write + 'a>,
) -> Box<dyn OutputFormatter + 'a> {
    match format {
        OutputFormat::Text => Box::new(TextFormatter::new(writer)),
        OutputFormat::Json => Box::new(JsonFormatter::new(writer)),
    }
}
