//! JSON output formatter

use super::{Body, OutputFormatter};
use anyhow::Result;
use serde::Serialize;
use std::io::Write;

/// JSON formatter - collects every item and writes one array on finish
pub struct JsonFormatter<W: Write> {
    writer: W,
    items: Vec<ItemData>,
}

/// Data structure for JSON output
#[derive(Debug, Serialize)]
pub struct ItemData {
    pub label: String,
    pub content: Body,
}

impl<W: Write> JsonFormatter<W> {
    /// Create a new JSON formatter
    pub fn new(writer: W) -> Self {
        Self {
            writer,
            items: Vec::new(),
        }
    }
}

impl<W: Write> OutputFormatter for JsonFormatter<W> {
    fn format_item(&mut self, label: &str, body: &Body) -> Result<()> {
        self.items.push(ItemData {
            label: label.to_string(),
            content: body.clone(),
        });
        Ok(())
    }

    fn finish(&mut self) -> Result<()> {
        serde_json::to_writer_pretty(&mut self.writer, &self.items)?;
        writeln!(self.writer)?;
        self.writer.flush()?;
        Ok(())
    }
}
