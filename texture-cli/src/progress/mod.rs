//! Progress reporting module

use indicatif::{ProgressBar, ProgressStyle};
use std::time::Duration;

const TEMPLATE: &str = "[{elapsed_precise}] {bar:40.cyan/blue} {pos}/{len} items {msg}";

/// Progress reporter for corpus items
///
/// Completed items are counted even when the bar is hidden.
pub struct ProgressReporter {
    progress_bar: Option<ProgressBar>,
    quiet: bool,
    completed: u64,
}

impl ProgressReporter {
    /// Create a new progress reporter
    pub fn new(quiet: bool) -> Self {
        Self {
            progress_bar: None,
            quiet,
            completed: 0,
        }
    }

    /// Initialize the bar for `total_items` items
    pub fn init_items(&mut self, total_items: u64) {
        if self.quiet {
            return;
        }

        let style = ProgressStyle::default_bar()
            .template(TEMPLATE)
            .unwrap_or_else(|_| ProgressStyle::default_bar())
            .progress_chars("##-");
        let pb = ProgressBar::new(total_items);
        pb.set_style(style);
        pb.enable_steady_tick(Duration::from_millis(100));

        self.progress_bar = Some(pb);
    }

    /// Update progress for a finished item
    pub fn item_completed(&mut self, label: &str) {
        self.completed += 1;
        if let Some(pb) = &self.progress_bar {
            pb.set_message(format!("Processed: {label}"));
            pb.inc(1);
        }
    }

    /// Finish progress reporting
    pub fn finish(&self) {
        if let Some(pb) = &self.progress_bar {
            pb.finish_with_message(format!("Complete: {} items", self.completed));
        }
    }

    /// Number of items completed so far
    pub fn completed(&self) -> u64 {
        self.completed
    }
}
