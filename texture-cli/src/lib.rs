//! Texture CLI library
//!
//! Command-line front end for chunking, extracting from and inspecting
//! texture corpora.

pub mod commands;
pub mod config;
pub mod error;
pub mod input;
pub mod output;
pub mod progress;

pub use error::{CliError, CliResult};
