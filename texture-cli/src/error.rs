//! Error handling for the CLI application

use std::fmt;
use std::path::PathBuf;

/// CLI-specific errors
#[derive(Debug)]
pub enum CliError {
    /// No input file matched any of the given patterns
    NoInput(Vec<String>),
    /// A word list file could not be used
    WordList { path: PathBuf, reason: String },
    /// Conflicting or invalid command-line options
    InvalidOptions(String),
}

impl fmt::Display for CliError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CliError::NoInput(patterns) => {
                write!(f, "No files found matching: {}", patterns.join(", "))
            }
            CliError::WordList { path, reason } => {
                write!(f, "Invalid word list {}: {reason}", path.display())
            }
            CliError::InvalidOptions(msg) => write!(f, "Invalid options: {msg}"),
        }
    }
}

impl std::error::Error for CliError {}

/// Result type alias for CLI operations
pub type CliResult<T> = Result<T, anyhow::Error>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_no_input_display() {
        let error = CliError::NoInput(vec!["plays/*.json".into(), "extra.json".into()]);
        assert_eq!(
            error.to_string(),
            "No files found matching: plays/*.json, extra.json"
        );
    }

    #[test]
    fn test_word_list_display() {
        let error = CliError::WordList {
            path: PathBuf::from("stop.txt"),
            reason: "file is empty".into(),
        };
        assert_eq!(error.to_string(), "Invalid word list stop.txt: file is empty");
    }

    #[test]
    fn test_downcast_through_anyhow() {
        let result: CliResult<()> = Err(CliError::InvalidOptions("bad".into()).into());
        let err = result.unwrap_err();
        assert!(matches!(
            err.downcast_ref::<CliError>(),
            Some(CliError::InvalidOptions(_))
        ));
    }
}
