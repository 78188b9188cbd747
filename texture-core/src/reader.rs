//! File access for file-backed items

use std::fs;
use std::io;
use std::path::Path;

/// Reads the raw text behind a file-backed item
///
/// Failures are returned untouched; the corpus attaches the path and hands
/// them to the caller.
pub trait ContentReader: Send + Sync {
    /// Read a file as text
    fn read_text(&self, path: &Path) -> io::Result<String>;
}

/// Reads files from the local filesystem
///
/// Bytes that are not valid UTF-8 are replaced rather than rejected.
#[derive(Debug, Clone, Copy, Default)]
pub struct FsReader;

impl ContentReader for FsReader {
    fn read_text(&self, path: &Path) -> io::Result<String> {
        let bytes = fs::read(path)?;
        Ok(match String::from_utf8(bytes) {
            Ok(text) => text,
            Err(e) => String::from_utf8_lossy(e.as_bytes()).into_owned(),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_read_text_success() {
        let temp_dir = TempDir::new().unwrap();
        let file_path = temp_dir.path().join("sonnet.txt");
        fs::write(&file_path, "Thou art more lovely and more temperate.").unwrap();

        let text = FsReader.read_text(&file_path).unwrap();
        assert_eq!(text, "Thou art more lovely and more temperate.");
    }

    #[test]
    fn test_read_text_nonexistent_file() {
        let err = FsReader
            .read_text(Path::new("/nonexistent/file.txt"))
            .unwrap_err();
        assert_eq!(err.kind(), io::ErrorKind::NotFound);
    }

    #[test]
    fn test_read_text_invalid_utf8_is_replaced() {
        let temp_dir = TempDir::new().unwrap();
        let file_path = temp_dir.path().join("latin1.txt");
        fs::write(&file_path, b"caf\xe9 au lait").unwrap();

        let text = FsReader.read_text(&file_path).unwrap();
        assert!(text.starts_with("caf"));
        assert!(text.ends_with(" au lait"));
    }
}
