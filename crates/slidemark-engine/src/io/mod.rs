use std::fs;
use std::path::{Path, PathBuf};

#[derive(Debug, thiserror::Error)]
pub enum IoError {
    #[error("File not found: {0}")]
    NotFound(PathBuf),
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

/// The raw lines of one chapter file, with the information diagnostics and
/// include directives need.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ChapterSource {
    /// Name used in diagnostics, usually the file name.
    pub name: String,
    /// Directory `!INCLUDESRC` paths are resolved against.
    pub base_dir: PathBuf,
    pub lines: Vec<String>,
}

impl ChapterSource {
    /// Reads a chapter from disk.
    pub fn from_file(path: &Path) -> Result<Self, IoError> {
        let lines = read_lines(path)?;
        Ok(Self {
            name: path.display().to_string(),
            base_dir: path.parent().map(Path::to_path_buf).unwrap_or_default(),
            lines,
        })
    }

    /// Wraps in-memory text. Includes resolve against the current directory.
    pub fn from_text(name: impl Into<String>, text: &str) -> Self {
        Self {
            name: name.into(),
            base_dir: PathBuf::new(),
            lines: split_lines(text),
        }
    }
}

/// Read a UTF-8 file as lines, without line terminators.
pub fn read_lines(path: &Path) -> Result<Vec<String>, IoError> {
    if !path.exists() {
        return Err(IoError::NotFound(path.to_path_buf()));
    }
    let content = fs::read_to_string(path).map_err(IoError::Io)?;
    Ok(split_lines(&content))
}

/// Splits text into lines, accepting both `\n` and `\r\n` endings.
pub fn split_lines(text: &str) -> Vec<String> {
    text.lines().map(str::to_string).collect()
}
