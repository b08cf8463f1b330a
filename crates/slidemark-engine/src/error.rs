use std::path::PathBuf;

use crate::parsing::blocks::ParserState;

/// A fatal error for the file being parsed. Parsing of that file stops at the
/// first error; there is no resynchronisation.
#[derive(Debug, thiserror::Error)]
pub enum ParseError {
    /// No line rule accepted the line in the current state.
    #[error("{file}:{line}: syntax error in state {state} ({reason}): {content:?}")]
    Syntax {
        file: String,
        line: usize,
        state: ParserState,
        content: String,
        reason: String,
    },
    /// Content that needs a chapter or slide appeared before one was opened.
    #[error("{file}:{line}: {reason}: {content:?}")]
    Structural {
        file: String,
        line: usize,
        state: ParserState,
        content: String,
        reason: String,
    },
    /// An `!INCLUDESRC` path does not resolve.
    #[error("{file}:{line}: included file not found: {}", path.display())]
    MissingFile {
        file: String,
        line: usize,
        path: PathBuf,
    },
    #[error("failed to read {}: {source}", path.display())]
    Io {
        path: PathBuf,
        source: std::io::Error,
    },
}

impl ParseError {
    /// The 1-based line the error was raised on, if it belongs to one.
    pub fn line(&self) -> Option<usize> {
        match self {
            ParseError::Syntax { line, .. }
            | ParseError::Structural { line, .. }
            | ParseError::MissingFile { line, .. } => Some(*line),
            ParseError::Io { .. } => None,
        }
    }
}
