use super::ObjectKind;
use std::io;
use std::path::PathBuf;
use thiserror::Error as ThisError;

#[derive(Debug, ThisError)]
pub enum Error {
    #[error("ERR - Invalid object id: {0}")]
    InvalidIdentifier(String),

    #[error("ERR - Object not found: {}", .0.display())]
    NotFound(PathBuf),

    #[error("ERR - Io: {0}")]
    Io(#[from] io::Error),

    #[error("ERR - Corrupt object: {0}")]
    CorruptObject(String),

    #[error("ERR - Malformed header: {0}")]
    MalformedHeader(String),

    #[error("ERR - Encountered unknown field in commit: {0}")]
    UnknownField(String),

    #[error("ERR - Malformed commit: {0}")]
    MalformedCommit(String),

    #[error("ERR - Expected a commit object, found {0}")]
    NotACommit(ObjectKind),

    #[error("ERR - Size mismatch: header says {expected} bytes, body has {actual}")]
    SizeMismatch { expected: usize, actual: usize },
}

impl Error {
    /// Whether the object file is missing, as opposed to present but unreadable.
    pub fn is_not_found(&self) -> bool {
        matches!(self, Self::NotFound(_))
    }
}
