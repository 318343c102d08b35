//! Error types for the PDF binder library

use std::path::PathBuf;
use thiserror::Error;

/// Result type alias using our Error type
pub type Result<T> = std::result::Result<T, Error>;

/// Broad category of a failure, for callers that branch on outcome
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
    /// A source folder or file does not exist
    NotFound,
    /// A source file exists but could not be parsed as a PDF
    Corrupt,
    /// Serializing an output document failed
    WriteFailed,
    /// An option value was rejected before any I/O happened
    InvalidArgument,
    /// Any other I/O or PDF library failure
    Io,
}

/// Main error type for the PDF binder library
#[derive(Error, Debug)]
pub enum Error {
    /// PDF processing error
    #[error("PDF error: {0}")]
    Pdf(#[from] lopdf::Error),

    /// IO error
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// Folder missing or not a directory
    #[error("Folder not found: {}", .0.display())]
    FolderNotFound(PathBuf),

    /// File not found
    #[error("File not found: {}", .0.display())]
    FileNotFound(PathBuf),

    /// Source file could not be opened or parsed
    #[error("Failed to read {}: {source}", .path.display())]
    Load {
        path: PathBuf,
        #[source]
        source: lopdf::Error,
    },

    /// Output file could not be written
    #[error("Failed to write {}: {source}", .path.display())]
    Write {
        path: PathBuf,
        #[source]
        source: lopdf::Error,
    },

    /// Split size must be at least one page
    #[error("Invalid split size: {0} (must be at least 1)")]
    InvalidSplitSize(usize),

    /// Output name must be a plain file name
    #[error("Invalid output file name: {0:?}")]
    InvalidOutputName(String),
}

impl Error {
    /// Category of this error
    pub fn kind(&self) -> ErrorKind {
        match self {
            Error::FolderNotFound(_) | Error::FileNotFound(_) => ErrorKind::NotFound,
            Error::Load { .. } => ErrorKind::Corrupt,
            Error::Write { .. } => ErrorKind::WriteFailed,
            Error::InvalidSplitSize(_) | Error::InvalidOutputName(_) => ErrorKind::InvalidArgument,
            Error::Pdf(_) | Error::Io(_) => ErrorKind::Io,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_kind_tags() {
        assert_eq!(Error::FolderNotFound(PathBuf::from("x")).kind(), ErrorKind::NotFound);
        assert_eq!(Error::InvalidSplitSize(0).kind(), ErrorKind::InvalidArgument);

        let err = Error::Write {
            path: PathBuf::from("out.pdf"),
            source: lopdf::Error::IO(std::io::Error::other("disk full")),
        };
        assert_eq!(err.kind(), ErrorKind::WriteFailed);
        assert!(err.to_string().contains("out.pdf"));
    }
}
