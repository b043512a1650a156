//! Error types for the rayprobe library.

use std::path::PathBuf;
use thiserror::Error;

/// Coarse classification of every [`Error`].
///
/// Loading only ever fails with `NotFound` or `Format`; callers deciding
/// whether to abort or carry on with another pipeline only need this split.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
    /// The derived file path does not exist or cannot be opened.
    NotFound,
    /// A decoder rejected the file contents.
    Format,
    /// Writing a file failed.
    Io,
}

/// Main error type for loading ray dumps and meshes.
#[derive(Error, Debug)]
pub enum Error {
    /// File does not exist or cannot be accessed
    #[error("File not found: {}", .path.display())]
    FileNotFound {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// Versioned ray dump with a version this reader does not know
    #[error("Unsupported ray dump version: expected 1 or 2, got {0}")]
    UnsupportedVersion(i32),

    /// Header announced a negative number of rays
    #[error("Invalid ray count: {0}")]
    InvalidRayCount(i32),

    /// Record with an unknown type tag
    #[error("Ray {index}: unknown record type {kind}")]
    InvalidRecordType { index: usize, kind: i32 },

    /// Versioned record whose trailing marker was not zero
    #[error("Ray {index}: bad footer {footer}")]
    BadFooter { index: usize, footer: i32 },

    /// Stream ended in the middle of a header or record
    #[error("Unexpected end of stream at byte {0}")]
    UnexpectedEof(u64),

    /// Read failed while a decoder was consuming the stream
    #[error("Read failed at byte {offset}: {source}")]
    Read {
        offset: u64,
        #[source]
        source: std::io::Error,
    },

    /// OBJ syntax or reference error
    #[error("OBJ line {line}: {message}")]
    Obj { line: usize, message: String },

    /// I/O error outside of decoding (writing dumps, creating files)
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

impl Error {
    /// Create an OBJ error for the given 1-based line.
    pub fn obj(line: usize, message: impl Into<String>) -> Self {
        Self::Obj { line, message: message.into() }
    }

    /// Map a failed `open` on `path` to [`Error::FileNotFound`].
    pub fn not_found(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        Self::FileNotFound { path: path.into(), source }
    }

    /// Map an I/O failure raised while decoding at `offset`.
    pub(crate) fn from_read(source: std::io::Error, offset: u64) -> Self {
        if source.kind() == std::io::ErrorKind::UnexpectedEof {
            Self::UnexpectedEof(offset)
        } else {
            Self::Read { offset, source }
        }
    }

    /// Which failure class this error belongs to.
    pub fn kind(&self) -> ErrorKind {
        match self {
            Self::FileNotFound { .. } => ErrorKind::NotFound,
            Self::Io(_) => ErrorKind::Io,
            _ => ErrorKind::Format,
        }
    }

    #[inline]
    pub fn is_not_found(&self) -> bool {
        self.kind() == ErrorKind::NotFound
    }

    #[inline]
    pub fn is_format(&self) -> bool {
        self.kind() == ErrorKind::Format
    }
}

/// Result type alias for rayprobe operations.
pub type Result<T> = std::result::Result<T, Error>;
