//! Error types for the bin2c-core library.
//!
//! Every failure is terminal for the invocation that produced it. The
//! variants are grouped into a small number of [`ErrorKind`]s so callers
//! can decide how to report them without matching on every variant.

use std::path::PathBuf;
use thiserror::Error;

/// Result type alias for bin2c operations
pub type Result<T> = std::result::Result<T, Error>;

/// Error type for all bin2c operations
#[derive(Error, Debug)]
#[non_exhaustive]
pub enum Error {
    /// The command line did not have the expected shape
    #[error("usage: {message}")]
    Usage {
        /// What was wrong with the invocation
        message: String,
    },

    /// No input files were given
    #[error("no input files given")]
    NoInputs,

    /// An input file could not be opened (missing or not readable)
    #[error("file not found: {}", path.display())]
    InputNotFound {
        /// Path to the input that could not be opened
        path: PathBuf,
        /// Underlying I/O error, absent for in-memory sources
        #[source]
        source: Option<std::io::Error>,
    },

    /// Failed to read an input file after opening it
    #[error("failed to read file '{}': {source}", path.display())]
    FileRead {
        /// Path to the file that failed to read
        path: PathBuf,
        /// Underlying I/O error
        #[source]
        source: std::io::Error,
    },

    /// Failed to write the output header
    #[error("failed to write file '{}': {source}", path.display())]
    FileWrite {
        /// Path to the file that failed to write
        path: PathBuf,
        /// Underlying I/O error
        #[source]
        source: std::io::Error,
    },

    /// A path has no filename usable as a C identifier or guard
    #[error("cannot derive a name from path '{}': {reason}", path.display())]
    InvalidFileName {
        /// The offending path
        path: PathBuf,
        /// Why no name could be derived
        reason: &'static str,
    },

    /// Two inputs map to the same array name
    #[error(
        "duplicate identifier '{identifier}': '{}' and '{}' share a base filename",
        first.display(),
        second.display()
    )]
    DuplicateIdentifier {
        /// The colliding identifier
        identifier: String,
        /// The input that claimed the identifier first
        first: PathBuf,
        /// The input that collided with it
        second: PathBuf,
    },
}

/// Coarse classification of an [`Error`]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
    /// Malformed invocation
    Usage,
    /// An input artifact is missing or unreadable
    InputNotFound,
    /// Any other filesystem failure
    Io,
    /// The inputs are readable but cannot form a valid header
    Invalid,
}

impl Error {
    /// Creates a new usage error
    pub fn usage(message: impl Into<String>) -> Self {
        Self::Usage {
            message: message.into(),
        }
    }

    /// Creates a new input-not-found error
    pub fn input_not_found(path: impl Into<PathBuf>, source: Option<std::io::Error>) -> Self {
        Self::InputNotFound {
            path: path.into(),
            source,
        }
    }

    /// Creates a new file read error
    pub fn file_read(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        Self::FileRead {
            path: path.into(),
            source,
        }
    }

    /// Creates a new file write error
    pub fn file_write(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        Self::FileWrite {
            path: path.into(),
            source,
        }
    }

    /// Creates a new invalid file name error
    pub fn invalid_file_name(path: impl Into<PathBuf>, reason: &'static str) -> Self {
        Self::InvalidFileName {
            path: path.into(),
            reason,
        }
    }

    /// Returns the coarse kind of this error
    pub fn kind(&self) -> ErrorKind {
        match self {
            Self::Usage { .. } => ErrorKind::Usage,
            Self::InputNotFound { .. } => ErrorKind::InputNotFound,
            Self::FileRead { .. } | Self::FileWrite { .. } => ErrorKind::Io,
            Self::NoInputs | Self::InvalidFileName { .. } | Self::DuplicateIdentifier { .. } => {
                ErrorKind::Invalid
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io;

    #[test]
    fn test_input_not_found_display() {
        let err = Error::input_not_found("shaders/missing.cso", None);
        assert_eq!(err.to_string(), "file not found: shaders/missing.cso");
        assert_eq!(err.kind(), ErrorKind::InputNotFound);
    }

    #[test]
    fn test_duplicate_identifier_display() {
        let err = Error::DuplicateIdentifier {
            identifier: "quad".to_string(),
            first: PathBuf::from("vs/quad.cso"),
            second: PathBuf::from("ps/quad.cso"),
        };
        let msg = err.to_string();
        assert!(msg.contains("'quad'"));
        assert!(msg.contains("vs/quad.cso"));
        assert!(msg.contains("ps/quad.cso"));
        assert_eq!(err.kind(), ErrorKind::Invalid);
    }

    #[test]
    fn test_io_kinds() {
        let read = Error::file_read("a.bin", io::Error::new(io::ErrorKind::Other, "boom"));
        let write = Error::file_write("a.h", io::Error::new(io::ErrorKind::Other, "boom"));
        assert_eq!(read.kind(), ErrorKind::Io);
        assert_eq!(write.kind(), ErrorKind::Io);
        assert!(read.to_string().contains("boom"));
        assert_eq!(Error::usage("bad").kind(), ErrorKind::Usage);
    }
}
