//! Error types for msh

use std::io;
use thiserror::Error;

/// Result type alias for msh operations
pub type MshResult<T> = Result<T, MshError>;

/// Error types for msh shell operations
#[derive(Error, Debug)]
pub enum MshError {
    /// Missing file or directory
    #[error("{0}: No such file or directory")]
    NotFound(String),

    /// A directory was required
    #[error("{0}: Not a directory")]
    NotADirectory(String),

    /// A file was required
    #[error("{0}: Is a directory")]
    IsADirectory(String),

    /// OS-level access denial
    #[error("{0}: Permission denied")]
    PermissionDenied(String),

    /// Invalid argument
    #[error("Invalid argument: {0}")]
    InvalidArgument(String),

    /// Malformed grep pattern
    #[error("Invalid pattern: {0}")]
    InvalidPattern(#[from] regex::Error),

    /// Any other IO error, with the path it happened on
    #[error("{path}: {source}")]
    Io {
        path: String,
        #[source]
        source: io::Error,
    },

    /// Command not found
    #[error("Unknown command: {0}")]
    UnknownCommand(String),

    /// Wrong arguments for a known command
    #[error("usage: {0}")]
    Usage(String),

    /// Configuration could not be loaded
    #[error("Config error: {0}")]
    Config(#[from] msh_config::ConfigError),
}

impl MshError {
    /// Classify an IO error raised while touching `path`.
    pub fn from_io(path: &str, err: io::Error) -> Self {
        let path = path.to_string();
        match err.kind() {
            io::ErrorKind::NotFound => Self::NotFound(path),
            io::ErrorKind::NotADirectory => Self::NotADirectory(path),
            io::ErrorKind::IsADirectory => Self::IsADirectory(path),
            io::ErrorKind::PermissionDenied => Self::PermissionDenied(path),
            _ => Self::Io { path, source: err },
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn io_errors_are_classified_by_kind() {
        let err = MshError::from_io("a.txt", io::Error::from(io::ErrorKind::NotFound));
        assert!(matches!(err, MshError::NotFound(ref p) if p == "a.txt"));

        let err = MshError::from_io("d", io::Error::from(io::ErrorKind::IsADirectory));
        assert!(matches!(err, MshError::IsADirectory(_)));

        let err = MshError::from_io("f", io::Error::from(io::ErrorKind::NotADirectory));
        assert!(matches!(err, MshError::NotADirectory(_)));

        let err = MshError::from_io("f", io::Error::from(io::ErrorKind::PermissionDenied));
        assert!(matches!(err, MshError::PermissionDenied(_)));

        let err = MshError::from_io("f", io::Error::from(io::ErrorKind::InvalidData));
        assert!(matches!(err, MshError::Io { .. }));
    }

    #[test]
    fn messages_name_the_path() {
        let err = MshError::NotFound("missing.txt".to_string());
        assert_eq!(err.to_string(), "missing.txt: No such file or directory");

        let err = MshError::UnknownCommand("frob".to_string());
        assert_eq!(err.to_string(), "Unknown command: frob");
    }
}
