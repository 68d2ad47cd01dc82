//! Error types for the context engine

use std::path::PathBuf;
use thiserror::Error;

/// Errors surfaced by scanning and context building.
///
/// Per-file read failures are not represented here: those files are skipped
/// and counted, never propagated.
#[derive(Debug, Error)]
pub enum ContextError {
    /// The project root could not be resolved or read
    #[error("Project root is not accessible: {}", path.display())]
    RootInaccessible {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// An include or ignore glob could not be compiled
    #[error("Invalid glob pattern: {0}")]
    InvalidPattern(String),

    /// File watcher setup failed
    #[error("Watcher error: {0}")]
    Watch(String),
}

pub type Result<T> = std::result::Result<T, ContextError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_display() {
        let err = ContextError::RootInaccessible {
            path: PathBuf::from("/no/such/project"),
            source: std::io::Error::new(std::io::ErrorKind::NotFound, "missing"),
        };
        assert!(err.to_string().contains("/no/such/project"));
    }
}
