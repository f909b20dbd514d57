//! Error types for tasktree.
//!
//! Only the store and the surfaces above it can fail. Tree operations treat an
//! unknown id as a no-op and never produce an error.

use std::path::PathBuf;

use thiserror::Error;

/// Main error type for store and command failures.
#[derive(Error, Debug)]
pub enum Error {
    #[error("task store unavailable at {path}: {source}")]
    StoreUnavailable {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("task store at {path} is not valid JSON: {source}")]
    CorruptStore {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },

    #[error("Task with ID {0} not found")]
    TaskNotFound(u64),

    #[error("Invalid argument: {0}")]
    InvalidArgument(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

pub type Result<T> = std::result::Result<T, Error>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_messages_name_the_offending_input() {
        assert_eq!(Error::TaskNotFound(42).to_string(), "Task with ID 42 not found");

        let err = Error::StoreUnavailable {
            path: PathBuf::from("/tmp/tasks.json"),
            source: std::io::Error::new(std::io::ErrorKind::PermissionDenied, "denied"),
        };
        assert!(err.to_string().contains("/tmp/tasks.json"));
        assert!(std::error::Error::source(&err).is_some());
    }
}
