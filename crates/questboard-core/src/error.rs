//! Error types for Questboard

use thiserror::Error;

/// Main error type for Questboard client operations
#[derive(Error, Debug)]
pub enum QuestError {
    /// The request never produced a response (DNS, connect, timeout)
    #[error("Failed to {operation}: {source}")]
    Network {
        operation: &'static str,
        #[source]
        source: reqwest::Error,
    },

    /// The server answered with a non-success status
    #[error("Failed to {operation}: {}", status_text(.status))]
    Status {
        operation: &'static str,
        status: reqwest::StatusCode,
    },

    /// The response body was not the JSON we expected
    #[error("Failed to {operation}: invalid response body: {source}")]
    Decode {
        operation: &'static str,
        #[source]
        source: serde_json::Error,
    },

    /// Error during storage operations (redb)
    #[error("Storage error: {0}")]
    Storage(String),

    /// Database creation/opening error
    #[error("Database error: {0}")]
    Database(#[from] redb::DatabaseError),

    /// Transaction error
    #[error("Transaction error: {0}")]
    Transaction(#[from] redb::TransactionError),

    /// Table error
    #[error("Table error: {0}")]
    Table(#[from] redb::TableError),

    /// Storage operation error
    #[error("Storage operation error: {0}")]
    StorageOp(#[from] redb::StorageError),

    /// Commit error
    #[error("Commit error: {0}")]
    Commit(#[from] redb::CommitError),

    /// General I/O error
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// Invalid configuration value
    #[error("Invalid configuration: {0}")]
    Config(String),

    /// The caller cancelled the operation before its response was applied
    #[error("Operation cancelled")]
    Cancelled,

    /// Another quest action is still in flight
    #[error("Another quest action is already in progress")]
    ActionInProgress,

    /// A quest is already active; complete or abandon it first
    #[error("Quest {0} is already active")]
    QuestAlreadyActive(String),

    /// Recorded actions need some text
    #[error("Action text must not be empty")]
    EmptyActionText,
}

/// Result type alias using QuestError
pub type QuestResult<T> = Result<T, QuestError>;

fn status_text(status: &reqwest::StatusCode) -> String {
    status
        .canonical_reason()
        .map(str::to_string)
        .unwrap_or_else(|| status.as_u16().to_string())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_status_error_uses_reason_phrase() {
        let err = QuestError::Status {
            operation: "fetch quests",
            status: reqwest::StatusCode::NOT_FOUND,
        };
        assert_eq!(err.to_string(), "Failed to fetch quests: Not Found");
    }

    #[test]
    fn test_status_error_without_reason_falls_back_to_code() {
        let status = reqwest::StatusCode::from_u16(599).unwrap();
        let err = QuestError::Status {
            operation: "start quest",
            status,
        };
        assert_eq!(err.to_string(), "Failed to start quest: 599");
    }

    #[test]
    fn test_error_from_io() {
        let io_err = std::io::Error::new(std::io::ErrorKind::NotFound, "file not found");
        let err: QuestError = io_err.into();
        assert!(matches!(err, QuestError::Io(_)));
    }
}
