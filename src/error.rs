use thiserror::Error;

pub type Result<T> = std::result::Result<T, TasklyError>;

#[derive(Debug, Error)]
pub enum TasklyError {
    #[error("Column not found: {0}")]
    ColumnNotFound(String),

    #[error("Task not found: {0}")]
    TaskNotFound(String),

    #[error("Index {index} out of range for {sequence} (length {len})")]
    IndexOutOfRange {
        sequence: String,
        index: usize,
        len: usize,
    },

    #[error("Task {task_id} is not at index {index} of column {column_id}")]
    TaskIndexMismatch {
        task_id: String,
        column_id: String,
        index: usize,
    },

    #[error("Board integrity violated: {0}")]
    IntegrityViolation(String),

    #[error("Title must not be blank")]
    InvalidTitle,

    #[error("Invalid sort option: {0}")]
    InvalidSortOption(String),

    #[error("Invalid filter option: {0}")]
    InvalidFilterOption(String),

    #[error("Storage error: {0}")]
    StorageError(String),

    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),

    #[error("Serialization error: {0}")]
    SerializationError(#[from] serde_json::Error),

    #[error("Configuration error: {0}")]
    ConfigError(String),
}
