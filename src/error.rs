use thiserror::Error;

/// All possible errors in the todo manager
#[derive(Error, Debug)]
pub enum TodoError {
    #[error("List index {index} is out of range ({len} lists)")]
    ListIndexOutOfRange { index: usize, len: usize },

    #[error("Task index {index} is out of range in list {list} ({len} tasks)")]
    TaskIndexOutOfRange {
        list: usize,
        index: usize,
        len: usize,
    },

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("MCP error: {0}")]
    Mcp(String),
}

/// Result type alias
pub type Result<T> = std::result::Result<T, TodoError>;
