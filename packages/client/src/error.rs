//! Error types for the terminal client.

use thiserror::Error;

/// Client-specific errors
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ClientError {
    /// Connection could not be established or was lost
    #[error("Connection error: {0}")]
    ConnectionError(String),

    /// A slash command with missing or unknown arguments
    #[error("Invalid command: {0}")]
    InvalidCommand(String),
}
