//! Error types for the command-line driver.

/// Errors that stop a command from being processed.
///
/// Lexer and parser diagnostics are not errors here: they are written to
/// the error stream and surface as an [`Outcome`](crate::processor::Outcome).
#[derive(Debug, thiserror::Error)]
pub enum CliError {
    /// Writing to the output or reading from the input failed.
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// Rendering statements as JSON failed.
    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
}

/// Result type for driver operations.
pub type Result<T> = std::result::Result<T, CliError>;
