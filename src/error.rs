//! Error types and handling.

use thiserror::Error;

/// Application-wide error type
#[derive(Error, Debug)]
pub enum AppError {
    /// Configuration error
    #[error("Config error: {0}")]
    Config(String),

    /// File or stdio error
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// Snapshot serialization failed
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// No tokio runtime available for expiry timers
    #[error("Runtime error: {0}")]
    Runtime(String),
}

/// Result type alias for AppError
pub type Result<T> = std::result::Result<T, AppError>;

impl AppError {
    /// Create a config error with message
    pub fn config(msg: impl Into<String>) -> Self {
        Self::Config(msg.into())
    }

    /// Create a runtime error with message
    pub fn runtime(msg: impl Into<String>) -> Self {
        Self::Runtime(msg.into())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_messages() {
        assert_eq!(AppError::config("bad level").to_string(), "Config error: bad level");
        assert_eq!(AppError::runtime("no reactor").to_string(), "Runtime error: no reactor");
    }

    #[test]
    fn test_io_error_converts() {
        fn read() -> Result<()> {
            Err(std::io::Error::new(std::io::ErrorKind::UnexpectedEof, "stdin closed"))?;
            Ok(())
        }
        assert!(matches!(read(), Err(AppError::Io(_))));
    }
}
