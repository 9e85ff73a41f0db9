//! Notification error types.

use thiserror::Error;

/// Errors that can occur while alerting the user.
#[derive(Debug, Error)]
pub enum NotifyError {
    /// Writing the alert to the terminal failed.
    #[error("failed to write completion notice: {0}")]
    Write(#[from] std::io::Error),

    /// Generic delivery failure (used by test doubles).
    #[error("notification failed: {0}")]
    Failed(String),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_display() {
        let err = NotifyError::Write(std::io::Error::new(
            std::io::ErrorKind::BrokenPipe,
            "pipe closed",
        ));
        assert!(err.to_string().contains("pipe closed"));

        let err = NotifyError::Failed("mock".to_string());
        assert_eq!(err.to_string(), "notification failed: mock");
    }
}
