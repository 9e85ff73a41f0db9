//! Engine error types.

use thiserror::Error;

/// Errors raised by the countdown engine itself.
///
/// Invalid user input never ends up here: durations are clamped or ignored
/// before they reach the engine.
#[derive(Debug, Error)]
pub enum EngineError {
    /// A tick task had to be spawned but no tokio runtime was running.
    #[error("no tokio runtime is available to drive the countdown")]
    NoRuntime,

    /// The configuration failed validation.
    #[error("invalid configuration: {0}")]
    InvalidConfig(String),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_display() {
        let err = EngineError::NoRuntime;
        assert!(err.to_string().contains("tokio runtime"));

        let err = EngineError::InvalidConfig("tick period must be positive".to_string());
        assert_eq!(
            err.to_string(),
            "invalid configuration: tick period must be positive"
        );
    }

    #[test]
    fn test_converts_into_anyhow() {
        let err: anyhow::Error = EngineError::NoRuntime.into();
        assert!(err.downcast_ref::<EngineError>().is_some());
    }
}
