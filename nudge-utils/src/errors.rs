// Nudge Error Types
//
// Errors raised while building requests and loading configuration. Driver
// and controller errors wrap these.

use std::path::PathBuf;
use std::time::Duration;
use thiserror::Error;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum NudgeError {
    /// Duration is zero, negative, NaN or infinite
    #[error("invalid animation duration: {0}")]
    InvalidDuration(String),

    #[error("unknown motion kind: '{0}' (expected up, down, left, right, shrink-v or shrink-h)")]
    UnknownMotion(String),

    #[error("unknown overlap policy: '{0}' (expected reject, preempt or queue)")]
    UnknownOverlapPolicy(String),

    #[error("tick interval must be between 1ms and 60s, got {0:?}")]
    InvalidTickInterval(Duration),

    #[error("failed to parse config: {0}")]
    ConfigParse(String),

    #[error("invalid config value for '{key}': {reason}")]
    ConfigValue { key: String, reason: String },

    #[error("failed to read config file {}: {reason}", path.display())]
    ConfigRead { path: PathBuf, reason: String },
}

impl NudgeError {
    pub(crate) fn config_value(key: &str, reason: impl Into<String>) -> Self {
        Self::ConfigValue {
            key: key.to_string(),
            reason: reason.into(),
        }
    }
}

/// Result type for request and configuration operations
pub type NudgeResult<T> = Result<T, NudgeError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_display() {
        let err = NudgeError::UnknownMotion("diagonal".to_string());
        assert!(err.to_string().contains("'diagonal'"));

        let err = NudgeError::config_value("canvas.cols", "must be positive");
        assert_eq!(
            err.to_string(),
            "invalid config value for 'canvas.cols': must be positive"
        );

        let err = NudgeError::ConfigRead {
            path: PathBuf::from("/tmp/nudge.kdl"),
            reason: "not found".to_string(),
        };
        assert!(err.to_string().contains("/tmp/nudge.kdl"));
    }
}
