// Nudge Driver - Error Types
//
// Errors returned through the driver handle. The driver task itself never
// fails: everything it cannot do is reported back to the caller here.

use nudge_utils::errors::NudgeError;
use thiserror::Error;

use super::types::RunId;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum DriverError {
    /// Overlap policy is `Reject` and another run is still in flight
    #[error("animation {active} is still running")]
    Busy { active: RunId },

    /// Driver task has shut down (or its handle outlived the runtime)
    #[error("animation driver has stopped")]
    Stopped,

    #[error(transparent)]
    InvalidRequest(#[from] NudgeError),
}

impl<T> From<tokio::sync::mpsc::error::SendError<T>> for DriverError {
    fn from(_: tokio::sync::mpsc::error::SendError<T>) -> Self {
        Self::Stopped
    }
}

impl From<tokio::sync::oneshot::error::RecvError> for DriverError {
    fn from(_: tokio::sync::oneshot::error::RecvError) -> Self {
        Self::Stopped
    }
}

/// Result type for driver operations
pub type DriverResult<T> = Result<T, DriverError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_display() {
        let err = DriverError::Busy { active: RunId(7) };
        assert_eq!(err.to_string(), "animation run#7 is still running");

        let err: DriverError = NudgeError::UnknownMotion("spin".to_string()).into();
        assert!(err.to_string().contains("'spin'"));
    }

    #[tokio::test]
    async fn test_closed_channel_conversion() {
        let (tx, rx) = tokio::sync::oneshot::channel::<()>();
        drop(tx);
        let err: DriverError = rx.await.unwrap_err().into();
        assert_eq!(err, DriverError::Stopped);
    }
}
