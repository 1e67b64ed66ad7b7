// Nudge Client - Error Types

use nudge_server::DriverError;
use nudge_utils::errors::NudgeError;
use thiserror::Error;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ClientError {
    #[error("driver error: {0}")]
    Driver(#[from] DriverError),

    #[error("invalid animation request: {0}")]
    Request(#[from] NudgeError),

    /// Waited for a completion while no animation was in flight
    #[error("no animation is running")]
    Idle,
}

pub type ClientResult<T> = Result<T, ClientError>;
