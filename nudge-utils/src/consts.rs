//! Defaults shared by the driver, the controller and the CLI.

use std::time::Duration;

/// Pause between two animation steps
pub const DEFAULT_TICK_INTERVAL: Duration = Duration::from_millis(25);

/// Accepted tick interval range
pub const MIN_TICK_INTERVAL: Duration = Duration::from_millis(1);
pub const MAX_TICK_INTERVAL: Duration = Duration::from_secs(60);

/// Length of a button-triggered animation
pub const DEFAULT_DURATION: Duration = Duration::from_millis(1500);

pub const DEFAULT_EVENT_CAPACITY: usize = 64;
