// Nudge Logging
//
// `log` facade backed by env_logger. `RUST_LOG` wins over the level passed
// in, so a single module can be turned up without touching the CLI flags.

use env_logger::{Builder, Env};
use log::LevelFilter;

pub fn configure_logger(level: LevelFilter) {
    let mut builder = Builder::from_env(Env::default().default_filter_or(level.as_str()));
    builder.format_timestamp_millis();
    // Already initialised (tests, embedding): keep the existing logger
    if builder.try_init().is_err() {
        log::debug!("Logger already configured, keeping it");
    }
}
