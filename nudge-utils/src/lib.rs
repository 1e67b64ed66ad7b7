pub mod config;
pub mod consts;
pub mod errors;
pub mod geometry;
pub mod logging;
pub mod motion;
pub mod request;

pub use errors::{NudgeError, NudgeResult};
