pub mod animation;
pub mod driver;

pub use driver::{
    AnimationDriver, Completion, CompletionHandle, DriverError, DriverEvent, DriverResult,
    DriverSnapshot, DriverState, Outcome, Redraw, RunId,
};
