pub mod buttons;
pub mod controller;
pub mod errors;
pub mod recording;
pub mod terminal;
pub mod view;

pub use buttons::{Button, ButtonPanel};
pub use controller::{AnimationController, ControllerEvent};
pub use errors::{ClientError, ClientResult};
pub use recording::RecordingView;
pub use terminal::TerminalView;
pub use view::{ReadyOnce, TargetView};

#[cfg(test)]
#[path = "unit/controller_tests.rs"]
mod controller_tests;
