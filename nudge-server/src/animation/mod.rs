// Nudge Animation Engine
// Fixed-step animations the driver advances once per tick

pub mod engine;
pub mod shrink;
pub mod slide;

pub use engine::{animation_for, AnimationFrame, StepAnimation};
pub use shrink::DimensionShrink;
pub use slide::MarginSlide;
