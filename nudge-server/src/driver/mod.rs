// Nudge Animation Driver
//
// Background task that owns the animated element's geometry and advances it
// one step per tick. It handles:
//
// - Idle/Running state, driven by select! over instructions and a tick deadline
// - Redraw snapshots over a bounded channel to whoever renders
// - One completion handle per accepted request
// - Overlapping requests per `OverlapPolicy` (reject, preempt, queue)
// - Reset, cancel and shutdown
//
// # Architecture
//
// ```text
//  Controller (UI side)                 Driver task
//  ┌──────────────────┐  instructions  ┌──────────────┐
//  │ AnimationDriver  │ ─────────────► │ DriverWorker │ ── owns RectState
//  └──────────────────┘                └──────────────┘
//          ▲   ▲            redraws           │
//          │   └──────────────────────────────┤ (mpsc, bounded)
//          │          completion              │
//          └──────────────────────────────────┘ (oneshot per run)
// ```
//
// # Usage
//
// ```ignore
// let (driver, mut events) = AnimationDriver::spawn(initial, DriverConfig::default())?;
// driver.layout_ready(120, 80)?;
// let done = driver.configure(AnimationRequest::from_secs(MotionKind::MoveUp, 80, 1.5)?).await?;
// while let Some(DriverEvent::Redraw(redraw)) = events.recv().await { /* render */ }
// let completion = done.await?;
// ```

mod error;
mod handle;
mod types;
mod worker;

pub use error::{DriverError, DriverResult};
pub use handle::{AnimationDriver, CompletionHandle};
pub use types::{Completion, DriverEvent, DriverSnapshot, DriverState, Outcome, Redraw, RunId};

#[cfg(test)]
#[path = "../unit/driver_tests.rs"]
mod driver_tests;
