// Nudge Driver - message types
//
// Everything that crosses the boundary between the driver task and its
// callers. All geometry here is a copy; the live state never leaves the task.

use std::fmt;

use nudge_utils::geometry::RectState;
use nudge_utils::motion::MotionKind;

/// Identifier of one accepted `configure` call, unique per driver
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct RunId(pub u64);

impl fmt::Display for RunId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "run#{}", self.0)
    }
}

/// How a run ended
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Outcome {
    /// Target displacement reached
    Finished,
    /// Replaced by a newer request (overlap policy `Preempt`)
    Preempted,
    /// Stopped by `cancel` or `reset`
    Cancelled,
    /// Driver shut down before the run could finish
    Shutdown,
}

impl fmt::Display for Outcome {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Outcome::Finished => write!(f, "finished"),
            Outcome::Preempted => write!(f, "preempted"),
            Outcome::Cancelled => write!(f, "cancelled"),
            Outcome::Shutdown => write!(f, "shutdown"),
        }
    }
}

/// Delivered once per accepted request, after its last redraw
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Completion {
    pub run: RunId,
    pub kind: MotionKind,
    pub outcome: Outcome,
    /// Steps applied before the run ended
    pub ticks: u32,
    /// Geometry when the run ended
    pub geometry: RectState,
}

/// Geometry snapshot the renderer should apply
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Redraw {
    /// None for redraws caused by `reset`
    pub run: Option<RunId>,
    /// Step number within the run, 0 for resets
    pub tick: u32,
    pub geometry: RectState,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DriverEvent {
    Redraw(Redraw),
    /// Last event before the driver task exits
    Stopped,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DriverState {
    Idle,
    Running { run: RunId, kind: MotionKind },
}

/// Point-in-time view of the driver, answered between ticks
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DriverSnapshot {
    pub state: DriverState,
    pub geometry: RectState,
    pub original: RectState,
    /// Requests accepted under `Queue` and not yet started
    pub queued: usize,
}

impl DriverSnapshot {
    pub fn is_idle(&self) -> bool {
        self.state == DriverState::Idle
    }
}
