// Nudge Driver - Worker Task
//
// Owns the live geometry. Runs as a single tokio task:
// - Idle: parked on the instruction channel
// - Running: select! over instructions and the next tick deadline
// - Stalled: a frame the renderer has no room for is held, and the run does
//   not advance until it is delivered; instructions are still served
// - Exits on Shutdown or when every handle has been dropped

use std::collections::VecDeque;
use std::ops::ControlFlow;

use log::{debug, info, trace, warn};
use tokio::sync::mpsc::error::TrySendError;
use tokio::sync::mpsc::{Sender, UnboundedReceiver};
use tokio::sync::oneshot;
use tokio::time::{sleep_until, Instant};

use nudge_utils::config::{DriverConfig, OverlapPolicy};
use nudge_utils::geometry::RectState;
use nudge_utils::request::AnimationRequest;

use super::error::{DriverError, DriverResult};
use super::types::{
    Completion, DriverEvent, DriverSnapshot, DriverState, Outcome, Redraw, RunId,
};
use crate::animation::{animation_for, StepAnimation};

/// Messages from `AnimationDriver` handles to the worker
#[derive(Debug)]
pub(crate) enum DriverInstruction {
    LayoutReady {
        width: i32,
        height: i32,
    },
    Configure {
        request: AnimationRequest,
        accepted: oneshot::Sender<DriverResult<RunId>>,
        done: oneshot::Sender<Completion>,
    },
    Reset,
    Cancel,
    Snapshot(oneshot::Sender<DriverSnapshot>),
    Shutdown(oneshot::Sender<()>),
}

struct ActiveRun {
    id: RunId,
    animation: Box<dyn StepAnimation>,
    done: oneshot::Sender<Completion>,
    next_tick: Instant,
}

struct PendingRun {
    id: RunId,
    request: AnimationRequest,
    done: oneshot::Sender<Completion>,
}

pub(crate) struct DriverWorker {
    config: DriverConfig,

    /// Live geometry, only ever touched from this task
    geometry: RectState,

    /// Reset target: construction geometry, resized once by the first layout
    original: RectState,

    /// Whether the first layout notification has been seen
    measured: bool,

    active: Option<ActiveRun>,
    queue: VecDeque<PendingRun>,
    next_run: u64,

    events: Sender<DriverEvent>,

    /// Frame waiting for room in the render channel
    held: Option<Redraw>,

    /// Cleared the first time the renderer's receiver is found closed
    render_open: bool,
}

enum Wake {
    Instruction(Option<DriverInstruction>),
    Delivered(Redraw),
    RenderClosed,
    Tick,
}

impl DriverWorker {
    pub(crate) fn new(initial: RectState, config: DriverConfig, events: Sender<DriverEvent>) -> Self {
        Self {
            config,
            geometry: initial,
            original: initial,
            measured: false,
            active: None,
            queue: VecDeque::new(),
            next_run: 1,
            events,
            held: None,
            render_open: true,
        }
    }

    pub(crate) async fn run(mut self, mut instructions: UnboundedReceiver<DriverInstruction>) {
        info!(
            "Animation driver started (tick {:?}, overlap {})",
            self.config.tick_interval, self.config.overlap
        );

        loop {
            // No new step while a frame is still waiting for the renderer
            let deadline = match (&self.active, &self.held) {
                (Some(run), None) => Some(run.next_tick),
                _ => None,
            };
            let held = self.held;

            let wake = tokio::select! {
                // Instructions first so cancel/shutdown land before the next step
                biased;

                instruction = instructions.recv() => Wake::Instruction(instruction),

                permit = self.events.reserve(), if held.is_some() => match (permit, held) {
                    (Ok(permit), Some(redraw)) => {
                        permit.send(DriverEvent::Redraw(redraw));
                        Wake::Delivered(redraw)
                    }
                    (Ok(_), None) => continue,
                    (Err(_), _) => Wake::RenderClosed,
                },

                _ = sleep_until(deadline.unwrap_or_else(Instant::now)), if deadline.is_some() => {
                    Wake::Tick
                }
            };

            match wake {
                Wake::Instruction(None) => {
                    debug!("All driver handles dropped, stopping");
                    self.stop(None);
                    return;
                }
                Wake::Instruction(Some(instruction)) => {
                    if self.handle(instruction).is_break() {
                        return;
                    }
                }
                Wake::Delivered(redraw) => {
                    trace!("Delivered held frame (tick {})", redraw.tick);
                    self.held = None;
                    self.schedule_after(redraw);
                }
                Wake::RenderClosed => {
                    warn!("Render channel closed, continuing without redraws");
                    self.render_open = false;
                    if let Some(redraw) = self.held.take() {
                        self.schedule_after(redraw);
                    }
                }
                Wake::Tick => self.tick(),
            }
        }
    }

    fn handle(&mut self, instruction: DriverInstruction) -> ControlFlow<()> {
        match instruction {
            DriverInstruction::LayoutReady { width, height } => self.layout_ready(width, height),
            DriverInstruction::Configure {
                request,
                accepted,
                done,
            } => self.configure(request, accepted, done),
            DriverInstruction::Reset => self.reset(),
            DriverInstruction::Cancel => self.cancel_all(Outcome::Cancelled),
            DriverInstruction::Snapshot(reply) => {
                let _ = reply.send(self.snapshot());
            }
            DriverInstruction::Shutdown(ack) => {
                self.stop(Some(ack));
                return ControlFlow::Break(());
            }
        }
        ControlFlow::Continue(())
    }

    fn layout_ready(&mut self, width: i32, height: i32) {
        if self.measured {
            debug!(
                "Ignoring layout notification ({}x{}), original geometry already captured",
                width, height
            );
            return;
        }
        self.measured = true;
        self.original = self.original.with_size(width, height);
        self.geometry = self.geometry.with_size(width, height);
        info!("Captured original geometry: {}", self.original);
    }

    fn configure(
        &mut self,
        request: AnimationRequest,
        accepted: oneshot::Sender<DriverResult<RunId>>,
        done: oneshot::Sender<Completion>,
    ) {
        if let Some(active) = self.active.as_ref().map(|run| run.id) {
            match self.config.overlap {
                OverlapPolicy::Reject => {
                    warn!(
                        "Rejecting {} request, {} is still running",
                        request.kind(),
                        active
                    );
                    let _ = accepted.send(Err(DriverError::Busy { active }));
                    return;
                }
                OverlapPolicy::Preempt => self.finish_active(Outcome::Preempted),
                OverlapPolicy::Queue => {
                    let id = self.next_run_id();
                    debug!(
                        "Queueing {} {} behind {} ({} already waiting)",
                        id,
                        request.kind(),
                        active,
                        self.queue.len()
                    );
                    self.queue.push_back(PendingRun { id, request, done });
                    let _ = accepted.send(Ok(id));
                    return;
                }
            }
        }

        let id = self.next_run_id();
        if accepted.send(Ok(id)).is_err() {
            debug!("Caller of {} went away before acceptance, running it anyway", id);
        }
        self.start(PendingRun { id, request, done });
    }

    fn start(&mut self, pending: PendingRun) {
        let animation = animation_for(&pending.request, &self.geometry, self.config.tick_interval);
        info!(
            "Starting {} {}: {}px over {:?} (step {}px)",
            pending.id,
            pending.request.kind(),
            pending.request.displacement(),
            pending.request.duration(),
            animation.step()
        );
        self.active = Some(ActiveRun {
            id: pending.id,
            animation,
            done: pending.done,
            // first step runs right away
            next_tick: Instant::now(),
        });
    }

    fn tick(&mut self) {
        let Some(active) = self.active.as_mut() else {
            return;
        };

        match active.animation.next_frame(&mut self.geometry) {
            Some(frame) => {
                let redraw = Redraw {
                    run: Some(active.id),
                    tick: frame.tick,
                    geometry: frame.geometry,
                };
                trace!(
                    "{} tick {}: {} -> {}",
                    active.id,
                    frame.tick,
                    frame.changed,
                    frame.geometry
                );

                if self.publish(redraw) {
                    self.schedule_after(redraw);
                }
            }
            None => {
                self.finish_active(Outcome::Finished);
                if let Some(next) = self.queue.pop_front() {
                    self.start(next);
                }
            }
        }
    }

    /// Next step of the run that produced `redraw` is due one tick from now
    fn schedule_after(&mut self, redraw: Redraw) {
        if let Some(active) = self.active.as_mut() {
            if redraw.run == Some(active.id) {
                let interval = active.animation.tick_interval();
                active.next_tick = Instant::now() + interval;
            }
        }
    }

    fn reset(&mut self) {
        self.cancel_all(Outcome::Cancelled);
        self.geometry = self.original;
        debug!("Reset geometry to {}", self.geometry);
        self.publish(Redraw {
            run: None,
            tick: 0,
            geometry: self.geometry,
        });
    }

    /// Hand `redraw` to the renderer without waiting.
    ///
    /// Returns false when the channel is full: the frame is held and the run
    /// loop delivers it once there is room. A held frame is only ever
    /// replaced by a reset, whose geometry supersedes it.
    fn publish(&mut self, redraw: Redraw) -> bool {
        if !self.render_open {
            return true;
        }
        if let Some(stale) = self.held.replace(redraw) {
            debug!("Replacing undelivered frame (tick {}) with reset", stale.tick);
            return false;
        }
        match self.events.try_send(DriverEvent::Redraw(redraw)) {
            Ok(()) => {
                self.held = None;
                true
            }
            Err(TrySendError::Full(_)) => {
                debug!("Render channel full, holding frame (tick {})", redraw.tick);
                false
            }
            Err(TrySendError::Closed(_)) => {
                warn!("Render channel closed, continuing without redraws");
                self.held = None;
                self.render_open = false;
                true
            }
        }
    }

    fn finish_active(&mut self, outcome: Outcome) {
        let Some(run) = self.active.take() else {
            return;
        };
        let completion = Completion {
            run: run.id,
            kind: run.animation.kind(),
            outcome,
            ticks: run.animation.ticks(),
            geometry: self.geometry,
        };
        info!(
            "{} {} {} after {} ticks",
            run.id, completion.kind, outcome, completion.ticks
        );
        if run.done.send(completion).is_err() {
            debug!("Completion receiver for {} dropped", run.id);
        }
    }

    /// End the active run and every queued one with `outcome`
    fn cancel_all(&mut self, outcome: Outcome) {
        self.finish_active(outcome);
        for pending in self.queue.drain(..) {
            let completion = Completion {
                run: pending.id,
                kind: pending.request.kind(),
                outcome,
                ticks: 0,
                geometry: self.geometry,
            };
            if pending.done.send(completion).is_err() {
                debug!("Completion receiver for queued {} dropped", pending.id);
            }
        }
    }

    fn snapshot(&self) -> DriverSnapshot {
        let state = match &self.active {
            Some(run) => DriverState::Running {
                run: run.id,
                kind: run.animation.kind(),
            },
            None => DriverState::Idle,
        };
        DriverSnapshot {
            state,
            geometry: self.geometry,
            original: self.original,
            queued: self.queue.len(),
        }
    }

    fn stop(&mut self, ack: Option<oneshot::Sender<()>>) {
        self.cancel_all(Outcome::Shutdown);
        if let Some(redraw) = self.held.take() {
            debug!("Dropping undelivered frame (tick {}) on shutdown", redraw.tick);
        }
        // try_send: a renderer that stopped reading must not block shutdown
        if self.render_open && self.events.try_send(DriverEvent::Stopped).is_err() {
            debug!("Could not deliver stop event to renderer");
        }
        info!("Animation driver stopped");
        if let Some(ack) = ack {
            let _ = ack.send(());
        }
    }

    fn next_run_id(&mut self) -> RunId {
        let id = RunId(self.next_run);
        self.next_run += 1;
        id
    }
}
