// Nudge Driver - Handle
//
// Cheap, cloneable front end to the worker task. Every method is a message
// on the instruction channel; methods that need an answer wait on a oneshot.

use std::future::Future;
use std::pin::Pin;
use std::task::{Context, Poll};

use tokio::sync::mpsc::{self, Receiver, UnboundedSender};
use tokio::sync::oneshot;

use nudge_utils::config::DriverConfig;
use nudge_utils::geometry::RectState;
use nudge_utils::request::AnimationRequest;

use super::error::{DriverError, DriverResult};
use super::types::{Completion, DriverEvent, DriverSnapshot, RunId};
use super::worker::{DriverInstruction, DriverWorker};

/// Handle to a running animation driver.
///
/// Dropping the last handle stops the driver; outstanding runs resolve with
/// `Outcome::Shutdown`.
#[derive(Debug, Clone)]
pub struct AnimationDriver {
    instructions: UnboundedSender<DriverInstruction>,
}

impl AnimationDriver {
    /// Start the driver task on the current tokio runtime.
    ///
    /// `initial` is both the starting geometry and the reset target (until
    /// `layout_ready` fills in the measured size).
    ///
    /// # Returns
    ///
    /// The handle plus the receiver the renderer reads redraws from. The
    /// receiver is bounded by `config.event_capacity`.
    pub fn spawn(
        initial: RectState,
        config: DriverConfig,
    ) -> DriverResult<(Self, Receiver<DriverEvent>)> {
        config.validate()?;

        let (instructions_tx, instructions_rx) = mpsc::unbounded_channel();
        let (events_tx, events_rx) = mpsc::channel(config.event_capacity);

        let worker = DriverWorker::new(initial, config, events_tx);
        tokio::spawn(worker.run(instructions_rx));

        Ok((
            Self {
                instructions: instructions_tx,
            },
            events_rx,
        ))
    }

    /// Report the measured size of the element.
    /// Only the first call is recorded into the original geometry.
    pub fn layout_ready(&self, width: i32, height: i32) -> DriverResult<()> {
        self.send(DriverInstruction::LayoutReady { width, height })
    }

    /// Begin an animation from the current geometry.
    ///
    /// Resolves once the driver has accepted (or rejected) the request; the
    /// returned handle resolves when the run ends.
    ///
    /// # Errors
    ///
    /// * `DriverError::Busy` - another run is active and the overlap policy is `Reject`
    /// * `DriverError::Stopped` - the driver has shut down
    pub async fn configure(&self, request: AnimationRequest) -> DriverResult<CompletionHandle> {
        let (accepted_tx, accepted_rx) = oneshot::channel();
        let (done_tx, done_rx) = oneshot::channel();

        self.send(DriverInstruction::Configure {
            request,
            accepted: accepted_tx,
            done: done_tx,
        })?;

        let run = accepted_rx.await??;
        Ok(CompletionHandle { run, done: done_rx })
    }

    /// Cancel any active or queued run and snap back to the original geometry.
    /// Publishes one redraw. Safe to call while idle.
    pub fn reset(&self) -> DriverResult<()> {
        self.send(DriverInstruction::Reset)
    }

    /// Stop the active run and drop queued ones, leaving the geometry where it is
    pub fn cancel(&self) -> DriverResult<()> {
        self.send(DriverInstruction::Cancel)
    }

    pub async fn snapshot(&self) -> DriverResult<DriverSnapshot> {
        let (reply_tx, reply_rx) = oneshot::channel();
        self.send(DriverInstruction::Snapshot(reply_tx))?;
        Ok(reply_rx.await?)
    }

    /// Stop the driver task and wait until it has exited.
    ///
    /// Idempotent: calling it on a driver that already stopped is a no-op.
    pub async fn shutdown(&self) -> DriverResult<()> {
        let (ack_tx, ack_rx) = oneshot::channel();
        if self.send(DriverInstruction::Shutdown(ack_tx)).is_err() {
            return Ok(());
        }
        // A concurrent shutdown may win the race and drop our ack
        let _ = ack_rx.await;
        Ok(())
    }

    /// Whether the driver task is still accepting instructions
    pub fn is_running(&self) -> bool {
        !self.instructions.is_closed()
    }

    fn send(&self, instruction: DriverInstruction) -> DriverResult<()> {
        self.instructions.send(instruction)?;
        Ok(())
    }
}

/// Resolves with the `Completion` of one accepted run.
///
/// Await it directly, or poll it by `&mut` from a `select!`. Dropping it
/// does not cancel the run.
#[derive(Debug)]
pub struct CompletionHandle {
    run: RunId,
    done: oneshot::Receiver<Completion>,
}

impl CompletionHandle {
    pub fn run(&self) -> RunId {
        self.run
    }
}

impl Future for CompletionHandle {
    type Output = DriverResult<Completion>;

    fn poll(mut self: Pin<&mut Self>, cx: &mut Context<'_>) -> Poll<Self::Output> {
        Pin::new(&mut self.done).poll(cx).map_err(DriverError::from)
    }
}
