// Nudge Animation Controller
//
// UI-side owner of the target view. Turns button presses into driver
// requests, applies the redraws that come back, and puts the element back
// where it started once a run completes.
//
// The controller never blocks on the driver: callers pump it with
// `next_event()` (or `run_until_complete()`) from their own task.

use std::time::Duration;

use log::{debug, info, warn};
use tokio::sync::mpsc::Receiver;

use nudge_server::{
    AnimationDriver, Completion, CompletionHandle, DriverError, DriverEvent, DriverResult,
    DriverSnapshot, Outcome, Redraw,
};
use nudge_utils::config::DriverConfig;
use nudge_utils::errors::NudgeError;
use nudge_utils::geometry::{Axis, RectState};
use nudge_utils::motion::MotionKind;
use nudge_utils::request::AnimationRequest;

use crate::buttons::{Button, ButtonPanel};
use crate::errors::{ClientError, ClientResult};
use crate::view::{ReadyOnce, TargetView};

/// What `next_event` did
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ControllerEvent {
    /// A redraw was applied to the view
    Redrawn(Redraw),
    /// A run ended; the view has been reset and the buttons re-enabled
    Completed(Completion),
    /// The driver is gone and will not send anything else
    DriverStopped,
}

enum Wake {
    Event(Option<DriverEvent>),
    Done(DriverResult<Completion>),
    Closed,
}

pub struct AnimationController<V: TargetView> {
    view: V,
    driver: AnimationDriver,
    events: Receiver<DriverEvent>,
    events_open: bool,
    buttons: ButtonPanel,
    /// Duration of button-triggered animations
    duration: Duration,
    ready: ReadyOnce,
    pending: Option<CompletionHandle>,
}

impl<V: TargetView> AnimationController<V> {
    /// Wrap an already spawned driver
    pub fn new(
        view: V,
        driver: AnimationDriver,
        events: Receiver<DriverEvent>,
        duration: Duration,
    ) -> Self {
        Self {
            view,
            driver,
            events,
            events_open: true,
            buttons: ButtonPanel::new(),
            duration,
            ready: ReadyOnce::new(),
            pending: None,
        }
    }

    /// Spawn a driver seeded with the view's current layout and wrap it
    pub fn spawn(view: V, config: &DriverConfig, duration: Duration) -> ClientResult<Self> {
        if duration.is_zero() {
            let err = NudgeError::InvalidDuration("duration must be positive".to_string());
            return Err(err.into());
        }
        let (driver, events) = AnimationDriver::spawn(view.layout_geometry(), config.clone())?;
        Ok(Self::new(view, driver, events, duration))
    }

    /// Call from the view's layout pass. Only the first call reaches the driver.
    pub fn on_layout(&mut self) -> ClientResult<()> {
        if let Some((width, height)) = self.ready.fire(&self.view) {
            debug!("Layout ready, element measured at {}x{}", width, height);
            self.driver.layout_ready(width, height)?;
        }
        Ok(())
    }

    /// Handle a button press.
    ///
    /// Returns `Ok(false)` when the press was ignored because the button is
    /// disabled (an animation is in flight).
    pub async fn press(&mut self, button: Button) -> ClientResult<bool> {
        if !self.buttons.is_enabled(button) {
            debug!("Ignoring {} press, animation in progress", button);
            return Ok(false);
        }
        self.trigger(button.motion_kind()).await
    }

    /// Start `kind` over the view's current height (vertical kinds) or
    /// width (horizontal kinds), using the configured duration
    pub async fn trigger(&mut self, kind: MotionKind) -> ClientResult<bool> {
        let displacement = match kind.axis() {
            Axis::Vertical => self.view.height(),
            Axis::Horizontal => self.view.width(),
        };
        let displacement = u32::try_from(displacement).unwrap_or(0);
        self.trigger_with(kind, displacement, self.duration).await
    }

    pub async fn trigger_with(
        &mut self,
        kind: MotionKind,
        displacement: u32,
        duration: Duration,
    ) -> ClientResult<bool> {
        if self.pending.is_some() {
            debug!("Ignoring {} trigger, animation in progress", kind);
            return Ok(false);
        }
        let request = AnimationRequest::new(kind, displacement, duration)?;

        self.buttons.set_enabled(false);
        match self.driver.configure(request).await {
            Ok(handle) => {
                info!(
                    "Triggered {} {} ({}px over {:?})",
                    handle.run(),
                    kind,
                    displacement,
                    duration
                );
                self.pending = Some(handle);
                Ok(true)
            }
            Err(err) => {
                self.buttons.set_enabled(true);
                Err(err.into())
            }
        }
    }

    /// Wait for the next thing the driver does and apply it to the view.
    ///
    /// Buffered redraws always win over a completion, so the last frame of a
    /// run is applied before the reset.
    pub async fn next_event(&mut self) -> ClientResult<ControllerEvent> {
        let wake = tokio::select! {
            biased;

            event = self.events.recv(), if self.events_open => Wake::Event(event),
            done = wait_pending(&mut self.pending), if self.pending.is_some() => Wake::Done(done),
            else => Wake::Closed,
        };

        match wake {
            Wake::Event(Some(DriverEvent::Redraw(redraw))) => {
                self.apply(redraw.geometry);
                Ok(ControllerEvent::Redrawn(redraw))
            }
            Wake::Event(Some(DriverEvent::Stopped)) => {
                debug!("Driver reported stop");
                Ok(ControllerEvent::DriverStopped)
            }
            Wake::Event(None) => {
                self.events_open = false;
                Ok(ControllerEvent::DriverStopped)
            }
            Wake::Done(done) => {
                self.pending = None;
                let completion = done?;
                self.complete(&completion).await?;
                Ok(ControllerEvent::Completed(completion))
            }
            Wake::Closed => Ok(ControllerEvent::DriverStopped),
        }
    }

    /// Pump events until the in-flight run completes
    ///
    /// # Errors
    ///
    /// `ClientError::Idle` if nothing was triggered.
    pub async fn run_until_complete(&mut self) -> ClientResult<Completion> {
        if self.pending.is_none() {
            return Err(ClientError::Idle);
        }
        loop {
            match self.next_event().await? {
                ControllerEvent::Completed(completion) => return Ok(completion),
                ControllerEvent::Redrawn(_) => {}
                ControllerEvent::DriverStopped => {
                    if self.pending.is_none() {
                        return Err(DriverError::Stopped.into());
                    }
                }
            }
        }
    }

    /// Stop the driver and hand the view back
    pub async fn shutdown(mut self) -> ClientResult<V> {
        self.driver.shutdown().await?;
        if let Some(pending) = self.pending.take() {
            if let Ok(completion) = pending.await {
                debug!("{} ended by shutdown ({})", completion.run, completion.outcome);
            }
        }
        Ok(self.view)
    }

    pub async fn snapshot(&self) -> ClientResult<DriverSnapshot> {
        Ok(self.driver.snapshot().await?)
    }

    pub fn is_animating(&self) -> bool {
        self.pending.is_some()
    }

    pub fn buttons(&self) -> &ButtonPanel {
        &self.buttons
    }

    pub fn view(&self) -> &V {
        &self.view
    }

    pub fn view_mut(&mut self) -> &mut V {
        &mut self.view
    }

    async fn complete(&mut self, completion: &Completion) -> ClientResult<()> {
        if completion.outcome == Outcome::Shutdown {
            warn!("{} ended by driver shutdown, not resetting", completion.run);
            return Ok(());
        }

        self.driver.reset()?;
        // Answered after the reset, so the reset redraw is already buffered;
        // take it here so the same geometry is not applied twice
        let snapshot = self.driver.snapshot().await?;
        match self.events.try_recv() {
            Ok(DriverEvent::Redraw(redraw)) if redraw.run.is_none() => {}
            Ok(other) => warn!("Unexpected driver event after reset: {:?}", other),
            Err(_) => debug!("Reset redraw not buffered"),
        }
        self.apply(snapshot.geometry);
        self.buttons.set_enabled(true);
        Ok(())
    }

    fn apply(&mut self, geometry: RectState) {
        self.view.set_layout_geometry(geometry);
        self.view.request_redraw();
    }
}

// Never resolves when nothing is pending; select! still builds the future for
// disabled branches
async fn wait_pending(pending: &mut Option<CompletionHandle>) -> DriverResult<Completion> {
    match pending.as_mut() {
        Some(handle) => handle.await,
        None => std::future::pending().await,
    }
}
