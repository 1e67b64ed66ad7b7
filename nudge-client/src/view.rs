// Nudge Target View
//
// What the controller needs from the host UI: read the element's size and
// layout box, write a new layout box, ask for a redraw.

use nudge_utils::geometry::RectState;

/// The element being animated, as seen by the controller.
///
/// Implementations live on the rendering side; the controller only calls
/// them from its own task.
pub trait TargetView {
    /// Current rendered width in pixels
    fn width(&self) -> i32;

    /// Current rendered height in pixels
    fn height(&self) -> i32;

    fn layout_geometry(&self) -> RectState;

    fn set_layout_geometry(&mut self, geometry: RectState);

    /// Schedule a re-layout/re-render pass
    fn request_redraw(&mut self);
}

/// One-shot latch for the "layout is ready" notification
#[derive(Debug, Default)]
pub struct ReadyOnce {
    fired: bool,
}

impl ReadyOnce {
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns the measured size the first time it is called, None afterwards
    pub fn fire<V: TargetView + ?Sized>(&mut self, view: &V) -> Option<(i32, i32)> {
        if self.fired {
            return None;
        }
        self.fired = true;
        Some((view.width(), view.height()))
    }
}
