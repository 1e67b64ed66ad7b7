// Nudge Recording View
//
// TargetView that renders nothing and remembers everything, for tests and
// headless embedding. Clones share state, so a clone kept by the test sees
// what the controller did with the view it was handed.

use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};

use nudge_utils::geometry::RectState;

use crate::view::TargetView;

/// Recording view for driving a controller without a terminal.
///
/// # Example
///
/// ```ignore
/// let view = RecordingView::new(RectState::new(100, 300));
/// let recorded = view.clone();
/// let mut controller = AnimationController::spawn(view, &DriverConfig::default(), duration)?;
/// controller.press(Button::Up).await?;
/// controller.run_until_complete().await?;
/// assert_eq!(recorded.history().len(), 61);
/// ```
#[derive(Debug, Clone)]
pub struct RecordingView {
    /// Geometry as last set by the controller
    geometry: Arc<Mutex<RectState>>,

    /// Every geometry passed to `set_layout_geometry`, oldest first
    history: Arc<Mutex<Vec<RectState>>>,

    /// Count of `request_redraw()` invocations
    redraw_count: Arc<AtomicUsize>,
}

impl RecordingView {
    pub fn new(geometry: RectState) -> Self {
        Self {
            geometry: Arc::new(Mutex::new(geometry)),
            history: Arc::new(Mutex::new(Vec::new())),
            redraw_count: Arc::new(AtomicUsize::new(0)),
        }
    }

    /// Geometry currently applied to the view
    pub fn current(&self) -> RectState {
        *lock(&self.geometry)
    }

    pub fn history(&self) -> Vec<RectState> {
        lock(&self.history).clone()
    }

    pub fn redraw_count(&self) -> usize {
        self.redraw_count.load(Ordering::Relaxed)
    }

    /// Forget recorded geometries and redraws, keep the current geometry
    pub fn clear(&self) {
        lock(&self.history).clear();
        self.redraw_count.store(0, Ordering::Relaxed);
    }
}

impl TargetView for RecordingView {
    fn width(&self) -> i32 {
        self.current().width
    }

    fn height(&self) -> i32 {
        self.current().height
    }

    fn layout_geometry(&self) -> RectState {
        self.current()
    }

    fn set_layout_geometry(&mut self, geometry: RectState) {
        *lock(&self.geometry) = geometry;
        lock(&self.history).push(geometry);
    }

    fn request_redraw(&mut self) {
        self.redraw_count.fetch_add(1, Ordering::Relaxed);
    }
}

// A panicking test thread must not hide what was recorded before it
fn lock<T>(mutex: &Mutex<T>) -> MutexGuard<'_, T> {
    mutex.lock().unwrap_or_else(PoisonError::into_inner)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_records_geometry_and_redraws() {
        let mut view = RecordingView::new(RectState::new(10, 20));
        let recorded = view.clone();

        view.set_layout_geometry(RectState::new(5, 20));
        view.request_redraw();
        view.set_layout_geometry(RectState::new(0, 20));
        view.request_redraw();

        assert_eq!(recorded.current(), RectState::new(0, 20));
        assert_eq!(recorded.width(), 0);
        assert_eq!(recorded.height(), 20);
        assert_eq!(
            recorded.history(),
            vec![RectState::new(5, 20), RectState::new(0, 20)]
        );
        assert_eq!(recorded.redraw_count(), 2);
    }

    #[test]
    fn test_clear() {
        let mut view = RecordingView::new(RectState::new(10, 20));
        view.set_layout_geometry(RectState::new(1, 1));
        view.request_redraw();

        view.clear();

        assert!(view.history().is_empty());
        assert_eq!(view.redraw_count(), 0);
        assert_eq!(view.current(), RectState::new(1, 1));
    }
}
