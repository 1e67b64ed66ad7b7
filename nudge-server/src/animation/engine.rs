// Nudge: StepAnimation trait and core types
use std::time::Duration;

use nudge_utils::geometry::{Field, RectState};
use nudge_utils::motion::{Motion, MotionKind};
use nudge_utils::request::AnimationRequest;

use super::shrink::DimensionShrink;
use super::slide::MarginSlide;

/// Geometry after one step, ready to be handed to the renderer
#[derive(Debug, Clone)]
pub struct AnimationFrame {
    /// Full snapshot of the element after this step
    pub geometry: RectState,
    /// The value this step wrote
    pub changed: Field,
    /// 1-based step number within the run
    pub tick: u32,
}

impl AnimationFrame {
    pub fn new(geometry: RectState, changed: Field, tick: u32) -> Self {
        Self {
            geometry,
            changed,
            tick,
        }
    }
}

/// Fixed-step animation over a single `RectState` field.
///
/// The animation does not own the geometry: every call to `next_frame`
/// mutates the state passed in, so whoever owns the state decides when a
/// step happens.
pub trait StepAnimation: Send {
    /// Apply the next step to `rect`.
    /// Returns None once the target has been reached; `rect` is then untouched.
    fn next_frame(&mut self, rect: &mut RectState) -> Option<AnimationFrame>;

    fn kind(&self) -> MotionKind;

    /// Pixels applied per step
    fn step(&self) -> u32;

    /// Steps applied so far
    fn ticks(&self) -> u32;

    /// Pause the owner should wait between two steps
    fn tick_interval(&self) -> Duration;

    /// Apply every remaining step at once, without waiting
    #[cfg(test)]
    fn run_to_end(&mut self, rect: &mut RectState) -> Vec<AnimationFrame> {
        std::iter::from_fn(|| self.next_frame(rect)).collect()
    }
}

/// Build the animation for `request`, starting from the current geometry
pub fn animation_for(
    request: &AnimationRequest,
    start: &RectState,
    tick_interval: Duration,
) -> Box<dyn StepAnimation> {
    let step = request.step(tick_interval);
    match request.kind().motion() {
        Motion::Slide { axis, direction } => Box::new(
            MarginSlide::new(
                request.kind(),
                axis,
                direction,
                Field::margin(axis).get(start),
                request.displacement(),
                step,
            )
            .with_tick_interval(tick_interval),
        ),
        Motion::Shrink { axis } => Box::new(
            DimensionShrink::new(request.kind(), axis, step).with_tick_interval(tick_interval),
        ),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const TICK: Duration = Duration::from_millis(25);

    #[test]
    fn test_run_to_end_default() {
        struct Countdown(u32);
        impl StepAnimation for Countdown {
            fn next_frame(&mut self, rect: &mut RectState) -> Option<AnimationFrame> {
                if self.0 == 0 {
                    return None;
                }
                self.0 -= 1;
                rect.width += 1;
                Some(AnimationFrame::new(*rect, Field::Width, 3 - self.0))
            }
            fn kind(&self) -> MotionKind {
                MotionKind::ShrinkHorizontal
            }
            fn step(&self) -> u32 {
                1
            }
            fn ticks(&self) -> u32 {
                3 - self.0
            }
            fn tick_interval(&self) -> Duration {
                TICK
            }
        }

        let mut rect = RectState::default();
        let frames = Countdown(3).run_to_end(&mut rect);
        assert_eq!(frames.len(), 3);
        assert_eq!(rect.width, 3);
        assert_eq!(frames.last().map(|f| f.tick), Some(3));
    }

    #[test]
    fn test_animation_for_picks_field() {
        let start = RectState::new(100, 50).with_margins(10, 0, 20, 0);

        let request = AnimationRequest::new(MotionKind::MoveLeft, 100, TICK * 4).unwrap();
        let mut rect = start;
        let frame = animation_for(&request, &start, TICK)
            .next_frame(&mut rect)
            .unwrap();
        assert_eq!(frame.changed, Field::LeftMargin);
        assert_eq!(rect.left_margin, 20 - 25);

        let request = AnimationRequest::new(MotionKind::ShrinkVertical, 50, TICK * 5).unwrap();
        let mut rect = start;
        let frame = animation_for(&request, &start, TICK)
            .next_frame(&mut rect)
            .unwrap();
        assert_eq!(frame.changed, Field::Height);
        assert_eq!(rect.height, 40);
    }

    #[test]
    fn test_frame_carries_snapshot() {
        let start = RectState::new(10, 10);
        let request = AnimationRequest::new(MotionKind::MoveDown, 10, TICK * 2).unwrap();
        let mut rect = start;
        let mut animation = animation_for(&request, &start, TICK);

        let frame = animation.next_frame(&mut rect).unwrap();
        assert_eq!(frame.geometry, rect);
        assert_eq!(frame.tick, 1);
        assert_eq!(animation.ticks(), 1);
        assert_eq!(animation.step(), 5);
        assert_eq!(animation.kind(), MotionKind::MoveDown);
    }
}
