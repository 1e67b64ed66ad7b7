// Nudge: dimension shrink
// Takes a fixed step off the width or height until it reaches zero.

use std::time::Duration;

use nudge_utils::consts::DEFAULT_TICK_INTERVAL;
use nudge_utils::geometry::{Axis, Field, RectState};
use nudge_utils::motion::MotionKind;

use super::engine::{AnimationFrame, StepAnimation};

pub struct DimensionShrink {
    kind: MotionKind,
    field: Field,
    step: i32,
    ticks: u32,
    tick_interval: Duration,
}

impl DimensionShrink {
    pub fn new(kind: MotionKind, axis: Axis, step: u32) -> Self {
        Self {
            kind,
            field: Field::dimension(axis),
            step: i32::try_from(step.max(1)).unwrap_or(i32::MAX),
            ticks: 0,
            tick_interval: DEFAULT_TICK_INTERVAL,
        }
    }

    pub fn with_tick_interval(mut self, tick_interval: Duration) -> Self {
        self.tick_interval = tick_interval;
        self
    }
}

impl StepAnimation for DimensionShrink {
    fn next_frame(&mut self, rect: &mut RectState) -> Option<AnimationFrame> {
        let current = self.field.get(rect);
        if current <= 0 {
            return None;
        }

        let next = current.saturating_sub(self.step).max(0);
        self.field.set(rect, next);
        self.ticks += 1;
        log::trace!("{} tick {}: {} = {}", self.kind, self.ticks, self.field, next);

        Some(AnimationFrame::new(*rect, self.field, self.ticks))
    }

    fn kind(&self) -> MotionKind {
        self.kind
    }

    fn step(&self) -> u32 {
        self.step as u32
    }

    fn ticks(&self) -> u32 {
        self.ticks
    }

    fn tick_interval(&self) -> Duration {
        self.tick_interval
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_shrink_horizontal_monotonic_to_zero() {
        let mut rect = RectState::new(100, 40);
        let mut shrink = DimensionShrink::new(MotionKind::ShrinkHorizontal, Axis::Horizontal, 2);

        let frames = shrink.run_to_end(&mut rect);

        assert_eq!(frames.len(), 50);
        assert_eq!(rect.width, 0);
        assert_eq!(rect.height, 40);
        let widths: Vec<i32> = frames.iter().map(|f| f.geometry.width).collect();
        assert!(widths.windows(2).all(|w| w[1] < w[0]));
        assert!(widths.iter().all(|w| *w >= 0));
    }

    #[test]
    fn test_last_step_floors_at_zero() {
        let mut rect = RectState::new(10, 25);
        let mut shrink = DimensionShrink::new(MotionKind::ShrinkVertical, Axis::Vertical, 10);

        let frames = shrink.run_to_end(&mut rect);

        let heights: Vec<i32> = frames.iter().map(|f| f.geometry.height).collect();
        assert_eq!(heights, vec![15, 5, 0]);
        assert_eq!(shrink.ticks(), 3);
    }

    #[test]
    fn test_already_empty_is_a_no_op() {
        let mut rect = RectState::new(0, 10);
        let mut shrink = DimensionShrink::new(MotionKind::ShrinkHorizontal, Axis::Horizontal, 3);

        assert!(shrink.next_frame(&mut rect).is_none());
        assert_eq!(rect, RectState::new(0, 10));
    }

    #[test]
    fn test_zero_step_still_progresses() {
        let shrink = DimensionShrink::new(MotionKind::ShrinkVertical, Axis::Vertical, 0);
        assert_eq!(shrink.step(), 1);
    }
}
