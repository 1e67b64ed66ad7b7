// Nudge: margin slide
// Moves the top or left margin by a fixed step until it is exactly
// `displacement` pixels away from where the run started.

use std::time::Duration;

use nudge_utils::consts::DEFAULT_TICK_INTERVAL;
use nudge_utils::geometry::{Axis, Field, RectState};
use nudge_utils::motion::{Direction, MotionKind};

use super::engine::{AnimationFrame, StepAnimation};

pub struct MarginSlide {
    kind: MotionKind,
    /// Top margin for vertical slides, left margin for horizontal ones
    field: Field,
    direction: Direction,
    /// Margin value when the run started
    start: i64,
    displacement: i64,
    step: i64,
    ticks: u32,
    tick_interval: Duration,
}

impl MarginSlide {
    pub fn new(
        kind: MotionKind,
        axis: Axis,
        direction: Direction,
        start: i32,
        displacement: u32,
        step: u32,
    ) -> Self {
        Self {
            kind,
            field: Field::margin(axis),
            direction,
            start: start as i64,
            displacement: displacement as i64,
            step: step.max(1) as i64,
            ticks: 0,
            tick_interval: DEFAULT_TICK_INTERVAL,
        }
    }

    pub fn with_tick_interval(mut self, tick_interval: Duration) -> Self {
        self.tick_interval = tick_interval;
        self
    }

    /// Margin value the slide stops at
    pub fn target(&self) -> i64 {
        self.start + self.displacement * self.direction.sign()
    }
}

impl StepAnimation for MarginSlide {
    fn next_frame(&mut self, rect: &mut RectState) -> Option<AnimationFrame> {
        let current = self.field.get(rect) as i64;
        if (current - self.start).abs() >= self.displacement {
            return None;
        }

        let mut next = current + self.step * self.direction.sign();
        // Last step may be short: never pass the target
        if (next - self.start).abs() > self.displacement {
            next = self.target();
        }
        let next = next.clamp(i32::MIN as i64, i32::MAX as i64);
        if next == current {
            // Pinned at the i32 limit, the target is unreachable
            return None;
        }

        self.field.set(rect, next as i32);
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
