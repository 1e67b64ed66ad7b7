// Nudge Animation Request
//
// One configure call's worth of input: which motion, how far, how long.

use std::time::Duration;

use crate::errors::{NudgeError, NudgeResult};
use crate::motion::MotionKind;

/// A single animation order handed to the driver.
///
/// Constructed through [`AnimationRequest::new`] or
/// [`AnimationRequest::from_secs`], both of which reject durations that are
/// zero, negative or not finite.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct AnimationRequest {
    kind: MotionKind,
    displacement: u32,
    duration: Duration,
}

impl AnimationRequest {
    pub fn new(kind: MotionKind, displacement: u32, duration: Duration) -> NudgeResult<Self> {
        if duration.is_zero() {
            return Err(NudgeError::InvalidDuration("duration must be positive".to_string()));
        }
        Ok(Self {
            kind,
            displacement,
            duration,
        })
    }

    pub fn from_secs(kind: MotionKind, displacement: u32, secs: f64) -> NudgeResult<Self> {
        if !secs.is_finite() || secs <= 0.0 {
            return Err(NudgeError::InvalidDuration(format!(
                "{} seconds is not a positive, finite duration",
                secs
            )));
        }
        let duration = Duration::try_from_secs_f64(secs)
            .map_err(|e| NudgeError::InvalidDuration(format!("{} seconds: {}", secs, e)))?;
        Self::new(kind, displacement, duration)
    }

    pub fn kind(&self) -> MotionKind {
        self.kind
    }

    pub fn displacement(&self) -> u32 {
        self.displacement
    }

    pub fn duration(&self) -> Duration {
        self.duration
    }

    /// Number of whole ticks that fit in the duration, never less than one
    pub fn steps_count(&self, tick_interval: Duration) -> u32 {
        let tick = tick_interval.as_nanos().max(1);
        let steps = self.duration.as_nanos() / tick;
        u32::try_from(steps).unwrap_or(u32::MAX).max(1)
    }

    /// Pixels moved per tick: `displacement / steps_count`, floored at 1
    pub fn step(&self, tick_interval: Duration) -> u32 {
        (self.displacement / self.steps_count(tick_interval)).max(1)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const TICK: Duration = Duration::from_millis(25);

    #[test]
    fn test_move_up_step_size() {
        let request = AnimationRequest::from_secs(MotionKind::MoveUp, 300, 1.5).unwrap();
        assert_eq!(request.steps_count(TICK), 60);
        assert_eq!(request.step(TICK), 5);
    }

    #[test]
    fn test_uneven_step_truncates() {
        let request = AnimationRequest::from_secs(MotionKind::ShrinkHorizontal, 100, 1.0).unwrap();
        assert_eq!(request.steps_count(TICK), 40);
        // 2.5 truncated
        assert_eq!(request.step(TICK), 2);
    }

    #[test]
    fn test_zero_displacement_steps_by_one() {
        let request = AnimationRequest::from_secs(MotionKind::MoveLeft, 0, 1.5).unwrap();
        assert_eq!(request.step(TICK), 1);
    }

    #[test]
    fn test_sub_tick_duration_is_a_single_step() {
        let request =
            AnimationRequest::new(MotionKind::MoveDown, 90, Duration::from_millis(10)).unwrap();
        assert_eq!(request.steps_count(TICK), 1);
        assert_eq!(request.step(TICK), 90);
    }

    #[test]
    fn test_invalid_durations_rejected() {
        assert!(matches!(
            AnimationRequest::new(MotionKind::MoveUp, 10, Duration::ZERO),
            Err(NudgeError::InvalidDuration(_))
        ));
        for secs in [0.0, -1.5, f64::NAN, f64::INFINITY, 1e30] {
            assert!(matches!(
                AnimationRequest::from_secs(MotionKind::MoveUp, 10, secs),
                Err(NudgeError::InvalidDuration(_))
            ));
        }
    }
}
