// Nudge Motion Kinds
//
// The six animations the driver knows how to run, and the tagged motion
// each one resolves to (slide along an axis, or shrink along an axis).

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::errors::NudgeError;
use crate::geometry::{Axis, Field};

/// Sign applied to a slide step
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Direction {
    /// Towards smaller margins (up, left)
    Backward,
    /// Towards larger margins (down, right)
    Forward,
}

impl Direction {
    pub fn sign(&self) -> i64 {
        match self {
            Direction::Backward => -1,
            Direction::Forward => 1,
        }
    }
}

/// What an animation does to the element, with its axis data attached
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Motion {
    Slide { axis: Axis, direction: Direction },
    Shrink { axis: Axis },
}

impl Motion {
    pub fn axis(&self) -> Axis {
        match self {
            Motion::Slide { axis, .. } | Motion::Shrink { axis } => *axis,
        }
    }

    /// The `RectState` value this motion writes
    pub fn field(&self) -> Field {
        match self {
            Motion::Slide { axis, .. } => Field::margin(*axis),
            Motion::Shrink { axis } => Field::dimension(*axis),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum MotionKind {
    MoveUp,
    MoveDown,
    MoveLeft,
    MoveRight,
    ShrinkVertical,
    ShrinkHorizontal,
}

impl MotionKind {
    pub const ALL: [MotionKind; 6] = [
        MotionKind::MoveUp,
        MotionKind::MoveDown,
        MotionKind::MoveLeft,
        MotionKind::MoveRight,
        MotionKind::ShrinkVertical,
        MotionKind::ShrinkHorizontal,
    ];

    pub fn motion(&self) -> Motion {
        use Axis::*;
        use Direction::*;
        match self {
            MotionKind::MoveUp => Motion::Slide {
                axis: Vertical,
                direction: Backward,
            },
            MotionKind::MoveDown => Motion::Slide {
                axis: Vertical,
                direction: Forward,
            },
            MotionKind::MoveLeft => Motion::Slide {
                axis: Horizontal,
                direction: Backward,
            },
            MotionKind::MoveRight => Motion::Slide {
                axis: Horizontal,
                direction: Forward,
            },
            MotionKind::ShrinkVertical => Motion::Shrink { axis: Vertical },
            MotionKind::ShrinkHorizontal => Motion::Shrink { axis: Horizontal },
        }
    }

    pub fn axis(&self) -> Axis {
        self.motion().axis()
    }

    /// Arrow shown next to the button for this kind
    pub fn glyph(&self) -> &'static str {
        match self {
            MotionKind::MoveUp => "↑",
            MotionKind::MoveDown => "↓",
            MotionKind::MoveLeft => "←",
            MotionKind::MoveRight => "→",
            MotionKind::ShrinkVertical => "↕",
            MotionKind::ShrinkHorizontal => "↔",
        }
    }
}

impl FromStr for MotionKind {
    type Err = NudgeError;

    /// Accepts the display names plus the short button names (`up`, `left`, ...)
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "up" | "move-up" => Ok(MotionKind::MoveUp),
            "down" | "move-down" => Ok(MotionKind::MoveDown),
            "left" | "move-left" => Ok(MotionKind::MoveLeft),
            "right" | "move-right" => Ok(MotionKind::MoveRight),
            "shrink-v" | "shrink-vertical" => Ok(MotionKind::ShrinkVertical),
            "shrink-h" | "shrink-horizontal" => Ok(MotionKind::ShrinkHorizontal),
            _ => Err(NudgeError::UnknownMotion(s.to_string())),
        }
    }
}

impl fmt::Display for MotionKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            MotionKind::MoveUp => write!(f, "move-up"),
            MotionKind::MoveDown => write!(f, "move-down"),
            MotionKind::MoveLeft => write!(f, "move-left"),
            MotionKind::MoveRight => write!(f, "move-right"),
            MotionKind::ShrinkVertical => write!(f, "shrink-vertical"),
            MotionKind::ShrinkHorizontal => write!(f, "shrink-horizontal"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_motion_kind_from_str() {
        assert_eq!("up".parse::<MotionKind>(), Ok(MotionKind::MoveUp));
        assert_eq!("LEFT".parse::<MotionKind>(), Ok(MotionKind::MoveLeft));
        assert_eq!(
            "shrink-h".parse::<MotionKind>(),
            Ok(MotionKind::ShrinkHorizontal)
        );
        assert_eq!(
            "sideways".parse::<MotionKind>(),
            Err(NudgeError::UnknownMotion("sideways".to_string()))
        );
    }

    #[test]
    fn test_display_round_trips_through_from_str() {
        for kind in MotionKind::ALL {
            assert_eq!(kind.to_string().parse::<MotionKind>(), Ok(kind));
        }
    }

    #[test]
    fn test_slide_directions() {
        assert_eq!(
            MotionKind::MoveUp.motion(),
            Motion::Slide {
                axis: Axis::Vertical,
                direction: Direction::Backward
            }
        );
        assert_eq!(
            MotionKind::MoveRight.motion(),
            Motion::Slide {
                axis: Axis::Horizontal,
                direction: Direction::Forward
            }
        );
        assert_eq!(Direction::Backward.sign(), -1);
        assert_eq!(Direction::Forward.sign(), 1);
    }

    #[test]
    fn test_motion_fields() {
        assert_eq!(MotionKind::MoveDown.motion().field(), Field::TopMargin);
        assert_eq!(MotionKind::MoveLeft.motion().field(), Field::LeftMargin);
        assert_eq!(MotionKind::ShrinkVertical.motion().field(), Field::Height);
        assert_eq!(MotionKind::ShrinkHorizontal.motion().field(), Field::Width);
    }
}
