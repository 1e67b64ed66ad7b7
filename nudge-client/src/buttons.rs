// Nudge Buttons
//
// The four direction triggers and their enabled state. Shrinks have no
// button; they are only reachable through `AnimationController::trigger`.

use std::fmt;
use std::str::FromStr;

use nudge_utils::errors::NudgeError;
use nudge_utils::motion::MotionKind;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Button {
    Up,
    Left,
    Down,
    Right,
}

impl Button {
    pub const ALL: [Button; 4] = [Button::Up, Button::Left, Button::Down, Button::Right];

    pub fn motion_kind(&self) -> MotionKind {
        match self {
            Button::Up => MotionKind::MoveUp,
            Button::Left => MotionKind::MoveLeft,
            Button::Down => MotionKind::MoveDown,
            Button::Right => MotionKind::MoveRight,
        }
    }

    /// Button that triggers `kind`, if any (shrinks have none)
    pub fn for_kind(kind: MotionKind) -> Option<Button> {
        Button::ALL.into_iter().find(|b| b.motion_kind() == kind)
    }

    fn index(&self) -> usize {
        *self as usize
    }
}

impl FromStr for Button {
    type Err = NudgeError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "up" => Ok(Button::Up),
            "left" => Ok(Button::Left),
            "down" => Ok(Button::Down),
            "right" => Ok(Button::Right),
            _ => Err(NudgeError::UnknownMotion(s.to_string())),
        }
    }
}

impl fmt::Display for Button {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Button::Up => "Up",
            Button::Left => "Left",
            Button::Down => "Down",
            Button::Right => "Right",
        };
        write!(f, "{} {}", self.motion_kind().glyph(), name)
    }
}

/// Enabled flags for the four buttons
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ButtonPanel {
    enabled: [bool; 4],
}

impl Default for ButtonPanel {
    fn default() -> Self {
        Self {
            enabled: [true; 4],
        }
    }
}

impl ButtonPanel {
    pub fn new() -> Self {
        Self::default()
    }

    /// Enable or disable every button at once
    pub fn set_enabled(&mut self, enabled: bool) {
        self.enabled = [enabled; 4];
    }

    pub fn is_enabled(&self, button: Button) -> bool {
        self.enabled[button.index()]
    }

    #[cfg(test)]
    pub fn all_enabled(&self) -> bool {
        self.enabled.iter().all(|enabled| *enabled)
    }
}
