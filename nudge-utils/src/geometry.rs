// Nudge Geometry
//
// Margin/size box of the animated element, plus the axis and field
// addressing the driver uses to mutate one value at a time.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Layout box of the target element, in pixels.
///
/// Margins may go negative while an element slides off its container;
/// dimensions never drop below zero once a shrink has run.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct RectState {
    pub top_margin: i32,
    pub bottom_margin: i32,
    pub left_margin: i32,
    pub right_margin: i32,
    pub width: i32,
    pub height: i32,
}

impl RectState {
    pub fn new(width: i32, height: i32) -> Self {
        Self {
            width,
            height,
            ..Default::default()
        }
    }

    pub fn with_margins(mut self, top: i32, bottom: i32, left: i32, right: i32) -> Self {
        self.top_margin = top;
        self.bottom_margin = bottom;
        self.left_margin = left;
        self.right_margin = right;
        self
    }

    /// Copy with width/height replaced, margins untouched
    pub fn with_size(mut self, width: i32, height: i32) -> Self {
        self.width = width;
        self.height = height;
        self
    }

    pub fn dimension(&self, axis: Axis) -> i32 {
        match axis {
            Axis::Vertical => self.height,
            Axis::Horizontal => self.width,
        }
    }
}

impl fmt::Display for RectState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{}x{} margins(top={}, bottom={}, left={}, right={})",
            self.width,
            self.height,
            self.top_margin,
            self.bottom_margin,
            self.left_margin,
            self.right_margin
        )
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Axis {
    Vertical,
    Horizontal,
}

/// The single value of a `RectState` an animation writes to
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Field {
    TopMargin,
    LeftMargin,
    Width,
    Height,
}

impl Field {
    /// Margin that moves along `axis` (top for vertical, left for horizontal)
    pub fn margin(axis: Axis) -> Self {
        match axis {
            Axis::Vertical => Field::TopMargin,
            Axis::Horizontal => Field::LeftMargin,
        }
    }

    /// Dimension that shrinks along `axis`
    pub fn dimension(axis: Axis) -> Self {
        match axis {
            Axis::Vertical => Field::Height,
            Axis::Horizontal => Field::Width,
        }
    }

    pub fn get(&self, rect: &RectState) -> i32 {
        match self {
            Field::TopMargin => rect.top_margin,
            Field::LeftMargin => rect.left_margin,
            Field::Width => rect.width,
            Field::Height => rect.height,
        }
    }

    pub fn set(&self, rect: &mut RectState, value: i32) {
        match self {
            Field::TopMargin => rect.top_margin = value,
            Field::LeftMargin => rect.left_margin = value,
            Field::Width => rect.width = value,
            Field::Height => rect.height = value,
        }
    }
}

impl fmt::Display for Field {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Field::TopMargin => write!(f, "top_margin"),
            Field::LeftMargin => write!(f, "left_margin"),
            Field::Width => write!(f, "width"),
            Field::Height => write!(f, "height"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_field_addresses_single_value() {
        let mut rect = RectState::new(120, 80).with_margins(10, 20, 30, 40);

        Field::TopMargin.set(&mut rect, -5);
        Field::Width.set(&mut rect, 0);

        assert_eq!(rect.top_margin, -5);
        assert_eq!(rect.width, 0);
        // untouched
        assert_eq!(rect.bottom_margin, 20);
        assert_eq!(rect.left_margin, 30);
        assert_eq!(rect.right_margin, 40);
        assert_eq!(rect.height, 80);
    }

    #[test]
    fn test_axis_field_mapping() {
        assert_eq!(Field::margin(Axis::Vertical), Field::TopMargin);
        assert_eq!(Field::margin(Axis::Horizontal), Field::LeftMargin);
        assert_eq!(Field::dimension(Axis::Vertical), Field::Height);
        assert_eq!(Field::dimension(Axis::Horizontal), Field::Width);
    }

    #[test]
    fn test_with_size_keeps_margins() {
        let rect = RectState::default().with_margins(1, 2, 3, 4).with_size(50, 60);
        assert_eq!(rect.dimension(Axis::Horizontal), 50);
        assert_eq!(rect.dimension(Axis::Vertical), 60);
        assert_eq!((rect.top_margin, rect.right_margin), (1, 4));
    }

    #[test]
    fn test_rect_state_json_shape() {
        let rect = RectState::new(3, 4);
        let json = serde_json::to_string(&rect).unwrap();
        assert!(json.contains("\"width\":3"));
        assert!(json.contains("\"top_margin\":0"));
    }
}
