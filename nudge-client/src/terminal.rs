// Nudge Terminal View
// Draws the element as a block of '#' on a '.' character canvas

use nudge_utils::config::CanvasConfig;
use nudge_utils::geometry::RectState;

use crate::view::TargetView;

/// Character-canvas rendering of the target element.
///
/// Each cell covers `canvas.cell` pixels on both axes; anything outside the
/// canvas is clipped, so negative margins simply slide the block off the edge.
pub struct TerminalView {
    canvas: CanvasConfig,
    geometry: RectState,
    /// Set by `request_redraw`, cleared by `take_frame`
    dirty: bool,
    redraws: u64,
}

impl TerminalView {
    pub fn new(canvas: CanvasConfig, geometry: RectState) -> Self {
        Self {
            canvas,
            geometry,
            // first frame is always drawn
            dirty: true,
            redraws: 0,
        }
    }

    /// Render the canvas, rows separated by '\n', no trailing newline
    pub fn render(&self) -> String {
        let cell = i64::from(self.canvas.cell.max(1));
        let g = &self.geometry;

        let left = i64::from(g.left_margin).div_euclid(cell);
        let top = i64::from(g.top_margin).div_euclid(cell);
        // exclusive, rounded up so a partly covered cell is drawn
        let right = (i64::from(g.left_margin) + i64::from(g.width.max(0)) + cell - 1)
            .div_euclid(cell);
        let bottom = (i64::from(g.top_margin) + i64::from(g.height.max(0)) + cell - 1)
            .div_euclid(cell);
        let visible = g.width > 0 && g.height > 0;

        let cols = usize::from(self.canvas.cols);
        let rows = usize::from(self.canvas.rows);
        let mut frame = String::with_capacity((cols + 1) * rows);

        for row in 0..rows as i64 {
            if row > 0 {
                frame.push('\n');
            }
            for col in 0..cols as i64 {
                let inside =
                    visible && (left..right).contains(&col) && (top..bottom).contains(&row);
                frame.push(if inside { '#' } else { '.' });
            }
        }
        frame
    }

    /// Rendered frame if a redraw was requested since the last call
    pub fn take_frame(&mut self) -> Option<String> {
        if !self.dirty {
            return None;
        }
        self.dirty = false;
        Some(self.render())
    }

    pub fn redraws(&self) -> u64 {
        self.redraws
    }
}

impl TargetView for TerminalView {
    fn width(&self) -> i32 {
        self.geometry.width
    }

    fn height(&self) -> i32 {
        self.geometry.height
    }

    fn layout_geometry(&self) -> RectState {
        self.geometry
    }

    fn set_layout_geometry(&mut self, geometry: RectState) {
        self.geometry = geometry;
    }

    fn request_redraw(&mut self) {
        self.dirty = true;
        self.redraws += 1;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn canvas() -> CanvasConfig {
        CanvasConfig {
            cols: 8,
            rows: 4,
            cell: 10,
        }
    }

    #[test]
    fn test_render_block() {
        let view =
            TerminalView::new(canvas(), RectState::new(30, 20).with_margins(10, 0, 20, 0));
        insta::assert_snapshot!(view.render(), @r"
        ........
        ..###...
        ..###...
        ........
        ");
    }

    #[test]
    fn test_render_clips_negative_margins() {
        let view =
            TerminalView::new(canvas(), RectState::new(30, 20).with_margins(-10, 0, -15, 0));
        insta::assert_snapshot!(view.render(), @r"
        ##......
        ........
        ........
        ........
        ");
    }

    #[test]
    fn test_partial_cells_are_drawn() {
        let view = TerminalView::new(canvas(), RectState::new(11, 1).with_margins(0, 0, 5, 0));
        let first_row = view.render().lines().next().unwrap().to_string();
        assert_eq!(first_row, "##......");
    }

    #[test]
    fn test_empty_element_renders_nothing() {
        let view = TerminalView::new(canvas(), RectState::new(0, 20).with_margins(10, 0, 20, 0));
        assert!(!view.render().contains('#'));
    }

    #[test]
    fn test_take_frame_only_after_redraw() {
        let mut view = TerminalView::new(canvas(), RectState::new(10, 10));
        assert!(view.take_frame().is_some());
        assert!(view.take_frame().is_none());

        view.set_layout_geometry(RectState::new(20, 10));
        assert!(view.take_frame().is_none());

        view.request_redraw();
        let frame = view.take_frame().unwrap();
        assert!(frame.starts_with("##......"));
        assert_eq!(view.redraws(), 1);
    }
}
