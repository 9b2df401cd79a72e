mod frame_canvas;
mod glyphs;

use crate::host::Canvas;

pub use frame_canvas::FrameCanvas;

pub const OVERLAY_POSITION: (i32, i32) = (7, 200);
pub const OVERLAY_COLOR: [u8; 4] = [0, 255, 0, 255];
pub const OVERLAY_SCALE: (f32, f32) = (1.5, 1.5);

/// Draws `label` at the fixed overlay spot. An empty label draws nothing.
pub fn draw_label_overlay(canvas: &mut dyn Canvas, label: &str) {
    if label.is_empty() {
        return;
    }

    canvas.set_color(OVERLAY_COLOR);
    canvas.set_position(OVERLAY_POSITION.0, OVERLAY_POSITION.1);
    canvas.draw_string(label, OVERLAY_SCALE.0, OVERLAY_SCALE.1);
}

#[cfg(test)]
mod tests {
    use super::*;

    #[derive(Debug, Default)]
    struct RecordingCanvas {
        calls: Vec<String>,
    }

    impl Canvas for RecordingCanvas {
        fn set_color(&mut self, rgba: [u8; 4]) {
            self.calls.push(format!("color {rgba:?}"));
        }

        fn set_position(&mut self, x: i32, y: i32) {
            self.calls.push(format!("pos {x},{y}"));
        }

        fn draw_string(&mut self, text: &str, scale_x: f32, scale_y: f32) {
            self.calls.push(format!("text {text:?} {scale_x}x{scale_y}"));
        }
    }

    #[test]
    fn label_is_drawn_green_at_fixed_position() {
        let mut canvas = RecordingCanvas::default();
        draw_label_overlay(&mut canvas, "Boost, ");
        assert_eq!(
            canvas.calls,
            vec![
                "color [0, 255, 0, 255]".to_string(),
                "pos 7,200".to_string(),
                "text \"Boost, \" 1.5x1.5".to_string(),
            ]
        );
    }

    #[test]
    fn empty_label_is_not_drawn() {
        let mut canvas = RecordingCanvas::default();
        draw_label_overlay(&mut canvas, "");
        assert!(canvas.calls.is_empty());
    }

    #[test]
    fn label_pixels_land_below_overlay_origin() {
        let mut canvas = FrameCanvas::new(320, 240);
        draw_label_overlay(&mut canvas, "Jump, ");

        // 'J' has its top row fully lit; scale 1.5 rounds to 2 pixels.
        assert_eq!(canvas.pixel(7, 200), Some(OVERLAY_COLOR));
        assert_eq!(canvas.pixel(12, 201), Some(OVERLAY_COLOR));
        assert_eq!(canvas.pixel(7, 199), Some([0, 0, 0, 0]));
        assert_eq!(canvas.pixel(6, 200), Some([0, 0, 0, 0]));
    }
}
