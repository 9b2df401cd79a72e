use crate::host::Canvas;

use super::glyphs::{glyph_for, Glyph, GLYPH_WIDTH, SPACE_GLYPH};

/// Software [`Canvas`] over a tightly packed RGBA8 buffer.
///
/// Text uses the built-in 3x5 font. Requested scales are rounded to whole
/// pixels (minimum 1) and everything outside the buffer is clipped.
#[derive(Debug, Clone)]
pub struct FrameCanvas {
    frame: Vec<u8>,
    width: u32,
    height: u32,
    color: [u8; 4],
    cursor: (i32, i32),
}

impl FrameCanvas {
    pub fn new(width: u32, height: u32) -> Self {
        let len = (width as usize)
            .saturating_mul(height as usize)
            .saturating_mul(4);
        Self {
            frame: vec![0; len],
            width,
            height,
            color: [255, 255, 255, 255],
            cursor: (0, 0),
        }
    }

    pub fn width(&self) -> u32 {
        self.width
    }

    pub fn height(&self) -> u32 {
        self.height
    }

    pub fn frame(&self) -> &[u8] {
        &self.frame
    }

    pub fn clear(&mut self) {
        self.frame.fill(0);
    }

    pub fn pixel(&self, x: u32, y: u32) -> Option<[u8; 4]> {
        if x >= self.width || y >= self.height {
            return None;
        }
        let offset = (y as usize * self.width as usize + x as usize) * 4;
        let bytes = self.frame.get(offset..offset + 4)?;
        Some([bytes[0], bytes[1], bytes[2], bytes[3]])
    }

    pub fn is_blank(&self) -> bool {
        self.frame.iter().all(|byte| *byte == 0)
    }

    fn draw_glyph_clipped(&mut self, x: i32, y: i32, glyph: Glyph, scale: (i32, i32)) {
        let (scale_x, scale_y) = scale;
        for (row_index, row_bits) in glyph.iter().enumerate() {
            let glyph_y = y + row_index as i32 * scale_y;

            for col in 0..GLYPH_WIDTH {
                if (row_bits & (1 << (GLYPH_WIDTH - 1 - col))) == 0 {
                    continue;
                }

                let glyph_x = x + col * scale_x;
                for sy in 0..scale_y {
                    for sx in 0..scale_x {
                        self.write_pixel(glyph_x + sx, glyph_y + sy);
                    }
                }
            }
        }
    }

    fn write_pixel(&mut self, x: i32, y: i32) {
        if x < 0 || y < 0 || x >= self.width as i32 || y >= self.height as i32 {
            return;
        }
        let Some(pixel_offset) = (y as usize)
            .checked_mul(self.width as usize)
            .and_then(|row| row.checked_add(x as usize))
        else {
            return;
        };
        let Some(byte_offset) = pixel_offset.checked_mul(4) else {
            return;
        };
        if let Some(pixel) = self.frame.get_mut(byte_offset..byte_offset + 4) {
            pixel.copy_from_slice(&self.color);
        }
    }
}

impl Canvas for FrameCanvas {
    fn set_color(&mut self, rgba: [u8; 4]) {
        self.color = rgba;
    }

    fn set_position(&mut self, x: i32, y: i32) {
        self.cursor = (x, y);
    }

    fn draw_string(&mut self, text: &str, scale_x: f32, scale_y: f32) {
        if self.width == 0 || self.height == 0 {
            return;
        }

        let scale = (pixel_scale(scale_x), pixel_scale(scale_y));
        let advance = (GLYPH_WIDTH + 1) * scale.0;
        let (mut x, y) = self.cursor;
        for ch in text.chars() {
            let glyph = glyph_for(ch).unwrap_or(SPACE_GLYPH);
            self.draw_glyph_clipped(x, y, glyph, scale);
            x = x.saturating_add(advance);
        }
    }
}

fn pixel_scale(scale: f32) -> i32 {
    if !scale.is_finite() {
        return 1;
    }
    (scale.round() as i32).max(1)
}
