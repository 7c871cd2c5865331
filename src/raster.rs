use crate::font::BitmapFont;
use crate::grid::Grid;

/// 8-bit RGBA color.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Rgba {
    pub r: u8,
    pub g: u8,
    pub b: u8,
    pub a: u8,
}

impl Rgba {
    pub const fn rgb(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b, a: 0xFF }
    }

    /// Little-endian packing read back by the blit shader (`r` in the low byte).
    pub fn packed(self) -> u32 {
        u32::from_le_bytes([self.r, self.g, self.b, self.a])
    }
}

/// Cell colors for the grid projection.
#[derive(Debug, Clone, Copy)]
pub struct Palette {
    pub alive: Rgba,
    pub dead: Rgba,
    pub text: Rgba,
}

/// Text placement relative to the frame.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Anchor {
    Center,
    BottomLeft,
}

/// CPU-side frame at surface resolution, one packed RGBA `u32` per pixel.
pub struct Frame {
    width: u32,
    height: u32,
    pixels: Vec<u32>,
}

impl Frame {
    pub fn new(width: u32, height: u32) -> Self {
        Self {
            width,
            height,
            pixels: vec![0; (width * height) as usize],
        }
    }

    pub fn width(&self) -> u32 {
        self.width
    }

    pub fn height(&self) -> u32 {
        self.height
    }

    pub fn pixels(&self) -> &[u32] {
        &self.pixels
    }

    #[cfg(test)]
    pub fn pixel(&self, x: u32, y: u32) -> Option<u32> {
        (x < self.width && y < self.height).then(|| self.pixels[(y * self.width + x) as usize])
    }

    fn fill_rect(&mut self, x: u32, y: u32, w: u32, h: u32, color: u32) {
        let x_end = (x + w).min(self.width);
        let y_end = (y + h).min(self.height);
        for py in y.min(y_end)..y_end {
            let row = (py * self.width) as usize;
            self.pixels[row + x.min(x_end) as usize..row + x_end as usize].fill(color);
        }
    }

    /// Project the grid onto the frame, each cell a `ratio_x × ratio_y` block.
    pub fn draw_grid(&mut self, grid: &Grid, ratio: (u32, u32), palette: &Palette) {
        let (rx, ry) = ratio;
        let alive = palette.alive.packed();
        let dead = palette.dead.packed();
        for y in 0..grid.height() {
            for x in 0..grid.width() {
                let color = if grid.get(x as i32, y as i32) { alive } else { dead };
                self.fill_rect(x * rx, y * ry, rx, ry, color);
            }
        }
    }

    /// Draw `text` with each font pixel scaled to `scale × scale`. Pixels past
    /// the frame edge are dropped.
    pub fn draw_text(
        &mut self,
        font: &BitmapFont,
        text: &str,
        anchor: Anchor,
        scale: u32,
        color: Rgba,
    ) {
        let scale = scale.max(1);
        let text_w = font.text_width(text) * scale;
        let text_h = font.glyph_height() * scale;
        let margin = 2 * scale;
        let (start_x, start_y) = match anchor {
            Anchor::Center => (
                self.width.saturating_sub(text_w) / 2,
                self.height.saturating_sub(text_h) / 2,
            ),
            Anchor::BottomLeft => (margin, self.height.saturating_sub(text_h + margin)),
        };

        let color = color.packed();
        let advance = (font.glyph_width() + 1) * scale;
        for (i, ch) in text.chars().enumerate() {
            let gx = start_x + i as u32 * advance;
            if gx >= self.width {
                break;
            }
            for row in 0..font.glyph_height() {
                for col in 0..font.glyph_width() {
                    if font.pixel(ch, col, row) {
                        self.fill_rect(gx + col * scale, start_y + row * scale, scale, scale, color);
                    }
                }
            }
        }
    }
}
