//! Pixel canvas presented as 24-bit half-block cells, with a text overlay.

use std::io::{self, Write};

/// Per-dimension clamp for the drawing surface, in pixels. Keeps the stage
/// legible on tiny terminals and caps per-frame work on huge ones.
pub const MIN_SURFACE: usize = 24;
pub const MAX_SURFACE: usize = 900;

/// Surface dimensions for a terminal of `cols` x `rows` cells. Every cell
/// holds two vertically stacked pixels, so the pixel grid is cols x rows*2.
pub fn surface_size(cols: u16, rows: u16) -> (usize, usize) {
    (
        (cols as usize).clamp(MIN_SURFACE, MAX_SURFACE),
        (rows as usize * 2).clamp(MIN_SURFACE, MAX_SURFACE),
    )
}

#[derive(Clone, Copy)]
struct TextCell {
    ch: char,
    color: (u8, u8, u8),
}

/// Persistent RGB pixel buffer. Pixels survive between frames so the frame
/// driver can produce motion trails by fading instead of clearing; glyphs in
/// the text overlay live for a single frame and always draw above pixels.
pub struct Canvas {
    width: usize,
    height: usize,
    pixels: Vec<(f32, f32, f32)>,
    text: Vec<Option<TextCell>>,
    output_buf: Vec<u8>,
}

impl Canvas {
    pub fn new(width: usize, height: usize) -> Self {
        Self {
            width,
            height,
            pixels: vec![(0.0, 0.0, 0.0); width * height],
            text: vec![None; width * height.div_ceil(2)],
            output_buf: Vec::with_capacity(width * height * 25),
        }
    }

    pub fn width(&self) -> usize {
        self.width
    }

    pub fn height(&self) -> usize {
        self.height
    }

    /// Number of terminal rows backing the pixel grid.
    pub fn cell_rows(&self) -> usize {
        self.height.div_ceil(2)
    }

    pub fn resize(&mut self, width: usize, height: usize) {
        self.width = width;
        self.height = height;
        self.pixels = vec![(0.0, 0.0, 0.0); width * height];
        self.text = vec![None; width * height.div_ceil(2)];
    }

    /// Fill the whole surface with an opaque color and drop the text overlay.
    pub fn clear(&mut self, color: (u8, u8, u8)) {
        let c = (color.0 as f32, color.1 as f32, color.2 as f32);
        self.pixels.fill(c);
        self.text.fill(None);
    }

    /// Blend every pixel toward `target` by `alpha` and drop the text
    /// overlay. With a dark target this is the motion-trail backdrop.
    pub fn fade(&mut self, target: (u8, u8, u8), alpha: f32) {
        let t = (target.0 as f32, target.1 as f32, target.2 as f32);
        let keep = 1.0 - alpha;
        for px in &mut self.pixels {
            px.0 = px.0 * keep + t.0 * alpha;
            px.1 = px.1 * keep + t.1 * alpha;
            px.2 = px.2 * keep + t.2 * alpha;
        }
        self.text.fill(None);
    }

    /// Alpha-blend a single pixel. Out-of-bounds coordinates are ignored.
    pub fn plot(&mut self, x: i32, y: i32, color: (u8, u8, u8), alpha: f32) {
        if x < 0 || y < 0 || x >= self.width as i32 || y >= self.height as i32 {
            return;
        }
        let a = alpha.clamp(0.0, 1.0);
        let idx = y as usize * self.width + x as usize;
        let px = &mut self.pixels[idx];
        px.0 = px.0 * (1.0 - a) + color.0 as f32 * a;
        px.1 = px.1 * (1.0 - a) + color.1 as f32 * a;
        px.2 = px.2 * (1.0 - a) + color.2 as f32 * a;
    }

    pub fn fill_circle(&mut self, cx: f32, cy: f32, radius: f32, color: (u8, u8, u8), alpha: f32) {
        let r = radius.max(0.0);
        let x0 = (cx - r).floor() as i32;
        let x1 = (cx + r).ceil() as i32;
        let y0 = (cy - r).floor() as i32;
        let y1 = (cy + r).ceil() as i32;
        for y in y0..=y1 {
            for x in x0..=x1 {
                let dx = x as f32 - cx;
                let dy = y as f32 - cy;
                if dx * dx + dy * dy <= r * r {
                    self.plot(x, y, color, alpha);
                }
            }
        }
    }

    /// Axis-aligned filled rectangle, top-left anchored.
    pub fn fill_rect(&mut self, x: f32, y: f32, w: f32, h: f32, color: (u8, u8, u8), alpha: f32) {
        let x0 = x.round() as i32;
        let y0 = y.round() as i32;
        let x1 = (x + w).round() as i32;
        let y1 = (y + h).round() as i32;
        for py in y0..y1 {
            for px in x0..x1 {
                self.plot(px, py, color, alpha);
            }
        }
    }

    /// Place a string into the text overlay at a cell position. Glyphs past
    /// the right edge are clipped.
    pub fn text(&mut self, col: usize, row: usize, s: &str, color: (u8, u8, u8)) {
        if row >= self.cell_rows() {
            return;
        }
        for (i, ch) in s.chars().enumerate() {
            let c = col + i;
            if c >= self.width {
                break;
            }
            self.text[row * self.width + c] = Some(TextCell { ch, color });
        }
    }

    /// Horizontally centered text on a cell row.
    pub fn text_centered(&mut self, row: usize, s: &str, color: (u8, u8, u8)) {
        let len = s.chars().count();
        let col = self.width.saturating_sub(len) / 2;
        self.text(col, row, s, color);
    }

    /// Raw pixel value, for inspection in tests.
    pub fn pixel(&self, x: usize, y: usize) -> (f32, f32, f32) {
        self.pixels[y * self.width + x]
    }

    /// Write the frame to `out` as half-block cells. Color escape codes are
    /// only emitted when a color actually changes within the row.
    pub fn present<W: Write>(&mut self, out: &mut W) -> io::Result<()> {
        self.output_buf.clear();
        self.output_buf.extend_from_slice(b"\x1b[H");

        let mut prev_bg: Option<(u8, u8, u8)> = None;
        let mut prev_fg: Option<(u8, u8, u8)> = None;
        let mut utf8 = [0u8; 4];

        for y in (0..self.height).step_by(2) {
            let row = y / 2;
            for x in 0..self.width {
                let top = self.pixel_u8(x, y);
                let bot = if y + 1 < self.height {
                    self.pixel_u8(x, y + 1)
                } else {
                    top
                };

                // Text cells show the glyph over the underlying pixels; plain
                // cells use the lower-half block with bg=top, fg=bottom.
                let (bg, fg, glyph) = match self.text[row * self.width + x] {
                    Some(cell) => {
                        let bg = (
                            ((top.0 as u16 + bot.0 as u16) / 2) as u8,
                            ((top.1 as u16 + bot.1 as u16) / 2) as u8,
                            ((top.2 as u16 + bot.2 as u16) / 2) as u8,
                        );
                        (bg, cell.color, cell.ch)
                    }
                    None => (top, bot, '▄'),
                };

                if prev_bg != Some(bg) {
                    write!(self.output_buf, "\x1b[48;2;{};{};{}m", bg.0, bg.1, bg.2)?;
                    prev_bg = Some(bg);
                }
                if prev_fg != Some(fg) {
                    write!(self.output_buf, "\x1b[38;2;{};{};{}m", fg.0, fg.1, fg.2)?;
                    prev_fg = Some(fg);
                }
                self.output_buf
                    .extend_from_slice(glyph.encode_utf8(&mut utf8).as_bytes());
            }
            self.output_buf.extend_from_slice(b"\x1b[0m");
            prev_bg = None;
            prev_fg = None;
            if y + 2 < self.height {
                self.output_buf.extend_from_slice(b"\r\n");
            }
        }

        out.write_all(&self.output_buf)?;
        out.flush()?;
        Ok(())
    }

    fn pixel_u8(&self, x: usize, y: usize) -> (u8, u8, u8) {
        let px = self.pixels[y * self.width + x];
        (
            px.0.clamp(0.0, 255.0) as u8,
            px.1.clamp(0.0, 255.0) as u8,
            px.2.clamp(0.0, 255.0) as u8,
        )
    }
}
