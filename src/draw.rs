// Window + software drawing utilities.
// Visual effects provided here:
// 1) A window that shows the composed frame (live camera + canvas + chrome).
// 2) Filled discs, thick lines and rectangles for strokes, cursors and buttons.
// 3) A tiny 5x7 bitmap font (scalable) for button labels and the status line.

use crate::error::Error;
use crate::types::{FrameBuffer, Point, Rgb};
use minifb::{Key, MouseButton, MouseMode, Window, WindowOptions};

pub struct Drawer {
    window: Window, // the on-screen window you see
}

impl Drawer {
    /// Create a window sized to the camera feed.
    /// Visual: a new empty window appears with your chosen title.
    pub fn new(title: &str, width: usize, height: usize) -> Result<Self, Error> {
        let window = Window::new(title, width, height, WindowOptions::default())
            .map_err(|e| Error::WindowInit(e.to_string()))?;
        Ok(Self { window })
    }

    /// Push the pixels for this frame to the screen.
    /// Visual: the window immediately displays the new image (live video).
    pub fn present(&mut self, framebuffer: &FrameBuffer) -> Result<(), Error> {
        self.window
            .update_with_buffer(&framebuffer.pixels, framebuffer.width, framebuffer.height)
            .map_err(|e| Error::WindowUpdate(e.to_string()))?;
        Ok(())
    }

    /// Returns false when the user closes the window (so we can stop the loop).
    pub fn is_open(&self) -> bool {
        self.window.is_open()
    }

    /// True while ESC is held down (we’ll exit when this is pressed).
    pub fn esc_pressed(&self) -> bool {
        self.window.is_key_down(Key::Escape)
    }

    /// Current mouse position in window pixel coordinates (clamped to the window).
    pub fn mouse_pos(&self) -> Option<(usize, usize)> {
        self.window
            .get_mouse_pos(MouseMode::Clamp)
            .map(|(x, y)| (x.max(0.0) as usize, y.max(0.0) as usize))
    }

    pub fn left_mouse_down(&self) -> bool {
        self.window.get_mouse_down(MouseButton::Left)
    }

    pub fn right_mouse_down(&self) -> bool {
        self.window.get_mouse_down(MouseButton::Right)
    }

    /// Lowest digit key 0..=5 currently held, if any.
    pub fn digit_held(&self) -> Option<u8> {
        const DIGITS: [Key; 6] = [Key::Key0, Key::Key1, Key::Key2, Key::Key3, Key::Key4, Key::Key5];
        DIGITS.iter().position(|&k| self.window.is_key_down(k)).map(|n| n as u8)
    }

    pub fn grow_held(&self) -> bool {
        self.window.is_key_down(Key::RightBracket)
    }

    pub fn shrink_held(&self) -> bool {
        self.window.is_key_down(Key::LeftBracket)
    }
}

/* ---------- Software drawing: pixels, discs, lines, rectangles ---------- */

/// Clip an inclusive box to the buffer. None when nothing is left.
fn clip(fb: &FrameBuffer, x0: i32, y0: i32, x1: i32, y1: i32) -> Option<(i32, i32, i32, i32)> {
    let (x0, y0) = (x0.max(0), y0.max(0));
    let x1 = x1.min(fb.width as i32 - 1);
    let y1 = y1.min(fb.height as i32 - 1);
    if x0 > x1 || y0 > y1 { None } else { Some((x0, y0, x1, y1)) }
}

/// Solid disc of radius `r` centered at `c`.
/// Visual: a filled round dot (cursor, particle).
pub fn fill_circle(fb: &mut FrameBuffer, c: Point, r: i32, color: Rgb) {
    if r < 0 { return; }
    let Some((x0, y0, x1, y1)) = clip(fb, c.x - r, c.y - r, c.x + r, c.y + r) else { return };
    let r2 = r * r;
    let px = color.pack();
    for y in y0..=y1 {
        let dy = y - c.y;
        for x in x0..=x1 {
            let dx = x - c.x;
            if dx * dx + dy * dy <= r2 {
                fb.pixels[y as usize * fb.width + x as usize] = px;
            }
        }
    }
}

/// Line of width `thickness` from `a` to `b` with round caps.
/// Visual: one brush segment; a zero-length segment is a single round dab.
pub fn draw_thick_line(fb: &mut FrameBuffer, a: Point, b: Point, thickness: i32, color: Rgb) {
    let r = (thickness / 2).max(0);
    let Some((x0, y0, x1, y1)) = clip(
        fb,
        a.x.min(b.x) - r,
        a.y.min(b.y) - r,
        a.x.max(b.x) + r,
        a.y.max(b.y) + r,
    ) else {
        return;
    };

    // Every pixel whose distance to the segment is <= r (a "capsule").
    let (ax, ay) = (a.x as f32, a.y as f32);
    let (dx, dy) = ((b.x - a.x) as f32, (b.y - a.y) as f32);
    let len2 = dx * dx + dy * dy;
    let r2 = (r * r) as f32;
    let px = color.pack();
    for y in y0..=y1 {
        for x in x0..=x1 {
            let (qx, qy) = (x as f32 - ax, y as f32 - ay);
            let t = if len2 > 0.0 { ((qx * dx + qy * dy) / len2).clamp(0.0, 1.0) } else { 0.0 };
            let (ex, ey) = (qx - t * dx, qy - t * dy);
            if ex * ex + ey * ey <= r2 {
                fb.pixels[y as usize * fb.width + x as usize] = px;
            }
        }
    }
}

/// Filled rectangle between two corners (inclusive).
pub fn fill_rect(fb: &mut FrameBuffer, x1: i32, y1: i32, x2: i32, y2: i32, color: Rgb) {
    let Some((x0, y0, x1, y1)) = clip(fb, x1.min(x2), y1.min(y2), x1.max(x2), y1.max(y2)) else { return };
    let px = color.pack();
    for y in y0..=y1 {
        let row = y as usize * fb.width;
        fb.pixels[row + x0 as usize..=row + x1 as usize].fill(px);
    }
}

/// Rectangle outline, `thickness` pixels wide, centered on the edges.
/// Visual: the white frame around the active button.
pub fn stroke_rect(fb: &mut FrameBuffer, x1: i32, y1: i32, x2: i32, y2: i32, thickness: i32, color: Rgb) {
    let h = thickness / 2;
    let t = thickness.max(1);
    fill_rect(fb, x1 - h, y1 - h, x2 + h, y1 - h + t - 1, color); // top
    fill_rect(fb, x1 - h, y2 - h, x2 + h, y2 - h + t - 1, color); // bottom
    fill_rect(fb, x1 - h, y1 - h, x1 - h + t - 1, y2 + h, color); // left
    fill_rect(fb, x2 - h, y1 - h, x2 - h + t - 1, y2 + h, color); // right
}

/* ---------- 5x7 bitmap font (uppercase subset used by the HUD and buttons) ---------- */

/// Return a 5x7 glyph bitmap for a limited character set.
/// Each u8 is a row; the low 5 bits are the pixels (bit 4 = leftmost).
fn glyph5x7(ch: char) -> Option<[u8; 7]> {
    // Helper macro to define a glyph quickly
    macro_rules! g { ($a:expr,$b:expr,$c:expr,$d:expr,$e:expr,$f:expr,$g:expr) => {
        Some([$a,$b,$c,$d,$e,$f,$g])
    }; }

    match ch.to_ascii_uppercase() {
        // Digits 0..9
        '0' => g!(0b01110,0b10001,0b10011,0b10101,0b11001,0b10001,0b01110),
        '1' => g!(0b00100,0b01100,0b00100,0b00100,0b00100,0b00100,0b01110),
        '2' => g!(0b01110,0b10001,0b00001,0b00010,0b00100,0b01000,0b11111),
        '3' => g!(0b11110,0b00001,0b00001,0b01110,0b00001,0b00001,0b11110),
        '4' => g!(0b00010,0b00110,0b01010,0b10010,0b11111,0b00010,0b00010),
        '5' => g!(0b11111,0b10000,0b11110,0b00001,0b00001,0b10001,0b01110),
        '6' => g!(0b00110,0b01000,0b10000,0b11110,0b10001,0b10001,0b01110),
        '7' => g!(0b11111,0b00001,0b00010,0b00100,0b01000,0b01000,0b01000),
        '8' => g!(0b01110,0b10001,0b10001,0b01110,0b10001,0b10001,0b01110),
        '9' => g!(0b01110,0b10001,0b10001,0b01111,0b00001,0b00010,0b01100),

        // Letters for FINGERS / SIZE / ERASE / EXIT / CURSOR
        'A' => g!(0b01110,0b10001,0b10001,0b11111,0b10001,0b10001,0b10001),
        'C' => g!(0b01110,0b10001,0b10000,0b10000,0b10000,0b10001,0b01110),
        'D' => g!(0b11100,0b10010,0b10001,0b10001,0b10001,0b10010,0b11100),
        'E' => g!(0b11111,0b10000,0b10000,0b11110,0b10000,0b10000,0b11111),
        'F' => g!(0b11111,0b10000,0b10000,0b11110,0b10000,0b10000,0b10000),
        'G' => g!(0b01110,0b10001,0b10000,0b10111,0b10001,0b10001,0b01111),
        'I' => g!(0b01110,0b00100,0b00100,0b00100,0b00100,0b00100,0b01110),
        'L' => g!(0b10000,0b10000,0b10000,0b10000,0b10000,0b10000,0b11111),
        'N' => g!(0b10001,0b11001,0b10101,0b10011,0b10001,0b10001,0b10001),
        'O' => g!(0b01110,0b10001,0b10001,0b10001,0b10001,0b10001,0b01110),
        'P' => g!(0b11110,0b10001,0b10001,0b11110,0b10000,0b10000,0b10000),
        'R' => g!(0b11110,0b10001,0b10001,0b11110,0b10100,0b10010,0b10001),
        'S' => g!(0b01111,0b10000,0b10000,0b01110,0b00001,0b00001,0b11110),
        'T' => g!(0b11111,0b00100,0b00100,0b00100,0b00100,0b00100,0b00100),
        'U' => g!(0b10001,0b10001,0b10001,0b10001,0b10001,0b10001,0b01110),
        'X' => g!(0b10001,0b10001,0b01010,0b00100,0b01010,0b10001,0b10001),
        'Z' => g!(0b11111,0b00001,0b00010,0b00100,0b01000,0b10000,0b11111),

        // Punctuation
        ' ' => g!(0b00000,0b00000,0b00000,0b00000,0b00000,0b00000,0b00000),
        '|' => g!(0b00100,0b00100,0b00100,0b00100,0b00100,0b00100,0b00100),
        ':' => g!(0b00000,0b00100,0b00000,0b00000,0b00100,0b00000,0b00000),
        '.' => g!(0b00000,0b00000,0b00000,0b00000,0b00000,0b00100,0b00000),
        '-' => g!(0b00000,0b00000,0b00000,0b11111,0b00000,0b00000,0b00000),
        '?' => g!(0b01110,0b10001,0b00001,0b00010,0b00100,0b00000,0b00100),

        _ => None,
    }
}

/// Plot one glyph's set bits as `scale`x`scale` blocks.
fn blit_glyph(fb: &mut FrameBuffer, x: i32, y: i32, rows: &[u8; 7], scale: i32, color: Rgb) {
    for (ry, rowbits) in rows.iter().enumerate() {
        for rx in 0..5 {
            if (rowbits & (1 << (4 - rx))) != 0 {
                let (px, py) = (x + rx * scale, y + ry as i32 * scale);
                fill_rect(fb, px, py, px + scale - 1, py + scale - 1, color);
            }
        }
    }
}

/// Draw a text string using 5x7 glyphs, each pixel blown up to `scale`.
/// Visual: compact HUD text with a 1-step black shadow for contrast.
/// Returns the x just past the last glyph.
pub fn draw_text(fb: &mut FrameBuffer, mut x: i32, y: i32, text: &str, scale: i32, color: Rgb) -> i32 {
    let scale = scale.max(1);
    for ch in text.chars() {
        if let Some(rows) = glyph5x7(ch) {
            blit_glyph(fb, x + scale, y + scale, &rows, scale, Rgb::BLACK);
            blit_glyph(fb, x, y, &rows, scale, color);
        }
        x += 6 * scale; // 5 pixels glyph width + 1 pixel spacing
    }
    x
}

/// Width in pixels that `draw_text` will advance for `text`.
pub fn text_width(text: &str, scale: i32) -> i32 {
    text.chars().count() as i32 * 6 * scale.max(1)
}

#[cfg(test)]
mod tests {
    use super::*;

    const BG: Rgb = Rgb::new(10, 10, 10);
    const INK: Rgb = Rgb::new(255, 255, 0);

    fn blank() -> FrameBuffer {
        FrameBuffer::filled(64, 48, BG)
    }

    #[test]
    fn thick_line_covers_its_width_and_nothing_past_it() {
        let mut fb = blank();
        draw_thick_line(&mut fb, Point::new(10, 20), Point::new(50, 20), 9, INK);
        assert_eq!(fb.get(30, 20), Some(INK));
        assert_eq!(fb.get(30, 24), Some(INK));
        assert_eq!(fb.get(30, 25), Some(BG));
        // round cap
        assert_eq!(fb.get(6, 20), Some(INK));
        assert_eq!(fb.get(5, 20), Some(BG));
    }

    #[test]
    fn zero_length_line_is_a_dab() {
        let mut fb = blank();
        draw_thick_line(&mut fb, Point::new(20, 20), Point::new(20, 20), 6, INK);
        assert_eq!(fb.get(20, 20), Some(INK));
        assert_eq!(fb.get(23, 20), Some(INK));
        assert_eq!(fb.get(24, 20), Some(BG));
    }

    #[test]
    fn shapes_clip_at_the_edges() {
        let mut fb = blank();
        fill_circle(&mut fb, Point::new(-3, -3), 6, INK);
        fill_rect(&mut fb, 60, 40, 100, 100, INK);
        draw_thick_line(&mut fb, Point::new(-50, 10), Point::new(-40, 10), 4, INK);
        assert_eq!(fb.get(0, 0), Some(INK));
        assert_eq!(fb.get(63, 47), Some(INK));
        assert_eq!(fb.pixels.len(), 64 * 48);
    }

    #[test]
    fn stroke_rect_leaves_the_inside_alone() {
        let mut fb = blank();
        stroke_rect(&mut fb, 10, 10, 30, 30, 3, Rgb::WHITE);
        assert_eq!(fb.get(10, 10), Some(Rgb::WHITE));
        assert_eq!(fb.get(30, 20), Some(Rgb::WHITE));
        assert_eq!(fb.get(20, 20), Some(BG));
    }

    #[test]
    fn text_advances_per_glyph() {
        let mut fb = blank();
        let end = draw_text(&mut fb, 2, 2, "SIZE:", 1, Rgb::WHITE);
        assert_eq!(end, 2 + text_width("SIZE:", 1));
        assert!(fb.pixels.iter().any(|&p| p == Rgb::WHITE.pack()));
    }
}
