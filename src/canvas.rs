// The persistent drawing surface.
// Visual: everything you paint lives here; each frame it is mixed 40% over the live video.
// Strokes only ever land on this buffer, never on the camera frame.

use crate::draw::draw_thick_line;
use crate::error::Error;
use crate::types::{FrameBuffer, Point, Rgb};

pub struct Canvas {
    buf: FrameBuffer,
    palette: Vec<Rgb>,
    background_index: usize,
}

impl Canvas {
    /// A canvas filled with `palette[0]`. An empty palette falls back to black.
    pub fn new(width: usize, height: usize, palette: Vec<Rgb>) -> Self {
        let palette = if palette.is_empty() { vec![Rgb::BLACK] } else { palette };
        let buf = FrameBuffer::filled(width, height, palette[0]);
        Self { buf, palette, background_index: 0 }
    }

    pub fn width(&self) -> usize { self.buf.width }
    pub fn height(&self) -> usize { self.buf.height }
    #[cfg(test)]
    pub fn pixels(&self) -> &FrameBuffer { &self.buf }
    pub fn background_index(&self) -> usize { self.background_index }

    pub fn background(&self) -> Rgb {
        self.palette[self.background_index % self.palette.len()]
    }

    /// Paint one brush segment. Stays until the next clear.
    pub fn stroke(&mut self, from: Point, to: Point, color: Rgb, thickness: i32) {
        draw_thick_line(&mut self.buf, from, to, thickness, color);
    }

    /// Wipe every stroke; all pixels become the current background.
    pub fn clear(&mut self) {
        let packed = self.background().pack();
        self.buf.pixels.fill(packed);
    }

    /// Step to the next palette entry (wrapping) and clear.
    pub fn next_background(&mut self) {
        self.background_index = (self.background_index + 1) % self.palette.len();
        self.clear();
    }

    /// `frame = frame * frame_weight + canvas * canvas_weight`, per channel, rounded and saturated.
    /// Visual: the painting shows through the live video like a translucent layer.
    pub fn blend_onto(&self, frame: &mut FrameBuffer, frame_weight: f32, canvas_weight: f32) -> Result<(), Error> {
        if frame.width != self.buf.width || frame.height != self.buf.height {
            return Err(Error::FrameSize {
                expected: (self.buf.width, self.buf.height),
                actual: (frame.width, frame.height),
            });
        }

        let mix = |f: u8, c: u8| -> u8 {
            (f as f32 * frame_weight + c as f32 * canvas_weight).round().clamp(0.0, 255.0) as u8
        };
        for (dst, &src) in frame.pixels.iter_mut().zip(self.buf.pixels.iter()) {
            let f = Rgb::unpack(*dst);
            let c = Rgb::unpack(src);
            *dst = Rgb::new(mix(f.r, c.r), mix(f.g, c.g), mix(f.b, c.b)).pack();
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn palette() -> Vec<Rgb> {
        vec![Rgb::new(10, 10, 10), Rgb::new(50, 10, 10), Rgb::new(10, 50, 10), Rgb::new(10, 10, 50)]
    }

    fn make_canvas() -> Canvas {
        Canvas::new(120, 80, palette())
    }

    #[test]
    fn starts_filled_with_first_background() {
        let canvas = make_canvas();
        assert_eq!(canvas.background_index(), 0);
        assert!(canvas.pixels().pixels.iter().all(|&p| p == palette()[0].pack()));
    }

    #[test]
    fn clear_leaves_no_stroke_pixels() {
        let mut canvas = make_canvas();
        canvas.stroke(Point::new(5, 5), Point::new(100, 60), Rgb::new(255, 0, 255), 15);
        assert!(canvas.pixels().pixels.iter().any(|&p| p != canvas.background().pack()));
        canvas.clear();
        let bg = canvas.background().pack();
        assert!(canvas.pixels().pixels.iter().all(|&p| p == bg));
    }

    #[test]
    fn next_background_cycles_through_the_palette() {
        let mut canvas = make_canvas();
        canvas.stroke(Point::new(5, 5), Point::new(20, 5), Rgb::WHITE, 5);
        canvas.next_background();
        assert_eq!(canvas.background_index(), 1);
        assert!(canvas.pixels().pixels.iter().all(|&p| p == palette()[1].pack()));
        for _ in 0..3 { canvas.next_background(); }
        assert_eq!(canvas.background_index(), 0);
    }

    #[test]
    fn strokes_accumulate_between_clears() {
        let mut canvas = make_canvas();
        canvas.stroke(Point::new(10, 10), Point::new(30, 10), Rgb::WHITE, 3);
        canvas.stroke(Point::new(10, 40), Point::new(30, 40), Rgb::WHITE, 3);
        assert_eq!(canvas.pixels().get(20, 10), Some(Rgb::WHITE));
        assert_eq!(canvas.pixels().get(20, 40), Some(Rgb::WHITE));
    }

    #[test]
    fn blend_uses_fixed_weights() {
        let mut canvas = make_canvas();
        canvas.stroke(Point::new(0, 0), Point::new(0, 0), Rgb::new(200, 0, 100), 1);
        let mut frame = FrameBuffer::filled(120, 80, Rgb::new(100, 100, 100));
        canvas.blend_onto(&mut frame, 0.6, 0.4).unwrap();
        assert_eq!(frame.get(0, 0), Some(Rgb::new(140, 60, 100)));
        assert_eq!(frame.get(60, 60), Some(Rgb::new(64, 64, 64)));
    }

    #[test]
    fn blend_rejects_mismatched_frame() {
        let canvas = make_canvas();
        let mut frame = FrameBuffer::filled(64, 48, Rgb::BLACK);
        assert!(matches!(canvas.blend_onto(&mut frame, 0.6, 0.4), Err(Error::FrameSize { .. })));
    }
}
