// Particle bursts: glowing dots that rain down from the top edge and shrink away.
// Visual: an open left palm drops a shower of dots; each one shrinks every frame
// until it disappears (~10-24 frames with the default decay).

use crate::draw::fill_circle;
use crate::types::{FrameBuffer, Point, Rgb};

/// One falling dot. `size` is both its radius and its remaining life.
#[derive(Clone, Debug, PartialEq)]
pub struct Particle {
    pub x: f32, pub y: f32,        // position in pixels
    pub vx: f32, pub vy: f32,      // velocity in px/frame
    pub size: f32,
    pub color: Rgb,
}

impl Particle {
    #[inline] fn alive(&self) -> bool { self.size > 0.0 }
}

/// Unordered bag of live particles. Bounded only by decay.
pub struct ParticleSystem {
    particles: Vec<Particle>,
    decay: f32,
}

impl ParticleSystem {
    pub fn new(decay: f32) -> Self {
        Self { particles: Vec::new(), decay }
    }

    #[cfg(test)]
    pub fn len(&self) -> usize { self.particles.len() }
    #[cfg(test)]
    pub fn is_empty(&self) -> bool { self.particles.is_empty() }
    #[cfg(test)]
    pub fn iter(&self) -> impl Iterator<Item = &Particle> { self.particles.iter() }

    #[cfg(test)]
    pub fn push(&mut self, p: Particle) {
        self.particles.push(p);
    }

    /// Add `count` particles along the top edge.
    /// x in [0,width], vx in [-1,1], vy in [2,5], size an integer in `size_range`,
    /// color (r,255,255) with r in [150,255].
    pub fn spawn(&mut self, rng: &mut fastrand::Rng, count: usize, width: usize, size_range: (i32, i32)) {
        let (lo, hi) = (size_range.0.min(size_range.1), size_range.0.max(size_range.1));
        self.particles.reserve(count);
        for _ in 0..count {
            let x = rng.i32(0..=width as i32) as f32;
            let vx = -1.0 + 2.0 * rng.f32();
            let vy = 2.0 + 3.0 * rng.f32();
            let size = rng.i32(lo..=hi) as f32;
            let color = Rgb::new(rng.u8(150..=255), 255, 255);
            self.particles.push(Particle { x, y: 0.0, vx, vy, size, color });
        }
    }

    /// One frame of motion: move by velocity, shrink by the decay, drop the dead.
    pub fn advance(&mut self) {
        for p in &mut self.particles {
            p.x += p.vx;
            p.y += p.vy;
            p.size -= self.decay;
        }
        self.particles.retain(Particle::alive);
    }

    /// Draw every live particle as a filled disc of radius `size`.
    pub fn render(&self, fb: &mut FrameBuffer) {
        for p in self.particles.iter().filter(|p| p.alive()) {
            fill_circle(fb, Point::new(p.x as i32, p.y as i32), p.size as i32, p.color);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    fn particle(size: f32) -> Particle {
        Particle { x: 50.0, y: 10.0, vx: 1.0, vy: 3.0, size, color: Rgb::new(200, 255, 255) }
    }

    #[test]
    fn size_six_lives_exactly_twelve_frames() {
        let mut ps = ParticleSystem::new(0.5);
        ps.push(particle(6.0));
        for _ in 0..11 { ps.advance(); }
        assert_eq!(ps.len(), 1);
        ps.advance();
        assert!(ps.is_empty());
    }

    #[test]
    fn advance_integrates_velocity() {
        let mut ps = ParticleSystem::new(0.5);
        ps.push(particle(6.0));
        ps.advance();
        ps.advance();
        let p = ps.iter().next().unwrap();
        assert_relative_eq!(p.x, 52.0);
        assert_relative_eq!(p.y, 16.0);
        assert_relative_eq!(p.size, 5.0);
    }

    #[test]
    fn spawn_respects_ranges() {
        let mut rng = fastrand::Rng::with_seed(7);
        let mut ps = ParticleSystem::new(0.5);
        ps.spawn(&mut rng, 30, 1280, (5, 12));
        assert_eq!(ps.len(), 30);
        for p in ps.iter() {
            assert!((0.0..=1280.0).contains(&p.x));
            assert_relative_eq!(p.y, 0.0);
            assert!((-1.0..=1.0).contains(&p.vx));
            assert!((2.0..=5.0).contains(&p.vy));
            assert!((5.0..=12.0).contains(&p.size));
            assert_eq!(p.size.fract(), 0.0);
            assert!(p.color.r >= 150);
            assert_eq!((p.color.g, p.color.b), (255, 255));
        }
    }

    #[test]
    fn same_seed_same_burst() {
        let mut a = ParticleSystem::new(0.5);
        let mut b = ParticleSystem::new(0.5);
        a.spawn(&mut fastrand::Rng::with_seed(42), 5, 640, (5, 12));
        b.spawn(&mut fastrand::Rng::with_seed(42), 5, 640, (5, 12));
        assert!(a.iter().eq(b.iter()));
    }

    #[test]
    fn render_draws_at_position() {
        let mut fb = FrameBuffer::filled(100, 100, Rgb::BLACK);
        let mut ps = ParticleSystem::new(0.5);
        ps.push(particle(4.0));
        ps.render(&mut fb);
        assert_eq!(fb.get(50, 10), Some(Rgb::new(200, 255, 255)));
        assert_eq!(fb.get(50, 15), Some(Rgb::BLACK));
    }
}
