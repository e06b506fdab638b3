//! Gesture interpretation and frame composition.
//!
//! [`Engine`] owns everything that persists between frames: the drawing
//! state, the canvas, live particles, the toolbar and the command gates.
//! Each frame the app calls [`Engine::process_frame`] with whatever hands the
//! detector saw, then [`Engine::compose`] to paint the result over the live
//! camera frame.
//!
//! Hands are interpreted in a fixed order: the first `Left` observation, then
//! the first `Right` one. Extra observations with the same label are ignored,
//! so when a detector mislabels both hands as `Left` (or both as `Right`) the
//! second hand is invisible for that frame: no gestures, no cursor.
//!
//! * Left hand: thumb-index spread sets brush size every frame. An open palm
//!   drops a particle burst, a fist clears the canvas, one raised finger
//!   switches to the next background. These three go through the cooldown.
//! * Right hand: thumb-index pinch works the pen (a 40/60 px latch), an
//!   index-middle click picks a toolbar button.

use crate::canvas::Canvas;
use crate::config::Config;
use crate::cooldown::{Command, CommandGates};
use crate::draw::{draw_text, draw_thick_line, fill_circle, text_width};
use crate::error::Result;
use crate::geometry::{distance, interpolate};
use crate::landmarks::{HandLabel, HandObservation, INDEX_TIP, MIDDLE_TIP, THUMB_TIP};
use crate::particles::ParticleSystem;
use crate::types::{FrameBuffer, Point, Rgb};
use crate::ui::{RegionId, RegionKind, RegionRegistry};
use log::{debug, info};
use std::time::Instant;

const GAUGE_COLOR: Rgb = Rgb::new(0, 255, 255);
const POINTER_LABEL: Rgb = Rgb::new(200, 200, 200);
const STATUS_COLOR: Rgb = Rgb::new(255, 255, 0);

/// Per-hand stroke memory. `None` means the pen was up last frame.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct HandSlot {
    pub last_point: Option<Point>,
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct DrawingState {
    pub draw_color: Rgb,
    pub thickness: i32,
    /// Toolbar button currently in effect (a color or the eraser).
    pub active: RegionId,
    pub pen_down: bool,
    /// Indexed by [`slot_of`].
    pub slots: [HandSlot; 2],
}

/// Fixed slot per label.
pub fn slot_of(label: HandLabel) -> usize {
    match label {
        HandLabel::Left => 0,
        HandLabel::Right => 1,
    }
}

/// Things drawn on the live frame for this frame only.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
enum Overlay {
    /// Left hand: thumb-to-index bar with a disc the size of the brush.
    BrushGauge { thumb: Point, index: Point, radius: i32 },
    /// Right hand: where a click or stroke would land.
    Pointer(Point),
}

pub struct Engine {
    config: Config,
    state: DrawingState,
    canvas: Canvas,
    particles: ParticleSystem,
    regions: RegionRegistry,
    gates: CommandGates,
    rng: fastrand::Rng,
    overlays: Vec<Overlay>,
    fingers: [Option<u8>; 2],
    exit_requested: bool,
}

impl Engine {
    pub fn new(config: Config, width: usize, height: usize) -> Self {
        Self::with_rng(config, width, height, fastrand::Rng::new())
    }

    /// Same as `new` but with a caller-supplied random source for particle bursts.
    pub fn with_rng(config: Config, width: usize, height: usize, rng: fastrand::Rng) -> Self {
        let regions = RegionRegistry::layout_for_width(width);
        let (active, draw_color) = regions
            .find("yellow")
            .and_then(|id| match regions.get(id)?.kind {
                RegionKind::Color(c) => Some((id, c)),
                _ => None,
            })
            .unwrap_or((0, Rgb::new(255, 255, 0)));

        Self {
            state: DrawingState {
                draw_color,
                thickness: config.initial_thickness,
                active,
                pen_down: false,
                slots: [HandSlot::default(); 2],
            },
            canvas: Canvas::new(width, height, config.backgrounds.clone()),
            particles: ParticleSystem::new(config.particle_decay),
            gates: CommandGates::new(config.cooldown_policy, config.cooldown),
            regions,
            rng,
            overlays: Vec::new(),
            fingers: [None; 2],
            exit_requested: false,
            config,
        }
    }

    #[cfg(test)]
    pub fn state(&self) -> &DrawingState { &self.state }
    #[cfg(test)]
    pub fn canvas(&self) -> &Canvas { &self.canvas }
    #[cfg(test)]
    pub fn particles(&self) -> &ParticleSystem { &self.particles }
    #[cfg(test)]
    pub fn regions(&self) -> &RegionRegistry { &self.regions }

    /// Set once the exit button is clicked; the main loop stops on the next pass.
    pub fn exit_requested(&self) -> bool { self.exit_requested }

    /// Finger counts from the last processed frame, indexed by [`slot_of`].
    #[cfg(test)]
    pub fn fingers(&self) -> [Option<u8>; 2] { self.fingers }

    /// Interpret this frame's hands. Left first, then right.
    pub fn process_frame(&mut self, hands: &[HandObservation], now: Instant) {
        self.overlays.clear();
        self.fingers = [None; 2];

        for label in [HandLabel::Left, HandLabel::Right] {
            let mut seen = hands.iter().filter(|h| h.label == label);
            let Some(hand) = seen.next() else { continue };
            if seen.next().is_some() {
                debug!("{label:?}: more than one hand, using the first");
            }
            if !hand.is_complete() {
                debug!("{label:?}: only {} landmarks, skipping", hand.landmarks.len());
                continue;
            }
            self.fingers[slot_of(label)] = hand.fingers_up();
            match label {
                HandLabel::Left => self.handle_left(hand, now),
                HandLabel::Right => self.handle_right(hand),
            }
        }
    }

    fn pixel(&self, hand: &HandObservation, idx: usize) -> Option<Point> {
        hand.pixel(idx, self.canvas.width(), self.canvas.height())
    }

    fn handle_left(&mut self, hand: &HandObservation, now: Instant) {
        let (Some(index), Some(thumb)) = (self.pixel(hand, INDEX_TIP), self.pixel(hand, THUMB_TIP)) else {
            return;
        };

        let (lo, hi) = self.config.thickness_range;
        let mapped = interpolate(distance(index, thumb), self.config.brush_domain, (lo, hi));
        self.state.thickness = (mapped as i32).clamp(lo as i32, hi as i32);
        self.overlays.push(Overlay::BrushGauge { thumb, index, radius: self.state.thickness / 2 });

        let command = match self.fingers[slot_of(HandLabel::Left)] {
            Some(5) => Command::Burst,
            Some(0) => Command::Clear,
            Some(1) => Command::NextBackground,
            _ => return,
        };
        if !self.gates.ready(command, now) {
            debug!("{command:?} suppressed by cooldown");
            return;
        }

        match command {
            Command::Burst => {
                info!("Left hand: open palm, particle burst");
                self.particles.spawn(
                    &mut self.rng,
                    self.config.particle_batch,
                    self.canvas.width(),
                    self.config.particle_size_range,
                );
            }
            Command::Clear => {
                info!("Left hand: fist, clear canvas");
                self.canvas.clear();
            }
            Command::NextBackground => {
                self.canvas.next_background();
                info!("Left hand: one finger, background {}", self.canvas.background_index());
            }
        }
        self.gates.reset(command, now);
    }

    fn handle_right(&mut self, hand: &HandObservation) {
        let (Some(index), Some(middle), Some(thumb)) = (
            self.pixel(hand, INDEX_TIP),
            self.pixel(hand, MIDDLE_TIP),
            self.pixel(hand, THUMB_TIP),
        ) else {
            return;
        };
        self.overlays.push(Overlay::Pointer(index));

        let click = distance(index, middle);
        let pinch = distance(index, thumb);

        if pinch < self.config.pen_down_below {
            self.state.pen_down = true;
        } else if pinch > self.config.pen_up_above {
            self.state.pen_down = false;
        }

        let mut over_ui = false;
        if click < self.config.click_below {
            self.state.pen_down = false;
            if let Some(id) = self.regions.hit(index) {
                over_ui = true;
                self.select(id);
            }
        }

        let slot = &mut self.state.slots[slot_of(HandLabel::Right)];
        if self.state.pen_down && !over_ui {
            let color = match self.regions.get(self.state.active).map(|r| r.kind) {
                Some(RegionKind::Eraser) => self.canvas.background(),
                _ => self.state.draw_color,
            };
            let from = slot.last_point.unwrap_or(index);
            self.canvas.stroke(from, index, color, self.state.thickness);
            slot.last_point = Some(index);
        } else {
            slot.last_point = None;
        }
    }

    fn select(&mut self, id: RegionId) {
        let Some(region) = self.regions.get(id) else { return };
        info!("UI click: {}", region.key.to_uppercase());
        match region.kind {
            RegionKind::Exit => self.exit_requested = true,
            RegionKind::Eraser => self.state.active = id,
            RegionKind::Color(c) => {
                self.state.active = id;
                self.state.draw_color = c;
            }
        }
    }

    /// Paint this frame: canvas blend, particles, toolbar, hand overlays, status line.
    /// Advances particles by one frame.
    pub fn compose(&mut self, frame: &mut FrameBuffer) -> Result<()> {
        self.canvas.blend_onto(frame, self.config.frame_weight, self.config.canvas_weight)?;

        self.particles.advance();
        self.particles.render(frame);

        self.regions.render(frame, Some(self.state.active));

        for overlay in &self.overlays {
            match *overlay {
                Overlay::BrushGauge { thumb, index, radius } => {
                    draw_thick_line(frame, thumb, index, 3, GAUGE_COLOR);
                    fill_circle(frame, index, radius, GAUGE_COLOR);
                }
                Overlay::Pointer(p) => {
                    fill_circle(frame, p, 8, Rgb::WHITE);
                    draw_text(frame, p.x + 10, p.y - 17, "CURSOR", 1, POINTER_LABEL);
                }
            }
        }

        let show = |n: Option<u8>| n.map_or_else(|| "?".to_owned(), |n| n.to_string());
        let fingers = format!(
            "FINGERS - L:{} R:{}",
            show(self.fingers[slot_of(HandLabel::Left)]),
            show(self.fingers[slot_of(HandLabel::Right)]),
        );
        let (w, h) = (frame.width as i32, frame.height as i32);
        let baseline = h - 34;
        draw_text(frame, w - text_width(&fingers, 2) - 10, baseline, &fingers, 2, STATUS_COLOR);
        draw_text(frame, 10, baseline, &format!("SIZE: {}", self.state.thickness), 2, STATUS_COLOR);
        Ok(())
    }
}
