// Every tunable the app recognizes, in one place.
// Defaults reproduce the reference setup (1280x720, 0.5s cooldown, 40/60px pen latch, ...).
// A few can be overridden from the environment at startup.

use crate::types::Rgb;
use log::warn;
use std::time::Duration;

/// How the three left-hand commands (burst, clear, next background) share timers.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum CooldownPolicy {
    /// One timer for all commands: firing "clear" also blocks "burst" for the window.
    Shared,
    /// Each command has its own timer.
    PerGesture,
}

#[derive(Clone, Debug)]
pub struct Config {
    pub camera_index: u32,
    pub width: u32,
    pub height: u32,

    pub cooldown: Duration,
    pub cooldown_policy: CooldownPolicy,

    /// Pinch below this turns the pen on (right hand).
    pub pen_down_below: f32,
    /// Pinch above this turns the pen off. In between the latch holds.
    pub pen_up_above: f32,
    /// Index-middle distance below this is a UI click.
    pub click_below: f32,

    /// Left-hand pinch distance domain mapped onto `thickness_range`.
    pub brush_domain: (f32, f32),
    pub thickness_range: (f32, f32),
    pub initial_thickness: i32,

    pub particle_batch: usize,
    pub particle_decay: f32,
    pub particle_size_range: (i32, i32),

    /// addWeighted-style mix: frame * frame_weight + canvas * canvas_weight.
    pub frame_weight: f32,
    pub canvas_weight: f32,

    pub backgrounds: Vec<Rgb>,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            camera_index: 0,
            width: 1280,
            height: 720,
            cooldown: Duration::from_millis(500),
            cooldown_policy: CooldownPolicy::Shared,
            pen_down_below: 40.0,
            pen_up_above: 60.0,
            click_below: 40.0,
            brush_domain: (30.0, 200.0),
            thickness_range: (5.0, 100.0),
            initial_thickness: 15,
            particle_batch: 30,
            particle_decay: 0.5,
            particle_size_range: (5, 12),
            frame_weight: 0.6,
            canvas_weight: 0.4,
            backgrounds: vec![
                Rgb::new(10, 10, 10),
                Rgb::new(50, 10, 10),
                Rgb::new(10, 50, 10),
                Rgb::new(10, 10, 50),
            ],
        }
    }
}

impl Config {
    /// Defaults, then AIR_CANVAS_* environment overrides. Bad values are ignored.
    pub fn from_env() -> Self {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Self {
        let mut cfg = Self::default();
        if let Some(v) = parse_var::<u32>(&lookup, "AIR_CANVAS_CAMERA") { cfg.camera_index = v; }
        if let Some(v) = parse_var::<u32>(&lookup, "AIR_CANVAS_WIDTH") { cfg.width = v; }
        if let Some(v) = parse_var::<u32>(&lookup, "AIR_CANVAS_HEIGHT") { cfg.height = v; }
        if let Some(ms) = parse_var::<u64>(&lookup, "AIR_CANVAS_COOLDOWN_MS") {
            cfg.cooldown = Duration::from_millis(ms);
        }
        if let Some(raw) = lookup("AIR_CANVAS_PER_GESTURE_COOLDOWN") {
            match raw.trim() {
                "1" | "true" | "yes" => cfg.cooldown_policy = CooldownPolicy::PerGesture,
                "0" | "false" | "no" => cfg.cooldown_policy = CooldownPolicy::Shared,
                other => warn!("AIR_CANVAS_PER_GESTURE_COOLDOWN: ignoring {other:?}"),
            }
        }
        cfg
    }
}

fn parse_var<T: std::str::FromStr>(lookup: &impl Fn(&str) -> Option<String>, key: &str) -> Option<T> {
    let raw = lookup(key)?;
    match raw.trim().parse::<T>() {
        Ok(v) => Some(v),
        Err(_) => {
            warn!("{key}: ignoring unparseable value {raw:?}");
            None
        }
    }
}
