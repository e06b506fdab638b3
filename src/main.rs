// What you SEE:
// • Live (mirrored) camera is the base image; your painting floats over it at 40%.
// • Right hand: pinch thumb+index to paint, bring index+middle together over a button to pick it.
// • Left hand: thumb-index spread sets brush size; open palm = particle rain,
//   fist = clear, one finger = next background.
// • Without a hand detector the mouse/keyboard stand in (see source.rs). ESC quits.

mod camera;
mod canvas;
mod config;
mod cooldown;
mod draw;
mod engine;
mod error;
mod geometry;
mod landmarks;
mod particles;
mod source;
mod types;
mod ui;

use camera::CameraCapture;
use config::Config;
use draw::Drawer;
use engine::Engine;
use error::Error;
use log::{info, warn};
use source::{HandSource, SimHandSource};
use std::time::{Duration, Instant};

fn main() -> Result<(), Error> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let config = Config::from_env();

    /* --- Camera + window setup ---
       Visual: window opens with live camera feed. */
    let mut cam = CameraCapture::new(config.camera_index, config.width, config.height)?;
    let (w, h) = cam.resolution();
    let (w, h) = (w as usize, h as usize);
    let mut drawer = Drawer::new("Air Canvas", w, h)?;

    let mut hands_in = SimHandSource::default();
    let mut engine = Engine::new(config, w, h);

    info!("--- Air Canvas initialized ({w}x{h}) ---");
    info!("Right Hand: Drawing/Clicking | Left Hand: Brush Size/Gestures");

    let mut last_fps_time = Instant::now();
    let mut frames_this_second: u32 = 0;

    /* ------------------------------ Main loop ------------------------------ */
    while drawer.is_open() && !drawer.esc_pressed() && !engine.exit_requested() {
        let now = Instant::now();

        /* 1) Grab a fresh live frame (already mirrored). */
        let mut screen = cam.next_frame()?;

        /* 2) Hands -> gestures -> canvas / particles / tool */
        let hands = hands_in.poll(&drawer, (screen.width, screen.height));
        engine.process_frame(&hands, now);

        /* 3) Canvas blend, particles, toolbar, cursors, status */
        match engine.compose(&mut screen) {
            Ok(()) => {}
            Err(Error::FrameSize { expected, actual }) => {
                warn!("camera frame {actual:?} does not match canvas {expected:?}; skipping");
                continue;
            }
            Err(e) => return Err(e),
        }

        /* 4) Present to the window. */
        drawer.present(&screen)?;

        /* 5) FPS counter, once per second */
        frames_this_second += 1;
        if now.duration_since(last_fps_time) >= Duration::from_secs(1) {
            let secs = now.duration_since(last_fps_time).as_secs_f32();
            info!("FPS: {:.1}", frames_this_second as f32 / secs);
            frames_this_second = 0;
            last_fps_time = now;
        }
    }

    info!("--- Exiting Air Canvas ---");
    Ok(())
}
