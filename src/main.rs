//! Tilt Soccer entry point
//!
//! Headless native runner: drives a match from a synthetic accelerometer at a
//! 60 Hz host frame rate, logs goals, and prints the final score as JSON.
//!
//! Usage: `tilt-soccer [settings.json] [seconds]`
//! - `RUST_LOG=info` shows goals, `debug` shows engine detail
//! - `TILT_SOCCER_SEED` seeds the synthetic sensor
//! - `TILT_SOCCER_NO_SENSOR` runs without an accelerometer

use tilt_soccer::Settings;
use tilt_soccer::sim::{NoSensor, Simulation, TiltSample, WanderingTilt};

/// Portrait phone screen, in pixels
const SCREEN_WIDTH: f32 = 1080.0;
const SCREEN_HEIGHT: f32 = 1920.0;
/// Host frame time
const FRAME_DT: f32 = 1.0 / 60.0;
const DEFAULT_RUN_SECS: f32 = 60.0;
const DEFAULT_SEED: u64 = 12345;

fn main() {
    env_logger::init();
    log::info!("Tilt Soccer (headless) starting...");

    let mut args = std::env::args().skip(1);
    let settings = match args.next() {
        Some(path) => Settings::load(path),
        None => Settings::default(),
    };
    let run_secs = args
        .next()
        .and_then(|s| s.parse::<f32>().ok())
        .filter(|s| s.is_finite() && *s > 0.0)
        .unwrap_or(DEFAULT_RUN_SECS);
    let seed = std::env::var("TILT_SOCCER_SEED")
        .ok()
        .and_then(|s| s.parse().ok())
        .unwrap_or(DEFAULT_SEED);

    let mut sensor: Box<dyn Iterator<Item = TiltSample>> = if std::env::var_os("TILT_SOCCER_NO_SENSOR").is_some() {
        log::warn!("Accelerometer not available - ball will only coast");
        Box::new(NoSensor)
    } else {
        log::info!("Synthetic accelerometer seed: {}", seed);
        Box::new(WanderingTilt::new(seed))
    };

    let mut sim = Simulation::new(settings, SCREEN_WIDTH, SCREEN_HEIGHT);
    let frames = (run_secs / FRAME_DT).ceil() as u64;
    let mut steps = 0u64;

    for frame in 0..frames {
        if let Some(sample) = sensor.next() {
            sim.push_tilt(sample);
        }

        // Rotate to landscape halfway through
        if frame == frames / 2 {
            log::info!("Rotating device");
            sim.resize(SCREEN_HEIGHT, SCREEN_WIDTH);
        }

        let report = sim.advance(FRAME_DT);
        steps += report.steps as u64;
        log::trace!("frame {} ball at ({:.1}, {:.1})", frame, report.position.x, report.position.y);
    }

    log::info!("Ran {} steps over {:.1}s: {}", steps, run_secs, sim.score().label());
    match sim.score().to_json() {
        Ok(json) => println!("{}", json),
        Err(e) => log::error!("Failed to serialize score: {}", e),
    }
}
