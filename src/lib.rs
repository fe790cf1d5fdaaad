//! Tilt Soccer - a tilt-controlled tabletop soccer simulation
//!
//! Core modules:
//! - `sim`: Deterministic simulation (physics, collisions, goal detection, tilt input)
//! - `scoreboard`: Goal counters owned by the caller
//! - `settings`: Data-driven tuning and layout parameters

pub mod scoreboard;
pub mod settings;
pub mod sim;

pub use scoreboard::ScoreBoard;
pub use settings::Settings;

use glam::Vec2;

/// Game configuration constants
pub mod consts {
    /// Fixed simulation timestep (seconds, ~60 Hz)
    pub const SIM_DT: f32 = 0.016;
    /// Maximum substeps per frame to prevent spiral of death
    pub const MAX_SUBSTEPS: u32 = 8;
    /// Frame time clamp (seconds) so a stalled host doesn't fast-forward the match
    pub const MAX_FRAME_DT: f32 = 0.25;

    /// Velocity retention per step (applied every step, not just on contact)
    pub const FRICTION: f32 = 0.92;
    /// Wall rebound factor. Above 1.0 on purpose: every bounce speeds the ball up.
    pub const RESTITUTION: f32 = 1.2;
    /// Tilt-to-acceleration sensitivity
    pub const SENSOR_FACTOR: f32 = 8.0;
    /// Per-step velocity to field-pixel displacement scale
    pub const POSITION_SCALE: f32 = 1000.0;

    /// Goal mouth size as a fraction of the field
    pub const GOAL_WIDTH_FRACTION: f32 = 0.15;
    pub const GOAL_HEIGHT_FRACTION: f32 = 0.03;

    /// Ball radius in density-independent pixels
    pub const BALL_RADIUS_DP: f32 = 10.0;
    /// Share of the screen height reserved for the score header
    pub const HEADER_FRACTION: f32 = 0.1;

    /// Standard gravity; accelerometer readings saturate around this value
    pub const GRAVITY: f32 = 9.81;
}

/// Centre point of a `width` x `height` field
#[inline]
pub fn field_center(width: f32, height: f32) -> Vec2 {
    Vec2::new(width / 2.0, height / 2.0)
}

/// Convert density-independent pixels to physical pixels
#[inline]
pub fn dp_to_px(dp: f32, density: f32) -> f32 {
    dp * density
}
