//! Simulation state and core types
//!
//! Everything the engine mutates between steps lives here.

use glam::Vec2;
use serde::{Deserialize, Serialize};

use crate::consts::*;

/// Immutable physics tuning for one engine
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PhysicsConstants {
    /// Velocity retention per step (< 1.0)
    pub friction: f32,
    /// Wall rebound factor
    pub restitution: f32,
    /// Fixed timestep (seconds)
    pub dt: f32,
    /// Tilt-to-acceleration sensitivity
    pub sensor_factor: f32,
    /// Velocity to per-step displacement scale
    pub position_scale: f32,
}

impl Default for PhysicsConstants {
    fn default() -> Self {
        Self {
            friction: FRICTION,
            restitution: RESTITUTION,
            dt: SIM_DT,
            sensor_factor: SENSOR_FACTOR,
            position_scale: POSITION_SCALE,
        }
    }
}

/// Ball kinematics
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct BallState {
    pub pos: Vec2,
    pub vel: Vec2,
    pub radius: f32,
}

impl BallState {
    pub fn new(radius: f32) -> Self {
        Self {
            pos: Vec2::ZERO,
            vel: Vec2::ZERO,
            radius,
        }
    }

    /// Put the ball back on the spot, at rest
    pub fn reset_to(&mut self, center: Vec2) {
        self.pos = center;
        self.vel = Vec2::ZERO;
    }
}

/// Per-goal "already counted" flag
///
/// Armed when a goal is counted, disarmed as soon as the ball centre is
/// outside the goal mouth again.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct GoalLatch {
    armed: bool,
}

impl GoalLatch {
    #[inline]
    pub fn is_armed(&self) -> bool {
        self.armed
    }

    /// Feed the current occupancy. Returns true only on the unarmed -> armed edge.
    pub fn update(&mut self, inside: bool) -> bool {
        match (inside, self.armed) {
            (true, false) => {
                self.armed = true;
                true
            }
            (false, _) => {
                self.armed = false;
                false
            }
            (true, true) => false,
        }
    }

    pub fn disarm(&mut self) {
        self.armed = false;
    }
}

/// Output of a single simulation step
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct StepResult {
    /// Ball centre after the step (after any post-goal reset)
    pub position: Vec2,
    pub top_goal_scored: bool,
    pub bottom_goal_scored: bool,
}

impl StepResult {
    /// True if either goal fired this step
    #[inline]
    pub fn any_goal(&self) -> bool {
        self.top_goal_scored || self.bottom_goal_scored
    }
}
