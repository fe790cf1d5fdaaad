//! Deterministic simulation module
//!
//! All gameplay logic lives here. This module must be pure and deterministic:
//! - Fixed timestep only
//! - Seeded RNG only (synthetic tilt)
//! - No rendering or platform dependencies

pub mod engine;
pub mod field;
pub mod runner;
pub mod state;
pub mod tilt;

pub use engine::BallPhysicsEngine;
pub use field::{FieldGeometry, GoalRect};
pub use runner::{FrameReport, Simulation};
pub use state::{BallState, GoalLatch, PhysicsConstants, StepResult};
pub use tilt::{ConstantTilt, NoSensor, TiltLatch, TiltSample, WanderingTilt};
