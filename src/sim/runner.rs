//! Fixed-rate driver
//!
//! Turns variable host frame times into whole engine steps, latches the
//! newest tilt reading between frames, and tallies goals on the score board.

use glam::Vec2;

use super::engine::BallPhysicsEngine;
use super::state::StepResult;
use super::tilt::{TiltLatch, TiltSample};
use crate::consts::{MAX_FRAME_DT, MAX_SUBSTEPS};
use crate::scoreboard::ScoreBoard;
use crate::settings::Settings;

/// What happened during one host frame
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct FrameReport {
    /// Engine steps run this frame
    pub steps: u32,
    pub top_goals: u32,
    pub bottom_goals: u32,
    /// Ball centre after the last step (for the renderer)
    pub position: Vec2,
}

/// Engine + score board + tilt latch, advanced by host frame time
#[derive(Debug, Clone)]
pub struct Simulation {
    engine: BallPhysicsEngine,
    score: ScoreBoard,
    tilt: TiltLatch,
    settings: Settings,
    accumulator: f32,
}

impl Simulation {
    /// Build a simulation for a screen of the given pixel size
    pub fn new(settings: Settings, screen_width: f32, screen_height: f32) -> Self {
        let radius = settings.ball_radius_px();
        let mut sim = Self {
            engine: BallPhysicsEngine::new(settings.physics, radius),
            score: ScoreBoard::new(),
            tilt: TiltLatch::new(),
            settings,
            accumulator: 0.0,
        };
        sim.resize(screen_width, screen_height);
        sim
    }

    /// Re-layout after a screen size change (rotation, split screen, ...)
    pub fn resize(&mut self, screen_width: f32, screen_height: f32) {
        let (w, h) = self.settings.field_size(screen_width, screen_height);
        self.engine.configure(w, h);
        self.accumulator = 0.0;
    }

    /// Latch the newest sensor reading
    pub fn push_tilt(&mut self, sample: TiltSample) {
        self.tilt.push(sample);
    }

    /// Run exactly one engine step with the latched tilt
    pub fn step_once(&mut self) -> StepResult {
        let result = self.engine.step_sample(self.tilt.latest());
        self.score.record(&result);
        if result.any_goal() {
            log::info!("GOAL! {}", self.score.label());
        }
        result
    }

    /// Advance by a host frame time, running whole fixed steps only
    pub fn advance(&mut self, frame_dt: f32) -> FrameReport {
        let dt = self.engine.constants().dt;
        let frame_dt = if frame_dt.is_finite() { frame_dt.clamp(0.0, MAX_FRAME_DT) } else { 0.0 };
        self.accumulator += frame_dt;

        let mut report = FrameReport {
            position: self.engine.ball().pos,
            ..Default::default()
        };
        while self.accumulator >= dt && report.steps < MAX_SUBSTEPS {
            let result = self.step_once();
            self.accumulator -= dt;
            report.steps += 1;
            report.top_goals += result.top_goal_scored as u32;
            report.bottom_goals += result.bottom_goal_scored as u32;
            report.position = result.position;
        }

        // Drop time we could not catch up on instead of carrying it forward
        if report.steps == MAX_SUBSTEPS && self.accumulator >= dt {
            log::debug!("Dropping {:.4}s of simulation backlog", self.accumulator);
            self.accumulator = 0.0;
        }

        log::debug!("Frame: {} substeps, {:.4}s carried over", report.steps, self.accumulator);
        report
    }

    pub fn engine(&self) -> &BallPhysicsEngine {
        &self.engine
    }

    pub fn score(&self) -> &ScoreBoard {
        &self.score
    }

    pub fn settings(&self) -> &Settings {
        &self.settings
    }
}
