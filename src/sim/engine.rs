//! Fixed timestep ball physics
//!
//! One call to [`BallPhysicsEngine::step`] advances the ball by exactly one
//! timestep, in this order:
//! 1. tilt -> acceleration (x axis inverted to match the sensor convention)
//! 2. velocity update with per-step friction
//! 3. position update
//! 4. left/right wall clamp and rebound
//! 5. top/bottom wall clamp and rebound, skipped while the centre is in a goal mouth
//! 6. goal detection (top, then bottom) with re-centering on a score

use glam::Vec2;

use super::field::{FieldGeometry, GoalRect};
use super::state::{BallState, GoalLatch, PhysicsConstants, StepResult};
use super::tilt::TiltSample;

/// Ball simulation for a single field
#[derive(Debug, Clone)]
pub struct BallPhysicsEngine {
    constants: PhysicsConstants,
    /// None until the first `configure`
    field: Option<FieldGeometry>,
    ball: BallState,
    top_latch: GoalLatch,
    bottom_latch: GoalLatch,
    /// Steps run since the last `configure`
    steps: u64,
    warned_unconfigured: bool,
}

impl BallPhysicsEngine {
    /// Create an unconfigured engine; call [`configure`](Self::configure) before stepping
    pub fn new(constants: PhysicsConstants, ball_radius: f32) -> Self {
        Self {
            constants,
            field: None,
            ball: BallState::new(ball_radius),
            top_latch: GoalLatch::default(),
            bottom_latch: GoalLatch::default(),
            steps: 0,
            warned_unconfigured: false,
        }
    }

    /// Set the field size and put the ball on the centre spot at rest
    ///
    /// Safe to call on every layout pass.
    pub fn configure(&mut self, width: f32, height: f32) {
        let field = FieldGeometry::new(width, height);
        if !self.field.is_some_and(|f| f.same_size(width, height)) {
            log::info!("Field configured: {}x{} (ball radius {})", width, height, self.ball.radius);
        }

        self.ball.reset_to(field.center());
        self.top_latch.disarm();
        self.bottom_latch.disarm();
        self.field = Some(field);
        self.steps = 0;
    }

    pub fn is_configured(&self) -> bool {
        self.field.is_some()
    }

    /// Advance one fixed timestep with a raw tilt reading
    pub fn step(&mut self, tilt_x: f32, tilt_y: f32) -> StepResult {
        self.step_sample(TiltSample::new(tilt_x, tilt_y))
    }

    /// Advance one fixed timestep
    pub fn step_sample(&mut self, tilt: TiltSample) -> StepResult {
        let Some(field) = self.field else {
            if !self.warned_unconfigured {
                log::warn!("step() called before configure(); ignoring");
                self.warned_unconfigured = true;
            }
            return StepResult {
                position: self.ball.pos,
                ..Default::default()
            };
        };

        let tilt = tilt.sanitized();
        let c = self.constants;

        let accel = Vec2::new(-tilt.x, tilt.y) * c.sensor_factor * c.dt;
        self.ball.vel = (self.ball.vel + accel) * c.friction;
        self.ball.pos += self.ball.vel * c.dt * c.position_scale;

        self.resolve_side_walls(&field);
        self.resolve_end_walls(&field);

        let top_goal_scored = Self::check_goal(&mut self.ball, &mut self.top_latch, &field.top_goal, &field);
        let bottom_goal_scored =
            Self::check_goal(&mut self.ball, &mut self.bottom_latch, &field.bottom_goal, &field);

        if top_goal_scored {
            log::debug!("Top goal at step {}", self.steps);
        }
        if bottom_goal_scored {
            log::debug!("Bottom goal at step {}", self.steps);
        }
        self.steps += 1;

        StepResult {
            position: self.ball.pos,
            top_goal_scored,
            bottom_goal_scored,
        }
    }

    fn resolve_side_walls(&mut self, field: &FieldGeometry) {
        let ball = &mut self.ball;
        let r = ball.radius;
        if ball.pos.x - r < 0.0 {
            ball.pos.x = r;
            ball.vel.x = -ball.vel.x * self.constants.restitution;
        } else if ball.pos.x + r > field.width {
            ball.pos.x = field.width - r;
            ball.vel.x = -ball.vel.x * self.constants.restitution;
        }
    }

    /// The goal mouths are open: no rebound while the centre is inside one
    fn resolve_end_walls(&mut self, field: &FieldGeometry) {
        let ball = &mut self.ball;
        let r = ball.radius;
        if ball.pos.y - r < 0.0 && !field.top_goal.contains(ball.pos) {
            ball.pos.y = r;
            ball.vel.y = -ball.vel.y * self.constants.restitution;
        } else if ball.pos.y + r > field.height && !field.bottom_goal.contains(ball.pos) {
            ball.pos.y = field.height - r;
            ball.vel.y = -ball.vel.y * self.constants.restitution;
        }
    }

    fn check_goal(ball: &mut BallState, latch: &mut GoalLatch, goal: &GoalRect, field: &FieldGeometry) -> bool {
        let scored = latch.update(goal.contains(ball.pos));
        if scored {
            ball.reset_to(field.center());
        }
        scored
    }

    pub fn ball(&self) -> &BallState {
        &self.ball
    }

    pub fn field(&self) -> Option<&FieldGeometry> {
        self.field.as_ref()
    }

    pub fn constants(&self) -> &PhysicsConstants {
        &self.constants
    }

    pub fn top_latch(&self) -> GoalLatch {
        self.top_latch
    }

    pub fn bottom_latch(&self) -> GoalLatch {
        self.bottom_latch
    }

    pub fn steps(&self) -> u64 {
        self.steps
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sim::tilt::WanderingTilt;
    use proptest::prelude::*;

    const RADIUS: f32 = 10.0;

    fn engine(w: f32, h: f32) -> BallPhysicsEngine {
        let mut engine = BallPhysicsEngine::new(PhysicsConstants::default(), RADIUS);
        engine.configure(w, h);
        engine
    }

    #[test]
    fn test_configure_centers_ball() {
        let engine = engine(300.0, 600.0);
        assert!(engine.is_configured());
        assert_eq!(engine.ball().pos, Vec2::new(150.0, 300.0));
        assert_eq!(engine.ball().vel, Vec2::ZERO);
        assert!(!engine.top_latch().is_armed());
        assert!(!engine.bottom_latch().is_armed());
    }

    #[test]
    fn test_configure_idempotent() {
        let mut engine = engine(300.0, 600.0);
        for _ in 0..5 {
            engine.step(3.0, -2.0);
        }
        engine.configure(300.0, 600.0);
        let first = (*engine.ball(), engine.top_latch(), engine.bottom_latch());
        engine.configure(300.0, 600.0);
        let second = (*engine.ball(), engine.top_latch(), engine.bottom_latch());
        assert_eq!(first, second);
        assert_eq!(second.0.pos, Vec2::new(150.0, 300.0));
        assert_eq!(second.0.vel, Vec2::ZERO);
    }

    #[test]
    fn test_reconfigure_disarms_latches() {
        let mut engine = engine(300.0, 600.0);
        engine.top_latch.update(true);
        engine.bottom_latch.update(true);
        engine.configure(600.0, 300.0);
        assert!(!engine.top_latch().is_armed());
        assert!(!engine.bottom_latch().is_armed());
        assert_eq!(engine.ball().pos, Vec2::new(300.0, 150.0));
    }

    #[test]
    fn test_step_before_configure_is_noop() {
        let mut engine = BallPhysicsEngine::new(PhysicsConstants::default(), RADIUS);
        let result = engine.step(5.0, 5.0);
        assert!(!engine.is_configured());
        assert!(!result.any_goal());
        assert_eq!(result.position, Vec2::ZERO);
        assert_eq!(engine.ball().vel, Vec2::ZERO);
    }

    #[test]
    fn test_zero_tilt_at_rest_stays_put() {
        let mut engine = engine(300.0, 600.0);
        for _ in 0..100 {
            let result = engine.step(0.0, 0.0);
            assert_eq!(result.position, Vec2::new(150.0, 300.0));
            assert!(!result.any_goal());
        }
    }

    #[test]
    fn test_tilt_direction() {
        // Positive raw x tilts the ball left; positive raw y moves it down
        let mut engine = engine(300.0, 600.0);
        let result = engine.step(1.0, 1.0);
        assert!(result.position.x < 150.0);
        assert!(result.position.y > 300.0);
    }

    #[test]
    fn test_non_finite_tilt_treated_as_zero() {
        let mut engine = engine(300.0, 600.0);
        let result = engine.step(f32::NAN, f32::INFINITY);
        assert_eq!(result.position, Vec2::new(150.0, 300.0));
        assert_eq!(engine.ball().vel, Vec2::ZERO);
        assert!(engine.ball().pos.is_finite());
    }

    #[test]
    fn test_zero_tilt_decays_velocity() {
        let mut engine = engine(300.0, 600.0);
        for _ in 0..3 {
            engine.step(0.0, 1.0);
        }

        let mut prev = engine.ball().vel.length();
        assert!(prev > 0.0);
        for _ in 0..300 {
            engine.step(0.0, 0.0);
            let speed = engine.ball().vel.length();
            assert!(speed <= prev, "speed grew from {} to {}", prev, speed);
            prev = speed;
        }
        assert!(prev < 1e-6);
    }

    #[test]
    fn test_top_goal_scenario() {
        let mut engine = engine(300.0, 600.0);
        let goal = engine.field().unwrap().top_goal;

        let mut goals = 0;
        for _ in 0..50 {
            let result = engine.step(0.0, -5.0);
            assert!(!result.bottom_goal_scored);
            if result.top_goal_scored {
                goals += 1;
                assert_eq!(result.position, Vec2::new(150.0, 300.0));
                break;
            }
            // Ball heads straight up the middle, inside the goal's x range
            assert!(result.position.x >= goal.min.x && result.position.x < goal.max.x);
        }
        assert_eq!(goals, 1);
        assert!(engine.top_latch().is_armed());

        // Reset on score: next step starts from the centre at rest
        assert_eq!(engine.ball().pos, Vec2::new(150.0, 300.0));
        assert_eq!(engine.ball().vel, Vec2::ZERO);
        let result = engine.step(0.0, 0.0);
        assert_eq!(result.position, Vec2::new(150.0, 300.0));
        assert!(!result.any_goal());
        assert!(!engine.top_latch().is_armed());
    }

    #[test]
    fn test_bottom_goal_scenario() {
        let mut engine = engine(300.0, 600.0);
        let scored = (0..50)
            .map(|_| engine.step(0.0, 5.0))
            .find(|r| r.any_goal())
            .expect("ball should reach the bottom goal");
        assert!(scored.bottom_goal_scored);
        assert!(!scored.top_goal_scored);
        assert_eq!(engine.ball().pos, Vec2::new(150.0, 300.0));
        assert!(engine.bottom_latch().is_armed());
        assert!(!engine.top_latch().is_armed());
    }

    #[test]
    fn test_left_wall_bounce() {
        let mut engine = engine(300.0, 600.0);
        let c = *engine.constants();
        let ax = -5.0 * c.sensor_factor * c.dt;

        let mut bounces = 0;
        for _ in 0..200 {
            let before = engine.ball().vel.x;
            let result = engine.step(5.0, 0.0);
            assert!(result.position.x >= RADIUS);

            if result.position.x == RADIUS && engine.ball().vel.x > 0.0 {
                let pre_bounce = (before + ax) * c.friction;
                assert!(pre_bounce < 0.0);
                let expected = -pre_bounce * c.restitution;
                assert!((engine.ball().vel.x - expected).abs() < 1e-5);
                bounces += 1;
            }
        }
        assert!(bounces >= 2);
    }

    #[test]
    fn test_corner_bounce() {
        // Ball tucked into the top-left corner, well away from the goal mouth
        let mut engine = engine(300.0, 600.0);
        engine.ball.pos = Vec2::new(RADIUS + 1.0, RADIUS);
        engine.ball.vel = Vec2::new(-1.0, 0.0);
        engine.step(0.0, 0.0);
        assert_eq!(engine.ball().pos.x, RADIUS);
        assert!(engine.ball().vel.x > 0.0);
    }

    #[test]
    fn test_end_wall_bounce_outside_goal() {
        let mut engine = engine(300.0, 600.0);
        engine.ball.pos = Vec2::new(40.0, RADIUS + 2.0);
        engine.ball.vel = Vec2::new(0.0, -1.0);
        let result = engine.step(0.0, 0.0);
        assert!(!result.any_goal());
        assert_eq!(result.position.y, RADIUS);
        assert!(engine.ball().vel.y > 0.0);
    }

    #[test]
    fn test_one_goal_per_dwell() {
        let mut engine = engine(300.0, 600.0);
        let inside = Vec2::new(150.0, 5.0);

        // Goal already counted for this visit
        engine.ball.pos = inside;
        engine.top_latch.update(true);
        for _ in 0..20 {
            let result = engine.step(0.0, 0.0);
            assert!(!result.top_goal_scored);
            assert_eq!(result.position, inside);
        }

        // Leave the mouth, then come back
        engine.ball.pos = Vec2::new(150.0, 100.0);
        engine.step(0.0, 0.0);
        assert!(!engine.top_latch().is_armed());

        engine.ball.pos = inside;
        let result = engine.step(0.0, 0.0);
        assert!(result.top_goal_scored);
        assert_eq!(result.position, Vec2::new(150.0, 300.0));
    }

    #[test]
    fn test_determinism() {
        let mut a = engine(480.0, 800.0);
        let mut b = engine(480.0, 800.0);
        for sample in WanderingTilt::new(7).take(2000) {
            assert_eq!(a.step_sample(sample), b.step_sample(sample));
        }
        assert_eq!(a.ball(), b.ball());
        assert_eq!(a.steps(), 2000);
    }

    proptest! {
        #[test]
        fn prop_ball_stays_on_field(
            w in 100.0f32..1200.0,
            h in 100.0f32..2000.0,
            tilts in prop::collection::vec((-20.0f32..20.0, -20.0f32..20.0), 1..300),
        ) {
            let mut engine = engine(w, h);
            let field = *engine.field().unwrap();
            for (tx, ty) in tilts {
                let result = engine.step(tx, ty);
                let p = result.position;
                prop_assert!(p.x >= RADIUS && p.x <= w - RADIUS, "x out of bounds: {}", p.x);
                let in_goal = field.top_goal.contains(p) || field.bottom_goal.contains(p);
                if !in_goal {
                    prop_assert!(p.y >= RADIUS && p.y <= h - RADIUS, "y out of bounds: {}", p.y);
                }
                prop_assert!(!(result.top_goal_scored && result.bottom_goal_scored));
            }
        }

        #[test]
        fn prop_goal_resets_ball(
            tilts in prop::collection::vec((-10.0f32..10.0, -10.0f32..10.0), 1..400),
        ) {
            let mut engine = engine(300.0, 600.0);
            for (tx, ty) in tilts {
                let result = engine.step(tx, ty);
                if result.any_goal() {
                    prop_assert_eq!(engine.ball().pos, Vec2::new(150.0, 300.0));
                    prop_assert_eq!(engine.ball().vel, Vec2::ZERO);
                }
            }
        }

        #[test]
        fn prop_zero_tilt_speed_non_increasing(
            x in 40.0f32..260.0,
            y in 40.0f32..560.0,
            vx in -5.0f32..5.0,
            vy in -5.0f32..5.0,
            steps in 1usize..300,
        ) {
            let mut engine = engine(300.0, 600.0);
            engine.ball.pos = Vec2::new(x, y);
            engine.ball.vel = Vec2::new(vx, vy);

            for _ in 0..steps {
                let before = engine.ball().vel;
                engine.step(0.0, 0.0);
                let after = engine.ball().vel;
                // A rebound flips a component's sign and may speed the ball up
                let bounced = after.x.is_sign_negative() != before.x.is_sign_negative()
                    || after.y.is_sign_negative() != before.y.is_sign_negative();
                if !bounced {
                    prop_assert!(
                        after.length() <= before.length(),
                        "speed grew from {} to {}", before.length(), after.length()
                    );
                }
            }
        }

        #[test]
        fn prop_one_goal_per_dwell(
            w in 150.0f32..800.0,
            h in 200.0f32..1200.0,
            tilts in prop::collection::vec((-10.0f32..10.0, -10.0f32..10.0), 1..400),
        ) {
            let mut engine = engine(w, h);
            let mut prev = StepResult::default();
            for (tx, ty) in tilts {
                let top_armed = engine.top_latch().is_armed();
                let bottom_armed = engine.bottom_latch().is_armed();
                let result = engine.step(tx, ty);

                prop_assert!(!(prev.top_goal_scored && result.top_goal_scored));
                prop_assert!(!(prev.bottom_goal_scored && result.bottom_goal_scored));
                if result.top_goal_scored {
                    prop_assert!(!top_armed);
                }
                if result.bottom_goal_scored {
                    prop_assert!(!bottom_armed);
                }
                prev = result;
            }
        }
    }
}
