use crate::config::ALIGN_DEAD_ZONE;
use crate::vessel::Kinematics;
use crate::Vec2;
use nalgebra::{vector, Rotation2};
use serde::{Deserialize, Serialize};
use spacegame_api::math::{normalize_angle, FRAC_PI_2};
use spacegame_api::{ActionKind, PilotAction};

/// Propulsion and steering.
///
/// Forward is the vessel's local +Y axis rotated by its angle, so an angle of
/// zero faces "up".
#[derive(Serialize, Deserialize, Clone, Debug, PartialEq)]
pub struct Engine {
    pub acceleration: f64,
    pub max_velocity: f64,
    pub turn_speed: f64,
    #[serde(skip)]
    owner: Option<String>,
}

impl Default for Engine {
    fn default() -> Self {
        Engine {
            acceleration: 3.0,
            max_velocity: 1.0,
            turn_speed: 3.0,
            owner: None,
        }
    }
}

/// Returns the vessel angle whose forward axis points along `direction`.
pub fn heading_of(direction: Vec2) -> f64 {
    normalize_angle(direction.y.atan2(direction.x) - FRAC_PI_2)
}

impl Engine {
    pub const NAME: &'static str = "engine";

    pub fn new(acceleration: f64, max_velocity: f64, turn_speed: f64) -> Engine {
        Engine {
            acceleration,
            max_velocity,
            turn_speed,
            owner: None,
        }
    }

    pub fn owner(&self) -> Option<&str> {
        self.owner.as_deref()
    }

    pub(crate) fn install(&mut self, owner: &str) {
        self.owner = Some(owner.to_string());
        log::info!("engine installed on ship {}", owner);
    }

    pub fn activate(&self, action: PilotAction, body: &mut Kinematics) {
        log::debug!("engine activate {:?}", action);
        match action.kind {
            ActionKind::Accelerate => self.accelerate(body, action.dt),
            ActionKind::TurnLeft => self.turn(body, action.dt),
            ActionKind::TurnRight => self.turn(body, -action.dt),
            ActionKind::Reverse => self.reverse(body, action.dt),
            _ => {}
        }
    }

    /// Adds `acceleration * dt` of thrust along the heading, then clamps the
    /// speed to `max_velocity` without changing direction.
    pub fn accelerate(&self, body: &mut Kinematics, dt: f64) {
        let thrust = self.acceleration * dt;
        let accel = Rotation2::new(body.angle()) * vector![0.0, thrust];
        let mut velocity = body.velocity() + accel;
        let speed = velocity.norm();
        if speed > self.max_velocity && speed > 0.0 {
            velocity = velocity / speed * self.max_velocity;
        }
        body.velocity = velocity;
    }

    /// Rotates by `turn_speed * dt`. Negative `dt` turns clockwise.
    pub fn turn(&self, body: &mut Kinematics, dt: f64) {
        body.angle = normalize_angle(body.angle() + self.turn_speed * dt);
    }

    /// Steers one step towards `target`. Does nothing without a target.
    pub fn align(&self, body: &mut Kinematics, target: Option<Vec2>, dt: f64) {
        let Some(target) = target else {
            return;
        };
        let direction = target - body.coordinates();
        if direction == Vec2::zeros() {
            return;
        }
        log::debug!(
            "aligning to {:?} from {:?}",
            target.as_slice(),
            body.coordinates().as_slice()
        );
        self.steer(body, heading_of(direction), dt);
    }

    /// Steers one step towards facing away from the current motion.
    pub fn reverse(&self, body: &mut Kinematics, dt: f64) {
        let velocity = body.velocity();
        if velocity == Vec2::zeros() {
            return;
        }
        self.steer(body, heading_of(-velocity), dt);
    }

    /// Proportional steering with a dead zone. Turns by at most one
    /// `turn_speed * dt` step. The last step is clamped so it ends exactly on
    /// `heading` rather than turning past it.
    fn steer(&self, body: &mut Kinematics, heading: f64, dt: f64) {
        let delta = normalize_angle(body.angle() - heading);
        if delta.abs() <= ALIGN_DEAD_ZONE {
            return;
        }
        let step = (self.turn_speed * dt).abs();
        if step >= delta.abs() {
            body.angle = heading;
        } else if delta < 0.0 {
            self.turn(body, dt.abs());
        } else {
            self.turn(body, -dt.abs());
        }
    }
}

#[cfg(test)]
mod test {
    use super::*;
    use crate::entity::Rect;
    use approx::assert_abs_diff_eq;
    use rand::Rng;
    use spacegame_api::math::PI;
    use test_log::test;

    fn new_body() -> Kinematics {
        Kinematics::new(Rect::new(0.0, 0.0, 32.0, 32.0))
    }

    #[test]
    fn test_accelerate_forward_is_up() {
        let engine = Engine::new(10.0, 100.0, 1.0);
        let mut body = new_body();
        engine.accelerate(&mut body, 0.5);
        assert_abs_diff_eq!(body.velocity(), vector![0.0, 5.0], epsilon = 1e-12);

        body.angle = FRAC_PI_2;
        engine.accelerate(&mut body, 0.5);
        assert_abs_diff_eq!(body.velocity(), vector![-5.0, 5.0], epsilon = 1e-12);
    }

    #[test]
    fn test_accelerate_clamps_magnitude_only() {
        let engine = Engine::default();
        let mut rng = rand::thread_rng();
        for _ in 0..1000 {
            let mut body = new_body();
            body.angle = normalize_angle(rng.gen_range(-PI..PI));
            body.velocity = vector![rng.gen_range(-0.7..0.7), rng.gen_range(-0.7..0.7)];
            let dt = rng.gen_range(0.0..1.0);
            let unclamped =
                body.velocity() + Rotation2::new(body.angle()) * vector![0.0, engine.acceleration * dt];
            engine.accelerate(&mut body, dt);
            let speed = body.velocity().norm();
            assert!(speed <= engine.max_velocity + 1e-12, "speed {}", speed);
            if unclamped.norm() > engine.max_velocity {
                assert_abs_diff_eq!(speed, engine.max_velocity, epsilon = 1e-12);
                assert_abs_diff_eq!(
                    body.velocity().normalize(),
                    unclamped.normalize(),
                    epsilon = 1e-12
                );
            } else {
                assert_abs_diff_eq!(body.velocity(), unclamped, epsilon = 1e-12);
            }
        }
    }

    #[test]
    fn test_turn_normalizes() {
        let engine = Engine::new(1.0, 1.0, 2.0);
        let mut body = new_body();
        body.angle = 3.0;
        engine.turn(&mut body, 0.1);
        assert_abs_diff_eq!(body.angle(), 3.2 - 2.0 * PI, epsilon = 1e-12);
        engine.turn(&mut body, -0.1);
        assert_abs_diff_eq!(body.angle(), 3.0, epsilon = 1e-12);
    }

    #[test]
    fn test_align_target_behind() {
        let engine = Engine::default();
        let mut body = new_body();
        let dt = 0.01;
        engine.align(&mut body, Some(vector![0.0, -100.0]), dt);
        let moved = normalize_angle(body.angle()).abs();
        assert_abs_diff_eq!(moved, engine.turn_speed * dt, epsilon = 1e-12);
    }

    #[test]
    fn test_align_turns_towards_target() {
        let engine = Engine::default();
        let mut body = new_body();
        // Target to the left: heading +PI/2.
        engine.align(&mut body, Some(vector![-100.0, 0.0]), 0.01);
        assert_abs_diff_eq!(body.angle(), 0.03, epsilon = 1e-12);

        let mut body = new_body();
        engine.align(&mut body, Some(vector![100.0, 0.0]), 0.01);
        assert_abs_diff_eq!(body.angle(), -0.03, epsilon = 1e-12);
    }

    #[test]
    fn test_align_never_overshoots() {
        let engine = Engine::default();
        let mut body = new_body();
        let target = vector![-1.0, 1.0];
        let heading = heading_of(target);
        assert_abs_diff_eq!(heading, PI / 4.0, epsilon = 1e-12);
        engine.align(&mut body, Some(target), 1.0);
        assert_abs_diff_eq!(body.angle(), heading, epsilon = 1e-12);
    }

    #[test]
    fn test_align_converges_and_settles() {
        let engine = Engine::default();
        let mut body = new_body();
        let target = vector![50.0, -20.0];
        for _ in 0..200 {
            engine.align(&mut body, Some(target), 1.0 / 60.0);
        }
        let error = normalize_angle(body.angle() - heading_of(target)).abs();
        assert!(error <= ALIGN_DEAD_ZONE, "error {}", error);
        let settled = body.angle();
        engine.align(&mut body, Some(target), 1.0 / 60.0);
        assert_eq!(body.angle(), settled);
    }

    #[test]
    fn test_align_without_target() {
        let engine = Engine::default();
        let mut body = new_body();
        engine.align(&mut body, None, 1.0);
        assert_eq!(body.angle(), 0.0);
    }

    #[test]
    fn test_reverse_faces_away_from_motion() {
        let engine = Engine::default();
        let mut body = new_body();
        body.velocity = vector![0.0, 1.0];
        for _ in 0..200 {
            engine.reverse(&mut body, 1.0 / 60.0);
        }
        let forward = Rotation2::new(body.angle()) * vector![0.0, 1.0];
        assert!(forward.dot(&body.velocity()) < -0.99, "forward {:?}", forward);
    }

    #[test]
    fn test_reverse_at_rest() {
        let engine = Engine::default();
        let mut body = new_body();
        body.angle = 1.0;
        engine.reverse(&mut body, 1.0);
        assert_eq!(body.angle(), 1.0);
    }

    #[test]
    fn test_activate_dispatch() {
        let engine = Engine::new(1.0, 10.0, 1.0);
        let mut body = new_body();
        engine.activate(PilotAction::new(ActionKind::TurnLeft, 0.5), &mut body);
        assert_abs_diff_eq!(body.angle(), 0.5);
        engine.activate(PilotAction::new(ActionKind::TurnRight, 0.25), &mut body);
        assert_abs_diff_eq!(body.angle(), 0.25);
        engine.activate(PilotAction::new(ActionKind::TargetNext, 0.25), &mut body);
        assert_abs_diff_eq!(body.angle(), 0.25);
        assert_eq!(body.velocity(), Vec2::zeros());
    }
}
