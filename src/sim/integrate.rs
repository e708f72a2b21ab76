//! Kinematics integration
//!
//! Advances one ball's velocity and position for a single step. Pure and
//! side-effect free; collision response lives in `walls` and `rings`.

use super::state::Ball;
use crate::config::Config;

/// Advance a ball by `dt` under gravity and drag.
///
/// Order matters and is fixed: drag, gravity, speed clamp, position.
/// A non-zero speed below `min_velocity` is rescaled up rather than left to
/// stall; an exactly-zero velocity is left alone so a resting ball with no
/// gravity stays a steady state.
pub fn integrate(ball: &mut Ball, cfg: &Config, dt: f32) {
    if cfg.air_resistance < 1.0 {
        ball.vel *= cfg.air_resistance.powf(dt);
    }

    ball.vel.y += cfg.gravity * cfg.gravity_scaling * dt;

    let speed = ball.vel.length();
    if speed > cfg.max_velocity {
        ball.vel *= cfg.max_velocity / speed;
    } else if speed > 0.0 && speed < cfg.min_velocity {
        ball.vel *= cfg.min_velocity / speed;
    }

    ball.pos += ball.vel * dt;
}

#[cfg(test)]
mod tests {
    use super::*;
    use glam::Vec2;

    fn ball(pos: Vec2, vel: Vec2) -> Ball {
        Ball::new(1, pos, vel, 8.0, 1.0)
    }

    #[test]
    fn test_zero_velocity_zero_gravity_is_steady() {
        let cfg = Config {
            gravity: 0.0,
            ..Config::default()
        };
        let mut b = ball(Vec2::new(100.0, 100.0), Vec2::ZERO);
        for _ in 0..100 {
            integrate(&mut b, &cfg, 1.0);
        }
        assert_eq!(b.pos, Vec2::new(100.0, 100.0));
        assert_eq!(b.vel, Vec2::ZERO);
    }

    #[test]
    fn test_gravity_accelerates_downward() {
        let cfg = Config {
            air_resistance: 1.0,
            ..Config::default()
        };
        let mut b = ball(Vec2::ZERO, Vec2::new(3.0, 0.0));
        integrate(&mut b, &cfg, 1.0);
        assert!((b.vel.y - cfg.gravity).abs() < 1e-6);
        assert!((b.pos.x - 3.0).abs() < 1e-6);
    }

    #[test]
    fn test_drag_reduces_speed() {
        let cfg = Config {
            gravity: 0.0,
            air_resistance: 0.9,
            min_velocity: 0.1,
            ..Config::default()
        };
        let mut b = ball(Vec2::ZERO, Vec2::new(10.0, 0.0));
        integrate(&mut b, &cfg, 1.0);
        assert!((b.vel.x - 9.0).abs() < 1e-4);
    }

    #[test]
    fn test_speed_clamped_to_max() {
        let cfg = Config::default();
        let mut b = ball(Vec2::ZERO, Vec2::new(100.0, 100.0));
        integrate(&mut b, &cfg, 1.0);
        assert!(b.speed() <= cfg.max_velocity + 1e-4);
    }

    #[test]
    fn test_slow_ball_rescaled_to_min() {
        let cfg = Config {
            gravity: 0.0,
            ..Config::default()
        };
        let mut b = ball(Vec2::ZERO, Vec2::new(0.3, 0.4));
        integrate(&mut b, &cfg, 1.0);
        assert!((b.speed() - cfg.min_velocity).abs() < 1e-4);
        // Direction preserved
        assert!(b.vel.x > 0.0 && b.vel.y > 0.0);
        assert!((b.vel.y / b.vel.x - 0.4 / 0.3).abs() < 1e-3);
    }

    #[test]
    fn test_dt_scales_gravity_and_travel() {
        let cfg = Config {
            air_resistance: 1.0,
            ..Config::default()
        };
        let mut b = ball(Vec2::ZERO, Vec2::new(4.0, 0.0));
        integrate(&mut b, &cfg, 0.5);
        assert!((b.vel.y - cfg.gravity * 0.5).abs() < 1e-6);
        assert!((b.pos.x - 2.0).abs() < 1e-6);
    }
}
