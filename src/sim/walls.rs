//! Arena wall collision resolution
//!
//! The dominant bug class in games like this is "sticking": a ball that
//! keeps re-triggering the same wall because it was never moved clear of it.
//! The rule here is reposition-always: the ball is re-clamped to the
//! boundary every frame it overlaps, even while the immunity window
//! suppresses the velocity response.

use rand::Rng;
use rand_pcg::Pcg32;

use super::events::{Event, Wall};
use super::state::Ball;
use crate::config::Config;

/// Resolve overlap with the four arena edges, each independently.
pub fn resolve_walls(
    ball: &mut Ball,
    cfg: &Config,
    time: f32,
    rng: &mut Pcg32,
    events: &mut Vec<Event>,
) {
    let safety = cfg.wall_safety_frac * ball.radius;
    let lo_x = cfg.wall_margin + ball.radius;
    let hi_x = cfg.arena_width - cfg.wall_margin - ball.radius;
    let lo_y = cfg.wall_margin + ball.radius;
    let hi_y = cfg.arena_height - cfg.wall_margin - ball.radius;

    let immune = ball
        .last_wall_hit
        .is_some_and(|t| time - t < cfg.wall_immunity_frames);

    if ball.pos.x < lo_x {
        ball.pos.x = lo_x + safety;
        if !immune {
            respond(ball, cfg, time, rng, events, Wall::Left);
        }
    } else if ball.pos.x > hi_x {
        ball.pos.x = hi_x - safety;
        if !immune {
            respond(ball, cfg, time, rng, events, Wall::Right);
        }
    }

    if ball.pos.y < lo_y {
        ball.pos.y = lo_y + safety;
        if !immune {
            respond(ball, cfg, time, rng, events, Wall::Top);
        }
    } else if ball.pos.y > hi_y {
        ball.pos.y = hi_y - safety;
        if !immune {
            respond(ball, cfg, time, rng, events, Wall::Bottom);
        }
    }
}

/// Reflect off one edge: restitution on the perpendicular component with a
/// rebound floor, friction on the tangential one, then optional jitter.
fn respond(
    ball: &mut Ball,
    cfg: &Config,
    time: f32,
    rng: &mut Pcg32,
    events: &mut Vec<Event>,
    wall: Wall,
) {
    let impact_speed = ball.vel.length();

    match wall {
        Wall::Left => {
            ball.vel.x = (ball.vel.x.abs() * cfg.bounciness).max(cfg.min_rebound_speed);
            ball.vel.y *= cfg.wall_friction;
        }
        Wall::Right => {
            ball.vel.x = -(ball.vel.x.abs() * cfg.bounciness).max(cfg.min_rebound_speed);
            ball.vel.y *= cfg.wall_friction;
        }
        Wall::Top => {
            ball.vel.y = (ball.vel.y.abs() * cfg.bounciness).max(cfg.min_rebound_speed);
            ball.vel.x *= cfg.wall_friction;
        }
        Wall::Bottom => {
            ball.vel.y = -(ball.vel.y.abs() * cfg.bounciness).max(cfg.min_rebound_speed);
            ball.vel.x *= cfg.wall_friction;
        }
    }

    // Small random deflection defeats periodic degenerate trajectories
    if cfg.bounce_jitter > 0.0 {
        let jitter = rng.random_range(-cfg.bounce_jitter..=cfg.bounce_jitter);
        let (sin, cos) = jitter.sin_cos();
        let v = ball.vel;
        ball.vel.x = v.x * cos - v.y * sin;
        ball.vel.y = v.x * sin + v.y * cos;
    }

    let speed = ball.vel.length();
    if speed > cfg.max_velocity {
        ball.vel *= cfg.max_velocity / speed;
    }

    ball.last_wall_hit = Some(time);
    events.push(Event::WallCollision {
        wall,
        ball_id: ball.id,
        impact_speed,
    });
}

#[cfg(test)]
mod tests {
    use super::*;
    use glam::Vec2;
    use rand::SeedableRng;

    fn quiet_cfg() -> Config {
        Config {
            bounce_jitter: 0.0,
            wall_friction: 1.0,
            ..Config::default()
        }
    }

    fn rng() -> Pcg32 {
        Pcg32::seed_from_u64(1)
    }

    #[test]
    fn test_right_wall_rebound() {
        // Arena 800x600, ball radius 15 at x=790 moving right at 10,
        // bounciness 0.9: ends just inside the margin with vx = -9.
        let cfg = Config {
            bounciness: 0.9,
            ..quiet_cfg()
        };
        let mut ball = Ball::new(1, Vec2::new(790.0, 300.0), Vec2::new(10.0, 0.0), 15.0, 1.0);
        let mut events = Vec::new();
        resolve_walls(&mut ball, &cfg, 0.0, &mut rng(), &mut events);

        let expected_x = 800.0 - cfg.wall_margin - 15.0 - cfg.wall_safety_frac * 15.0;
        assert!((ball.pos.x - expected_x).abs() < 1e-3);
        assert!((ball.vel.x - (-9.0)).abs() < 1e-3);
        assert!(ball.vel.x.abs() >= cfg.min_rebound_speed);
        assert!(matches!(
            events[..],
            [Event::WallCollision {
                wall: Wall::Right,
                ball_id: 1,
                ..
            }]
        ));
    }

    #[test]
    fn test_inside_arena_untouched() {
        let cfg = quiet_cfg();
        let mut ball = Ball::new(1, Vec2::new(400.0, 300.0), Vec2::new(5.0, 5.0), 8.0, 1.0);
        let before = ball.clone();
        let mut events = Vec::new();
        resolve_walls(&mut ball, &cfg, 0.0, &mut rng(), &mut events);
        assert_eq!(ball, before);
        assert!(events.is_empty());
    }

    #[test]
    fn test_minimum_rebound_floor() {
        // A crawl into the wall still produces a perceptible bounce
        let cfg = quiet_cfg();
        let mut ball = Ball::new(1, Vec2::new(799.0, 300.0), Vec2::new(0.01, 0.0), 8.0, 1.0);
        let mut events = Vec::new();
        resolve_walls(&mut ball, &cfg, 0.0, &mut rng(), &mut events);
        assert!((ball.vel.x - (-cfg.min_rebound_speed)).abs() < 1e-4);
    }

    #[test]
    fn test_immunity_suppresses_velocity_not_position() {
        let cfg = quiet_cfg();
        let mut ball = Ball::new(1, Vec2::new(799.0, 300.0), Vec2::new(10.0, 0.0), 8.0, 1.0);
        ball.last_wall_hit = Some(0.0);
        let mut events = Vec::new();
        resolve_walls(&mut ball, &cfg, 2.0, &mut rng(), &mut events);

        // Still re-clamped out of the wall
        assert!(ball.pos.x <= cfg.arena_width - cfg.wall_margin - ball.radius);
        // Velocity untouched, no event
        assert!((ball.vel.x - 10.0).abs() < 1e-6);
        assert!(events.is_empty());

        // Past the window the bounce responds again
        ball.pos.x = 799.0;
        resolve_walls(&mut ball, &cfg, 100.0, &mut rng(), &mut events);
        assert!(ball.vel.x < 0.0);
        assert_eq!(events.len(), 1);
    }

    #[test]
    fn test_corner_resolves_both_edges() {
        let cfg = quiet_cfg();
        let mut ball = Ball::new(1, Vec2::new(799.0, 599.0), Vec2::new(8.0, 8.0), 8.0, 1.0);
        let mut events = Vec::new();
        resolve_walls(&mut ball, &cfg, 0.0, &mut rng(), &mut events);
        assert!(ball.vel.x < 0.0 && ball.vel.y < 0.0);
        assert_eq!(events.len(), 2);
    }

    #[test]
    fn test_friction_applies_to_tangent() {
        let cfg = Config {
            wall_friction: 0.5,
            ..quiet_cfg()
        };
        let mut ball = Ball::new(1, Vec2::new(799.0, 300.0), Vec2::new(6.0, 4.0), 8.0, 1.0);
        let mut events = Vec::new();
        resolve_walls(&mut ball, &cfg, 0.0, &mut rng(), &mut events);
        assert!((ball.vel.y - 2.0).abs() < 1e-4);
    }

    #[test]
    fn test_jitter_is_seed_reproducible() {
        let cfg = Config::default();
        let mk = || Ball::new(1, Vec2::new(799.0, 300.0), Vec2::new(10.0, 0.0), 8.0, 1.0);
        let mut a = mk();
        let mut b = mk();
        let mut ev = Vec::new();
        resolve_walls(&mut a, &cfg, 0.0, &mut Pcg32::seed_from_u64(5), &mut ev);
        resolve_walls(&mut b, &cfg, 0.0, &mut Pcg32::seed_from_u64(5), &mut ev);
        assert_eq!(a.vel, b.vel);
    }
}
