//! Ball population rules and terminal conditions
//!
//! Growth on ring bounces, replacement spawns on ring destruction, and the
//! game-over check. Balls are never removed; the cap simply stops new ones
//! from being created.

use rand::Rng;
use rand_pcg::Pcg32;

use super::events::Event;
use super::state::{Ball, SimulationState};
use crate::config::Config;
use crate::polar_to_cartesian;

/// Grow a ball after a solid-arc bounce, up to the configured cap.
pub fn grow_on_bounce(ball: &mut Ball, cfg: &Config, events: &mut Vec<Event>) {
    if cfg.growth_rate <= 0.0 {
        return;
    }
    let cap = cfg.max_ball_radius_frac * cfg.half_min_dimension();
    if ball.radius >= cap {
        ball.growing = false;
        return;
    }
    ball.radius = (ball.radius + cfg.growth_rate).min(cap);
    ball.growing = ball.radius < cap;
    events.push(Event::BallGrew {
        ball_id: ball.id,
        new_radius: ball.radius,
    });
}

/// Spawn replacement balls on the destroyed ring's radius, outward bound,
/// bounded by the live-ball cap.
pub fn spawn_on_destroy(
    state: &mut SimulationState,
    ring_radius: f32,
    cfg: &Config,
    rng: &mut Pcg32,
    events: &mut Vec<Event>,
) {
    let center = cfg.arena_center();
    for _ in 0..cfg.balls_on_destroy {
        if state.balls.len() >= cfg.max_ball_count {
            break;
        }
        let theta = rng.random_range(0.0..std::f32::consts::TAU);
        let speed = rng.random_range(cfg.min_velocity..=cfg.max_velocity);
        let id = state.next_ball_id();
        let ball = Ball::new(
            id,
            center + polar_to_cartesian(ring_radius, theta),
            polar_to_cartesian(speed, theta),
            cfg.base_ball_radius,
            cfg.ball_elasticity,
        );
        events.push(Event::BallSpawned { ball: ball.clone() });
        state.balls.push(ball);
    }
}

/// Flip `game_over` (once) when a terminal condition holds.
///
/// Terminal when every ring of a non-empty stack is destroyed, or when a
/// ball has grown to the lethal fraction of the half play-field. The state
/// stays steppable either way; stopping is the host's call.
pub fn check_game_over(state: &mut SimulationState, cfg: &Config, events: &mut Vec<Event>) {
    if state.game_over {
        return;
    }

    let all_rings_cleared = !state.rings.is_empty() && state.rings.iter().all(|r| r.destroyed);

    let lethal_radius = cfg.lethal_ball_radius_frac * cfg.half_min_dimension();
    let ball_filled_arena = cfg.lethal_ball_radius_frac > 0.0
        && state.balls.iter().any(|b| b.radius >= lethal_radius);

    if all_rings_cleared || ball_filled_arena {
        state.game_over = true;
        events.push(Event::GameOver { score: state.score });
        log::info!("game over, final score {}", state.score);
    }
}
