//! The per-frame simulation step
//!
//! `step` is the whole public surface of the engine: a pure transform from
//! one state snapshot to the next plus the discrete events the frame
//! produced. The host owns scheduling, rendering and the RNG; identical
//! `(state, dt sequence, config, seed)` inputs replay bit-identically.

use rand_pcg::Pcg32;

use super::animate::{animate_rings, retarget_rings};
use super::events::Event;
use super::integrate::integrate;
use super::particles::{emit_ring_burst, update_particles};
use super::population::{check_game_over, grow_on_bounce, spawn_on_destroy};
use super::rings::resolve_rings;
use super::state::SimulationState;
use super::walls::resolve_walls;
use crate::config::Config;

/// Advance the simulation by one frame.
///
/// Frame order: ring animation, then per ball integrate → walls → rings,
/// then destruction side effects (score, shrink retarget, particle burst,
/// replacement spawns), particle decay, and the terminal check. The input
/// state is never mutated.
pub fn step(
    state: &SimulationState,
    dt: f32,
    cfg: &Config,
    rng: &mut Pcg32,
) -> (SimulationState, Vec<Event>) {
    // Large dt means the host tab stalled; clamp instead of exploding
    let dt = dt.clamp(0.0, cfg.max_delta_frames);

    let mut next = state.clone();
    let mut events = Vec::new();
    let center = cfg.arena_center();

    next.tick += 1;
    next.time += dt;

    animate_rings(&mut next.rings, dt);

    let mut destroyed: Vec<u32> = Vec::new();
    for idx in 0..next.balls.len() {
        let ball = &mut next.balls[idx];

        integrate(ball, cfg, dt);

        if cfg.walls_enabled {
            resolve_walls(ball, cfg, next.time, rng, &mut events);
        }

        if cfg.rings_enabled {
            let contacts =
                resolve_rings(ball, &mut next.rings, cfg, center, next.time, rng, &mut events);
            if contacts.bounced {
                grow_on_bounce(ball, cfg, &mut events);
            }
            destroyed.extend(contacts.destroyed);
        }
    }

    for ring_id in destroyed {
        next.score += cfg.ring_score;

        if cfg.shrink_on_destroy {
            next.cumulative_shrink *= cfg.shrink_factor;
            retarget_rings(&mut next.rings, next.cumulative_shrink, cfg);
        }

        let batch = emit_ring_burst(&mut next, ring_id, center, cfg, rng);
        if !batch.is_empty() {
            events.push(Event::ParticlesSpawned {
                ring_id,
                particles: batch,
            });
        }

        let ring_radius = next
            .rings
            .iter()
            .find(|r| r.id == ring_id)
            .map(|r| r.radius)
            .unwrap_or(cfg.innermost_radius);
        spawn_on_destroy(&mut next, ring_radius, cfg, rng, &mut events);
    }

    update_particles(&mut next.particles, center, rng, dt);

    check_game_over(&mut next, cfg, &mut events);

    next.normalize_order();
    (next, events)
}
