//! Simulation state and core entity types
//!
//! Everything the host needs to persist or diff between frames lives here.

use glam::Vec2;
use rand::Rng;
use rand_pcg::Pcg32;
use serde::{Deserialize, Serialize};

use crate::config::Config;
use crate::{polar_to_cartesian, wrap_angle};

/// Ring colors by index (0xRRGGBB), cycled for deep stacks
pub const RING_PALETTE: [u32; 6] = [
    0x4DD2FF, // cyan
    0x7CFF6B, // green
    0xFFD166, // amber
    0xFF6B9E, // pink
    0xB08CFF, // violet
    0xFF8C42, // orange
];

/// A ball entity
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Ball {
    pub id: u32,
    pub pos: Vec2,
    pub vel: Vec2,
    pub radius: f32,
    /// Speed at spawn; escapes are renormalized to it so repeated inelastic
    /// bounces never bleed the game down to a crawl
    pub initial_speed: f32,
    /// Per-ball restitution multiplier for ring bounces
    pub elasticity: f32,
    /// Sim time of the last wall velocity response (immunity window anchor)
    #[serde(default)]
    pub last_wall_hit: Option<f32>,
    /// Sim time of the last ring velocity response, tracked independently
    #[serde(default)]
    pub last_ring_hit: Option<f32>,
    /// Set while growth-on-bounce is still below its cap
    #[serde(default)]
    pub growing: bool,
}

impl Ball {
    pub fn new(id: u32, pos: Vec2, vel: Vec2, radius: f32, elasticity: f32) -> Self {
        Self {
            id,
            pos,
            vel,
            radius,
            initial_speed: vel.length(),
            elasticity,
            last_wall_hit: None,
            last_ring_hit: None,
            growing: false,
        }
    }

    #[inline]
    pub fn speed(&self) -> f32 {
        self.vel.length()
    }
}

/// A concentric ring with one angular exit gate
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Ring {
    pub id: u32,
    /// Position in the concentric sequence, 0 = innermost
    pub index: u32,
    pub radius: f32,
    /// Animation goal; eased toward each frame
    pub target_radius: f32,
    /// Baseline for shrink-factor math
    pub original_radius: f32,
    /// Angular offset of the gate's leading edge, always in [0, 2π)
    pub rotation: f32,
    /// Radians per frame, sign is spin direction
    pub rotation_speed: f32,
    /// Baseline for proportional speed scaling while shrinking
    pub original_rotation_speed: f32,
    /// One-way: a destroyed ring never comes back
    pub destroyed: bool,
    /// Transient render cue, set while the ring animates to a new target
    #[serde(default)]
    pub flashing: bool,
    pub color: u32,
}

impl Ring {
    /// Whether this ring still participates in collision and animation
    #[inline]
    pub fn active(&self) -> bool {
        !self.destroyed
    }
}

/// A short-lived cosmetic particle
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Particle {
    pub id: u32,
    pub pos: Vec2,
    pub vel: Vec2,
    pub radius: f32,
    pub initial_radius: f32,
    pub color: u32,
    /// Remaining life in frame units; removed at <= 0
    pub lifetime: f32,
    pub max_lifetime: f32,
}

impl Particle {
    /// Remaining life as a fraction of the full lifetime
    #[inline]
    pub fn lifetime_ratio(&self) -> f32 {
        if self.max_lifetime <= 0.0 {
            0.0
        } else {
            (self.lifetime / self.max_lifetime).clamp(0.0, 1.0)
        }
    }

    /// Render alpha, fading faster than linear toward the end
    #[inline]
    pub fn alpha(&self) -> f32 {
        self.lifetime_ratio()
            .powf(crate::consts::PARTICLE_FADE_EXPONENT)
    }
}

/// Complete simulation state (deterministic, serializable)
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SimulationState {
    /// Step counter
    pub tick: u64,
    /// Accumulated sim time in frame units
    pub time: f32,
    /// Active balls (sorted by id for determinism)
    pub balls: Vec<Ball>,
    /// Concentric rings, ascending index = ascending radius
    pub rings: Vec<Ring>,
    /// Cosmetic particles
    pub particles: Vec<Particle>,
    pub score: u64,
    /// One-way; the state stays steppable after it flips
    pub game_over: bool,
    /// Product of per-destruction shrink factors
    pub cumulative_shrink: f32,
    next_ball_id: u32,
    next_particle_id: u32,
}

impl SimulationState {
    /// Create the starting state: the configured ring stack plus one ball
    /// launched from the arena center in a random direction.
    pub fn new(cfg: &Config, rng: &mut Pcg32) -> Self {
        let mut state = Self {
            tick: 0,
            time: 0.0,
            balls: Vec::new(),
            rings: Vec::new(),
            particles: Vec::new(),
            score: 0,
            game_over: false,
            cumulative_shrink: 1.0,
            next_ball_id: 1,
            next_particle_id: 1,
        };

        if cfg.rings_enabled {
            for index in 0..cfg.ring_count {
                let radius = cfg.innermost_radius + index as f32 * cfg.ring_spacing;
                // Stagger the gates so they never start aligned, and
                // alternate spin direction by parity
                let rotation = wrap_angle(
                    index as f32 * cfg.progressive_rotation_offset_pct * std::f32::consts::TAU,
                );
                let direction = if index % 2 == 0 { 1.0 } else { -1.0 };
                let rotation_speed = cfg.rotation_speed * direction;
                state.rings.push(Ring {
                    id: index,
                    index,
                    radius,
                    target_radius: radius,
                    original_radius: radius,
                    rotation,
                    rotation_speed,
                    original_rotation_speed: rotation_speed,
                    destroyed: false,
                    flashing: false,
                    color: RING_PALETTE[index as usize % RING_PALETTE.len()],
                });
            }
        }

        let speed = (cfg.min_velocity + cfg.max_velocity) / 2.0;
        let theta = rng.random_range(0.0..std::f32::consts::TAU);
        let id = state.next_ball_id();
        state.balls.push(Ball::new(
            id,
            cfg.arena_center(),
            polar_to_cartesian(speed, theta),
            cfg.base_ball_radius,
            cfg.ball_elasticity,
        ));

        log::info!(
            "new simulation: {} rings, innermost radius {}",
            state.rings.len(),
            cfg.innermost_radius
        );

        state
    }

    /// Allocate a ball id
    pub fn next_ball_id(&mut self) -> u32 {
        let id = self.next_ball_id;
        self.next_ball_id += 1;
        id
    }

    /// Allocate a particle id
    pub fn next_particle_id(&mut self) -> u32 {
        let id = self.next_particle_id;
        self.next_particle_id += 1;
        id
    }

    /// Ensure stable iteration order for deterministic replay
    pub fn normalize_order(&mut self) {
        self.balls.sort_by_key(|b| b.id);
        self.rings.sort_by_key(|r| r.index);
        self.particles.sort_by_key(|p| p.id);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::SeedableRng;

    #[test]
    fn test_new_state_ring_layout() {
        let cfg = Config::default();
        let mut rng = Pcg32::seed_from_u64(7);
        let state = SimulationState::new(&cfg, &mut rng);

        assert_eq!(state.rings.len(), cfg.ring_count as usize);
        for (i, ring) in state.rings.iter().enumerate() {
            assert_eq!(ring.index as usize, i);
            assert!(!ring.destroyed);
            assert!((0.0..std::f32::consts::TAU).contains(&ring.rotation));
            if i > 0 {
                assert!(ring.radius > state.rings[i - 1].radius);
            }
        }
        // Alternating spin directions
        assert!(state.rings[0].rotation_speed > 0.0);
        assert!(state.rings[1].rotation_speed < 0.0);
    }

    #[test]
    fn test_new_state_initial_ball() {
        let cfg = Config::default();
        let mut rng = Pcg32::seed_from_u64(7);
        let state = SimulationState::new(&cfg, &mut rng);

        assert_eq!(state.balls.len(), 1);
        let ball = &state.balls[0];
        assert_eq!(ball.pos, cfg.arena_center());
        let expected = (cfg.min_velocity + cfg.max_velocity) / 2.0;
        assert!((ball.speed() - expected).abs() < 1e-3);
        assert!((ball.initial_speed - expected).abs() < 1e-3);
    }

    #[test]
    fn test_same_seed_same_state() {
        let cfg = Config::default();
        let a = SimulationState::new(&cfg, &mut Pcg32::seed_from_u64(42));
        let b = SimulationState::new(&cfg, &mut Pcg32::seed_from_u64(42));
        assert_eq!(a, b);
    }

    #[test]
    fn test_id_allocation_monotonic() {
        let cfg = Config::default();
        let mut state = SimulationState::new(&cfg, &mut Pcg32::seed_from_u64(1));
        let a = state.next_ball_id();
        let b = state.next_ball_id();
        assert!(b > a);
    }

    #[test]
    fn test_particle_alpha_curve() {
        let p = Particle {
            id: 1,
            pos: Vec2::ZERO,
            vel: Vec2::ZERO,
            radius: 2.0,
            initial_radius: 2.0,
            color: 0xFFFFFF,
            lifetime: 30.0,
            max_lifetime: 60.0,
        };
        // (0.5)^1.5 ≈ 0.3536
        assert!((p.alpha() - 0.5_f32.powf(1.5)).abs() < 1e-4);
    }
}
