//! Particle bursts for ring destruction
//!
//! Purely cosmetic, but the spawn and decay rules are part of the engine's
//! deterministic surface: hosts count on identical seeds producing identical
//! bursts. All randomness comes from the injected generator.

use glam::Vec2;
use rand::Rng;
use rand_pcg::Pcg32;

use super::state::{Particle, SimulationState};
use crate::config::{Config, ParticleStyle};
use crate::consts::{
    BURST_MAX, BURST_MIN, BURST_RADIUS_SCALE, PARTICLE_FRICTION, PARTICLE_GRAVITY,
    PARTICLE_JITTER, PARTICLE_SHRINK_EXPONENT,
};
use crate::polar_to_cartesian;

/// Tuning for one burst style
#[derive(Debug, Clone, Copy)]
pub struct StyleParams {
    pub count_mult: f32,
    pub speed: (f32, f32),
    pub size: (f32, f32),
    pub lifetime: (f32, f32),
}

impl ParticleStyle {
    /// The five presets, reproduced verbatim
    pub fn params(&self) -> StyleParams {
        match self {
            ParticleStyle::Standard => StyleParams {
                count_mult: 1.0,
                speed: (1.0, 4.0),
                size: (1.5, 3.5),
                lifetime: (40.0, 80.0),
            },
            ParticleStyle::Sparkle => StyleParams {
                count_mult: 1.5,
                speed: (0.5, 2.5),
                size: (0.8, 2.0),
                lifetime: (25.0, 55.0),
            },
            ParticleStyle::Explosion => StyleParams {
                count_mult: 2.0,
                speed: (3.0, 9.0),
                size: (2.0, 5.0),
                lifetime: (30.0, 70.0),
            },
            ParticleStyle::Minimal => StyleParams {
                count_mult: 0.5,
                speed: (1.0, 3.0),
                size: (1.0, 2.0),
                lifetime: (20.0, 40.0),
            },
            ParticleStyle::Confetti => StyleParams {
                count_mult: 1.2,
                speed: (1.5, 5.0),
                size: (2.0, 4.0),
                lifetime: (50.0, 100.0),
            },
        }
    }
}

const SPARKLE_PALETTE: [u32; 3] = [0xFFFFFF, 0xFFE9A0, 0xFFD166];
const EXPLOSION_PALETTE: [u32; 4] = [0xFF4D00, 0xFF9E00, 0xFFD000, 0x7A1E00];
const CONFETTI_PALETTE: [u32; 6] = [
    0xFF3B6B, 0xFFB830, 0x3BDB6E, 0x2FA8FF, 0xB067FF, 0xFFF45E,
];

/// Per-channel linear blend of two packed 0xRRGGBB colors
fn mix_color(a: u32, b: u32, t: f32) -> u32 {
    let lerp = |ca: u32, cb: u32| -> u32 {
        let v = ca as f32 + (cb as f32 - ca as f32) * t;
        (v.clamp(0.0, 255.0)) as u32
    };
    let r = lerp((a >> 16) & 0xFF, (b >> 16) & 0xFF);
    let g = lerp((a >> 8) & 0xFF, (b >> 8) & 0xFF);
    let bl = lerp(a & 0xFF, b & 0xFF);
    (r << 16) | (g << 8) | bl
}

/// Derive one particle color for a style from the ring's color
fn derive_color(style: ParticleStyle, ring_color: u32, rng: &mut Pcg32) -> u32 {
    match style {
        ParticleStyle::Standard => {
            if rng.random_range(0.0..1.0_f32) < 0.3 {
                mix_color(ring_color, 0xFFFFFF, 0.5)
            } else {
                ring_color
            }
        }
        ParticleStyle::Sparkle => SPARKLE_PALETTE[rng.random_range(0..SPARKLE_PALETTE.len())],
        ParticleStyle::Explosion => EXPLOSION_PALETTE[rng.random_range(0..EXPLOSION_PALETTE.len())],
        ParticleStyle::Minimal => ring_color,
        ParticleStyle::Confetti => CONFETTI_PALETTE[rng.random_range(0..CONFETTI_PALETTE.len())],
    }
}

/// Burst size for a ring of the given radius under a style
pub fn burst_count(ring_radius: f32, style: ParticleStyle) -> usize {
    let raw = (ring_radius * BURST_RADIUS_SCALE * style.params().count_mult).round() as usize;
    raw.clamp(BURST_MIN, BURST_MAX)
}

/// Synthesize a destruction burst around the ring's arc and push it into the
/// state (oldest particles are dropped past the cap). Returns the batch for
/// the `ParticlesSpawned` event.
pub fn emit_ring_burst(
    state: &mut SimulationState,
    ring_id: u32,
    center: Vec2,
    cfg: &Config,
    rng: &mut Pcg32,
) -> Vec<Particle> {
    let Some((radius, color)) = state
        .rings
        .iter()
        .find(|r| r.id == ring_id)
        .map(|r| (r.radius, r.color))
    else {
        return Vec::new();
    };

    let style = cfg.particle_style;
    let params = style.params();
    let count = burst_count(radius, style);

    let mut batch = Vec::with_capacity(count);
    for _ in 0..count {
        let theta = rng.random_range(0.0..std::f32::consts::TAU);
        let radial_offset = rng.random_range(-2.0..=2.0_f32);
        let pos = center + polar_to_cartesian(radius + radial_offset, theta);

        // Mostly outward with a tangential component for swirl
        let outward = Vec2::new(theta.cos(), theta.sin());
        let tangent = Vec2::new(-theta.sin(), theta.cos());
        let tang_factor = rng.random_range(-0.5..=0.5_f32);
        let speed = rng.random_range(params.speed.0..=params.speed.1);
        let vel = (outward + tangent * tang_factor).normalize() * speed;

        let size = rng.random_range(params.size.0..=params.size.1);
        let lifetime = rng.random_range(params.lifetime.0..=params.lifetime.1);
        let id = state.next_particle_id();
        batch.push(Particle {
            id,
            pos,
            vel,
            radius: size,
            initial_radius: size,
            color: derive_color(style, color, rng),
            lifetime,
            max_lifetime: lifetime,
        });
    }

    state.particles.extend(batch.iter().cloned());
    if state.particles.len() > cfg.max_particles {
        let excess = state.particles.len() - cfg.max_particles;
        state.particles.drain(0..excess);
    }

    batch
}

/// Advance all particles by one step and drop the expired ones.
pub fn update_particles(particles: &mut Vec<Particle>, center: Vec2, rng: &mut Pcg32, dt: f32) {
    for particle in particles.iter_mut() {
        particle.pos += particle.vel * dt;

        let to_center = (center - particle.pos).normalize_or_zero();
        particle.vel += to_center * PARTICLE_GRAVITY * dt;
        particle.vel *= PARTICLE_FRICTION.powf(dt);
        particle.vel += Vec2::new(
            rng.random_range(-PARTICLE_JITTER..=PARTICLE_JITTER),
            rng.random_range(-PARTICLE_JITTER..=PARTICLE_JITTER),
        ) * dt;

        particle.lifetime -= dt;
        particle.radius =
            particle.initial_radius * particle.lifetime_ratio().powf(PARTICLE_SHRINK_EXPONENT);
    }
    particles.retain(|p| p.lifetime > 0.0);
}
