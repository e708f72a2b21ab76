//! Ringfall - deterministic physics core for ring-escape arcade games
//!
//! Core modules:
//! - `config`: engine configuration, game-mode presets, particle styles
//! - `sim`: deterministic simulation (integration, collisions, ring gates,
//!   particles, population rules)
//!
//! Rendering, audio and input belong to the host; the host calls
//! [`sim::step`] once per animation frame and consumes the returned snapshot
//! and event list.

pub mod config;
pub mod sim;

pub use config::{Config, GameMode, ParticleStyle};
pub use sim::{Ball, Event, Particle, Ring, SimulationState, Wall, step};

use glam::Vec2;
use std::f32::consts::TAU;

/// Fixed tuning constants (not host-configurable)
pub mod consts {
    /// Fraction of the remaining radius delta a ring closes per frame
    pub const RADIUS_EASE: f32 = 0.05;
    /// Radius delta under which an animating ring snaps to its target
    pub const RADIUS_SNAP_EPSILON: f32 = 0.5;
    /// Exponent for rotation-speed scaling while a ring shrinks.
    /// 1.0 would fully compensate for the smaller circumference, 0.0 not at
    /// all; 0.5 is the tuned compromise and must not change.
    pub const ROTATION_SCALE_EXPONENT: f32 = 0.5;

    /// Particle burst size per unit of ring radius (before style multiplier)
    pub const BURST_RADIUS_SCALE: f32 = 1.5;
    /// Burst size bounds after scaling
    pub const BURST_MIN: usize = 50;
    pub const BURST_MAX: usize = 300;

    /// Inward pull on particles toward the arena center (px/frame^2)
    pub const PARTICLE_GRAVITY: f32 = 0.04;
    /// Per-frame particle velocity damping
    pub const PARTICLE_FRICTION: f32 = 0.97;
    /// Half-width of the per-frame particle velocity jitter
    pub const PARTICLE_JITTER: f32 = 0.06;
    /// Particle radius decays as lifetime_ratio ^ this exponent
    pub const PARTICLE_SHRINK_EXPONENT: f32 = 0.7;
    /// Particle alpha decays as lifetime_ratio ^ this exponent
    pub const PARTICLE_FADE_EXPONENT: f32 = 1.5;
}

/// Wrap an angle to [0, 2π)
#[inline]
pub fn wrap_angle(mut angle: f32) -> f32 {
    angle %= TAU;
    if angle < 0.0 {
        angle += TAU;
    }
    angle
}

/// Convert polar (r, theta) to a cartesian offset from the origin
#[inline]
pub fn polar_to_cartesian(r: f32, theta: f32) -> Vec2 {
    Vec2::new(r * theta.cos(), r * theta.sin())
}

/// Convert a cartesian offset to polar (r, theta), theta in [0, 2π)
#[inline]
pub fn cartesian_to_polar(offset: Vec2) -> (f32, f32) {
    (offset.length(), wrap_angle(offset.y.atan2(offset.x)))
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::f32::consts::PI;

    #[test]
    fn test_wrap_angle_range() {
        assert!((wrap_angle(0.0) - 0.0).abs() < 1e-6);
        assert!((wrap_angle(TAU) - 0.0).abs() < 1e-6);
        assert!((wrap_angle(-PI / 2.0) - 1.5 * PI).abs() < 1e-6);
        assert!((wrap_angle(5.0 * TAU + 0.25) - 0.25).abs() < 1e-4);
        for a in [-100.0_f32, -1.0, 0.0, 1.0, 100.0] {
            let w = wrap_angle(a);
            assert!((0.0..TAU).contains(&w), "wrap_angle({a}) = {w}");
        }
    }

    #[test]
    fn test_polar_round_trip() {
        let p = polar_to_cartesian(120.0, 1.2);
        let (r, theta) = cartesian_to_polar(p);
        assert!((r - 120.0).abs() < 1e-3);
        assert!((theta - 1.2).abs() < 1e-4);
    }
}
