//! Engine configuration and game-mode presets
//!
//! One `Config` drives every game variant; a `GameMode` is just a named
//! preset plus a choice of which resolvers are active.

use glam::Vec2;
use serde::{Deserialize, Serialize};

/// Particle burst style for ring destruction effects
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
pub enum ParticleStyle {
    #[default]
    Standard,
    Sparkle,
    Explosion,
    Minimal,
    Confetti,
}

impl ParticleStyle {
    pub fn as_str(&self) -> &'static str {
        match self {
            ParticleStyle::Standard => "Standard",
            ParticleStyle::Sparkle => "Sparkle",
            ParticleStyle::Explosion => "Explosion",
            ParticleStyle::Minimal => "Minimal",
            ParticleStyle::Confetti => "Confetti",
        }
    }

    pub fn from_str(s: &str) -> Option<Self> {
        match s.to_lowercase().as_str() {
            "standard" => Some(ParticleStyle::Standard),
            "sparkle" => Some(ParticleStyle::Sparkle),
            "explosion" => Some(ParticleStyle::Explosion),
            "minimal" => Some(ParticleStyle::Minimal),
            "confetti" => Some(ParticleStyle::Confetti),
            _ => None,
        }
    }
}

/// Named presets collapsing the game variants into one engine
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
pub enum GameMode {
    /// Walls and rings, gravity on
    #[default]
    Classic,
    /// Rings only, no gravity, faster gate rotation
    ZeroG,
    /// Shrinking rings, multiple balls spawned per escape
    Cascade,
    /// Walls only, strong gravity, no rings
    Pinfield,
    /// Balls grow on every ring bounce until one fills the arena
    Overgrowth,
}

impl GameMode {
    /// Build the configuration for this mode
    pub fn config(&self) -> Config {
        let mut cfg = Config::default();
        match self {
            GameMode::Classic => {}
            GameMode::ZeroG => {
                cfg.walls_enabled = false;
                cfg.gravity = 0.0;
                cfg.air_resistance = 1.0;
                cfg.rotation_speed = 0.035;
                cfg.particle_style = ParticleStyle::Minimal;
            }
            GameMode::Cascade => {
                cfg.balls_on_destroy = 2;
                cfg.shrink_factor = 0.8;
                cfg.particle_style = ParticleStyle::Explosion;
            }
            GameMode::Pinfield => {
                cfg.rings_enabled = false;
                cfg.gravity = 0.5;
                cfg.bounciness = 0.92;
                cfg.particle_style = ParticleStyle::Sparkle;
            }
            GameMode::Overgrowth => {
                cfg.growth_rate = 0.4;
                cfg.balls_on_destroy = 0;
                cfg.lethal_ball_radius_frac = 0.35;
                cfg.particle_style = ParticleStyle::Confetti;
            }
        }
        cfg
    }
}

/// Engine configuration
///
/// All speeds are px/frame with dt normalized so 1.0 equals one 60 Hz frame;
/// angles are radians. Defaults match the tuned source constants. Values are
/// never validated up front: degenerate combinations (e.g. a gap that would
/// invert ring order) are reconciled at runtime by the retargeting max()
/// chain, so every config produces a consistent layout.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Config {
    // === Arena ===
    pub arena_width: f32,
    pub arena_height: f32,
    /// Resolve collisions against the four arena edges
    pub walls_enabled: bool,
    /// Resolve collisions against the concentric rings
    pub rings_enabled: bool,

    // === Kinematics ===
    /// Downward acceleration (px/frame^2, +y is down)
    pub gravity: f32,
    pub gravity_scaling: f32,
    /// Per-frame velocity multiplier, <= 1.0 (1.0 = no drag)
    pub air_resistance: f32,
    /// Non-zero speeds below this are rescaled up (keeps play kinetic)
    pub min_velocity: f32,
    pub max_velocity: f32,

    // === Walls ===
    /// Restitution for wall and ring bounces
    pub bounciness: f32,
    /// Inset of the collision boundary from the arena edge
    pub wall_margin: f32,
    /// Extra repositioning clearance as a fraction of ball radius
    pub wall_safety_frac: f32,
    /// Floor on the reflected perpendicular speed
    pub min_rebound_speed: f32,
    /// Multiplier on the tangential component at a wall hit
    pub wall_friction: f32,
    /// Max post-bounce angle perturbation (radians, 0 disables)
    pub bounce_jitter: f32,
    /// Frames after a wall hit during which velocity changes are suppressed
    pub wall_immunity_frames: f32,

    // === Rings ===
    pub ring_count: u32,
    pub innermost_radius: f32,
    pub ring_spacing: f32,
    /// Angular width of the exit gate
    pub gate_width_radians: f32,
    /// Forgiveness margin on each gate side, as a fraction of gate width
    pub gate_margin_frac: f32,
    /// Pass-through requires dist > radius - ball_radius * this fraction
    pub pass_depth_frac: f32,
    /// Base gate rotation speed (radians/frame)
    pub rotation_speed: f32,
    /// Initial gate offset per ring index, as a fraction of a full turn
    pub progressive_rotation_offset_pct: f32,
    /// Repositioning clearance off the ring arc
    pub ring_safety_margin: f32,
    /// Frames after a ring hit during which velocity changes are suppressed
    pub ring_immunity_frames: f32,
    /// Score awarded per destroyed ring
    pub ring_score: u64,

    // === Shrink on destroy ===
    pub shrink_on_destroy: bool,
    /// Per-destruction multiplier folded into the cumulative shrink factor
    pub shrink_factor: f32,
    /// Minimum radial gap kept between consecutive ring targets (0 disables)
    pub min_circle_gap: f32,
    /// Hard floor on any ring target radius
    pub min_circle_radius: f32,

    // === Population ===
    /// Balls spawned per ring destruction
    pub balls_on_destroy: u32,
    /// Live-ball cap; excess spawns are skipped, never trimmed
    pub max_ball_count: usize,
    pub base_ball_radius: f32,
    /// Per-ball restitution multiplier applied on ring bounces
    pub ball_elasticity: f32,
    /// Radius gained per ring bounce (0 disables growth)
    pub growth_rate: f32,
    /// Growth cap as a fraction of the half play-field
    pub max_ball_radius_frac: f32,
    /// Game over when a ball reaches this fraction of the half play-field
    /// (0 disables the variant)
    pub lethal_ball_radius_frac: f32,

    // === Particles ===
    pub particle_style: ParticleStyle,
    /// Particle buffer cap; oldest are dropped first
    pub max_particles: usize,

    // === Stepping ===
    /// dt clamp in frame units (guards tab-switch stalls)
    pub max_delta_frames: f32,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            arena_width: 800.0,
            arena_height: 600.0,
            walls_enabled: true,
            rings_enabled: true,

            gravity: 0.25,
            gravity_scaling: 1.0,
            air_resistance: 0.999,
            min_velocity: 2.0,
            max_velocity: 12.0,

            bounciness: 0.85,
            wall_margin: 5.0,
            wall_safety_frac: 0.1,
            min_rebound_speed: 1.5,
            wall_friction: 0.98,
            bounce_jitter: 0.05,
            wall_immunity_frames: 6.0,

            ring_count: 5,
            innermost_radius: 90.0,
            ring_spacing: 45.0,
            gate_width_radians: 30.0_f32.to_radians(),
            gate_margin_frac: 0.1,
            pass_depth_frac: 0.5,
            rotation_speed: 0.02,
            progressive_rotation_offset_pct: 0.15,
            ring_safety_margin: 2.0,
            ring_immunity_frames: 6.0,
            ring_score: 10,

            shrink_on_destroy: true,
            shrink_factor: 0.9,
            min_circle_gap: 15.0,
            min_circle_radius: 40.0,

            balls_on_destroy: 1,
            max_ball_count: 12,
            base_ball_radius: 8.0,
            ball_elasticity: 1.0,
            growth_rate: 0.0,
            max_ball_radius_frac: 0.25,
            lethal_ball_radius_frac: 0.0,

            particle_style: ParticleStyle::Standard,
            max_particles: 1024,

            max_delta_frames: 3.0,
        }
    }
}

impl Config {
    /// Center of the arena (the ring system is concentric around it)
    #[inline]
    pub fn arena_center(&self) -> Vec2 {
        Vec2::new(self.arena_width / 2.0, self.arena_height / 2.0)
    }

    /// Half of the smaller arena dimension (radius caps are fractions of it)
    #[inline]
    pub fn half_min_dimension(&self) -> f32 {
        self.arena_width.min(self.arena_height) / 2.0
    }

    /// Serialize to JSON for host-side storage
    pub fn to_json(&self) -> String {
        serde_json::to_string(self).unwrap_or_default()
    }

    /// Load from JSON; `None` on malformed input
    pub fn from_json(json: &str) -> Option<Self> {
        serde_json::from_str(json).ok()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_matches_observed_constants() {
        let cfg = Config::default();
        assert_eq!(cfg.ring_score, 10);
        assert!((cfg.gate_width_radians - 30.0_f32.to_radians()).abs() < 1e-6);
        assert!((cfg.gate_margin_frac - 0.1).abs() < 1e-6);
        assert!((cfg.pass_depth_frac - 0.5).abs() < 1e-6);
        assert!((cfg.shrink_factor - 0.9).abs() < 1e-6);
        assert!(cfg.walls_enabled && cfg.rings_enabled);
    }

    #[test]
    fn test_mode_presets_toggle_resolvers() {
        assert!(!GameMode::ZeroG.config().walls_enabled);
        assert!(GameMode::ZeroG.config().rings_enabled);
        assert!(!GameMode::Pinfield.config().rings_enabled);
        assert!(GameMode::Pinfield.config().walls_enabled);
        let cascade = GameMode::Cascade.config();
        assert_eq!(cascade.balls_on_destroy, 2);
        assert_eq!(cascade.particle_style, ParticleStyle::Explosion);
        let growth = GameMode::Overgrowth.config();
        assert!(growth.growth_rate > 0.0);
        assert!(growth.lethal_ball_radius_frac > 0.0);
    }

    #[test]
    fn test_json_round_trip() {
        let cfg = GameMode::Cascade.config();
        let json = cfg.to_json();
        let back = Config::from_json(&json).unwrap();
        assert_eq!(cfg, back);
        assert!(Config::from_json("not json").is_none());
    }

    #[test]
    fn test_particle_style_names() {
        for style in [
            ParticleStyle::Standard,
            ParticleStyle::Sparkle,
            ParticleStyle::Explosion,
            ParticleStyle::Minimal,
            ParticleStyle::Confetti,
        ] {
            assert_eq!(ParticleStyle::from_str(style.as_str()), Some(style));
        }
        assert_eq!(ParticleStyle::from_str("plasma"), None);
    }
}
