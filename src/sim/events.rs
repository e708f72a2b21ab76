//! Discrete events emitted by `step` for the rendering/audio layers
//!
//! The core never reacts to its own events; hosts map them to sounds,
//! flashes and score popups.

use glam::Vec2;
use serde::{Deserialize, Serialize};

use super::state::{Ball, Particle};

/// Arena edge identifier
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Wall {
    Left,
    Right,
    Top,
    Bottom,
}

/// One frame's discrete happenings, in emission order
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum Event {
    /// A ball rebounded off an arena edge
    WallCollision {
        wall: Wall,
        ball_id: u32,
        impact_speed: f32,
    },
    /// A ball rebounded off a ring's solid arc
    RingBounce {
        ring_id: u32,
        ball_id: u32,
        impact_speed: f32,
    },
    /// A ball escaped through a gate and the ring is gone
    RingDestroyed {
        ring_id: u32,
        center: Vec2,
        radius: f32,
        color: u32,
    },
    /// The burst synthesized for a destruction, already in the state
    ParticlesSpawned {
        ring_id: u32,
        particles: Vec<Particle>,
    },
    /// A ball's radius increased on a ring bounce
    BallGrew { ball_id: u32, new_radius: f32 },
    /// A replacement ball entered play
    BallSpawned { ball: Ball },
    /// Terminal condition reached; the state stays steppable
    GameOver { score: u64 },
}
