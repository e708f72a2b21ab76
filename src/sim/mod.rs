//! Deterministic simulation module
//!
//! All physics and gameplay logic lives here. This module must be pure and
//! deterministic:
//! - Normalized, clamped timestep only
//! - Seeded RNG only, passed in by the host
//! - Stable iteration order (rings by index, balls by id)
//! - `step` never mutates its input state
//! - No rendering or platform dependencies

pub mod animate;
pub mod events;
pub mod integrate;
pub mod particles;
pub mod population;
pub mod rings;
pub mod state;
pub mod step;
pub mod walls;

pub use events::{Event, Wall};
pub use state::{Ball, Particle, Ring, SimulationState};
pub use step::step;
