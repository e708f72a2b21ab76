//! Ring animation: gate rotation, radius easing, shrink retargeting
//!
//! Radius changes are a first-order low-pass toward `target_radius`, not a
//! simulated spring; rotation speed tracks the current size so a shrinking
//! ring does not visually spin up.

use super::state::Ring;
use crate::config::Config;
use crate::consts::{RADIUS_EASE, RADIUS_SNAP_EPSILON, ROTATION_SCALE_EXPONENT};
use crate::wrap_angle;

/// Advance every active ring by one step.
pub fn animate_rings(rings: &mut [Ring], dt: f32) {
    for ring in rings.iter_mut().filter(|r| r.active()) {
        ring.rotation = wrap_angle(ring.rotation + ring.rotation_speed * dt);

        let delta = ring.target_radius - ring.radius;
        if delta.abs() > RADIUS_SNAP_EPSILON {
            ring.radius += delta * (RADIUS_EASE * dt).min(1.0);
        } else if delta != 0.0 {
            ring.radius = ring.target_radius;
            ring.flashing = false;
        } else if ring.flashing {
            ring.flashing = false;
        }

        // Keep angular motion perceptually steady as the ring resizes; the
        // square root is the tuned midpoint between full compensation and
        // none and must match the source exactly
        if ring.original_radius > 0.0 {
            let ratio = (ring.radius / ring.original_radius).max(0.0);
            ring.rotation_speed =
                ring.original_rotation_speed * ratio.powf(ROTATION_SCALE_EXPONENT);
        }
    }
}

/// Recompute every active ring's target radius after a shrink.
///
/// Ascending index order; each target is the max of the shrunk ideal, the
/// gap-enforced floor above the previous ring, and the hard minimum. The
/// chain guarantees rings never overlap or invert order, whatever the
/// configuration. Rings whose target moved start flashing.
pub fn retarget_rings(rings: &mut [Ring], cumulative_shrink: f32, cfg: &Config) {
    let mut prev_target: Option<f32> = None;
    for ring in rings.iter_mut().filter(|r| r.active()) {
        let ideal = ring.original_radius * cumulative_shrink;
        let mut target = ideal.max(cfg.min_circle_radius);
        if cfg.min_circle_gap > 0.0
            && let Some(prev) = prev_target
        {
            target = target.max(prev + cfg.min_circle_gap + cfg.base_ball_radius);
        }

        if (target - ring.target_radius).abs() > f32::EPSILON {
            ring.target_radius = target;
            ring.flashing = true;
        }
        prev_target = Some(target);
    }
}
