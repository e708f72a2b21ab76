//! Ring collision and gate resolution
//!
//! Each ring is a thin circle with one angular gate. A ball touching a ring
//! either escapes through the gate (destroying the ring) or rebounds off the
//! solid arc. Rings are processed in ascending index order; the first ring
//! that changes the ball's velocity ends the pass, so a second contact is
//! evaluated next frame against the updated trajectory.

use glam::Vec2;
use rand::Rng;
use rand_pcg::Pcg32;

use super::events::Event;
use super::state::{Ball, Ring};
use crate::config::Config;
use crate::{polar_to_cartesian, wrap_angle};

/// What one ball's pass over the ring stack did
#[derive(Debug, Default)]
pub struct RingContacts {
    /// Ids of rings destroyed by gate escapes, in order
    pub destroyed: Vec<u32>,
    /// Whether a solid-arc bounce changed the ball's velocity
    pub bounced: bool,
}

/// True when `theta` falls inside the gate arc, widened by `margin` on both
/// sides. Handles wraparound across 0/2π.
#[inline]
pub fn gate_contains(rotation: f32, gate_width: f32, margin: f32, theta: f32) -> bool {
    let rel = wrap_angle(theta - (rotation - margin));
    rel < gate_width + 2.0 * margin
}

/// Resolve one ball against every active ring.
pub fn resolve_rings(
    ball: &mut Ball,
    rings: &mut [Ring],
    cfg: &Config,
    center: Vec2,
    time: f32,
    rng: &mut Pcg32,
    events: &mut Vec<Event>,
) -> RingContacts {
    let mut contacts = RingContacts::default();
    let gate_margin = cfg.gate_margin_frac * cfg.gate_width_radians;

    for ring in rings.iter_mut().filter(|r| r.active()) {
        let offset = ball.pos - center;
        let dist = offset.length();

        if (dist - ring.radius).abs() >= ball.radius {
            continue;
        }

        let theta = wrap_angle(offset.y.atan2(offset.x));
        let radial = ball.vel.dot(offset);
        let moving_outward = radial > 0.0;

        let escapes = moving_outward
            && gate_contains(ring.rotation, cfg.gate_width_radians, gate_margin, theta)
            && dist > ring.radius - ball.radius * cfg.pass_depth_frac;

        if escapes {
            ring.destroyed = true;
            contacts.destroyed.push(ring.id);
            // Renormalize to the spawn speed so repeated inelastic bounces
            // never leave escapes sluggish
            let speed = ball.vel.length();
            if speed > 0.0 && ball.initial_speed > 0.0 {
                ball.vel *= ball.initial_speed / speed;
            }
            events.push(Event::RingDestroyed {
                ring_id: ring.id,
                center,
                radius: ring.radius,
                color: ring.color,
            });
            log::debug!("ring {} destroyed at radius {:.1}", ring.id, ring.radius);
            // Trajectory unchanged in direction; keep evaluating outer rings
            continue;
        }

        // Solid-arc contact. Degenerate center position falls back to a
        // fixed normal instead of dividing by zero.
        let normal = if dist > f32::EPSILON {
            offset / dist
        } else {
            Vec2::X
        };

        // Side the ball approached from; the distance test is the fallback
        // for a near-stationary ball sitting on the arc
        let from_inside = if radial.abs() > f32::EPSILON {
            moving_outward
        } else {
            dist < ring.radius
        };

        // Reposition always, even inside the immunity window
        let clearance = ball.radius + cfg.ring_safety_margin;
        let target_r = if from_inside {
            ring.radius - clearance
        } else {
            ring.radius + clearance
        };
        ball.pos = center + normal * target_r.max(0.0);

        let immune = ball
            .last_ring_hit
            .is_some_and(|t| time - t < cfg.ring_immunity_frames);
        if immune {
            continue;
        }

        let impact_speed = ball.vel.length();
        let restitution = cfg.bounciness * ball.elasticity;
        ball.vel = reflect(ball.vel, normal) * restitution;

        let speed = ball.vel.length();
        if speed > cfg.max_velocity {
            ball.vel *= cfg.max_velocity / speed;
        } else if speed <= f32::EPSILON {
            // A dead-stop reflection would pin the ball to the arc; kick it
            // out at the floor speed in a random direction. Sub-minimum but
            // non-zero speeds are left for the next integration pass to
            // rescale.
            let theta = rng.random_range(0.0..std::f32::consts::TAU);
            ball.vel = polar_to_cartesian(cfg.min_velocity, theta);
        }

        ball.last_ring_hit = Some(time);
        contacts.bounced = true;
        events.push(Event::RingBounce {
            ring_id: ring.id,
            ball_id: ball.id,
            impact_speed,
        });
        break;
    }

    contacts
}

/// Standard reflection: v' = v - 2(v·n)n
#[inline]
pub fn reflect(vel: Vec2, normal: Vec2) -> Vec2 {
    vel - 2.0 * vel.dot(normal) * normal
}
