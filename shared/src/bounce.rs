//! Edge bounce: reflecting the puck off the table boundary.
//!
//! Edges report trigger enter/leave for the puck. On enter, the incoming
//! velocity is flattened onto the play plane, reflected about the edge's
//! inward normal and scaled down; the caller clears the body's velocity and
//! applies the result as an impulse.

use glam::{Quat, Vec3};
use serde::{Deserialize, Serialize};

use crate::config::MatchConfig;

/// Edge-local forward axis; the edge normal before rotation.
pub const EDGE_FORWARD: Vec3 = Vec3::Y;

/// What a body is, for gameplay purposes.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BodyRole {
    Puck,
    Paddle,
    Edge,
    Table,
}

/// Zero the out-of-plane component.
pub fn flatten(v: Vec3) -> Vec3 {
    Vec3::new(v.x, v.y, 0.0)
}

/// Inward-facing normal of an edge with the given world rotation.
///
/// The forward axis is taken into the edge's frame (row-vector times
/// quaternion, i.e. the inverse rotation) and its X component is flipped so
/// that the normal points into the playing field. For rotations about Z this
/// equals rotating the forward axis by the edge rotation.
pub fn inward_normal(rotation: Quat) -> Vec3 {
    let mut n = rotation.inverse() * EDGE_FORWARD;
    n.x = -n.x;
    flatten(n)
}

/// `v - 2(v.n)n`
pub fn reflect(v: Vec3, n: Vec3) -> Vec3 {
    v - 2.0 * v.dot(n) * n
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Bounce {
    /// Unit reflected direction, before scaling.
    pub direction: Vec3,
    /// Outgoing velocity, `direction * speed * damping`.
    pub velocity: Vec3,
    /// `direction * repel_speed`, used by the repel correction.
    pub repel: Vec3,
}

/// Reflect `velocity` off an edge rotated by `edge_rotation`.
///
/// Returns `None` when the flattened velocity or the edge normal is
/// degenerate (zero length or non-finite).
pub fn compute_bounce(
    velocity: Vec3,
    edge_rotation: Quat,
    damping: f32,
    repel_speed: f32,
) -> Option<Bounce> {
    let incoming = flatten(velocity);
    let speed = incoming.length();

    let v = incoming.try_normalize()?;
    let n = inward_normal(edge_rotation).try_normalize()?;

    let direction = flatten(reflect(v, n));
    let velocity = direction * (speed * damping);
    let repel = direction.try_normalize().unwrap_or(Vec3::ZERO) * repel_speed;

    Some(Bounce {
        direction,
        velocity,
        repel,
    })
}

/// Per-body collision state of the bounce behaviour.
///
/// Nothing here is configuration, so the persisted form is an empty record.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct BounceState {
    #[serde(skip)]
    pub in_collision: bool,
    #[serde(skip)]
    pub reflection_velocity: Vec3,
    #[serde(skip)]
    pub repel_velocity: Vec3,
}

impl BounceState {
    /// Handle a trigger-enter against an edge.
    ///
    /// Returns the impulse to apply after the body's velocity has been
    /// cleared. Bodies that are not the puck are ignored and leave the state
    /// untouched.
    pub fn on_enter(
        &mut self,
        role: BodyRole,
        velocity: Vec3,
        edge_rotation: Quat,
        config: &MatchConfig,
    ) -> Option<Vec3> {
        if role != BodyRole::Puck {
            return None;
        }

        self.in_collision = true;
        let bounce = compute_bounce(
            velocity,
            edge_rotation,
            config.bounce_damping,
            config.repel_speed,
        )?;

        self.reflection_velocity = bounce.velocity;
        self.repel_velocity = bounce.repel;
        Some(bounce.velocity)
    }

    /// Handle a trigger-leave. Only clears the collision flag unless
    /// `reapply_on_leave` is set, in which case the cached reflection
    /// velocity is returned for re-application.
    pub fn on_leave(&mut self, config: &MatchConfig) -> Option<Vec3> {
        let was_in_collision = std::mem::replace(&mut self.in_collision, false);
        if config.reapply_on_leave && was_in_collision {
            Some(self.reflection_velocity)
        } else {
            None
        }
    }
}

/// Cooldown for the continuous repel correction.
#[derive(Debug, Clone, Copy, Default)]
pub struct RepelCooldown {
    pub seconds_left: f32,
}

impl RepelCooldown {
    /// Advance by `dt`; returns the repel impulse to apply after clearing
    /// velocity, if the correction fires this step.
    pub fn step(&mut self, dt: f32, state: &BounceState, config: &MatchConfig) -> Option<Vec3> {
        if self.seconds_left > 0.0 {
            self.seconds_left = (self.seconds_left - dt).max(0.0);
        }
        if !config.continuous_repel || !state.in_collision || self.seconds_left > 0.0 {
            return None;
        }
        self.seconds_left = config.repel_cooldown_secs;
        Some(state.repel_velocity)
    }
}
