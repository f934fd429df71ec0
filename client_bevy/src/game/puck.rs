use bevy::prelude::*;
use bevy_prototype_lyon::prelude::*;
use bevy_rapier2d::prelude::*;

use air_hockey_shared::bounce::{BodyRole, BounceState, RepelCooldown};

use crate::board::geometry::PUCK_START;
use crate::constants::{color_from_hex, Colors, Layers, PUCK_MASS, PUCK_RADIUS, PUCK_RESTITUTION};

use super::table::EdgeTrigger;
use super::{FixedSet, MatchSettings, Role};

pub struct PuckPlugin;

#[derive(Component)]
pub(crate) struct Puck;

/// Bounces its body off table edges.
///
/// The body is resolved once, when the component is added, and only for
/// the puck; on anything else the behaviour stays inert.
#[derive(Component, Default)]
pub(crate) struct BounceBehaviour {
    pub(crate) body: Option<Entity>,
    pub(crate) state: BounceState,
    pub(crate) repel: RepelCooldown,
}

impl Plugin for PuckPlugin {
    fn build(&self, app: &mut App) {
        app.add_systems(Startup, spawn_puck).add_systems(
            FixedUpdate,
            (
                bind_bounce_body,
                edge_bounce_system,
                continuous_repel_system,
            )
                .chain()
                .in_set(FixedSet::PostPhysics),
        );
    }
}

fn spawn_puck(mut commands: Commands) {
    commands.spawn((
        // Physics
        (
            RigidBody::Dynamic,
            Collider::ball(PUCK_RADIUS),
            ColliderMassProperties::Mass(PUCK_MASS),
            Restitution::coefficient(PUCK_RESTITUTION),
            Friction::coefficient(0.0),
            Damping {
                linear_damping: 0.0,
                angular_damping: 0.0,
            },
            LockedAxes::ROTATION_LOCKED,
            ActiveEvents::COLLISION_EVENTS,
            Ccd::enabled(),
            Velocity::zero(),
            ExternalImpulse::default(),
            ExternalForce::default(),
            Transform::from_xyz(PUCK_START.x, PUCK_START.y, Layers::PUCK),
        ),
        // Visual
        ShapeBuilder::with(&shapes::Circle {
            radius: PUCK_RADIUS,
            center: Vec2::ZERO,
        })
        .fill(color_from_hex(Colors::PUCK))
        .stroke((color_from_hex(Colors::PUCK_RIM), 0.15))
        .build(),
        // Game state
        Role(BodyRole::Puck),
        Puck,
        BounceBehaviour::default(),
    ));
}

pub(crate) fn bind_bounce_body(
    mut q: Query<(Entity, &Role, &mut BounceBehaviour, Has<RigidBody>), Added<BounceBehaviour>>,
) {
    for (entity, role, mut bounce, has_body) in &mut q {
        if role.0 == BodyRole::Puck && has_body {
            bounce.body = Some(entity);
        }
    }
}

/// Which of the two colliders is the edge trigger and which carries the
/// bounce behaviour.
fn split_pair(
    a: Entity,
    b: Entity,
    q_triggers: &Query<&GlobalTransform, With<EdgeTrigger>>,
) -> Option<(Entity, Entity)> {
    if q_triggers.contains(a) {
        Some((b, a))
    } else if q_triggers.contains(b) {
        Some((a, b))
    } else {
        None
    }
}

pub(crate) fn edge_bounce_system(
    mut collision_events: MessageReader<CollisionEvent>,
    settings: Res<MatchSettings>,
    q_triggers: Query<&GlobalTransform, With<EdgeTrigger>>,
    mut q_bouncers: Query<(&Role, &mut BounceBehaviour)>,
    mut q_bodies: Query<(&mut Velocity, &mut ExternalImpulse)>,
) {
    for event in collision_events.read() {
        let (a, b, entered) = match event {
            CollisionEvent::Started(a, b, _) => (*a, *b, true),
            CollisionEvent::Stopped(a, b, _) => (*a, *b, false),
        };
        let Some((bouncer, trigger)) = split_pair(a, b, &q_triggers) else {
            continue;
        };
        let Ok((role, mut bounce)) = q_bouncers.get_mut(bouncer) else {
            continue;
        };
        let Some(body) = bounce.body else {
            continue;
        };
        let Ok((mut velocity, mut impulse)) = q_bodies.get_mut(body) else {
            continue;
        };

        let applied = if entered {
            let Ok(edge) = q_triggers.get(trigger) else {
                continue;
            };
            let rotation = edge.compute_transform().rotation;
            debug!("puck entered edge trigger {trigger}");
            bounce
                .state
                .on_enter(role.0, velocity.linvel.extend(0.0), rotation, &settings.0)
        } else {
            debug!("puck left edge trigger {trigger}");
            bounce.state.on_leave(&settings.0)
        };

        if let Some(v) = applied {
            velocity.linvel = Vec2::ZERO;
            impulse.impulse += v.truncate();
        }
    }
}

/// Pushes the puck back out while it lingers in an edge trigger. Inert
/// unless `continuous_repel` is configured.
pub(crate) fn continuous_repel_system(
    settings: Res<MatchSettings>,
    time: Res<Time>,
    mut q_bouncers: Query<&mut BounceBehaviour>,
    mut q_bodies: Query<(&mut Velocity, &mut ExternalImpulse)>,
) {
    let dt = time.delta_secs();
    for mut bounce in &mut q_bouncers {
        let Some(body) = bounce.body else {
            continue;
        };
        let BounceBehaviour { state, repel, .. } = &mut *bounce;
        let Some(v) = repel.step(dt, state, &settings.0) else {
            continue;
        };
        if let Ok((mut velocity, mut impulse)) = q_bodies.get_mut(body) {
            velocity.linvel = Vec2::ZERO;
            impulse.impulse += v.truncate();
        }
    }
}
