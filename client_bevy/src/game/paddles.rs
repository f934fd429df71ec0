use bevy::prelude::*;
use bevy_prototype_lyon::prelude::*;
use bevy_rapier2d::prelude::*;

use air_hockey_shared::bounce::BodyRole;
use air_hockey_shared::control::{paddle_step, puck_force, DragTracker, PointerSample};

use crate::board::geometry::{BLUE_PADDLE_START, RED_PADDLE_START};
use crate::constants::{color_from_hex, Colors, Layers, PADDLE_RADIUS};

use super::input::InputState;
use super::puck::Puck;
use super::{MatchRuntime, MatchSettings, Role, UpdateSet};

pub struct PaddlesPlugin;

/// How a paddle is steered.
#[derive(Component)]
pub(crate) enum PaddleControl {
    /// Dragged with the left mouse button.
    Pointer(DragTracker),
    /// Stepped with WASD.
    Keys,
}

impl Plugin for PaddlesPlugin {
    fn build(&self, app: &mut App) {
        app.add_systems(Startup, spawn_paddles).add_systems(
            Update,
            (puck_force_system, paddle_control_system).in_set(UpdateSet::Control),
        );
    }
}

fn spawn_paddles(mut commands: Commands) {
    spawn_paddle(
        &mut commands,
        RED_PADDLE_START,
        Colors::PADDLE_RED,
        PaddleControl::Pointer(DragTracker::default()),
    );
    spawn_paddle(
        &mut commands,
        BLUE_PADDLE_START,
        Colors::PADDLE_BLUE,
        PaddleControl::Keys,
    );
}

fn spawn_paddle(commands: &mut Commands, at: Vec2, color: u32, control: PaddleControl) {
    commands.spawn((
        RigidBody::KinematicPositionBased,
        Collider::ball(PADDLE_RADIUS),
        Restitution::coefficient(0.8),
        Transform::from_xyz(at.x, at.y, Layers::PADDLES),
        ShapeBuilder::with(&shapes::Circle {
            radius: PADDLE_RADIUS,
            center: Vec2::ZERO,
        })
        .fill(color_from_hex(color).with_alpha(0.35))
        .stroke((color_from_hex(color), 0.2))
        .build(),
        Role(BodyRole::Paddle),
        control,
    ));
}

fn puck_force_system(
    input: Res<InputState>,
    settings: Res<MatchSettings>,
    runtime: Res<MatchRuntime>,
    mut q_puck: Query<&mut ExternalForce, With<Puck>>,
) {
    let force = if runtime.state.is_paused() {
        Vec2::ZERO
    } else {
        puck_force(input.puck, settings.0.puck_force).truncate()
    };
    for mut external in &mut q_puck {
        external.force = force;
    }
}

fn paddle_control_system(
    input: Res<InputState>,
    settings: Res<MatchSettings>,
    runtime: Res<MatchRuntime>,
    mut q_paddles: Query<(&mut Transform, &mut PaddleControl)>,
) {
    let paused = runtime.state.is_paused();
    let cfg = &settings.0;

    for (mut transform, mut control) in &mut q_paddles {
        match &mut *control {
            PaddleControl::Pointer(tracker) => {
                // Keep following the cursor while paused so resuming does
                // not jump the paddle.
                let sample = if paused {
                    PointerSample {
                        pressed: false,
                        ..input.pointer
                    }
                } else {
                    input.pointer
                };
                if let Some(next) =
                    tracker.update(sample, transform.translation, cfg.drag_mode, cfg.drag_scale)
                {
                    transform.translation = next;
                }
            }
            PaddleControl::Keys => {
                if !paused && input.paddle.any() {
                    transform.translation += paddle_step(input.paddle, cfg.paddle_key_step);
                }
            }
        }
    }
}
