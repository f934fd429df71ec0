use bevy::prelude::*;
use bevy::window::PrimaryWindow;
use bevy_rapier2d::prelude::{PhysicsSet, RapierConfiguration, TimestepMode};

use air_hockey_shared::bounce::BodyRole;
use air_hockey_shared::config::MatchConfig;
use air_hockey_shared::score::{MatchState, Side};

use crate::constants::{
    color_from_hex, Colors, PHYSICS_DT, PHYSICS_SUBSTEPS, VIEW_HEIGHT, VIEW_WIDTH,
};

use super::input::InputState;

/// Per-frame match loop, in this order. Physics and collision callbacks have
/// already run in `FixedUpdate` by the time these sets execute.
#[derive(SystemSet, Debug, Hash, Eq, PartialEq, Clone)]
pub(crate) enum UpdateSet {
    /// Pause countdown, pending reset, win check.
    Round,
    Input,
    /// Puck force and paddle movement.
    Control,
    /// Goal detection and the follow light.
    Goals,
    Visuals,
}

#[derive(SystemSet, Debug, Hash, Eq, PartialEq, Clone)]
pub(crate) enum FixedSet {
    PostPhysics,
}

pub struct CorePlugin {
    pub config: MatchConfig,
}

/// Match configuration, fixed for the lifetime of the app.
#[derive(Resource)]
pub(crate) struct MatchSettings(pub(crate) MatchConfig);

#[derive(Resource)]
pub(crate) struct MatchRuntime {
    pub(crate) state: MatchState,
    pub(crate) last_winner: Option<Side>,
}

impl MatchRuntime {
    pub(crate) fn new(config: &MatchConfig) -> Self {
        Self {
            state: MatchState::new(config),
            last_winner: None,
        }
    }
}

/// Gameplay role of a body; replaces lookups by object name.
#[derive(Component, Clone, Copy, Debug, PartialEq, Eq)]
pub(crate) struct Role(pub(crate) BodyRole);

#[derive(Component)]
struct MainCamera;

impl Plugin for CorePlugin {
    fn build(&self, app: &mut App) {
        app.insert_resource(MatchSettings(self.config.clone()))
            .insert_resource(MatchRuntime::new(&self.config))
            .init_resource::<InputState>()
            .insert_resource(ClearColor(color_from_hex(Colors::BACKGROUND)))
            .insert_resource(Time::<Fixed>::from_seconds(PHYSICS_DT as f64))
            .insert_resource(TimestepMode::Fixed {
                dt: PHYSICS_DT,
                substeps: PHYSICS_SUBSTEPS,
            })
            .configure_sets(
                Update,
                (
                    UpdateSet::Round,
                    UpdateSet::Input,
                    UpdateSet::Control,
                    UpdateSet::Goals,
                    UpdateSet::Visuals,
                )
                    .chain(),
            )
            .configure_sets(
                FixedUpdate,
                FixedSet::PostPhysics.after(PhysicsSet::Writeback),
            )
            .add_systems(
                Startup,
                (setup_camera, configure_rapier_gravity, log_match_config).chain(),
            )
            .add_systems(Update, fit_camera_to_table);
    }
}

fn setup_camera(mut commands: Commands) {
    commands.spawn((Camera2d, Msaa::Sample4, MainCamera));
}

fn configure_rapier_gravity(mut q_config: Query<&mut RapierConfiguration>) {
    // Top-down table: nothing pulls the puck.
    for mut cfg in &mut q_config {
        cfg.gravity = Vec2::ZERO;
    }
}

fn log_match_config(settings: Res<MatchSettings>) {
    let cfg = &settings.0;
    info!(
        "first to {} goals, drag mode {:?}, continuous repel {}",
        cfg.winning_score, cfg.drag_mode, cfg.continuous_repel
    );
}

fn fit_camera_to_table(
    q_window: Query<&Window, With<PrimaryWindow>>,
    mut q_projection: Query<&mut Projection, With<MainCamera>>,
) {
    let Ok(window) = q_window.single() else {
        return;
    };

    if window.width() <= 0.0 || window.height() <= 0.0 {
        return;
    }

    let scale_x = VIEW_WIDTH / window.width();
    let scale_y = VIEW_HEIGHT / window.height();
    let target_scale = scale_x.max(scale_y).max(0.0001);

    for mut projection in &mut q_projection {
        if let Projection::Orthographic(ortho) = &mut *projection {
            ortho.scale = target_scale;
        }
    }
}
