mod board;
mod config;
mod constants;
mod game;

use bevy::prelude::*;
use bevy::window::{PresentMode, WindowResolution};
use bevy_prototype_lyon::prelude::ShapePlugin;
use bevy_rapier2d::prelude::*;

use game::{
    CorePlugin, HudPlugin, InputPlugin, LightsPlugin, PaddlesPlugin, PuckPlugin, RoundPlugin,
    TablePlugin,
};

fn main() {
    let config = match config::match_config_from_env() {
        Ok(config) => config,
        Err(err) => {
            eprintln!("{err}");
            std::process::exit(1);
        }
    };

    App::new()
        .add_plugins(DefaultPlugins.set(WindowPlugin {
            primary_window: Some(Window {
                title: "Air Hockey".to_string(),
                resolution: WindowResolution::new(1000, 850),
                present_mode: PresentMode::AutoVsync,
                resizable: true,
                ..default()
            }),
            ..default()
        }))
        .add_plugins(RapierPhysicsPlugin::<NoUserData>::default().in_fixed_schedule())
        .add_plugins(ShapePlugin)
        .add_plugins(CorePlugin { config })
        .add_plugins(TablePlugin)
        .add_plugins(PuckPlugin)
        .add_plugins(PaddlesPlugin)
        .add_plugins(InputPlugin)
        .add_plugins(RoundPlugin)
        .add_plugins(LightsPlugin)
        .add_plugins(HudPlugin)
        .run();
}
