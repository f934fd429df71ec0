use bevy::prelude::*;
use bevy::window::PrimaryWindow;

use air_hockey_shared::control::{DirectionKeys, PointerSample};

use super::UpdateSet;

pub struct InputPlugin;

#[derive(Resource, Default)]
pub(crate) struct InputState {
    /// Arrow keys, pushing the puck.
    pub(crate) puck: DirectionKeys,
    /// WASD, moving the blue paddle.
    pub(crate) paddle: DirectionKeys,
    /// Left mouse button and cursor, dragging the red paddle.
    pub(crate) pointer: PointerSample,
}

impl Plugin for InputPlugin {
    fn build(&self, app: &mut App) {
        app.add_systems(Update, input_system.in_set(UpdateSet::Input));
    }
}

fn input_system(
    mut input: ResMut<InputState>,
    keys: Res<ButtonInput<KeyCode>>,
    mouse: Res<ButtonInput<MouseButton>>,
    q_window: Query<&Window, With<PrimaryWindow>>,
) {
    input.puck = DirectionKeys {
        up: keys.pressed(KeyCode::ArrowUp),
        down: keys.pressed(KeyCode::ArrowDown),
        left: keys.pressed(KeyCode::ArrowLeft),
        right: keys.pressed(KeyCode::ArrowRight),
    };
    input.paddle = DirectionKeys {
        up: keys.pressed(KeyCode::KeyW),
        down: keys.pressed(KeyCode::KeyS),
        left: keys.pressed(KeyCode::KeyA),
        right: keys.pressed(KeyCode::KeyD),
    };

    input.pointer.pressed = mouse.pressed(MouseButton::Left);
    match q_window.single() {
        Ok(window) => {
            input.pointer.cursor = window.cursor_position();
            input.pointer.window = Vec2::new(window.width(), window.height());
        }
        Err(_) => input.pointer.cursor = None,
    }
}
