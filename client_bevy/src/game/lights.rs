use bevy::prelude::*;
use bevy_prototype_lyon::prelude::*;

use air_hockey_shared::lights::{IndicatorLight, FOLLOW_SLOT, LIGHT_COUNT};

use crate::constants::{
    color_from_hex, color_from_light, Colors, Layers, FOLLOW_GLOW_RADIUS, PIP_RADIUS,
};

use super::{MatchRuntime, UpdateSet};

pub struct LightsPlugin;

/// Drawn stand-in for one indicator light slot. The ambient slot has none.
#[derive(Component)]
pub(crate) struct IndicatorLamp {
    pub(crate) slot: usize,
}

impl Plugin for LightsPlugin {
    fn build(&self, app: &mut App) {
        app.add_systems(Startup, spawn_lamps)
            .add_systems(Update, sync_lamps.in_set(UpdateSet::Visuals));
    }
}

fn lamp_alpha(slot: usize) -> f32 {
    if slot == FOLLOW_SLOT {
        0.35
    } else {
        1.0
    }
}

fn lamp_color(slot: usize, light: &IndicatorLight) -> Color {
    if slot != FOLLOW_SLOT && !light.is_lit() {
        return color_from_hex(Colors::TABLE);
    }
    // The follow light's colour is too dim to read; keep its hue only.
    let rgb = if slot == FOLLOW_SLOT {
        light.color.normalize_or_zero()
    } else {
        light.color
    };
    color_from_light(rgb).with_alpha(lamp_alpha(slot))
}

fn spawn_lamps(mut commands: Commands, runtime: Res<MatchRuntime>) {
    for slot in 1..LIGHT_COUNT {
        let Some(light) = runtime.state.lights.get(slot) else {
            continue;
        };
        let (radius, z) = if slot == FOLLOW_SLOT {
            (FOLLOW_GLOW_RADIUS, Layers::FOLLOW_GLOW)
        } else {
            (PIP_RADIUS, Layers::PIPS)
        };

        let mut builder = ShapeBuilder::with(&shapes::Circle {
            radius,
            center: Vec2::ZERO,
        })
        .fill(lamp_color(slot, light));
        if slot != FOLLOW_SLOT {
            builder = builder.stroke((color_from_hex(Colors::PIP_RIM), 0.1));
        }

        commands.spawn((
            builder.build(),
            Transform::from_xyz(light.position.x, light.position.y, z),
            IndicatorLamp { slot },
        ));
    }
}

fn sync_lamps(
    runtime: Res<MatchRuntime>,
    mut q_lamps: Query<(&IndicatorLamp, &mut Shape, &mut Transform)>,
) {
    if !runtime.is_changed() {
        return;
    }

    for (lamp, mut shape, mut transform) in &mut q_lamps {
        let Some(light) = runtime.state.lights.get(lamp.slot) else {
            continue;
        };
        if let Some(fill) = shape.fill.as_mut() {
            fill.color = lamp_color(lamp.slot, light);
        }
        transform.translation.x = light.position.x;
        transform.translation.y = light.position.y;
    }
}
