use bevy::prelude::*;
use bevy_prototype_lyon::prelude::*;
use bevy_rapier2d::prelude::*;

use air_hockey_shared::bounce::BodyRole;

use crate::board::geometry::{edges, goal_mouth_half_height, EdgeDef};
use crate::constants::{
    color_from_hex, Colors, Layers, EDGE_HALF_THICKNESS, EDGE_TRIGGER_HALF_THICKNESS,
    TABLE_HALF_HEIGHT, TABLE_HALF_WIDTH,
};

use super::Role;

pub struct TablePlugin;

/// Trigger volume around an edge; reports the puck entering and leaving.
#[derive(Component)]
pub(crate) struct EdgeTrigger;

impl Plugin for TablePlugin {
    fn build(&self, app: &mut App) {
        app.add_systems(Startup, (spawn_table, spawn_edges));
    }
}

fn spawn_table(mut commands: Commands) {
    let surface = shapes::Rectangle {
        extents: Vec2::new(TABLE_HALF_WIDTH * 2.0, TABLE_HALF_HEIGHT * 2.0),
        origin: shapes::RectangleOrigin::Center,
        radii: None,
    };
    commands.spawn((
        ShapeBuilder::with(&surface)
            .fill(color_from_hex(Colors::TABLE))
            .build(),
        Transform::from_xyz(0.0, 0.0, Layers::TABLE),
        Role(BodyRole::Table),
    ));

    let markings = color_from_hex(Colors::TABLE_MARKINGS);
    let centre_line = shapes::Line(
        Vec2::new(0.0, -TABLE_HALF_HEIGHT),
        Vec2::new(0.0, TABLE_HALF_HEIGHT),
    );
    commands.spawn((
        ShapeBuilder::with(&centre_line)
            .stroke((markings, 0.15))
            .build(),
        Transform::from_xyz(0.0, 0.0, Layers::TABLE + 0.1),
    ));
    commands.spawn((
        ShapeBuilder::with(&shapes::Circle {
            radius: 3.0,
            center: Vec2::ZERO,
        })
        .stroke((markings, 0.15))
        .build(),
        Transform::from_xyz(0.0, 0.0, Layers::TABLE + 0.1),
    ));
}

fn spawn_edges(mut commands: Commands) {
    let color = color_from_hex(Colors::EDGE);
    for def in edges() {
        spawn_edge(&mut commands, def, color);
    }
    debug!("goal mouths open {:.2} either side of centre", goal_mouth_half_height());
}

fn spawn_edge(commands: &mut Commands, def: EdgeDef, color: Color) {
    let line = shapes::Line(
        Vec2::new(-def.half_length, 0.0),
        Vec2::new(def.half_length, 0.0),
    );

    let edge = commands
        .spawn((
            RigidBody::Fixed,
            Collider::cuboid(def.half_length, EDGE_HALF_THICKNESS),
            Restitution::coefficient(0.3),
            Transform::from_xyz(def.center.x, def.center.y, Layers::EDGES)
                .with_rotation(def.rotation()),
            ShapeBuilder::with(&line)
                .stroke((color, EDGE_HALF_THICKNESS * 2.0))
                .build(),
            Role(BodyRole::Edge),
        ))
        .id();

    let trigger = commands
        .spawn((
            Collider::cuboid(def.half_length, EDGE_TRIGGER_HALF_THICKNESS),
            Sensor,
            ActiveEvents::COLLISION_EVENTS,
            Transform::default(),
            GlobalTransform::default(),
            EdgeTrigger,
            Role(BodyRole::Edge),
        ))
        .id();

    commands.entity(edge).add_child(trigger);
}
