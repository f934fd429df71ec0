/// Visible area in world units; the camera is fitted so this always shows.
pub const VIEW_WIDTH: f32 = 40.0;
pub const VIEW_HEIGHT: f32 = 34.0;

pub const TABLE_HALF_WIDTH: f32 = 17.4;
pub const TABLE_HALF_HEIGHT: f32 = 14.4;

pub const PUCK_RADIUS: f32 = 1.0;
pub const PUCK_MASS: f32 = 1.0;
pub const PUCK_RESTITUTION: f32 = 0.5;
pub const PADDLE_RADIUS: f32 = 1.4;

/// Edge collider half thickness. The trigger around it is thicker so it
/// reports the puck before the solid contact resolves.
pub const EDGE_HALF_THICKNESS: f32 = 0.2;
pub const EDGE_TRIGGER_HALF_THICKNESS: f32 = 0.6;

pub const PIP_RADIUS: f32 = 0.6;
pub const FOLLOW_GLOW_RADIUS: f32 = 2.0;

pub const PHYSICS_DT: f32 = 1.0 / 120.0;
pub const PHYSICS_SUBSTEPS: usize = 1;

/// Draw order.
pub struct Layers;

impl Layers {
    pub const TABLE: f32 = 0.0;
    pub const PIPS: f32 = 1.0;
    pub const EDGES: f32 = 2.0;
    pub const PADDLES: f32 = 3.0;
    pub const PUCK: f32 = 4.0;
    pub const FOLLOW_GLOW: f32 = 5.0;
}

#[derive(Clone, Copy)]
pub struct Colors;

impl Colors {
    pub const BACKGROUND: u32 = 0x050510;
    pub const TABLE: u32 = 0x0b1d2a;
    pub const TABLE_MARKINGS: u32 = 0x1f4d66;
    pub const EDGE: u32 = 0xe8e8e8;
    pub const PUCK: u32 = 0x202020;
    pub const PUCK_RIM: u32 = 0xf2f2f2;
    pub const PADDLE_RED: u32 = 0xd43a3a;
    pub const PADDLE_BLUE: u32 = 0x3a6fd4;
    pub const PIP_RIM: u32 = 0x555555;
}

pub fn color_from_hex(rgb: u32) -> bevy::prelude::Color {
    let r = ((rgb >> 16) & 0xff) as f32 / 255.0;
    let g = ((rgb >> 8) & 0xff) as f32 / 255.0;
    let b = (rgb & 0xff) as f32 / 255.0;
    bevy::prelude::Color::srgb(r, g, b)
}

/// Indicator light colour (linear RGB triple) as a Bevy colour.
pub fn color_from_light(rgb: bevy::prelude::Vec3) -> bevy::prelude::Color {
    bevy::prelude::Color::srgb(rgb.x, rgb.y, rgb.z)
}
