use bevy::prelude::{Quat, Vec2, Vec3};

/// A straight boundary edge of the table.
#[derive(Clone, Copy, Debug)]
pub struct EdgeDef {
    pub center: Vec2,
    /// Rotation about Z in degrees; the edge runs along its local X axis.
    pub angle_deg: f32,
    pub half_length: f32,
}

impl EdgeDef {
    const fn new(x: f32, y: f32, angle_deg: f32, half_length: f32) -> Self {
        Self {
            center: Vec2::new(x, y),
            angle_deg,
            half_length,
        }
    }

    pub fn rotation(&self) -> Quat {
        Quat::from_rotation_z(self.angle_deg.to_radians())
    }

    pub fn endpoints(&self) -> (Vec2, Vec2) {
        let along = (self.rotation() * Vec3::X).truncate() * self.half_length;
        (self.center - along, self.center + along)
    }
}

pub const PUCK_START: Vec2 = Vec2::ZERO;
pub const RED_PADDLE_START: Vec2 = Vec2::new(-5.0, 0.0);
pub const BLUE_PADDLE_START: Vec2 = Vec2::new(5.0, 0.0);

const SIDE_X: f32 = 17.23;
const SIDE_Y: f32 = 5.54;
const SIDE_HALF: f32 = 2.98;

/// The twelve edges, mirror-symmetric about both axes.
pub fn edges() -> [EdgeDef; 12] {
    [
        // goal-side walls
        EdgeDef::new(-SIDE_X, SIDE_Y, -93.5, SIDE_HALF),
        EdgeDef::new(-SIDE_X, -SIDE_Y, -86.5, SIDE_HALF),
        // corners
        EdgeDef::new(-12.79, 11.28, -147.1, 5.08),
        EdgeDef::new(-12.79, -11.28, -32.9, 5.08),
        // long sides
        EdgeDef::new(-4.21, 12.8, 163.7, 4.43),
        EdgeDef::new(-4.21, -12.8, 16.3, 4.43),
        EdgeDef::new(4.21, 12.8, -163.7, 4.43),
        EdgeDef::new(4.21, -12.8, -16.3, 4.43),
        EdgeDef::new(12.79, 11.28, 147.1, 5.08),
        EdgeDef::new(12.79, -11.28, 32.9, 5.08),
        EdgeDef::new(SIDE_X, SIDE_Y, 93.5, SIDE_HALF),
        EdgeDef::new(SIDE_X, -SIDE_Y, 86.5, SIDE_HALF),
    ]
}

/// Half the height of the open gap in each goal-side wall.
pub fn goal_mouth_half_height() -> f32 {
    edges()
        .iter()
        .filter(|e| e.center.x.abs() > 15.0)
        .flat_map(|e| {
            let (a, b) = e.endpoints();
            [a.y.abs(), b.y.abs()]
        })
        .fold(f32::INFINITY, f32::min)
}
