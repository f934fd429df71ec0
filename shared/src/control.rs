use glam::{Vec2, Vec3};

use crate::config::DragMode;

/// Four directional keys, polled once per frame.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct DirectionKeys {
    pub up: bool,
    pub down: bool,
    pub left: bool,
    pub right: bool,
}

impl DirectionKeys {
    pub fn any(self) -> bool {
        self.up || self.down || self.left || self.right
    }

    /// Sum of the unit axes of every held key.
    fn axes(self) -> Vec3 {
        let mut out = Vec3::ZERO;
        if self.up {
            out += Vec3::Y;
        }
        if self.down {
            out -= Vec3::Y;
        }
        if self.right {
            out += Vec3::X;
        }
        if self.left {
            out -= Vec3::X;
        }
        out
    }
}

/// Force on the puck: each held key contributes `magnitude` along its axis.
pub fn puck_force(keys: DirectionKeys, magnitude: f32) -> Vec3 {
    keys.axes() * magnitude
}

/// Position delta for the key-driven paddle this frame.
pub fn paddle_step(keys: DirectionKeys, step: f32) -> Vec3 {
    keys.axes() * step
}

/// Pointer state for one frame.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct PointerSample {
    pub pressed: bool,
    /// Cursor in window pixels, origin top-left, Y down. `None` when the
    /// cursor is outside the window.
    pub cursor: Option<Vec2>,
    /// Window size in the same pixels as `cursor`.
    pub window: Vec2,
}

/// Cursor motion between two window positions in world-plane units:
/// normalised by half the window size with screen Y flipped.
pub fn cursor_delta(from: Vec2, to: Vec2, window: Vec2) -> Option<Vec3> {
    let half = window * 0.5;
    if half.x <= 0.0 || half.y <= 0.0 {
        return None;
    }
    let d = (to - from) / half;
    Some(Vec3::new(d.x, -d.y, 0.0))
}

/// Tracks a mouse drag of the red paddle across frames.
#[derive(Debug, Clone, Copy, Default)]
pub struct DragTracker {
    baseline: Option<Vec2>,
    anchor: Option<Vec3>,
    has_clicked: bool,
}

impl DragTracker {
    /// Feed one frame of pointer input. Returns the paddle's new absolute
    /// position when it should move.
    pub fn update(
        &mut self,
        sample: PointerSample,
        paddle: Vec3,
        mode: DragMode,
        scale: f32,
    ) -> Option<Vec3> {
        match mode {
            DragMode::Incremental => self.update_incremental(sample, paddle, scale),
            DragMode::Anchored => self.update_anchored(sample, paddle, scale),
        }
    }

    fn update_incremental(
        &mut self,
        sample: PointerSample,
        paddle: Vec3,
        scale: f32,
    ) -> Option<Vec3> {
        let mut moved = None;
        if sample.pressed {
            if self.has_clicked {
                if let (Some(from), Some(to)) = (self.baseline, sample.cursor) {
                    moved = cursor_delta(from, to, sample.window).map(|d| paddle + d * scale);
                }
            } else {
                self.has_clicked = true;
            }
        }
        // Re-latched every frame, pressed or not.
        if sample.cursor.is_some() {
            self.baseline = sample.cursor;
        }
        moved
    }

    fn update_anchored(&mut self, sample: PointerSample, paddle: Vec3, scale: f32) -> Option<Vec3> {
        if !sample.pressed {
            self.baseline = None;
            self.anchor = None;
            return None;
        }

        let cursor = sample.cursor?;
        match (self.baseline, self.anchor) {
            (Some(from), Some(origin)) => {
                cursor_delta(from, cursor, sample.window).map(|d| origin + d * scale)
            }
            _ => {
                self.baseline = Some(cursor);
                self.anchor = Some(paddle);
                None
            }
        }
    }
}
