//! Indicator lights used as the visual scoreboard.
//!
//! Slot 0 is the ambient light, slots 1-4 are the left player's pips,
//! slots 5-8 the right player's pips and slot 9 follows the puck.

use glam::Vec3;

use crate::score::Side;

pub const LIGHT_COUNT: usize = 10;
pub const PIPS_PER_SIDE: usize = 4;
pub const AMBIENT_SLOT: usize = 0;
pub const FOLLOW_SLOT: usize = 9;

pub const UNLIT: Vec3 = Vec3::ZERO;
pub const LIT: Vec3 = Vec3::new(1.0, 1.0, 0.0);
pub const AMBIENT_COLOR: Vec3 = Vec3::ONE;
pub const FOLLOW_COLOR: Vec3 = Vec3::new(0.043, 0.043, 0.0);

const PIP_POSITIONS: [Vec3; 8] = [
    Vec3::new(-14.84, 13.34, -6.56),
    Vec3::new(-14.72, -12.98, -6.62),
    Vec3::new(-4.46, 15.46, -6.59),
    Vec3::new(-4.45, -15.18, -6.6),
    Vec3::new(15.33, 13.32, -6.6),
    Vec3::new(15.04, -13.32, -6.57),
    Vec3::new(4.35, 15.38, -6.57),
    Vec3::new(4.54, -15.54, -6.57),
];

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct IndicatorLight {
    pub position: Vec3,
    /// Linear RGB.
    pub color: Vec3,
    pub range: f32,
}

impl IndicatorLight {
    pub fn is_lit(&self) -> bool {
        self.color != UNLIT
    }
}

/// First slot of a side's pips.
pub fn pip_base(side: Side) -> usize {
    match side {
        Side::Left => 1,
        Side::Right => 1 + PIPS_PER_SIDE,
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct IndicatorLights {
    slots: [IndicatorLight; LIGHT_COUNT],
}

impl Default for IndicatorLights {
    fn default() -> Self {
        let pip = |position| IndicatorLight {
            position,
            color: UNLIT,
            range: 2.0,
        };

        let mut slots = [pip(Vec3::ZERO); LIGHT_COUNT];
        slots[AMBIENT_SLOT] = IndicatorLight {
            position: Vec3::new(0.0, 0.0, 10.0),
            color: AMBIENT_COLOR,
            range: 300.0,
        };
        for (slot, position) in slots[1..=2 * PIPS_PER_SIDE].iter_mut().zip(PIP_POSITIONS) {
            *slot = pip(position);
        }
        slots[FOLLOW_SLOT] = IndicatorLight {
            position: Vec3::new(0.0, 0.0, 10.0),
            color: FOLLOW_COLOR,
            range: 13.0,
        };
        Self { slots }
    }
}

impl IndicatorLights {
    pub fn get(&self, index: usize) -> Option<&IndicatorLight> {
        self.slots.get(index)
    }

    pub fn iter(&self) -> impl Iterator<Item = &IndicatorLight> {
        self.slots.iter()
    }

    /// Light the `count`-th pip (1-based) of `side`. Out-of-range counts
    /// are ignored.
    pub fn light_pip(&mut self, side: Side, count: u32) {
        let count = count as usize;
        if count == 0 || count > PIPS_PER_SIDE {
            return;
        }
        self.slots[pip_base(side) + count - 1].color = LIT;
    }

    /// Turn every score pip off. Ambient and follow lights are untouched.
    pub fn clear_pips(&mut self) {
        for slot in &mut self.slots[1..=2 * PIPS_PER_SIDE] {
            slot.color = UNLIT;
        }
    }

    pub fn lit_count(&self, side: Side) -> usize {
        let base = pip_base(side);
        self.slots[base..base + PIPS_PER_SIDE]
            .iter()
            .filter(|l| l.is_lit())
            .count()
    }

    pub fn set_follow_position(&mut self, position: Vec3) {
        self.slots[FOLLOW_SLOT].position = position;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_layout_has_all_pips_unlit() {
        let lights = IndicatorLights::default();
        assert_eq!(lights.iter().count(), LIGHT_COUNT);
        assert_eq!(lights.lit_count(Side::Left), 0);
        assert_eq!(lights.lit_count(Side::Right), 0);
        assert!(lights.get(AMBIENT_SLOT).unwrap().is_lit());
        assert!(lights.get(FOLLOW_SLOT).unwrap().is_lit());
    }

    #[test]
    fn pips_map_to_their_side() {
        let mut lights = IndicatorLights::default();
        lights.light_pip(Side::Left, 1);
        lights.light_pip(Side::Right, 3);

        assert!(lights.get(1).unwrap().is_lit());
        assert!(lights.get(7).unwrap().is_lit());
        assert_eq!(lights.lit_count(Side::Left), 1);
        assert_eq!(lights.lit_count(Side::Right), 1);
    }

    #[test]
    fn out_of_range_pips_are_ignored() {
        let mut lights = IndicatorLights::default();
        lights.light_pip(Side::Left, 0);
        lights.light_pip(Side::Right, 5);
        assert_eq!(lights, IndicatorLights::default());
    }

    #[test]
    fn clear_keeps_ambient_and_follow() {
        let mut lights = IndicatorLights::default();
        for n in 1..=4 {
            lights.light_pip(Side::Left, n);
            lights.light_pip(Side::Right, n);
        }
        lights.set_follow_position(Vec3::new(1.0, 2.0, 3.0));
        lights.clear_pips();

        assert_eq!(lights.lit_count(Side::Left), 0);
        assert_eq!(lights.lit_count(Side::Right), 0);
        assert_eq!(lights.get(AMBIENT_SLOT).unwrap().color, AMBIENT_COLOR);
        assert_eq!(
            lights.get(FOLLOW_SLOT).unwrap().position,
            Vec3::new(1.0, 2.0, 3.0)
        );
    }
}
