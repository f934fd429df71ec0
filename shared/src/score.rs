//! Match state: goals, the score counters, win detection and the round reset.
//!
//! The caller drives one frame in this order: [`MatchState::tick`],
//! [`MatchState::take_pending_reset`], [`MatchState::check_win`], input,
//! [`MatchState::score_puck`], [`MatchState::track_puck`]. The reset consumer
//! runs before the win check, so a win raised in one frame is consumed at the
//! start of the next.

use glam::Vec3;

use crate::config::MatchConfig;
use crate::lights::IndicatorLights;

/// Where the puck is placed when a new round starts.
pub const CENTER_SPOT: Vec3 = Vec3::ZERO;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Side {
    Left,
    Right,
}

impl Side {
    pub fn opponent(self) -> Side {
        match self {
            Side::Left => Side::Right,
            Side::Right => Side::Left,
        }
    }

    pub fn player_name(self) -> &'static str {
        match self {
            Side::Left => "Red",
            Side::Right => "Blue",
        }
    }

    /// Sign of X on this side of the table.
    pub fn sign(self) -> f32 {
        match self {
            Side::Left => -1.0,
            Side::Right => 1.0,
        }
    }
}

/// Which side scores for a puck at `x`, if any. The goal lines themselves
/// count as a goal.
pub fn goal_scorer(x: f32, goal_line_x: f32) -> Option<Side> {
    if x <= -goal_line_x {
        Some(Side::Right)
    } else if x >= goal_line_x {
        Some(Side::Left)
    } else {
        None
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub enum RoundPhase {
    Playing,
    Paused { seconds_left: f32 },
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Goal {
    pub scorer: Side,
    /// Where the puck is served, on the scorer's half.
    pub serve_position: Vec3,
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RoundReset {
    pub puck_position: Vec3,
}

#[derive(Debug, Clone)]
pub struct MatchState {
    pub left_score: u32,
    pub right_score: u32,
    pub lights: IndicatorLights,
    pending_reset: bool,
    phase: RoundPhase,
    winning_score: u32,
    goal_line_x: f32,
    serve_offset_x: f32,
    round_pause_secs: f32,
    follow_light_height: f32,
}

impl MatchState {
    pub fn new(config: &MatchConfig) -> Self {
        Self {
            left_score: 0,
            right_score: 0,
            lights: IndicatorLights::default(),
            pending_reset: false,
            phase: RoundPhase::Playing,
            winning_score: config.winning_score,
            goal_line_x: config.goal_line_x,
            serve_offset_x: config.serve_offset_x,
            round_pause_secs: config.round_pause_secs,
            follow_light_height: config.follow_light_height,
        }
    }

    pub fn score(&self, side: Side) -> u32 {
        match side {
            Side::Left => self.left_score,
            Side::Right => self.right_score,
        }
    }

    pub fn pending_reset(&self) -> bool {
        self.pending_reset
    }

    pub fn phase(&self) -> RoundPhase {
        self.phase
    }

    pub fn is_paused(&self) -> bool {
        matches!(self.phase, RoundPhase::Paused { .. })
    }

    /// Count a goal for `side` and light its next pip.
    pub fn register_goal(&mut self, side: Side) {
        let counter = match side {
            Side::Left => &mut self.left_score,
            Side::Right => &mut self.right_score,
        };
        *counter += 1;
        let count = *counter;
        self.lights.light_pip(side, count);
        tracing::info!(
            "{} scores ({} : {})",
            side.player_name(),
            self.left_score,
            self.right_score
        );
    }

    /// Win-reset routine: once a counter reaches the winning score, announce
    /// the winner, zero both counters and raise the pending reset.
    pub fn check_win(&mut self) -> Option<Side> {
        let winner = if self.left_score >= self.winning_score {
            Side::Left
        } else if self.right_score >= self.winning_score {
            Side::Right
        } else {
            return None;
        };

        tracing::info!("{} Player Wins!", winner.player_name());
        self.left_score = 0;
        self.right_score = 0;
        self.pending_reset = true;
        Some(winner)
    }

    /// Consume the pending reset: clear the pips and pause the round.
    /// Without a pending reset this does nothing.
    pub fn take_pending_reset(&mut self) -> Option<RoundReset> {
        if !std::mem::take(&mut self.pending_reset) {
            return None;
        }

        tracing::info!("resetting round");
        self.lights.clear_pips();
        self.phase = RoundPhase::Paused {
            seconds_left: self.round_pause_secs,
        };
        Some(RoundReset {
            puck_position: CENTER_SPOT,
        })
    }

    /// Advance the round pause. Returns true while still paused.
    pub fn tick(&mut self, dt: f32) -> bool {
        if let RoundPhase::Paused { seconds_left } = self.phase {
            let left = seconds_left - dt;
            if left > 0.0 {
                self.phase = RoundPhase::Paused { seconds_left: left };
            } else {
                self.phase = RoundPhase::Playing;
            }
        }
        self.is_paused()
    }

    /// Goal check for the puck at `position`.
    pub fn score_puck(&mut self, position: Vec3) -> Option<Goal> {
        let scorer = goal_scorer(position.x, self.goal_line_x)?;
        self.register_goal(scorer);
        Some(Goal {
            scorer,
            serve_position: Vec3::new(scorer.sign() * self.serve_offset_x, 0.0, position.z),
        })
    }

    /// Pin the follow light above the puck.
    pub fn track_puck(&mut self, position: Vec3) {
        self.lights
            .set_follow_position(position + Vec3::Z * self.follow_light_height);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::lights::{AMBIENT_SLOT, FOLLOW_SLOT};

    fn new_state() -> MatchState {
        MatchState::new(&MatchConfig::default())
    }

    #[test]
    fn goal_lines_are_inclusive() {
        assert_eq!(goal_scorer(-17.6, 17.6), Some(Side::Right));
        assert_eq!(goal_scorer(17.6, 17.6), Some(Side::Left));
        assert_eq!(goal_scorer(-17.59, 17.6), None);
        assert_eq!(goal_scorer(17.59, 17.6), None);
        assert_eq!(goal_scorer(0.0, 17.6), None);
    }

    #[test]
    fn puck_past_right_line_scores_left_and_serves_left() {
        let mut state = new_state();
        let goal = state.score_puck(Vec3::new(18.0, 1.0, 2.0)).expect("goal");
        assert_eq!(goal.scorer, Side::Left);
        assert_eq!(goal.serve_position, Vec3::new(-9.5, 0.0, 2.0));
        assert_eq!(state.left_score, 1);
        assert_eq!(state.right_score, 0);
    }

    #[test]
    fn puck_past_left_line_scores_right_and_serves_right() {
        let mut state = new_state();
        let goal = state.score_puck(Vec3::new(-17.6, 0.0, 0.0)).expect("goal");
        assert_eq!(goal.scorer, Side::Right);
        assert_eq!(goal.serve_position.x, 9.5);
        assert_eq!(state.right_score, 1);
    }

    #[test]
    fn puck_in_play_is_not_a_goal() {
        let mut state = new_state();
        assert!(state.score_puck(Vec3::new(17.59, 0.0, 0.0)).is_none());
        assert_eq!(state.left_score + state.right_score, 0);
    }

    #[test]
    fn pips_mirror_the_score() {
        let mut state = new_state();
        for _ in 0..3 {
            state.register_goal(Side::Left);
        }
        for _ in 0..2 {
            state.register_goal(Side::Right);
        }

        assert_eq!(state.lights.lit_count(Side::Left), 3);
        assert_eq!(state.lights.lit_count(Side::Right), 2);
        for i in 1..=3 {
            assert!(state.lights.get(i).unwrap().is_lit());
        }
        assert!(!state.lights.get(4).unwrap().is_lit());
        assert!(state.lights.get(5).unwrap().is_lit());
        assert!(state.lights.get(6).unwrap().is_lit());
        assert!(!state.lights.get(7).unwrap().is_lit());
        assert!(!state.lights.get(8).unwrap().is_lit());

        let fresh = IndicatorLights::default();
        assert_eq!(state.lights.get(AMBIENT_SLOT), fresh.get(AMBIENT_SLOT));
        assert_eq!(state.lights.get(FOLLOW_SLOT), fresh.get(FOLLOW_SLOT));
    }

    #[test]
    fn no_win_below_winning_score() {
        let mut state = new_state();
        for _ in 0..3 {
            state.register_goal(Side::Left);
            state.register_goal(Side::Right);
            assert!(state.check_win().is_none());
        }
        assert!(!state.pending_reset());
        assert_eq!((state.left_score, state.right_score), (3, 3));
    }

    #[test]
    fn fourth_goal_wins_and_zeroes_both_counters() {
        let mut state = new_state();
        state.register_goal(Side::Left);
        for _ in 0..4 {
            state.register_goal(Side::Right);
        }

        assert_eq!(state.check_win(), Some(Side::Right));
        assert_eq!((state.left_score, state.right_score), (0, 0));
        assert!(state.pending_reset());
        // Pips stay lit until the reset is consumed.
        assert_eq!(state.lights.lit_count(Side::Right), 4);
    }

    #[test]
    fn reset_without_pending_flag_is_a_no_op() {
        let mut state = new_state();
        state.register_goal(Side::Left);
        let lights = state.lights.clone();

        assert!(state.take_pending_reset().is_none());
        assert_eq!(state.lights, lights);
        assert_eq!(state.phase(), RoundPhase::Playing);
    }

    #[test]
    fn consuming_reset_clears_pips_and_pauses() {
        let mut state = new_state();
        for _ in 0..4 {
            state.register_goal(Side::Left);
        }
        state.check_win();

        let reset = state.take_pending_reset().expect("reset");
        assert_eq!(reset.puck_position, CENTER_SPOT);
        assert!(!state.pending_reset());
        assert_eq!(state.lights.lit_count(Side::Left), 0);
        assert_eq!(state.phase(), RoundPhase::Paused { seconds_left: 1.0 });

        assert!(state.take_pending_reset().is_none());
    }

    #[test]
    fn pause_lasts_the_configured_duration() {
        let mut state = new_state();
        for _ in 0..4 {
            state.register_goal(Side::Left);
        }
        state.check_win();
        state.take_pending_reset();

        let dt = 0.25;
        let mut frames = 0;
        while state.tick(dt) {
            frames += 1;
            assert!(frames < 10);
        }
        assert_eq!(frames, 3);
        assert_eq!(state.phase(), RoundPhase::Playing);
    }

    #[test]
    fn tick_while_playing_stays_playing() {
        let mut state = new_state();
        assert!(!state.tick(1.0));
    }

    #[test]
    fn follow_light_rides_above_puck() {
        let mut state = new_state();
        state.track_puck(Vec3::new(2.0, -1.0, 4.0));
        assert_eq!(
            state.lights.get(FOLLOW_SLOT).unwrap().position,
            Vec3::new(2.0, -1.0, 7.0)
        );
    }

    #[test]
    fn shorter_match_wins_earlier() {
        let config = MatchConfig {
            winning_score: 2,
            ..MatchConfig::default()
        };
        let mut state = MatchState::new(&config);
        state.register_goal(Side::Left);
        assert!(state.check_win().is_none());
        state.register_goal(Side::Left);
        assert_eq!(state.check_win(), Some(Side::Left));
    }
}
