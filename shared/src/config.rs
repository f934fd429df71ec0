/// How the red paddle follows a mouse drag.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum DragMode {
    /// The cursor baseline is re-read every frame, so each frame moves the
    /// paddle by that frame's cursor motion.
    #[default]
    Incremental,
    /// The baseline is latched when the button goes down and the paddle is
    /// placed relative to where it was at that moment.
    Anchored,
}

/// Match configuration
#[derive(Debug, Clone, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct MatchConfig {
    /// Absolute puck X at or beyond which a goal is scored
    pub goal_line_x: f32,
    /// Goals needed to win a round (at most one per indicator pip)
    pub winning_score: u32,
    /// Fraction of the incoming speed kept after bouncing off an edge
    pub bounce_damping: f32,
    /// Speed of the continuous repel correction
    pub repel_speed: f32,
    /// Force applied to the puck per held arrow key
    pub puck_force: f32,
    /// World units per half-window of cursor motion
    pub drag_scale: f32,
    /// Blue paddle movement per frame per held key
    pub paddle_key_step: f32,
    /// Distance from centre where the puck is served after a goal
    pub serve_offset_x: f32,
    /// Pause after a round is won (seconds)
    pub round_pause_secs: f32,
    /// Height of the puck-follow light above the puck
    pub follow_light_height: f32,
    /// Minimum time between two repel corrections (seconds)
    pub repel_cooldown_secs: f32,
    pub drag_mode: DragMode,
    /// Push the puck out of an edge while it stays inside the trigger
    pub continuous_repel: bool,
    /// Re-apply the cached reflection velocity when the puck leaves an edge
    pub reapply_on_leave: bool,
}

impl Default for MatchConfig {
    fn default() -> Self {
        Self {
            goal_line_x: 17.6,
            winning_score: 4,
            bounce_damping: 0.5,
            repel_speed: 10.0,
            puck_force: 10.0,
            drag_scale: 20.0,
            paddle_key_step: 0.1,
            serve_offset_x: 9.5,
            round_pause_secs: 1.0,
            follow_light_height: 3.0,
            repel_cooldown_secs: 1.0,
            drag_mode: DragMode::Incremental,
            continuous_repel: false,
            reapply_on_leave: false,
        }
    }
}

impl MatchConfig {
    /// Parse a JSON document; absent fields keep their defaults.
    pub fn from_json(json: &str) -> Result<Self, String> {
        serde_json::from_str(json).map_err(|e| format!("invalid match config: {e}"))
    }

    pub fn validate(&self) -> Result<(), String> {
        let positive = [
            ("goal_line_x", self.goal_line_x),
            ("puck_force", self.puck_force),
            ("drag_scale", self.drag_scale),
            ("paddle_key_step", self.paddle_key_step),
            ("round_pause_secs", self.round_pause_secs),
        ];
        for (name, value) in positive {
            if !value.is_finite() || value <= 0.0 {
                return Err(format!("{name} must be finite and > 0"));
            }
        }

        let non_negative = [
            ("repel_speed", self.repel_speed),
            ("serve_offset_x", self.serve_offset_x),
            ("follow_light_height", self.follow_light_height),
            ("repel_cooldown_secs", self.repel_cooldown_secs),
        ];
        for (name, value) in non_negative {
            if !value.is_finite() || value < 0.0 {
                return Err(format!("{name} must be finite and >= 0"));
            }
        }

        if !self.bounce_damping.is_finite() || !(0.0..=1.0).contains(&self.bounce_damping) {
            return Err("bounce_damping must be within [0, 1]".to_string());
        }
        if self.winning_score == 0 || self.winning_score > crate::lights::PIPS_PER_SIDE as u32 {
            return Err(format!(
                "winning_score must be between 1 and {}",
                crate::lights::PIPS_PER_SIDE
            ));
        }
        if self.serve_offset_x >= self.goal_line_x {
            return Err("serve_offset_x must be inside the goal lines".to_string());
        }
        Ok(())
    }
}
