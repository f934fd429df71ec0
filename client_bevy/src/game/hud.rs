use bevy::prelude::*;

use air_hockey_shared::score::Side;

use crate::constants::{color_from_hex, Colors};

use super::{MatchRuntime, UpdateSet};

pub struct HudPlugin;

#[derive(Component)]
struct HudScoreText;

#[derive(Component)]
struct HudBanner;

impl Plugin for HudPlugin {
    fn build(&self, app: &mut App) {
        app.add_systems(Startup, spawn_hud).add_systems(
            Update,
            (update_score_text, update_banner)
                .chain()
                .in_set(UpdateSet::Visuals),
        );
    }
}

fn score_line(runtime: &MatchRuntime) -> String {
    format!(
        "RED {} : {} BLUE",
        runtime.state.score(Side::Left),
        runtime.state.score(Side::Right)
    )
}

fn spawn_hud(mut commands: Commands) {
    commands.spawn((
        Node {
            position_type: PositionType::Absolute,
            top: Val::Px(12.0),
            width: Val::Percent(100.0),
            justify_content: JustifyContent::Center,
            ..default()
        },
        children![(
            Text::new("RED 0 : 0 BLUE"),
            TextFont::from_font_size(22.0),
            TextColor(color_from_hex(Colors::EDGE)),
            HudScoreText,
        )],
    ));

    commands.spawn((
        Node {
            position_type: PositionType::Absolute,
            top: Val::Percent(45.0),
            width: Val::Percent(100.0),
            justify_content: JustifyContent::Center,
            ..default()
        },
        Visibility::Hidden,
        HudBanner,
        children![(
            Text::new(""),
            TextFont::from_font_size(32.0),
            TextColor(color_from_hex(Colors::EDGE)),
        )],
    ));
}

fn update_score_text(
    runtime: Res<MatchRuntime>,
    mut q_text: Query<&mut Text, With<HudScoreText>>,
) {
    if !runtime.is_changed() {
        return;
    }
    let line = score_line(&runtime);
    for mut text in &mut q_text {
        if text.0 != line {
            text.0 = line.clone();
        }
    }
}

fn update_banner(
    runtime: Res<MatchRuntime>,
    mut q_banner: Query<(&mut Visibility, &Children), With<HudBanner>>,
    mut q_text: Query<&mut Text, Without<HudScoreText>>,
) {
    if !runtime.is_changed() {
        return;
    }
    let message = match (runtime.state.is_paused(), runtime.last_winner) {
        (true, Some(winner)) => Some(format!("{} Player Wins!", winner.player_name())),
        (true, None) => Some("Get ready".to_string()),
        (false, _) => None,
    };

    for (mut visibility, children) in &mut q_banner {
        *visibility = if message.is_some() {
            Visibility::Inherited
        } else {
            Visibility::Hidden
        };
        let Some(message) = &message else {
            continue;
        };
        for child in children.iter() {
            if let Ok(mut text) = q_text.get_mut(child) {
                text.0 = message.clone();
            }
        }
    }
}
