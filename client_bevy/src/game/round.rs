use bevy::prelude::*;
use bevy_rapier2d::prelude::*;

use air_hockey_shared::score::CENTER_SPOT;

use super::puck::Puck;
use super::{MatchRuntime, UpdateSet};

pub struct RoundPlugin;

impl Plugin for RoundPlugin {
    fn build(&self, app: &mut App) {
        app.add_systems(Update, round_system.in_set(UpdateSet::Round))
            .add_systems(
                Update,
                (goal_system, track_puck_system)
                    .chain()
                    .in_set(UpdateSet::Goals),
            );
    }
}

type PuckBodyQuery<'w, 's> = Query<
    'w,
    's,
    (
        &'static mut Transform,
        &'static mut Velocity,
        Option<&'static mut ExternalImpulse>,
    ),
    With<Puck>,
>;

fn stop_at(
    transform: &mut Transform,
    velocity: &mut Velocity,
    impulse: Option<Mut<ExternalImpulse>>,
    at: Vec3,
) {
    transform.translation.x = at.x;
    transform.translation.y = at.y;
    *velocity = Velocity::zero();
    if let Some(mut impulse) = impulse {
        impulse.impulse = Vec2::ZERO;
    }
}

/// Start of the frame: count the pause down, consume a pending reset, then
/// check for a winner. The reset must be consumed before the win check.
fn round_system(time: Res<Time>, mut runtime: ResMut<MatchRuntime>, mut q_puck: PuckBodyQuery) {
    let was_paused = runtime.state.is_paused();
    let paused = runtime.state.tick(time.delta_secs());
    if was_paused && !paused {
        info!("round resumed");
    }

    let reset = runtime.state.take_pending_reset();
    if let Some(winner) = runtime.state.check_win() {
        runtime.last_winner = Some(winner);
    }

    if let Ok((mut transform, mut velocity, impulse)) = q_puck.single_mut() {
        if let Some(reset) = reset {
            stop_at(&mut transform, &mut velocity, impulse, reset.puck_position);
        } else if runtime.state.is_paused() {
            stop_at(&mut transform, &mut velocity, impulse, CENTER_SPOT);
        }
    }
}

fn goal_system(mut runtime: ResMut<MatchRuntime>, mut q_puck: PuckBodyQuery) {
    let Ok((mut transform, mut velocity, impulse)) = q_puck.single_mut() else {
        return;
    };
    if let Some(goal) = runtime.state.score_puck(transform.translation) {
        stop_at(&mut transform, &mut velocity, impulse, goal.serve_position);
    }
}

fn track_puck_system(mut runtime: ResMut<MatchRuntime>, q_puck: Query<&Transform, With<Puck>>) {
    if let Ok(transform) = q_puck.single() {
        runtime.state.track_puck(transform.translation);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use air_hockey_shared::config::MatchConfig;
    use air_hockey_shared::lights::FOLLOW_SLOT;
    use air_hockey_shared::score::{RoundPhase, Side};

    fn make_test_app() -> App {
        let mut app = App::new();
        app.add_plugins(MinimalPlugins);
        app.insert_resource(MatchRuntime::new(&MatchConfig::default()));
        app.add_systems(
            Update,
            (round_system, goal_system, track_puck_system).chain(),
        );
        app
    }

    fn spawn_puck(app: &mut App, x: f32, y: f32) -> Entity {
        app.world_mut()
            .spawn((
                Puck,
                Transform::from_xyz(x, y, 4.0),
                Velocity::linear(Vec2::new(-3.0, 1.0)),
                ExternalImpulse::default(),
            ))
            .id()
    }

    fn score(app: &mut App, side: Side, goals: u32) {
        let mut runtime = app.world_mut().resource_mut::<MatchRuntime>();
        for _ in 0..goals {
            runtime.state.register_goal(side);
        }
    }

    #[test]
    fn goal_serves_puck_on_scoring_side() {
        let mut app = make_test_app();
        let puck = spawn_puck(&mut app, -17.6, 1.0);

        app.update();

        let world = app.world();
        let t = world.get::<Transform>(puck).unwrap().translation;
        assert_eq!(t, Vec3::new(9.5, 0.0, 4.0));
        assert_eq!(world.get::<Velocity>(puck).unwrap().linvel, Vec2::ZERO);

        let runtime = world.resource::<MatchRuntime>();
        assert_eq!(runtime.state.right_score, 1);
        assert!(runtime.state.lights.get(5).unwrap().is_lit());
    }

    #[test]
    fn puck_short_of_line_keeps_moving() {
        let mut app = make_test_app();
        let puck = spawn_puck(&mut app, 17.59, 0.0);

        app.update();

        assert_eq!(
            app.world().get::<Velocity>(puck).unwrap().linvel,
            Vec2::new(-3.0, 1.0)
        );
        assert_eq!(app.world().resource::<MatchRuntime>().state.left_score, 0);
    }

    #[test]
    fn follow_light_tracks_puck_every_frame() {
        let mut app = make_test_app();
        let puck = spawn_puck(&mut app, 2.0, -3.0);
        app.update();

        app.world_mut()
            .get_mut::<Transform>(puck)
            .unwrap()
            .translation
            .x = 6.0;
        app.update();

        let runtime = app.world().resource::<MatchRuntime>();
        let light = runtime.state.lights.get(FOLLOW_SLOT).unwrap();
        assert_eq!(light.position, Vec3::new(6.0, -3.0, 7.0));
    }

    #[test]
    fn win_is_announced_then_reset_next_frame() {
        let mut app = make_test_app();
        let puck = spawn_puck(&mut app, 4.0, 2.0);
        score(&mut app, Side::Left, 4);

        // Frame 1: win check zeroes the counters and raises the reset.
        app.update();
        {
            let runtime = app.world().resource::<MatchRuntime>();
            assert_eq!(runtime.last_winner, Some(Side::Left));
            assert_eq!((runtime.state.left_score, runtime.state.right_score), (0, 0));
            assert!(runtime.state.pending_reset());
            assert_eq!(runtime.state.lights.lit_count(Side::Left), 4);
        }

        // Frame 2: the reset is consumed, the puck goes to the centre.
        app.update();
        let world = app.world();
        let runtime = world.resource::<MatchRuntime>();
        assert!(!runtime.state.pending_reset());
        assert!(runtime.state.is_paused());
        assert_eq!(runtime.state.lights.lit_count(Side::Left), 0);
        let t = world.get::<Transform>(puck).unwrap().translation;
        assert_eq!((t.x, t.y), (0.0, 0.0));
        assert_eq!(world.get::<Velocity>(puck).unwrap().linvel, Vec2::ZERO);
    }

    #[test]
    fn paused_round_holds_puck_at_centre() {
        let mut app = make_test_app();
        let puck = spawn_puck(&mut app, 4.0, 2.0);
        score(&mut app, Side::Right, 4);
        app.update();
        app.update();

        app.world_mut().get_mut::<Velocity>(puck).unwrap().linvel = Vec2::new(5.0, 0.0);
        app.update();

        let world = app.world();
        assert!(matches!(
            world.resource::<MatchRuntime>().state.phase(),
            RoundPhase::Paused { .. }
        ));
        assert_eq!(world.get::<Velocity>(puck).unwrap().linvel, Vec2::ZERO);
    }

    #[test]
    fn no_pending_reset_leaves_everything_alone() {
        let mut app = make_test_app();
        let puck = spawn_puck(&mut app, 4.0, 2.0);
        score(&mut app, Side::Right, 2);

        app.update();

        let world = app.world();
        let runtime = world.resource::<MatchRuntime>();
        assert_eq!(runtime.state.lights.lit_count(Side::Right), 2);
        assert!(!runtime.state.is_paused());
        let t = world.get::<Transform>(puck).unwrap().translation;
        assert_eq!((t.x, t.y), (4.0, 2.0));
    }
}
