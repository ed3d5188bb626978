//! Scene state machine.
//!
//! A level session moves Loading -> Countdown -> Playing, with Paused as
//! a detour and Exploding, Completed and GameOver as terminal phases.
//! Completed and GameOver leave the frozen world on screen behind the
//! result window until the player reloads.

pub mod contact;
pub mod countdown;
pub mod explosion;
pub mod pause;
pub mod rating;

use bevy::{input::common_conditions::input_just_pressed, prelude::*};

use crate::audio::sound_effect;
use crate::config::ConfigLoaded;
use crate::level::LevelInfo;
use crate::robot::{Robot, Shield};
use crate::settings::UserSettings;

#[derive(States, Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum Phase {
  #[default]
  Loading,
  Countdown,
  Playing,
  Paused,
  Exploding,
  Completed,
  GameOver,
}

/// Time spent playing the current level, in seconds. Pauses and the
/// countdown do not advance it.
#[derive(Resource, Default)]
pub struct ElapsedTime(pub f32);

/// Outcome of a completed level, consumed by the result window.
#[derive(Resource)]
pub struct LevelResult {
  pub stars: u8,
}

pub struct ScenePlugin;

impl Plugin for ScenePlugin {
  fn build(&self, app: &mut App) {
    app
      .init_state::<Phase>()
      .init_resource::<ElapsedTime>()
      .init_resource::<countdown::CountdownDisplay>()
      .add_systems(OnEnter(Phase::Loading), reset_scene)
      .add_systems(
        OnEnter(Phase::Countdown),
        (pause::freeze_physics, countdown::start_countdown),
      )
      .add_systems(
        Update,
        countdown::run_countdown.run_if(in_state(Phase::Countdown)),
      )
      .add_systems(
        OnExit(Phase::Countdown),
        (pause::unfreeze_physics, countdown::clear_countdown),
      )
      .add_systems(
        Update,
        (update_game_time, check_shield_depleted, contact::handle_contacts)
          .run_if(in_state(Phase::Playing)),
      )
      .add_systems(
        Update,
        (
          request_pause
            .run_if(in_state(Phase::Playing).and(input_just_pressed(KeyCode::Escape))),
          request_resume
            .run_if(in_state(Phase::Paused).and(input_just_pressed(KeyCode::Escape))),
        ),
      )
      .add_systems(
        OnEnter(Phase::Paused),
        (pause::freeze_physics, pause::pause_world),
      )
      .add_systems(
        OnExit(Phase::Paused),
        (pause::unfreeze_physics, pause::resume_world),
      )
      .add_systems(OnEnter(Phase::Exploding), explosion::explode_robot)
      .add_systems(
        Update,
        explosion::tick_game_over.run_if(in_state(Phase::Exploding)),
      )
      .add_systems(
        OnEnter(Phase::Completed),
        (pause::freeze_physics, pause::pause_world, complete_level),
      )
      .add_systems(
        OnEnter(Phase::GameOver),
        (pause::freeze_physics, pause::pause_world),
      );
  }
}

fn reset_scene(mut commands: Commands, mut elapsed: ResMut<ElapsedTime>) {
  elapsed.0 = 0.0;
  commands.remove_resource::<explosion::GameOverTimer>();
  commands.remove_resource::<LevelResult>();
}

fn update_game_time(time: Res<Time>, mut elapsed: ResMut<ElapsedTime>) {
  elapsed.0 += time.delta_secs();
}

fn check_shield_depleted(
  shields: Query<&Shield, With<Robot>>,
  mut next_phase: ResMut<NextState<Phase>>,
) {
  if shields.single().is_ok_and(|shield| shield.0 <= 0.0) {
    next_phase.set(Phase::Exploding);
  }
}

fn request_pause(mut next_phase: ResMut<NextState<Phase>>) {
  next_phase.set(Phase::Paused);
}

fn request_resume(mut next_phase: ResMut<NextState<Phase>>) {
  next_phase.set(Phase::Playing);
}

pub(crate) fn complete_level(
  mut commands: Commands,
  elapsed: Res<ElapsedTime>,
  info: Res<LevelInfo>,
  shields: Query<&Shield, With<Robot>>,
  asset_server: Res<AssetServer>,
  settings: Res<UserSettings>,
  config: Res<ConfigLoaded>,
) {
  let shield = shields.single().map(|shield| shield.0).unwrap_or(0.0);
  let stars = rating::star_rating(elapsed.0, info.time_limit, shield);
  info!(
    "level '{}' complete in {:.1}s with {stars} star(s)",
    info.name, elapsed.0
  );
  commands.insert_resource(LevelResult { stars });

  if !settings.effects_muted {
    commands.spawn(sound_effect(
      asset_server.load("sounds/victory.ogg"),
      config.audio.effects_volume,
    ));
  }
}
