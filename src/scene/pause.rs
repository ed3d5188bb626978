//! World freeze and pause propagation.
//!
//! Freezing stops virtual time and the physics pipeline; it is used by the
//! countdown, the pause menu and both terminal states. Pause propagation
//! additionally flags every [`Pausable`] object and silences audio sinks.
//! Both run from state transition schedules, so each fires exactly once
//! per transition.

use bevy::prelude::*;
use bevy_rapier2d::prelude::*;

use crate::audio::{Music, SoundEffect};
use crate::core::physics::apply_physics_active;
use crate::objects::Pausable;
use crate::robot::components::FootstepsLoop;
use crate::robot::{Robot, RobotState};
use crate::settings::UserSettings;

pub fn freeze_physics(
  mut time: ResMut<Time<Virtual>>,
  mut configs: Query<&mut RapierConfiguration>,
) {
  time.pause();
  apply_physics_active(false, &mut configs);
}

pub fn unfreeze_physics(
  mut time: ResMut<Time<Virtual>>,
  mut configs: Query<&mut RapierConfiguration>,
) {
  time.unpause();
  apply_physics_active(true, &mut configs);
}

pub fn pause_world(
  mut pausables: Query<&mut Pausable>,
  sinks: Query<&AudioSink, Or<(With<Music>, With<SoundEffect>)>>,
) {
  for mut pausable in pausables.iter_mut() {
    pausable.paused = true;
  }
  for sink in &sinks {
    sink.pause();
  }
}

pub fn resume_world(
  mut pausables: Query<&mut Pausable>,
  settings: Res<UserSettings>,
  music_sinks: Query<&AudioSink, With<Music>>,
  effect_sinks: Query<(&AudioSink, Has<FootstepsLoop>), With<SoundEffect>>,
  robot_states: Query<&RobotState, With<Robot>>,
) {
  for mut pausable in pausables.iter_mut() {
    pausable.paused = false;
  }

  if !settings.music_muted {
    for sink in &music_sinks {
      sink.play();
    }
  }

  let running = robot_states
    .single()
    .is_ok_and(|state| *state == RobotState::Running);
  for (sink, is_footsteps) in &effect_sinks {
    if settings.effects_muted {
      continue;
    }
    // The footsteps loop only comes back if the robot is still walking.
    if is_footsteps && !running {
      continue;
    }
    sink.play();
  }
}

#[cfg(test)]
mod tests {
  use super::*;
  use crate::scene::Phase;
  use bevy::state::app::StatesPlugin;

  fn pause_app() -> App {
    let mut app = App::new();
    app.add_plugins((MinimalPlugins, StatesPlugin));
    app.init_state::<Phase>();
    app.insert_resource(UserSettings::default());
    app.add_systems(OnEnter(Phase::Paused), pause_world);
    app.add_systems(OnExit(Phase::Paused), resume_world);
    app
  }

  #[test]
  fn pause_flags_every_pausable_and_resume_clears_them() {
    let mut app = pause_app();
    let laser = app.world_mut().spawn(Pausable::default()).id();
    let saw = app.world_mut().spawn(Pausable::default()).id();

    app
      .world_mut()
      .resource_mut::<NextState<Phase>>()
      .set(Phase::Paused);
    app.update();
    for entity in [laser, saw] {
      assert!(app.world().get::<Pausable>(entity).unwrap().paused);
    }

    app
      .world_mut()
      .resource_mut::<NextState<Phase>>()
      .set(Phase::Playing);
    app.update();
    for entity in [laser, saw] {
      assert!(!app.world().get::<Pausable>(entity).unwrap().paused);
    }
  }

  #[test]
  fn staying_paused_does_not_rerun_propagation() {
    let mut app = pause_app();
    let laser = app.world_mut().spawn(Pausable::default()).id();

    app
      .world_mut()
      .resource_mut::<NextState<Phase>>()
      .set(Phase::Paused);
    app.update();

    // Flip the flag by hand; further updates in Paused must not touch it.
    app.world_mut().get_mut::<Pausable>(laser).unwrap().paused = false;
    app.update();
    app.update();
    assert!(!app.world().get::<Pausable>(laser).unwrap().paused);
  }
}
