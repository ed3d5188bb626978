//! Pre-play countdown.
//!
//! The world sits frozen while 3, 2, 1, 0 tick down at one second
//! intervals, followed by "GO!", and play unfreezes at 4.6 seconds.
//! The clock runs on real time since virtual time is paused.

use bevy::prelude::*;

use crate::audio::{music, sound_effect, Music};
use crate::config::ConfigLoaded;
use crate::level::LevelEntity;
use crate::scene::Phase;
use crate::settings::UserSettings;

/// Seconds from entering the countdown until play starts.
pub const PLAY_DELAY: f32 = 4.6;

#[derive(Resource, Default)]
pub struct Countdown {
  pub elapsed: f32,
}

/// What the countdown overlay should show right now; `None` hides it.
#[derive(Resource, Default)]
pub struct CountdownDisplay(pub Option<&'static str>);

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CountdownTick {
  Digit(u32),
  Go,
}

impl CountdownTick {
  pub fn at(elapsed: f32) -> Self {
    match elapsed {
      t if t < 1.0 => Self::Digit(3),
      t if t < 2.0 => Self::Digit(2),
      t if t < 3.0 => Self::Digit(1),
      t if t < 4.0 => Self::Digit(0),
      _ => Self::Go,
    }
  }

  pub fn label(self) -> &'static str {
    match self {
      Self::Digit(3) => "3",
      Self::Digit(2) => "2",
      Self::Digit(1) => "1",
      Self::Digit(_) => "0",
      Self::Go => "GO!",
    }
  }
}

pub fn start_countdown(
  mut commands: Commands,
  asset_server: Res<AssetServer>,
  settings: Res<UserSettings>,
  config: Res<ConfigLoaded>,
) {
  commands.insert_resource(Countdown::default());
  if !settings.effects_muted {
    commands.spawn(sound_effect(
      asset_server.load("sounds/countdown.ogg"),
      config.audio.effects_volume,
    ));
  }
}

pub fn run_countdown(
  mut commands: Commands,
  time: Res<Time<Real>>,
  mut countdown: ResMut<Countdown>,
  mut display: ResMut<CountdownDisplay>,
  mut next_phase: ResMut<NextState<Phase>>,
  asset_server: Res<AssetServer>,
  config: Res<ConfigLoaded>,
  playing_music: Query<(), With<Music>>,
) {
  countdown.elapsed += time.delta_secs();

  let label = CountdownTick::at(countdown.elapsed).label();
  if display.0 != Some(label) {
    display.0 = Some(label);
    debug!("countdown: {label}");
  }

  if countdown.elapsed >= PLAY_DELAY {
    display.0 = None;
    // The music entity is level-owned: the reload sweep despawns it, so
    // every playthrough starts a fresh track here.
    if playing_music.is_empty() {
      commands.spawn((
        LevelEntity,
        music(
          asset_server.load("music/level.ogg"),
          config.audio.music_volume,
        ),
      ));
    }
    next_phase.set(Phase::Playing);
  }
}

pub fn clear_countdown(mut commands: Commands, mut display: ResMut<CountdownDisplay>) {
  commands.remove_resource::<Countdown>();
  display.0 = None;
}
