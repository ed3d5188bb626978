//! Audio playback helpers.
//!
//! Music and the footsteps loop are long-lived entities whose sinks get
//! paused and resumed; one-shot effects despawn themselves when done. The
//! two mute flags come from [`UserSettings`] and are toggled with M (music)
//! and N (effects).

use bevy::{
  audio::{PlaybackMode, Volume},
  input::common_conditions::input_just_pressed,
  prelude::*,
};

use crate::settings::UserSettings;

/// Marker for looping background music.
#[derive(Component)]
pub struct Music;

/// Marker for one-shot sound effects.
#[derive(Component)]
pub struct SoundEffect;

pub struct GameAudioPlugin;

impl Plugin for GameAudioPlugin {
  fn build(&self, app: &mut App) {
    app
      .add_systems(
        Update,
        (
          toggle_music_mute.run_if(input_just_pressed(KeyCode::KeyM)),
          toggle_effects_mute.run_if(input_just_pressed(KeyCode::KeyN)),
          apply_music_mute,
          mute_new_music,
        ),
      );
  }
}

/// A looping music track.
pub fn music(handle: Handle<AudioSource>, volume: f32) -> impl Bundle {
  (
    Music,
    AudioPlayer(handle),
    PlaybackSettings {
      mode: PlaybackMode::Loop,
      volume: Volume::Linear(volume),
      ..default()
    },
  )
}

/// A fire-and-forget effect; the entity despawns when playback ends.
pub fn sound_effect(handle: Handle<AudioSource>, volume: f32) -> impl Bundle {
  (
    SoundEffect,
    AudioPlayer(handle),
    PlaybackSettings {
      mode: PlaybackMode::Despawn,
      volume: Volume::Linear(volume),
      ..default()
    },
  )
}

/// A looping effect (footsteps) whose sink is paused/resumed by hand.
pub fn looping_effect(handle: Handle<AudioSource>, volume: f32) -> impl Bundle {
  (
    SoundEffect,
    AudioPlayer(handle),
    PlaybackSettings {
      mode: PlaybackMode::Loop,
      volume: Volume::Linear(volume),
      paused: true,
      ..default()
    },
  )
}

fn toggle_music_mute(mut settings: ResMut<UserSettings>) {
  settings.music_muted = !settings.music_muted;
  info!("Music muted: {}", settings.music_muted);
}

fn toggle_effects_mute(mut settings: ResMut<UserSettings>) {
  settings.effects_muted = !settings.effects_muted;
  info!("Effects muted: {}", settings.effects_muted);
}

/// Music started while the mute flag is already set never gets a
/// `settings` change to react to, so pause its sink as soon as it exists.
fn mute_new_music(
  settings: Res<UserSettings>,
  sinks: Query<&AudioSink, (With<Music>, Added<AudioSink>)>,
) {
  if !settings.music_muted {
    return;
  }
  for sink in &sinks {
    sink.pause();
  }
}

fn apply_music_mute(settings: Res<UserSettings>, sinks: Query<&AudioSink, With<Music>>) {
  if !settings.is_changed() {
    return;
  }
  for sink in &sinks {
    if settings.music_muted {
      sink.pause();
    } else {
      sink.play();
    }
  }
}
