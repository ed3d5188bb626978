mod hud;
mod window;

use bevy::prelude::*;

use crate::scene::Phase;

pub struct GameUiPlugin;

impl Plugin for GameUiPlugin {
  fn build(&self, app: &mut App) {
    app
      .add_systems(Startup, hud::spawn_hud)
      .add_systems(
        Update,
        (
          hud::update_shield_bar,
          hud::update_shield_text,
          hud::update_time_text,
          hud::update_countdown_text,
          hud::update_pause_button_label,
        ),
      )
      // LevelResult is inserted by complete_level; the ordering gives the
      // command flush the window needs.
      .add_systems(
        OnEnter(Phase::Completed),
        window::spawn_complete_window.after(crate::scene::complete_level),
      )
      .add_systems(OnEnter(Phase::GameOver), window::spawn_game_over_window)
      .add_systems(OnEnter(Phase::Loading), window::despawn_windows);
  }
}
