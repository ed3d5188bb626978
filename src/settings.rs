//! Persisted user settings.
//!
//! Only the two audio mute flags survive between runs. They are stored as a
//! small JSON file in the user's data directory and saved whenever they
//! change.

use std::fs;
use std::path::PathBuf;

use bevy::prelude::*;
use serde::{Deserialize, Serialize};

pub struct SettingsPlugin;

impl Plugin for SettingsPlugin {
  fn build(&self, app: &mut App) {
    app
      .init_resource::<UserSettings>()
      .add_systems(Startup, load_settings)
      .add_systems(Update, save_settings_on_change);
  }
}

#[derive(Resource, Debug, Default, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct UserSettings {
  pub music_muted: bool,
  pub effects_muted: bool,
}

impl UserSettings {
  fn file_path() -> Option<PathBuf> {
    dirs::data_local_dir().map(|dir| dir.join("laserbots").join("settings.json"))
  }

  pub fn load() -> Self {
    let Some(path) = Self::file_path() else {
      warn!("Could not determine data directory for settings");
      return Self::default();
    };

    if !path.exists() {
      info!("No settings file found at {:?}, using defaults", path);
      return Self::default();
    }

    match fs::read_to_string(&path) {
      Ok(contents) => match serde_json::from_str(&contents) {
        Ok(settings) => {
          info!("Loaded settings from {:?}", path);
          settings
        }
        Err(e) => {
          warn!("Failed to parse settings: {}", e);
          Self::default()
        }
      },
      Err(e) => {
        warn!("Failed to read settings file: {}", e);
        Self::default()
      }
    }
  }

  pub fn save(&self) {
    let Some(path) = Self::file_path() else {
      warn!("Could not determine data directory for saving settings");
      return;
    };

    if let Some(parent) = path.parent()
      && let Err(e) = fs::create_dir_all(parent)
    {
      warn!("Failed to create settings directory: {}", e);
      return;
    }

    match serde_json::to_string_pretty(self) {
      Ok(json) => match fs::write(&path, json) {
        Ok(()) => info!("Saved settings to {:?}", path),
        Err(e) => warn!("Failed to write settings: {}", e),
      },
      Err(e) => warn!("Failed to serialize settings: {}", e),
    }
  }
}

fn load_settings(mut settings: ResMut<UserSettings>) {
  *settings = UserSettings::load();
}

fn save_settings_on_change(settings: Res<UserSettings>) {
  if settings.is_changed() && !settings.is_added() {
    settings.save();
  }
}
