mod plugin;

use bevy::{asset::Asset, prelude::*, reflect::TypePath};
pub use plugin::ConfigPlugin;
use serde::Deserialize;

#[derive(Asset, TypePath, Deserialize, Debug, Clone)]
pub struct GameConfig {
  pub window: WindowConfig,
  pub camera: CameraConfig,
  pub physics: PhysicsConfig,
  pub robot: RobotConfig,
  pub audio: AudioConfig,
}

#[derive(Deserialize, Debug, Clone)]
pub struct WindowConfig {
  pub width: u32,
  pub height: u32,
  pub title: String,
}

#[derive(Deserialize, Debug, Clone)]
pub struct CameraConfig {
  pub viewport_width: f32,
  pub viewport_height: f32,
}

#[derive(Deserialize, Debug, Clone)]
pub struct PhysicsConfig {
  pub length_unit: f32,
}

#[derive(Deserialize, Debug, Clone)]
pub struct RobotConfig {
  pub walk_speed: f32,
  pub jump_impulse: f32,
  pub collider_half_width: f32,
  pub collider_half_height: f32,
  pub feet_half_width: f32,
  pub feet_half_height: f32,
}

#[derive(Deserialize, Debug, Clone)]
pub struct AudioConfig {
  pub music_volume: f32,
  pub effects_volume: f32,
}

#[derive(Resource)]
pub struct ConfigHandle(pub Handle<GameConfig>);

/// Snapshot of the config actually in effect, refreshed on hot reload.
#[derive(Resource, Debug, Clone)]
pub struct ConfigLoaded {
  pub window: WindowConfig,
  pub camera: CameraConfig,
  pub physics: PhysicsConfig,
  pub robot: RobotConfig,
  pub audio: AudioConfig,
}

impl From<GameConfig> for ConfigLoaded {
  fn from(config: GameConfig) -> Self {
    Self {
      window: config.window,
      camera: config.camera,
      physics: config.physics,
      robot: config.robot,
      audio: config.audio,
    }
  }
}
