use bevy::{asset::Asset, prelude::*, reflect::TypePath};
use serde::Deserialize;

/// A level file. This is the boundary to the map editor: a property bag per
/// placed object plus global map properties, mirroring what a tile map
/// object layer exports.
#[derive(Asset, TypePath, Deserialize, Debug, Clone)]
pub struct LevelAsset {
  pub properties: LevelProperties,
  #[serde(default)]
  pub terrain: Vec<TerrainDef>,
  #[serde(default)]
  pub objects: Vec<ObjectDef>,
}

#[derive(Deserialize, Debug, Clone)]
pub struct LevelProperties {
  pub name: String,
  /// Seconds allowed for a 2-star completion.
  pub time_limit: u32,
  pub gravity: f32,
  pub width: f32,
  pub height: f32,
}

/// A solid rectangle from the map's collision layer. Walkable rectangles are
/// surfaces the robot's feet register on (crates, platforms); the rest is
/// plain world geometry.
#[derive(Deserialize, Debug, Clone)]
pub struct TerrainDef {
  pub x: f32,
  pub y: f32,
  pub width: f32,
  pub height: f32,
  #[serde(default)]
  pub walkable: bool,
}

/// One placed object. Only `type`, `name`, `x`, `y` are always present;
/// everything else depends on the type and is validated at spawn time.
#[derive(Deserialize, Debug, Clone)]
pub struct ObjectDef {
  #[serde(rename = "type")]
  pub kind: String,
  pub name: String,
  pub x: f32,
  pub y: f32,
  pub target: Option<String>,
  pub damage: Option<u32>,
  pub speed: Option<f32>,
  pub rotation: Option<f32>,
  pub width: Option<f32>,
  pub height: Option<f32>,
  pub shield: Option<f32>,
  pub image: Option<String>,
  pub shape: Option<String>,
  pub rotation_time: Option<f32>,
  pub movement: Option<f32>,
  pub movement_time: Option<f32>,
  pub stop_time: Option<f32>,
}

impl ObjectDef {
  pub fn position(&self) -> Vec2 {
    Vec2::new(self.x, self.y)
  }

  /// Required-property accessor: logs the offender before the caller aborts
  /// the load.
  pub fn require<T: Copy>(&self, value: Option<T>, property: &str) -> Option<T> {
    if value.is_none() {
      error!(
        "object '{}' ({}) is missing required property '{}'",
        self.name, self.kind, property
      );
    }
    value
  }
}
