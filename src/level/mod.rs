//! Level loading.
//!
//! Entering `Phase::Loading` tears down the previous level, kicks off the
//! asset load for the selected level file, and a poll system builds the
//! world once the asset arrives. A load failure is fatal; a broken object
//! definition inside an otherwise valid file is too.

pub mod asset;
mod spawn;

use bevy::{asset::LoadState, platform::collections::HashMap, prelude::*};
use bevy_common_assets::toml::TomlAssetPlugin;
use bevy_rapier2d::prelude::*;

pub use asset::{LevelAsset, LevelProperties, ObjectDef, TerrainDef};

use crate::config::ConfigLoaded;
use crate::core::{CameraBounds, CameraFollow};
use crate::scene::{explosion, Phase};

/// Which level file to load, set from the command line.
#[derive(Resource, Debug, Clone)]
pub struct LevelSelection(pub String);

/// Everything spawned for the current level carries this marker, so a
/// reload is a single despawn sweep.
#[derive(Component)]
pub struct LevelEntity;

/// Name -> entity registry for the current level, rebuilt on every load.
#[derive(Resource, Debug, Default, Clone)]
pub struct ObjectNames(HashMap<String, Entity>);

impl ObjectNames {
  pub fn insert(&mut self, name: &str, entity: Entity) {
    if self.0.insert(name.to_string(), entity).is_some() {
      warn!("duplicate object name '{name}' in level, keeping the later one");
    }
  }

  pub fn get(&self, name: &str) -> Option<Entity> {
    self.0.get(name).copied()
  }
}

/// Map properties of the loaded level.
#[derive(Resource, Debug, Clone)]
pub struct LevelInfo {
  pub name: String,
  pub time_limit: u32,
  pub size: Vec2,
}

#[derive(Resource)]
struct LevelHandle(Handle<LevelAsset>);

pub struct LevelPlugin;

impl Plugin for LevelPlugin {
  fn build(&self, app: &mut App) {
    app
      .add_plugins(TomlAssetPlugin::<LevelAsset>::new(&["level.toml"]))
      .init_resource::<ObjectNames>()
      .add_systems(OnEnter(Phase::Loading), begin_load)
      .add_systems(Update, poll_level.run_if(in_state(Phase::Loading)));
  }
}

fn begin_load(
  mut commands: Commands,
  asset_server: Res<AssetServer>,
  selection: Res<LevelSelection>,
  entities: Query<Entity, With<LevelEntity>>,
  mut names: ResMut<ObjectNames>,
  mut follow: ResMut<CameraFollow>,
) {
  for entity in &entities {
    commands.entity(entity).despawn();
  }
  names.0.clear();
  *follow = CameraFollow::default();

  let path = format!("levels/{}.level.toml", selection.0);
  info!("loading level '{path}'");
  commands.insert_resource(LevelHandle(asset_server.load(path)));
}

fn poll_level(
  mut commands: Commands,
  handle: Res<LevelHandle>,
  asset_server: Res<AssetServer>,
  levels: Res<Assets<LevelAsset>>,
  config: Res<ConfigLoaded>,
  mut names: ResMut<ObjectNames>,
  mut rapier_configs: Query<&mut RapierConfiguration>,
  mut next_phase: ResMut<NextState<Phase>>,
  mut exit: MessageWriter<AppExit>,
  selection: Res<LevelSelection>,
) {
  if let Some(LoadState::Failed(err)) = asset_server.get_load_state(&handle.0) {
    error!("failed to load level '{}': {err}", selection.0);
    exit.write(AppExit::error());
    return;
  }
  let Some(level) = levels.get(&handle.0) else {
    return;
  };

  let props = &level.properties;
  info!(
    "level '{}': {} terrain rects, {} objects",
    props.name,
    level.terrain.len(),
    level.objects.len()
  );

  for mut rapier_config in rapier_configs.iter_mut() {
    rapier_config.gravity = Vec2::new(0.0, props.gravity);
  }

  for terrain in &level.terrain {
    spawn::spawn_terrain(&mut commands, terrain);
  }

  let mut ok = true;
  for def in &level.objects {
    ok &= spawn::spawn_object(&mut commands, def, &mut names, &config, &asset_server);
  }
  if !ok {
    error!("level '{}' has invalid object definitions", selection.0);
    exit.write(AppExit::error());
    return;
  }

  explosion::spawn_fragments(&mut commands, &asset_server);

  let map_size = Vec2::new(props.width, props.height);
  commands.insert_resource(CameraBounds::from_map(
    map_size,
    Vec2::new(config.camera.viewport_width, config.camera.viewport_height),
  ));
  commands.insert_resource(LevelInfo {
    name: props.name.clone(),
    time_limit: props.time_limit,
    size: map_size,
  });
  commands.remove_resource::<LevelHandle>();

  next_phase.set(Phase::Countdown);
}
