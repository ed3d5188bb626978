//! Per-object spawn factories.
//!
//! Each factory turns one [`ObjectDef`] into an entity with the collider
//! category that contact dispatch expects. A definition missing a required
//! property fails the factory, which fails the level load.

use bevy::prelude::*;
use bevy_rapier2d::prelude::*;

use super::asset::{ObjectDef, TerrainDef};
use super::{LevelEntity, ObjectNames};
use crate::config::ConfigLoaded;
use crate::core::physics::{
  door_groups, harm_groups, switch_groups, walk_on_groups, world_groups,
};
use crate::objects::{Door, Harm, Laser, LaserBeam, ObjectKind, ObjectName, Pausable, SawPatrol, Switch};
use crate::robot::spawn_robot;

pub fn spawn_terrain(commands: &mut Commands, def: &TerrainDef) {
  let center = Vec2::new(def.x + def.width / 2.0, def.y + def.height / 2.0);
  let groups = if def.walkable {
    walk_on_groups()
  } else {
    world_groups()
  };
  commands.spawn((
    LevelEntity,
    Transform::from_translation(center.extend(0.0)),
    RigidBody::Fixed,
    Collider::cuboid(def.width / 2.0, def.height / 2.0),
    groups,
  ));
}

/// Dispatches on the object's type tag. Returns `false` when the type is
/// unknown or a required property is missing; the error is already logged.
pub fn spawn_object(
  commands: &mut Commands,
  def: &ObjectDef,
  names: &mut ObjectNames,
  config: &ConfigLoaded,
  asset_server: &AssetServer,
) -> bool {
  let Some(kind) = ObjectKind::parse(&def.kind) else {
    error!("object '{}' has unknown type '{}'", def.name, def.kind);
    return false;
  };

  let entity = match kind {
    ObjectKind::Robot => Some(spawn_robot(
      commands,
      config,
      asset_server,
      def.position(),
      def.shield.unwrap_or(100.0),
    )),
    ObjectKind::Laser => spawn_laser(commands, def, asset_server),
    ObjectKind::Saw => spawn_saw(commands, def, asset_server),
    ObjectKind::Barrel => spawn_prop(commands, def, asset_server, "sprites/barrel.png"),
    ObjectKind::Box => spawn_prop(commands, def, asset_server, "sprites/box.png"),
    ObjectKind::Switch => spawn_switch(commands, def, asset_server),
    ObjectKind::Door => Some(spawn_door(commands, def, asset_server)),
    ObjectKind::Harm => spawn_harm(commands, def),
  };

  let Some(entity) = entity else {
    return false;
  };
  commands
    .entity(entity)
    .insert((kind, ObjectName(def.name.clone())));
  names.insert(&def.name, entity);
  true
}

/// A laser emitter sweeping a beam, with a harm collider along the beam.
fn spawn_laser(
  commands: &mut Commands,
  def: &ObjectDef,
  asset_server: &AssetServer,
) -> Option<Entity> {
  let rotation = def.require(def.rotation, "rotation")?;
  let speed = def.require(def.speed, "speed")?;
  let damage = def.require(def.damage, "damage")?;
  let height = def.require(def.height, "height")?;

  let entity = commands
    .spawn((
      LevelEntity,
      Pausable::default(),
      Laser {
        angle: rotation.to_radians(),
        speed: speed.to_radians(),
      },
      Sprite::from_image(asset_server.load("sprites/laser_emitter.png")),
      Transform::from_translation(def.position().extend(5.0)),
      Visibility::default(),
      RigidBody::KinematicPositionBased,
    ))
    .id();

  // The beam hangs below the emitter and rotates with it.
  commands.entity(entity).with_children(|children| {
    children.spawn((
      LaserBeam,
      Sprite::from_image(asset_server.load("sprites/laser_beam.png")),
      Transform::from_xyz(0.0, -height / 2.0, 0.0),
      Collider::cuboid(2.0, height / 2.0),
      Sensor,
      harm_groups(),
      ActiveEvents::COLLISION_EVENTS,
      Harm { damage },
    ));
  });
  Some(entity)
}

/// A circular saw patrolling horizontally.
fn spawn_saw(
  commands: &mut Commands,
  def: &ObjectDef,
  asset_server: &AssetServer,
) -> Option<Entity> {
  let damage = def.require(def.damage, "damage")?;
  let width = def.require(def.width, "width")?;
  let movement = def.require(def.movement, "movement")?;
  let movement_time = def.require(def.movement_time, "movement_time")?;
  let stop_time = def.require(def.stop_time, "stop_time")?;
  let rotation_time = def.require(def.rotation_time, "rotation_time")?;

  let entity = commands
    .spawn((
      LevelEntity,
      Pausable::default(),
      SawPatrol::new(def.position(), movement, movement_time, stop_time, rotation_time),
      Sprite::from_image(asset_server.load("sprites/saw.png")),
      Transform::from_translation(def.position().extend(5.0)),
      Visibility::default(),
      RigidBody::KinematicPositionBased,
      Collider::ball(width / 2.0),
      Sensor,
      harm_groups(),
      ActiveEvents::COLLISION_EVENTS,
      Harm { damage },
    ))
    .id();
  Some(entity)
}

/// A pushable prop the robot can stand on.
fn spawn_prop(
  commands: &mut Commands,
  def: &ObjectDef,
  asset_server: &AssetServer,
  sprite: &str,
) -> Option<Entity> {
  let width = def.require(def.width, "width")?;
  let height = def.require(def.height, "height")?;

  let entity = commands
    .spawn((
      LevelEntity,
      Sprite::from_image(asset_server.load(def.image.clone().unwrap_or_else(|| sprite.to_string()))),
      Transform::from_translation(def.position().extend(4.0)),
      Visibility::default(),
      RigidBody::Dynamic,
      Collider::cuboid(width / 2.0, height / 2.0),
      walk_on_groups(),
      Velocity::default(),
    ))
    .id();
  Some(entity)
}

fn spawn_switch(
  commands: &mut Commands,
  def: &ObjectDef,
  asset_server: &AssetServer,
) -> Option<Entity> {
  let target = def.require(def.target.as_deref(), "target")?;

  let entity = commands
    .spawn((
      LevelEntity,
      Switch::new(target),
      Sprite::from_image(asset_server.load("sprites/switch_off.png")),
      Transform::from_translation(def.position().extend(3.0)),
      Visibility::default(),
      Collider::cuboid(20.0, 20.0),
      Sensor,
      switch_groups(),
      ActiveEvents::COLLISION_EVENTS,
    ))
    .id();
  Some(entity)
}

fn spawn_door(commands: &mut Commands, def: &ObjectDef, asset_server: &AssetServer) -> Entity {
  commands
    .spawn((
      LevelEntity,
      Door::default(),
      Sprite::from_image(asset_server.load("sprites/door_closed.png")),
      Transform::from_translation(def.position().extend(2.0)),
      Visibility::default(),
      Collider::cuboid(30.0, 45.0),
      Sensor,
      door_groups(),
      ActiveEvents::COLLISION_EVENTS,
    ))
    .id()
}

/// An invisible damage volume drawn straight from the map.
fn spawn_harm(commands: &mut Commands, def: &ObjectDef) -> Option<Entity> {
  let damage = def.require(def.damage, "damage")?;
  let width = def.require(def.width, "width")?;
  let height = def.require(def.height, "height")?;

  let entity = commands
    .spawn((
      LevelEntity,
      Transform::from_translation(def.position().extend(0.0)),
      Collider::cuboid(width / 2.0, height / 2.0),
      Sensor,
      harm_groups(),
      ActiveEvents::COLLISION_EVENTS,
      Harm { damage },
    ))
    .id();
  Some(entity)
}
