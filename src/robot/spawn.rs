use bevy::prelude::*;
use bevy_rapier2d::prelude::*;

use super::components::{
  ActiveHarm, FeetSensor, FootstepsLoop, MovementIntent, Robot, RobotMotion, RobotMovement,
  RobotState, Shield,
};
use crate::audio::looping_effect;
use crate::config::ConfigLoaded;
use crate::core::physics::{feet_groups, robot_groups};
use crate::input::{RobotInput, robot_input_actions};
use crate::level::LevelEntity;

/// Builds the robot: a dynamic body with locked rotation, a feet sensor
/// child for ground detection, and the paused footsteps loop.
pub fn spawn_robot(
  commands: &mut Commands,
  config: &ConfigLoaded,
  asset_server: &AssetServer,
  position: Vec2,
  shield: f32,
) -> Entity {
  let robot = &config.robot;

  let entity = commands
    .spawn((
      Robot,
      LevelEntity,
      Sprite::default(),
      Transform::from_translation(position.extend(10.0)),
      Visibility::default(),
      RigidBody::Dynamic,
      Collider::capsule_y(robot.collider_half_height, robot.collider_half_width),
      LockedAxes::ROTATION_LOCKED,
      Velocity::default(),
      ExternalImpulse::default(),
      robot_groups(),
      ActiveEvents::COLLISION_EVENTS,
      (
        RobotState::default(),
        MovementIntent::default(),
        RobotMotion {
          // Spawn in the air so the first feet contact settles the state.
          airborne: true,
          ..default()
        },
        RobotMovement {
          walk_speed: robot.walk_speed,
          jump_impulse: robot.jump_impulse,
        },
        Shield(shield),
        ActiveHarm::default(),
        RobotInput,
        robot_input_actions(),
      ),
    ))
    .id();

  commands.entity(entity).with_children(|children| {
    children.spawn((
      FeetSensor,
      Transform::from_xyz(0.0, -robot.collider_half_height - robot.collider_half_width, 0.0),
      Collider::cuboid(robot.feet_half_width, robot.feet_half_height),
      Sensor,
      feet_groups(),
      ActiveEvents::COLLISION_EVENTS,
    ));
  });

  commands.spawn((
    FootstepsLoop,
    LevelEntity,
    looping_effect(
      asset_server.load("sounds/metal_footsteps.ogg"),
      config.audio.effects_volume,
    ),
  ));

  entity
}
