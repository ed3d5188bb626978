use bevy::prelude::*;
use bevy_rapier2d::prelude::*;

/// Collision categories. Every collider belongs to exactly one of these;
/// contact dispatch relies on that to resolve which side of a contact pair
/// is which.
pub mod category {
  use bevy_rapier2d::prelude::Group;

  pub const ROBOT: Group = Group::GROUP_1;
  pub const FEET: Group = Group::GROUP_2;
  pub const WORLD: Group = Group::GROUP_3;
  pub const WALK_ON: Group = Group::GROUP_4;
  pub const DOOR: Group = Group::GROUP_5;
  pub const SWITCH: Group = Group::GROUP_6;
  pub const HARM: Group = Group::GROUP_7;
}

pub struct PhysicsPlugin {
  pub debug_render: bool,
  pub length_unit: f32,
}

impl Plugin for PhysicsPlugin {
  fn build(&self, app: &mut App) {
    app.add_plugins(
      RapierPhysicsPlugin::<NoUserData>::default().with_length_unit(self.length_unit),
    );

    if self.debug_render {
      app.add_plugins(RapierDebugRenderPlugin::default());
    }
  }
}

/// Robot body: collides with the world and props, generates contact events
/// against doors, switches and harm volumes.
pub fn robot_groups() -> CollisionGroups {
  CollisionGroups::new(
    category::ROBOT,
    category::WORLD | category::WALK_ON | category::DOOR | category::SWITCH | category::HARM,
  )
}

/// Feet sensor: only cares about surfaces the robot can stand on.
pub fn feet_groups() -> CollisionGroups {
  CollisionGroups::new(category::FEET, category::WORLD | category::WALK_ON)
}

pub fn world_groups() -> CollisionGroups {
  CollisionGroups::new(category::WORLD, Group::ALL)
}

pub fn walk_on_groups() -> CollisionGroups {
  CollisionGroups::new(category::WALK_ON, Group::ALL)
}

pub fn door_groups() -> CollisionGroups {
  CollisionGroups::new(category::DOOR, category::ROBOT)
}

pub fn switch_groups() -> CollisionGroups {
  CollisionGroups::new(category::SWITCH, category::ROBOT)
}

pub fn harm_groups() -> CollisionGroups {
  CollisionGroups::new(category::HARM, category::ROBOT)
}

/// Enables or disables physics stepping on every simulation context.
pub fn apply_physics_active(active: bool, configs: &mut Query<&mut RapierConfiguration>) {
  for mut config in configs.iter_mut() {
    config.physics_pipeline_active = active;
  }
}
