pub mod camera;
pub mod physics;

use bevy::prelude::*;
pub use camera::{CameraBounds, CameraFollow};
pub use physics::category;

pub struct CorePlugin {
  pub debug_physics: bool,
  pub length_unit: f32,
}

impl Plugin for CorePlugin {
  fn build(&self, app: &mut App) {
    app
      .init_resource::<CameraBounds>()
      .init_resource::<CameraFollow>()
      .add_plugins(physics::PhysicsPlugin {
        debug_render: self.debug_physics,
        length_unit: self.length_unit,
      })
      .add_systems(Startup, camera::setup_camera)
      .add_systems(
        PostUpdate,
        camera::camera_follow.run_if(in_state(crate::scene::Phase::Playing)),
      );
  }
}
