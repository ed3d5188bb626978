pub mod components;
pub mod movement;
mod shield;
mod spawn;

use bevy::prelude::*;
use bevy_rapier2d::prelude::*;
pub use components::{ActiveHarm, FeetSensor, MovementIntent, Robot, RobotMotion, RobotState, Shield};
pub use spawn::spawn_robot;

use crate::scene::Phase;

pub struct RobotPlugin;

impl Plugin for RobotPlugin {
  fn build(&self, app: &mut App) {
    app
      .add_systems(
        FixedUpdate,
        (
          movement::read_intent,
          movement::apply_movement,
          movement::apply_jump,
          movement::update_state,
        )
          .chain()
          .before(PhysicsSet::SyncBackend)
          .run_if(in_state(Phase::Playing)),
      )
      .add_systems(Update, shield::drain_shield.run_if(in_state(Phase::Playing)));
  }
}
