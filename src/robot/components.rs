use bevy::{platform::collections::HashMap, prelude::*};

#[derive(Component)]
pub struct Robot;

/// Locomotion state driving animation and sound. Priority: airborne beats
/// horizontal intent beats idle.
#[derive(Component, Default, Debug, Clone, Copy, PartialEq, Eq)]
pub enum RobotState {
  #[default]
  Idle,
  Running,
  Jumping,
}

impl RobotState {
  /// Animation key for this state.
  pub fn anim(self) -> &'static str {
    match self {
      RobotState::Idle => "idle",
      RobotState::Running => "run",
      RobotState::Jumping => "jump",
    }
  }
}

/// Movement intent for this frame, refreshed from input before movement
/// systems run.
#[derive(Component, Debug, Default, Clone, Copy)]
pub struct MovementIntent {
  pub left: bool,
  pub right: bool,
  pub jump: bool,
}

/// Ground/jump bookkeeping. `airborne` is set by jumping or walking off a
/// ledge and cleared when the feet sensor lands; `jump_held` is the edge
/// latch that keeps a held button from re-firing the impulse.
#[derive(Component, Debug, Default)]
pub struct RobotMotion {
  pub airborne: bool,
  pub jump_held: bool,
  pub ground_contacts: u32,
}

/// Movement tuning copied out of the config at spawn.
#[derive(Component, Debug, Clone, Copy)]
pub struct RobotMovement {
  pub walk_speed: f32,
  pub jump_impulse: f32,
}

/// Shield percentage, 0–100. Zero is terminal; the scene reacts, not the
/// robot.
#[derive(Component, Debug, Clone, Copy, PartialEq)]
pub struct Shield(pub f32);

impl Default for Shield {
  fn default() -> Self {
    Self(100.0)
  }
}

/// Active periodic-damage sources: harm collider entity -> damage rate.
/// Contact begin inserts, contact separate removes.
#[derive(Component, Debug, Default)]
pub struct ActiveHarm(pub HashMap<Entity, u32>);

impl ActiveHarm {
  /// Total shield percent lost per second.
  pub fn rate(&self) -> f32 {
    self.0.values().map(|damage| *damage as f32).sum()
  }
}

/// Marker for the robot's feet sensor child collider.
#[derive(Component)]
pub struct FeetSensor;

/// Marker for the looping footsteps audio entity.
#[derive(Component)]
pub struct FootstepsLoop;
