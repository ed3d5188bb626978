mod laser;
mod saw;
pub mod switches;

use bevy::prelude::*;
pub use laser::{Laser, LaserBeam};
pub use saw::SawPatrol;

use crate::scene::Phase;

/// Stable per-object key assigned at level load. Unique within a level.
#[derive(Component, Debug, Clone)]
pub struct ObjectName(pub String);

/// Type tag for placed objects; drives activation dispatch.
#[derive(Component, Debug, Clone, Copy, PartialEq, Eq)]
pub enum ObjectKind {
  Robot,
  Laser,
  Saw,
  Barrel,
  Box,
  Switch,
  Door,
  Harm,
}

impl ObjectKind {
  pub fn parse(kind: &str) -> Option<Self> {
    match kind {
      "robot" => Some(Self::Robot),
      "laser" => Some(Self::Laser),
      "saw" => Some(Self::Saw),
      "barrel" => Some(Self::Barrel),
      "box" => Some(Self::Box),
      "switch" => Some(Self::Switch),
      "door" => Some(Self::Door),
      "harm" => Some(Self::Harm),
      _ => None,
    }
  }
}

/// Per-object pause flag. The pause pass flips this on every owned object
/// exactly once; behavior systems skip paused objects.
#[derive(Component, Debug, Default)]
pub struct Pausable {
  pub paused: bool,
}

/// A switch is monotonic: once on it never turns off within a level. The
/// target name is resolved lazily at activation time.
#[derive(Component, Debug, Clone)]
pub struct Switch {
  pub on: bool,
  pub target: String,
}

impl Switch {
  pub fn new(target: impl Into<String>) -> Self {
    Self {
      on: false,
      target: target.into(),
    }
  }
}

/// `on` arms the door (set by a switch); `open` is the physical state the
/// robot observes.
#[derive(Component, Debug, Default, Clone)]
pub struct Door {
  pub on: bool,
  pub open: bool,
}

/// Damage rate (shield percent per second) applied while the robot stays in
/// contact with this collider.
#[derive(Component, Debug, Clone, Copy)]
pub struct Harm {
  pub damage: u32,
}

pub struct ObjectsPlugin;

impl Plugin for ObjectsPlugin {
  fn build(&self, app: &mut App) {
    app.add_systems(
      Update,
      (laser::sweep_lasers, saw::run_saw_patrols).run_if(in_state(Phase::Playing)),
    );
  }
}
