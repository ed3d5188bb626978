use bevy::prelude::*;

use super::Pausable;

/// A wall-mounted laser emitter. The beam is a child sensor collider in the
/// harm category; rotating the emitter rotates the beam with it.
#[derive(Component, Debug)]
pub struct Laser {
  /// Current beam angle in radians.
  pub angle: f32,
  /// Sweep speed in radians per second.
  pub speed: f32,
}

/// Marker for the beam child entity carrying the harm collider.
#[derive(Component)]
pub struct LaserBeam;

pub fn sweep_lasers(time: Res<Time>, mut lasers: Query<(&mut Laser, &mut Transform, &Pausable)>) {
  for (mut laser, mut transform, pausable) in &mut lasers {
    if pausable.paused {
      continue;
    }
    laser.angle += laser.speed * time.delta_secs();
    transform.rotation = Quat::from_rotation_z(laser.angle);
  }
}
