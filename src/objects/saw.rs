use bevy::prelude::*;

use super::Pausable;

/// Patrol phase of a saw: dwell at one end, travel, dwell, travel back.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum PatrolPhase {
  Stopped,
  Moving,
}

/// A spinning saw blade patrolling horizontally around its anchor point.
/// `movement` pixels are covered in `movement_time` seconds, with a
/// `stop_time` dwell at each end.
#[derive(Component, Debug)]
pub struct SawPatrol {
  pub origin: Vec2,
  pub movement: f32,
  pub movement_time: f32,
  pub stop_time: f32,
  /// Full turn every `rotation_time` seconds.
  pub rotation_time: f32,
  phase: PatrolPhase,
  phase_elapsed: f32,
  forward: bool,
}

impl SawPatrol {
  pub fn new(
    origin: Vec2,
    movement: f32,
    movement_time: f32,
    stop_time: f32,
    rotation_time: f32,
  ) -> Self {
    Self {
      origin,
      movement,
      movement_time,
      stop_time,
      rotation_time,
      phase: PatrolPhase::Stopped,
      phase_elapsed: 0.0,
      forward: true,
    }
  }

  /// Advances the patrol clock and returns the new x-offset from the origin.
  fn advance(&mut self, delta: f32) -> f32 {
    self.phase_elapsed += delta;

    let phase_length = match self.phase {
      PatrolPhase::Stopped => self.stop_time,
      PatrolPhase::Moving => self.movement_time,
    };
    if self.phase_elapsed >= phase_length {
      self.phase_elapsed -= phase_length;
      match self.phase {
        PatrolPhase::Stopped => self.phase = PatrolPhase::Moving,
        PatrolPhase::Moving => {
          self.phase = PatrolPhase::Stopped;
          self.forward = !self.forward;
        }
      }
    }

    let progress = match self.phase {
      PatrolPhase::Stopped => {
        if self.forward {
          0.0
        } else {
          1.0
        }
      }
      PatrolPhase::Moving => {
        let t = (self.phase_elapsed / self.movement_time).clamp(0.0, 1.0);
        if self.forward { t } else { 1.0 - t }
      }
    };

    self.movement * progress
  }
}

pub fn run_saw_patrols(
  time: Res<Time>,
  mut saws: Query<(&mut SawPatrol, &mut Transform, &Pausable)>,
) {
  for (mut saw, mut transform, pausable) in &mut saws {
    if pausable.paused {
      continue;
    }
    let delta = time.delta_secs();

    let offset = saw.advance(delta);
    transform.translation.x = saw.origin.x + offset;

    let spin = std::f32::consts::TAU / saw.rotation_time;
    transform.rotate_z(spin * delta);
  }
}

#[cfg(test)]
mod tests {
  use super::*;

  fn saw() -> SawPatrol {
    SawPatrol::new(Vec2::ZERO, 100.0, 2.0, 1.0, 0.5)
  }

  #[test]
  fn saw_dwells_before_moving() {
    let mut s = saw();
    assert_eq!(s.advance(0.5), 0.0);
    assert_eq!(s.advance(0.4), 0.0);
  }

  #[test]
  fn saw_reaches_far_end_then_returns() {
    let mut s = saw();
    s.advance(1.0); // dwell over, now moving
    let mid = s.advance(1.0);
    assert!((mid - 50.0).abs() < 1.0, "halfway through travel, got {mid}");

    s.advance(1.0); // arrives, dwells at far end
    let far = s.advance(0.5);
    assert!((far - 100.0).abs() < 1.0, "dwelling at far end, got {far}");

    s.advance(0.5); // dwell over, heading back
    let returning = s.advance(1.0);
    assert!(returning < 100.0, "should move back toward origin");
  }
}
