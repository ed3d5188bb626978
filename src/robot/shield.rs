use bevy::prelude::*;

use super::components::{ActiveHarm, Robot, Shield};

/// Continuous drain: the active harm rates are summed and applied per
/// second, clamped at zero. Zero is detected by the scene, not here.
pub fn drained(shield: f32, rate: f32, delta: f32) -> f32 {
  (shield - rate * delta).max(0.0)
}

pub fn drain_shield(time: Res<Time>, mut robots: Query<(&ActiveHarm, &mut Shield), With<Robot>>) {
  for (harm, mut shield) in &mut robots {
    let rate = harm.rate();
    if rate > 0.0 {
      shield.0 = drained(shield.0, rate, time.delta_secs());
    }
  }
}

#[cfg(test)]
mod tests {
  use super::*;

  #[test]
  fn drain_sums_active_sources() {
    let mut world = World::new();
    let a = world.spawn_empty().id();
    let b = world.spawn_empty().id();

    let mut harm = ActiveHarm::default();
    harm.0.insert(a, 10);
    harm.0.insert(b, 15);
    assert_eq!(harm.rate(), 25.0);

    harm.0.remove(&a);
    assert_eq!(harm.rate(), 15.0);
  }

  #[test]
  fn drain_is_proportional_to_time() {
    let after = drained(100.0, 25.0, 0.5);
    assert!((after - 87.5).abs() < f32::EPSILON);
  }

  #[test]
  fn shield_never_goes_negative() {
    assert_eq!(drained(3.0, 100.0, 1.0), 0.0);
  }
}
