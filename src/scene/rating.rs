/// Star rating for a completed level.
///
/// One star for finishing at all, two for beating the level's time limit,
/// three for doing so with the shield untouched.
pub fn star_rating(total_time: f32, time_limit: u32, shield: f32) -> u8 {
  let mut stars = 1;
  if total_time <= time_limit as f32 {
    stars = 2;
    if shield >= 100.0 {
      stars = 3;
    }
  }
  stars
}

#[cfg(test)]
mod tests {
  use super::*;

  #[test]
  fn over_the_limit_is_one_star() {
    assert_eq!(star_rating(121.0, 120, 100.0), 1);
  }

  #[test]
  fn under_the_limit_with_damage_is_two_stars() {
    assert_eq!(star_rating(90.0, 120, 80.0), 2);
  }

  #[test]
  fn exactly_on_the_limit_still_counts() {
    assert_eq!(star_rating(120.0, 120, 100.0), 3);
  }

  #[test]
  fn untouched_shield_under_the_limit_is_three_stars() {
    assert_eq!(star_rating(30.0, 120, 100.0), 3);
  }
}
