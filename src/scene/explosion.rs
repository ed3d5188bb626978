//! Robot destruction.
//!
//! Six fragment bodies sit hidden and physics-disabled for the whole
//! level. When the shield hits zero the robot despawns, the fragments
//! take its place with scattered velocities, and five seconds later the
//! scene lands in game over.

use bevy::prelude::*;
use bevy_rapier2d::prelude::*;
use rand::Rng;

use crate::audio::{sound_effect, Music};
use crate::config::ConfigLoaded;
use crate::core::category;
use crate::level::LevelEntity;
use crate::objects::Pausable;
use crate::robot::components::FootstepsLoop;
use crate::robot::Robot;
use crate::scene::Phase;
use crate::settings::UserSettings;

pub const FRAGMENT_COUNT: usize = 6;
const GAME_OVER_DELAY: f32 = 5.0;

#[derive(Component)]
pub struct Fragment;

#[derive(Resource)]
pub struct GameOverTimer(pub Timer);

/// Spawns the dormant fragment pool for the current level.
pub fn spawn_fragments(commands: &mut Commands, asset_server: &AssetServer) {
  for index in 0..FRAGMENT_COUNT {
    commands.spawn((
      Fragment,
      LevelEntity,
      Pausable::default(),
      Sprite::from_image(asset_server.load(format!("sprites/fragment_{index}.png"))),
      Transform::default(),
      Visibility::Hidden,
      RigidBody::Dynamic,
      RigidBodyDisabled,
      Collider::ball(8.0),
      CollisionGroups::new(category::WALK_ON, category::WORLD | category::WALK_ON),
      Velocity::default(),
    ));
  }
}

pub fn explode_robot(
  mut commands: Commands,
  robots: Query<(Entity, &Transform, &Velocity), With<Robot>>,
  footsteps: Query<Entity, With<FootstepsLoop>>,
  mut fragments: Query<(Entity, &mut Transform, &mut Visibility, &mut Velocity), (With<Fragment>, Without<Robot>)>,
  music_sinks: Query<&AudioSink, With<Music>>,
  asset_server: Res<AssetServer>,
  settings: Res<UserSettings>,
  config: Res<ConfigLoaded>,
) {
  let Ok((robot, robot_transform, robot_velocity)) = robots.single() else {
    return;
  };

  for sink in &music_sinks {
    sink.pause();
  }

  if !settings.effects_muted {
    commands.spawn(sound_effect(
      asset_server.load("sounds/explosion.ogg"),
      config.audio.effects_volume,
    ));
  }

  let mut rng = rand::rng();
  for (index, (entity, mut transform, mut visibility, mut velocity)) in
    fragments.iter_mut().enumerate()
  {
    // Fan the fragments out around where the robot stood.
    let angle = index as f32 / FRAGMENT_COUNT as f32 * std::f32::consts::TAU;
    transform.translation = robot_transform.translation + Vec3::new(angle.cos(), angle.sin(), 0.0) * 12.0;
    *visibility = Visibility::Visible;
    velocity.linvel = robot_velocity.linvel
      + Vec2::new(rng.random_range(-200.0..200.0), rng.random_range(100.0..400.0));
    velocity.angvel = rng.random_range(-10.0..10.0);
    commands.entity(entity).remove::<RigidBodyDisabled>();
  }

  commands.entity(robot).despawn();
  for entity in &footsteps {
    commands.entity(entity).despawn();
  }
  commands.insert_resource(GameOverTimer(Timer::from_seconds(
    GAME_OVER_DELAY,
    TimerMode::Once,
  )));
}

pub fn tick_game_over(
  time: Res<Time>,
  mut timer: ResMut<GameOverTimer>,
  mut next_phase: ResMut<NextState<Phase>>,
) {
  if timer.0.tick(time.delta()).just_finished() {
    next_phase.set(Phase::GameOver);
  }
}
