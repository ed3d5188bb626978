use bevy::{camera::ScalingMode, prelude::*};

use crate::config::ConfigLoaded;
use crate::robot::Robot;

/// Marker component for the game camera
#[derive(Component)]
pub struct GameCamera;

/// Rectangle the camera center is allowed to move in. Computed from the map
/// pixel bounds with a half-viewport margin on each side, so the view never
/// shows past the map edge.
#[derive(Resource, Debug, Default, Clone, Copy)]
pub struct CameraBounds {
  pub min: Vec2,
  pub max: Vec2,
}

impl CameraBounds {
  pub fn from_map(map_size: Vec2, viewport: Vec2) -> Self {
    let half = viewport / 2.0;
    Self {
      min: half,
      max: map_size - half,
    }
  }
}

/// Follow bookkeeping: the camera is only re-positioned when the clamped
/// target actually moved since the last applied position.
#[derive(Resource, Debug, Default)]
pub struct CameraFollow {
  pub last_robot_position: Vec2,
  pub last_applied: Vec2,
  pub updates_applied: u32,
}

pub fn clamp_to_bounds(position: Vec2, bounds: &CameraBounds) -> Vec2 {
  position.clamp(bounds.min, bounds.max)
}

pub fn setup_camera(mut commands: Commands, config: Res<ConfigLoaded>) {
  commands.spawn((
    GameCamera,
    Camera2d,
    Camera {
      order: 0,
      clear_color: ClearColorConfig::Custom(Color::BLACK),
      ..default()
    },
    Projection::Orthographic(OrthographicProjection {
      near: -1000.0,
      far: 1000.0,
      scale: 1.0,
      viewport_origin: Vec2::new(0.5, 0.5),
      scaling_mode: ScalingMode::AutoMin {
        min_width: config.camera.viewport_width,
        min_height: config.camera.viewport_height,
      },
      area: Rect::default(),
    }),
  ));
}

/// Tracks the robot, clamped inside the map. Skips work while the robot is
/// at rest, and skips the camera write when the clamped target has not moved
/// (idle at a map edge).
pub fn camera_follow(
  robots: Query<&Transform, (With<Robot>, Without<GameCamera>)>,
  mut cameras: Query<&mut Transform, With<GameCamera>>,
  bounds: Res<CameraBounds>,
  mut follow: ResMut<CameraFollow>,
) {
  let Ok(robot_transform) = robots.single() else {
    return;
  };
  let Ok(mut camera_transform) = cameras.single_mut() else {
    return;
  };

  let robot_position = robot_transform.translation.truncate();
  if robot_position == follow.last_robot_position {
    return;
  }
  follow.last_robot_position = robot_position;

  let target = clamp_to_bounds(robot_position, &bounds);
  if target != follow.last_applied {
    camera_transform.translation.x = target.x;
    camera_transform.translation.y = target.y;
    follow.last_applied = target;
    follow.updates_applied += 1;
  }
}
