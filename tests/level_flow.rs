//! Scene-level flow tests with injected contact events: winning through an
//! armed door, harm tracking, and the explosion to game-over path.

use bevy::prelude::*;
use bevy::state::app::StatesPlugin;
use bevy_rapier2d::prelude::*;

use laserbots::config::{
  AudioConfig, CameraConfig, ConfigLoaded, PhysicsConfig, RobotConfig, WindowConfig,
};
use laserbots::core::physics::{door_groups, feet_groups, harm_groups, robot_groups, world_groups};
use laserbots::level::{LevelInfo, ObjectNames};
use laserbots::objects::{Door, Harm, ObjectKind, ObjectName};
use laserbots::robot::{ActiveHarm, Robot, RobotMotion, Shield};
use laserbots::scene::explosion::GameOverTimer;
use laserbots::scene::{LevelResult, Phase, ScenePlugin};
use laserbots::settings::UserSettings;

fn test_config() -> ConfigLoaded {
  ConfigLoaded {
    window: WindowConfig {
      width: 1280,
      height: 720,
      title: "test".into(),
    },
    camera: CameraConfig {
      viewport_width: 1280.0,
      viewport_height: 720.0,
    },
    physics: PhysicsConfig { length_unit: 50.0 },
    robot: RobotConfig {
      walk_speed: 260.0,
      jump_impulse: 520.0,
      collider_half_width: 22.0,
      collider_half_height: 24.0,
      feet_half_width: 16.0,
      feet_half_height: 4.0,
    },
    audio: AudioConfig {
      music_volume: 0.5,
      effects_volume: 0.5,
    },
  }
}

fn scene_app() -> App {
  let mut app = App::new();
  app.add_plugins((MinimalPlugins, StatesPlugin, AssetPlugin::default()));
  app.init_asset::<AudioSource>();
  app.add_message::<CollisionEvent>();
  app.init_resource::<ButtonInput<KeyCode>>();
  app.insert_resource(UserSettings::default());
  app.insert_resource(test_config());
  app.init_resource::<ObjectNames>();
  app.insert_resource(LevelInfo {
    name: "test level".into(),
    time_limit: 120,
    size: Vec2::new(3200.0, 1280.0),
  });
  app.add_plugins(ScenePlugin);
  app
}

fn set_phase(app: &mut App, phase: Phase) {
  app
    .world_mut()
    .resource_mut::<NextState<Phase>>()
    .set(phase);
  app.update();
}

fn phase(app: &App) -> Phase {
  *app.world().resource::<State<Phase>>().get()
}

fn contact(app: &mut App, a: Entity, b: Entity) {
  app.world_mut().write_message(CollisionEvent::Started(
    a,
    b,
    bevy_rapier2d::rapier::geometry::CollisionEventFlags::SENSOR,
  ));
}

fn separation(app: &mut App, a: Entity, b: Entity) {
  app.world_mut().write_message(CollisionEvent::Stopped(
    a,
    b,
    bevy_rapier2d::rapier::geometry::CollisionEventFlags::SENSOR,
  ));
}

fn spawn_robot_body(app: &mut App, shield: f32) -> Entity {
  app
    .world_mut()
    .spawn((
      Robot,
      RobotMotion::default(),
      ActiveHarm::default(),
      Shield(shield),
      Transform::default(),
      Velocity::default(),
      robot_groups(),
    ))
    .id()
}

#[test]
fn touching_an_armed_open_door_completes_the_level() {
  let mut app = scene_app();
  let robot = spawn_robot_body(&mut app, 100.0);
  let door = app
    .world_mut()
    .spawn((
      ObjectKind::Door,
      Door {
        on: true,
        open: false,
      },
      door_groups(),
    ))
    .id();
  set_phase(&mut app, Phase::Playing);

  // First touch opens the armed door.
  contact(&mut app, robot, door);
  app.update();
  assert!(app.world().get::<Door>(door).unwrap().open);
  assert_eq!(phase(&app), Phase::Playing);

  // Second touch wins. The transition applies on the following frame.
  contact(&mut app, door, robot);
  app.update();
  app.update();
  assert_eq!(phase(&app), Phase::Completed);

  // Untouched shield, well under the time limit.
  assert_eq!(app.world().resource::<LevelResult>().stars, 3);
}

#[test]
fn unarmed_door_does_not_complete_the_level() {
  let mut app = scene_app();
  let robot = spawn_robot_body(&mut app, 100.0);
  let door = app
    .world_mut()
    .spawn((ObjectKind::Door, Door::default(), door_groups()))
    .id();
  set_phase(&mut app, Phase::Playing);

  contact(&mut app, robot, door);
  app.update();
  contact(&mut app, robot, door);
  app.update();
  app.update();

  assert!(!app.world().get::<Door>(door).unwrap().open);
  assert_eq!(phase(&app), Phase::Playing);
}

#[test]
#[should_panic(expected = "door_07")]
fn door_category_collider_without_door_panics_with_its_name() {
  let mut app = scene_app();
  let robot = spawn_robot_body(&mut app, 100.0);
  let broken = app
    .world_mut()
    .spawn((ObjectName("door_07".into()), door_groups()))
    .id();
  set_phase(&mut app, Phase::Playing);

  contact(&mut app, robot, broken);
  app.update();
}

#[test]
fn harm_contact_tracks_begin_and_separate() {
  let mut app = scene_app();
  let robot = spawn_robot_body(&mut app, 100.0);
  let beam = app
    .world_mut()
    .spawn((Harm { damage: 40 }, harm_groups()))
    .id();
  set_phase(&mut app, Phase::Playing);

  contact(&mut app, beam, robot);
  app.update();
  assert_eq!(app.world().get::<ActiveHarm>(robot).unwrap().rate(), 40.0);

  separation(&mut app, robot, beam);
  app.update();
  assert_eq!(app.world().get::<ActiveHarm>(robot).unwrap().rate(), 0.0);
}

#[test]
fn feet_contacts_drive_the_airborne_flag() {
  let mut app = scene_app();
  let robot = spawn_robot_body(&mut app, 100.0);
  app.world_mut().get_mut::<RobotMotion>(robot).unwrap().airborne = true;
  let feet = app.world_mut().spawn(feet_groups()).id();
  let ground = app.world_mut().spawn(world_groups()).id();
  let crate_top = app
    .world_mut()
    .spawn(laserbots::core::physics::walk_on_groups())
    .id();
  set_phase(&mut app, Phase::Playing);

  contact(&mut app, feet, ground);
  contact(&mut app, crate_top, feet);
  app.update();
  let motion = app.world().get::<RobotMotion>(robot).unwrap();
  assert!(!motion.airborne);
  assert_eq!(motion.ground_contacts, 2);

  // Leaving one surface keeps the robot grounded on the other.
  separation(&mut app, feet, ground);
  app.update();
  assert!(!app.world().get::<RobotMotion>(robot).unwrap().airborne);

  separation(&mut app, feet, crate_top);
  app.update();
  assert!(app.world().get::<RobotMotion>(robot).unwrap().airborne);
}

#[test]
fn depleted_shield_explodes_then_times_out_to_game_over() {
  let mut app = scene_app();
  let robot = spawn_robot_body(&mut app, 100.0);
  set_phase(&mut app, Phase::Playing);

  app.world_mut().get_mut::<Shield>(robot).unwrap().0 = 0.0;
  app.update(); // shield check queues Exploding
  app.update(); // transition runs, robot blows up
  assert_eq!(phase(&app), Phase::Exploding);
  assert!(app.world().get_entity(robot).is_err());

  let timer = app.world().resource::<GameOverTimer>();
  assert_eq!(timer.0.duration().as_secs_f32(), 5.0);

  // Force the delay over instead of sleeping through it.
  app.insert_resource(GameOverTimer(Timer::from_seconds(0.0, TimerMode::Once)));
  app.update();
  app.update();
  assert_eq!(phase(&app), Phase::GameOver);
}
